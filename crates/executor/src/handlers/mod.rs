//! Command handlers organized by primitive category.
//!
//! | Module | Commands | Primitive |
//! |--------|----------|-----------|
//! | `kv` | 5 | KvStore (public state) |
//! | `table` | 6 | TableStore (public state) |
//! | `private` | 10 | PrivateData (caller's collection) |

pub mod kv;
pub mod private;
pub mod table;
