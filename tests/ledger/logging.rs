//! Logging Tests
//!
//! Invocation logs carry identifiers and counts, never stored values.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::common::*;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn private_values_stay_out_of_logs() {
    let captured = Captured::default();
    let writer = captured.clone();
    let _guard = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
        .set_default();

    let store = Arc::new(MemoryStore::new());
    let executor = Executor::from_config(store, &coffee_config()).unwrap();
    let secret = "s3cr3t-price-4711";

    call(&executor, &caller(BOB), "setPrivate", &["price", secret]);
    call(&executor, &caller(BOB), "getPrivate", &["price"]);
    call(&executor, &caller(BOB), "insert_or_modify", &["lots", "l1", secret]);
    call(&executor, &caller(AUDIT), "get_table_private_scan", &["lots", "0"]);

    let logs = captured.text();
    assert!(logs.contains("invocation succeeded"), "{}", logs);
    assert!(logs.contains("arg_count"), "{}", logs);
    assert!(!logs.contains(secret), "{}", logs);
}
