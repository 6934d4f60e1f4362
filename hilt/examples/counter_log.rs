//! Compound-capability demo: a counter whose mutations are audited through
//! the host I/O channel.
//!
//! Run with: RUST_LOG=debug cargo run --example counter_log

use hilt::{eval_state, run_with_io, LoggedCounter, StateOps};
use tracing_subscriber::EnvFilter;

fn bump(counter: &impl StateOps<i64>, by: i64) {
    counter.modify(|v| *v += by);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let total = run_with_io(|io| {
        eval_state(0i64, |cell| {
            let counter = LoggedCounter::new(*cell, io);
            bump(&counter, 2);
            bump(&counter, 40);
            Ok(counter.get())
        })
    });
    println!("final count: {total}");
}
