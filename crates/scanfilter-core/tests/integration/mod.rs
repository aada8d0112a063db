//! Integration tests for filter expression parsing

mod concurrency_tests;
mod roundtrip_tests;
mod serde_tests;

/// Route parser diagnostics to the test output; set `RUST_LOG=trace` to see them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
