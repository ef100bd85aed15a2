//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`, defaulting to `info` so the backdrop
/// system's warnings are visible without extra setup.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Initialize logging for tests. Safe to call from every test.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
