//! Structured logging setup.
//!
//! The engine logs through `tracing` macros only. Binaries call
//! [`init_subscriber`] once; tests use [`capture_logs`] to assert on the
//! warnings the engine emits when it degrades instead of failing.
//!
//! Output always goes to stderr: the hook binary owns stdout for the
//! processed prompt.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Initialize the global tracing subscriber with stderr output only.
///
/// `RUST_LOG` takes precedence over `level` when set. Subsequent calls are
/// no-ops.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}
