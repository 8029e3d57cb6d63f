//! Structured logging setup.
//!
//! The human-readable report owns stdout; tracing diagnostics go to stderr
//! so redirecting the report never mixes in log lines. Filter override via
//! PGPROBE_LOG or RUST_LOG.

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging.
///
/// Call once at startup, before any service is constructed.
pub fn init_logging() {
    let env_filter = build_env_filter();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

/// Build the environment filter: PGPROBE_LOG > RUST_LOG > default.
fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env("PGPROBE_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter()))
}

/// Get the default log filter based on build type.
pub fn default_log_filter() -> &'static str {
    #[cfg(debug_assertions)]
    {
        "debug,pgprobe=trace,pgprobe_core=trace,tokio_postgres=warn"
    }
    #[cfg(not(debug_assertions))]
    {
        "warn,pgprobe=info,pgprobe_core=info,tokio_postgres=warn"
    }
}
