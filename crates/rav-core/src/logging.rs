//! Logging init: tracing to stderr.
//!
//! Stderr only. The verification report owns stdout and automation parses
//! it, so log lines must never interleave with it.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr. Honors `RUST_LOG`; without it,
/// info globally and debug for rav's own crates. Call once, before dispatch.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rav=debug,rav_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
