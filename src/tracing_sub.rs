use tracing::Level;

/// Initialize the tracing subscriber for the compositor process.
///
/// Events go to stderr so they survive even when no output is connected yet.
/// Safe to call multiple times; subsequent calls are no-ops for the global
/// subscriber.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
