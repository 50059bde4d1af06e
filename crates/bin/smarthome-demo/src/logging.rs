//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber, writing to stderr so stdout only carries
/// the scenario transcript.
///
/// An invalid `filter` falls back to `warn`. Calling this twice is harmless.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
