//! Logging and tracing initialization.

use tracing::Dispatch;

use crate::config::LoggingConfig;

/// Build a tracing dispatcher for the given configuration without installing it.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn build_dispatch(config: &LoggingConfig) -> Dispatch {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        Dispatch::new(subscriber)
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        Dispatch::new(subscriber)
    }
}
