use std::io;

use tracing_subscriber::{EnvFilter, fmt};

use crate::infrastructure::config::{AppConfig, LogFormat};

/// `RUST_LOG` wins; otherwise the configured directive, then `warn`.
fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber on stderr so stdout stays free for command
/// output. A second call is a no-op.
pub fn init_logging(config: &AppConfig) {
    let filter = env_filter(&config.log_filter);
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    let _ = match config.log_format {
        LogFormat::Json => builder
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init(),
        LogFormat::Compact => builder.compact().without_time().try_init(),
    };
}
