//! Logging initialization
//!
//! - `LOG_FORMAT=json`: structured JSON lines
//! - default: human-readable output
//!
//! Verbosity comes from `RUST_LOG` (default `info`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

pub fn init_logging(format: LogFormat) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  // Logs go to stderr so command output on stdout stays machine-readable
  match format {
    LogFormat::Json => {
      tracing_subscriber::registry()
        .with(env_filter)
        .with(
          fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr),
        )
        .init();
    }
    LogFormat::Pretty => {
      tracing_subscriber::registry()
        .with(env_filter)
        .with(
          fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(std::io::stderr),
        )
        .init();
    }
  }
}
