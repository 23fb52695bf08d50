use std::env;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://strength-log.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  Invalid { key: String, value: String },
}

/// ---------------------------------------------------------------------------
/// App Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  /// Human-readable, colored output
  #[default]
  Pretty,
  /// Structured JSON lines
  Json,
}

impl std::str::FromStr for LogFormat {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pretty" => Ok(Self::Pretty),
      "json" => Ok(Self::Json),
      _ => Err(format!("Unknown log format: {}", s)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub max_connections: u32,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      log_format: LogFormat::default(),
    }
  }
}

impl AppConfig {
  /// Read configuration from the environment (call `dotenvy::dotenv()` first
  /// to pick up a `.env` file). Unset variables fall back to defaults.
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
      Ok(raw) => match raw.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(invalid("DATABASE_MAX_CONNECTIONS", raw)),
      },
      Err(_) => defaults.max_connections,
    };

    let log_format = match env::var("LOG_FORMAT") {
      Ok(raw) => raw.parse().map_err(|_| invalid("LOG_FORMAT", raw))?,
      Err(_) => defaults.log_format,
    };

    Ok(Self {
      database_url,
      max_connections,
      log_format,
    })
  }
}

fn invalid(key: &str, value: String) -> ConfigError {
  ConfigError::Invalid {
    key: key.to_string(),
    value,
  }
}
