use crate::config::{AppConfig, AppEnvironment};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber could not be installed: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber on stderr so stdout carries only command
/// output. `RUST_LOG` wins over the configured level. Development gets
/// colored output with targets; other environments get compact plain lines.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.telemetry.log_level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.environment == AppEnvironment::Development {
        builder.with_target(true).with_ansi(true).try_init()
    } else {
        builder.with_target(false).with_ansi(false).compact().try_init()
    };
    installed.map_err(TelemetryError::Subscriber)
}

/// A bare level such as `debug` applies to this crate only; anything with a
/// `=` or `,` is taken as a full filter directive.
fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directive = if log_level.contains('=') || log_level.contains(',') {
        log_level.to_string()
    } else {
        format!("warn,manhattan_realty={log_level},realty={log_level}")
    };
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}
