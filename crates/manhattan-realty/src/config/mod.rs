use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_CATALOG_PATH: &str = "data/properties.txt";
const DEFAULT_SEARCH_RADIUS: i32 = 8;

/// Distinguishes runtime behavior for different stages of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the engine and its command line front end.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("REALTY_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let source = env::var("REALTY_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH));

        let default_radius = match env::var("REALTY_SEARCH_RADIUS") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|radius| *radius >= 0)
                .ok_or(ConfigError::InvalidRadius { value: raw })?,
            Err(_) => DEFAULT_SEARCH_RADIUS,
        };

        let log_level = env::var("REALTY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            catalog: CatalogConfig { source },
            search: SearchConfig { default_radius },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the initial property listing is read from.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub source: PathBuf,
}

/// Defaults for radius searches when the caller does not pass one.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub default_radius: i32,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRadius { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRadius { value } => write!(
                f,
                "REALTY_SEARCH_RADIUS must be a non-negative integer (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
