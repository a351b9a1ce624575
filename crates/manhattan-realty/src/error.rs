use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::deal::DealError;
use crate::participants::RegistryError;
use crate::search::SearchError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Coarse classification shared by every domain error so callers can react
/// to the category without matching each module's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidArgument,
    Malformed,
    Conflict,
    IllegalState,
    Io,
}

impl FailureKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid argument",
            Self::Malformed => "malformed input",
            Self::Conflict => "conflict",
            Self::IllegalState => "illegal state",
            Self::Io => "i/o failure",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Catalog(CatalogError),
    Search(SearchError),
    Deal(DealError),
    Registry(RegistryError),
}

impl AppError {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            AppError::Catalog(err) => Some(err.kind()),
            AppError::Search(err) => Some(err.kind()),
            AppError::Deal(err) => Some(err.kind()),
            AppError::Registry(err) => Some(err.kind()),
            AppError::Io(_) => Some(FailureKind::Io),
            AppError::Config(_) | AppError::Telemetry(_) => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Search(err) => write!(f, "search error: {}", err),
            AppError::Deal(err) => write!(f, "deal error: {}", err),
            AppError::Registry(err) => write!(f, "participant error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Search(err) => Some(err),
            AppError::Deal(err) => Some(err),
            AppError::Registry(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<SearchError> for AppError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

impl From<DealError> for AppError {
    fn from(value: DealError) -> Self {
        Self::Deal(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}
