//! Radius-bounded property search with interchangeable strategies.

mod context;
mod radius;
mod strategy;

pub use context::SearchContext;
pub use radius::{manhattan_distance, properties_in_radius};
pub use strategy::{
    AveragePrice, PriceComparison, PriceFilter, SearchOutcome, SearchStrategy, StatusFilter,
};

use crate::error::FailureKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("center address must contain at least street and avenue coordinates (found {found})")]
    InvalidCenter { found: usize },
    #[error("radius cannot be negative (got {0})")]
    NegativeRadius(i32),
    #[error("price cannot be negative (got {0})")]
    NegativePrice(f64),
    #[error("unknown price comparison '{0}' (expected higher, lower, or equal)")]
    UnknownComparison(String),
    #[error("search strategy not set")]
    NoStrategy,
}

impl SearchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SearchError::NoStrategy => FailureKind::IllegalState,
            _ => FailureKind::InvalidArgument,
        }
    }
}
