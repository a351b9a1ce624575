//! Manhattan realty transaction engine.
//!
//! An in-memory [`catalog::Catalog`] of properties addressed by grid
//! coordinates, radius-bounded [`search`] strategies over it, and a
//! [`deal`] pipeline that prices optional services around a sale and marks
//! the property sold. Sellers removing listings notify brokers through
//! [`notify`].

pub mod catalog;
pub mod config;
pub mod deal;
pub mod error;
pub mod format;
pub mod notify;
pub mod participants;
pub mod property;
pub mod search;
pub mod telemetry;

pub use catalog::{Catalog, CatalogError, LoadError};
pub use deal::{execute_deal, DealError, DealParties, DealReceipt, Service};
pub use error::{AppError, FailureKind};
pub use format::Decimal;
pub use property::{Address, Property, PropertyError};
pub use search::{PriceComparison, SearchContext, SearchError, SearchOutcome, SearchStrategy};
