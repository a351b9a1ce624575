use super::radius::properties_in_radius;
use super::SearchError;
use crate::catalog::Catalog;
use crate::property::Property;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keeps properties whose sale status matches `sold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    sold: bool,
}

impl StatusFilter {
    pub fn new(sold: bool) -> Self {
        Self { sold }
    }

    pub fn search(
        &self,
        catalog: &Catalog,
        center: &[i32],
        radius: i32,
    ) -> Result<Vec<Property>, SearchError> {
        let mut found = properties_in_radius(catalog, center, radius)?;
        found.retain(|property| property.is_sold() == self.sold);
        Ok(found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComparison {
    Higher,
    Lower,
    Equal,
}

impl PriceComparison {
    fn accepts(self, price: f64, target: f64) -> bool {
        match self {
            Self::Higher => price > target,
            Self::Lower => price < target,
            Self::Equal => price == target,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Higher => "higher",
            Self::Lower => "lower",
            Self::Equal => "equal",
        }
    }
}

impl fmt::Display for PriceComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceComparison {
    type Err = SearchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGHER" => Ok(Self::Higher),
            "LOWER" => Ok(Self::Lower),
            "EQUAL" => Ok(Self::Equal),
            _ => Err(SearchError::UnknownComparison(value.to_string())),
        }
    }
}

/// Keeps properties whose total price compares against `target` as asked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceFilter {
    target: f64,
    comparison: PriceComparison,
}

impl PriceFilter {
    pub fn new(target: f64, comparison: PriceComparison) -> Result<Self, SearchError> {
        if target.is_nan() || target < 0.0 {
            return Err(SearchError::NegativePrice(target));
        }
        Ok(Self { target, comparison })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn comparison(&self) -> PriceComparison {
        self.comparison
    }

    pub fn search(
        &self,
        catalog: &Catalog,
        center: &[i32],
        radius: i32,
    ) -> Result<Vec<Property>, SearchError> {
        let mut found = properties_in_radius(catalog, center, radius)?;
        found.retain(|property| self.comparison.accepts(property.total_price(), self.target));
        Ok(found)
    }
}

/// Mean total price of the properties in range; `0.0` when none are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AveragePrice;

impl AveragePrice {
    pub fn search(
        &self,
        catalog: &Catalog,
        center: &[i32],
        radius: i32,
    ) -> Result<f64, SearchError> {
        let found = properties_in_radius(catalog, center, radius)?;
        if found.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = found.iter().map(Property::total_price).sum();
        Ok(sum / found.len() as f64)
    }
}

/// Interchangeable search algorithms over a radius-filtered catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStrategy {
    Status(StatusFilter),
    Price(PriceFilter),
    AveragePrice(AveragePrice),
}

impl SearchStrategy {
    pub fn by_status(sold: bool) -> Self {
        Self::Status(StatusFilter::new(sold))
    }

    pub fn by_price(target: f64, comparison: PriceComparison) -> Result<Self, SearchError> {
        PriceFilter::new(target, comparison).map(Self::Price)
    }

    pub fn average_price() -> Self {
        Self::AveragePrice(AveragePrice)
    }

    pub fn search(
        &self,
        catalog: &Catalog,
        center: &[i32],
        radius: i32,
    ) -> Result<SearchOutcome, SearchError> {
        match self {
            Self::Status(filter) => filter
                .search(catalog, center, radius)
                .map(SearchOutcome::Matches),
            Self::Price(filter) => filter
                .search(catalog, center, radius)
                .map(SearchOutcome::Matches),
            Self::AveragePrice(average) => average
                .search(catalog, center, radius)
                .map(SearchOutcome::Average),
        }
    }
}

/// Result shape depends on the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Matches(Vec<Property>),
    Average(f64),
}

impl SearchOutcome {
    pub fn matches(&self) -> Option<&[Property]> {
        match self {
            Self::Matches(properties) => Some(properties),
            Self::Average(_) => None,
        }
    }

    pub fn average(&self) -> Option<f64> {
        match self {
            Self::Average(value) => Some(*value),
            Self::Matches(_) => None,
        }
    }
}
