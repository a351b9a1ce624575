use super::SearchError;
use crate::catalog::Catalog;
use crate::property::{Address, Property};

/// Manhattan distance on the street/avenue grid. Subdivision coordinates do
/// not contribute.
pub fn manhattan_distance(a: &Address, b: &Address) -> i64 {
    let streets = (i64::from(a.street()) - i64::from(b.street())).abs();
    let avenues = (i64::from(a.avenue()) - i64::from(b.avenue())).abs();
    streets + avenues
}

/// Snapshot of every catalog property within `radius` blocks of `center`.
pub fn properties_in_radius(
    catalog: &Catalog,
    center: &[i32],
    radius: i32,
) -> Result<Vec<Property>, SearchError> {
    let center = validate_query(center, radius)?;
    let radius = i64::from(radius);

    Ok(catalog
        .iter()
        .filter(|property| manhattan_distance(&center, property.address()) <= radius)
        .cloned()
        .collect())
}

fn validate_query(center: &[i32], radius: i32) -> Result<Address, SearchError> {
    let center = Address::try_from(center).map_err(|_| SearchError::InvalidCenter {
        found: center.len(),
    })?;
    if radius < 0 {
        return Err(SearchError::NegativeRadius(radius));
    }
    Ok(center)
}
