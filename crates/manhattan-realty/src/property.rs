use crate::format::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Grid location of a property: street, avenue, then optional sub-unit
/// subdivisions (building, floor, unit, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct Address(Vec<i32>);

impl Address {
    pub const MIN_COORDINATES: usize = 2;

    pub fn new(coordinates: impl Into<Vec<i32>>) -> Result<Self, PropertyError> {
        let coordinates = coordinates.into();
        if coordinates.len() < Self::MIN_COORDINATES {
            return Err(PropertyError::AddressTooShort {
                found: coordinates.len(),
            });
        }
        Ok(Self(coordinates))
    }

    pub fn street(&self) -> i32 {
        self.0[0]
    }

    pub fn avenue(&self) -> i32 {
        self.0[1]
    }

    /// Coordinates past street and avenue.
    pub fn subdivisions(&self) -> &[i32] {
        &self.0[2..]
    }

    pub fn coordinates(&self) -> &[i32] {
        &self.0
    }
}

impl Deref for Address {
    type Target = [i32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[i32]> for Address {
    fn as_ref(&self) -> &[i32] {
        &self.0
    }
}

impl TryFrom<Vec<i32>> for Address {
    type Error = PropertyError;

    fn try_from(value: Vec<i32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[i32]> for Address {
    type Error = PropertyError;

    fn try_from(value: &[i32]) -> Result<Self, Self::Error> {
        Self::new(value.to_vec())
    }
}

impl From<Address> for Vec<i32> {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, coordinate) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{coordinate}")?;
        }
        write!(f, "]")
    }
}

/// A property listed for sale. The address is fixed for the lifetime of the
/// record; everything else can be replaced through the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    address: Address,
    area: f64,
    price_per_square_meter: f64,
    sold: bool,
}

impl Property {
    pub fn new(
        address: impl Into<Vec<i32>>,
        area: f64,
        price_per_square_meter: f64,
        sold: bool,
    ) -> Result<Self, PropertyError> {
        let address = Address::new(address)?;
        Self::with_address(address, area, price_per_square_meter, sold)
    }

    pub fn with_address(
        address: Address,
        area: f64,
        price_per_square_meter: f64,
        sold: bool,
    ) -> Result<Self, PropertyError> {
        if area.is_nan() || area <= 0.0 {
            return Err(PropertyError::NonPositiveArea(area));
        }
        if price_per_square_meter.is_nan() || price_per_square_meter <= 0.0 {
            return Err(PropertyError::NonPositivePrice(price_per_square_meter));
        }

        Ok(Self {
            address,
            area,
            price_per_square_meter,
            sold,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn price_per_square_meter(&self) -> f64 {
        self.price_per_square_meter
    }

    pub fn is_sold(&self) -> bool {
        self.sold
    }

    pub fn total_price(&self) -> f64 {
        self.area * self.price_per_square_meter
    }

    pub(crate) fn mark_sold(&mut self) {
        self.sold = true;
    }

    pub fn set_sold(&mut self, sold: bool) {
        self.sold = sold;
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "address: {} area: {} pricePerSquareMeter: {} status: {}",
            self.address,
            Decimal(self.area),
            Decimal(self.price_per_square_meter),
            self.sold
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("address must contain at least street and avenue coordinates (found {found})")]
    AddressTooShort { found: usize },
    #[error("area must be positive (got {0})")]
    NonPositiveArea(f64),
    #[error("price per square meter must be positive (got {0})")]
    NonPositivePrice(f64),
}
