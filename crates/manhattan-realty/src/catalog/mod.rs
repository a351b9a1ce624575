//! The property catalog: single source of truth for every listed property.
//!
//! Addresses are unique across the catalog at all times. Readers get owned
//! snapshots; the only paths that touch stored records are [`Catalog::update`],
//! [`Catalog::remove`], and the deal pipeline through [`Catalog::get_mut`].

mod loader;

pub use loader::LoadError;

use crate::error::FailureKind;
use crate::property::{Address, Property};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already validated properties.
    pub fn from_properties(
        properties: impl IntoIterator<Item = Property>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for property in properties {
            catalog.insert(property)?;
        }
        Ok(catalog)
    }

    /// Append every property listed in the file at `path`.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LoadError::EmptyPath.into());
        }

        let file = std::fs::File::open(path).map_err(LoadError::from)?;
        let added = self.load_reader(file)?;
        info!(path = %path.display(), added, total = self.len(), "catalog loaded");
        Ok(added)
    }

    /// Append every property listed in `reader`. The batch is validated in
    /// full before anything is committed; a failing batch leaves the catalog
    /// untouched.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<usize, CatalogError> {
        let parsed = loader::parse_listing(reader)?;

        let mut seen: HashSet<&Address> = self.properties.iter().map(Property::address).collect();
        for entry in &parsed {
            if !seen.insert(entry.property.address()) {
                warn!(
                    line = entry.line,
                    address = %entry.property.address(),
                    "discarding batch with duplicate address"
                );
                return Err(LoadError::DuplicateAddress {
                    line: entry.line,
                    address: entry.property.address().clone(),
                }
                .into());
            }
        }

        let added = parsed.len();
        self.properties
            .extend(parsed.into_iter().map(|entry| entry.property));
        Ok(added)
    }

    /// Add a single property, rejecting an address that is already listed.
    pub fn insert(&mut self, property: Property) -> Result<(), CatalogError> {
        if self.position(property.address()).is_some() {
            return Err(CatalogError::AddressTaken {
                address: property.address().clone(),
            });
        }
        debug!(address = %property.address(), "property listed");
        self.properties.push(property);
        Ok(())
    }

    /// Snapshot of every property, in listing order.
    pub fn list_all(&self) -> Vec<Property> {
        self.properties.clone()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Copy of the property stored at exactly `address`, if any.
    pub fn find(&self, address: &[i32]) -> Result<Option<Property>, CatalogError> {
        validate_address(address)?;
        Ok(self
            .position(address)
            .map(|index| self.properties[index].clone()))
    }

    pub(crate) fn get_mut(&mut self, address: &[i32]) -> Option<&mut Property> {
        self.properties
            .iter_mut()
            .find(|property| property.address().coordinates() == address)
    }

    /// Remove the property whose full address equals `address`.
    pub fn remove(&mut self, address: &[i32]) -> Result<bool, CatalogError> {
        self.take(address).map(|removed| removed.is_some())
    }

    /// Like [`Catalog::remove`], handing back the removed property.
    pub fn take(&mut self, address: &[i32]) -> Result<Option<Property>, CatalogError> {
        validate_address(address)?;
        match self.position(address) {
            Some(index) => {
                let removed = self.properties.remove(index);
                info!(address = %removed.address(), "property removed");
                Ok(Some(removed))
            }
            None => {
                debug!(?address, "no property to remove");
                Ok(None)
            }
        }
    }

    /// Replace the property at `address` with `updated`. Moving a property
    /// onto an address held by another listing is a conflict.
    pub fn update(&mut self, address: &[i32], updated: Property) -> Result<bool, CatalogError> {
        validate_address(address)?;

        if updated.address().coordinates() != address && self.position(updated.address()).is_some()
        {
            return Err(CatalogError::AddressTaken {
                address: updated.address().clone(),
            });
        }

        match self.position(address) {
            Some(index) => {
                info!(from = ?address, to = %updated.address(), "property updated");
                self.properties[index] = updated;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn position(&self, address: &[i32]) -> Option<usize> {
        self.properties
            .iter()
            .position(|property| property.address().coordinates() == address)
    }
}

fn validate_address(address: &[i32]) -> Result<(), CatalogError> {
    if address.len() < Address::MIN_COORDINATES {
        return Err(CatalogError::InvalidAddress {
            found: address.len(),
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("address must contain at least 2 coordinates (found {found})")]
    InvalidAddress { found: usize },
    #[error("address {address} already exists")]
    AddressTaken { address: Address },
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::InvalidAddress { .. } => FailureKind::InvalidArgument,
            CatalogError::AddressTaken { .. } => FailureKind::Conflict,
            CatalogError::Load(err) => err.kind(),
        }
    }
}
