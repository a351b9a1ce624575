//! Buyers, sellers, and brokers taking part in deals, plus the capability
//! set each role is allowed to exercise against the catalog.

mod registry;

pub use registry::{ParticipantRegistry, RegistryError};

use crate::catalog::{Catalog, CatalogError};
use crate::notify::{deletion_message, DeletionListener};
use crate::property::{Address, Property};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Buyer,
    Seller,
    Broker,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Buyer => "Buyer",
            Self::Seller => "Seller",
            Self::Broker => "Broker",
        }
    }

    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Buyer => &[Capability::View],
            Self::Seller => &[Capability::View, Capability::Delete],
            Self::Broker => &[Capability::View, Capability::Edit],
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    View,
    Edit,
    Delete,
}

/// Identity shared by every participant.
pub trait Participant {
    fn id(&self) -> ParticipantId;
    fn role(&self) -> Role;
}

/// Read access to the catalog; every role has it.
pub trait ViewCapability: Participant {
    fn view_property(
        &self,
        catalog: &Catalog,
        address: &[i32],
    ) -> Result<Option<Property>, CatalogError> {
        catalog.find(address)
    }

    fn view_all(&self, catalog: &Catalog) -> Vec<Property> {
        catalog.list_all()
    }
}

/// Replace listings in place.
pub trait EditCapability: Participant {
    fn edit_property(
        &self,
        catalog: &mut Catalog,
        address: &[i32],
        updated: Property,
    ) -> Result<bool, CatalogError> {
        catalog.update(address, updated)
    }
}

/// Take listings off the market.
pub trait DeleteCapability: Participant {
    fn delete_property(&self, catalog: &mut Catalog, address: &[i32])
        -> Result<bool, CatalogError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    id: ParticipantId,
}

impl Buyer {
    pub fn new(id: u32) -> Self {
        Self {
            id: ParticipantId(id),
        }
    }
}

impl Participant for Buyer {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn role(&self) -> Role {
        Role::Buyer
    }
}

impl ViewCapability for Buyer {}

/// Seller with a single deletion observer slot; the last registration wins.
pub struct Seller {
    id: ParticipantId,
    observer: Option<Arc<dyn DeletionListener>>,
}

impl Seller {
    pub fn new(id: u32) -> Self {
        Self {
            id: ParticipantId(id),
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Arc<dyn DeletionListener>) {
        self.observer = Some(observer);
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }
}

impl fmt::Debug for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seller")
            .field("id", &self.id)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Participant for Seller {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn role(&self) -> Role {
        Role::Seller
    }
}

impl ViewCapability for Seller {}

impl DeleteCapability for Seller {
    fn delete_property(
        &self,
        catalog: &mut Catalog,
        address: &[i32],
    ) -> Result<bool, CatalogError> {
        let Some(removed) = catalog.take(address)? else {
            return Ok(false);
        };

        info!(seller = %self.id, address = %removed.address(), "seller removed listing");
        if let Some(observer) = &self.observer {
            observer.on_deleted(removed.address());
        }
        Ok(true)
    }
}

/// Broker managing deals; also collects deletion notices in an inbox.
#[derive(Debug)]
pub struct Broker {
    id: ParticipantId,
    inbox: Mutex<Vec<String>>,
}

impl Broker {
    pub fn new(id: u32) -> Self {
        Self {
            id: ParticipantId(id),
            inbox: Mutex::new(Vec::new()),
        }
    }

    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<String> {
        self.inbox.lock().expect("broker inbox poisoned").clone()
    }
}

impl Participant for Broker {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn role(&self) -> Role {
        Role::Broker
    }
}

impl ViewCapability for Broker {}

impl EditCapability for Broker {}

impl DeletionListener for Broker {
    fn on_deleted(&self, address: &Address) {
        let message = deletion_message(address);
        info!(broker = %self.id, %address, "deletion notice received");
        self.inbox
            .lock()
            .expect("broker inbox poisoned")
            .push(message);
    }
}
