use super::{Broker, Buyer, ParticipantId, Role, Seller};
use crate::error::FailureKind;
use crate::notify::DeletionNotifier;
use std::sync::Arc;
use tracing::info;

/// Creates participants, keeps ids unique per role, and wires sellers to
/// brokers for deletion notices.
#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    buyers: Vec<Buyer>,
    sellers: Vec<Seller>,
    brokers: Vec<Arc<Broker>>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, role: Role, id: u32) -> Result<ParticipantId, RegistryError> {
        match role {
            Role::Buyer => self.create_buyer(id),
            Role::Seller => self.create_seller(id),
            Role::Broker => self.create_broker(id),
        }
    }

    pub fn create_buyer(&mut self, id: u32) -> Result<ParticipantId, RegistryError> {
        let id = ParticipantId(id);
        if self.buyer(id).is_some() {
            return Err(RegistryError::DuplicateId {
                role: Role::Buyer,
                id,
            });
        }
        self.buyers.push(Buyer { id });
        info!(%id, "buyer created");
        Ok(id)
    }

    pub fn create_seller(&mut self, id: u32) -> Result<ParticipantId, RegistryError> {
        let id = ParticipantId(id);
        if self.seller(id).is_some() {
            return Err(RegistryError::DuplicateId {
                role: Role::Seller,
                id,
            });
        }
        self.sellers.push(Seller::new(id.0));
        info!(%id, "seller created");
        Ok(id)
    }

    pub fn create_broker(&mut self, id: u32) -> Result<ParticipantId, RegistryError> {
        let id = ParticipantId(id);
        if self.broker(id).is_some() {
            return Err(RegistryError::DuplicateId {
                role: Role::Broker,
                id,
            });
        }
        self.brokers.push(Arc::new(Broker::new(id.0)));
        info!(%id, "broker created");
        Ok(id)
    }

    pub fn buyer(&self, id: ParticipantId) -> Option<&Buyer> {
        self.buyers.iter().find(|buyer| buyer.id == id)
    }

    pub fn seller(&self, id: ParticipantId) -> Option<&Seller> {
        self.sellers.iter().find(|seller| seller.id == id)
    }

    pub fn broker(&self, id: ParticipantId) -> Option<&Arc<Broker>> {
        self.brokers.iter().find(|broker| broker.id == id)
    }

    pub fn require_buyer(&self, id: ParticipantId) -> Result<&Buyer, RegistryError> {
        self.buyer(id).ok_or(RegistryError::Unknown {
            role: Role::Buyer,
            id,
        })
    }

    pub fn require_seller(&self, id: ParticipantId) -> Result<&Seller, RegistryError> {
        self.seller(id).ok_or(RegistryError::Unknown {
            role: Role::Seller,
            id,
        })
    }

    pub fn require_broker(&self, id: ParticipantId) -> Result<&Arc<Broker>, RegistryError> {
        self.broker(id).ok_or(RegistryError::Unknown {
            role: Role::Broker,
            id,
        })
    }

    pub fn brokers(&self) -> &[Arc<Broker>] {
        &self.brokers
    }

    /// Point every seller's observer slot at a notifier that reaches all
    /// brokers in creation order. Call once all participants exist; brokers
    /// created afterwards are not reached until this runs again.
    pub fn wire_deletion_observers(&mut self) {
        let mut notifier = DeletionNotifier::new();
        for broker in &self.brokers {
            notifier.subscribe(broker.clone());
        }
        let notifier = Arc::new(notifier);

        for seller in &mut self.sellers {
            seller.set_observer(notifier.clone());
        }
        info!(
            sellers = self.sellers.len(),
            brokers = self.brokers.len(),
            "deletion observers wired"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{} with ID {id} already exists", .role.label())]
    DuplicateId { role: Role, id: ParticipantId },
    #[error("no {} with ID {id}", .role.label())]
    Unknown { role: Role, id: ParticipantId },
}

impl RegistryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RegistryError::DuplicateId { .. } => FailureKind::Conflict,
            RegistryError::Unknown { .. } => FailureKind::InvalidArgument,
        }
    }
}
