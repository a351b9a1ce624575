//! Deal execution: a base transaction wrapped by optional priced services.
//!
//! Every layer implements [`Deal`]. Executing the outermost layer runs the
//! chain inside-out, so the base narrative is always recorded first and the
//! service lines follow in the order the services were requested. The base
//! deal is the only place a property is marked sold.

mod pipeline;
mod service;

pub use pipeline::{execute_deal, DealParties, DealReceipt};
pub use service::{Service, ServiceDecorator};

use crate::error::FailureKind;
use crate::format::Decimal;
use crate::participants::{Broker, Buyer, Participant, Seller};
use crate::property::{Address, Property};
use serde::Serialize;

/// Shared contract for the base deal and every service layer.
pub trait Deal {
    fn execute(&mut self, transcript: &mut Transcript);
    fn total_price(&self) -> f64;
}

/// Ordered narrative lines produced while a deal runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// The sale itself: seller, buyer, and broker closing on one property.
pub struct BasicDeal<'a> {
    property: &'a mut Property,
    buyer: &'a Buyer,
    seller: &'a Seller,
    broker: &'a Broker,
}

impl<'a> BasicDeal<'a> {
    pub fn new(
        property: &'a mut Property,
        buyer: &'a Buyer,
        seller: &'a Seller,
        broker: &'a Broker,
    ) -> Self {
        Self {
            property,
            buyer,
            seller,
            broker,
        }
    }
}

impl Deal for BasicDeal<'_> {
    fn execute(&mut self, transcript: &mut Transcript) {
        transcript.say(format!(
            "Broker {} : I'm managing this deal",
            self.broker.id()
        ));
        transcript.say(format!(
            "Seller {} : I'm offering the property at {} for {}",
            self.seller.id(),
            self.property.address(),
            Decimal(self.property.total_price())
        ));
        transcript.say(format!(
            "Buyer {} : I'm interested in buying the property",
            self.buyer.id()
        ));
        self.property.mark_sold();
    }

    fn total_price(&self) -> f64 {
        self.property.total_price()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DealError {
    #[error("address must contain at least 2 coordinates (found {found})")]
    InvalidAddress { found: usize },
    #[error("no property listed at {address:?}")]
    PropertyNotFound { address: Vec<i32> },
    #[error("Property is already sold: {address}")]
    AlreadySold { address: Address },
    /// Carries the lines written before the token was rejected: the
    /// service offer and the echo of the request.
    #[error("Unknown service: {token}")]
    UnknownService { token: String, transcript: Transcript },
}

impl DealError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DealError::AlreadySold { .. } => FailureKind::IllegalState,
            DealError::InvalidAddress { .. }
            | DealError::PropertyNotFound { .. }
            | DealError::UnknownService { .. } => FailureKind::InvalidArgument,
        }
    }

    /// Transcript recorded up to the failure, if the deal got that far.
    pub fn transcript(&self) -> Option<&Transcript> {
        match self {
            DealError::UnknownService { transcript, .. } => Some(transcript),
            _ => None,
        }
    }
}
