use super::{Deal, DealError, Transcript};
use crate::format::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional add-on a buyer can attach to a deal, each with a fixed fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Evening,
    Cleaning,
    Moving,
    Design,
}

impl Service {
    pub const fn ordered() -> [Self; 4] {
        [Self::Evening, Self::Cleaning, Self::Moving, Self::Design]
    }

    pub const fn fee(self) -> f64 {
        match self {
            Self::Evening => 1000.0,
            Self::Cleaning => 2000.0,
            Self::Moving => 3000.0,
            Self::Design => 4000.0,
        }
    }

    /// Lower-case name used in transcript lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Evening => "evening",
            Self::Cleaning => "cleaning",
            Self::Moving => "moving",
            Self::Design => "design",
        }
    }

    /// Name the broker uses when offering the service.
    pub const fn offer_label(self) -> &'static str {
        match self {
            Self::Evening => "EveningServices",
            Self::Cleaning => "Cleaning",
            Self::Moving => "Moving",
            Self::Design => "Design",
        }
    }

    /// Case-insensitive match against EVENING, CLEANING, MOVING, and DESIGN.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "EVENING" => Some(Self::Evening),
            "CLEANING" => Some(Self::Cleaning),
            "MOVING" => Some(Self::Moving),
            "DESIGN" => Some(Self::Design),
            _ => None,
        }
    }

    pub fn wrap<'a>(self, deal: Box<dyn Deal + 'a>) -> Box<dyn Deal + 'a> {
        Box::new(ServiceDecorator {
            inner: deal,
            service: self,
        })
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Service {
    type Err = DealError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_token(value).ok_or_else(|| DealError::UnknownService {
            token: value.to_string(),
            transcript: Transcript::default(),
        })
    }
}

/// Runs the wrapped deal, then records its own fee.
pub struct ServiceDecorator<'a> {
    inner: Box<dyn Deal + 'a>,
    service: Service,
}

impl Deal for ServiceDecorator<'_> {
    fn execute(&mut self, transcript: &mut Transcript) {
        self.inner.execute(transcript);
        transcript.say(format!(
            "Adding {} services: {}",
            self.service.label(),
            Decimal(self.service.fee())
        ));
    }

    fn total_price(&self) -> f64 {
        self.inner.total_price() + self.service.fee()
    }
}
