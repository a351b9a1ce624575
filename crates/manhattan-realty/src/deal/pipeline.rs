use super::{BasicDeal, Deal, DealError, Service, Transcript};
use crate::catalog::Catalog;
use crate::format::Decimal;
use crate::participants::{Broker, Buyer, Participant, Seller};
use crate::property::Address;
use serde::Serialize;
use tracing::info;

/// The three people a deal needs.
#[derive(Debug, Clone, Copy)]
pub struct DealParties<'a> {
    pub seller: &'a Seller,
    pub buyer: &'a Buyer,
    pub broker: &'a Broker,
}

/// Outcome of a closed deal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealReceipt {
    pub address: Address,
    pub services: Vec<Service>,
    pub transcript: Transcript,
    pub total_price: f64,
}

/// Close the sale of the property at `address` with the requested services.
///
/// Service tokens are matched case-insensitively against EVENING, CLEANING,
/// MOVING, and DESIGN and wrapped in the order given. The property is only
/// marked sold once every token has been accepted; any error leaves the
/// catalog unchanged. An unknown token's error carries the offer and echo
/// lines already written.
pub fn execute_deal<S: AsRef<str>>(
    catalog: &mut Catalog,
    address: &[i32],
    services: &[S],
    parties: DealParties<'_>,
) -> Result<DealReceipt, DealError> {
    if address.len() < Address::MIN_COORDINATES {
        return Err(DealError::InvalidAddress {
            found: address.len(),
        });
    }

    let property = catalog
        .get_mut(address)
        .ok_or_else(|| DealError::PropertyNotFound {
            address: address.to_vec(),
        })?;
    if property.is_sold() {
        return Err(DealError::AlreadySold {
            address: property.address().clone(),
        });
    }
    let address = property.address().clone();
    let requested: Vec<&str> = services.iter().map(|service| service.as_ref()).collect();

    let mut transcript = Transcript::default();
    transcript.say("broker: did you want to add any of the following services?");
    for service in Service::ordered() {
        transcript.say(service.offer_label());
    }
    transcript.say("buyer: yes, I want to add services:");
    if requested.is_empty() {
        transcript.say("No services needed.");
    } else {
        for token in &requested {
            transcript.say(*token);
        }
    }

    let mut deal: Box<dyn Deal + '_> = Box::new(BasicDeal::new(
        property,
        parties.buyer,
        parties.seller,
        parties.broker,
    ));
    let mut applied = Vec::with_capacity(requested.len());
    for token in &requested {
        let service = Service::from_token(token).ok_or_else(|| DealError::UnknownService {
            token: token.to_string(),
            transcript: transcript.clone(),
        })?;
        deal = service.wrap(deal);
        applied.push(service);
    }

    deal.execute(&mut transcript);
    let total_price = deal.total_price();
    transcript.say(format!("Total price: {}", Decimal(total_price)));

    info!(
        %address,
        seller = %parties.seller.id(),
        buyer = %parties.buyer.id(),
        broker = %parties.broker.id(),
        services = applied.len(),
        total_price,
        "deal closed"
    );

    Ok(DealReceipt {
        address,
        services: applied,
        transcript,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::property::Property;

    struct People {
        seller: Seller,
        buyer: Buyer,
        broker: Broker,
    }

    impl People {
        fn new() -> Self {
            Self {
                seller: Seller::new(1),
                buyer: Buyer::new(55),
                broker: Broker::new(777),
            }
        }

        fn parties(&self) -> DealParties<'_> {
            DealParties {
                seller: &self.seller,
                buyer: &self.buyer,
                broker: &self.broker,
            }
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_properties([
            Property::new(vec![4, 5, 1, 1], 80.0, 10_000.0, false).expect("valid"),
            Property::new(vec![7, 7], 50.0, 2_000.0, true).expect("valid"),
        ])
        .expect("unique addresses")
    }

    fn is_sold(catalog: &Catalog, address: &[i32]) -> bool {
        catalog
            .find(address)
            .expect("valid")
            .expect("present")
            .is_sold()
    }

    #[test]
    fn deal_without_services_reports_base_price() {
        let mut catalog = catalog();
        let people = People::new();
        let no_services: [&str; 0] = [];

        let receipt = execute_deal(&mut catalog, &[4, 5, 1, 1], &no_services, people.parties())
            .expect("deal closes");

        assert_eq!(receipt.total_price, 800_000.0);
        assert!(receipt.services.is_empty());
        let lines = receipt.transcript.lines();
        assert!(lines.iter().any(|line| line == "No services needed."));
        assert_eq!(lines.last().map(String::as_str), Some("Total price: 800000.0"));
        assert!(is_sold(&catalog, &[4, 5, 1, 1]));
    }

    #[test]
    fn services_are_logged_in_request_order() {
        let mut catalog = catalog();
        let people = People::new();

        let receipt = execute_deal(
            &mut catalog,
            &[4, 5, 1, 1],
            &["cleaning", "MOVING", "Design"],
            people.parties(),
        )
        .expect("deal closes");

        assert_eq!(receipt.total_price, 800_000.0 + 2000.0 + 3000.0 + 4000.0);
        assert_eq!(
            receipt.services,
            vec![Service::Cleaning, Service::Moving, Service::Design]
        );
        let lines = receipt.transcript.lines();
        let narrative = lines
            .iter()
            .position(|line| line.starts_with("Buyer 55"))
            .expect("narrative present");
        assert_eq!(
            &lines[narrative + 1..],
            &[
                "Adding cleaning services: 2000.0",
                "Adding moving services: 3000.0",
                "Adding design services: 4000.0",
                "Total price: 809000.0",
            ]
        );
    }

    #[test]
    fn echo_precedes_execution() {
        let mut catalog = catalog();
        let people = People::new();

        let receipt = execute_deal(&mut catalog, &[4, 5, 1, 1], &["evening"], people.parties())
            .expect("deal closes");

        let lines = receipt.transcript.into_lines();
        assert_eq!(
            &lines[..7],
            &[
                "broker: did you want to add any of the following services?",
                "EveningServices",
                "Cleaning",
                "Moving",
                "Design",
                "buyer: yes, I want to add services:",
                "evening",
            ]
        );
        assert_eq!(lines[7], "Broker 777 : I'm managing this deal");
    }

    #[test]
    fn sold_property_is_illegal_state() {
        let mut catalog = catalog();
        let people = People::new();

        let err = execute_deal(&mut catalog, &[7, 7], &["evening"], people.parties())
            .expect_err("already sold");
        assert_eq!(err.kind(), FailureKind::IllegalState);
        assert!(is_sold(&catalog, &[7, 7]));
    }

    #[test]
    fn second_deal_on_same_property_fails() {
        let mut catalog = catalog();
        let people = People::new();
        let no_services: [&str; 0] = [];

        execute_deal(&mut catalog, &[4, 5, 1, 1], &no_services, people.parties())
            .expect("first deal closes");
        let err = execute_deal(&mut catalog, &[4, 5, 1, 1], &no_services, people.parties())
            .expect_err("second deal rejected");

        assert!(matches!(err, DealError::AlreadySold { .. }));
        assert!(is_sold(&catalog, &[4, 5, 1, 1]));
    }

    #[test]
    fn unknown_service_aborts_without_selling() {
        let mut catalog = catalog();
        let people = People::new();

        let err = execute_deal(
            &mut catalog,
            &[4, 5, 1, 1],
            &["evening", "INVALID_SERVICE", "design"],
            people.parties(),
        )
        .expect_err("unknown service");

        assert_eq!(err.to_string(), "Unknown service: INVALID_SERVICE");
        assert!(!is_sold(&catalog, &[4, 5, 1, 1]));

        let lines = err.transcript().expect("echo kept").lines();
        assert_eq!(lines[0], "broker: did you want to add any of the following services?");
        assert_eq!(
            &lines[lines.len() - 4..],
            &[
                "buyer: yes, I want to add services:",
                "evening",
                "INVALID_SERVICE",
                "design",
            ]
        );
        assert!(!lines.iter().any(|line| line.starts_with("Broker 777")));
    }

    #[test]
    fn large_totals_render_in_exponent_form() {
        let tower = Property::new(vec![9, 9], 1_500.0, 10_000.0, false).expect("valid");
        let mut catalog = Catalog::from_properties([tower]).expect("unique addresses");
        let people = People::new();
        let no_services: [&str; 0] = [];

        let receipt = execute_deal(&mut catalog, &[9, 9], &no_services, people.parties())
            .expect("deal closes");

        assert_eq!(receipt.total_price, 15_000_000.0);
        assert_eq!(
            receipt.transcript.lines().last().map(String::as_str),
            Some("Total price: 1.5E7")
        );
    }

    #[test]
    fn missing_or_short_address_is_invalid_argument() {
        let mut catalog = catalog();
        let people = People::new();
        let no_services: [&str; 0] = [];

        let err = execute_deal(&mut catalog, &[4, 5], &no_services, people.parties())
            .expect_err("no exact match");
        assert_eq!(err.kind(), FailureKind::InvalidArgument);

        let err = execute_deal(&mut catalog, &[4], &no_services, people.parties())
            .expect_err("short address");
        assert!(matches!(err, DealError::InvalidAddress { found: 1 }));
    }
}
