use manhattan_realty::catalog::Catalog;
use manhattan_realty::deal::{execute_deal, DealParties};
use manhattan_realty::error::AppError;
use manhattan_realty::format::Decimal;
use manhattan_realty::participants::{
    DeleteCapability, EditCapability, Participant, ParticipantId, ParticipantRegistry, Role,
    ViewCapability,
};
use manhattan_realty::property::Address;
use manhattan_realty::search::{SearchContext, SearchStrategy};

const DEMO_CENTER: [i32; 2] = [4, 5];

/// Walk the loaded catalog through the full set of participant actions:
/// a seller deletion with broker notices, a buyer view, a broker edit, two
/// searches, and two deals.
pub(crate) fn run_demo(catalog: &mut Catalog, radius: i32) -> Result<(), AppError> {
    println!("Manhattan realty demo");

    let mut registry = ParticipantRegistry::new();
    for (role, id) in [
        (Role::Seller, 1),
        (Role::Seller, 2),
        (Role::Broker, 777),
        (Role::Broker, 888),
        (Role::Buyer, 55),
        (Role::Buyer, 66),
    ] {
        registry.create(role, id)?;
    }
    registry.wire_deletion_observers();

    let first_seller = registry.require_seller(ParticipantId(1))?;
    let second_seller = registry.require_seller(ParticipantId(2))?;
    let first_broker = registry.require_broker(ParticipantId(777))?;
    let second_broker = registry.require_broker(ParticipantId(888))?;
    let first_buyer = registry.require_buyer(ParticipantId(55))?;
    let second_buyer = registry.require_buyer(ParticipantId(66))?;

    print_listing("\nAll properties:", catalog);

    println!(
        "\nSeller {} removes the third listing; brokers are notified.",
        first_seller.id()
    );
    if let Some(address) = nth_address(catalog, 2) {
        first_seller.delete_property(catalog, &address)?;
        for broker in registry.brokers() {
            for notice in broker.notifications() {
                println!("  broker {} <- {notice}", broker.id());
            }
        }
    }
    print_listing("\nAll properties after deletion:", catalog);

    println!("\nBuyer views the second listing:");
    if let Some(address) = nth_address(catalog, 1) {
        if let Some(property) = first_buyer.view_property(catalog, &address)? {
            println!("{property}");
        }
    }

    if let Some(mut relisted) = catalog.list_all().into_iter().next() {
        relisted.set_sold(false);
        let address = relisted.address().clone();
        first_broker.edit_property(catalog, &address, relisted)?;
    }
    print_listing("\nAll properties after the broker relists the first one:", catalog);

    let mut context = SearchContext::new(SearchStrategy::average_price());
    let average = context.search(catalog, &DEMO_CENTER, radius)?;
    if let Some(average) = average.average() {
        println!(
            "\nAverage price of properties in the radius: {}",
            Decimal(average)
        );
    }

    context.set_strategy(SearchStrategy::by_status(true));
    let sold = context.search(catalog, &DEMO_CENTER, radius)?;
    println!("\nSold properties in the radius:");
    for property in sold.matches().unwrap_or_default() {
        println!("{property}");
    }

    let first_deal = nth_address(catalog, 0);
    let second_deal = nth_address(catalog, 2);
    let no_services: [&str; 0] = [];

    println!("\nDeal without services:");
    if let Some(address) = &first_deal {
        close_deal(
            catalog,
            address,
            &no_services,
            DealParties {
                seller: first_seller,
                buyer: first_buyer,
                broker: first_broker,
            },
        );
    }

    println!("\nDeal with evening and cleaning services:");
    if let Some(address) = &second_deal {
        close_deal(
            catalog,
            address,
            &["evening", "cleaning"],
            DealParties {
                seller: second_seller,
                buyer: second_buyer,
                broker: second_broker,
            },
        );
    }

    println!("\nStatus after the deals:");
    for address in first_deal.iter().chain(second_deal.iter()) {
        if let Some(property) = catalog.find(address)? {
            println!("{property}");
        }
    }

    Ok(())
}

fn close_deal(
    catalog: &mut Catalog,
    address: &Address,
    services: &[&str],
    parties: DealParties<'_>,
) {
    match execute_deal(catalog, address, services, parties) {
        Ok(receipt) => {
            for line in receipt.transcript.lines() {
                println!("{line}");
            }
        }
        Err(err) => {
            for line in err.transcript().map(|t| t.lines()).unwrap_or_default() {
                println!("{line}");
            }
            println!("  Deal rejected: {err}");
        }
    }
}

fn nth_address(catalog: &Catalog, index: usize) -> Option<Address> {
    catalog
        .iter()
        .nth(index)
        .map(|property| property.address().clone())
}

fn print_listing(title: &str, catalog: &Catalog) {
    println!("{title}");
    for property in catalog.iter() {
        println!("{property}");
    }
}
