use std::io::Cursor;

use manhattan_realty::catalog::Catalog;
use manhattan_realty::property::Address;
use manhattan_realty::search::{
    manhattan_distance, properties_in_radius, PriceComparison, SearchContext, SearchStrategy,
};

const LISTING: &str = "\
4,5,1,1 80 10000 true
4,5,1,2 60 12000 false
5,6 100 9000 false
2,9 50 20000 true
12,12 200 5000 false
";

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .load_reader(Cursor::new(LISTING))
        .expect("listing loads");
    catalog
}

#[test]
fn radius_filter_matches_distance_metric() {
    let catalog = catalog();
    let center = Address::new(vec![4, 5]).expect("valid center");

    for radius in [0, 2, 6, 15] {
        let found = properties_in_radius(&catalog, &center, radius).expect("valid query");
        let expected = catalog
            .iter()
            .filter(|property| {
                manhattan_distance(&center, property.address()) <= i64::from(radius)
            })
            .count();
        assert_eq!(found.len(), expected, "radius {radius}");
    }
}

#[test]
fn zero_radius_returns_both_subunits_of_the_building() {
    let found = properties_in_radius(&catalog(), &[4, 5], 0).expect("valid query");
    let addresses: Vec<Vec<i32>> = found.iter().map(|p| p.address().to_vec()).collect();
    assert_eq!(addresses, vec![vec![4, 5, 1, 1], vec![4, 5, 1, 2]]);
}

#[test]
fn context_runs_each_strategy_over_the_same_range() {
    let catalog = catalog();
    let mut context = SearchContext::new(SearchStrategy::by_status(true));

    let sold = context.search(&catalog, &[4, 5], 8).expect("valid");
    assert_eq!(sold.matches().expect("list").len(), 2);

    context.set_strategy(
        SearchStrategy::by_price(800_000.0, PriceComparison::Higher).expect("valid target"),
    );
    let pricier = context.search(&catalog, &[4, 5], 8).expect("valid");
    let totals: Vec<f64> = pricier
        .matches()
        .expect("list")
        .iter()
        .map(|p| p.total_price())
        .collect();
    assert_eq!(totals, vec![900_000.0, 1_000_000.0]);

    context.set_strategy(SearchStrategy::average_price());
    let average = context.search(&catalog, &[4, 5], 8).expect("valid");
    let expected = (800_000.0 + 720_000.0 + 900_000.0 + 1_000_000.0) / 4.0;
    assert_eq!(average.average(), Some(expected));

    let empty = context.search(&catalog, &[-40, -40], 3).expect("valid");
    assert_eq!(empty.average(), Some(0.0));
}

#[test]
fn snapshots_do_not_leak_into_catalog() {
    let catalog = catalog();
    let mut found = properties_in_radius(&catalog, &[4, 5], 20).expect("valid");
    for property in &mut found {
        property.set_sold(true);
    }

    let unsold = SearchStrategy::by_status(false)
        .search(&catalog, &[4, 5], 20)
        .expect("valid");
    assert_eq!(unsold.matches().expect("list").len(), 3);
}
