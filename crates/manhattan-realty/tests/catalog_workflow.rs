use std::io::Write;

use manhattan_realty::catalog::{Catalog, CatalogError, LoadError};
use manhattan_realty::error::FailureKind;
use manhattan_realty::property::Property;
use tempfile::NamedTempFile;

fn listing_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write listing");
    file.flush().expect("flush listing");
    file
}

#[test]
fn loads_listing_file_into_catalog() {
    let file = listing_file(
        "4,5,1,1 80 10000 true\n\
         4,5,1,2 60 12000 false\n\
         10,3 120 7500 false\n",
    );

    let mut catalog = Catalog::new();
    let added = catalog.load_path(file.path()).expect("listing loads");

    assert_eq!(added, 3);
    let listed: Vec<String> = catalog.list_all().iter().map(ToString::to_string).collect();
    assert_eq!(
        listed,
        vec![
            "address: [4, 5, 1, 1] area: 80.0 pricePerSquareMeter: 10000.0 status: true",
            "address: [4, 5, 1, 2] area: 60.0 pricePerSquareMeter: 12000.0 status: false",
            "address: [10, 3] area: 120.0 pricePerSquareMeter: 7500.0 status: false",
        ]
    );
}

#[test]
fn stray_spaces_around_lines_do_not_break_the_load() {
    let file = listing_file("4,5 80 10000 false \n 4,6 70 9000 true\n");
    let mut catalog = Catalog::new();

    assert_eq!(catalog.load_path(file.path()).expect("listing loads"), 2);
    let second = catalog.find(&[4, 6]).expect("valid").expect("present");
    assert!(second.is_sold());
}

#[test]
fn empty_file_loads_nothing() {
    let file = listing_file("");
    let mut catalog = Catalog::new();
    assert_eq!(catalog.load_path(file.path()).expect("empty listing"), 0);
    assert!(catalog.is_empty());
}

#[test]
fn missing_file_reports_read_error() {
    let mut catalog = Catalog::new();
    let err = catalog
        .load_path("./does-not-exist.txt")
        .expect_err("expected io error");

    assert_eq!(err.kind(), FailureKind::Io);
    assert!(err.to_string().contains("Error reading from file"));
    match err {
        CatalogError::Load(LoadError::Io { source }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_line_fails_whole_batch() {
    let file = listing_file("4,5 80 10000 false\n6,7 90 5000\n");
    let mut catalog = Catalog::new();

    let err = catalog.load_path(file.path()).expect_err("malformed line");
    assert_eq!(err.kind(), FailureKind::Malformed);
    assert!(err.to_string().contains("line 2"));
    assert!(catalog.is_empty());
}

#[test]
fn duplicate_address_in_listing_is_rejected() {
    let file = listing_file("4,5 80 10000 false\n4,5 90 5000 false\n");
    let mut catalog = Catalog::new();

    let err = catalog.load_path(file.path()).expect_err("duplicate");
    assert_eq!(err.kind(), FailureKind::Conflict);
    assert!(catalog
        .list_all()
        .iter()
        .all(|property| property.area() != 90.0));
}

#[test]
fn crud_round_through_catalog() {
    let mut catalog = Catalog::new();
    catalog
        .insert(Property::new(vec![4, 5], 80.0, 10_000.0, false).expect("valid"))
        .expect("listed");
    catalog
        .insert(Property::new(vec![4, 6], 70.0, 10_000.0, false).expect("valid"))
        .expect("listed");

    let unchanged = Property::new(vec![4, 5], 82.0, 10_000.0, true).expect("valid");
    assert!(catalog.update(&[4, 5], unchanged).expect("same address"));

    let clash = Property::new(vec![4, 6], 1.0, 1.0, false).expect("valid");
    let err = catalog.update(&[4, 5], clash).expect_err("address taken");
    assert_eq!(err.kind(), FailureKind::Conflict);

    assert!(catalog.remove(&[4, 6]).expect("valid"));
    assert!(!catalog.remove(&[4, 6]).expect("valid"));

    let remaining = catalog.list_all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].area(), 82.0);
    assert!(remaining[0].is_sold());
}
