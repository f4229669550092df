//! Unit tests for the identifier types

use core_kernel::CustomerId;

#[test]
fn test_serializes_as_bare_number() {
    let id = CustomerId::new(15);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "15");
}

#[test]
fn test_deserializes_from_bare_number() {
    let id: CustomerId = serde_json::from_str("27").unwrap();
    assert_eq!(id.value(), 27);
}

#[test]
fn test_parse_tolerates_surrounding_whitespace() {
    let id: CustomerId = " 8 ".parse().unwrap();
    assert_eq!(id, CustomerId::new(8));
}

#[test]
fn test_ordering_follows_store_key() {
    assert!(CustomerId::new(1) < CustomerId::new(2));
}
