use crate::{Product, Rating, StoreItem, Student};

#[test]
fn absent_keys_deserialize_as_none_and_stay_omitted() {
    let p: Product = serde_json::from_str(r#"{"id": 7, "price": 900}"#).expect("parse product");
    assert_eq!(p.id, 7);
    assert_eq!(p.price, Some(900.0));
    assert_eq!(p.name, None);
    assert_eq!(p.stock, None);

    let out = serde_json::to_value(&p).expect("serialize product");
    assert_eq!(out, serde_json::json!({"id": 7, "price": 900.0}));
}

#[test]
fn unrecognized_keys_are_ignored() {
    let s: Student =
        serde_json::from_str(r#"{"id": 1, "name": "Diya", "hostel": "B-Block"}"#).expect("parse student");
    assert_eq!(s.name.as_deref(), Some("Diya"));
    assert_eq!(s.branch, None);
}

#[test]
fn nested_rating_roundtrips_under_the_item() {
    let item: StoreItem = serde_json::from_str(
        r#"{"id": 4, "title": "Mens Cotton Jacket", "rating": {"rate": 4.7, "count": 500}}"#,
    )
    .expect("parse item");
    assert_eq!(item.rating, Some(Rating { rate: Some(4.7), count: Some(500) }));

    let out = serde_json::to_value(&item).expect("serialize item");
    assert_eq!(out["rating"]["count"], 500);
    assert!(out.get("image").is_none());
}

#[test]
fn lax_fields_accept_out_of_range_values() {
    // negative stock/price are intentionally not rejected anywhere
    let p: Product = serde_json::from_str(r#"{"id": 9, "price": -50, "stock": -3}"#).expect("parse");
    assert_eq!(p.price, Some(-50.0));
    assert_eq!(p.stock, Some(-3));
}
