use super::*;
use serde_json::json;

#[test]
fn deserializes_flat_and_nested() {
    let v: FunnelValues = serde_json::from_value(json!([12000, 5700, 930])).unwrap();
    assert_eq!(v, FunnelValues::Flat(vec![12000.0, 5700.0, 930.0]));
    assert!(!v.is_2d());

    let v: FunnelValues =
        serde_json::from_value(json!([[3000, 2500, 6500], [3000, 1700, 1000]])).unwrap();
    assert!(v.is_2d());
    assert_eq!(v.stage_count(), 2);
    assert_eq!(v.sub_count(), 3);
}

#[test]
fn stage_totals_sum_segments() {
    let v = FunnelValues::Nested(vec![
        vec![3000.0, 2500.0, 6500.0],
        vec![3000.0, 1700.0, 1000.0],
        vec![600.0, 200.0, 130.0],
    ]);
    assert_eq!(v.stage_totals(), vec![12000.0, 5700.0, 930.0]);
}

#[test]
fn validate_rejects_unequal_cardinality() {
    let v = FunnelValues::Nested(vec![vec![1.0, 2.0], vec![1.0]]);
    let err = v.validate().unwrap_err();
    assert!(err.to_string().contains("equal cardinality"));
}

#[test]
fn validate_rejects_negative_nonfinite_and_empty() {
    assert!(FunnelValues::Flat(vec![]).validate().is_err());
    assert!(FunnelValues::Flat(vec![10.0, -1.0]).validate().is_err());
    assert!(FunnelValues::Flat(vec![f64::INFINITY]).validate().is_err());
    assert!(FunnelValues::Nested(vec![vec![]]).validate().is_err());
    assert!(FunnelValues::Flat(vec![0.0, 0.0]).validate().is_ok());
}
