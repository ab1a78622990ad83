//! Tests for tablekit-model ordering guarantees.

use std::cmp::Ordering;

use proptest::prelude::*;
use tablekit_model::{FieldValue, compare_values};

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Missing),
        any::<bool>().prop_map(FieldValue::Bool),
        (-1000i32..1000).prop_map(FieldValue::from),
        "[a-zA-Z0-9 ]{0,6}".prop_map(FieldValue::Text),
    ]
}

#[test]
fn test_missing_sorts_after_every_kind() {
    for value in [
        FieldValue::Bool(false),
        FieldValue::Number(-1e9),
        FieldValue::from(""),
        FieldValue::from(vec!["a"]),
    ] {
        assert_eq!(compare_values(&value, &FieldValue::Missing), Ordering::Less);
    }
}

proptest! {
    #[test]
    fn test_comparison_is_antisymmetric(a in field_value(), b in field_value()) {
        prop_assert_eq!(compare_values(&a, &b), compare_values(&b, &a).reverse());
    }

    #[test]
    fn test_comparison_is_reflexive(a in field_value()) {
        prop_assert_eq!(compare_values(&a, &a), Ordering::Equal);
    }
}
