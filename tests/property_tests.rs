//! Integration property tests for fluent-sanitizer.
//!
//! These tests validate invariants that hold across the lookup, coercion
//! and transformation steps.

use fluent_sanitizer::{Input, RawValue, RoundingMode, Value};
use proptest::prelude::*;

// Strategy: values that count as absent
fn arb_blank() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), Just(Value::from(""))]
}

// Strategy: arbitrary raw values of every kind
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        ".{0,24}".prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::from),
    ]
}

// Strategy: form keys
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_]{1,12}").unwrap()
}

proptest! {
    /// Property: null and empty input coerce to null in nullable mode
    #[test]
    fn proptest_nullable_blank_coerces_to_null(value in arb_blank()) {
        let raw = RawValue::new(value).nullable();
        prop_assert_eq!(raw.to_integer().unwrap().val(), None);
        prop_assert_eq!(raw.to_float_default().unwrap().val(), None);
        prop_assert_eq!(raw.to_boolean().unwrap().val(), None);
        let text = raw.to_text().unwrap();
        prop_assert_eq!(text.val(), None);
    }

    /// Property: null and empty input coerce to zero values otherwise
    #[test]
    fn proptest_blank_coerces_to_zero_values(value in arb_blank()) {
        let raw = RawValue::new(value);
        prop_assert_eq!(raw.to_integer().unwrap().val(), Some(0));
        prop_assert_eq!(raw.to_float_default().unwrap().val(), Some(0.0));
        prop_assert_eq!(raw.to_boolean().unwrap().val(), Some(false));
        let text = raw.to_text().unwrap();
        prop_assert_eq!(text.val(), Some(""));
    }

    /// Property: coercion never fails and never yields null without nullable mode
    #[test]
    fn proptest_coercion_is_total(value in arb_value()) {
        let raw = RawValue::new(value);
        prop_assert!(raw.to_integer().unwrap().val().is_some());
        prop_assert!(raw.to_float('.').unwrap().val().is_some());
        prop_assert!(raw.to_boolean().unwrap().val().is_some());
        prop_assert!(raw.to_text().unwrap().val().is_some());
    }

    /// Property: lenient lookups never fail, strict lookups fail exactly on missing keys
    #[test]
    fn proptest_strict_lookup_matches_presence(
        present in arb_key(),
        requested in arb_key(),
        value in ".{1,10}",
    ) {
        let mut input = Input::new();
        input.add_form_field(present.as_str(), value);
        prop_assert!(input.post(&requested).is_ok());

        input.set_strict_mode(true);
        prop_assert_eq!(input.post(&requested).is_ok(), present == requested);
    }

    /// Property: rounding to zero places yields a whole number
    #[test]
    fn proptest_round_zero_places_is_whole(x in 0.0f64..1.0e9) {
        let rounded = RawValue::new(x)
            .to_float('.')
            .unwrap()
            .round(0, RoundingMode::HalfEven)
            .val()
            .unwrap();
        prop_assert_eq!(rounded.fract(), 0.0);
    }

    /// Property: upper and trim are idempotent on any text
    #[test]
    fn proptest_upper_trim_idempotent(text in "[ a-zA-Z0-9à-ÿ\\t]{0,30}") {
        let once = RawValue::new(text.as_str()).to_text().unwrap().trim(None).upper();
        let twice = once.clone().trim(None).upper();
        prop_assert_eq!(once.val(), twice.val());
    }
}

#[test]
fn lookups_emit_tracing_events_without_panicking() {
    let _guard = tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish(),
    );

    let mut input = Input::new();
    input.add_query_param("name", "maria von der leyen");
    let name = input.get("name").unwrap().to_text().unwrap().capitalize_name();
    assert_eq!(name.val(), Some("Maria von der Leyen"));

    input.set_strict_mode(true);
    assert!(input.get("missing").is_err());
}
