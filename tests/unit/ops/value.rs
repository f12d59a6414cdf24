use super::*;
use serde_json::json;

#[test]
fn integers_and_floats_use_canonical_decimal() {
    assert_eq!(ParamValue::from(100).canonical().unwrap(), "100");
    assert_eq!(ParamValue::from(-7i64).canonical().unwrap(), "-7");
    assert_eq!(ParamValue::from(u64::MAX).canonical().unwrap(), "18446744073709551615");
    assert_eq!(ParamValue::from(100.0).canonical().unwrap(), "100");
    assert_eq!(ParamValue::from(1.5).canonical().unwrap(), "1.5");
    assert_eq!(ParamValue::from(0.1f32).canonical().unwrap(), "0.1");
}

#[test]
fn strings_are_kept_verbatim() {
    assert_eq!(ParamValue::from("inset").canonical().unwrap(), "inset");
}

#[test]
fn non_finite_and_opaque_values_have_no_canonical_form() {
    assert!(ParamValue::Float(f64::NAN).canonical().is_err());
    assert!(ParamValue::Float(f64::INFINITY).canonical().is_err());
    assert!(ParamValue::from(json!(null)).canonical().is_err());
    assert!(ParamValue::from(json!(true)).canonical().is_err());
    assert!(ParamValue::from(json!([1, 2])).canonical().is_err());
    assert!(ParamValue::from(json!({"a": 1})).canonical().is_err());
}

#[test]
fn json_numbers_map_to_narrowest_variant() {
    assert_eq!(ParamValue::from(json!(3)), ParamValue::Int(3));
    assert_eq!(ParamValue::from(json!(u64::MAX)), ParamValue::UInt(u64::MAX));
    assert_eq!(ParamValue::from(json!(2.5)), ParamValue::Float(2.5));
    assert_eq!(ParamValue::from(json!("x")), ParamValue::Str("x".to_string()));
}

#[test]
fn numeric_views_accept_numeric_strings() {
    assert_eq!(ParamValue::from("120").as_u64(), Some(120));
    assert_eq!(ParamValue::from(" 0.5 ").as_f64(), Some(0.5));
    assert_eq!(ParamValue::from(64.0).as_u64(), Some(64));
    assert_eq!(ParamValue::from(64.5).as_u64(), None);
    assert_eq!(ParamValue::from(-1).as_u64(), None);
    assert_eq!(ParamValue::from("wide").as_f64(), None);
}

#[test]
fn to_json_mirrors_variant() {
    assert_eq!(ParamValue::from(3).to_json(), json!(3));
    assert_eq!(ParamValue::from("a").to_json(), json!("a"));
    assert_eq!(ParamValue::from(json!(false)).to_json(), json!(false));
}
