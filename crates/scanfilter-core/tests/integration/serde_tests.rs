//! JSON encoding of predicate trees

use scanfilter_core::{parse, LiteralSet, ParserConfig, Predicate};

#[test]
fn test_predicate_json_roundtrip() {
    let pred = parse(
        "foo is not null and (foo < 5 or location.x >= 52.00) and bar in ('a', 'b') \
         and not baz LIKE 'data%'",
    )
    .unwrap();

    let json = serde_json::to_string(&pred).unwrap();
    let decoded: Predicate = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, pred);
}

#[test]
fn test_comparison_json_shape() {
    let json = serde_json::to_value(Predicate::equal_to("foo", 5)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Comparison": { "op": "EqualTo", "term": "foo", "literal": { "Integer": 5 } }
        })
    );
}

#[test]
fn test_literal_set_rejects_mixed_types() {
    let json = r#"{"Set": {"op": "In", "term": "foo", "literals": [{"Integer": 5}, {"String": "a"}]}}"#;
    assert!(serde_json::from_str::<Predicate>(json).is_err());
}

#[test]
fn test_connectives_reject_too_few_operands() {
    let single = r#"{"And": [{"Unary": {"op": "IsNull", "term": "a"}}]}"#;
    let err = serde_json::from_str::<Predicate>(single).unwrap_err();
    assert!(err.to_string().contains("AND requires at least two operands, got 1"), "{}", err);

    let empty = r#"{"Or": []}"#;
    let err = serde_json::from_str::<Predicate>(empty).unwrap_err();
    assert!(err.to_string().contains("OR requires at least two operands, got 0"), "{}", err);
}

#[test]
fn test_nested_connective_arity_is_checked() {
    let json = r#"{"Or": [{"And": []}, "AlwaysTrue"]}"#;
    assert!(serde_json::from_str::<Predicate>(json).is_err());

    let json = r#"{"Or": [{"And": ["AlwaysTrue", "AlwaysFalse"]}, "AlwaysTrue"]}"#;
    assert!(serde_json::from_str::<Predicate>(json).is_ok());
}

#[test]
fn test_literal_set_rejects_empty() {
    assert!(serde_json::from_str::<LiteralSet>("[]").is_err());
}

#[test]
fn test_parser_config_from_json() {
    let config: ParserConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
    assert_eq!(config, ParserConfig::with_max_depth(8));
}
