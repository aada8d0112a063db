//! Rendering a predicate and parsing it back yields the same tree

use scanfilter_core::{parse, Literal, Predicate};

fn assert_roundtrip(predicate: &Predicate) {
    let text = predicate.to_string();
    let reparsed = parse(&text).unwrap_or_else(|err| panic!("failed to reparse {:?}: {}", text, err));
    assert_eq!(&reparsed, predicate, "rendered as {:?}", text);
}

#[test]
fn test_roundtrip_parsed_inputs() {
    let inputs = [
        "true",
        "false",
        "foo is null",
        "foo is not nan",
        "5 <= foo and foo < 10",
        "foo is not null and (foo < 5 or 10 < foo)",
        "(foo is null) or (5 <= foo) and not(foo < 10)",
        "foo = 1 and (bar = 2 and baz = 3)",
        "not not foo = 'x'",
        "foo NOT IN ('a', 'b', 'c')",
        "foo in (1.5, 2.25, -3.0)",
        "location.x < 52.00",
        "foo LIKE 'data%'",
        r"foo LIKE 'some \% data%'",
        r"foo NOT LIKE 'some data\%%'",
        r"foo LIKE 'data\%'",
        "\"Foo Bar\" = 'data'",
        "\"foo.bar\" is null",
        r"foo = 'it\'s a \\ path'",
        "foo > -42",
        "foo < 0.0000001",
        "foo in (0.000000000001, 0.5)",
    ];

    for input in inputs {
        assert_roundtrip(&parse(input).unwrap());
    }
}

#[test]
fn test_roundtrip_constructed_trees() {
    let predicates = vec![
        Predicate::equal_to("in", 1),
        Predicate::is_null("say \"hi\""),
        Predicate::equal_to("say \"hi\"", "there"),
        Predicate::starts_with("foo", "100%"),
        Predicate::not_starts_with("foo", ""),
        Predicate::less_than("a.b", Literal::decimal("0.001").unwrap()),
        Predicate::or(vec![
            Predicate::and(vec![Predicate::is_nan("x"), Predicate::equal_to("y", true)]).unwrap(),
            Predicate::not(
                Predicate::or(vec![Predicate::AlwaysFalse, Predicate::greater_than("z", 3)])
                    .unwrap(),
            ),
        ])
        .unwrap(),
    ];

    for predicate in &predicates {
        assert_roundtrip(predicate);
    }
}

#[test]
fn test_roundtrip_deep_not_chain() {
    let source = format!("{}foo is null", "not ".repeat(200));
    let pred = parse(&source).unwrap();
    assert_roundtrip(&pred);
}

#[test]
fn test_negate_is_an_involution_over_leaves() {
    let pred = parse("foo is not null and foo < 5 or foo in (1, 2)").unwrap();
    assert_eq!(pred.negate().negate(), pred);
}
