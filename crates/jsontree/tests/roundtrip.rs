//! Serialization round-trips: parse, render, and parse again.

use jsontree::{from_str, from_str_with, Format, Node, ParseOptions};
use test_case::test_case;

#[test_case("null"; "null literal")]
#[test_case("true"; "true literal")]
#[test_case("-12.5"; "number")]
#[test_case(r#""plain text""#; "plain string")]
#[test_case(r#""a\"b\\c\td""#; "escaped string")]
#[test_case("[]"; "empty array")]
#[test_case("{}"; "empty object")]
#[test_case("[1,[2,[3,[4]]]]"; "nested arrays")]
#[test_case(r#"{"a":{"b":{"c":null}}}"#; "nested objects")]
#[test_case(r#"{"empty_arr":[],"empty_obj":{},"mix":[1,"s",true,null]}"#; "mixed containers")]
fn minimized_output_is_a_fixed_point(source: &str) {
    let node = from_str(source).unwrap();
    let rendered = node.to_text(Format::Minimized);
    assert_eq!(rendered, source);
    assert_eq!(from_str(&rendered).unwrap(), node);
}

#[test]
fn pretty_and_minimized_describe_the_same_tree() {
    let source = r#"{"library":{"books":[{"title":"a","year":1999},{"title":"b"}],"open":true}}"#;
    let node = from_str(source).unwrap();
    let via_pretty = from_str(&node.to_text(Format::Pretty)).unwrap();
    let via_minimized = from_str(&node.to_text(Format::Minimized)).unwrap();
    assert_eq!(via_pretty, via_minimized);
    assert_eq!(via_pretty, node);
}

#[test]
fn pretty_rendering_is_idempotent() {
    let node = from_str(r#"{"a":[1,{"b":2}],"c":"d"}"#).unwrap();
    let once = node.to_text(Format::Pretty);
    let twice = from_str(&once).unwrap().to_text(Format::Pretty);
    assert_eq!(once, twice);
}

#[test]
fn escaped_and_raw_unicode_converge() {
    // `\u00e9` and a raw é denote the same string and serialize identically.
    let escaped = from_str(r#""\u00e9""#).unwrap();
    let raw = from_str("\"é\"").unwrap();
    assert_eq!(escaped, raw);
    assert_eq!(escaped.to_text(Format::Minimized), "\"é\"");
}

#[test]
fn surrogate_pair_round_trips_as_raw_utf8() {
    let node = from_str(r#""😀""#).unwrap();
    assert_eq!(node.as_str(), Some("😀"));
    let rendered = node.to_text(Format::Minimized);
    assert_eq!(rendered, "\"😀\"");
    assert_eq!(from_str(&rendered).unwrap(), node);
}

#[test]
fn non_finite_numbers_round_trip_one_way_as_strings() {
    let node = Node::Number(f64::INFINITY);
    let rendered = node.to_text(Format::Minimized);
    assert_eq!(rendered, "\"inf\"");
    // The reparse yields a string node, not the original number.
    assert_eq!(from_str(&rendered).unwrap(), Node::String("inf".into()));
}

#[test]
fn number_spellings_normalize() {
    for (source, expected) in [
        ("1.0", "1"),
        ("1E2", "100"),
        ("0.5e1", "5"),
        ("-0.0", "-0"),
        ("10000000000000000", "1e16"),
    ] {
        let rendered = from_str(source).unwrap().to_text(Format::Minimized);
        assert_eq!(rendered, expected, "{source}");
        let reparsed = from_str(&rendered).unwrap().get_number().unwrap();
        let original = from_str(source).unwrap().get_number().unwrap();
        assert_eq!(reparsed.to_bits(), original.to_bits());
    }
}

#[test]
fn raised_depth_limit_round_trips_deep_documents() {
    let depth = 2000;
    let source = format!("{}0{}", "[".repeat(depth), "]".repeat(depth));
    let options = ParseOptions::new().max_depth(depth);
    let node = from_str_with(&source, options).unwrap();
    let rendered = node.to_text(Format::Minimized);
    assert_eq!(rendered, source);
    assert_eq!(from_str_with(&rendered, options).unwrap(), node);
}
