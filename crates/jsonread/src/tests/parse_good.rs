use rstest::rstest;

use super::arbitrary::encode;
use crate::{
    Encoding, Map, ReadError, ReaderOptions, UnexpectedToken, Value, read, read_with_options,
};

fn object(entries: &[(&str, Value)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<Map>(),
    )
}

#[rstest]
#[case::null("null", Value::Null)]
#[case::true_("true", Value::Boolean(true))]
#[case::false_("false", Value::Boolean(false))]
#[case::zero("0", Value::Number(0.0))]
#[case::integer("42", Value::Number(42.0))]
#[case::negative("-12.75", Value::Number(-12.75))]
#[case::exponent("1.5e3", Value::Number(1500.0))]
#[case::upper_exponent("1E-2", Value::Number(0.01))]
#[case::signed_exponent("2e+2", Value::Number(200.0))]
#[case::zero_fraction("0.5", Value::Number(0.5))]
#[case::string(r#""abc""#, Value::String("abc".into()))]
#[case::empty_string(r#""""#, Value::String(String::new()))]
#[case::surrounding_whitespace(" \t\r\n 7 \n", Value::Number(7.0))]
#[case::empty_array("[]", Value::Array(vec![]))]
#[case::spaced_array("[ \n ]", Value::Array(vec![]))]
#[case::empty_object("{}", Value::Object(Map::new()))]
#[case::spaced_object("{\t}", Value::Object(Map::new()))]
#[case::array(
    "[1, \"two\", null, [true]]",
    Value::Array(vec![
        Value::Number(1.0),
        Value::String("two".into()),
        Value::Null,
        Value::Array(vec![Value::Boolean(true)]),
    ])
)]
#[case::nested(
    r#"{"a": {"b": [{}, []]}, "c": false}"#,
    object(&[
        ("a", object(&[("b", Value::Array(vec![object(&[]), Value::Array(vec![])]))])),
        ("c", Value::Boolean(false)),
    ])
)]
fn reads(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(read(input).unwrap(), expected);
    assert_eq!(read(input.as_bytes()).unwrap(), expected);
}

#[test]
fn negative_zero_keeps_its_sign() {
    let n = read("-0").unwrap().as_f64().unwrap();
    assert!(n == 0.0 && n.is_sign_negative());
}

#[rstest]
#[case::simple(r#""\"\\\/\b\f\n\r\t""#, "\"\\/\u{8}\u{c}\n\r\t")]
#[case::unicode(r#""éé""#, "éé")]
#[case::pair(r#""\ud83d\ude00""#, "😀")]
#[case::lone_high(r#""\ud83d""#, "\u{FFFD}")]
#[case::high_then_char(r#""\ud83dx""#, "\u{FFFD}x")]
#[case::lone_low(r#""\ude00A""#, "\u{FFFD}A")]
#[case::high_then_escape(r#""\ud83d\n""#, "\u{FFFD}\n")]
#[case::raw_non_ascii("\"h\u{e9}llo \u{1F600}\"", "héllo 😀")]
#[case::delete_is_allowed("\"\u{7f}\"", "\u{7f}")]
fn reads_strings(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(read(input).unwrap(), Value::String(expected.into()));
}

#[test]
fn non_finite_literals_by_default() {
    assert!(read("NaN").unwrap().as_f64().unwrap().is_nan());
    assert_eq!(read("Infinity").unwrap(), Value::Number(f64::INFINITY));
    assert_eq!(read("-Infinity").unwrap(), Value::Number(f64::NEG_INFINITY));
    assert_eq!(
        read("[Infinity, -Infinity]").unwrap(),
        Value::Array(vec![
            Value::Number(f64::INFINITY),
            Value::Number(f64::NEG_INFINITY)
        ])
    );
}

#[test]
fn non_finite_literals_can_be_rejected() {
    let options = ReaderOptions {
        reject_non_finite_numbers: true,
        ..ReaderOptions::default()
    };
    for (input, message) in [
        ("NaN", "Unexpected token 'N' at 1:1."),
        ("Infinity", "Unexpected token 'I' at 1:1."),
        ("-Infinity", "Unexpected token 'I' at 1:2."),
        ("[1, NaN]", "Unexpected token 'N' at 1:5."),
    ] {
        let err = read_with_options(input, options).unwrap_err();
        assert_eq!(err.to_string(), message, "input: {input:?}");
    }
    assert_eq!(
        read_with_options("[1]", options).unwrap(),
        Value::Array(vec![Value::Number(1.0)])
    );
}

#[test]
fn duplicate_keys_keep_first_position_and_last_value() {
    let value = read(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    let map = value.as_object().unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(value.get("a"), Some(&Value::Number(3.0)));
}

#[test]
fn object_keys_keep_insertion_order() {
    let value = read(r#"{"z": 0, "y": 1, "x": 2}"#).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "y", "x"]);
}

const DEPTH: usize = 1_000_000;

#[test]
fn deep_nesting_does_not_use_the_call_stack() {
    let input = format!("{}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    let value = read(input.as_str()).unwrap();

    let mut depth = 0;
    let mut current = &value;
    while let Value::Array(items) = current {
        depth += 1;
        match items.first() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    assert_eq!(depth, DEPTH);
}

#[test]
fn deep_objects() {
    let input = format!("{}1{}", r#"{"k":"#.repeat(DEPTH), "}".repeat(DEPTH));
    let value = read(input.as_str()).unwrap();

    let mut depth = 0;
    let mut current = &value;
    while let Some(inner) = current.get("k") {
        depth += 1;
        current = inner;
    }
    assert_eq!(depth, DEPTH);
    assert_eq!(current.as_f64(), Some(1.0));
}

#[rstest]
#[case::array(format!("{}{} x", "[".repeat(DEPTH), "]".repeat(DEPTH)), 2 * DEPTH + 2)]
#[case::object(format!("{}1{} x", r#"{"k":"#.repeat(DEPTH), "}".repeat(DEPTH)), 6 * DEPTH + 3)]
fn deep_value_rejected_by_trailing_token(#[case] input: String, #[case] column: usize) {
    let err = read(input.as_str()).unwrap_err();
    assert_eq!(err.location(), Some((1, column)));
}

#[test]
fn deep_value_rejected_inside() {
    let input = format!("{}1 2", "[".repeat(DEPTH));
    let err = read(input.as_str()).unwrap_err();
    assert_eq!(err.location(), Some((1, DEPTH + 3)));
}

#[rstest]
fn same_value_in_every_encoding(
    #[values(Encoding::Utf8, Encoding::Utf16Le, Encoding::Utf16Be)] encoding: Encoding,
    #[values(true, false)] bom: bool,
) {
    let text = r#"{"name": "Zoë", "emoji": "😁", "list": [1, 2.5, -3e2]}"#;
    let expected = read(text).unwrap();
    assert_eq!(read(&encode(text, encoding, bom)).unwrap(), expected);
}

#[test]
fn forced_encoding_skips_sniffing() {
    let options = ReaderOptions {
        encoding: Some(Encoding::Utf16Be),
        ..ReaderOptions::default()
    };
    // Too short to be sniffed as UTF-16.
    let bytes = encode("1", Encoding::Utf16Be, false);
    assert_eq!(
        read(&bytes),
        Err(ReadError::UnexpectedToken {
            token: UnexpectedToken::Char('\0'),
            line: 1,
            column: 1,
        })
    );
    assert_eq!(read_with_options(&bytes, options).unwrap(), Value::Number(1.0));
}

#[test]
fn text_input_is_not_sniffed() {
    // A leading U+FEFF in decoded text is a character, not a byte-order mark.
    let err = read("\u{FEFF}1").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected token '\\ufeff' at 1:1.");
    assert_eq!(read(&encode("1", Encoding::Utf8, true)).unwrap(), Value::Number(1.0));
}
