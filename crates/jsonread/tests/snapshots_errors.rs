#![expect(missing_docs)]

use core::fmt::Write;

use jsonread::{ReaderOptions, read, read_with_options};

/// Reads every input and renders one line per result.
fn render(inputs: &[&str], options: ReaderOptions) -> String {
    let mut out = String::new();
    for input in inputs {
        let outcome = match read_with_options(*input, options) {
            Ok(value) => format!("ok {value:?}"),
            Err(err) => format!("err {err}"),
        };
        writeln!(out, "{input:?} => {outcome}").unwrap();
    }
    out
}

#[test]
fn snapshot_scalars() {
    let inputs = [
        "null", "true", "false", "0", "-0", "1.5", "-2e3", "\"x\"", "NaN", "-Infinity", "01",
        "1.", ".5", "nil",
    ];

    insta::assert_snapshot!(render(&inputs, ReaderOptions::default()), @r#"
    "null" => ok Null
    "true" => ok Boolean(true)
    "false" => ok Boolean(false)
    "0" => ok Number(0.0)
    "-0" => ok Number(-0.0)
    "1.5" => ok Number(1.5)
    "-2e3" => ok Number(-2000.0)
    "\"x\"" => ok String("x")
    "NaN" => ok Number(NaN)
    "-Infinity" => ok Number(-inf)
    "01" => err Unexpected number at 1:2.
    "1." => err Unexpected end of JSON input.
    ".5" => err Unexpected token '.' at 1:1.
    "nil" => err Unexpected token 'i' at 1:2.
    "#);
}

#[test]
fn snapshot_strict_numbers() {
    let options = ReaderOptions {
        reject_non_finite_numbers: true,
        ..ReaderOptions::default()
    };
    let inputs = ["NaN", "Infinity", "-Infinity", "[0, -1]"];

    insta::assert_snapshot!(render(&inputs, options), @r#"
    "NaN" => err Unexpected token 'N' at 1:1.
    "Infinity" => err Unexpected token 'I' at 1:1.
    "-Infinity" => err Unexpected token 'I' at 1:2.
    "[0, -1]" => ok Array([Number(0.0), Number(-1.0)])
    "#);
}

#[test]
fn snapshot_containers() {
    let inputs = [
        r#"{"b": [1, {"c": null}], "a": "z"}"#,
        "[1,]",
        r#"{"a":1,}"#,
        r#"{"a" 1}"#,
        "[1 2]",
        "[[[",
        "{} {}",
    ];

    insta::assert_snapshot!(render(&inputs, ReaderOptions::default()), @r#"
    "{\"b\": [1, {\"c\": null}], \"a\": \"z\"}" => ok Object({"b": Array([Number(1.0), Object({"c": Null})]), "a": String("z")})
    "[1,]" => err Unexpected token ']' at 1:4.
    "{\"a\":1,}" => err Unexpected token '}' at 1:8.
    "{\"a\" 1}" => err Unexpected number at 1:6.
    "[1 2]" => err Unexpected number at 1:4.
    "[[[" => err Unexpected end of JSON input.
    "{} {}" => err Unexpected token '{' at 1:4.
    "#);
}

#[test]
fn snapshot_strings() {
    let inputs = [
        r#""a\tb""#,
        r#""\u00e9\ud83d\ude00""#,
        r#""\ud83d""#,
        "\"a\tb\"",
        "\"line\nbreak\"",
        r#""\q""#,
        "\"\u{1}\"",
        "\"open",
    ];

    insta::assert_snapshot!(render(&inputs, ReaderOptions::default()), @r#"
    "\"a\\tb\"" => ok String("a\tb")
    "\"\\u00e9\\ud83d\\ude00\"" => ok String("é😀")
    "\"\\ud83d\"" => ok String("�")
    "\"a\tb\"" => err Unexpected token '\t' at 1:3.
    "\"line\nbreak\"" => err Unexpected token '\n' at 1:6.
    "\"\\q\"" => err Unexpected token 'q' at 1:3.
    "\"\u{1}\"" => err Unexpected token '\u0001' at 1:2.
    "\"open" => err Unexpected end of JSON input.
    "#);
}

#[test]
fn snapshot_multiline_locations() {
    let input = "{\n  \"list\": [\n    1,\n    2\n    3\n  ]\n}";
    let err = read(input).unwrap_err();

    insta::assert_snapshot!(err, @"Unexpected number at 5:5.");
    assert_eq!(err.location(), Some((5, 5)));
}
