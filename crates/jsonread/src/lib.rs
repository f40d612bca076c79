//! A single-pass JSON reader with encoding detection.
//!
//! The input is either already-decoded text or raw bytes. For bytes, the
//! encoding is detected once, from a byte-order mark or from where the zero
//! bytes fall, and the buffer is then decoded one character at a time while
//! the reader builds the value:
//!
//! ```rust
//! use jsonread::{Value, read};
//!
//! let utf16le = b"{\0\"\0a\0\"\0:\0[\x001\0]\0}\0";
//! let value = read(utf16le).unwrap();
//! assert_eq!(value.get("a").and_then(|a| a.get(0)), Some(&Value::Number(1.0)));
//! ```
//!
//! Malformed byte sequences decode to U+FFFD rather than failing. Malformed
//! JSON fails with a [`ReadError`] that names the offending token and its
//! 1-based line and column:
//!
//! ```rust
//! let err = jsonread::read("{\n  \"a\": ,\n}").unwrap_err();
//! assert_eq!(err.to_string(), "Unexpected token ',' at 2:8.");
//! ```
//!
//! Beyond strict JSON, the reader accepts the bare literals `NaN`, `Infinity`
//! and `-Infinity` unless [`ReaderOptions::reject_non_finite_numbers`] is set.

mod decoder;
mod error;
mod options;
mod reader;
mod value;

#[cfg(test)]
mod tests;

pub use decoder::{
    BigEndian, ByteOrder, Decode, Encoding, Input, LittleEndian, StrDecoder, TextDecoder,
    Utf8Decoder, Utf16BeDecoder, Utf16Decoder, Utf16LeDecoder, detect_encoding,
};
pub use error::{ReadError, UnexpectedToken, UnsupportedEncoding};
pub use options::ReaderOptions;
pub use reader::TextReader;
pub use value::{Array, Map, Value, ValueIndex};

/// Reads the single JSON value in `input` with default options.
///
/// # Errors
///
/// See [`TextReader::read`].
///
/// # Examples
///
/// ```rust
/// use jsonread::{ReadError, Value, read};
///
/// assert_eq!(read(" true ").unwrap(), Value::Boolean(true));
/// assert_eq!(read(b"[1,"), Err(ReadError::UnexpectedEndOfInput));
/// ```
pub fn read<'a>(input: impl Into<Input<'a>>) -> Result<Value, ReadError> {
    TextReader::new(input).read()
}

/// Reads the single JSON value in `input`.
///
/// # Errors
///
/// See [`TextReader::read`].
pub fn read_with_options<'a>(
    input: impl Into<Input<'a>>,
    options: ReaderOptions,
) -> Result<Value, ReadError> {
    TextReader::with_options(input, options).read()
}
