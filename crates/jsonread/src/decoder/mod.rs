//! Encoding detection and character decoding.
//!
//! A [`TextDecoder`] is built once per buffer and bound to exactly one
//! strategy:
//!
//! - [`StrDecoder`] for native `&str` input, which is already decoded,
//! - [`Utf8Decoder`] for UTF-8 bytes (with or without a byte-order mark),
//! - [`Utf16LeDecoder`] and [`Utf16BeDecoder`] for UTF-16 bytes, selected by
//!   byte-order mark or by the distribution of zero bytes.
//!
//! Every strategy implements [`Decode`]: one call yields one Unicode scalar
//! value, or `None` at the end of the buffer. Malformed byte sequences never
//! fail; they decode to U+FFFD REPLACEMENT CHARACTER.
//!
//! UTF-32, UTF-7 and GB-18030 input is recognized by its marker bytes and
//! rejected with [`ReadError::UnsupportedEncoding`].

mod text;
mod utf16;
mod utf8;

pub use text::StrDecoder;
pub use utf8::Utf8Decoder;
pub use utf16::{BigEndian, ByteOrder, LittleEndian, Utf16BeDecoder, Utf16Decoder, Utf16LeDecoder};

use crate::error::{ReadError, UnsupportedEncoding};

/// Pulls Unicode scalar values out of a buffer, one at a time.
pub trait Decode {
    /// Decodes the next character and advances the cursor past it.
    ///
    /// Returns `None` once the buffer is exhausted.
    fn decode(&mut self) -> Option<char>;

    /// The cursor: the byte offset of the next character to decode.
    fn position(&self) -> usize;

    /// Moves the cursor to `position`.
    ///
    /// `position` should be a value previously returned by
    /// [`position`](Decode::position); anything else decodes from an arbitrary
    /// byte offset.
    fn seek(&mut self, position: usize);
}

/// The byte encodings the reader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8, the fallback when nothing else matches.
    Utf8,
    /// UTF-16, least significant byte first.
    Utf16Le,
    /// UTF-16, most significant byte first.
    Utf16Be,
}

impl Encoding {
    fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
        }
    }
}

/// The buffer handed to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Raw bytes of unknown encoding.
    Bytes(&'a [u8]),
    /// Text that is already decoded.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

/// Detects the encoding of `bytes`.
///
/// Returns the encoding together with the offset at which the content starts,
/// i.e. the length of the byte-order mark, if any.
///
/// Detection order, first match wins:
///
/// 1. the UTF-32, UTF-7 and GB-18030 markers, which are rejected,
/// 2. the UTF-8, UTF-16LE and UTF-16BE byte-order marks,
/// 3. a buffer of even length over four bytes with a zero among its first four
///    bytes is UTF-16LE if no even-indexed byte is zero and more than half of
///    the odd-indexed bytes are, and UTF-16BE for the mirrored case,
/// 4. UTF-8.
///
/// # Errors
///
/// Returns [`ReadError::UnsupportedEncoding`] for the rejected markers.
///
/// # Examples
///
/// ```
/// use jsonread::{Encoding, detect_encoding};
///
/// assert_eq!(detect_encoding(b"\xEF\xBB\xBF{}").unwrap(), (Encoding::Utf8, 3));
/// assert_eq!(detect_encoding(b"[\x001\x00]\x00").unwrap(), (Encoding::Utf16Le, 0));
/// assert_eq!(detect_encoding(b"[]").unwrap(), (Encoding::Utf8, 0));
/// ```
pub fn detect_encoding(bytes: &[u8]) -> Result<(Encoding, usize), ReadError> {
    let unsupported = match bytes {
        [0x00, 0x00, 0xFE, 0xFF, ..] => Some(UnsupportedEncoding::Utf32BigEndian),
        // Ahead of the UTF-16LE mark, which is a prefix of this one.
        [0xFF, 0xFE, 0x00, 0x00, ..] => Some(UnsupportedEncoding::Utf32LittleEndian),
        [0x2B, 0x2F, 0x76, 0x38 | 0x39 | 0x2B | 0x2F, ..] => Some(UnsupportedEncoding::Utf7),
        [0x84, 0x31, 0x95, 0x33, ..] => Some(UnsupportedEncoding::Gb18030),
        _ => None,
    };
    if let Some(encoding) = unsupported {
        tracing::debug!(%encoding, "rejecting unsupported input encoding");
        return Err(ReadError::UnsupportedEncoding(encoding));
    }

    for encoding in [Encoding::Utf8, Encoding::Utf16Le, Encoding::Utf16Be] {
        if bytes.starts_with(encoding.bom()) {
            return Ok((encoding, encoding.bom().len()));
        }
    }

    Ok((sniff_utf16(bytes).unwrap_or(Encoding::Utf8), 0))
}

/// Guesses UTF-16 from where the zero bytes are. Text in Latin and other
/// common scripts has a zero high byte in most code units and never a zero
/// low byte.
fn sniff_utf16(bytes: &[u8]) -> Option<Encoding> {
    let len = bytes.len();
    if len <= 4 || !len.is_multiple_of(2) || !bytes[..4].contains(&0) {
        return None;
    }

    let (mut even, mut odd) = (0usize, 0usize);
    for pair in bytes.chunks_exact(2) {
        even += usize::from(pair[0] == 0);
        odd += usize::from(pair[1] == 0);
    }

    let units = len / 2;
    if even == 0 && odd * 2 > units {
        Some(Encoding::Utf16Le)
    } else if odd == 0 && even * 2 > units {
        Some(Encoding::Utf16Be)
    } else {
        None
    }
}

/// A decoder bound to the strategy chosen for one buffer.
///
/// # Examples
///
/// ```
/// use jsonread::{Encoding, TextDecoder};
///
/// let decoder = TextDecoder::new(b"\xFF\xFEh\0i\0").unwrap();
/// assert_eq!(decoder.encoding(), Some(Encoding::Utf16Le));
/// assert_eq!(decoder.collect::<String>(), "hi");
/// ```
#[derive(Debug, Clone)]
pub enum TextDecoder<'a> {
    /// Native text input.
    Text(StrDecoder<'a>),
    /// UTF-8 bytes.
    Utf8(Utf8Decoder<'a>),
    /// UTF-16LE bytes.
    Utf16Le(Utf16LeDecoder<'a>),
    /// UTF-16BE bytes.
    Utf16Be(Utf16BeDecoder<'a>),
}

impl<'a> TextDecoder<'a> {
    /// Creates a decoder for `input`, detecting the encoding of byte input
    /// with [`detect_encoding`].
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnsupportedEncoding`] if the bytes carry the marker
    /// of an encoding that is recognized but not decoded.
    pub fn new(input: impl Into<Input<'a>>) -> Result<Self, ReadError> {
        match input.into() {
            Input::Text(text) => Ok(Self::Text(StrDecoder::new(text))),
            Input::Bytes(bytes) => {
                let (encoding, offset) = detect_encoding(bytes)?;
                tracing::debug!(?encoding, offset, "detected input encoding");
                Ok(Self::from_bytes(bytes, encoding, offset))
            }
        }
    }

    /// Creates a decoder for `bytes` in the given encoding, skipping a
    /// matching byte-order mark.
    #[must_use]
    pub fn with_encoding(bytes: &'a [u8], encoding: Encoding) -> Self {
        let offset = if bytes.starts_with(encoding.bom()) {
            encoding.bom().len()
        } else {
            0
        };
        tracing::debug!(?encoding, offset, "using configured input encoding");
        Self::from_bytes(bytes, encoding, offset)
    }

    fn from_bytes(bytes: &'a [u8], encoding: Encoding, offset: usize) -> Self {
        match encoding {
            Encoding::Utf8 => Self::Utf8(Utf8Decoder::new(bytes, offset)),
            Encoding::Utf16Le => Self::Utf16Le(Utf16Decoder::new(bytes, offset)),
            Encoding::Utf16Be => Self::Utf16Be(Utf16Decoder::new(bytes, offset)),
        }
    }

    /// The byte encoding being decoded, or `None` for native text.
    #[must_use]
    pub fn encoding(&self) -> Option<Encoding> {
        match self {
            Self::Text(_) => None,
            Self::Utf8(_) => Some(Encoding::Utf8),
            Self::Utf16Le(_) => Some(Encoding::Utf16Le),
            Self::Utf16Be(_) => Some(Encoding::Utf16Be),
        }
    }
}

impl Decode for TextDecoder<'_> {
    fn decode(&mut self) -> Option<char> {
        match self {
            Self::Text(d) => d.decode(),
            Self::Utf8(d) => d.decode(),
            Self::Utf16Le(d) => d.decode(),
            Self::Utf16Be(d) => d.decode(),
        }
    }

    fn position(&self) -> usize {
        match self {
            Self::Text(d) => d.position(),
            Self::Utf8(d) => d.position(),
            Self::Utf16Le(d) => d.position(),
            Self::Utf16Be(d) => d.position(),
        }
    }

    fn seek(&mut self, position: usize) {
        match self {
            Self::Text(d) => d.seek(position),
            Self::Utf8(d) => d.seek(position),
            Self::Utf16Le(d) => d.seek(position),
            Self::Utf16Be(d) => d.seek(position),
        }
    }
}

impl Iterator for TextDecoder<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode()
    }
}
