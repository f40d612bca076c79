use core::fmt;

use thiserror::Error;

/// The error returned when a buffer cannot be read as JSON.
///
/// The `Display` output is the complete, human-readable message, e.g.
/// `Unexpected token ']' at 3:7.`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The buffer starts with the marker of an encoding that is recognized but
    /// not decoded.
    #[error("Unsupported {0} encoding.")]
    UnsupportedEncoding(UnsupportedEncoding),
    /// The input ended where a token was still expected.
    #[error("Unexpected end of JSON input.")]
    UnexpectedEndOfInput,
    /// A character that is not allowed at this point of the grammar.
    #[error("Unexpected {token} at {line}:{column}.")]
    UnexpectedToken {
        /// Classification of the offending character.
        token: UnexpectedToken,
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
    },
}

impl ReadError {
    /// Returns the `(line, column)` of the error, if it has one.
    ///
    /// End-of-input and unsupported-encoding errors carry no location.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::UnexpectedToken { line, column, .. } => Some((*line, *column)),
            Self::UnsupportedEncoding(_) | Self::UnexpectedEndOfInput => None,
        }
    }
}

/// Encodings that are detected by their byte-order mark but rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedEncoding {
    /// `00 00 FE FF`
    Utf32BigEndian,
    /// `FF FE 00 00`
    Utf32LittleEndian,
    /// `2B 2F 76` followed by `38`, `39`, `2B` or `2F`
    Utf7,
    /// `84 31 95 33`
    Gb18030,
}

impl fmt::Display for UnsupportedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf32BigEndian => "UTF-32 big-endian",
            Self::Utf32LittleEndian => "UTF-32 little-endian",
            Self::Utf7 => "UTF-7",
            Self::Gb18030 => "GB-18030",
        })
    }
}

/// What the reader found where it did not expect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedToken {
    /// A `"` opening a string.
    String,
    /// A digit or `-` starting a number.
    Number,
    /// Any other character.
    Char(char),
}

impl UnexpectedToken {
    pub(crate) fn classify(c: char) -> Self {
        match c {
            '"' => Self::String,
            '0'..='9' | '-' => Self::Number,
            c => Self::Char(c),
        }
    }
}

impl fmt::Display for UnexpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Char(c) if *c < ' ' || *c > '\x7F' => match escape_name(*c) {
                Some(name) => write!(f, "token '\\{name}'"),
                // Characters outside the BMP show their leading UTF-16 unit.
                None => write!(f, "token '\\u{:04x}'", leading_unit(*c)),
            },
            Self::Char(c) => write!(f, "token '{c}'"),
        }
    }
}

fn leading_unit(c: char) -> u16 {
    let mut units = [0; 2];
    c.encode_utf16(&mut units)[0]
}

/// Single-character string escapes and the characters they stand for.
pub(crate) const ESCAPES: [(char, char); 8] = [
    ('"', '"'),
    ('\\', '\\'),
    ('/', '/'),
    ('b', '\u{0008}'),
    ('f', '\u{000C}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
];

pub(crate) fn unescape(name: char) -> Option<char> {
    ESCAPES
        .iter()
        .find_map(|&(n, c)| (n == name).then_some(c))
}

fn escape_name(c: char) -> Option<char> {
    ESCAPES
        .iter()
        .rev()
        .find_map(|&(n, e)| (e == c).then_some(n))
}
