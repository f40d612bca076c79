use core::fmt;

use bstr::BStr;

use super::Decode;

/// Decodes UTF-8 bytes.
///
/// Each ill-formed sequence decodes to a single U+FFFD: overlong forms, encoded
/// surrogates, scalars above U+10FFFF and truncated sequences all count. The
/// cursor moves past the lead byte and every continuation byte that was still
/// acceptable for that sequence, so decoding resumes at the first byte that
/// broke it.
#[derive(Clone)]
pub struct Utf8Decoder<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Utf8Decoder<'a> {
    /// Creates a decoder that starts at byte `position` of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a [u8], position: usize) -> Self {
        Self { buffer, position }
    }
}

impl Decode for Utf8Decoder<'_> {
    fn decode(&mut self) -> Option<char> {
        let rest = self.buffer.get(self.position..)?;
        let (c, len) = bstr::decode_utf8(rest);
        if len == 0 {
            return None;
        }
        self.position += len;
        Some(c.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, position: usize) {
        self.position = position;
    }
}

impl fmt::Debug for Utf8Decoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf8Decoder")
            .field("buffer", &BStr::new(self.buffer))
            .field("position", &self.position)
            .finish()
    }
}
