use super::Decode;

/// Yields the characters of a `str`; no decoding takes place.
///
/// The cursor is a byte offset into the `str`.
#[derive(Debug, Clone)]
pub struct StrDecoder<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> StrDecoder<'a> {
    /// Creates a decoder at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }
}

impl Decode for StrDecoder<'_> {
    fn decode(&mut self) -> Option<char> {
        let c = self.text.get(self.position..)?.chars().next()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, position: usize) {
        self.position = position;
    }
}
