//! Accumulates the contents of one string literal.
//!
//! `\uXXXX` escapes arrive as UTF-16 code units. A high surrogate is held back
//! until the next piece of the string shows whether it completes a pair; an
//! escape that cannot form a scalar value is stored as U+FFFD.

#[derive(Debug, Default)]
pub(crate) struct StringBuffer {
    value: String,
    pending_high: Option<u32>,
}

impl StringBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, c: char) {
        self.flush_high();
        self.value.push(c);
    }

    /// Appends the code unit of a `\uXXXX` escape.
    pub(crate) fn push_unit(&mut self, unit: u32) {
        match unit {
            0xD800..=0xDBFF => {
                self.flush_high();
                self.pending_high = Some(unit);
            }
            0xDC00..=0xDFFF => {
                let scalar = self
                    .pending_high
                    .take()
                    .and_then(|high| char::from_u32(0x10000 + ((high & 0x3FF) << 10) + (unit & 0x3FF)));
                self.value.push(scalar.unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            unit => self.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    pub(crate) fn finish(mut self) -> String {
        self.flush_high();
        self.value
    }

    fn flush_high(&mut self) {
        if self.pending_high.take().is_some() {
            self.value.push(char::REPLACEMENT_CHARACTER);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    enum Piece {
        Char(char),
        Unit(u32),
    }

    use Piece::{Char, Unit};

    #[rstest]
    #[case::bmp(vec![Unit(0x00E9)], "é")]
    #[case::pair(vec![Unit(0xD83D), Unit(0xDE00)], "😀")]
    #[case::lone_high_at_end(vec![Char('a'), Unit(0xD83D)], "a\u{FFFD}")]
    #[case::high_then_char(vec![Unit(0xD83D), Char('a')], "\u{FFFD}a")]
    #[case::high_then_high(vec![Unit(0xD83D), Unit(0xD83D), Unit(0xDE00)], "\u{FFFD}😀")]
    #[case::lone_low(vec![Unit(0xDE00), Char('a')], "\u{FFFD}a")]
    #[case::high_then_bmp_unit(vec![Unit(0xD800), Unit(0x0041)], "\u{FFFD}A")]
    fn joins_units(#[case] pieces: Vec<Piece>, #[case] expected: &str) {
        let mut buffer = StringBuffer::new();
        for piece in pieces {
            match piece {
                Char(c) => buffer.push(c),
                Unit(u) => buffer.push_unit(u),
            }
        }
        assert_eq!(buffer.finish(), expected);
    }
}
