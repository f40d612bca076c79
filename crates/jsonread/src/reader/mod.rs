//! The JSON reader.
//!
//! The reader pulls one character at a time from a [`Decode`] strategy and
//! assembles exactly one value. Nesting is tracked with an explicit stack of
//! open containers, never with recursion, so arbitrarily deep input only costs
//! heap memory.
//!
//! Positions are not tracked while reading. When the input is rejected, the
//! decoder is replayed from the first content position up to the offending
//! character to compute its line and column.

mod frame;
mod string_buffer;

use frame::Frame;
use string_buffer::StringBuffer;

use crate::{
    ReaderOptions,
    decoder::{Decode, Input, TextDecoder},
    error::{ReadError, UnexpectedToken, unescape},
    value::Value,
};

/// Reads one JSON value from a buffer.
///
/// A `TextReader` is single-shot: [`read`](TextReader::read) consumes it.
///
/// # Examples
///
/// ```rust
/// use jsonread::{TextReader, Value};
///
/// let value = TextReader::new(b"\xEF\xBB\xBF[true, null]").read().unwrap();
/// assert_eq!(value, Value::Array(vec![Value::Boolean(true), Value::Null]));
/// ```
#[derive(Debug, Clone)]
pub struct TextReader<'a> {
    input: Input<'a>,
    options: ReaderOptions,
}

impl<'a> TextReader<'a> {
    /// Creates a reader with default options.
    #[must_use]
    pub fn new(input: impl Into<Input<'a>>) -> Self {
        Self::with_options(input, ReaderOptions::default())
    }

    /// Creates a reader with the given options.
    #[must_use]
    pub fn with_options(input: impl Into<Input<'a>>, options: ReaderOptions) -> Self {
        Self {
            input: input.into(),
            options,
        }
    }

    /// Decodes the buffer and reads the single value it contains.
    ///
    /// Leading and trailing whitespace is skipped; anything else after the
    /// value is an error.
    ///
    /// # Errors
    ///
    /// - [`ReadError::UnsupportedEncoding`] if the buffer is marked as UTF-32,
    ///   UTF-7 or GB-18030.
    /// - [`ReadError::UnexpectedEndOfInput`] if the buffer ends inside the
    ///   value.
    /// - [`ReadError::UnexpectedToken`] for any other malformed input.
    pub fn read(self) -> Result<Value, ReadError> {
        let decoder = match (self.input, self.options.encoding) {
            (Input::Bytes(bytes), Some(encoding)) => TextDecoder::with_encoding(bytes, encoding),
            (input, _) => TextDecoder::new(input)?,
        };

        let result = match decoder {
            TextDecoder::Text(d) => Reader::new(d, self.options).read(),
            TextDecoder::Utf8(d) => Reader::new(d, self.options).read(),
            TextDecoder::Utf16Le(d) => Reader::new(d, self.options).read(),
            TextDecoder::Utf16Be(d) => Reader::new(d, self.options).read(),
        };

        if let Err(err) = &result {
            tracing::debug!(
                error = %err,
                location = ?err.location(),
                "rejected JSON input"
            );
        }
        result
    }
}

struct Reader<D> {
    decoder: D,
    options: ReaderOptions,
    /// Decoder position of the first character, where location replay starts.
    start: usize,
    /// Decoder position of `char`.
    position: usize,
    /// The current character, `None` at the end of input.
    char: Option<char>,
}

impl<D: Decode> Reader<D> {
    fn new(mut decoder: D, options: ReaderOptions) -> Self {
        let start = decoder.position();
        let char = decoder.decode();
        Self {
            decoder,
            options,
            start,
            position: start,
            char,
        }
    }

    fn read(mut self) -> Result<Value, ReadError> {
        self.whitespace();

        let mut frame = match self.char {
            Some('{') => Frame::object(),
            Some('[') => Frame::array(),
            _ => {
                let value = self.scalar()?;
                return self.finish(value);
            }
        };
        self.advance();

        // Enclosing containers of `frame`, innermost last.
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            self.whitespace();

            if self.char == Some(frame.closer()) {
                self.advance();
                let value = frame.into_value();
                match stack.pop() {
                    Some(parent) => {
                        frame = parent;
                        frame.insert(value);
                        continue;
                    }
                    None => return self.finish(value),
                }
            }

            if !frame.take_first() {
                self.expect(',')?;
                self.whitespace();
            }

            if frame.is_object() {
                if self.char != Some('"') {
                    return Err(self.unexpected());
                }
                let key = self.string()?;
                self.whitespace();
                self.expect(':')?;
                self.whitespace();
                frame.set_key(key);
            }

            match self.char {
                Some('{') => {
                    self.advance();
                    stack.push(core::mem::replace(&mut frame, Frame::object()));
                }
                Some('[') => {
                    self.advance();
                    stack.push(core::mem::replace(&mut frame, Frame::array()));
                }
                _ => {
                    let value = self.scalar()?;
                    frame.insert(value);
                }
            }
        }
    }

    /// Skips trailing whitespace and requires the end of input.
    fn finish(mut self, value: Value) -> Result<Value, ReadError> {
        self.whitespace();
        match self.char {
            None => Ok(value),
            Some(_) => Err(self.unexpected()),
        }
    }

    /// Moves to the next character. Does nothing at the end of input.
    fn advance(&mut self) {
        if self.char.is_some() {
            self.position = self.decoder.position();
            self.char = self.decoder.decode();
        }
    }

    fn whitespace(&mut self) {
        while matches!(self.char, Some(' ' | '\n' | '\r' | '\t')) {
            self.advance();
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ReadError> {
        if self.char != Some(c) {
            return Err(self.unexpected());
        }
        self.advance();
        Ok(())
    }

    fn keyword(&mut self, text: &str, value: Value) -> Result<Value, ReadError> {
        for c in text.chars() {
            self.expect(c)?;
        }
        Ok(value)
    }

    fn scalar(&mut self) -> Result<Value, ReadError> {
        let non_finite = !self.options.reject_non_finite_numbers;
        match self.char {
            Some('"') => self.string().map(Value::String),
            Some('0'..='9' | '-') => self.number(),
            Some('t') => self.keyword("true", Value::Boolean(true)),
            Some('f') => self.keyword("false", Value::Boolean(false)),
            Some('n') => self.keyword("null", Value::Null),
            Some('N') if non_finite => self.keyword("NaN", Value::Number(f64::NAN)),
            Some('I') if non_finite => self.keyword("Infinity", Value::Number(f64::INFINITY)),
            _ => Err(self.unexpected()),
        }
    }

    fn number(&mut self) -> Result<Value, ReadError> {
        let mut text = String::new();
        if self.char == Some('-') {
            text.push('-');
            self.advance();
            if self.char == Some('I') && !self.options.reject_non_finite_numbers {
                return self.keyword("Infinity", Value::Number(f64::NEG_INFINITY));
            }
        }

        let lead = self.digit()?;
        text.push(lead);
        if lead == '0' && matches!(self.char, Some('0'..='9')) {
            return Err(self.unexpected());
        }
        self.digits(&mut text);

        if self.char == Some('.') {
            text.push('.');
            self.advance();
            text.push(self.digit()?);
            self.digits(&mut text);
        }

        if let Some(e @ ('e' | 'E')) = self.char {
            text.push(e);
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.char {
                text.push(sign);
                self.advance();
            }
            text.push(self.digit()?);
            self.digits(&mut text);
        }

        match text.parse::<f64>() {
            Ok(n) => Ok(Value::Number(n)),
            Err(_) => Err(self.unexpected()),
        }
    }

    fn digit(&mut self) -> Result<char, ReadError> {
        match self.char {
            Some(c @ '0'..='9') => {
                self.advance();
                Ok(c)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn digits(&mut self, text: &mut String) {
        while let Some(c @ '0'..='9') = self.char {
            text.push(c);
            self.advance();
        }
    }

    /// Reads a string literal; the current character is its opening quote.
    fn string(&mut self) -> Result<String, ReadError> {
        self.advance();
        let mut buffer = StringBuffer::new();
        loop {
            match self.char {
                Some('"') => {
                    self.advance();
                    return Ok(buffer.finish());
                }
                Some('\\') => {
                    self.advance();
                    match self.char {
                        Some('u') => {
                            self.advance();
                            let unit = self.hex_unit()?;
                            buffer.push_unit(unit);
                        }
                        Some(name) => match unescape(name) {
                            Some(c) => {
                                self.advance();
                                buffer.push(c);
                            }
                            None => return Err(self.unexpected()),
                        },
                        None => return Err(self.unexpected()),
                    }
                }
                Some(c) if c >= ' ' => {
                    self.advance();
                    buffer.push(c);
                }
                // Control characters and the end of input.
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Reads the four hex digits of a `\u` escape.
    fn hex_unit(&mut self) -> Result<u32, ReadError> {
        let mut unit = 0;
        for _ in 0..4 {
            let Some(digit) = self.char.and_then(|c| c.to_digit(16)) else {
                return Err(self.unexpected());
            };
            self.advance();
            unit = (unit << 4) | digit;
        }
        Ok(unit)
    }

    /// The error for the current character.
    fn unexpected(&mut self) -> ReadError {
        let Some(c) = self.char else {
            return ReadError::UnexpectedEndOfInput;
        };
        let (line, column) = self.location();
        ReadError::UnexpectedToken {
            token: UnexpectedToken::classify(c),
            line,
            column,
        }
    }

    /// Replays the decoder up to the current character, counting lines and
    /// columns from 1.
    fn location(&mut self) -> (usize, usize) {
        let (mut line, mut column) = (1, 1);
        self.decoder.seek(self.start);
        while self.decoder.position() < self.position {
            match self.decoder.decode() {
                Some('\n') => {
                    line += 1;
                    column = 1;
                }
                Some(_) => column += 1,
                None => break,
            }
        }
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(
            self.decoder.position(),
            self.position,
            "Internal error: location replay missed the current character"
        );
        (line, column)
    }
}
