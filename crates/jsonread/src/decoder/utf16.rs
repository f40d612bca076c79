use core::{fmt, marker::PhantomData};

use bstr::BStr;

use super::Decode;

/// Byte order of a UTF-16 code unit.
pub trait ByteOrder {
    /// Assembles one code unit from two bytes in buffer order.
    fn unit(bytes: [u8; 2]) -> u16;
}

/// Least significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndian;

/// Most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigEndian;

impl ByteOrder for LittleEndian {
    fn unit(bytes: [u8; 2]) -> u16 {
        u16::from_le_bytes(bytes)
    }
}

impl ByteOrder for BigEndian {
    fn unit(bytes: [u8; 2]) -> u16 {
        u16::from_be_bytes(bytes)
    }
}

/// Decodes UTF-16 bytes in byte order `B`.
///
/// A high surrogate combines with an immediately following low surrogate.
/// Unpaired surrogates of either kind decode to U+FFFD; a code unit that
/// follows an unpaired high surrogate is not consumed with it. A trailing odd
/// byte is ignored.
pub struct Utf16Decoder<'a, B> {
    buffer: &'a [u8],
    position: usize,
    order: PhantomData<B>,
}

/// Decodes UTF-16LE bytes.
pub type Utf16LeDecoder<'a> = Utf16Decoder<'a, LittleEndian>;
/// Decodes UTF-16BE bytes.
pub type Utf16BeDecoder<'a> = Utf16Decoder<'a, BigEndian>;

impl<'a, B: ByteOrder> Utf16Decoder<'a, B> {
    /// Creates a decoder that starts at byte `position` of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a [u8], position: usize) -> Self {
        Self {
            buffer,
            position,
            order: PhantomData,
        }
    }

    fn unit_at(&self, position: usize) -> Option<u16> {
        match self.buffer.get(position..position + 2)? {
            &[a, b] => Some(B::unit([a, b])),
            _ => None,
        }
    }
}

impl<B: ByteOrder> Decode for Utf16Decoder<'_, B> {
    fn decode(&mut self) -> Option<char> {
        let unit = self.unit_at(self.position)?;
        self.position += 2;

        let scalar = match unit {
            0xD800..=0xDBFF => match self.unit_at(self.position) {
                Some(low @ 0xDC00..=0xDFFF) => {
                    self.position += 2;
                    0x10000 + ((u32::from(unit) & 0x3FF) << 10) + (u32::from(low) & 0x3FF)
                }
                _ => return Some(char::REPLACEMENT_CHARACTER),
            },
            unit => u32::from(unit),
        };

        // Lone low surrogates are the only values rejected here.
        Some(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, position: usize) {
        self.position = position;
    }
}

impl<B> Clone for Utf16Decoder<'_, B> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            position: self.position,
            order: PhantomData,
        }
    }
}

impl<B> fmt::Debug for Utf16Decoder<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf16Decoder")
            .field("order", &core::any::type_name::<B>())
            .field("buffer", &BStr::new(self.buffer))
            .field("position", &self.position)
            .finish()
    }
}
