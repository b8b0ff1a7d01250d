//! Bounded binary reader with cursor tracking.

use std::str;

use crate::writer::MAX_FIELD_NUMBER;
use crate::{BufferError, WireType};

/// Longest legal varint encoding of a `u64`.
const MAX_VARINT_LEN: usize = 10;

/// A cursor over `uint8[x..end]`.
///
/// Every read is checked against `end`, so a reader cut out for a nested
/// message can never run into the bytes of its parent.
///
/// # Example
///
/// ```
/// use wirecodec_buffers::{Reader, WireType};
///
/// let data = [0x08, 0x96, 0x01];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.tag().unwrap(), (1, WireType::Varint));
/// assert_eq!(reader.varint().unwrap(), 150);
/// assert!(reader.is_done());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over the whole slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader over `uint8[x..end]`. `end` is clamped to the slice.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        Self {
            uint8,
            x: x.min(end),
            end,
        }
    }

    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.uint8 = uint8;
        self.x = 0;
        self.end = uint8.len();
    }

    /// Returns the number of bytes left before `end`.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    pub fn is_done(&self) -> bool {
        self.x >= self.end
    }

    fn ensure(&self, needed: usize) -> Result<(), BufferError> {
        let remaining = self.size();
        if needed > remaining {
            return Err(BufferError::UnexpectedEnd { needed, remaining });
        }
        Ok(())
    }

    /// Advances the cursor by `length` bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.ensure(length)?;
        self.x += length;
        Ok(())
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.ensure(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Returns the next `size` bytes and advances past them.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.ensure(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }

    /// Splits off a reader over the next `size` bytes and advances past them.
    pub fn cut(&mut self, size: usize) -> Result<Reader<'a>, BufferError> {
        self.ensure(size)?;
        let sub = Reader::from_slice(self.uint8, self.x, self.x + size);
        self.x += size;
        Ok(sub)
    }

    /// Reads a base-128 varint of at most ten bytes.
    pub fn varint(&mut self) -> Result<u64, BufferError> {
        let mut result: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            if self.is_done() {
                return Err(BufferError::UnterminatedVarint);
            }
            let b = self.uint8[self.x];
            self.x += 1;
            // The tenth byte may only carry bit 63.
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return Err(BufferError::VarintOverflow);
            }
            result |= ((b & 0x7f) as u64) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(BufferError::VarintOverflow)
    }

    /// Reads a field tag and splits it into field number and wire type.
    pub fn tag(&mut self) -> Result<(u32, WireType), BufferError> {
        let key = self.varint()?;
        let wire_type = WireType::from_bits((key & 0x07) as u8)?;
        let field_number = key >> 3;
        if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
            return Err(BufferError::InvalidFieldNumber(field_number));
        }
        Ok((field_number as u32, wire_type))
    }

    /// Reads a varint length prefix and returns that many bytes.
    pub fn string(&mut self) -> Result<&'a [u8], BufferError> {
        let length = self.length()?;
        self.buf(length)
    }

    /// Reads a length-delimited value and validates it as UTF-8.
    pub fn utf8_string(&mut self) -> Result<&'a str, BufferError> {
        let bytes = self.string()?;
        str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)
    }

    /// Reads a varint length prefix and cuts a reader over the value.
    pub fn delimited(&mut self) -> Result<Reader<'a>, BufferError> {
        let length = self.length()?;
        self.cut(length)
    }

    fn length(&mut self) -> Result<usize, BufferError> {
        let length = self.varint()?;
        let remaining = self.size();
        if length > remaining as u64 {
            return Err(BufferError::UnexpectedEnd {
                needed: usize::try_from(length).unwrap_or(usize::MAX),
                remaining,
            });
        }
        Ok(length as usize)
    }

    /// Consumes the value of field `field_number` without interpreting it.
    ///
    /// A start-group marker skips through the end-group marker of the same
    /// field, including any nested groups. A bare end-group marker is
    /// malformed.
    pub fn skip_value(
        &mut self,
        field_number: u32,
        wire_type: WireType,
    ) -> Result<(), BufferError> {
        match wire_type {
            WireType::Varint => self.varint().map(|_| ()),
            WireType::Fixed64 => self.skip(8),
            WireType::LengthDelimited => self.string().map(|_| ()),
            WireType::Fixed32 => self.skip(4),
            WireType::StartGroup => self.skip_group(field_number),
            WireType::EndGroup => Err(BufferError::UnexpectedEndGroup),
        }
    }

    fn skip_group(&mut self, field_number: u32) -> Result<(), BufferError> {
        let mut open = vec![field_number];
        while let Some(&current) = open.last() {
            let (number, wire_type) = self.tag()?;
            match wire_type {
                WireType::StartGroup => open.push(number),
                WireType::EndGroup if number == current => {
                    open.pop();
                }
                WireType::EndGroup => {
                    return Err(BufferError::MismatchedEndGroup {
                        expected: current,
                        actual: number,
                    })
                }
                other => self.skip_value(number, other)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(reader.u8().unwrap(), 0x02);
        assert!(reader.u8().is_err());
    }

    #[test]
    fn test_varint() {
        let data = [0xac, 0x02, 0x7f];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.varint().unwrap(), 300);
        assert_eq!(reader.varint().unwrap(), 127);
    }

    #[test]
    fn test_varint_unterminated() {
        let data = [0x80, 0x80];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.varint(), Err(BufferError::UnterminatedVarint));
    }

    #[test]
    fn test_varint_too_long() {
        let data = [0xff; 11];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.varint(), Err(BufferError::VarintOverflow));
    }

    #[test]
    fn test_varint_tenth_byte_overflow() {
        // 2^64: the tenth byte carries bit 64.
        let mut data = [0x80; 10];
        data[9] = 0x02;
        assert_eq!(Reader::new(&data).varint(), Err(BufferError::VarintOverflow));

        let mut data = [0xff; 10];
        data[9] = 0x7f;
        assert_eq!(Reader::new(&data).varint(), Err(BufferError::VarintOverflow));

        data[9] = 0x01;
        assert_eq!(Reader::new(&data).varint(), Ok(u64::MAX));
    }

    #[test]
    fn test_tag_zero_field() {
        let data = [0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.tag(), Err(BufferError::InvalidFieldNumber(0)));
    }

    #[test]
    fn test_cut_respects_end() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        let mut sub = reader.cut(2).unwrap();
        assert_eq!(sub.u8().unwrap(), 0x01);
        assert_eq!(sub.u8().unwrap(), 0x02);
        assert!(sub.u8().is_err());
        assert_eq!(reader.u8().unwrap(), 0x03);
    }

    #[test]
    fn test_string_truncated() {
        let data = [0x05, b'a', b'b'];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.string(),
            Err(BufferError::UnexpectedEnd {
                needed: 5,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_utf8_string_invalid() {
        let data = [0x02, 0xc3, 0x28];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.utf8_string(), Err(BufferError::InvalidUtf8));
    }

    #[test]
    fn test_skip_group() {
        // field 1 start-group, field 2 varint 5, field 1 end-group, then 0x2a
        let data = [0x0b, 0x10, 0x05, 0x0c, 0x2a];
        let mut reader = Reader::new(&data);
        let (number, wire_type) = reader.tag().unwrap();
        reader.skip_value(number, wire_type).unwrap();
        assert_eq!(reader.u8().unwrap(), 0x2a);
    }

    #[test]
    fn test_skip_group_nested() {
        // group 1 { group 3 { } field 2 varint } then 0x2a
        let data = [0x0b, 0x1b, 0x1c, 0x10, 0x01, 0x0c, 0x2a];
        let mut reader = Reader::new(&data);
        let (number, wire_type) = reader.tag().unwrap();
        reader.skip_value(number, wire_type).unwrap();
        assert_eq!(reader.u8().unwrap(), 0x2a);
    }

    #[test]
    fn test_skip_group_mismatched_end() {
        // field 1 start-group closed by field 2 end-group
        let data = [0x0b, 0x10, 0x05, 0x14];
        let mut reader = Reader::new(&data);
        let (number, wire_type) = reader.tag().unwrap();
        assert_eq!(
            reader.skip_value(number, wire_type),
            Err(BufferError::MismatchedEndGroup {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_skip_bare_end_group() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.skip_value(1, WireType::EndGroup),
            Err(BufferError::UnexpectedEndGroup)
        );
    }
}
