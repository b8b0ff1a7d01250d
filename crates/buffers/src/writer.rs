//! Append-only binary writer for tagged wire data.

use crate::WireType;

/// Largest field number a tag can carry (`2^29 - 1`).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// A growing byte buffer with protobuf wire primitives.
///
/// Output is a pure function of the calls made: the writer never reorders
/// or pads anything.
///
/// # Example
///
/// ```
/// use wirecodec_buffers::{WireType, Writer};
///
/// let mut writer = Writer::new();
/// writer.tag(1, WireType::Varint);
/// writer.varint(150);
/// assert_eq!(writer.flush(), vec![0x08, 0x96, 0x01]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    /// Bytes written so far.
    pub uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Drops everything written so far, keeping the allocation.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Takes the written bytes out of the writer, leaving it empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.uint8.push(byte);
    }

    /// Appends raw bytes.
    #[inline]
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes a base-128 little-endian varint.
    pub fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.uint8.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.uint8.push(value as u8);
    }

    /// Writes a field tag: `(field_number << 3) | wire_type` as a varint.
    pub fn tag(&mut self, field_number: u32, wire_type: WireType) {
        debug_assert!((1..=MAX_FIELD_NUMBER).contains(&field_number));
        self.varint(((field_number as u64) << 3) | wire_type as u64);
    }

    /// Writes a length-delimited byte string.
    pub fn string(&mut self, data: &[u8]) {
        self.varint(data.len() as u64);
        self.buf(data);
    }

    /// Writes a length-delimited UTF-8 string.
    pub fn utf8(&mut self, s: &str) {
        self.string(s.as_bytes());
    }

    /// Writes an already-encoded nested message as a length-delimited value.
    pub fn nested(&mut self, encoded: &[u8]) {
        self.string(encoded);
    }
}

/// Number of bytes `value` occupies as a varint.
pub fn varint_size(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}
