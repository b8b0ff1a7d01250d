//! Binary message encoder.

use wirecodec_buffers::{WireType, Writer};

use crate::{FieldLayout, Message, Value};

/// Layout-driven binary encoder.
///
/// Walks the fields in declaration order, skips every field that holds its
/// default and writes the rest as tag + value. Nested messages are encoded
/// into a scratch writer and emitted length-delimited.
pub struct MessageEncoder {
    pub writer: Writer,
}

impl Default for MessageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `message` and returns the bytes.
    pub fn encode(&mut self, message: &Message) -> Vec<u8> {
        self.writer.reset();
        self.write_message(message);
        self.writer.flush()
    }

    /// Encodes `message` behind a varint length prefix.
    pub fn encode_delimited(&mut self, message: &Message) -> Vec<u8> {
        let body = self.encode(message);
        self.writer.reset();
        self.writer.nested(&body);
        self.writer.flush()
    }

    /// Appends the fields of `message` to the writer.
    pub fn write_message(&mut self, message: &Message) {
        for (field, value) in message.fields() {
            if value.is_default() {
                continue;
            }
            self.write_field(field, value);
        }
    }

    fn write_field(&mut self, field: &FieldLayout, value: &Value) {
        match value {
            Value::List(items) if field.is_packed() => {
                let mut packed = Writer::with_capacity(items.len() * 2);
                for item in items {
                    write_varint_value(&mut packed, item);
                }
                self.writer.tag(field.number, WireType::LengthDelimited);
                self.writer.nested(packed.as_slice());
            }
            Value::List(items) => {
                for item in items {
                    self.write_single(field.number, item);
                }
            }
            single => self.write_single(field.number, single),
        }
    }

    fn write_single(&mut self, number: u32, value: &Value) {
        match value {
            Value::String(s) => {
                self.writer.tag(number, WireType::LengthDelimited);
                self.writer.utf8(s);
            }
            Value::Bytes(b) => {
                self.writer.tag(number, WireType::LengthDelimited);
                self.writer.string(b);
            }
            Value::Message(nested) => {
                let mut inner = MessageEncoder::new();
                if let Some(nested) = nested {
                    inner.write_message(nested);
                }
                self.writer.tag(number, WireType::LengthDelimited);
                self.writer.nested(inner.writer.as_slice());
            }
            // Nested lists cannot be stored through `Message::set`.
            Value::List(_) => {}
            scalar => {
                self.writer.tag(number, WireType::Varint);
                write_varint_value(&mut self.writer, scalar);
            }
        }
    }
}

/// Writes the varint payload of an integer-like value.
///
/// Negative `int32`/enum values are sign-extended to 64 bits, so they always
/// take ten bytes, as every protobuf implementation writes them.
fn write_varint_value(writer: &mut Writer, value: &Value) {
    let raw = match value {
        Value::Int32(v) | Value::Enum(v) => *v as i64 as u64,
        Value::Int64(v) => *v as u64,
        Value::Uint32(v) => *v as u64,
        Value::Uint64(v) => *v,
        Value::Bool(v) => *v as u64,
        _ => return,
    };
    writer.varint(raw);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldKind, MessageLayout};

    static LEAF: MessageLayout = MessageLayout::new(
        "test.Leaf",
        &[FieldLayout::singular(1, "n", FieldKind::Int32)],
    );

    static TREE: MessageLayout = MessageLayout::new(
        "test.Tree",
        &[
            FieldLayout::singular(1, "name", FieldKind::String),
            FieldLayout::singular(2, "leaf", FieldKind::Message(&LEAF)),
            FieldLayout::repeated(3, "weights", FieldKind::Uint32),
            FieldLayout::repeated(4, "labels", FieldKind::String),
            FieldLayout::singular(5, "flag", FieldKind::Bool),
        ],
    );

    #[test]
    fn test_default_message_is_empty() {
        let mut enc = MessageEncoder::new();
        assert!(enc.encode(&Message::new(&TREE)).is_empty());
    }

    #[test]
    fn test_present_empty_nested_is_written() {
        let m = Message::new(&TREE)
            .with("leaf", Message::new(&LEAF))
            .unwrap();
        let mut enc = MessageEncoder::new();
        assert_eq!(enc.encode(&m), vec![0x12, 0x00]);
    }

    #[test]
    fn test_negative_int32_sign_extends() {
        let leaf = Message::new(&LEAF).with("n", Value::Int32(-1)).unwrap();
        let mut enc = MessageEncoder::new();
        let out = enc.encode(&leaf);
        assert_eq!(out.len(), 11);
        assert_eq!(&out[..2], &[0x08, 0xff]);
        assert_eq!(out[10], 0x01);
    }

    #[test]
    fn test_packed_and_unpacked_repeated() {
        let m = Message::new(&TREE)
            .with(
                "weights",
                Value::List(vec![Value::Uint32(1), Value::Uint32(0), Value::Uint32(300)]),
            )
            .unwrap()
            .with(
                "labels",
                Value::List(vec![Value::from("a"), Value::from("")]),
            )
            .unwrap();
        let mut enc = MessageEncoder::new();
        assert_eq!(
            enc.encode(&m),
            vec![
                0x1a, 0x04, 0x01, 0x00, 0xac, 0x02, // packed weights
                0x22, 0x01, b'a', // labels[0]
                0x22, 0x00, // labels[1], kept although empty
            ]
        );
    }

    #[test]
    fn test_encode_delimited() {
        let m = Message::new(&TREE).with("flag", Value::Bool(true)).unwrap();
        let mut enc = MessageEncoder::new();
        assert_eq!(enc.encode_delimited(&m), vec![0x02, 0x28, 0x01]);
    }
}
