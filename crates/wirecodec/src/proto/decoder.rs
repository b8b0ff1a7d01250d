//! Binary message decoder.

use tracing::trace;
use wirecodec_buffers::{BufferError, Reader, WireType};

use crate::config::DEFAULT_RECURSION_LIMIT;
use crate::{FieldKind, FieldLayout, Message, MessageLayout, Value};

/// Layout-driven binary decoder.
///
/// Starts from a default message and fills in every known field it meets
/// until the reader reaches its end bound. Unknown field numbers are skipped
/// according to their wire type. Any malformed byte fails the whole decode.
#[derive(Debug, Clone, Copy)]
pub struct MessageDecoder {
    recursion_limit: usize,
}

impl Default for MessageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDecoder {
    pub fn new() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn with_recursion_limit(recursion_limit: usize) -> Self {
        Self { recursion_limit }
    }

    /// Decodes a whole buffer as one message.
    pub fn decode(
        &self,
        layout: &'static MessageLayout,
        data: &[u8],
    ) -> Result<Message, BufferError> {
        let mut reader = Reader::new(data);
        self.decode_reader(layout, &mut reader, None)
    }

    /// Decodes from `reader`, either up to its end bound or, with `length`,
    /// exactly the next `length` bytes.
    pub fn decode_reader(
        &self,
        layout: &'static MessageLayout,
        reader: &mut Reader<'_>,
        length: Option<usize>,
    ) -> Result<Message, BufferError> {
        let mut message = Message::new(layout);
        match length {
            Some(length) => {
                let mut sub = reader.cut(length)?;
                self.merge(&mut message, &mut sub, 0)?;
            }
            None => self.merge(&mut message, reader, 0)?,
        }
        Ok(message)
    }

    /// Reads fields from `reader` into `message` until the reader is done.
    fn merge(
        &self,
        message: &mut Message,
        reader: &mut Reader<'_>,
        depth: usize,
    ) -> Result<(), BufferError> {
        if depth > self.recursion_limit {
            return Err(BufferError::RecursionLimit(self.recursion_limit));
        }
        let layout = message.layout();
        while !reader.is_done() {
            let (number, wire_type) = reader.tag()?;
            let Some((index, field)) = layout.field_by_number(number) else {
                trace!(
                    message = layout.type_name,
                    field_number = number,
                    %wire_type,
                    "skipping unknown field"
                );
                reader.skip_value(number, wire_type)?;
                continue;
            };
            self.read_field(field, wire_type, reader, message.slot_mut(index), depth)?;
        }
        Ok(())
    }

    fn read_field(
        &self,
        field: &FieldLayout,
        wire_type: WireType,
        reader: &mut Reader<'_>,
        slot: &mut Value,
        depth: usize,
    ) -> Result<(), BufferError> {
        if field.repeated {
            let Value::List(items) = slot else {
                return Ok(());
            };
            // Packed runs are accepted for any packable field, and unpacked
            // elements for packed ones.
            if field.kind.is_packable() && wire_type == WireType::LengthDelimited {
                let mut packed = reader.delimited()?;
                while !packed.is_done() {
                    items.push(read_varint_value(&field.kind, &mut packed)?);
                }
                return Ok(());
            }
            expect_wire_type(field, wire_type)?;
            items.push(self.read_single(&field.kind, reader, depth)?);
            return Ok(());
        }

        expect_wire_type(field, wire_type)?;
        match slot {
            // A repeated occurrence of a nested message merges into it.
            Value::Message(Some(existing)) => {
                let mut sub = reader.delimited()?;
                self.merge(existing, &mut sub, depth + 1)
            }
            _ => {
                *slot = self.read_single(&field.kind, reader, depth)?;
                Ok(())
            }
        }
    }

    fn read_single(
        &self,
        kind: &FieldKind,
        reader: &mut Reader<'_>,
        depth: usize,
    ) -> Result<Value, BufferError> {
        match kind {
            FieldKind::String | FieldKind::Decimal => {
                Ok(Value::String(reader.utf8_string()?.to_owned()))
            }
            FieldKind::Bytes => Ok(Value::Bytes(reader.string()?.to_vec())),
            FieldKind::Message(layout) => {
                let mut sub = reader.delimited()?;
                let mut nested = Message::new(layout);
                self.merge(&mut nested, &mut sub, depth + 1)?;
                Ok(Value::Message(Some(Box::new(nested))))
            }
            varint_kind => read_varint_value(varint_kind, reader),
        }
    }
}

fn expect_wire_type(field: &FieldLayout, actual: WireType) -> Result<(), BufferError> {
    let expected = field.kind.wire_type();
    if actual != expected {
        return Err(BufferError::WireTypeMismatch {
            field_number: field.number,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Reads one varint and narrows it to the field's integer kind.
///
/// 32-bit kinds keep the low 32 bits, matching how other implementations
/// read sign-extended and oversized values.
fn read_varint_value(kind: &FieldKind, reader: &mut Reader<'_>) -> Result<Value, BufferError> {
    let raw = reader.varint()?;
    Ok(match kind {
        FieldKind::Int32 => Value::Int32(raw as i32),
        FieldKind::Int64 => Value::Int64(raw as i64),
        FieldKind::Uint32 => Value::Uint32(raw as u32),
        FieldKind::Uint64 => Value::Uint64(raw),
        FieldKind::Bool => Value::Bool(raw != 0),
        FieldKind::Enum(_) => Value::Enum(raw as i32),
        FieldKind::String | FieldKind::Decimal | FieldKind::Bytes | FieldKind::Message(_) => {
            return Err(BufferError::WireTypeMismatch {
                field_number: 0,
                expected: kind.wire_type(),
                actual: WireType::Varint,
            })
        }
    })
}
