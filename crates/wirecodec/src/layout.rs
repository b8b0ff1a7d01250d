//! Declarative message layouts.
//!
//! A [`MessageLayout`] lists the fields of one message type in declaration
//! order. The same table drives binary encoding, decoding and the portable
//! mapping, so adding a message type means writing a table, not code.
//!
//! ```
//! use wirecodec::{FieldKind, FieldLayout, MessageLayout};
//!
//! static POINT: MessageLayout = MessageLayout::new(
//!     "example.Point",
//!     &[
//!         FieldLayout::singular(1, "x", FieldKind::Int32),
//!         FieldLayout::singular(2, "y", FieldKind::Int32),
//!         FieldLayout::singular(3, "label", FieldKind::String),
//!     ],
//! );
//!
//! assert_eq!(POINT.short_name(), "Point");
//! assert_eq!(POINT.field("label").unwrap().1.number, 3);
//! ```

use wirecodec_buffers::{WireType, MAX_FIELD_NUMBER};

use crate::{CodecError, EnumTable, Message, Value};

/// Field numbers reserved by the protobuf implementation.
const RESERVED_NUMBERS: std::ops::RangeInclusive<u32> = 19_000..=19_999;

/// Semantic type of a field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    /// Integer code with a symbolic name table.
    Enum(&'static EnumTable),
    String,
    /// Decimal number carried as its string form.
    Decimal,
    Bytes,
    Message(&'static MessageLayout),
}

impl FieldKind {
    /// Wire type of a single value of this kind.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Bool
            | FieldKind::Enum(_) => WireType::Varint,
            FieldKind::String | FieldKind::Decimal | FieldKind::Bytes | FieldKind::Message(_) => {
                WireType::LengthDelimited
            }
        }
    }

    /// Repeated fields of varint kinds are written packed.
    pub fn is_packable(&self) -> bool {
        self.wire_type() == WireType::Varint
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Uint32 => "uint32",
            FieldKind::Uint64 => "uint64",
            FieldKind::Bool => "bool",
            FieldKind::Enum(_) => "enum",
            FieldKind::String => "string",
            FieldKind::Decimal => "decimal",
            FieldKind::Bytes => "bytes",
            FieldKind::Message(_) => "message",
        }
    }

    /// Default value of a single (non-repeated) field of this kind.
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Int32 => Value::Int32(0),
            FieldKind::Int64 => Value::Int64(0),
            FieldKind::Uint32 => Value::Uint32(0),
            FieldKind::Uint64 => Value::Uint64(0),
            FieldKind::Bool => Value::Bool(false),
            FieldKind::Enum(_) => Value::Enum(0),
            FieldKind::String | FieldKind::Decimal => Value::String(String::new()),
            FieldKind::Bytes => Value::Bytes(Vec::new()),
            FieldKind::Message(_) => Value::Message(None),
        }
    }

    /// Whether `value` is a legal single value for this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Int32, Value::Int32(_))
            | (FieldKind::Int64, Value::Int64(_))
            | (FieldKind::Uint32, Value::Uint32(_))
            | (FieldKind::Uint64, Value::Uint64(_))
            | (FieldKind::Bool, Value::Bool(_))
            | (FieldKind::Enum(_), Value::Enum(_))
            | (FieldKind::String, Value::String(_))
            | (FieldKind::Decimal, Value::String(_))
            | (FieldKind::Bytes, Value::Bytes(_))
            | (FieldKind::Message(_), Value::Message(None)) => true,
            (FieldKind::Message(layout), Value::Message(Some(message))) => {
                message.layout().type_name == layout.type_name
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Enum(table) => write!(f, "Enum({})", table.name),
            FieldKind::Message(layout) => write!(f, "Message({})", layout.type_name),
            other => f.write_str(other.name()),
        }
    }
}

/// One field of a message layout.
#[derive(Debug, Clone, Copy)]
pub struct FieldLayout {
    /// Wire tag number. Stable for the life of the message type.
    pub number: u32,
    /// Declared name, used verbatim as the portable key.
    pub name: &'static str,
    pub kind: FieldKind,
    pub repeated: bool,
}

impl FieldLayout {
    pub const fn singular(number: u32, name: &'static str, kind: FieldKind) -> Self {
        Self {
            number,
            name,
            kind,
            repeated: false,
        }
    }

    pub const fn repeated(number: u32, name: &'static str, kind: FieldKind) -> Self {
        Self {
            number,
            name,
            kind,
            repeated: true,
        }
    }

    /// Whether the field is written as one packed run.
    pub fn is_packed(&self) -> bool {
        self.repeated && self.kind.is_packable()
    }

    /// Wire type this field is written with.
    pub fn wire_type(&self) -> WireType {
        if self.is_packed() {
            WireType::LengthDelimited
        } else {
            self.kind.wire_type()
        }
    }

    pub fn default_value(&self) -> Value {
        if self.repeated {
            Value::List(Vec::new())
        } else {
            self.kind.default_value()
        }
    }

    /// Whether `value` may be stored in this field.
    pub fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::List(items) if self.repeated => items
                .iter()
                .all(|item| !matches!(item, Value::Message(None)) && self.kind.accepts(item)),
            _ if self.repeated => false,
            other => self.kind.accepts(other),
        }
    }

    pub(crate) fn expected(&self) -> &'static str {
        if self.repeated {
            "list"
        } else {
            self.kind.name()
        }
    }
}

/// Ordered field table of one message type.
#[derive(Debug)]
pub struct MessageLayout {
    /// Fully-qualified type name, e.g. `seiprotocol.seichain.dex.OrderCancellation`.
    pub type_name: &'static str,
    /// Fields in declaration order; this is also the encoding order.
    pub fields: &'static [FieldLayout],
}

impl MessageLayout {
    pub const fn new(type_name: &'static str, fields: &'static [FieldLayout]) -> Self {
        Self { type_name, fields }
    }

    /// Type name without its package prefix.
    pub fn short_name(&self) -> &'static str {
        match self.type_name.rfind('.') {
            Some(dot) => &self.type_name[dot + 1..],
            None => self.type_name,
        }
    }

    /// Looks a field up by declared name, returning its index too.
    pub fn field(&self, name: &str) -> Option<(usize, &'static FieldLayout)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name == name)
    }

    /// Looks a field up by wire tag number, returning its index too.
    pub fn field_by_number(&self, number: u32) -> Option<(usize, &'static FieldLayout)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.number == number)
    }

    /// A message of this type with every field at its default.
    pub fn default_message(&'static self) -> Message {
        Message::new(self)
    }

    /// Checks field numbers and names, and every enum table and nested
    /// layout reachable from this one.
    pub fn validate(&self) -> Result<(), CodecError> {
        let mut visited = Vec::new();
        self.validate_inner(&mut visited)
    }

    fn validate_inner(&self, visited: &mut Vec<&'static str>) -> Result<(), CodecError> {
        if visited.contains(&self.type_name) {
            return Ok(());
        }
        visited.push(self.type_name);

        let invalid = |reason: String| CodecError::InvalidLayout {
            message: self.type_name,
            reason,
        };
        for (i, field) in self.fields.iter().enumerate() {
            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(invalid(format!(
                    "field `{}` has out-of-range number {}",
                    field.name, field.number
                )));
            }
            if RESERVED_NUMBERS.contains(&field.number) {
                return Err(invalid(format!(
                    "field `{}` uses reserved number {}",
                    field.name, field.number
                )));
            }
            for other in &self.fields[i + 1..] {
                if other.number == field.number {
                    return Err(invalid(format!("field number {} is reused", field.number)));
                }
                if other.name == field.name {
                    return Err(invalid(format!("field name `{}` is reused", field.name)));
                }
            }
            match field.kind {
                FieldKind::Enum(table) => table.validate().map_err(invalid)?,
                FieldKind::Message(nested) => nested.validate_inner(visited)?,
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{UNRECOGNIZED, UNRECOGNIZED_NAME};

    static COLOR: EnumTable = EnumTable::new(
        "test.Color",
        &[(0, "RED"), (1, "BLUE"), (UNRECOGNIZED, UNRECOGNIZED_NAME)],
    );

    static INNER: MessageLayout = MessageLayout::new(
        "test.Inner",
        &[FieldLayout::singular(1, "id", FieldKind::Uint64)],
    );

    static OUTER: MessageLayout = MessageLayout::new(
        "test.Outer",
        &[
            FieldLayout::singular(1, "color", FieldKind::Enum(&COLOR)),
            FieldLayout::singular(2, "inner", FieldKind::Message(&INNER)),
            FieldLayout::repeated(3, "ids", FieldKind::Int32),
            FieldLayout::repeated(4, "names", FieldKind::String),
        ],
    );

    #[test]
    fn test_lookup() {
        assert_eq!(OUTER.field("inner").unwrap().0, 1);
        assert_eq!(OUTER.field_by_number(4).unwrap().1.name, "names");
        assert!(OUTER.field("missing").is_none());
        assert!(OUTER.field_by_number(9).is_none());
    }

    #[test]
    fn test_wire_types() {
        assert_eq!(OUTER.fields[0].wire_type(), WireType::Varint);
        assert_eq!(OUTER.fields[1].wire_type(), WireType::LengthDelimited);
        assert!(OUTER.fields[2].is_packed());
        assert_eq!(OUTER.fields[2].wire_type(), WireType::LengthDelimited);
        assert!(!OUTER.fields[3].is_packed());
    }

    #[test]
    fn test_accepts() {
        let ids = &OUTER.fields[2];
        assert!(ids.accepts(&Value::List(vec![Value::Int32(1)])));
        assert!(!ids.accepts(&Value::Int32(1)));
        assert!(!ids.accepts(&Value::List(vec![Value::Uint32(1)])));

        let inner = &OUTER.fields[1];
        assert!(inner.accepts(&Value::Message(None)));
        assert!(inner.accepts(&Value::Message(Some(Box::new(Message::new(&INNER))))));
        assert!(!inner.accepts(&Value::Message(Some(Box::new(Message::new(&OUTER))))));
    }

    #[test]
    fn test_validate() {
        assert!(OUTER.validate().is_ok());

        static REUSED: MessageLayout = MessageLayout::new(
            "test.Reused",
            &[
                FieldLayout::singular(1, "a", FieldKind::Bool),
                FieldLayout::singular(1, "b", FieldKind::Bool),
            ],
        );
        assert!(matches!(
            REUSED.validate(),
            Err(CodecError::InvalidLayout { .. })
        ));

        static RESERVED: MessageLayout = MessageLayout::new(
            "test.Reserved",
            &[FieldLayout::singular(19_500, "a", FieldKind::Bool)],
        );
        assert!(RESERVED.validate().is_err());
    }
}
