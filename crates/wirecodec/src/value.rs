//! Dynamic message values.

use crate::{CodecError, FieldLayout, MessageLayout};

/// Value held by one field of a [`Message`].
///
/// Decimal fields hold [`Value::String`]; enum fields hold the raw integer
/// code, declared or not.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    Enum(i32),
    String(String),
    Bytes(Vec<u8>),
    /// Nested message; `None` is the absent default.
    Message(Option<Box<Message>>),
    /// Elements of a repeated field.
    List(Vec<Value>),
}

impl Value {
    /// Whether this value is the default of its kind, i.e. is elided on the wire.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Int32(v) => *v == 0,
            Value::Int64(v) => *v == 0,
            Value::Uint32(v) => *v == 0,
            Value::Uint64(v) => *v == 0,
            Value::Bool(v) => !*v,
            Value::Enum(v) => *v == 0,
            Value::String(v) => v.is_empty(),
            Value::Bytes(v) => v.is_empty(),
            Value::Message(v) => v.is_none(),
            Value::List(v) => v.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload of `Int32` and `Enum` values.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) | Value::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint64(v) => Some(*v),
            Value::Uint32(v) => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Value::Message(Some(m)) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Message> for Value {
    fn from(m: Message) -> Self {
        Value::Message(Some(Box::new(m)))
    }
}

/// One message value laid out by a static [`MessageLayout`].
///
/// Holds exactly one [`Value`] per declared field, in declaration order.
/// Values are owned, so every decode produces an independent message.
///
/// ```
/// use wirecodec::{FieldKind, FieldLayout, Message, MessageLayout, Value};
///
/// static NOTE: MessageLayout = MessageLayout::new(
///     "example.Note",
///     &[
///         FieldLayout::singular(1, "title", FieldKind::String),
///         FieldLayout::singular(2, "pinned", FieldKind::Bool),
///     ],
/// );
///
/// let note = Message::new(&NOTE).with("title", "hello").unwrap();
/// assert_eq!(note.get("title").and_then(Value::as_str), Some("hello"));
/// assert_eq!(note.get("pinned"), Some(&Value::Bool(false)));
/// ```
#[derive(Clone)]
pub struct Message {
    layout: &'static MessageLayout,
    values: Vec<Value>,
}

impl Message {
    /// Creates a message with every field at its default.
    pub fn new(layout: &'static MessageLayout) -> Self {
        Self {
            layout,
            values: layout.fields.iter().map(FieldLayout::default_value).collect(),
        }
    }

    /// Builds a message from a subset of fields; the rest keep defaults.
    pub fn from_partial<'n, I>(
        layout: &'static MessageLayout,
        fields: I,
    ) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (&'n str, Value)>,
    {
        let mut message = Self::new(layout);
        for (name, value) in fields {
            message.set(name, value)?;
        }
        Ok(message)
    }

    pub fn layout(&self) -> &'static MessageLayout {
        self.layout
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layout.field(name).map(|(index, _)| &self.values[index])
    }

    pub fn get_by_number(&self, number: u32) -> Option<&Value> {
        self.layout
            .field_by_number(number)
            .map(|(index, _)| &self.values[index])
    }

    /// Replaces a field value, checking it against the field's kind.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), CodecError> {
        let Some((index, field)) = self.layout.field(name) else {
            return Err(CodecError::UnknownField {
                message: self.layout.type_name,
                field: name.to_owned(),
            });
        };
        if !field.accepts(&value) {
            return Err(CodecError::FieldKindMismatch {
                field: field.name,
                expected: field.expected(),
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Builder form of [`Message::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, CodecError> {
        self.set(name, value.into())?;
        Ok(self)
    }

    /// Iterates `(field, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldLayout, &Value)> {
        self.layout.fields.iter().zip(self.values.iter())
    }

    /// True when every field holds its default.
    pub fn is_default(&self) -> bool {
        self.values.iter().all(Value::is_default)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Value {
        &mut self.values[index]
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.layout.type_name == other.layout.type_name && self.values == other.values
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct(self.layout.short_name());
        for (field, value) in self.fields() {
            s.field(field.name, value);
        }
        s.finish()
    }
}
