//! Strongly-typed message structs on top of the dynamic codec.

use serde_json::Value as JsonValue;

use crate::{Codec, CodecError, Message, MessageLayout};

/// A Rust struct that mirrors one [`MessageLayout`].
///
/// Implementors convert to and from the dynamic [`Message`]; encoding and
/// the portable form come for free. Conversion to a [`Message`] fails when
/// the struct names a field or value kind its layout does not declare.
pub trait TypedMessage: Sized {
    fn layout() -> &'static MessageLayout;

    fn to_message(&self) -> Result<Message, CodecError>;

    fn from_message(message: &Message) -> Result<Self, CodecError>;

    fn codec() -> Codec {
        Codec::new(Self::layout())
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(Self::codec().encode(&self.to_message()?))
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        Self::from_message(&Self::codec().decode(data)?)
    }

    fn to_portable(&self) -> Result<JsonValue, CodecError> {
        Ok(Self::codec().to_portable(&self.to_message()?))
    }

    fn from_portable(input: &JsonValue) -> Result<Self, CodecError> {
        Self::from_message(&Self::codec().from_portable(input)?)
    }
}
