//! Per-message-type codec.

use serde_json::Value as JsonValue;
use tracing::debug;
use wirecodec_buffers::{print_octets_default, Reader};

use crate::portable::{from_portable, to_portable};
use crate::proto::{MessageDecoder, MessageEncoder};
use crate::{CodecConfig, CodecError, Message, MessageLayout, Value};

/// The four conversions of one message type.
///
/// A codec is a layout reference plus configuration. It holds no mutable
/// state, so one instance can be shared freely across threads.
///
/// ```
/// use wirecodec::{Codec, FieldKind, FieldLayout, MessageLayout, Value};
///
/// static PING: MessageLayout = MessageLayout::new(
///     "example.Ping",
///     &[FieldLayout::singular(1, "seq", FieldKind::Uint32)],
/// );
///
/// let codec = Codec::new(&PING);
/// let ping = codec.from_partial([("seq", Value::Uint32(7))]).unwrap();
/// let bytes = codec.encode(&ping);
/// assert_eq!(bytes, vec![0x08, 0x07]);
/// assert_eq!(codec.decode(&bytes).unwrap(), ping);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    layout: &'static MessageLayout,
    config: CodecConfig,
}

impl Codec {
    pub fn new(layout: &'static MessageLayout) -> Self {
        Self::with_config(layout, CodecConfig::default())
    }

    pub fn with_config(layout: &'static MessageLayout, config: CodecConfig) -> Self {
        Self { layout, config }
    }

    pub fn layout(&self) -> &'static MessageLayout {
        self.layout
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn type_name(&self) -> &'static str {
        self.layout.type_name
    }

    pub fn default_message(&self) -> Message {
        Message::new(self.layout)
    }

    /// Serializes `message`. Total; fields at their default are not written.
    pub fn encode(&self, message: &Message) -> Vec<u8> {
        debug_assert_eq!(message.layout().type_name, self.layout.type_name);
        MessageEncoder::new().encode(message)
    }

    /// Serializes `message` behind a varint length prefix.
    pub fn encode_delimited(&self, message: &Message) -> Vec<u8> {
        MessageEncoder::new().encode_delimited(message)
    }

    /// Parses a whole buffer. Unknown fields are skipped; absent fields keep
    /// their defaults.
    pub fn decode(&self, data: &[u8]) -> Result<Message, CodecError> {
        let mut reader = Reader::new(data);
        self.decode_reader(&mut reader, None)
    }

    /// Parses from an existing reader, either to its end bound or exactly
    /// `length` bytes.
    pub fn decode_reader(
        &self,
        reader: &mut Reader<'_>,
        length: Option<usize>,
    ) -> Result<Message, CodecError> {
        let start = reader.x;
        MessageDecoder::with_recursion_limit(self.config.recursion_limit)
            .decode_reader(self.layout, reader, length)
            .map_err(|err| {
                debug!(
                    message = self.layout.type_name,
                    offset = start,
                    octets = %print_octets_default(
                        reader.uint8.get(start..reader.end).unwrap_or_default()
                    ),
                    error = %err,
                    "decode failed"
                );
                CodecError::from(err)
            })
    }

    /// Parses one length-prefixed message and advances past it.
    pub fn decode_delimited(&self, reader: &mut Reader<'_>) -> Result<Message, CodecError> {
        let length = reader.varint()? as usize;
        self.decode_reader(reader, Some(length))
    }

    /// Renders `message` as a JSON object keyed by field name.
    pub fn to_portable(&self, message: &Message) -> JsonValue {
        to_portable(message, self.config.emit_defaults)
    }

    /// Builds a message from its portable form.
    pub fn from_portable(&self, input: &JsonValue) -> Result<Message, CodecError> {
        from_portable(self.layout, input)
    }

    /// Builds a message from a subset of fields; the rest keep defaults.
    pub fn from_partial<'n, I>(&self, fields: I) -> Result<Message, CodecError>
    where
        I: IntoIterator<Item = (&'n str, Value)>,
    {
        Message::from_partial(self.layout, fields)
    }
}
