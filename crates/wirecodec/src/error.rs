//! Codec error type.

use thiserror::Error;
use wirecodec_buffers::BufferError;

/// Error type for encoding, decoding and portable conversion.
///
/// Every error is local to the call that produced it; codecs keep no state
/// that a failure could leave behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Truncated or otherwise invalid binary input.
    #[error("malformed wire data: {0}")]
    MalformedWireData(#[from] BufferError),
    /// A portable enum value names no declared member.
    #[error("unknown name `{name}` for enum {enum_name}")]
    UnknownEnumName {
        enum_name: &'static str,
        name: String,
    },
    /// A portable value has the wrong shape for its field.
    #[error("invalid value for field `{field}`: {reason}")]
    InvalidPortableValue { field: &'static str, reason: String },
    #[error("message {message} has no field `{field}`")]
    UnknownField {
        message: &'static str,
        field: String,
    },
    #[error("field `{field}` expects a {expected} value")]
    FieldKindMismatch {
        field: &'static str,
        expected: &'static str,
    },
    #[error("invalid layout for {message}: {reason}")]
    InvalidLayout {
        message: &'static str,
        reason: String,
    },
    #[error("unknown message type `{0}`")]
    UnknownMessageType(String),
}
