//! Layout-driven binary message codec.
//!
//! Message types are described by static [`MessageLayout`] tables. A
//! [`Codec`] built from a layout converts between three representations:
//!
//! - the in-memory [`Message`],
//! - the proto3-compatible binary wire format,
//! - a portable JSON object keyed by field name.
//!
//! Fields holding their default are never written to the wire, unknown
//! fields are skipped when reading, and enum values keep their integer code
//! even when the table does not declare it.

mod codec;
mod config;
mod enums;
mod error;
mod layout;
pub mod portable;
pub mod proto;
mod registry;
mod typed;
mod value;

pub use codec::Codec;
pub use config::{CodecConfig, DEFAULT_RECURSION_LIMIT};
pub use enums::{EnumTable, UNRECOGNIZED, UNRECOGNIZED_NAME};
pub use error::CodecError;
pub use layout::{FieldKind, FieldLayout, MessageLayout};
pub use registry::CodecRegistry;
pub use typed::TypedMessage;
pub use value::{Message, Value};

pub use wirecodec_buffers::{BufferError, Reader, WireType, Writer};
