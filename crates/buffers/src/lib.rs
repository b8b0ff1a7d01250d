//! Wire primitives for tagged binary messages.
//!
//! Everything a message codec needs to put protobuf-compatible bytes on the
//! wire and take them off again:
//!
//! - [`Writer`] - append-only buffer with varint, tag and length-delimited writes
//! - [`Reader`] - cursor bounded by an explicit end offset, so nested messages
//!   can be read from a sub-range of a larger buffer
//! - [`WireType`] - the three-bit tag suffix
//!
//! # Example
//!
//! ```
//! use wirecodec_buffers::{Reader, WireType, Writer};
//!
//! let mut writer = Writer::new();
//! writer.tag(2, WireType::LengthDelimited);
//! writer.utf8("100.5");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.tag().unwrap(), (2, WireType::LengthDelimited));
//! assert_eq!(reader.utf8_string().unwrap(), "100.5");
//! ```

mod print_octets;
mod reader;
mod wire_type;
mod writer;

pub use print_octets::{print_octets, print_octets_default};
pub use reader::Reader;
pub use wire_type::WireType;
pub use writer::{varint_size, Writer, MAX_FIELD_NUMBER};

use thiserror::Error;

/// Reasons a byte sequence is not well-formed wire data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },
    #[error("varint is not terminated before the end of the buffer")]
    UnterminatedVarint,
    #[error("varint is longer than 10 bytes")]
    VarintOverflow,
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    #[error("end-group marker without a matching start-group")]
    UnexpectedEndGroup,
    #[error("group of field {expected} closed by end-group of field {actual}")]
    MismatchedEndGroup { expected: u32, actual: u32 },
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    #[error("field {field_number} expects {expected} data, got {actual}")]
    WireTypeMismatch {
        field_number: u32,
        expected: WireType,
        actual: WireType,
    },
    #[error("nested messages exceed the depth limit of {0}")]
    RecursionLimit(usize),
}
