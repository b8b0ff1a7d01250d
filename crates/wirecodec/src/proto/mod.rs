//! Binary wire format: proto3-compatible tag-length-value encoding.

mod decoder;
mod encoder;

pub use decoder::MessageDecoder;
pub use encoder::MessageEncoder;
