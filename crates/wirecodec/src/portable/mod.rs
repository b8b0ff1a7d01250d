//! Portable form: a JSON object keyed by declared field names.

mod decoder;
mod encoder;

pub use decoder::from_portable;
pub use encoder::to_portable;
