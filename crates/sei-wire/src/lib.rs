//! Sei chain message schemas for the `wirecodec` runtime.
//!
//! # Example
//!
//! ```
//! use sei_wire::dex::OrderCancellation;
//! use wirecodec::TypedMessage;
//!
//! let order = OrderCancellation {
//!     position_direction: 1,
//!     price: "100.5".to_owned(),
//!     ..Default::default()
//! };
//! let bytes = order.encode().unwrap();
//! assert_eq!(OrderCancellation::decode(&bytes).unwrap(), order);
//! ```

pub mod cli;
pub mod dex;
pub mod nitro;

use wirecodec::{CodecConfig, CodecError, CodecRegistry};

/// Registry holding every message type this crate defines.
pub fn registry(config: CodecConfig) -> Result<CodecRegistry, CodecError> {
    CodecRegistry::with_config(config)
        .with(&dex::ORDER_CANCELLATION)?
        .with(&nitro::MSG_RECORD_TRANSACTION_DATA)
}
