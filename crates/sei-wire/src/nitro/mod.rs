//! `seiprotocol.seichain.nitro` messages.

mod error;
mod record_transaction_data;

pub use error::NitroError;
pub use record_transaction_data::{
    is_valid_block_hash, is_valid_hex, record_transaction_data, MsgRecordTransactionData,
    MSG_RECORD_TRANSACTION_DATA, STATE_ROOT_HEX_LEN,
};
