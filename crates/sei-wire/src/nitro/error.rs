use std::num::ParseIntError;

use thiserror::Error;

/// Rejections of `record-txs` arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NitroError {
    #[error("sender address is empty")]
    EmptySender,
    #[error("unable to parse slot: {0}")]
    InvalidSlot(#[from] ParseIntError),
    #[error("invalid state root format: expected 64 hex characters")]
    InvalidStateRoot,
    #[error("transaction data needs to be hex (argument {index})")]
    InvalidTransaction { index: usize },
}
