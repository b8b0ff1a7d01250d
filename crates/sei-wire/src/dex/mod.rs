//! `seiprotocol.seichain.dex` messages.

mod enums;
mod order_cancellation;

pub use enums::{
    Denom, PositionDirection, PositionEffect, DENOM, POSITION_DIRECTION, POSITION_EFFECT,
};
pub use order_cancellation::{OrderCancellation, ORDER_CANCELLATION};
