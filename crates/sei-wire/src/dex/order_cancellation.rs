use wirecodec::{
    CodecError, FieldKind, FieldLayout, Message, MessageLayout, TypedMessage, Value,
};

use super::enums::{
    Denom, PositionDirection, PositionEffect, DENOM, POSITION_DIRECTION, POSITION_EFFECT,
};

pub static ORDER_CANCELLATION: MessageLayout = MessageLayout::new(
    "seiprotocol.seichain.dex.OrderCancellation",
    &[
        FieldLayout::singular(1, "positionDirection", FieldKind::Enum(&POSITION_DIRECTION)),
        FieldLayout::singular(2, "price", FieldKind::Decimal),
        FieldLayout::singular(3, "quantity", FieldKind::Decimal),
        FieldLayout::singular(4, "priceDenom", FieldKind::Enum(&DENOM)),
        FieldLayout::singular(5, "assetDenom", FieldKind::Enum(&DENOM)),
        FieldLayout::singular(6, "positionEffect", FieldKind::Enum(&POSITION_EFFECT)),
        FieldLayout::singular(7, "leverage", FieldKind::Decimal),
    ],
);

/// Cancellation of a resting dex order.
///
/// Enum fields keep the raw code so values outside the declared set survive
/// a decode/encode cycle; the accessors map them onto the Rust enums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCancellation {
    pub position_direction: i32,
    /// Decimal, kept as text.
    pub price: String,
    pub quantity: String,
    pub price_denom: i32,
    pub asset_denom: i32,
    pub position_effect: i32,
    pub leverage: String,
}

impl OrderCancellation {
    /// Undeclared codes read as `Unrecognized`.
    pub fn position_direction(&self) -> PositionDirection {
        PositionDirection::try_from(self.position_direction)
            .unwrap_or(PositionDirection::Unrecognized)
    }

    pub fn set_position_direction(&mut self, value: PositionDirection) {
        self.position_direction = value as i32;
    }

    pub fn price_denom(&self) -> Denom {
        Denom::try_from(self.price_denom).unwrap_or(Denom::Unrecognized)
    }

    pub fn set_price_denom(&mut self, value: Denom) {
        self.price_denom = value as i32;
    }

    pub fn asset_denom(&self) -> Denom {
        Denom::try_from(self.asset_denom).unwrap_or(Denom::Unrecognized)
    }

    pub fn set_asset_denom(&mut self, value: Denom) {
        self.asset_denom = value as i32;
    }

    pub fn position_effect(&self) -> PositionEffect {
        PositionEffect::try_from(self.position_effect).unwrap_or(PositionEffect::Unrecognized)
    }

    pub fn set_position_effect(&mut self, value: PositionEffect) {
        self.position_effect = value as i32;
    }
}

impl TypedMessage for OrderCancellation {
    fn layout() -> &'static MessageLayout {
        &ORDER_CANCELLATION
    }

    fn to_message(&self) -> Result<Message, CodecError> {
        Message::from_partial(
            &ORDER_CANCELLATION,
            [
                ("positionDirection", Value::Enum(self.position_direction)),
                ("price", Value::String(self.price.clone())),
                ("quantity", Value::String(self.quantity.clone())),
                ("priceDenom", Value::Enum(self.price_denom)),
                ("assetDenom", Value::Enum(self.asset_denom)),
                ("positionEffect", Value::Enum(self.position_effect)),
                ("leverage", Value::String(self.leverage.clone())),
            ],
        )
    }

    fn from_message(message: &Message) -> Result<Self, CodecError> {
        let enum_field = |name: &'static str| -> Result<i32, CodecError> {
            message
                .get(name)
                .and_then(Value::as_i32)
                .ok_or(CodecError::FieldKindMismatch {
                    field: name,
                    expected: "enum",
                })
        };
        let decimal_field = |name: &'static str| -> Result<String, CodecError> {
            message
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or(CodecError::FieldKindMismatch {
                    field: name,
                    expected: "decimal",
                })
        };
        Ok(Self {
            position_direction: enum_field("positionDirection")?,
            price: decimal_field("price")?,
            quantity: decimal_field("quantity")?,
            price_denom: enum_field("priceDenom")?,
            asset_denom: enum_field("assetDenom")?,
            position_effect: enum_field("positionEffect")?,
            leverage: decimal_field("leverage")?,
        })
    }
}
