//! Message → portable JSON structure.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Value as JsonValue};

use crate::{FieldKind, Message, Value};

/// Converts a message into a JSON object keyed by declared field names.
///
/// Keys follow declaration order. With `emit_defaults` unset, fields holding
/// their default are left out; with it set every field is written and an
/// absent nested message becomes `null`.
pub fn to_portable(message: &Message, emit_defaults: bool) -> JsonValue {
    let mut map = Map::new();
    for (field, value) in message.fields() {
        if !emit_defaults && value.is_default() {
            continue;
        }
        let portable = match value {
            Value::List(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| encode_value(&field.kind, item, emit_defaults))
                    .collect(),
            ),
            single => encode_value(&field.kind, single, emit_defaults),
        };
        map.insert(field.name.to_owned(), portable);
    }
    JsonValue::Object(map)
}

fn encode_value(kind: &FieldKind, value: &Value, emit_defaults: bool) -> JsonValue {
    match value {
        Value::Int32(v) => json!(v),
        Value::Uint32(v) => json!(v),
        // 64-bit integers travel as strings so JSON consumers keep precision.
        Value::Int64(v) => JsonValue::String(v.to_string()),
        Value::Uint64(v) => JsonValue::String(v.to_string()),
        Value::Bool(v) => JsonValue::Bool(*v),
        Value::Enum(code) => encode_enum(kind, *code),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Bytes(b) => JsonValue::String(STANDARD.encode(b)),
        Value::Message(Some(nested)) => to_portable(nested, emit_defaults),
        Value::Message(None) => JsonValue::Null,
        Value::List(_) => JsonValue::Null,
    }
}

/// Declared codes map to their names; undeclared codes stay numeric so
/// they survive a round trip.
fn encode_enum(kind: &FieldKind, code: i32) -> JsonValue {
    match kind {
        FieldKind::Enum(table) => match table.name_from_code(code) {
            Some(name) => JsonValue::String(name.to_owned()),
            None => json!(code),
        },
        _ => json!(code),
    }
}
