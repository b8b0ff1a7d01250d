//! Portable JSON structure → message.

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value as JsonValue;

use crate::{CodecError, FieldKind, FieldLayout, Message, MessageLayout, Value};

/// Builds a message from a JSON object.
///
/// Missing and `null` keys leave the field at its default; unknown keys are
/// ignored. Values are coerced the way the portable form allows: numeric
/// strings for integers, any scalar for strings and decimals, names or codes
/// for enums.
pub fn from_portable(
    layout: &'static MessageLayout,
    input: &JsonValue,
) -> Result<Message, CodecError> {
    let JsonValue::Object(map) = input else {
        return Err(CodecError::InvalidPortableValue {
            field: layout.type_name,
            reason: format!("expected an object, got {}", type_of(input)),
        });
    };

    let mut message = Message::new(layout);
    for (index, field) in layout.fields.iter().enumerate() {
        let raw = match map.get(field.name) {
            None | Some(JsonValue::Null) => continue,
            Some(raw) => raw,
        };
        let value = if field.repeated {
            let JsonValue::Array(items) = raw else {
                return Err(invalid(field, format!("expected an array, got {}", type_of(raw))));
            };
            Value::List(
                items
                    .iter()
                    .map(|item| decode_value(field, item))
                    .collect::<Result<_, _>>()?,
            )
        } else {
            decode_value(field, raw)?
        };
        *message.slot_mut(index) = value;
    }
    Ok(message)
}

fn decode_value(field: &FieldLayout, raw: &JsonValue) -> Result<Value, CodecError> {
    match &field.kind {
        FieldKind::Int32 => parse_integer(field, raw).map(Value::Int32),
        FieldKind::Int64 => parse_integer(field, raw).map(Value::Int64),
        FieldKind::Uint32 => parse_integer(field, raw).map(Value::Uint32),
        FieldKind::Uint64 => parse_integer(field, raw).map(Value::Uint64),
        FieldKind::Bool => match raw {
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::String(s) if s == "true" => Ok(Value::Bool(true)),
            JsonValue::String(s) if s == "false" => Ok(Value::Bool(false)),
            other => Err(invalid(field, format!("expected a bool, got {}", type_of(other)))),
        },
        FieldKind::Enum(table) => match raw {
            JsonValue::String(name) => {
                table
                    .code_from_name(name)
                    .map(Value::Enum)
                    .ok_or_else(|| CodecError::UnknownEnumName {
                        enum_name: table.name,
                        name: name.clone(),
                    })
            }
            JsonValue::Number(_) => parse_integer(field, raw).map(Value::Enum),
            other => Err(invalid(
                field,
                format!("expected an enum name, got {}", type_of(other)),
            )),
        },
        FieldKind::String | FieldKind::Decimal => stringify(field, raw).map(Value::String),
        FieldKind::Bytes => match raw {
            JsonValue::String(s) => STANDARD
                .decode(s)
                .map(Value::Bytes)
                .map_err(|e| invalid(field, format!("invalid base64: {e}"))),
            other => Err(invalid(
                field,
                format!("expected a base64 string, got {}", type_of(other)),
            )),
        },
        FieldKind::Message(nested) => {
            from_portable(nested, raw).map(|m| Value::Message(Some(Box::new(m))))
        }
    }
}

/// Accepts JSON integers, integral floats and decimal strings.
fn parse_integer<T>(field: &FieldLayout, raw: &JsonValue) -> Result<T, CodecError>
where
    T: FromStr + TryFrom<i64> + TryFrom<u64>,
{
    let out_of_range = || {
        invalid(
            field,
            format!("{raw} is out of range for {}", field.kind.name()),
        )
    };
    match raw {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                <T as TryFrom<i64>>::try_from(i).map_err(|_| out_of_range())
            } else if let Some(u) = n.as_u64() {
                <T as TryFrom<u64>>::try_from(u).map_err(|_| out_of_range())
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
                        <T as TryFrom<i64>>::try_from(f as i64).map_err(|_| out_of_range())
                    }
                    _ => Err(invalid(field, format!("{n} is not an integer"))),
                }
            }
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| invalid(field, format!("`{s}` is not a valid {}", field.kind.name()))),
        other => Err(invalid(
            field,
            format!("expected a number, got {}", type_of(other)),
        )),
    }
}

/// String form of a scalar, mirroring `String(value)` on the producing side.
fn stringify(field: &FieldLayout, raw: &JsonValue) -> Result<String, CodecError> {
    match raw {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(
            field,
            format!("expected a string, got {}", type_of(other)),
        )),
    }
}

fn invalid(field: &FieldLayout, reason: String) -> CodecError {
    CodecError::InvalidPortableValue {
        field: field.name,
        reason,
    }
}

fn type_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
