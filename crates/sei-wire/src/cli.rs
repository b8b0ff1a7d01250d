//! Command bodies behind the `sei-wire` binary.
//!
//! Every command returns the lines it prints so the binary only handles
//! argument parsing, I/O and logging.

use anyhow::{bail, Context};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::ValueEnum;
use tracing::debug;
use wirecodec::{CodecConfig, Reader, TypedMessage};

use crate::nitro::record_transaction_data;

/// Text encoding of wire bytes on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Hex,
    Base64,
}

impl Format {
    pub fn render(self, bytes: &[u8]) -> String {
        match self {
            Format::Hex => hex::encode(bytes),
            Format::Base64 => STANDARD.encode(bytes),
        }
    }

    /// Surrounding whitespace is ignored, as is a `0x` prefix on hex.
    pub fn parse(self, text: &str) -> anyhow::Result<Vec<u8>> {
        let text = text.trim();
        match self {
            Format::Hex => {
                let text = text.strip_prefix("0x").unwrap_or(text);
                hex::decode(text).context("input is not valid hex")
            }
            Format::Base64 => STANDARD.decode(text).context("input is not valid base64"),
        }
    }
}

pub fn types() -> anyhow::Result<Vec<String>> {
    let registry = crate::registry(CodecConfig::default())?;
    Ok(registry.type_names().map(str::to_owned).collect())
}

/// Encodes portable JSON text as one rendered line of wire bytes.
pub fn encode(
    message_type: &str,
    json: &str,
    format: Format,
    delimited: bool,
) -> anyhow::Result<String> {
    let registry = crate::registry(CodecConfig::default())?;
    let codec = registry.get(message_type)?;

    let portable: serde_json::Value =
        serde_json::from_str(json).context("input is not valid JSON")?;
    let message = codec.from_portable(&portable)?;
    debug!(message = codec.type_name(), delimited, "encoding");

    let bytes = if delimited {
        codec.encode_delimited(&message)
    } else {
        codec.encode(&message)
    };
    Ok(format.render(&bytes))
}

/// Decodes rendered wire bytes into portable JSON.
///
/// A single message comes back pretty-printed. A delimited stream yields
/// one compact line per message and must hold at least one message.
pub fn decode(
    message_type: &str,
    data: &str,
    format: Format,
    emit_defaults: bool,
    delimited: bool,
) -> anyhow::Result<Vec<String>> {
    let registry = crate::registry(CodecConfig::default().emit_defaults(emit_defaults))?;
    let codec = registry.get(message_type)?;
    let bytes = format.parse(data)?;

    if !delimited {
        let message = codec
            .decode(&bytes)
            .with_context(|| format!("failed to decode {}", codec.type_name()))?;
        return Ok(vec![serde_json::to_string_pretty(
            &codec.to_portable(&message),
        )?]);
    }

    let mut reader = Reader::new(&bytes);
    let mut lines = Vec::new();
    while !reader.is_done() {
        let index = lines.len();
        let message = codec
            .decode_delimited(&mut reader)
            .with_context(|| format!("failed to decode {} #{index}", codec.type_name()))?;
        lines.push(serde_json::to_string(&codec.to_portable(&message))?);
    }
    if lines.is_empty() {
        bail!("no delimited messages in input");
    }
    debug!(message = codec.type_name(), count = lines.len(), "decoded stream");
    Ok(lines)
}

/// Validates and builds a `MsgRecordTransactionData`, returning its
/// pretty-printed portable form followed by its hex encoding.
pub fn record_txs(
    sender: &str,
    slot: &str,
    root: &str,
    txs: &[String],
) -> anyhow::Result<Vec<String>> {
    let msg = record_transaction_data(sender, slot, root, txs)?;
    Ok(vec![
        serde_json::to_string_pretty(&msg.to_portable()?)?,
        hex::encode(msg.encode()?),
    ])
}
