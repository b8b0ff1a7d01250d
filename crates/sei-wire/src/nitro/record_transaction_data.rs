use wirecodec::{CodecError, FieldKind, FieldLayout, Message, MessageLayout, TypedMessage, Value};

use super::NitroError;

pub static MSG_RECORD_TRANSACTION_DATA: MessageLayout = MessageLayout::new(
    "seiprotocol.seichain.nitro.MsgRecordTransactionData",
    &[
        FieldLayout::singular(1, "sender", FieldKind::String),
        FieldLayout::singular(2, "slot", FieldKind::Uint64),
        FieldLayout::singular(3, "stateRoot", FieldKind::String),
        FieldLayout::repeated(4, "txs", FieldKind::String),
    ],
);

/// Length of a hex-encoded 32-byte block hash.
pub const STATE_ROOT_HEX_LEN: usize = 64;

/// Records the transactions and resulting state root of one nitro slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgRecordTransactionData {
    pub sender: String,
    pub slot: u64,
    pub state_root: String,
    /// Hex-encoded transactions.
    pub txs: Vec<String>,
}

/// Builds a [`MsgRecordTransactionData`] from command-line style arguments.
///
/// `slot` must parse as an unsigned 64-bit integer, `root` must be a
/// 64-character hex string and every transaction must be non-empty hex.
pub fn record_transaction_data<S: AsRef<str>>(
    sender: &str,
    slot: &str,
    root: &str,
    txs: &[S],
) -> Result<MsgRecordTransactionData, NitroError> {
    if sender.is_empty() {
        return Err(NitroError::EmptySender);
    }
    let slot = slot.parse::<u64>()?;
    if !is_valid_block_hash(root) {
        return Err(NitroError::InvalidStateRoot);
    }
    let txs = txs
        .iter()
        .enumerate()
        .map(|(index, tx)| {
            let tx = tx.as_ref();
            if is_valid_hex(tx) {
                Ok(tx.to_owned())
            } else {
                Err(NitroError::InvalidTransaction { index })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MsgRecordTransactionData {
        sender: sender.to_owned(),
        slot,
        state_root: root.to_owned(),
        txs,
    })
}

pub fn is_valid_hex(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn is_valid_block_hash(input: &str) -> bool {
    input.len() == STATE_ROOT_HEX_LEN && is_valid_hex(input)
}

impl TypedMessage for MsgRecordTransactionData {
    fn layout() -> &'static MessageLayout {
        &MSG_RECORD_TRANSACTION_DATA
    }

    fn to_message(&self) -> Result<Message, CodecError> {
        Message::from_partial(
            &MSG_RECORD_TRANSACTION_DATA,
            [
                ("sender", Value::String(self.sender.clone())),
                ("slot", Value::Uint64(self.slot)),
                ("stateRoot", Value::String(self.state_root.clone())),
                (
                    "txs",
                    Value::List(self.txs.iter().cloned().map(Value::String).collect()),
                ),
            ],
        )
    }

    fn from_message(message: &Message) -> Result<Self, CodecError> {
        let text = |name: &'static str| {
            message
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or(CodecError::FieldKindMismatch {
                    field: name,
                    expected: "string",
                })
        };
        let slot = message
            .get("slot")
            .and_then(Value::as_u64)
            .ok_or(CodecError::FieldKindMismatch {
                field: "slot",
                expected: "uint64",
            })?;
        let txs = message
            .get("txs")
            .and_then(Value::as_list)
            .ok_or(CodecError::FieldKindMismatch {
                field: "txs",
                expected: "list",
            })?
            .iter()
            .map(|tx| {
                tx.as_str().map(str::to_owned).ok_or(CodecError::FieldKindMismatch {
                    field: "txs",
                    expected: "string",
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            sender: text("sender")?,
            slot,
            state_root: text("stateRoot")?,
            txs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    #[test]
    fn test_valid_arguments() {
        let msg = record_transaction_data("sei1abc", "42", ROOT, &["deadbeef", "00"]).unwrap();
        assert_eq!(msg.slot, 42);
        assert_eq!(msg.txs, vec!["deadbeef", "00"]);
    }

    #[test]
    fn test_no_transactions() {
        let msg = record_transaction_data::<&str>("sei1abc", "0", ROOT, &[]).unwrap();
        assert!(msg.txs.is_empty());
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            record_transaction_data::<&str>("", "1", ROOT, &[]),
            Err(NitroError::EmptySender)
        );
        assert!(matches!(
            record_transaction_data::<&str>("s", "-1", ROOT, &[]),
            Err(NitroError::InvalidSlot(_))
        ));
        assert!(matches!(
            record_transaction_data::<&str>("s", "18446744073709551616", ROOT, &[]),
            Err(NitroError::InvalidSlot(_))
        ));
        assert_eq!(
            record_transaction_data::<&str>("s", "1", &ROOT[1..], &[]),
            Err(NitroError::InvalidStateRoot)
        );
        assert_eq!(
            record_transaction_data("s", "1", &ROOT.replace('9', "g"), &["ab"]),
            Err(NitroError::InvalidStateRoot)
        );
        assert_eq!(
            record_transaction_data("s", "1", ROOT, &["ab", "xyz"]),
            Err(NitroError::InvalidTransaction { index: 1 })
        );
        assert_eq!(
            record_transaction_data("s", "1", ROOT, &[""]),
            Err(NitroError::InvalidTransaction { index: 0 })
        );
    }

    #[test]
    fn test_message_conversion() {
        let msg = record_transaction_data("sei1abc", "7", ROOT, &["ff"]).unwrap();
        let message = msg.to_message().unwrap();
        assert_eq!(message.get("slot"), Some(&Value::Uint64(7)));
        assert_eq!(message.get("stateRoot").and_then(Value::as_str), Some(ROOT));
        assert_eq!(
            message.get("txs").and_then(Value::as_list),
            Some(&[Value::String("ff".to_owned())][..])
        );
        assert_eq!(MsgRecordTransactionData::from_message(&message).unwrap(), msg);
    }
}
