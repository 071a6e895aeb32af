//! Stored record and history entry types.
//!
//! All of these are immutable once inserted: the record table and both
//! history ledgers are append-only, and nothing is ever rewritten in place.
//! Replay determinism rests on that — identical operation streams must
//! produce byte-identical tables on every replica.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LedgerPosition, OperationNotification};

// ─── OperationRecordId ────────────────────────────────────────────────────────

/// Handle to a stored [`OperationRecord`].
///
/// Ids are dense and assigned by the store in insertion order, so they are
/// deterministic under replay. History entries reference records by id
/// rather than holding a copy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OperationRecordId(pub u64);

// ─── OperationRecord ──────────────────────────────────────────────────────────

/// The canonical record of one applied operation.
///
/// Exactly one record exists per ledger position regardless of how many
/// dapps the operation impacted. The payload is kept as opaque bytes — the
/// self-describing JSON encoding of the [`crate::types::Operation`] — so the
/// record table does not need to change shape when operation kinds do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Identifier of the containing transaction.
    pub trx_id: String,
    /// Block number.
    pub block: u64,
    /// Transaction index within the block.
    pub trx_in_block: u32,
    /// Operation index within the transaction.
    pub op_in_trx: u32,
    /// `true` for virtual operations.
    pub virtual_op: bool,
    /// Wall-clock time of the containing block.
    pub timestamp: DateTime<Utc>,
    /// Serialized operation payload (self-describing tag + body).
    pub serialized_op: Vec<u8>,
}

impl OperationRecord {
    /// Build a record from a host notification.
    ///
    /// Serialization of an admitted operation is total: the payload is a
    /// closed enum of plain data, so encoding it cannot fail.
    pub fn from_notification(note: &OperationNotification) -> Self {
        let serialized_op =
            serde_json::to_vec(&note.op).expect("encoding a closed operation enum is infallible");
        Self {
            trx_id: note.trx_id.clone(),
            block: note.block,
            trx_in_block: note.trx_in_block,
            op_in_trx: note.op_in_trx,
            virtual_op: note.virtual_op,
            timestamp: note.timestamp,
            serialized_op,
        }
    }

    /// The ledger position this record was stored under.
    pub fn position(&self) -> LedgerPosition {
        LedgerPosition {
            block: self.block,
            trx_in_block: self.trx_in_block,
            op_in_trx: self.op_in_trx,
            virtual_op: self.virtual_op,
        }
    }
}

// ─── DappHistoryEntry ─────────────────────────────────────────────────────────

/// One (dapp, operation) association in the dapp history ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DappHistoryEntry {
    /// Name of the impacted dapp.
    pub dapp_name: String,
    /// Per-dapp sequence number; contiguous from 0 for each distinct dapp.
    pub sequence: u64,
    /// Ledger-wide sequence number; unique across all dapps. An operation
    /// impacting N dapps consumes N global values, one per entry.
    pub global_sequence: u64,
    /// The canonical record this entry refers to.
    pub op: OperationRecordId,
}

// ─── TokenHistoryEntry ────────────────────────────────────────────────────────

/// One decoded token sub-operation in the token sub-ledger.
///
/// All four sub-operation kinds share one ledger and one sequence space per
/// (dapp_name, author, unique_id) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHistoryEntry {
    /// Name of the dapp the token belongs to.
    pub dapp_name: String,
    /// Account that authored the token.
    pub author: String,
    /// Token-unique identifier within (dapp, author).
    pub unique_id: String,
    /// Sequence number scoped to the exact triple, contiguous from 0.
    pub sequence: u64,
    /// The canonical record this entry refers to.
    pub op: OperationRecordId,
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;
    use chrono::TimeZone;

    fn note() -> OperationNotification {
        OperationNotification {
            trx_id: "tx-1".into(),
            block: 42,
            trx_in_block: 1,
            op_in_trx: 0,
            virtual_op: false,
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            op: Operation::JoinDapp {
                account: "alice".into(),
                dapp_name: "alpha".into(),
            },
        }
    }

    #[test]
    fn record_carries_notification_position() {
        let n = note();
        let record = OperationRecord::from_notification(&n);
        assert_eq!(record.position(), n.position());
        assert_eq!(record.trx_id, "tx-1");
        assert_eq!(record.timestamp, n.timestamp);
    }

    #[test]
    fn serialized_payload_is_tagged() {
        let record = OperationRecord::from_notification(&note());
        let value: serde_json::Value = serde_json::from_slice(&record.serialized_op).unwrap();
        assert!(value.get("join_dapp").is_some());
    }

    #[test]
    fn identical_notifications_serialize_identically() {
        let a = OperationRecord::from_notification(&note());
        let b = OperationRecord::from_notification(&note());
        assert_eq!(a.serialized_op, b.serialized_op);
    }
}
