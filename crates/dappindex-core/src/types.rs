//! Shared types for the history indexing pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── LedgerPosition ───────────────────────────────────────────────────────────

/// The position of an operation within the host ledger.
///
/// This tuple is the identity of an operation record: at most one canonical
/// record exists per position, no matter how many dapps reference it. The
/// derived ordering is lexicographic over (block, trx_in_block, op_in_trx,
/// virtual_op), which is the ordering the record table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerPosition {
    /// Block number.
    pub block: u64,
    /// Transaction index within the block.
    pub trx_in_block: u32,
    /// Operation index within the transaction.
    pub op_in_trx: u32,
    /// `true` for virtual operations (generated by the ledger, not signed).
    pub virtual_op: bool,
}

// ─── Operation ────────────────────────────────────────────────────────────────

/// The closed set of dapp operations known to the host ledger.
///
/// The external JSON encoding is self-describing: one outer tag (the variant
/// name) plus the variant body. That encoding is also what gets stored as the
/// opaque payload of an [`crate::record::OperationRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateDapp {
        owner: String,
        dapp_name: String,
        dapp_key: String,
    },
    UpdateDappKey {
        owner: String,
        dapp_name: String,
        dapp_key: String,
    },
    CommentDapp {
        dapp_name: String,
        author: String,
        permlink: String,
        parent_author: String,
        parent_permlink: String,
        title: String,
        body: String,
        json_metadata: String,
    },
    CommentVoteDapp {
        dapp_name: String,
        voter: String,
        author: String,
        permlink: String,
        vote_type: u16,
    },
    DeleteCommentDapp {
        dapp_name: String,
        author: String,
        permlink: String,
    },
    JoinDapp {
        account: String,
        dapp_name: String,
    },
    LeaveDapp {
        account: String,
        dapp_name: String,
    },
    VoteDapp {
        voter: String,
        dapp_name: String,
        vote: u8,
    },
    /// Names no dapp; impacts nothing in the history index.
    VoteDappTrxFee {
        voter: String,
        trx_fee: u64,
    },
    /// The generic-payload family: `json` is expected to hold a
    /// `[tag_or_name, body]` array describing a token sub-operation, but the
    /// ledger admits any string here.
    CustomJsonDapp {
        dapp_name: String,
        required_auths: Vec<String>,
        json: String,
    },
}

impl Operation {
    /// The variant name used as the outer tag of the serialized payload.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::CreateDapp { .. } => "create_dapp",
            Self::UpdateDappKey { .. } => "update_dapp_key",
            Self::CommentDapp { .. } => "comment_dapp",
            Self::CommentVoteDapp { .. } => "comment_vote_dapp",
            Self::DeleteCommentDapp { .. } => "delete_comment_dapp",
            Self::JoinDapp { .. } => "join_dapp",
            Self::LeaveDapp { .. } => "leave_dapp",
            Self::VoteDapp { .. } => "vote_dapp",
            Self::VoteDappTrxFee { .. } => "vote_dapp_trx_fee",
            Self::CustomJsonDapp { .. } => "custom_json_dapp",
        }
    }
}

// ─── OperationNotification ────────────────────────────────────────────────────

/// What the host ledger delivers, synchronously, for every applied operation.
///
/// The handler runs on the ledger's critical application path: notifications
/// arrive in strict ledger order and each one must be fully processed before
/// the next is delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationNotification {
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
    /// The operation payload.
    pub op: Operation,
}

impl OperationNotification {
    /// The ledger position this notification refers to.
    pub fn position(&self) -> LedgerPosition {
        LedgerPosition {
            block: self.block,
            trx_in_block: self.trx_in_block,
            op_in_trx: self.op_in_trx,
            virtual_op: self.virtual_op,
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
