//! Token sub-operation shapes and the custom-JSON payload classifier.
//!
//! A `custom_json_dapp` operation carries a free-form string expected to
//! hold a JSON array `[tag_or_name, body]`. The classifier matches element 0
//! against a fixed table of protocol constants and, on a hit, decodes
//! element 1 into the matched shape. Decoding is strictly best-effort: any
//! failure anywhere yields `None`, because this path runs inside the host's
//! consensus-critical operation application and must never abort it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Sub-operation shapes ─────────────────────────────────────────────────────

/// Mints a token series under (dapp, author, unique_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreate {
    pub dapp_name: String,
    pub author: String,
    pub unique_id: String,
    pub init_supply: u64,
    pub info: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub json_meta: String,
}

/// Moves token units between accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub dapp_name: String,
    pub author: String,
    pub unique_id: String,
    pub from: String,
    pub to: String,
    pub amount: u64,
}

/// A transfer held against an external condition (escrow-style), carrying
/// the off-ledger settlement context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConditionalTransfer {
    pub dapp_name: String,
    pub author: String,
    pub unique_id: String,
    pub from: String,
    pub to: String,
    pub amount: u64,
    pub price: String,
    pub tx_id: String,
    #[serde(default)]
    pub memo: String,
}

/// Grants another party operating rights over a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenApprove {
    pub dapp_name: String,
    pub author: String,
    pub unique_id: String,
    pub approver: String,
    pub owner: String,
}

/// The closed set of token sub-operations the classifier recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenSubOperation {
    Create(TokenCreate),
    Transfer(TokenTransfer),
    ConditionalTransfer(TokenConditionalTransfer),
    Approve(TokenApprove),
}

impl TokenSubOperation {
    /// The dapp the sub-operation belongs to.
    pub fn dapp_name(&self) -> &str {
        match self {
            Self::Create(op) => &op.dapp_name,
            Self::Transfer(op) => &op.dapp_name,
            Self::ConditionalTransfer(op) => &op.dapp_name,
            Self::Approve(op) => &op.dapp_name,
        }
    }

    /// The authoring account.
    pub fn author(&self) -> &str {
        match self {
            Self::Create(op) => &op.author,
            Self::Transfer(op) => &op.author,
            Self::ConditionalTransfer(op) => &op.author,
            Self::Approve(op) => &op.author,
        }
    }

    /// The token-unique identifier within (dapp, author).
    pub fn unique_id(&self) -> &str {
        match self {
            Self::Create(op) => &op.unique_id,
            Self::Transfer(op) => &op.unique_id,
            Self::ConditionalTransfer(op) => &op.unique_id,
            Self::Approve(op) => &op.unique_id,
        }
    }

    /// Canonical protocol name of the sub-operation kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Create(_) => TOKEN_CREATE_NAME,
            Self::Transfer(_) => TOKEN_TRANSFER_NAME,
            Self::ConditionalTransfer(_) => TOKEN_EXTRANSFER_NAME,
            Self::Approve(_) => TOKEN_APPROVE_NAME,
        }
    }
}

// ─── Classifier table ─────────────────────────────────────────────────────────

/// Protocol constants. Tags and names are fixed by the wire format and must
/// never be derived from Rust type names at runtime.
pub const TOKEN_CREATE_TAG: u64 = 0;
pub const TOKEN_TRANSFER_TAG: u64 = 1;
pub const TOKEN_EXTRANSFER_TAG: u64 = 2;
pub const TOKEN_APPROVE_TAG: u64 = 3;

pub const TOKEN_CREATE_NAME: &str = "token_create";
pub const TOKEN_TRANSFER_NAME: &str = "token_transfer";
pub const TOKEN_EXTRANSFER_NAME: &str = "token_extransfer";
pub const TOKEN_APPROVE_NAME: &str = "token_approve";

type Decoder = fn(&Value) -> Option<TokenSubOperation>;

/// {numeric tag, canonical name} → decoder.
const DECODERS: &[(u64, &str, Decoder)] = &[
    (TOKEN_CREATE_TAG, TOKEN_CREATE_NAME, decode_create),
    (TOKEN_TRANSFER_TAG, TOKEN_TRANSFER_NAME, decode_transfer),
    (TOKEN_EXTRANSFER_TAG, TOKEN_EXTRANSFER_NAME, decode_extransfer),
    (TOKEN_APPROVE_TAG, TOKEN_APPROVE_NAME, decode_approve),
];

fn decode_create(body: &Value) -> Option<TokenSubOperation> {
    serde_json::from_value::<TokenCreate>(body.clone())
        .ok()
        .map(TokenSubOperation::Create)
}

fn decode_transfer(body: &Value) -> Option<TokenSubOperation> {
    serde_json::from_value::<TokenTransfer>(body.clone())
        .ok()
        .map(TokenSubOperation::Transfer)
}

fn decode_extransfer(body: &Value) -> Option<TokenSubOperation> {
    serde_json::from_value::<TokenConditionalTransfer>(body.clone())
        .ok()
        .map(TokenSubOperation::ConditionalTransfer)
}

fn decode_approve(body: &Value) -> Option<TokenSubOperation> {
    serde_json::from_value::<TokenApprove>(body.clone())
        .ok()
        .map(TokenSubOperation::Approve)
}

// ─── try_decode ───────────────────────────────────────────────────────────────

/// Attempt to classify and decode a `custom_json_dapp` payload.
///
/// Returns `None` on any failure: invalid JSON, a top-level value that is
/// not an array of at least two elements, an element 0 that matches no tag
/// or name in the table, or a body that does not decode into the matched
/// shape. None of these conditions is an error from the caller's point of
/// view — the payload simply carries no token sub-operation.
pub fn try_decode(json: &str) -> Option<TokenSubOperation> {
    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(err) => {
            tracing::trace!(%err, "custom json payload is not valid JSON");
            return None;
        }
    };
    let parts = value.as_array()?;
    if parts.len() < 2 {
        return None;
    }

    let decoder = lookup_decoder(&parts[0])?;
    let decoded = decoder(&parts[1]);
    if decoded.is_none() {
        tracing::trace!("custom json body did not match the tagged shape");
    }
    decoded
}

/// Match element 0 — an unsigned integer tag or a canonical name — against
/// the static table.
fn lookup_decoder(selector: &Value) -> Option<Decoder> {
    if let Some(tag) = selector.as_u64() {
        return DECODERS
            .iter()
            .find(|(t, _, _)| *t == tag)
            .map(|(_, _, decoder)| *decoder);
    }
    if let Some(name) = selector.as_str() {
        return DECODERS
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(_, _, decoder)| *decoder);
    }
    None
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn create_body() -> serde_json::Value {
        serde_json::json!({
            "dapp_name": "alpha",
            "author": "bob",
            "unique_id": "item-1",
            "init_supply": 1000,
            "info": "a token",
        })
    }

    #[test]
    fn decode_by_numeric_tag() {
        let payload = serde_json::json!([0, create_body()]).to_string();
        let sub = try_decode(&payload).expect("should decode");
        assert!(matches!(sub, TokenSubOperation::Create(_)));
        assert_eq!(sub.dapp_name(), "alpha");
        assert_eq!(sub.author(), "bob");
        assert_eq!(sub.unique_id(), "item-1");
    }

    #[test]
    fn decode_by_canonical_name() {
        let payload = serde_json::json!(["token_create", create_body()]).to_string();
        let sub = try_decode(&payload).expect("should decode");
        assert_eq!(sub.kind_name(), "token_create");
    }

    #[test]
    fn decode_transfer_shape() {
        let payload = serde_json::json!([1, {
            "dapp_name": "alpha",
            "author": "bob",
            "unique_id": "item-1",
            "from": "bob",
            "to": "carol",
            "amount": 5,
        }])
        .to_string();
        let sub = try_decode(&payload).expect("should decode");
        assert!(matches!(sub, TokenSubOperation::Transfer(_)));
    }

    #[test]
    fn decode_extransfer_optional_memo() {
        let payload = serde_json::json!(["token_extransfer", {
            "dapp_name": "alpha",
            "author": "bob",
            "unique_id": "item-1",
            "from": "bob",
            "to": "carol",
            "amount": 5,
            "price": "10 SNAC",
            "tx_id": "ext-77",
        }])
        .to_string();
        let sub = try_decode(&payload).expect("should decode");
        match sub {
            TokenSubOperation::ConditionalTransfer(op) => assert_eq!(op.memo, ""),
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[test]
    fn decode_approve_shape() {
        let payload = serde_json::json!([3, {
            "dapp_name": "alpha",
            "author": "bob",
            "unique_id": "item-1",
            "approver": "market",
            "owner": "bob",
        }])
        .to_string();
        let sub = try_decode(&payload).expect("should decode");
        assert!(matches!(sub, TokenSubOperation::Approve(_)));
    }

    #[test]
    fn invalid_json_is_no_match() {
        assert!(try_decode("not json at all {").is_none());
    }

    #[test]
    fn non_array_is_no_match() {
        assert!(try_decode(r#"{"token_create": {}}"#).is_none());
    }

    #[test]
    fn short_array_is_no_match() {
        assert!(try_decode("[0]").is_none());
    }

    #[test]
    fn unknown_tag_is_no_match() {
        let payload = serde_json::json!([99, create_body()]).to_string();
        assert!(try_decode(&payload).is_none());
    }

    #[test]
    fn unknown_name_is_no_match() {
        let payload = serde_json::json!(["token_burn", create_body()]).to_string();
        assert!(try_decode(&payload).is_none());
    }

    #[test]
    fn structural_mismatch_is_no_match() {
        // Transfer tag, but the body is missing from/to/amount.
        let payload = serde_json::json!([1, create_body()]).to_string();
        assert!(try_decode(&payload).is_none());
    }

    #[test]
    fn selector_of_wrong_type_is_no_match() {
        let payload = serde_json::json!([true, create_body()]).to_string();
        assert!(try_decode(&payload).is_none());
    }
}
