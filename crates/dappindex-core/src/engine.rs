//! The history engine — the host's "operation applied" notification handler.
//!
//! Runs entirely inside the host's application callback, once per operation
//! in strict ledger order. Per notification:
//!
//! 1. resolve the impacted dapp set
//! 2. on first reference, get-or-create the canonical operation record
//! 3. append one dapp history entry per impacted dapp, advancing the
//!    per-dapp and global sequence counters
//! 4. for `custom_json_dapp`, best-effort decode the embedded payload and
//!    append a token sub-ledger entry on success
//!
//! The store handle is passed in explicitly rather than held as ambient
//! state, so independent ledger instances can each carry their own index.

use crate::error::IndexError;
use crate::record::{DappHistoryEntry, OperationRecord, OperationRecordId, TokenHistoryEntry};
use crate::resolver::{DappImpactRules, ImpactResolver};
use crate::store::HistoryStore;
use crate::token::{self, TokenSubOperation};
use crate::types::{Operation, OperationNotification};

// ─── EngineConfig ─────────────────────────────────────────────────────────────

/// Configuration for a history engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether `custom_json_dapp` payloads are classified into the token
    /// sub-ledger. Dapp history is always maintained.
    pub decode_token_ops: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decode_token_ops: true,
        }
    }
}

// ─── HistoryEngine ────────────────────────────────────────────────────────────

/// The secondary-index engine over a host ledger's operation stream.
pub struct HistoryEngine<R = DappImpactRules> {
    config: EngineConfig,
    resolver: R,
}

impl HistoryEngine<DappImpactRules> {
    /// Engine with the default impact rules and configuration.
    pub fn new() -> Self {
        Self::with_resolver(EngineConfig::default(), DappImpactRules)
    }
}

impl Default for HistoryEngine<DappImpactRules> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ImpactResolver> HistoryEngine<R> {
    /// Engine with a custom resolver (hosts with different impact rules).
    pub fn with_resolver(config: EngineConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    /// Handle one applied operation.
    ///
    /// Deterministic: replaying the same notification stream against two
    /// empty stores yields identical tables. Token decode failures are
    /// silently dropped and never abort the handler.
    pub fn on_operation<S: HistoryStore>(
        &self,
        store: &mut S,
        note: &OperationNotification,
    ) -> Result<(), IndexError> {
        let impacted = self.resolver.resolve(&note.op);
        if impacted.is_empty() {
            return Ok(());
        }

        // One record per position, however many dapps reference it.
        let record_id = self.get_or_create_record(store, note)?;

        // BTreeSet iteration order (lexicographic by dapp name) is the fixed
        // global-sequence assignment order for co-impacted dapps.
        for dapp_name in &impacted {
            self.append_dapp_entry(store, dapp_name, record_id)?;
        }

        if self.config.decode_token_ops {
            if let Operation::CustomJsonDapp { json, .. } = &note.op {
                if let Some(sub_op) = token::try_decode(json) {
                    self.append_token_entry(store, &sub_op, record_id)?;
                }
            }
        }

        Ok(())
    }

    /// Exact lookup by ledger position; builds and stores the record if
    /// absent. Idempotent within a processing pass.
    fn get_or_create_record<S: HistoryStore>(
        &self,
        store: &mut S,
        note: &OperationNotification,
    ) -> Result<OperationRecordId, IndexError> {
        let position = note.position();
        if let Some(id) = store.record_at(&position)? {
            return Ok(id);
        }
        let id = store.insert_record(OperationRecord::from_notification(note))?;
        tracing::debug!(
            block = position.block,
            trx_in_block = position.trx_in_block,
            op_in_trx = position.op_in_trx,
            virtual_op = position.virtual_op,
            kind = note.op.kind_name(),
            "stored operation record"
        );
        Ok(id)
    }

    /// Append one dapp history entry, advancing both sequence counters.
    fn append_dapp_entry<S: HistoryStore>(
        &self,
        store: &mut S,
        dapp_name: &str,
        record_id: OperationRecordId,
    ) -> Result<(), IndexError> {
        let sequence = next_sequence(store.last_dapp_sequence(dapp_name)?);
        let global_sequence = next_sequence(store.last_global_sequence()?);

        tracing::debug!(dapp_name, sequence, global_sequence, "appending dapp history entry");
        store.insert_dapp_entry(DappHistoryEntry {
            dapp_name: dapp_name.to_string(),
            sequence,
            global_sequence,
            op: record_id,
        })
    }

    /// Append one token sub-ledger entry for a successfully decoded payload.
    fn append_token_entry<S: HistoryStore>(
        &self,
        store: &mut S,
        sub_op: &TokenSubOperation,
        record_id: OperationRecordId,
    ) -> Result<(), IndexError> {
        let dapp_name = sub_op.dapp_name();
        let author = sub_op.author();
        let unique_id = sub_op.unique_id();
        let sequence = next_sequence(store.last_token_sequence(dapp_name, author, unique_id)?);

        tracing::debug!(
            dapp_name,
            author,
            unique_id,
            sequence,
            kind = sub_op.kind_name(),
            "appending token history entry"
        );
        store.insert_token_entry(TokenHistoryEntry {
            dapp_name: dapp_name.to_string(),
            author: author.to_string(),
            unique_id: unique_id.to_string(),
            sequence,
            op: record_id,
        })
    }
}

/// 0 for a fresh counter, previous + 1 otherwise.
fn next_sequence(last: Option<u64>) -> u64 {
    match last {
        Some(previous) => previous + 1,
        None => 0,
    }
}
