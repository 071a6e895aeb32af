//! The ordered-index abstraction the engine builds its tables on.
//!
//! The engine never touches storage directly; it goes through
//! [`HistoryStore`], which models the three logical tables (operation
//! records, dapp history, token history) with the composite orderings the
//! engine's lookups need. Backends live in `dappindex-storage`.

use crate::error::IndexError;
use crate::record::{DappHistoryEntry, OperationRecord, OperationRecordId, TokenHistoryEntry};
use crate::types::LedgerPosition;

/// Ordered, queryable index storage for the three history tables.
///
/// Write methods are only ever called by the engine's notification handler,
/// single-threaded and in ledger order. Read methods are the outbound query
/// surface. Every lookup a conforming backend performs must be an indexed
/// O(log n) operation, never a table scan — the write side runs on the
/// host's consensus-critical application path.
pub trait HistoryStore {
    // ── Operation record table ──

    /// Exact lookup of a record id by ledger position.
    fn record_at(&self, position: &LedgerPosition) -> Result<Option<OperationRecordId>, IndexError>;

    /// Insert a new record and return its id. Ids are dense and assigned in
    /// insertion order; the caller guarantees the position is not yet taken.
    fn insert_record(&mut self, record: OperationRecord) -> Result<OperationRecordId, IndexError>;

    /// Load a record by id.
    fn record(&self, id: OperationRecordId) -> Result<Option<OperationRecord>, IndexError>;

    // ── Dapp history ledger ──

    /// Highest per-dapp sequence assigned to `dapp_name`, if any
    /// (descending lookup on the (dapp_name, sequence) key).
    fn last_dapp_sequence(&self, dapp_name: &str) -> Result<Option<u64>, IndexError>;

    /// Highest global sequence assigned so far, if any.
    fn last_global_sequence(&self) -> Result<Option<u64>, IndexError>;

    /// Append a dapp history entry. The caller guarantees both sequence
    /// numbers are fresh.
    fn insert_dapp_entry(&mut self, entry: DappHistoryEntry) -> Result<(), IndexError>;

    // ── Token sub-ledger ──

    /// Highest sequence assigned to the exact (dapp, author, unique_id)
    /// triple, if any (descending lookup on the 4-part composite key).
    fn last_token_sequence(
        &self,
        dapp_name: &str,
        author: &str,
        unique_id: &str,
    ) -> Result<Option<u64>, IndexError>;

    /// Append a token history entry.
    fn insert_token_entry(&mut self, entry: TokenHistoryEntry) -> Result<(), IndexError>;

    // ── Read-only query access ──

    /// The canonical record stored at `position`, if any.
    fn record_by_position(
        &self,
        position: &LedgerPosition,
    ) -> Result<Option<OperationRecord>, IndexError>;

    /// Up to `limit` history entries for `dapp_name`, ordered by per-dapp
    /// sequence, starting at `from_sequence`.
    fn dapp_history(
        &self,
        dapp_name: &str,
        from_sequence: u64,
        limit: usize,
    ) -> Result<Vec<DappHistoryEntry>, IndexError>;

    /// Up to `limit` history entries across all dapps, ordered by global
    /// sequence, starting at `from_sequence`.
    fn global_history(
        &self,
        from_sequence: u64,
        limit: usize,
    ) -> Result<Vec<DappHistoryEntry>, IndexError>;

    /// All token history entries for the exact triple, ordered by sequence.
    fn token_history(
        &self,
        dapp_name: &str,
        author: &str,
        unique_id: &str,
    ) -> Result<Vec<TokenHistoryEntry>, IndexError>;
}
