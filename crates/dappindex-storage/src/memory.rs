//! In-memory storage backend.
//!
//! Keeps the three history tables in ordered maps. This is the reference
//! backend: every lookup the engine performs maps to a `BTreeMap` range or
//! exact lookup, O(log n), mirroring the composite secondary orderings a
//! persistent backend would need.

use std::collections::BTreeMap;

use dappindex_core::error::IndexError;
use dappindex_core::record::{
    DappHistoryEntry, OperationRecord, OperationRecordId, TokenHistoryEntry,
};
use dappindex_core::store::HistoryStore;
use dappindex_core::types::LedgerPosition;

/// In-memory history index.
///
/// All data is lost when the process exits. Suitable for tests and for
/// hosts that rebuild the index by replaying the ledger on startup.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    /// position → record id (the record table's primary ordering).
    records_by_position: BTreeMap<LedgerPosition, OperationRecordId>,
    /// record id → record. Ids are dense, assigned in insertion order.
    records: BTreeMap<u64, OperationRecord>,
    /// (dapp_name, sequence) → entry.
    dapp_history: BTreeMap<(String, u64), DappHistoryEntry>,
    /// global_sequence → (dapp_name, sequence), the all-sequence ordering.
    global_history: BTreeMap<u64, (String, u64)>,
    /// (dapp_name, author, unique_id, sequence) → entry.
    token_history: BTreeMap<(String, String, String, u64), TokenHistoryEntry>,
    next_record_id: u64,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored operation records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of dapp history entries across all dapps.
    pub fn dapp_entry_count(&self) -> usize {
        self.dapp_history.len()
    }

    /// Number of token history entries across all triples.
    pub fn token_entry_count(&self) -> usize {
        self.token_history.len()
    }

    /// A canonical serialization of all three tables, in key order.
    ///
    /// Two indexes that saw the same operation stream produce byte-identical
    /// snapshots; replica convergence checks compare these.
    pub fn snapshot(&self) -> serde_json::Value {
        let records: Vec<&OperationRecord> = self.records.values().collect();
        let dapp_entries: Vec<&DappHistoryEntry> = self.dapp_history.values().collect();
        let token_entries: Vec<&TokenHistoryEntry> = self.token_history.values().collect();
        serde_json::json!({
            "records": records,
            "dapp_history": dapp_entries,
            "token_history": token_entries,
        })
    }
}

impl HistoryStore for MemoryIndex {
    fn record_at(
        &self,
        position: &LedgerPosition,
    ) -> Result<Option<OperationRecordId>, IndexError> {
        Ok(self.records_by_position.get(position).copied())
    }

    fn insert_record(&mut self, record: OperationRecord) -> Result<OperationRecordId, IndexError> {
        let id = OperationRecordId(self.next_record_id);
        self.next_record_id += 1;
        self.records_by_position.insert(record.position(), id);
        self.records.insert(id.0, record);
        Ok(id)
    }

    fn record(&self, id: OperationRecordId) -> Result<Option<OperationRecord>, IndexError> {
        Ok(self.records.get(&id.0).cloned())
    }

    fn last_dapp_sequence(&self, dapp_name: &str) -> Result<Option<u64>, IndexError> {
        let range = (dapp_name.to_string(), 0)..=(dapp_name.to_string(), u64::MAX);
        Ok(self
            .dapp_history
            .range(range)
            .next_back()
            .map(|((_, sequence), _)| *sequence))
    }

    fn last_global_sequence(&self) -> Result<Option<u64>, IndexError> {
        Ok(self.global_history.keys().next_back().copied())
    }

    fn insert_dapp_entry(&mut self, entry: DappHistoryEntry) -> Result<(), IndexError> {
        self.global_history
            .insert(entry.global_sequence, (entry.dapp_name.clone(), entry.sequence));
        self.dapp_history
            .insert((entry.dapp_name.clone(), entry.sequence), entry);
        Ok(())
    }

    fn last_token_sequence(
        &self,
        dapp_name: &str,
        author: &str,
        unique_id: &str,
    ) -> Result<Option<u64>, IndexError> {
        let low = (dapp_name.to_string(), author.to_string(), unique_id.to_string(), 0);
        let high = (
            dapp_name.to_string(),
            author.to_string(),
            unique_id.to_string(),
            u64::MAX,
        );
        Ok(self
            .token_history
            .range(low..=high)
            .next_back()
            .map(|((_, _, _, sequence), _)| *sequence))
    }

    fn insert_token_entry(&mut self, entry: TokenHistoryEntry) -> Result<(), IndexError> {
        let key = (
            entry.dapp_name.clone(),
            entry.author.clone(),
            entry.unique_id.clone(),
            entry.sequence,
        );
        self.token_history.insert(key, entry);
        Ok(())
    }

    fn record_by_position(
        &self,
        position: &LedgerPosition,
    ) -> Result<Option<OperationRecord>, IndexError> {
        match self.records_by_position.get(position) {
            Some(id) => self.record(*id),
            None => Ok(None),
        }
    }

    fn dapp_history(
        &self,
        dapp_name: &str,
        from_sequence: u64,
        limit: usize,
    ) -> Result<Vec<DappHistoryEntry>, IndexError> {
        let range = (dapp_name.to_string(), from_sequence)..=(dapp_name.to_string(), u64::MAX);
        Ok(self
            .dapp_history
            .range(range)
            .take(limit)
            .map(|(_, entry)| entry.clone())
            .collect())
    }

    fn global_history(
        &self,
        from_sequence: u64,
        limit: usize,
    ) -> Result<Vec<DappHistoryEntry>, IndexError> {
        let mut entries = Vec::new();
        for (_, key) in self.global_history.range(from_sequence..).take(limit) {
            // Every global key points at an existing dapp history entry.
            let entry = self
                .dapp_history
                .get(key)
                .ok_or_else(|| IndexError::Storage(format!("dangling global key {key:?}")))?;
            entries.push(entry.clone());
        }
        Ok(entries)
    }

    fn token_history(
        &self,
        dapp_name: &str,
        author: &str,
        unique_id: &str,
    ) -> Result<Vec<TokenHistoryEntry>, IndexError> {
        let low = (dapp_name.to_string(), author.to_string(), unique_id.to_string(), 0);
        let high = (
            dapp_name.to_string(),
            author.to_string(),
            unique_id.to_string(),
            u64::MAX,
        );
        Ok(self
            .token_history
            .range(low..=high)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}
