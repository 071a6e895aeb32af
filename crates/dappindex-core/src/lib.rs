//! dappindex-core — deterministic secondary-index engine for a host ledger.
//!
//! # Architecture
//!
//! ```text
//! host "operation applied" notification
//!         │
//!         ▼
//! HistoryEngine::on_operation
//!         ├── ImpactResolver      (operation → impacted dapp set)
//!         ├── operation records   (one canonical record per position)
//!         ├── dapp history        (per-dapp + global sequences)
//!         └── token sub-ledger    (classified custom-JSON payloads)
//!                     ▲
//!            HistoryStore backend (dappindex-storage)
//! ```
//!
//! The engine runs synchronously inside the host's application callback and
//! never participates in consensus; its only hard requirement is that every
//! replica replaying the same operation stream converges on byte-identical
//! index state.

pub mod engine;
pub mod error;
pub mod record;
pub mod resolver;
pub mod store;
pub mod token;
pub mod types;

pub use engine::{EngineConfig, HistoryEngine};
pub use error::IndexError;
pub use record::{DappHistoryEntry, OperationRecord, OperationRecordId, TokenHistoryEntry};
pub use resolver::{DappImpactRules, ImpactResolver};
pub use store::HistoryStore;
pub use token::{try_decode, TokenSubOperation};
pub use types::{LedgerPosition, Operation, OperationNotification};
