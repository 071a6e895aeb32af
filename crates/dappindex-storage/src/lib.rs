//! dappindex-storage — storage backends for DappIndex.
//!
//! Backends:
//! - [`memory`] — in-memory ordered maps (reference backend; hosts that
//!   replay the ledger on startup need nothing else)
//!
//! A persistent backend plugs in by implementing
//! [`dappindex_core::HistoryStore`] with the same composite orderings.

pub mod memory;

pub use memory::MemoryIndex;
