//! One-time migration of legacy `localStorage` collections.
//!
//! The pre-database builds of the game kept three collections in browser
//! local storage: single cards, decks, and battle decks. The coordinator
//! replays each record through the normal create operations for an
//! authenticated user, strictly sequentially, and reports per-collection
//! success counts alongside per-record error entries.
//!
//! Best-effort by design: one record's failure never aborts its
//! collection, and one collection's corrupt JSON never aborts the other
//! collections. Source records are never deleted; cleanup is the
//! caller's decision.

pub(crate) mod coordinator;
pub mod types;

pub use types::MigrationReport;
