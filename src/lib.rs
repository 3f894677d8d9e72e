//! Client-side data layer for the TOKEN card game.
//!
//! This crate wraps a hosted Supabase (PostgREST) backend behind a typed,
//! async API: wallet and Farcaster sign-in, card/deck/battle-deck CRUD,
//! game-result recording, leaderboard reads, and a one-time migration of
//! legacy browser `localStorage` collections into the remote database.
//!
//! The backend owns every row; this layer holds only transient copies for
//! the duration of a single call. Each operation is exactly one round trip:
//! no retries, no caching, no client-side transactions.
//!
//! # Usage
//!
//! ```no_run
//! use tokendb::{SupabaseConfig, TokenDb};
//!
//! # async fn run() -> tokendb::DbResult<()> {
//! let config = SupabaseConfig::new(
//!     "https://example.supabase.co",
//!     "anon-key",
//! )?;
//! let db = TokenDb::connect(config)?;
//!
//! let user = db.sign_in_with_wallet("0xabc123").await?;
//! let cards = db.get_user_cards(&user.id).await?;
//! let _report = db.migrate_from_local_storage(&user.id).await;
//! # Ok(())
//! # }
//! ```

pub mod migration;
pub mod services;

pub use migration::MigrationReport;
pub use services::client::query::{Filter, OrderBy, QueryExecutor, QueryMethod, QueryRequest};
pub use services::client::types::{
    BattleDeck, BattleDeckDraft, Card, CardDraft, Deck, DeckDraft, Game, GameDraft,
    LeaderboardEntry, User,
};
pub use services::client::TokenDb;
pub use services::config::SupabaseConfig;
pub use services::errors::{DbError, DbResult};
#[cfg(target_arch = "wasm32")]
pub use services::storage::BrowserStore;
pub use services::storage::{LocalStore, MemoryStore};
