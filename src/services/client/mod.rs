//! Typed Supabase client for the TOKEN card game.
//!
//! This module provides the complete client-side data surface:
//!
//! - wallet and Farcaster sign-in, persisted current-user lookup
//! - card, deck, and battle-deck CRUD
//! - game recording, game history, leaderboard reads
//!
//! [`TokenDb`] is an explicitly constructed handle: the backend executor
//! and local store are injected at build time, constructed once at session
//! start, and replaced only by reconstruction. There is no global client
//! state.

pub mod api;
pub mod http;
pub mod query;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpExecutor;
pub use query::{QueryExecutor, QueryRequest};
pub use session::SessionManager;

use crate::migration::MigrationReport;
use crate::services::config::SupabaseConfig;
use crate::services::errors::DbResult;
use crate::services::storage::LocalStore;
use types::{
    BattleDeck, BattleDeckDraft, Card, CardDraft, Deck, DeckDraft, Game, GameDraft,
    LeaderboardEntry, User,
};

/// Handle to the remote game database.
///
/// Every method is a single backend round trip; errors propagate
/// immediately and nothing is retried or cached.
pub struct TokenDb {
    pub(crate) executor: Box<dyn QueryExecutor>,
    pub(crate) store: Box<dyn LocalStore>,
    pub(crate) session: SessionManager,
}

impl TokenDb {
    /// Connect to a Supabase project. On browser builds the session and
    /// legacy collections live in `localStorage`; elsewhere an in-memory
    /// store stands in.
    pub fn connect(config: SupabaseConfig) -> DbResult<Self> {
        let executor = Box::new(HttpExecutor::new(config)?);

        #[cfg(target_arch = "wasm32")]
        let store: Box<dyn LocalStore> = Box::new(crate::services::storage::BrowserStore::new());
        #[cfg(not(target_arch = "wasm32"))]
        let store: Box<dyn LocalStore> = Box::new(crate::services::storage::MemoryStore::new());

        Ok(Self::with_parts(executor, store))
    }

    /// Build a client from injected parts.
    pub fn with_parts(executor: Box<dyn QueryExecutor>, store: Box<dyn LocalStore>) -> Self {
        Self {
            executor,
            store,
            session: SessionManager::new(),
        }
    }

    // Auth

    pub async fn current_user(&self) -> DbResult<Option<User>> {
        api::auth::current_user_impl(self).await
    }

    pub async fn sign_in_with_wallet(&self, wallet_address: &str) -> DbResult<User> {
        api::auth::sign_in_with_wallet_impl(self, wallet_address).await
    }

    pub async fn sign_in_with_farcaster(
        &self,
        fid: i64,
        username: &str,
        avatar_url: &str,
    ) -> DbResult<User> {
        api::auth::sign_in_with_farcaster_impl(self, fid, username, avatar_url).await
    }

    pub fn sign_out(&self) {
        api::auth::sign_out_impl(self)
    }

    // Cards

    pub async fn get_user_cards(&self, user_id: &str) -> DbResult<Vec<Card>> {
        api::cards::get_user_cards_impl(self, user_id).await
    }

    pub async fn create_card(&self, user_id: &str, draft: &CardDraft) -> DbResult<Card> {
        api::cards::create_card_impl(self, user_id, draft).await
    }

    pub async fn update_card_xp(&self, card_id: &str, amount: i64) -> DbResult<Card> {
        api::cards::update_card_xp_impl(self, card_id, amount).await
    }

    pub async fn delete_card(&self, card_id: &str) -> DbResult<()> {
        api::cards::delete_card_impl(self, card_id).await
    }

    // Decks

    pub async fn get_user_decks(&self, user_id: &str) -> DbResult<Vec<Deck>> {
        api::decks::get_user_decks_impl(self, user_id).await
    }

    pub async fn create_deck(&self, user_id: &str, draft: &DeckDraft) -> DbResult<Deck> {
        api::decks::create_deck_impl(self, user_id, draft).await
    }

    pub async fn delete_deck(&self, deck_id: &str) -> DbResult<()> {
        api::decks::delete_deck_impl(self, deck_id).await
    }

    // Battle decks

    pub async fn get_user_battle_decks(&self, user_id: &str) -> DbResult<Vec<BattleDeck>> {
        api::battle_decks::get_user_battle_decks_impl(self, user_id).await
    }

    pub async fn create_battle_deck(
        &self,
        user_id: &str,
        draft: &BattleDeckDraft,
    ) -> DbResult<BattleDeck> {
        api::battle_decks::create_battle_deck_impl(self, user_id, draft).await
    }

    pub async fn delete_battle_deck(&self, battle_deck_id: &str) -> DbResult<()> {
        api::battle_decks::delete_battle_deck_impl(self, battle_deck_id).await
    }

    // Games

    pub async fn record_game(&self, draft: &GameDraft) -> DbResult<Game> {
        api::games::record_game_impl(self, draft).await
    }

    pub async fn get_user_games(&self, user_id: &str, limit: Option<u32>) -> DbResult<Vec<Game>> {
        api::games::get_user_games_impl(self, user_id, limit).await
    }

    pub async fn get_leaderboard(&self, limit: Option<u32>) -> DbResult<Vec<LeaderboardEntry>> {
        api::games::get_leaderboard_impl(self, limit).await
    }

    // Migration

    /// Replay the legacy `localStorage` collections into the remote store
    /// for `user_id`. Per-record failures are collected in the report
    /// rather than propagated; see [`crate::migration`].
    pub async fn migrate_from_local_storage(&self, user_id: &str) -> MigrationReport {
        crate::migration::coordinator::migrate_from_local_storage_impl(self, user_id).await
    }
}
