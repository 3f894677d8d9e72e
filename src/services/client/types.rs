//! Entity rows and insert payloads.
//!
//! Row types mirror the remote schema; ids and timestamps are opaque
//! server-assigned strings. Draft types carry exactly the caller-supplied
//! fields of an insert, so server-assigned columns can never be forged
//! from the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A player. Identity is either a wallet address or a Farcaster id;
/// exactly one is set by the corresponding sign-in flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub farcaster_fid: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A single collectible card. `(user_id, house, value)` is unique,
/// enforced by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub user_id: String,
    pub house: String,
    pub faction_name: String,
    pub faction_icon: String,
    pub value: i64,
    pub display_value: String,
    pub card_name: String,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDraft {
    pub house: String,
    pub faction_name: String,
    pub faction_icon: String,
    pub value: i64,
    pub display_value: String,
    pub card_name: String,
}

/// A house-scoped deck: an ordered list of card ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub user_id: String,
    pub house: String,
    pub faction_name: String,
    pub faction_icon: String,
    #[serde(default)]
    pub cards: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckDraft {
    pub house: String,
    pub faction_name: String,
    pub faction_icon: String,
    pub cards: Vec<String>,
}

/// Two house-scoped decks paired for head-to-head play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleDeck {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub deck1_house: String,
    pub deck2_house: String,
    #[serde(default)]
    pub deck1_cards: Vec<String>,
    #[serde(default)]
    pub deck2_cards: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleDeckDraft {
    pub name: String,
    pub deck1_house: String,
    pub deck2_house: String,
    pub deck1_cards: Vec<String>,
    pub deck2_cards: Vec<String>,
}

/// A completed game. Inserted once, immutable, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub player1_id: String,
    pub player2_id: String,
    #[serde(default)]
    pub player1_battle_deck_id: Option<String>,
    #[serde(default)]
    pub player2_battle_deck_id: Option<String>,
    /// `None` on a draw.
    #[serde(default)]
    pub winner_id: Option<String>,
    pub player1_score: i64,
    pub player2_score: i64,
    pub player1_tokens: i64,
    pub player2_tokens: i64,
    #[serde(default)]
    pub is_surrender: bool,
    #[serde(default)]
    pub is_ai_game: bool,
    /// Opaque replay log, stored as-is.
    #[serde(default)]
    pub game_log: Value,
    #[serde(default)]
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDraft {
    pub player1_id: String,
    pub player2_id: String,
    pub player1_battle_deck_id: Option<String>,
    pub player2_battle_deck_id: Option<String>,
    pub winner_id: Option<String>,
    pub player1_score: i64,
    pub player2_score: i64,
    pub player1_tokens: i64,
    pub player2_tokens: i64,
    pub is_surrender: bool,
    pub is_ai_game: bool,
    pub game_log: Value,
}

/// One row of the precomputed ranking view. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub games_played: i64,
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    #[serde(default)]
    pub total_tokens: i64,
}
