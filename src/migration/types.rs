//! Legacy record shapes and the migration report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// localStorage keys the legacy game wrote its collections under.
pub(crate) const CARDS_KEY: &str = "token_cards";
pub(crate) const DECKS_KEY: &str = "token_decks";
pub(crate) const BATTLE_DECKS_KEY: &str = "token_battle_decks";

pub(crate) const DEFAULT_FACTION_NAME: &str = "Unknown";
pub(crate) const DEFAULT_FACTION_ICON: &str = "🎴";

/// Outcome of one migration run.
///
/// For each collection, `counter + its error entries == input records`.
/// Successfully migrated records stay in the remote store even when later
/// records fail; nothing is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub cards: u32,
    pub decks: u32,
    pub battle_decks: u32,
    /// Human-readable entries, in encounter order:
    /// `"<EntityLabel> <identifying field>: <error message>"`.
    pub errors: Vec<String>,
}

impl MigrationReport {
    pub fn total_migrated(&self) -> u32 {
        self.cards + self.decks + self.battle_decks
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Legacy records were written by JavaScript and use camelCase keys.
/// Optional display fields are normalized during migration; a card's
/// `value` may be a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyCard {
    pub house: String,
    #[serde(default)]
    pub faction_name: Option<String>,
    #[serde(default)]
    pub faction_icon: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub display_value: String,
    #[serde(default)]
    pub card_name: String,
}

/// Legacy decks name their faction under `faction`, not `factionName`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyDeck {
    pub house: String,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub faction_icon: Option<String>,
    #[serde(default)]
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyBattleDeck {
    pub name: String,
    pub deck1_house: String,
    pub deck2_house: String,
    #[serde(default)]
    pub deck1_cards: Vec<String>,
    #[serde(default)]
    pub deck2_cards: Vec<String>,
}
