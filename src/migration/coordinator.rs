//! Best-effort replay of the legacy collections.
//!
//! Each collection is decoded from its raw localStorage string into a
//! JSON array first, then records are decoded and created one at a time.
//! Decoding records individually means one malformed record costs one
//! error entry instead of the whole collection; only unparseable
//! top-level JSON loses a collection, and even that never touches the
//! other two.

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::migration::types::{
    LegacyBattleDeck, LegacyCard, LegacyDeck, MigrationReport, BATTLE_DECKS_KEY, CARDS_KEY,
    DECKS_KEY, DEFAULT_FACTION_ICON, DEFAULT_FACTION_NAME,
};
use crate::services::client::types::{BattleDeckDraft, CardDraft, DeckDraft};
use crate::services::client::TokenDb;
use crate::services::errors::{DbError, DbResult};
use crate::services::storage::LocalStore;

#[instrument(skip(db))]
pub(crate) async fn migrate_from_local_storage_impl(
    db: &TokenDb,
    user_id: &str,
) -> MigrationReport {
    info!(user_id, "starting local storage migration");
    let mut report = MigrationReport::default();

    migrate_cards(db, user_id, &mut report).await;
    migrate_decks(db, user_id, &mut report).await;
    migrate_battle_decks(db, user_id, &mut report).await;

    info!(
        cards = report.cards,
        decks = report.decks,
        battle_decks = report.battle_decks,
        errors = report.errors.len(),
        "local storage migration finished"
    );
    report
}

/// Read one collection as a JSON array. An absent key is an empty
/// collection; unparseable JSON is fatal for this collection only.
fn load_collection(store: &dyn LocalStore, key: &str) -> DbResult<Vec<Value>> {
    match store.get_raw(key) {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| DbError::LocalDecode {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

/// The record field used to identify a failed record in the report.
fn record_label(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    }
}

async fn migrate_cards(db: &TokenDb, user_id: &str, report: &mut MigrationReport) {
    let records = match load_collection(db.store.as_ref(), CARDS_KEY) {
        Ok(records) => records,
        Err(e) => {
            warn!(key = CARDS_KEY, error = %e, "skipping card collection");
            report.errors.push(format!("Card collection: {}", e));
            return;
        }
    };

    for record in records {
        let label = record_label(&record, "displayValue");
        match migrate_one_card(db, user_id, record).await {
            Ok(()) => report.cards += 1,
            Err(e) => report.errors.push(format!("Card {}: {}", label, e)),
        }
    }
}

async fn migrate_one_card(db: &TokenDb, user_id: &str, record: Value) -> DbResult<()> {
    let legacy: LegacyCard = decode_record(CARDS_KEY, record)?;
    let value = coerce_int(&legacy.value).ok_or_else(|| DbError::LocalDecode {
        key: CARDS_KEY.to_string(),
        message: format!("card value {} is not numeric", legacy.value),
    })?;

    let draft = CardDraft {
        house: legacy.house,
        faction_name: legacy
            .faction_name
            .unwrap_or_else(|| DEFAULT_FACTION_NAME.to_string()),
        faction_icon: legacy
            .faction_icon
            .unwrap_or_else(|| DEFAULT_FACTION_ICON.to_string()),
        value,
        display_value: legacy.display_value,
        card_name: legacy.card_name,
    };
    db.create_card(user_id, &draft).await?;
    Ok(())
}

async fn migrate_decks(db: &TokenDb, user_id: &str, report: &mut MigrationReport) {
    let records = match load_collection(db.store.as_ref(), DECKS_KEY) {
        Ok(records) => records,
        Err(e) => {
            warn!(key = DECKS_KEY, error = %e, "skipping deck collection");
            report.errors.push(format!("Deck collection: {}", e));
            return;
        }
    };

    for record in records {
        let label = record_label(&record, "faction");
        match migrate_one_deck(db, user_id, record).await {
            Ok(()) => report.decks += 1,
            Err(e) => report.errors.push(format!("Deck {}: {}", label, e)),
        }
    }
}

async fn migrate_one_deck(db: &TokenDb, user_id: &str, record: Value) -> DbResult<()> {
    let legacy: LegacyDeck = decode_record(DECKS_KEY, record)?;

    let draft = DeckDraft {
        house: legacy.house,
        faction_name: legacy
            .faction
            .unwrap_or_else(|| DEFAULT_FACTION_NAME.to_string()),
        faction_icon: legacy
            .faction_icon
            .unwrap_or_else(|| DEFAULT_FACTION_ICON.to_string()),
        cards: legacy.cards,
    };
    db.create_deck(user_id, &draft).await?;
    Ok(())
}

async fn migrate_battle_decks(db: &TokenDb, user_id: &str, report: &mut MigrationReport) {
    let records = match load_collection(db.store.as_ref(), BATTLE_DECKS_KEY) {
        Ok(records) => records,
        Err(e) => {
            warn!(key = BATTLE_DECKS_KEY, error = %e, "skipping battle deck collection");
            report.errors.push(format!("Battle Deck collection: {}", e));
            return;
        }
    };

    for record in records {
        let label = record_label(&record, "name");
        match migrate_one_battle_deck(db, user_id, record).await {
            Ok(()) => report.battle_decks += 1,
            Err(e) => report.errors.push(format!("Battle Deck {}: {}", label, e)),
        }
    }
}

async fn migrate_one_battle_deck(db: &TokenDb, user_id: &str, record: Value) -> DbResult<()> {
    let legacy: LegacyBattleDeck = decode_record(BATTLE_DECKS_KEY, record)?;

    let draft = BattleDeckDraft {
        name: legacy.name,
        deck1_house: legacy.deck1_house,
        deck2_house: legacy.deck2_house,
        deck1_cards: legacy.deck1_cards,
        deck2_cards: legacy.deck2_cards,
    };
    db.create_battle_deck(user_id, &draft).await?;
    Ok(())
}

fn decode_record<T: serde::de::DeserializeOwned>(key: &str, record: Value) -> DbResult<T> {
    serde_json::from_value(record).map_err(|e| DbError::LocalDecode {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Numeric coercion matching the legacy game, which ran card values
/// through `parseInt`: numbers pass through, numeric strings parse.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
