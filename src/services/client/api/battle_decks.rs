//! Battle-deck operations.

use tracing::instrument;

use super::{first_row, owned_row, rows};
use crate::services::client::query::QueryRequest;
use crate::services::client::types::{BattleDeck, BattleDeckDraft};
use crate::services::client::TokenDb;
use crate::services::errors::DbResult;

#[instrument(skip(db), err)]
pub(crate) async fn get_user_battle_decks_impl(
    db: &TokenDb,
    user_id: &str,
) -> DbResult<Vec<BattleDeck>> {
    let value = db
        .executor
        .execute(
            QueryRequest::select("battle_decks")
                .eq("user_id", user_id)
                .order_desc("created_at"),
        )
        .await?;
    rows("battle_decks", value)
}

#[instrument(skip(db, draft), err)]
pub(crate) async fn create_battle_deck_impl(
    db: &TokenDb,
    user_id: &str,
    draft: &BattleDeckDraft,
) -> DbResult<BattleDeck> {
    let row = owned_row(user_id, draft)?;
    let value = db
        .executor
        .execute(QueryRequest::insert("battle_decks", row))
        .await?;
    first_row("battle_decks", value)
}

#[instrument(skip(db), err)]
pub(crate) async fn delete_battle_deck_impl(db: &TokenDb, battle_deck_id: &str) -> DbResult<()> {
    db.executor
        .execute(QueryRequest::delete("battle_decks").eq("id", battle_deck_id))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::services::client::testing::test_db;
    use crate::services::client::types::BattleDeckDraft;

    fn draft(name: &str) -> BattleDeckDraft {
        BattleDeckDraft {
            name: name.to_string(),
            deck1_house: "A".to_string(),
            deck2_house: "B".to_string(),
            deck1_cards: vec!["c1".to_string()],
            deck2_cards: vec!["c2".to_string()],
        }
    }

    #[tokio::test]
    async fn battle_decks_list_newest_first() {
        let (db, _backend) = test_db();

        let first = db.create_battle_deck("u1", &draft("Alpha")).await.unwrap();
        let second = db.create_battle_deck("u1", &draft("Beta")).await.unwrap();

        let battle_decks = db.get_user_battle_decks("u1").await.unwrap();
        let ids: Vec<&str> = battle_decks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test]
    async fn battle_deck_pairs_two_houses() {
        let (db, _backend) = test_db();

        let battle_deck = db.create_battle_deck("u1", &draft("Alpha")).await.unwrap();
        assert_eq!(battle_deck.deck1_house, "A");
        assert_eq!(battle_deck.deck2_house, "B");
        assert_eq!(battle_deck.deck1_cards, vec!["c1"]);
        assert_eq!(battle_deck.deck2_cards, vec!["c2"]);
    }

    #[tokio::test]
    async fn deleted_battle_deck_disappears_from_listing() {
        let (db, _backend) = test_db();

        let battle_deck = db.create_battle_deck("u1", &draft("Alpha")).await.unwrap();
        db.delete_battle_deck(&battle_deck.id).await.unwrap();
        assert!(db.get_user_battle_decks("u1").await.unwrap().is_empty());
    }
}
