//! Deck operations. Decks are immutable once created: there is create,
//! list, and delete, nothing else.

use tracing::instrument;

use super::{first_row, owned_row, rows};
use crate::services::client::query::QueryRequest;
use crate::services::client::types::{Deck, DeckDraft};
use crate::services::client::TokenDb;
use crate::services::errors::DbResult;

#[instrument(skip(db), err)]
pub(crate) async fn get_user_decks_impl(db: &TokenDb, user_id: &str) -> DbResult<Vec<Deck>> {
    let value = db
        .executor
        .execute(
            QueryRequest::select("decks")
                .eq("user_id", user_id)
                .order_desc("created_at"),
        )
        .await?;
    rows("decks", value)
}

#[instrument(skip(db, draft), err)]
pub(crate) async fn create_deck_impl(
    db: &TokenDb,
    user_id: &str,
    draft: &DeckDraft,
) -> DbResult<Deck> {
    let row = owned_row(user_id, draft)?;
    let value = db
        .executor
        .execute(QueryRequest::insert("decks", row))
        .await?;
    first_row("decks", value)
}

#[instrument(skip(db), err)]
pub(crate) async fn delete_deck_impl(db: &TokenDb, deck_id: &str) -> DbResult<()> {
    db.executor
        .execute(QueryRequest::delete("decks").eq("id", deck_id))
        .await?;
    Ok(())
}
