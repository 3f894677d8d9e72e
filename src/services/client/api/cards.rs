//! Card operations.

use serde_json::{json, Value};
use tracing::instrument;

use super::{decode_error, first_row, owned_row, rows};
use crate::services::client::query::QueryRequest;
use crate::services::client::types::{Card, CardDraft};
use crate::services::client::TokenDb;
use crate::services::errors::{DbError, DbResult};

#[instrument(skip(db), err)]
pub(crate) async fn get_user_cards_impl(db: &TokenDb, user_id: &str) -> DbResult<Vec<Card>> {
    let value = db
        .executor
        .execute(
            QueryRequest::select("cards")
                .eq("user_id", user_id)
                .order("house")
                .order("value"),
        )
        .await?;
    rows("cards", value)
}

/// Insert one card. A `(user, house, value)` collision surfaces as
/// [`DbError::DuplicateKey`] so callers can show the specific message.
#[instrument(skip(db, draft), err)]
pub(crate) async fn create_card_impl(
    db: &TokenDb,
    user_id: &str,
    draft: &CardDraft,
) -> DbResult<Card> {
    let row = owned_row(user_id, draft)?;
    let value = db
        .executor
        .execute(QueryRequest::insert("cards", row))
        .await?;
    first_row("cards", value)
}

/// Add experience to a card through the backend's atomic increment
/// function. The new total is computed server-side, so concurrent
/// increments never lose updates.
#[instrument(skip(db), err)]
pub(crate) async fn update_card_xp_impl(
    db: &TokenDb,
    card_id: &str,
    amount: i64,
) -> DbResult<Card> {
    let value = db
        .executor
        .execute(QueryRequest::rpc(
            "increment_card_xp",
            json!({ "card_id": card_id, "amount": amount }),
        ))
        .await?;

    let row = match value {
        Value::Null => None,
        Value::Array(mut row_values) => {
            if row_values.is_empty() {
                None
            } else {
                Some(row_values.remove(0))
            }
        }
        other => Some(other),
    };

    let row = row.ok_or_else(|| DbError::not_found("cards", card_id))?;
    serde_json::from_value(row).map_err(|e| decode_error("cards", &e))
}

#[instrument(skip(db), err)]
pub(crate) async fn delete_card_impl(db: &TokenDb, card_id: &str) -> DbResult<()> {
    db.executor
        .execute(QueryRequest::delete("cards").eq("id", card_id))
        .await?;
    Ok(())
}
