//! Identity operations.
//!
//! Sign-in is an upsert keyed on the identity column, so two concurrent
//! sign-ins with the same key resolve to the same row instead of racing a
//! read-then-insert.

use serde_json::json;
use tracing::{info, instrument, warn};

use super::{first_row, rows};
use crate::services::client::query::QueryRequest;
use crate::services::client::types::User;
use crate::services::client::TokenDb;
use crate::services::errors::DbResult;

/// Fetch the signed-in user, if any. The stored session only holds the
/// user id; the row is always re-fetched. A session pointing at a row
/// that no longer exists is cleared.
#[instrument(skip(db), err)]
pub(crate) async fn current_user_impl(db: &TokenDb) -> DbResult<Option<User>> {
    let Some(user_id) = db.session.current(db.store.as_ref()) else {
        return Ok(None);
    };

    let value = db
        .executor
        .execute(QueryRequest::select("users").eq("id", user_id.as_str()).limit(1))
        .await?;
    let mut users: Vec<User> = rows("users", value)?;

    match users.pop() {
        Some(user) => Ok(Some(user)),
        None => {
            warn!(user_id, "stored session points at a missing user, clearing");
            db.session.clear(db.store.as_ref());
            Ok(None)
        }
    }
}

#[instrument(skip(db), err)]
pub(crate) async fn sign_in_with_wallet_impl(db: &TokenDb, wallet_address: &str) -> DbResult<User> {
    let value = db
        .executor
        .execute(QueryRequest::upsert(
            "users",
            "wallet_address",
            json!({ "wallet_address": wallet_address }),
        ))
        .await?;
    let user: User = first_row("users", value)?;

    db.session.store(db.store.as_ref(), &user.id)?;
    info!(user_id = %user.id, "wallet sign-in complete");
    Ok(user)
}

#[instrument(skip(db), err)]
pub(crate) async fn sign_in_with_farcaster_impl(
    db: &TokenDb,
    fid: i64,
    username: &str,
    avatar_url: &str,
) -> DbResult<User> {
    let value = db
        .executor
        .execute(QueryRequest::upsert(
            "users",
            "farcaster_fid",
            json!({
                "farcaster_fid": fid,
                "username": username,
                "avatar_url": avatar_url,
            }),
        ))
        .await?;
    let user: User = first_row("users", value)?;

    db.session.store(db.store.as_ref(), &user.id)?;
    info!(user_id = %user.id, fid, "farcaster sign-in complete");
    Ok(user)
}

/// Forget the persisted session. Local only, no backend call.
pub(crate) fn sign_out_impl(db: &TokenDb) {
    db.session.clear(db.store.as_ref());
}

#[cfg(test)]
mod tests {
    use crate::services::client::testing::test_db;

    #[tokio::test]
    async fn wallet_sign_in_is_idempotent() {
        let (db, _backend) = test_db();

        let first = db.sign_in_with_wallet("0xabc").await.unwrap();
        let second = db.sign_in_with_wallet("0xabc").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.wallet_address.as_deref(), Some("0xabc"));
    }

    #[tokio::test]
    async fn distinct_wallets_get_distinct_users() {
        let (db, _backend) = test_db();

        let a = db.sign_in_with_wallet("0xaaa").await.unwrap();
        let b = db.sign_in_with_wallet("0xbbb").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn farcaster_sign_in_refreshes_profile_fields() {
        let (db, _backend) = test_db();

        let first = db.sign_in_with_farcaster(42, "alice", "a.png").await.unwrap();
        let second = db.sign_in_with_farcaster(42, "alice2", "b.png").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.username.as_deref(), Some("alice2"));
        assert_eq!(second.avatar_url.as_deref(), Some("b.png"));
    }

    #[tokio::test]
    async fn current_user_without_session_is_none() {
        let (db, _backend) = test_db();
        assert_eq!(db.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn current_user_returns_fresh_row_after_sign_in() {
        let (db, _backend) = test_db();

        let signed_in = db.sign_in_with_wallet("0xabc").await.unwrap();
        let current = db.current_user().await.unwrap().unwrap();
        assert_eq!(current.id, signed_in.id);
    }

    #[tokio::test]
    async fn dangling_session_is_cleared() {
        let (db, backend) = test_db();

        db.sign_in_with_wallet("0xabc").await.unwrap();
        backend.clear_table("users");

        assert_eq!(db.current_user().await.unwrap(), None);
        // Second lookup short-circuits on the cleared session.
        assert_eq!(db.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_out_forgets_the_session() {
        let (db, _backend) = test_db();

        db.sign_in_with_wallet("0xabc").await.unwrap();
        db.sign_out();
        assert_eq!(db.current_user().await.unwrap(), None);
    }
}
