//! Game recording, history, and leaderboard reads.

use tracing::instrument;

use super::{first_row, rows};
use crate::services::client::query::QueryRequest;
use crate::services::client::types::{Game, GameDraft, LeaderboardEntry};
use crate::services::client::TokenDb;
use crate::services::errors::{DbError, DbResult};

const DEFAULT_GAME_HISTORY_LIMIT: u32 = 20;
const DEFAULT_LEADERBOARD_LIMIT: u32 = 100;

/// Insert one immutable game row. Games are never updated or deleted.
#[instrument(skip(db, draft), err)]
pub(crate) async fn record_game_impl(db: &TokenDb, draft: &GameDraft) -> DbResult<Game> {
    let row = serde_json::to_value(draft).map_err(|e| DbError::RemoteQuery {
        message: format!("failed to serialize game payload: {}", e),
    })?;
    let value = db
        .executor
        .execute(QueryRequest::insert("games", row))
        .await?;
    first_row("games", value)
}

/// Games where the user played either side, most recent first. The limit
/// is an upper bound; zero means no rows.
#[instrument(skip(db), err)]
pub(crate) async fn get_user_games_impl(
    db: &TokenDb,
    user_id: &str,
    limit: Option<u32>,
) -> DbResult<Vec<Game>> {
    let value = db
        .executor
        .execute(
            QueryRequest::select("games")
                .eq_any(&["player1_id", "player2_id"], user_id)
                .order_desc("played_at")
                .limit(limit.unwrap_or(DEFAULT_GAME_HISTORY_LIMIT)),
        )
        .await?;
    rows("games", value)
}

/// Bounded read of the precomputed ranking view.
#[instrument(skip(db), err)]
pub(crate) async fn get_leaderboard_impl(
    db: &TokenDb,
    limit: Option<u32>,
) -> DbResult<Vec<LeaderboardEntry>> {
    let value = db
        .executor
        .execute(
            QueryRequest::select("leaderboard")
                .limit(limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT)),
        )
        .await?;
    rows("leaderboard", value)
}
