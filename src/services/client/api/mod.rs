//! Per-entity API operations.
//!
//! Each function issues one backend query through the client's executor
//! and decodes the response into the typed row. Functions take the client
//! as first parameter; the `TokenDb` methods in the parent module are thin
//! wrappers over them.

pub mod auth;
pub mod battle_decks;
pub mod cards;
pub mod decks;
pub mod games;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::services::errors::{DbError, DbResult};

/// Serialize an insert draft and attach the owning user id.
pub(crate) fn owned_row<T: Serialize>(user_id: &str, draft: &T) -> DbResult<Value> {
    let mut value = serde_json::to_value(draft).map_err(|e| DbError::RemoteQuery {
        message: format!("failed to serialize payload: {}", e),
    })?;
    if let Some(row) = value.as_object_mut() {
        row.insert("user_id".to_string(), json!(user_id));
    } else {
        return Err(DbError::RemoteQuery {
            message: "insert payload is not a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// Decode a row-array response.
pub(crate) fn rows<T: DeserializeOwned>(table: &str, value: Value) -> DbResult<Vec<T>> {
    serde_json::from_value(value).map_err(|e| decode_error(table, &e))
}

/// Decode the first row of a representation response. Inserts and upserts
/// with `return=representation` always carry exactly one row on success.
pub(crate) fn first_row<T: DeserializeOwned>(table: &str, value: Value) -> DbResult<T> {
    let mut row_values = match value {
        Value::Array(row_values) => row_values,
        other => vec![other],
    };
    if row_values.is_empty() {
        return Err(DbError::RemoteQuery {
            message: format!("'{}' returned no representation", table),
        });
    }
    serde_json::from_value(row_values.remove(0)).map_err(|e| decode_error(table, &e))
}

pub(crate) fn decode_error(table: &str, e: &serde_json::Error) -> DbError {
    DbError::RemoteQuery {
        message: format!("failed to decode '{}' response: {}", table, e),
    }
}
