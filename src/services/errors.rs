use thiserror::Error;

/// Errors surfaced by the data layer.
///
/// Data-access operations propagate these to the caller immediately and
/// never retry. The migration coordinator is the one component that
/// downgrades per-record errors into report entries instead.
#[derive(Debug, Clone, Error)]
pub enum DbError {
    /// Transport failure or generic backend rejection.
    #[error("remote query failed: {message}")]
    RemoteQuery { message: String },

    /// The backend rejected an insert that violates a uniqueness
    /// constraint (Postgres error code 23505).
    #[error("{message}")]
    DuplicateKey { message: String },

    /// The targeted row does not exist.
    #[error("no {table} row found for id {id}")]
    NotFound { table: String, id: String },

    /// A locally-stored collection could not be decoded.
    #[error("malformed local collection '{key}': {message}")]
    LocalDecode { key: String, message: String },

    /// The browser's persistent store rejected a write.
    #[error("local storage error: {message}")]
    Storage { message: String },

    /// Invalid client configuration, detected at construction.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl DbError {
    pub fn remote(message: impl Into<String>) -> Self {
        DbError::RemoteQuery {
            message: message.into(),
        }
    }

    pub fn not_found(table: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            table: table.into(),
            id: id.into(),
        }
    }

    /// True when the error is the backend's uniqueness violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, DbError::DuplicateKey { .. })
    }
}

/// Result type for data-layer operations.
pub type DbResult<T> = Result<T, DbError>;
