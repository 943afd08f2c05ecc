use thiserror::Error;

/// Errors that can occur when talking to the storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with the given id exists in the collection.
    #[error("{collection} row {id} not found")]
    NotFound { collection: &'static str, id: i64 },

    /// The backend could not be reached or refused the request.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// A row read from the backend did not have the expected shape.
    #[error("Invalid row in {collection}: {reason}")]
    InvalidRow {
        collection: &'static str,
        reason: String,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns true if the error means the requested row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
