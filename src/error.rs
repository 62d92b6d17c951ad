//! Error types for the storage and auth layers.

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested row does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Error type for authentication primitives
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Hashing or hash-parsing failure
    #[error("password hash error: {0}")]
    PasswordHash(String),
}
