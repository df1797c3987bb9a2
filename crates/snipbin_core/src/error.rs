//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
///
/// `Validation` is raised before any store access, `NotFound` when no visible
/// row matches, and the remaining variants are store failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] redb::Error),

    #[error("Store error: {0}")]
    StoreMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl AppError {
    /// Return `true` for failures reported by the underlying store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::StoreMessage(_) | Self::Serialization(_)
        )
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Store(value.into())
    }
}
