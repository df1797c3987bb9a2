//! Paste store contract and the redb-backed database handle.

/// Paste table operations.
pub mod paste;
/// redb table definitions.
pub mod tables;

use crate::error::AppError;
use crate::models::paste::{Paste, PasteFields, PasteQuery, QueryWindow};
use crate::repository::PasteRepository;
use std::path::Path;
use std::sync::Arc;

pub use paste::PasteDb;

/// Operations the paste repository needs from a backing store.
///
/// Every method is a single round trip touching at most one row (except
/// `query`, which only reads). Implementations assign `id`, `created_at` and
/// `updated_at` on insert.
pub trait PasteStore: Send + Sync {
    /// Persist a new row and return it with server-assigned fields.
    fn insert(&self, fields: PasteFields) -> Result<Paste, AppError>;

    /// Fetch one row by id, `None` when absent.
    fn get(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Overwrite the editable fields of one row, `None` when absent.
    fn update(&self, id: &str, fields: PasteFields) -> Result<Option<Paste>, AppError>;

    /// Remove one row, returning whether it existed.
    fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Public rows matching the query filter, newest first, windowed by
    /// offset/limit, plus the total number of matches.
    fn query(&self, query: &PasteQuery) -> Result<QueryWindow, AppError>;
}

impl<S: PasteStore + ?Sized> PasteStore for Arc<S> {
    fn insert(&self, fields: PasteFields) -> Result<Paste, AppError> {
        (**self).insert(fields)
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        (**self).get(id)
    }

    fn update(&self, id: &str, fields: PasteFields) -> Result<Option<Paste>, AppError> {
        (**self).update(id, fields)
    }

    fn delete(&self, id: &str) -> Result<bool, AppError> {
        (**self).delete(id)
    }

    fn query(&self, query: &PasteQuery) -> Result<QueryWindow, AppError> {
        (**self).query(query)
    }
}

/// Database handle owning the redb file and its table accessors.
///
/// Constructed once by the process entry point and passed to whatever needs
/// it; there is no global instance.
pub struct Database {
    pub pastes: PasteDb,
}

impl Database {
    /// Open (or create) the database inside directory `path`.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or redb cannot open
    /// the file or its tables.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StoreMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(tables::REDB_FILE_NAME);
        let db = redb::Database::create(&file).map_err(|err| {
            AppError::StoreMessage(format!(
                "Failed to open database '{}': {}",
                file.display(),
                err
            ))
        })?;
        tracing::debug!("Opened paste database at {}", file.display());

        Self::from_shared(Arc::new(db))
    }

    /// Build a handle over an already-open redb instance.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: PasteDb::new(db)?,
        })
    }

    /// Repository over this database's paste table.
    pub fn repository(&self) -> PasteRepository<PasteDb> {
        PasteRepository::new(self.pastes.clone())
    }
}
