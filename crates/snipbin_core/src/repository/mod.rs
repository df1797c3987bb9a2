//! Paste lifecycle operations: validation and defaults in front of a store.
//!
//! Each operation is one synchronous round trip to the store. There is no
//! caching, no retry and no ownership check: any caller that knows an id may
//! update or delete that paste, and concurrent updates are last-writer-wins.

use crate::constants::MAX_RECENT_PASTES_LIMIT;
use crate::db::PasteStore;
use crate::error::AppError;
use crate::models::paste::{Paste, PasteFields, PasteFilter, PastePage, PasteQuery, PasteRequest};

/// Create/read/list/update/delete surface over a [`PasteStore`].
pub struct PasteRepository<S> {
    store: S,
}

impl<S: PasteStore> PasteRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a paste.
    ///
    /// # Errors
    /// [`AppError::Validation`] when the trimmed content is empty (the store is
    /// not touched); store errors otherwise.
    pub fn create(&self, req: PasteRequest) -> Result<Paste, AppError> {
        let fields = PasteFields::from_request(req)?;
        let paste = self.store.insert(fields)?;
        tracing::info!(
            "Created paste {} (language={}, public={})",
            paste.id,
            paste.language,
            paste.is_public
        );
        Ok(paste)
    }

    /// Fetch a paste by id, public or not.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when no row matches.
    pub fn get(&self, id: &str) -> Result<Paste, AppError> {
        self.store.get(id)?.ok_or(AppError::NotFound)
    }

    /// One page of public pastes matching `filter`, newest first.
    ///
    /// `page` is 1-indexed; 0 is treated as 1. Pages past the end come back
    /// empty with the real total count.
    pub fn list(&self, filter: PasteFilter, page: usize) -> Result<PastePage, AppError> {
        let page = page.max(1);
        let window = self.store.query(&PasteQuery::for_page(filter, page))?;
        Ok(PastePage::new(window, page))
    }

    /// Newest public pastes, at most `limit` (capped at 50).
    pub fn recent(&self, limit: usize) -> Result<Vec<Paste>, AppError> {
        let query = PasteQuery {
            filter: PasteFilter::default(),
            offset: 0,
            limit: limit.min(MAX_RECENT_PASTES_LIMIT),
        };
        Ok(self.store.query(&query)?.rows)
    }

    /// Replace the editable fields of a paste and bump `updated_at`.
    ///
    /// # Errors
    /// [`AppError::Validation`] when the trimmed content is empty (checked
    /// before the store call); [`AppError::NotFound`] when the id is unknown.
    pub fn update(&self, id: &str, req: PasteRequest) -> Result<Paste, AppError> {
        let fields = PasteFields::from_request(req)?;
        let paste = self.store.update(id, fields)?.ok_or(AppError::NotFound)?;
        tracing::info!("Updated paste {}", paste.id);
        Ok(paste)
    }

    /// Permanently remove a paste.
    ///
    /// Deleting an unknown id is not an error; the return value reports
    /// whether a row was removed.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let deleted = self.store.delete(id)?;
        if deleted {
            tracing::info!("Deleted paste {}", id);
        } else {
            tracing::debug!("Delete for unknown paste {} ignored", id);
        }
        Ok(deleted)
    }
}
