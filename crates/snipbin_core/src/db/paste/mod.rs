//! Paste storage operations backed by redb.

mod helpers;

use super::PasteStore;
use crate::{db::tables::*, error::AppError, models::paste::*};
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;
use uuid::Uuid;

use self::helpers::WindowCollector;
pub(crate) use self::helpers::{deserialize_paste, reverse_timestamp_key};

/// Accessor for paste-related redb tables.
#[derive(Clone)]
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Initialize paste tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.open_table(PASTES_BY_CREATED)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a fully-formed row and its index entry in one write transaction.
    ///
    /// # Errors
    /// Returns an error when serialization fails, the id already exists, or
    /// storage operations fail.
    pub fn insert_row(&self, paste: &Paste) -> Result<(), AppError> {
        let encoded = bincode::serialize(paste)?;
        let created_key = reverse_timestamp_key(paste.created_at);

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut by_created = write_txn.open_table(PASTES_BY_CREATED)?;

            if pastes.get(paste.id.as_str())?.is_some() {
                return Err(AppError::StoreMessage(format!(
                    "Paste id '{}' already exists",
                    paste.id
                )));
            }

            pastes.insert(paste.id.as_str(), encoded.as_slice())?;
            by_created.insert((created_key, paste.id.as_str()), ())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl PasteStore for PasteDb {
    fn insert(&self, fields: PasteFields) -> Result<Paste, AppError> {
        let paste = Paste::from_fields(Uuid::new_v4().to_string(), fields, Utc::now());
        self.insert_row(&paste)?;
        Ok(paste)
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    fn update(&self, id: &str, fields: PasteFields) -> Result<Option<Paste>, AppError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut pastes = write_txn.open_table(PASTES)?;

            let Some(old_guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let mut paste = deserialize_paste(old_guard.value())?;
            drop(old_guard);

            // created_at is untouched, so the listing index entry stays valid.
            paste.apply_fields(fields, Utc::now());
            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id, encoded.as_slice())?;
            paste
        };
        write_txn.commit()?;
        Ok(Some(updated))
    }

    fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut by_created = write_txn.open_table(PASTES_BY_CREATED)?;

            let Some(old_guard) = pastes.get(id)? else {
                return Ok(false);
            };
            let paste = deserialize_paste(old_guard.value())?;
            drop(old_guard);

            let _ = by_created.remove((reverse_timestamp_key(paste.created_at), id))?;
            let _ = pastes.remove(id)?;
        }
        write_txn.commit()?;
        Ok(true)
    }

    fn query(&self, query: &PasteQuery) -> Result<QueryWindow, AppError> {
        let read_txn = self.db.begin_read()?;
        let by_created = read_txn.open_table(PASTES_BY_CREATED)?;
        let pastes = read_txn.open_table(PASTES)?;
        let mut collector = WindowCollector::new(query.offset, query.limit);

        for item in by_created.iter()? {
            let (key, _) = item?;
            let (_, paste_id) = key.value();
            let Some(paste_guard) = pastes.get(paste_id)? else {
                continue;
            };
            let paste = deserialize_paste(paste_guard.value())?;
            if query.filter.matches(&paste) {
                collector.push(paste);
            }
        }

        let (rows, total_count) = collector.finish();
        Ok(QueryWindow { rows, total_count })
    }
}
