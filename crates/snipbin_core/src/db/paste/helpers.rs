//! Helper functions shared by paste storage operations.

use crate::error::AppError;
use crate::models::paste::Paste;
use chrono::{DateTime, Utc};

pub(crate) fn reverse_timestamp_key(created_at: DateTime<Utc>) -> u64 {
    // Pre-epoch timestamps clamp to zero so the subtraction cannot underflow.
    let millis = created_at.timestamp_millis().max(0) as u64;
    u64::MAX.saturating_sub(millis)
}

pub(crate) fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Tracks the offset/limit window while counting every match.
pub(super) struct WindowCollector {
    offset: usize,
    limit: usize,
    seen: usize,
    rows: Vec<Paste>,
}

impl WindowCollector {
    pub(super) fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            seen: 0,
            rows: Vec::with_capacity(limit.min(64)),
        }
    }

    /// Record one match, keeping it only when it lands inside the window.
    pub(super) fn push(&mut self, paste: Paste) {
        if self.seen >= self.offset && self.rows.len() < self.limit {
            self.rows.push(paste);
        }
        self.seen += 1;
    }

    pub(super) fn finish(self) -> (Vec<Paste>, usize) {
        (self.rows, self.seen)
    }
}
