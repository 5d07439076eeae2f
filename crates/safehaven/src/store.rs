//! The local record store.
//!
//! [`RecordStore`] keeps the three record collections, each as a JSON array
//! under its own key in [`Storage`]. Every mutation is a read-modify-write of
//! the whole collection: read the array, change it in memory, write the full
//! array back. There is no locking; separate processes sharing one database
//! file are not coordinated and the last full write of a collection wins.
//!
//! Stored values are decoded into typed records and checked for empty or
//! duplicate identifiers. Anything that fails those checks is reported as
//! [`Error::CorruptCollection`] and left untouched.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::records::{
    Collection, ContactMessage, HelpRequest, HelpStatus, LegalRequest, LegalStatus, Record,
    Updatable,
};
use crate::storage::Storage;

/// Persistent store for help requests, legal requests and contact messages.
#[derive(Debug)]
pub struct RecordStore {
    storage: Storage,
}

impl RecordStore {
    /// Wrap an already opened [`Storage`].
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Open the store backed by the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Storage::open(path).map(Self::new)
    }

    /// Open a store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Storage::open_in_memory().map(Self::new)
    }

    /// The underlying key-value storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Every record in `T`'s collection, in insertion order.
    ///
    /// A collection that was never written (or was cleared) is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptCollection`] if the stored value cannot be
    /// decoded, or an error if the database read fails.
    pub fn list<T: Record>(&self) -> Result<Vec<T>> {
        let key = T::COLLECTION.key();
        let records = match self.storage.get(key)? {
            Some(raw) => decode_collection(key, &raw)?,
            None => Vec::new(),
        };
        debug!(collection = key, len = records.len(), "listed collection");
        Ok(records)
    }

    /// Create a record from `draft` and append it to its collection.
    ///
    /// The record gets a fresh random identifier, the current time and its
    /// kind's default status. Timestamps are kept non-decreasing within the
    /// collection, so a clock step backwards stamps the previous record's time.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read, decoded or written.
    pub fn append<T: Record>(&self, draft: T::Draft) -> Result<T> {
        let mut records: Vec<T> = self.list()?;

        let id = generate_id(&records);
        let now = Utc::now().trunc_subsecs(3);
        let timestamp = records
            .last()
            .map_or(now, |last| now.max(ceil_millis(last.timestamp())));

        let record = T::from_draft(draft, id, timestamp);
        records.push(record.clone());
        self.write(&records)?;

        debug!(
            collection = T::COLLECTION.key(),
            id = record.id(),
            len = records.len(),
            "appended record"
        );
        Ok(record)
    }

    /// Merge `patch` into the first record whose identifier is `id`.
    ///
    /// Returns the merged record, or `None` if no record matches. Nothing is
    /// written in the `None` case.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read, decoded or written.
    pub fn update<T: Updatable>(&self, id: &str, patch: T::Patch) -> Result<Option<T>> {
        let mut records: Vec<T> = self.list()?;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            debug!(collection = T::COLLECTION.key(), id, "no record to update");
            return Ok(None);
        };
        record.apply(patch);
        let updated = record.clone();

        self.write(&records)?;
        debug!(collection = T::COLLECTION.key(), id, "updated record");
        Ok(Some(updated))
    }

    /// Remove all three collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear_all(&self) -> Result<()> {
        let keys = Collection::ALL.map(Collection::key);
        let removed = self.storage.remove_all(&keys)?;
        info!("Cleared all collections ({} stored)", removed);
        Ok(())
    }

    /// Counts derived from the current contents of every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if any collection cannot be read or decoded.
    pub fn stats(&self) -> Result<StoreStats> {
        let help_requests: Vec<HelpRequest> = self.list()?;
        let legal_requests: Vec<LegalRequest> = self.list()?;
        let contact_messages: Vec<ContactMessage> = self.list()?;

        Ok(StoreStats {
            help_requests: help_requests.len(),
            legal_requests: legal_requests.len(),
            contact_messages: contact_messages.len(),
            pending_help_requests: help_requests
                .iter()
                .filter(|r| r.status == HelpStatus::Pending)
                .count(),
            pending_legal_requests: legal_requests
                .iter()
                .filter(|r| r.status == LegalStatus::Pending)
                .count(),
        })
    }

    /// Help requests submitted with exactly this email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or decoded.
    pub fn help_requests_for_email(&self, email: &str) -> Result<Vec<HelpRequest>> {
        let mut requests: Vec<HelpRequest> = self.list()?;
        requests.retain(|r| r.email == email);
        Ok(requests)
    }

    fn write<T: Record>(&self, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.set(T::COLLECTION.key(), &raw)
    }
}

/// Record counts across all collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Number of help requests.
    pub help_requests: usize,
    /// Number of legal requests.
    pub legal_requests: usize,
    /// Number of contact messages.
    pub contact_messages: usize,
    /// Help requests still pending.
    pub pending_help_requests: usize,
    /// Legal requests still pending.
    pub pending_legal_requests: usize,
}

/// Decode a stored collection and check its identifier invariants.
fn decode_collection<T: Record>(key: &'static str, raw: &str) -> Result<Vec<T>> {
    let records: Vec<T> =
        serde_json::from_str(raw).map_err(|e| Error::corrupt_collection(key, e.to_string()))?;
    check_ids(key, &records)?;
    Ok(records)
}

fn check_ids<T: Record>(key: &'static str, records: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.id().is_empty() {
            return Err(Error::corrupt_collection(
                key,
                format!("record {index} has an empty id"),
            ));
        }
        if !seen.insert(record.id()) {
            return Err(Error::corrupt_collection(
                key,
                format!("duplicate id {}", record.id()),
            ));
        }
    }
    Ok(())
}

/// Round up to whole milliseconds, the precision new timestamps are written at.
fn ceil_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = ts.trunc_subsecs(3);
    if truncated < ts {
        truncated + TimeDelta::milliseconds(1)
    } else {
        truncated
    }
}

/// A random v4 UUID not already used in `records`.
fn generate_id<T: Record>(records: &[T]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}
