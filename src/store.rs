//! Metadata store: the attachment-metadata collaborator interface.
//!
//! The [`MetadataStore`] trait is the seam between the resolution engine
//! and whatever persistence the host CMS uses. Two outcomes are distinct by
//! design:
//!
//! - `Ok(None)` — the id is unknown or carries no image metadata. Never an
//!   error; the affected tag or attribute set is simply left on the local
//!   rendering path.
//! - `Err(StoreError)` — the backend itself failed (transport, decode).
//!   Propagated to the caller; the core does not retry.
//!
//! [`InMemoryStore`] is the reference implementation, used by tests and by
//! embedding hosts without a database. It records lookups and prefetch
//! hints so batching behavior is observable.

use crate::types::ImageMetadata;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("metadata backend failure: {0}")]
    Backend(String),
    #[error("metadata decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Attachment-metadata persistence interface.
pub trait MetadataStore {
    /// Fetch one attachment's image metadata. `Ok(None)` for unknown ids.
    fn attachment_metadata(&self, id: u64) -> Result<Option<ImageMetadata>, StoreError>;

    /// Best-effort hint that the given ids are about to be fetched, so the
    /// backend can warm a cache or batch a query. May be a no-op, may fail
    /// silently; every subsequent [`attachment_metadata`] call must be
    /// independently correct regardless.
    ///
    /// [`attachment_metadata`]: MetadataStore::attachment_metadata
    fn prefetch(&self, ids: &BTreeSet<u64>);
}

/// In-memory [`MetadataStore`] keyed by attachment id.
///
/// Lookups and prefetch hints are recorded behind a `Mutex` so the store
/// stays usable behind a shared reference.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: HashMap<u64, ImageMetadata>,
    lookups: Mutex<Vec<u64>>,
    prefetches: Mutex<Vec<BTreeSet<u64>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON manifest mapping attachment id to metadata,
    /// the shape the host CMS persists:
    ///
    /// ```json
    /// { "5": { "width": 1200, "height": 800, "cdn": { ... } } }
    /// ```
    pub fn from_json(manifest: &str) -> Result<Self, StoreError> {
        let records: HashMap<u64, ImageMetadata> = serde_json::from_str(manifest)?;
        Ok(Self {
            records,
            ..Self::default()
        })
    }

    pub fn insert(&mut self, id: u64, meta: ImageMetadata) {
        self.records.insert(id, meta);
    }

    /// Every id fetched so far, in call order.
    pub fn lookups(&self) -> Vec<u64> {
        self.lookups.lock().unwrap().clone()
    }

    /// Every prefetch hint received so far.
    pub fn prefetches(&self) -> Vec<BTreeSet<u64>> {
        self.prefetches.lock().unwrap().clone()
    }
}

impl MetadataStore for InMemoryStore {
    fn attachment_metadata(&self, id: u64) -> Result<Option<ImageMetadata>, StoreError> {
        self.lookups.lock().unwrap().push(id);
        Ok(self.records.get(&id).cloned())
    }

    fn prefetch(&self, ids: &BTreeSet<u64>) {
        self.prefetches.lock().unwrap().push(ids.clone());
    }
}
