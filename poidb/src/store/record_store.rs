use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt::{self, Display};
use std::sync::Arc;

use crate::errors::{ErrorKind, PoiError, PoiResult};
use crate::{Poi, PoiId};

/// What the store does when a record arrives with an identifier it already
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateRecord`.
    #[default]
    Reject,
    /// Keep the stored record and ignore the new one. Replaying the same
    /// ingestion file is idempotent under this policy.
    Skip,
}

impl Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Result of a single [`RecordStore::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Inserted,
    Skipped,
}

/// Authoritative attribute storage keyed by POI identifier.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<RecordStoreInner>,
}

struct RecordStoreInner {
    records: DashMap<PoiId, Poi>,
    duplicate_policy: DuplicatePolicy,
}

impl RecordStore {
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        RecordStore {
            inner: Arc::new(RecordStoreInner {
                records: DashMap::new(),
                duplicate_policy,
            }),
        }
    }

    /// Stores a record.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRecord` if the identifier is already present and the
    /// policy is [`DuplicatePolicy::Reject`].
    pub fn put(&self, poi: Poi) -> PoiResult<PutOutcome> {
        match self.inner.records.entry(poi.id()) {
            Entry::Occupied(_) => match self.inner.duplicate_policy {
                DuplicatePolicy::Reject => {
                    log::error!("POI {} already exists", poi.id());
                    Err(PoiError::new(
                        &format!("POI {} already exists", poi.id()),
                        ErrorKind::DuplicateRecord,
                    ))
                }
                DuplicatePolicy::Skip => {
                    log::warn!("Skipping duplicate POI {}", poi.id());
                    Ok(PutOutcome::Skipped)
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(poi);
                Ok(PutOutcome::Inserted)
            }
        }
    }

    /// Fetches a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this identifier.
    pub fn get(&self, id: PoiId) -> PoiResult<Poi> {
        match self.inner.records.get(&id) {
            Some(poi) => Ok(poi.value().clone()),
            None => Err(PoiError::new(
                &format!("POI {} not found", id),
                ErrorKind::NotFound,
            )),
        }
    }

    pub fn exists(&self, id: PoiId) -> bool {
        self.inner.records.contains_key(&id)
    }

    pub fn size(&self) -> usize {
        self.inner.records.len()
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.inner.duplicate_policy
    }
}
