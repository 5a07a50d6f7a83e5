use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::{Attribute, AttributeValue};
use crate::{Poi, PoiId};

/// Inverted indexes from `(attribute, value)` to the identifiers of the
/// records holding that value.
///
/// Indexes are purely additive: there is no removal path, so a set only
/// ever grows. Adding the same `(attribute, value, id)` twice is a no-op.
#[derive(Clone)]
pub struct SecondaryIndexManager {
    inner: Arc<SecondaryIndexInner>,
}

struct SecondaryIndexInner {
    index_registry: DashMap<(Attribute, AttributeValue), BTreeSet<PoiId>>,
}

impl Default for SecondaryIndexManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SecondaryIndexManager {
    pub fn new() -> Self {
        SecondaryIndexManager {
            inner: Arc::new(SecondaryIndexInner {
                index_registry: DashMap::new(),
            }),
        }
    }

    /// Indexes a record under every attribute it has a value for.
    pub fn index(&self, poi: &Poi) {
        for (attribute, value) in index_entries(poi) {
            self.add(attribute, value, poi.id());
        }
    }

    /// Returns the identifiers whose `attribute` equals `value`, or an empty
    /// set when there are none.
    pub fn lookup(&self, attribute: Attribute, value: &AttributeValue) -> BTreeSet<PoiId> {
        self.inner
            .index_registry
            .get(&(attribute, value.clone()))
            .map(|ids| ids.value().clone())
            .unwrap_or_default()
    }

    /// Number of identifiers stored under `(attribute, value)`.
    pub fn cardinality(&self, attribute: Attribute, value: &AttributeValue) -> usize {
        self.inner
            .index_registry
            .get(&(attribute, value.clone()))
            .map(|ids| ids.len())
            .unwrap_or(0)
    }

    /// Number of distinct `(attribute, value)` keys.
    pub fn key_count(&self) -> usize {
        self.inner.index_registry.len()
    }

    fn add(&self, attribute: Attribute, value: AttributeValue, id: PoiId) {
        log::debug!("Indexing POI {} under {}={}", id, attribute, value);
        self.inner
            .index_registry
            .entry((attribute, value))
            .or_default()
            .insert(id);
    }
}

fn index_entries(poi: &Poi) -> Vec<(Attribute, AttributeValue)> {
    let mut entries = Vec::with_capacity(5);
    if let Some(amenity) = poi.amenity() {
        entries.push((Attribute::Amenity, AttributeValue::from(amenity)));
    }
    if let Some(name) = poi.name() {
        entries.push((Attribute::Name, AttributeValue::from(name)));
    }
    if let Some(phone) = poi.phone() {
        entries.push((Attribute::Phone, AttributeValue::from(phone)));
    }
    entries.push((Attribute::Latitude, AttributeValue::from(poi.latitude())));
    entries.push((Attribute::Longitude, AttributeValue::from(poi.longitude())));
    entries
}
