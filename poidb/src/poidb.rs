use parking_lot::RwLock;
use std::sync::Arc;

use crate::errors::PoiResult;
use crate::index::{GeoIndexer, SecondaryIndexManager};
use crate::poidb_builder::PoiDbBuilder;
use crate::poidb_config::PoiDbConfig;
use crate::query::{Predicates, QueryExecutor, QueryPlanner, QueryResult};
use crate::store::{PutOutcome, RecordStore};
use crate::{Poi, PoiId};

/// Summary of a bulk insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of records stored.
    pub inserted: usize,
    /// Ids ignored because they were already stored, under
    /// [`DuplicatePolicy::Skip`](crate::store::DuplicatePolicy::Skip).
    pub skipped: Vec<PoiId>,
}

/// An in-memory POI database.
///
/// `PoiDb` owns the record store, the secondary attribute indexes and, when
/// a spatial module was loaded, the geo index. Every insert is mirrored into
/// all of them before the insert returns. Queries read all three.
///
/// Inserts and queries are separated by a load barrier: an insert holds it
/// exclusively, queries share it. A query therefore never sees a record that
/// is stored but not yet indexed. Queries run concurrently with each other.
///
/// Clones share the same database.
///
/// # Examples
///
/// ```rust
/// use poidb::query::Predicates;
/// use poidb::{Poi, PoiDb};
///
/// let db = PoiDb::builder().open().unwrap();
/// db.insert(Poi::new(1, 40.0, -74.0).unwrap().with_amenity("cafe")).unwrap();
/// db.insert(Poi::new(2, 40.1, -74.1).unwrap().with_amenity("bank")).unwrap();
///
/// let result = db.find(&Predicates::new().amenity("cafe")).unwrap();
/// assert_eq!(result.ids(), vec![1]);
/// ```
#[derive(Clone)]
pub struct PoiDb {
    inner: Arc<PoiDbInner>,
}

impl PoiDb {
    pub fn builder() -> PoiDbBuilder {
        PoiDbBuilder::new()
    }

    pub(crate) fn new(config: PoiDbConfig) -> Self {
        PoiDb {
            inner: Arc::new(PoiDbInner::new(config)),
        }
    }

    /// Stores a record and indexes it.
    ///
    /// # Errors
    ///
    /// * `DuplicateRecord` if the id is already stored and the policy is
    ///   `Reject`. Nothing is modified in that case.
    /// * `IndexingError` if the geo index refuses the point.
    pub fn insert(&self, poi: Poi) -> PoiResult<PutOutcome> {
        let _barrier = self.inner.load_barrier.write();
        self.inner.insert(poi)
    }

    /// Stores a batch of records under a single hold of the load barrier.
    ///
    /// Stops at the first error; records before it stay stored.
    pub fn insert_many<I>(&self, pois: I) -> PoiResult<IngestReport>
    where
        I: IntoIterator<Item = Poi>,
    {
        let _barrier = self.inner.load_barrier.write();
        let mut report = IngestReport::default();
        for poi in pois {
            let id = poi.id();
            match self.inner.insert(poi)? {
                PutOutcome::Inserted => report.inserted += 1,
                PutOutcome::Skipped => report.skipped.push(id),
            }
        }
        log::info!(
            "Ingested {} POIs, skipped {} duplicates",
            report.inserted,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Returns the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is none.
    pub fn get(&self, id: PoiId) -> PoiResult<Poi> {
        let _barrier = self.inner.load_barrier.read();
        self.inner.record_store.get(id)
    }

    pub fn exists(&self, id: PoiId) -> bool {
        let _barrier = self.inner.load_barrier.read();
        self.inner.record_store.exists(id)
    }

    /// Number of stored records.
    pub fn size(&self) -> usize {
        self.inner.record_store.size()
    }

    /// Runs a query.
    ///
    /// An empty answer is not an error: the returned [`QueryResult`] says
    /// which predicate, if any, came back empty.
    ///
    /// # Errors
    ///
    /// * `NoPredicate`, `InvalidPredicateCombination`, `InvalidCoordinate`
    ///   or `InvalidDataType` for a predicate set the planner rejects.
    /// * `IndexNotFound` for a radius or bounding-box predicate when no geo
    ///   index is registered.
    pub fn find(&self, predicates: &Predicates) -> PoiResult<QueryResult> {
        let plan = QueryPlanner::plan(predicates)?;
        let _barrier = self.inner.load_barrier.read();
        QueryExecutor::new(
            &self.inner.record_store,
            &self.inner.secondary_index,
            self.inner.geo_indexer.as_ref(),
        )
        .execute(&plan)
    }

    pub fn config(&self) -> &PoiDbConfig {
        &self.inner.config
    }

    /// True when a geo index is registered.
    pub fn has_geo_index(&self) -> bool {
        self.inner.geo_indexer.is_some()
    }
}

struct PoiDbInner {
    config: PoiDbConfig,
    record_store: RecordStore,
    secondary_index: SecondaryIndexManager,
    geo_indexer: Option<GeoIndexer>,
    load_barrier: RwLock<()>,
}

impl PoiDbInner {
    fn new(config: PoiDbConfig) -> Self {
        PoiDbInner {
            record_store: RecordStore::new(config.duplicate_policy()),
            secondary_index: SecondaryIndexManager::new(),
            geo_indexer: config.geo_indexer(),
            load_barrier: RwLock::new(()),
            config,
        }
    }

    /// Caller holds the load barrier for writing.
    fn insert(&self, poi: Poi) -> PoiResult<PutOutcome> {
        let id = poi.id();
        let geometry = poi.geometry();
        let indexed = poi.clone();

        let outcome = self.record_store.put(poi)?;
        if outcome == PutOutcome::Inserted {
            self.secondary_index.index(&indexed);
            if let Some(geo_indexer) = &self.geo_indexer {
                geo_indexer.add(id, geometry)?;
            }
            log::debug!("Inserted POI {}", id);
        }
        Ok(outcome)
    }
}
