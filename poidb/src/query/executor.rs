use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt::Write;

use super::planner::{PlanStep, QueryPlan};
use super::{NoMatch, QueryResult};
use crate::errors::{ErrorKind, PoiError, PoiResult};
use crate::index::{BoundingBoxResolver, GeoIndexer, SecondaryIndexManager};
use crate::store::RecordStore;
use crate::PoiId;

type CandidateSets = SmallVec<[BTreeSet<PoiId>; 4]>;

/// Runs a [`QueryPlan`] against the record store and indexes.
///
/// Each step yields one candidate set. The first empty set stops the query:
/// later steps are not evaluated and the result names the empty predicate.
/// When every set is non-empty the answer is their intersection.
pub(crate) struct QueryExecutor<'a> {
    record_store: &'a RecordStore,
    secondary_index: &'a SecondaryIndexManager,
    geo_indexer: Option<&'a GeoIndexer>,
}

impl<'a> QueryExecutor<'a> {
    pub(crate) fn new(
        record_store: &'a RecordStore,
        secondary_index: &'a SecondaryIndexManager,
        geo_indexer: Option<&'a GeoIndexer>,
    ) -> Self {
        QueryExecutor {
            record_store,
            secondary_index,
            geo_indexer,
        }
    }

    pub(crate) fn execute(&self, plan: &QueryPlan) -> PoiResult<QueryResult> {
        if plan.needs_geo_index() && self.geo_indexer.is_none() {
            log::error!("Query needs a geo index but none is registered");
            return Err(PoiError::new(
                "Radius and bounding box predicates need a geo index; load a spatial module",
                ErrorKind::IndexNotFound,
            ));
        }

        let mut sets = CandidateSets::new();
        let mut log = String::new();
        let mut candidate_count = 0;

        for step in plan.steps() {
            let candidates = self.candidates(step)?;
            if candidates.is_empty() {
                let message = step.no_match_message();
                log::debug!("Query stopped at {}: {}", step.kind(), message);
                log.push_str(&message);
                let no_match = NoMatch::new(step.kind(), message);
                return Ok(QueryResult::new(
                    Vec::new(),
                    log,
                    candidate_count,
                    Some(no_match),
                ));
            }

            candidate_count += candidates.len();
            let _ = match step {
                PlanStep::ById(_) => writeln!(log, "condition: {}, found 1 POI", step.describe()),
                _ => writeln!(
                    log,
                    "condition {}: {}, found {} POIs",
                    sets.len() + 1,
                    step.describe(),
                    candidates.len()
                ),
            };
            sets.push(candidates);
        }

        let ids = intersect(sets);
        let records = ids
            .iter()
            .map(|id| self.record_store.get(*id))
            .collect::<PoiResult<Vec<_>>>()?;
        let _ = write!(log, "intersection found {} POIs", records.len());

        Ok(QueryResult::new(records, log, candidate_count, None))
    }

    fn candidates(&self, step: &PlanStep) -> PoiResult<BTreeSet<PoiId>> {
        match step {
            PlanStep::ById(id) => {
                let mut ids = BTreeSet::new();
                if self.record_store.exists(*id) {
                    ids.insert(*id);
                }
                Ok(ids)
            }
            PlanStep::Attribute {
                attribute, value, ..
            } => Ok(self.secondary_index.lookup(*attribute, value)),
            PlanStep::WithinRadius { center, radius_km } => {
                self.geo_indexer()?.radius_query(center, *radius_km)
            }
            PlanStep::WithinBoundingBox(bbox) => {
                BoundingBoxResolver::new(self.geo_indexer()?.clone()).resolve(bbox)
            }
        }
    }

    fn geo_indexer(&self) -> PoiResult<&GeoIndexer> {
        self.geo_indexer.ok_or_else(|| {
            PoiError::new("No geo index registered", ErrorKind::IndexNotFound)
        })
    }
}

/// Intersects candidate sets, smallest first.
fn intersect(mut sets: CandidateSets) -> BTreeSet<PoiId> {
    sets.sort_by_key(BTreeSet::len);
    let mut iter = sets.into_iter();
    let mut result = match iter.next() {
        Some(first) => first,
        None => return BTreeSet::new(),
    };
    for set in iter {
        result.retain(|id| set.contains(id));
        if result.is_empty() {
            break;
        }
    }
    result
}
