use std::time::Duration;

use super::PredicateKind;
use crate::{Poi, PoiId};

/// Why a query came back empty before intersecting: the first predicate,
/// in evaluation order, whose candidate set was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatch {
    predicate: PredicateKind,
    message: String,
}

impl NoMatch {
    pub(crate) fn new(predicate: PredicateKind, message: String) -> Self {
        NoMatch { predicate, message }
    }

    pub fn predicate(&self) -> PredicateKind {
        self.predicate
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of a query.
///
/// `candidate_count` is the sum of every evaluated predicate's candidate set
/// size before intersection. It measures how much index data the query
/// touched and feeds throughput figures; it is not the number of records
/// returned.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    records: Vec<Poi>,
    log: String,
    candidate_count: usize,
    no_match: Option<NoMatch>,
}

impl QueryResult {
    pub(crate) fn new(
        records: Vec<Poi>,
        log: String,
        candidate_count: usize,
        no_match: Option<NoMatch>,
    ) -> Self {
        QueryResult {
            records,
            log,
            candidate_count,
            no_match,
        }
    }

    /// Matching records in ascending identifier order.
    pub fn records(&self) -> &[Poi] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Poi> {
        self.records
    }

    pub fn ids(&self) -> Vec<PoiId> {
        self.records.iter().map(Poi::id).collect()
    }

    /// One line per evaluated predicate, then either the intersection size
    /// or the no-match message.
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Set when a predicate produced no candidates and the query stopped.
    pub fn no_match(&self) -> Option<&NoMatch> {
        self.no_match.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Candidates processed per second over `elapsed`; zero when no time
    /// elapsed.
    pub fn throughput(&self, elapsed: Duration) -> f64 {
        let seconds = elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.candidate_count as f64 / seconds
        } else {
            0.0
        }
    }
}
