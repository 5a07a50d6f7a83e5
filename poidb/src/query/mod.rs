//! Predicate sets, their validation into query plans, and execution.
//!
//! A query runs in two phases. [`QueryPlanner::plan`] checks the predicate
//! combination and lowers each predicate to an index access in a fixed
//! evaluation order. The executor then collects one candidate set per step,
//! stops at the first empty one, and otherwise intersects them.

mod executor;
mod planner;
mod predicates;
mod query_result;

pub(crate) use executor::QueryExecutor;
pub use planner::{QueryPlan, QueryPlanner};
pub use predicates::*;
pub use query_result::*;
