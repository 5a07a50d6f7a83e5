//! Command implementations for the poidb binary

pub mod collect;
pub mod query;
