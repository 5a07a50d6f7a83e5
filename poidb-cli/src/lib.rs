//! # poidb CLI
//!
//! File-facing collaborators of the poidb engine:
//!
//! - [`ingest`] loads POI records from CSV into a [`poidb::PoiDb`].
//! - [`output`] writes query results and the query log to a directory.
//! - [`collect`] gathers search times and throughputs from many query logs.
//!
//! The `poidb` binary wires them to a command line.

pub mod collect;
pub mod ingest;
pub mod output;
