//! poidb Benchmark Library
//!
//! Data generators and database setup shared by the criterion benches.

pub mod config;
pub mod data_gen;
pub mod stores;
