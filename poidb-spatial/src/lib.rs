//! # poidb Spatial - Geospatial Index for poidb
//!
//! This crate provides the geo index behind poidb's radius and bounding-box
//! predicates: an in-memory R-tree ([`rstar`]) holding one point per POI,
//! queried by envelope and refined by flat-earth distance.
//!
//! ## Quick Start
//!
//! ```rust
//! use poidb::query::Predicates;
//! use poidb::{Poi, PoiDb};
//! use poidb_spatial::SpatialModule;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = PoiDb::builder()
//!     .load_module(SpatialModule)
//!     .open()?;
//!
//! db.insert(Poi::new(1, 40.0, -74.0)?.with_amenity("cafe"))?;
//!
//! let nearby = Predicates::new().latitude(40.0).longitude(-74.0).radius_km(1.0);
//! assert_eq!(db.find(&nearby)?.ids(), vec![1]);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod rtree_index;
pub mod spatial_module;
pub mod wkt;

pub use error::{SpatialError, SpatialResult};
pub use rtree_index::RTreeGeoIndex;
pub use spatial_module::SpatialModule;
