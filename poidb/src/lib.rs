//! # poidb - Embedded Point-of-Interest Index
//!
//! poidb stores point-of-interest records (an identifier, a coordinate and a
//! few text attributes) and answers composite queries over them: exact
//! attribute matches, radius searches and bounding-box searches, combined by
//! intersection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use poidb::common::BoundingBox;
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
//! let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
//! let result = db.find(&Predicates::new().amenity("cafe").bbox(bbox))?;
//! println!("{}", result.log());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - The record store holds every record by id and is the source of truth.
//! - Secondary indexes map `(attribute, value)` to the set of ids carrying
//!   it, for amenity, name, phone and exact latitude/longitude.
//! - The geo index answers radius queries. It is a plugin: the core only
//!   defines [`index::GeoIndexProvider`]; `poidb_spatial` supplies an R-tree
//!   implementation through [`PoiDbBuilder::load_module`].
//! - Bounding boxes are answered by querying the circle that circumscribes
//!   the box, then filtering the hits against the box exactly.
//! - A query is validated and ordered by [`query::QueryPlanner`], then each
//!   predicate yields a candidate set. The first empty set ends the query
//!   with a no-match report; otherwise the sets are intersected.
//!
//! ## Module Organization
//!
//! - [`common`] - Geographic primitives and the module/plugin seam
//! - [`errors`] - Error types and result definitions
//! - [`index`] - Secondary indexes, geo index seam, bounding-box resolver
//! - [`query`] - Predicates, planning and query results
//! - [`store`] - Record storage and duplicate handling

pub mod common;
pub mod errors;
pub mod index;
pub mod query;
pub mod store;

mod poi;
mod poidb;
mod poidb_builder;
mod poidb_config;

pub use common::{PluginRegistrar, PoiModule};
pub use poi::{Poi, PoiId};
pub use poidb::{IngestReport, PoiDb};
pub use poidb_builder::PoiDbBuilder;
pub use poidb_config::PoiDbConfig;
