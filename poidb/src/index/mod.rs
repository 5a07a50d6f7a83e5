//! Secondary attribute indexes, the geospatial index seam and the
//! bounding-box resolver built on it.

mod attribute;
mod bbox_resolver;
pub(crate) mod geo_indexer;
mod secondary_index;

pub use attribute::*;
pub use bbox_resolver::*;
pub use geo_indexer::{GeoIndexProvider, GeoIndexer};
pub use secondary_index::*;
