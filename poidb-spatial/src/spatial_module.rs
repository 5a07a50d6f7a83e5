use poidb::errors::PoiResult;
use poidb::index::GeoIndexer;
use poidb::{PluginRegistrar, PoiModule};

use crate::RTreeGeoIndex;

/// poidb module registering the R-tree geo index.
///
/// Load it to enable radius and bounding-box predicates.
///
/// ## Example
///
/// ```rust
/// use poidb::PoiDb;
/// use poidb_spatial::SpatialModule;
///
/// let db = PoiDb::builder()
///     .load_module(SpatialModule)
///     .open()
///     .unwrap();
/// assert!(db.has_geo_index());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SpatialModule;

impl PoiModule for SpatialModule {
    fn load(&self, plugin_registrar: &PluginRegistrar) -> PoiResult<()> {
        plugin_registrar.register_geo_indexer(GeoIndexer::new(RTreeGeoIndex::new()))
    }
}
