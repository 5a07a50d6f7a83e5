use crate::errors::{ErrorKind, PoiError, PoiResult};
use crate::index::GeoIndexer;
use crate::poidb_config::PoiDbConfig;

/// Contract for modules that plug index implementations into poidb.
///
/// A module is handed a [`PluginRegistrar`] while the database is being
/// configured and registers the plugins it provides through it. The
/// `poidb_spatial` crate ships `SpatialModule`, which registers the R-tree
/// geospatial index.
pub trait PoiModule: Send + Sync {
    /// Registers this module's plugins.
    fn load(&self, plugin_registrar: &PluginRegistrar) -> PoiResult<()>;
}

/// Hands plugin registrations from a [`PoiModule`] to the configuration.
pub struct PluginRegistrar {
    config: PoiDbConfig,
}

impl PluginRegistrar {
    pub(crate) fn new(config: PoiDbConfig) -> Self {
        PluginRegistrar { config }
    }

    /// Registers the geospatial index. Only one may be registered per
    /// database.
    pub fn register_geo_indexer(&self, geo_indexer: GeoIndexer) -> PoiResult<()> {
        if self.config.geo_indexer().is_some() {
            log::error!("A geo indexer is already registered");
            return Err(PoiError::new(
                "A geo indexer is already registered",
                ErrorKind::InvalidOperation,
            ));
        }
        self.config.set_geo_indexer(geo_indexer);
        Ok(())
    }
}
