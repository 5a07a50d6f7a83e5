use crate::errors::{PoiError, PoiResult};
use crate::poidb::PoiDb;
use crate::poidb_config::PoiDbConfig;
use crate::store::DuplicatePolicy;
use crate::PoiModule;

/// Builder for opening a [`PoiDb`].
///
/// Configuration errors are captured as they happen and the first one is
/// returned from [`open`](PoiDbBuilder::open).
///
/// # Examples
///
/// ```rust,ignore
/// use poidb::PoiDb;
/// use poidb::store::DuplicatePolicy;
/// use poidb_spatial::SpatialModule;
///
/// let db = PoiDb::builder()
///     .duplicate_policy(DuplicatePolicy::Skip)
///     .load_module(SpatialModule)
///     .open()?;
/// ```
#[derive(Default)]
pub struct PoiDbBuilder {
    error: Option<PoiError>,
    config: PoiDbConfig,
}

impl PoiDbBuilder {
    pub fn new() -> Self {
        PoiDbBuilder {
            error: None,
            config: PoiDbConfig::new(),
        }
    }

    /// Sets how records with an already stored id are handled.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_duplicate_policy(policy) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Loads a plugin module, such as `poidb_spatial::SpatialModule` which
    /// provides the geospatial index behind radius and bounding-box queries.
    pub fn load_module<T: PoiModule + 'static>(mut self, module: T) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.load_module(module) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Opens an empty database with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns the first error captured while configuring.
    pub fn open(self) -> PoiResult<PoiDb> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.config.initialize()?;
        Ok(PoiDb::new(self.config))
    }
}
