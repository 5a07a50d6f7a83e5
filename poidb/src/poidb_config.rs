//! Configuration of a poidb database.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::common::{PluginRegistrar, PoiModule};
use crate::errors::{ErrorKind, PoiError, PoiResult};
use crate::index::GeoIndexer;
use crate::store::DuplicatePolicy;

/// Database configuration: the duplicate-record policy and the plugins
/// registered by loaded modules.
///
/// Configuration is mutable until the database is opened, after which every
/// setter fails with `InvalidOperation`. Clones share state.
///
/// # Examples
///
/// ```rust
/// use poidb::store::DuplicatePolicy;
/// use poidb::PoiDbConfig;
///
/// let config = PoiDbConfig::new();
/// config.set_duplicate_policy(DuplicatePolicy::Skip).unwrap();
/// assert_eq!(config.duplicate_policy(), DuplicatePolicy::Skip);
/// ```
#[derive(Clone)]
pub struct PoiDbConfig {
    inner: Arc<PoiDbConfigInner>,
}

impl Default for PoiDbConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PoiDbConfig {
    pub fn new() -> Self {
        PoiDbConfig {
            inner: Arc::new(PoiDbConfigInner::new()),
        }
    }

    /// Returns the policy applied to records whose id is already stored.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.inner.duplicate_policy()
    }

    /// Sets the duplicate-record policy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` once the database is open.
    pub fn set_duplicate_policy(&self, policy: DuplicatePolicy) -> PoiResult<()> {
        self.inner.set_duplicate_policy(policy)
    }

    /// Loads a module, letting it register its plugins.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` once the database is open, or whatever the
    /// module's `load` returns.
    pub fn load_module<T: PoiModule + 'static>(&self, module: T) -> PoiResult<()> {
        self.inner.ensure_not_configured("Cannot load module after initialization")?;
        let registrar = PluginRegistrar::new(self.clone());
        module.load(&registrar)
    }

    /// The geo indexer registered by a loaded module, if any.
    pub fn geo_indexer(&self) -> Option<GeoIndexer> {
        self.inner.geo_indexer.read().clone()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.configured.load(Ordering::Relaxed)
    }

    pub(crate) fn set_geo_indexer(&self, geo_indexer: GeoIndexer) {
        *self.inner.geo_indexer.write() = Some(geo_indexer);
    }

    /// Freezes the configuration. Called when the database opens.
    pub(crate) fn initialize(&self) -> PoiResult<()> {
        if self.inner.configured.swap(true, Ordering::Relaxed) {
            log::error!("Configuration is already initialized");
            return Err(PoiError::new(
                "Configuration is already initialized",
                ErrorKind::InvalidOperation,
            ));
        }
        log::debug!(
            "Configuration frozen: duplicate policy {}, geo index {}",
            self.duplicate_policy(),
            if self.geo_indexer().is_some() { "registered" } else { "absent" }
        );
        Ok(())
    }
}

struct PoiDbConfigInner {
    configured: AtomicBool,
    duplicate_policy: RwLock<DuplicatePolicy>,
    geo_indexer: RwLock<Option<GeoIndexer>>,
}

impl PoiDbConfigInner {
    fn new() -> Self {
        PoiDbConfigInner {
            configured: AtomicBool::from(false),
            duplicate_policy: RwLock::new(DuplicatePolicy::default()),
            geo_indexer: RwLock::new(None),
        }
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        *self.duplicate_policy.read()
    }

    fn set_duplicate_policy(&self, policy: DuplicatePolicy) -> PoiResult<()> {
        self.ensure_not_configured("Duplicate policy cannot be changed after initialization")?;
        *self.duplicate_policy.write() = policy;
        Ok(())
    }

    fn ensure_not_configured(&self, message: &str) -> PoiResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("{}", message);
            return Err(PoiError::new(message, ErrorKind::InvalidOperation));
        }
        Ok(())
    }
}
