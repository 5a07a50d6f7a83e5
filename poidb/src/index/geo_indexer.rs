use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;

use crate::common::Coordinate;
use crate::errors::PoiResult;
use crate::PoiId;

/// Provider trait for geospatial index implementations.
///
/// A geo index maps identifiers to coordinates and answers circular radius
/// queries only; rectangle queries are built on top by the
/// [`BoundingBoxResolver`](super::BoundingBoxResolver). Implementations must
/// measure distance with [`crate::common::flat_distance_km`] (or at least
/// [`crate::common::within_radius`]) so the resolver's circumscribing circle
/// covers the rectangle it was derived from.
pub trait GeoIndexProvider: Send + Sync {
    /// Adds `id` at `coordinate`.
    fn add(&self, id: PoiId, coordinate: Coordinate) -> PoiResult<()>;

    /// Returns every indexed point within `radius_km` of `center`, borders
    /// included, with its coordinate attached for post-filtering.
    fn find_within_radius(
        &self,
        center: &Coordinate,
        radius_km: f64,
    ) -> PoiResult<Vec<(PoiId, Coordinate)>>;

    /// Number of indexed points.
    fn size(&self) -> usize;
}

/// Cheap-clone wrapper around a [`GeoIndexProvider`].
///
/// Derefs to the provider so its methods can be called directly.
#[derive(Clone)]
pub struct GeoIndexer {
    inner: Arc<dyn GeoIndexProvider>,
}

impl GeoIndexer {
    pub fn new<T: GeoIndexProvider + 'static>(inner: T) -> Self {
        GeoIndexer {
            inner: Arc::new(inner),
        }
    }

    /// Identifiers within `radius_km` of `center`.
    pub fn radius_query(&self, center: &Coordinate, radius_km: f64) -> PoiResult<BTreeSet<PoiId>> {
        let hits = self.inner.find_within_radius(center, radius_km)?;
        Ok(hits.into_iter().map(|(id, _)| id).collect())
    }
}

impl Deref for GeoIndexer {
    type Target = Arc<dyn GeoIndexProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
