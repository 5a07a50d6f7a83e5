//! In-memory R-tree implementation of the poidb geo index.
//!
//! ## Two-Phase Radius Query
//!
//! 1. **Envelope search**: the R-tree returns every point inside the
//!    latitude/longitude rectangle that encloses the query circle. The
//!    rectangle is `radius / 111` degrees tall and `radius / (111 cos lat)`
//!    degrees wide, so it may hold points outside the circle.
//! 2. **Distance refinement**: each candidate is kept only if its flat-earth
//!    distance to the centre is within the radius.

use parking_lot::RwLock;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

use poidb::common::{
    km_per_degree_longitude, within_radius, Coordinate, DISTANCE_TOLERANCE_KM, KM_PER_DEGREE,
};
use poidb::errors::PoiResult;
use poidb::index::GeoIndexProvider;
use poidb::PoiId;

use crate::{SpatialError, SpatialResult};

/// Envelope slack in degrees, so points exactly on the circle are not lost
/// to rounding before the distance check.
const ENVELOPE_SLACK_DEG: f64 = 1e-9;

/// Below this many km per degree of longitude the envelope spans every
/// longitude.
const MIN_KM_PER_DEGREE_LONGITUDE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPoi {
    id: PoiId,
    coordinate: Coordinate,
}

impl RTreeObject for IndexedPoi {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.coordinate.longitude, self.coordinate.latitude])
    }
}

struct RTreeState {
    tree: RTree<IndexedPoi>,
    positions: HashMap<PoiId, Coordinate>,
}

/// A geo index backed by an [`rstar`] R-tree.
///
/// Each id is indexed at most once. Adding an id again at the same
/// coordinate is a no-op; adding it at a different coordinate fails, since
/// points are never moved or removed.
///
/// Reads run concurrently; an add takes the index exclusively.
pub struct RTreeGeoIndex {
    state: RwLock<RTreeState>,
}

impl Default for RTreeGeoIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RTreeGeoIndex {
    pub fn new() -> Self {
        RTreeGeoIndex {
            state: RwLock::new(RTreeState {
                tree: RTree::new(),
                positions: HashMap::new(),
            }),
        }
    }

    /// Builds an index from a batch of points with rstar's bulk loading,
    /// which packs the tree better than repeated inserts.
    pub fn bulk_load<I>(points: I) -> SpatialResult<Self>
    where
        I: IntoIterator<Item = (PoiId, Coordinate)>,
    {
        let mut positions = HashMap::new();
        let mut entries = Vec::new();
        for (id, coordinate) in points {
            validate(&coordinate)?;
            match positions.get(&id) {
                Some(existing) if *existing == coordinate => continue,
                Some(existing) => return Err(conflict(id, existing, &coordinate)),
                None => {
                    positions.insert(id, coordinate);
                    entries.push(IndexedPoi { id, coordinate });
                }
            }
        }

        log::debug!("Bulk loaded {} points into R-tree", entries.len());
        Ok(RTreeGeoIndex {
            state: RwLock::new(RTreeState {
                tree: RTree::bulk_load(entries),
                positions,
            }),
        })
    }

    /// Returns the coordinate `id` is indexed at.
    pub fn position(&self, id: PoiId) -> Option<Coordinate> {
        self.state.read().positions.get(&id).copied()
    }

    fn insert(&self, id: PoiId, coordinate: Coordinate) -> SpatialResult<()> {
        validate(&coordinate)?;

        let mut state = self.state.write();
        match state.positions.get(&id) {
            Some(existing) if *existing == coordinate => Ok(()),
            Some(existing) => {
                log::error!("POI {} is already indexed at {}", id, existing);
                Err(conflict(id, existing, &coordinate))
            }
            None => {
                state.positions.insert(id, coordinate);
                state.tree.insert(IndexedPoi { id, coordinate });
                log::debug!("Indexed POI {} at {}", id, coordinate);
                Ok(())
            }
        }
    }

    fn within(&self, center: &Coordinate, radius_km: f64) -> SpatialResult<Vec<(PoiId, Coordinate)>> {
        validate(center)?;
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(SpatialError::InvalidOperation(format!(
                "Radius must be a non-negative number of km, got: {}",
                radius_km
            )));
        }

        let envelope = search_envelope(center, radius_km);
        let state = self.state.read();
        let hits: Vec<(PoiId, Coordinate)> = state
            .tree
            .locate_in_envelope(&envelope)
            .filter(|entry| within_radius(center, &entry.coordinate, radius_km))
            .map(|entry| (entry.id, entry.coordinate))
            .collect();

        log::debug!(
            "Radius query {} km around {} matched {} points",
            radius_km,
            center,
            hits.len()
        );
        Ok(hits)
    }
}

impl GeoIndexProvider for RTreeGeoIndex {
    fn add(&self, id: PoiId, coordinate: Coordinate) -> PoiResult<()> {
        Ok(self.insert(id, coordinate)?)
    }

    fn find_within_radius(
        &self,
        center: &Coordinate,
        radius_km: f64,
    ) -> PoiResult<Vec<(PoiId, Coordinate)>> {
        Ok(self.within(center, radius_km)?)
    }

    fn size(&self) -> usize {
        self.state.read().tree.size()
    }
}

/// The rectangle enclosing every point within `radius_km` of `center`.
fn search_envelope(center: &Coordinate, radius_km: f64) -> AABB<[f64; 2]> {
    let reach_km = radius_km + DISTANCE_TOLERANCE_KM;
    let lat_span = reach_km / KM_PER_DEGREE + ENVELOPE_SLACK_DEG;

    let km_per_lon = km_per_degree_longitude(center.latitude);
    let (min_lon, max_lon) = if km_per_lon < MIN_KM_PER_DEGREE_LONGITUDE {
        (-180.0, 180.0)
    } else {
        let lon_span = reach_km / km_per_lon + ENVELOPE_SLACK_DEG;
        (center.longitude - lon_span, center.longitude + lon_span)
    };

    AABB::from_corners(
        [min_lon, center.latitude - lat_span],
        [max_lon, center.latitude + lat_span],
    )
}

fn validate(coordinate: &Coordinate) -> SpatialResult<()> {
    Coordinate::checked(coordinate.longitude, coordinate.latitude)?;
    Ok(())
}

fn conflict(id: PoiId, existing: &Coordinate, requested: &Coordinate) -> SpatialError {
    SpatialError::ConflictingPoint {
        id,
        existing: existing.to_string(),
        requested: requested.to_string(),
    }
}
