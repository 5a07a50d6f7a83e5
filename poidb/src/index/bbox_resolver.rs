//! Rectangle queries on top of a circle-only geo index.
//!
//! The geo index answers radius queries only, so a bounding box is resolved
//! in two phases:
//!
//! 1. **Coarse circle**: query the circle circumscribing the rectangle. It
//!    contains the whole rectangle, so no true match is lost, but it also
//!    returns points in the four segments outside the rectangle's corners.
//! 2. **Exact filter**: keep only candidates whose coordinate lies inside the
//!    rectangle, borders included.

use std::collections::BTreeSet;

use super::GeoIndexer;
use crate::common::{km_per_degree_longitude, BoundingBox, Coordinate, KM_PER_DEGREE};
use crate::errors::PoiResult;
use crate::PoiId;

/// The circle circumscribing a bounding box, in the flat-earth metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircumscribedCircle {
    pub center: Coordinate,
    pub radius_km: f64,
}

impl CircumscribedCircle {
    pub fn of(bbox: &BoundingBox) -> Self {
        let center = bbox.center();
        let width_km = (bbox.max_lon() - bbox.min_lon()) * km_per_degree_longitude(center.latitude);
        let height_km = (bbox.max_lat() - bbox.min_lat()) * KM_PER_DEGREE;
        CircumscribedCircle {
            center,
            radius_km: (width_km / 2.0).hypot(height_km / 2.0),
        }
    }
}

/// Resolves bounding boxes against a [`GeoIndexer`].
#[derive(Clone)]
pub struct BoundingBoxResolver {
    geo_indexer: GeoIndexer,
}

impl BoundingBoxResolver {
    pub fn new(geo_indexer: GeoIndexer) -> Self {
        BoundingBoxResolver { geo_indexer }
    }

    /// Returns exactly the identifiers whose coordinate lies in `bbox`.
    pub fn resolve(&self, bbox: &BoundingBox) -> PoiResult<BTreeSet<PoiId>> {
        let circle = CircumscribedCircle::of(bbox);
        let candidates = self
            .geo_indexer
            .find_within_radius(&circle.center, circle.radius_km)?;
        let coarse = candidates.len();

        let ids: BTreeSet<PoiId> = candidates
            .into_iter()
            .filter(|(_, coordinate)| bbox.contains(coordinate))
            .map(|(id, _)| id)
            .collect();

        log::debug!(
            "Bounding box {} resolved via circle {} r={} km: {} candidates, {} inside",
            bbox,
            circle.center,
            circle.radius_km,
            coarse,
            ids.len()
        );
        Ok(ids)
    }
}
