//! Geographic primitives shared by the index components.
//!
//! Distances use a flat-earth approximation: one degree of latitude is
//! [`KM_PER_DEGREE`] kilometres and one degree of longitude is
//! `KM_PER_DEGREE * cos(latitude)` kilometres, evaluated at the query centre.
//! The radius query of every geo index and the bounding-box resolver both go
//! through [`flat_distance_km`], so the circle and the rectangle are measured
//! in the same space.
//!
//! ## Accuracy
//!
//! The approximation holds away from the poles and for spans small enough
//! that curvature is negligible (tens of kilometres). It is not a geodesic
//! model and does not wrap across the antimeridian.

use std::fmt::{self, Display};

use crate::errors::{ErrorKind, PoiError, PoiResult};

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Slack added to radius comparisons so points lying exactly on a circle
/// survive floating point rounding (one micrometre).
pub const DISTANCE_TOLERANCE_KM: f64 = 1e-9;

/// Kilometres per degree of longitude at the given latitude.
pub fn km_per_degree_longitude(latitude: f64) -> f64 {
    KM_PER_DEGREE * latitude.to_radians().cos().abs()
}

/// Flat-earth distance in kilometres between `center` and `point`, scaling
/// longitude by the centre latitude.
pub fn flat_distance_km(center: &Coordinate, point: &Coordinate) -> f64 {
    let dx = (point.longitude - center.longitude) * km_per_degree_longitude(center.latitude);
    let dy = (point.latitude - center.latitude) * KM_PER_DEGREE;
    dx.hypot(dy)
}

/// Returns true when `point` lies within `radius_km` of `center`, borders
/// included.
pub fn within_radius(center: &Coordinate, point: &Coordinate, radius_km: f64) -> bool {
    flat_distance_km(center, point) <= radius_km + DISTANCE_TOLERANCE_KM
}

/// A geographic position. `longitude` is the x axis and `latitude` the y axis,
/// matching the `(longitude, latitude)` order of WKT points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate without validation.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Creates a coordinate, rejecting NaN and values outside
    /// `[-180, 180]` x `[-90, 90]`.
    pub fn checked(longitude: f64, latitude: f64) -> PoiResult<Self> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        Ok(Self::new(longitude, latitude))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

pub fn validate_latitude(latitude: f64) -> PoiResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        log::error!("Latitude out of range: {}", latitude);
        return Err(PoiError::new(
            &format!("Latitude must be between -90 and 90 degrees, got: {}", latitude),
            ErrorKind::InvalidCoordinate,
        ));
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> PoiResult<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        log::error!("Longitude out of range: {}", longitude);
        return Err(PoiError::new(
            &format!("Longitude must be between -180 and 180 degrees, got: {}", longitude),
            ErrorKind::InvalidCoordinate,
        ));
    }
    Ok(())
}

/// An axis-aligned latitude/longitude rectangle with inclusive borders.
///
/// The corners handed to [`BoundingBox::from_corners`] may come in any order;
/// they are normalised into min/max pairs.
///
/// # Examples
///
/// ```rust
/// use poidb::common::{BoundingBox, Coordinate};
///
/// let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90").unwrap();
/// assert_eq!(bbox.min_lat(), 39.90);
/// assert!(bbox.contains(&Coordinate::new(-74.0, 40.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl BoundingBox {
    /// Builds a box from two opposite corners given as `(lat, lon)` pairs.
    pub fn from_corners(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> PoiResult<Self> {
        validate_latitude(lat_a)?;
        validate_latitude(lat_b)?;
        validate_longitude(lon_a)?;
        validate_longitude(lon_b)?;

        Ok(BoundingBox {
            min_lat: lat_a.min(lat_b),
            max_lat: lat_a.max(lat_b),
            min_lon: lon_a.min(lon_b),
            max_lon: lon_a.max(lon_b),
        })
    }

    /// Parses `topLeftLat,topLeftLon,bottomRightLat,bottomRightLon`.
    ///
    /// Anything other than exactly four finite numbers fails with
    /// [`ErrorKind::MalformedBoundingBox`].
    pub fn parse(text: &str) -> PoiResult<Self> {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            log::error!("Bounding box needs 4 values, got {}: {}", parts.len(), text);
            return Err(PoiError::new(
                &format!(
                    "Bounding box must contain exactly 4 comma separated values, got {}",
                    parts.len()
                ),
                ErrorKind::MalformedBoundingBox,
            ));
        }

        let mut values = [0f64; 4];
        for (slot, part) in values.iter_mut().zip(parts.iter()) {
            let value = part.parse::<f64>().map_err(|e| {
                PoiError::new_with_cause(
                    &format!("Invalid bounding box value '{}'", part),
                    ErrorKind::MalformedBoundingBox,
                    e.into(),
                )
            })?;
            if !value.is_finite() {
                return Err(PoiError::new(
                    &format!("Bounding box value '{}' is not a finite number", part),
                    ErrorKind::MalformedBoundingBox,
                ));
            }
            *slot = value;
        }

        Self::from_corners(values[0], values[1], values[2], values[3])
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Returns the centre of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Checks if this box contains a point, borders included.
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.min_lat <= point.latitude
            && point.latitude <= self.max_lat
            && self.min_lon <= point.longitude
            && point.longitude <= self.max_lon
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.max_lat, self.min_lon, self.min_lat, self.max_lon
        )
    }
}
