use std::fmt::{self, Display};

use crate::common::Coordinate;
use crate::errors::PoiResult;

/// Primary key of a point of interest.
pub type PoiId = u64;

/// A point-of-interest record.
///
/// Records are immutable once built. Empty strings given for `amenity`,
/// `name` or `phone` are stored as absent values, so they never reach the
/// secondary indexes.
///
/// # Examples
///
/// ```rust
/// use poidb::Poi;
///
/// let poi = Poi::new(1, 40.0, -74.0)
///     .unwrap()
///     .with_amenity("cafe")
///     .with_name("Corner Cafe");
///
/// assert_eq!(poi.amenity(), Some("cafe"));
/// assert_eq!(poi.phone(), None);
/// assert_eq!(poi.wkt(), "POINT (-74 40)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Poi {
    id: PoiId,
    amenity: Option<String>,
    name: Option<String>,
    latitude: f64,
    longitude: f64,
    phone: Option<String>,
}

impl Poi {
    /// Creates a record with only its identifier and location.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if latitude is outside `[-90, 90]`,
    /// longitude outside `[-180, 180]`, or either is NaN.
    pub fn new(id: PoiId, latitude: f64, longitude: f64) -> PoiResult<Self> {
        Coordinate::checked(longitude, latitude)?;
        Ok(Poi {
            id,
            amenity: None,
            name: None,
            latitude,
            longitude,
            phone: None,
        })
    }

    pub fn with_amenity(mut self, amenity: &str) -> Self {
        self.amenity = non_empty(amenity);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = non_empty(phone);
        self
    }

    pub fn id(&self) -> PoiId {
        self.id
    }

    pub fn amenity(&self) -> Option<&str> {
        self.amenity.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// The point geometry, `(longitude, latitude)`.
    pub fn geometry(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }

    /// The geometry as a well-known-text point.
    pub fn wkt(&self) -> String {
        format!("POINT ({} {})", self.longitude, self.latitude)
    }
}

impl Display for Poi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Poi(id={}, amenity={}, name={}, {})",
            self.id,
            self.amenity.as_deref().unwrap_or(""),
            self.name.as_deref().unwrap_or(""),
            self.wkt()
        )
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
