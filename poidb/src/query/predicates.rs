use itertools::Itertools;
use std::fmt::{self, Display};

use crate::common::BoundingBox;
use crate::PoiId;

/// The predicates a query may combine.
///
/// Every field is optional; a query matches the records satisfying all of
/// the supplied ones. Which combinations are legal is decided by
/// [`QueryPlanner::plan`](super::QueryPlanner::plan).
///
/// # Examples
///
/// ```rust
/// use poidb::common::BoundingBox;
/// use poidb::query::Predicates;
///
/// let predicates = Predicates::new()
///     .amenity("cafe")
///     .bbox(BoundingBox::parse("40.10,-74.10,39.90,-73.90").unwrap());
///
/// assert_eq!(predicates.amenity.as_deref(), Some("cafe"));
/// assert!(!predicates.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates {
    pub id: Option<PoiId>,
    pub amenity: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub phone: Option<String>,
    pub bbox: Option<BoundingBox>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: PoiId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the amenity; an empty string leaves the predicate unset.
    pub fn amenity(mut self, amenity: &str) -> Self {
        self.amenity = non_empty(amenity);
        self
    }

    /// Sets the name; an empty string leaves the predicate unset.
    pub fn name(mut self, name: &str) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Sets the phone; an empty string leaves the predicate unset.
    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = non_empty(phone);
        self
    }

    pub fn bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// True when no predicate at all is set, radius included.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.amenity.is_none()
            && self.name.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.radius_km.is_none()
            && self.phone.is_none()
            && self.bbox.is_none()
    }
}

impl Display for Predicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id={}", id));
        }
        if let Some(amenity) = &self.amenity {
            parts.push(format!("amenity={}", amenity));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name={}", name));
        }
        if let Some(latitude) = self.latitude {
            parts.push(format!("latitude={}", latitude));
        }
        if let Some(longitude) = self.longitude {
            parts.push(format!("longitude={}", longitude));
        }
        if let Some(radius_km) = self.radius_km {
            parts.push(format!("radius_km={}", radius_km));
        }
        if let Some(phone) = &self.phone {
            parts.push(format!("phone={}", phone));
        }
        if let Some(bbox) = &self.bbox {
            parts.push(format!("bbox={}", bbox));
        }
        write!(f, "{{{}}}", parts.iter().join(", "))
    }
}

/// Identifies a single predicate, in diagnostics and early-exit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Id,
    Amenity,
    Name,
    /// latitude + longitude + radius
    Radius,
    Latitude,
    Longitude,
    Phone,
    BoundingBox,
}

impl Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateKind::Id => write!(f, "id"),
            PredicateKind::Amenity => write!(f, "amenity"),
            PredicateKind::Name => write!(f, "name"),
            PredicateKind::Radius => write!(f, "radius"),
            PredicateKind::Latitude => write!(f, "latitude"),
            PredicateKind::Longitude => write!(f, "longitude"),
            PredicateKind::Phone => write!(f, "phone"),
            PredicateKind::BoundingBox => write!(f, "bbox"),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
