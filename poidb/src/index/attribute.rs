use std::fmt::{self, Display};

/// A record attribute that carries a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Amenity,
    Name,
    Phone,
    Latitude,
    Longitude,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Amenity => "amenity",
            Attribute::Name => "name",
            Attribute::Phone => "phone",
            Attribute::Latitude => "latitude",
            Attribute::Longitude => "longitude",
        }
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Exact-value key for a floating point coordinate.
///
/// Keys compare by bit pattern after folding `-0.0` into `0.0`, so two
/// coordinates match only when they are the same `f64`. A latitude written
/// as `40.1` never matches one computed as `40.09999999999999`; this index
/// is an exact-equality index and inherits that fragility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey(u64);

impl CoordinateKey {
    pub fn new(value: f64) -> Self {
        // -0.0 == 0.0 but their bits differ
        let value = if value == 0.0 { 0.0 } else { value };
        CoordinateKey(value.to_bits())
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// A typed attribute value used as an index key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Text(String),
    Coordinate(CoordinateKey),
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => write!(f, "{}", text),
            AttributeValue::Coordinate(key) => write!(f, "{}", key.value()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Coordinate(CoordinateKey::new(value))
    }
}
