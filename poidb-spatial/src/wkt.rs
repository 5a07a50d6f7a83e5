//! Well-known-text codec for point geometries.
//!
//! Only `POINT (x y)` is supported, with `x` the longitude and `y` the
//! latitude. `POINT EMPTY` and other geometry types are rejected.

use poidb::common::Coordinate;

use crate::{SpatialError, SpatialResult};

/// Formats a coordinate as `POINT (lon lat)`.
pub fn format_point(coordinate: &Coordinate) -> String {
    format!("POINT ({} {})", coordinate.longitude, coordinate.latitude)
}

/// Parses `POINT (lon lat)` into a validated coordinate.
///
/// The keyword is case-insensitive and whitespace around the parentheses
/// is optional.
pub fn parse_point(wkt: &str) -> SpatialResult<Coordinate> {
    let wkt = wkt.trim();
    let body = match wkt.get(..5) {
        Some(keyword) if keyword.eq_ignore_ascii_case("POINT") => &wkt[5..],
        _ => {
            return Err(SpatialError::MalformedWkt(format!(
                "Expected a POINT geometry, got: {}",
                wkt
            )))
        }
    };

    let inner = body
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| {
            SpatialError::MalformedWkt(format!("POINT coordinates must be parenthesised: {}", wkt))
        })?;

    let parts: Vec<&str> = inner.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(SpatialError::MalformedWkt(format!(
            "POINT must have exactly one x y pair: {}",
            wkt
        )));
    }

    let longitude: f64 = parts[0].parse().map_err(|_| {
        SpatialError::MalformedWkt(format!("Invalid x coordinate: {}", parts[0]))
    })?;
    let latitude: f64 = parts[1].parse().map_err(|_| {
        SpatialError::MalformedWkt(format!("Invalid y coordinate: {}", parts[1]))
    })?;

    Ok(Coordinate::checked(longitude, latitude)?)
}
