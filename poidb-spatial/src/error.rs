use poidb::errors::{ErrorKind, PoiError};
use poidb::PoiId;
use thiserror::Error;

/// Errors raised by the spatial index.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("POI {id} is already indexed at {existing}, cannot index it again at {requested}")]
    ConflictingPoint {
        id: PoiId,
        existing: String,
        requested: String,
    },

    #[error("Malformed WKT: {0}")]
    MalformedWkt(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<SpatialError> for PoiError {
    fn from(err: SpatialError) -> Self {
        match err {
            SpatialError::InvalidCoordinate(msg) => {
                PoiError::new(&msg, ErrorKind::InvalidCoordinate)
            }
            err @ SpatialError::ConflictingPoint { .. } => {
                PoiError::new(&err.to_string(), ErrorKind::IndexingError)
            }
            SpatialError::MalformedWkt(msg) => PoiError::new(&msg, ErrorKind::EncodingError),
            SpatialError::InvalidOperation(msg) => {
                PoiError::new(&msg, ErrorKind::Extension("Spatial".to_string()))
            }
        }
    }
}

impl From<PoiError> for SpatialError {
    fn from(err: PoiError) -> Self {
        match err.kind() {
            ErrorKind::InvalidCoordinate => {
                SpatialError::InvalidCoordinate(err.message().to_string())
            }
            ErrorKind::EncodingError | ErrorKind::InvalidDataType => {
                SpatialError::MalformedWkt(err.message().to_string())
            }
            _ => SpatialError::InvalidOperation(err.message().to_string()),
        }
    }
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;
