use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for poidb operations
///
/// Each kind describes one category of failure so callers can match on it
/// instead of parsing messages.
///
/// # Examples
///
/// ```rust
/// use poidb::errors::{ErrorKind, PoiError, PoiResult};
///
/// fn example() -> PoiResult<()> {
///     Err(PoiError::new("POI 7 not found", ErrorKind::NotFound))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::NotFound);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Query validation errors - raised before any index is touched
    /// Mutually exclusive predicates were supplied together
    InvalidPredicateCombination,
    /// The query carries no predicate at all
    NoPredicate,
    /// A supplied predicate produced no candidates
    PredicateNoMatch,
    /// The bounding box text does not hold exactly four coordinates
    MalformedBoundingBox,

    // Record errors
    /// The requested POI was not found
    NotFound,
    /// A POI with the same identifier is already stored
    DuplicateRecord,
    /// Latitude or longitude is NaN or outside its domain
    InvalidCoordinate,

    // Indexing errors
    /// No index is registered for the requested operation
    IndexNotFound,
    /// An index refused a write
    IndexingError,

    // Operation errors
    /// The operation is not allowed in the current state, e.g. after open
    InvalidOperation,

    // IO errors
    /// Read or write failure
    IOError,
    /// An input file does not exist
    FileNotFound,

    // Data encoding errors
    /// A value does not parse into the expected type
    InvalidDataType,
    /// Text could not be decoded, e.g. a malformed WKT point or CSV row
    EncodingError,

    // Extension errors - the String names the extension (e.g. "Spatial")
    /// Error from an extension module
    Extension(String),

    /// A broken internal invariant
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidPredicateCombination => write!(f, "Invalid predicate combination"),
            ErrorKind::NoPredicate => write!(f, "No predicate"),
            ErrorKind::PredicateNoMatch => write!(f, "Predicate has no match"),
            ErrorKind::MalformedBoundingBox => write!(f, "Malformed bounding box"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::DuplicateRecord => write!(f, "Duplicate record"),
            ErrorKind::InvalidCoordinate => write!(f, "Invalid coordinate"),
            ErrorKind::IndexNotFound => write!(f, "Index not found"),
            ErrorKind::IndexingError => write!(f, "Indexing error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::Extension(name) => write!(f, "{} error", name),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom poidb error type.
///
/// `PoiError` carries a message, an [`ErrorKind`] and an optional cause. The
/// backtrace is captured on construction and printed by the `Debug` impl when
/// there is no cause to show instead.
///
/// # Type alias
///
/// `PoiResult<T>` is `Result<T, PoiError>` and is used by every fallible
/// operation in the crate.
#[derive(Clone)]
pub struct PoiError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<PoiError>>,
    backtrace: Backtrace,
}

impl PoiError {
    /// Creates a new `PoiError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        PoiError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `PoiError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: PoiError) -> Self {
        PoiError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&PoiError> {
        self.cause.as_deref()
    }
}

impl Display for PoiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for PoiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for PoiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for poidb operations.
pub type PoiResult<T> = Result<T, PoiError>;

impl From<std::io::Error> for PoiError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            _ => ErrorKind::IOError,
        };
        PoiError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<std::num::ParseIntError> for PoiError {
    fn from(err: std::num::ParseIntError) -> Self {
        PoiError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<std::num::ParseFloatError> for PoiError {
    fn from(err: std::num::ParseFloatError) -> Self {
        PoiError::new(
            &format!("Float parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}
