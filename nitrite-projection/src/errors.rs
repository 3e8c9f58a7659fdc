use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// What went wrong, independent of the message text.
///
/// Callers branch on the kind: a projection that refuses to remove records
/// reports [`ErrorKind::InvalidOperation`], a mapper that cannot build its
/// target reports [`ErrorKind::ObjectMappingError`], and so on.
///
/// ```rust
/// use nitrite_projection::errors::{ErrorKind, NitriteError, NitriteResult};
///
/// fn step() -> NitriteResult<()> {
///     Err(NitriteError::new("nothing left", ErrorKind::IteratorExhausted))
/// }
/// assert_eq!(step().unwrap_err().kind(), &ErrorKind::IteratorExhausted);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Rejected by contract, e.g. removing through a projected iterator or
    /// writing `_id` by hand.
    InvalidOperation,
    /// `try_next` on a pass with no records left.
    IteratorExhausted,
    /// A `NitriteId` value outside [10^18, 10^19).
    InvalidId,
    /// A document could not be turned into the target type or back.
    ObjectMappingError,
    /// Out-of-range array index in an embedded key.
    ValidationError,
    /// Embedded key with an empty segment.
    InvalidFieldName,
    /// Failure reading from a record source.
    IOError,
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ErrorKind::InvalidOperation => "Invalid operation",
            ErrorKind::IteratorExhausted => "Iterator exhausted",
            ErrorKind::InvalidId => "Invalid ID",
            ErrorKind::ObjectMappingError => "Object mapping error",
            ErrorKind::ValidationError => "Validation error",
            ErrorKind::InvalidFieldName => "Invalid field name",
            ErrorKind::IOError => "IO error",
            ErrorKind::InternalError => "Internal error",
        };
        f.write_str(text)
    }
}

/// Custom Nitrite error type.
///
/// `NitriteError` carries a message, an [`ErrorKind`] and an optional cause.
/// A backtrace is captured at construction for debugging.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::errors::{NitriteError, ErrorKind};
///
/// let cause = NitriteError::new("page fetch failed", ErrorKind::IOError);
/// let err = NitriteError::new_with_cause("cursor failed", ErrorKind::IOError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct NitriteError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<NitriteError>>,
    backtrace: Atomic<Backtrace>,
}

impl NitriteError {
    /// Creates a new `NitriteError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        NitriteError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `NitriteError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_type: ErrorKind, cause: NitriteError) -> Self {
        NitriteError {
            message: message.to_string(),
            error_kind: error_type,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&NitriteError> {
        self.cause.as_deref()
    }
}

impl Display for NitriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for NitriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for NitriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for projection operations.
///
/// `NitriteResult<T>` is shorthand for `Result<T, NitriteError>`.
pub type NitriteResult<T> = Result<T, NitriteError>;

#[cfg(feature = "serde")]
impl serde::de::Error for NitriteError {
    fn custom<T: Display>(msg: T) -> Self {
        NitriteError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for NitriteError {
    fn custom<T: Display>(msg: T) -> Self {
        NitriteError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

impl From<std::io::Error> for NitriteError {
    fn from(err: std::io::Error) -> Self {
        NitriteError::new(&format!("IO error: {}", err), ErrorKind::IOError)
    }
}

impl From<std::fmt::Error> for NitriteError {
    fn from(err: std::fmt::Error) -> Self {
        NitriteError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for NitriteError {
    fn from(msg: String) -> Self {
        NitriteError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for NitriteError {
    fn from(msg: &str) -> Self {
        NitriteError::new(msg, ErrorKind::InternalError)
    }
}
