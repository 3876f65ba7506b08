//! Error types for pdfcolor

use thiserror::Error;

/// Result type for pdfcolor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or evaluating color spaces
///
/// Errors fall into two groups. Parse errors mean the document is malformed
/// and are never retried. Invalid-argument errors mean a caller broke a
/// contract (wrong component count, index out of range, unknown device kind).
/// A descriptor that simply cannot be found is not an error: the resolver
/// returns `None` for it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed color space descriptor
    #[error("Color space parse error: {0}")]
    Parse(String),

    /// Tagged descriptor with a tag outside the known families
    #[error("Unknown color space: {tag} with {argument}")]
    UnknownColorSpace { tag: String, argument: String },

    /// Embedded ICC profile could not be parsed
    #[error("Profile parse error: {0}")]
    Profile(String),

    /// Transfer function could not be built or evaluated
    #[error("Function error: {0}")]
    Function(String),

    /// Caller contract violation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Component slice length does not match the model arity
    #[error("Component count mismatch: expected {expected}, got {actual}")]
    ComponentCount { expected: usize, actual: usize },
}

impl Error {
    /// Whether this error reflects a malformed document
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Parse(_)
                | Error::UnknownColorSpace { .. }
                | Error::Profile(_)
                | Error::Function(_)
        )
    }

    /// Whether this error reflects a caller contract violation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::ComponentCount { .. })
    }

    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
