//! Error types raised while parsing and checking type constraints.

use std::fmt;
use thiserror::Error;

/// Malformed type annotation.
///
/// Parsing never returns a partial constraint; the first problem found is
/// reported together with the byte offset at which it was detected.
///
/// # Examples
/// ```
/// use yard_types::SyntaxError;
/// let err = SyntaxError::new("expecting name, got ','", 0, Some(",".into()));
/// assert_eq!(err.token.as_deref(), Some(","));
/// assert_eq!(err.to_string(), "expecting name, got ',' at byte 0 (zero-based)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Byte offset into the annotation text.
    pub position: usize,
    /// Text of the offending token, when there was one.
    pub token: Option<String>,
}

impl SyntaxError {
    /// Create a new syntax error description.
    #[must_use]
    pub fn new(message: impl Into<String>, position: usize, token: Option<String>) -> Self {
        Self {
            message: message.into(),
            position,
            token,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {} (zero-based)", self.message, self.position)
    }
}

impl std::error::Error for SyntaxError {}

pub(crate) fn syntax_error(message: impl Into<String>, position: usize, token: &str) -> SyntaxError {
    let token = (!token.is_empty()).then(|| token.to_string());
    SyntaxError::new(message, position, token)
}

/// Failures raised while evaluating a constraint against a value.
///
/// These only surface from `check`, and only for variants that need to
/// consult the object model or that were built by hand with an invalid name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A kind name could not be resolved to any constant.
    #[error("uninitialized constant {name}")]
    NameLookup {
        /// Constant path as written in the annotation.
        name: String,
    },
    /// A kind name resolved to a constant that is not a class or module.
    #[error("class or module required; {name} is a {class}")]
    KindMismatch {
        /// Constant path as written in the annotation.
        name: String,
        /// Class of the value the constant refers to.
        class: String,
    },
    /// A literal variant carries a name outside the literal vocabulary.
    #[error("unsupported literal type: {name:?}")]
    UnsupportedLiteral {
        /// The rejected literal name.
        name: String,
    },
}

/// Error returned by the combined parse-and-check entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The annotation could not be parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The annotation parsed but could not be evaluated.
    #[error(transparent)]
    Check(#[from] CheckError),
}
