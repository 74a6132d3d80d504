//! Injectable name resolution and class hierarchy queries.
//!
//! Kind constraints never consult a global namespace. Instead every check is
//! handed an [`ObjectModel`] that resolves constant paths and answers kind-of
//! and responds-to questions. [`Registry`] provides a ready-made model with
//! Ruby's core classes.

mod registry;

use std::fmt;

use crate::value::Value;

pub use registry::{KindFlavour, Registry};

/// Resolved class or module, identified by its canonical constant path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindHandle {
    path: String,
}

impl KindHandle {
    /// Wrap a canonical constant path such as `Comparable` or `Net::HTTP`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The canonical constant path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for KindHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// What a constant path refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A class or module.
    Kind(KindHandle),
    /// Any other constant, such as `Math::PI`.
    Constant {
        /// Class of the constant's value.
        class: String,
    },
}

/// Outcome of looking up a constant path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path names a constant.
    Found(Entity),
    /// Nothing is defined under the path.
    NotFound,
}

/// Runtime knowledge needed to evaluate kind and duck constraints.
pub trait ObjectModel {
    /// Look up a constant path as written in an annotation, including an
    /// optional leading `::`.
    fn resolve(&self, path: &str) -> Resolution;

    /// Whether `kind` appears among the ancestors of `value`'s class.
    fn is_kind_of(&self, value: &Value, kind: &KindHandle) -> bool;

    /// Whether `value` answers to the method `message`.
    fn responds_to(&self, value: &Value, message: &str) -> bool;
}
