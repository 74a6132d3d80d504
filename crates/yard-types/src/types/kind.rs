//! Kind constraints: the value must be a kind of a named class or module.

use std::fmt;
use std::sync::OnceLock;

use crate::errors::CheckError;
use crate::object_model::{Entity, KindHandle, ObjectModel, Resolution};
use crate::value::Value;

/// Pseudo-class commonly used to mean `true, false`.
pub(crate) const BOOLEAN: &str = "Boolean";

/// Kind constraint, written `SomeClass` or `Some::Module`.
///
/// The name is resolved lazily on the first check and the resulting handle
/// is cached for the lifetime of the instance.
#[derive(Debug, Clone)]
pub struct KindType {
    name: String,
    constant: OnceLock<KindHandle>,
}

// Equality is by name only; the cached handle is derived state.
impl PartialEq for KindType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for KindType {}

impl KindType {
    /// Create a kind constraint for the constant path `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constant: OnceLock::new(),
        }
    }

    /// The constant path as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the name to a class or module, caching the result.
    ///
    /// # Errors
    /// Returns [`CheckError::NameLookup`] when nothing is defined under the
    /// name and [`CheckError::KindMismatch`] when the constant is not a class
    /// or module.
    ///
    /// # Notes
    /// - The first successful resolution is cached, so later calls ignore
    ///   `model`.
    /// - Concurrent callers may race to resolve the name; only the first
    ///   value is kept.
    pub fn constant(&self, model: &dyn ObjectModel) -> Result<&KindHandle, CheckError> {
        if let Some(handle) = self.constant.get() {
            return Ok(handle);
        }
        let handle = match model.resolve(&self.name) {
            Resolution::Found(Entity::Kind(handle)) => handle,
            Resolution::Found(Entity::Constant { class }) => {
                return Err(CheckError::KindMismatch {
                    name: self.name.clone(),
                    class,
                });
            }
            Resolution::NotFound => {
                return Err(CheckError::NameLookup {
                    name: self.name.clone(),
                });
            }
        };
        log::debug!("resolved kind '{}' to {handle}", self.name);
        Ok(self.constant.get_or_init(|| handle))
    }

    /// Check that `value` is a kind of the named class or module.
    ///
    /// `Boolean` accepts exactly `true` and `false` without consulting the
    /// object model.
    ///
    /// # Errors
    /// Propagates resolution failures from [`constant`](Self::constant).
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> Result<bool, CheckError> {
        if self.name == BOOLEAN {
            return Ok(matches!(value, Value::Bool(_)));
        }
        let kind = self.constant(model)?;
        Ok(model.is_kind_of(value, kind))
    }
}

impl fmt::Display for KindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
