//! Hash constraints.

use std::fmt;

use super::{Type, all_accepted, write_list};
use crate::errors::CheckError;
use crate::object_model::ObjectModel;
use crate::value::Value;

/// Kind assumed for `{K => V}` and the `Hash<K, V>` shorthand.
pub(crate) const DEFAULT_HASH: &str = "Hash";

/// Key/value constraint, written `{K => V}`, `Kind{K => V}` or `Hash<K, V>`.
///
/// Only the structure is checked: the value must enumerate its keys and its
/// values. The kind name is kept for rendering and never enforced. Keys and
/// values are checked independently of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashType {
    name: String,
    key_types: Vec<Type>,
    value_types: Vec<Type>,
}

impl HashType {
    /// Create a hash constraint.
    #[must_use]
    pub fn new(name: impl Into<String>, key_types: Vec<Type>, value_types: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            key_types,
            value_types,
        }
    }

    /// Informational kind name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acceptable key types.
    #[must_use]
    pub fn key_types(&self) -> &[Type] {
        &self.key_types
    }

    /// Acceptable value types.
    #[must_use]
    pub fn value_types(&self) -> &[Type] {
        &self.value_types
    }

    /// Check every key and every value of `value`.
    ///
    /// # Errors
    /// Propagates resolution failures from the key and value checks.
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> Result<bool, CheckError> {
        let Some(map) = value.as_key_values() else {
            return Ok(false);
        };
        Ok(all_accepted(map.keys(), &self.key_types, model)?
            && all_accepted(map.values(), &self.value_types, model)?)
    }
}

impl fmt::Display for HashType {
    /// Always renders the brace form; the `Hash<K, V>` shorthand is not
    /// preserved. Kind names other than `Hash` prefix the braces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name != DEFAULT_HASH {
            f.write_str(&self.name)?;
        }
        f.write_str("{")?;
        write_list(f, &self.key_types)?;
        f.write_str(" => ")?;
        write_list(f, &self.value_types)?;
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::Registry;
    use crate::value::Object;

    fn hash_of(keys: &str, values: &str) -> HashType {
        HashType::new(
            DEFAULT_HASH,
            vec![Type::for_name(keys)],
            vec![Type::for_name(values)],
        )
    }

    #[test]
    fn renders_brace_form() {
        assert_eq!(hash_of("String", "Symbol").to_string(), "{String => Symbol}");
        let named = HashType::new("Registry", vec![Type::for_name("#to_sym")], vec![]);
        assert_eq!(named.to_string(), "Registry{#to_sym => }");
    }

    #[test]
    fn checks_keys_and_values_independently() {
        let hash = hash_of("Fixnum", "String");
        let registry = Registry::shared();
        assert_eq!(hash.check(&Value::hash([(1, "foo"), (2, "bar")]), registry), Ok(true));
        assert_eq!(hash.check(&Value::hash([(1.0, "foo")]), registry), Ok(false));
        assert_eq!(
            hash.check(&Value::hash([(Value::from(1), Value::symbol("foo"))]), registry),
            Ok(false)
        );
    }

    #[test]
    fn kind_name_is_never_enforced() {
        let hash = hash_of("Fixnum", "String");
        let map = Value::from(Object::map(
            "MapType",
            vec![Value::from(1), Value::from(2)],
            vec![Value::from("three"), Value::from("four")],
        ));
        assert_eq!(hash.check(&map, Registry::shared()), Ok(true));
    }

    #[test]
    fn rejects_values_without_keys_and_values() {
        let hash = hash_of("Fixnum", "String");
        assert_eq!(
            hash.check(&Value::from(vec![Value::from(1)]), Registry::shared()),
            Ok(false)
        );
    }
}
