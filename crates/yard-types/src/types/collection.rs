//! Collection and tuple constraints.

use std::fmt;

use super::{KindType, Type, all_accepted, write_list};
use crate::errors::CheckError;
use crate::object_model::ObjectModel;
use crate::value::Value;

/// Kind used when a collection is written without one, as in `<String>`.
pub(crate) const DEFAULT_COLLECTION: &str = "Array";

/// Homogeneous collection, written `Kind<A, B>`.
///
/// The value must be a kind of `Kind` and every element must satisfy at
/// least one of the listed types, in any order and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionType {
    kind: KindType,
    types: Vec<Type>,
}

impl CollectionType {
    /// Create a collection constraint.
    #[must_use]
    pub fn new(name: impl Into<String>, types: Vec<Type>) -> Self {
        Self {
            kind: KindType::new(name),
            types,
        }
    }

    /// Name of the collection's kind.
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Acceptable element types.
    #[must_use]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Check the value's kind, then each of its elements.
    ///
    /// An empty collection passes vacuously; a value of the right kind that
    /// cannot be enumerated fails.
    ///
    /// # Errors
    /// Propagates resolution failures from the kind and element checks.
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> Result<bool, CheckError> {
        if !self.kind.check(value, model)? {
            return Ok(false);
        }
        match value.elements() {
            Some(elements) => all_accepted(elements, &self.types, model),
            None => Ok(false),
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.name())?;
        write_list(f, &self.types)?;
        f.write_str(">")
    }
}

/// Fixed-arity tuple, written `(A, B)` or `Kind(A, B)`.
///
/// Each position has exactly one type and the value's length must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleType {
    kind: Option<KindType>,
    types: Vec<Type>,
}

impl TupleType {
    /// Create a tuple constraint; `None` accepts a tuple of any kind.
    #[must_use]
    pub fn new(name: Option<&str>, types: Vec<Type>) -> Self {
        Self {
            kind: name.map(KindType::new),
            types,
        }
    }

    /// Name of the required kind, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.kind.as_ref().map(KindType::name)
    }

    /// Type expected at each position.
    #[must_use]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Check the optional kind, the arity and each position in turn.
    ///
    /// Any value with a positional view qualifies, including strings and
    /// hashes.
    ///
    /// # Errors
    /// Propagates resolution failures from the kind and positional checks.
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> Result<bool, CheckError> {
        if let Some(kind) = &self.kind {
            if !kind.check(value, model)? {
                return Ok(false);
            }
        }
        let Some(sequence) = value.as_positional() else {
            return Ok(false);
        };
        if sequence.len() != self.types.len() {
            return Ok(false);
        }
        for (index, ty) in self.types.iter().enumerate() {
            let Some(element) = sequence.at(index) else {
                return Ok(false);
            };
            if !ty.check(&element, model)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name().unwrap_or_default())?;
        write_list(f, &self.types)?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::Registry;
    use crate::value::Object;
    use rstest::rstest;

    fn kinds(names: &[&str]) -> Vec<Type> {
        names.iter().map(|name| Type::for_name(name)).collect()
    }

    #[test]
    fn renders_collection_with_its_kind() {
        let collection = CollectionType::new("Set", kinds(&["Date", "#to_date"]));
        assert_eq!(collection.to_string(), "Set<Date, #to_date>");
    }

    #[test]
    fn renders_unnamed_and_named_tuples() {
        assert_eq!(
            TupleType::new(None, kinds(&["String", "nil"])).to_string(),
            "(String, nil)"
        );
        assert_eq!(
            TupleType::new(Some("Pair"), kinds(&["A"])).to_string(),
            "Pair(A)"
        );
    }

    #[test]
    fn collection_requires_enumerable_value() {
        let collection = CollectionType::new("String", kinds(&["String"]));
        assert_eq!(collection.check(&Value::from("abc"), Registry::shared()), Ok(false));
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![Value::from("foo"), Value::from(vec![Value::from("a")])], true)]
    #[case(vec![Value::from(1)], false)]
    #[case(vec![Value::from("foo"), Value::from(1)], false)]
    fn collection_elements_must_each_match(#[case] items: Vec<Value>, #[case] expected: bool) {
        let collection = CollectionType::new("Array", kinds(&["#reverse"]));
        assert_eq!(
            collection.check(&Value::from(items), Registry::shared()),
            Ok(expected)
        );
    }

    #[test]
    fn tuple_pairs_positions_exactly() {
        let tuple = TupleType::new(None, kinds(&["String", "Fixnum", "#reverse"]));
        let registry = Registry::shared();
        let matching = Value::from(vec![Value::from("foo"), Value::from(1), Value::from(vec![])]);
        let swapped = Value::from(vec![Value::from(1), Value::from("foo"), Value::from(vec![])]);
        assert_eq!(tuple.check(&matching, registry), Ok(true));
        assert_eq!(tuple.check(&swapped, registry), Ok(false));
    }

    #[test]
    fn unnamed_tuple_accepts_list_shaped_objects() {
        let mut registry = Registry::core();
        registry.define_class("MyTuple", "Array");
        let tuple = TupleType::new(None, kinds(&["String", "Fixnum"]));
        let value = Value::from(Object::list(
            "MyTuple",
            vec![Value::from("hi"), Value::from(1)],
        ));
        assert_eq!(tuple.check(&value, &registry), Ok(true));
    }

    #[test]
    fn tuple_indexes_strings_by_character() {
        let tuple = TupleType::new(None, kinds(&["String", "String"]));
        let registry = Registry::shared();
        assert_eq!(tuple.check(&Value::from("ab"), registry), Ok(true));
        assert_eq!(tuple.check(&Value::from("abc"), registry), Ok(false));
    }

    #[test]
    fn tuple_rejects_values_without_positional_access() {
        let tuple = TupleType::new(None, Vec::new());
        assert_eq!(tuple.check(&Value::set(Vec::<Value>::new()), Registry::shared()), Ok(false));
    }
}
