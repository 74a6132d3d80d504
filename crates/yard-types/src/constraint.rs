//! The result of parsing an annotation: an ordered set of alternatives.

use std::fmt;
use std::str::FromStr;

use crate::errors::{CheckError, SyntaxError};
use crate::object_model::ObjectModel;
use crate::types::{Type, write_list};
use crate::value::Value;

/// Alternatives accepted by one type annotation.
///
/// A value satisfies the constraint when any alternative accepts it. The
/// declaration order only decides which alternative is tried first.
///
/// # Examples
/// ```
/// use yard_types::{Constraint, Registry, Value};
///
/// let constraint: Constraint = "String, Symbol".parse().expect("valid annotation");
/// let registry = Registry::shared();
/// assert_eq!(constraint.check(&Value::symbol("a"), registry), Ok(true));
/// assert_eq!(constraint.check(&Value::from(vec![]), registry), Ok(false));
/// assert_eq!(constraint.to_string(), "String, Symbol");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    accepted_types: Vec<Type>,
}

impl Constraint {
    pub(crate) const fn new(accepted_types: Vec<Type>) -> Self {
        Self { accepted_types }
    }

    /// All alternatives in declaration order.
    #[must_use]
    pub fn accepted_types(&self) -> &[Type] {
        &self.accepted_types
    }

    /// The alternative at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Type> {
        self.accepted_types.get(index)
    }

    /// The first alternative.
    #[must_use]
    pub fn first(&self) -> Option<&Type> {
        self.accepted_types.first()
    }

    /// Number of alternatives; at least one for a parsed constraint.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accepted_types.len()
    }

    /// Whether there are no alternatives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted_types.is_empty()
    }

    /// Iterate over the alternatives.
    pub fn iter(&self) -> std::slice::Iter<'_, Type> {
        self.accepted_types.iter()
    }

    /// The first alternative that accepts `value`, if any.
    ///
    /// # Errors
    /// Returns [`CheckError`] when an alternative tried before a match cannot
    /// be evaluated.
    pub fn matching_type(
        &self,
        value: &Value,
        model: &dyn ObjectModel,
    ) -> Result<Option<&Type>, CheckError> {
        for ty in &self.accepted_types {
            if ty.check(value, model)? {
                return Ok(Some(ty));
            }
        }
        Ok(None)
    }

    /// Whether any alternative accepts `value`.
    ///
    /// # Errors
    /// See [`matching_type`](Self::matching_type).
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> Result<bool, CheckError> {
        self.matching_type(value, model).map(|found| found.is_some())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.accepted_types)
    }
}

impl FromStr for Constraint {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl<'a> IntoIterator for &'a Constraint {
    type Item = &'a Type;
    type IntoIter = std::slice::Iter<'a, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::Registry;
    use crate::types::KindType;

    fn constraint(names: &[&str]) -> Constraint {
        Constraint::new(names.iter().map(|name| Type::for_name(name)).collect())
    }

    #[test]
    fn joins_alternatives_for_display() {
        assert_eq!(constraint(&["true", "false", "nil"]).to_string(), "true, false, nil");
    }

    #[test]
    fn reports_first_matching_alternative() {
        let constraint = constraint(&["#to_i", "Integer", "void"]);
        let matched = constraint.matching_type(&Value::from(1), Registry::shared());
        assert_eq!(matched, Ok(constraint.first()));
    }

    #[test]
    fn short_circuits_before_unresolvable_alternatives() {
        let constraint = constraint(&["String", "Undefined"]);
        assert_eq!(constraint.check(&Value::from("x"), Registry::shared()), Ok(true));
        assert_eq!(
            constraint.check(&Value::Nil, Registry::shared()),
            Err(CheckError::NameLookup {
                name: "Undefined".into()
            })
        );
    }

    #[test]
    fn exposes_alternatives_positionally() {
        let constraint = constraint(&["A", "#b"]);
        assert_eq!(constraint.len(), 2);
        assert!(!constraint.is_empty());
        assert_eq!(constraint.get(0), Some(&Type::Kind(KindType::new("A"))));
        assert_eq!(constraint.get(2), None);
        assert_eq!((&constraint).into_iter().count(), 2);
    }
}
