//! Duck and literal constraints.

use std::fmt;

use super::DUCK_MARKER;
use crate::errors::CheckError;
use crate::object_model::ObjectModel;
use crate::value::Value;

/// Names recognised as literals rather than kinds.
pub const LITERAL_NAMES: [&str; 5] = ["true", "false", "nil", "void", "self"];

/// Duck constraint, written `#message`: the value must respond to `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuckType {
    name: String,
    message: String,
}

impl DuckType {
    /// Create a duck constraint from its annotation spelling, e.g. `#to_s`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let message = name.strip_prefix(DUCK_MARKER).unwrap_or(&name).to_string();
        Self { name, message }
    }

    /// Annotation spelling, including the leading marker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Method the value must respond to, without the leading marker.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check that `value` responds to [`message`](Self::message).
    #[must_use]
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> bool {
        model.responds_to(value, &self.message)
    }
}

impl fmt::Display for DuckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Literal constraint: `true`, `false`, `nil`, `void` or `self`.
///
/// `void` and `self` are placeholders in documentation and accept any value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralType {
    name: String,
}

impl LiteralType {
    /// Create a literal constraint.
    ///
    /// The name is not validated here; checking a literal outside
    /// [`LITERAL_NAMES`] fails with [`CheckError::UnsupportedLiteral`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether `name` belongs to the literal vocabulary.
    #[must_use]
    pub fn is_literal_name(name: &str) -> bool {
        LITERAL_NAMES.contains(&name)
    }

    /// The literal's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check `value` against the literal.
    ///
    /// # Errors
    /// Returns [`CheckError::UnsupportedLiteral`] for names outside the
    /// literal vocabulary.
    pub fn check(&self, value: &Value) -> Result<bool, CheckError> {
        match self.name.as_str() {
            "true" => Ok(matches!(value, Value::Bool(true))),
            "false" => Ok(matches!(value, Value::Bool(false))),
            "nil" => Ok(matches!(value, Value::Nil)),
            "self" | "void" => Ok(true),
            _ => Err(CheckError::UnsupportedLiteral {
                name: self.name.clone(),
            }),
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::Registry;
    use rstest::rstest;

    #[test]
    fn duck_message_drops_marker() {
        let duck = DuckType::new("#to_date");
        assert_eq!(duck.name(), "#to_date");
        assert_eq!(duck.message(), "to_date");
    }

    #[test]
    fn duck_checks_method_existence_only() {
        let duck = DuckType::new("#reverse");
        assert!(duck.check(&Value::from("foo"), Registry::shared()));
        assert!(!duck.check(&Value::from(1), Registry::shared()));
    }

    #[rstest]
    #[case("true", Value::Bool(true), true)]
    #[case("true", Value::Bool(false), false)]
    #[case("true", Value::Nil, false)]
    #[case("false", Value::Bool(false), true)]
    #[case("false", Value::Nil, false)]
    #[case("nil", Value::Nil, true)]
    #[case("nil", Value::Bool(false), false)]
    #[case("void", Value::from(vec![Value::from("anything")]), true)]
    #[case("self", Value::Nil, true)]
    fn literal_checks(#[case] name: &str, #[case] value: Value, #[case] expected: bool) {
        assert_eq!(LiteralType::new(name).check(&value), Ok(expected));
    }

    #[test]
    fn unsupported_literal_is_reported_at_check_time() {
        let literal = LiteralType::new("zero");
        let Err(err) = literal.check(&Value::from(0)) else {
            panic!("expected unsupported literal error");
        };
        assert!(err.to_string().contains("zero"));
    }
}
