//! Parse YARD type annotations and check runtime values against them.
//!
//! An annotation such as `Array<String, #to_s>, nil` parses into a
//! [`Constraint`]: a list of alternative [`Type`]s. Checking a [`Value`]
//! against it needs an [`ObjectModel`] that knows which classes exist and
//! what methods they define; [`Registry`] provides one with Ruby's core
//! classes.
//!
//! ```
//! use yard_types::{Value, check, parse};
//!
//! let constraint = parse("{Symbol => (String, Fixnum)}").expect("valid annotation");
//! assert_eq!(constraint.to_string(), "{Symbol => (String, Fixnum)}");
//!
//! let row = Value::hash([(
//!     Value::symbol("id"),
//!     Value::from(vec![Value::from("a"), Value::from(1)]),
//! )]);
//! assert!(check("{Symbol => (String, Fixnum)}", &row).expect("checkable").is_success());
//! ```

mod capability;
pub mod config;
mod constraint;
mod errors;
mod object_model;
mod parser;
mod types;
mod value;

pub use capability::{Columns, KeyValues, Positional, ValueIter};
pub use constraint::Constraint;
pub use errors::{CheckError, Error, SyntaxError};
pub use object_model::{Entity, KindFlavour, KindHandle, ObjectModel, Registry, Resolution};
pub use parser::ParseOptions;
pub use types::{
    CollectionType, DUCK_MARKER, DuckType, HashType, KindType, LITERAL_NAMES, LiteralType,
    TupleType, Type,
};
pub use value::{Elements, Object, Shape, Value};

/// Outcome of [`check`]: whether the value satisfied the annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Some alternative accepted the value.
    Success,
    /// No alternative accepted the value.
    Failure,
}

impl CheckOutcome {
    /// Whether the check passed.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<bool> for CheckOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Parse a type annotation.
///
/// Parsing is permissive: any closing bracket ends the innermost group and
/// end of input closes whatever is still open. Use [`parse_with`] and
/// [`ParseOptions::strict`] to require matching pairs.
///
/// # Errors
/// Returns [`SyntaxError`] when the annotation is malformed.
///
/// # Examples
/// ```
/// use yard_types::parse;
/// assert_eq!(
///     parse("Hash<(#a, #b), Symbol>").map(|c| c.to_string()),
///     Ok("{(#a, #b) => Symbol}".to_string())
/// );
/// assert!(parse("A B").is_err());
/// ```
pub fn parse(text: &str) -> Result<Constraint, SyntaxError> {
    parse_with(text, ParseOptions::permissive())
}

/// Parse a type annotation with explicit options.
///
/// # Errors
/// Returns [`SyntaxError`] when the annotation is malformed.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Constraint, SyntaxError> {
    parser::parse_constraint(text, options)
}

/// Parse several annotations as one list of alternatives.
///
/// Documentation tags often list their types separately; they are joined
/// with `", "` before parsing.
///
/// # Errors
/// Returns [`SyntaxError`] when the joined annotation is malformed.
///
/// # Examples
/// ```
/// use yard_types::parse_all;
/// let constraint = parse_all(["String", "Array<String>"]).expect("valid annotations");
/// assert_eq!(constraint.len(), 2);
/// ```
pub fn parse_all<I, S>(parts: I) -> Result<Constraint, SyntaxError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    parse(&joined)
}

/// Parse `text` and check `value` against it using the core [`Registry`].
///
/// # Errors
/// Returns [`Error::Syntax`] for malformed annotations and [`Error::Check`]
/// when a kind name cannot be resolved.
pub fn check(text: &str, value: &Value) -> Result<CheckOutcome, Error> {
    check_with(text, value, Registry::shared())
}

/// Parse `text` and check `value` against it using `model`.
///
/// # Errors
/// Returns [`Error::Syntax`] for malformed annotations and [`Error::Check`]
/// when a kind name cannot be resolved.
pub fn check_with(
    text: &str,
    value: &Value,
    model: &dyn ObjectModel,
) -> Result<CheckOutcome, Error> {
    let constraint = parse(text)?;
    Ok(constraint.check(value, model)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_reflects_check_result() {
        assert!(CheckOutcome::from(true).is_success());
        assert!(!CheckOutcome::from(false).is_success());
    }

    #[test]
    fn check_surfaces_syntax_errors() {
        assert!(matches!(check("A B", &Value::Nil), Err(Error::Syntax(_))));
    }

    #[test]
    fn check_surfaces_lookup_errors() {
        assert!(matches!(
            check("ReversedString", &Value::from("gnirts")),
            Err(Error::Check(CheckError::NameLookup { .. }))
        ));
    }

    #[test]
    fn parse_all_joins_parts() {
        let constraint = parse_all(vec!["#to_s".to_string(), "nil".to_string()]);
        assert_eq!(constraint.map(|c| c.to_string()), Ok("#to_s, nil".to_string()));
    }
}
