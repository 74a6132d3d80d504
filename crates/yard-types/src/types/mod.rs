//! The closed set of type variants a constraint is built from.
//!
//! Every variant can check a value against itself and render itself back
//! into annotation syntax through [`fmt::Display`].

mod collection;
mod hash;
mod kind;
mod scalar;

use std::borrow::Borrow;
use std::fmt;

use crate::errors::CheckError;
use crate::object_model::ObjectModel;
use crate::value::Value;

pub(crate) use collection::DEFAULT_COLLECTION;
pub use collection::{CollectionType, TupleType};
pub(crate) use hash::DEFAULT_HASH;
pub use hash::HashType;
pub use kind::KindType;
pub use scalar::{DuckType, LITERAL_NAMES, LiteralType};

/// Leading character of a duck-typed name such as `#to_s`.
pub const DUCK_MARKER: char = '#';

/// One alternative within a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `SomeClass` or `Some::Module`.
    Kind(KindType),
    /// `#message`.
    Duck(DuckType),
    /// `true`, `false`, `nil`, `void` or `self`.
    Literal(LiteralType),
    /// `Kind<A, B>`.
    Collection(CollectionType),
    /// `(A, B)` or `Kind(A, B)`.
    Tuple(TupleType),
    /// `{K => V}`, `Kind{K => V}` or `Hash<K, V>`.
    Hash(HashType),
}

impl Type {
    /// Promote a bare name to the variant its spelling implies.
    ///
    /// # Examples
    /// ```
    /// use yard_types::Type;
    /// assert!(matches!(Type::for_name("#each"), Type::Duck(_)));
    /// assert!(matches!(Type::for_name("nil"), Type::Literal(_)));
    /// assert!(matches!(Type::for_name("Nil"), Type::Kind(_)));
    /// ```
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        if name.starts_with(DUCK_MARKER) {
            Self::Duck(DuckType::new(name))
        } else if LiteralType::is_literal_name(name) {
            Self::Literal(LiteralType::new(name))
        } else {
            Self::Kind(KindType::new(name))
        }
    }

    /// The variant's name; unnamed tuples have none.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Kind(kind) => Some(kind.name()),
            Self::Duck(duck) => Some(duck.name()),
            Self::Literal(literal) => Some(literal.name()),
            Self::Collection(collection) => Some(collection.name()),
            Self::Tuple(tuple) => tuple.name(),
            Self::Hash(hash) => Some(hash.name()),
        }
    }

    /// Check whether `value` satisfies this variant.
    ///
    /// # Errors
    /// Returns [`CheckError`] when a kind name cannot be resolved to a class
    /// or module, or a literal carries an unsupported name.
    pub fn check(&self, value: &Value, model: &dyn ObjectModel) -> Result<bool, CheckError> {
        match self {
            Self::Kind(kind) => kind.check(value, model),
            Self::Duck(duck) => Ok(duck.check(value, model)),
            Self::Literal(literal) => literal.check(value),
            Self::Collection(collection) => collection.check(value, model),
            Self::Tuple(tuple) => tuple.check(value, model),
            Self::Hash(hash) => hash.check(value, model),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner: &dyn fmt::Display = match self {
            Self::Kind(kind) => kind,
            Self::Duck(duck) => duck,
            Self::Literal(literal) => literal,
            Self::Collection(collection) => collection,
            Self::Tuple(tuple) => tuple,
            Self::Hash(hash) => hash,
        };
        fmt::Display::fmt(inner, f)
    }
}

/// True when any of `types` accepts `value`, evaluated in order.
pub(crate) fn any_accepts(
    types: &[Type],
    value: &Value,
    model: &dyn ObjectModel,
) -> Result<bool, CheckError> {
    for ty in types {
        if ty.check(value, model)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// True when every item is accepted by at least one of `types`.
pub(crate) fn all_accepted<I>(
    items: I,
    types: &[Type],
    model: &dyn ObjectModel,
) -> Result<bool, CheckError>
where
    I: IntoIterator,
    I::Item: Borrow<Value>,
{
    for item in items {
        if !any_accepts(types, item.borrow(), model)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}
