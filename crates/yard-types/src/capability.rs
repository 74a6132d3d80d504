//! Structural capabilities a value can offer to container checks.
//!
//! Tuple constraints need positional access and a length; hash constraints
//! need to enumerate keys and values. Anything implementing these traits is
//! accepted, regardless of its class.

use std::borrow::Cow;

use crate::value::Value;

/// Borrowing iterator over values.
pub type ValueIter<'a> = Box<dyn Iterator<Item = &'a Value> + 'a>;

/// Fixed-length, index-addressable sequence of values.
pub trait Positional {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, if in range.
    ///
    /// Views that synthesise their elements, such as the characters of a
    /// string, return owned values.
    fn at(&self, index: usize) -> Option<Cow<'_, Value>>;
}

/// Container exposing independent key and value enumeration.
pub trait KeyValues {
    /// Enumerate the keys.
    fn keys(&self) -> ValueIter<'_>;

    /// Enumerate the values.
    fn values(&self) -> ValueIter<'_>;
}

impl Positional for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.get(index).map(Cow::Borrowed)
    }
}

/// Characters, each as a one-character string.
impl Positional for String {
    fn len(&self) -> usize {
        self.chars().count()
    }

    fn at(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.chars()
            .nth(index)
            .map(|c| Cow::Owned(Value::String(c.to_string())))
    }
}

/// Indexing looks up the integer key `index`; absent keys read as `nil`.
impl Positional for Vec<(Value, Value)> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> Option<Cow<'_, Value>> {
        if index >= Vec::len(self) {
            return None;
        }
        let key = Value::Integer(i64::try_from(index).ok()?);
        Some(
            self.iter()
                .find(|(candidate, _)| *candidate == key)
                .map_or(Cow::Owned(Value::Nil), |(_, value)| Cow::Borrowed(value)),
        )
    }
}

impl KeyValues for Vec<(Value, Value)> {
    fn keys(&self) -> ValueIter<'_> {
        Box::new(self.iter().map(|(key, _)| key))
    }

    fn values(&self) -> ValueIter<'_> {
        Box::new(self.iter().map(|(_, value)| value))
    }
}

/// Keys and values held side by side, as exposed by struct-like maps.
///
/// The two columns are enumerated independently and need not have the same
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    /// Enumerated by [`KeyValues::keys`].
    pub keys: Vec<Value>,
    /// Enumerated by [`KeyValues::values`].
    pub values: Vec<Value>,
}

impl KeyValues for Columns {
    fn keys(&self) -> ValueIter<'_> {
        Box::new(self.keys.iter())
    }

    fn values(&self) -> ValueIter<'_> {
        Box::new(self.values.iter())
    }
}
