//! Dynamic runtime values that constraints are checked against.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::capability::{Columns, KeyValues, Positional};
use crate::object_model::KindHandle;

/// Boxed iterator over a value's elements.
///
/// Hash entries are synthesised as `[key, value]` pairs, so elements are
/// borrowed where possible and owned otherwise.
pub type Elements<'a> = Box<dyn Iterator<Item = Cow<'a, Value>> + 'a>;

/// A runtime value with Ruby-like semantics.
///
/// # Examples
/// ```
/// use yard_types::Value;
/// let list = Value::from(vec![Value::from("a"), Value::symbol("b"), Value::Nil]);
/// assert_eq!(list.elements().map(Iterator::count), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `nil` singleton.
    Nil,
    /// `true` or `false`.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Mutable text.
    String(String),
    /// Interned name, written `:name`.
    Symbol(String),
    /// Ordered list.
    Array(Vec<Value>),
    /// Insertion-ordered key/value pairs.
    Hash(Vec<(Value, Value)>),
    /// Unordered collection of distinct members.
    Set(Vec<Value>),
    /// A class or module object, such as `String` itself.
    Kind(KindHandle),
    /// An instance of a user-defined class.
    Object(Object),
}

impl Value {
    /// Build a symbol value.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Build a hash value from key/value pairs, preserving their order.
    #[must_use]
    pub fn hash<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Self>,
        V: Into<Self>,
    {
        Self::Hash(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a set value, dropping repeated members.
    #[must_use]
    pub fn set<T: Into<Self>>(members: impl IntoIterator<Item = T>) -> Self {
        let mut unique: Vec<Self> = Vec::new();
        for member in members {
            let member = member.into();
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self::Set(unique)
    }

    /// Enumerate the value's elements, if it is enumerable.
    ///
    /// Arrays, sets and list-shaped objects yield their members; hashes yield
    /// `[key, value]` pairs. Everything else is not enumerable.
    #[must_use]
    pub fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Self::Array(items) | Self::Set(items) => Some(Box::new(items.iter().map(Cow::Borrowed))),
            Self::Hash(pairs) => Some(Box::new(pairs.iter().map(|(key, value)| {
                Cow::Owned(Self::Array(vec![key.clone(), value.clone()]))
            }))),
            Self::Object(object) => match object.shape() {
                Shape::List(items) => Some(Box::new(items.iter().map(Cow::Borrowed))),
                Shape::Opaque | Shape::Map(_) => None,
            },
            _ => None,
        }
    }

    /// Positional view of the value, if it supports length and indexing.
    ///
    /// Strings index their characters and hashes index by integer key, as
    /// `length` and `[]` do on them.
    #[must_use]
    pub fn as_positional(&self) -> Option<&dyn Positional> {
        match self {
            Self::Array(items) => Some(items),
            Self::String(text) => Some(text),
            Self::Hash(pairs) => Some(pairs),
            Self::Object(object) => match object.shape() {
                Shape::List(items) => Some(items),
                Shape::Opaque | Shape::Map(_) => None,
            },
            _ => None,
        }
    }

    /// Key/value view of the value, if it enumerates both.
    #[must_use]
    pub fn as_key_values(&self) -> Option<&dyn KeyValues> {
        match self {
            Self::Hash(pairs) => Some(pairs),
            Self::Object(object) => match object.shape() {
                Shape::Map(columns) => Some(columns),
                Shape::Opaque | Shape::List(_) => None,
            },
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

impl From<KindHandle> for Value {
    fn from(value: KindHandle) -> Self {
        Self::Kind(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

/// Structural capabilities of an [`Object`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Shape {
    /// No container behaviour.
    #[default]
    Opaque,
    /// Enumerable, with length and positional access.
    List(Vec<Value>),
    /// Exposes `keys` and `values`.
    Map(Columns),
}

const LIST_METHODS: [&str; 5] = ["[]", "each", "length", "size", "to_a"];
const MAP_METHODS: [&str; 2] = ["keys", "values"];

/// An instance of a named class.
///
/// Besides the methods its class provides, an object answers to the methods
/// implied by its [`Shape`] and to any methods added with
/// [`with_method`](Self::with_method).
///
/// # Examples
/// ```
/// use yard_types::{Object, Value};
/// let pair = Object::map("Pair", vec![Value::from(1)], vec![Value::from("one")]);
/// assert!(pair.defines("keys"));
/// assert!(!pair.defines("length"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: String,
    methods: BTreeSet<String>,
    shape: Shape,
}

impl Object {
    /// Create an opaque instance of `class`.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            methods: BTreeSet::new(),
            shape: Shape::Opaque,
        }
    }

    /// Create a list-like instance of `class` holding `elements`.
    #[must_use]
    pub fn list(class: impl Into<String>, elements: Vec<Value>) -> Self {
        Self::new(class).with_shape(Shape::List(elements))
    }

    /// Create an instance of `class` exposing `keys` and `values`.
    #[must_use]
    pub fn map(class: impl Into<String>, keys: Vec<Value>, values: Vec<Value>) -> Self {
        Self::new(class).with_shape(Shape::Map(Columns { keys, values }))
    }

    /// Replace the object's shape.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Add a singleton method.
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.insert(name.into());
        self
    }

    /// Name of the object's class.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The object's structural capabilities.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Whether the object itself (not its class) answers to `message`.
    #[must_use]
    pub fn defines(&self, message: &str) -> bool {
        let implied: &[&str] = match self.shape {
            Shape::Opaque => &[],
            Shape::List(_) => &LIST_METHODS,
            Shape::Map(_) => &MAP_METHODS,
        };
        self.methods.contains(message) || implied.contains(&message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_elements_are_key_value_pairs() {
        let hash = Value::hash([(1, "a")]);
        let elements: Vec<Value> = hash
            .elements()
            .map(|iter| iter.map(Cow::into_owned).collect())
            .unwrap_or_default();
        assert_eq!(
            elements,
            vec![Value::from(vec![Value::from(1), Value::from("a")])]
        );
    }

    #[test]
    fn scalars_offer_no_container_capabilities() {
        for value in [Value::Nil, Value::from(1), Value::symbol("s")] {
            assert!(value.elements().is_none());
            assert!(value.as_positional().is_none());
            assert!(value.as_key_values().is_none());
        }
    }

    #[test]
    fn strings_and_hashes_are_positional() {
        let text = Value::from("ab");
        assert_eq!(text.as_positional().map(|seq| seq.len()), Some(2));
        assert!(text.elements().is_none());

        let hash = Value::hash([(0, "zero")]);
        let first = hash.as_positional().and_then(|seq| seq.at(0).map(Cow::into_owned));
        assert_eq!(first, Some(Value::from("zero")));
    }

    #[test]
    fn sets_drop_duplicates_and_are_not_positional() {
        let set = Value::set(["a", "b", "a"]);
        assert_eq!(set.elements().map(Iterator::count), Some(2));
        assert!(set.as_positional().is_none());
    }

    #[test]
    fn shaped_objects_expose_capabilities() {
        let list = Value::from(Object::list("MyTuple", vec![Value::from(1)]));
        assert_eq!(list.as_positional().map(|seq| seq.len()), Some(1));
        assert!(list.as_key_values().is_none());

        let map = Value::from(Object::map("Pairs", vec![Value::Nil], vec![]));
        assert!(map.as_key_values().is_some());
        assert!(map.elements().is_none());
    }

    #[test]
    fn optional_values_map_none_to_nil() {
        assert_eq!(Value::from(None::<i64>), Value::Nil);
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
    }

    #[test]
    fn objects_answer_to_singleton_methods() {
        let object = Object::new("Widget").with_method("render");
        assert!(object.defines("render"));
        assert!(!object.defines("keys"));
    }
}
