//! Class table implementing [`ObjectModel`] with a Ruby-flavoured core.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use super::{Entity, KindHandle, ObjectModel, Resolution};
use crate::value::Value;

/// Whether a kind can be instantiated or only mixed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFlavour {
    /// Has a superclass and instances.
    Class,
    /// Mixed into classes with [`Registry::include`].
    Module,
}

#[derive(Debug, Clone)]
struct KindDef {
    flavour: KindFlavour,
    superclass: Option<String>,
    includes: Vec<String>,
    methods: BTreeSet<String>,
}

#[derive(Debug, Clone)]
enum Binding {
    Kind(String),
    Constant { class: String },
}

/// Mutable table of classes, modules and constants.
///
/// Unknown object classes are treated as direct subclasses of `Object`.
///
/// # Examples
/// ```
/// use yard_types::{KindHandle, Object, ObjectModel, Registry, Value};
///
/// let mut registry = Registry::core();
/// registry.define_class("MyTuple", "Array");
///
/// let tuple = Value::from(Object::list("MyTuple", vec![]));
/// assert!(registry.is_kind_of(&tuple, &KindHandle::new("Array")));
/// assert!(registry.responds_to(&tuple, "length"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    kinds: HashMap<String, KindDef>,
    constants: HashMap<String, Binding>,
}

static CORE: LazyLock<Registry> = LazyLock::new(Registry::core);

fn canonical(path: &str) -> &str {
    path.strip_prefix("::").unwrap_or(path)
}

impl Registry {
    /// Create a registry with no kinds at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the core classes and modules.
    #[must_use]
    pub fn core() -> Self {
        let mut registry = Self::default();
        install_core(&mut registry);
        registry
    }

    /// Process-wide, read-only core registry.
    #[must_use]
    pub fn shared() -> &'static Self {
        &CORE
    }

    fn insert_kind(
        &mut self,
        path: &str,
        flavour: KindFlavour,
        superclass: Option<&str>,
    ) -> &mut Self {
        let path = canonical(path).to_string();
        self.kinds.entry(path.clone()).or_insert_with(|| KindDef {
            flavour,
            superclass: superclass.map(|name| canonical(name).to_string()),
            includes: Vec::new(),
            methods: BTreeSet::new(),
        });
        self.constants.insert(path.clone(), Binding::Kind(path));
        self
    }

    /// Define a class under `path` inheriting from `superclass`.
    ///
    /// Redefining an existing kind keeps its original superclass, like
    /// reopening a class does.
    pub fn define_class(&mut self, path: &str, superclass: &str) -> &mut Self {
        self.insert_kind(path, KindFlavour::Class, Some(superclass))
    }

    /// Define a module under `path`.
    pub fn define_module(&mut self, path: &str) -> &mut Self {
        self.insert_kind(path, KindFlavour::Module, None)
    }

    /// Mix `module` into `kind`.
    pub fn include(&mut self, kind: &str, module: &str) -> &mut Self {
        let module = canonical(module).to_string();
        match self.kinds.get_mut(canonical(kind)) {
            Some(def) if !def.includes.contains(&module) => def.includes.push(module),
            Some(_) => {}
            None => log::warn!("cannot include {module} into undefined kind {kind}"),
        }
        self
    }

    /// Add instance methods to `kind`.
    pub fn define_methods(&mut self, kind: &str, methods: &[&str]) -> &mut Self {
        match self.kinds.get_mut(canonical(kind)) {
            Some(def) => def
                .methods
                .extend(methods.iter().map(|name| (*name).to_string())),
            None => log::warn!("cannot define methods on undefined kind {kind}"),
        }
        self
    }

    /// Bind a non-kind constant whose value is an instance of `class`.
    pub fn define_constant(&mut self, path: &str, class: &str) -> &mut Self {
        self.constants.insert(
            canonical(path).to_string(),
            Binding::Constant {
                class: class.to_string(),
            },
        );
        self
    }

    /// Make `alias` refer to the same kind as `target`.
    pub fn alias(&mut self, alias: &str, target: &str) -> &mut Self {
        let target = self.canonical_kind(target).to_string();
        self.constants
            .insert(canonical(alias).to_string(), Binding::Kind(target));
        self
    }

    /// Whether `path` names a class or a module, if it names a kind at all.
    #[must_use]
    pub fn flavour(&self, path: &str) -> Option<KindFlavour> {
        self.kinds
            .get(self.canonical_kind(path))
            .map(|def| def.flavour)
    }

    fn canonical_kind<'a>(&'a self, path: &'a str) -> &'a str {
        let path = canonical(path);
        match self.constants.get(path) {
            Some(Binding::Kind(target)) => target.as_str(),
            Some(Binding::Constant { .. }) | None => path,
        }
    }

    /// Ancestor chain of `path`, nearest first, in method lookup order.
    ///
    /// # Examples
    /// ```
    /// use yard_types::Registry;
    /// let registry = Registry::core();
    /// assert_eq!(
    ///     registry.ancestors("Fixnum"),
    ///     ["Integer", "Numeric", "Comparable", "Object", "Kernel", "BasicObject"]
    /// );
    /// ```
    #[must_use]
    pub fn ancestors<'a>(&'a self, path: &'a str) -> Vec<&'a str> {
        let path = self.canonical_kind(path);
        let mut out = Vec::new();
        if self.kinds.contains_key(path) {
            self.collect_ancestors(path, &mut out);
        } else {
            out.push(path);
            self.collect_ancestors("Object", &mut out);
        }
        out
    }

    fn collect_ancestors<'a>(&'a self, path: &'a str, out: &mut Vec<&'a str>) {
        if out.contains(&path) {
            return;
        }
        let Some(def) = self.kinds.get(path) else {
            return;
        };
        out.push(path);
        for module in def.includes.iter().rev() {
            self.collect_ancestors(module, out);
        }
        if let Some(superclass) = &def.superclass {
            self.collect_ancestors(superclass, out);
        }
    }

    /// Drop leading scopes through which top-level constants are visible,
    /// unless the full path is bound as written.
    fn without_object_scopes<'p>(&self, mut path: &'p str) -> &'p str {
        let object_scopes = self.ancestors("Object");
        while let Some((scope, rest)) = path.split_once("::") {
            let scope = self.canonical_kind(scope);
            if self.constants.contains_key(path)
                || !object_scopes.iter().any(|ancestor| *ancestor == scope)
            {
                break;
            }
            path = rest;
        }
        path
    }

    /// Name of the class `value` is an instance of.
    #[must_use]
    pub fn class_of<'a>(&'a self, value: &'a Value) -> &'a str {
        match value {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Set(_) => "Set",
            Value::Kind(handle) => match self.flavour(handle.path()) {
                Some(KindFlavour::Module) => "Module",
                Some(KindFlavour::Class) | None => "Class",
            },
            Value::Object(object) => object.class(),
        }
    }
}

impl ObjectModel for Registry {
    /// Nested paths resolve only when every enclosing scope is a kind.
    /// Scopes that are `Object` or one of its ancestors also see top-level
    /// constants, so `Object::String` resolves to `String`.
    fn resolve(&self, path: &str) -> Resolution {
        let path = self.without_object_scopes(canonical(path));
        let scopes_are_kinds = path.match_indices("::").all(|(end, _)| {
            matches!(
                path.get(..end).and_then(|scope| self.constants.get(scope)),
                Some(Binding::Kind(_))
            )
        });
        if !scopes_are_kinds {
            return Resolution::NotFound;
        }
        match self.constants.get(path) {
            Some(Binding::Kind(target)) => Resolution::Found(Entity::Kind(KindHandle::new(target.clone()))),
            Some(Binding::Constant { class }) => Resolution::Found(Entity::Constant {
                class: class.clone(),
            }),
            None => Resolution::NotFound,
        }
    }

    fn is_kind_of(&self, value: &Value, kind: &KindHandle) -> bool {
        let target = self.canonical_kind(kind.path());
        self.ancestors(self.class_of(value)).contains(&target)
    }

    fn responds_to(&self, value: &Value, message: &str) -> bool {
        if matches!(value, Value::Object(object) if object.defines(message)) {
            return true;
        }
        self.ancestors(self.class_of(value))
            .into_iter()
            .filter_map(|kind| self.kinds.get(kind))
            .any(|def| def.methods.contains(message))
    }
}

struct CoreKind {
    path: &'static str,
    superclass: Option<&'static str>,
    includes: &'static [&'static str],
    methods: &'static [&'static str],
}

const fn class(
    path: &'static str,
    superclass: &'static str,
    includes: &'static [&'static str],
    methods: &'static [&'static str],
) -> CoreKind {
    CoreKind {
        path,
        superclass: Some(superclass),
        includes,
        methods,
    }
}

const fn module(path: &'static str, methods: &'static [&'static str]) -> CoreKind {
    CoreKind {
        path,
        superclass: None,
        includes: &[],
        methods,
    }
}

const CORE_KINDS: &[CoreKind] = &[
    module(
        "Kernel",
        &[
            "===", "=~", "class", "clone", "display", "dup", "eql?", "freeze", "frozen?", "hash",
            "inspect", "instance_of?", "instance_variables", "is_a?", "itself", "kind_of?",
            "method", "methods", "nil?", "object_id", "public_send", "respond_to?", "send", "tap",
            "then", "to_s",
        ],
    ),
    module("Comparable", &["<", "<=", ">", ">=", "between?", "clamp"]),
    module(
        "Enumerable",
        &[
            "all?", "any?", "count", "each_slice", "each_with_index", "each_with_object",
            "entries", "find", "first", "flat_map", "group_by", "include?", "inject", "map",
            "max", "min", "none?", "partition", "reduce", "reject", "select", "sort", "sort_by",
            "sum", "tally", "to_a", "to_set", "uniq", "zip",
        ],
    ),
    class("Object", "BasicObject", &["Kernel"], &[]),
    class("NilClass", "Object", &[], &["&", "^", "|", "inspect", "nil?", "to_a", "to_f", "to_h", "to_i", "to_s"]),
    class("TrueClass", "Object", &[], &["&", "^", "|", "inspect", "to_s"]),
    class("FalseClass", "Object", &[], &["&", "^", "|", "inspect", "to_s"]),
    class(
        "Numeric",
        "Object",
        &["Comparable"],
        &[
            "+@", "-@", "abs", "ceil", "coerce", "div", "divmod", "floor", "integer?",
            "negative?", "nonzero?", "positive?", "quo", "round", "step", "to_c", "to_int",
            "truncate", "zero?",
        ],
    ),
    class(
        "Integer",
        "Numeric",
        &[],
        &[
            "%", "*", "**", "+", "-", "/", "bit_length", "chr", "digits", "downto", "even?",
            "gcd", "lcm", "next", "odd?", "ord", "pred", "succ", "times", "to_f", "to_i", "to_r",
            "to_s", "upto",
        ],
    ),
    class(
        "Float",
        "Numeric",
        &[],
        &[
            "%", "*", "**", "+", "-", "/", "finite?", "infinite?", "nan?", "next_float",
            "prev_float", "rationalize", "to_f", "to_i", "to_r", "to_s",
        ],
    ),
    class(
        "String",
        "Object",
        &["Comparable"],
        &[
            "%", "*", "+", "<<", "[]", "[]=", "bytes", "bytesize", "capitalize", "center",
            "chars", "chomp", "chop", "concat", "downcase", "each_char", "each_line", "empty?",
            "encoding", "end_with?", "gsub", "include?", "index", "length", "lines", "ljust",
            "lstrip", "match", "replace", "reverse", "rjust", "rstrip", "scan", "size", "slice",
            "split", "start_with?", "strip", "sub", "swapcase", "to_c", "to_f", "to_i", "to_r",
            "to_s", "to_str", "to_sym", "tr", "upcase",
        ],
    ),
    class(
        "Symbol",
        "Object",
        &["Comparable"],
        &[
            "[]", "capitalize", "downcase", "empty?", "encoding", "end_with?", "id2name",
            "length", "name", "size", "slice", "start_with?", "succ", "swapcase", "to_proc",
            "to_s", "to_sym", "upcase",
        ],
    ),
    class(
        "Array",
        "Object",
        &["Enumerable"],
        &[
            "&", "*", "+", "-", "<<", "[]", "[]=", "at", "clear", "compact", "concat", "delete",
            "dig", "each", "each_index", "empty?", "fetch", "fill", "first", "flatten", "index",
            "insert", "join", "last", "length", "pack", "pop", "push", "reverse", "rotate",
            "sample", "shift", "shuffle", "size", "slice", "to_a", "to_ary", "to_h", "transpose",
            "uniq", "unshift", "values_at",
        ],
    ),
    class(
        "Hash",
        "Object",
        &["Enumerable"],
        &[
            "[]", "[]=", "clear", "default", "delete", "dig", "each", "each_key", "each_pair",
            "each_value", "empty?", "fetch", "has_key?", "has_value?", "include?", "invert",
            "key", "key?", "keys", "length", "member?", "merge", "size", "store", "to_a", "to_h",
            "transform_keys", "transform_values", "update", "value?", "values", "values_at",
        ],
    ),
    class(
        "Set",
        "Object",
        &["Enumerable"],
        &[
            "&", "+", "-", "<<", "^", "add", "add?", "delete", "each", "empty?", "include?",
            "length", "member?", "merge", "size", "subset?", "superset?", "to_a", "to_set",
            "union", "|",
        ],
    ),
    class(
        "Struct",
        "Object",
        &["Enumerable"],
        &[
            "==", "[]", "[]=", "deconstruct", "dig", "each", "each_pair", "length", "members",
            "size", "to_a", "to_h", "values", "values_at",
        ],
    ),
    class(
        "Module",
        "Object",
        &[],
        &[
            "<", "<=", "===", "ancestors", "const_defined?", "const_get", "constants",
            "include?", "included_modules", "instance_method", "instance_methods",
            "method_defined?", "module_eval", "name", "to_s",
        ],
    ),
    class("Class", "Module", &[], &["allocate", "new", "superclass"]),
    module("Math", &[]),
];

fn install_core(registry: &mut Registry) {
    registry.insert_kind("BasicObject", KindFlavour::Class, None);
    registry.define_methods(
        "BasicObject",
        &["!", "!=", "==", "__id__", "__send__", "equal?", "instance_eval", "instance_exec"],
    );
    for kind in CORE_KINDS {
        let flavour = if kind.superclass.is_some() {
            KindFlavour::Class
        } else {
            KindFlavour::Module
        };
        registry.insert_kind(kind.path, flavour, kind.superclass);
        for module in kind.includes {
            registry.include(kind.path, module);
        }
        registry.define_methods(kind.path, kind.methods);
    }
    registry
        .alias("Fixnum", "Integer")
        .alias("Bignum", "Integer")
        .define_constant("Math::PI", "Float")
        .define_constant("Math::E", "Float")
        .define_constant("Float::INFINITY", "Float")
        .define_constant("Float::NAN", "Float");
}
