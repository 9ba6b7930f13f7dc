//! The JSON value model.
//!
//! [`Node`] is a closed sum over the six JSON alternatives. `Null` is the
//! first variant so that a default-constructed node is null. Objects are
//! ordered maps keyed by byte-wise string comparison; insertion order is not
//! preserved.

use core::fmt;
use std::collections::BTreeMap;
use std::ops;
use std::path::Path;

use crate::ser::{self, Format};
use crate::Error;

/// An object alternative: mapping from key to child node, ordered by key.
pub type Object = BTreeMap<String, Node>;

/// An array alternative: sequence of child nodes in insertion order.
pub type Array = Vec<Node>;

/// The null alternative's marker type. All `Null` values compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

/// One JSON value and the subtree below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Object {}
    impl Sealed for super::Array {}
    impl Sealed for String {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
    impl Sealed for super::Null {}
}

/// One of the six concrete types a [`Node`] can hold.
///
/// Implemented for exactly [`Object`], [`Array`], [`String`], [`f64`],
/// [`bool`], and [`Null`]; the trait is sealed and powers the generic
/// accessors [`Node::get`], [`Node::get_if`], and [`Node::is`].
pub trait Alternative: sealed::Sealed + Sized {
    /// Name used in type-mismatch errors.
    const NAME: &'static str;

    #[doc(hidden)]
    fn slot(node: &Node) -> Option<&Self>;
    #[doc(hidden)]
    fn slot_mut(node: &mut Node) -> Option<&mut Self>;
}

impl Alternative for Object {
    const NAME: &'static str = "object";

    fn slot(node: &Node) -> Option<&Self> {
        match node {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    fn slot_mut(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl Alternative for Array {
    const NAME: &'static str = "array";

    fn slot(node: &Node) -> Option<&Self> {
        match node {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    fn slot_mut(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl Alternative for String {
    const NAME: &'static str = "string";

    fn slot(node: &Node) -> Option<&Self> {
        match node {
            Node::String(string) => Some(string),
            _ => None,
        }
    }

    fn slot_mut(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::String(string) => Some(string),
            _ => None,
        }
    }
}

impl Alternative for f64 {
    const NAME: &'static str = "number";

    fn slot(node: &Node) -> Option<&Self> {
        match node {
            Node::Number(number) => Some(number),
            _ => None,
        }
    }

    fn slot_mut(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::Number(number) => Some(number),
            _ => None,
        }
    }
}

impl Alternative for bool {
    const NAME: &'static str = "boolean";

    fn slot(node: &Node) -> Option<&Self> {
        match node {
            Node::Bool(value) => Some(value),
            _ => None,
        }
    }

    fn slot_mut(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl Alternative for Null {
    const NAME: &'static str = "null";

    fn slot(node: &Node) -> Option<&Self> {
        match node {
            Node::Null => Some(&Null),
            _ => None,
        }
    }

    fn slot_mut(node: &mut Node) -> Option<&mut Self> {
        match node {
            // `Null` is zero-sized, so the box neither allocates nor leaks.
            Node::Null => Some(Box::leak(Box::new(Null))),
            _ => None,
        }
    }
}

impl Node {
    /// Strict typed access. Fails with [`Error::TypeMismatch`] when the node
    /// holds a different alternative; never coerces.
    pub fn get<T: Alternative>(&self) -> Result<&T, Error> {
        T::slot(self).ok_or_else(|| self.mismatch(T::NAME))
    }

    /// Mutable counterpart of [`Node::get`].
    pub fn get_mut<T: Alternative>(&mut self) -> Result<&mut T, Error> {
        let actual = self.type_name();
        T::slot_mut(self).ok_or(Error::TypeMismatch {
            expected: T::NAME,
            actual,
        })
    }

    /// Non-failing typed access: `None` when the alternative does not match.
    pub fn get_if<T: Alternative>(&self) -> Option<&T> {
        T::slot(self)
    }

    /// Mutable counterpart of [`Node::get_if`].
    pub fn get_if_mut<T: Alternative>(&mut self) -> Option<&mut T> {
        T::slot_mut(self)
    }

    /// Whether the active alternative is `T`. Never fails.
    pub fn is<T: Alternative>(&self) -> bool {
        T::slot(self).is_some()
    }

    /// Name of the active alternative, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => Null::NAME,
            Node::Bool(_) => bool::NAME,
            Node::Number(_) => f64::NAME,
            Node::String(_) => String::NAME,
            Node::Array(_) => Array::NAME,
            Node::Object(_) => Object::NAME,
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.is::<Null>()
    }

    pub fn is_bool(&self) -> bool {
        self.is::<bool>()
    }

    pub fn is_number(&self) -> bool {
        self.is::<f64>()
    }

    pub fn is_string(&self) -> bool {
        self.is::<String>()
    }

    pub fn is_array(&self) -> bool {
        self.is::<Array>()
    }

    pub fn is_object(&self) -> bool {
        self.is::<Object>()
    }

    pub fn get_object(&self) -> Result<&Object, Error> {
        self.get::<Object>()
    }

    pub fn get_object_mut(&mut self) -> Result<&mut Object, Error> {
        self.get_mut::<Object>()
    }

    pub fn get_array(&self) -> Result<&Array, Error> {
        self.get::<Array>()
    }

    pub fn get_array_mut(&mut self) -> Result<&mut Array, Error> {
        self.get_mut::<Array>()
    }

    pub fn get_string(&self) -> Result<&String, Error> {
        self.get::<String>()
    }

    pub fn get_string_mut(&mut self) -> Result<&mut String, Error> {
        self.get_mut::<String>()
    }

    pub fn get_number(&self) -> Result<f64, Error> {
        self.get::<f64>().copied()
    }

    pub fn get_number_mut(&mut self) -> Result<&mut f64, Error> {
        self.get_mut::<f64>()
    }

    pub fn get_bool(&self) -> Result<bool, Error> {
        self.get::<bool>().copied()
    }

    pub fn get_null(&self) -> Result<Null, Error> {
        self.get::<Null>().copied()
    }

    /// Returns the boolean value if this node holds one.
    pub fn as_bool(&self) -> Option<bool> {
        self.get_if::<bool>().copied()
    }

    /// Returns the numeric value if this node holds one.
    pub fn as_f64(&self) -> Option<f64> {
        self.get_if::<f64>().copied()
    }

    /// Returns a string slice if this node holds a string.
    pub fn as_str(&self) -> Option<&str> {
        self.get_if::<String>().map(String::as_str)
    }

    pub fn as_array(&self) -> Option<&Array> {
        self.get_if::<Array>()
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        self.get_if_mut::<Array>()
    }

    pub fn as_object(&self) -> Option<&Object> {
        self.get_if::<Object>()
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        self.get_if_mut::<Object>()
    }

    pub fn as_null(&self) -> Option<Null> {
        self.get_if::<Null>().copied()
    }

    /// Strict lookup: fails with [`Error::MissingKey`] for absent keys and
    /// with [`Error::TypeMismatch`] on non-object nodes. Never inserts.
    pub fn at(&self, key: &str) -> Result<&Node, Error> {
        self.get::<Object>()?
            .get(key)
            .ok_or_else(|| Error::MissingKey(key.to_owned()))
    }

    /// Mutable counterpart of [`Node::at`]; also never inserts.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut Node, Error> {
        self.get_mut::<Object>()?
            .get_mut(key)
            .ok_or_else(|| Error::MissingKey(key.to_owned()))
    }

    /// Whether `key` is present. Returns `false` for non-object nodes.
    pub fn contains(&self, key: &str) -> bool {
        self.get_if::<Object>()
            .is_some_and(|object| object.contains_key(key))
    }

    /// Returns a clone of the value at `key` when it exists and holds
    /// alternative `T`; otherwise the fallback.
    pub fn value_or<T: Alternative + Clone>(&self, key: &str, fallback: T) -> T {
        self.get_if::<Object>()
            .and_then(|object| object.get(key))
            .and_then(|node| node.get_if::<T>())
            .cloned()
            .unwrap_or(fallback)
    }

    /// Renders the subtree as text. Never mutates.
    pub fn to_text(&self, format: Format) -> String {
        let mut out = String::new();
        ser::write_node(&mut out, self, format);
        out
    }

    /// Writes the rendered subtree to a file.
    pub fn to_file(&self, path: impl AsRef<Path>, format: Format) -> Result<(), Error> {
        std::fs::write(path, self.to_text(format))?;
        Ok(())
    }
}

/// Renders the minimized form.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(Format::Minimized))
    }
}

/// Strict read access: panics on non-object nodes and absent keys, since both
/// indicate a logic error against a tree the caller built or received.
/// Use [`Node::at`] for a non-panicking lookup.
impl ops::Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        match self.at(key) {
            Ok(node) => node,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Inserting access: a `Null` node auto-vivifies into an empty object, and
/// absent keys are inserted as `Null`. Panics when the node holds any other
/// non-object alternative.
impl ops::IndexMut<&str> for Node {
    fn index_mut(&mut self, key: &str) -> &mut Node {
        if self.is_null() {
            *self = Node::Object(Object::new());
        }
        match self.get_mut::<Object>() {
            Ok(object) => object.entry(key.to_owned()).or_default(),
            Err(error) => panic!("{error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_node_is_null() {
        assert!(Node::default().is_null());
        assert_eq!(Node::default().type_name(), "null");
    }

    #[test]
    fn null_equals_null() {
        assert_eq!(Null, Null);
        assert_eq!(Node::Null, Node::default());
    }

    #[test]
    fn generic_accessors_agree_with_named_ones() {
        let node = Node::Number(4.5);
        assert!(node.is::<f64>());
        assert!(!node.is::<bool>());
        assert_eq!(node.get_if::<f64>(), Some(&4.5));
        assert_eq!(node.as_f64(), Some(4.5));
        assert!(node.get::<String>().is_err());
    }

    #[test]
    fn get_reports_both_type_names() {
        let node = Node::String("x".into());
        match node.get::<Object>() {
            Err(Error::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, "object");
                assert_eq!(actual, "string");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn get_mut_allows_in_place_edits() {
        let mut node = Node::Number(1.0);
        *node.get_mut::<f64>().unwrap() = 2.0;
        assert_eq!(node.as_f64(), Some(2.0));
    }

    #[test]
    fn index_mut_vivifies_null_into_object() {
        let mut node = Node::default();
        node["x"] = Node::from(1);
        assert!(node.is_object());
        assert_eq!(node["x"].as_f64(), Some(1.0));
    }

    #[test]
    fn index_mut_inserts_null_for_missing_keys() {
        let mut node = Node::default();
        let _ = &mut node["fresh"];
        assert!(node["fresh"].is_null());
        assert!(node.contains("fresh"));
    }

    #[test]
    #[should_panic(expected = "expected node to hold object")]
    fn index_mut_panics_on_number() {
        let mut node = Node::Number(3.0);
        node["x"] = Node::Null;
    }

    #[test]
    #[should_panic(expected = "is not present")]
    fn index_panics_on_missing_key() {
        let node = Node::Object(Object::new());
        let _ = &node["absent"];
    }

    #[test]
    fn at_is_strict_in_both_mutabilities() {
        let mut node = Node::default();
        node["present"] = Node::Bool(true);
        assert!(node.at("present").is_ok());
        assert!(matches!(node.at("absent"), Err(Error::MissingKey(_))));
        assert!(matches!(node.at_mut("absent"), Err(Error::MissingKey(_))));
        // `at` never inserts, unlike `IndexMut`.
        assert!(!node.contains("absent"));
    }

    #[test]
    fn contains_never_fails() {
        assert!(!Node::Number(1.0).contains("x"));
        assert!(!Node::default().contains("x"));
    }

    #[test]
    fn value_or_falls_back_on_absence_and_mismatch() {
        let mut node = Node::default();
        node["number"] = Node::Number(17.0);
        assert_eq!(node.value_or("number", -5.0), 17.0);
        assert_eq!(node.value_or("absent", -5.0), -5.0);
        assert_eq!(node.value_or("number", String::from("fallback")), "fallback");
    }

    #[test]
    fn display_is_minimized() {
        let mut node = Node::default();
        node["a"] = Node::Bool(true);
        assert_eq!(node.to_string(), r#"{"a":true}"#);
    }

    #[test]
    fn node_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
    }
}
