//! Conversions from host types into [`Node`].
//!
//! The original conversion-priority ladder (string > object > array > bool >
//! null > numeric) resolved overload ambiguity; `From` impls are selected by
//! concrete type, so no ladder is needed here. Nested containers convert
//! recursively, which covers multi-dimensional array construction.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::node::{Node, Null};

impl From<Null> for Node {
    fn from(_: Null) -> Self {
        Node::Null
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Number(f64::from(value))
    }
}

// Numbers all map onto the single f64 alternative; integers above 2^53 lose
// precision exactly as they would in any JSON pipeline.
macro_rules! impl_from_integer {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for Node {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $int) -> Self {
                    Node::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Cow<'_, str>> for Node {
    fn from(value: Cow<'_, str>) -> Self {
        Node::String(value.into_owned())
    }
}

impl From<char> for Node {
    fn from(value: char) -> Self {
        Node::String(value.to_string())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(value: Vec<T>) -> Self {
        Node::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Node>> From<&[T]> for Node {
    fn from(value: &[T]) -> Self {
        Node::Array(value.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Node>, const N: usize> From<[T; N]> for Node {
    fn from(value: [T; N]) -> Self {
        Node::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Node>> From<BTreeMap<String, T>> for Node {
    fn from(value: BTreeMap<String, T>) -> Self {
        Node::Object(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Node>> From<HashMap<String, T>> for Node {
    fn from(value: HashMap<String, T>) -> Self {
        Node::Object(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Collects into an array node.
impl<T: Into<Node>> FromIterator<T> for Node {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Node::Array(iter.into_iter().map(Into::into).collect())
    }
}

/// Collects into an object node; duplicate keys keep the last value, as with
/// any map built from an iterator.
impl<T: Into<Node>> FromIterator<(String, T)> for Node {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Node::Object(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}
