use serde_json::{Number, Value};

use crate::{Node, Object};

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            // All serde_json number representations collapse onto f64;
            // integers above 2^53 round to the nearest representable value.
            #[allow(clippy::cast_precision_loss)]
            Value::Number(num) => {
                if let Some(f) = num.as_f64() {
                    Node::Number(f)
                } else if let Some(u) = num.as_u64() {
                    Node::Number(u as f64)
                } else if let Some(i) = num.as_i64() {
                    Node::Number(i as f64)
                } else {
                    Node::Null
                }
            }
            Value::String(s) => Node::String(s),
            Value::Array(old) => Node::Array(old.into_iter().map(Node::from).collect()),
            Value::Object(old) => Node::Object(
                old.into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            // Non-finite numbers have no serde_json representation.
            Node::Number(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Node::String(s) => Value::String(s),
            Node::Array(old) => Value::Array(old.into_iter().map(Value::from).collect()),
            Node::Object(old) => Value::Object(
                old.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl PartialEq<Value> for Node {
    fn eq(&self, other: &Value) -> bool {
        eq(other, self)
    }
}

impl PartialEq<Node> for Value {
    fn eq(&self, other: &Node) -> bool {
        eq(self, other)
    }
}

fn eq(lhs: &Value, rhs: &Node) -> bool {
    match (lhs, rhs) {
        (Value::Null, Node::Null) => true,
        (Value::Bool(l), Node::Bool(r)) => l == r,
        (Value::Number(l), Node::Number(r)) => l.as_f64() == Some(*r),
        (Value::String(l), Node::String(r)) => l == r,
        (Value::Array(l), Node::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r.iter()).all(|(l, r)| eq(l, r))
        }
        (Value::Object(l), Node::Object(r)) => {
            l.len() == r.len()
                && r.iter()
                    .all(|(key, node)| l.get(key).is_some_and(|value| eq(value, node)))
        }
        _ => false,
    }
}
