//! The untyped runtime value tree.
//!
//! Producers (module execution, uploads) and consumers (input resolution)
//! trade in trees of [`RuntimeValue`]: ordinary JSON-ish scalars and
//! containers, plus [`RuntimeValue::Object`] nodes holding live domain
//! objects. Only `Object` nodes are ever subject to the inline-vs-reference
//! decision; scalars and containers always serialize structurally.

use objport_registry::RuntimeObject;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A node in an untyped value tree.
#[derive(Clone)]
pub enum RuntimeValue {
    /// JSON null.
    Null,

    /// Boolean scalar.
    Bool(bool),

    /// Integer scalar.
    Int(i64),

    /// Floating-point scalar.
    Float(f64),

    /// String scalar.
    Str(String),

    /// Ordered list.
    List(Vec<RuntimeValue>),

    /// String-keyed map.
    Map(BTreeMap<String, RuntimeValue>),

    /// A live domain object, shared with the registry once referenced.
    Object(Arc<dyn RuntimeObject>),
}

impl RuntimeValue {
    /// Wraps a domain object.
    pub fn object(object: Arc<dyn RuntimeObject>) -> Self {
        RuntimeValue::Object(object)
    }

    /// The object handle, if this node is one.
    pub fn as_object(&self) -> Option<&Arc<dyn RuntimeObject>> {
        match self {
            RuntimeValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The string payload, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuntimeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Kind descriptor for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeValue::Null => "null",
            RuntimeValue::Bool(_) => "boolean",
            RuntimeValue::Int(_) => "integer",
            RuntimeValue::Float(_) => "float",
            RuntimeValue::Str(_) => "string",
            RuntimeValue::List(_) => "list",
            RuntimeValue::Map(_) => "map",
            RuntimeValue::Object(_) => "object",
        }
    }
}

impl PartialEq for RuntimeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeValue::Null, RuntimeValue::Null) => true,
            (RuntimeValue::Bool(a), RuntimeValue::Bool(b)) => a == b,
            (RuntimeValue::Int(a), RuntimeValue::Int(b)) => a == b,
            (RuntimeValue::Float(a), RuntimeValue::Float(b)) => a == b,
            (RuntimeValue::Str(a), RuntimeValue::Str(b)) => a == b,
            (RuntimeValue::List(a), RuntimeValue::List(b)) => a == b,
            (RuntimeValue::Map(a), RuntimeValue::Map(b)) => a == b,
            (RuntimeValue::Object(a), RuntimeValue::Object(b)) => a.eq_object(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Debug for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Null => f.write_str("Null"),
            RuntimeValue::Bool(v) => write!(f, "Bool({v})"),
            RuntimeValue::Int(v) => write!(f, "Int({v})"),
            RuntimeValue::Float(v) => write!(f, "Float({v})"),
            RuntimeValue::Str(v) => write!(f, "Str({v:?})"),
            RuntimeValue::List(items) => f.debug_tuple("List").field(items).finish(),
            RuntimeValue::Map(map) => f.debug_tuple("Map").field(map).finish(),
            RuntimeValue::Object(object) => write!(f, "Object({})", object.type_name()),
        }
    }
}

impl From<bool> for RuntimeValue {
    fn from(v: bool) -> Self {
        RuntimeValue::Bool(v)
    }
}

impl From<i64> for RuntimeValue {
    fn from(v: i64) -> Self {
        RuntimeValue::Int(v)
    }
}

impl From<f64> for RuntimeValue {
    fn from(v: f64) -> Self {
        RuntimeValue::Float(v)
    }
}

impl From<&str> for RuntimeValue {
    fn from(v: &str) -> Self {
        RuntimeValue::Str(v.to_string())
    }
}

impl From<String> for RuntimeValue {
    fn from(v: String) -> Self {
        RuntimeValue::Str(v)
    }
}
