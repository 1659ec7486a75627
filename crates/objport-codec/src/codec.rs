//! The reference-aware JSON codec.
//!
//! Wraps plain JSON encoding/decoding with the two behaviors that make
//! arbitrary runtime objects transmissible:
//!
//! - **Encode**: every `Object` node is routed through serializer
//!   dispatch; values with no safe structural form are registered and
//!   emitted as their token. Scalars and containers never touch dispatch.
//! - **Decode**: every string carrying the reserved token prefix is
//!   resolved through the registry and replaced with the original
//!   instance. An unresolvable prefixed string is an error - never a
//!   silent literal.

use crate::dispatch::{Decision, DispatchTable};
use crate::error::{CodecError, Result};
use crate::value::RuntimeValue;
use objport_registry::{ObjectRegistry, RuntimeObject, Token};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default provenance tag for registrations made while encoding.
const DEFAULT_CREATOR_TAG: &str = "codec";

/// Reference-substituting encoder/decoder over a shared registry.
///
/// Cheap to clone; clones share the registry and dispatch table. Safe for
/// concurrent use - encoding unrelated trees never blocks.
#[derive(Clone)]
pub struct JsonCodec {
    registry: Arc<ObjectRegistry>,
    table: Arc<DispatchTable>,
    creator_tag: String,
}

impl JsonCodec {
    /// Creates a codec over a registry and a frozen dispatch table.
    pub fn new(registry: Arc<ObjectRegistry>, table: Arc<DispatchTable>) -> Self {
        Self {
            registry,
            table,
            creator_tag: DEFAULT_CREATOR_TAG.to_string(),
        }
    }

    /// Overrides the provenance tag recorded for codec registrations.
    pub fn with_creator_tag(mut self, tag: impl Into<String>) -> Self {
        self.creator_tag = tag.into();
        self
    }

    /// The registry this codec registers into and resolves from.
    pub fn registry(&self) -> &Arc<ObjectRegistry> {
        &self.registry
    }

    /// Encodes a value tree as JSON.
    pub fn encode(&self, value: &RuntimeValue) -> Result<Value> {
        match value {
            RuntimeValue::Null => Ok(Value::Null),
            RuntimeValue::Bool(b) => Ok(Value::Bool(*b)),
            RuntimeValue::Int(i) => Ok(Value::from(*i)),
            RuntimeValue::Float(f) => Ok(Value::from(*f)),
            RuntimeValue::Str(s) => Ok(Value::String(s.clone())),
            RuntimeValue::List(items) => {
                let encoded: Result<Vec<Value>> = items.iter().map(|v| self.encode(v)).collect();
                Ok(Value::Array(encoded?))
            }
            RuntimeValue::Map(map) => {
                let mut encoded = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    encoded.insert(key.clone(), self.encode(item)?);
                }
                Ok(Value::Object(encoded))
            }
            RuntimeValue::Object(object) => self.encode_object(object),
        }
    }

    /// Encodes a value tree to a JSON string.
    pub fn encode_string(&self, value: &RuntimeValue) -> Result<String> {
        Ok(serde_json::to_string(&self.encode(value)?)?)
    }

    /// Decodes JSON into a value tree, resolving references in place.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnknownReference`] when a string claims the token
    /// prefix but resolves to nothing.
    pub fn decode(&self, json: &Value) -> Result<RuntimeValue> {
        match json {
            Value::Null => Ok(RuntimeValue::Null),
            Value::Bool(b) => Ok(RuntimeValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RuntimeValue::Int(i))
                } else {
                    Ok(RuntimeValue::Float(n.as_f64().unwrap_or_default()))
                }
            }
            Value::String(s) => self.decode_string(s),
            Value::Array(items) => {
                let decoded: Result<Vec<RuntimeValue>> =
                    items.iter().map(|v| self.decode(v)).collect();
                Ok(RuntimeValue::List(decoded?))
            }
            Value::Object(map) => {
                let mut decoded = BTreeMap::new();
                for (key, item) in map {
                    decoded.insert(key.clone(), self.decode(item)?);
                }
                Ok(RuntimeValue::Map(decoded))
            }
        }
    }

    /// Decodes a JSON string into a value tree.
    pub fn decode_str(&self, body: &str) -> Result<RuntimeValue> {
        self.decode(&serde_json::from_str::<Value>(body)?)
    }

    fn decode_string(&self, s: &str) -> Result<RuntimeValue> {
        let Some(token) = Token::parse(s) else {
            return Ok(RuntimeValue::Str(s.to_string()));
        };

        match self.registry.resolve(&token) {
            Some(object) => {
                debug!(token = %token, class = object.type_name(), "resolved reference");
                Ok(RuntimeValue::Object(object))
            }
            None => {
                warn!(token = %token, "unknown reference in payload");
                Err(CodecError::UnknownReference { token })
            }
        }
    }

    fn encode_object(&self, object: &Arc<dyn RuntimeObject>) -> Result<Value> {
        match self.table.decide(object.as_ref()) {
            Decision::Custom(serializer) => {
                debug!(
                    class = object.type_name(),
                    serializer = serializer.name(),
                    "custom serializer"
                );
                serializer.serialize(object.as_ref())
            }
            Decision::Inline(shape) => match shape.into_json() {
                Some(json) => Ok(json),
                // An inline decision never carries Opaque; register anyway
                // rather than lose the value.
                None => Ok(self.substitute(object)),
            },
            Decision::Reference => Ok(self.substitute(object)),
        }
    }

    fn substitute(&self, object: &Arc<dyn RuntimeObject>) -> Value {
        let token = self
            .registry
            .register(Arc::clone(object), &self.creator_tag);
        debug!(token = %token, class = object.type_name(), "substituted reference");
        Value::String(token.as_str().to_string())
    }
}

impl std::fmt::Debug for JsonCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec")
            .field("creator_tag", &self.creator_tag)
            .field("serializers", &self.table.serializer_count())
            .finish()
    }
}
