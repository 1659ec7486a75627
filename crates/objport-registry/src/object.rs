//! The opaque object contract.
//!
//! Everything the registry stores, and everything the codec has to make a
//! wire decision about, is an [`RuntimeObject`] trait object. The trait
//! carries three concerns:
//!
//! 1. **Identity** - `eq_object`/`hash_object` give the registry value
//!    equality across the trait-object boundary, so registering two equal
//!    values yields one entry and one token.
//! 2. **Capabilities** - tags for the interface families a type belongs to.
//!    Serializer claims, exclusion sets, and the deny list all match on
//!    these tags instead of concrete types.
//! 3. **Wire shape** - an explicit, closed classification of how (and
//!    whether) the value may be flattened into JSON. There is no reflection
//!    probe: a type that declares nothing is [`WireShape::Opaque`] and goes
//!    by reference.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Tag naming an interface/capability family.
///
/// Capabilities are compile-time markers: a type declares the families it
/// implements, and dispatch rules (claims, exclusions, denials) are written
/// against the tags. Two types sharing a tag are interchangeable as far as
/// dispatch is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability(&'static str);

impl Capability {
    /// Creates a capability tag.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The tag name.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// How a value may be rendered into JSON, declared by the type itself.
///
/// The scalar variants cover the numeric wrapper families that render as
/// bare values instead of generic objects. `Fields` is for types whose
/// author intentionally declared a wire representation. `Opaque` means the
/// value has no safe structural form and must travel as a registry token.
#[derive(Debug, Clone, PartialEq)]
pub enum WireShape {
    /// Render as a bare floating-point number.
    Real(f64),

    /// Render as a bare integer.
    Integer(i64),

    /// Render as a `{"real": .., "imaginary": ..}` object.
    Complex {
        /// Real component.
        real: f64,
        /// Imaginary component.
        imaginary: f64,
    },

    /// Render as an object with an author-declared field map.
    Fields(serde_json::Map<String, serde_json::Value>),

    /// No wire shape; the value is reference-only.
    Opaque,
}

impl WireShape {
    /// True for `Opaque`.
    pub fn is_opaque(&self) -> bool {
        matches!(self, WireShape::Opaque)
    }

    /// True for the bare-scalar family shapes (`Real`, `Integer`,
    /// `Complex`), which always flatten regardless of deny rules.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            WireShape::Real(_) | WireShape::Integer(_) | WireShape::Complex { .. }
        )
    }

    /// Renders the shape as a JSON value. `None` for `Opaque`.
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            WireShape::Real(v) => Some(serde_json::Value::from(v)),
            WireShape::Integer(v) => Some(serde_json::Value::from(v)),
            WireShape::Complex { real, imaginary } => {
                let mut fields = serde_json::Map::with_capacity(2);
                fields.insert("real".to_string(), serde_json::Value::from(real));
                fields.insert("imaginary".to_string(), serde_json::Value::from(imaginary));
                Some(serde_json::Value::Object(fields))
            }
            WireShape::Fields(fields) => Some(serde_json::Value::Object(fields)),
            WireShape::Opaque => None,
        }
    }
}

/// A server-side runtime value that may be handed to remote clients.
///
/// Implementations must provide value equality and hashing across the
/// trait-object boundary; the usual pattern is a downcast-and-compare:
///
/// ```rust
/// use std::any::Any;
/// use std::hash::{Hash, Hasher};
/// use objport_registry::RuntimeObject;
///
/// #[derive(PartialEq, Eq, Hash)]
/// struct Session {
///     id: String,
/// }
///
/// impl RuntimeObject for Session {
///     fn type_name(&self) -> &'static str {
///         "Session"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
///         other.as_any().downcast_ref::<Self>() == Some(self)
///     }
///
///     fn hash_object(&self, mut state: &mut dyn Hasher) {
///         self.hash(&mut state);
///     }
/// }
/// ```
pub trait RuntimeObject: Any + Send + Sync {
    /// Runtime type name. Display and error reporting only; wire behavior
    /// never depends on it.
    fn type_name(&self) -> &'static str;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Value equality against another object. Must return `false` for a
    /// different concrete type.
    fn eq_object(&self, other: &dyn RuntimeObject) -> bool;

    /// Hash consistent with `eq_object`.
    fn hash_object(&self, state: &mut dyn Hasher);

    /// Capability families this type belongs to.
    fn capabilities(&self) -> &[Capability] {
        &[]
    }

    /// The declared wire shape. Defaults to `Opaque` (reference-only).
    fn wire_shape(&self) -> WireShape {
        WireShape::Opaque
    }

    /// True if the object carries the given capability tag.
    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl dyn RuntimeObject {
    /// True if the concrete type is `T`.
    pub fn is<T: RuntimeObject>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to a concrete type.
    pub fn downcast_ref<T: RuntimeObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn RuntimeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuntimeObject({})", self.type_name())
    }
}

/// Value-equality key over a shared object, used by the registry's reverse
/// index. The concrete `TypeId` is folded into both hash and equality so
/// equal-looking values of different types never alias one token.
#[derive(Clone)]
pub struct ObjectKey(Arc<dyn RuntimeObject>);

impl ObjectKey {
    /// Wraps an object for reverse-index lookup.
    pub fn new(object: Arc<dyn RuntimeObject>) -> Self {
        Self(object)
    }

    /// The wrapped object.
    pub fn object(&self) -> &Arc<dyn RuntimeObject> {
        &self.0
    }
}

impl PartialEq for ObjectKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_any().type_id() == other.0.as_any().type_id()
            && self.0.eq_object(other.0.as_ref())
    }
}

impl Eq for ObjectKey {}

impl Hash for ObjectKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_any().type_id().hash(state);
        self.0.hash_object(state);
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectKey").field(&self.0.type_name()).finish()
    }
}
