//! Serializer dispatch.
//!
//! For every `Object` node the encoder meets, the dispatch table decides -
//! once, with a pure function of the value's type-level declarations - how
//! it crosses the wire:
//!
//! 1. the first plugin whose claim matches wins;
//! 2. bare-scalar shapes (`Real`, `Integer`, `Complex`) inline
//!    unconditionally;
//! 3. declared field maps inline unless a carried capability is denied;
//! 4. everything else goes by reference through the registry.
//!
//! Conflicts are resolved when the table is built, not at dispatch time:
//! two plugins claiming the same capability are rejected outright
//! (data-independent, so it fails at startup), and overlap between
//! *different* capabilities is resolved first by exclusion sets, then by
//! registration order.

use crate::error::{CodecError, Result};
use crate::plugin::ObjectSerializer;
use objport_registry::{Capability, RuntimeObject, WireShape};
use std::fmt;
use std::sync::Arc;

/// Outcome of a dispatch decision.
pub enum Decision<'a> {
    /// Hand the value to a plugin.
    Custom(&'a dyn ObjectSerializer),

    /// Inline the declared shape.
    Inline(WireShape),

    /// Register the value and emit its token.
    Reference,
}

impl fmt::Debug for Decision<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Custom(serializer) => write!(f, "Custom({})", serializer.name()),
            Decision::Inline(shape) => f.debug_tuple("Inline").field(shape).finish(),
            Decision::Reference => f.write_str("Reference"),
        }
    }
}

/// Immutable, conflict-checked serializer table.
///
/// Built once at startup via [`DispatchTable::builder`]; afterwards
/// `decide` is a pure, total function safe for concurrent use.
pub struct DispatchTable {
    serializers: Vec<Arc<dyn ObjectSerializer>>,
    denied: Vec<String>,
}

impl DispatchTable {
    /// A table with no plugins and no denials.
    pub fn empty() -> Self {
        Self {
            serializers: Vec::new(),
            denied: Vec::new(),
        }
    }

    /// Starts building a table.
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder {
            serializers: Vec::new(),
            denied: Vec::new(),
        }
    }

    /// Decides how a value crosses the wire.
    pub fn decide(&self, object: &dyn RuntimeObject) -> Decision<'_> {
        for serializer in &self.serializers {
            if serializer.claim().matches(object) {
                return Decision::Custom(serializer.as_ref());
            }
        }

        match object.wire_shape() {
            shape if shape.is_scalar() => Decision::Inline(shape),
            WireShape::Fields(fields) if !self.is_denied(object) => {
                Decision::Inline(WireShape::Fields(fields))
            }
            _ => Decision::Reference,
        }
    }

    /// Number of registered plugins.
    pub fn serializer_count(&self) -> usize {
        self.serializers.len()
    }

    fn is_denied(&self, object: &dyn RuntimeObject) -> bool {
        object
            .capabilities()
            .iter()
            .any(|capability| self.denied.iter().any(|denied| denied == capability.name()))
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("serializers", &self.serializers.len())
            .field("denied", &self.denied)
            .finish()
    }
}

/// Builder collecting plugins and deny rules before traffic starts.
pub struct DispatchTableBuilder {
    serializers: Vec<Arc<dyn ObjectSerializer>>,
    denied: Vec<String>,
}

impl DispatchTableBuilder {
    /// Appends a plugin. Order is priority: earlier registrations are
    /// consulted first.
    pub fn serializer(mut self, serializer: Arc<dyn ObjectSerializer>) -> Self {
        self.serializers.push(serializer);
        self
    }

    /// Denies structural flattening for a capability family. Denied values
    /// fall through to reference substitution even when they declare a
    /// field map.
    pub fn deny(self, capability: Capability) -> Self {
        self.deny_named(capability.name())
    }

    /// Denies a capability family by name (for configuration input).
    pub fn deny_named(mut self, name: impl Into<String>) -> Self {
        self.denied.push(name.into());
        self
    }

    /// Validates the collected registrations and freezes the table.
    ///
    /// # Errors
    ///
    /// [`CodecError::AmbiguousSerializer`] when two plugins claim the same
    /// capability; the conflict names both plugins so the misconfigured
    /// pair is obvious at startup.
    pub fn build(self) -> Result<DispatchTable> {
        for (i, first) in self.serializers.iter().enumerate() {
            for second in &self.serializers[i + 1..] {
                if first.claim().capability == second.claim().capability {
                    return Err(CodecError::AmbiguousSerializer {
                        capability: first.claim().capability.name().to_string(),
                        first: first.name().to_string(),
                        second: second.name().to_string(),
                    });
                }
            }
        }

        Ok(DispatchTable {
            serializers: self.serializers,
            denied: self.denied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        dataset_serializer, grid_serializer, plain_grid_serializer, ComplexPhase, Dataset, Grid,
        PixelCount, Roi, Session, Temperature, CAP_GRID, CAP_ROI,
    };

    fn table() -> DispatchTable {
        DispatchTable::builder()
            .serializer(grid_serializer())
            .serializer(dataset_serializer())
            .build()
            .unwrap()
    }

    #[test]
    fn test_plugin_claim_wins() {
        let table = table();

        assert!(matches!(
            table.decide(&Grid::new(2)),
            Decision::Custom(s) if s.name() == "grid"
        ));
    }

    #[test]
    fn test_exclusion_routes_to_specific_plugin() {
        let table = table();

        // A dataset is also a grid; the grid claim excludes datasets, so
        // the dataset plugin takes it.
        assert!(matches!(
            table.decide(&Dataset::new("d")),
            Decision::Custom(s) if s.name() == "dataset"
        ));
    }

    #[test]
    fn test_scalar_shapes_inline() {
        let table = DispatchTable::empty();

        assert!(matches!(
            table.decide(&Temperature(36.6)),
            Decision::Inline(WireShape::Real(_))
        ));
        assert!(matches!(
            table.decide(&PixelCount(1024)),
            Decision::Inline(WireShape::Integer(1024))
        ));
        assert!(matches!(
            table.decide(&ComplexPhase { real: 1.0, imaginary: -1.0 }),
            Decision::Inline(WireShape::Complex { .. })
        ));
    }

    #[test]
    fn test_declared_fields_inline() {
        let table = DispatchTable::empty();

        assert!(matches!(
            table.decide(&Roi::new(1, 2, 3, 4)),
            Decision::Inline(WireShape::Fields(_))
        ));
    }

    #[test]
    fn test_denied_fields_go_by_reference() {
        let table = DispatchTable::builder().deny(CAP_ROI).build().unwrap();

        assert!(matches!(table.decide(&Roi::new(1, 2, 3, 4)), Decision::Reference));
    }

    #[test]
    fn test_deny_does_not_touch_scalars() {
        // Scalar families flatten even when the tag is denied; denial is
        // about unbounded structural dumps, not bare numbers.
        let table = DispatchTable::builder().deny(CAP_GRID).build().unwrap();

        assert!(matches!(
            table.decide(&Temperature(1.0)),
            Decision::Inline(WireShape::Real(_))
        ));
    }

    #[test]
    fn test_opaque_goes_by_reference() {
        let table = table();

        assert!(matches!(table.decide(&Session::new("s")), Decision::Reference));
    }

    #[test]
    fn test_duplicate_capability_rejected_at_build() {
        let result = DispatchTable::builder()
            .serializer(grid_serializer())
            .serializer(grid_serializer())
            .build();

        match result {
            Err(CodecError::AmbiguousSerializer { capability, .. }) => {
                assert_eq!(capability, CAP_GRID.name());
            }
            other => panic!("expected AmbiguousSerializer, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_distinct_capabilities_coexist() {
        assert_eq!(table().serializer_count(), 2);
    }

    #[test]
    fn test_registration_order_is_priority() {
        // Without the exclusion, the first registration would shadow the
        // second for values carrying both tags.
        let shadowing = DispatchTable::builder()
            .serializer(plain_grid_serializer())
            .serializer(dataset_serializer())
            .build()
            .unwrap();

        assert!(matches!(
            shadowing.decide(&Dataset::new("d")),
            Decision::Custom(s) if s.name() == "grid-plain"
        ));
    }
}
