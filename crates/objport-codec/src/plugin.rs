//! Custom serializer plugins.
//!
//! A plugin overrides the default inline-vs-reference decision for a
//! capability family: it declares a [`Claim`] and renders claimed values
//! itself. Plugins are collected before the first request; the dispatch
//! table never changes afterwards.

use crate::error::Result;
use objport_registry::{Capability, RuntimeObject};

/// A tagged-variant matcher: which values a serializer takes.
///
/// A claim matches a value when the value carries the claimed capability
/// and none of the excluded ones. Exclusions let a generic family
/// serializer step aside for a more specific one - the "any n-dimensional
/// interval" renderer excludes `dataset` so the dataset renderer is not
/// shadowed for values that are both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// The capability this serializer handles.
    pub capability: Capability,

    /// Capabilities whose presence opts a value out of this claim.
    pub excludes: Vec<Capability>,
}

impl Claim {
    /// Claims a capability with no exclusions.
    pub fn on(capability: Capability) -> Self {
        Self {
            capability,
            excludes: Vec::new(),
        }
    }

    /// Adds an exclusion.
    pub fn excluding(mut self, capability: Capability) -> Self {
        self.excludes.push(capability);
        self
    }

    /// True if this claim takes the given value.
    pub fn matches(&self, object: &dyn RuntimeObject) -> bool {
        object.has_capability(self.capability)
            && !self
                .excludes
                .iter()
                .any(|&excluded| object.has_capability(excluded))
    }
}

/// An externally supplied serialization strategy for a capability family.
pub trait ObjectSerializer: Send + Sync {
    /// Plugin name, for conflict reporting and logs.
    fn name(&self) -> &str;

    /// The claim describing which values this serializer takes.
    fn claim(&self) -> &Claim;

    /// Renders a claimed value as JSON.
    fn serialize(&self, object: &dyn RuntimeObject) -> Result<serde_json::Value>;
}
