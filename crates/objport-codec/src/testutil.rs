//! Sample domain types and plugins shared across the crate's tests.

use crate::error::{CodecError, Result};
use crate::plugin::{Claim, ObjectSerializer};
use objport_registry::{Capability, RuntimeObject, WireShape};
use serde_json::json;
use std::any::Any;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub(crate) const CAP_GRID: Capability = Capability::new("grid");
pub(crate) const CAP_DATASET: Capability = Capability::new("dataset");
pub(crate) const CAP_ROI: Capability = Capability::new("roi");

/// Bare-real scalar family member.
#[derive(PartialEq)]
pub(crate) struct Temperature(pub f64);

impl RuntimeObject for Temperature {
    fn type_name(&self) -> &'static str {
        "Temperature"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.0.to_bits().hash(&mut state);
    }

    fn wire_shape(&self) -> WireShape {
        WireShape::Real(self.0)
    }
}

/// Bare-integer scalar family member.
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct PixelCount(pub i64);

impl RuntimeObject for PixelCount {
    fn type_name(&self) -> &'static str {
        "PixelCount"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn wire_shape(&self) -> WireShape {
        WireShape::Integer(self.0)
    }
}

/// Two-component scalar family member.
#[derive(PartialEq)]
pub(crate) struct ComplexPhase {
    pub real: f64,
    pub imaginary: f64,
}

impl RuntimeObject for ComplexPhase {
    fn type_name(&self) -> &'static str {
        "ComplexPhase"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.real.to_bits().hash(&mut state);
        self.imaginary.to_bits().hash(&mut state);
    }

    fn wire_shape(&self) -> WireShape {
        WireShape::Complex {
            real: self.real,
            imaginary: self.imaginary,
        }
    }
}

/// Type with an author-declared field map and a deniable capability.
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct Roi {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

impl Roi {
    pub(crate) fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }
}

impl RuntimeObject for Roi {
    fn type_name(&self) -> &'static str {
        "Roi"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn capabilities(&self) -> &[Capability] {
        &[CAP_ROI]
    }

    fn wire_shape(&self) -> WireShape {
        let mut fields = serde_json::Map::new();
        fields.insert("x".to_string(), json!(self.x));
        fields.insert("y".to_string(), json!(self.y));
        fields.insert("width".to_string(), json!(self.width));
        fields.insert("height".to_string(), json!(self.height));
        WireShape::Fields(fields)
    }
}

/// Opaque value: no shape, no capabilities, reference-only.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct Session {
    id: String,
}

impl Session {
    pub(crate) fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl RuntimeObject for Session {
    fn type_name(&self) -> &'static str {
        "Session"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// Generic grid-family value.
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct Grid {
    dims: u32,
}

impl Grid {
    pub(crate) fn new(dims: u32) -> Self {
        Self { dims }
    }
}

impl RuntimeObject for Grid {
    fn type_name(&self) -> &'static str {
        "Grid"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn capabilities(&self) -> &[Capability] {
        &[CAP_GRID]
    }
}

/// Dataset value: carries the grid capability *and* its own.
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct Dataset {
    name: String,
}

impl Dataset {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl RuntimeObject for Dataset {
    fn type_name(&self) -> &'static str {
        "Dataset"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn RuntimeObject) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn hash_object(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn capabilities(&self) -> &[Capability] {
        &[CAP_GRID, CAP_DATASET]
    }
}

struct GridSerializer {
    name: &'static str,
    claim: Claim,
}

impl ObjectSerializer for GridSerializer {
    fn name(&self) -> &str {
        self.name
    }

    fn claim(&self) -> &Claim {
        &self.claim
    }

    fn serialize(&self, object: &dyn RuntimeObject) -> Result<serde_json::Value> {
        match object.downcast_ref::<Grid>() {
            Some(grid) => Ok(json!({"kind": "grid", "dims": grid.dims})),
            None => Err(CodecError::Serializer {
                name: self.name.to_string(),
                message: format!("cannot render '{}'", object.type_name()),
            }),
        }
    }
}

/// Grid serializer that steps aside for datasets.
pub(crate) fn grid_serializer() -> Arc<dyn ObjectSerializer> {
    Arc::new(GridSerializer {
        name: "grid",
        claim: Claim::on(CAP_GRID).excluding(CAP_DATASET),
    })
}

/// Grid serializer with no exclusion, for shadowing scenarios.
pub(crate) fn plain_grid_serializer() -> Arc<dyn ObjectSerializer> {
    Arc::new(GridSerializer {
        name: "grid-plain",
        claim: Claim::on(CAP_GRID),
    })
}

struct DatasetSerializer {
    claim: Claim,
}

impl ObjectSerializer for DatasetSerializer {
    fn name(&self) -> &str {
        "dataset"
    }

    fn claim(&self) -> &Claim {
        &self.claim
    }

    fn serialize(&self, object: &dyn RuntimeObject) -> Result<serde_json::Value> {
        match object.downcast_ref::<Dataset>() {
            Some(dataset) => Ok(json!({"kind": "dataset", "name": dataset.name})),
            None => Err(CodecError::Serializer {
                name: "dataset".to_string(),
                message: format!("cannot render '{}'", object.type_name()),
            }),
        }
    }
}

/// Serializer for the dataset capability.
pub(crate) fn dataset_serializer() -> Arc<dyn ObjectSerializer> {
    Arc::new(DatasetSerializer {
        claim: Claim::on(CAP_DATASET),
    })
}
