//! Primitive solids held by the model

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DIMENSION_MM, MIN_DIMENSION_MM};
use crate::geometry::Aabb;
use crate::grammar::PromptError;

/// Supported solid kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Box,
    Cylinder,
    Sphere,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Box => "Box",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Sphere => "Sphere",
        }
    }

    /// Lower-case prefix used in generated ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Sphere => "sphere",
        }
    }

    pub const ALL: &'static [PrimitiveKind] = &[
        PrimitiveKind::Box,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Sphere,
    ];
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific dimensions, all in millimeters.
///
/// Axes are Y-up: box width runs along X, height along Y, depth along Z;
/// cylinders stand on the Y axis; sphere poles sit on the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "lowercase")]
pub enum Shape {
    Box {
        width_mm: f64,
        depth_mm: f64,
        height_mm: f64,
    },
    Cylinder {
        radius_mm: f64,
        height_mm: f64,
    },
    Sphere {
        radius_mm: f64,
    },
}

impl Shape {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Shape::Box { .. } => PrimitiveKind::Box,
            Shape::Cylinder { .. } => PrimitiveKind::Cylinder,
            Shape::Sphere { .. } => PrimitiveKind::Sphere,
        }
    }

    /// Uniform box with the given side length
    pub fn cube(side_mm: f64) -> Self {
        Shape::Box {
            width_mm: side_mm,
            depth_mm: side_mm,
            height_mm: side_mm,
        }
    }

    fn dimensions(&self) -> Vec<f64> {
        match *self {
            Shape::Box {
                width_mm,
                depth_mm,
                height_mm,
            } => vec![width_mm, depth_mm, height_mm],
            Shape::Cylinder {
                radius_mm,
                height_mm,
            } => vec![radius_mm, height_mm],
            Shape::Sphere { radius_mm } => vec![radius_mm],
        }
    }

    /// Check that every dimension is finite and within
    /// `MIN_DIMENSION_MM..=MAX_DIMENSION_MM`
    pub fn validate(&self) -> Result<(), PromptError> {
        match self
            .dimensions()
            .into_iter()
            .find(|v| !(MIN_DIMENSION_MM..=MAX_DIMENSION_MM).contains(v))
        {
            Some(bad) => Err(PromptError::InvalidDimension(bad)),
            None => Ok(()),
        }
    }

    /// Half extents of the analytic bounding box (X, Y, Z)
    pub fn half_extents(&self) -> DVec3 {
        match *self {
            Shape::Box {
                width_mm,
                depth_mm,
                height_mm,
            } => DVec3::new(width_mm, height_mm, depth_mm) / 2.0,
            Shape::Cylinder {
                radius_mm,
                height_mm,
            } => DVec3::new(radius_mm, height_mm / 2.0, radius_mm),
            Shape::Sphere { radius_mm } => DVec3::splat(radius_mm),
        }
    }
}

/// One validated solid instance.
///
/// Fields are private: the only ways in are [`Primitive::new`] and
/// deserialization, and both validate the shape first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PrimitiveData")]
pub struct Primitive {
    id: String,
    shape: Shape,
    position_mm: DVec3,
}

impl Primitive {
    /// Create a primitive centered at the origin
    pub fn new(id: impl Into<String>, shape: Shape) -> Result<Self, PromptError> {
        shape.validate()?;
        Ok(Self {
            id: id.into(),
            shape,
            position_mm: DVec3::ZERO,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.shape.kind()
    }

    /// Center of the primitive in millimeters
    pub fn position_mm(&self) -> DVec3 {
        self.position_mm
    }

    /// Analytic axis-aligned bounding box
    pub fn bounds(&self) -> Aabb {
        let half = self.shape.half_extents();
        Aabb {
            min: self.position_mm - half,
            max: self.position_mm + half,
        }
    }
}

/// Unvalidated wire form of [`Primitive`]
#[derive(Debug, Deserialize)]
struct PrimitiveData {
    id: String,
    shape: Shape,
    #[serde(default)]
    position_mm: DVec3,
}

impl TryFrom<PrimitiveData> for Primitive {
    type Error = PromptError;

    fn try_from(data: PrimitiveData) -> Result<Self, Self::Error> {
        let mut primitive = Primitive::new(data.id, data.shape)?;
        if let Some(bad) = data
            .position_mm
            .to_array()
            .into_iter()
            .find(|v| !v.is_finite())
        {
            return Err(PromptError::InvalidDimension(bad));
        }
        primitive.position_mm = data.position_mm;
        Ok(primitive)
    }
}
