//! Triangle mesh generation for primitive solids
//!
//! Each primitive kind has its own tessellation routine producing a closed,
//! outward-wound indexed mesh centered on the origin:
//! - Box (8 corners, 12 triangles)
//! - Cylinder (side quads plus two cap fans)
//! - Sphere (UV sphere with pole fans)
//!
//! Meshes are derived on demand from the model and never cached.

mod box_mesh;
mod cylinder;
mod sphere;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::TessellationConfig;
use crate::model::Model;
use crate::primitive::{Primitive, Shape};

pub use box_mesh::generate_box_mesh;
pub use cylinder::{generate_cylinder_mesh, generate_cylinder_mesh_with_segments};
pub use sphere::{generate_sphere_mesh, generate_sphere_mesh_with_segments};

/// Indexed triangle mesh in millimeters.
///
/// Triangles wind counter-clockwise when seen from outside the solid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate triangles as corner positions
    pub fn corners(&self) -> impl ExactSizeIterator<Item = [DVec3; 3]> + '_ {
        self.triangles.iter().map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// Append another mesh, keeping its triangle order
    pub fn append(&mut self, other: Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.triangles.extend(
            other
                .triangles
                .into_iter()
                .map(|[a, b, c]| [a + base, b + base, c + base]),
        );
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: DVec3) {
        if offset == DVec3::ZERO {
            return;
        }
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Bounding box of the vertices referenced by triangles
    pub fn bounds(&self) -> Option<Aabb> {
        let mut corners = self.corners().flatten();
        let first = corners.next()?;
        Some(corners.fold(Aabb::point(first), |acc, p| acc.including(p)))
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Degenerate box around a single point
    pub fn point(p: DVec3) -> Self {
        Self { min: p, max: p }
    }

    /// Grow to include `p`
    pub fn including(self, p: DVec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) / 2.0
    }
}

/// Tessellate one primitive at its position
pub fn tessellate(primitive: &Primitive, config: &TessellationConfig) -> Mesh {
    let mut mesh = match *primitive.shape() {
        Shape::Box {
            width_mm,
            depth_mm,
            height_mm,
        } => generate_box_mesh(width_mm, depth_mm, height_mm),
        Shape::Cylinder {
            radius_mm,
            height_mm,
        } => generate_cylinder_mesh_with_segments(radius_mm, height_mm, config.cylinder_segments),
        Shape::Sphere { radius_mm } => generate_sphere_mesh_with_segments(
            radius_mm,
            config.sphere_lat_segments,
            config.sphere_lon_segments,
        ),
    };
    mesh.translate(primitive.position_mm());
    mesh
}

/// Tessellate every primitive of a model, concatenated in model order.
///
/// Boolean operations recorded in the model are not evaluated here; they
/// leave the mesh unchanged.
pub fn tessellate_model(model: &Model, config: &TessellationConfig) -> Mesh {
    if !model.operations().is_empty() {
        tracing::debug!(
            count = model.operations().len(),
            "Skipping unevaluated boolean operations"
        );
    }

    let mut mesh = Mesh::new();
    for primitive in model.primitives() {
        mesh.append(tessellate(primitive, config));
    }
    tracing::debug!(
        primitives = model.len(),
        triangles = mesh.triangle_count(),
        "Tessellated model"
    );
    mesh
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::command::Command;
    use crate::model::Operation;
    use approx::assert_abs_diff_eq;

    fn model_of(shapes: &[Shape]) -> Model {
        let mut model = Model::new();
        for (i, shape) in shapes.iter().enumerate() {
            let p = Primitive::new(format!("{}-{}", shape.kind().id_prefix(), i + 1), *shape)
                .unwrap();
            model.apply(Command::Add(p)).unwrap();
        }
        model
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = generate_box_mesh(1.0, 1.0, 1.0);
        let before = mesh.vertex_count() as u32;
        mesh.append(generate_box_mesh(2.0, 2.0, 2.0));
        assert_eq!(mesh.triangle_count(), 24);
        assert!(mesh.triangles[12..].iter().flatten().all(|&i| i >= before));
        assert_closed(&mesh);
    }

    #[test]
    fn test_model_mesh_is_ordered_concatenation() {
        let config = TessellationConfig::export();
        let model = model_of(&[
            Shape::cube(10.0),
            Shape::Sphere { radius_mm: 4.0 },
            Shape::Cylinder {
                radius_mm: 2.0,
                height_mm: 8.0,
            },
        ]);
        let mesh = tessellate_model(&model, &config);

        let parts: Vec<Mesh> = model
            .primitives()
            .iter()
            .map(|p| tessellate(p, &config))
            .collect();
        let expected: usize = parts.iter().map(Mesh::triangle_count).sum();
        assert_eq!(mesh.triangle_count(), expected);

        let first: Vec<_> = mesh.corners().take(12).collect();
        let cube: Vec<_> = parts[0].corners().collect();
        assert_eq!(first, cube);

        let last: Vec<_> = mesh.corners().skip(expected - parts[2].triangle_count()).collect();
        let cylinder: Vec<_> = parts[2].corners().collect();
        assert_eq!(last, cylinder);
    }

    #[test]
    fn test_operations_do_not_alter_mesh() {
        let config = TessellationConfig::preview();
        let mut model = model_of(&[Shape::cube(10.0), Shape::Sphere { radius_mm: 6.0 }]);
        let before = tessellate_model(&model, &config);
        model
            .push_operation(Operation::Difference {
                target: "box-1".into(),
                tool: "sphere-2".into(),
            })
            .unwrap();
        assert_eq!(tessellate_model(&model, &config), before);
    }

    #[test]
    fn test_empty_model_has_empty_mesh() {
        let mesh = tessellate_model(&Model::new(), &TessellationConfig::export());
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
    }

    #[test]
    fn test_mesh_bounds_match_primitive_bounds() {
        let config = TessellationConfig::export();
        for shape in [
            Shape::Box {
                width_mm: 3.0,
                depth_mm: 7.0,
                height_mm: 11.0,
            },
            Shape::Cylinder {
                radius_mm: 5.0,
                height_mm: 2.5,
            },
            Shape::Sphere { radius_mm: 9.0 },
        ] {
            let p = Primitive::new("p", shape).unwrap();
            let mesh_bounds = tessellate(&p, &config).bounds().unwrap();
            let analytic = p.bounds();
            for axis in 0..3 {
                assert_abs_diff_eq!(mesh_bounds.min[axis], analytic.min[axis], epsilon = 1e-6);
                assert_abs_diff_eq!(mesh_bounds.max[axis], analytic.max[axis], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_aabb_helpers() {
        let b = Aabb::point(DVec3::new(1.0, 2.0, 3.0)).including(DVec3::new(-1.0, 4.0, 3.0));
        assert_eq!(b.size(), DVec3::new(2.0, 2.0, 0.0));
        assert_eq!(b.center(), DVec3::new(0.0, 3.0, 3.0));
    }
}
