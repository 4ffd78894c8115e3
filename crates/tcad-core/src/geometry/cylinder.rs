//! Cylinder mesh generation (with end caps)

use std::f64::consts::TAU;

use glam::DVec3;

use super::Mesh;
use crate::constants::MAX_SEGMENTS;

/// Fewest segments that still enclose a volume
const MIN_SEGMENTS: u32 = 3;

/// Generate a cylinder mesh along the Y axis at export resolution
///
/// # Arguments
/// * `radius` - Cylinder radius
/// * `height` - Cylinder height (along Y, centered on the origin)
pub fn generate_cylinder_mesh(radius: f64, height: f64) -> Mesh {
    use crate::constants::CYLINDER_SEGMENTS;
    generate_cylinder_mesh_with_segments(radius, height, CYLINDER_SEGMENTS)
}

/// Generate a cylinder mesh with custom segment count.
///
/// `segments` is clamped to `3..=MAX_SEGMENTS`. Rings share their vertices
/// with the caps and the last segment wraps back to the first, so the mesh
/// is closed with no seam.
///
/// Layout: bottom ring `0..n`, top ring `n..2n`, bottom center `2n`,
/// top center `2n + 1`; `4n` triangles.
pub fn generate_cylinder_mesh_with_segments(radius: f64, height: f64, segments: u32) -> Mesh {
    let n = segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
    let half_height = height / 2.0;

    let mut vertices = Vec::with_capacity(2 * n as usize + 2);
    for y in [-half_height, half_height] {
        for i in 0..n {
            let theta = TAU * i as f64 / n as f64;
            vertices.push(DVec3::new(radius * theta.cos(), y, radius * theta.sin()));
        }
    }
    let bottom_center = vertices.len() as u32;
    vertices.push(DVec3::new(0.0, -half_height, 0.0));
    let top_center = vertices.len() as u32;
    vertices.push(DVec3::new(0.0, half_height, 0.0));

    let mut triangles = Vec::with_capacity(4 * n as usize);
    for i in 0..n {
        let j = (i + 1) % n;
        let (bottom_i, bottom_j) = (i, j);
        let (top_i, top_j) = (n + i, n + j);

        // Side quad
        triangles.push([bottom_i, top_i, top_j]);
        triangles.push([bottom_i, top_j, bottom_j]);

        // Caps
        triangles.push([top_center, top_j, top_i]);
        triangles.push([bottom_center, bottom_i, bottom_j]);
    }

    Mesh {
        vertices,
        triangles,
    }
}
