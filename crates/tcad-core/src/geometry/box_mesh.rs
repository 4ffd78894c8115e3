//! Box (rectangular prism) mesh generation

use glam::DVec3;

use super::Mesh;

/// Corner sign pattern, indexed 0..8: bit 0 = +X, bit 1 = +Y, bit 2 = +Z
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Faces as corner quads, counter-clockwise seen from outside
const FACES: [[u32; 4]; 6] = [
    [1, 3, 7, 5], // +X
    [0, 4, 6, 2], // -X
    [2, 6, 7, 3], // +Y (top)
    [0, 1, 5, 4], // -Y (bottom)
    [4, 5, 7, 6], // +Z
    [0, 2, 3, 1], // -Z
];

/// Generate a box mesh centered on the origin
///
/// # Arguments
/// * `width` - extent along X
/// * `depth` - extent along Z
/// * `height` - extent along Y
///
/// # Returns
/// 8 shared corner vertices and 12 triangles (2 per face)
pub fn generate_box_mesh(width: f64, depth: f64, height: f64) -> Mesh {
    let half = DVec3::new(width, height, depth) / 2.0;

    let vertices = CORNERS
        .iter()
        .map(|sign| DVec3::from_array(*sign) * half)
        .collect();

    let mut triangles = Vec::with_capacity(12);
    for [a, b, c, d] in FACES {
        triangles.push([a, b, c]);
        triangles.push([a, c, d]);
    }

    Mesh {
        vertices,
        triangles,
    }
}
