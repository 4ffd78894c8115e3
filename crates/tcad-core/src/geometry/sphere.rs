//! Sphere mesh generation (UV sphere)

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use super::Mesh;
use crate::constants::MAX_SEGMENTS;

/// Generate a UV sphere mesh at export resolution
pub fn generate_sphere_mesh(radius: f64) -> Mesh {
    use crate::constants::{SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS};
    generate_sphere_mesh_with_segments(radius, SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS)
}

/// Generate a UV sphere mesh with custom resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `lat_segments` - Latitude bands pole to pole, clamped to `2..=MAX_SEGMENTS`
/// * `lon_segments` - Longitude segments, clamped to `3..=MAX_SEGMENTS`
///
/// The poles are single vertices on the Y axis. The first and last band are
/// triangle fans around them; the bands in between are split quads.
pub fn generate_sphere_mesh_with_segments(
    radius: f64,
    lat_segments: u32,
    lon_segments: u32,
) -> Mesh {
    let lat = lat_segments.clamp(2, MAX_SEGMENTS);
    let lon = lon_segments.clamp(3, MAX_SEGMENTS);
    let rings = lat - 1;

    let mut vertices = Vec::with_capacity((rings * lon + 2) as usize);
    let north = 0;
    vertices.push(DVec3::new(0.0, radius, 0.0));
    for k in 1..lat {
        let theta = PI * k as f64 / lat as f64;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for j in 0..lon {
            let phi = TAU * j as f64 / lon as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let dir = DVec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            vertices.push(dir * radius);
        }
    }
    let south = vertices.len() as u32;
    vertices.push(DVec3::new(0.0, -radius, 0.0));

    let ring = |k: u32, j: u32| 1 + k * lon + (j % lon);

    let mut triangles = Vec::with_capacity((2 * lon * (lat - 1)) as usize);
    for j in 0..lon {
        triangles.push([north, ring(0, j + 1), ring(0, j)]);
    }
    for k in 0..rings - 1 {
        for j in 0..lon {
            let (upper_i, upper_j) = (ring(k, j), ring(k, j + 1));
            let (lower_i, lower_j) = (ring(k + 1, j), ring(k + 1, j + 1));
            triangles.push([lower_i, upper_i, upper_j]);
            triangles.push([lower_i, upper_j, lower_j]);
        }
    }
    for j in 0..lon {
        triangles.push([south, ring(rings - 1, j), ring(rings - 1, j + 1)]);
    }

    Mesh {
        vertices,
        triangles,
    }
}
