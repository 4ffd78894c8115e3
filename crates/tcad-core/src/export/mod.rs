//! Mesh export (STL)
//!
//! Both formats write triangles in mesh order with face normals computed as
//! `normalize(cross(b - a, c - a))`. Degenerate triangles get a zero normal.

mod stl_ascii;
mod stl_binary;

use glam::DVec3;

use crate::constants::{DEFAULT_SOLID_NAME, NORMAL_EPSILON};
use crate::geometry::Mesh;

pub use stl_ascii::export_stl_ascii;
pub use stl_binary::export_stl_binary;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Textual `solid ... endsolid` STL
    #[default]
    StlAscii,
    /// 80-byte header, triangle count, 50-byte records
    StlBinary,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::StlAscii => "STL (ASCII)",
            ExportFormat::StlBinary => "STL (binary)",
        }
    }

    pub const ALL: &'static [ExportFormat] = &[ExportFormat::StlAscii, ExportFormat::StlBinary];
}

/// Serialize a mesh in the given format
pub fn export_mesh(mesh: &Mesh, format: ExportFormat, name: &str) -> Result<Vec<u8>, ExportError> {
    let bytes = match format {
        ExportFormat::StlAscii => export_stl_ascii(mesh, name)?,
        ExportFormat::StlBinary => export_stl_binary(mesh)?,
    };
    tracing::info!(
        format = format.name(),
        triangles = mesh.triangle_count(),
        bytes = bytes.len(),
        "Exported mesh"
    );
    Ok(bytes)
}

/// Unit face normal, or zero for a degenerate triangle.
///
/// Edges are rescaled by their largest component before the cross product,
/// so the result does not depend on the size of the triangle. A triangle is
/// degenerate when its edges are parallel to within `NORMAL_EPSILON`.
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let (ab, ac) = (b - a, c - a);
    let scale = ab.abs().max(ac.abs()).max_element();
    if !scale.is_finite() || scale == 0.0 {
        return DVec3::ZERO;
    }
    let (ab, ac) = (ab / scale, ac / scale);
    let cross = ab.cross(ac);
    let len = cross.length();
    if len <= NORMAL_EPSILON * ab.length() * ac.length() {
        DVec3::ZERO
    } else {
        cross / len
    }
}

/// Make a solid name safe for a single-token STL header
pub fn sanitize_solid_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        DEFAULT_SOLID_NAME.to_string()
    } else {
        sanitized
    }
}

/// Export-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export: the model is empty")]
    EmptyModel,
    #[error("Write error: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal() {
        let n = face_normal(DVec3::ZERO, DVec3::X * 2.0, DVec3::Y * 3.0);
        assert!(n.abs_diff_eq(DVec3::Z, 1e-12), "{n:?}");
    }

    #[test]
    fn test_face_normal_at_extreme_scales() {
        for scale in [1e-9, 1e-3, 1e6, 1e200] {
            let n = face_normal(DVec3::ZERO, DVec3::X * scale, DVec3::Y * scale);
            assert!(n.abs_diff_eq(DVec3::Z, 1e-12), "scale {scale}: {n:?}");
        }
        let far = DVec3::splat(f64::MAX);
        assert_eq!(face_normal(-far, far, DVec3::ZERO), DVec3::ZERO);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(face_normal(p, p, p), DVec3::ZERO);
        assert_eq!(face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0), DVec3::ZERO);
    }

    #[test]
    fn test_sanitize_solid_name() {
        assert_eq!(sanitize_solid_name("my part"), "my_part");
        assert_eq!(sanitize_solid_name("  "), "model");
        assert_eq!(sanitize_solid_name("bracket-v2.1"), "bracket-v2.1");
    }

    #[test]
    fn test_empty_mesh_is_rejected_in_every_format() {
        for format in ExportFormat::ALL {
            assert_eq!(
                export_mesh(&Mesh::new(), *format, "x"),
                Err(ExportError::EmptyModel)
            );
        }
    }
}
