//! ASCII STL writer

use std::fmt::Write;

use glam::DVec3;

use super::{ExportError, face_normal, sanitize_solid_name};
use crate::geometry::Mesh;

/// Values closer to zero than half the last printed digit are written as zero
const ZERO_SNAP: f64 = 5e-7;

fn number(v: f64) -> String {
    if v.abs() < ZERO_SNAP {
        "0.000000".to_string()
    } else {
        format!("{v:.6}")
    }
}

fn triple(v: DVec3) -> String {
    format!("{} {} {}", number(v.x), number(v.y), number(v.z))
}

/// Serialize a mesh as ASCII STL.
///
/// ```text
/// solid <name>
/// facet normal <nx> <ny> <nz>
///   outer loop
///     vertex <x> <y> <z>
///     ...
///   endloop
/// endfacet
/// endsolid <name>
/// ```
pub fn export_stl_ascii(mesh: &Mesh, name: &str) -> Result<Vec<u8>, ExportError> {
    if mesh.is_empty() {
        return Err(ExportError::EmptyModel);
    }
    let name = sanitize_solid_name(name);

    // ~250 bytes per facet
    let mut out = String::with_capacity(64 + mesh.triangle_count() * 256);
    writeln!(out, "solid {name}").map_err(|e| ExportError::Write(e.to_string()))?;
    for [a, b, c] in mesh.corners() {
        let n = face_normal(a, b, c);
        write!(
            out,
            "facet normal {}\n  outer loop\n    vertex {}\n    vertex {}\n    vertex {}\n  endloop\nendfacet\n",
            triple(n),
            triple(a),
            triple(b),
            triple(c),
        )
        .map_err(|e| ExportError::Write(e.to_string()))?;
    }
    writeln!(out, "endsolid {name}").map_err(|e| ExportError::Write(e.to_string()))?;

    Ok(out.into_bytes())
}
