//! Binary STL writer

use glam::DVec3;

use super::{ExportError, face_normal};
use crate::geometry::Mesh;

fn to_f32(v: DVec3) -> [f32; 3] {
    v.as_vec3().to_array()
}

/// Serialize a mesh as binary STL (same triangle order and normals as ASCII)
pub fn export_stl_binary(mesh: &Mesh) -> Result<Vec<u8>, ExportError> {
    if mesh.is_empty() {
        return Err(ExportError::EmptyModel);
    }

    let triangles: Vec<stl_io::Triangle> = mesh
        .corners()
        .map(|[a, b, c]| stl_io::Triangle {
            normal: stl_io::Normal::new(to_f32(face_normal(a, b, c))),
            vertices: [
                stl_io::Vertex::new(to_f32(a)),
                stl_io::Vertex::new(to_f32(b)),
                stl_io::Vertex::new(to_f32(c)),
            ],
        })
        .collect();

    let mut bytes = Vec::with_capacity(84 + triangles.len() * 50);
    stl_io::write_stl(&mut bytes, triangles.iter()).map_err(|e| ExportError::Write(e.to_string()))?;
    Ok(bytes)
}
