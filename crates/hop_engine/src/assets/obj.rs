//! OBJ file loader for collision meshes
//!
//! Parses the position (`v`) and face (`f`) records of a Wavefront OBJ file
//! into mesh-collider input: a vertex list plus triangulated index triples.
//! Texture coordinates and normals are ignored; collision triangles carry
//! their own computed normals.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Vec3;

/// Errors produced while parsing an OBJ file
#[derive(Error, Debug)]
pub enum ObjError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A record could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The file was structurally invalid
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Parsed collision mesh data, ready for the triangle world builder
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Local-space vertex positions
    pub vertices: Vec<Vec3>,
    /// Triangle index triples; polygonal faces are fan-triangulated
    pub faces: Vec<[u32; 3]>,
}

/// Parse OBJ text into collision mesh data.
pub fn parse_obj_str(source: &str) -> Result<MeshData, ObjError> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(ObjError::ParseError(format!("short vertex record: {line}")));
                }
                let x = parse_coord(parts[1])?;
                let y = parse_coord(parts[2])?;
                let z = parse_coord(parts[3])?;
                vertices.push(Vec3::new(x, y, z));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(ObjError::ParseError(format!("face with fewer than 3 vertices: {line}")));
                }
                let mut indices = Vec::with_capacity(parts.len() - 1);
                for part in &parts[1..] {
                    indices.push(parse_face_index(part, vertices.len())?);
                }
                // Fan triangulation of polygonal faces.
                for i in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            // vn, vt, o, g, s, usemtl, mtllib: irrelevant for collision.
            _ => {}
        }
    }

    if vertices.is_empty() {
        return Err(ObjError::InvalidFormat("no vertices found in OBJ data".to_string()));
    }
    if faces.is_empty() {
        return Err(ObjError::InvalidFormat("no faces found in OBJ data".to_string()));
    }

    Ok(MeshData { vertices, faces })
}

/// Read and parse an OBJ file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<MeshData, ObjError> {
    parse_obj_str(&fs::read_to_string(path)?)
}

fn parse_coord(text: &str) -> Result<f32, ObjError> {
    text.parse()
        .map_err(|_| ObjError::ParseError(format!("invalid coordinate: {text}")))
}

/// Parse one `f` vertex reference (`idx`, `idx/uv`, or `idx/uv/n`) into a
/// zero-based position index, validating it against the vertices seen so far.
fn parse_face_index(part: &str, vertex_count: usize) -> Result<u32, ObjError> {
    let position = part.split('/').next().unwrap_or("");
    let index: i64 = position
        .parse()
        .map_err(|_| ObjError::ParseError(format!("invalid face index: {part}")))?;
    if index < 1 {
        // OBJ indices are 1-based; negative (relative) references are rare
        // in level exports and deliberately unsupported.
        return Err(ObjError::InvalidFormat(format!("unsupported face index: {index}")));
    }
    let zero_based = (index - 1) as usize;
    if zero_based >= vertex_count {
        return Err(ObjError::InvalidFormat(format!(
            "face index {index} out of bounds ({vertex_count} vertices)"
        )));
    }
    Ok(zero_based as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
# a unit quad in the XZ plane
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 0.0 1.0
v -1.0 0.0 1.0
f 1 2 3 4
";

    #[test]
    fn test_quad_fan_triangulates() {
        let mesh = parse_obj_str(QUAD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_relative_eq!(mesh.vertices[0], Vec3::new(-1.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_slash_formats_use_position_index() {
        let source = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 0.0 1.0
vt 0.0 0.0
vn 0.0 1.0 0.0
f 1/1/1 2/1/1 3/1/1
";
        let mesh = parse_obj_str(source).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_out_of_bounds_face_index() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 9\n";
        assert!(matches!(parse_obj_str(source), Err(ObjError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_obj_is_invalid() {
        assert!(matches!(parse_obj_str("# nothing\n"), Err(ObjError::InvalidFormat(_))));
    }

    #[test]
    fn test_bad_coordinate_is_parse_error() {
        let source = "v 0 zero 0\n";
        assert!(matches!(parse_obj_str(source), Err(ObjError::ParseError(_))));
    }
}
