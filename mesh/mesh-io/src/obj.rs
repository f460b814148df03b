//! Wavefront OBJ support (the `v` / `f` subset).
//!
//! Only vertex positions and polygon faces are modelled. Every other
//! statement (`vn`, `vt`, `o`, `g`, `usemtl`, ...) is skipped and counted.
//!
//! Face indices are resolved against the vertices declared so far:
//! positive indices are 1-based, negative indices count back from the most
//! recent vertex, and `0` or a forward reference is a [`FormatError::BadIndex`].
//!
//! # Example
//!
//! ```
//! use mesh_io::{parse_obj, write_obj_string};
//!
//! let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
//! assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
//! assert_eq!(write_obj_string(&mesh), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
//! ```

use std::io::Write;
use std::path::Path;

use mesh_types::{FormatError, FormatResult, IndexedMesh, Vertex};
use tracing::{debug, info, warn};

use crate::text::{content_lines, create, parse_xyz, read_to_string};

/// Parse OBJ text into a mesh.
///
/// # Errors
///
/// - [`FormatError::BadLine`] for a `v` line with fewer than three numbers,
///   a face with fewer than three indices, or a token that does not parse.
/// - [`FormatError::BadIndex`] for a face index that does not resolve to a
///   vertex declared earlier in the file.
pub fn parse_obj(text: &str) -> FormatResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut ignored = 0usize;

    for (line_no, line) in content_lines(text, Some('#')) {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let fields: Vec<&str> = fields.collect();
                let [x, y, z] = parse_xyz(&fields, line_no)?;
                mesh.vertices.push(Vertex::from_coords(x, y, z));
            }
            Some("f") => {
                let face = parse_face(fields, line_no, mesh.faces.len(), mesh.vertices.len())?;
                mesh.faces.push(face);
            }
            _ => ignored += 1,
        }
    }

    if ignored > 0 {
        debug!(ignored, "Skipped unsupported OBJ statements");
    }
    Ok(mesh)
}

fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
    face: usize,
    vertex_count: usize,
) -> FormatResult<Vec<u32>> {
    let indices = tokens
        .map(|token| {
            // `i`, `i/t`, `i//n` and `i/t/n` all carry the position index first.
            let position = token.split('/').next().unwrap_or(token);
            let raw: i64 = position.parse().map_err(|_| {
                FormatError::bad_line(line, format!("invalid face index {token:?}"))
            })?;
            resolve_index(raw, face, vertex_count)
        })
        .collect::<FormatResult<Vec<u32>>>()?;

    if indices.len() < 3 {
        return Err(FormatError::bad_line(
            line,
            format!("face needs at least 3 indices, found {}", indices.len()),
        ));
    }
    Ok(indices)
}

fn resolve_index(raw: i64, face: usize, vertex_count: usize) -> FormatResult<u32> {
    let available = i64::try_from(vertex_count).unwrap_or(i64::MAX);
    let resolved = match raw {
        1.. => raw - 1,
        ..=-1 => available + raw,
        0 => -1,
    };
    if (0..available).contains(&resolved) {
        if let Ok(index) = u32::try_from(resolved) {
            return Ok(index);
        }
    }
    Err(FormatError::BadIndex {
        face,
        index: raw,
        vertex_count,
    })
}

/// Write a mesh as OBJ text.
///
/// Faces are written with 1-based indices. Coordinates use the shortest
/// representation that parses back to the same `f64`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_obj<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> FormatResult<()> {
    for v in &mesh.vertices {
        let [x, y, z] = v.coords();
        writeln!(writer, "v {x} {y} {z}")?;
    }
    for face in &mesh.faces {
        write!(writer, "f")?;
        for &i in face {
            write!(writer, " {}", u64::from(i) + 1)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a mesh as an OBJ string.
#[must_use]
pub fn write_obj_string(mesh: &IndexedMesh) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_obj(mesh, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if the file does not exist, an I/O
/// error if it cannot be read, or any error from [`parse_obj`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("model.obj").unwrap();
/// println!("Loaded {} vertices", mesh.vertices.len());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> FormatResult<IndexedMesh> {
    let path = path.as_ref();
    let mesh = parse_obj(&read_to_string(path)?)?;
    if mesh.vertices.is_empty() {
        warn!(path = %path.display(), "OBJ file has no vertices");
    }
    info!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Loaded OBJ"
    );
    Ok(mesh)
}

/// Save a mesh to an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> FormatResult<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Saved OBJ"
    );
    Ok(())
}
