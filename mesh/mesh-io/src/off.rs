//! Object File Format (OFF) support.
//!
//! Layout:
//!
//! ```text
//! OFF
//! <vertices> <faces> <edges>
//! x y z              (one line per vertex)
//! n i1 i2 ... in     (one line per face, 0-based indices)
//! ```
//!
//! `#` starts a comment. The counts may also follow `OFF` on the header
//! line. Face lines may carry colour fields after the declared indices;
//! those are ignored. The edge count is read but not checked.

use std::io::Write;
use std::path::Path;

use mesh_types::{FormatError, FormatResult, IndexedMesh, Vertex};
use tracing::{debug, info, warn};

use crate::text::{content_lines, create, parse_usize, parse_xyz, read_to_string};

/// Declared element counts from the OFF header.
#[derive(Debug, Clone, Copy)]
struct Counts {
    vertices: usize,
    faces: usize,
}

fn parse_counts(fields: &[&str], line: usize) -> FormatResult<Counts> {
    match fields {
        [v, f, ..] => Ok(Counts {
            vertices: parse_usize(v, line)?,
            faces: parse_usize(f, line)?,
        }),
        _ => Err(FormatError::bad_header(format!(
            "line {line}: expected vertex, face and edge counts"
        ))),
    }
}

/// Parse OFF text into a mesh.
///
/// # Errors
///
/// - [`FormatError::BadHeader`] if the first line is not `OFF` or the count
///   line is missing.
/// - [`FormatError::CountMismatch`] if fewer vertex or face lines are present
///   than declared.
/// - [`FormatError::BadLine`] for a malformed vertex or face line.
/// - [`FormatError::BadIndex`] for a face index `>=` the vertex count.
pub fn parse_off(text: &str) -> FormatResult<IndexedMesh> {
    let mut lines = content_lines(text, Some('#'));

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| FormatError::bad_header("missing OFF header"))?;
    let header_fields: Vec<&str> = header.split_whitespace().collect();
    if header_fields.first() != Some(&"OFF") {
        return Err(FormatError::bad_header(format!(
            "expected OFF, found {header:?}"
        )));
    }

    let counts = if header_fields.len() > 1 {
        parse_counts(&header_fields[1..], header_line)?
    } else {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| FormatError::bad_header("missing count line"))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        parse_counts(&fields, line_no)?
    };
    debug!(
        vertices = counts.vertices,
        faces = counts.faces,
        "Read OFF header"
    );

    // Every record needs a line of its own, so the text length bounds the counts.
    let budget = text.len() / 2;
    let mut mesh =
        IndexedMesh::with_capacity(counts.vertices.min(budget), counts.faces.min(budget));

    for found in 0..counts.vertices {
        let (line_no, line) = lines.next().ok_or(FormatError::CountMismatch {
            what: "vertices",
            expected: counts.vertices,
            found,
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [x, y, z] = parse_xyz(&fields, line_no)?;
        mesh.vertices.push(Vertex::from_coords(x, y, z));
    }

    for found in 0..counts.faces {
        let (line_no, line) = lines.next().ok_or(FormatError::CountMismatch {
            what: "faces",
            expected: counts.faces,
            found,
        })?;
        let face = parse_face(line, line_no, found, counts.vertices)?;
        mesh.faces.push(face);
    }

    let trailing = lines.count();
    if trailing > 0 {
        warn!(trailing, "Ignoring lines after the declared OFF faces");
    }
    Ok(mesh)
}

fn parse_face(line: &str, line_no: usize, face: usize, vertex_count: usize) -> FormatResult<Vec<u32>> {
    let mut fields = line.split_whitespace();
    let n = parse_usize(fields.next().unwrap_or_default(), line_no)?;
    if n < 3 {
        return Err(FormatError::bad_line(
            line_no,
            format!("face declares {n} indices, need at least 3"),
        ));
    }

    let mut indices = Vec::with_capacity(n.min(line.len()));
    for token in fields.take(n) {
        let raw: i64 = token.parse().map_err(|_| {
            FormatError::bad_line(line_no, format!("invalid face index {token:?}"))
        })?;
        let index = usize::try_from(raw)
            .ok()
            .filter(|&i| i < vertex_count)
            .and_then(|i| u32::try_from(i).ok())
            .ok_or(FormatError::BadIndex {
                face,
                index: raw,
                vertex_count,
            })?;
        indices.push(index);
    }

    if indices.len() < n {
        return Err(FormatError::bad_line(
            line_no,
            format!("face declares {n} indices, found {}", indices.len()),
        ));
    }
    Ok(indices)
}

/// Write a mesh as OFF text.
///
/// The edge count is written as `0`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_off<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> FormatResult<()> {
    writeln!(writer, "OFF")?;
    writeln!(writer, "{} {} 0", mesh.vertices.len(), mesh.faces.len())?;
    for v in &mesh.vertices {
        let [x, y, z] = v.coords();
        writeln!(writer, "{x} {y} {z}")?;
    }
    for face in &mesh.faces {
        write!(writer, "{}", face.len())?;
        for i in face {
            write!(writer, " {i}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a mesh as an OFF string.
#[must_use]
pub fn write_off_string(mesh: &IndexedMesh) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_off(mesh, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Load a mesh from an OFF file.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if the file does not exist, an I/O
/// error if it cannot be read, or any error from [`parse_off`].
pub fn load_off<P: AsRef<Path>>(path: P) -> FormatResult<IndexedMesh> {
    let path = path.as_ref();
    let mesh = parse_off(&read_to_string(path)?)?;
    info!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Loaded OFF"
    );
    Ok(mesh)
}

/// Save a mesh to an OFF file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_off<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> FormatResult<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    write_off(mesh, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Saved OFF"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{cube, icosahedron};
    use tempfile::tempdir;

    const TRIANGLE: &str = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";

    #[test]
    fn huge_declared_counts_are_count_mismatch() {
        let result = parse_off("OFF\n18446744073709551615 0 0\n");
        assert!(matches!(
            result,
            Err(FormatError::CountMismatch {
                what: "vertices",
                expected: usize::MAX,
                found: 0,
            })
        ));

        let result = parse_off("OFF\n0 100000000000 0\n");
        assert!(matches!(
            result,
            Err(FormatError::CountMismatch {
                what: "faces",
                expected: 100_000_000_000,
                found: 0,
            })
        ));
    }

    #[test]
    fn huge_face_arity_is_bad_line() {
        let text = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n100000000000 0 1 2\n";
        assert!(matches!(
            parse_off(text),
            Err(FormatError::BadLine { line: 6, .. })
        ));
    }

    #[test]
    fn parse_triangle() {
        let mesh = parse_off(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[2].coords(), [0.0, 1.0, 0.0]);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn writer_output_is_canonical() {
        let mesh = parse_off(TRIANGLE).unwrap();
        assert_eq!(write_off_string(&mesh), TRIANGLE);
    }

    #[test]
    fn comments_blank_lines_and_inline_counts() {
        let text = "# exported\nOFF 3 1 3\n\n0 0 0\n# middle\n1 0 0\n0 1 0\n3 0 1 2 255 0 0\n";
        let mesh = parse_off(text).unwrap();
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn missing_header_is_bad_header() {
        assert!(matches!(parse_off(""), Err(FormatError::BadHeader { .. })));
        assert!(matches!(
            parse_off("PLY\n3 1 0\n"),
            Err(FormatError::BadHeader { .. })
        ));
        assert!(matches!(parse_off("OFF\n"), Err(FormatError::BadHeader { .. })));
        assert!(matches!(parse_off("OFF\n3\n"), Err(FormatError::BadHeader { .. })));
    }

    #[test]
    fn too_few_vertices_is_count_mismatch() {
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n");
        assert!(matches!(
            result,
            Err(FormatError::CountMismatch {
                what: "vertices",
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn too_few_faces_is_count_mismatch() {
        let result = parse_off("OFF\n3 2 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
        assert!(matches!(
            result,
            Err(FormatError::CountMismatch {
                what: "faces",
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn out_of_range_index_is_bad_index() {
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n");
        assert!(matches!(
            result,
            Err(FormatError::BadIndex {
                face: 0,
                index: 3,
                vertex_count: 3
            })
        ));

        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 -1 2\n");
        assert!(matches!(result, Err(FormatError::BadIndex { index: -1, .. })));
    }

    #[test]
    fn malformed_face_is_bad_line() {
        // Degenerate arity.
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n2 0 1\n");
        assert!(matches!(result, Err(FormatError::BadLine { line: 6, .. })));

        // Fewer indices than declared.
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n4 0 1 2\n");
        assert!(matches!(result, Err(FormatError::BadLine { line: 6, .. })));
    }

    #[test]
    fn short_vertex_line_is_bad_line() {
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0\n0 1 0\n3 0 1 2\n");
        assert!(matches!(result, Err(FormatError::BadLine { line: 4, .. })));
    }

    #[test]
    fn quads_round_trip() {
        let text = write_off_string(&cube());
        assert!(text.starts_with("OFF\n8 6 0\n"));
        assert_eq!(parse_off(&text).unwrap(), cube());
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ico.off");
        let ico = icosahedron();

        save_off(&ico, &path).unwrap();
        assert_eq!(load_off(&path).unwrap(), ico);
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_off("nonexistent_file_12345.off");
        assert!(matches!(result, Err(FormatError::FileNotFound { .. })));
    }
}
