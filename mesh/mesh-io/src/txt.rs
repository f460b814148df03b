//! Plain-text point cloud format.
//!
//! ```text
//! <n>
//! x y z
//! ...        (exactly n lines)
//! ```

use std::io::Write;
use std::path::Path;

use mesh_types::{FormatError, FormatResult, PointCloud};
use nalgebra::Point3;
use tracing::info;

use crate::text::{content_lines, create, parse_xyz, read_to_string};

/// Parse point cloud TXT.
///
/// # Errors
///
/// - [`FormatError::BadHeader`] if the first line is missing or is not a
///   non-negative integer.
/// - [`FormatError::CountMismatch`] if the number of coordinate lines differs
///   from the declared count.
/// - [`FormatError::BadLine`] if a coordinate line does not hold exactly
///   three numbers.
///
/// # Example
///
/// ```
/// use mesh_io::parse_txt;
///
/// let cloud = parse_txt("2\n0 0 0\n1 2 3\n").unwrap();
/// assert_eq!(cloud.len(), 2);
/// ```
pub fn parse_txt(text: &str) -> FormatResult<PointCloud> {
    let mut lines = content_lines(text, None);

    let (_, header) = lines
        .next()
        .ok_or_else(|| FormatError::bad_header("missing point count"))?;
    let declared: usize = header
        .parse()
        .map_err(|_| FormatError::bad_header(format!("invalid point count {header:?}")))?;

    let rows: Vec<(usize, &str)> = lines.collect();
    if rows.len() != declared {
        return Err(FormatError::CountMismatch {
            what: "points",
            expected: declared,
            found: rows.len(),
        });
    }

    rows.into_iter()
        .map(|(line_no, line)| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(FormatError::bad_line(
                    line_no,
                    format!("expected 3 coordinates, found {}", fields.len()),
                ));
            }
            let [x, y, z] = parse_xyz(&fields, line_no)?;
            Ok(Point3::new(x, y, z))
        })
        .collect()
}

/// Write a point cloud as TXT.
///
/// Coordinates use the shortest representation that parses back to the
/// same `f64`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_txt<W: Write>(cloud: &PointCloud, writer: &mut W) -> FormatResult<()> {
    writeln!(writer, "{}", cloud.len())?;
    for p in cloud {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}

/// Write a point cloud as a TXT string.
#[must_use]
pub fn write_txt_string(cloud: &PointCloud) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_txt(cloud, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Load a point cloud from a TXT file.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if the file does not exist, an I/O
/// error if it cannot be read, or any error from [`parse_txt`].
pub fn load_txt<P: AsRef<Path>>(path: P) -> FormatResult<PointCloud> {
    let path = path.as_ref();
    let cloud = parse_txt(&read_to_string(path)?)?;
    info!(path = %path.display(), points = cloud.len(), "Loaded point cloud");
    Ok(cloud)
}

/// Save a point cloud to a TXT file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_txt<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> FormatResult<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    write_txt(cloud, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), points = cloud.len(), "Saved point cloud");
    Ok(())
}
