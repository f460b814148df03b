//! Line handling shared by the text codecs.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use mesh_types::{FormatError, FormatResult};

/// Iterate the non-blank lines of `text` as `(line_number, content)`.
///
/// Line numbers are one-based. When `comment` is given, everything from that
/// character to the end of the line is dropped before the blank check.
pub(crate) fn content_lines(
    text: &str,
    comment: Option<char>,
) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(move |(i, raw)| {
        let content = match comment.and_then(|c| raw.find(c)) {
            Some(end) => &raw[..end],
            None => raw,
        };
        let content = content.trim();
        (!content.is_empty()).then_some((i + 1, content))
    })
}

/// Parse one float field.
pub(crate) fn parse_f64(token: &str, line: usize) -> FormatResult<f64> {
    token
        .parse()
        .map_err(|_| FormatError::bad_line(line, format!("invalid number {token:?}")))
}

/// Parse the first three fields as a coordinate triple.
///
/// Callers decide whether extra fields are allowed.
pub(crate) fn parse_xyz(fields: &[&str], line: usize) -> FormatResult<[f64; 3]> {
    match fields {
        [x, y, z, ..] => Ok([parse_f64(x, line)?, parse_f64(y, line)?, parse_f64(z, line)?]),
        _ => Err(FormatError::bad_line(
            line,
            format!("expected 3 coordinates, found {}", fields.len()),
        )),
    }
}

/// Parse one non-negative integer field.
pub(crate) fn parse_usize(token: &str, line: usize) -> FormatResult<usize> {
    token
        .parse()
        .map_err(|_| FormatError::bad_line(line, format!("invalid count {token:?}")))
}

/// Open a file for reading, mapping a missing file to
/// [`FormatError::FileNotFound`].
pub(crate) fn open(path: &Path) -> FormatResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FormatError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FormatError::Io(e)
        }
    })
}

/// Read a whole text file.
pub(crate) fn read_to_string(path: &Path) -> FormatResult<String> {
    let mut text = String::new();
    open(path)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Create (or truncate) a file for buffered writing.
pub(crate) fn create(path: &Path) -> FormatResult<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}
