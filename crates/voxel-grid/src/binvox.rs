//! Binvox run-length voxel format.
//!
//! ```text
//! #binvox 1
//! dim <dx> <dy> <dz>
//! translate <tx> <ty> <tz>
//! scale <s>
//! data
//! <body>
//! ```
//!
//! The body is a sequence of `(value, count)` byte pairs, `value` in `{0, 1}`
//! and `count` in `[1, 255]`. Expanded in order, the runs fill the grid's
//! flat array (x slowest, then z, then y fastest) and must cover it exactly.
//!
//! # Example
//!
//! ```
//! use voxel_grid::{decode, encode, sample_box_grid};
//!
//! let grid = sample_box_grid(8, 2, 6).unwrap();
//! let bytes = encode(&grid);
//! assert!(bytes.starts_with(b"#binvox 1\ndim 8 8 8\n"));
//! assert_eq!(decode(&bytes).unwrap(), grid);
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use mesh_types::{FormatError, FormatResult};
use nalgebra::Vector3;
use tracing::{debug, info};

use crate::grid::VoxelGrid;

/// Longest run a single body pair can carry.
pub const MAX_RUN: u8 = u8::MAX;

/// Decode a binvox byte stream.
///
/// # Errors
///
/// - [`FormatError::BadHeader`] if the header lines are missing, out of
///   order or unparsable, or a dimension is zero.
/// - [`FormatError::InvalidValue`] for a value byte other than 0 or 1, or a
///   zero run count.
/// - [`FormatError::Truncated`] if the runs do not expand to exactly
///   `dx * dy * dz` voxels, or the body ends mid-pair.
pub fn decode(bytes: &[u8]) -> FormatResult<VoxelGrid> {
    let mut rest = bytes;

    let magic = header_line(&mut rest, "#binvox")?;
    if !magic.starts_with("#binvox") {
        return Err(FormatError::bad_header(format!(
            "not a binvox file: first line is {magic:?}"
        )));
    }

    let dims: [usize; 3] = parse_fields(header_line(&mut rest, "dim")?, "dim")?;
    if dims.contains(&0) {
        return Err(FormatError::bad_header(format!(
            "zero dimension in {}x{}x{}",
            dims[0], dims[1], dims[2]
        )));
    }
    let translate: [f64; 3] = parse_fields(header_line(&mut rest, "translate")?, "translate")?;
    let [scale]: [f64; 1] = parse_fields(header_line(&mut rest, "scale")?, "scale")?;
    let _: [f64; 0] = parse_fields(header_line(&mut rest, "data")?, "data")?;
    debug!(?dims, ?translate, scale, body_bytes = rest.len(), "Read binvox header");

    let expected = dims[0]
        .checked_mul(dims[1])
        .and_then(|n| n.checked_mul(dims[2]))
        .ok_or_else(|| {
            FormatError::bad_header(format!(
                "dimensions {}x{}x{} overflow the voxel count",
                dims[0], dims[1], dims[2]
            ))
        })?;
    let data = decode_body(rest, expected)?;

    Ok(VoxelGrid::from_data(dims, data)?
        .with_translation(Vector3::from(translate))
        .with_scale(scale))
}

fn decode_body(body: &[u8], expected: usize) -> FormatResult<Vec<bool>> {
    let mut data = Vec::with_capacity(expected.min(body.len() / 2 * usize::from(MAX_RUN)));
    let mut found = 0usize;

    let mut pairs = body.chunks_exact(2);
    for (pair, bytes) in pairs.by_ref().enumerate() {
        let offset = pair * 2;
        let value = match bytes[0] {
            0 => false,
            1 => true,
            other => {
                return Err(FormatError::InvalidValue {
                    field: "value",
                    value: other,
                    offset,
                });
            }
        };
        let count = bytes[1];
        if count == 0 {
            return Err(FormatError::InvalidValue {
                field: "count",
                value: count,
                offset: offset + 1,
            });
        }

        found = found.saturating_add(usize::from(count));
        if found <= expected {
            data.resize(found, value);
        }
    }

    if found != expected || !pairs.remainder().is_empty() {
        return Err(FormatError::Truncated { expected, found });
    }
    Ok(data)
}

/// Split the next `\n`-terminated header line off `rest`.
fn header_line<'a>(rest: &mut &'a [u8], expected: &str) -> FormatResult<&'a str> {
    let end = rest
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| FormatError::bad_header(format!("missing `{expected}` line")))?;
    let line = &rest[..end];
    *rest = &rest[end + 1..];
    std::str::from_utf8(line)
        .map(str::trim)
        .map_err(|_| FormatError::bad_header(format!("`{expected}` line is not text")))
}

/// Parse `keyword v1 v2 ... vN`.
fn parse_fields<T, const N: usize>(line: &str, keyword: &str) -> FormatResult<[T; N]>
where
    T: FromStr + Copy + Default,
{
    let mut fields = line.split_whitespace();
    if fields.next() != Some(keyword) {
        return Err(FormatError::bad_header(format!(
            "expected `{keyword}` line, found {line:?}"
        )));
    }
    let fields: Vec<&str> = fields.collect();
    if fields.len() != N {
        return Err(FormatError::bad_header(format!(
            "`{keyword}` needs {N} values, found {}",
            fields.len()
        )));
    }
    let mut out = [T::default(); N];
    for (slot, token) in out.iter_mut().zip(fields) {
        *slot = token.parse().map_err(|_| {
            FormatError::bad_header(format!("invalid `{keyword}` value {token:?}"))
        })?;
    }
    Ok(out)
}

/// Encode a grid as binvox bytes.
///
/// Header floats use the shortest text that parses back to the same `f64`.
/// Runs longer than [`MAX_RUN`] are split over several pairs.
#[must_use]
pub fn encode(grid: &VoxelGrid) -> Vec<u8> {
    let [dx, dy, dz] = grid.dims();
    let t = grid.translate();
    let mut out = format!(
        "#binvox 1\ndim {dx} {dy} {dz}\ntranslate {} {} {}\nscale {}\ndata\n",
        t.x,
        t.y,
        t.z,
        grid.scale()
    )
    .into_bytes();

    let mut data = grid.data().iter().copied().peekable();
    while let Some(value) = data.next() {
        let mut run = 1u8;
        while run < MAX_RUN && data.next_if_eq(&value).is_some() {
            run += 1;
        }
        out.push(u8::from(value));
        out.push(run);
    }
    out
}

/// Read a binvox grid from any reader.
///
/// # Errors
///
/// Returns an I/O error if reading fails, or any error from [`decode`].
pub fn read_binvox<R: Read>(mut reader: R) -> FormatResult<VoxelGrid> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Write a binvox grid to any writer.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_binvox<W: Write>(grid: &VoxelGrid, mut writer: W) -> FormatResult<()> {
    writer.write_all(&encode(grid))?;
    Ok(())
}

/// Load a binvox file.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if the file does not exist, an I/O
/// error if it cannot be read, or any error from [`decode`].
///
/// # Example
///
/// ```no_run
/// use voxel_grid::load_binvox;
///
/// let grid = load_binvox("model.binvox").unwrap();
/// println!("{} occupied voxels", grid.occupied_count());
/// ```
pub fn load_binvox<P: AsRef<Path>>(path: P) -> FormatResult<VoxelGrid> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FormatError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FormatError::Io(e)
        }
    })?;
    let grid = read_binvox(BufReader::new(file))?;
    info!(
        path = %path.display(),
        dims = ?grid.dims(),
        occupied = grid.occupied_count(),
        "Loaded binvox"
    );
    Ok(grid)
}

/// Save a grid as a binvox file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_binvox<P: AsRef<Path>>(grid: &VoxelGrid, path: P) -> FormatResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_binvox(grid, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        dims = ?grid.dims(),
        occupied = grid.occupied_count(),
        "Saved binvox"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VoxelCoord, sample_box_grid};
    use tempfile::tempdir;

    fn with_body(dims: &str, body: &[u8]) -> Vec<u8> {
        let mut bytes = format!("#binvox 1\ndim {dims}\ntranslate 0 0 0\nscale 1\ndata\n").into_bytes();
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn single_leading_run_is_origin() {
        let grid = decode(&with_body("2 2 2", &[1, 1, 0, 7])).unwrap();
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied, vec![VoxelCoord::new(0, 0, 0)]);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn reference_sample_coordinates() {
        // dims 2x3x4: index = x*12 + z*3 + y. Indices 1 and 14 are set.
        let body = [0, 1, 1, 1, 0, 12, 1, 1, 0, 9];
        let grid = decode(&with_body("2 3 4", &body)).unwrap();
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(
            occupied,
            vec![VoxelCoord::new(0, 1, 0), VoxelCoord::new(1, 2, 0)]
        );
    }

    #[test]
    fn y_varies_fastest_then_z() {
        // dims 1x2x2: file order is (y0 z0) (y1 z0) (y0 z1) (y1 z1).
        let grid = decode(&with_body("1 2 2", &[0, 2, 1, 1, 0, 1])).unwrap();
        assert_eq!(grid.get(VoxelCoord::new(0, 0, 1)), Some(true));
        assert_eq!(grid.get(VoxelCoord::new(0, 1, 0)), Some(false));
    }

    #[test]
    fn short_body_is_truncated() {
        assert!(matches!(
            decode(&with_body("2 2 2", &[0, 7])),
            Err(FormatError::Truncated {
                expected: 8,
                found: 7
            })
        ));
        assert!(matches!(
            decode(&with_body("2 2 2", &[])),
            Err(FormatError::Truncated { found: 0, .. })
        ));
    }

    #[test]
    fn long_body_is_truncated() {
        assert!(matches!(
            decode(&with_body("2 2 2", &[0, 8, 1, 1])),
            Err(FormatError::Truncated {
                expected: 8,
                found: 9
            })
        ));
    }

    #[test]
    fn odd_trailing_byte_is_truncated() {
        assert!(matches!(
            decode(&with_body("2 2 2", &[0, 8, 1])),
            Err(FormatError::Truncated { .. })
        ));
    }

    #[test]
    fn bad_value_and_zero_count() {
        assert!(matches!(
            decode(&with_body("2 2 2", &[0, 4, 2, 4])),
            Err(FormatError::InvalidValue {
                field: "value",
                value: 2,
                offset: 2
            })
        ));
        assert!(matches!(
            decode(&with_body("2 2 2", &[1, 0, 0, 8])),
            Err(FormatError::InvalidValue {
                field: "count",
                value: 0,
                offset: 1
            })
        ));
    }

    #[test]
    fn header_errors() {
        let cases: [&[u8]; 8] = [
            b"",
            b"#voxels 1\ndim 1 1 1\ntranslate 0 0 0\nscale 1\ndata\n\x00\x01",
            b"#binvox 1\ndim 1 1\ntranslate 0 0 0\nscale 1\ndata\n\x00\x01",
            b"#binvox 1\ndim 1 one 1\ntranslate 0 0 0\nscale 1\ndata\n\x00\x01",
            b"#binvox 1\ndim 1 0 1\ntranslate 0 0 0\nscale 1\ndata\n",
            b"#binvox 1\ntranslate 0 0 0\ndim 1 1 1\nscale 1\ndata\n\x00\x01",
            b"#binvox 1\ndim 1 1 1\ntranslate 0 0 0\nscale 1\n",
            b"#binvox 1\ndim 1 1 1\ntranslate 0 0 0\nscale x\ndata\n\x00\x01",
        ];
        for bytes in cases {
            assert!(
                matches!(decode(bytes), Err(FormatError::BadHeader { .. })),
                "{:?} should be a header error",
                String::from_utf8_lossy(bytes)
            );
        }
    }

    #[test]
    fn overflowing_dims_are_bad_header() {
        let huge = format!("{0} {0} 2", usize::MAX);
        let result = decode(&with_body(&huge, &[0, 1]));
        assert!(matches!(result, Err(FormatError::BadHeader { .. })));
    }

    #[test]
    fn crlf_header_accepted() {
        let bytes = b"#binvox 1\r\ndim 1 1 1\r\ntranslate 0 0 0\r\nscale 1\r\ndata\r\n\x01\x01";
        let grid = decode(bytes).unwrap();
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn exact_header_text() {
        let grid = VoxelGrid::new([2, 2, 2]).unwrap();
        let bytes = encode(&grid);
        assert_eq!(
            bytes,
            with_body("2 2 2", &[0, 8]),
            "{}",
            String::from_utf8_lossy(&bytes)
        );
    }

    #[test]
    fn long_runs_are_split() {
        let data = vec![true; 600];
        let grid = VoxelGrid::from_data([6, 10, 10], data).unwrap();
        let bytes = encode(&grid);
        let body = &bytes[bytes.len() - 6..];
        assert_eq!(body, &[1, 255, 1, 255, 1, 90]);
        assert_eq!(decode(&bytes).unwrap(), grid);
    }

    #[test]
    fn header_floats_round_trip() {
        let grid = sample_box_grid(4, 1, 3)
            .unwrap()
            .with_translation(Vector3::new(-0.123_456_789, 1e-10, 3.5))
            .with_scale(0.3);
        let decoded = decode(&encode(&grid)).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.binvox");
        let grid = sample_box_grid(32, 10, 22).unwrap();

        save_binvox(&grid, &path).unwrap();
        let loaded = load_binvox(&path).unwrap();
        assert_eq!(loaded, grid);
        assert_eq!(loaded.occupied_count(), 1728);
    }

    #[test]
    fn load_nonexistent_file() {
        assert!(matches!(
            load_binvox("nonexistent_file_12345.binvox"),
            Err(FormatError::FileNotFound { .. })
        ));
    }
}
