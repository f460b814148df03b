//! Error types shared by every asset codec.
//!
//! All parsers and decoders in the workspace report failures through
//! [`FormatError`], so a caller converting between formats handles a single
//! error type regardless of which codec rejected the input.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for asset parsing, encoding and construction.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while reading, writing or constructing assets.
///
/// Parse and decode errors are detected before any asset is returned; a
/// partially built mesh, point cloud or voxel grid never escapes.
///
/// # Example
///
/// ```
/// use mesh_types::FormatError;
///
/// let error = FormatError::CountMismatch {
///     what: "points",
///     expected: 5,
///     found: 4,
/// };
/// assert!(error.to_string().contains("declared 5 points"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// A header line is missing or does not parse in its expected position.
    #[error("bad header: {message}")]
    BadHeader {
        /// What was wrong with the header.
        message: String,
    },

    /// The number of records differs from the count declared in the header.
    #[error("count mismatch: declared {expected} {what}, found {found}")]
    CountMismatch {
        /// The kind of record being counted (e.g. `"vertices"`).
        what: &'static str,
        /// Count declared by the file or required by the caller.
        expected: usize,
        /// Count actually present.
        found: usize,
    },

    /// Voxel run lengths do not expand to exactly `dx * dy * dz` entries.
    #[error("truncated voxel data: expected {expected} voxels, runs expand to {found}")]
    Truncated {
        /// Number of voxels the dimensions require.
        expected: usize,
        /// Number of voxels the body expands to (or had reached when decoding stopped).
        found: usize,
    },

    /// A run-length byte is outside its permitted range.
    #[error("invalid run {field} byte {value} at body offset {offset}")]
    InvalidValue {
        /// Which half of the pair was invalid (`"value"` or `"count"`).
        field: &'static str,
        /// The offending byte.
        value: u8,
        /// Offset of the byte from the start of the body.
        offset: usize,
    },

    /// A face references a vertex outside the valid range.
    #[error("face {face}: index {index} out of range for {vertex_count} vertices")]
    BadIndex {
        /// Zero-based ordinal of the face.
        face: usize,
        /// The index as written (before re-basing).
        index: i64,
        /// Number of vertices available when the face was resolved.
        vertex_count: usize,
    },

    /// A line has the wrong number of fields or a field that does not parse.
    #[error("line {line}: {message}")]
    BadLine {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// An axis permutation is not a bijection over x, y and z.
    #[error("invalid axis specification: {message}")]
    InvalidAxisSpec {
        /// What was wrong with the permutation.
        message: String,
    },

    /// A transform parameter such as a scale or offset list does not parse.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// What was wrong with the parameter.
        message: String,
    },

    /// Voxel grid dimensions must all be positive.
    #[error("invalid grid dimensions: {}x{}x{}", dims[0], dims[1], dims[2])]
    InvalidDimensions {
        /// The rejected dimensions.
        dims: [usize; 3],
    },

    /// A face has fewer than three vertex indices.
    #[error("face {face} has {len} indices, need at least 3")]
    DegenerateFace {
        /// Zero-based ordinal of the face.
        face: usize,
        /// Number of indices the face has.
        len: usize,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Create a `BadHeader` error with the given message.
    #[must_use]
    pub fn bad_header(message: impl Into<String>) -> Self {
        Self::BadHeader {
            message: message.into(),
        }
    }

    /// Create a `BadLine` error for a one-based line number.
    #[must_use]
    pub fn bad_line(line: usize, message: impl Into<String>) -> Self {
        Self::BadLine {
            line,
            message: message.into(),
        }
    }

    /// Create an `InvalidParameter` error with the given message.
    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an `InvalidAxisSpec` error with the given message.
    #[must_use]
    pub fn invalid_axis_spec(message: impl Into<String>) -> Self {
        Self::InvalidAxisSpec {
            message: message.into(),
        }
    }
}
