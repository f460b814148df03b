//! Text codecs for meshes and point clouds.
//!
//! Supported formats:
//!
//! - **OBJ** (Wavefront) - `v` / `f` subset, read and write
//! - **OFF** (Object File Format) - read and write
//! - **TXT** - point count followed by one `x y z` line per point, read and write
//! - **PLY** - ASCII with per-point colour, write only
//!
//! Every parser returns [`FormatError`] and never yields a partial asset.
//! All writers format coordinates with the shortest text that parses back
//! to the identical `f64`, so `parse(write(x)) == x` for OBJ, OFF and TXT.
//!
//! # Example
//!
//! ```
//! use mesh_io::{parse_off, write_obj_string, parse_obj};
//!
//! let mesh = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
//! let obj = write_obj_string(&mesh);
//! assert_eq!(parse_obj(&obj).unwrap(), mesh);
//! ```
//!
//! # Format Detection
//!
//! The path-level functions pick a codec from the file extension:
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from .obj extension
//! let mesh = load_mesh("model.obj").unwrap();
//!
//! // Save it as OFF
//! save_mesh(&mesh, "model.off").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod obj;
mod off;
mod ply;
mod text;
mod txt;

pub use mesh_types::{FormatError, FormatResult};
pub use obj::{load_obj, parse_obj, save_obj, write_obj, write_obj_string};
pub use off::{load_off, parse_off, save_off, write_off, write_off_string};
pub use ply::{save_point_cloud_ply, write_ply};
pub use txt::{load_txt, parse_txt, save_txt, write_txt, write_txt_string};

use std::path::Path;

use mesh_types::{IndexedMesh, PointCloud};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Wavefront OBJ.
    Obj,
    /// Object File Format.
    Off,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        match extension_of(path.as_ref())?.as_str() {
            "obj" => Some(Self::Obj),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Off => "off",
        }
    }
}

/// Supported point cloud file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointCloudFormat {
    /// Count-prefixed `x y z` text.
    Txt,
    /// ASCII PLY (write only).
    Ply,
}

impl PointCloudFormat {
    /// Detect format from file extension (case-insensitive).
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        match extension_of(path.as_ref())?.as_str() {
            "txt" => Some(Self::Txt),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Ply => "ply",
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    Some(path.extension()?.to_str()?.to_lowercase())
}

fn unknown_format(path: &Path) -> FormatError {
    FormatError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> FormatResult<IndexedMesh> {
    let path = path.as_ref();
    match MeshFormat::from_path(path).ok_or_else(|| unknown_format(path))? {
        MeshFormat::Obj => load_obj(path),
        MeshFormat::Off => load_off(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if the format cannot be determined from the extension
/// or the file cannot be written.
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> FormatResult<()> {
    let path = path.as_ref();
    match MeshFormat::from_path(path).ok_or_else(|| unknown_format(path))? {
        MeshFormat::Obj => save_obj(mesh, path),
        MeshFormat::Off => save_off(mesh, path),
    }
}

/// Load a point cloud from a file, detecting format from extension.
///
/// # Errors
///
/// Returns [`FormatError::UnknownFormat`] for anything but `.txt` (PLY is
/// write-only), or any error from [`load_txt`].
pub fn load_point_cloud<P: AsRef<Path>>(path: P) -> FormatResult<PointCloud> {
    let path = path.as_ref();
    match PointCloudFormat::from_path(path) {
        Some(PointCloudFormat::Txt) => load_txt(path),
        Some(PointCloudFormat::Ply) | None => Err(unknown_format(path)),
    }
}

/// Save a point cloud to a file, detecting format from extension.
///
/// PLY output is written black; use [`save_point_cloud_ply`] for colours.
///
/// # Errors
///
/// Returns an error if the format cannot be determined from the extension
/// or the file cannot be written.
pub fn save_point_cloud<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> FormatResult<()> {
    let path = path.as_ref();
    match PointCloudFormat::from_path(path).ok_or_else(|| unknown_format(path))? {
        PointCloudFormat::Txt => save_txt(cloud, path),
        PointCloudFormat::Ply => save_point_cloud_ply(cloud, None, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::cube;
    use tempfile::tempdir;

    #[test]
    fn format_from_path() {
        assert_eq!(MeshFormat::from_path("model.obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path("model.OBJ"), Some(MeshFormat::Obj));
        assert_eq!(
            MeshFormat::from_path("/path/to/model.off"),
            Some(MeshFormat::Off)
        );
        assert_eq!(MeshFormat::from_path("model.stl"), None);
        assert_eq!(MeshFormat::from_path("model"), None);
        assert_eq!(MeshFormat::from_path(""), None);

        assert_eq!(
            PointCloudFormat::from_path("points.TXT"),
            Some(PointCloudFormat::Txt)
        );
        assert_eq!(
            PointCloudFormat::from_path("points.ply"),
            Some(PointCloudFormat::Ply)
        );
        assert_eq!(PointCloudFormat::from_path("points.obj"), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(MeshFormat::Obj.extension(), "obj");
        assert_eq!(MeshFormat::Off.extension(), "off");
        assert_eq!(PointCloudFormat::Txt.extension(), "txt");
        assert_eq!(PointCloudFormat::Ply.extension(), "ply");
    }

    #[test]
    fn convert_obj_to_off_by_path() {
        let dir = tempdir().unwrap();
        let obj = dir.path().join("cube.obj");
        let off = dir.path().join("cube.off");

        save_mesh(&cube(), &obj).unwrap();
        let mesh = load_mesh(&obj).unwrap();
        save_mesh(&mesh, &off).unwrap();

        assert_eq!(load_mesh(&off).unwrap(), cube());
        let text = std::fs::read_to_string(&off).unwrap();
        assert!(text.starts_with("OFF\n"));
    }

    #[test]
    fn unknown_extension_rejected() {
        let result = load_mesh("model.stl");
        assert!(matches!(
            result,
            Err(FormatError::UnknownFormat { extension }) if extension == "stl"
        ));
        assert!(matches!(
            save_mesh(&cube(), "model"),
            Err(FormatError::UnknownFormat { .. })
        ));
        assert!(matches!(
            load_point_cloud("points.ply"),
            Err(FormatError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn point_cloud_by_path() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("points.txt");
        let ply = dir.path().join("points.ply");
        let cloud = PointCloud::from_rows(&[[0.25, 0.5, 0.75]]);

        save_point_cloud(&cloud, &txt).unwrap();
        assert_eq!(load_point_cloud(&txt).unwrap(), cloud);

        save_point_cloud(&cloud, &ply).unwrap();
        let text = std::fs::read_to_string(&ply).unwrap();
        assert!(text.contains("property uchar red"));
    }
}
