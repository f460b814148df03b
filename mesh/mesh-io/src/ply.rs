//! PLY (Polygon File Format) export for coloured point clouds.
//!
//! Output is always ASCII with one `vertex` element:
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex <n>
//! property float x
//! property float y
//! property float z
//! property uchar red
//! property uchar green
//! property uchar blue
//! end_header
//! ```
//!
//! Reading PLY is not supported.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::save_point_cloud_ply;
//! use mesh_types::PointCloud;
//!
//! let cloud = PointCloud::from_rows(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
//! save_point_cloud_ply(&cloud, None, "cloud.ply").unwrap();
//! ```

use std::io::Write;
use std::path::Path;

use mesh_types::{FormatError, FormatResult, PointCloud, VertexColor};
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use tracing::info;

use crate::text::create;

const POSITION: [&str; 3] = ["x", "y", "z"];
const COLOR: [&str; 3] = ["red", "green", "blue"];

/// Write a point cloud as ASCII PLY.
///
/// `colors`, when given, supplies one colour per point; points without a
/// colour are written black.
///
/// # Errors
///
/// Returns [`FormatError::CountMismatch`] if `colors` has a different length
/// than the cloud, or an I/O error if the writer fails.
pub fn write_ply<W: Write>(
    cloud: &PointCloud,
    colors: Option<&[VertexColor]>,
    writer: &mut W,
) -> FormatResult<()> {
    if let Some(colors) = colors {
        if colors.len() != cloud.len() {
            return Err(FormatError::CountMismatch {
                what: "colors",
                expected: cloud.len(),
                found: colors.len(),
            });
        }
    }

    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for name in POSITION {
        vertex_def.properties.add(PropertyDef::new(
            name.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    for name in COLOR {
        vertex_def.properties.add(PropertyDef::new(
            name.to_string(),
            PropertyType::Scalar(ScalarType::UChar),
        ));
    }
    vertex_def.count = cloud.len();
    ply.header.elements.add(vertex_def);

    let mut elements = Vec::with_capacity(cloud.len());
    for (i, p) in cloud.iter().enumerate() {
        let color = colors.map_or(VertexColor::BLACK, |c| c[i]);
        let mut element = DefaultElement::new();
        #[allow(clippy::cast_possible_truncation)]
        {
            for (name, value) in POSITION.iter().zip([p.x, p.y, p.z]) {
                element.insert((*name).to_string(), Property::Float(value as f32));
            }
        }
        for (name, value) in COLOR.iter().zip([color.r, color.g, color.b]) {
            element.insert((*name).to_string(), Property::UChar(value));
        }
        elements.push(element);
    }
    ply.payload.insert("vertex".to_string(), elements);

    Writer::new().write_ply(writer, &mut ply)?;
    Ok(())
}

/// Save a point cloud to an ASCII PLY file.
///
/// # Errors
///
/// Returns [`FormatError::CountMismatch`] if `colors` has a different length
/// than the cloud, or an error if the file cannot be written.
pub fn save_point_cloud_ply<P: AsRef<Path>>(
    cloud: &PointCloud,
    colors: Option<&[VertexColor]>,
    path: P,
) -> FormatResult<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    write_ply(cloud, colors, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        points = cloud.len(),
        colored = colors.is_some(),
        "Saved PLY"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn render(cloud: &PointCloud, colors: Option<&[VertexColor]>) -> String {
        let mut buf = Vec::new();
        write_ply(cloud, colors, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    const HEADER: [&str; 10] = [
        "ply",
        "format ascii 1.0",
        "element vertex 2",
        "property float x",
        "property float y",
        "property float z",
        "property uchar red",
        "property uchar green",
        "property uchar blue",
        "end_header",
    ];

    fn values(line: &str) -> Vec<f64> {
        line.split_whitespace().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn fixed_header() {
        let cloud = PointCloud::from_rows(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
        let text = render(&cloud, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..HEADER.len()], &HEADER);
        assert_eq!(lines.len(), HEADER.len() + 2);
    }

    #[test]
    fn default_color_is_black() {
        let cloud = PointCloud::from_rows(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
        let text = render(&cloud, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(values(lines[HEADER.len()]), vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(values(lines[HEADER.len() + 1]), vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn colors_written_per_point() {
        let cloud = PointCloud::from_rows(&[[0.5, 0.25, 0.0], [1.0, 1.0, 1.0]]);
        let colors = [VertexColor::new(255, 0, 0), VertexColor::new(0, 128, 255)];
        let text = render(&cloud, Some(&colors));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(values(lines[HEADER.len()]), vec![0.5, 0.25, 0.0, 255.0, 0.0, 0.0]);
        assert_eq!(values(lines[HEADER.len() + 1]), vec![1.0, 1.0, 1.0, 0.0, 128.0, 255.0]);
    }

    #[test]
    fn color_length_mismatch() {
        let cloud = PointCloud::from_rows(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        let colors = [VertexColor::WHITE];
        let mut buf = Vec::new();
        let result = write_ply(&cloud, Some(&colors), &mut buf);
        assert!(matches!(
            result,
            Err(FormatError::CountMismatch {
                what: "colors",
                expected: 2,
                found: 1
            })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_cloud() {
        let text = render(&PointCloud::new(), None);
        assert!(text.contains("element vertex 0"));
        assert_eq!(text.lines().last(), Some("end_header"));
    }

    #[test]
    fn save_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.ply");
        let cloud = PointCloud::from_rows(&[[1.0, 2.0, 3.0]]);

        save_point_cloud_ply(&cloud, None, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ply"));
        assert!(text.contains("element vertex 1"));
    }
}
