//! Permute, scale, translate.

use std::fmt;
use std::str::FromStr;

use mesh_types::{FormatError, FormatResult, IndexedMesh, PointCloud};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::AxisPermutation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Uniform or per-axis scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scale {
    /// Same factor on every axis.
    Uniform(f64),
    /// One factor per output axis.
    PerAxis([f64; 3]),
}

impl Default for Scale {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl Scale {
    /// The factors as a per-axis array.
    #[must_use]
    pub const fn factors(&self) -> [f64; 3] {
        match *self {
            Self::Uniform(s) => [s, s, s],
            Self::PerAxis(f) => f,
        }
    }
}

impl From<f64> for Scale {
    fn from(s: f64) -> Self {
        Self::Uniform(s)
    }
}

impl From<[f64; 3]> for Scale {
    fn from(f: [f64; 3]) -> Self {
        Self::PerAxis(f)
    }
}

/// Parses `"2"` as uniform and `"1,2,1"` as per-axis.
impl FromStr for Scale {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        let values = parse_floats(s)?;
        match values.as_slice() {
            [v] => Ok(Self::Uniform(*v)),
            [x, y, z] => Ok(Self::PerAxis([*x, *y, *z])),
            _ => Err(FormatError::invalid_parameter(format!(
                "scale needs 1 or 3 comma-separated values, got {s:?}"
            ))),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(s) => write!(f, "{s}"),
            Self::PerAxis([x, y, z]) => write!(f, "{x},{y},{z}"),
        }
    }
}

/// Parse a comma-separated list of floats, e.g. an offset `"-0.5,-0.5,-0.5"`.
///
/// # Errors
///
/// Returns [`FormatError::InvalidParameter`] if any entry is not a number.
pub fn parse_floats(s: &str) -> FormatResult<Vec<f64>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| FormatError::invalid_parameter(format!("{part:?} is not a number: {e}")))
        })
        .collect()
}

/// Map a point into a target frame: permute axes, then scale, then translate.
///
/// The order is fixed. With `x`/`y` swapped, scale `(2, 1, 1)` and offset
/// `(1, 0, 0)`, the point `(1, 2, 3)` becomes `(2, 1, 3)`, then `(4, 1, 3)`,
/// then `(5, 1, 3)`.
///
/// ```
/// use mesh_transform::{apply, Axis, AxisPermutation, Scale};
/// use nalgebra::{Point3, Vector3};
///
/// let swap = AxisPermutation::new([Axis::Y, Axis::X, Axis::Z]).unwrap();
/// let p = apply(
///     Point3::new(1.0, 2.0, 3.0),
///     &swap,
///     &Scale::PerAxis([2.0, 1.0, 1.0]),
///     Vector3::new(1.0, 0.0, 0.0),
/// );
/// assert_eq!(p, Point3::new(5.0, 1.0, 3.0));
/// ```
#[inline]
#[must_use]
pub fn apply(
    point: Point3<f64>,
    permutation: &AxisPermutation,
    scale: &Scale,
    offset: Vector3<f64>,
) -> Point3<f64> {
    let [x, y, z] = permutation.apply(&[point.x, point.y, point.z]);
    let [sx, sy, sz] = scale.factors();
    Point3::new(
        x.mul_add(sx, offset.x),
        y.mul_add(sy, offset.y),
        z.mul_add(sz, offset.z),
    )
}

/// The parameters of a target coordinate frame.
///
/// Applying a transform only rewrites positions; mesh faces and point order
/// are untouched.
///
/// # Example
///
/// ```
/// use mesh_transform::CoordinateTransform;
/// use nalgebra::{Point3, Vector3};
///
/// let t = CoordinateTransform::new(
///     "xzy".parse().unwrap(),
///     0.03125.into(),
///     Vector3::new(-0.5, -0.5, -0.5),
/// );
/// let p = t.apply(Point3::new(32.0, 16.0, 0.0));
/// assert_eq!(p, Point3::new(0.5, -0.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateTransform {
    /// Axis reassignment, applied first.
    pub permutation: AxisPermutation,
    /// Scale, applied to the permuted coordinates.
    pub scale: Scale,
    /// Offset added last.
    pub offset: Vector3<f64>,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl CoordinateTransform {
    /// Create a transform from its three parts.
    #[must_use]
    pub const fn new(permutation: AxisPermutation, scale: Scale, offset: Vector3<f64>) -> Self {
        Self {
            permutation,
            scale,
            offset,
        }
    }

    /// The transform that changes nothing.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(AxisPermutation::IDENTITY, Scale::Uniform(1.0), Vector3::zeros())
    }

    /// Transform a single point.
    #[inline]
    #[must_use]
    pub fn apply(&self, point: Point3<f64>) -> Point3<f64> {
        apply(point, &self.permutation, &self.scale, self.offset)
    }

    /// Lazily transform a sequence of points.
    pub fn apply_all<I>(&self, points: I) -> impl Iterator<Item = Point3<f64>> + use<'_, I>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        points.into_iter().map(move |p| self.apply(p))
    }

    /// Rewrite every vertex position of a mesh in place.
    pub fn apply_to_mesh(&self, mesh: &mut IndexedMesh) {
        for vertex in &mut mesh.vertices {
            vertex.position = self.apply(vertex.position);
        }
    }

    /// Rewrite every point of a point cloud in place.
    pub fn apply_to_point_cloud(&self, cloud: &mut PointCloud) {
        for point in &mut cloud.points {
            *point = self.apply(*point);
        }
    }

    /// The equivalent homogeneous matrix, `T * S * P`.
    ///
    /// Useful for hosts that compose frames as matrices; for any point `p`,
    /// `to_matrix().transform_point(&p) == apply(p)` up to rounding.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let mut permute = Matrix4::zeros();
        for (row, src) in self.permutation.sources().iter().enumerate() {
            permute[(row, src.index())] = 1.0;
        }
        permute[(3, 3)] = 1.0;

        let scale = Matrix4::new_nonuniform_scaling(&Vector3::from(self.scale.factors()));
        let translate = Matrix4::new_translation(&self.offset);

        translate * scale * permute
    }
}
