//! Vertex and color types.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit RGB triple attached to exported points.
///
/// Colors only decorate exports (PLY); they are not part of the canonical
/// in-memory mesh or point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl VertexColor {
    /// Color from its three channels.
    ///
    /// ```
    /// use mesh_types::VertexColor;
    ///
    /// let orange = VertexColor::new(255, 128, 0);
    /// assert_eq!((orange.r, orange.g, orange.b), (255, 128, 0));
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// All channels zero.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// All channels saturated.
    pub const WHITE: Self = Self::new(u8::MAX, u8::MAX, u8::MAX);
}

impl Default for VertexColor {
    /// Exports without explicit colors write black.
    fn default() -> Self {
        Self::BLACK
    }
}

/// A mesh vertex: a position in 3D space.
///
/// Vertices have no identity beyond their position and are owned by the
/// mesh that stores them.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vertex};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in model space.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Wrap a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Vertex at `(x, y, z)`.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    /// Coordinates as an `[x, y, z]` array.
    #[inline]
    #[must_use]
    pub fn coords(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self { position }
    }
}

impl From<[f64; 3]> for Vertex {
    fn from(xyz: [f64; 3]) -> Self {
        Point3::from(xyz).into()
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from(xyz: (f64, f64, f64)) -> Self {
        Self::from([xyz.0, xyz.1, xyz.2])
    }
}
