//! Voxel coordinate type.

use nalgebra::Point3;

/// A discrete coordinate inside a [`VoxelGrid`](crate::VoxelGrid).
///
/// Components are unsigned: a dense grid always starts at `(0, 0, 0)`, and
/// placement in model space is carried by the grid's translation and scale.
///
/// # Example
///
/// ```
/// use voxel_grid::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.as_array(), [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (slowest-varying in file order).
    pub x: usize,
    /// Y coordinate (fastest-varying in file order).
    pub y: usize,
    /// Z coordinate.
    pub z: usize,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an `[x, y, z]` array.
    #[must_use]
    pub const fn as_array(self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the coordinate as a tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    /// Converts to a floating-point point.
    ///
    /// ```
    /// use voxel_grid::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// assert_eq!(VoxelCoord::new(1, 2, 3).to_point(), Point3::new(1.0, 2.0, 3.0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl From<[usize; 3]> for VoxelCoord {
    fn from([x, y, z]: [usize; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(usize, usize, usize)> for VoxelCoord {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCoord> for [usize; 3] {
    fn from(c: VoxelCoord) -> Self {
        c.as_array()
    }
}
