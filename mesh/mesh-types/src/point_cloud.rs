//! Unstructured point sets.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered set of 3D points with no connectivity.
///
/// Each point has exactly three coordinates by construction. Per-point
/// color is not stored here; it is supplied at PLY export time.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, PointCloud};
///
/// let mut cloud = PointCloud::new();
/// cloud.push(Point3::new(0.0, 0.5, 1.0));
/// assert_eq!(cloud.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud {
    /// Points in file order.
    pub points: Vec<Point3<f64>>,
}

impl PointCloud {
    /// Create an empty point cloud.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create an empty point cloud with room for `capacity` points.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Wrap an existing list of points.
    ///
    /// ```
    /// use mesh_types::{Point3, PointCloud};
    ///
    /// let cloud = PointCloud::from_points(vec![Point3::origin(), Point3::new(0.5, 0.5, 0.5)]);
    /// assert_eq!(cloud.len(), 2);
    /// assert_eq!(cloud.points[1], Point3::new(0.5, 0.5, 0.5));
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Build a point cloud from `[x, y, z]` rows.
    ///
    /// ```
    /// use mesh_types::PointCloud;
    ///
    /// let cloud = PointCloud::from_rows(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
    /// assert_eq!(cloud.points[1].y, 2.0);
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self {
            points: rows.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
        }
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point.
    pub fn push(&mut self, point: Point3<f64>) {
        self.points.push(point);
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }
}

impl FromIterator<Point3<f64>> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cloud() {
        let cloud = PointCloud::new();
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
    }

    #[test]
    fn collect_from_iterator() {
        let cloud: PointCloud = (0..4).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.points[3].x, 3.0);
    }

    #[test]
    fn iteration_preserves_order() {
        let cloud = PointCloud::from_rows(&[[3.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let xs: Vec<f64> = cloud.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }
}
