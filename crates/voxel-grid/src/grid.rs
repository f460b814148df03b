//! Dense boolean voxel grid.

use mesh_transform::{AxisPermutation, CoordinateTransform};
use mesh_types::{FormatError, FormatResult, PointCloud};
use nalgebra::{Point3, Vector3};

use crate::voxel::VoxelCoord;

/// A dense occupancy grid of `dx * dy * dz` voxels.
///
/// Occupancy is stored flat in binvox order: x varies slowest, then z, then
/// y fastest, so the linear index of `(x, y, z)` is `x*dy*dz + z*dy + y`.
/// The grid's dimensions are fixed at construction and the flat array
/// always holds exactly one entry per voxel.
///
/// `translate` and `scale` place the grid in model space: voxel `i` along an
/// axis spans `translate + scale * [i, i + 1) / dim`.
///
/// # Example
///
/// ```
/// use voxel_grid::{VoxelCoord, VoxelGrid};
///
/// let mut grid = VoxelGrid::new([4, 4, 4]).unwrap();
/// assert!(grid.set(VoxelCoord::new(1, 2, 3), true));
/// assert_eq!(grid.get(VoxelCoord::new(1, 2, 3)), Some(true));
/// assert_eq!(grid.occupied().collect::<Vec<_>>(), vec![VoxelCoord::new(1, 2, 3)]);
///
/// // Outside the grid.
/// assert!(!grid.set(VoxelCoord::new(4, 0, 0), true));
/// assert_eq!(grid.get(VoxelCoord::new(4, 0, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct VoxelGrid {
    dims: [usize; 3],
    data: Vec<bool>,
    translate: Vector3<f64>,
    scale: f64,
}

impl VoxelGrid {
    /// Create an empty grid with the given `[dx, dy, dz]` dimensions.
    ///
    /// Translation is zero and scale is one.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidDimensions`] if any dimension is zero or
    /// the voxel count overflows `usize`.
    pub fn new(dims: [usize; 3]) -> FormatResult<Self> {
        let len = voxel_count(dims)?;
        Ok(Self {
            dims,
            data: vec![false; len],
            translate: Vector3::zeros(),
            scale: 1.0,
        })
    }

    /// Create a grid from a flat occupancy array in file order.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidDimensions`] for a zero dimension and
    /// [`FormatError::CountMismatch`] if `data.len() != dx * dy * dz`.
    pub fn from_data(dims: [usize; 3], data: Vec<bool>) -> FormatResult<Self> {
        let len = voxel_count(dims)?;
        if data.len() != len {
            return Err(FormatError::CountMismatch {
                what: "voxels",
                expected: len,
                found: data.len(),
            });
        }
        Ok(Self {
            dims,
            data,
            translate: Vector3::zeros(),
            scale: 1.0,
        })
    }

    /// Set the model-space translation.
    #[must_use]
    pub fn with_translation(mut self, translate: Vector3<f64>) -> Self {
        self.translate = translate;
        self
    }

    /// Set the model-space scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Grid dimensions `[dx, dy, dz]`.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Model-space translation.
    #[must_use]
    pub const fn translate(&self) -> Vector3<f64> {
        self.translate
    }

    /// Model-space scale.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Flat occupancy array in file order.
    #[must_use]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Total number of voxels, occupied or not.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.data.len()
    }

    /// Number of occupied voxels.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Whether `coord` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        coord.x < self.dims[0] && coord.y < self.dims[1] && coord.z < self.dims[2]
    }

    /// Linear file-order index of `coord`, or `None` outside the grid.
    #[must_use]
    pub const fn linear_index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.contains(coord) {
            let [_, dy, dz] = self.dims;
            Some(coord.x * dy * dz + coord.z * dy + coord.y)
        } else {
            None
        }
    }

    /// Inverse of [`linear_index`](Self::linear_index).
    ///
    /// Indices past the end map to coordinates outside the grid.
    #[must_use]
    pub const fn coord_at(&self, index: usize) -> VoxelCoord {
        coord_at(self.dims, index)
    }

    /// Occupancy at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> Option<bool> {
        self.linear_index(coord).map(|i| self.data[i])
    }

    /// Set occupancy at `coord`.
    ///
    /// Returns `false` (and changes nothing) if `coord` is outside the grid.
    pub fn set(&mut self, coord: VoxelCoord, value: bool) -> bool {
        match self.linear_index(coord) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Mark every voxel in the half-open box `[min, max)` occupied.
    ///
    /// The box is clamped to the grid; an empty or fully outside box is a
    /// no-op. Returns the number of voxels inside the clamped box.
    pub fn fill_box(&mut self, min: VoxelCoord, max: VoxelCoord) -> usize {
        let lo = min.as_array();
        let hi = max.as_array();
        let hi = [
            hi[0].min(self.dims[0]),
            hi[1].min(self.dims[1]),
            hi[2].min(self.dims[2]),
        ];
        let mut filled = 0;
        for x in lo[0]..hi[0] {
            for z in lo[2]..hi[2] {
                for y in lo[1]..hi[1] {
                    if self.set(VoxelCoord::new(x, y, z), true) {
                        filled += 1;
                    }
                }
            }
        }
        filled
    }

    /// Lazily iterate the occupied coordinates in file order.
    ///
    /// The iterator borrows the grid and can be cloned or re-created at
    /// will; it is never single-use.
    pub fn occupied(&self) -> impl Iterator<Item = VoxelCoord> + Clone + '_ {
        let dims = self.dims;
        self.data
            .iter()
            .enumerate()
            .filter_map(move |(i, &v)| v.then(|| coord_at(dims, i)))
    }

    /// Center of `coord` in the unit cube centred at the origin:
    /// `(i + 0.5) / dim - 0.5` per axis.
    #[must_use]
    pub fn normalized_center(&self, coord: VoxelCoord) -> Point3<f64> {
        let unit = unit_center(self.dims, coord);
        Point3::from(unit.coords.add_scalar(-0.5))
    }

    /// Model-space center of `coord`: `translate + scale * (i + 0.5) / dim`.
    #[must_use]
    pub fn world_center(&self, coord: VoxelCoord) -> Point3<f64> {
        Point3::from(self.translate + unit_center(self.dims, coord).coords * self.scale)
    }

    /// Normalized centers of every occupied voxel, in file order.
    pub fn normalized_centers(&self) -> impl Iterator<Item = Point3<f64>> + Clone + '_ {
        self.occupied().map(|c| self.normalized_center(c))
    }

    /// Normalized centers pushed through a coordinate transform.
    pub fn transformed_centers<'a>(
        &'a self,
        transform: &'a CoordinateTransform,
    ) -> impl Iterator<Item = Point3<f64>> + 'a {
        self.normalized_centers().map(|p| transform.apply(p))
    }

    /// Normalized centers collected into a point cloud.
    #[must_use]
    pub fn to_point_cloud(&self) -> PointCloud {
        self.normalized_centers().collect()
    }

    /// A new grid with its axes reordered by `permutation`.
    ///
    /// Output axis `i` takes the dimension, occupancy and translation of
    /// input axis `permutation.sources()[i]`, so normalized centers of the
    /// result are the permuted normalized centers of `self`.
    #[must_use]
    pub fn permuted(&self, permutation: &AxisPermutation) -> Self {
        let dims = permutation.apply(&self.dims);
        let translate: [f64; 3] = self.translate.into();
        let mut out = Self {
            dims,
            data: vec![false; self.data.len()],
            translate: Vector3::from(permutation.apply(&translate)),
            scale: self.scale,
        };
        for coord in self.occupied() {
            let moved = VoxelCoord::from(permutation.apply(&coord.as_array()));
            out.set(moved, true);
        }
        out
    }
}

/// The sample grid written by the example tool: a `size^3` grid with the
/// half-open cube `[lo, hi)^3` occupied.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDimensions`] if `size` is zero.
///
/// # Example
///
/// ```
/// use voxel_grid::sample_box_grid;
///
/// let grid = sample_box_grid(32, 10, 22).unwrap();
/// assert_eq!(grid.occupied_count(), 12 * 12 * 12);
/// ```
pub fn sample_box_grid(size: usize, lo: usize, hi: usize) -> FormatResult<VoxelGrid> {
    let mut grid = VoxelGrid::new([size; 3])?;
    grid.fill_box(VoxelCoord::new(lo, lo, lo), VoxelCoord::new(hi, hi, hi));
    Ok(grid)
}

fn voxel_count(dims: [usize; 3]) -> FormatResult<usize> {
    if dims.contains(&0) {
        return Err(FormatError::InvalidDimensions { dims });
    }
    dims[0]
        .checked_mul(dims[1])
        .and_then(|n| n.checked_mul(dims[2]))
        .ok_or(FormatError::InvalidDimensions { dims })
}

const fn coord_at(dims: [usize; 3], index: usize) -> VoxelCoord {
    let [_, dy, dz] = dims;
    let slab = dy * dz;
    let rem = index % slab;
    VoxelCoord::new(index / slab, rem % dy, rem / dy)
}

#[allow(clippy::cast_precision_loss)]
fn unit_center(dims: [usize; 3], coord: VoxelCoord) -> Point3<f64> {
    let c = coord.as_array();
    Point3::new(
        (c[0] as f64 + 0.5) / dims[0] as f64,
        (c[1] as f64 + 0.5) / dims[1] as f64,
        (c[2] as f64 + 0.5) / dims[2] as f64,
    )
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    dims: [usize; 3],
    data: Vec<bool>,
    translate: Vector3<f64>,
    scale: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for VoxelGrid {
    type Error = FormatError;

    fn try_from(raw: RawGrid) -> FormatResult<Self> {
        Ok(Self::from_data(raw.dims, raw.data)?
            .with_translation(raw.translate)
            .with_scale(raw.scale))
    }
}
