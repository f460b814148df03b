//! Strongly-typed axis permutations.

use std::fmt;
use std::str::FromStr;

use mesh_types::{FormatError, FormatResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The first coordinate.
    X,
    /// The second coordinate.
    Y,
    /// The third coordinate.
    Z,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Position of this axis in an `[x, y, z]` array.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Lower-case label used in axis strings.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }

    fn from_label(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Self::X),
            'y' => Some(Self::Y),
            'z' => Some(Self::Z),
            _ => None,
        }
    }
}

/// A bijection over {x, y, z}: for each output axis, the input axis that
/// supplies its value.
///
/// The bijection is checked once at construction, so applying a permutation
/// can never fail.
///
/// # Example
///
/// ```
/// use mesh_transform::{Axis, AxisPermutation};
///
/// let swap_xy = AxisPermutation::new([Axis::Y, Axis::X, Axis::Z]).unwrap();
/// assert_eq!(swap_xy.apply(&[1.0, 2.0, 3.0]), [2.0, 1.0, 3.0]);
///
/// // Two outputs drawing from x is rejected.
/// assert!(AxisPermutation::new([Axis::X, Axis::X, Axis::Z]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[Axis; 3]", into = "[Axis; 3]"))]
pub struct AxisPermutation {
    sources: [Axis; 3],
}

impl Default for AxisPermutation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AxisPermutation {
    /// The permutation that leaves every axis in place.
    pub const IDENTITY: Self = Self {
        sources: [Axis::X, Axis::Y, Axis::Z],
    };

    /// Build a permutation from the source axis of each output slot.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidAxisSpec`] if two output slots draw
    /// from the same input axis.
    pub fn new(sources: [Axis; 3]) -> FormatResult<Self> {
        for (i, a) in sources.iter().enumerate() {
            if let Some(j) = sources[i + 1..].iter().position(|b| b == a) {
                return Err(FormatError::invalid_axis_spec(format!(
                    "output axes {} and {} both draw from input axis {}",
                    Axis::ALL[i].label(),
                    Axis::ALL[i + 1 + j].label(),
                    a.label()
                )));
            }
        }
        Ok(Self { sources })
    }

    /// Source axis for each output slot.
    #[must_use]
    pub const fn sources(&self) -> [Axis; 3] {
        self.sources
    }

    /// Whether this is the identity permutation.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Reorder a 3-array: `out[i] = input[sources[i]]`.
    #[inline]
    #[must_use]
    pub fn apply<T: Copy>(&self, input: &[T; 3]) -> [T; 3] {
        [
            input[self.sources[0].index()],
            input[self.sources[1].index()],
            input[self.sources[2].index()],
        ]
    }

    /// The permutation that undoes this one.
    ///
    /// ```
    /// use mesh_transform::AxisPermutation;
    ///
    /// let p: AxisPermutation = "zxy".parse().unwrap();
    /// let v = [1, 2, 3];
    /// assert_eq!(p.inverse().apply(&p.apply(&v)), v);
    /// ```
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut sources = [Axis::X; 3];
        for (out, src) in self.sources.iter().enumerate() {
            sources[src.index()] = Axis::ALL[out];
        }
        Self { sources }
    }
}

impl TryFrom<[Axis; 3]> for AxisPermutation {
    type Error = FormatError;

    fn try_from(sources: [Axis; 3]) -> FormatResult<Self> {
        Self::new(sources)
    }
}

impl From<AxisPermutation> for [Axis; 3] {
    fn from(p: AxisPermutation) -> Self {
        p.sources
    }
}

/// Parse a three-letter axis string such as `"xzy"`.
///
/// Letter `i` of the string names the output axis that input column `i`
/// feeds, so output axis `a` reads the input column where `a`'s letter
/// appears. `"xzy"` therefore swaps y and z, and `"zxy"` maps
/// `(a, b, c)` to `(b, c, a)`.
impl FromStr for AxisPermutation {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        let labels: Vec<char> = s.trim().chars().collect();
        if labels.len() != 3 {
            return Err(FormatError::invalid_axis_spec(format!(
                "expected three axis letters, got {s:?}"
            )));
        }

        let mut columns = [None; 3];
        for (column, &c) in labels.iter().enumerate() {
            let axis = Axis::from_label(c).ok_or_else(|| {
                FormatError::invalid_axis_spec(format!("unknown axis letter {c:?} in {s:?}"))
            })?;
            if columns[axis.index()].replace(Axis::ALL[column]).is_some() {
                return Err(FormatError::invalid_axis_spec(format!(
                    "axis letter {c:?} repeated in {s:?}"
                )));
            }
        }

        let mut sources = [Axis::X; 3];
        for (slot, column) in sources.iter_mut().zip(columns) {
            // Three distinct letters out of three fill every slot.
            *slot = column.ok_or_else(|| FormatError::invalid_axis_spec(s.to_string()))?;
        }
        Self::new(sources)
    }
}

impl fmt::Display for AxisPermutation {
    /// Formats in the same letter convention [`FromStr`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = ['x'; 3];
        for (out, src) in self.sources.iter().enumerate() {
            labels[src.index()] = Axis::ALL[out].label();
        }
        labels.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
