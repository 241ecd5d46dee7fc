//! Fixed-arity coordinate triples and the axis/face vocabulary.
//!
//! Every shape-like quantity in the configuration (core topology, grid
//! sizes, domain lengths) is an ordered triple over a uniform element type.
//! The triple itself carries no physical meaning for its axes: which axis is
//! x, y or z is a convention established by the caller. [`Axis`] and
//! [`Face`] make that convention explicit wherever an axis or a domain face
//! has to be named.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// One of the three computational axes.
///
/// The mapping to physical dimensions (x/y/z) is the caller's convention;
/// this type only fixes the ordering `Dim0 < Dim1 < Dim2` and the index
/// mapping used by [`CoordinateTriple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    Dim0,
    Dim1,
    Dim2,
}

impl Axis {
    /// All three axes in index order.
    pub const ALL: [Axis; 3] = [Axis::Dim0, Axis::Dim1, Axis::Dim2];

    /// Positional index of this axis: 0, 1 or 2.
    pub fn index(self) -> usize {
        match self {
            Axis::Dim0 => 0,
            Axis::Dim1 => 1,
            Axis::Dim2 => 2,
        }
    }

    /// Axis for a positional index, or `None` if the index is out of range.
    pub fn from_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::Dim0),
            1 => Some(Axis::Dim1),
            2 => Some(Axis::Dim2),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Dim0 => write!(f, "dim_0"),
            Axis::Dim1 => write!(f, "dim_1"),
            Axis::Dim2 => write!(f, "dim_2"),
        }
    }
}

/// One of the two ends of an axis.
///
/// `Low` is the origin-side end of the axis, `High` the opposite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Low,
    High,
}

impl Face {
    /// Both faces in index order (low first).
    pub const BOTH: [Face; 2] = [Face::Low, Face::High];

    /// Positional index of this face: 0 for low, 1 for high.
    pub fn index(self) -> usize {
        match self {
            Face::Low => 0,
            Face::High => 1,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Low => write!(f, "low"),
            Face::High => write!(f, "high"),
        }
    }
}

/// An ordered 3-element record of a uniform element type.
///
/// Construction requires exactly three values; there are no partial triples.
/// Equality and iteration are positional. Once constructed a triple is only
/// ever read.
///
/// # Examples
///
/// ```rust
/// use sirocco_core::triple::{Axis, CoordinateTriple};
///
/// let shape: CoordinateTriple<usize> = [2, 2, 1].into();
/// assert_eq!(shape[Axis::Dim0], 2);
/// assert_eq!(shape[Axis::Dim2], 1);
/// assert_eq!(shape.iter().product::<usize>(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinateTriple<T> {
    pub dim_0: T,
    pub dim_1: T,
    pub dim_2: T,
}

impl<T> CoordinateTriple<T> {
    pub fn new(dim_0: T, dim_1: T, dim_2: T) -> Self {
        Self { dim_0, dim_1, dim_2 }
    }

    /// Component along `axis`.
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Dim0 => &self.dim_0,
            Axis::Dim1 => &self.dim_1,
            Axis::Dim2 => &self.dim_2,
        }
    }

    /// Components in axis order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.dim_0, &self.dim_1, &self.dim_2].into_iter()
    }

    /// Apply `f` to each component, preserving axis order.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> CoordinateTriple<U> {
        CoordinateTriple {
            dim_0: f(&self.dim_0),
            dim_1: f(&self.dim_1),
            dim_2: f(&self.dim_2),
        }
    }
}

impl<T: Clone> CoordinateTriple<T> {
    /// Triple with the same value along every axis.
    pub fn splat(value: T) -> Self {
        Self {
            dim_0: value.clone(),
            dim_1: value.clone(),
            dim_2: value,
        }
    }
}

impl<T> Index<Axis> for CoordinateTriple<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        self.get(axis)
    }
}

impl<T> From<[T; 3]> for CoordinateTriple<T> {
    fn from(values: [T; 3]) -> Self {
        let [dim_0, dim_1, dim_2] = values;
        Self { dim_0, dim_1, dim_2 }
    }
}

impl<T> From<(T, T, T)> for CoordinateTriple<T> {
    fn from((dim_0, dim_1, dim_2): (T, T, T)) -> Self {
        Self { dim_0, dim_1, dim_2 }
    }
}

impl<T> From<CoordinateTriple<T>> for [T; 3] {
    fn from(triple: CoordinateTriple<T>) -> Self {
        [triple.dim_0, triple.dim_1, triple.dim_2]
    }
}
