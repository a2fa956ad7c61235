// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points in k-dimensional space and distance helpers.

use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::error::IndexError;

/// A point in k-dimensional Euclidean space.
///
/// The dimension is the number of coordinates and is fixed at construction.
/// Coordinates are expected to be finite; see the crate docs for the exact
/// float semantics.
///
/// Equality and hashing compare coordinates bit for bit, so `0.0` and `-0.0`
/// are distinct and a point is always equal to itself. This keeps `Point`
/// usable as a set or map key.
#[derive(Clone)]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// The number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// The coordinate along `axis`.
    ///
    /// Panics if `axis >= self.dimension()`.
    #[inline]
    pub fn coordinate(&self, axis: usize) -> f64 {
        self.coordinates[axis]
    }

    /// All coordinates in axis order.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Euclidean distance to another point.
    ///
    /// Returns [`IndexError::DimensionMismatch`] if the dimensions differ.
    pub fn distance(&self, other: &Self) -> Result<f64, IndexError> {
        if self.dimension() != other.dimension() {
            return Err(IndexError::DimensionMismatch {
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        Ok(distance_unchecked(self, other))
    }

    /// The candidate closest to this point, or `None` if `candidates` is empty.
    ///
    /// Ties keep the earliest candidate. Returns
    /// [`IndexError::DimensionMismatch`] if any candidate has a different
    /// dimension.
    pub fn nearest<'a, I>(&self, candidates: I) -> Result<Option<Self>, IndexError>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut nearest: Option<&Self> = None;
        let mut nearest_distance = f64::INFINITY;
        for candidate in candidates {
            let d = self.distance(candidate)?;
            if d < nearest_distance {
                nearest_distance = d;
                nearest = Some(candidate);
            }
        }
        Ok(nearest.cloned())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates.len() == other.coordinates.len()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in &self.coordinates {
            c.to_bits().hash(state);
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:?})", self.coordinates)
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl From<&[f64]> for Point {
    fn from(coordinates: &[f64]) -> Self {
        Self::new(coordinates.to_vec())
    }
}

/// Euclidean distance without a dimension check.
///
/// Callers must have validated that both points share the tree dimension.
#[inline]
pub(crate) fn distance_unchecked(a: &Point, b: &Point) -> f64 {
    debug_assert_eq!(a.dimension(), b.dimension(), "point dimensions must match");
    let sum: f64 = a
        .coordinates
        .iter()
        .zip(&b.coordinates)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    sqrt(sum)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn abs(v: f64) -> f64 {
    v.abs()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn abs(v: f64) -> f64 {
    libm::fabs(v)
}
