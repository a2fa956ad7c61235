// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index trait shared by the tree implementations.

use alloc::vec::Vec;

use crate::error::IndexError;
use crate::types::Point;

/// Point lookup abstraction implemented by [`KdTree`] and [`SsTree`].
///
/// Callers that only need insertion and proximity queries can hold a
/// `dyn PointIndex` and stay independent of the tree strategy.
///
/// [`KdTree`]: crate::KdTree
/// [`SsTree`]: crate::SsTree
pub trait PointIndex {
    /// The dimension every stored point must have.
    fn dimension(&self) -> usize;

    /// Whether the index holds no points.
    fn is_empty(&self) -> bool;

    /// Insert a point. Inserting a point already present is a no-op.
    fn insert(&mut self, point: Point) -> Result<(), IndexError>;

    /// Look up a stored point equal to `point`.
    fn get(&self, point: &Point) -> Result<Option<Point>, IndexError>;

    /// The stored point closest to `query`, or `None` if the index is empty.
    fn nearest(&self, query: &Point) -> Result<Option<Point>, IndexError>;

    /// All stored points within `radius` of `query` (boundary included).
    fn query_radius(&self, query: &Point, radius: f64) -> Result<Vec<Point>, IndexError>;
}
