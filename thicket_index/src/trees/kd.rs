// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! K-d tree with one split coordinate per level, cycling through the axes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::IndexError;
use crate::index::PointIndex;
use crate::select::select_kth;
use crate::types::{Point, abs, distance_unchecked};

/// K-d tree over points of a fixed dimension.
///
/// Each node stores one point and splits space by a single coordinate; the
/// split axis is the node's depth modulo the dimension. A point whose
/// coordinate along the split axis is strictly smaller than the node's goes
/// left, everything else goes right.
///
/// [`KdTree::with_points`] builds a balanced tree by recursive median
/// selection and is the preferred way to index a known batch. Incremental
/// [`insert`](KdTree::insert) keeps queries correct but does not rebalance, so
/// adversarial insertion orders degrade towards linear scans.
pub struct KdTree {
    dimension: usize,
    root: Option<NodeIdx>,
    arena: Vec<KNode>,
}

struct KNode {
    level: usize,
    point: Point,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl KdTree {
    /// Create an empty tree for points with `dimension` coordinates.
    pub fn new(dimension: usize) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::InvalidDimension(dimension));
        }
        Ok(Self {
            dimension,
            root: None,
            arena: Vec::new(),
        })
    }

    /// Build a balanced tree over `points`.
    ///
    /// Every node becomes the median of its subtree along the node's split
    /// axis, so lookups run in `O(log n)` regardless of the order `points`
    /// arrived in. Duplicate points are kept as given.
    pub fn with_points(dimension: usize, mut points: Vec<Point>) -> Result<Self, IndexError> {
        let mut tree = Self::new(dimension)?;
        for point in &points {
            tree.validate_point(point)?;
        }
        tree.root = Self::build_balanced(&mut tree.arena, dimension, 0, &mut points);
        Ok(tree)
    }

    /// The dimension points in this tree must have.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a point, ignoring it if an equal point is already stored.
    pub fn insert(&mut self, point: Point) -> Result<(), IndexError> {
        self.validate_point(&point)?;
        let Some(mut current) = self.root else {
            self.root = Some(self.push_node(0, point));
            return Ok(());
        };
        loop {
            let node = &self.arena[current.get()];
            if node.point == point {
                return Ok(());
            }
            let axis = node.level % self.dimension;
            let child_level = node.level + 1;
            let go_left = point.coordinate(axis) < node.point.coordinate(axis);
            let next = if go_left { node.left } else { node.right };
            match next {
                Some(child) => current = child,
                None => {
                    let leaf = self.push_node(child_level, point);
                    let node = &mut self.arena[current.get()];
                    if go_left {
                        node.left = Some(leaf);
                    } else {
                        node.right = Some(leaf);
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Look up a stored point equal to `point`.
    pub fn get(&self, point: &Point) -> Result<Option<Point>, IndexError> {
        self.validate_point(point)?;
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx.get()];
            if node.point == *point {
                return Ok(Some(node.point.clone()));
            }
            let axis = node.level % self.dimension;
            current = if point.coordinate(axis) < node.point.coordinate(axis) {
                node.left
            } else {
                node.right
            };
        }
        Ok(None)
    }

    /// The stored point closest to `query`, or `None` if the tree is empty.
    pub fn nearest(&self, query: &Point) -> Result<Option<Point>, IndexError> {
        self.validate_point(query)?;
        let Some(root) = self.root else {
            return Ok(None);
        };
        let seed = &self.arena[root.get()].point;
        Ok(Some(self.nearest_in(Some(root), query, seed).clone()))
    }

    /// All stored points within `radius` of `query`, boundary included.
    ///
    /// The radius must be positive.
    pub fn query_radius(&self, query: &Point, radius: f64) -> Result<Vec<Point>, IndexError> {
        self.validate_point(query)?;
        if radius <= 0.0 {
            return Err(IndexError::NonPositiveRadius(radius));
        }
        let mut found = Vec::new();
        self.collect_in_radius(self.root, query, radius, &mut found);
        Ok(found)
    }

    /// Deep copy of the tree structure for inspection, or `None` when empty.
    pub fn as_nodes(&self) -> Option<KdNode> {
        self.root.map(|root| self.snapshot(root))
    }

    fn build_balanced(
        arena: &mut Vec<KNode>,
        dimension: usize,
        level: usize,
        points: &mut [Point],
    ) -> Option<NodeIdx> {
        if points.is_empty() {
            return None;
        }
        let median = (points.len() - 1) / 2;
        if points.len() > 1 {
            let axis = level % dimension;
            select_kth(points, median, |a, b| {
                a.coordinate(axis)
                    .partial_cmp(&b.coordinate(axis))
                    .unwrap_or(core::cmp::Ordering::Equal)
            });
        }
        let left = Self::build_balanced(arena, dimension, level + 1, &mut points[..median]);
        let right = Self::build_balanced(arena, dimension, level + 1, &mut points[median + 1..]);
        let idx = arena.len();
        arena.push(KNode {
            level,
            point: points[median].clone(),
            left,
            right,
        });
        Some(NodeIdx::new(idx))
    }

    fn nearest_in<'t>(
        &'t self,
        node: Option<NodeIdx>,
        query: &Point,
        best: &'t Point,
    ) -> &'t Point {
        let Some(idx) = node else {
            return best;
        };
        let node = &self.arena[idx.get()];
        let axis = node.level % self.dimension;
        let (near, far) = if query.coordinate(axis) < node.point.coordinate(axis) {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        let down = self.nearest_in(near, query, best);
        let mut nearest =
            if distance_unchecked(query, &node.point) <= distance_unchecked(query, down) {
                &node.point
            } else {
                down
            };
        // Only cross the splitting plane when it is closer than the best match.
        let plane = abs(query.coordinate(axis) - node.point.coordinate(axis));
        let nearest_distance = distance_unchecked(query, nearest);
        if plane < nearest_distance {
            let beyond = self.nearest_in(far, query, nearest);
            if distance_unchecked(query, beyond) < nearest_distance {
                nearest = beyond;
            }
        }
        nearest
    }

    fn collect_in_radius(
        &self,
        node: Option<NodeIdx>,
        query: &Point,
        radius: f64,
        found: &mut Vec<Point>,
    ) {
        let Some(idx) = node else {
            return;
        };
        let node = &self.arena[idx.get()];
        if distance_unchecked(query, &node.point) <= radius {
            found.push(node.point.clone());
        }
        let axis = node.level % self.dimension;
        let (near, far) = if query.coordinate(axis) < node.point.coordinate(axis) {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.collect_in_radius(near, query, radius, found);
        if abs(query.coordinate(axis) - node.point.coordinate(axis)) <= radius {
            self.collect_in_radius(far, query, radius, found);
        }
    }

    fn snapshot(&self, idx: NodeIdx) -> KdNode {
        let node = &self.arena[idx.get()];
        KdNode {
            level: node.level,
            point: node.point.clone(),
            left: node.left.map(|i| Box::new(self.snapshot(i))),
            right: node.right.map(|i| Box::new(self.snapshot(i))),
        }
    }

    fn push_node(&mut self, level: usize, point: Point) -> NodeIdx {
        let idx = self.arena.len();
        self.arena.push(KNode {
            level,
            point,
            left: None,
            right: None,
        });
        NodeIdx::new(idx)
    }

    fn validate_point(&self, point: &Point) -> Result<(), IndexError> {
        if point.dimension() != self.dimension {
            return Err(IndexError::TreeDimensionMismatch {
                point: point.dimension(),
                tree: self.dimension,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("dimension", &self.dimension)
            .field("points", &self.arena.len())
            .finish_non_exhaustive()
    }
}

impl PointIndex for KdTree {
    fn dimension(&self) -> usize {
        self.dimension()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn insert(&mut self, point: Point) -> Result<(), IndexError> {
        self.insert(point)
    }

    fn get(&self, point: &Point) -> Result<Option<Point>, IndexError> {
        self.get(point)
    }

    fn nearest(&self, query: &Point) -> Result<Option<Point>, IndexError> {
        self.nearest(query)
    }

    fn query_radius(&self, query: &Point, radius: f64) -> Result<Vec<Point>, IndexError> {
        self.query_radius(query, radius)
    }
}

/// Snapshot of a k-d tree node produced by [`KdTree::as_nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct KdNode {
    /// Depth of this node; the root sits at level 0.
    pub level: usize,
    /// The point stored at this node.
    pub point: Point,
    /// Subtree of points strictly below this node's split coordinate.
    pub left: Option<Box<KdNode>>,
    /// Subtree of points at or above this node's split coordinate.
    pub right: Option<Box<KdNode>>,
}

impl KdNode {
    /// The coordinate axis this node splits on.
    pub fn split_axis(&self) -> usize {
        self.level % self.point.dimension()
    }
}
