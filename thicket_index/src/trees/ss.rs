// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Similarity-search tree of bounding hyperspheres.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::error::IndexError;
use crate::index::PointIndex;
use crate::types::{Point, distance_unchecked};

/// Largest approximation error accepted by
/// [`SsTree::approximate_nearest`].
const MAX_APPROXIMATION_ERROR: f64 = 0.5;

/// SS-tree over points of a fixed dimension.
///
/// Every node carries a bounding hypersphere around its members: leaves hold
/// points, internal nodes hold child nodes and bound the child spheres. A node
/// keeps between `min_branching` and `max_branching` members (the root may
/// hold fewer); overflowing nodes split along the axis of maximum coordinate
/// variance at the position minimizing the summed variance of the halves.
///
/// The tree grows from the root, so all leaves sit at the same depth and the
/// structure stays balanced under any insertion order. That makes it the
/// incremental counterpart to [`KdTree`](crate::KdTree), whose balance relies
/// on batch construction. Hyperspheres also admit a cheap lower bound on the
/// distance to any point below a node, which powers
/// [`approximate_nearest`](SsTree::approximate_nearest).
pub struct SsTree {
    dimension: usize,
    min_branching: usize,
    max_branching: usize,
    root: Option<NodeIdx>,
    arena: Vec<SNode>,
}

struct SNode {
    centroid: Point,
    radius: f64,
    entries: SEntries,
}

enum SEntries {
    Points(Vec<Point>),
    Children(Vec<NodeIdx>),
}

impl SNode {
    fn len(&self) -> usize {
        match &self.entries {
            SEntries::Points(points) => points.len(),
            SEntries::Children(children) => children.len(),
        }
    }
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

impl SsTree {
    /// Create an empty tree for points with `dimension` coordinates.
    ///
    /// `min_branching` and `max_branching` bound the number of members per
    /// node and must satisfy `1 <= min_branching <= max_branching / 2`, so a
    /// split can always hand each half at least `min_branching` members.
    pub fn new(
        dimension: usize,
        min_branching: usize,
        max_branching: usize,
    ) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::InvalidDimension(dimension));
        }
        if min_branching == 0 || min_branching > max_branching / 2 {
            return Err(IndexError::InvalidBranching {
                min: min_branching,
                max: max_branching,
            });
        }
        Ok(Self {
            dimension,
            min_branching,
            max_branching,
            root: None,
            arena: Vec::new(),
        })
    }

    /// Create a tree and insert `points` one by one.
    pub fn with_points(
        dimension: usize,
        min_branching: usize,
        max_branching: usize,
        points: Vec<Point>,
    ) -> Result<Self, IndexError> {
        let mut tree = Self::new(dimension, min_branching, max_branching)?;
        for point in points {
            tree.insert(point)?;
        }
        Ok(tree)
    }

    /// The dimension points in this tree must have.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The fewest members a node keeps after a split.
    #[inline]
    pub fn min_branching(&self) -> usize {
        self.min_branching
    }

    /// The most members a node may hold before it splits.
    #[inline]
    pub fn max_branching(&self) -> usize {
        self.max_branching
    }

    /// Whether the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a point, ignoring it if an equal point is already stored.
    pub fn insert(&mut self, point: Point) -> Result<(), IndexError> {
        self.validate_point(&point)?;
        match self.root {
            None => {
                let node = self.new_leaf(vec![point]);
                self.root = Some(self.push_node(node));
            }
            Some(root) => {
                if let Some((left, right)) = self.insert_at(root, point) {
                    // Grow at the top: the old root split into two siblings.
                    let node = self.new_internal(vec![left, right]);
                    self.root = Some(self.push_node(node));
                }
            }
        }
        Ok(())
    }

    /// Look up a stored point equal to `point`.
    pub fn get(&self, point: &Point) -> Result<Option<Point>, IndexError> {
        Ok(self.nearest(point)?.filter(|found| found == point))
    }

    /// The stored point closest to `query`, or `None` if the tree is empty.
    pub fn nearest(&self, query: &Point) -> Result<Option<Point>, IndexError> {
        self.approximate_nearest(query, 0.0)
    }

    /// A stored point within `(1 + approximation_error)` of the true nearest
    /// distance to `query`.
    ///
    /// A subtree is skipped when the distance from `query` to its bounding
    /// sphere cannot beat the current best by more than the allowed slack, so
    /// larger errors visit fewer nodes. `approximation_error` must lie in
    /// `[0, 0.5]`; zero gives the exact nearest point.
    pub fn approximate_nearest(
        &self,
        query: &Point,
        approximation_error: f64,
    ) -> Result<Option<Point>, IndexError> {
        self.validate_point(query)?;
        if !(0.0..=MAX_APPROXIMATION_ERROR).contains(&approximation_error) {
            return Err(IndexError::InvalidApproximationError(approximation_error));
        }
        let Some(root) = self.root else {
            return Ok(None);
        };
        Ok(self
            .nearest_in(root, query, approximation_error, None)
            .cloned())
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
        if let Some(root) = self.root {
            self.collect_in_radius(root, query, radius, &mut found);
        }
        Ok(found)
    }

    /// Deep copy of the tree structure for inspection, or `None` when empty.
    pub fn as_nodes(&self) -> Option<SsNode> {
        self.root.map(|root| self.snapshot(root))
    }

    /// Insert below `idx`, splitting on overflow.
    ///
    /// Returns the two halves when the node split; the caller replaces the
    /// node with both and re-checks its own occupancy.
    fn insert_at(&mut self, idx: NodeIdx, point: Point) -> Option<(NodeIdx, NodeIdx)> {
        if let SEntries::Points(points) = &mut self.arena[idx.get()].entries {
            if !points.contains(&point) {
                points.push(point);
            }
        } else {
            let nearest = self.nearest_child(idx, &point);
            if let Some((left, right)) = self.insert_at(nearest, point) {
                let SEntries::Children(children) = &mut self.arena[idx.get()].entries else {
                    unreachable!("routing node must hold children");
                };
                children.retain(|&child| child != nearest);
                children.push(left);
                children.push(right);
            }
        }
        self.update_bounding_sphere(idx);
        self.split_if_needed(idx)
    }

    /// The child whose centroid is closest to `point`; ties keep the earliest.
    fn nearest_child(&self, idx: NodeIdx, point: &Point) -> NodeIdx {
        let SEntries::Children(children) = &self.arena[idx.get()].entries else {
            unreachable!("routing node must hold children");
        };
        let mut nearest = children[0];
        let mut nearest_distance = distance_unchecked(&self.arena[nearest.get()].centroid, point);
        for &child in &children[1..] {
            let d = distance_unchecked(&self.arena[child.get()].centroid, point);
            if d < nearest_distance {
                nearest_distance = d;
                nearest = child;
            }
        }
        nearest
    }

    /// Recompute the centroid and radius of `idx` from its members.
    fn update_bounding_sphere(&mut self, idx: NodeIdx) {
        let entries = core::mem::replace(
            &mut self.arena[idx.get()].entries,
            SEntries::Points(Vec::new()),
        );
        let node = match entries {
            SEntries::Points(points) => self.new_leaf(points),
            SEntries::Children(children) => self.new_internal(children),
        };
        self.arena[idx.get()] = node;
    }

    /// Split `idx` when it exceeds `max_branching` members.
    ///
    /// The first half keeps the node's slot so the parent's other children are
    /// untouched; the second half becomes a fresh node.
    fn split_if_needed(&mut self, idx: NodeIdx) -> Option<(NodeIdx, NodeIdx)> {
        if self.arena[idx.get()].len() <= self.max_branching {
            return None;
        }
        let axis = self.max_variance_axis(idx);
        let entries = core::mem::replace(
            &mut self.arena[idx.get()].entries,
            SEntries::Points(Vec::new()),
        );
        match entries {
            SEntries::Points(mut points) => {
                points.sort_by(|a, b| {
                    a.coordinate(axis)
                        .partial_cmp(&b.coordinate(axis))
                        .unwrap_or(core::cmp::Ordering::Equal)
                });
                let split = {
                    let positions: Vec<&Point> = points.iter().collect();
                    self.min_variance_split(axis, &positions)
                };
                let rest = points.split_off(split);
                let left_node = self.new_leaf(points);
                self.arena[idx.get()] = left_node;
                let right_node = self.new_leaf(rest);
                let right = self.push_node(right_node);
                Some((idx, right))
            }
            SEntries::Children(mut children) => {
                children.sort_by(|a, b| {
                    self.arena[a.get()]
                        .centroid
                        .coordinate(axis)
                        .partial_cmp(&self.arena[b.get()].centroid.coordinate(axis))
                        .unwrap_or(core::cmp::Ordering::Equal)
                });
                let split = {
                    let positions: Vec<&Point> = children
                        .iter()
                        .map(|child| &self.arena[child.get()].centroid)
                        .collect();
                    self.min_variance_split(axis, &positions)
                };
                let rest = children.split_off(split);
                let left_node = self.new_internal(children);
                self.arena[idx.get()] = left_node;
                let right_node = self.new_internal(rest);
                let right = self.push_node(right_node);
                Some((idx, right))
            }
        }
    }

    /// The axis along which member positions spread the most.
    fn max_variance_axis(&self, idx: NodeIdx) -> usize {
        let positions = self.positions(idx);
        let mut best_axis = 0;
        let mut best_variance = variance(0, &positions);
        for axis in 1..self.dimension {
            let v = variance(axis, &positions);
            if v > best_variance {
                best_variance = v;
                best_axis = axis;
            }
        }
        best_axis
    }

    /// The split position minimizing the summed variance of the two halves.
    ///
    /// `positions` must already be sorted along `axis`. Both halves keep at
    /// least `min_branching` members; ties keep the leftmost position.
    fn min_variance_split(&self, axis: usize, positions: &[&Point]) -> usize {
        let size = positions.len();
        let mut best_split = self.min_branching;
        let mut best_variance = split_variance(axis, positions, best_split);
        for split in (self.min_branching + 1)..=(size - self.min_branching) {
            let v = split_variance(axis, positions, split);
            if v < best_variance {
                best_variance = v;
                best_split = split;
            }
        }
        best_split
    }

    /// Member positions of `idx`: leaf points, or child centroids.
    fn positions(&self, idx: NodeIdx) -> Vec<&Point> {
        match &self.arena[idx.get()].entries {
            SEntries::Points(points) => points.iter().collect(),
            SEntries::Children(children) => children
                .iter()
                .map(|child| &self.arena[child.get()].centroid)
                .collect(),
        }
    }

    fn new_leaf(&self, points: Vec<Point>) -> SNode {
        let centroid = self.centroid_of(points.iter());
        let radius = points
            .iter()
            .map(|point| distance_unchecked(&centroid, point))
            .fold(0.0, f64::max);
        SNode {
            centroid,
            radius,
            entries: SEntries::Points(points),
        }
    }

    fn new_internal(&self, children: Vec<NodeIdx>) -> SNode {
        let centroid =
            self.centroid_of(children.iter().map(|child| &self.arena[child.get()].centroid));
        let radius = children
            .iter()
            .map(|&child| {
                let node = &self.arena[child.get()];
                distance_unchecked(&centroid, &node.centroid) + node.radius
            })
            .fold(0.0, f64::max);
        SNode {
            centroid,
            radius,
            entries: SEntries::Children(children),
        }
    }

    /// Coordinate-wise mean of the given positions. Must not be empty.
    fn centroid_of<'a>(&self, positions: impl Iterator<Item = &'a Point>) -> Point {
        let mut sums = vec![0.0; self.dimension];
        let mut count = 0_usize;
        for position in positions {
            for (axis, sum) in sums.iter_mut().enumerate() {
                *sum += position.coordinate(axis);
            }
            count += 1;
        }
        debug_assert!(count > 0, "node must have members");
        for sum in &mut sums {
            *sum /= count as f64;
        }
        Point::new(sums)
    }

    fn nearest_in<'t>(
        &'t self,
        idx: NodeIdx,
        query: &Point,
        approximation_error: f64,
        mut best: Option<&'t Point>,
    ) -> Option<&'t Point> {
        match &self.arena[idx.get()].entries {
            SEntries::Points(points) => {
                let mut best_distance =
                    best.map_or(f64::INFINITY, |point| distance_unchecked(query, point));
                for point in points {
                    let d = distance_unchecked(query, point);
                    if d < best_distance {
                        best_distance = d;
                        best = Some(point);
                    }
                }
                best
            }
            SEntries::Children(children) => {
                let mut order = children.clone();
                order.sort_by(|a, b| {
                    self.outer_distance(*a, query)
                        .partial_cmp(&self.outer_distance(*b, query))
                        .unwrap_or(core::cmp::Ordering::Equal)
                });
                for child in order {
                    // Recomputed per child: a better match tightens the bound.
                    let limit = best.map_or(f64::INFINITY, |point| {
                        distance_unchecked(query, point)
                    }) / (1.0 + approximation_error);
                    if self.outer_distance(child, query) < limit {
                        best = self.nearest_in(child, query, approximation_error, best);
                    }
                }
                best
            }
        }
    }

    fn collect_in_radius(&self, idx: NodeIdx, query: &Point, radius: f64, found: &mut Vec<Point>) {
        match &self.arena[idx.get()].entries {
            SEntries::Points(points) => {
                for point in points {
                    if distance_unchecked(query, point) <= radius {
                        found.push(point.clone());
                    }
                }
            }
            SEntries::Children(children) => {
                for &child in children {
                    if self.outer_distance(child, query) <= radius {
                        self.collect_in_radius(child, query, radius, found);
                    }
                }
            }
        }
    }

    /// Distance from `point` to the surface of the node's bounding sphere;
    /// zero if the point lies inside.
    fn outer_distance(&self, idx: NodeIdx, point: &Point) -> f64 {
        let node = &self.arena[idx.get()];
        (distance_unchecked(&node.centroid, point) - node.radius).max(0.0)
    }

    fn snapshot(&self, idx: NodeIdx) -> SsNode {
        let node = &self.arena[idx.get()];
        let entries = match &node.entries {
            SEntries::Points(points) => SsEntries::Points(points.clone()),
            SEntries::Children(children) => SsEntries::Children(
                children.iter().map(|&child| self.snapshot(child)).collect(),
            ),
        };
        SsNode {
            centroid: node.centroid.clone(),
            radius: node.radius,
            entries,
        }
    }

    fn push_node(&mut self, node: SNode) -> NodeIdx {
        let idx = self.arena.len();
        self.arena.push(node);
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

impl fmt::Debug for SsTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SsTree")
            .field("dimension", &self.dimension)
            .field("min_branching", &self.min_branching)
            .field("max_branching", &self.max_branching)
            .field("nodes", &self.arena.len())
            .finish_non_exhaustive()
    }
}

impl PointIndex for SsTree {
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

/// Summed variance of `positions[..split]` and `positions[split..]` along
/// `axis`.
fn split_variance(axis: usize, positions: &[&Point], split: usize) -> f64 {
    variance(axis, &positions[..split]) + variance(axis, &positions[split..])
}

fn mean(axis: usize, positions: &[&Point]) -> f64 {
    let sum: f64 = positions.iter().map(|p| p.coordinate(axis)).sum();
    sum / positions.len() as f64
}

fn variance(axis: usize, positions: &[&Point]) -> f64 {
    let mean = mean(axis, positions);
    let sum: f64 = positions
        .iter()
        .map(|p| {
            let d = p.coordinate(axis) - mean;
            d * d
        })
        .sum();
    sum / positions.len() as f64
}

/// Snapshot of an SS-tree node produced by [`SsTree::as_nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct SsNode {
    /// Center of this node's bounding hypersphere.
    pub centroid: Point,
    /// Radius of this node's bounding hypersphere.
    pub radius: f64,
    /// The node's members.
    pub entries: SsEntries,
}

/// Members of a snapshot node.
#[derive(Clone, Debug, PartialEq)]
pub enum SsEntries {
    /// Points stored in a leaf.
    Points(Vec<Point>),
    /// Children of an internal node.
    Children(Vec<SsNode>),
}

impl SsNode {
    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.entries, SsEntries::Points(_))
    }

    /// Leaf points, or `None` for an internal node.
    pub fn points(&self) -> Option<&[Point]> {
        match &self.entries {
            SsEntries::Points(points) => Some(points),
            SsEntries::Children(_) => None,
        }
    }

    /// Child nodes, or `None` for a leaf.
    pub fn children(&self) -> Option<&[SsNode]> {
        match &self.entries {
            SsEntries::Points(_) => None,
            SsEntries::Children(children) => Some(children),
        }
    }
}
