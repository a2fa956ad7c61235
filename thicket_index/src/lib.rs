// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_index --heading-base-level=0

//! Thicket Index: nearest-neighbor and range search over points in k dimensions.
//!
//! Thicket Index is a reusable building block for proximity queries.
//!
//! - Store points of any fixed dimension; duplicates are detected by exact
//!   equality and stored once.
//! - Find the closest stored point, every point within a radius, or an exact
//!   match.
//! - Two tree strategies behind one trait so calling code can swap them
//!   without API churn.
//!
//! # Example
//!
//! ```rust
//! use thicket_index::{KdTree, Point};
//!
//! // Index a known batch of points; construction balances the tree.
//! let points = vec![
//!     Point::new(vec![0.0, 0.0]),
//!     Point::new(vec![1.0, 1.0]),
//!     Point::new(vec![4.0, 4.0]),
//! ];
//! let tree = KdTree::with_points(2, points)?;
//!
//! let query = Point::new(vec![3.0, 3.0]);
//! assert_eq!(tree.nearest(&query)?, Some(Point::new(vec![4.0, 4.0])));
//! assert_eq!(tree.get(&query)?, None);
//!
//! let near_origin = tree.query_radius(&Point::new(vec![0.0, 0.0]), 2.0)?;
//! assert_eq!(near_origin.len(), 2);
//! # Ok::<(), thicket_index::IndexError>(())
//! ```
//!
//! When points arrive over time, the SS-tree stays balanced without a batch
//! build and can trade accuracy for speed:
//!
//! ```rust
//! use thicket_index::{Point, SsTree};
//!
//! // Nodes hold between 2 and 4 entries.
//! let mut tree = SsTree::new(2, 2, 4)?;
//! for i in 0..32 {
//!     tree.insert(Point::new(vec![f64::from(i % 8), f64::from(i / 8)]))?;
//! }
//!
//! let query = Point::new(vec![3.4, 1.8]);
//! assert_eq!(tree.nearest(&query)?, Some(Point::new(vec![3.0, 2.0])));
//!
//! // Within 10% of the true nearest distance, visiting fewer nodes.
//! assert!(tree.approximate_nearest(&query, 0.1)?.is_some());
//! # Ok::<(), thicket_index::IndexError>(())
//! ```
//!
//! ## Choosing a tree
//!
//! - [`KdTree`]: one point per node, split by one coordinate per level. Batch
//!   construction balances the tree by median selection; incremental inserts
//!   do not rebalance. Prefer it when the point set is known up front.
//! - [`SsTree`]: bounding hyperspheres with per-node occupancy bounds, kept
//!   balanced under any insertion order, and the only tree offering
//!   [`approximate_nearest`](SsTree::approximate_nearest). Prefer it when
//!   points trickle in or a bounded-error shortcut is acceptable.
//!
//! Both implement [`PointIndex`], so callers can swap one for the other.
//!
//! ### Float semantics
//!
//! Coordinates are `f64` and assumed finite; NaNs make comparisons arbitrary
//! and debug builds may assert. Point equality (deduplication,
//! [`PointIndex::get`]) is exact per-coordinate bit equality, so `-0.0` and
//! `0.0` are distinct points.

#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("thicket_index requires either the `std` or the `libm` feature");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod index;
pub mod select;
pub mod trees;
pub mod types;

pub use error::IndexError;
pub use index::PointIndex;
pub use select::select_kth;
pub use trees::kd::{KdNode, KdTree};
pub use trees::ss::{SsEntries, SsNode, SsTree};
pub use types::Point;
