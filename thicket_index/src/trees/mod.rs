// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree implementations for different point-indexing strategies.
//!
//! - `kd`: k-d tree with axis-cycling splits, best built in one batch.
//! - `ss`: similarity-search tree of bounding hyperspheres with incremental
//!   inserts and approximate nearest-neighbor queries.
//!
//! Split note
//! ----------
//! The k-d tree splits space by one coordinate per level, cycling through the
//! axes, so a balanced batch build places the median along the current axis at
//! each node. The SS-tree instead groups whole points: an overflowing node is
//! split along the axis of maximum coordinate variance, at the position
//! `s` (with at least `min_branching` members per side) minimizing
//!
//! `var(members[..s]) + var(members[s..])`
//!
//! over members sorted by that coordinate. Variance splits keep sibling
//! hyperspheres compact, which is what the query pruning bounds rely on.

pub mod kd;
pub mod ss;
