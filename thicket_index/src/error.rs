// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for point indexes.

use thiserror::Error;

/// Errors reported by trees and point operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// The requested dimension is zero.
    #[error("dimension must be at least 1, got {0}")]
    InvalidDimension(usize),

    /// Two points with different dimensions were combined.
    #[error("point dimensions cannot differ: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimension of the left-hand point.
        left: usize,
        /// Dimension of the right-hand point.
        right: usize,
    },

    /// A point with a different dimension was handed to a tree.
    #[error("point and tree dimensions cannot differ: point={point}, tree={tree}")]
    TreeDimensionMismatch {
        /// Dimension of the point.
        point: usize,
        /// Dimension of the tree.
        tree: usize,
    },

    /// A range query radius was zero or negative.
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// Branching factors that violate `1 <= min` and `min <= max / 2`.
    #[error("branching factors must satisfy 1 <= min <= max / 2, got min={min}, max={max}")]
    InvalidBranching {
        /// Requested minimum number of entries per node.
        min: usize,
        /// Requested maximum number of entries per node.
        max: usize,
    },

    /// An approximation error outside the supported `[0, 0.5]` range.
    #[error("approximation error must lie in [0, 0.5], got {0}")]
    InvalidApproximationError(f64),
}
