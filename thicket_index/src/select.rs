// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-place order statistics via Hoare partitioning.
//!
//! [`select_kth`] rearranges a slice so the element with a given rank lands at
//! that index, without fully sorting. Balanced k-d tree construction uses it to
//! find the median along the current axis in linear expected time.

use core::cmp::Ordering;

/// Move the element with rank `k` under `compare` to index `k`.
///
/// On return `items[k]` is the element that would occupy index `k` if the
/// slice were sorted by `compare`. Everything before index `k` compares less
/// than or equal to it and everything after compares greater than or equal to
/// it; the two sides are otherwise in unspecified order.
///
/// `k` must be a valid index into `items`. Debug builds assert this; release
/// builds leave the slice in an unspecified permutation.
///
/// Slices with fewer than two elements are left untouched.
pub fn select_kth<T, F>(items: &mut [T], k: usize, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    debug_assert!(k < items.len(), "rank {k} out of range for {} items", items.len());
    let mut lo = 0;
    let mut hi = items.len() - 1;
    while lo < hi {
        let pivot = partition(items, lo, hi, &mut compare);
        match k.cmp(&pivot) {
            Ordering::Equal => return,
            Ordering::Less => hi = pivot - 1,
            Ordering::Greater => lo = pivot + 1,
        }
    }
}

/// Partition `items[start..=end]` around `items[start]`.
///
/// Returns the pivot's final index. Elements left of it compare less than or
/// equal to the pivot, elements right of it greater than or equal. Requires
/// `start < end`.
fn partition<T, F>(items: &mut [T], start: usize, end: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    // The pivot stays in its slot until the final swap, so `items[start]`
    // always reads the pivot value.
    let mut left = start;
    let mut right = end + 1;
    loop {
        // Scan rightwards for an element that belongs on the other side.
        loop {
            left += 1;
            if compare(&items[left], &items[start]) != Ordering::Less || left == end {
                break;
            }
        }
        // Scan leftwards likewise.
        loop {
            right -= 1;
            if compare(&items[right], &items[start]) != Ordering::Greater || right == start {
                break;
            }
        }
        if left >= right {
            break;
        }
        items.swap(left, right);
    }
    items.swap(start, right);
    right
}
