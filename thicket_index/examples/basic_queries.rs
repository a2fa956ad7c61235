// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Thicket Index: build, look up, and run proximity queries.

use thicket_index::{IndexError, KdTree, Point, SsTree};

fn main() -> Result<(), IndexError> {
    // Batch-build a balanced k-d tree over a small site map.
    let sites = vec![
        Point::new(vec![0.0, 0.0]),
        Point::new(vec![2.0, 1.0]),
        Point::new(vec![5.0, 4.0]),
        Point::new(vec![9.0, 6.0]),
        Point::new(vec![4.0, 7.0]),
    ];
    let kd = KdTree::with_points(2, sites.clone())?;

    let query = Point::new(vec![4.0, 4.0]);
    println!("nearest to {query:?}: {:?}", kd.nearest(&query)?);
    println!("stored at {query:?}: {:?}", kd.get(&query)?);
    println!("within 3.0: {:?}", kd.query_radius(&query, 3.0)?);

    // The SS-tree takes the same points one at a time.
    let mut ss = SsTree::new(2, 2, 4)?;
    for site in sites {
        ss.insert(site)?;
    }
    println!("ss nearest: {:?}", ss.nearest(&query)?);
    println!("ss within 30%: {:?}", ss.approximate_nearest(&query, 0.3)?);
    Ok(())
}
