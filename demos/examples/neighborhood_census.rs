// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neighborhood census.
//!
//! Load the same scattered sites into both trees behind the common trait and
//! count how many neighbors each site has within a fixed radius.
//!
//! Run:
//! - `cargo run -p thicket_demos --example neighborhood_census`

use thicket_index::{IndexError, KdTree, Point, PointIndex, SsTree};

fn sites() -> Vec<Point> {
    // Three loose clusters plus a couple of outliers.
    let raw: [[f64; 2]; 14] = [
        [1.0, 1.0],
        [1.5, 1.2],
        [0.8, 1.6],
        [1.9, 0.7],
        [8.0, 8.2],
        [8.4, 7.9],
        [7.6, 8.5],
        [8.1, 9.0],
        [1.2, 8.0],
        [0.6, 8.4],
        [1.8, 8.8],
        [5.0, 5.0],
        [12.0, 2.0],
        [11.5, 2.6],
    ];
    raw.iter().map(|pair| Point::from(&pair[..])).collect()
}

fn census(
    index: &dyn PointIndex,
    sites: &[Point],
    radius: f64,
) -> Result<Vec<usize>, IndexError> {
    let mut counts = Vec::with_capacity(sites.len());
    for site in sites {
        // The site itself always lands in its own neighborhood.
        counts.push(index.query_radius(site, radius)?.len() - 1);
    }
    Ok(counts)
}

fn main() -> Result<(), IndexError> {
    let sites = sites();
    let kd = KdTree::with_points(2, sites.clone())?;
    let mut ss = SsTree::new(2, 2, 4)?;
    for site in sites.clone() {
        ss.insert(site)?;
    }

    // Both trees answer the same question; only their internals differ.
    for (label, index) in [("kd", &kd as &dyn PointIndex), ("ss", &ss)] {
        let counts = census(index, &sites, 1.5)?;
        let densest = sites
            .iter()
            .zip(&counts)
            .max_by_key(|(_, count)| **count);
        println!("{label} neighbor counts: {counts:?}");
        if let Some((site, count)) = densest {
            println!("{label} densest site: {:?} with {count} neighbors", site.coordinates());
        }
    }
    Ok(())
}
