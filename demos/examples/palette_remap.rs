// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palette remapping.
//!
//! Index a small color palette as points in RGB space, then snap arbitrary
//! colors to their nearest palette entry.
//!
//! Run:
//! - `cargo run -p thicket_demos --example palette_remap`

use thicket_index::{IndexError, KdTree, Point};

fn main() -> Result<(), IndexError> {
    let palette = [
        ("black", [0.0, 0.0, 0.0]),
        ("white", [255.0, 255.0, 255.0]),
        ("red", [200.0, 30.0, 30.0]),
        ("green", [40.0, 160.0, 60.0]),
        ("blue", [30.0, 60.0, 210.0]),
        ("yellow", [230.0, 210.0, 50.0]),
        ("gray", [128.0, 128.0, 128.0]),
        ("brown", [120.0, 80.0, 40.0]),
    ];
    let tree = KdTree::with_points(
        3,
        palette.iter().map(|(_, rgb)| Point::from(&rgb[..])).collect(),
    )?;

    let samples = [
        [12.0, 40.0, 200.0],
        [240.0, 200.0, 40.0],
        [90.0, 90.0, 90.0],
        [180.0, 20.0, 60.0],
    ];
    for sample in samples {
        let query = Point::from(&sample[..]);
        let Some(snapped) = tree.nearest(&query)? else {
            continue;
        };
        let name = palette
            .iter()
            .find(|(_, rgb)| Point::from(&rgb[..]) == snapped)
            .map_or("?", |(name, _)| *name);
        println!("{sample:?} -> {name} {:?}", snapped.coordinates());
    }
    Ok(())
}
