// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Backtrace a seam out of a finished cost matrix.

use crate::forward::CostMap;

/// One column index per row, top to bottom.
pub type Seam = Vec<u32>;

/// Given a cost matrix, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the cheapest seam.
pub fn cost_to_seam(costs: &CostMap) -> Seam {
    let (width, height) = costs.dimensions();
    let bottom = costs.row(height - 1);

    // The first of the cheapest cells on the bottom row.
    let mut seam_col = (0..width)
        .min_by_key(|x| bottom[*x as usize].cost)
        .unwrap_or(0);

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    (0..height)
        .rev()
        .fold(Vec::<u32>::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            if y > 0 {
                seam_col = costs[(seam_col, y)].parent.step(seam_col);
            }
            acc
        })
        .into_iter()
        .rev()
        .collect()
}

/// True if no two vertically adjacent entries are more than one column
/// apart.
pub fn is_connected(seam: &[u32]) -> bool {
    seam.windows(2)
        .all(|pair| (i64::from(pair[0]) - i64::from(pair[1])).abs() <= 1)
}
