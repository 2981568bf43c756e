// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Avidan & Shamir "Forward Energy" cost matrix.
//!
//! Removing a seam brings pixels together that were never neighbors
//! before.  Forward energy charges a path for the edges it would
//! create, rather than for the pixels it would destroy.  With I the
//! intensity grid and M the accumulated cost:
//!
//! ```text
//!  CU(x,y) = |I(x+1,y) − I(x−1,y)|              (0 on either edge)
//!  CL(x,y) = CU(x,y) + |I(x,y−1) − I(x−1,y)|
//!  CR(x,y) = CU(x,y) + |I(x+1,y) − I(x,y−1)|
//!
//!                     ⎧ M(x−1,y−1)+CL(x,y)   (not on the left edge)
//!  M(x,y)=E(x,y) + min⎨ M(x,y−1)+CU(x,y)
//!                     ⎩ M(x+1,y−1)+CR(x,y)   (not on the right edge)
//! ```
//!
//! The top row is just its own energy.  Ties go to the left-most
//! candidate.

use crate::cq;
use crate::energy::pixel_energy;
use crate::twodmap::TwoDimensionalMap;

/// Which pixel in the row above a path came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parent {
    Left,
    Center,
    Right,
}

impl Default for Parent {
    fn default() -> Self {
        Parent::Center
    }
}

impl Parent {
    /// The column in the row above, given the column in this row.
    #[inline]
    pub fn step(self, x: u32) -> u32 {
        match self {
            Parent::Left => {
                assert!(x > 0, "a left parent on the left edge");
                x - 1
            }
            Parent::Center => x,
            Parent::Right => x + 1,
        }
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CostAndBackPointer {
    pub cost: i64,
    pub parent: Parent,
}

pub type CostMap = TwoDimensionalMap<CostAndBackPointer>;

// Given a pixel coordinate *not* in the first row, and the finished
// row above it, pick the cheapest of the (up to) three paths that
// could arrive here.
fn cost_candidate_pixel(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    above: &[CostAndBackPointer],
    (x, y): (u32, u32),
) -> CostAndBackPointer {
    let i = |x, y| i64::from(intensity[(x, y)]);
    let max_width = intensity.width() - 1;
    let xu = x as usize;

    let cost_up = cq!(x == 0 || x == max_width, 0, (i(x + 1, y) - i(x - 1, y)).abs());

    let mut best = CostAndBackPointer {
        cost: above[xu].cost + cost_up,
        parent: Parent::Center,
    };

    if x != 0 {
        let left = above[xu - 1].cost + cost_up + (i(x, y - 1) - i(x - 1, y)).abs();
        if left <= best.cost {
            best = CostAndBackPointer {
                cost: left,
                parent: Parent::Left,
            };
        }
    }

    if x != max_width {
        let right = above[xu + 1].cost + cost_up + (i(x + 1, y) - i(x, y - 1)).abs();
        if right < best.cost {
            best = CostAndBackPointer {
                cost: right,
                parent: Parent::Right,
            };
        }
    }

    best.cost += pixel_energy(intensity, mask, (x, y));
    best
}

// Fill `chunk`, the cells of row `y` starting at column `base`.
fn fill_chunk(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    above: &[CostAndBackPointer],
    chunk: &mut [CostAndBackPointer],
    base: usize,
    y: u32,
) {
    for (offset, cell) in chunk.iter_mut().enumerate() {
        *cell = cost_candidate_pixel(intensity, mask, above, ((base + offset) as u32, y));
    }
}

#[cfg(not(feature = "threaded"))]
fn fill_row(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    above: &[CostAndBackPointer],
    row: &mut [CostAndBackPointer],
    y: u32,
) {
    fill_chunk(intensity, mask, above, row, 0, y);
}

// Below this many columns, spinning up workers costs more than it
// saves.
#[cfg(feature = "threaded")]
const PARALLEL_ROW_WIDTH: usize = 512;

#[cfg(feature = "threaded")]
fn fill_row(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    above: &[CostAndBackPointer],
    row: &mut [CostAndBackPointer],
    y: u32,
) {
    let workers = num_cpus::get();
    if workers < 2 || row.len() < PARALLEL_ROW_WIDTH {
        fill_chunk(intensity, mask, above, row, 0, y);
        return;
    }
    let chunk_len = (row.len() + workers - 1) / workers;
    fill_row_in_chunks(intensity, mask, above, row, y, chunk_len);
}

// Rows must be done strictly top to bottom, but the cells of one row
// only read the row above, so the row itself can be carved into
// chunks and handed to separate threads.
#[cfg(feature = "threaded")]
fn fill_row_in_chunks(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    above: &[CostAndBackPointer],
    row: &mut [CostAndBackPointer],
    y: u32,
    chunk_len: usize,
) {
    crossbeam::scope(|scope| {
        for (n, chunk) in row.chunks_mut(chunk_len).enumerate() {
            scope.spawn(move |_| fill_chunk(intensity, mask, above, chunk, n * chunk_len, y));
        }
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
}

/// Recompute the whole cost matrix in place over the grids' current
/// width.  `costs` must already have been narrowed to match.
pub fn calculate_cost(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    costs: &mut CostMap,
) {
    assert_eq!(
        intensity.dimensions(),
        costs.dimensions(),
        "cost matrix is out of step with the intensity grid"
    );
    let (width, height) = intensity.dimensions();

    // The top row is a special case: no parent, just its own energy.
    for x in 0..width {
        costs[(x, 0)] = CostAndBackPointer {
            cost: pixel_energy(intensity, mask, (x, 0)),
            parent: Parent::Center,
        };
    }

    for y in 1..height {
        let (above, row) = costs.split_rows_mut(y);
        fill_row(intensity, mask, above, row, y);
    }
}

/// Convenience: a freshly allocated cost matrix for the given grids.
pub fn forward_cost(intensity: &TwoDimensionalMap<i32>, mask: &TwoDimensionalMap<bool>) -> CostMap {
    let (width, height) = intensity.dimensions();
    let mut costs = CostMap::new(width, height);
    calculate_cost(intensity, mask, &mut costs);
    costs
}
