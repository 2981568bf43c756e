// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Finding many seams at once
//!
//! Seams are found one at a time.  After each one, the working grids
//! (intensity, mask, and optionally the pixels themselves) are
//! compacted by one column along the seam, and the cost matrix is
//! rebuilt over the narrower grid.  That means seam *k* is reported in
//! the coordinates of a grid that has already lost *k - 1* columns.
//!
//! The history keeps three views of every seam:
//!
//! * `shifted`: exactly as found, in compacted coordinates.
//! * `restored`: translated back into the columns of the source
//!   image.  Walk the earlier shifted seams newest-first; every one
//!   that sits at or left of the current index pushed this pixel one
//!   column to the left when it was removed, so push it back.
//! * `increased`: the column that the *inserted copy* of this pixel
//!   occupies in the enlarged image.  If `o` is the restored column
//!   and `n` earlier seams in that row lie left of `o`, the original
//!   lands at `o + n` and its copy at `o + n + 1`.  Any earlier copy at
//!   or right of the new one is pushed one column further right.

use crate::cq;
use crate::forward::{calculate_cost, forward_cost, CostMap};
use crate::greyscale::PixelMap;
use crate::seamfinder::{cost_to_seam, is_connected, Seam};
use crate::twodmap::TwoDimensionalMap;
use log::{debug, trace};

#[derive(Debug, Default)]
pub(crate) struct SeamHistory {
    shifted: Vec<Seam>,
    restored: Vec<Seam>,
    increased: Vec<Seam>,
}

impl SeamHistory {
    // Compacted column -> source column, one row.
    fn restore(&self, y: usize, x: u32) -> u32 {
        self.shifted
            .iter()
            .rev()
            .fold(x, |col, earlier| cq!(col >= earlier[y], col + 1, col))
    }

    fn record(&mut self, seam: Seam, track_insertions: bool) {
        let restored: Seam = seam
            .iter()
            .enumerate()
            .map(|(y, &x)| self.restore(y, x))
            .collect();

        debug_assert!(
            self.restored
                .iter()
                .all(|earlier| earlier.iter().zip(&restored).all(|(a, b)| a != b)),
            "two seams in one batch claimed the same source pixel"
        );

        if track_insertions {
            let increased = restored
                .iter()
                .enumerate()
                .map(|(y, &o)| {
                    let left = self.restored.iter().filter(|s| s[y] < o).count() as u32;
                    o + left + 1
                })
                .collect::<Seam>();

            for earlier in self.increased.iter_mut() {
                for (col, new) in earlier.iter_mut().zip(&increased) {
                    if *col >= *new {
                        *col += 1;
                    }
                }
            }
            self.increased.push(increased);
        }

        self.restored.push(restored);
        self.shifted.push(seam);
    }
}

/// What a batch hands back once all its seams are found.
#[derive(Debug)]
pub(crate) struct BatchOutcome {
    /// The protection mask, compacted along every seam.
    pub mask: TwoDimensionalMap<bool>,
    /// Every seam, in source coordinates.
    pub restored: Vec<Seam>,
    /// Every seam's inserted copy, in enlarged-image coordinates.
    /// Empty unless the batch was tracking insertions.
    pub increased: Vec<Seam>,
}

/// The multi-seam state machine: built with the full-width grids and
/// cost matrix, run once, consumed.
pub(crate) struct SeamBatch {
    intensity: TwoDimensionalMap<i32>,
    mask: TwoDimensionalMap<bool>,
    costs: CostMap,
    history: SeamHistory,
    track_insertions: bool,
}

impl SeamBatch {
    pub fn new(
        intensity: TwoDimensionalMap<i32>,
        mask: TwoDimensionalMap<bool>,
        track_insertions: bool,
    ) -> Self {
        assert_eq!(intensity.dimensions(), mask.dimensions());
        let costs = forward_cost(&intensity, &mask);
        SeamBatch {
            intensity,
            mask,
            costs,
            history: SeamHistory::default(),
            track_insertions,
        }
    }

    /// Find `count` seams.  If `pixels` is given, it is compacted in
    /// lock-step with the other grids.
    pub fn run(mut self, count: u32, mut pixels: Option<&mut PixelMap>) -> BatchOutcome {
        debug!(
            "finding {} seams in a {}x{} grid",
            count,
            self.intensity.width(),
            self.intensity.height()
        );

        for k in 0..count {
            let seam = cost_to_seam(&self.costs);
            assert!(is_connected(&seam), "disconnected seam {:?}", seam);
            trace!("seam {}: {:?}", k, seam);

            self.intensity.remove_column(&seam);
            self.mask.remove_column(&seam);
            if let Some(pixels) = pixels.as_mut() {
                pixels.remove_column(&seam);
            }
            self.costs.narrow();

            // Nothing will read the matrix after the last seam, and the
            // grid may by then be too narrow to have an energy at all.
            if k + 1 < count {
                calculate_cost(&self.intensity, &self.mask, &mut self.costs);
            }

            self.history.record(seam, self.track_insertions);
        }

        BatchOutcome {
            mask: self.mask,
            restored: self.history.restored,
            increased: self.history.increased,
        }
    }
}
