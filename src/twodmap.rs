// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A shrinkable two-dimensional grid
//!
//! Every grid the carver works with (the pixels, the intensities, the
//! protection mask, and the cost matrix) is one of these.  The grid
//! remembers the width it was allocated with (the stride) separately
//! from the width it currently pretends to have.  Removing a seam
//! shifts each row left by one past the seam index and shrinks the
//! logical width; the allocation never changes, and the trailing
//! column of every row just goes stale.

use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of `P`, addressed as `(x, y)`.
#[derive(Debug, Clone)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with the default value of `P`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map by asking `f` for the value at every `(x, y)`, in
    /// row-major order.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data: iproduct!(0..height, 0..width)
                .map(|(y, x)| f(x, y))
                .collect(),
        }
    }

    /// Wrap a row-major vector.  Returns `None` if the vector is not
    /// exactly `width * height` long.
    pub fn from_raw(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            stride: width,
            data,
        })
    }

    /// The current logical width.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  The
    // stride, not the width, is what separates two rows.
    fn get_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside a {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.stride as usize) + (x as usize)
    }

    fn row_start(&self, y: u32) -> usize {
        (y as usize) * (self.stride as usize)
    }

    /// The live portion of row `y`.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.row_start(y);
        &self.data[start..start + self.width as usize]
    }

    /// Row `y - 1` for reading alongside row `y` for writing.  This is
    /// the only dependency the cost matrix has between rows.
    pub(crate) fn split_rows_mut(&mut self, y: u32) -> (&[P], &mut [P]) {
        assert!(y > 0 && y < self.height, "no row above row {}", y);
        let width = self.width as usize;
        let start = self.row_start(y);
        let above_start = self.row_start(y - 1);
        let (above, current) = self.data.split_at_mut(start);
        (&above[above_start..above_start + width], &mut current[..width])
    }

    /// Remove one pixel per row at the columns named by `seam`,
    /// shifting everything to its right one step left.
    pub fn remove_column(&mut self, seam: &[u32]) {
        assert_eq!(
            seam.len(),
            self.height as usize,
            "seam length does not match map height"
        );
        let width = self.width as usize;
        for (y, &x) in seam.iter().enumerate() {
            assert!(
                x < self.width,
                "seam index {} at row {} is outside width {}",
                x,
                y,
                self.width
            );
            let start = self.row_start(y as u32);
            self.data[start..start + width].copy_within(x as usize + 1.., x as usize);
        }
        self.width -= 1;
    }

    /// Drop the rightmost column without touching the data.  Used by
    /// maps that are about to be recomputed wholesale anyway.
    pub(crate) fn narrow(&mut self) {
        assert!(self.width > 0, "cannot narrow an empty map");
        self.width -= 1;
    }

    /// A copy holding only the live columns, with a tight allocation.
    pub fn compacted(&self) -> Self {
        TwoDimensionalMap::from_fn(self.width, self.height, |x, y| self[(x, y)])
    }

    /// Every live value, row-major.
    pub fn iter(&self) -> impl Iterator<Item = &P> + '_ {
        (0..self.height).flat_map(move |y| self.row(y).iter())
    }
}

// Two maps are equal if their live cells are; stale columns and the
// stride don't count.
impl<P: Default + Copy + PartialEq> PartialEq for TwoDimensionalMap<P> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.iter().eq(other.iter())
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
