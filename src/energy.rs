// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel
//!
//! The energy of a pixel is a cheap gradient magnitude over the
//! intensity grid: the absolute difference to the neighbor on the
//! right plus the absolute difference to the neighbor below.  Pixels
//! on the right edge look left instead, and pixels on the bottom row
//! look up.  Protected pixels are given an energy so large that no
//! seam will go through one if there is any way around it.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;
use image::{GrayImage, Luma};
use num_traits::cast::cast;

/// The energy of a protected pixel.  A seam through even one
/// protected pixel costs more than any unprotected path through an
/// image of up to a few million rows.
pub const PROTECTED_ENERGY: i64 = 1 << 40;

/// Energy of the pixel at `(x, y)` given the grids as they currently
/// stand.  Both grids must be at least 2x2.
#[inline]
pub fn pixel_energy(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
    (x, y): (u32, u32),
) -> i64 {
    if mask[(x, y)] {
        return PROTECTED_ENERGY;
    }

    let (mw, mh) = (intensity.width() - 1, intensity.height() - 1);
    let neighbor_x = cq!(x == mw, x - 1, x + 1);
    let neighbor_y = cq!(y == mh, y - 1, y + 1);

    let here = i64::from(intensity[(x, y)]);
    (i64::from(intensity[(neighbor_x, y)]) - here).abs()
        + (i64::from(intensity[(x, neighbor_y)]) - here).abs()
}

/// Compute the energy of every pixel in the current grid.
pub fn calculate_energy(
    intensity: &TwoDimensionalMap<i32>,
    mask: &TwoDimensionalMap<bool>,
) -> TwoDimensionalMap<i64> {
    let (width, height) = intensity.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| pixel_energy(intensity, mask, (x, y)))
}

/// Render an energy map as an 8-bit greyscale image, scaled so the
/// most energetic unprotected pixel is white.  Protected pixels are
/// always white.
pub fn energy_to_image(energy: &TwoDimensionalMap<i64>) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy
        .iter()
        .filter(|e| **e < PROTECTED_ENERGY)
        .max()
        .cloned()
        .unwrap_or(0);

    GrayImage::from_fn(width, height, |x, y| {
        let e = energy[(x, y)];
        let level: u8 = if e >= PROTECTED_ENERGY {
            255
        } else if factor == 0 {
            0
        } else {
            cast::<i64, u8>(e * 255 / factor).unwrap_or(255)
        };
        Luma([level])
    })
}
