// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Greyscale projection
//!
//! The carver never looks at color directly.  Every decision is made
//! on a single intensity channel, projected once per carve from the
//! source raster using the caller's channel weights.  This module also
//! holds the trivial moves between an `RgbImage` and the plain pixel
//! grid the carver shrinks in place.

use crate::twodmap::TwoDimensionalMap;
use crate::weights::RgbWeights;
use image::{Rgb, RgbImage};

/// A raster as a shrinkable grid of `[r, g, b]` triplets.
pub type PixelMap = TwoDimensionalMap<[u8; 3]>;

/// Intensity of every pixel, same shape as the source.
pub fn greyscale(image: &RgbImage, weights: &RgbWeights) -> TwoDimensionalMap<i32> {
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| weights.project(image.get_pixel(x, y).0))
}

pub fn pixel_map(image: &RgbImage) -> PixelMap {
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| image.get_pixel(x, y).0)
}

/// Back to an image, keeping only the live columns.
pub fn pixel_map_to_image(pixels: &PixelMap) -> RgbImage {
    let (width, height) = pixels.dimensions();
    RgbImage::from_fn(width, height, |x, y| Rgb(pixels[(x, y)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cq;

    #[test]
    fn projects_with_weights() {
        let image = RgbImage::from_fn(2, 1, |x, _| cq!(x == 0, Rgb([255, 0, 0]), Rgb([0, 0, 255])));
        let only_red = RgbWeights::new(1, 0, 0).unwrap();
        let grey = greyscale(&image, &only_red);
        assert_eq!(grey.row(0), &[255, 0]);

        let grey = greyscale(&image, &RgbWeights::default());
        assert_eq!(grey.row(0), &[85, 85]);
    }

    #[test]
    fn pixel_map_round_trips_after_a_removal() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 7]));
        let mut pixels = pixel_map(&image);
        pixels.remove_column(&[1, 0]);
        let out = pixel_map_to_image(&pixels);
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(1, 0), &Rgb([2, 0, 7]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([1, 1, 7]));
    }
}
