// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main engine
//!
//! A `SeamCarver` holds an image, its protection mask, and a target
//! width.  At construction it decides, once, whether the carve will
//! remove seams, insert them, or simply copy the image, and it refuses
//! images and seam counts the algorithm cannot handle.

use crate::cq;
use crate::energy::calculate_energy;
use crate::error::CarveError;
use crate::greyscale::{greyscale, pixel_map, pixel_map_to_image};
use crate::mask::{unprotected, ProtectionMask};
use crate::seambatch::SeamBatch;
use crate::twodmap::TwoDimensionalMap;
use crate::weights::RgbWeights;
use image::{Rgb, RgbImage};
use itertools::Itertools;
use log::info;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    Reduce,
    Increase,
    Identity,
}

/// The result of one carve: the resized image and the mask that went
/// along for the ride.
#[derive(Debug, Clone)]
pub struct Carved {
    pub image: RgbImage,
    pub mask: ProtectionMask,
}

/// A struct for holding the image to be carved.
#[derive(Debug)]
pub struct SeamCarver {
    image: RgbImage,
    mask: ProtectionMask,
    weights: RgbWeights,
    target_width: u32,
    seams: u32,
    strategy: Strategy,
    carved_mask: Option<ProtectionMask>,
}

impl SeamCarver {
    /// Prepare to carve `image` to `target_width`.  Fails if either
    /// side of the image is under 2 pixels, if `mask` is not exactly
    /// the size of the image, or if the change in width is more than
    /// half the source width.
    pub fn new(
        image: RgbImage,
        target_width: u32,
        weights: RgbWeights,
        mask: ProtectionMask,
    ) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        if width < 2 || height < 2 {
            return Err(CarveError::ImageTooSmall { width, height });
        }

        if mask.dimensions() != (width, height) {
            return Err(CarveError::MaskMismatch {
                mask_width: mask.width(),
                mask_height: mask.height(),
                width,
                height,
            });
        }

        let seams = cq!(target_width > width, target_width - width, width - target_width);
        if seams > width / 2 {
            return Err(CarveError::TooManySeams {
                requested: seams,
                allowed: width / 2,
                width,
            });
        }

        let strategy = if target_width < width {
            Strategy::Reduce
        } else if target_width > width {
            Strategy::Increase
        } else {
            Strategy::Identity
        };

        info!(
            "seam carving {}x{} to width {}: {:?}, {} seams",
            width, height, target_width, strategy, seams
        );

        Ok(SeamCarver {
            image,
            mask,
            weights,
            target_width,
            seams,
            strategy,
            carved_mask: None,
        })
    }

    /// Like `new`, with nothing protected.
    pub fn unprotected(
        image: RgbImage,
        target_width: u32,
        weights: RgbWeights,
    ) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        SeamCarver::new(image, target_width, weights, unprotected(width, height))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn number_of_seams(&self) -> u32 {
        self.seams
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    /// Carve, returning both the image and the mask.
    pub fn carve(&self) -> Carved {
        let carved = match self.strategy {
            Strategy::Reduce => self.reduce_width(),
            Strategy::Increase => self.increase_width(),
            Strategy::Identity => Carved {
                image: self.image.clone(),
                mask: self.mask.clone(),
            },
        };
        debug_assert_eq!(carved.image.width(), self.target_width);
        debug_assert_eq!(carved.mask.width(), self.target_width);
        info!("seam carving done: {:?}", carved.image.dimensions());
        carved
    }

    /// The image at its new width.  The carved mask is kept for
    /// `mask_after_seam_carving`.
    pub fn resize(&mut self) -> RgbImage {
        let Carved { image, mask } = self.carve();
        self.carved_mask = Some(mask);
        image
    }

    /// The protection mask, carved exactly as the pixels were.  Reuses
    /// the work of an earlier `resize`, if there was one.
    pub fn mask_after_seam_carving(&mut self) -> ProtectionMask {
        if let Some(mask) = &self.carved_mask {
            return mask.clone();
        }
        let mask = self.carve().mask;
        self.carved_mask = Some(mask.clone());
        mask
    }

    /// A copy of the source image with every seam a reduction would
    /// remove painted in `color`.
    pub fn show_seams(&self, color: Rgb<u8>) -> RgbImage {
        let mut out = self.image.clone();
        let outcome = self.batch(false).run(self.seams, None);
        for seam in &outcome.restored {
            for (y, &x) in seam.iter().enumerate() {
                out.put_pixel(x, y as u32, color);
            }
        }
        out
    }

    /// The energy of every source pixel, before any carving.
    pub fn energy_map(&self) -> TwoDimensionalMap<i64> {
        calculate_energy(&greyscale(&self.image, &self.weights), &self.mask)
    }

    fn batch(&self, track_insertions: bool) -> SeamBatch {
        SeamBatch::new(
            greyscale(&self.image, &self.weights),
            self.mask.clone(),
            track_insertions,
        )
    }

    fn reduce_width(&self) -> Carved {
        let mut pixels = pixel_map(&self.image);
        let outcome = self.batch(false).run(self.seams, Some(&mut pixels));
        Carved {
            image: pixel_map_to_image(&pixels),
            mask: outcome.mask.compacted(),
        }
    }

    // The source is never shrunk here: the batch only runs to find
    // where the copies go.  Each row is then rebuilt left to right,
    // and every time the output column reaches an inserted copy the
    // source column falls one further behind, repeating the pixel
    // just written.
    fn increase_width(&self) -> Carved {
        let outcome = self.batch(true).run(self.seams, None);
        let (width, height) = self.image.dimensions();
        let out_width = width + self.seams;

        let mut image = RgbImage::new(out_width, height);
        let mut mask = TwoDimensionalMap::new(out_width, height);
        for y in 0..height {
            let mut copies = outcome
                .increased
                .iter()
                .map(|seam| seam[y as usize])
                .sorted()
                .peekable();
            let mut indent = 0;
            for x in 0..out_width {
                if copies.peek() == Some(&x) {
                    copies.next();
                    indent += 1;
                }
                let source = x - indent;
                image.put_pixel(x, y, *self.image.get_pixel(source, y));
                mask[(x, y)] = self.mask[(source, y)];
            }
            assert!(copies.next().is_none(), "unplaced seam copy in row {}", y);
        }
        Carved { image, mask }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = f(x, y);
            Rgb([v, v, v])
        })
    }

    fn noise(x: u32, y: u32) -> u8 {
        ((x * 37 + y * 101 + x * y * 13) % 251) as u8
    }

    fn carver(image: RgbImage, width: u32) -> SeamCarver {
        SeamCarver::unprotected(image, width, RgbWeights::default()).unwrap()
    }

    #[test]
    fn rejects_tiny_images() {
        let err = SeamCarver::unprotected(RgbImage::new(1, 5), 1, RgbWeights::default());
        assert_eq!(
            err.unwrap_err(),
            CarveError::ImageTooSmall {
                width: 1,
                height: 5
            }
        );
        assert!(SeamCarver::unprotected(RgbImage::new(5, 1), 5, RgbWeights::default()).is_err());
    }

    #[test]
    fn rejects_too_many_seams() {
        for width in 2..9 {
            let shrink = SeamCarver::unprotected(RgbImage::new(width, 4), 0, RgbWeights::default());
            assert!(matches!(shrink, Err(CarveError::TooManySeams { .. })));
            let grow =
                SeamCarver::unprotected(RgbImage::new(width, 4), 2 * width, RgbWeights::default());
            assert!(matches!(grow, Err(CarveError::TooManySeams { .. })));
        }
        assert!(SeamCarver::unprotected(RgbImage::new(8, 4), 4, RgbWeights::default()).is_ok());
        assert!(SeamCarver::unprotected(RgbImage::new(8, 4), 3, RgbWeights::default()).is_err());
    }

    #[test]
    fn rejects_a_mismatched_mask() {
        let result = SeamCarver::new(
            RgbImage::new(4, 4),
            4,
            RgbWeights::default(),
            unprotected(4, 3),
        );
        assert!(matches!(result, Err(CarveError::MaskMismatch { .. })));
    }

    #[test]
    fn picks_the_strategy_once() {
        assert_eq!(carver(RgbImage::new(6, 3), 4).strategy(), Strategy::Reduce);
        assert_eq!(carver(RgbImage::new(6, 3), 8).strategy(), Strategy::Increase);
        assert_eq!(carver(RgbImage::new(6, 3), 6).strategy(), Strategy::Identity);
        assert_eq!(carver(RgbImage::new(6, 3), 8).number_of_seams(), 2);
    }

    #[test]
    fn identity_is_a_pixel_perfect_copy() {
        let image = RgbImage::from_fn(5, 4, |x, y| Rgb([x as u8, y as u8, 200]));
        let mask = TwoDimensionalMap::from_fn(5, 4, |x, y| x == y);
        let mut carver =
            SeamCarver::new(image.clone(), 5, RgbWeights::default(), mask.clone()).unwrap();
        assert_eq!(carver.resize(), image);
        assert_eq!(carver.mask_after_seam_carving(), mask);
    }

    #[test]
    fn reduce_skips_the_bright_column() {
        let image = grey(4, 4, |x, _| cq!(x == 2, 255, 10));
        let mut carver = carver(image, 3);
        let out = carver.resize();
        assert_eq!(out.dimensions(), (3, 4));
        for y in 0..4 {
            let row: Vec<u8> = (0..3).map(|x| out.get_pixel(x, y)[0]).collect();
            assert_eq!(row.iter().filter(|v| **v == 255).count(), 1, "row {}", y);
        }
    }

    #[test]
    fn reduce_output_matches_target_dimensions() {
        let mut carver = carver(grey(20, 7, noise), 12);
        assert_eq!(carver.resize().dimensions(), (12, 7));
        assert_eq!(carver.mask_after_seam_carving().dimensions(), (12, 7));
    }

    #[test]
    fn reduce_keeps_the_protected_pixels() {
        let image = grey(10, 6, noise);
        let mask = TwoDimensionalMap::from_fn(10, 6, |x, _| x == 4 || x == 5);
        let mut carver = SeamCarver::new(image.clone(), 6, RgbWeights::default(), mask).unwrap();
        let out = carver.resize();
        let carved = carver.mask_after_seam_carving();
        for y in 0..6 {
            let kept: Vec<u32> = (0..6).filter(|x| carved[(*x, y)]).collect();
            assert_eq!(kept.len(), 2, "row {}", y);
            assert_eq!(out.get_pixel(kept[0], y), image.get_pixel(4, y));
            assert_eq!(out.get_pixel(kept[1], y), image.get_pixel(5, y));
        }
    }

    #[test]
    fn mask_without_resize_matches_mask_after_resize() {
        let mask = TwoDimensionalMap::from_fn(10, 6, |x, y| x == 7 && y > 2);
        let fresh = SeamCarver::new(grey(10, 6, noise), 7, RgbWeights::default(), mask.clone())
            .unwrap()
            .mask_after_seam_carving();
        let mut resized =
            SeamCarver::new(grey(10, 6, noise), 7, RgbWeights::default(), mask).unwrap();
        resized.resize();
        assert_eq!(fresh, resized.mask_after_seam_carving());
    }

    #[test]
    fn increase_duplicates_seam_pixels() {
        let image = grey(10, 5, noise);
        let mut carver = carver(image.clone(), 14);
        let out = carver.resize();
        assert_eq!(out.dimensions(), (14, 5));
        assert_eq!(carver.mask_after_seam_carving().dimensions(), (14, 5));

        for y in 0..5 {
            // Dropping exactly one of each repeated pair gives back the
            // source row.
            let row: Vec<u8> = (0..14).map(|x| out.get_pixel(x, y)[0]).collect();
            let source: Vec<u8> = (0..10).map(|x| image.get_pixel(x, y)[0]).collect();
            assert!(is_widened(&source, &row, 4), "row {}: {:?}", y, row);
        }
    }

    // `wide` is `narrow` with `extra` entries each repeated once.
    fn is_widened(narrow: &[u8], wide: &[u8], extra: usize) -> bool {
        fn go(narrow: &[u8], wide: &[u8], extra: usize, last: Option<u8>) -> bool {
            match (narrow.split_first(), wide.split_first()) {
                (_, None) => narrow.is_empty() && extra == 0,
                (next, Some((w, rest))) => {
                    let repeat = extra > 0 && last == Some(*w) && go(narrow, rest, extra - 1, None);
                    repeat
                        || matches!(next, Some((n, nrest)) if n == w && go(nrest, rest, extra, Some(*w)))
                }
            }
        }
        go(narrow, wide, extra, None)
    }

    #[test]
    fn increase_carries_the_mask() {
        let mask = TwoDimensionalMap::from_fn(8, 4, |x, _| x == 0);
        let mut carver = SeamCarver::new(grey(8, 4, noise), 11, RgbWeights::default(), mask).unwrap();
        carver.resize();
        let carved = carver.mask_after_seam_carving();
        for y in 0..4 {
            assert!(carved[(0, y)]);
            assert_eq!((0..11).filter(|x| carved[(*x, y)]).count(), 1);
        }
    }

    #[test]
    fn show_seams_paints_one_pixel_per_row_per_seam() {
        let image = grey(12, 6, noise);
        let red = Rgb([255, 0, 1]);
        let carver = carver(image.clone(), 9);
        let shown = carver.show_seams(red);
        assert_eq!(shown.dimensions(), (12, 6));
        for y in 0..6 {
            let painted = (0..12).filter(|x| *shown.get_pixel(*x, y) == red).count();
            assert_eq!(painted, 3, "row {}", y);
        }
    }

    #[test]
    fn energy_map_covers_the_source() {
        let mask = TwoDimensionalMap::from_fn(6, 4, |x, y| x == 1 && y == 1);
        let carver = SeamCarver::new(grey(6, 4, noise), 5, RgbWeights::default(), mask).unwrap();
        let energy = carver.energy_map();
        assert_eq!(energy.dimensions(), (6, 4));
        assert_eq!(energy[(1, 1)], crate::energy::PROTECTED_ENERGY);
    }

    #[test]
    fn show_seams_without_seams_is_a_copy() {
        let image = grey(6, 6, noise);
        assert_eq!(carver(image.clone(), 6).show_seams(Rgb([255, 0, 0])), image);
    }
}
