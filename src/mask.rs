// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Protection masks.  A `true` cell may never be carved away.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;
use image::{GrayImage, Luma};

pub type ProtectionMask = TwoDimensionalMap<bool>;

/// A mask that protects nothing.
pub fn unprotected(width: u32, height: u32) -> ProtectionMask {
    TwoDimensionalMap::new(width, height)
}

/// Any non-black pixel of `image` is protected.
pub fn mask_from_image(image: &GrayImage) -> ProtectionMask {
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| image.get_pixel(x, y)[0] != 0)
}

/// Protected cells render white, everything else black.
pub fn mask_to_image(mask: &ProtectionMask) -> GrayImage {
    let (width, height) = mask.dimensions();
    GrayImage::from_fn(width, height, |x, y| Luma([cq!(mask[(x, y)], 255, 0)]))
}
