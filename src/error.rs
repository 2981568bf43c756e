// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong before a carve starts.  Once a
//! `SeamCarver` exists, the carve itself cannot fail; a bad seam index
//! past that point is a bug and panics.

use failure::Fail;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum CarveError {
    #[fail(
        display = "image is too small to seam carve: {}x{} (both sides must be at least 2)",
        width, height
    )]
    ImageTooSmall { width: u32, height: u32 },

    #[fail(
        display = "too many seams: {} requested but an image {} pixels wide allows at most {}",
        requested, width, allowed
    )]
    TooManySeams {
        requested: u32,
        allowed: u32,
        width: u32,
    },

    #[fail(
        display = "mask is {}x{} but the image is {}x{}",
        mask_width, mask_height, width, height
    )]
    MaskMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    #[fail(display = "invalid channel weights: {}", _0)]
    InvalidWeights(String),
}
