// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware width resizing.
//!
//! Narrows or widens an image by removing or duplicating its
//! lowest-energy vertical seams, optionally steering around a mask of
//! protected pixels.
//!
//! ```no_run
//! use seamresize::{RgbWeights, SeamCarver};
//!
//! let image = image::open("tower.png").unwrap().to_rgb8();
//! let width = image.width() * 3 / 4;
//! let mut carver = SeamCarver::unprotected(image, width, RgbWeights::default()).unwrap();
//! carver.resize().save("tower-narrow.png").unwrap();
//! ```

mod ternary;

pub mod energy;
pub mod error;
pub mod forward;
pub mod greyscale;
pub mod mask;
mod seambatch;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;
pub mod weights;

pub use energy::{calculate_energy, energy_to_image};
pub use error::CarveError;
pub use mask::{mask_from_image, mask_to_image, ProtectionMask};
pub use seamcarver::{Carved, SeamCarver, Strategy};
pub use twodmap::TwoDimensionalMap;
pub use weights::RgbWeights;
