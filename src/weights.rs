// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Channel weighting for the greyscale projection.

use crate::error::CarveError;
use std::str::FromStr;

/// How much each of red, green, and blue contributes to a pixel's
/// intensity.  The sum of the three is the normalization maximum, so
/// it may not be zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RgbWeights {
    red: u32,
    green: u32,
    blue: u32,
}

impl RgbWeights {
    pub fn new(red: u32, green: u32, blue: u32) -> Result<Self, CarveError> {
        if red == 0 && green == 0 && blue == 0 {
            return Err(CarveError::InvalidWeights(
                "at least one channel weight must be non-zero".to_string(),
            ));
        }
        Ok(RgbWeights { red, green, blue })
    }

    pub fn red(&self) -> u32 {
        self.red
    }

    pub fn green(&self) -> u32 {
        self.green
    }

    pub fn blue(&self) -> u32 {
        self.blue
    }

    /// The normalization maximum: the sum of the three weights.
    pub fn max_weight(&self) -> u64 {
        u64::from(self.red) + u64::from(self.green) + u64::from(self.blue)
    }

    /// Weighted average of one pixel's channels.
    #[inline]
    pub fn project(&self, [r, g, b]: [u8; 3]) -> i32 {
        let sum = u64::from(r) * u64::from(self.red)
            + u64::from(g) * u64::from(self.green)
            + u64::from(b) * u64::from(self.blue);
        (sum / self.max_weight()) as i32
    }
}

impl Default for RgbWeights {
    fn default() -> Self {
        RgbWeights {
            red: 1,
            green: 1,
            blue: 1,
        }
    }
}

impl FromStr for RgbWeights {
    type Err = CarveError;

    /// Parses `"r,g,b"`, e.g. `"299,587,114"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CarveError::InvalidWeights(format!("{:?}: {}", s, e)))?;
        match parts.as_slice() {
            [r, g, b] => RgbWeights::new(*r, *g, *b),
            _ => Err(CarveError::InvalidWeights(format!(
                "{:?}: expected three comma-separated weights",
                s
            ))),
        }
    }
}
