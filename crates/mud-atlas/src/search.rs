// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Automatic glyph height selection.
//!
//! Feasibility is probed with full collect/normalize/pack trials that skip
//! field rendering. Heights grow exponentially from the initial bound until
//! a trial fails, then the window between the last fitting height and the
//! smallest failing one is bisected. The answer is exact: it fits, and one
//! texel taller does not (or would exceed the texture).

use tracing::{debug, info};

use crate::config::AtlasConfig;
use crate::error::AtlasResult;
use crate::normalize::normalize;
use crate::pack::{pack_glyphs, RectPacker};
use crate::source::{collect_glyphs, GlyphSource};

/// State of an exponential-then-bisecting search over integer heights.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeightSearch {
    /// Largest height known to fit (0 if none yet).
    lo: u32,
    /// Next height to try.
    hi: u32,
    /// Smallest height known not to fit.
    highest: u32,
}

impl HeightSearch {
    /// Starts a search whose first trial is `initial`. No trial will exceed
    /// `ceiling`.
    pub fn new(initial: u32, ceiling: u32) -> Self {
        let highest = ceiling.saturating_add(1);
        Self {
            lo: 0,
            hi: initial.min(highest - 1),
            highest,
        }
    }

    /// The next height to try, or `None` once the search has converged.
    pub fn trial(&self) -> Option<u32> {
        (self.lo != self.hi).then_some(self.hi)
    }

    /// Feeds back the outcome of the current trial.
    pub fn record(&mut self, fits: bool) {
        if fits {
            self.lo = self.hi;
            self.hi = self.lo.saturating_mul(2).min(self.highest - 1);
        } else {
            self.highest = self.highest.min(self.hi);
            self.hi = self.lo + (self.hi - self.lo) / 2;
        }
    }

    /// The largest height found to fit so far. Final once `trial` is `None`.
    pub fn result(&self) -> u32 {
        self.lo
    }

    /// Drives the search to completion with a fallible feasibility oracle.
    pub fn run<E>(mut self, mut fits: impl FnMut(u32) -> Result<bool, E>) -> Result<u32, E> {
        while let Some(height) = self.trial() {
            let outcome = fits(height)?;
            self.record(outcome);
        }

        Ok(self.result())
    }
}

/// Runs one feasibility trial: collects, normalizes and packs the glyphs at
/// `height` without rendering any fields.
pub fn fits_at<S, P>(config: &AtlasConfig, source: &S, packer: &P, height: u32) -> AtlasResult<bool>
where
    S: GlyphSource + ?Sized,
    P: RectPacker + ?Sized,
{
    let mut glyphs = collect_glyphs(source, &config.code_ranges);
    normalize(&mut glyphs, height, config.smooth_pixels)?;
    Ok(pack_glyphs(
        &mut glyphs,
        config.texture_size,
        config.spacing,
        packer,
    ))
}

/// Finds the tallest glyph height, starting from `config.char_height`, at
/// which every glyph still packs into the texture. Returns 0 if not even a
/// single texel fits.
pub fn find_max_height<S, P>(config: &AtlasConfig, source: &S, packer: &P) -> AtlasResult<u32>
where
    S: GlyphSource + ?Sized,
    P: RectPacker + ?Sized,
{
    let search = HeightSearch::new(config.char_height, config.texture_size.height);
    let mut trials = 0;
    let height = search.run(|height| -> AtlasResult<bool> {
        trials += 1;
        let fits = fits_at(config, source, packer, height)?;
        debug!("Trial height {}: {}", height, if fits { "fits" } else { "too large" });
        Ok(fits)
    })?;

    info!("Settled on glyph height {} after {} trials", height, trials);
    Ok(height)
}
