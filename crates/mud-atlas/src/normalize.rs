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

use glam::{DVec2, UVec2};
use tracing::debug;

use crate::error::{AtlasError, AtlasResult};
use crate::glyph::GlyphRecord;

/// Scales every glyph so the tallest one is exactly `max_height` texels and
/// derives each glyph's padded footprint and translation.
///
/// One scale factor is shared by every glyph in the set. The smoothing
/// margin is in texels and does not scale. Returns the scale factor.
pub fn normalize<O>(
    glyphs: &mut [GlyphRecord<O>],
    max_height: u32,
    smooth_pixels: u32,
) -> AtlasResult<f64> {
    let tallest = glyphs
        .iter()
        .map(|glyph| glyph.bounds.height())
        .fold(0.0f64, f64::max);

    if glyphs.is_empty() || !(tallest > 0.0) {
        return Err(AtlasError::NoGlyphsCollected);
    }

    let scale = max_height as f64 / tallest;
    let margin = smooth_pixels as f64;
    let border = smooth_pixels.saturating_mul(2);
    debug!(
        "Normalizing {} glyphs to height {} (scale {})",
        glyphs.len(),
        max_height,
        scale
    );

    for glyph in glyphs.iter_mut() {
        glyph.bounds.scale(scale);
        glyph.advance *= scale;

        let size = glyph.bounds.size().ceil();
        glyph.footprint = UVec2::new(
            (size.x as u32).saturating_add(border),
            (size.y as u32).saturating_add(border),
        );

        glyph.translation = DVec2::splat(margin) - glyph.bounds.origin();
    }

    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodepointRange;
    use crate::glyph::BoundingBox;
    use crate::source::collect_glyphs;
    use crate::testing::BoxSource;

    fn collect(source: &BoxSource) -> Vec<GlyphRecord<()>> {
        collect_glyphs(source, &[CodepointRange::new(0, 256)])
    }

    #[test]
    fn tallest_glyph_reaches_target() {
        let source = BoxSource::new()
            .with(65, BoundingBox::new(10.0, -200.0, 610.0, 700.0), 650.0)
            .with(66, BoundingBox::new(0.0, 0.0, 500.0, 450.0), 520.0)
            .with(67, BoundingBox::new(-30.0, -120.0, 300.0, 333.0), 310.0);

        for target in [1, 7, 32, 48, 100, 251] {
            let mut glyphs = collect(&source);
            normalize(&mut glyphs, target, 2).unwrap();

            let tallest = glyphs
                .iter()
                .map(|g| g.bounds.height())
                .fold(0.0f64, f64::max);

            assert!((tallest - target as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn footprint_and_translation() {
        let source = BoxSource::new()
            .with(65, BoundingBox::new(0.0, 0.0, 384.0, 512.0), 400.0)
            .with(103, BoundingBox::new(32.0, -128.0, 288.0, 256.0), 320.0);

        let mut glyphs = collect(&source);
        let scale = normalize(&mut glyphs, 32, 3).unwrap();
        assert_eq!(scale, 32.0 / 512.0);

        let a = &glyphs[0];
        assert_eq!(a.footprint, UVec2::new(24 + 6, 32 + 6));
        assert_eq!(a.translation, DVec2::new(3.0, 3.0));
        assert_eq!(a.advance, 25.0);

        // scaled to (2, -8)..(18, 16)
        let g = &glyphs[1];
        assert_eq!(g.bounds, BoundingBox::new(2.0, -8.0, 18.0, 16.0));
        assert_eq!(g.footprint, UVec2::new(16 + 6, 24 + 6));
        assert_eq!(g.translation, DVec2::new(1.0, 11.0));
        assert_eq!(g.advance, 20.0);
    }

    #[test]
    fn fractional_sizes_round_up() {
        let source = BoxSource::new().with(65, BoundingBox::new(0.0, 0.0, 100.0, 128.0), 0.0);
        let mut glyphs = collect(&source);
        normalize(&mut glyphs, 16, 0).unwrap();

        // 100 * 16 / 128 = 12.5
        assert_eq!(glyphs[0].footprint, UVec2::new(13, 16));
    }

    #[test]
    fn huge_margin_saturates() {
        let source = BoxSource::new().with(65, BoundingBox::new(0.0, 0.0, 64.0, 64.0), 0.0);
        let mut glyphs = collect(&source);
        normalize(&mut glyphs, 16, u32::MAX).unwrap();

        assert_eq!(glyphs[0].footprint, UVec2::splat(u32::MAX));
    }

    #[test]
    fn empty_set_fails() {
        let mut glyphs: Vec<GlyphRecord<()>> = vec![];
        assert!(matches!(
            normalize(&mut glyphs, 32, 2),
            Err(AtlasError::NoGlyphsCollected)
        ));
    }
}
