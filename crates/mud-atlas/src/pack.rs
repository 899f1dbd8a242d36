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

//! Atlas packing: the packer capability and its adapter for glyph records.

use glam::UVec2;
use rect_packer::Packer;
use tracing::debug;

use crate::config::TextureDimensions;
use crate::glyph::GlyphRecord;

/// A rectangle to be placed by a [RectPacker].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PackRect {
    pub width: u32,
    pub height: u32,
    /// Written by the packer on success.
    pub position: UVec2,
}

/// Places a batch of rectangles inside a bounded area.
pub trait RectPacker {
    /// Places every rectangle without overlap, at least `spacing` texels
    /// apart, inside `width` x `height`, and returns true. Returns false if
    /// they don't all fit; positions are then unspecified.
    fn pack(&self, rects: &mut [PackRect], width: u32, height: u32, spacing: u32) -> bool;
}

/// A [RectPacker] backed by `rect_packer`'s skyline packer. Rectangles are
/// offered tallest first.
#[derive(Copy, Clone, Debug, Default)]
pub struct SkylinePacker;

impl RectPacker for SkylinePacker {
    fn pack(&self, rects: &mut [PackRect], width: u32, height: u32, spacing: u32) -> bool {
        let (Ok(width), Ok(height), Ok(spacing)) = (
            i32::try_from(width),
            i32::try_from(height),
            i32::try_from(spacing),
        ) else {
            return false;
        };

        let mut packer = Packer::new(rect_packer::Config {
            width,
            height,
            border_padding: 0,
            rectangle_padding: spacing,
        });

        let mut order: Vec<usize> = (0..rects.len()).collect();
        order.sort_by(|a, b| rects[*b].height.cmp(&rects[*a].height));

        for index in order {
            let rect = &mut rects[index];
            if rect.width == 0 || rect.height == 0 {
                rect.position = UVec2::ZERO;
                continue;
            }

            let (Ok(w), Ok(h)) = (i32::try_from(rect.width), i32::try_from(rect.height)) else {
                return false;
            };

            match packer.pack(w, h, false) {
                Some(placed) => rect.position = UVec2::new(placed.x as u32, placed.y as u32),
                None => return false,
            }
        }

        true
    }
}

/// Packs the footprints of `glyphs` into the texture in a single packer
/// call. On success every glyph's `placement` is set; on failure the
/// placements are left untouched and must not be used.
pub fn pack_glyphs<O, P>(
    glyphs: &mut [GlyphRecord<O>],
    texture: TextureDimensions,
    spacing: u32,
    packer: &P,
) -> bool
where
    P: RectPacker + ?Sized,
{
    let mut rects: Vec<PackRect> = glyphs
        .iter()
        .map(|glyph| PackRect {
            width: glyph.footprint.x,
            height: glyph.footprint.y,
            position: UVec2::ZERO,
        })
        .collect();

    if !packer.pack(&mut rects, texture.width, texture.height, spacing) {
        debug!("{} glyphs do not fit into {}", glyphs.len(), texture);
        return false;
    }

    for (glyph, rect) in glyphs.iter_mut().zip(rects) {
        glyph.placement = rect.position;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodepointRange;
    use crate::normalize::normalize;
    use crate::source::collect_glyphs;
    use crate::testing::{assert_disjoint, BoxSource};

    fn rects(sizes: &[(u32, u32)]) -> Vec<PackRect> {
        sizes
            .iter()
            .map(|&(width, height)| PackRect {
                width,
                height,
                position: UVec2::ZERO,
            })
            .collect()
    }

    fn placed(rects: &[PackRect]) -> Vec<(UVec2, UVec2)> {
        rects
            .iter()
            .map(|r| (r.position, UVec2::new(r.width, r.height)))
            .collect()
    }

    #[test]
    fn skyline_places_disjoint_rects() {
        let mut batch = rects(&[
            (10, 12),
            (7, 20),
            (15, 5),
            (8, 8),
            (12, 14),
            (3, 30),
            (20, 9),
            (6, 6),
        ]);

        assert!(SkylinePacker.pack(&mut batch, 64, 64, 2));
        assert_disjoint(&placed(&batch), 64, 64, 2);
    }

    #[test]
    fn skyline_rejects_oversized() {
        let mut batch = rects(&[(10, 10), (70, 4)]);
        assert!(!SkylinePacker.pack(&mut batch, 64, 64, 0));

        let mut batch = rects(&[(33, 33), (33, 33)]);
        assert!(!SkylinePacker.pack(&mut batch, 64, 32, 0));
    }

    #[test]
    fn glyph_placements_written_back() {
        let source = BoxSource::scenario();
        let mut glyphs = collect_glyphs(&source, &[CodepointRange::new(65, 67)]);
        normalize(&mut glyphs, 32, 2).unwrap();

        let texture = TextureDimensions::new(256, 256);
        assert!(pack_glyphs(&mut glyphs, texture, 2, &SkylinePacker));

        let rects: Vec<_> = glyphs.iter().map(|g| (g.placement, g.footprint)).collect();
        assert_eq!(rects.len(), 2);
        assert_disjoint(&rects, 256, 256, 2);
    }

    #[test]
    fn tiny_texture_does_not_fit() {
        let source = BoxSource::scenario();
        let mut glyphs = collect_glyphs(&source, &[CodepointRange::new(65, 67)]);
        normalize(&mut glyphs, 100, 2).unwrap();

        let texture = TextureDimensions::new(4, 4);
        assert!(!pack_glyphs(&mut glyphs, texture, 2, &SkylinePacker));
    }
}
