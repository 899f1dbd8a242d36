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

//! Collaborator doubles shared by the unit tests.

use std::collections::BTreeMap;

use glam::UVec2;

use crate::config::{AtlasConfig, CodepointRange, FieldMode, TextureDimensions};
use crate::field::{FieldRenderer, FieldRequest};
use crate::glyph::{BoundingBox, RawGlyph};
use crate::glyph_bitmap::{FieldBitmap, Plane};
use crate::pack::{PackRect, RectPacker};
use crate::source::GlyphSource;

/// A glyph source of bare boxes. Outlines carry nothing.
#[derive(Default)]
pub struct BoxSource {
    glyphs: BTreeMap<u32, (BoundingBox, f64)>,
}

impl BoxSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, codepoint: u32, bounds: BoundingBox, advance: f64) -> Self {
        self.glyphs.insert(codepoint, (bounds, advance));
        self
    }

    /// `A` and `B` with power-of-two friendly proportions so scaling is exact.
    pub fn scenario() -> Self {
        Self::new()
            .with(65, BoundingBox::new(0.0, 0.0, 384.0, 512.0), 400.0)
            .with(66, BoundingBox::new(0.0, 0.0, 256.0, 512.0), 300.0)
    }
}

impl GlyphSource for BoxSource {
    type Outline = ();

    fn glyph(&self, codepoint: u32) -> Option<RawGlyph<()>> {
        self.glyphs
            .get(&codepoint)
            .map(|(bounds, advance)| RawGlyph {
                outline: (),
                bounds: *bounds,
                advance: *advance,
            })
    }
}

/// Renders every glyph as a constant field of the requested size.
pub struct FillRenderer(pub f32);

impl FieldRenderer<()> for FillRenderer {
    fn render(&self, _outline: &mut (), request: &FieldRequest) -> FieldBitmap {
        let (width, height) = (request.size.x, request.size.y);
        match request.mode {
            FieldMode::Msdf => FieldBitmap::Multi(Plane::filled(width, height, [self.0; 3])),
            FieldMode::Sdf | FieldMode::PseudoSdf => {
                FieldBitmap::Single(Plane::filled(width, height, self.0))
            }
        }
    }
}

/// Left-to-right rows in input order. Deterministic and easy to reason about.
pub struct ShelfPacker;

impl RectPacker for ShelfPacker {
    fn pack(&self, rects: &mut [PackRect], width: u32, height: u32, spacing: u32) -> bool {
        let (mut x, mut y, mut row) = (0u32, 0u32, 0u32);
        for rect in rects.iter_mut() {
            if rect.width > width {
                return false;
            }

            if x + rect.width > width {
                x = 0;
                y += row + spacing;
                row = 0;
            }

            if y + rect.height > height {
                return false;
            }

            rect.position = UVec2::new(x, y);
            x += rect.width + spacing;
            row = row.max(rect.height);
        }

        true
    }
}

/// Scenario A: 256x256, `A` and `B`, fixed height 32.
pub fn scenario_config() -> AtlasConfig {
    AtlasConfig {
        code_ranges: vec![CodepointRange::new(65, 67)],
        texture_size: TextureDimensions::new(256, 256),
        char_height: 32,
        ..Default::default()
    }
}

/// Asserts that every rect lies in bounds and no two come closer than
/// `spacing` texels on the axis that separates them.
pub fn assert_disjoint(rects: &[(UVec2, UVec2)], width: u32, height: u32, spacing: u32) {
    for (i, (pos, size)) in rects.iter().enumerate() {
        assert!(pos.x + size.x <= width, "rect {} exceeds width", i);
        assert!(pos.y + size.y <= height, "rect {} exceeds height", i);

        for (j, (other_pos, other_size)) in rects.iter().enumerate().skip(i + 1) {
            let apart = pos.x + size.x + spacing <= other_pos.x
                || other_pos.x + other_size.x + spacing <= pos.x
                || pos.y + size.y + spacing <= other_pos.y
                || other_pos.y + other_size.y + spacing <= pos.y;
            assert!(apart, "rects {} and {} overlap", i, j);
        }
    }
}
