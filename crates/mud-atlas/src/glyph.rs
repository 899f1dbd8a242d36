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

use crate::glyph_bitmap::FieldBitmap;

/// An axis-aligned box in y-up glyph space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BoundingBox {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.left, self.bottom)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width(), self.height())
    }

    /// Scales the box about the glyph origin.
    pub fn scale(&mut self, factor: f64) {
        self.left *= factor;
        self.bottom *= factor;
        self.right *= factor;
        self.top *= factor;
    }
}

/// A glyph as reported by a [crate::source::GlyphSource].
pub struct RawGlyph<O> {
    pub outline: O,
    /// Bounds of the outline in font units.
    pub bounds: BoundingBox,
    /// Horizontal advance in font units.
    pub advance: f64,
}

/// One character's geometry, metrics and placement as it moves through a
/// single pass of the pipeline.
pub struct GlyphRecord<O> {
    pub codepoint: u32,

    /// Bounds in font units until [crate::normalize] scales them to texels.
    pub bounds: BoundingBox,

    pub outline: O,

    pub advance: f64,

    /// Size of the padded field bitmap in texels.
    pub footprint: UVec2,

    /// Position in the atlas. Only meaningful after packing succeeded.
    pub placement: UVec2,

    /// Offset that moves the scaled outline into its padded footprint.
    pub translation: DVec2,

    /// Rendered field. Absent during feasibility trials.
    pub bitmap: Option<FieldBitmap>,
}

impl<O> GlyphRecord<O> {
    pub fn new(codepoint: u32, raw: RawGlyph<O>) -> Self {
        Self {
            codepoint,
            bounds: raw.bounds,
            outline: raw.outline,
            advance: raw.advance,
            footprint: UVec2::ZERO,
            placement: UVec2::ZERO,
            translation: DVec2::ZERO,
            bitmap: None,
        }
    }
}
