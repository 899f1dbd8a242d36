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

//! Glyph extraction: the font-shape provider and the collector that walks
//! the configured codepoint ranges over it.

use msdfgen::{FontExt, Shape};
use tracing::{debug, trace};
use ttf_parser::Face;

use crate::config::CodepointRange;
use crate::error::AtlasResult;
use crate::glyph::{BoundingBox, GlyphRecord, RawGlyph};

/// Something that can turn a codepoint into an outline with metrics.
pub trait GlyphSource {
    type Outline;

    /// Returns `None` if the codepoint is not mapped to a glyph.
    fn glyph(&self, codepoint: u32) -> Option<RawGlyph<Self::Outline>>;
}

/// A [GlyphSource] reading outlines from a TrueType/OpenType face.
pub struct FaceSource<'a> {
    face: Face<'a>,
}

impl<'a> FaceSource<'a> {
    pub fn new(face: Face<'a>) -> Self {
        Self { face }
    }

    /// Parses the face at `index` of a font file.
    pub fn parse(data: &'a [u8], index: u32) -> AtlasResult<Self> {
        let face = Face::parse(data, index)?;
        debug!(
            "Parsed font face with {} glyphs, {} units per em",
            face.number_of_glyphs(),
            face.units_per_em()
        );

        Ok(Self::new(face))
    }
}

impl<'a> GlyphSource for FaceSource<'a> {
    type Outline = Shape;

    fn glyph(&self, codepoint: u32) -> Option<RawGlyph<Shape>> {
        let c = char::from_u32(codepoint)?;
        let id = self.face.glyph_index(c)?;
        if id.0 == 0 {
            return None;
        }

        let mut shape = self.face.glyph_shape(id)?;
        let bound = shape.get_bound();
        shape.normalize();

        Some(RawGlyph {
            outline: shape,
            bounds: BoundingBox::new(bound.left, bound.bottom, bound.right, bound.top),
            advance: self.face.glyph_hor_advance(id).unwrap_or(0) as f64,
        })
    }
}

/// Queries `source` for every codepoint of every range, in order.
///
/// Unmapped codepoints and glyphs without horizontal extent (spaces and the
/// like) are skipped. Overlapping ranges yield duplicate records.
pub fn collect_glyphs<S: GlyphSource + ?Sized>(
    source: &S,
    ranges: &[CodepointRange],
) -> Vec<GlyphRecord<S::Outline>> {
    let mut glyphs = vec![];
    for range in ranges {
        for codepoint in range.iter() {
            let Some(raw) = source.glyph(codepoint) else {
                trace!("Codepoint {} is unmapped", codepoint);
                continue;
            };

            if !(raw.bounds.width() > 0.0) {
                trace!("Codepoint {} has no ink", codepoint);
                continue;
            }

            glyphs.push(GlyphRecord::new(codepoint, raw));
        }
    }

    glyphs
}
