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

//! The composited atlas texture and its serialized forms.

use std::fmt::Write;

use crate::config::{FieldMode, TextureDimensions};
use crate::error::{AtlasError, AtlasResult};
use crate::glyph::GlyphRecord;
use crate::glyph_bitmap::{fits_within, FieldBitmap};

/// Every glyph's field blitted into one texture-sized canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasImage {
    pub canvas: FieldBitmap,
}

impl AtlasImage {
    /// Composites the rendered fields of packed glyphs at their placements.
    pub fn compose<O>(
        glyphs: &[GlyphRecord<O>],
        texture: TextureDimensions,
        mode: FieldMode,
    ) -> AtlasResult<Self> {
        let mut canvas = FieldBitmap::blank(mode, texture.width, texture.height);
        for glyph in glyphs {
            let bitmap = glyph
                .bitmap
                .as_ref()
                .ok_or(AtlasError::MissingBitmap(glyph.codepoint))?;

            let (width, height) = (bitmap.width(), bitmap.height());
            if width != glyph.footprint.x || height != glyph.footprint.y {
                return Err(AtlasError::FieldSizeMismatch {
                    codepoint: glyph.codepoint,
                    width: glyph.footprint.x,
                    height: glyph.footprint.y,
                    found_width: width,
                    found_height: height,
                });
            }

            let (x, y) = (glyph.placement.x, glyph.placement.y);
            if !fits_within(x, width, texture.width) || !fits_within(y, height, texture.height) {
                return Err(AtlasError::PlacementOutOfBounds {
                    codepoint: glyph.codepoint,
                    x,
                    y,
                });
            }

            if !canvas.place(x, y, bitmap) {
                return Err(AtlasError::BitmapMismatch(glyph.codepoint));
            }
        }

        Ok(Self { canvas })
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn channels(&self) -> usize {
        self.canvas.channels()
    }

    /// Raw texel bytes, bottom row first.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.canvas.to_bytes()
    }

    /// Renders the image as C source: dimensions, border and spacing
    /// followed by the byte array, one texture row per line.
    pub fn to_source(&self, char_border: u32, spacing: u32) -> String {
        let mut out = String::new();
        self.write_source(&mut out, char_border, spacing)
            .expect("formatting into a String cannot fail");
        out
    }

    fn write_source(&self, out: &mut String, char_border: u32, spacing: u32) -> std::fmt::Result {
        let (width, height) = (self.width(), self.height());
        let channels = if self.channels() > 1 {
            format!("*{}", self.channels())
        } else {
            String::new()
        };

        writeln!(out, "// Generated by mud-atlasgen, do not modify.")?;
        writeln!(out)?;
        writeln!(out, "static const struct {{")?;
        writeln!(out, "    unsigned int width, height;")?;
        writeln!(out, "    unsigned int char_border;")?;
        writeln!(out, "    unsigned int spacing;")?;
        writeln!(out, "    unsigned char pixels[{}*{}{}];", width, height, channels)?;
        writeln!(out, "}} font_image = {{")?;
        writeln!(
            out,
            "    {}, {}, {}, {}, {{",
            width, height, char_border, spacing
        )?;

        let mut row = vec![];
        for y in 0..height {
            row.clear();
            self.canvas.row_bytes(y, &mut row);
            for byte in &row {
                write!(out, "{},", byte)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "}}}};")
    }

    /// Encodes the image as an 8-bit PNG, top row first.
    pub fn to_png(&self) -> AtlasResult<Vec<u8>> {
        let color = match self.canvas {
            FieldBitmap::Multi(_) => png::ColorType::Rgb,
            FieldBitmap::Single(_) => png::ColorType::Grayscale,
        };

        let mut flipped = Vec::with_capacity(
            self.width() as usize * self.height() as usize * self.channels(),
        );

        for y in (0..self.height()).rev() {
            self.canvas.row_bytes(y, &mut flipped);
        }

        let mut data = vec![];
        let mut encoder = png::Encoder::new(&mut data, self.width(), self.height());
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&flipped)?;
        writer.finish()?;
        Ok(data)
    }
}
