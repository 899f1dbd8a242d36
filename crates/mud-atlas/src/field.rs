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

//! Distance field rendering for normalized glyphs.

use glam::{DVec2, UVec2};
use msdfgen::{
    Bitmap, Framing, GeneratorConfig, Gray, MsdfGeneratorConfig, Projection, Rgb, Shape, Vector2,
};
use tracing::debug;

use crate::config::FieldMode;
use crate::glyph::GlyphRecord;
use crate::glyph_bitmap::{FieldBitmap, Plane};

/// Everything a renderer needs to produce one glyph's field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldRequest {
    pub mode: FieldMode,

    /// Field range in font units.
    pub range: f64,

    /// Font units to texels.
    pub scale: f64,

    /// Offset applied to the outline before scaling, in font units.
    pub translation: DVec2,

    /// Size of the output bitmap in texels.
    pub size: UVec2,
}

/// A distance field generator for outlines of type `O`.
pub trait FieldRenderer<O> {
    /// Renders a field exactly `request.size` texels large. The outline may
    /// be modified (multi-channel modes color its edges first).
    fn render(&self, outline: &mut O, request: &FieldRequest) -> FieldBitmap;
}

/// Renders fields with the msdfgen library.
#[derive(Copy, Clone, Debug)]
pub struct MsdfRenderer {
    /// Corner angle threshold for edge coloring, in radians.
    pub angle_threshold: f64,
}

impl MsdfRenderer {
    pub const ANGLE_THRESHOLD: f64 = 2.5;
}

impl Default for MsdfRenderer {
    fn default() -> Self {
        Self {
            angle_threshold: Self::ANGLE_THRESHOLD,
        }
    }
}

impl FieldRenderer<Shape> for MsdfRenderer {
    fn render(&self, shape: &mut Shape, request: &FieldRequest) -> FieldBitmap {
        let framing = Framing {
            range: request.range,
            projection: Projection {
                scale: Vector2 {
                    x: request.scale,
                    y: request.scale,
                },
                translate: Vector2 {
                    x: request.translation.x,
                    y: request.translation.y,
                },
            },
        };

        let (width, height) = (request.size.x, request.size.y);
        match request.mode {
            FieldMode::Msdf => {
                shape.edge_coloring_simple(self.angle_threshold, 0);
                let mut bitmap = Bitmap::<Rgb<f32>>::new(width, height);
                shape.generate_msdf(&mut bitmap, framing, MsdfGeneratorConfig::default());
                FieldBitmap::Multi(Plane {
                    data: bitmap.pixels().iter().map(|p| [p.r, p.g, p.b]).collect(),
                    width,
                    height,
                })
            }
            FieldMode::Sdf => {
                let mut bitmap = Bitmap::<Gray<f32>>::new(width, height);
                shape.generate_sdf(&mut bitmap, framing, GeneratorConfig::default());
                FieldBitmap::Single(Plane {
                    data: bitmap.pixels().iter().map(|p| p.v).collect(),
                    width,
                    height,
                })
            }
            FieldMode::PseudoSdf => {
                let mut bitmap = Bitmap::<Gray<f32>>::new(width, height);
                shape.generate_pseudo_sdf(&mut bitmap, framing, GeneratorConfig::default());
                FieldBitmap::Single(Plane {
                    data: bitmap.pixels().iter().map(|p| p.v).collect(),
                    width,
                    height,
                })
            }
        }
    }
}

/// Renders the field of every normalized glyph in `glyphs`.
///
/// The renderer receives the translation in font units (`translation /
/// scale`), so the field lines up with the footprint derived in texel space.
pub fn build_fields<O, R>(
    glyphs: &mut [GlyphRecord<O>],
    renderer: &R,
    mode: FieldMode,
    range: f64,
    scale: f64,
) where
    R: FieldRenderer<O> + ?Sized,
{
    debug!("Rendering {} {} fields", glyphs.len(), mode);
    for glyph in glyphs.iter_mut() {
        let request = FieldRequest {
            mode,
            range,
            scale,
            translation: glyph.translation / scale,
            size: glyph.footprint,
        };

        glyph.bitmap = Some(renderer.render(&mut glyph.outline, &request));
    }
}
