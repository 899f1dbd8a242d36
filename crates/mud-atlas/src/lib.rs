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

//! Packs a font's glyphs into a fixed-size distance field atlas and
//! describes where each glyph landed.
//!
//! A run collects glyph outlines from a [source::GlyphSource], scales them
//! to a common height ([normalize]), renders their fields
//! ([field::FieldRenderer]) and packs the padded footprints into the
//! texture ([pack::RectPacker]). With automatic sizing, [search] finds the
//! tallest height that still fits before the final pass runs.
//! [glyph_atlas::GlyphAtlas] ties these together.

/// Atlas run settings and their textual forms.
pub mod config;

/// Glyph metrics description output.
pub mod describe;

pub mod error;

/// Distance field rendering.
pub mod field;

/// Glyph records and bounding boxes.
pub mod glyph;

pub mod glyph_atlas;

/// Field sample storage and compositing.
pub mod glyph_bitmap;

/// Atlas texture output.
pub mod image;

/// Glyph scaling and footprint derivation.
pub mod normalize;

/// Rectangle packing.
pub mod pack;

pub mod search;

pub mod source;

#[cfg(test)]
mod testing;

pub use config::{AtlasConfig, CodepointRange, FieldMode, TextureDimensions};
pub use error::{AtlasError, AtlasResult, ParseError};
pub use field::MsdfRenderer;
pub use glyph_atlas::{AtlasOutput, GlyphAtlas};
pub use pack::SkylinePacker;
pub use source::FaceSource;
