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

use thiserror::Error;

/// Fatal failures of an atlas run.
///
/// Packing failures while searching for a glyph height are not errors; they
/// are plain `false` results consumed by [crate::search].
#[derive(Debug, Error)]
pub enum AtlasError {
    /// None of the configured ranges produced a glyph with ink in it, so no
    /// scale factor can be derived.
    #[error("no usable glyphs were collected from the configured codepoint ranges")]
    NoGlyphsCollected,

    /// The glyphs do not fit into the texture at the requested height.
    #[error("packing {glyphs} glyphs into a {width}x{height} texture failed")]
    PackingFailed {
        glyphs: usize,
        width: u32,
        height: u32,
    },

    /// Automatic sizing found no glyph height that fits into the texture.
    #[error("no glyph height fits into a {width}x{height} texture")]
    NoFeasibleHeight { width: u32, height: u32 },

    #[error("failed to parse font: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),

    /// The rendered field of a glyph does not match the atlas' field mode.
    #[error("glyph {0} has a field bitmap of the wrong kind")]
    BitmapMismatch(u32),

    /// A rendered field is not the size of its glyph's footprint.
    #[error("glyph {codepoint} has a {found_width}x{found_height} field, expected {width}x{height}")]
    FieldSizeMismatch {
        codepoint: u32,
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    /// A packed glyph lies partly outside the texture.
    #[error("glyph {codepoint} placed at ({x}, {y}) extends past the texture")]
    PlacementOutOfBounds { codepoint: u32, x: u32, y: u32 },

    /// A glyph reached output without a rendered field.
    #[error("glyph {0} has no rendered field")]
    MissingBitmap(u32),

    #[error("failed to encode atlas image: {0}")]
    Png(#[from] png::EncodingError),

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Errors for the textual forms of configuration values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected a codepoint range like `65-91`, got {0:?}")]
    Range(String),

    #[error("codepoint range {begin}-{end} ends before it begins")]
    ReversedRange { begin: u32, end: u32 },

    #[error("expected texture dimensions like `2048x2048`, got {0:?}")]
    Dimensions(String),

    #[error("unknown field mode {0:?}, expected one of msdf, sdf, psdf")]
    Mode(String),
}

pub type AtlasResult<T> = Result<T, AtlasError>;
