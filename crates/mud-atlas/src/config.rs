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

//! Run configuration for an atlas build.
//!
//! Every component takes the pieces of [AtlasConfig] it needs as explicit
//! arguments; nothing reads process-wide state.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParseError;

/// A half-open interval `[begin, end)` of character codes.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct CodepointRange {
    pub begin: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn new(begin: u32, end: u32) -> Self {
        Self { begin, end }
    }

    pub fn iter(&self) -> std::ops::Range<u32> {
        self.begin..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }
}

impl FromStr for CodepointRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Range(s.to_string());
        let (begin, end) = s.trim().split_once('-').ok_or_else(malformed)?;
        let begin = begin.trim().parse().map_err(|_| malformed())?;
        let end = end.trim().parse().map_err(|_| malformed())?;
        if end < begin {
            return Err(ParseError::ReversedRange { begin, end });
        }

        Ok(Self { begin, end })
    }
}

impl TryFrom<String> for CodepointRange {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

/// Size of the atlas texture in texels. Fixed for the whole run.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct TextureDimensions {
    pub width: u32,
    pub height: u32,
}

impl TextureDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for TextureDimensions {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Dimensions(s.to_string());
        let (width, height) = s.trim().split_once('x').ok_or_else(malformed)?;
        Ok(Self {
            width: width.trim().parse().map_err(|_| malformed())?,
            height: height.trim().parse().map_err(|_| malformed())?,
        })
    }
}

impl TryFrom<String> for TextureDimensions {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for TextureDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which kind of distance field to render for each glyph.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum FieldMode {
    /// Three-channel multi-channel signed distance field.
    Msdf,
    /// Single-channel true signed distance field.
    Sdf,
    /// Single-channel pseudo signed distance field.
    PseudoSdf,
}

impl FieldMode {
    /// Bytes per texel in the serialized image.
    pub fn channels(&self) -> usize {
        match self {
            FieldMode::Msdf => 3,
            FieldMode::Sdf | FieldMode::PseudoSdf => 1,
        }
    }
}

impl FromStr for FieldMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "msdf" => Ok(FieldMode::Msdf),
            "sdf" => Ok(FieldMode::Sdf),
            "psdf" => Ok(FieldMode::PseudoSdf),
            other => Err(ParseError::Mode(other.to_string())),
        }
    }
}

impl TryFrom<String> for FieldMode {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldMode::Msdf => "msdf",
            FieldMode::Sdf => "sdf",
            FieldMode::PseudoSdf => "psdf",
        };

        f.write_str(name)
    }
}

/// Immutable settings for a single atlas run.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Codepoint ranges to pack, in iteration order.
    pub code_ranges: Vec<CodepointRange>,

    pub texture_size: TextureDimensions,

    pub mode: FieldMode,

    /// Height of the tallest glyph in texels. With `auto_height` this is the
    /// initial upper bound of the search instead.
    pub char_height: u32,

    /// Search for the tallest glyph height that still fits the texture.
    pub auto_height: bool,

    /// Border of texels around each glyph reserved for field falloff.
    pub smooth_pixels: u32,

    /// Distance field range, in font units.
    pub range: f64,

    /// Minimum spacing between packed glyphs in texels.
    pub spacing: u32,

    /// Describe codepoints as spans instead of a dense, zero-filled table.
    pub use_spans: bool,

    pub font: PathBuf,

    /// Base file name of the generated files.
    pub output_name: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            code_ranges: vec![CodepointRange::new(0, 65536)],
            texture_size: TextureDimensions::new(2048, 2048),
            mode: FieldMode::Msdf,
            char_height: 32,
            auto_height: false,
            smooth_pixels: 2,
            range: 1.0,
            spacing: 2,
            use_spans: false,
            font: PathBuf::from("UbuntuMono-R.ttf"),
            output_name: "bitmap_font".to_string(),
        }
    }
}
