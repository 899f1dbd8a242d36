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

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::AtlasConfig;
use crate::describe::GlyphTable;
use crate::error::{AtlasError, AtlasResult};
use crate::field::{build_fields, FieldRenderer};
use crate::glyph::GlyphRecord;
use crate::image::AtlasImage;
use crate::normalize::normalize;
use crate::pack::{pack_glyphs, RectPacker};
use crate::search::find_max_height;
use crate::source::{collect_glyphs, GlyphSource};

/// A fully rendered and packed glyph atlas.
pub struct GlyphAtlas<O> {
    pub config: AtlasConfig,
    /// Height of the tallest glyph in texels.
    pub char_height: u32,
    /// Font units to texels.
    pub scale: f64,
    /// Packed glyphs, sorted by codepoint.
    pub glyphs: Vec<GlyphRecord<O>>,
}

impl<O> GlyphAtlas<O> {
    /// Builds an atlas from `source`.
    ///
    /// With `auto_height` the glyph height is searched first, starting from
    /// `char_height`. The final pass then renders every field and packs the
    /// glyphs for real; failing to pack there is fatal.
    pub fn build<S, R, P>(
        config: &AtlasConfig,
        source: &S,
        renderer: &R,
        packer: &P,
    ) -> AtlasResult<Self>
    where
        S: GlyphSource<Outline = O> + ?Sized,
        R: FieldRenderer<O> + ?Sized,
        P: RectPacker + ?Sized,
    {
        let char_height = if config.auto_height {
            let height = find_max_height(config, source, packer)?;
            if height == 0 {
                return Err(AtlasError::NoFeasibleHeight {
                    width: config.texture_size.width,
                    height: config.texture_size.height,
                });
            }

            height
        } else {
            config.char_height
        };

        info!("Using glyph height {}", char_height);
        let mut glyphs = collect_glyphs(source, &config.code_ranges);
        let scale = normalize(&mut glyphs, char_height, config.smooth_pixels)?;
        build_fields(&mut glyphs, renderer, config.mode, config.range, scale);

        debug!("Packing {} glyphs into {}", glyphs.len(), config.texture_size);
        if !pack_glyphs(&mut glyphs, config.texture_size, config.spacing, packer) {
            return Err(AtlasError::PackingFailed {
                glyphs: glyphs.len(),
                width: config.texture_size.width,
                height: config.texture_size.height,
            });
        }

        glyphs.sort_by_key(|glyph| glyph.codepoint);
        info!("Packed {} glyphs", glyphs.len());

        Ok(Self {
            config: config.clone(),
            char_height,
            scale,
            glyphs,
        })
    }

    pub fn table(&self) -> GlyphTable {
        GlyphTable::new(
            &self.glyphs,
            self.config.smooth_pixels,
            self.config.use_spans,
        )
    }

    pub fn image(&self) -> AtlasResult<AtlasImage> {
        AtlasImage::compose(&self.glyphs, self.config.texture_size, self.config.mode)
    }

    /// Renders every output artifact into memory.
    pub fn to_output(&self) -> AtlasResult<AtlasOutput> {
        let image = self.image()?;
        Ok(AtlasOutput {
            description: self.table().to_source(),
            image_source: image.to_source(self.config.smooth_pixels, self.config.spacing),
            png: image.to_png()?,
        })
    }
}

/// The generated files of a run, fully rendered before anything is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtlasOutput {
    /// Glyph metrics as C source.
    pub description: String,
    /// Texture bytes and format as C source.
    pub image_source: String,
    /// The texture as a PNG.
    pub png: Vec<u8>,
}

impl AtlasOutput {
    /// Paths of the generated files for an output base name.
    pub fn paths(base: &str) -> [PathBuf; 3] {
        [
            PathBuf::from(format!("{}_desc.c", base)),
            PathBuf::from(format!("{}_img.c", base)),
            PathBuf::from(format!("{}_img.png", base)),
        ]
    }

    /// Writes `<base>_desc.c`, `<base>_img.c` and `<base>_img.png`.
    ///
    /// Either all three files are written or, on error, the ones already
    /// written are removed again.
    pub fn write(&self, base: &str) -> AtlasResult<()> {
        let paths = Self::paths(base);
        let contents = [
            self.description.as_bytes(),
            self.image_source.as_bytes(),
            self.png.as_slice(),
        ];

        for (index, (path, data)) in paths.iter().zip(contents).enumerate() {
            if let Err(err) = write_file(path, data) {
                for written in &paths[..index] {
                    if let Err(err) = std::fs::remove_file(written) {
                        warn!("Failed to remove partial output {:?}: {}", written, err);
                    }
                }

                return Err(err);
            }
        }

        Ok(())
    }
}

fn write_file(path: &Path, data: &[u8]) -> AtlasResult<()> {
    info!("Writing {:?}", path);
    std::fs::write(path, data).map_err(|source| AtlasError::Io {
        path: path.to_owned(),
        source,
    })
}
