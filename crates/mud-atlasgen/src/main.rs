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

use std::fmt::Display;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use mud_atlas::{
    AtlasConfig, AtlasError, CodepointRange, FaceSource, FieldMode, GlyphAtlas, MsdfRenderer,
    SkylinePacker, TextureDimensions,
};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;
use yacexits::{EX_CANTCREAT, EX_CONFIG, EX_DATAERR, EX_NOINPUT, EX_OK, EX_SOFTWARE};

mod config;

pub struct CommandError {
    message: String,
    exit_code: u32,
}

trait ToCommandError<T, E> {
    fn to_command_error<C: Display>(self, context: C, exit_code: u32) -> Result<T, CommandError>;
}

impl<T, E> ToCommandError<T, E> for Result<T, E>
where
    E: Display,
{
    fn to_command_error<C: Display>(self, context: C, exit_code: u32) -> Result<T, CommandError> {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(CommandError {
                message: format!("{}: {}", context, e),
                exit_code,
            }),
        }
    }
}

impl From<AtlasError> for CommandError {
    fn from(err: AtlasError) -> Self {
        let exit_code = match err {
            AtlasError::NoGlyphsCollected | AtlasError::FontParse(_) => EX_DATAERR,
            AtlasError::Io { .. } | AtlasError::Png(_) => EX_CANTCREAT,
            AtlasError::PackingFailed { .. }
            | AtlasError::NoFeasibleHeight { .. }
            | AtlasError::BitmapMismatch(_)
            | AtlasError::FieldSizeMismatch { .. }
            | AtlasError::PlacementOutOfBounds { .. }
            | AtlasError::MissingBitmap(_) => EX_SOFTWARE,
        };

        Self {
            message: err.to_string(),
            exit_code,
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Packs a font's glyphs into a distance field texture atlas and writes a
/// C description of glyph placement and metrics.
#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    /// A TOML configuration file. Options given here override it.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Unicode codepoint range, end exclusive (BEGIN-END). May be repeated.
    #[clap(short = 'C', long = "code-range")]
    pub code_ranges: Vec<CodepointRange>,

    /// Texture dimensions (WIDTHxHEIGHT).
    #[clap(short = 'T', long)]
    pub texture_size: Option<TextureDimensions>,

    /// Field mode: msdf, sdf or psdf.
    #[clap(short = 'M', long)]
    pub mode: Option<FieldMode>,

    /// Maximum character height in texels.
    #[clap(short = 'L', long)]
    pub char_height: Option<u32>,

    /// Automatically determine the largest character height that fits.
    #[clap(long, value_name = "BOOL")]
    pub auto_height: Option<bool>,

    /// Border of smoothing texels around each glyph.
    #[clap(short = 'S', long)]
    pub smooth_pixels: Option<u32>,

    /// Distance field range in font units.
    #[clap(short = 'R', long)]
    pub range: Option<f64>,

    /// Inter-character spacing in texels.
    #[clap(long)]
    pub spacing: Option<u32>,

    /// Describe codepoints as spans instead of filling gaps with empty entries.
    #[clap(long, value_name = "BOOL")]
    pub use_spans: Option<bool>,

    /// Font file.
    #[clap(short = 'F', long)]
    pub font: Option<PathBuf>,

    /// Base file name of the output files.
    #[clap(short = 'O', long)]
    pub output_name: Option<String>,

    /// Log every packing trial.
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Layers the explicitly given options over `config`.
    pub fn apply(self, mut config: AtlasConfig) -> AtlasConfig {
        if !self.code_ranges.is_empty() {
            config.code_ranges = self.code_ranges;
        }

        if let Some(texture_size) = self.texture_size {
            config.texture_size = texture_size;
        }

        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        if let Some(char_height) = self.char_height {
            config.char_height = char_height;
        }

        if let Some(auto_height) = self.auto_height {
            config.auto_height = auto_height;
        }

        if let Some(smooth_pixels) = self.smooth_pixels {
            config.smooth_pixels = smooth_pixels;
        }

        if let Some(range) = self.range {
            config.range = range;
        }

        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }

        if let Some(use_spans) = self.use_spans {
            config.use_spans = use_spans;
        }

        if let Some(font) = self.font {
            config.font = font;
        }

        if let Some(output_name) = self.output_name {
            config.output_name = output_name;
        }

        config
    }

    fn into_config(self) -> CommandResult<AtlasConfig> {
        let base = match &self.config {
            Some(path) => config::load_config(path).to_command_error("loading config", EX_CONFIG)?,
            None => AtlasConfig::default(),
        };

        Ok(self.apply(base))
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = tracing_subscriber::filter::Targets::new()
        .with_target("mud_atlas", level)
        .with_target("mud_atlasgen", level)
        .with_default(Level::WARN);

    let format = tracing_subscriber::fmt::layer().compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

fn run(args: Args) -> CommandResult<()> {
    let config = args.into_config()?;
    info!(
        "Packing {} into {} ({} mode)",
        config
            .code_ranges
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        config.texture_size,
        config.mode
    );

    let font_data = std::fs::read(&config.font)
        .to_command_error(format!("could not open font {:?}", config.font), EX_NOINPUT)?;
    let source = FaceSource::parse(&font_data, 0)?;

    let atlas = GlyphAtlas::build(&config, &source, &MsdfRenderer::default(), &SkylinePacker)?;
    let output = atlas.to_output()?;
    output.write(&config.output_name)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => exit(EX_OK as i32),
        Err(e) => {
            eprintln!("ERROR: {}", e.message);
            exit(e.exit_code as i32)
        }
    }
}
