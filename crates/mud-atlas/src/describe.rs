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

//! The glyph metrics description consumed by text renderers.
//!
//! The table is emitted as C source. Entries are ordered by codepoint and
//! indexed one of two ways:
//!
//! - dense: entry `i` belongs to codepoint `i`; codepoints without a glyph
//!   get an all-zero filler entry.
//! - spans: only real glyphs are stored, and a span table of
//!   `{ start, end, cumulative }` maps codepoint `c` in `[start, end)` to
//!   entry `cumulative + (c - start)`.

use std::fmt::Write;

use crate::glyph::GlyphRecord;

/// Placement and metrics of one glyph, all in texels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    pub atlas_x: u32,
    pub atlas_y: u32,
    pub atlas_w: u32,
    pub atlas_h: u32,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub advance: f64,
}

impl GlyphMetrics {
    pub fn from_record<O>(glyph: &GlyphRecord<O>) -> Self {
        Self {
            atlas_x: glyph.placement.x,
            atlas_y: glyph.placement.y,
            atlas_w: glyph.footprint.x,
            atlas_h: glyph.footprint.y,
            min_x: glyph.bounds.left,
            max_x: glyph.bounds.right,
            min_y: glyph.bounds.bottom,
            max_y: glyph.bounds.top,
            advance: glyph.advance,
        }
    }

    /// Filler entries have no footprint; every real glyph does.
    pub fn is_filler(&self) -> bool {
        self.atlas_w == 0
    }
}

/// A maximal run of consecutive codepoints that all have glyphs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodepointSpan {
    pub start: u32,
    /// Exclusive.
    pub end: u32,
    /// Index of the entry for `start`.
    pub cumulative: u32,
}

/// The full description of a packed atlas.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphTable {
    pub smooth_pixels: u32,
    /// Lowest glyph bottom across the set.
    pub min_y: f64,
    /// Highest glyph top across the set.
    pub max_y: f64,
    /// Present in span mode only.
    pub spans: Option<Vec<CodepointSpan>>,
    pub entries: Vec<GlyphMetrics>,
}

impl GlyphTable {
    pub fn new<O>(glyphs: &[GlyphRecord<O>], smooth_pixels: u32, use_spans: bool) -> Self {
        let mut sorted: Vec<(u32, GlyphMetrics)> = glyphs
            .iter()
            .map(|glyph| (glyph.codepoint, GlyphMetrics::from_record(glyph)))
            .collect();
        sorted.sort_by_key(|(codepoint, _)| *codepoint);
        sorted.dedup_by_key(|(codepoint, _)| *codepoint);

        let (min_y, max_y) = if sorted.is_empty() {
            (0.0, 0.0)
        } else {
            sorted.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (_, m)| {
                (lo.min(m.min_y), hi.max(m.max_y))
            })
        };

        let (spans, entries) = if use_spans {
            (Some(spans_of(&sorted)), sorted.into_iter().map(|(_, m)| m).collect())
        } else {
            (None, dense_entries(sorted))
        };

        Self {
            smooth_pixels,
            min_y,
            max_y,
            spans,
            entries,
        }
    }

    /// Resolves a codepoint the way a consumer of the description would.
    pub fn lookup(&self, codepoint: u32) -> Option<&GlyphMetrics> {
        match &self.spans {
            Some(spans) => {
                let index = spans.partition_point(|span| span.end <= codepoint);
                let span = spans.get(index).filter(|span| span.start <= codepoint)?;
                self.entries
                    .get((span.cumulative + (codepoint - span.start)) as usize)
            }
            None => self
                .entries
                .get(codepoint as usize)
                .filter(|entry| !entry.is_filler()),
        }
    }

    /// Renders the description as C source.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out)
            .expect("formatting into a String cannot fail");
        out
    }

    fn write_source(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "// Generated by mud-atlasgen, do not modify.")?;
        writeln!(out, "static const struct {{")?;
        writeln!(out, "    unsigned int smooth_pixels;")?;
        writeln!(out, "    float min_y;")?;
        writeln!(out, "    float max_y;")?;
        writeln!(out, "}} font_information = {{")?;
        writeln!(out, "    {},", self.smooth_pixels)?;
        writeln!(out, "    {:.4}f,", self.min_y)?;
        writeln!(out, "    {:.4}f", self.max_y)?;
        writeln!(out, "}};")?;
        writeln!(out)?;

        if let Some(spans) = &self.spans {
            writeln!(out, "static const struct bitmap_span {{")?;
            writeln!(out, "    unsigned int start;")?;
            writeln!(out, "    unsigned int end;")?;
            writeln!(out, "    unsigned int cumulative;")?;
            writeln!(out, "}} font_codepoint_spans[] = {{")?;
            for (i, span) in spans.iter().enumerate() {
                let sep = if i + 1 < spans.len() { "," } else { "" };
                writeln!(
                    out,
                    "    {{ {}, {}, {} }}{}",
                    span.start, span.end, span.cumulative, sep
                )?;
            }
            writeln!(out, "}};")?;
            writeln!(out)?;
        }

        writeln!(out, "static const struct bitmap_glyph {{")?;
        writeln!(out, "    unsigned int atlas_x, atlas_y;")?;
        writeln!(out, "    unsigned int atlas_w, atlas_h;")?;
        writeln!(out, "    float minx, maxx;")?;
        writeln!(out, "    float miny, maxy;")?;
        writeln!(out, "    float advance;")?;
        writeln!(out, "}} font_codepoint_infos[] = {{")?;
        for entry in &self.entries {
            if entry.is_filler() {
                writeln!(out, "{{ 0, 0, 0, 0, 0, 0, 0, 0, 0 }},")?;
                continue;
            }

            writeln!(
                out,
                "{{ {}, {}, {}, {}, {:.4}f, {:.4}f, {:.4}f, {:.4}f, {:.4}f }},",
                entry.atlas_x,
                entry.atlas_y,
                entry.atlas_w,
                entry.atlas_h,
                entry.min_x,
                entry.max_x,
                entry.min_y,
                entry.max_y,
                entry.advance
            )?;
        }
        writeln!(out, "}};")?;
        writeln!(
            out,
            "static const int bitmap_chars_count = {};",
            self.entries.len()
        )
    }
}

fn spans_of(sorted: &[(u32, GlyphMetrics)]) -> Vec<CodepointSpan> {
    let mut spans: Vec<CodepointSpan> = vec![];
    for (index, (codepoint, _)) in sorted.iter().enumerate() {
        match spans.last_mut() {
            Some(span) if span.end == *codepoint => span.end += 1,
            _ => spans.push(CodepointSpan {
                start: *codepoint,
                end: *codepoint + 1,
                cumulative: index as u32,
            }),
        }
    }

    spans
}

fn dense_entries(sorted: Vec<(u32, GlyphMetrics)>) -> Vec<GlyphMetrics> {
    let mut entries = vec![];
    for (codepoint, metrics) in sorted {
        entries.resize(codepoint as usize, GlyphMetrics::default());
        entries.push(metrics);
    }

    entries
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use super::*;
    use crate::glyph::{BoundingBox, RawGlyph};

    fn record(codepoint: u32, x: u32) -> GlyphRecord<()> {
        let bounds = BoundingBox::new(1.0, -2.0 - x as f64, 9.5, 16.25);
        let mut glyph = GlyphRecord::new(
            codepoint,
            RawGlyph {
                outline: (),
                bounds,
                advance: 11.0,
            },
        );

        glyph.placement = UVec2::new(x, 3);
        glyph.footprint = UVec2::new(14, 23);
        glyph
    }

    fn glyph_set() -> Vec<GlyphRecord<()>> {
        vec![
            record(70, 5),
            record(66, 1),
            record(65, 0),
            record(71, 6),
            record(67, 2),
        ]
    }

    #[test]
    fn spans_cover_runs() {
        let table = GlyphTable::new(&glyph_set(), 2, true);
        assert_eq!(
            table.spans,
            Some(vec![
                CodepointSpan {
                    start: 65,
                    end: 68,
                    cumulative: 0
                },
                CodepointSpan {
                    start: 70,
                    end: 72,
                    cumulative: 3
                },
            ])
        );
        assert_eq!(table.entries.len(), 5);
    }

    #[test]
    fn dense_fills_gaps() {
        let table = GlyphTable::new(&glyph_set(), 2, false);
        assert_eq!(table.spans, None);
        assert_eq!(table.entries.len(), 72);
        assert!(table.entries[..65].iter().all(GlyphMetrics::is_filler));
        assert!(table.entries[68].is_filler());
        assert!(table.entries[69].is_filler());
        assert_eq!(table.entries[70].atlas_x, 5);
    }

    #[test]
    fn duplicate_codepoints_keep_first() {
        let mut glyphs = glyph_set();
        glyphs.push(record(66, 9));
        for use_spans in [true, false] {
            let table = GlyphTable::new(&glyphs, 2, use_spans);
            assert_eq!(table.lookup(66).unwrap().atlas_x, 1);
            assert_eq!(table.lookup(67).unwrap().atlas_x, 2);
        }
    }

    #[test]
    fn lookups_agree_between_modes() {
        let glyphs = glyph_set();
        let dense = GlyphTable::new(&glyphs, 2, false);
        let spans = GlyphTable::new(&glyphs, 2, true);

        for glyph in &glyphs {
            let expected = GlyphMetrics::from_record(glyph);
            assert_eq!(dense.lookup(glyph.codepoint), Some(&expected));
            assert_eq!(spans.lookup(glyph.codepoint), Some(&expected));
        }

        for missing in [0, 64, 68, 69, 72, 1000] {
            assert_eq!(dense.lookup(missing), None);
            assert_eq!(spans.lookup(missing), None);
        }
    }

    #[test]
    fn vertical_extents() {
        let table = GlyphTable::new(&glyph_set(), 2, true);
        assert_eq!(table.min_y, -8.0);
        assert_eq!(table.max_y, 16.25);
    }

    #[test]
    fn span_source() {
        let glyphs = vec![record(65, 0), record(67, 20)];
        let source = GlyphTable::new(&glyphs, 2, true).to_source();
        let expected = "\
// Generated by mud-atlasgen, do not modify.
static const struct {
    unsigned int smooth_pixels;
    float min_y;
    float max_y;
} font_information = {
    2,
    -22.0000f,
    16.2500f
};

static const struct bitmap_span {
    unsigned int start;
    unsigned int end;
    unsigned int cumulative;
} font_codepoint_spans[] = {
    { 65, 66, 0 },
    { 67, 68, 1 }
};

static const struct bitmap_glyph {
    unsigned int atlas_x, atlas_y;
    unsigned int atlas_w, atlas_h;
    float minx, maxx;
    float miny, maxy;
    float advance;
} font_codepoint_infos[] = {
{ 0, 3, 14, 23, 1.0000f, 9.5000f, -2.0000f, 16.2500f, 11.0000f },
{ 20, 3, 14, 23, 1.0000f, 9.5000f, -22.0000f, 16.2500f, 11.0000f },
};
static const int bitmap_chars_count = 2;
";
        assert_eq!(source, expected);
    }

    #[test]
    fn dense_source_counts_fillers() {
        let glyphs = vec![record(2, 0)];
        let source = GlyphTable::new(&glyphs, 1, false).to_source();
        assert!(source.contains(
            "} font_codepoint_infos[] = {\n\
             { 0, 0, 0, 0, 0, 0, 0, 0, 0 },\n\
             { 0, 0, 0, 0, 0, 0, 0, 0, 0 },\n\
             { 0, 3, 14, 23, "
        ));
        assert!(source.ends_with("static const int bitmap_chars_count = 3;\n"));
        assert!(!source.contains("font_codepoint_spans"));
    }

    #[test]
    fn description_is_deterministic() {
        let a = GlyphTable::new(&glyph_set(), 2, true).to_source();
        let mut reversed = glyph_set();
        reversed.reverse();
        let b = GlyphTable::new(&reversed, 2, true).to_source();
        assert_eq!(a, b);
    }
}
