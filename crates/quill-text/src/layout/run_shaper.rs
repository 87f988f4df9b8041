use std::sync::Arc;

use unicode_script::Script;

use crate::bidi::{char_levels, logical_to_visual, BaseDirection};
use crate::font::{Font, FontSource};
use crate::layout::chunk::{GlyphChunk, GlyphStore};
use crate::layout::options::{ShapedTextOptions, TextDirection};
use crate::ranged::RangedValues;
use crate::shaping::{GlyphShaper, ShapeRequest};
use crate::unicode::{safe_break_points, script_runs};

/// Constant shaping parameters of one run: the codepoints inside share
/// script, language, embedding level and resolved font.
#[derive(Debug, Clone)]
struct ShapingParams {
    script: Script,
    language: String,
    level: u8,
    font: Font,
}

/// Shapes one hard line on demand, handing out glyph chunks that always end
/// at a safe break point.
///
/// Construction runs the analysis passes (bidi levels, script itemization,
/// font resolution) and intersects them into a run table; no glyphs exist
/// yet. Shaping happens lazily, one run at a time, as chunk sets are
/// requested, and shaped runs are cached so a line wrapped over many soft
/// lines shapes each codepoint once.
pub struct LineShaper<'a> {
    chars: Vec<char>,
    engine: &'a dyn GlyphShaper,
    logical_to_visual: Vec<usize>,
    runs: RangedValues<ShapingParams>,
    safe_breaks: Vec<usize>,
    cache: RangedValues<GlyphStore>,
}

impl<'a> LineShaper<'a> {
    /// `line_offset` is the hard line's starting codepoint in the full text;
    /// font assignments arrive in whole-text coordinates and are rebased
    /// here.
    pub fn new(
        line: &str,
        line_offset: usize,
        options: &ShapedTextOptions,
        engine: &'a dyn GlyphShaper,
        source: &dyn FontSource,
    ) -> Self {
        let chars: Vec<char> = line.chars().collect();

        let base_dir = match options.reading_direction() {
            None => BaseDirection::Auto,
            Some(TextDirection::LeftToRight) => BaseDirection::Ltr,
            Some(TextDirection::RightToLeft) => BaseDirection::Rtl,
        };
        let levels = char_levels(line, base_dir);
        let visual = logical_to_visual(&levels);

        let mut assigned: RangedValues<Font> = RangedValues::new();
        let line_end = line_offset + chars.len();
        for (range, font) in options.fonts_for_range() {
            let start = range.start.max(line_offset).min(line_end);
            let end = range.end.min(line_end);
            if start < end {
                assigned.set_unmerged(start - line_offset..end - line_offset, font.clone());
            }
        }

        // Codepoints not covered by any assignment get the default font, so
        // the assignment always partitions the line without gaps.
        let mut gaps = Vec::new();
        let mut covered_to = 0;
        for (range, _) in assigned.iter() {
            if range.start > covered_to {
                gaps.push(covered_to..range.start);
            }
            covered_to = range.end;
        }
        if covered_to < chars.len() {
            gaps.push(covered_to..chars.len());
        }
        for gap in gaps {
            assigned.set_unmerged(gap, Font::default());
        }
        let resolved = crate::font::resolve_fonts(source, line, &chars, &assigned, options.language());

        // Run table: script runs split at level changes, then at font
        // boundaries.
        let mut runs: RangedValues<ShapingParams> = RangedValues::new();
        for script_run in script_runs(&chars) {
            let mut i = script_run.range.start;
            while i < script_run.range.end {
                let level = levels[i];
                let mut j = i + 1;
                while j < script_run.range.end && levels[j] == level {
                    j += 1;
                }

                for (range, font) in resolved.intersections(i..j) {
                    runs.set_unmerged(
                        range,
                        ShapingParams {
                            script: script_run.script,
                            language: options.language().to_string(),
                            level: level.number(),
                            font,
                        },
                    );
                }

                i = j;
            }
        }

        Self {
            chars,
            engine,
            logical_to_visual: visual,
            runs,
            safe_breaks: safe_break_points(line),
            cache: RangedValues::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The glyphs covering `[start, b)` where `b` is the first safe break
    /// point after `start`, as one chunk per overlapped run.
    ///
    /// Returns an empty list once `start` reaches the end of the line. All
    /// returned chunks carry the same text range, the full interval.
    pub fn chunks_up_to_next_safe_break(&mut self, start: usize) -> Vec<GlyphChunk> {
        let next = {
            let i = self.safe_breaks.partition_point(|&p| p <= start);
            self.safe_breaks
                .get(i)
                .copied()
                .unwrap_or(self.chars.len())
        };
        if start >= next {
            return Vec::new();
        }

        if !self.cache.covers(start..next) {
            self.shape_runs_over(start, next);
        }

        let mut chunks = Vec::new();
        for (i, (range, store)) in self.cache.items_from(start).iter().enumerate() {
            if range.start >= next {
                break;
            }
            if i == 0 && !range.contains(&start) {
                // A gap at the requested position means no runs cover it.
                break;
            }

            let glyphs = &store.glyphs;
            let glyph_start = glyphs.partition_point(|g| g.cluster < start);
            let glyph_end = glyphs.partition_point(|g| g.cluster < next);
            let visual_order = glyphs
                .get(glyph_start)
                .map(|g| self.logical_to_visual[g.cluster])
                .unwrap_or(0);

            chunks.push(GlyphChunk::new(
                store.clone(),
                glyph_start..glyph_end,
                start..next,
                visual_order,
            ));

            // The boundary glyph lives in this store; later entries are all
            // beyond the break.
            if glyph_end < glyphs.len() {
                break;
            }
        }

        chunks
    }

    /// Shape every run overlapping `[start, end)` into the cache.
    fn shape_runs_over(&mut self, start: usize, end: usize) {
        let pending: Vec<(core::ops::Range<usize>, ShapingParams)> = self
            .runs
            .items_from(start)
            .iter()
            .take_while(|(r, _)| r.start < end)
            .map(|(r, params)| (r.start.max(start)..r.end, params.clone()))
            .collect();

        for (range, params) in pending {
            if range.is_empty() || self.cache.covers(range.clone()) {
                continue;
            }

            let glyphs = self.engine.shape_run(&ShapeRequest {
                line: &self.chars,
                range: range.clone(),
                font: &params.font,
                script: params.script,
                language: &params.language,
                level: params.level,
            });

            self.cache.set_unmerged(
                range,
                GlyphStore {
                    glyphs: Arc::new(glyphs),
                    ltr: params.level % 2 == 0,
                    font: params.font,
                },
            );
        }
    }
}
