use core::ops::Range;

use crate::font::{Font, FontSource};
use crate::layout::line_filler::{CursorRange, FillOptions};
use crate::layout::options::ShapedTextOptions;
use crate::layout::run_shaper::LineShaper;
use crate::ranged::RangedValues;
use crate::shaping::{GlyphShaper, ShapedGlyph};
use crate::unicode::{hard_line_ranges, CharIndex};

/// Width used for wrapping when no maximum is set; effectively unbounded.
const UNBOUNDED_WIDTH: f32 = 1.0e6;

/// One wrapped line of the final layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan {
    /// Range into the flat glyph buffer, visual order.
    pub glyph_range: Range<usize>,
    /// Codepoint range of the whole text the line covers.
    pub text_range: Range<usize>,
}

/// Text shaped and wrapped into lines, with bidirectional mapping between
/// glyphs and source codepoints.
///
/// Glyphs are stored in one flat buffer in paint order: line by line, and
/// within a line in visual order, so a right-to-left span's glyphs appear
/// reversed relative to logical order. Cluster values always refer to
/// codepoint indices of the full source text.
pub struct ShapedText<'a> {
    text: &'a str,
    index: CharIndex,
    glyphs: Vec<ShapedGlyph>,
    lines: Vec<LineSpan>,
    resolved_fonts: RangedValues<Font>,
    /// Codepoint range to glyph range, overwritten by later lines where
    /// wrapping revisits the same codepoints.
    glyph_lookup: RangedValues<Range<usize>>,
}

impl<'a> ShapedText<'a> {
    /// Shape `text` and wrap it according to `options`.
    ///
    /// The text is split into hard lines at mandatory break points; each is
    /// shaped and greedily filled into soft lines. A `max_num_lines` limit
    /// folds overflow into the last permitted line and stops consuming hard
    /// lines once the limit is reached.
    pub fn shape(
        text: &'a str,
        options: &ShapedTextOptions,
        engine: &dyn GlyphShaper,
        fonts: &dyn FontSource,
    ) -> Self {
        let mut this = Self {
            text,
            index: CharIndex::new(text),
            glyphs: Vec::new(),
            lines: Vec::new(),
            resolved_fonts: RangedValues::new(),
            glyph_lookup: RangedValues::new(),
        };

        let width = options.max_width().unwrap_or(UNBOUNDED_WIDTH);

        for line_range in hard_line_ranges(text) {
            if let Some(max) = options.max_num_lines() {
                if this.lines.len() >= max {
                    break;
                }
            }

            let line_text = &text[this.index.byte_range(line_range.clone())];
            let mut shaper = LineShaper::new(line_text, line_range.start, options, engine, fonts);

            let fill = FillOptions {
                width,
                first_line_padding: options.first_line_indent(),
                trailing_ws_can_overflow: !options.trailing_whitespaces_should_fit(),
                force_consume_first_word: !options.allow_breaking_inside_word(),
            };
            let mut line_data = fill.fill_lines(&mut shaper);

            if let Some(max) = options.max_num_lines() {
                fold_lines_beyond_limit(&mut line_data, max - this.lines.len());
            }

            for line in &line_data {
                this.append_line(line, line_range.clone());
            }

            log::trace!(
                "hard line {:?} wrapped into {} lines",
                line_range,
                line_data.len()
            );
        }

        this
    }

    /// Flatten one wrapped line into the output buffers. Spans are laid out
    /// in visual order; right-to-left spans contribute their glyphs
    /// reversed.
    fn append_line(&mut self, line: &[CursorRange], line_range: Range<usize>) {
        let line_offset = line_range.start;

        let mut spans = Vec::new();
        for cursor_range in line {
            let mut chunk_spans = cursor_range.begin.spans_up_to(&cursor_range.end);
            chunk_spans.append(&mut spans);
            spans = chunk_spans;
        }
        spans.sort_by_key(|s| s.visual_order);

        let line_glyph_start = self.glyphs.len();
        let mut line_text_range: Option<Range<usize>> = None;

        for span in &spans {
            let glyph_start = self.glyphs.len();
            let glyphs = &span.store[span.range.clone()];
            if span.ltr {
                self.glyphs.extend(glyphs.iter().copied());
            } else {
                self.glyphs.extend(glyphs.iter().rev().copied());
            }
            for glyph in &mut self.glyphs[glyph_start..] {
                glyph.cluster += line_offset;
            }

            let text_range =
                span.text_range.start + line_offset..span.text_range.end + line_offset;
            line_text_range = Some(match line_text_range {
                Some(r) => r.start.min(text_range.start)..r.end.max(text_range.end),
                None => text_range.clone(),
            });

            self.glyph_lookup
                .set_unmerged(text_range, glyph_start..self.glyphs.len());
            self.resolved_fonts
                .set(glyph_start..self.glyphs.len(), span.font.clone());
        }

        self.lines.push(LineSpan {
            glyph_range: line_glyph_start..self.glyphs.len(),
            text_range: line_text_range.unwrap_or(line_range.end..line_range.end),
        });
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// All glyphs in paint order.
    pub fn glyphs(&self) -> &[ShapedGlyph] {
        &self.glyphs
    }

    /// Glyphs in the given glyph index range, clipped to the buffer.
    pub fn glyphs_in(&self, range: Range<usize>) -> &[ShapedGlyph] {
        let start = range.start.min(self.glyphs.len());
        let end = range.end.min(self.glyphs.len()).max(start);
        &self.glyphs[start..end]
    }

    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    /// Index of the line whose glyph range contains `glyph`.
    pub fn line_containing_glyph(&self, glyph: usize) -> Option<usize> {
        let i = self
            .lines
            .partition_point(|line| line.glyph_range.end <= glyph);
        match self.lines.get(i) {
            Some(line) if line.glyph_range.contains(&glyph) => Some(i),
            _ => None,
        }
    }

    /// Fonts actually used for rendering, keyed by glyph index ranges.
    /// Adjacent ranges with equal fonts are merged.
    pub fn resolved_fonts(&self) -> &RangedValues<Font> {
        &self.resolved_fonts
    }

    /// The source codepoint the glyph is attributed to.
    pub fn get_codepoint(&self, glyph: usize) -> Option<char> {
        let g = self.glyphs.get(glyph)?;
        self.text[self.index.byte_of(g.cluster)..].chars().next()
    }

    /// The codepoint range a glyph covers, at least one codepoint long.
    ///
    /// A ligature glyph maps to all codepoints it absorbed; a mark sharing
    /// its base's cluster maps to the same range as the base. The range is
    /// found by scanning the glyph's run for the nearest neighbouring
    /// cluster on either side; in a right-to-left run neighbours appear in
    /// reversed order, which is why both directions are scanned.
    pub fn get_text_range(&self, glyph: usize) -> Range<usize> {
        debug_assert!(glyph < self.glyphs.len(), "glyph index out of bounds");
        let Some(g) = self.glyphs.get(glyph) else {
            return 0..0;
        };
        let cluster = g.cluster;

        let run_range = match self.glyph_lookup.get(cluster) {
            Some((_, r)) if r.contains(&glyph) => r.clone(),
            _ => glyph..glyph + 1,
        };
        let run = &self.glyphs[run_range.clone()];
        let pos = glyph - run_range.start;

        let mut next = cluster;
        for g in run[..pos].iter().rev() {
            if g.cluster != cluster {
                next = next.max(g.cluster);
                break;
            }
        }
        for g in &run[pos..] {
            if g.cluster != cluster {
                next = next.max(g.cluster);
                break;
            }
        }

        cluster..cluster + (next.saturating_sub(cluster)).max(1)
    }
}

/// Fold everything past the first `max` soft lines into line `max - 1`, so
/// a line limit keeps all consumed glyphs addressable.
fn fold_lines_beyond_limit(lines: &mut Vec<Vec<CursorRange>>, max: usize) {
    if max == 0 || lines.len() <= max {
        return;
    }

    let tail: Vec<Vec<CursorRange>> = lines.drain(max..).collect();
    let last = &mut lines[max - 1];
    for mut folded in tail {
        last.append(&mut folded);
    }
}
