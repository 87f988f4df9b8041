use std::sync::Arc;

use crate::layout::chunk::ChunkCursor;
use crate::layout::run_shaper::LineShaper;
use crate::shaping::ShapedGlyph;

/// Accumulated width state of the line being filled.
#[derive(Debug, Clone)]
struct LineState {
    /// Largest cluster value consumed so far. `None` while the line is
    /// empty; also the reference point for the trailing-whitespace test.
    largest_cluster: Option<usize>,
    max_width: f32,
    width: f32,
    /// Trailing whitespace may extend past the margin without forcing a
    /// break.
    trailing_ws_can_overflow: bool,
}

impl LineState {
    fn new(max_width: f32, trailing_ws_can_overflow: bool) -> Self {
        Self {
            largest_cluster: None,
            max_width,
            width: 0.0,
            trailing_ws_can_overflow,
        }
    }

    fn is_empty(&self) -> bool {
        self.largest_cluster.is_none()
    }

    /// Whether `glyph` would sit at or beyond everything consumed so far,
    /// i.e. it can only be followed by more trailing material.
    fn is_trailing(&self, glyph: &ShapedGlyph) -> bool {
        self.largest_cluster
            .is_none_or(|largest| glyph.cluster >= largest)
    }

    fn consume(&mut self, glyph: &ShapedGlyph) {
        self.width += glyph.advance.x;
        self.largest_cluster = Some(match self.largest_cluster {
            Some(largest) => largest.max(glyph.cluster),
            None => glyph.cluster,
        });
    }
}

/// The glyphs consumed from one chunk set, as a begin/end cursor pair.
#[derive(Debug, Clone)]
pub(crate) struct CursorRange {
    pub begin: ChunkCursor,
    pub end: ChunkCursor,
}

/// Builds up one wrapped line out of cursor ranges over successive chunk
/// sets.
///
/// Consumption of a chunk set is all-or-nothing while the line already has
/// content; a line that is still empty takes as many glyphs as fit, and at
/// least one, so filling always makes progress.
#[derive(Debug)]
pub(crate) struct LineFiller {
    state: LineState,
    consumed: Vec<CursorRange>,
}

impl LineFiller {
    pub fn new(max_width: f32, trailing_ws_can_overflow: bool) -> Self {
        Self {
            state: LineState::new(max_width, trailing_ws_can_overflow),
            consumed: Vec::new(),
        }
    }

    /// Take glyphs from `cursor` while they fit, and return the position
    /// after the last consumed glyph. Returning a cursor equal to the input
    /// means the chunk set was rejected and belongs on the next line.
    pub fn consume(&mut self, cursor: &ChunkCursor, force_first_word: bool) -> ChunkCursor {
        if force_first_word && self.state.is_empty() {
            let (state, end) = Self::consume_while(&self.state, cursor, |_, _| true);
            self.push_consumed(cursor, &end);
            self.state = state;
            return end;
        }

        let (state, end) = Self::consume_while(&self.state, cursor, |state, glyph| {
            let remaining = state.max_width - state.width;

            state.is_empty()
                || glyph.advance.x <= remaining
                || (state.trailing_ws_can_overflow && glyph.whitespace && state.is_trailing(glyph))
        });

        // A partially fitting chunk set moves whole to the next line, unless
        // this line is still empty and must take what it can.
        if !self.state.is_empty() && !end.is_beyond_end() {
            return cursor.clone();
        }

        self.push_consumed(cursor, &end);
        self.state = state;
        end
    }

    fn consume_while(
        state: &LineState,
        cursor: &ChunkCursor,
        fits: impl Fn(&LineState, &ShapedGlyph) -> bool,
    ) -> (LineState, ChunkCursor) {
        let mut state = state.clone();
        let mut cursor = cursor.clone();

        while !cursor.is_beyond_end() && fits(&state, cursor.glyph()) {
            state.consume(cursor.glyph());
            cursor.advance();
        }

        (state, cursor)
    }

    fn push_consumed(&mut self, begin: &ChunkCursor, end: &ChunkCursor) {
        if begin != end {
            self.consumed.push(CursorRange {
                begin: begin.clone(),
                end: end.clone(),
            });
        }
    }

    pub fn into_consumed(self) -> Vec<CursorRange> {
        self.consumed
    }
}

/// Parameters of one fill pass over a hard line.
#[derive(Debug, Clone)]
pub(crate) struct FillOptions {
    pub width: f32,
    /// Horizontal space reserved at the start of the first wrapped line,
    /// e.g. a paragraph indent.
    pub first_line_padding: f32,
    pub trailing_ws_can_overflow: bool,
    /// A word landing on an empty line is consumed whole even when it
    /// overflows, instead of being broken inside.
    pub force_consume_first_word: bool,
}

impl FillOptions {
    /// Partition the shaper's glyphs into wrapped lines. Every line is a
    /// list of cursor ranges; the list is empty only for a hard line with
    /// no glyphs at all.
    pub fn fill_lines(&self, shaper: &mut LineShaper<'_>) -> Vec<Vec<CursorRange>> {
        let mut lines = Vec::new();
        let mut filler = LineFiller::new(
            self.width - self.first_line_padding,
            self.trailing_ws_can_overflow,
        );

        let mut chunks = shaper.chunks_up_to_next_safe_break(0);

        while !chunks.is_empty() {
            let mut cursor = ChunkCursor::new(Arc::new(std::mem::take(&mut chunks)));
            let next_start = cursor.text_range().end;

            while !cursor.is_beyond_end() {
                let advanced = filler.consume(&cursor, self.force_consume_first_word);

                if !advanced.is_beyond_end() {
                    let full = std::mem::replace(
                        &mut filler,
                        LineFiller::new(self.width, self.trailing_ws_can_overflow),
                    );
                    lines.push(full.into_consumed());
                }

                cursor = advanced;
            }

            chunks = shaper.chunks_up_to_next_safe_break(next_start);
        }

        lines.push(filler.into_consumed());
        lines
    }
}
