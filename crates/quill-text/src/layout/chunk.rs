use core::ops::Range;
use std::sync::Arc;

use crate::font::Font;
use crate::shaping::ShapedGlyph;

/// Shared, immutable storage for the glyphs of one shaped run.
///
/// Chunks and spans hold counted handles plus offsets into this storage;
/// nothing points back into it raw, so cursors stay valid as chunk lists
/// move around.
#[derive(Debug, Clone)]
pub(crate) struct GlyphStore {
    pub glyphs: Arc<Vec<ShapedGlyph>>,
    pub ltr: bool,
    pub font: Font,
}

/// A view of shaped glyphs belonging to one run, clipped to the interval
/// between two consecutive safe break points.
///
/// A chunk set returned by the shaper always terminates exactly at a safe
/// break; within the set, run and font boundaries are the only interior
/// chunk boundaries.
#[derive(Debug, Clone)]
pub struct GlyphChunk {
    store: GlyphStore,
    /// Glyph index range into the store, logical order.
    range: Range<usize>,
    /// Codepoint interval of the whole chunk set, `[start, next_break)`.
    text_range: Range<usize>,
    /// Visual position of the chunk's first codepoint; orders chunks for
    /// painting.
    visual_order: usize,
}

impl GlyphChunk {
    pub(crate) fn new(
        store: GlyphStore,
        range: Range<usize>,
        text_range: Range<usize>,
        visual_order: usize,
    ) -> Self {
        Self {
            store,
            range,
            text_range,
            visual_order,
        }
    }

    pub fn glyphs(&self) -> &[ShapedGlyph] {
        &self.store.glyphs[self.range.clone()]
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn is_ltr(&self) -> bool {
        self.store.ltr
    }

    pub fn font(&self) -> &Font {
        &self.store.font
    }

    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    pub fn visual_order(&self) -> usize {
        self.visual_order
    }
}

/// A contiguous sub-range of glyphs within one chunk, extracted between two
/// cursor positions and ready to be appended to the output buffer.
#[derive(Debug, Clone)]
pub(crate) struct GlyphSpan {
    pub store: Arc<Vec<ShapedGlyph>>,
    /// Glyph index range into the store, logical order.
    pub range: Range<usize>,
    pub ltr: bool,
    pub visual_order: usize,
    /// Codepoint range the span's glyphs cover, line-local.
    pub text_range: Range<usize>,
    pub font: Font,
}

/// Position within a sequence of heterogeneous-length glyph chunks.
///
/// A two-level index (chunk, offset) over a shared chunk list. Cloning is
/// cheap; comparing two cursors over the same list detects whether line
/// filling made progress.
#[derive(Debug, Clone)]
pub struct ChunkCursor {
    chunks: Arc<Vec<GlyphChunk>>,
    i: usize,
    j: usize,
}

impl ChunkCursor {
    pub fn new(chunks: Arc<Vec<GlyphChunk>>) -> Self {
        let mut cursor = Self { chunks, i: 0, j: 0 };
        cursor.normalize();
        cursor
    }

    /// Skip exhausted (or empty) chunks so `i < len` implies a valid glyph.
    fn normalize(&mut self) {
        while self.i < self.chunks.len() && self.j >= self.chunks[self.i].len() {
            self.i += 1;
            self.j = 0;
        }
    }

    pub fn is_beyond_end(&self) -> bool {
        self.i >= self.chunks.len()
    }

    /// The glyph under the cursor. Must not be called beyond the end.
    pub fn glyph(&self) -> &ShapedGlyph {
        &self.chunks[self.i].glyphs()[self.j]
    }

    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    pub fn advance_by(&mut self, mut n: usize) {
        while n > 0 && !self.is_beyond_end() {
            let left = self.chunks[self.i].len() - self.j;
            let step = n.min(left);
            self.j += step;
            n -= step;
            self.normalize();
        }
    }

    /// Number of glyphs from the cursor to the end of the chunk list.
    pub fn remaining(&self) -> usize {
        if self.is_beyond_end() {
            return 0;
        }
        let mut total = self.chunks[self.i].len() - self.j;
        for chunk in &self.chunks[self.i + 1..] {
            total += chunk.len();
        }
        total
    }

    /// The codepoint interval covered by the underlying chunk list,
    /// regardless of cursor position.
    pub fn text_range(&self) -> Range<usize> {
        match (self.chunks.first(), self.chunks.last()) {
            (Some(first), Some(last)) => first.text_range().start..last.text_range().end,
            _ => 0..0,
        }
    }

    /// Extract the glyph spans between this cursor and `end`, one per
    /// traversed chunk. Both cursors must address the same chunk list.
    pub(crate) fn spans_up_to(&self, end: &ChunkCursor) -> Vec<GlyphSpan> {
        let mut spans = Vec::new();

        if !Arc::ptr_eq(&self.chunks, &end.chunks) {
            debug_assert!(false, "cursors over different chunk lists");
            return spans;
        }

        let (mut i, mut j) = (self.i, self.j);
        while (i, j) < (end.i, end.j) {
            let chunk = &self.chunks[i];
            let glyph_start = chunk.range.start + j;
            let glyph_end = if i < end.i {
                chunk.range.end
            } else {
                chunk.range.start + end.j
            };

            if glyph_start < glyph_end {
                let text_start = chunk.store.glyphs[glyph_start].cluster;
                let text_end = if glyph_end < chunk.range.end {
                    chunk.store.glyphs[glyph_end].cluster
                } else {
                    chunk.text_range.end
                };

                spans.push(GlyphSpan {
                    store: chunk.store.glyphs.clone(),
                    range: glyph_start..glyph_end,
                    ltr: chunk.store.ltr,
                    visual_order: chunk.visual_order,
                    text_range: text_start..text_end,
                    font: chunk.store.font.clone(),
                });
            }

            i += 1;
            j = 0;
        }

        spans
    }
}

impl PartialEq for ChunkCursor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.chunks, &other.chunks) && self.i == other.i && self.j == other.j
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaping::Vec2;

    fn store(clusters: &[usize], ltr: bool) -> GlyphStore {
        GlyphStore {
            glyphs: Arc::new(
                clusters
                    .iter()
                    .map(|&c| ShapedGlyph {
                        glyph_id: c as u32,
                        cluster: c,
                        unsafe_to_break: false,
                        whitespace: false,
                        advance: Vec2::new(10.0, 0.0),
                        offset: Vec2::default(),
                    })
                    .collect(),
            ),
            ltr,
            font: Font::default(),
        }
    }

    fn chunk_list() -> Arc<Vec<GlyphChunk>> {
        // Two chunks over [0, 5): one of 2 glyphs, one of 3.
        let a = store(&[0, 1], true);
        let b = store(&[2, 3, 4], true);
        Arc::new(vec![
            GlyphChunk::new(a, 0..2, 0..5, 0),
            GlyphChunk::new(b, 0..3, 0..5, 2),
        ])
    }

    #[test]
    fn advance_crosses_chunk_boundaries() {
        let mut cursor = ChunkCursor::new(chunk_list());
        assert_eq!(cursor.remaining(), 5);
        cursor.advance_by(3);
        assert_eq!(cursor.glyph().cluster, 3);
        cursor.advance_by(2);
        assert!(cursor.is_beyond_end());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn empty_list_is_beyond_end() {
        let cursor = ChunkCursor::new(Arc::new(Vec::new()));
        assert!(cursor.is_beyond_end());
        assert_eq!(cursor.text_range(), 0..0);
    }

    #[test]
    fn empty_chunks_are_skipped() {
        let a = store(&[], true);
        let b = store(&[1, 2], true);
        let chunks = Arc::new(vec![
            GlyphChunk::new(a, 0..0, 1..3, 0),
            GlyphChunk::new(b, 0..2, 1..3, 1),
        ]);
        let cursor = ChunkCursor::new(chunks);
        assert!(!cursor.is_beyond_end());
        assert_eq!(cursor.glyph().cluster, 1);
    }

    #[test]
    fn text_range_spans_the_whole_list() {
        let mut cursor = ChunkCursor::new(chunk_list());
        cursor.advance_by(4);
        assert_eq!(cursor.text_range(), 0..5);
    }

    #[test]
    fn spans_between_cursors() {
        let begin = ChunkCursor::new(chunk_list());
        let mut end = begin.clone();
        end.advance_by(4);

        let spans = begin.spans_up_to(&end);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].range, 0..2);
        // A fully traversed chunk reports up to the chunk set's interval end.
        assert_eq!(spans[0].text_range, 0..5);
        assert_eq!(spans[1].range, 0..2);
        // A partial chunk ends at the boundary glyph's cluster.
        assert_eq!(spans[1].text_range, 2..4);
    }

    #[test]
    fn spans_of_fully_consumed_list_use_chunk_interval_end() {
        let begin = ChunkCursor::new(chunk_list());
        let mut end = begin.clone();
        end.advance_by(5);
        let spans = begin.spans_up_to(&end);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text_range, 2..5);
    }

    #[test]
    fn mid_chunk_start() {
        let begin = {
            let mut c = ChunkCursor::new(chunk_list());
            c.advance_by(1);
            c
        };
        let mut end = begin.clone();
        end.advance_by(4);
        let spans = begin.spans_up_to(&end);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].range, 1..2);
        assert_eq!(spans[0].text_range, 1..5);
    }
}
