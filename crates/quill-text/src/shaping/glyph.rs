/// A 2D vector in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single positioned glyph produced by low-level shaping.
///
/// Glyphs are stored in logical order within their run; `cluster` is the
/// codepoint index the glyph is attributed to and is monotonic within a
/// run. One glyph may represent several codepoints (a ligature) and several
/// glyphs may share one cluster (marks).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    pub glyph_id: u32,
    /// Source codepoint index.
    pub cluster: usize,
    /// The glyph must not be separated from its neighbour by a line break.
    pub unsafe_to_break: bool,
    /// The glyph renders no ink but carries an advance.
    pub whitespace: bool,
    pub advance: Vec2,
    pub offset: Vec2,
}
