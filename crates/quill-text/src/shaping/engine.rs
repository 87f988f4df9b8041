use core::ops::Range;

use unicode_script::Script;

use crate::font::Font;
use crate::shaping::{ShapedGlyph, Vec2};

/// One low-level shaping call: a contiguous codepoint range of a line with
/// constant script, language, embedding level and resolved font.
pub struct ShapeRequest<'a> {
    /// All codepoints of the hard line being shaped.
    pub line: &'a [char],
    /// The sub-range to shape, in codepoint indices into `line`.
    pub range: Range<usize>,
    pub font: &'a Font,
    pub script: Script,
    pub language: &'a str,
    /// Resolved bidi embedding level; odd levels shape right-to-left.
    pub level: u8,
}

impl ShapeRequest<'_> {
    pub fn is_rtl(&self) -> bool {
        self.level % 2 != 0
    }
}

/// Low-level shaper collaborator.
///
/// Implementations return glyphs in logical order with cluster values in
/// `range`, monotonically non-decreasing. The engine never assumes one
/// glyph per codepoint.
///
/// The requested range is shaped in isolation: although `line` carries the
/// surrounding text, no pre/post context is fed to the shaper, so
/// contextual forms and ligatures do not join across run edges.
pub trait GlyphShaper {
    fn shape_run(&self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph>;
}

/// Deterministic shaper producing one glyph per codepoint with a fixed
/// advance.
///
/// Useful for measurement-independent layout tests and headless estimation;
/// no font data is touched.
pub struct FixedAdvanceShaper {
    pub advance: f32,
}

impl FixedAdvanceShaper {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl GlyphShaper for FixedAdvanceShaper {
    fn shape_run(&self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph> {
        request.line[request.range.clone()]
            .iter()
            .enumerate()
            .map(|(i, &c)| ShapedGlyph {
                glyph_id: c as u32,
                cluster: request.range.start + i,
                unsafe_to_break: false,
                whitespace: c.is_whitespace(),
                advance: Vec2::new(self.advance, 0.0),
                offset: Vec2::default(),
            })
            .collect()
    }
}
