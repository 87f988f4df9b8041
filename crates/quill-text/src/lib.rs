//! quill-text: text shaping and line wrapping engine.
//!
//! The pipeline runs in codepoint space end to end:
//! - unicode analysis (hard lines, safe break points, script runs)
//! - bidirectional levels and visual reordering
//! - font resolution with bounded fallback search
//! - lazy per-run shaping behind the [`GlyphShaper`] seam
//! - greedy line filling into a flat, paint-ordered glyph buffer
//!
//! [`ShapedText::shape`] ties the stages together; everything below it is
//! usable on its own.

pub mod bidi;
pub mod font;
pub mod layout;
pub mod ranged;
pub mod shaping;
pub mod unicode;

pub use font::{Font, FontError, FontFace, FontForRange, FontSource, NoFallback, SystemFontSource};
pub use layout::{
    ChunkCursor, GlyphChunk, Justification, LineShaper, LineSpan, ShapedText, ShapedTextOptions,
    TextDirection,
};
pub use ranged::RangedValues;
pub use shaping::{FixedAdvanceShaper, GlyphShaper, HarfShaper, ShapeRequest, ShapedGlyph, Vec2};
