pub mod engine;
pub mod glyph;
pub mod harf;

pub use engine::{FixedAdvanceShaper, GlyphShaper, ShapeRequest};
pub use glyph::{ShapedGlyph, Vec2};
pub use harf::HarfShaper;
