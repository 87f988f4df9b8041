//! Line breaking and wrapping on top of the shaping layer.
//!
//! A text is split into hard lines at mandatory break points. Each hard
//! line gets a [`LineShaper`] that itemizes it into runs and shapes lazily;
//! the fill loop consumes its glyphs chunk by chunk into soft lines, and
//! [`ShapedText`] flattens the result into paint order.

pub mod chunk;
mod line_filler;
pub mod options;
pub mod run_shaper;
pub mod shaped_text;

pub use chunk::{ChunkCursor, GlyphChunk};
pub use options::{Justification, ShapedTextOptions, TextDirection};
pub use run_shaper::LineShaper;
pub use shaped_text::{LineSpan, ShapedText};
