pub mod face;
pub mod fallback_db;
pub mod resolver;

pub use face::FontFace;
pub use fallback_db::SystemFontSource;
pub use resolver::{resolve_fonts, FontSource, NoFallback};

use core::ops::Range;

/// Errors that can occur while working with fonts.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data")]
    InvalidFont,
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, FontError>;

/// Assignment of a font to a codepoint range of the source text.
pub type FontForRange = (Range<usize>, Font);

/// A sized font selection, optionally backed by a loaded face.
///
/// A `Font` without a face can still flow through layout; the production
/// shaper treats it as an invariant violation and produces no glyphs for
/// it, while measurement-only shapers ignore the face entirely.
#[derive(Debug, Clone)]
pub struct Font {
    family: String,
    size: f32,
    face: Option<FontFace>,
    fallback_enabled: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self::sized(15.0)
    }
}

impl Font {
    /// A font backed by a loaded face.
    pub fn new(face: FontFace, size: f32) -> Self {
        Self {
            family: String::new(),
            size,
            face: Some(face),
            fallback_enabled: true,
        }
    }

    /// A face-less font of the given size.
    pub fn sized(size: f32) -> Self {
        Self {
            family: String::new(),
            size,
            face: None,
            fallback_enabled: true,
        }
    }

    /// A face-less font identified by family name, for resolution through a
    /// [`FontSource`].
    pub fn named(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            face: None,
            fallback_enabled: true,
        }
    }

    pub fn with_face(mut self, face: FontFace) -> Self {
        self.face = Some(face);
        self
    }

    /// Disable fallback search; unrenderable codepoints keep this font and
    /// may display as missing-glyph boxes.
    pub fn with_fallback_disabled(mut self) -> Self {
        self.fallback_enabled = false;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn face(&self) -> Option<&FontFace> {
        self.face.as_ref()
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Whether the backing face has a glyph for `c`. Face-less fonts render
    /// nothing.
    pub fn can_render(&self, c: char) -> bool {
        self.face.as_ref().is_some_and(|f| f.can_render(c))
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        let faces_match = match (&self.face, &other.face) {
            (Some(a), Some(b)) => a.same_face(b),
            (None, None) => true,
            _ => false,
        };
        faces_match
            && self.family == other.family
            && self.size.to_bits() == other.size.to_bits()
            && self.fallback_enabled == other.fallback_enabled
    }
}
