use std::sync::Arc;

use swash::{FontRef, Metrics};

use crate::font::{FontError, Result};

/// Loaded font face backed by a font file (TTF/OTF).
///
/// A thin wrapper around `swash::FontRef` that owns the underlying font
/// data and exposes the metrics and codepoint coverage the layout engine
/// needs. Cloning shares the data.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Full font data.
    data: Arc<[u8]>,
    /// Offset to the table directory for this font.
    offset: u32,
    /// Cache key used internally by swash.
    key: swash::CacheKey,
    /// Design units per em, for scaling advances to pixels.
    units_per_em: u16,
}

impl FontFace {
    /// Create a font face from raw bytes and a font index within the file.
    pub fn from_bytes(data: Arc<[u8]>, index: usize) -> Result<Self> {
        let font = FontRef::from_index(&data, index).ok_or(FontError::InvalidFont)?;
        let Metrics { units_per_em, .. } = font.metrics(&[]);
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            units_per_em,
        })
    }

    /// Create a font face from raw bytes owned by a `Vec<u8>`.
    pub fn from_vec(data: Vec<u8>, index: usize) -> Result<Self> {
        Self::from_bytes(Arc::from(data), index)
    }

    /// Create a font face from a font file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>, index: usize) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, index)
    }

    /// Expose the raw font bytes for libraries that take ownership of the
    /// data (e.g. harfrust).
    pub fn as_bytes(&self) -> Arc<[u8]> {
        self.data.clone()
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Whether this face has a glyph for `c`.
    pub fn can_render(&self, c: char) -> bool {
        self.as_swash_ref().charmap().map(c) != 0
    }

    /// Identity comparison: same data, same table directory.
    pub(crate) fn same_face(&self, other: &FontFace) -> bool {
        Arc::ptr_eq(&self.data, &other.data) && self.offset == other.offset
    }

    /// A transient `FontRef` for interacting with swash APIs.
    fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}
