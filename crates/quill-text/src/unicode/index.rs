use core::ops::Range;

/// Lookup table between codepoint indices and byte offsets of a string.
///
/// The layout engine addresses text by codepoint index; `&str` slicing and
/// the Unicode crates work in byte offsets. This table bridges the two.
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset of each codepoint, in order.
    offsets: Vec<usize>,
    /// Total length of the string in bytes.
    total_bytes: usize,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        Self {
            offsets: text.char_indices().map(|(b, _)| b).collect(),
            total_bytes: text.len(),
        }
    }

    /// Number of codepoints.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Byte offset of the codepoint at `cp`. `cp == len()` maps to the end
    /// of the string.
    pub fn byte_of(&self, cp: usize) -> usize {
        debug_assert!(cp <= self.offsets.len());
        self.offsets.get(cp).copied().unwrap_or(self.total_bytes)
    }

    /// Codepoint index of the codepoint containing byte offset `byte`.
    pub fn cp_of_byte(&self, byte: usize) -> usize {
        if byte >= self.total_bytes {
            return self.offsets.len();
        }
        // Last offset <= byte.
        self.offsets.partition_point(|&b| b <= byte) - 1
    }

    /// Byte range corresponding to a codepoint range.
    pub fn byte_range(&self, range: Range<usize>) -> Range<usize> {
        self.byte_of(range.start)..self.byte_of(range.end)
    }
}
