use unicode_bidi::{BidiInfo, Level, LTR_LEVEL, RTL_LEVEL};

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect base direction from text (first strong char).
    #[default]
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<Level> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(LTR_LEVEL),
            BaseDirection::Rtl => Some(RTL_LEVEL),
        }
    }
}

/// Resolved embedding level for each codepoint of `text` (UAX-9).
///
/// The result is parallel to `text.chars()`.
pub fn char_levels(text: &str, base_dir: BaseDirection) -> Vec<Level> {
    let info = BidiInfo::new(text, base_dir.to_level());
    text.char_indices()
        .map(|(byte, _)| info.levels[byte])
        .collect()
}
