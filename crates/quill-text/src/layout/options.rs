use crate::font::{Font, FontForRange};

/// Base reading direction override for a whole text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// Horizontal placement of wrapped lines within the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Everything that influences shaping and wrapping, gathered with chained
/// `with_*` builders.
///
/// ```
/// use quill_text::{Font, ShapedTextOptions};
///
/// let options = ShapedTextOptions::default()
///     .with_font(Font::named("Noto Sans", 14.0))
///     .with_max_width(320.0)
///     .with_max_num_lines(3);
/// assert_eq!(options.max_width(), Some(320.0));
/// ```
#[derive(Debug, Clone)]
pub struct ShapedTextOptions {
    fonts_for_range: Vec<FontForRange>,
    max_width: Option<f32>,
    height: Option<f32>,
    language: String,
    first_line_indent: f32,
    leading: f32,
    additive_line_spacing: f32,
    baseline_at_zero: bool,
    trailing_whitespaces_should_fit: bool,
    allow_breaking_inside_word: bool,
    max_num_lines: Option<usize>,
    reading_direction: Option<TextDirection>,
    justification: Justification,
    ellipsis: Option<String>,
}

impl Default for ShapedTextOptions {
    fn default() -> Self {
        Self {
            fonts_for_range: vec![(0..usize::MAX, Font::default())],
            max_width: None,
            height: None,
            language: String::from("en"),
            first_line_indent: 0.0,
            leading: 1.0,
            additive_line_spacing: 0.0,
            baseline_at_zero: false,
            trailing_whitespaces_should_fit: false,
            allow_breaking_inside_word: false,
            max_num_lines: None,
            reading_direction: None,
            justification: Justification::default(),
            ellipsis: None,
        }
    }
}

impl ShapedTextOptions {
    /// Use `font` for the whole text, replacing any previous assignment.
    pub fn with_font(mut self, font: Font) -> Self {
        self.fonts_for_range = vec![(0..usize::MAX, font)];
        self
    }

    /// Assign fonts to codepoint ranges. Ranges may leave gaps; uncovered
    /// codepoints fall back to the default font.
    pub fn with_fonts_for_range(mut self, fonts: Vec<FontForRange>) -> Self {
        self.fonts_for_range = fonts;
        self
    }

    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// BCP 47 language tag passed through to shaping and font fallback.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_first_line_indent(mut self, indent: f32) -> Self {
        self.first_line_indent = indent;
        self
    }

    /// Multiplier applied to each line's font height.
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    /// Fixed amount added to each line's height.
    pub fn with_additive_line_spacing(mut self, spacing: f32) -> Self {
        self.additive_line_spacing = spacing;
        self
    }

    /// Place the first line's baseline at y = 0 instead of offsetting by the
    /// ascent.
    pub fn with_baseline_at_zero(mut self, baseline_at_zero: bool) -> Self {
        self.baseline_at_zero = baseline_at_zero;
        self
    }

    /// Count trailing whitespace against the wrap width instead of letting
    /// it spill past the margin.
    pub fn with_trailing_whitespaces_should_fit(mut self, should_fit: bool) -> Self {
        self.trailing_whitespaces_should_fit = should_fit;
        self
    }

    /// Allow wrapping in the middle of a word when it does not fit on a
    /// line of its own.
    pub fn with_allow_breaking_inside_word(mut self, allow: bool) -> Self {
        self.allow_breaking_inside_word = allow;
        self
    }

    pub fn with_max_num_lines(mut self, max: usize) -> Self {
        self.max_num_lines = Some(max);
        self
    }

    /// Force a base direction instead of detecting it from the text.
    pub fn with_reading_direction(mut self, direction: Option<TextDirection>) -> Self {
        self.reading_direction = direction;
        self
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Text appended to the last line when the line limit truncates output.
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = Some(ellipsis.into());
        self
    }

    pub fn fonts_for_range(&self) -> &[FontForRange] {
        &self.fonts_for_range
    }

    pub fn max_width(&self) -> Option<f32> {
        self.max_width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn first_line_indent(&self) -> f32 {
        self.first_line_indent
    }

    pub fn leading(&self) -> f32 {
        self.leading
    }

    pub fn additive_line_spacing(&self) -> f32 {
        self.additive_line_spacing
    }

    pub fn baseline_at_zero(&self) -> bool {
        self.baseline_at_zero
    }

    pub fn trailing_whitespaces_should_fit(&self) -> bool {
        self.trailing_whitespaces_should_fit
    }

    pub fn allow_breaking_inside_word(&self) -> bool {
        self.allow_breaking_inside_word
    }

    pub fn max_num_lines(&self) -> Option<usize> {
        self.max_num_lines
    }

    pub fn reading_direction(&self) -> Option<TextDirection> {
        self.reading_direction
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn ellipsis(&self) -> Option<&str> {
        self.ellipsis.as_deref()
    }
}
