use crate::font::Font;
use crate::ranged::RangedValues;

/// Collaborator that answers codepoint coverage and fallback queries.
///
/// Injected into font resolution so layout stays deterministic in tests and
/// free of hidden process-wide state.
pub trait FontSource {
    /// Whether `font` can display `c`.
    fn can_render(&self, font: &Font, c: char) -> bool {
        font.can_render(c)
    }

    /// Find a substitute font able to display all of `text`, or `None` when
    /// the search is exhausted.
    fn find_substitute(&self, font: &Font, text: &str, language: &str) -> Option<Font>;
}

/// A source with no substitutes; every codepoint keeps its assigned font.
pub struct NoFallback;

impl FontSource for NoFallback {
    fn find_substitute(&self, _font: &Font, _text: &str, _language: &str) -> Option<Font> {
        None
    }
}

/// Resolve a per-range font assignment over one line of text so that, where
/// possible, every codepoint is covered by a font that can render it.
///
/// For each assigned sub-range this runs a bounded fixed point: mark
/// codepoints the current font cannot render, ask `source` for a substitute
/// per maximal unresolved sub-range, and repeat until nothing is missing or
/// an iteration stops making progress. Codepoints that remain unresolved
/// keep the originally assigned font; that is a policy, not an error.
pub fn resolve_fonts(
    source: &dyn FontSource,
    line: &str,
    chars: &[char],
    fonts: &RangedValues<Font>,
    language: &str,
) -> RangedValues<Font> {
    let index = crate::unicode::CharIndex::new(line);
    let mut resolved = RangedValues::new();

    for (range, font) in fonts.iter() {
        let range = range.start..range.end.min(chars.len());
        if range.is_empty() {
            continue;
        }

        if !font.fallback_enabled() {
            resolved.set(range, font.clone());
            continue;
        }

        // Slots start with the base font; `None` marks codepoints whose
        // current assignment cannot render them. Marking merges equal
        // neighbours so unresolved sub-ranges stay maximal and the fallback
        // search sees each of them as one query.
        let mut slots: RangedValues<Option<Font>> = RangedValues::new();
        slots.set(range.clone(), Some(font.clone()));

        let mark_missing = |slots: &mut RangedValues<Option<Font>>| {
            let mut missing = Vec::new();
            for (r, f) in slots.iter() {
                if let Some(f) = f {
                    for cp in r.clone() {
                        if !source.can_render(f, chars[cp]) {
                            missing.push(cp);
                        }
                    }
                }
            }
            for &cp in &missing {
                slots.set(cp..cp + 1, None);
            }
            missing.len()
        };

        let mut num_missing = mark_missing(&mut slots);

        while num_missing > 0 {
            let mut changes = Vec::new();
            for (r, f) in slots.iter() {
                if f.is_none() {
                    let segment = &line[index.byte_range(r.clone())];
                    if let Some(substitute) = source.find_substitute(font, segment, language) {
                        changes.push((r, substitute));
                    }
                }
            }

            for (r, f) in changes {
                slots.set(r, Some(f));
            }

            let remaining = mark_missing(&mut slots);
            if remaining == num_missing {
                // The last pass resolved nothing further; accept the rest as
                // missing-glyph territory.
                log::trace!("font fallback exhausted with {remaining} unresolved codepoints");
                break;
            }
            num_missing = remaining;
        }

        for (r, f) in slots.iter() {
            resolved.set(r, f.clone().unwrap_or_else(|| font.clone()));
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted coverage table: each family renders a fixed set of chars,
    /// and substitution picks the first family covering the whole request.
    struct Scripted {
        families: Vec<(&'static str, &'static str)>,
    }

    impl FontSource for Scripted {
        fn can_render(&self, font: &Font, c: char) -> bool {
            self.families
                .iter()
                .find(|(name, _)| *name == font.family())
                .is_some_and(|(_, coverage)| coverage.contains(c))
        }

        fn find_substitute(&self, _font: &Font, text: &str, _language: &str) -> Option<Font> {
            self.families
                .iter()
                .find(|(_, coverage)| text.chars().all(|c| coverage.contains(c)))
                .map(|(name, _)| Font::named(*name, 15.0))
        }
    }

    fn base_assignment(text: &str, font: Font) -> RangedValues<Font> {
        let mut fonts = RangedValues::new();
        fonts.set_unmerged(0..text.chars().count(), font);
        fonts
    }

    #[test]
    fn fully_covered_range_is_untouched() {
        let source = Scripted {
            families: vec![("latin", "abc ")],
        };
        let text = "abc";
        let chars: Vec<char> = text.chars().collect();
        let fonts = base_assignment(text, Font::named("latin", 15.0));
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "en");
        let items: Vec<_> = resolved.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0, 0..3);
        assert_eq!(items[0].1.family(), "latin");
    }

    #[test]
    fn uncovered_subrange_gets_a_substitute() {
        let source = Scripted {
            families: vec![("latin", "abc "), ("greek", "Ωπ")],
        };
        let text = "abΩc";
        let chars: Vec<char> = text.chars().collect();
        let fonts = base_assignment(text, Font::named("latin", 15.0));
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "en");
        let items: Vec<_> = resolved.iter().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].0, 0..2);
        assert_eq!(items[0].1.family(), "latin");
        assert_eq!(items[1].0, 2..3);
        assert_eq!(items[1].1.family(), "greek");
        assert_eq!(items[2].0, 3..4);
        assert_eq!(items[2].1.family(), "latin");
    }

    #[test]
    fn substitutes_are_requested_per_maximal_unresolved_range() {
        use std::cell::RefCell;

        struct Recording {
            inner: Scripted,
            queries: RefCell<Vec<String>>,
        }

        impl FontSource for Recording {
            fn can_render(&self, font: &Font, c: char) -> bool {
                self.inner.can_render(font, c)
            }

            fn find_substitute(&self, font: &Font, text: &str, language: &str) -> Option<Font> {
                self.queries.borrow_mut().push(text.to_string());
                self.inner.find_substitute(font, text, language)
            }
        }

        let source = Recording {
            inner: Scripted {
                families: vec![("latin", "ab"), ("greek", "Ωπ")],
            },
            queries: RefCell::new(Vec::new()),
        };
        let text = "aΩπb";
        let chars: Vec<char> = text.chars().collect();
        let fonts = base_assignment(text, Font::named("latin", 15.0));
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "en");

        // Adjacent uncovered codepoints form one sub-range and one query.
        assert_eq!(source.queries.borrow().as_slice(), ["Ωπ"]);

        let items: Vec<_> = resolved.iter().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].0, 1..3);
        assert_eq!(items[1].1.family(), "greek");
    }

    #[test]
    fn resolved_map_stays_maximal_when_fallback_finds_nothing() {
        let source = Scripted { families: vec![] };
        let text = "abc";
        let chars: Vec<char> = text.chars().collect();
        let fonts = base_assignment(text, Font::named("missing", 15.0));
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "en");

        // Every codepoint keeps the base font as a single merged entry.
        let items: Vec<_> = resolved.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0, 0..3);
        assert_eq!(items[0].1.family(), "missing");
    }

    #[test]
    fn exhausted_fallback_keeps_base_font_and_terminates() {
        let source = Scripted {
            families: vec![("latin", "abc ")],
        };
        let text = "a€b";
        let chars: Vec<char> = text.chars().collect();
        let fonts = base_assignment(text, Font::named("latin", 15.0));
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "en");
        // Full coverage, with the unresolved codepoint keeping the base font.
        assert!(resolved.covers(0..3));
        assert_eq!(resolved.get(1).unwrap().1.family(), "latin");
    }

    #[test]
    fn fallback_disabled_short_circuits() {
        let source = Scripted { families: vec![] };
        let text = "אבג";
        let chars: Vec<char> = text.chars().collect();
        let font = Font::named("latin", 15.0).with_fallback_disabled();
        let fonts = base_assignment(text, font);
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "he");
        let items: Vec<_> = resolved.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0, 0..3);
    }

    #[test]
    fn assignments_are_clamped_to_text_length() {
        let source = Scripted {
            families: vec![("latin", "ab")],
        };
        let text = "ab";
        let chars: Vec<char> = text.chars().collect();
        let mut fonts = RangedValues::new();
        fonts.set_unmerged(0..usize::MAX, Font::named("latin", 15.0));
        let resolved = resolve_fonts(&source, text, &chars, &fonts, "en");
        let items: Vec<_> = resolved.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0, 0..2);
    }
}
