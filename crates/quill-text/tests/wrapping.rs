use quill_text::{FixedAdvanceShaper, Font, NoFallback, ShapedText, ShapedTextOptions};

const ADVANCE: f32 = 10.0;

fn shape<'a>(text: &'a str, options: &ShapedTextOptions) -> ShapedText<'a> {
    ShapedText::shape(text, options, &FixedAdvanceShaper::new(ADVANCE), &NoFallback)
}

const TEST_STRINGS: &[&str] = &[
    "Some trivial text",
    "Text with \r\n\r\n line feed and new line characters",
    "\nPrepending new line character",
    "\n\nMultiple prepending new line characters",
    "\n\nMultiple prepending and trailing line feed or new line characters\n\r\n",
    "Try right-clicking on a slider for an options menu. \n\nAlso, holding down CTRL while \
     dragging will turn on a slider's velocity-sensitive mode",
];

#[test]
fn ltr_text_maps_each_glyph_to_a_single_codepoint() {
    for &text in TEST_STRINGS {
        for width in [100_000.0, 60.0] {
            let options = ShapedTextOptions::default().with_max_width(width);
            let st = shape(text, &options);

            assert_eq!(
                st.num_glyphs(),
                text.chars().count(),
                "glyph count for {text:?} at width {width}"
            );
            for i in 0..st.num_glyphs() {
                assert_eq!(
                    st.get_text_range(i),
                    i..i + 1,
                    "glyph {i} of {text:?} at width {width}"
                );
            }
        }
    }
}

#[test]
fn line_text_ranges_partition_the_text() {
    for &text in TEST_STRINGS {
        for width in [100_000.0, 60.0, 25.0] {
            let options = ShapedTextOptions::default().with_max_width(width);
            let st = shape(text, &options);

            let mut pos = 0;
            let mut glyph_pos = 0;
            for line in st.lines() {
                assert_eq!(
                    line.text_range.start, pos,
                    "line ranges of {text:?} at width {width} are not contiguous"
                );
                assert!(line.text_range.end >= pos);
                pos = line.text_range.end;

                assert_eq!(line.glyph_range.start, glyph_pos);
                glyph_pos = line.glyph_range.end;
            }
            assert_eq!(pos, text.chars().count(), "lines of {text:?} fall short");
            assert_eq!(glyph_pos, st.num_glyphs());
        }
    }
}

#[test]
fn crlf_is_a_single_line_break() {
    let st = shape("\r\n", &ShapedTextOptions::default());
    assert_eq!(st.num_lines(), 2);
    assert_eq!(st.lines()[0].text_range, 0..2);
    assert_eq!(st.lines()[1].text_range, 2..2);
    // The pair still contributes a glyph per codepoint.
    assert_eq!(st.num_glyphs(), 2);
}

#[test]
fn trailing_newline_opens_an_empty_line() {
    let st = shape("Prepending new line character\n", &ShapedTextOptions::default());
    assert_eq!(st.num_lines(), 2);
    assert!(st.lines()[1].glyph_range.is_empty());
    assert_eq!(st.lines()[1].text_range, 30..30);
}

#[test]
fn empty_text_has_one_empty_line() {
    let st = shape("", &ShapedTextOptions::default());
    assert_eq!(st.num_lines(), 1);
    assert_eq!(st.num_glyphs(), 0);
    assert_eq!(st.lines()[0].text_range, 0..0);
}

#[test]
fn words_wrap_at_safe_break_points() {
    let options = ShapedTextOptions::default().with_max_width(3.0 * ADVANCE);
    let st = shape("a bb ccc", &options);

    let ranges: Vec<_> = st.lines().iter().map(|l| l.text_range.clone()).collect();
    assert_eq!(ranges, vec![0..2, 2..5, 5..8]);
}

#[test]
fn lines_stay_within_max_width() {
    let options = ShapedTextOptions::default().with_max_width(50.0);
    let st = shape("aa bb cc dd", &options);

    assert!(st.num_lines() > 1);
    for line in st.lines() {
        let ink_width: f32 = st
            .glyphs_in(line.glyph_range.clone())
            .iter()
            .filter(|g| !g.whitespace)
            .map(|g| g.advance.x)
            .sum();
        assert!(ink_width <= 50.0, "line {:?} too wide", line.text_range);
    }
}

#[test]
fn trailing_whitespace_can_extend_beyond_the_margin() {
    let text = "ab cd ";
    let options = ShapedTextOptions::default().with_max_width(55.0);

    // By default the trailing space overflows and the text stays on one line.
    let st = shape(text, &options);
    assert_eq!(st.num_lines(), 1);

    // When trailing whitespace must fit, the second word wraps whole.
    let strict = options.clone().with_trailing_whitespaces_should_fit(true);
    let st = shape(text, &strict);
    assert_eq!(st.num_lines(), 2);
    assert_eq!(st.lines()[0].text_range, 0..3);
    assert_eq!(st.lines()[1].text_range, 3..6);
}

#[test]
fn long_word_overflows_unless_breaking_inside_is_allowed() {
    let text = "abcdef";
    let options = ShapedTextOptions::default().with_max_width(30.0);

    let st = shape(text, &options);
    assert_eq!(st.num_lines(), 1);
    assert_eq!(st.num_glyphs(), 6);

    let breaking = options.clone().with_allow_breaking_inside_word(true);
    let st = shape(text, &breaking);
    let ranges: Vec<_> = st.lines().iter().map(|l| l.text_range.clone()).collect();
    assert_eq!(ranges, vec![0..3, 3..6]);
}

#[test]
fn line_limit_folds_overflow_into_the_last_line() {
    let options = ShapedTextOptions::default()
        .with_max_width(3.0 * ADVANCE)
        .with_max_num_lines(2);
    let st = shape("a bb ccc", &options);

    assert_eq!(st.num_lines(), 2);
    // Nothing is dropped; the overflow lands on the last permitted line.
    assert_eq!(st.num_glyphs(), 8);
    assert_eq!(st.lines()[0].text_range, 0..2);
    assert_eq!(st.lines()[1].text_range, 2..8);
}

#[test]
fn line_limit_stops_consuming_hard_lines() {
    let options = ShapedTextOptions::default().with_max_num_lines(2);
    let st = shape("a\nb\nc\nd", &options);

    assert_eq!(st.num_lines(), 2);
    assert_eq!(st.num_glyphs(), 4);
    assert_eq!(st.lines()[1].text_range, 2..4);
}

#[test]
fn zero_line_limit_produces_nothing() {
    let options = ShapedTextOptions::default().with_max_num_lines(0);
    let st = shape("abc", &options);
    assert_eq!(st.num_lines(), 0);
    assert_eq!(st.num_glyphs(), 0);
}

#[test]
fn rtl_runs_are_emitted_in_visual_order() {
    let st = shape("abc אבג", &ShapedTextOptions::default());
    let clusters: Vec<usize> = st.glyphs().iter().map(|g| g.cluster).collect();
    assert_eq!(clusters, vec![0, 1, 2, 3, 6, 5, 4]);
}

#[test]
fn rtl_glyph_text_ranges_are_single_codepoints() {
    let st = shape("abc אבג", &ShapedTextOptions::default());
    for i in 0..st.num_glyphs() {
        let range = st.get_text_range(i);
        assert_eq!(range.len(), 1);
        assert_eq!(range.start, st.glyphs()[i].cluster);
    }
}

#[test]
fn glyphs_map_back_to_codepoints() {
    let text = "ab\r\ncd";
    let st = shape(text, &ShapedTextOptions::default());
    let chars: Vec<char> = text.chars().collect();

    for (i, glyph) in st.glyphs().iter().enumerate() {
        assert_eq!(st.get_codepoint(i), Some(chars[glyph.cluster]));
    }
    assert_eq!(st.get_codepoint(st.num_glyphs()), None);
}

#[test]
fn first_line_indent_narrows_the_first_line() {
    let text = "aa bb";
    let options = ShapedTextOptions::default().with_max_width(60.0);
    assert_eq!(shape(text, &options).num_lines(), 1);

    let indented = options.clone().with_first_line_indent(30.0);
    let st = shape(text, &indented);
    assert_eq!(st.num_lines(), 2);
    assert_eq!(st.lines()[0].text_range, 0..3);
}

#[test]
fn glyph_queries_clip_and_locate() {
    let options = ShapedTextOptions::default().with_max_width(3.0 * ADVANCE);
    let st = shape("a bb ccc", &options);

    assert_eq!(st.line_containing_glyph(0), Some(0));
    assert_eq!(st.line_containing_glyph(2), Some(1));
    assert_eq!(st.line_containing_glyph(7), Some(2));
    assert_eq!(st.line_containing_glyph(8), None);

    assert_eq!(st.glyphs_in(6..100).len(), 2);
    assert!(st.glyphs_in(100..200).is_empty());
}

#[test]
fn uncovered_font_ranges_keep_their_codepoints() {
    let options =
        ShapedTextOptions::default().with_fonts_for_range(vec![(0..2, Font::sized(10.0))]);
    let st = shape("abcd", &options);

    assert_eq!(st.num_glyphs(), 4);
    let clusters: Vec<usize> = st.glyphs().iter().map(|g| g.cluster).collect();
    assert_eq!(clusters, vec![0, 1, 2, 3]);
    assert_eq!(st.lines()[0].text_range, 0..4);
}

#[test]
fn fonts_follow_their_assigned_ranges() {
    let options = ShapedTextOptions::default().with_fonts_for_range(vec![
        (0..2, Font::sized(10.0)),
        (2..usize::MAX, Font::sized(20.0)),
    ]);
    let st = shape("abcd", &options);

    assert_eq!(st.num_glyphs(), 4);
    let fonts: Vec<_> = st.resolved_fonts().iter().collect();
    assert_eq!(fonts.len(), 2);
    assert_eq!(fonts[0].0, 0..2);
    assert_eq!(fonts[0].1.size(), 10.0);
    assert_eq!(fonts[1].0, 2..4);
    assert_eq!(fonts[1].1.size(), 20.0);
}
