use core::ops::Range;

use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_script::{Script, UnicodeScript};

use crate::unicode::CharIndex;

const NO_BREAK_SPACE: char = '\u{00a0}';
const WORD_JOINER: char = '\u{2060}';

/// Split text into hard lines at mandatory break points (UAX-14), returning
/// codepoint ranges.
///
/// Each range includes its terminating break characters, so `"\r\n"` lands
/// inside the line it ends. A string whose last codepoint mandates a break
/// yields a final empty line, matching editor-style semantics where a
/// trailing newline opens a new (empty) line.
pub fn hard_line_ranges(text: &str) -> Vec<Range<usize>> {
    let index = CharIndex::new(text);
    let mut ranges = Vec::new();
    let mut start = 0usize;

    for (byte, opportunity) in linebreaks(text) {
        if opportunity == BreakOpportunity::Mandatory {
            let end = index.cp_of_byte(byte);
            ranges.push(start..end);
            start = end;
        }
    }

    if start < index.len() || ranges.is_empty() {
        ranges.push(start..index.len());
    }

    if text.chars().next_back().is_some_and(mandates_break) {
        ranges.push(index.len()..index.len());
    }

    ranges
}

fn mandates_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Codepoint positions within one hard line before which a soft break is
/// legal, in increasing order, terminated by the line length.
///
/// Position 0 is never included; a soft break directly before a hard-break
/// character is suppressed so wrapping cannot detach a line's terminator.
pub fn safe_break_points(line: &str) -> Vec<usize> {
    let index = CharIndex::new(line);
    let chars: Vec<char> = line.chars().collect();
    let mut points = Vec::new();

    for (byte, opportunity) in linebreaks(line) {
        if opportunity != BreakOpportunity::Allowed {
            continue;
        }
        let cp = index.cp_of_byte(byte);
        if cp == 0 || cp >= chars.len() {
            continue;
        }
        if matches!(chars[cp], '\n' | '\r') {
            continue;
        }
        if points.last() != Some(&cp) {
            points.push(cp);
        }
    }

    if points.last() != Some(&chars.len()) {
        points.push(chars.len());
    }

    points
}

/// Replace control characters with shapeable stand-ins, one codepoint per
/// input codepoint.
///
/// CR and LF become NO-BREAK SPACE so line terminators still produce a
/// glyph and glyph/text round trips stay total; the CR of a CR LF pair
/// becomes WORD JOINER so the pair contributes one visible advance at most;
/// tabs become NO-BREAK SPACE as well.
pub fn sanitize_for_shaping(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());

    for (i, &c) in chars.iter().enumerate() {
        let replacement = match c {
            '\r' if chars.get(i + 1) == Some(&'\n') => WORD_JOINER,
            '\r' | '\n' | '\t' => NO_BREAK_SPACE,
            other => other,
        };
        out.push(replacement);
    }

    out
}

/// A maximal run of codepoints sharing one Unicode script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub range: Range<usize>,
    pub script: Script,
}

/// Segment codepoints into script runs (UAX-24).
///
/// Common, Inherited and Unknown codepoints attach to the run in progress;
/// leading ones attach to the first concrete script that follows. Text with
/// no concrete script at all forms a single Common run.
pub fn script_runs(chars: &[char]) -> Vec<ScriptRun> {
    let mut runs: Vec<ScriptRun> = Vec::new();
    let mut current: Option<Script> = None;
    let mut start = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        let script = c.script();
        if is_neutral(script) {
            continue;
        }

        match current {
            None => current = Some(script),
            Some(s) if s == script => {}
            Some(s) => {
                runs.push(ScriptRun {
                    range: start..i,
                    script: s,
                });
                start = i;
                current = Some(script);
            }
        }
    }

    if start < chars.len() {
        runs.push(ScriptRun {
            range: start..chars.len(),
            script: current.unwrap_or(Script::Common),
        });
    }

    runs
}

fn is_neutral(script: Script) -> bool {
    matches!(script, Script::Common | Script::Inherited | Script::Unknown)
}
