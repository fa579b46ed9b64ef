//! # Script Text
//!
//! Turns the raw editor text into the lines the prompter view draws.
//!
//! Hard line breaks in the source are the only structure preserved. Soft
//! wrapping to the view width is a separate, purely visual step.
//!
//! ```text
//! "Hello\n\nWorld"  →  display_lines()  →  ["Hello", "", "World"]
//!                   →  wrap_lines(w)    →  same lines, long ones split at w
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split raw text into display lines.
///
/// `n` line breaks always produce `n + 1` lines, including empty ones, so the
/// rendered text has exactly as many visual breaks as the source. A `\r\n`
/// pair counts as one break.
pub fn display_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Soft-wrap display lines to `width` columns.
///
/// Empty lines stay as a single empty row. A width of zero leaves the lines
/// untouched.
pub fn wrap_lines(lines: &[String], width: u16) -> Vec<String> {
    if width == 0 {
        return lines.to_vec();
    }

    let options = textwrap::Options::new(width as usize).break_words(true);
    let mut wrapped = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() {
            wrapped.push(String::new());
            continue;
        }
        wrapped.extend(
            textwrap::wrap(line, &options)
                .into_iter()
                .map(|segment| segment.into_owned()),
        );
    }
    wrapped
}

/// Reverse a line for horizontally flipped output.
///
/// Grapheme clusters are kept whole, so combining marks stay on their base.
pub fn mirror_line(line: &str) -> String {
    line.graphemes(true).rev().collect()
}

/// Display width of a line in terminal columns.
pub fn line_width(line: &str) -> u16 {
    UnicodeWidthStr::width(line).min(u16::MAX as usize) as u16
}

/// Number of hard line breaks in the source text.
pub fn line_break_count(text: &str) -> usize {
    text.matches('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lines_preserves_breaks() {
        let lines = display_lines("one\ntwo\nthree");
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_display_lines_keeps_empty_lines() {
        let text = "intro\n\n\noutro\n";
        let lines = display_lines(text);
        assert_eq!(lines.len(), line_break_count(text) + 1);
        assert_eq!(lines, vec!["intro", "", "", "outro", ""]);
    }

    #[test]
    fn test_display_lines_empty_text_is_one_line() {
        assert_eq!(display_lines(""), vec![String::new()]);
    }

    #[test]
    fn test_display_lines_no_formatting() {
        // Markup is displayed verbatim, nothing is interpreted
        let lines = display_lines("<b>bold</b>");
        assert_eq!(lines, vec!["<b>bold</b>"]);
    }

    #[test]
    fn test_wrap_lines_splits_long_line() {
        let lines = vec!["aaaa bbbb cccc".to_string()];
        let wrapped = wrap_lines(&lines, 9);
        assert_eq!(wrapped, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_wrap_lines_keeps_empty_rows() {
        let lines = display_lines("a\n\nb");
        assert_eq!(wrap_lines(&lines, 20), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_lines_zero_width_is_identity() {
        let lines = display_lines("long line here");
        assert_eq!(wrap_lines(&lines, 0), lines);
    }

    #[test]
    fn test_mirror_line() {
        assert_eq!(mirror_line("abc"), "cba");
        assert_eq!(mirror_line("café"), "éfac");
        assert_eq!(mirror_line(""), "");
    }

    #[test]
    fn test_mirror_line_keeps_combining_marks() {
        assert_eq!(mirror_line("cafe\u{301}"), "e\u{301}fac");
        assert_eq!(line_width(&mirror_line("cafe\u{301}")), 4);
    }

    #[test]
    fn test_display_lines_strips_crlf() {
        let text = "abc\r\ndef\r\n";
        assert_eq!(display_lines(text), vec!["abc", "def", ""]);
        assert_eq!(line_break_count(text), 2);
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize_line_endings("plain"), "plain");
    }

    #[test]
    fn test_line_width_counts_columns() {
        assert_eq!(line_width("hello"), 5);
        assert_eq!(line_width(""), 0);
    }
}
