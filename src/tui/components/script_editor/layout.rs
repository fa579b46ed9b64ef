//! Screen layout of the script buffer inside the editor box.
//!
//! The buffer is laid out as a list of [`VisualRow`]s, byte ranges of the
//! buffer that each fit on one screen row. Hard line breaks always start a new
//! row. Long lines break after the last space that fits, or mid-word when a
//! single word is wider than the box. Rows never include the `\n` itself.
//!
//! ```text
//! "intro text\n\nbye"  (width 6)
//!   row 0  0..6    "intro "
//!   row 1  6..10   "text"
//!   row 2  11..11  ""
//!   row 3  12..15  "bye"
//! ```
//!
//! Cursor positions are byte offsets that always sit on grapheme boundaries.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VisualRow {
    pub start: usize,
    pub end: usize,
}

/// Lay `buffer` out in rows of at most `width` columns.
///
/// Always returns at least one row, so an empty buffer still has a place for
/// the cursor.
pub(super) fn visual_rows(buffer: &str, width: u16) -> Vec<VisualRow> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in buffer.split('\n') {
        wrap_line(buffer, line_start, line, width, &mut rows);
        line_start += line.len() + 1;
    }
    rows
}

fn wrap_line(buffer: &str, offset: usize, line: &str, width: usize, rows: &mut Vec<VisualRow>) {
    let mut row_start = offset;
    let mut columns = 0;
    let mut last_space_end: Option<usize> = None;

    for (index, grapheme) in line.grapheme_indices(true) {
        let at = offset + index;
        let grapheme_width = grapheme.width();

        if columns + grapheme_width > width && at > row_start {
            let cut = last_space_end.filter(|&end| end > row_start).unwrap_or(at);
            rows.push(VisualRow {
                start: row_start,
                end: cut,
            });
            row_start = cut;
            columns = buffer[row_start..at].width();
            last_space_end = None;
        }

        columns += grapheme_width;
        if grapheme == " " {
            last_space_end = Some(at + grapheme.len());
        }
    }

    rows.push(VisualRow {
        start: row_start,
        end: offset + line.len(),
    });
}

/// Row index and display column of `pos`.
///
/// At a soft wrap the cursor belongs to the start of the following row.
pub(super) fn locate(buffer: &str, rows: &[VisualRow], pos: usize) -> (usize, u16) {
    let index = rows.partition_point(|row| row.start <= pos).saturating_sub(1);
    let column = rows
        .get(index)
        .map_or(0, |row| buffer[row.start..pos.max(row.start)].width());
    (index, column.min(usize::from(u16::MAX)) as u16)
}

/// Byte offset on row `index` closest to `column` without passing it.
pub(super) fn offset_at_column(buffer: &str, rows: &[VisualRow], index: usize, column: u16) -> usize {
    let Some(row) = rows.get(index) else {
        return buffer.len();
    };
    // The end of a soft-wrapped row is the start of the next one
    let soft_wrapped = rows.get(index + 1).is_some_and(|next| next.start == row.end);

    let mut columns = 0;
    let mut pos = row.start;
    for (i, grapheme) in buffer[row.start..row.end].grapheme_indices(true) {
        let next_columns = columns + grapheme.width();
        let is_last = row.start + i + grapheme.len() == row.end;
        if next_columns > usize::from(column) || (soft_wrapped && is_last) {
            break;
        }
        columns = next_columns;
        pos = row.start + i + grapheme.len();
    }
    pos
}

pub(super) fn prev_grapheme(buffer: &str, pos: usize) -> usize {
    buffer[..pos]
        .grapheme_indices(true)
        .next_back()
        .map_or(0, |(i, _)| i)
}

pub(super) fn next_grapheme(buffer: &str, pos: usize) -> usize {
    buffer[pos..]
        .graphemes(true)
        .next()
        .map_or(buffer.len(), |g| pos + g.len())
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Start of the word at or before `pos`.
pub(super) fn word_start_before(buffer: &str, pos: usize) -> usize {
    buffer[..pos]
        .split_word_bound_indices()
        .rev()
        .find(|(_, segment)| is_word(segment))
        .map_or(0, |(i, _)| i)
}

/// End of the word at or after `pos`.
pub(super) fn word_end_after(buffer: &str, pos: usize) -> usize {
    buffer[pos..]
        .split_word_bound_indices()
        .find(|(_, segment)| is_word(segment))
        .map_or(buffer.len(), |(i, segment)| pos + i + segment.len())
}

/// First row to show so that `cursor_row` stays inside `visible` rows.
pub(super) fn scroll_to_cursor(scroll: usize, cursor_row: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if cursor_row < scroll {
        cursor_row
    } else if cursor_row >= scroll + visible {
        cursor_row + 1 - visible
    } else {
        scroll
    }
}
