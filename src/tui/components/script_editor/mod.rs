//! # ScriptEditor Component
//!
//! Multi-line editor for the teleprompter script.
//!
//! ## Responsibilities
//!
//! - Capture text input (Enter inserts a line break)
//! - Handle editing (backspace, delete, cursor and word movement, paste)
//! - Emit `Apply` when the user asks to push the text to the display (Ctrl+U)
//! - Show whether the buffer differs from the text on display
//!
//! ## State Management
//!
//! The buffer is internal state. `focused` and `applied` are props from the
//! parent. Row layout, grapheme stepping and word jumps live in `layout`.

mod layout;

use crate::core::script::normalize_line_endings;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use layout::{
    VisualRow, locate, next_grapheme, offset_at_column, prev_grapheme, scroll_to_cursor,
    visual_rows, word_end_after, word_start_before,
};

/// High-level events emitted by the ScriptEditor
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Push the buffer to the display (Ctrl+U)
    Apply(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Script text editor.
///
/// # Props
///
/// - `focused`: Whether keyboard input is routed here
/// - `applied`: Whether the buffer matches the text on display
///
/// # State
///
/// - `buffer`: Current script text, always with `\n` line endings
/// - `cursor`: Byte offset into `buffer`, on a grapheme boundary
/// - `scroll`: First visual row shown
pub struct ScriptEditor {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Keyboard focus (Prop)
    pub focused: bool,
    /// Buffer matches the displayed script (Prop)
    pub applied: bool,
    cursor: usize,
    scroll: usize,
    /// Inner width at the last render, for Up/Down between renders
    text_width: u16,
}

impl ScriptEditor {
    pub fn new(initial: &str) -> Self {
        let buffer = normalize_line_endings(initial);
        Self {
            cursor: buffer.len(),
            buffer,
            focused: true,
            applied: true,
            scroll: 0,
            text_width: 80,
        }
    }

    fn insert(&mut self, text: &str) -> Option<EditorEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(EditorEvent::ContentChanged)
    }

    fn move_to(&mut self, target: usize) -> Option<EditorEvent> {
        (target != self.cursor).then(|| {
            self.cursor = target;
            EditorEvent::ContentChanged
        })
    }

    /// Move one visual row up or down, keeping the display column.
    fn move_rows(&mut self, up: bool) -> Option<EditorEvent> {
        let rows = visual_rows(&self.buffer, self.text_width);
        let (row, column) = locate(&self.buffer, &rows, self.cursor);
        let target_row = if up {
            row.checked_sub(1)?
        } else {
            Some(row + 1).filter(|&r| r < rows.len())?
        };
        self.move_to(offset_at_column(&self.buffer, &rows, target_row, column))
    }

    fn line_start(&self) -> usize {
        self.buffer[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.buffer[self.cursor..]
            .find('\n')
            .map_or(self.buffer.len(), |i| self.cursor + i)
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, total: usize, visible: usize) {
        if total <= visible {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total items
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total - visible)
            .position(self.scroll);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for ScriptEditor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.applied {
            "Script"
        } else {
            "Script (modified, Ctrl+U to update)"
        };
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        self.text_width = inner.width.max(1);
        let visible = usize::from(inner.height.max(1));

        let rows = visual_rows(&self.buffer, self.text_width);
        let (cursor_row, cursor_column) = locate(&self.buffer, &rows, self.cursor);
        self.scroll = scroll_to_cursor(self.scroll, cursor_row, visible).min(rows.len() - 1);

        let lines: Vec<Line> = rows
            .iter()
            .skip(self.scroll)
            .take(visible)
            .map(|&VisualRow { start, end }| Line::raw(&self.buffer[start..end]))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
        self.render_scrollbar(frame, area, rows.len(), visible);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + cursor_column.min(inner.width - 1);
            let y = inner.y + (cursor_row - self.scroll) as u16;
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for ScriptEditor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(&c.to_string()),
            TuiEvent::Submit => self.insert("\n"),
            TuiEvent::Paste(text) => self.insert(&normalize_line_endings(text)),
            TuiEvent::Backspace => {
                let prev = prev_grapheme(&self.buffer, self.cursor);
                (prev != self.cursor).then(|| {
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    EditorEvent::ContentChanged
                })
            }
            TuiEvent::Delete => {
                let next = next_grapheme(&self.buffer, self.cursor);
                (next != self.cursor).then(|| {
                    self.buffer.drain(self.cursor..next);
                    EditorEvent::ContentChanged
                })
            }
            TuiEvent::CursorLeft => self.move_to(prev_grapheme(&self.buffer, self.cursor)),
            TuiEvent::CursorRight => self.move_to(next_grapheme(&self.buffer, self.cursor)),
            TuiEvent::WordLeft => self.move_to(word_start_before(&self.buffer, self.cursor)),
            TuiEvent::WordRight => self.move_to(word_end_after(&self.buffer, self.cursor)),
            TuiEvent::CursorHome => self.move_to(self.line_start()),
            TuiEvent::CursorEnd => self.move_to(self.line_end()),
            TuiEvent::CursorUp => self.move_rows(true),
            TuiEvent::CursorDown => self.move_rows(false),
            TuiEvent::ApplyScript => Some(EditorEvent::Apply(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_new_places_cursor_at_end() {
        let mut editor = ScriptEditor::new("abc");
        editor.handle_event(&TuiEvent::InputChar('d'));
        assert_eq!(editor.buffer, "abcd");
    }

    #[test]
    fn test_handle_input() {
        let mut editor = ScriptEditor::new("");

        let res = editor.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(EditorEvent::ContentChanged));
        assert_eq!(editor.buffer, "a");

        let res = editor.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(res, Some(EditorEvent::ContentChanged));
        assert_eq!(editor.buffer, "ab");

        let res = editor.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(EditorEvent::ContentChanged));
        assert_eq!(editor.buffer, "a");
    }

    #[test]
    fn test_enter_inserts_line_break() {
        let mut editor = ScriptEditor::new("one");
        editor.handle_event(&TuiEvent::Submit);
        editor.handle_event(&TuiEvent::InputChar('t'));
        assert_eq!(editor.buffer, "one\nt");
    }

    #[test]
    fn test_apply_keeps_buffer() {
        let mut editor = ScriptEditor::new("hello\nworld");
        let res = editor.handle_event(&TuiEvent::ApplyScript);
        assert_eq!(res, Some(EditorEvent::Apply("hello\nworld".to_string())));
        assert_eq!(editor.buffer, "hello\nworld");
    }

    #[test]
    fn test_paste_normalizes_crlf() {
        let mut editor = ScriptEditor::new("");
        editor.handle_event(&TuiEvent::Paste("a\r\nb".to_string()));
        assert_eq!(editor.buffer, "a\nb");
    }

    #[test]
    fn test_word_movement() {
        let mut editor = ScriptEditor::new("hello world");
        assert_eq!(
            editor.handle_event(&TuiEvent::WordLeft),
            Some(EditorEvent::ContentChanged)
        );
        editor.handle_event(&TuiEvent::InputChar('_'));
        assert_eq!(editor.buffer, "hello _world");
    }

    #[test]
    fn test_home_end_within_line() {
        let mut editor = ScriptEditor::new("first\nsecond");
        editor.handle_event(&TuiEvent::CursorHome);
        editor.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(editor.buffer, "first\n>second");
        assert_eq!(editor.handle_event(&TuiEvent::CursorEnd), Some(EditorEvent::ContentChanged));
        assert_eq!(editor.handle_event(&TuiEvent::CursorEnd), None);
    }

    #[test]
    fn test_cursor_up_moves_between_lines() {
        let mut editor = ScriptEditor::new("abc\ndef");
        assert_eq!(editor.handle_event(&TuiEvent::CursorUp), Some(EditorEvent::ContentChanged));
        editor.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(editor.buffer, "abc!\ndef");
    }

    #[test]
    fn test_new_normalizes_crlf() {
        let editor = ScriptEditor::new("one\r\ntwo\r\n");
        assert_eq!(editor.buffer, "one\ntwo\n");
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut editor = ScriptEditor::new("cafe\u{301}");
        assert_eq!(editor.handle_event(&TuiEvent::Backspace), Some(EditorEvent::ContentChanged));
        assert_eq!(editor.buffer, "caf");
    }

    #[test]
    fn test_edges_report_no_change() {
        let mut editor = ScriptEditor::new("");
        assert_eq!(editor.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(editor.handle_event(&TuiEvent::Delete), None);
        assert_eq!(editor.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(editor.handle_event(&TuiEvent::CursorDown), None);
    }

    #[test]
    fn test_cursor_down_follows_soft_wrap() {
        let backend = TestBackend::new(8, 6);
        let mut terminal = Terminal::new(backend).unwrap();

        // Inner width 6 wraps to "intro " and "text"
        let mut editor = ScriptEditor::new("intro text");
        terminal.draw(|f| editor.render(f, f.area())).unwrap();

        editor.handle_event(&TuiEvent::CursorHome);
        editor.handle_event(&TuiEvent::CursorRight);
        assert_eq!(editor.handle_event(&TuiEvent::CursorDown), Some(EditorEvent::ContentChanged));
        editor.handle_event(&TuiEvent::InputChar('|'));
        assert_eq!(editor.buffer, "intro t|ext");
    }

    #[test]
    fn test_global_events_ignored() {
        let mut editor = ScriptEditor::new("");
        assert_eq!(editor.handle_event(&TuiEvent::StartScrolling), None);
        assert_eq!(editor.handle_event(&TuiEvent::Resize(10, 10)), None);
    }

    #[test]
    fn test_render_shows_modified_title() {
        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut editor = ScriptEditor::new("Good evening");
        editor.applied = false;

        terminal.draw(|f| editor.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("modified"));
        assert!(text.contains("Good evening"));
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let backend = TestBackend::new(30, 5);
        let mut terminal = Terminal::new(backend).unwrap();

        // 3 visible rows, cursor on the last of 6 lines
        let mut editor = ScriptEditor::new("l1\nl2\nl3\nl4\nl5\nl6");
        terminal.draw(|f| editor.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("l6"));
        assert!(!text.contains("l1"));
    }
}
