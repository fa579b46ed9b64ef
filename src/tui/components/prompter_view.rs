//! # PrompterView Component
//!
//! Draws the script at the animator's current transform.
//!
//! The core works in logical pixels. Here one terminal row is
//! `cell_height_px` pixels tall, and the font size becomes the line pitch:
//! each script row takes `ceil(font_size / cell_height_px)` terminal rows, the
//! text on the first of them.
//!
//! ```text
//!  area.y ─┬──────────────────────┐
//!          │                      │  translate_y / cell_height_px
//!          │    first script row  │◀─ rows above the view are skipped
//!          │                      │  (pitch - 1 blank rows)
//!          │    second row        │
//!          └──────────────────────┘
//! ```
//!
//! Rows are left-aligned. A horizontal flip of the whole block reverses each
//! row's characters and moves it against the right edge.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::animator::Transform;
use crate::core::script::{display_lines, line_width, mirror_line, wrap_lines};
use crate::tui::component::Component;

/// Terminal rows one script row occupies at `font_size`.
pub fn line_pitch(font_size: f64, cell_height_px: f64) -> u16 {
    if cell_height_px <= 0.0 {
        return 1;
    }
    (font_size / cell_height_px).ceil().clamp(1.0, u16::MAX as f64) as u16
}

/// Script rows after soft wrapping to `width` columns.
pub fn layout_rows(script: &str, width: u16) -> Vec<String> {
    wrap_lines(&display_lines(script), width)
}

/// Height of the laid-out text block in logical pixels.
pub fn text_height_px(row_count: usize, pitch: u16, cell_height_px: f64) -> f64 {
    row_count as f64 * f64::from(pitch) * cell_height_px
}

pub struct PrompterView<'a> {
    pub rows: &'a [String],
    pub pitch: u16,
    pub transform: Transform,
    pub cell_height_px: f64,
}

impl<'a> PrompterView<'a> {
    pub fn new(rows: &'a [String], pitch: u16, transform: Transform, cell_height_px: f64) -> Self {
        Self {
            rows,
            pitch,
            transform,
            cell_height_px,
        }
    }

    /// Row offset of the first script row relative to the top of the view.
    fn offset_rows(&self) -> i64 {
        if self.cell_height_px <= 0.0 {
            return 0;
        }
        (self.transform.translate_y / self.cell_height_px).round() as i64
    }
}

impl Component for PrompterView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Block::new().style(Style::default().bg(Color::Black)), area);

        let style = Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD);
        let offset = self.offset_rows();
        let pitch = i64::from(self.pitch.max(1));
        let height = i64::from(area.height);

        for (index, row) in self.rows.iter().enumerate() {
            let y = offset + index as i64 * pitch;
            if y < 0 {
                continue;
            }
            if y >= height {
                break;
            }

            let (text, x) = if self.transform.flip_x {
                let indent = area.width.saturating_sub(line_width(row));
                (mirror_line(row), area.x + indent)
            } else {
                (row.clone(), area.x)
            };
            let row_area = Rect::new(x, area.y + y as u16, area.right() - x, 1);
            frame.render_widget(Paragraph::new(text).style(style), row_area);
        }
    }
}
