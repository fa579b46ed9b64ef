//! # TitleBar Component
//!
//! Top status line in the normal layout.
//!
//! Purely presentational: it receives everything as props and has no
//! internal state.
//!
//! ```text
//! Prompter | Scrolling | speed 2 | font 40 | mirrored
//! ```
//!
//! The status message comes from the core, the flags from the presentation
//! state. Empty segments are dropped so narrow terminals show the most
//! important text first.

use crate::core::controls::format_value;
use crate::core::state::PresentationState;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub status_message: String,
    pub scroll_speed: f64,
    pub font_size: f64,
    pub mirrored: bool,
}

impl TitleBar {
    pub fn new(status_message: String, scroll_speed: f64, font_size: f64, mirrored: bool) -> Self {
        Self {
            status_message,
            scroll_speed,
            font_size,
            mirrored,
        }
    }

    pub fn from_state(status_message: &str, state: &PresentationState) -> Self {
        Self::new(
            status_message.to_string(),
            state.scroll_speed,
            state.font_size,
            state.mirrored,
        )
    }

    fn text(&self) -> String {
        let mut parts = vec![String::from("Prompter")];
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        parts.push(format!("speed {}", format_value(self.scroll_speed)));
        parts.push(format!("font {}", format_value(self.font_size)));
        if self.mirrored {
            parts.push(String::from("mirrored"));
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Span::styled(self.text(), Style::default().fg(Color::Cyan)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_new() {
        let title_bar = TitleBar::new("Ready".to_string(), 2.0, 40.0, false);

        assert_eq!(title_bar.status_message, "Ready");
        assert_eq!(title_bar.scroll_speed, 2.0);
        assert!(!title_bar.mirrored);
    }

    #[test]
    fn test_title_bar_shows_status_and_values() {
        let mut title_bar = TitleBar::new("Scrolling".to_string(), 2.5, 40.0, false);
        let text = rendered(&mut title_bar);

        assert!(text.contains("Prompter"));
        assert!(text.contains("Scrolling"));
        assert!(text.contains("speed 2.5"));
        assert!(text.contains("font 40"));
        assert!(!text.contains("mirrored"));
    }

    #[test]
    fn test_title_bar_mirrored_flag() {
        let mut title_bar = TitleBar::new("Ready".to_string(), 2.0, 40.0, true);
        assert!(rendered(&mut title_bar).contains("mirrored"));
    }

    #[test]
    fn test_title_bar_empty_status_skipped() {
        let title_bar = TitleBar::new(String::new(), 2.0, 40.0, false);
        assert!(title_bar.text().starts_with("Prompter | speed 2"));
    }

    #[test]
    fn test_title_bar_from_state() {
        let state = PresentationState {
            mirrored: true,
            ..PresentationState::default()
        };
        let title_bar = TitleBar::from_state("Stopped", &state);
        assert_eq!(title_bar.status_message, "Stopped");
        assert_eq!(title_bar.scroll_speed, state.scroll_speed);
        assert!(title_bar.mirrored);
    }
}
