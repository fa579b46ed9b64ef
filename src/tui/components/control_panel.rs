//! # ControlPanel Component
//!
//! Draws one control surface and turns key presses on it into control events.
//!
//! ## Architecture
//!
//! The displayed values live in the core (`core::controls::ControlPanel`),
//! which the store keeps in sync across surfaces. This component only owns
//! which row is selected. The view is a transient wrapper built each frame
//! around the persistent `ControlPanelState` and the panel snapshot (props).
//!
//! ```text
//! Main surface (vertical)          Overlay surface (one line)
//! ┌Controls──────────────────┐
//! │▸ Speed  [====------] 2   │     Stop  Start  Exit  Speed ◂ 2 ▸  Font ◂ 40 ▸  Mirror [ ]
//! │  Font   [===-------] 40  │
//! │  Mirror [ ]              │
//! │  Start   Stop  Fullscreen│
//! └──────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::controls::{ControlPanel, Slider, SurfaceId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SLIDER_WIDTH: usize = 10;

/// One selectable row (or button) on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRow {
    Speed,
    FontSize,
    Mirror,
    Start,
    Stop,
    Fullscreen,
    Exit,
}

impl ControlRow {
    fn label(self) -> &'static str {
        match self {
            ControlRow::Speed => "Speed",
            ControlRow::FontSize => "Font",
            ControlRow::Mirror => "Mirror",
            ControlRow::Start => "Start",
            ControlRow::Stop => "Stop",
            ControlRow::Fullscreen => "Fullscreen",
            ControlRow::Exit => "Exit",
        }
    }

    fn is_button(self) -> bool {
        matches!(
            self,
            ControlRow::Start | ControlRow::Stop | ControlRow::Fullscreen | ControlRow::Exit
        )
    }
}

/// Rows in navigation order for a surface.
pub fn rows_for(surface: SurfaceId) -> &'static [ControlRow] {
    match surface {
        SurfaceId::Main => &[
            ControlRow::Speed,
            ControlRow::FontSize,
            ControlRow::Mirror,
            ControlRow::Start,
            ControlRow::Stop,
            ControlRow::Fullscreen,
        ],
        SurfaceId::Overlay => &[
            ControlRow::Stop,
            ControlRow::Start,
            ControlRow::Exit,
            ControlRow::Speed,
            ControlRow::FontSize,
            ControlRow::Mirror,
        ],
    }
}

/// High-level events emitted by a control surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SetSpeed(f64),
    SetFontSize(f64),
    SetMirrored(bool),
    Start,
    Stop,
    ToggleFullscreen,
    ExitFullscreen,
}

/// Selection state for one surface. Persisted in `TuiState`.
#[derive(Debug, Clone, Default)]
pub struct ControlPanelState {
    pub selected: usize,
}

impl ControlPanelState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Transient view over a surface snapshot and its selection state.
pub struct ControlPanelView<'a> {
    pub panel: &'a ControlPanel,
    pub state: &'a mut ControlPanelState,
    pub focused: bool,
}

impl<'a> ControlPanelView<'a> {
    pub fn new(panel: &'a ControlPanel, state: &'a mut ControlPanelState, focused: bool) -> Self {
        Self {
            panel,
            state,
            focused,
        }
    }

    fn rows(&self) -> &'static [ControlRow] {
        rows_for(self.panel.id)
    }

    fn selected_row(&self) -> ControlRow {
        let rows = self.rows();
        rows[self.state.selected.min(rows.len() - 1)]
    }

    fn is_enabled(&self, row: ControlRow) -> bool {
        match row {
            ControlRow::Start => self.panel.start_enabled,
            ControlRow::Stop => self.panel.stop_enabled,
            _ => true,
        }
    }

    /// Move a slider or flip the checkbox in response to Left/Right.
    fn adjust(&self, steps: i32) -> Option<ControlEvent> {
        match self.selected_row() {
            ControlRow::Speed => Some(ControlEvent::SetSpeed(
                self.panel.speed.range.nudge(self.panel.speed.value, steps),
            )),
            ControlRow::FontSize => Some(ControlEvent::SetFontSize(
                self.panel
                    .font_size
                    .range
                    .nudge(self.panel.font_size.value, steps),
            )),
            ControlRow::Mirror => Some(ControlEvent::SetMirrored(!self.panel.mirrored)),
            _ => None,
        }
    }

    fn activate(&self) -> Option<ControlEvent> {
        let row = self.selected_row();
        if !self.is_enabled(row) {
            return None;
        }
        match row {
            ControlRow::Mirror => Some(ControlEvent::SetMirrored(!self.panel.mirrored)),
            ControlRow::Start => Some(ControlEvent::Start),
            ControlRow::Stop => Some(ControlEvent::Stop),
            ControlRow::Fullscreen => Some(ControlEvent::ToggleFullscreen),
            ControlRow::Exit => Some(ControlEvent::ExitFullscreen),
            ControlRow::Speed | ControlRow::FontSize => None,
        }
    }

    fn row_style(&self, row: ControlRow) -> Style {
        let mut style = Style::default();
        if !self.is_enabled(row) {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.focused && self.selected_row() == row {
            style = style.fg(Color::Black).bg(Color::Cyan);
        }
        style
    }

    fn row_spans(&self, row: ControlRow, compact: bool) -> Vec<Span<'static>> {
        let style = self.row_style(row);
        match row {
            ControlRow::Speed => slider_spans(row.label(), &self.panel.speed, compact, style),
            ControlRow::FontSize => {
                slider_spans(row.label(), &self.panel.font_size, compact, style)
            }
            ControlRow::Mirror => {
                let mark = if self.panel.mirrored { "x" } else { " " };
                vec![Span::styled(format!("{:<6} [{}]", row.label(), mark), style)]
            }
            _ => vec![Span::styled(format!(" {} ", row.label()), style)],
        }
    }

    fn render_vertical(&self, frame: &mut Frame, area: Rect) {
        let marker = |row: ControlRow| {
            if self.focused && self.selected_row() == row {
                "▸ "
            } else {
                "  "
            }
        };

        let mut lines: Vec<Line> = Vec::new();
        let mut buttons: Vec<Span> = vec![Span::raw("  ")];
        for &row in self.rows() {
            if row.is_button() {
                buttons.extend(self.row_spans(row, false));
                buttons.push(Span::raw(" "));
            } else {
                let mut spans = vec![Span::raw(marker(row))];
                spans.extend(self.row_spans(row, false));
                lines.push(Line::from(spans));
            }
        }
        lines.push(Line::from(buttons));

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Controls");

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_horizontal(&self, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for &row in self.rows() {
            spans.extend(self.row_spans(row, true));
            spans.push(Span::raw("  "));
        }
        let bar = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(bar, area);
    }
}

fn slider_spans(label: &str, slider: &Slider, compact: bool, style: Style) -> Vec<Span<'static>> {
    if compact {
        return vec![Span::styled(
            format!("{} ◂ {} ▸", label, slider.label()),
            style,
        )];
    }
    let filled = (slider.fraction() * SLIDER_WIDTH as f64).round() as usize;
    let bar = format!(
        "[{}{}]",
        "=".repeat(filled),
        "-".repeat(SLIDER_WIDTH - filled)
    );
    vec![
        Span::styled(format!("{:<6} ", label), style),
        Span::raw(bar),
        Span::raw(format!(" {}", slider.label())),
    ]
}

impl Component for ControlPanelView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.panel.id {
            SurfaceId::Main => self.render_vertical(frame, area),
            SurfaceId::Overlay => self.render_horizontal(frame, area),
        }
    }
}

impl EventHandler for ControlPanelView<'_> {
    type Event = ControlEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let last = self.rows().len() - 1;
        // Vertical panels navigate with Up/Down, the overlay bar with Left/Right
        let (prev, next, dec, inc) = match self.panel.id {
            SurfaceId::Main => (
                TuiEvent::CursorUp,
                TuiEvent::CursorDown,
                TuiEvent::CursorLeft,
                TuiEvent::CursorRight,
            ),
            SurfaceId::Overlay => (
                TuiEvent::CursorLeft,
                TuiEvent::CursorRight,
                TuiEvent::CursorDown,
                TuiEvent::CursorUp,
            ),
        };

        match event {
            e if *e == prev => {
                self.state.selected = self.state.selected.min(last).saturating_sub(1);
                None
            }
            e if *e == next => {
                self.state.selected = (self.state.selected + 1).min(last);
                None
            }
            e if *e == dec => self.adjust(-1),
            e if *e == inc => self.adjust(1),
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.activate(),
            _ => None,
        }
    }
}
