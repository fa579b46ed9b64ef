use crate::core::animator::PassGeometry;
use crate::core::controls::SurfaceId;
use crate::core::fullscreen::DisplayMode;
use crate::core::state::Prompter;
use crate::tui::component::Component;
use crate::tui::components::{
    ControlPanelView, PrompterView, TitleBar, layout_rows, line_pitch, text_height_px,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType};

/// Rows taken by the main control panel: three setting rows, the button row, borders.
pub const MAIN_CONTROLS_HEIGHT: u16 = 6;

/// Where each part of the screen goes in a given display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiAreas {
    pub title: Option<Rect>,
    pub editor: Option<Rect>,
    /// Outer display rect, including its border in the normal layout.
    pub display: Rect,
    /// Where the script is drawn.
    pub text: Rect,
    pub controls: Option<Rect>,
    pub overlay: Option<Rect>,
}

pub fn areas(screen: Rect, mode: DisplayMode) -> UiAreas {
    use Constraint::{Length, Min, Percentage};

    match mode {
        DisplayMode::Normal => {
            let [title, body, controls] =
                Layout::vertical([Length(1), Min(0), Length(MAIN_CONTROLS_HEIGHT)]).areas(screen);
            let [editor, display] =
                Layout::horizontal([Percentage(40), Percentage(60)]).areas(body);
            UiAreas {
                title: Some(title),
                editor: Some(editor),
                display,
                text: Block::bordered().inner(display),
                controls: Some(controls),
                overlay: None,
            }
        }
        DisplayMode::Fullscreen => {
            let [overlay, display] = Layout::vertical([Length(1), Min(0)]).areas(screen);
            UiAreas {
                title: None,
                editor: None,
                display,
                text: display,
                controls: None,
                overlay: Some(overlay),
            }
        }
    }
}

/// Pixel geometry of a scroll pass for the layout `mode` would produce.
///
/// Entering fullscreen measures with the fullscreen layout before it is drawn.
pub fn measure(
    screen: Rect,
    mode: DisplayMode,
    script: &str,
    font_size: f64,
    cell_height_px: f64,
) -> PassGeometry {
    let text = areas(screen, mode).text;
    let rows = layout_rows(script, text.width);
    let pitch = line_pitch(font_size, cell_height_px);
    PassGeometry {
        container_height: f64::from(text.height) * cell_height_px,
        text_height: text_height_px(rows.len(), pitch, cell_height_px),
    }
}

pub fn draw_ui(frame: &mut Frame, prompter: &Prompter, tui: &mut TuiState) {
    let layout = areas(frame.area(), prompter.mode());

    if let Some(title_area) = layout.title {
        TitleBar::from_state(&prompter.status_message, &prompter.state).render(frame, title_area);
    }

    if let Some(editor_area) = layout.editor {
        tui.editor.focused = tui.focus == Focus::Editor;
        tui.editor.applied = tui.editor.buffer == prompter.state.script_text;
        tui.editor.render(frame, editor_area);
    }

    draw_display(frame, &layout, prompter, tui.cell_height_px);

    if let (Some(controls_area), Some(panel)) =
        (layout.controls, prompter.surfaces().get(SurfaceId::Main))
    {
        let focused = tui.focus == Focus::Controls;
        ControlPanelView::new(panel, &mut tui.main_controls, focused).render(frame, controls_area);
    }

    if let (Some(overlay_area), Some(panel)) =
        (layout.overlay, prompter.surfaces().get(SurfaceId::Overlay))
    {
        ControlPanelView::new(panel, &mut tui.overlay_controls, true).render(frame, overlay_area);
    }
}

fn draw_display(frame: &mut Frame, layout: &UiAreas, prompter: &Prompter, cell_height_px: f64) {
    if layout.display != layout.text {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().add_modifier(Modifier::DIM))
            .title("Display")
            .style(Style::default().bg(Color::Black));
        frame.render_widget(block, layout.display);
    }

    let rows = layout_rows(&prompter.state.script_text, layout.text.width);
    let pitch = line_pitch(prompter.state.font_size, cell_height_px);
    PrompterView::new(&rows, pitch, prompter.transform(), cell_height_px).render(frame, layout.text);
}
