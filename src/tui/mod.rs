//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Scrolling**: the core has a frame request outstanding, so the loop
//!   polls with the configured frame interval and dispatches `Action::Frame`
//!   with a monotonic timestamp before every draw.
//! - **Idle**: sleeps up to 500ms and only redraws on events.
//!
//! ## Platform Effects
//!
//! `update()` returns `Effect::RequestFullscreen`/`Effect::ExitFullscreen`
//! when the window itself should change. The loop runs them through
//! `NativeFullscreen` and reports back with `Action::NativeFullscreen`.
//! While a native method is engaged, `ResizeWatch` turns a shrinking window
//! into `Action::FullscreenChanged`.

mod component;
mod components;
mod event;
pub mod fullscreen;
mod ui;

use log::{debug, info};
use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::animator::PassGeometry;
use crate::core::config::ResolvedConfig;
use crate::core::controls::SurfaceId;
use crate::core::fullscreen::DisplayMode;
use crate::core::state::Prompter;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ControlEvent, ControlPanelState, ControlPanelView, EditorEvent, ScriptEditor,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::fullscreen::{NativeFullscreen, ResizeWatch, TerminalInfo};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Which normal-mode component receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Controls,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Editor => Focus::Controls,
            Focus::Controls => Focus::Editor,
        }
    }
}

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub editor: ScriptEditor,
    pub main_controls: ControlPanelState,
    pub overlay_controls: ControlPanelState,
    pub focus: Focus,
    /// Logical pixels per terminal row.
    pub cell_height_px: f64,
}

impl TuiState {
    pub fn new(initial_script: String, cell_height_px: f64) -> Self {
        Self {
            editor: ScriptEditor::new(&initial_script),
            main_controls: ControlPanelState::new(),
            overlay_controls: ControlPanelState::new(),
            focus: Focus::Editor, // User expects to type immediately
            cell_height_px,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The keyboard enhancement protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Blinking cursors flicker under continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableBracketedPaste);
    }
}

/// Everything the event loop owns besides the terminal.
struct Session {
    prompter: Prompter,
    tui: TuiState,
    native: NativeFullscreen,
    watch: ResizeWatch,
    screen: Rect,
}

impl Session {
    fn measure(&self, mode: DisplayMode) -> PassGeometry {
        ui::measure(
            self.screen,
            mode,
            &self.prompter.state.script_text,
            self.prompter.state.font_size,
            self.tui.cell_height_px,
        )
    }

    /// Run an action through the reducer and perform its effect.
    /// Returns `true` when the app should quit.
    fn dispatch(&mut self, action: Action, out: &mut dyn Write) -> bool {
        let mode_before = self.prompter.mode();
        let effect = update(&mut self.prompter, action);

        match effect {
            Effect::Quit => return true,
            Effect::RequestFullscreen => {
                let engaged = self.native.request(out);
                update(&mut self.prompter, Action::NativeFullscreen { engaged });
                if engaged {
                    self.watch.arm((self.screen.width, self.screen.height));
                }
            }
            Effect::ExitFullscreen => {
                self.native.exit(out);
                self.watch.disarm();
            }
            Effect::None => {}
        }

        // The idle position depends on the layout of the new mode
        if self.prompter.mode() != mode_before {
            debug!("Display mode {:?} -> {:?}", mode_before, self.prompter.mode());
            if self.prompter.mode() == DisplayMode::Normal {
                self.watch.disarm();
            }
            let geometry = self.measure(self.prompter.mode());
            update(&mut self.prompter, Action::Resize(geometry));
        }
        false
    }

    fn handle_resize(&mut self, width: u16, height: u16, out: &mut dyn Write) -> bool {
        self.screen = Rect::new(0, 0, width, height);
        if self.watch.observe((width, height)) == Some(false) {
            info!("Window left fullscreen outside the app");
            self.native.release();
            if self.dispatch(
                Action::FullscreenChanged {
                    platform_fullscreen: false,
                },
                out,
            ) {
                return true;
            }
        }
        let geometry = self.measure(self.prompter.mode());
        self.dispatch(Action::Resize(geometry), out)
    }

    fn control_action(&self, event: ControlEvent, from: SurfaceId) -> Action {
        match event {
            ControlEvent::SetSpeed(value) => Action::SetSpeed { from, value },
            ControlEvent::SetFontSize(value) => Action::SetFontSize { from, value },
            ControlEvent::SetMirrored(value) => Action::SetMirrored { from, value },
            ControlEvent::Start => Action::Start(self.measure(self.prompter.mode())),
            ControlEvent::Stop => Action::Stop,
            ControlEvent::ToggleFullscreen => {
                Action::ToggleFullscreen(self.measure(DisplayMode::Fullscreen))
            }
            ControlEvent::ExitFullscreen => Action::ExitFullscreen,
        }
    }

    /// Route one input event. Returns `true` when the app should quit.
    fn handle_event(&mut self, event: TuiEvent, out: &mut dyn Write) -> bool {
        let action = match event {
            TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Resize(width, height) => return self.handle_resize(width, height, out),
            TuiEvent::StartScrolling => Some(Action::Start(self.measure(self.prompter.mode()))),
            TuiEvent::StopScrolling => Some(Action::Stop),
            TuiEvent::ToggleFullscreen => Some(Action::ToggleFullscreen(
                self.measure(DisplayMode::Fullscreen),
            )),
            TuiEvent::ApplyScript => match self.tui.editor.handle_event(&event) {
                Some(EditorEvent::Apply(text)) => {
                    let geometry = ui::measure(
                        self.screen,
                        self.prompter.mode(),
                        &text,
                        self.prompter.state.font_size,
                        self.tui.cell_height_px,
                    );
                    Some(Action::UpdateText { text, geometry })
                }
                _ => None,
            },
            _ => match self.prompter.mode() {
                DisplayMode::Fullscreen => self.handle_fullscreen_event(&event),
                DisplayMode::Normal => self.handle_normal_event(&event),
            },
        };

        match action {
            Some(action) => self.dispatch(action, out),
            None => false,
        }
    }

    fn handle_fullscreen_event(&mut self, event: &TuiEvent) -> Option<Action> {
        if matches!(event, TuiEvent::Escape) {
            return Some(Action::ExitFullscreen);
        }
        let panel = self.prompter.surfaces().get(SurfaceId::Overlay)?;
        let control = ControlPanelView::new(panel, &mut self.tui.overlay_controls, true)
            .handle_event(event)?;
        Some(self.control_action(control, SurfaceId::Overlay))
    }

    fn handle_normal_event(&mut self, event: &TuiEvent) -> Option<Action> {
        if matches!(event, TuiEvent::SwitchFocus) {
            self.tui.focus = self.tui.focus.next();
            return None;
        }

        match self.tui.focus {
            Focus::Editor => {
                // ContentChanged only needs the redraw that follows every event
                self.tui.editor.handle_event(event);
                None
            }
            Focus::Controls => {
                let panel = self.prompter.surfaces().get(SurfaceId::Main)?;
                let control = ControlPanelView::new(panel, &mut self.tui.main_controls, true)
                    .handle_event(event)?;
                Some(self.control_action(control, SurfaceId::Main))
            }
        }
    }
}

pub fn run(
    config: ResolvedConfig,
    initial_script: String,
    start_fullscreen: bool,
) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let size = terminal.size()?;

    let mut session = Session {
        prompter: Prompter::from_config(&config),
        tui: TuiState::new(initial_script.clone(), config.cell_height_px),
        native: NativeFullscreen::from_names(TerminalInfo::from_env(), &config.fullscreen_methods),
        watch: ResizeWatch::new(),
        screen: Rect::new(0, 0, size.width, size.height),
    };
    let mut out = stdout();

    let frame_interval = Duration::from_millis(config.frame_interval_ms.max(1));
    let clock = Instant::now();

    let geometry = ui::measure(
        session.screen,
        DisplayMode::Normal,
        &initial_script,
        session.prompter.state.font_size,
        config.cell_height_px,
    );
    session.dispatch(
        Action::UpdateText {
            text: initial_script,
            geometry,
        },
        &mut out,
    );
    if start_fullscreen {
        let geometry = session.measure(DisplayMode::Fullscreen);
        session.dispatch(Action::ToggleFullscreen(geometry), &mut out);
    }

    let mut needs_redraw = true; // Force first frame

    loop {
        if session.prompter.frame_requested() {
            let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
            session.dispatch(Action::Frame(now_ms), &mut out);
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &session.prompter, &mut session.tui))?;
            needs_redraw = false;
        }

        let timeout = if session.prompter.frame_requested() {
            frame_interval
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if session.handle_event(event, &mut out) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    // Leave the window the way we found it
    session.native.exit(&mut out);

    ratatui::restore();
    Ok(())
}
