//! # Actions
//!
//! Everything that can happen in Prompter becomes an `Action`.
//! User presses Start? That's `Action::Start(geometry)`.
//! The event loop owes the animator a frame? That's `Action::Frame(now_ms)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter must
//! perform. No side effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Layout measurements come in with the action that needs them, so the core
//! never asks the UI anything.

use log::debug;

use crate::core::animator::{FrameOutcome, PassGeometry};
use crate::core::controls::SurfaceId;
use crate::core::fullscreen::PlatformCall;
use crate::core::state::Prompter;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Apply the editor text to the display and reset the scroll position.
    UpdateText { text: String, geometry: PassGeometry },
    /// A speed slider on `from` moved to `value`.
    SetSpeed { from: SurfaceId, value: f64 },
    /// A font size slider on `from` moved to `value`.
    SetFontSize { from: SurfaceId, value: f64 },
    /// The mirror checkbox on `from` changed.
    SetMirrored { from: SurfaceId, value: bool },
    /// Begin a scroll pass with the given layout.
    Start(PassGeometry),
    Stop,
    /// Enter fullscreen (starting a pass with the fullscreen layout) or leave it.
    ToggleFullscreen(PassGeometry),
    /// Leave fullscreen at the user's request.
    ExitFullscreen,
    /// Whether a native fullscreen method took effect after a request.
    NativeFullscreen { engaged: bool },
    /// The platform reported a fullscreen change.
    FullscreenChanged { platform_fullscreen: bool },
    /// The view was resized.
    Resize(PassGeometry),
    /// Animation frame at a monotonic timestamp in milliseconds.
    Frame(f64),
    Quit,
}

/// I/O the adapter performs after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    RequestFullscreen,
    ExitFullscreen,
}

pub fn update(prompter: &mut Prompter, action: Action) -> Effect {
    if !matches!(action, Action::Frame(_)) {
        debug!("update: {:?}", action);
    }

    let effect = match action {
        Action::UpdateText { text, geometry } => {
            prompter.state.script_text = text;
            // A running pass repositions the text on its next frame
            if !prompter.animator.is_scrolling() {
                prompter.animator.reset_position(geometry.container_height);
            }
            prompter.status_message = String::from("Script updated");
            Effect::None
        }
        Action::SetSpeed { from, value } => {
            prompter.state.scroll_speed = prompter.surfaces.speed_range().clamp(value);
            debug!("Speed set to {} from {:?}", prompter.state.scroll_speed, from);
            Effect::None
        }
        Action::SetFontSize { from, value } => {
            prompter.state.font_size = prompter.surfaces.font_range().clamp(value);
            debug!("Font size set to {} from {:?}", prompter.state.font_size, from);
            Effect::None
        }
        Action::SetMirrored { from, value } => {
            prompter.state.mirrored = value;
            debug!("Mirrored set to {} from {:?}", value, from);
            Effect::None
        }
        Action::Start(geometry) => {
            if prompter.animator.start(geometry, prompter.state.scroll_speed) {
                prompter.status_message = String::from("Scrolling");
            }
            Effect::None
        }
        Action::Stop => {
            if prompter.animator.stop() {
                prompter.status_message = String::from("Stopped");
            }
            Effect::None
        }
        Action::ToggleFullscreen(geometry) => {
            if prompter.fullscreen.is_fullscreen() {
                exit_fullscreen(prompter)
            } else {
                let call = prompter.fullscreen.enter();
                prompter.animator.start(geometry, prompter.state.scroll_speed);
                prompter.status_message = String::from("Fullscreen");
                platform_effect(call)
            }
        }
        Action::ExitFullscreen => exit_fullscreen(prompter),
        Action::NativeFullscreen { engaged } => {
            prompter.fullscreen.set_native_engaged(engaged);
            Effect::None
        }
        Action::FullscreenChanged {
            platform_fullscreen,
        } => {
            if prompter.fullscreen.platform_changed(platform_fullscreen) {
                prompter.status_message = String::from("Left fullscreen");
            }
            Effect::None
        }
        Action::Resize(geometry) => {
            if !prompter.animator.is_scrolling() {
                prompter.animator.reset_position(geometry.container_height);
            }
            Effect::None
        }
        Action::Frame(now_ms) => {
            let outcome =
                prompter
                    .animator
                    .frame(now_ms, prompter.state.scroll_speed, prompter.state.mirrored);
            if outcome == FrameOutcome::Finished {
                prompter.status_message = String::from("Finished");
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    };

    prompter.commit();
    effect
}

fn exit_fullscreen(prompter: &mut Prompter) -> Effect {
    let was_fullscreen = prompter.fullscreen.is_fullscreen();
    let call = prompter.fullscreen.exit();
    if was_fullscreen {
        prompter.status_message = String::from("Left fullscreen");
    }
    platform_effect(call)
}

fn platform_effect(call: PlatformCall) -> Effect {
    match call {
        PlatformCall::None => Effect::None,
        PlatformCall::RequestNative => Effect::RequestFullscreen,
        PlatformCall::ExitNative => Effect::ExitFullscreen,
    }
}
