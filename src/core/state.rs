//! # Application State
//!
//! Core state for Prompter. Domain logic only, no TUI types.
//!
//! ```text
//! Prompter
//! ├── state: PresentationState      // the single source of truth
//! │   ├── script_text               // last applied script
//! │   ├── scroll_speed              // speed multiplier
//! │   ├── font_size                 // px
//! │   ├── mirrored                  // horizontal flip
//! │   ├── is_scrolling              // pass running
//! │   ├── is_fullscreen             // presentation mode
//! │   └── position                  // applied vertical translation (px)
//! ├── animator: ScrollAnimator      // pass lifecycle + frame requests
//! ├── surfaces: SurfaceSync         // main panel + fullscreen overlay
//! ├── fullscreen: FullscreenAdapter // presentation mode state machine
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(prompter, action)` in action.rs.
//! After every action the animator's view of the pass is committed to the
//! store and broadcast to all control surfaces.

use crate::core::animator::{ScrollAnimator, SpeedSampling, Transform};
use crate::core::config::ResolvedConfig;
use crate::core::controls::{SliderRange, SurfaceId, SurfaceSync};
use crate::core::fullscreen::{DisplayMode, FullscreenAdapter};

pub const DEFAULT_SCROLL_SPEED: f64 = 2.0;
pub const DEFAULT_FONT_SIZE: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    pub script_text: String,
    /// Pixels-per-millisecond multiplier, always > 0.
    pub scroll_speed: f64,
    /// Display font size in px, always > 0.
    pub font_size: f64,
    pub mirrored: bool,
    pub is_scrolling: bool,
    pub is_fullscreen: bool,
    /// Vertical translation of the text block in px.
    pub position: f64,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            script_text: String::new(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
            font_size: DEFAULT_FONT_SIZE,
            mirrored: false,
            is_scrolling: false,
            is_fullscreen: false,
            position: 0.0,
        }
    }
}

pub struct Prompter {
    pub state: PresentationState,
    pub(crate) animator: ScrollAnimator,
    pub(crate) surfaces: SurfaceSync,
    pub(crate) fullscreen: FullscreenAdapter,
    pub status_message: String,
}

impl Prompter {
    pub fn new(
        sampling: SpeedSampling,
        speed_range: SliderRange,
        font_range: SliderRange,
    ) -> Self {
        let state = PresentationState {
            scroll_speed: speed_range.clamp(DEFAULT_SCROLL_SPEED),
            font_size: font_range.clamp(DEFAULT_FONT_SIZE),
            ..PresentationState::default()
        };

        let mut surfaces = SurfaceSync::new(speed_range, font_range);
        surfaces.register(SurfaceId::Main, &state);
        surfaces.register(SurfaceId::Overlay, &state);

        Self {
            state,
            animator: ScrollAnimator::new(sampling),
            surfaces,
            fullscreen: FullscreenAdapter::new(),
            status_message: String::from("Ready"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut prompter = Self::new(
            config.speed_sampling,
            config.speed_range,
            config.font_range,
        );
        prompter.state.scroll_speed = config.speed_range.clamp(config.speed);
        prompter.state.font_size = config.font_range.clamp(config.font_size);
        prompter.state.mirrored = config.mirrored;
        prompter.surfaces.broadcast(&prompter.state);
        prompter
    }

    /// Whether the event loop should deliver an animation frame.
    pub fn frame_requested(&self) -> bool {
        self.animator.frame_requested()
    }

    pub fn mode(&self) -> DisplayMode {
        self.fullscreen.mode()
    }

    pub fn surfaces(&self) -> &SurfaceSync {
        &self.surfaces
    }

    /// Transform to draw the text with right now.
    pub fn transform(&self) -> Transform {
        Transform {
            translate_y: self.state.position,
            flip_x: self.state.mirrored,
        }
    }

    /// Copy the animator and mode flags into the store and refresh every
    /// surface.
    pub(crate) fn commit(&mut self) {
        self.state.is_scrolling = self.animator.is_scrolling();
        self.state.position = self.animator.position();
        self.state.is_fullscreen = self.fullscreen.is_fullscreen();
        self.surfaces.broadcast(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controls::{DEFAULT_FONT_RANGE, DEFAULT_SPEED_RANGE};
    use crate::test_support::test_prompter;

    #[test]
    fn test_prompter_new_defaults() {
        let prompter = test_prompter();
        assert_eq!(prompter.state.scroll_speed, 2.0);
        assert_eq!(prompter.state.font_size, 40.0);
        assert!(!prompter.state.mirrored);
        assert!(!prompter.state.is_scrolling);
        assert!(!prompter.state.is_fullscreen);
        assert!(prompter.state.script_text.is_empty());
        assert_eq!(prompter.status_message, "Ready");
        assert!(!prompter.frame_requested());
    }

    #[test]
    fn test_both_surfaces_registered_in_sync() {
        let prompter = test_prompter();
        assert!(prompter.surfaces().get(SurfaceId::Main).is_some());
        assert!(prompter.surfaces().get(SurfaceId::Overlay).is_some());
        assert!(prompter.surfaces().in_sync_with(&prompter.state));
    }

    #[test]
    fn test_from_config_clamps_initial_values() {
        let config = ResolvedConfig {
            speed: 50.0,
            font_size: 1.0,
            mirrored: true,
            ..ResolvedConfig::default()
        };
        let prompter = Prompter::from_config(&config);
        assert_eq!(prompter.state.scroll_speed, config.speed_range.max);
        assert_eq!(prompter.state.font_size, config.font_range.min);
        assert!(prompter.state.mirrored);
        assert!(prompter.surfaces().in_sync_with(&prompter.state));
    }

    #[test]
    fn test_transform_follows_mirror_flag() {
        let mut prompter = test_prompter();
        prompter.state.position = 120.0;
        prompter.state.mirrored = true;
        assert_eq!(
            prompter.transform(),
            Transform {
                translate_y: 120.0,
                flip_x: true
            }
        );
    }

    #[test]
    fn test_default_ranges_contain_defaults() {
        assert_eq!(DEFAULT_SPEED_RANGE.clamp(DEFAULT_SCROLL_SPEED), DEFAULT_SCROLL_SPEED);
        assert_eq!(DEFAULT_FONT_RANGE.clamp(DEFAULT_FONT_SIZE), DEFAULT_FONT_SIZE);
    }
}
