//! # Control Surfaces
//!
//! Every adjustable setting appears on more than one panel: the main controls
//! and the fullscreen overlay. The store is the single source of truth and
//! [`SurfaceSync::broadcast`] rewrites every registered panel after each
//! write, so a value changed on one panel shows up on all of them before the
//! next draw.
//!
//! ```text
//!   Overlay slider ──┐                        ┌──▶ Main panel
//!                    ├──▶ PresentationState ──┤
//!   Main slider ─────┘       (clamped)        └──▶ Overlay panel
//! ```

use serde::{Deserialize, Serialize};

use crate::core::state::PresentationState;

/// Identifies a control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// The panel shown in the normal layout.
    Main,
    /// The secondary panel shown over the text in fullscreen mode.
    Overlay,
}

/// Bounds and step for a numeric slider.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Value one step above (`steps > 0`) or below (`steps < 0`), clamped.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        self.clamp(value + self.step * f64::from(steps))
    }
}

pub const DEFAULT_SPEED_RANGE: SliderRange = SliderRange::new(0.5, 10.0, 0.5);
pub const DEFAULT_FONT_RANGE: SliderRange = SliderRange::new(20.0, 100.0, 2.0);

/// A numeric slider as displayed by one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub range: SliderRange,
    pub value: f64,
}

impl Slider {
    pub fn new(range: SliderRange, value: f64) -> Self {
        Self {
            range,
            value: range.clamp(value),
        }
    }

    /// Text shown next to the slider.
    pub fn label(&self) -> String {
        format_value(self.value)
    }

    /// Position of the handle in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        let span = self.range.max - self.range.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.range.min) / span).clamp(0.0, 1.0)
    }
}

/// Format a slider value without a trailing `.0` for whole numbers.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Displayed state of one control surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub id: SurfaceId,
    pub speed: Slider,
    pub font_size: Slider,
    pub mirrored: bool,
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl ControlPanel {
    pub fn new(id: SurfaceId, speed_range: SliderRange, font_range: SliderRange) -> Self {
        Self {
            id,
            speed: Slider::new(speed_range, speed_range.min),
            font_size: Slider::new(font_range, font_range.min),
            mirrored: false,
            start_enabled: true,
            stop_enabled: false,
        }
    }

    /// Overwrite every displayed value from the store.
    pub fn sync(&mut self, state: &PresentationState) {
        self.speed.value = state.scroll_speed;
        self.font_size.value = state.font_size;
        self.mirrored = state.mirrored;
        self.start_enabled = !state.is_scrolling;
        self.stop_enabled = state.is_scrolling;
    }
}

/// The set of registered surfaces, kept in step with the store.
#[derive(Debug, Clone)]
pub struct SurfaceSync {
    speed_range: SliderRange,
    font_range: SliderRange,
    panels: Vec<ControlPanel>,
}

impl SurfaceSync {
    pub fn new(speed_range: SliderRange, font_range: SliderRange) -> Self {
        Self {
            speed_range,
            font_range,
            panels: Vec::new(),
        }
    }

    pub fn speed_range(&self) -> SliderRange {
        self.speed_range
    }

    pub fn font_range(&self) -> SliderRange {
        self.font_range
    }

    /// Add a surface, initialised from the current store. Registering an id
    /// twice keeps the existing panel.
    pub fn register(&mut self, id: SurfaceId, state: &PresentationState) {
        if self.get(id).is_some() {
            return;
        }
        let mut panel = ControlPanel::new(id, self.speed_range, self.font_range);
        panel.sync(state);
        self.panels.push(panel);
    }

    /// Push the store's values to every surface.
    pub fn broadcast(&mut self, state: &PresentationState) {
        for panel in &mut self.panels {
            panel.sync(state);
        }
    }

    pub fn get(&self, id: SurfaceId) -> Option<&ControlPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panels(&self) -> &[ControlPanel] {
        &self.panels
    }

    /// Whether every surface shows what the store holds.
    pub fn in_sync_with(&self, state: &PresentationState) -> bool {
        self.panels.iter().all(|p| {
            p.speed.value == state.scroll_speed
                && p.font_size.value == state.font_size
                && p.mirrored == state.mirrored
                && p.start_enabled != state.is_scrolling
                && p.stop_enabled == state.is_scrolling
        })
    }
}
