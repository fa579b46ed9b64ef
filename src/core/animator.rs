//! # Scroll Animator
//!
//! Drives one scroll pass: the text starts fully below the view and moves up
//! until it is fully above it.
//!
//! ```text
//! position(t) = container_height - (t - start_time) * speed * 0.03
//!
//!   container_height ──┐
//!                      │  pass runs while position >= -text_height
//!        -text_height ─┘
//! ```
//!
//! The animator is a cooperative loop. `start()` arms a frame request, each
//! `frame()` consumes it and re-arms it only while the pass continues. The
//! event loop asks [`ScrollAnimator::frame_requested`] to decide whether to
//! deliver another frame, so nothing is scheduled once scrolling stops.

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Converts the speed multiplier into pixels per millisecond.
pub const PIXELS_PER_MS_FACTOR: f64 = 0.03;

/// When the scroll speed is read during a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSampling {
    /// Re-read every frame; a change re-anchors the pass at the current position.
    #[default]
    Live,
    /// Read once when the pass starts; changes apply to the next pass.
    AtStart,
}

/// The visual transform applied to the text block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    /// Vertical translation in pixels, relative to the top of the view.
    pub translate_y: f64,
    /// Horizontal flip for teleprompter glass.
    pub flip_x: bool,
}

/// Result of delivering one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The pass continues; the transform should be applied.
    Continue(Transform),
    /// The pass just completed. The text stays where the last frame put it.
    Finished,
    /// No pass is running; the frame was ignored.
    Idle,
}

/// Layout measurements captured once when a pass starts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassGeometry {
    pub container_height: f64,
    pub text_height: f64,
}

/// Where the current pass is measured from. Moves only when live speed changes.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    time: f64,
    position: f64,
    speed: f64,
}

pub struct ScrollAnimator {
    sampling: SpeedSampling,
    geometry: PassGeometry,
    is_scrolling: bool,
    frame_requested: bool,
    /// Speed captured by `start()`, used until the first frame anchors the pass.
    start_speed: f64,
    anchor: Option<Anchor>,
    /// Last applied vertical translation.
    position: f64,
}

impl ScrollAnimator {
    pub fn new(sampling: SpeedSampling) -> Self {
        Self {
            sampling,
            geometry: PassGeometry::default(),
            is_scrolling: false,
            frame_requested: false,
            start_speed: 0.0,
            anchor: None,
            position: 0.0,
        }
    }

    pub fn sampling(&self) -> SpeedSampling {
        self.sampling
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Whether the event loop owes the animator a frame.
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn geometry(&self) -> PassGeometry {
        self.geometry
    }

    /// Begin a scroll pass. Returns `false` (and changes nothing) if a pass is
    /// already running.
    pub fn start(&mut self, geometry: PassGeometry, speed: f64) -> bool {
        if self.is_scrolling {
            debug!("start ignored: already scrolling");
            return false;
        }

        self.geometry = geometry;
        self.start_speed = speed;
        self.anchor = None;
        self.position = geometry.container_height;
        self.is_scrolling = true;
        self.frame_requested = true;

        info!(
            "Scroll pass started (container={}px, text={}px, speed={})",
            geometry.container_height, geometry.text_height, speed
        );
        true
    }

    /// Halt the pass. Returns `false` if nothing was running.
    pub fn stop(&mut self) -> bool {
        if !self.is_scrolling {
            return false;
        }
        self.is_scrolling = false;
        self.frame_requested = false;
        self.anchor = None;
        info!("Scroll pass stopped at {:.1}px", self.position);
        true
    }

    /// Place the text fully below the view without starting a pass.
    pub fn reset_position(&mut self, container_height: f64) {
        self.position = container_height;
    }

    /// Deliver one frame at `timestamp_ms` (monotonic milliseconds).
    ///
    /// `speed` is the store's current speed; it only matters in
    /// [`SpeedSampling::Live`] mode once the pass is running.
    pub fn frame(&mut self, timestamp_ms: f64, speed: f64, mirrored: bool) -> FrameOutcome {
        if !self.is_scrolling || !self.frame_requested {
            return FrameOutcome::Idle;
        }
        self.frame_requested = false;

        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let anchor = Anchor {
                    time: timestamp_ms,
                    position: self.geometry.container_height,
                    speed: self.start_speed,
                };
                self.anchor = Some(anchor);
                anchor
            }
        };

        let anchor = match self.sampling {
            SpeedSampling::Live if speed != anchor.speed => self.reanchor(timestamp_ms, speed),
            _ => anchor,
        };

        let elapsed = timestamp_ms - anchor.time;
        let position = anchor.position - elapsed * anchor.speed * PIXELS_PER_MS_FACTOR;

        if position < -self.geometry.text_height {
            self.stop();
            return FrameOutcome::Finished;
        }

        self.position = position;
        self.frame_requested = true;
        FrameOutcome::Continue(Transform {
            translate_y: position,
            flip_x: mirrored,
        })
    }

    /// Continue the pass from the last applied position at a new speed.
    fn reanchor(&mut self, timestamp_ms: f64, speed: f64) -> Anchor {
        debug!("Speed changed mid-pass: re-anchoring at {:.1}px", self.position);
        let anchor = Anchor {
            time: timestamp_ms,
            position: self.position,
            speed,
        };
        self.anchor = Some(anchor);
        anchor
    }
}

/// Expected length of a full pass in milliseconds.
pub fn pass_duration_ms(geometry: PassGeometry, speed: f64) -> f64 {
    let pixels_per_ms = speed * PIXELS_PER_MS_FACTOR;
    if pixels_per_ms <= 0.0 {
        return f64::INFINITY;
    }
    (geometry.container_height + geometry.text_height) / pixels_per_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 16.0;

    fn geometry(container: f64, text: f64) -> PassGeometry {
        PassGeometry {
            container_height: container,
            text_height: text,
        }
    }

    /// Run frames until the pass finishes, returning the timestamp of the
    /// finishing frame relative to the first frame.
    fn run_to_completion(animator: &mut ScrollAnimator, speed: f64) -> f64 {
        let mut now = 1_000.0;
        let first = now;
        loop {
            match animator.frame(now, speed, false) {
                FrameOutcome::Continue(_) => now += FRAME_MS,
                FrameOutcome::Finished => return now - first,
                FrameOutcome::Idle => panic!("animator went idle mid-pass"),
            }
        }
    }

    #[test]
    fn test_start_places_text_below_view() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        assert!(animator.start(geometry(500.0, 1000.0), 2.0));
        assert_eq!(animator.position(), 500.0);
        assert!(animator.is_scrolling());
        assert!(animator.frame_requested());
    }

    #[test]
    fn test_double_start_keeps_single_loop() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        assert!(animator.start(geometry(500.0, 1000.0), 2.0));
        let _ = animator.frame(0.0, 2.0, false);
        let _ = animator.frame(100.0, 2.0, false);
        let position = animator.position();

        assert!(!animator.start(geometry(900.0, 10.0), 5.0));
        // Second start neither resets the pass nor changes its geometry
        assert_eq!(animator.position(), position);
        assert_eq!(animator.geometry(), geometry(500.0, 1000.0));
        assert!(animator.frame_requested());
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        assert!(!animator.stop());
        assert!(!animator.is_scrolling());
        assert!(!animator.frame_requested());
    }

    #[test]
    fn test_no_frame_requested_after_stop() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(geometry(500.0, 100.0), 2.0);
        assert!(animator.stop());
        assert!(!animator.frame_requested());
        assert_eq!(animator.frame(50.0, 2.0, false), FrameOutcome::Idle);
    }

    #[test]
    fn test_position_formula() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(geometry(500.0, 1000.0), 2.0);

        // First frame anchors the pass: nothing has elapsed yet
        let first = animator.frame(100.0, 2.0, false);
        assert_eq!(
            first,
            FrameOutcome::Continue(Transform {
                translate_y: 500.0,
                flip_x: false
            })
        );

        // 1000ms later at 0.06 px/ms -> 60px up
        match animator.frame(1_100.0, 2.0, false) {
            FrameOutcome::Continue(t) => assert!((t.translate_y - 440.0).abs() < 1e-9),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_pass_duration_example() {
        let g = geometry(500.0, 1000.0);
        assert!((pass_duration_ms(g, 2.0) - 25_000.0).abs() < 1e-6);

        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(g, 2.0);
        let elapsed = run_to_completion(&mut animator, 2.0);
        assert!(
            (elapsed - 25_000.0).abs() <= FRAME_MS,
            "elapsed {} not within one frame of 25000",
            elapsed
        );
        assert!(!animator.is_scrolling());
        assert!(!animator.frame_requested());
    }

    #[test]
    fn test_finish_leaves_text_where_it_landed() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(geometry(100.0, 50.0), 2.0);
        let _ = run_to_completion(&mut animator, 2.0);
        // Last applied position is still within the pass, not snapped past it
        assert!(animator.position() >= -50.0);
        assert!(animator.position() < 0.0);
    }

    #[test]
    fn test_zero_layout_finishes_immediately() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(geometry(0.0, 0.0), 2.0);
        assert!(matches!(animator.frame(0.0, 2.0, false), FrameOutcome::Continue(_)));
        assert_eq!(animator.frame(FRAME_MS, 2.0, false), FrameOutcome::Finished);
    }

    #[test]
    fn test_mirror_toggle_changes_only_flip() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(geometry(500.0, 1000.0), 2.0);
        let _ = animator.frame(0.0, 2.0, false);

        // Two animators in lockstep, one toggled to mirrored at the same frame
        let mut twin = ScrollAnimator::new(SpeedSampling::Live);
        twin.start(geometry(500.0, 1000.0), 2.0);
        let _ = twin.frame(0.0, 2.0, false);

        let plain = animator.frame(500.0, 2.0, false);
        let flipped = twin.frame(500.0, 2.0, true);
        match (plain, flipped) {
            (FrameOutcome::Continue(a), FrameOutcome::Continue(b)) => {
                assert_eq!(a.translate_y, b.translate_y);
                assert!(!a.flip_x);
                assert!(b.flip_x);
            }
            other => panic!("unexpected outcomes {:?}", other),
        }
    }

    #[test]
    fn test_live_speed_change_reanchors_without_jump() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.start(geometry(500.0, 1000.0), 2.0);
        let _ = animator.frame(0.0, 2.0, false);
        let _ = animator.frame(1_000.0, 2.0, false);
        assert!((animator.position() - 440.0).abs() < 1e-9);

        // Speed doubles: the next frame continues from 440 at 0.12 px/ms
        match animator.frame(1_000.0, 4.0, false) {
            FrameOutcome::Continue(t) => assert!((t.translate_y - 440.0).abs() < 1e-9),
            other => panic!("unexpected outcome {:?}", other),
        }
        match animator.frame(2_000.0, 4.0, false) {
            FrameOutcome::Continue(t) => assert!((t.translate_y - 320.0).abs() < 1e-9),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_at_start_sampling_ignores_mid_pass_change() {
        let mut animator = ScrollAnimator::new(SpeedSampling::AtStart);
        animator.start(geometry(500.0, 1000.0), 2.0);
        let _ = animator.frame(0.0, 2.0, false);
        match animator.frame(1_000.0, 9.0, false) {
            FrameOutcome::Continue(t) => assert!((t.translate_y - 440.0).abs() < 1e-9),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_reset_position() {
        let mut animator = ScrollAnimator::new(SpeedSampling::Live);
        animator.reset_position(320.0);
        assert_eq!(animator.position(), 320.0);
        assert!(!animator.is_scrolling());
    }
}
