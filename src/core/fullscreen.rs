//! # Fullscreen Mode
//!
//! Tracks the presentation mode and decides when the platform has to be
//! asked to enter or leave native fullscreen. The platform calls themselves
//! are returned as decisions and carried out by the adapter layer.
//!
//! ```text
//!            enter()
//!   Normal ──────────────▶ Fullscreen     (RequestNative, start listening)
//!          ◀──────────────
//!            exit()          → ExitNative if native fullscreen was engaged
//!            platform_changed(false) → no platform call, it already left
//! ```

use log::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Normal,
    Fullscreen,
}

/// What the platform layer must do after a mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCall {
    None,
    RequestNative,
    ExitNative,
}

#[derive(Debug, Default)]
pub struct FullscreenAdapter {
    mode: DisplayMode,
    /// Whether platform change notifications are being handled.
    listening: bool,
    /// Whether a native fullscreen method actually took effect.
    native_engaged: bool,
}

impl FullscreenAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode == DisplayMode::Fullscreen
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Switch to presentation mode. Returns `PlatformCall::None` if already there.
    pub fn enter(&mut self) -> PlatformCall {
        if self.is_fullscreen() {
            return PlatformCall::None;
        }
        self.mode = DisplayMode::Fullscreen;
        self.listening = true;
        info!("Entering fullscreen mode");
        PlatformCall::RequestNative
    }

    /// Record whether the platform honoured the native request.
    pub fn set_native_engaged(&mut self, engaged: bool) {
        self.native_engaged = engaged && self.is_fullscreen();
    }

    /// Leave presentation mode at the user's request.
    pub fn exit(&mut self) -> PlatformCall {
        if !self.is_fullscreen() {
            return PlatformCall::None;
        }
        let call = if self.native_engaged {
            PlatformCall::ExitNative
        } else {
            PlatformCall::None
        };
        self.leave();
        info!("Exited fullscreen mode");
        call
    }

    /// Handle a platform change notification.
    ///
    /// Returns `true` if the notification ended fullscreen mode. The platform
    /// has already left fullscreen in that case, so no exit call is made.
    pub fn platform_changed(&mut self, platform_fullscreen: bool) -> bool {
        if !self.listening {
            debug!("Fullscreen change ignored: not listening");
            return false;
        }
        if platform_fullscreen || !self.is_fullscreen() {
            return false;
        }
        self.leave();
        info!("Fullscreen ended by the platform");
        true
    }

    fn leave(&mut self) {
        self.mode = DisplayMode::Normal;
        self.listening = false;
        self.native_engaged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_requests_native_and_listens() {
        let mut adapter = FullscreenAdapter::new();
        assert_eq!(adapter.enter(), PlatformCall::RequestNative);
        assert!(adapter.is_fullscreen());
        assert!(adapter.is_listening());
    }

    #[test]
    fn test_enter_twice_is_noop() {
        let mut adapter = FullscreenAdapter::new();
        adapter.enter();
        assert_eq!(adapter.enter(), PlatformCall::None);
        assert!(adapter.is_fullscreen());
    }

    #[test]
    fn test_exit_calls_platform_only_when_engaged() {
        let mut adapter = FullscreenAdapter::new();
        adapter.enter();
        adapter.set_native_engaged(true);
        assert_eq!(adapter.exit(), PlatformCall::ExitNative);
        assert_eq!(adapter.mode(), DisplayMode::Normal);
        assert!(!adapter.is_listening());

        adapter.enter();
        adapter.set_native_engaged(false);
        assert_eq!(adapter.exit(), PlatformCall::None);
        assert_eq!(adapter.mode(), DisplayMode::Normal);
    }

    #[test]
    fn test_exit_when_normal_is_noop() {
        let mut adapter = FullscreenAdapter::new();
        assert_eq!(adapter.exit(), PlatformCall::None);
        assert_eq!(adapter.mode(), DisplayMode::Normal);
    }

    #[test]
    fn test_platform_exit_matches_explicit_exit() {
        let mut explicit = FullscreenAdapter::new();
        explicit.enter();
        explicit.set_native_engaged(true);
        explicit.exit();

        let mut external = FullscreenAdapter::new();
        external.enter();
        external.set_native_engaged(true);
        assert!(external.platform_changed(false));

        assert_eq!(explicit.mode(), external.mode());
        assert_eq!(explicit.is_listening(), external.is_listening());
        // A later explicit exit has nothing left to undo
        assert_eq!(external.exit(), PlatformCall::None);
    }

    #[test]
    fn test_platform_change_ignored_when_not_listening() {
        let mut adapter = FullscreenAdapter::new();
        assert!(!adapter.platform_changed(false));
        assert_eq!(adapter.mode(), DisplayMode::Normal);
    }

    #[test]
    fn test_platform_still_fullscreen_keeps_mode() {
        let mut adapter = FullscreenAdapter::new();
        adapter.enter();
        assert!(!adapter.platform_changed(true));
        assert!(adapter.is_fullscreen());
        assert!(adapter.is_listening());
    }

    #[test]
    fn test_native_engaged_ignored_in_normal_mode() {
        let mut adapter = FullscreenAdapter::new();
        adapter.set_native_engaged(true);
        adapter.enter();
        assert_eq!(adapter.exit(), PlatformCall::None);
    }
}
