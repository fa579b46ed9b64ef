//! # Native Fullscreen
//!
//! Terminal emulators expose window control through escape sequences, and
//! support varies. `NativeFullscreen` holds an ordered list of methods and
//! uses the first one the current terminal supports, remembering which one
//! it engaged so the matching exit sequence is sent later.
//!
//! Terminals send no "fullscreen changed" notification. `ResizeWatch`
//! derives one: once fullscreen is engaged it tracks the largest size seen,
//! and a resize that shrinks the window below that peak means the user left
//! fullscreen outside the app (window manager shortcut, emulator menu).

use log::{debug, info, warn};
use std::io::{self, Write};

/// What the running terminal says about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalInfo {
    pub term: Option<String>,
    pub term_program: Option<String>,
}

impl TerminalInfo {
    pub fn from_env() -> Self {
        Self {
            term: std::env::var("TERM").ok(),
            term_program: std::env::var("TERM_PROGRAM").ok(),
        }
    }

    fn term_starts_with(&self, prefix: &str) -> bool {
        self.term.as_deref().is_some_and(|t| t.starts_with(prefix))
    }

    fn is_apple_terminal(&self) -> bool {
        self.term_program.as_deref() == Some("Apple_Terminal")
    }
}

/// One way of asking the terminal window to go fullscreen.
pub trait FullscreenMethod {
    /// Name used in the config file's `[fullscreen] methods` list.
    fn name(&self) -> &'static str;
    fn is_supported(&self, terminal: &TerminalInfo) -> bool;
    fn request(&self, out: &mut dyn Write) -> io::Result<()>;
    fn exit(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// xterm window operation 10: full-screen on/off.
pub struct XtermFullscreen;

impl FullscreenMethod for XtermFullscreen {
    fn name(&self) -> &'static str {
        "xterm-fullscreen"
    }

    fn is_supported(&self, terminal: &TerminalInfo) -> bool {
        terminal.term_starts_with("xterm") && !terminal.is_apple_terminal()
    }

    fn request(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"\x1b[10;1t")?;
        out.flush()
    }

    fn exit(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"\x1b[10;0t")?;
        out.flush()
    }
}

/// xterm window operation 9: maximize/restore.
pub struct XtermMaximize;

impl FullscreenMethod for XtermMaximize {
    fn name(&self) -> &'static str {
        "xterm-maximize"
    }

    fn is_supported(&self, terminal: &TerminalInfo) -> bool {
        terminal.term_starts_with("xterm") || terminal.term_starts_with("rxvt")
    }

    fn request(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"\x1b[9;1t")?;
        out.flush()
    }

    fn exit(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"\x1b[9;0t")?;
        out.flush()
    }
}

/// Look up a built-in method by its config name.
pub fn method_by_name(name: &str) -> Option<Box<dyn FullscreenMethod>> {
    match name {
        "xterm-fullscreen" => Some(Box::new(XtermFullscreen)),
        "xterm-maximize" => Some(Box::new(XtermMaximize)),
        _ => None,
    }
}

pub struct NativeFullscreen {
    terminal: TerminalInfo,
    methods: Vec<Box<dyn FullscreenMethod>>,
    /// Index of the method that was engaged, if any.
    active: Option<usize>,
}

impl NativeFullscreen {
    pub fn new(terminal: TerminalInfo, methods: Vec<Box<dyn FullscreenMethod>>) -> Self {
        Self {
            terminal,
            methods,
            active: None,
        }
    }

    /// Build the fallback list from config names, skipping unknown ones.
    pub fn from_names(terminal: TerminalInfo, names: &[String]) -> Self {
        let methods = names
            .iter()
            .filter_map(|name| {
                let method = method_by_name(name);
                if method.is_none() {
                    warn!("Unknown fullscreen method '{}', skipping", name);
                }
                method
            })
            .collect();
        Self::new(terminal, methods)
    }

    /// Name of the method currently engaged.
    pub fn active_method(&self) -> Option<&'static str> {
        self.active.map(|i| self.methods[i].name())
    }

    /// Try the methods in order and use the first supported one.
    ///
    /// Returns `true` if a method was engaged. Unsupported terminals and
    /// write failures leave the window as it was.
    pub fn request(&mut self, out: &mut dyn Write) -> bool {
        if self.active.is_some() {
            return true;
        }

        let Some(index) = self
            .methods
            .iter()
            .position(|m| m.is_supported(&self.terminal))
        else {
            info!("No supported fullscreen method for {:?}", self.terminal);
            return false;
        };

        let method = &self.methods[index];
        match method.request(out) {
            Ok(()) => {
                info!("Fullscreen requested via {}", method.name());
                self.active = Some(index);
                true
            }
            Err(e) => {
                warn!("Fullscreen request via {} failed: {}", method.name(), e);
                false
            }
        }
    }

    /// Undo the engaged method, if any.
    pub fn exit(&mut self, out: &mut dyn Write) {
        let Some(index) = self.active.take() else {
            debug!("Fullscreen exit skipped: nothing engaged");
            return;
        };
        let method = &self.methods[index];
        if let Err(e) = method.exit(out) {
            warn!("Fullscreen exit via {} failed: {}", method.name(), e);
        }
    }

    /// Forget the engaged method after the platform left fullscreen by itself.
    pub fn release(&mut self) {
        self.active = None;
    }
}

/// Detects a fullscreen window shrinking back to normal size.
#[derive(Debug, Default)]
pub struct ResizeWatch {
    peak: Option<(u16, u16)>,
}

impl ResizeWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching from the current size.
    pub fn arm(&mut self, size: (u16, u16)) {
        self.peak = Some(size);
    }

    pub fn disarm(&mut self) {
        self.peak = None;
    }

    pub fn is_armed(&self) -> bool {
        self.peak.is_some()
    }

    /// Feed a resize. Returns `Some(false)` when the window shrank below its
    /// peak (fullscreen ended), `Some(true)` otherwise while armed.
    pub fn observe(&mut self, size: (u16, u16)) -> Option<bool> {
        let peak = self.peak.as_mut()?;
        if size.0 < peak.0 || size.1 < peak.1 {
            debug!("Window shrank from {:?} to {:?}", peak, size);
            self.peak = None;
            return Some(false);
        }
        *peak = size;
        Some(true)
    }
}
