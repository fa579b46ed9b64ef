//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Status line in the normal layout
//! - `PrompterView`: The script at the current scroll transform
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ScriptEditor`: Multi-line script text input
//! - `ControlPanelView`: One control surface over its persisted selection state
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests. Components receive external data as props and
//! never reach into the store directly.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Status line)
//! ├── prompter_view.rs  (Scrolling script display)
//! ├── control_panel.rs  (Main panel and fullscreen overlay bar)
//! └── script_editor/    (Script text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod control_panel;
pub mod prompter_view;
pub mod script_editor;
pub use control_panel::{ControlEvent, ControlPanelState, ControlPanelView};
pub use prompter_view::{PrompterView, layout_rows, line_pitch, text_height_px};
pub use script_editor::{EditorEvent, ScriptEditor};
