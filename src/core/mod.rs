//! # Core Application Logic
//!
//! This module contains Prompter's teleprompter logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (store)        │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Animator, Surfaces,  │
//!                    │    Fullscreen, Script   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │  Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `PresentationState` and the `Prompter` controller that owns it
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`animator`]: Time-based scroll pass with an explicit frame-request guard
//! - [`controls`]: Control surfaces kept in sync by broadcast
//! - [`fullscreen`]: Presentation mode state machine
//! - [`script`]: Raw text to display lines
//! - [`config`]: Layered configuration

pub mod action;
pub mod animator;
pub mod config;
pub mod controls;
pub mod fullscreen;
pub mod script;
pub mod state;
