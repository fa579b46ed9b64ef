//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::animator::PassGeometry;
use crate::core::config::ResolvedConfig;
use crate::core::state::Prompter;

/// Creates a Prompter with default settings.
pub fn test_prompter() -> Prompter {
    Prompter::from_config(&ResolvedConfig::default())
}

/// Shorthand for a pass geometry in pixels.
pub fn geometry(container_height: f64, text_height: f64) -> PassGeometry {
    PassGeometry {
        container_height,
        text_height,
    }
}
