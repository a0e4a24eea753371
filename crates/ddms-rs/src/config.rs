// crates/ddms-rs/src/config.rs

//! Rendering configuration.

use serde::{Deserialize, Serialize};

/// Controls XML output layout. Never changes semantic content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Emit newlines and indentation between elements.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

impl RenderOptions {
    /// Indented output with the default width.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}
