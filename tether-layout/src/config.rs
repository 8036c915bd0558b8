//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Options for a [`LayoutEngine`](crate::engine::LayoutEngine).
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reject frames with a negative width or height after layout instead of
    /// clamping them to zero.
    pub strict_geometry: bool,
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            strict_geometry: true,
        }
    }
}
