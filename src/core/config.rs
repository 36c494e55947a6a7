//! Page-level configuration
//!
//! Every field has a default, so an empty `{}` (or no config at all) yields
//! the stock widgets. The browser build reads it from `window.__guide_config`,
//! the CLI from `--config <file.json>`.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default id of the `<canvas>` element the app mounts onto
pub const DEFAULT_CANVAS_ID: &str = "canvas";

/// Tunables for the background particle mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Number of points, fixed for the lifetime of a mount
    pub node_count: usize,
    /// Pairs closer than this (px) are linked
    pub connection_distance: f32,
    /// Velocity components are drawn from [-max_speed, max_speed) px/frame
    pub max_speed: f32,
    /// Link opacity at distance 0
    pub line_alpha: f32,
    /// Pairs closer than `packet_ratio * connection_distance` carry packets
    pub packet_ratio: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            node_count: 40,
            connection_distance: 150.0,
            max_speed: 0.15,
            line_alpha: 0.15,
            packet_ratio: 0.7,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    pub canvas_id: String,
    pub mesh: MeshConfig,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            mesh: MeshConfig::default(),
        }
    }
}

impl GuideConfig {
    /// Parse a JSON config, falling back to defaults on malformed input.
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid guide config, using defaults");
            Self::default()
        })
    }
}
