//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush settings applied when the engine starts.
///
/// The host can change every value at runtime through the engine setters.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default brush color - a named color (red, green, blue, yellow, orange, pink,
    /// white, black), a hex string like `"#ff8000"`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush width in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Default brush opacity (valid range: 0 - 255)
    #[serde(default = "default_alpha")]
    pub default_alpha: i32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            default_alpha: default_alpha(),
        }
    }
}

/// Render surface settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Surface width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_surface_width")]
    pub width: u32,

    /// Surface height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_surface_height")]
    pub height: u32,

    /// Background fill; omit for a transparent surface
    #[serde(default)]
    pub background: Option<ColorSpec>,

    /// Smooth stroke edges
    #[serde(default = "default_antialias")]
    pub antialias: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
            background: None,
            antialias: default_antialias(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of undoable actions (0 = unlimited). Older actions are
    /// committed to the canvas and can no longer be undone.
    #[serde(default)]
    pub max_depth: usize,
}

/// Pointer input settings.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Skip move events closer than this many pixels to the previous point
    /// (valid range: 0.0 - 50.0, 0 keeps every point)
    #[serde(default)]
    pub min_point_distance: f64,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_width() -> f64 {
    10.0
}

fn default_alpha() -> i32 {
    255
}

fn default_surface_width() -> u32 {
    1024
}

fn default_surface_height() -> u32 {
    768
}

fn default_antialias() -> bool {
    true
}
