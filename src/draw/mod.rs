//! Rendering primitives and stroke definitions (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Stroke`]: one finished freehand gesture with its frozen paint
//! - [`PaintState`]: the live brush applied to new strokes
//! - [`RenderSurface`]: the raster accumulating every applied stroke
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod dirty;
pub mod paint;
pub mod render;
pub mod stroke;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use paint::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, PaintState};
pub use render::{render_path, render_stroke, render_strokes};
pub use stroke::{Point, Stroke, StrokePaint};
pub use surface::{RenderSurface, SurfaceError, SurfaceSnapshot};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
