//! Live brush configuration applied to new strokes.

use super::color::{BLACK, Color};
use super::stroke::StrokePaint;
use log::debug;

/// Thinnest brush the engine will draw with.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Widest brush accepted; larger requests are clamped.
pub const MAX_STROKE_WIDTH: f64 = 1024.0;

pub const DEFAULT_STROKE_WIDTH: f64 = 10.0;
pub const DEFAULT_STROKE_ALPHA: u8 = 255;

/// Current brush width, opacity and color.
///
/// Color and opacity are independent: the color is stored opaque and the
/// alpha channel of any packed color is discarded, so the final stroke
/// opacity only ever comes from [`PaintState::set_stroke_alpha`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintState {
    width: f64,
    alpha: u8,
    color: Color,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            width: DEFAULT_STROKE_WIDTH,
            alpha: DEFAULT_STROKE_ALPHA,
            color: BLACK,
        }
    }
}

impl PaintState {
    /// Creates a paint state from already-validated values.
    pub fn new(width: f64, alpha: i32, color: Color) -> Self {
        let mut paint = Self::default();
        paint.set_stroke_width(width);
        paint.set_stroke_alpha(alpha);
        paint.set_color(color);
        paint
    }

    /// Sets the brush width, clamped to `MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH`.
    ///
    /// NaN is treated as the minimum width.
    pub fn set_stroke_width(&mut self, width: f64) {
        let clamped = if width.is_nan() {
            MIN_STROKE_WIDTH
        } else {
            width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
        };
        if clamped != width {
            debug!("Stroke width {width} clamped to {clamped}");
        }
        self.width = clamped;
    }

    /// Sets the brush opacity, clamped to `0..=255`.
    pub fn set_stroke_alpha(&mut self, alpha: i32) {
        let clamped = alpha.clamp(0, 255);
        if clamped != alpha {
            debug!("Stroke alpha {alpha} clamped to {clamped}");
        }
        self.alpha = clamped as u8;
    }

    /// Sets the brush color from a packed `0xAARRGGBB` value.
    ///
    /// The alpha byte is ignored.
    pub fn set_stroke_color(&mut self, argb: u32) {
        self.set_color(Color::from_argb(argb));
    }

    /// Sets the brush color; its alpha component is ignored.
    pub fn set_color(&mut self, color: Color) {
        self.color = color.opaque();
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Freezes the current values for a stroke that is starting now.
    pub fn snapshot(&self) -> StrokePaint {
        StrokePaint {
            width: self.width,
            color: self.color,
            alpha: self.alpha,
        }
    }
}
