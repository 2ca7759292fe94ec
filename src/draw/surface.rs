//! Persistent raster holding every applied stroke.

use super::color::Color;
use super::render::{render_background, render_stroke, render_strokes};
use super::stroke::Stroke;
use std::io::Write;
use thiserror::Error;

/// Largest width or height accepted for a surface.
pub const MAX_SURFACE_DIMENSION: u32 = 16384;

/// Errors raised while allocating, reading or encoding a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface size {width}x{height} (allowed 1-16384)")]
    InvalidSize { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data is not readable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// Cairo ARGB32 image that accumulates strokes with the painter's algorithm.
///
/// New strokes composite over existing pixels (`Operator::Over`), so two
/// overlapping semi-transparent strokes are darker where they meet.
pub struct RenderSurface {
    surface: cairo::ImageSurface,
    background: Color,
    antialias: bool,
}

impl RenderSurface {
    /// Allocates a surface filled with `background`.
    pub fn new(
        width: u32,
        height: u32,
        background: Color,
        antialias: bool,
    ) -> Result<Self, SurfaceError> {
        let surface = create_image(width, height)?;
        let mut render_surface = Self {
            surface,
            background,
            antialias,
        };
        render_surface.clear();
        Ok(render_surface)
    }

    pub fn width(&self) -> u32 {
        self.surface.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height() as u32
    }

    pub fn background(&self) -> Color {
        self.background
    }

    fn context(&self) -> Option<cairo::Context> {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => {
                if !self.antialias {
                    ctx.set_antialias(cairo::Antialias::None);
                }
                Some(ctx)
            }
            Err(err) => {
                log::warn!("Failed to create Cairo context for surface: {err}");
                None
            }
        }
    }

    /// Resets every pixel to the background color.
    pub fn clear(&mut self) {
        if let Some(ctx) = self.context() {
            render_background(&ctx, self.background);
        }
    }

    /// Draws one stroke on top of the current content.
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        if let Some(ctx) = self.context() {
            render_stroke(&ctx, stroke);
        }
    }

    /// Clears the surface and draws `strokes` in order.
    pub fn rebuild<'a>(&mut self, strokes: impl IntoIterator<Item = &'a Stroke>) {
        if let Some(ctx) = self.context() {
            render_background(&ctx, self.background);
            render_strokes(&ctx, strokes);
        }
    }

    /// Reallocates the raster at a new size. Content is reset to the
    /// background; the caller is expected to rebuild.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.surface = create_image(width, height)?;
        self.clear();
        Ok(())
    }

    /// Paints the raster onto another Cairo context at the origin.
    pub fn paint_onto(&self, ctx: &cairo::Context) -> Result<(), SurfaceError> {
        ctx.save()?;
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        let painted = ctx.paint();
        ctx.restore()?;
        painted?;
        Ok(())
    }

    /// Copies the current pixels out for a reader.
    pub fn snapshot(&self) -> Result<SurfaceSnapshot, SurfaceError> {
        let mut data = Vec::new();
        self.surface.with_data(|bytes| data.extend_from_slice(bytes))?;
        Ok(SurfaceSnapshot {
            width: self.width(),
            height: self.height(),
            stride: self.surface.stride() as usize,
            data,
        })
    }

    /// Encodes the current raster as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        self.surface.flush();
        self.surface.write_to_png(writer)?;
        Ok(())
    }
}

fn create_image(width: u32, height: u32) -> Result<cairo::ImageSurface, SurfaceError> {
    let valid = 1..=MAX_SURFACE_DIMENSION;
    if !valid.contains(&width) || !valid.contains(&height) {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    Ok(cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        width as i32,
        height as i32,
    )?)
}

/// Owned copy of the raster at one point in time.
///
/// Pixels are Cairo ARGB32: one native-endian `u32` per pixel with
/// premultiplied alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub data: Vec<u8>,
}

impl SurfaceSnapshot {
    /// Returns `[a, r, g, b]` (premultiplied) for the pixel, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let bytes: [u8; 4] = self.data.get(offset..offset + 4)?.try_into().ok()?;
        Some(u32::from_ne_bytes(bytes).to_be_bytes())
    }

    /// Alpha of the pixel, 0 when out of bounds.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |[a, ..]| a)
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.alpha_at(x, y) != 0)
            .count()
    }

    /// True when no pixel has coverage.
    pub fn is_blank(&self) -> bool {
        self.painted_pixels() == 0
    }
}
