//! Dirty region tracking for incremental repaints.
//!
//! Collects axis-aligned rectangles that a host needs to repaint between frames.
//! A finished stroke damages its padded bounds. While a stroke is being drawn
//! only the newest segment is marked, so long previews stay cheap to repaint.

use super::Stroke;
use super::stroke::{Point, bounding_box_for_points};
use crate::util::Rect;

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds the bounding box for the given stroke, or full damage if none is available.
    pub fn mark_stroke(&mut self, stroke: &Stroke) {
        self.mark_path(stroke.points(), stroke.paint().width);
    }

    /// Marks the padded bounds of a whole path drawn at `width`.
    ///
    /// Paths without bounds (empty, or beyond the representable pixel range)
    /// fall back to full damage.
    pub fn mark_path(&mut self, points: &[Point], width: f64) {
        match bounding_box_for_points(points, width) {
            Some(rect) => self.mark_rect(rect),
            None => self.mark_full(),
        }
    }

    /// Marks only the segment joining the last two points of a growing path.
    pub fn mark_path_tail(&mut self, points: &[Point], width: f64) {
        let start = points.len().saturating_sub(2);
        self.mark_path(&points[start..], width);
    }

    /// True when nothing has been marked since the last drain.
    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            if width > 0 && height > 0 {
                if let Some(full) = Rect::new(0, 0, width, height) {
                    return vec![full];
                }
            }
            Vec::new()
        } else {
            self.regions.drain(..).collect()
        }
    }
}
