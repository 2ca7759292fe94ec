//! Gesture state machine turning pointer events into strokes.

use super::events::PointerId;
use crate::draw::{PaintState, Point, Stroke, StrokePaint};
use log::{debug, warn};

/// Current gesture state.
#[derive(Debug, Default)]
pub enum SessionState {
    /// No pointer is down
    #[default]
    Idle,
    /// A pointer is down and its path is being recorded
    Tracking {
        /// Pointer that owns the gesture; other pointers are ignored
        pointer: PointerId,
        /// Points kept so far, starting with the down position
        points: Vec<Point>,
        /// Paint captured when the pointer went down
        paint: StrokePaint,
    },
}

/// Tracks at most one in-progress stroke.
///
/// When `min_point_distance` is positive, move events closer than that to
/// the last kept point are skipped. The pointer-up position is always kept
/// so the stroke ends exactly where the pointer lifted.
#[derive(Debug, Default)]
pub struct InputSession {
    state: SessionState,
    min_point_distance: f64,
}

impl InputSession {
    /// Creates an idle session that keeps every move event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle session that decimates points closer than `distance`.
    pub fn with_min_point_distance(distance: f64) -> Self {
        Self {
            state: SessionState::Idle,
            min_point_distance: if distance.is_finite() {
                distance.max(0.0)
            } else {
                0.0
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, SessionState::Tracking { .. })
    }

    pub fn min_point_distance(&self) -> f64 {
        self.min_point_distance
    }

    /// Points and paint of the stroke being drawn, for live preview.
    pub fn provisional(&self) -> Option<(&[Point], &StrokePaint)> {
        match &self.state {
            SessionState::Tracking { points, paint, .. } => Some((points, paint)),
            SessionState::Idle => None,
        }
    }

    /// Starts a gesture, snapshotting `paint`.
    ///
    /// Returns `false` if a gesture is already in progress; the extra pointer
    /// is dropped until the active one lifts.
    pub fn pointer_down(&mut self, pointer: PointerId, x: f64, y: f64, paint: &PaintState) -> bool {
        if !coordinates_valid(x, y) {
            return false;
        }
        if let SessionState::Tracking { pointer: active, .. } = &self.state {
            debug!("Ignoring pointer {pointer} down while pointer {active} is drawing");
            return false;
        }
        self.state = SessionState::Tracking {
            pointer,
            points: vec![Point::new(x, y)],
            paint: paint.snapshot(),
        };
        debug!("Pointer {pointer} down at ({x:.1}, {y:.1}); tracking stroke");
        true
    }

    /// Extends the active gesture. Returns `true` if a point was recorded.
    pub fn pointer_move(&mut self, pointer: PointerId, x: f64, y: f64) -> bool {
        if !coordinates_valid(x, y) {
            return false;
        }
        let min_distance = self.min_point_distance;
        match &mut self.state {
            SessionState::Tracking {
                pointer: active,
                points,
                ..
            } if *active == pointer => {
                let point = Point::new(x, y);
                let too_close = points
                    .last()
                    .is_some_and(|last| last.distance_to(point) < min_distance.max(f64::EPSILON));
                if too_close {
                    return false;
                }
                points.push(point);
                true
            }
            _ => false,
        }
    }

    /// Finishes the active gesture and returns the frozen stroke.
    ///
    /// Returns `None` when idle or when `pointer` does not own the gesture.
    pub fn pointer_up(&mut self, pointer: PointerId, x: f64, y: f64) -> Option<Stroke> {
        match &self.state {
            SessionState::Tracking { pointer: active, .. } if *active == pointer => {}
            _ => return None,
        }
        let SessionState::Tracking {
            mut points, paint, ..
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        let end = Point::new(x, y);
        if coordinates_valid(x, y) && points.last() != Some(&end) {
            points.push(end);
        }
        debug!("Pointer {pointer} up; stroke finished with {} point(s)", points.len());
        Some(Stroke::new(points, paint))
    }

    /// Abandons the active gesture without producing a stroke.
    ///
    /// Returns `true` if a gesture was discarded.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SessionState::Tracking { pointer, points, .. } => {
                debug!(
                    "Gesture from pointer {pointer} cancelled; discarded {} point(s)",
                    points.len()
                );
                true
            }
            SessionState::Idle => false,
        }
    }
}

fn coordinates_valid(x: f64, y: f64) -> bool {
    if x.is_finite() && y.is_finite() {
        true
    } else {
        warn!("Ignoring pointer event with non-finite position ({x}, {y})");
        false
    }
}
