//! Pointer event types fed to the input session.

/// Identifies one pointer (finger, pen or mouse) across a gesture.
pub type PointerId = u32;

/// Pointer events as delivered by the hosting view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer touched down at the position
    Down { id: PointerId, x: f64, y: f64 },
    /// Pointer moved while down
    Move { id: PointerId, x: f64, y: f64 },
    /// Pointer lifted at the position
    Up { id: PointerId, x: f64, y: f64 },
    /// The input source reclaimed the gesture; nothing should be committed
    Cancel,
}
