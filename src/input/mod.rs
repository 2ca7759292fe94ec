//! Pointer input handling.
//!
//! Translates raw pointer events from the hosting view into finished strokes
//! through a two-state gesture machine (idle, tracking).

pub mod events;
pub mod session;

// Re-export commonly used types at module level
pub use events::{PointerEvent, PointerId};
pub use session::{InputSession, SessionState};
