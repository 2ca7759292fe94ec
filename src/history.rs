//! Linear undo/redo log of drawing actions.
//!
//! The history keeps two stacks: `applied` actions make up the current
//! picture, `undone` actions wait for a redo. Recording a new action drops
//! the redo branch. Replaying `base` followed by `applied` from an empty
//! canvas always yields the strokes currently on screen.
//!
//! A clear is a barrier: recording it commits every earlier action to
//! `base`. Undoing the clear brings back exactly the strokes that were
//! visible before it, but those strokes can no longer be undone one by one.

use crate::draw::Stroke;
use log::debug;

/// A single undoable drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A finished stroke was drawn on top of the canvas
    StrokeAdded(Stroke),
    /// The canvas was wiped
    CanvasCleared,
}

/// Undo/redo stacks with an optional depth cap.
#[derive(Debug, Default)]
pub struct History {
    /// Strokes that are committed and can no longer be undone
    base: Vec<Stroke>,
    /// Actions contributing to the current picture, oldest first
    applied: Vec<Action>,
    /// Actions available for redo, most recently undone last
    undone: Vec<Action>,
    /// Maximum number of undoable actions (0 = unlimited)
    max_depth: usize,
}

impl History {
    /// Creates an empty history without a depth cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty history keeping at most `max_depth` undoable actions.
    ///
    /// A cap of 0 means unlimited.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Records a new action, discarding anything that could have been redone.
    pub fn push(&mut self, action: Action) {
        if !self.undone.is_empty() {
            debug!("Discarding {} redo action(s)", self.undone.len());
            self.undone.clear();
        }
        if matches!(action, Action::CanvasCleared) {
            self.commit(self.applied.len());
        }
        self.applied.push(action);
        self.enforce_depth();
    }

    /// Moves the newest applied action onto the redo stack.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Action> {
        let action = self.applied.pop()?;
        self.undone.push(action);
        self.undone.last()
    }

    /// Moves the most recently undone action back onto the applied stack.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Action> {
        let action = self.undone.pop()?;
        self.applied.push(action);
        self.applied.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Number of actions that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.applied.len()
    }

    /// Number of actions that can currently be redone.
    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Actions contributing to the current picture, oldest first.
    pub fn applied(&self) -> &[Action] {
        &self.applied
    }

    /// Actions available for redo, next redo last.
    pub fn undone(&self) -> &[Action] {
        &self.undone
    }

    /// Strokes currently visible, in draw order.
    ///
    /// Only strokes recorded after the most recent clear are returned.
    pub fn visible_strokes(&self) -> impl Iterator<Item = &Stroke> {
        let last_clear = self
            .applied
            .iter()
            .rposition(|action| matches!(action, Action::CanvasCleared));
        let (base, tail) = match last_clear {
            Some(index) => (&self.base[..0], &self.applied[index + 1..]),
            None => (&self.base[..], &self.applied[..]),
        };
        base.iter().chain(tail.iter().filter_map(|action| match action {
            Action::StrokeAdded(stroke) => Some(stroke),
            Action::CanvasCleared => None,
        }))
    }

    fn enforce_depth(&mut self) {
        if self.max_depth == 0 || self.applied.len() <= self.max_depth {
            return;
        }
        let overflow = self.applied.len() - self.max_depth;
        self.commit(overflow);
        debug!("History depth cap reached; committed {overflow} action(s)");
    }

    /// Folds the oldest `count` applied actions into `base`.
    fn commit(&mut self, count: usize) {
        for action in self.applied.drain(..count) {
            match action {
                Action::StrokeAdded(stroke) => self.base.push(stroke),
                Action::CanvasCleared => self.base.clear(),
            }
        }
    }
}
