//! Gesture lifecycle and undo/redo snapshot stacks.
//!
//! A session tracks one client's in-progress gesture and its committed
//! history. Snapshots are whatever the rendering surface captures; the
//! session never looks inside them. Local-only state, never transmitted.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use events::Point;

/// Per-client gesture and history state.
#[derive(Debug, Clone)]
pub struct DrawingSession<Snap> {
    active: bool,
    origin: Point,
    last: Point,
    undo_stack: Vec<Snap>,
    redo_stack: Vec<Snap>,
}

impl<Snap> DrawingSession<Snap> {
    /// Create an idle session with empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: false,
            origin: Point::default(),
            last: Point::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Whether a pointer-down gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Where the current or most recent gesture began.
    ///
    /// Retained after the gesture ends; discrete actions such as text
    /// insertion anchor here. The zero point before any gesture.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The most recent pointer position within the gesture.
    #[must_use]
    pub fn last(&self) -> Point {
        self.last
    }

    /// Start a gesture at `at`; the origin is fixed until the next one.
    pub fn begin(&mut self, at: Point) {
        self.active = true;
        self.origin = at;
        self.last = at;
    }

    /// Record pointer progress, returning the position it moved from.
    pub fn advance(&mut self, to: Point) -> Point {
        let from = self.last;
        self.last = to;
        from
    }

    /// End the gesture without touching history.
    pub fn finish(&mut self) {
        self.active = false;
    }

    /// Commit a completed action: push its snapshot and discard redo.
    pub fn commit(&mut self, snapshot: Snap) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Move the newest commit onto the redo stack.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(snapshot);
        true
    }

    /// Move the newest undone commit back onto the undo stack.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(snapshot);
        true
    }

    /// The raster state the surface should show now: the newest commit, or
    /// `None` for a blank canvas.
    #[must_use]
    pub fn current(&self) -> Option<&Snap> {
        self.undo_stack.last()
    }

    /// Number of commits available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of undone commits available to redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks entirely.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<Snap> Default for DrawingSession<Snap> {
    fn default() -> Self {
        Self::new()
    }
}
