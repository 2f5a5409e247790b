use events::{DrawingEvent, Point};

use crate::config::DrawingConfiguration;
use crate::consts::TEXT_SIZE_FACTOR;
use crate::remote;
use crate::session::DrawingSession;
use crate::surface::{Surface, draw_shape};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// The local drawing engine: one client's surface, session, and settings.
///
/// Every pointer handler renders locally and returns the wire event the
/// action produces, if any; the caller owns delivery. There is no second
/// networked handler path: emission is selected by the configuration's
/// broadcast flag. Events received from other clients enter through
/// [`DrawingEngine::apply_remote`] and never touch this client's history.
pub struct DrawingEngine<S: Surface> {
    surface: S,
    session: DrawingSession<S::Snapshot>,
    config: DrawingConfiguration,
}

impl<S: Surface> DrawingEngine<S> {
    /// Create an engine with default settings.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, DrawingConfiguration::default())
    }

    /// Create an engine with explicit settings.
    #[must_use]
    pub fn with_config(surface: S, config: DrawingConfiguration) -> Self {
        Self { surface, session: DrawingSession::new(), config }
    }

    // --- Settings ---

    /// Current drawing settings.
    #[must_use]
    pub fn config(&self) -> &DrawingConfiguration {
        &self.config
    }

    /// Mutable drawing settings.
    pub fn config_mut(&mut self) -> &mut DrawingConfiguration {
        &mut self.config
    }

    // --- Queries ---

    /// The rendering surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The gesture and history state.
    #[must_use]
    pub fn session(&self) -> &DrawingSession<S::Snapshot> {
        &self.session
    }

    // --- Pointer input ---

    /// Pointer-down: begin a gesture at `at`.
    pub fn pointer_down(&mut self, at: Point) {
        self.session.begin(at);
    }

    /// Pointer-move: render the step and derive its wire event.
    ///
    /// Outside a gesture this is a no-op. Eraser moves render destructively
    /// and never produce an event. Freehand strokes one segment from the
    /// previous position. Shape tools restore the last commit, then redraw
    /// the whole shape from the gesture origin, so the emitted preview
    /// always carries the full geometry rather than a delta. Returns `None`
    /// whenever the broadcast flag is off.
    pub fn pointer_move(&mut self, to: Point) -> Option<DrawingEvent> {
        if !self.session.is_active() {
            return None;
        }

        if self.config.eraser {
            let from = self.session.advance(to);
            self.surface.erase(from, to, self.config.line_width);
            return None;
        }

        let paint = self.config.paint();
        match self.config.tool.shape_kind() {
            None => {
                let from = self.session.advance(to);
                self.surface.line(from, to, &paint);
                self.emit(DrawingEvent::segment(
                    from,
                    to,
                    &self.config.stroke_color,
                    self.config.line_width,
                ))
            }
            Some(shape) => {
                self.restore_current();
                let origin = self.session.origin();
                self.session.advance(to);
                draw_shape(&mut self.surface, shape, origin, to, &paint, self.config.filled);
                self.emit(DrawingEvent::preview(
                    shape,
                    origin,
                    to,
                    &self.config.stroke_color,
                    self.config.line_width,
                    self.config.filled,
                ))
            }
        }
    }

    /// Pointer-up: end the gesture and commit a snapshot.
    ///
    /// A release with no gesture in progress is ignored, so stray releases
    /// never grow history.
    pub fn pointer_up(&mut self) {
        if !self.session.is_active() {
            return;
        }
        self.session.finish();
        self.session.commit(self.surface.snapshot());
    }

    /// The pointer leaving the surface ends the gesture like a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    // --- Discrete actions ---

    /// Insert text at the retained gesture origin.
    ///
    /// Renders immediately at font size `line width x 10` and commits a
    /// snapshot like a completed gesture. Local-only; text is not
    /// synchronized.
    pub fn insert_text(&mut self, content: &str) {
        let paint = self.config.paint();
        let size = self.config.line_width * TEXT_SIZE_FACTOR;
        self.surface.text(content, self.session.origin(), size, &paint);
        self.session.commit(self.surface.snapshot());
    }

    /// Undo the newest commit and repaint the one beneath it, or blank.
    ///
    /// Local-only: no wire event, remote peers never observe it. Returns
    /// `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.session.undo() {
            return false;
        }
        self.restore_current();
        true
    }

    /// Redo the newest undone commit and repaint it.
    ///
    /// Local-only, like [`DrawingEngine::undo`]. Returns `false` when there
    /// was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.session.redo() {
            return false;
        }
        self.restore_current();
        true
    }

    /// Blank the surface and drop all history.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.session.clear_history();
    }

    // --- Remote events ---

    /// Apply a relay broadcast from another client.
    ///
    /// Renders with the sender's styling and leaves this client's undo/redo
    /// stacks untouched; remote marks are not locally undoable.
    pub fn apply_remote(&mut self, event: &DrawingEvent) {
        remote::apply(&mut self.surface, event);
    }

    fn emit(&self, event: DrawingEvent) -> Option<DrawingEvent> {
        self.config.broadcast.then_some(event)
    }

    fn restore_current(&mut self) {
        match self.session.current() {
            Some(snapshot) => self.surface.restore(snapshot),
            None => self.surface.clear(),
        }
    }
}
