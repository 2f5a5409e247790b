//! Replay of relay broadcasts onto the local surface.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use events::{DrawingEvent, EventKind};

use crate::surface::{Paint, Surface, draw_shape};

/// Render a broadcast event from another client onto `surface`.
///
/// Uses the event's color and width at full opacity, ignoring the
/// receiver's own tool settings. Freehand segments stroke one step; shape
/// previews draw their full geometry directly over current content, with
/// no snapshot restore on the receiving side. Never touches the receiver's
/// undo/redo history.
pub fn apply<S: Surface>(surface: &mut S, event: &DrawingEvent) {
    let paint = Paint {
        color: event.stroke_color.clone(),
        line_width: event.line_width,
        opacity: 1.0,
    };

    match event.kind {
        EventKind::FreehandSegment => surface.line(event.origin, event.endpoint, &paint),
        EventKind::ShapePreview => {
            draw_shape(surface, event.shape_kind, event.origin, event.endpoint, &paint, event.filled);
        }
    }
}
