#![allow(clippy::float_cmp)]

use events::{EventKind, ShapeKind};

use super::*;
use crate::config::Tool;
use crate::surface::{MemorySurface, Paint, PaintOp};

// =============================================================
// Helpers
// =============================================================

fn engine() -> DrawingEngine<MemorySurface> {
    DrawingEngine::new(MemorySurface::new())
}

fn shape_engine(tool: Tool, filled: bool) -> DrawingEngine<MemorySurface> {
    let config = DrawingConfiguration { tool, filled, ..Default::default() };
    DrawingEngine::with_config(MemorySurface::new(), config)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Run one full gesture and collect the events it emits.
fn drag(
    engine: &mut DrawingEngine<MemorySurface>,
    origin: Point,
    moves: &[Point],
) -> Vec<DrawingEvent> {
    engine.pointer_down(origin);
    let emitted = moves.iter().filter_map(|p| engine.pointer_move(*p)).collect();
    engine.pointer_up();
    emitted
}

fn default_paint() -> Paint {
    Paint { color: "#000000".to_owned(), line_width: 1.0, opacity: 1.0 }
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn new_engine_is_idle_and_blank() {
    let engine = engine();
    assert!(!engine.session().is_active());
    assert_eq!(engine.session().undo_depth(), 0);
    assert_eq!(engine.session().redo_depth(), 0);
    assert!(engine.surface().ops().is_empty());
}

#[test]
fn new_engine_uses_default_configuration() {
    let engine = engine();
    assert_eq!(*engine.config(), DrawingConfiguration::default());
}

// =============================================================
// Freehand gestures
// =============================================================

#[test]
fn freehand_gesture_emits_consecutive_segments() {
    let mut engine = engine();
    let emitted = drag(&mut engine, pt(10.0, 10.0), &[pt(20.0, 20.0), pt(30.0, 10.0)]);

    assert_eq!(emitted.len(), 2);
    assert_eq!(
        emitted[0],
        DrawingEvent::segment(pt(10.0, 10.0), pt(20.0, 20.0), "#000000", 1.0)
    );
    assert_eq!(
        emitted[1],
        DrawingEvent::segment(pt(20.0, 20.0), pt(30.0, 10.0), "#000000", 1.0)
    );
}

#[test]
fn freehand_gesture_commits_exactly_one_snapshot() {
    let mut engine = engine();
    let before = engine.session().undo_depth();

    drag(&mut engine, pt(10.0, 10.0), &[pt(20.0, 20.0), pt(30.0, 10.0)]);

    assert_eq!(engine.session().undo_depth(), before + 1);
    assert_eq!(engine.session().redo_depth(), 0);
}

#[test]
fn freehand_gesture_strokes_a_segment_per_move() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0), pt(2.0, 0.0)]);

    let paint = default_paint();
    assert_eq!(
        engine.surface().ops(),
        &[
            PaintOp::Line { from: pt(0.0, 0.0), to: pt(1.0, 1.0), paint: paint.clone() },
            PaintOp::Line { from: pt(1.0, 1.0), to: pt(2.0, 0.0), paint },
        ]
    );
}

#[test]
fn emitted_events_use_the_configured_style() {
    let mut engine = engine();
    engine.config_mut().stroke_color = "#ff8800".to_owned();
    engine.config_mut().line_width = 4.0;

    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    assert_eq!(emitted[0].stroke_color, "#ff8800");
    assert_eq!(emitted[0].line_width, 4.0);
}

#[test]
fn pointer_move_without_a_gesture_is_a_noop() {
    let mut engine = engine();
    assert!(engine.pointer_move(pt(5.0, 5.0)).is_none());
    assert!(engine.surface().ops().is_empty());
}

#[test]
fn pointer_up_without_a_gesture_commits_nothing() {
    let mut engine = engine();
    engine.pointer_up();
    assert_eq!(engine.session().undo_depth(), 0);
}

#[test]
fn pointer_leave_ends_the_gesture_like_a_release() {
    let mut engine = engine();
    engine.pointer_down(pt(0.0, 0.0));
    engine.pointer_move(pt(1.0, 1.0));
    engine.pointer_leave();

    assert_eq!(engine.session().undo_depth(), 1);
    assert!(engine.pointer_move(pt(2.0, 2.0)).is_none());
}

// =============================================================
// Shape gestures
// =============================================================

#[test]
fn rect_gesture_emits_full_geometry_every_move() {
    let mut engine = shape_engine(Tool::Rect, false);
    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(5.0, 5.0), pt(10.0, 10.0)]);

    assert_eq!(emitted.len(), 2);
    assert_eq!(
        emitted[0],
        DrawingEvent::preview(ShapeKind::Rectangle, pt(0.0, 0.0), pt(5.0, 5.0), "#000000", 1.0, false)
    );
    assert_eq!(
        emitted[1],
        DrawingEvent::preview(ShapeKind::Rectangle, pt(0.0, 0.0), pt(10.0, 10.0), "#000000", 1.0, false)
    );
}

#[test]
fn shape_preview_restores_before_each_redraw() {
    let mut engine = shape_engine(Tool::Rect, false);
    drag(&mut engine, pt(0.0, 0.0), &[pt(5.0, 5.0), pt(10.0, 10.0)]);

    // Each move wiped the previous preview, so only the final shape remains.
    let [PaintOp::Rect { at, width, height, .. }] = engine.surface().ops() else {
        panic!("expected one rect op, got {:?}", engine.surface().ops());
    };
    assert_eq!(*at, pt(0.0, 0.0));
    assert_eq!(*width, 10.0);
    assert_eq!(*height, 10.0);
}

#[test]
fn shape_preview_preserves_committed_content() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);

    engine.config_mut().tool = Tool::Rect;
    drag(&mut engine, pt(2.0, 2.0), &[pt(4.0, 4.0), pt(6.0, 6.0)]);

    let ops = engine.surface().ops();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], PaintOp::Line { .. }));
    let PaintOp::Rect { at, width, height, .. } = &ops[1] else {
        panic!("expected a rect op, got {:?}", ops[1]);
    };
    assert_eq!(*at, pt(2.0, 2.0));
    assert_eq!(*width, 4.0);
    assert_eq!(*height, 4.0);
}

#[test]
fn circle_gesture_draws_from_origin_with_distance_radius() {
    let mut engine = shape_engine(Tool::Circle, false);
    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(3.0, 4.0)]);

    assert_eq!(emitted[0].kind, EventKind::ShapePreview);
    assert_eq!(emitted[0].shape_kind, ShapeKind::Circle);

    let [PaintOp::Circle { center, radius, .. }] = engine.surface().ops() else {
        panic!("expected one circle op, got {:?}", engine.surface().ops());
    };
    assert_eq!(*center, pt(0.0, 0.0));
    assert_eq!(*radius, 5.0);
}

#[test]
fn filled_setting_flows_into_events_and_rendering() {
    let mut engine = shape_engine(Tool::Rect, true);
    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(2.0, 2.0)]);

    assert!(emitted[0].filled);
    assert!(matches!(engine.surface().ops(), [PaintOp::Rect { filled: true, .. }]));
}

#[test]
fn leftward_drag_keeps_signed_extents() {
    let mut engine = shape_engine(Tool::Rect, false);
    drag(&mut engine, pt(10.0, 10.0), &[pt(4.0, 6.0)]);

    let [PaintOp::Rect { width, height, .. }] = engine.surface().ops() else {
        panic!("expected one rect op, got {:?}", engine.surface().ops());
    };
    assert_eq!(*width, -6.0);
    assert_eq!(*height, -4.0);
}

// =============================================================
// Eraser
// =============================================================

#[test]
fn eraser_renders_destructively_and_never_emits() {
    let mut engine = engine();
    engine.config_mut().eraser = true;
    engine.config_mut().line_width = 8.0;

    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 0.0), pt(2.0, 0.0)]);

    assert!(emitted.is_empty());
    assert_eq!(
        engine.surface().ops(),
        &[
            PaintOp::Erase { from: pt(0.0, 0.0), to: pt(1.0, 0.0), width: 8.0 },
            PaintOp::Erase { from: pt(1.0, 0.0), to: pt(2.0, 0.0), width: 8.0 },
        ]
    );
}

#[test]
fn eraser_never_emits_even_with_broadcast_on() {
    let mut engine = engine();
    assert!(engine.config().broadcast);
    engine.config_mut().eraser = true;

    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(5.0, 5.0)]);
    assert!(emitted.is_empty());
}

#[test]
fn eraser_overrides_the_shape_tool() {
    let mut engine = shape_engine(Tool::Rect, false);
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);

    engine.config_mut().eraser = true;
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);

    // No preview restore happened: the committed rect is still there,
    // followed by the erase stroke.
    let ops = engine.surface().ops();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], PaintOp::Rect { .. }));
    assert!(matches!(ops[1], PaintOp::Erase { .. }));
}

#[test]
fn eraser_gesture_still_commits_history() {
    let mut engine = engine();
    engine.config_mut().eraser = true;
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    assert_eq!(engine.session().undo_depth(), 1);
}

// =============================================================
// Broadcast flag
// =============================================================

#[test]
fn broadcast_off_renders_without_emitting() {
    let mut engine = engine();
    engine.config_mut().broadcast = false;

    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    assert!(emitted.is_empty());
    assert_eq!(engine.surface().ops().len(), 1);

    engine.config_mut().tool = Tool::Circle;
    let emitted = drag(&mut engine, pt(0.0, 0.0), &[pt(2.0, 2.0)]);
    assert!(emitted.is_empty());
    assert!(matches!(engine.surface().ops().last(), Some(PaintOp::Circle { .. })));
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn undo_then_redo_restores_the_pre_undo_state_exactly() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    drag(&mut engine, pt(2.0, 2.0), &[pt(3.0, 3.0)]);
    let before = engine.surface().ops().to_vec();

    assert!(engine.undo());
    assert_eq!(engine.surface().ops().len(), 1);

    assert!(engine.redo());
    assert_eq!(engine.surface().ops(), &before[..]);
}

#[test]
fn undo_of_the_only_commit_blanks_the_surface() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);

    assert!(engine.undo());
    assert!(engine.surface().ops().is_empty());
}

#[test]
fn undo_with_empty_history_reports_false_and_renders_nothing() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    let before = engine.surface().ops().to_vec();

    assert!(!engine.redo());
    assert_eq!(engine.surface().ops(), &before[..]);

    assert!(engine.undo());
    assert!(!engine.undo());
    assert!(engine.surface().ops().is_empty());
}

#[test]
fn a_new_gesture_discards_the_redo_stack() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    assert!(engine.undo());
    assert_eq!(engine.session().redo_depth(), 1);

    drag(&mut engine, pt(5.0, 5.0), &[pt(6.0, 6.0)]);
    assert_eq!(engine.session().redo_depth(), 0);
    assert!(!engine.redo());
}

// =============================================================
// Text insertion
// =============================================================

#[test]
fn insert_text_renders_at_the_retained_gesture_origin() {
    let mut engine = engine();
    engine.config_mut().line_width = 3.0;
    engine.config_mut().opacity = 0.5;
    drag(&mut engine, pt(7.0, 9.0), &[pt(8.0, 9.0)]);

    engine.insert_text("hello");

    let Some(PaintOp::Text { content, at, size, paint }) = engine.surface().ops().last() else {
        panic!("expected a text op, got {:?}", engine.surface().ops());
    };
    assert_eq!(content, "hello");
    assert_eq!(*at, pt(7.0, 9.0));
    assert_eq!(*size, 30.0);
    assert_eq!(paint.opacity, 0.5);
}

#[test]
fn insert_text_commits_like_a_completed_gesture() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    assert!(engine.undo());

    engine.insert_text("note");
    assert_eq!(engine.session().undo_depth(), 1);
    assert_eq!(engine.session().redo_depth(), 0);
}

#[test]
fn insert_text_before_any_gesture_anchors_at_the_zero_point() {
    let mut engine = engine();
    engine.insert_text("first");

    let Some(PaintOp::Text { at, .. }) = engine.surface().ops().last() else {
        panic!("expected a text op, got {:?}", engine.surface().ops());
    };
    assert_eq!(*at, pt(0.0, 0.0));
    assert_eq!(engine.session().undo_depth(), 1);
}

// =============================================================
// Clear
// =============================================================

#[test]
fn clear_blanks_the_surface_and_drops_all_history() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);
    drag(&mut engine, pt(2.0, 2.0), &[pt(3.0, 3.0)]);
    assert!(engine.undo());

    engine.clear();
    assert!(engine.surface().ops().is_empty());
    assert_eq!(engine.session().undo_depth(), 0);
    assert_eq!(engine.session().redo_depth(), 0);
    assert!(!engine.undo());
    assert!(!engine.redo());
}

// =============================================================
// Remote apply
// =============================================================

#[test]
fn apply_remote_renders_without_touching_history() {
    let mut engine = engine();
    drag(&mut engine, pt(0.0, 0.0), &[pt(1.0, 1.0)]);

    let event =
        DrawingEvent::preview(ShapeKind::Rectangle, pt(0.0, 0.0), pt(10.0, 10.0), "#123456", 2.0, true);
    engine.apply_remote(&event);

    assert_eq!(engine.session().undo_depth(), 1);
    assert_eq!(engine.session().redo_depth(), 0);

    let Some(PaintOp::Rect { at, width, height, filled, .. }) = engine.surface().ops().last()
    else {
        panic!("expected a rect op, got {:?}", engine.surface().ops());
    };
    assert_eq!(*at, pt(0.0, 0.0));
    assert_eq!(*width, 10.0);
    assert_eq!(*height, 10.0);
    assert!(*filled);
}

#[test]
fn apply_remote_ignores_the_local_tool_settings() {
    let mut engine = engine();
    engine.config_mut().stroke_color = "#ffffff".to_owned();
    engine.config_mut().line_width = 9.0;
    engine.config_mut().opacity = 0.25;

    engine.apply_remote(&DrawingEvent::segment(pt(0.0, 0.0), pt(1.0, 1.0), "#abcdef", 2.0));

    let [PaintOp::Line { paint, .. }] = engine.surface().ops() else {
        panic!("expected one line op, got {:?}", engine.surface().ops());
    };
    assert_eq!(paint.color, "#abcdef");
    assert_eq!(paint.line_width, 2.0);
    assert_eq!(paint.opacity, 1.0);
}
