//! The rendering collaborator: primitives the engine draws with.
//!
//! Pixel rendering lives outside this crate. The engine talks to it
//! through [`Surface`], which exposes the stroke/fill primitives plus
//! snapshot get/put for undo/redo. [`MemorySurface`] is the in-crate
//! implementation: an operation log standing in for raster content, which
//! is what the tests and the CLI assert against and print from.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use events::{Point, ShapeKind};

/// Stroke styling applied at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Stroke color (hex or CSS color string).
    pub color: String,
    /// Stroke width in canvas units.
    pub line_width: f64,
    /// Alpha in `0.0..=1.0`.
    pub opacity: f64,
}

/// Rendering primitives and raster snapshot access.
///
/// `width` and `height` extents are signed: a drag up and to the left
/// produces negative values, and the surface is expected to handle them
/// the way a canvas `rect` call does.
pub trait Surface {
    /// Opaque raster state captured by [`Surface::snapshot`].
    type Snapshot: Clone;

    /// Stroke a line segment from `from` to `to`.
    fn line(&mut self, from: Point, to: Point, paint: &Paint);

    /// Draw an axis-aligned rectangle anchored at `at` with signed extents.
    fn rect(&mut self, at: Point, width: f64, height: f64, paint: &Paint, filled: bool);

    /// Draw a circle centered at `center`.
    fn circle(&mut self, center: Point, radius: f64, paint: &Paint, filled: bool);

    /// Destructively erase along a segment, compositing to transparent.
    fn erase(&mut self, from: Point, to: Point, width: f64);

    /// Render text anchored at `at` with the given font size.
    fn text(&mut self, content: &str, at: Point, size: f64, paint: &Paint);

    /// Blank the whole surface.
    fn clear(&mut self);

    /// Capture the current raster state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the raster state with a captured snapshot.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}

/// Draw a shape onto `surface` from its full gesture geometry.
///
/// Rectangles span `origin` to `endpoint`; circles center on `origin` with
/// the distance to `endpoint` as radius. [`ShapeKind::Freehand`] degrades
/// to a plain segment.
pub fn draw_shape<S: Surface>(
    surface: &mut S,
    shape: ShapeKind,
    origin: Point,
    endpoint: Point,
    paint: &Paint,
    filled: bool,
) {
    match shape {
        ShapeKind::Freehand => surface.line(origin, endpoint, paint),
        ShapeKind::Rectangle => {
            surface.rect(origin, endpoint.x - origin.x, endpoint.y - origin.y, paint, filled);
        }
        ShapeKind::Circle => {
            let radius = (endpoint.x - origin.x).hypot(endpoint.y - origin.y);
            surface.circle(origin, radius, paint, filled);
        }
    }
}

/// One recorded operation on a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// A stroked line segment.
    Line { from: Point, to: Point, paint: Paint },
    /// A rectangle with signed extents.
    Rect { at: Point, width: f64, height: f64, paint: Paint, filled: bool },
    /// A circle.
    Circle { center: Point, radius: f64, paint: Paint, filled: bool },
    /// A destructive erase stroke.
    Erase { from: Point, to: Point, width: f64 },
    /// Rendered text.
    Text { content: String, at: Point, size: f64, paint: Paint },
}

/// In-memory surface recording operations instead of pixels.
#[derive(Debug, Default)]
pub struct MemorySurface {
    ops: Vec<PaintOp>,
}

impl MemorySurface {
    /// Create a blank surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded operations, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }
}

/// Captured [`MemorySurface`] raster state.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySnapshot {
    ops: Vec<PaintOp>,
}

impl Surface for MemorySurface {
    type Snapshot = MemorySnapshot;

    fn line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.ops.push(PaintOp::Line { from, to, paint: paint.clone() });
    }

    fn rect(&mut self, at: Point, width: f64, height: f64, paint: &Paint, filled: bool) {
        self.ops.push(PaintOp::Rect { at, width, height, paint: paint.clone(), filled });
    }

    fn circle(&mut self, center: Point, radius: f64, paint: &Paint, filled: bool) {
        self.ops.push(PaintOp::Circle { center, radius, paint: paint.clone(), filled });
    }

    fn erase(&mut self, from: Point, to: Point, width: f64) {
        self.ops.push(PaintOp::Erase { from, to, width });
    }

    fn text(&mut self, content: &str, at: Point, size: f64, paint: &Paint) {
        self.ops.push(PaintOp::Text {
            content: content.to_owned(),
            at,
            size,
            paint: paint.clone(),
        });
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot { ops: self.ops.clone() }
    }

    fn restore(&mut self, snapshot: &MemorySnapshot) {
        self.ops = snapshot.ops.clone();
    }
}
