//! Drawing settings: the active tool and per-client stroke styling.
//!
//! Settings travel as an explicit [`DrawingConfiguration`] owned by the
//! engine rather than ambient globals. An emitted wire event carries only
//! the fields the wire schema names; everything else here stays local.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use events::ShapeKind;

use crate::consts::{DEFAULT_LINE_WIDTH, DEFAULT_OPACITY, DEFAULT_STROKE_COLOR};
use crate::surface::Paint;

/// Which drawing tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand stroke (default).
    #[default]
    Freehand,
    /// Drag out a rectangle.
    Rect,
    /// Drag out a circle.
    Circle,
}

impl Tool {
    /// Whether this tool previews a shape while dragging.
    #[must_use]
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rect | Self::Circle)
    }

    /// The wire shape this tool draws, if it previews one.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Freehand => None,
            Self::Rect => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
        }
    }
}

/// Per-client drawing settings applied at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingConfiguration {
    /// Active drawing tool.
    pub tool: Tool,
    /// Stroke color (hex or CSS color string).
    pub stroke_color: String,
    /// Stroke width in canvas units.
    pub line_width: f64,
    /// Alpha applied to local rendering, `0.0..=1.0`.
    pub opacity: f64,
    /// Fill shapes instead of outlining them.
    pub filled: bool,
    /// Erase instead of drawing, whatever the active tool.
    pub eraser: bool,
    /// Emit wire events for actions that synchronize.
    pub broadcast: bool,
}

impl Default for DrawingConfiguration {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            line_width: DEFAULT_LINE_WIDTH,
            opacity: DEFAULT_OPACITY,
            filled: false,
            eraser: false,
            broadcast: true,
        }
    }
}

impl DrawingConfiguration {
    /// Paint value for local rendering under these settings.
    #[must_use]
    pub fn paint(&self) -> Paint {
        Paint {
            color: self.stroke_color.clone(),
            line_width: self.line_width,
            opacity: self.opacity,
        }
    }
}
