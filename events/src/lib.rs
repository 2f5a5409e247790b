//! Shared event model and JSON codec for the realtime drawing wire.
//!
//! This crate owns the wire representation used by both `server` and
//! `client`. Every message is a JSON text frame wrapping the event in a
//! channel envelope, so the relay can route on the channel name without
//! understanding the payload.

use serde::{Deserialize, Serialize};

/// Channel name carried by every drawing envelope.
pub const DRAWING_CHANNEL: &str = "drawing";

/// Error returned by [`decode_event`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The text is not a well-formed envelope or event (invalid JSON,
    /// missing fields, or fields of the wrong type).
    #[error("malformed wire message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The envelope names a channel other than [`DRAWING_CHANNEL`].
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate")]
    NonFiniteCoordinate,
    /// The line width is zero, negative, or non-finite.
    #[error("invalid line width: {0}")]
    InvalidLineWidth(f64),
    /// The stroke color is empty.
    #[error("empty stroke color")]
    EmptyColor,
    /// A shape preview names no drawable shape.
    #[error("shape preview without a shape kind")]
    MissingShape,
}

/// A 2D position in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// What a [`DrawingEvent`] instructs the receiver to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// One freehand stroke segment from `origin` to `endpoint`.
    FreehandSegment,
    /// A complete shape redraw covering the whole gesture so far.
    ShapePreview,
}

/// Geometry named by a shape preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// No shape; what freehand segments carry.
    #[default]
    Freehand,
    /// Axis-aligned rectangle spanning `origin` to `endpoint`.
    Rectangle,
    /// Circle centered on `origin` with radius `origin -> endpoint`.
    Circle,
}

/// A single drawing action on the wire.
///
/// For freehand segments the geometry is one stroke step; for shape
/// previews `(origin, endpoint)` is the full bounding geometry from gesture
/// start to the current pointer. A preview is a from-scratch redraw
/// instruction, never a delta against the previous one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingEvent {
    /// How to interpret the geometry.
    pub kind: EventKind,
    /// Drawing start: segment start, or gesture origin for shapes.
    pub origin: Point,
    /// Current pointer position.
    pub endpoint: Point,
    /// Stroke color as the sender encodes it (hex or CSS color string).
    pub stroke_color: String,
    /// Stroke width in canvas units.
    pub line_width: f64,
    /// Shape geometry; meaningful only when `kind` is a shape preview.
    #[serde(default)]
    pub shape_kind: ShapeKind,
    /// Fill the shape instead of outlining it.
    #[serde(default)]
    pub filled: bool,
}

impl DrawingEvent {
    /// Build a freehand segment event.
    #[must_use]
    pub fn segment(origin: Point, endpoint: Point, stroke_color: &str, line_width: f64) -> Self {
        Self {
            kind: EventKind::FreehandSegment,
            origin,
            endpoint,
            stroke_color: stroke_color.to_owned(),
            line_width,
            shape_kind: ShapeKind::Freehand,
            filled: false,
        }
    }

    /// Build a shape preview event carrying the full gesture geometry.
    ///
    /// `shape` must not be [`ShapeKind::Freehand`]; such an event fails to
    /// decode on the receiving side.
    #[must_use]
    pub fn preview(
        shape: ShapeKind,
        origin: Point,
        endpoint: Point,
        stroke_color: &str,
        line_width: f64,
        filled: bool,
    ) -> Self {
        Self {
            kind: EventKind::ShapePreview,
            origin,
            endpoint,
            stroke_color: stroke_color.to_owned(),
            line_width,
            shape_kind: shape,
            filled,
        }
    }
}

/// Encode an event into its wire text.
#[must_use]
pub fn encode_event(event: &DrawingEvent) -> String {
    let envelope = Envelope {
        channel: DRAWING_CHANNEL.to_owned(),
        data: event,
    };
    // Serializing these derived structs cannot fail: all keys are strings
    // and a non-finite float is written as JSON null, which the decode side
    // rejects instead.
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// Decode wire text into an event.
///
/// Normalizes freehand segments to carry [`ShapeKind::Freehand`] whatever
/// the sender put on the wire.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] for invalid JSON or missing/mistyped
/// fields, [`DecodeError::UnknownChannel`] for a foreign envelope, and the
/// field-specific variants for values that parse but cannot be drawn.
pub fn decode_event(text: &str) -> Result<DrawingEvent, DecodeError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(text)?;
    if envelope.channel != DRAWING_CHANNEL {
        return Err(DecodeError::UnknownChannel(envelope.channel));
    }

    let mut event: DrawingEvent = serde_json::from_value(envelope.data)?;
    if event.kind == EventKind::FreehandSegment {
        event.shape_kind = ShapeKind::Freehand;
    }
    validate(&event)?;
    Ok(event)
}

/// Read the envelope channel of a wire message without touching its payload.
///
/// Returns `None` when the text is not a well-formed envelope. The relay
/// routes on this and forwards the original text untouched.
#[must_use]
pub fn peek_channel(text: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Probe {
        channel: String,
    }

    serde_json::from_str::<Probe>(text).ok().map(|p| p.channel)
}

fn validate(event: &DrawingEvent) -> Result<(), DecodeError> {
    if !event.origin.is_finite() || !event.endpoint.is_finite() {
        return Err(DecodeError::NonFiniteCoordinate);
    }
    if !event.line_width.is_finite() || event.line_width <= 0.0 {
        return Err(DecodeError::InvalidLineWidth(event.line_width));
    }
    if event.stroke_color.is_empty() {
        return Err(DecodeError::EmptyColor);
    }
    if event.kind == EventKind::ShapePreview && event.shape_kind == ShapeKind::Freehand {
        return Err(DecodeError::MissingShape);
    }
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    channel: String,
    data: T,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
