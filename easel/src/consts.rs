//! Shared numeric constants for the easel crate.

// ── Text ────────────────────────────────────────────────────────

/// Multiplier from stroke width to text font size, in canvas units.
pub const TEXT_SIZE_FACTOR: f64 = 10.0;

// ── Configuration defaults ──────────────────────────────────────

/// Stroke color for a fresh configuration.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";

/// Stroke width for a fresh configuration, in canvas units.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Opacity for a fresh configuration (fully opaque).
pub const DEFAULT_OPACITY: f64 = 1.0;
