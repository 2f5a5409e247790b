//! Drawing engine for the collaborative canvas.
//!
//! This crate owns one client's drawing state: it translates pointer input
//! into local rendering plus emitted wire events, maintains the undo/redo
//! snapshot history, and replays events received from other clients. The
//! host layer is responsible only for wiring input to the engine and moving
//! [`events::DrawingEvent`]s over the network.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::DrawingEngine`] driving input to rendering and events |
//! | [`session`] | Gesture lifecycle and undo/redo snapshot stacks |
//! | [`surface`] | Rendering-collaborator trait and in-memory implementation |
//! | [`remote`] | Replay of relay broadcasts onto the local surface |
//! | [`config`] | Tools and per-client drawing settings |
//! | [`consts`] | Shared numeric constants (text sizing, defaults) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod remote;
pub mod session;
pub mod surface;
