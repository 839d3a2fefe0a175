//! Infinite-canvas board engine for the driftboard workspace.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the canvas: translating raw DOM input events into board
//! mutations, maintaining camera state for pan/zoom, hit-testing nodes and
//! their affordances, and painting the projected scene. The host JavaScript
//! layer is responsible only for wiring DOM events to the engine and
//! persisting the resulting [`engine::Action`]s to the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | In-memory document store, node and connection types |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against nodes and selection affordances |
//! | [`scene`] | Pure projection of document + camera into a display list |
//! | [`render`] | Painting a projected scene to the 2D context |
//! | [`project`] | Named canvas snapshots and the project store |
//! | [`files`] | Upload validation, file store, and file-to-node mapping |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod files;
pub mod hit;
pub mod input;
pub mod project;
pub mod render;
pub mod scene;
