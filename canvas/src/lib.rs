//! Direct-manipulation core for the ad creative editor.
//!
//! This crate owns everything between a raw pointer event and a layout
//! override: hit-testing, the drag/resize gesture state machine, per-kind
//! resize math, selection and popup state, and the host editor state tree
//! that merges controller output. It performs no I/O and binds to no UI
//! toolkit; a host forwards events in and draws the returned views.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor state tree and event routing ([`engine::EditorCore`]) |
//! | [`overlay`] | Freeform overlay controller: drag, aspect-locked resize, popups |
//! | [`template`] | Template element controller: per-kind resize, Reset, static mode |
//! | [`render`] | Default template layout and override resolution |
//! | [`doc`] | Element layouts, overlay record, per-size maps |
//! | [`action`] | Actions controllers return to the host |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Resize anchors, constant-size chrome, hit-testing |
//! | [`camera`] | Geometry primitives and canvas scale |
//! | [`sizes`] | Canvas-size catalog and layout classes |
//! | [`manifest`] | Expression manifest and quick-swap lookup |
//! | [`consts`] | Shared numeric constants (clamp ranges, chrome sizes, etc.) |

pub mod action;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod manifest;
pub mod overlay;
pub mod render;
pub mod sizes;
pub mod template;
