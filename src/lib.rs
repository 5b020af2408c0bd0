//! 2.5D sector/portal column raycaster.
//!
//! ```text
//! Map + Camera ─► engine::raycast (per column) ─► engine::strips ─► StripSink
//!                                                       ▲
//!                                              TextureCache (fallback ids)
//! ```
//!
//! The map is owned by whoever edits it; the engine borrows it read-only for
//! one [`engine::Engine::render`] call at a time.

pub mod engine;
pub mod renderer;
pub mod world;
