//! Per-frame pipeline: one ray per screen column, cast against the walls of
//! the camera's sector, turned into wall / floor / ceiling strips.
//!
//! The cast stays inside the current sector.  Portal walls are detected
//! and reported (see [`RayHit::portal`]) but never crossed, so the
//! neighbouring sector is not drawn through them.

#[allow(clippy::module_inception)]
mod engine;
pub mod raycast;
pub mod strips;
mod types;

pub use engine::Engine;
pub use types::{ColumnHits, FrameStats, RayHit, RenderConfig, Screen, Viewer};
