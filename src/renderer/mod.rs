//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*
//! It turns every screen column into a handful of [`Strip`]s and hands them
//! to a type that implements [`StripSink`].
//!
//! * Plug in any back-end (CPU framebuffer, GPU draw calls, a recorder for
//!   tests) without changing the engine.
//! * `Vec<Strip>` is itself a sink, which is what the tests use.

use crate::world::{SectorId, TextureId};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Which surface a strip samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StripKind {
    Wall,
    Ceiling,
    Floor,
}

/// One 1-pixel-wide vertical span, rows `y1 ..= y2`.
///
/// Walls carry a constant `tex_u` and a V range.  Floor and ceiling strips
/// are single rows (`y1 == y2`) with tiled `(tex_u, v_top)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Strip {
    pub column: u32,
    pub y1: i32,
    pub y2: i32,
    pub tex_u: f32,
    pub tex_id: TextureId,
    pub kind: StripKind,
    /// texture V at `y1` / `y2`
    pub v_top: f32,
    pub v_bottom: f32,
    /// owning sector's light level
    pub light: u8,
    /// sector behind the wall when the strip is a portal face
    pub portal: Option<SectorId>,
}

/// Rasterisation back-end fed by the engine, one frame at a time.
pub trait StripSink {
    /// Called once before the first strip of a frame.
    fn begin_frame(&mut self, _width: usize, _height: usize) {}

    /// Rasterise one span.
    fn draw_strip(&mut self, strip: &Strip);

    /// Called once after the last strip of a frame.
    fn end_frame(&mut self) {}
}

/// Recording sink: every frame replaces the previous contents.
impl StripSink for Vec<Strip> {
    fn begin_frame(&mut self, _width: usize, _height: usize) {
        self.clear();
    }

    fn draw_strip(&mut self, strip: &Strip) {
        self.push(strip.clone());
    }
}

pub mod software;

pub use software::FrameBuffer;
