use glam::Vec2;
use smallvec::SmallVec;

use crate::world::{SectorId, TextureId, WallId};

/// Tunables shared by the raycaster and the strip builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Horizontal field of view, radians.
    pub fov: f32,
    /// Hits closer than this along the view axis are dropped.
    pub near: f32,
    /// Length of the segment standing in for each ray.
    pub ray_length: f32,
    /// World units covered by one floor / ceiling texture repeat.
    pub tile_size: f32,
    /// Floor / ceiling rows further than this are left undrawn.
    pub max_plane_distance: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: 60_f32.to_radians(),
            near: 0.01,
            ray_length: 100_000.0,
            tile_size: 64.0,
            max_plane_distance: 10_000.0,
        }
    }
}

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: f32, // pre-derived for speed
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_h: h as f32 * 0.5,
        }
    }
}

/// Per-frame camera state reused by every column.
#[derive(Clone, Copy, Debug)]
pub struct Viewer {
    pub origin: Vec2,
    pub yaw: f32,
    pub eye_z: f32,
    /// pinhole scale: `(w / 2) / tan(fov / 2)`
    pub focal: f32,
    /// screen row of the eye level: `half_h + h * tan(pitch)`
    pub horizon: f32,
}

/// One wall crossed by a column's ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    /// Distance along the view axis, not along the ray (fisheye-free).
    pub depth: f32,
    /// 0 at `wall.start`, 1 at `wall.end`
    pub tex_u: f32,
    pub wall: WallId,
    pub wall_height: f32,
    pub tex_id: TextureId,
    /// Neighbour sector when the wall is a valid portal.
    pub portal: Option<SectorId>,
}

impl RayHit {
    #[inline]
    pub fn is_portal(&self) -> bool {
        self.portal.is_some()
    }
}

/// Depth-sorted hits of one column; convex sectors rarely exceed two.
pub type ColumnHits = SmallVec<[RayHit; 4]>;

/// Counters for one `render` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub columns: usize,
    pub hits: usize,
    pub portal_hits: usize,
    pub strips: usize,
}
