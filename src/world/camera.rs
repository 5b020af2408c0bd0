use glam::{Vec2, vec2};

use super::{Map, SectorId};

/// Viewer in world space.
///
/// * `pos` lives on the X/Z ground plane; `height` is the absolute eye
///   height on the vertical axis.
/// * `sector` is derived data: recomputed through [`Map::locate_sector`]
///   every time the position changes through this API, stale otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub height: f32,
    pub yaw: f32,   // radians (0 = +X, counter-clockwise towards +Z)
    pub pitch: f32, // radians (+ = look up)
    pub sector: Option<SectorId>,
}

impl Camera {
    /// Place a camera and resolve its sector in `map`.
    pub fn new(map: &Map, pos: Vec2, height: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            pos,
            height,
            yaw,
            pitch,
            sector: map.locate_sector(pos),
        }
    }

    /// Host-facing setter: `(x, height, z)` plus view angles.
    pub fn set(&mut self, map: &Map, x: f32, height: f32, z: f32, yaw: f32, pitch: f32) {
        *self = Self::new(map, vec2(x, z), height, yaw, pitch);
    }

    /// Re-run the sector lookup, e.g. after the map was edited.
    pub fn relocate(&mut self, map: &Map) -> Option<SectorId> {
        self.sector = map.locate_sector(self.pos);
        self.sector
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks on the ground plane.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        Vec2::new(c, s)
    }

    /// Unit vector pointing to the camera's right on the ground plane.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        // screen columns sweep towards larger angles, left to right
        self.forward().perp()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units and `side` (strafe right), then relocate.
    pub fn step(&mut self, map: &Map, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
        self.relocate(map);
    }

    /// Rotate around the vertical axis (positive = counter-clockwise).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }

    /// Tilt the view.  Pitch is stored as given; the projection shifts
    /// the horizon by `height * tan(pitch)`.
    pub fn look(&mut self, delta_pitch: f32) {
        self.pitch += delta_pitch;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
