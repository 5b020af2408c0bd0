use bitflags::bitflags;
use glam::Vec2;

use crate::world::texture::TextureId;

pub type SectorId = usize;
pub type WallId = usize;
pub type PortalId = usize;

/// Ground-plane point: `.x` = world X, `.y` = world Z.
pub type Vertex = Vec2;

/// Editor-owned snapshot of one map.
///
/// A flat arena: sectors and portals are addressed by index, walls by
/// `(SectorId, WallId)`.  The renderer only ever borrows it for one frame.
#[derive(Clone, Debug, Default)]
pub struct Map {
    pub sectors: Vec<Sector>,
    pub portals: Vec<Portal>,
}

/*--------------------------- walls ----------------------------------*/

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WallFlags: u16 {
        const BLOCKING  = 0x0001;
        const TWO_SIDED = 0x0002;
        const HIDDEN    = 0x0004; // editor: not shown on automap
        const FLIP_U    = 0x0008; // mirror texture along the wall
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    pub start: Vertex,
    pub end: Vertex,
    pub tex_lower: TextureId,
    pub tex_middle: TextureId,
    pub tex_upper: TextureId,
    /// Z heights separating the lower / middle / upper texture bands.
    pub z_split_low: f32,
    pub z_split_high: f32,
    pub portal: Option<PortalId>,
    pub flags: WallFlags,
}

impl Wall {
    /// Solid, untextured wall from `start` to `end`.
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self {
            start,
            end,
            tex_lower: 0,
            tex_middle: 0,
            tex_upper: 0,
            z_split_low: 0.0,
            z_split_high: 0.0,
            portal: None,
            flags: WallFlags::BLOCKING,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    #[inline]
    pub fn is_portal(&self) -> bool {
        self.portal.is_some()
    }
}

/*--------------------------- sectors --------------------------------*/

#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    /// Ordered, non-self-intersecting outline.
    pub vertices: Vec<Vertex>,
    pub floor_z: f32,
    pub ceiling_z: f32,
    pub floor_tex: TextureId,
    pub ceiling_tex: TextureId,
    /// 0 = black … 255 = full bright
    pub light: u8,
    /// `walls[i]` joins `vertices[i]` to `vertices[(i + 1) % n]`.
    pub walls: Vec<Wall>,
}

impl Sector {
    /// Fewer than three vertices: no area, never rendered or located.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.ceiling_z - self.floor_z
    }
}

/*--------------------------- portals --------------------------------*/

/// Two-way link between a matched wall pair of two sectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub name: String,
    pub sector_a: SectorId,
    pub wall_a: WallId,
    pub sector_b: SectorId,
    pub wall_b: WallId,
    /// Shared edge, copied from `sector_a`'s wall.
    pub start: Vertex,
    pub end: Vertex,
}

impl Portal {
    /// The sector on the far side when looking out of `from`.
    ///
    /// `None` if `from` is not one of the two linked sectors.
    #[inline]
    pub fn other_side(&self, from: SectorId) -> Option<SectorId> {
        if from == self.sector_a {
            Some(self.sector_b)
        } else if from == self.sector_b {
            Some(self.sector_a)
        } else {
            None
        }
    }
}

/*------------------------ bounds-checked access ----------------------*/

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id)
    }

    #[inline]
    pub fn wall(&self, sector: SectorId, wall: WallId) -> Option<&Wall> {
        self.sectors.get(sector)?.walls.get(wall)
    }

    #[inline]
    pub fn portal(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id)
    }

    /// Follow `wall.portal` out of sector `from`.
    ///
    /// Dangling ids and portals that do not touch `from` both resolve to
    /// `None`, i.e. the wall behaves as solid.
    pub fn portal_target(&self, from: SectorId, wall: &Wall) -> Option<SectorId> {
        let portal = self.portal(wall.portal?)?;
        let other = portal.other_side(from)?;
        self.sectors.get(other).map(|_| other)
    }
}
