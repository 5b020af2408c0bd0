//! Editor-side construction and checking of a [`Map`].
//!
//! The renderer tolerates every problem [`Map::validate`] reports; the
//! checks exist so an editor can surface them to the user.

use thiserror::Error;

use super::geometry::{Map, Portal, PortalId, Sector, SectorId, Vertex, Wall, WallId};
use super::texture::TextureId;

/// Everything needed to create a sector.  Walls are derived from the
/// outline by [`Map::add_sector`].
#[derive(Clone, Debug)]
pub struct SectorDesc {
    pub vertices: Vec<Vertex>,
    pub floor_z: f32,
    pub ceiling_z: f32,
    pub floor_tex: TextureId,
    pub ceiling_tex: TextureId,
    pub wall_tex: TextureId,
    pub light: u8,
}

impl SectorDesc {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            floor_z: 0.0,
            ceiling_z: 128.0,
            floor_tex: 0,
            ceiling_tex: 0,
            wall_tex: 0,
            light: 255,
        }
    }

    pub fn heights(mut self, floor_z: f32, ceiling_z: f32) -> Self {
        self.floor_z = floor_z;
        self.ceiling_z = ceiling_z;
        self
    }

    pub fn textures(mut self, floor: TextureId, ceiling: TextureId, wall: TextureId) -> Self {
        self.floor_tex = floor;
        self.ceiling_tex = ceiling;
        self.wall_tex = wall;
        self
    }

    pub fn light(mut self, light: u8) -> Self {
        self.light = light;
        self
    }
}

/// Invariant violations found in a map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("sector {0} does not exist")]
    BadSector(SectorId),

    #[error("sector {sector} has no wall {wall}")]
    BadWall { sector: SectorId, wall: WallId },

    #[error("sector {sector} has {vertices} vertices but {walls} walls")]
    WallCountMismatch {
        sector: SectorId,
        vertices: usize,
        walls: usize,
    },

    #[error("sector {0} has fewer than 3 vertices")]
    DegenerateSector(SectorId),

    #[error("wall {wall} of sector {sector} references missing portal {portal}")]
    BadPortal {
        sector: SectorId,
        wall: WallId,
        portal: PortalId,
    },

    #[error("portal {portal} does not link sector {sector}")]
    PortalSectorMismatch { portal: PortalId, sector: SectorId },

    #[error("portal {portal} endpoint wall {wall} of sector {sector} does not point back")]
    PortalWallMismatch {
        portal: PortalId,
        sector: SectorId,
        wall: WallId,
    },
}

impl Map {
    /// Append a sector; wall `i` joins vertex `i` to vertex `(i+1) % n`.
    pub fn add_sector(&mut self, desc: SectorDesc) -> SectorId {
        let n = desc.vertices.len();
        let walls = (0..n)
            .map(|i| {
                let mut w = Wall::new(desc.vertices[i], desc.vertices[(i + 1) % n]);
                w.tex_lower = desc.wall_tex;
                w.tex_middle = desc.wall_tex;
                w.tex_upper = desc.wall_tex;
                w.z_split_low = desc.floor_z;
                w.z_split_high = desc.ceiling_z;
                w
            })
            .collect();

        self.sectors.push(Sector {
            vertices: desc.vertices,
            floor_z: desc.floor_z,
            ceiling_z: desc.ceiling_z,
            floor_tex: desc.floor_tex,
            ceiling_tex: desc.ceiling_tex,
            light: desc.light,
            walls,
        });
        self.sectors.len() - 1
    }

    /// Link wall `a.1` of sector `a.0` with wall `b.1` of sector `b.0`.
    pub fn add_portal<S: Into<String>>(
        &mut self,
        name: S,
        a: (SectorId, WallId),
        b: (SectorId, WallId),
    ) -> Result<PortalId, MapError> {
        let edge = {
            let wa = self.checked_wall(a)?;
            self.checked_wall(b)?;
            (wa.start, wa.end)
        };

        let id = self.portals.len();
        self.portals.push(Portal {
            name: name.into(),
            sector_a: a.0,
            wall_a: a.1,
            sector_b: b.0,
            wall_b: b.1,
            start: edge.0,
            end: edge.1,
        });
        for (s, w) in [a, b] {
            self.sectors[s].walls[w].portal = Some(id);
        }
        Ok(id)
    }

    fn checked_wall(&self, (s, w): (SectorId, WallId)) -> Result<&Wall, MapError> {
        let sector = self.sectors.get(s).ok_or(MapError::BadSector(s))?;
        sector
            .walls
            .get(w)
            .ok_or(MapError::BadWall { sector: s, wall: w })
    }

    /// Every invariant breach in the map, in sector then portal order.
    pub fn validate(&self) -> Vec<MapError> {
        let mut errors = Vec::new();

        for (sid, sector) in self.sectors.iter().enumerate() {
            if sector.is_degenerate() {
                errors.push(MapError::DegenerateSector(sid));
            }
            if sector.walls.len() != sector.vertices.len() {
                errors.push(MapError::WallCountMismatch {
                    sector: sid,
                    vertices: sector.vertices.len(),
                    walls: sector.walls.len(),
                });
            }
            for (wid, wall) in sector.walls.iter().enumerate() {
                let Some(pid) = wall.portal else { continue };
                match self.portals.get(pid) {
                    None => errors.push(MapError::BadPortal {
                        sector: sid,
                        wall: wid,
                        portal: pid,
                    }),
                    Some(p) if p.other_side(sid).is_none() => {
                        errors.push(MapError::PortalSectorMismatch {
                            portal: pid,
                            sector: sid,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        for (pid, portal) in self.portals.iter().enumerate() {
            for (s, w) in [
                (portal.sector_a, portal.wall_a),
                (portal.sector_b, portal.wall_b),
            ] {
                match self.checked_wall((s, w)) {
                    Err(e) => errors.push(e),
                    Ok(wall) if wall.portal != Some(pid) => {
                        errors.push(MapError::PortalWallMismatch {
                            portal: pid,
                            sector: s,
                            wall: w,
                        })
                    }
                    Ok(_) => {}
                }
            }
        }

        errors
    }
}
