use glam::Vec2;

use super::helpers::{point_in_polygon, polygon_area};
use super::{Map, SectorId};

// ──────────────────────────────────────────────────────────────────────────
//                       Map – sector lookup
// ──────────────────────────────────────────────────────────────────────────
impl Map {
    /// Sector containing the ground point `p`, or `None`.
    ///
    /// Overlapping sectors (nesting, or editing mistakes) resolve to the one
    /// with the smallest area; equal areas resolve to the lowest id.
    /// Degenerate sectors never match.
    pub fn locate_sector(&self, p: Vec2) -> Option<SectorId> {
        let mut hits = self
            .sectors
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_degenerate() && point_in_polygon(p, &s.vertices))
            .map(|(id, _)| id);

        let first = hits.next()?;
        let Some(second) = hits.next() else {
            return Some(first);
        };

        let area = |id: SectorId| polygon_area(&self.sectors[id].vertices);
        let mut best = (first, area(first));
        for id in std::iter::once(second).chain(hits) {
            let a = area(id);
            if a < best.1 {
                best = (id, a);
            }
        }
        Some(best.0)
    }
}
