use glam::Vec2;

use crate::{
    engine::types::{ColumnHits, RayHit, RenderConfig},
    world::{
        Map, SectorId, Wall, WallFlags,
        helpers::{EPSILON, segment_intersect},
    },
};

/// World angle of the ray through screen column `x`.
///
/// ```text
/// angle = yaw - fov/2 + (x / width) * fov
/// ```
#[inline]
pub fn ray_angle(yaw: f32, fov: f32, x: usize, width: usize) -> f32 {
    yaw - fov * 0.5 + (x as f32 / width as f32) * fov
}

/// Linear texture coordinate of `point` along `wall`: 0 at `start`, 1 at
/// `end`, mirrored for `FLIP_U`.  Zero-length walls map to 0.
#[inline]
pub fn wall_tex_u(wall: &Wall, point: Vec2) -> f32 {
    let len = wall.length();
    if len < EPSILON {
        return 0.0;
    }
    let u = point.distance(wall.start) / len;
    if wall.flags.contains(WallFlags::FLIP_U) {
        1.0 - u
    } else {
        u
    }
}

/// Intersect one ray with every wall of `sector` and return the hits
/// nearest first.
///
/// Only the given sector is searched: portal walls are reported, never
/// crossed.  An out-of-range or degenerate sector yields no hits.
pub fn cast_column(
    map: &Map,
    sector: SectorId,
    origin: Vec2,
    yaw: f32,
    angle: f32,
    cfg: &RenderConfig,
) -> ColumnHits {
    let mut hits = ColumnHits::new();

    let Some(sec) = map.sector(sector) else {
        return hits;
    };
    if sec.is_degenerate() {
        return hits;
    }

    let dir = Vec2::from_angle(angle);
    let far = origin + dir * cfg.ray_length;
    let forward = Vec2::from_angle(yaw);
    let wall_height = sec.height();

    for (wall_id, wall) in sec.walls.iter().enumerate() {
        let Some(point) = segment_intersect(origin, far, wall.start, wall.end) else {
            continue;
        };

        // depth along the view axis doubles as the fisheye correction;
        // `!(>=)` also drops NaN
        let depth = (point - origin).dot(forward);
        if !(depth >= cfg.near) {
            continue;
        }

        hits.push(RayHit {
            point,
            depth,
            tex_u: wall_tex_u(wall, point),
            wall: wall_id,
            wall_height,
            tex_id: wall.tex_middle,
            portal: map.portal_target(sector, wall),
        });
    }

    hits.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    hits
}

/// Hit lists for all `width` columns, left to right.
pub fn cast_frame(
    map: &Map,
    sector: SectorId,
    origin: Vec2,
    yaw: f32,
    width: usize,
    cfg: &RenderConfig,
) -> Vec<ColumnHits> {
    (0..width)
        .map(|x| {
            let angle = ray_angle(yaw, cfg.fov, x, width);
            cast_column(map, sector, origin, yaw, angle, cfg)
        })
        .collect()
}

/*──────────────────────────────── Tests ───────────────────────────────*/
