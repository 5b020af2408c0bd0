use glam::Vec2;

use crate::{
    engine::types::{RayHit, RenderConfig, Screen, Viewer},
    renderer::{Strip, StripKind, StripSink},
    world::{Sector, TextureCache, TextureId, helpers::EPSILON},
};

/// Pinhole scale for a `width`-pixel screen:
///
/// ```text
/// focal = (width / 2) / tan(fov / 2)
/// ```
#[inline]
pub fn projection_scale(width: usize, fov: f32) -> f32 {
    (width as f32) * 0.5 / (fov * 0.5).tan()
}

/// Vertical shift of the whole view for an up/down look.
#[inline]
pub fn pitch_offset(height: usize, pitch: f32) -> f32 {
    height as f32 * pitch.tan()
}

/// Unclamped screen rows of a wall's top and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallProjection {
    pub top: f32,
    pub bottom: f32,
}

/// Screen row of a point `rel_height` above the eye, `depth` ahead of it.
#[inline]
pub fn screen_y(view: &Viewer, rel_height: f32, depth: f32) -> f32 {
    view.horizon - (view.focal / depth) * rel_height
}

/// Project the sector's ceiling and floor at the hit's depth.
pub fn project_wall(view: &Viewer, hit: &RayHit, sector: &Sector) -> WallProjection {
    WallProjection {
        top: screen_y(view, sector.ceiling_z - view.eye_z, hit.depth),
        bottom: screen_y(view, sector.floor_z - view.eye_z, hit.depth),
    }
}

/// Everything one column needs besides the sink.
pub struct ColumnCtx<'a> {
    pub screen: &'a Screen,
    pub view: &'a Viewer,
    pub cfg: &'a RenderConfig,
    pub textures: &'a TextureCache,
    pub sector: &'a Sector,
}

/// Emit the strips for screen column `x`: ceiling rows, the nearest wall,
/// floor rows.  Returns the number of strips sent to `sink`.
///
/// Portal walls are painted like solid ones; nothing behind them is drawn.
pub fn draw_column<S: StripSink + ?Sized>(
    ctx: &ColumnCtx<'_>,
    x: usize,
    angle: f32,
    nearest: Option<&RayHit>,
    sink: &mut S,
) -> usize {
    let h = ctx.screen.h as i32;
    let mut emitted = 0;

    /* wall span, clamped to the screen ---------------------------------*/
    let (ceil_end, floor_start) = match nearest {
        Some(hit) => {
            let proj = project_wall(ctx.view, hit, ctx.sector);
            let y1 = proj.top.ceil() as i32;
            let y2 = proj.bottom.floor() as i32;
            let ceil_end = y1.clamp(0, h);
            let floor_start = y2.saturating_add(1).clamp(ceil_end, h);

            if ceil_end < floor_start {
                // zero-height sectors collapse the span to a point
                let span = proj.bottom - proj.top;
                let v_at = |y: i32| {
                    if span.abs() < EPSILON {
                        0.0
                    } else {
                        (y as f32 - proj.top) / span
                    }
                };
                sink.draw_strip(&Strip {
                    column: x as u32,
                    y1: ceil_end,
                    y2: floor_start - 1,
                    tex_u: hit.tex_u,
                    tex_id: ctx.textures.resolve(hit.tex_id),
                    kind: StripKind::Wall,
                    v_top: v_at(ceil_end),
                    v_bottom: v_at(floor_start - 1),
                    light: ctx.sector.light,
                    portal: hit.portal,
                });
                emitted += 1;
            }
            (ceil_end, floor_start)
        }
        None => {
            let split = (ctx.view.horizon.round() as i32).clamp(0, h);
            (split, split)
        }
    };

    /* floor / ceiling: invert the projection row by row ----------------*/
    let dir = Vec2::from_angle(angle);
    let ceil_rel = ctx.sector.ceiling_z - ctx.view.eye_z;
    let floor_rel = ctx.sector.floor_z - ctx.view.eye_z;

    let mut plane_row = |y: i32, rel: f32, kind: StripKind, tex: TextureId| {
        let Some((u, v)) = plane_uv(ctx, y, rel, dir) else {
            return;
        };
        sink.draw_strip(&Strip {
            column: x as u32,
            y1: y,
            y2: y,
            tex_u: u,
            tex_id: ctx.textures.resolve(tex),
            kind,
            v_top: v,
            v_bottom: v,
            light: ctx.sector.light,
            portal: None,
        });
        emitted += 1;
    };

    for y in 0..ceil_end {
        plane_row(y, ceil_rel, StripKind::Ceiling, ctx.sector.ceiling_tex);
    }
    for y in floor_start..h {
        plane_row(y, floor_rel, StripKind::Floor, ctx.sector.floor_tex);
    }

    emitted
}

/// Tiled UV of the plane `rel` above the eye, as seen through row `y`.
///
/// `None` when the row cannot see that plane: non-positive, non-finite or
/// implausibly large distance.
fn plane_uv(ctx: &ColumnCtx<'_>, y: i32, rel: f32, dir: Vec2) -> Option<(f32, f32)> {
    let dy = ctx.view.horizon - (y as f32 + 0.5);
    let dist = ctx.view.focal * rel / dy;
    if !(dist > 0.0 && dist <= ctx.cfg.max_plane_distance) {
        return None;
    }

    let world = ctx.view.origin + dir * dist;
    let tile = ctx.cfg.tile_size;
    Some((
        (world.x / tile).rem_euclid(1.0),
        (world.y / tile).rem_euclid(1.0),
    ))
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Map, SectorDesc};
    use glam::vec2;

    fn sector() -> Sector {
        let mut map = Map::new();
        map.add_sector(
            SectorDesc::new(vec![
                vec2(0.0, 0.0),
                vec2(256.0, 0.0),
                vec2(256.0, 256.0),
                vec2(0.0, 256.0),
            ])
            .heights(0.0, 256.0)
            .textures(1, 2, 3),
        );
        map.sectors.remove(0)
    }

    fn hit(depth: f32) -> RayHit {
        RayHit {
            point: vec2(depth, 0.0),
            depth,
            tex_u: 0.25,
            wall: 1,
            wall_height: 256.0,
            tex_id: 3,
            portal: None,
        }
    }

    fn viewer(screen: &Screen, cfg: &RenderConfig, eye_z: f32, pitch: f32) -> Viewer {
        Viewer {
            origin: Vec2::ZERO,
            yaw: 0.0,
            eye_z,
            focal: projection_scale(screen.w, cfg.fov),
            horizon: screen.half_h + pitch_offset(screen.h, pitch),
        }
    }

    #[test]
    fn projection_scale_at_90_deg() {
        assert!((projection_scale(640, std::f32::consts::FRAC_PI_2) - 320.0).abs() < 1e-3);
    }

    #[test]
    fn centred_eye_projects_symmetrically() {
        let screen = Screen::new(640, 480);
        let cfg = RenderConfig::default();
        let view = viewer(&screen, &cfg, 128.0, 0.0);
        let p = project_wall(&view, &hit(256.0), &sector());

        assert!(((p.top + p.bottom) * 0.5 - 240.0).abs() < 1e-3);
        // 554.256 / 256 * 128
        assert!((p.bottom - p.top - 2.0 * 277.128).abs() < 1e-2);
    }

    #[test]
    fn pitch_shifts_the_whole_column() {
        let screen = Screen::new(640, 480);
        let cfg = RenderConfig::default();
        let level = project_wall(&viewer(&screen, &cfg, 128.0, 0.0), &hit(256.0), &sector());
        let up = project_wall(&viewer(&screen, &cfg, 128.0, 0.1), &hit(256.0), &sector());
        let shift = 480.0 * 0.1_f32.tan();
        assert!((up.top - level.top - shift).abs() < 1e-3);
        assert!((up.bottom - level.bottom - shift).abs() < 1e-3);
    }

    #[test]
    fn column_covers_every_row_once() {
        let screen = Screen::new(64, 48);
        let cfg = RenderConfig::default();
        let view = viewer(&screen, &cfg, 128.0, 0.0);
        let textures = TextureCache::default();
        let sector = sector();
        let ctx = ColumnCtx {
            screen: &screen,
            view: &view,
            cfg: &cfg,
            textures: &textures,
            sector: &sector,
        };

        // far wall: ceiling, wall and floor all visible
        let mut strips: Vec<Strip> = Vec::new();
        let n = draw_column(&ctx, 5, 0.0, Some(&hit(2000.0)), &mut strips);
        assert_eq!(n, strips.len());

        let mut covered = vec![0; 48];
        for s in &strips {
            for y in s.y1..=s.y2 {
                covered[y as usize] += 1;
            }
        }
        assert!(covered.iter().all(|&c| c == 1), "{covered:?}");

        let wall = strips.iter().find(|s| s.kind == StripKind::Wall).unwrap();
        assert_eq!(wall.tex_u, 0.25);
        assert!(strips.iter().any(|s| s.kind == StripKind::Ceiling));
        assert!(strips.iter().any(|s| s.kind == StripKind::Floor));
        // none of the ids were loaded
        assert!(strips.iter().all(|s| s.tex_id == crate::world::NO_TEXTURE));
    }

    #[test]
    fn floor_uv_tiles() {
        let screen = Screen::new(64, 48);
        let cfg = RenderConfig::default();
        let view = viewer(&screen, &cfg, 32.0, 0.0);
        let textures = TextureCache::default();
        let sector = sector();
        let ctx = ColumnCtx {
            screen: &screen,
            view: &view,
            cfg: &cfg,
            textures: &textures,
            sector: &sector,
        };

        // row whose floor point lies 96 units ahead: dy = focal * 32 / 96
        let dy = view.focal * 32.0 / 96.0;
        let y = (view.horizon + dy - 0.5).round() as i32;
        let (u, v) = plane_uv(&ctx, y, -32.0, vec2(1.0, 0.0)).unwrap();
        let depth = view.focal * -32.0 / (view.horizon - (y as f32 + 0.5));
        assert!((u - (depth / 64.0).fract()).abs() < 1e-4);
        assert!(v.abs() < 1e-6);

        // rows above the horizon never see the floor
        assert_eq!(plane_uv(&ctx, 0, -32.0, vec2(1.0, 0.0)), None);
    }

    #[test]
    fn off_centre_floor_walks_the_row_distance_along_the_ray() {
        let screen = Screen::new(640, 480);
        let cfg = RenderConfig::default();
        let mut view = viewer(&screen, &cfg, 128.0, 0.0);
        view.origin = vec2(2048.0, 2048.0);
        let textures = TextureCache::default();
        let sector = sector();
        let ctx = ColumnCtx {
            screen: &screen,
            view: &view,
            cfg: &cfg,
            textures: &textures,
            sector: &sector,
        };

        // leftmost column, 30° off the view axis
        let angle = crate::engine::raycast::ray_angle(0.0, cfg.fov, 0, 640);
        let mut strips: Vec<Strip> = Vec::new();
        draw_column(&ctx, 0, angle, None, &mut strips);

        let row = strips
            .iter()
            .find(|s| s.kind == StripKind::Floor && s.y1 == 470)
            .unwrap();
        let dist = view.focal * -128.0 / (view.horizon - 470.5);
        let world = view.origin + Vec2::from_angle(angle) * dist;
        let (u, v) = ((world.x / 64.0).rem_euclid(1.0), (world.y / 64.0).rem_euclid(1.0));
        assert!((row.tex_u - u).abs() < 1e-3, "u={} expected {u}", row.tex_u);
        assert!((row.v_top - v).abs() < 1e-3, "v={} expected {v}", row.v_top);
    }

    #[test]
    fn zero_height_wall_has_finite_v() {
        let screen = Screen::new(64, 48);
        let cfg = RenderConfig::default();
        let view = viewer(&screen, &cfg, 0.0, 0.0);
        let textures = TextureCache::default();
        let mut sector = sector();
        sector.ceiling_z = 0.0;
        let ctx = ColumnCtx {
            screen: &screen,
            view: &view,
            cfg: &cfg,
            textures: &textures,
            sector: &sector,
        };

        let mut strips: Vec<Strip> = Vec::new();
        draw_column(&ctx, 0, 0.0, Some(&hit(256.0)), &mut strips);
        let wall = strips.iter().find(|s| s.kind == StripKind::Wall).unwrap();
        assert_eq!((wall.y1, wall.y2), (24, 24));
        assert_eq!((wall.v_top, wall.v_bottom), (0.0, 0.0));
        assert!(strips.iter().all(|s| s.tex_u.is_finite() && s.v_top.is_finite()));
    }

    #[test]
    fn no_hit_still_draws_planes() {
        let screen = Screen::new(16, 16);
        let cfg = RenderConfig::default();
        let view = viewer(&screen, &cfg, 128.0, 0.0);
        let textures = TextureCache::default();
        let sector = sector();
        let ctx = ColumnCtx {
            screen: &screen,
            view: &view,
            cfg: &cfg,
            textures: &textures,
            sector: &sector,
        };
        let mut strips: Vec<Strip> = Vec::new();
        draw_column(&ctx, 0, 0.0, None, &mut strips);
        assert!(strips.iter().all(|s| s.kind != StripKind::Wall));
        assert!(strips.iter().all(|s| s.tex_u.is_finite() && s.v_top.is_finite()));
    }
}
