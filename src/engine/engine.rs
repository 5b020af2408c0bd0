use std::cell::Cell;

use crate::{
    engine::{
        raycast::{cast_column, cast_frame, ray_angle},
        strips::{ColumnCtx, draw_column, pitch_offset, projection_scale},
        types::{ColumnHits, FrameStats, RenderConfig, Screen, Viewer},
    },
    renderer::StripSink,
    world::{Camera, Map, Sector, SectorId, Texture, TextureCache, TextureError, TextureId},
};

/// Frame driver: owns the texture cache and the render settings, borrows
/// the map and camera for the duration of one [`Engine::render`] call.
///
/// Rendering is synchronous and never writes to the map.  `render` takes
/// `&self` so a sink may borrow [`Engine::textures`] during the frame.
pub struct Engine {
    textures: TextureCache,
    config: RenderConfig,
    /// set once "camera outside every sector" has been logged
    warned_no_sector: Cell<bool>,
}

impl Engine {
    pub fn new(textures: TextureCache, config: RenderConfig) -> Self {
        Self {
            textures,
            config,
            warned_no_sector: Cell::new(false),
        }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    #[inline]
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Host-facing texture upload; must not overlap a `render` call, which
    /// `&mut self` guarantees.
    pub fn load_texture(
        &mut self,
        id: TextureId,
        tex: Texture,
    ) -> Result<Option<Texture>, TextureError> {
        self.textures.load(id, tex)
    }

    /// Hit lists for every column, without drawing anything.
    ///
    /// Empty lists when the camera has no usable sector.
    pub fn cast(&self, map: &Map, camera: &Camera, width: usize) -> Vec<ColumnHits> {
        match self.current_sector(map, camera) {
            Some((id, _)) => cast_frame(map, id, camera.pos, camera.yaw, width, &self.config),
            None => vec![ColumnHits::new(); width],
        }
    }

    /// Render one full frame into `sink`.
    ///
    /// Strips go out column by column, left to right, top to bottom within
    /// a column.  A camera outside every sector draws nothing.
    pub fn render<S: StripSink + ?Sized>(
        &self,
        map: &Map,
        camera: &Camera,
        width: usize,
        height: usize,
        sink: &mut S,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        sink.begin_frame(width, height);

        let Some((sector_id, sector)) = self.current_sector(map, camera) else {
            if !self.warned_no_sector.replace(true) {
                log::warn!(
                    "camera at ({:.1}, {:.1}) is outside every sector; nothing to draw",
                    camera.pos.x,
                    camera.pos.y
                );
            }
            sink.end_frame();
            return stats;
        };
        self.warned_no_sector.set(false);

        if width == 0 || height == 0 {
            sink.end_frame();
            return stats;
        }

        let cfg = &self.config;
        let screen = Screen::new(width, height);
        let view = Viewer {
            origin: camera.pos,
            yaw: camera.yaw,
            eye_z: camera.height,
            focal: projection_scale(width, cfg.fov),
            horizon: screen.half_h + pitch_offset(height, camera.pitch),
        };
        let ctx = ColumnCtx {
            screen: &screen,
            view: &view,
            cfg,
            textures: &self.textures,
            sector,
        };

        for x in 0..width {
            let angle = ray_angle(camera.yaw, cfg.fov, x, width);
            let hits = cast_column(map, sector_id, camera.pos, camera.yaw, angle, cfg);

            stats.columns += 1;
            stats.hits += hits.len();
            stats.portal_hits += hits.iter().filter(|h| h.is_portal()).count();
            stats.strips += draw_column(&ctx, x, angle, hits.first(), sink);
        }

        sink.end_frame();
        log::trace!("frame {width}×{height} in sector {sector_id}: {stats:?}");
        stats
    }

    /// The camera's cached sector, if it still exists and has area.
    fn current_sector<'m>(&self, map: &'m Map, camera: &Camera) -> Option<(SectorId, &'m Sector)> {
        let id = camera.sector?;
        let sector = map.sector(id)?;
        (!sector.is_degenerate()).then_some((id, sector))
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
