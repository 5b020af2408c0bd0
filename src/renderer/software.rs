//! ---------------------------------------------------------------------------
//! CPU strip rasteriser
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Samples textures from a borrowed [`TextureCache`]; unknown ids draw
//!   the cache's fallback.
//! * Columns are independent, so strips may arrive in any order.
//! ---------------------------------------------------------------------------

use crate::{
    renderer::{Rgba, Strip, StripSink},
    world::TextureCache,
};

/// Colour left in pixels no strip covered.
pub const CLEAR_COLOR: Rgba = 0x00_202020;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

pub struct FrameBuffer<'t> {
    textures: &'t TextureCache,
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl<'t> FrameBuffer<'t> {
    pub fn new(textures: &'t TextureCache) -> Self {
        Self {
            textures,
            pixels: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Finished frame, row-major.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/*──────────────────────── StripSink impl ─────────────────────────────*/
impl StripSink for FrameBuffer<'_> {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.pixels.resize(w * h, 0);
        }
        self.pixels.fill(CLEAR_COLOR);
    }

    fn draw_strip(&mut self, strip: &Strip) {
        let col = strip.column as usize;
        if col >= self.width || self.height == 0 {
            return;
        }

        /* clip to the frame */
        let y0 = strip.y1.max(0);
        let y1 = strip.y2.min(self.height as i32 - 1);
        if y0 > y1 {
            return;
        }

        let tex = self.textures.texture(strip.tex_id);
        let rows = (strip.y2 - strip.y1).max(1) as f32;
        let dv = (strip.v_bottom - strip.v_top) / rows;
        let mut v = strip.v_top + (y0 - strip.y1) as f32 * dv;

        for y in y0..=y1 {
            let texel = tex.sample(strip.tex_u, v);
            self.pixels[y as usize * self.width + col] = shade(texel, strip.light);
            v += dv;
        }
    }
}

/// Scale each channel by `light / 255`.
#[inline]
fn shade(rgb: Rgba, light: u8) -> Rgba {
    if light == u8::MAX {
        return rgb;
    }
    let l = light as u32;
    let r = ((rgb >> 16) & 0xFF) * l / 255;
    let g = ((rgb >> 8) & 0xFF) * l / 255;
    let b = (rgb & 0xFF) * l / 255;
    (r << 16) | (g << 8) | b
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{renderer::StripKind, world::Texture};

    const BLUE: Rgba = 0x00_0000FF;

    fn blue_cache() -> TextureCache {
        let mut cache = TextureCache::default();
        cache
            .load(
                1,
                Texture {
                    w: 4,
                    h: 4,
                    pixels: vec![BLUE; 16],
                },
            )
            .unwrap();
        cache
    }

    fn blue_strip(column: u32, y1: i32, y2: i32) -> Strip {
        Strip {
            column,
            y1,
            y2,
            tex_u: 0.5,
            tex_id: 1,
            kind: StripKind::Wall,
            v_top: 0.0,
            v_bottom: 1.0,
            light: 255,
            portal: None,
        }
    }

    #[test]
    fn strip_fills_its_rows_only() {
        let cache = blue_cache();
        let mut fb = FrameBuffer::new(&cache);
        fb.begin_frame(8, 8);
        fb.draw_strip(&blue_strip(2, 1, 4));
        fb.end_frame();

        for y in 0..8 {
            let expected = if (1..=4).contains(&y) { BLUE } else { CLEAR_COLOR };
            assert_eq!(fb.pixel(2, y), Some(expected), "row {y}");
            assert_eq!(fb.pixel(3, y), Some(CLEAR_COLOR));
        }
    }

    #[test]
    fn off_screen_parts_are_clipped() {
        let cache = blue_cache();
        let mut fb = FrameBuffer::new(&cache);
        fb.begin_frame(4, 4);
        fb.draw_strip(&blue_strip(0, -100, 100));
        fb.draw_strip(&blue_strip(99, 0, 3));
        assert!((0..4).all(|y| fb.pixel(0, y) == Some(BLUE)));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn unknown_texture_draws_fallback() {
        let cache = blue_cache();
        let mut fb = FrameBuffer::new(&cache);
        fb.begin_frame(2, 2);
        let mut s = blue_strip(0, 0, 1);
        s.tex_id = 500;
        fb.draw_strip(&s);
        let fallback = Texture::default();
        assert!(fallback.pixels.contains(&fb.pixel(0, 0).unwrap()));
    }

    #[test]
    fn light_scales_channels() {
        assert_eq!(shade(0x00_FF8040, 255), 0x00_FF8040);
        assert_eq!(shade(0x00_FF8040, 0), 0);
        assert_eq!(shade(0x00_FF0000, 51), 0x00_330000);
    }
}
