// Id-addressed store of decoded images.
// The renderer and the map interact through `TextureId` only; decoding is
// the host application's job.

use std::collections::HashMap;

/// Integer handle chosen by whoever loads the texture.
pub type TextureId = u16;

/// `TextureId` whose pixels are the fallback.
/// `TextureCache::new()` always populates it; loading id 0 replaces it.
pub const NO_TEXTURE: TextureId = 0;

/// CPU-side image: 32-bit **0x00RRGGBB** in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

/// Convenience checkerboard 8×8 (magenta/black).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: u32 = 0x00_FF00FF;
        const DARK: u32 = 0x00_000000;
        let mut pix = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

impl Texture {
    /// Nearest texel at normalised `(u, v)`; coordinates wrap.
    /// A malformed image samples as black.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        if self.w == 0 || self.h == 0 {
            return 0;
        }
        let tx = ((u.rem_euclid(1.0) * self.w as f32) as usize).min(self.w - 1);
        let ty = ((v.rem_euclid(1.0) * self.h as f32) as usize).min(self.h - 1);
        self.pixels.get(ty * self.w + tx).copied().unwrap_or(0)
    }
}

/// Things that can go wrong when loading into the cache.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Pixel buffer length disagrees with the declared size.
    #[error("texture {id}: {w}×{h} image given {len} pixels")]
    BadDimensions {
        id: TextureId,
        w: usize,
        h: usize,
        len: usize,
    },

    /// Zero width or height.
    #[error("texture {0} is empty")]
    Empty(TextureId),
}

/// Explicitly owned texture store handed to the engine at construction.
///
/// * Does **not** know about file formats.
/// * Id **0** always resolves to something: the checkerboard until a
///   caller loads its own fallback there.
/// * Unknown ids resolve to id 0 instead of failing.
///
/// **Thread-safety:** loads must not race a render that reads the cache;
/// the engine owns it, so `&mut` borrowing enforces this.
pub struct TextureCache {
    fallback: Texture,
    data: HashMap<TextureId, Texture>,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new(Texture::default())
    }
}

impl TextureCache {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create a cache whose fallback (id [`NO_TEXTURE`]) is `fallback`.
    pub fn new(fallback: Texture) -> Self {
        Self {
            fallback,
            data: HashMap::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the fallback).
    pub fn len(&self) -> usize {
        self.data.len() + 1
    }

    /// True when only the fallback is present.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, id: TextureId) -> bool {
        id == NO_TEXTURE || self.data.contains_key(&id)
    }

    /// `id` if loaded, otherwise the fallback id.
    #[inline]
    pub fn resolve(&self, id: TextureId) -> TextureId {
        if self.contains(id) {
            id
        } else {
            NO_TEXTURE
        }
    }

    /// Borrow a texture, falling back to id 0 for unknown ids.
    pub fn texture(&self, id: TextureId) -> &Texture {
        self.data.get(&id).unwrap_or(&self.fallback)
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Store `tex` under `id`, returning the texture it replaced.
    pub fn load(&mut self, id: TextureId, tex: Texture) -> Result<Option<Texture>, TextureError> {
        if tex.w == 0 || tex.h == 0 {
            return Err(TextureError::Empty(id));
        }
        if tex.pixels.len() != tex.w * tex.h {
            return Err(TextureError::BadDimensions {
                id,
                w: tex.w,
                h: tex.h,
                len: tex.pixels.len(),
            });
        }
        log::debug!("texture {id}: loaded {}×{}", tex.w, tex.h);
        let old = if id == NO_TEXTURE {
            Some(std::mem::replace(&mut self.fallback, tex))
        } else {
            self.data.insert(id, tex)
        };
        if old.is_some() {
            log::debug!("texture {id}: replaced previous image");
        }
        Ok(old)
    }

    /// Drop `id`.  The fallback cannot be removed, only replaced.
    pub fn remove(&mut self, id: TextureId) -> Option<Texture> {
        if id == NO_TEXTURE {
            return None;
        }
        self.data.remove(&id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
