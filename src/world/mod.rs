mod builder;
mod camera;
mod geometry;
pub mod helpers;
mod locator;
mod texture;

pub use builder::{MapError, SectorDesc};

pub use geometry::{Map, Portal, PortalId, Sector, SectorId, Vertex, Wall, WallFlags, WallId};

pub use camera::Camera;

pub use texture::{NO_TEXTURE, Texture, TextureCache, TextureError, TextureId};
