//! render_ppm.rs - render one frame of a built-in two-room map to a PPM.
//!
//! USAGE:
//! ```bash
//! cargo run --release --bin render_ppm -- \
//!     --out frame.ppm --width 640 --height 480 --yaw 20
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use glam::vec2;

use portalcast::{
    engine::{Engine, RenderConfig},
    renderer::FrameBuffer,
    world::{Camera, Map, SectorDesc, Texture, TextureCache, TextureId},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Output image (binary PPM, P6)
    #[arg(long, value_name = "FILE", default_value = "frame.ppm")]
    out: PathBuf,

    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Camera ground position
    #[arg(long, default_value_t = 96.0)]
    x: f32,
    #[arg(long, default_value_t = 128.0)]
    z: f32,

    /// Eye height
    #[arg(long, default_value_t = 48.0)]
    eye: f32,

    /// Heading, degrees (0 = +X)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    yaw: f32,

    /// Up/down look, degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pitch: f32,
}

const FLOOR: TextureId = 1;
const CEILING: TextureId = 2;
const BRICK: TextureId = 3;
const STONE: TextureId = 4;

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let map = demo_map()?;
    for err in map.validate() {
        println!("map warning: {err}");
    }

    let mut engine = Engine::new(
        TextureCache::default(),
        RenderConfig {
            fov: opts.fov.to_radians(),
            ..RenderConfig::default()
        },
    );
    engine.load_texture(FLOOR, checker(16, 0x00_5A4632, 0x00_3C2E20))?;
    engine.load_texture(CEILING, checker(32, 0x00_8C8C8C, 0x00_787878))?;
    engine.load_texture(BRICK, bricks(64, 0x00_A0402A, 0x00_D8D0C0))?;
    engine.load_texture(STONE, bricks(32, 0x00_606878, 0x00_30343C))?;

    let camera = Camera::new(
        &map,
        vec2(opts.x, opts.z),
        opts.eye,
        opts.yaw.to_radians(),
        opts.pitch.to_radians(),
    );
    match camera.sector {
        Some(s) => println!("camera in sector {s}"),
        None => println!("camera is outside the map; the frame will be empty"),
    }

    let mut fb = FrameBuffer::new(engine.textures());
    let t0 = Instant::now();
    let stats = engine.render(&map, &camera, opts.width, opts.height, &mut fb);
    println!(
        "rendered {}×{} in {:.2} ms: {} hits ({} portal), {} strips",
        opts.width,
        opts.height,
        t0.elapsed().as_secs_f64() * 1000.0,
        stats.hits,
        stats.portal_hits,
        stats.strips
    );

    write_ppm(&opts.out, &fb).with_context(|| format!("writing {}", opts.out.display()))?;
    println!("wrote {}", opts.out.display());
    Ok(())
}

/// Hall (sector 0) opening through a portal into a lower, darker room.
fn demo_map() -> anyhow::Result<Map> {
    let mut map = Map::new();
    let hall = map.add_sector(
        SectorDesc::new(vec![
            vec2(0.0, 0.0),
            vec2(384.0, 0.0),
            vec2(384.0, 256.0),
            vec2(0.0, 256.0),
        ])
        .heights(0.0, 128.0)
        .textures(FLOOR, CEILING, BRICK),
    );
    let room = map.add_sector(
        SectorDesc::new(vec![
            vec2(384.0, 0.0),
            vec2(640.0, 64.0),
            vec2(640.0, 192.0),
            vec2(384.0, 256.0),
        ])
        .heights(-16.0, 96.0)
        .textures(FLOOR, CEILING, STONE)
        .light(160),
    );
    // hall's east wall (1) is the room's west wall (3)
    map.add_portal("hall-room", (hall, 1), (room, 3))?;
    Ok(map)
}

fn checker(cells: usize, a: u32, b: u32) -> Texture {
    let size = cells * 2;
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if (x / cells + y / cells) % 2 == 0 { a } else { b }
        })
        .collect();
    Texture {
        w: size,
        h: size,
        pixels,
    }
}

fn bricks(size: usize, brick: u32, mortar: u32) -> Texture {
    let course = (size / 4).max(2);
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            let row = y / course;
            let shift = if row % 2 == 0 { 0 } else { size / 4 };
            let horizontal = y % course == 0;
            let vertical = (x + shift) % (size / 2).max(1) == 0;
            if horizontal || vertical { mortar } else { brick }
        })
        .collect();
    Texture {
        w: size,
        h: size,
        pixels,
    }
}

fn write_ppm(path: &Path, fb: &FrameBuffer<'_>) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", fb.width(), fb.height())?;
    for &px in fb.pixels() {
        out.write_all(&[(px >> 16) as u8, (px >> 8) as u8, px as u8])?;
    }
    out.flush()
}
