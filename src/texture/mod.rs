//! Seeded procedural textures for bodies, comets, asteroids and rings.

pub mod canvas;
pub mod recipes;

use std::collections::HashMap;
use std::io::Cursor;
use std::rc::Rc;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use canvas::Canvas;

pub const MIN_RESOLUTION: u32 = 64;
pub const MAX_RESOLUTION: u32 = 4096;
const ASTEROID_SIZE: u32 = 128;
const COMET_SIZE: u32 = 64;
const RING_SIZE: (u32, u32) = (1024, 32);
const NORMAL_STRENGTH: f32 = 3.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// A named body. The tint is used when there's no recipe for the name.
    Body { key: String, tint: [u8; 3] },
    Comet([u8; 3]),
    Asteroid([u8; 3]),
    Rings,
}

impl TextureKey {
    /// Name to register the texture under with the renderer.
    pub fn resource_name(&self) -> String {
        let hex = |rgb: &[u8; 3]| format!("{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
        match self {
            TextureKey::Body { key, tint } => format!("body/{}/{}", key, hex(tint)),
            TextureKey::Comet(rgb) => format!("comet/{}", hex(rgb)),
            TextureKey::Asteroid(rgb) => format!("asteroid/{}", hex(rgb)),
            TextureKey::Rings => "rings".to_owned(),
        }
    }

    // Distinct for every key, stable across runs
    fn seed_salt(&self) -> u64 {
        let (tag, name, rgb): (u8, &str, [u8; 3]) = match self {
            TextureKey::Body { key, tint } => (1, key.as_str(), *tint),
            TextureKey::Comet(rgb) => (2, "", *rgb),
            TextureKey::Asteroid(rgb) => (3, "", *rgb),
            TextureKey::Rings => (4, "", [0; 3]),
        };
        // FNV-1a
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in std::iter::once(tag).chain(name.bytes()).chain(rgb) {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        hash
    }
}

pub fn rgb_bytes(color: &nalgebra::Point3<f32>) -> [u8; 3] {
    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

#[derive(Debug, Clone)]
pub struct ProceduralTexture {
    pub width: u32,
    pub height: u32,
    pub color: RgbaImage,
    /// Tangent-space normals derived from the color's luminance.
    pub normal: RgbaImage,
}

impl ProceduralTexture {
    fn from_canvas(canvas: Canvas) -> Self {
        let normal = canvas.normal_map(NORMAL_STRENGTH).into_image();
        let width = canvas.width();
        let height = canvas.height();
        ProceduralTexture {
            width,
            height,
            color: canvas.into_image(),
            normal,
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.color.clone()).write_to(&mut bytes, ImageOutputFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

/// Keeps a requested texture width within what we're willing to paint.
pub fn clamp_resolution(resolution: u32) -> u32 {
    let clamped = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    if resolution > MAX_RESOLUTION {
        log::warn!("Texture size {} is too large, using {}", resolution, clamped);
    }
    clamped
}

/// Paints the texture for `key`. Same key and seed, same pixels.
pub fn build(key: &TextureKey, seed: u64, resolution: u32) -> ProceduralTexture {
    let resolution = clamp_resolution(resolution);
    let mut rng = SmallRng::seed_from_u64(seed ^ key.seed_salt());
    let transparent = [0.0, 0.0, 0.0, 0.0];
    let opaque = [0.0, 0.0, 0.0, 1.0];

    let canvas = match key {
        TextureKey::Body { key, tint } => {
            // Equirectangular, twice as wide as tall
            let mut canvas = Canvas::new(resolution, resolution / 2, opaque);
            match key.as_str() {
                "sun" => recipes::sun(&mut canvas, &mut rng),
                "mercury" => recipes::mercury(&mut canvas, &mut rng),
                "venus" => recipes::venus(&mut canvas, &mut rng),
                "earth" => recipes::earth(&mut canvas, &mut rng),
                "mars" => recipes::mars(&mut canvas, &mut rng),
                "jupiter" => recipes::jupiter(&mut canvas, &mut rng),
                "saturn" => recipes::saturn(&mut canvas, &mut rng),
                "uranus" => recipes::uranus(&mut canvas, &mut rng),
                "moon" | "phobos" | "deimos" | "io" | "europa" | "ganymede" | "callisto" | "titan"
                | "enceladus" | "iapetus" | "ariel" | "umbriel" | "titania" | "oberon" => {
                    recipes::moon(&mut canvas, &mut rng, *tint)
                }
                _ => recipes::rocky(&mut canvas, &mut rng, *tint),
            }
            canvas
        }
        TextureKey::Comet(tint) => {
            let mut canvas = Canvas::new(COMET_SIZE, COMET_SIZE, opaque);
            recipes::comet(&mut canvas, &mut rng, *tint);
            canvas
        }
        TextureKey::Asteroid(tint) => {
            let mut canvas = Canvas::new(ASTEROID_SIZE, ASTEROID_SIZE, opaque);
            recipes::asteroid(&mut canvas, &mut rng, *tint);
            canvas
        }
        TextureKey::Rings => {
            let mut canvas = Canvas::new(RING_SIZE.0, RING_SIZE.1, transparent);
            recipes::rings(&mut canvas, &mut rng);
            canvas
        }
    };

    ProceduralTexture::from_canvas(canvas)
}

/// Builds each texture the first time it's asked for and hands out shared
/// copies after that.
#[derive(Debug)]
pub struct TextureCache {
    seed: u64,
    resolution: u32,
    textures: HashMap<TextureKey, Rc<ProceduralTexture>>,
    // PNG bytes handed to the renderer, encoded once per key
    encoded: HashMap<TextureKey, Rc<Vec<u8>>>,
    build_count: usize,
    encode_count: usize,
}

impl TextureCache {
    pub fn new(seed: u64, resolution: u32) -> Self {
        TextureCache {
            seed,
            resolution: clamp_resolution(resolution),
            textures: HashMap::new(),
            encoded: HashMap::new(),
            build_count: 0,
            encode_count: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn get_or_build(&mut self, key: &TextureKey) -> Rc<ProceduralTexture> {
        if let Some(texture) = self.textures.get(key) {
            return Rc::clone(texture);
        }

        log::debug!("Building texture {:?}", key);
        let texture = Rc::new(build(key, self.seed, self.resolution));
        self.build_count += 1;
        self.textures.insert(key.clone(), Rc::clone(&texture));
        texture
    }

    /// The texture for `key` as PNG bytes, building and encoding it at most
    /// once.
    pub fn png_for(&mut self, key: &TextureKey) -> Result<Rc<Vec<u8>>, image::ImageError> {
        if let Some(bytes) = self.encoded.get(key) {
            return Ok(Rc::clone(bytes));
        }

        let bytes = Rc::new(self.get_or_build(key).encode_png()?);
        self.encode_count += 1;
        self.encoded.insert(key.clone(), Rc::clone(&bytes));
        Ok(bytes)
    }

    pub fn encode_count(&self) -> usize {
        self.encode_count
    }

    /// Number of textures actually painted so far.
    pub fn build_count(&self) -> usize {
        self.build_count
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
