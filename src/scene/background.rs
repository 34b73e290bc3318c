//! Everything behind the planets: stars, drifting particles, dust, a nebula
//! shell and the asteroid belt. All of it is laid out once from a seed and
//! then only rotates.

use nalgebra::{Point3, Rotation3, Vector3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::catalog::rgb;
use crate::theme::Palette;

const STAR_COUNT: usize = 3000;
const STAR_RADIUS: f32 = 400.0;
const STAR_DEPTH: f32 = 60.0;

const PARTICLE_COUNT: usize = 1000;
const PARTICLE_SPAN: f32 = 400.0;

const DUST_COUNT: usize = 1200;
const DUST_COUNT_LOW_DETAIL: usize = 800;
const DUST_SPAN: (f32, f32, f32) = (600.0, 600.0, 200.0);

const NEBULA_COUNT: usize = 2000;
const NEBULA_RADII: (f32, f32) = (300.0, 500.0);

pub const ASTEROID_COUNT: usize = 250;
const BELT_RINGS: usize = 4;
const BELT_INNER: f32 = 25.0;
const BELT_WIDTH: f32 = 2.0;
const BELT_RING_SPACING: f32 = 0.25;
const BELT_ROTATION_RATE: f64 = 0.018;

#[rustfmt::skip]
const ASTEROID_COLORS: [u32; 16] = [
    0x8B7355, 0x696969, 0xA0522D, 0x708090, 0x556B2F, 0x2F4F4F, 0x8B4513, 0x483D8B,
    0x654321, 0x778899, 0x8B8680, 0x5F5F5F, 0x8B7D6B, 0x4A4A4A, 0xCD853F, 0x2F2F2F,
];

/// A cloud of points that turns as a whole.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub points: Vec<Point3<f32>>,
    pub colors: Vec<Point3<f32>>,
    /// Radians per second about x, y and z.
    pub rotation_rate: Vector3<f64>,
}

impl PointLayer {
    pub fn rotation_at(&self, t: f64) -> Rotation3<f64> {
        let angles = self.rotation_rate * t;
        Rotation3::from_euler_angles(angles.x, angles.y, angles.z)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Position in the belt's own frame.
    pub position: Point3<f32>,
    pub size_class: AsteroidSize,
    pub radius: f32,
    /// Radians per second; the asteroid tumbles about (0.5, 1, 0.3) times this.
    pub tumble_rate: f64,
    pub color: Point3<f32>,
}

impl Asteroid {
    pub fn rotation_at(&self, t: f64) -> Rotation3<f64> {
        let a = self.tumble_rate * t;
        Rotation3::from_euler_angles(0.5 * a, a, 0.3 * a)
    }
}

#[derive(Debug, Clone)]
pub struct Background {
    pub seed: u64,
    pub low_detail: bool,
    pub starfield: PointLayer,
    pub particles: PointLayer,
    pub dust: PointLayer,
    pub nebula: PointLayer,
    pub asteroids: Vec<Asteroid>,
}

// A point uniformly distributed on the unit sphere
fn unit_direction(rng: &mut SmallRng) -> Vector3<f32> {
    let z: f32 = rng.gen_range(-1.0, 1.0);
    let theta: f32 = rng.gen_range(0.0, std::f32::consts::TAU);
    let r = (1.0 - z * z).sqrt();
    Vector3::new(r * theta.cos(), r * theta.sin(), z)
}

fn scale_color(color: &Point3<f32>, factors: [f32; 3]) -> Point3<f32> {
    Point3::new(
        (color.x * factors[0]).min(1.0),
        (color.y * factors[1]).min(1.0),
        (color.z * factors[2]).min(1.0),
    )
}

impl Background {
    pub fn generate(seed: u64, palette: &Palette, low_detail: bool) -> Self {
        // Each layer gets its own stream so that changing one count doesn't
        // reshuffle the others.
        let rng_for = |salt: u64| SmallRng::seed_from_u64(seed.wrapping_add(salt));

        Background {
            seed,
            low_detail,
            starfield: starfield(&mut rng_for(1), palette),
            particles: particles(&mut rng_for(2), palette),
            dust: dust(&mut rng_for(3), palette, low_detail),
            nebula: nebula(&mut rng_for(4)),
            asteroids: asteroid_belt(&mut rng_for(5)),
        }
    }

    /// Opacity of the nebula, which breathes slowly.
    pub fn nebula_opacity(t: f64) -> f64 {
        0.3 + 0.1 * (0.5 * t).sin()
    }

    pub fn belt_rotation(t: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), BELT_ROTATION_RATE * t)
    }
}

fn starfield(rng: &mut SmallRng, palette: &Palette) -> PointLayer {
    let mut points = Vec::with_capacity(STAR_COUNT);
    let mut colors = Vec::with_capacity(STAR_COUNT);
    for _ in 0..STAR_COUNT {
        let r = STAR_RADIUS + rng.gen_range(0.0, STAR_DEPTH);
        points.push(Point3::from(unit_direction(rng) * r));
        let brightness = rng.gen_range(0.5, 1.0);
        colors.push(scale_color(&palette.star_color, [brightness; 3]));
    }
    PointLayer {
        points,
        colors,
        rotation_rate: Vector3::new(0.0008, 0.0003, 0.0),
    }
}

fn particles(rng: &mut SmallRng, palette: &Palette) -> PointLayer {
    let half = PARTICLE_SPAN / 2.0;
    let points = (0..PARTICLE_COUNT)
        .map(|_| {
            Point3::new(
                rng.gen_range(-half, half),
                rng.gen_range(-half, half),
                rng.gen_range(-half, half),
            )
        })
        .collect();
    PointLayer {
        points,
        colors: vec![palette.star_color; PARTICLE_COUNT],
        rotation_rate: Vector3::new(0.0001, 0.0002, 0.0),
    }
}

fn dust(rng: &mut SmallRng, palette: &Palette, low_detail: bool) -> PointLayer {
    let count = if low_detail { DUST_COUNT_LOW_DETAIL } else { DUST_COUNT };
    let (sx, sy, sz) = DUST_SPAN;

    let mut points = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(Point3::new(
            rng.gen_range(-sx / 2.0, sx / 2.0),
            rng.gen_range(-sy / 2.0, sy / 2.0),
            rng.gen_range(-sz / 2.0, sz / 2.0),
        ));
        let brightness = rng.gen_range(0.3, 0.8);
        colors.push(scale_color(
            &palette.particle_color,
            [brightness, brightness * 0.9, brightness * 1.1],
        ));
    }
    PointLayer {
        points,
        colors,
        rotation_rate: Vector3::new(0.00009, 0.00003, 0.00015),
    }
}

fn nebula(rng: &mut SmallRng) -> PointLayer {
    let purple = Point3::new(0.6, 0.2, 0.8);
    let blue = Point3::new(0.2, 0.4, 0.9);
    let pink = Point3::new(0.9, 0.3, 0.6);

    let mut points = Vec::with_capacity(NEBULA_COUNT);
    let mut colors = Vec::with_capacity(NEBULA_COUNT);
    for _ in 0..NEBULA_COUNT {
        let r = rng.gen_range(NEBULA_RADII.0, NEBULA_RADII.1);
        points.push(Point3::from(unit_direction(rng) * r));
        let choice: f32 = rng.gen_range(0.0, 1.0);
        colors.push(if choice < 0.33 {
            purple
        } else if choice < 0.66 {
            blue
        } else {
            pink
        });
    }
    PointLayer {
        points,
        colors,
        rotation_rate: Vector3::new(0.012, 0.006, 0.0),
    }
}

fn asteroid_belt(rng: &mut SmallRng) -> Vec<Asteroid> {
    let per_ring = ASTEROID_COUNT / BELT_RINGS;
    (0..ASTEROID_COUNT)
        .map(|i| {
            let ring = (i / per_ring).min(BELT_RINGS - 1);
            let angle = i as f32 / ASTEROID_COUNT as f32 * std::f32::consts::TAU + rng.gen_range(0.0, 0.15);
            let radius = BELT_INNER + rng.gen_range(0.0, BELT_WIDTH) + ring as f32 * BELT_RING_SPACING;
            let jitter = rng.gen_range(-0.15, 0.15);
            let position = Point3::new(
                angle.cos() * radius + jitter,
                angle.sin() * radius + jitter,
                rng.gen_range(-0.15, 0.15),
            );

            let class: f32 = rng.gen_range(0.0, 1.0);
            let (size_class, radius) = if class < 0.5 {
                (AsteroidSize::Small, rng.gen_range(0.03, 0.09))
            } else if class < 0.8 {
                (AsteroidSize::Medium, rng.gen_range(0.06, 0.16))
            } else {
                (AsteroidSize::Large, rng.gen_range(0.10, 0.24))
            };

            Asteroid {
                position,
                size_class,
                radius,
                tumble_rate: rng.gen_range(-0.36, 0.36),
                color: rgb(ASTEROID_COLORS[rng.gen_range(0, ASTEROID_COLORS.len())]),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeKind;

    #[test]
    fn test_counts() {
        let palette = Palette::default();
        let bg = Background::generate(1, &palette, false);
        assert_eq!(bg.starfield.len(), STAR_COUNT);
        assert_eq!(bg.particles.len(), PARTICLE_COUNT);
        assert_eq!(bg.dust.len(), DUST_COUNT);
        assert_eq!(bg.nebula.len(), NEBULA_COUNT);
        assert_eq!(bg.asteroids.len(), ASTEROID_COUNT);

        let low = Background::generate(1, &palette, true);
        assert_eq!(low.dust.len(), DUST_COUNT_LOW_DETAIL);
    }

    #[test]
    fn test_shells() {
        let bg = Background::generate(2, &Palette::default(), false);
        for p in bg.starfield.points.iter() {
            let r = p.coords.norm();
            assert!(r >= STAR_RADIUS - 1e-3 && r <= STAR_RADIUS + STAR_DEPTH + 1e-3);
        }
        for p in bg.nebula.points.iter() {
            let r = p.coords.norm();
            assert!(r >= NEBULA_RADII.0 - 1e-3 && r <= NEBULA_RADII.1 + 1e-3);
        }
    }

    #[test]
    fn test_belt_layout() {
        let bg = Background::generate(3, &Palette::default(), false);
        for asteroid in bg.asteroids.iter() {
            let flat = asteroid.position.coords.xy().norm();
            assert!(flat > 24.5 && flat < 28.5, "asteroid at radius {}", flat);
            assert!(asteroid.position.z.abs() <= 0.15);
        }
        let classes = [AsteroidSize::Small, AsteroidSize::Medium, AsteroidSize::Large];
        for class in classes {
            assert!(bg.asteroids.iter().any(|a| a.size_class == class));
        }
    }

    #[test]
    fn test_seeded() {
        let palette = Palette::default();
        let a = Background::generate(10, &palette, false);
        let b = Background::generate(10, &palette, false);
        let c = Background::generate(11, &palette, false);
        assert_eq!(a.nebula.points, b.nebula.points);
        assert_eq!(a.asteroids, b.asteroids);
        assert_ne!(a.starfield.points, c.starfield.points);
    }

    #[test]
    fn test_dust_follows_theme() {
        let dark = Background::generate(4, &ThemeKind::Dark.palette(), false);
        let light = Background::generate(4, &ThemeKind::Light.palette(), false);
        assert_eq!(dark.dust.points, light.dust.points);
        assert_ne!(dark.dust.colors, light.dust.colors);
    }

    #[test]
    fn test_nebula_pulse() {
        approx::assert_relative_eq!(Background::nebula_opacity(0.0), 0.3);
        for i in 0..100 {
            let o = Background::nebula_opacity(i as f64 * 0.37);
            assert!((0.2..=0.4).contains(&o));
        }
    }
}
