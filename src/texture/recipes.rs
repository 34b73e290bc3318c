//! One painting routine per kind of surface. Every routine draws only from
//! the RNG it's handed, so a seed fully determines the result.

use rand::rngs::SmallRng;
use rand::Rng;

use super::canvas::{mix, paint, with_alpha, Axis, Canvas, Paint};

const BLACK: Paint = [0.0, 0.0, 0.0, 1.0];
const CLEAR: Paint = [0.0, 0.0, 0.0, 0.0];

fn from_rgb(rgb: [u8; 3], alpha: f32) -> Paint {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        alpha,
    ]
}

fn random_point(rng: &mut SmallRng, canvas: &Canvas) -> (f32, f32) {
    (
        rng.gen_range(0.0, canvas.width() as f32),
        rng.gen_range(0.0, canvas.height() as f32),
    )
}

/// Soft-edged craters: dark floor, a bright rim just inside the edge.
fn craters(canvas: &mut Canvas, rng: &mut SmallRng, count: usize, min_r: f32, max_r: f32) {
    for _ in 0..count {
        let (x, y) = random_point(rng, canvas);
        let radius = rng.gen_range(min_r, max_r);
        let depth = rng.gen_range(0.3, 1.0f32).min(1.0);
        canvas.radial_gradient(
            x,
            y,
            radius,
            &[
                (0.0, [0.0, 0.0, 0.0, depth * 0.6]),
                (0.7, [0.0, 0.0, 0.0, depth * 0.3]),
                (0.9, [1.0, 1.0, 1.0, depth * 0.2]),
                (1.0, CLEAR),
            ],
        );
    }
}

fn speckle(canvas: &mut Canvas, rng: &mut SmallRng, count: usize, colors: &[Paint], min_r: f32, max_r: f32) {
    if colors.is_empty() {
        return;
    }
    for _ in 0..count {
        let (x, y) = random_point(rng, canvas);
        let radius = rng.gen_range(min_r, max_r);
        let color = colors[rng.gen_range(0, colors.len())];
        let alpha = rng.gen_range(0.1, 0.5);
        canvas.blob(x, y, radius, with_alpha(color, color[3] * alpha));
    }
}

fn scratches(canvas: &mut Canvas, rng: &mut SmallRng, count: usize, reach: f32, color: Paint) {
    for _ in 0..count {
        let (x, y) = random_point(rng, canvas);
        let to = (
            x + rng.gen_range(-0.5, 0.5) * reach,
            y + rng.gen_range(-0.5, 0.5) * reach,
        );
        let width = rng.gen_range(0.5, 3.0);
        let alpha = rng.gen_range(0.3, 1.0);
        canvas.stroke((x, y), to, width, with_alpha(color, color[3] * alpha));
    }
}

/// Horizontal cloud bands, as on the gas giants.
fn bands(canvas: &mut Canvas, rng: &mut SmallRng, palette: &[u32], count: usize) {
    let h = canvas.height() as f32;
    let w = canvas.width() as f32;
    for i in 0..count {
        let y = i as f32 / count as f32 * h;
        let thickness = h / count as f32 * rng.gen_range(0.6, 1.4);
        let color = paint(palette[i % palette.len()], rng.gen_range(0.5, 0.9));
        canvas.rect(0.0, y, w, thickness, color);
    }
    // Turbulence along the band edges
    for _ in 0..count * 8 {
        let (x, y) = random_point(rng, canvas);
        let len = rng.gen_range(10.0, w / 6.0);
        let color = paint(palette[rng.gen_range(0, palette.len())], 0.25);
        canvas.stroke((x, y), (x + len, y + rng.gen_range(-1.5, 1.5)), rng.gen_range(1.0, 3.0), color);
    }
}

pub fn sun(canvas: &mut Canvas, rng: &mut SmallRng) {
    canvas.linear_gradient(
        Axis::Vertical,
        &[(0.0, paint(0xFF8C00, 1.0)), (0.5, paint(0xFDB813, 1.0)), (1.0, paint(0xFF8C00, 1.0))],
    );
    // Granulation
    speckle(canvas, rng, 600, &[paint(0xFFF4B0, 1.0), paint(0xFF6A00, 1.0)], 1.0, 4.0);
    // Sunspots
    for _ in 0..6 {
        let (x, y) = random_point(rng, canvas);
        let r = rng.gen_range(3.0, 8.0);
        canvas.radial_gradient(x, y, r, &[(0.0, paint(0x4A1A00, 0.9)), (0.6, paint(0x8B3A00, 0.5)), (1.0, CLEAR)]);
    }
}

pub fn mercury(canvas: &mut Canvas, rng: &mut SmallRng) {
    let base = paint(0x8C7853, 1.0);
    canvas.linear_gradient(Axis::Vertical, &[(0.0, mix(base, BLACK, 0.2)), (0.5, base), (1.0, mix(base, BLACK, 0.2))]);
    craters(canvas, rng, 150, 2.0, 10.0);
    scratches(canvas, rng, 15, 40.0, paint(0x3A3020, 1.0));
}

pub fn venus(canvas: &mut Canvas, rng: &mut SmallRng) {
    canvas.linear_gradient(
        Axis::Vertical,
        &[(0.0, paint(0xE6B84A, 1.0)), (0.5, paint(0xFFC649, 1.0)), (1.0, paint(0xE6B84A, 1.0))],
    );
    // Thick swirling clouds
    for _ in 0..120 {
        let (x, y) = random_point(rng, canvas);
        let len = rng.gen_range(15.0, 60.0);
        let color = if rng.gen_range(0.0, 1.0) < 0.5 { paint(0xFFF0C0, 0.3) } else { paint(0xC89B3C, 0.3) };
        canvas.stroke((x, y), (x + len, y + rng.gen_range(-6.0, 6.0)), rng.gen_range(2.0, 6.0), color);
    }
}

pub fn earth(canvas: &mut Canvas, rng: &mut SmallRng) {
    canvas.linear_gradient(Axis::Vertical, &[(0.0, paint(0x1E4D8C, 1.0)), (0.5, paint(0x2A6FB0, 1.0)), (1.0, paint(0x1E4D8C, 1.0))]);
    let h = canvas.height() as f32;
    let w = canvas.width() as f32;

    // Continents are clusters of overlapping blobs
    for _ in 0..7 {
        let (cx, cy) = (rng.gen_range(0.0, w), rng.gen_range(h * 0.2, h * 0.8));
        let spread = rng.gen_range(8.0, (w / 10.0).max(9.0));
        for _ in 0..25 {
            let x = cx + rng.gen_range(-spread, spread);
            let y = cy + rng.gen_range(-spread, spread) * 0.6;
            canvas.blob(x, y, rng.gen_range(3.0, spread / 2.0 + 3.0), paint(0x4A7A3A, 1.0));
        }
        // Forests and deserts
        for _ in 0..10 {
            let x = cx + rng.gen_range(-spread, spread);
            let y = cy + rng.gen_range(-spread, spread) * 0.5;
            let color = if rng.gen_range(0.0, 1.0) < 0.6 { paint(0x2D5A27, 0.6) } else { paint(0xC2A060, 0.5) };
            canvas.blob(x, y, rng.gen_range(1.5, 5.0), color);
        }
    }
    // Ice caps
    canvas.rect(0.0, 0.0, w, h * 0.06, paint(0xF0F8FF, 0.95));
    canvas.rect(0.0, h * 0.94, w, h * 0.06, paint(0xF0F8FF, 0.95));
    // Clouds
    for _ in 0..80 {
        let (x, y) = random_point(rng, canvas);
        canvas.stroke((x, y), (x + rng.gen_range(10.0, 40.0), y + rng.gen_range(-3.0, 3.0)), rng.gen_range(1.5, 4.0), [1.0, 1.0, 1.0, 0.35]);
    }
}

pub fn mars(canvas: &mut Canvas, rng: &mut SmallRng) {
    let base = paint(0xC1440E, 1.0);
    canvas.linear_gradient(Axis::Vertical, &[(0.0, mix(base, BLACK, 0.15)), (0.5, base), (1.0, mix(base, BLACK, 0.15))]);
    speckle(canvas, rng, 200, &[paint(0x8B2500, 1.0), paint(0xE07040, 1.0)], 2.0, 8.0);
    craters(canvas, rng, 60, 2.0, 7.0);
    // Canyons
    scratches(canvas, rng, 8, 80.0, paint(0x5A1A05, 1.0));
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    canvas.rect(0.0, 0.0, w, h * 0.04, paint(0xFFFFFF, 0.8));
    canvas.rect(0.0, h * 0.96, w, h * 0.04, paint(0xFFFFFF, 0.8));
}

pub fn jupiter(canvas: &mut Canvas, rng: &mut SmallRng) {
    canvas.linear_gradient(Axis::Vertical, &[(0.0, paint(0xC9B48A, 1.0)), (1.0, paint(0xC9B48A, 1.0))]);
    bands(canvas, rng, &[0xD8CA9D, 0xA67B5B, 0xE8DCC0, 0x8B6A4E, 0xF0E6D0], 14);
    // Great red spot
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    let x = rng.gen_range(0.0, w);
    canvas.radial_gradient(x, h * 0.65, h * 0.08, &[(0.0, paint(0xB5442C, 0.9)), (0.7, paint(0xC8704A, 0.6)), (1.0, CLEAR)]);
}

pub fn saturn(canvas: &mut Canvas, rng: &mut SmallRng) {
    canvas.linear_gradient(Axis::Vertical, &[(0.0, paint(0xE3CFA0, 1.0)), (1.0, paint(0xE3CFA0, 1.0))]);
    bands(canvas, rng, &[0xFAD5A5, 0xE0C080, 0xF5E6C8, 0xC8A870], 10);
}

pub fn uranus(canvas: &mut Canvas, rng: &mut SmallRng) {
    canvas.linear_gradient(Axis::Vertical, &[(0.0, paint(0x7FDBEA, 1.0)), (0.5, paint(0x4FD0E7, 1.0)), (1.0, paint(0x7FDBEA, 1.0))]);
    bands(canvas, rng, &[0x4FD0E7, 0x6AD8EC, 0x45C0D5], 6);
}

/// Gray, cratered; tinted towards `tint`.
pub fn moon(canvas: &mut Canvas, rng: &mut SmallRng, tint: [u8; 3]) {
    let base = mix(paint(0x9A9A9A, 1.0), from_rgb(tint, 1.0), 0.5);
    canvas.linear_gradient(Axis::Vertical, &[(0.0, mix(base, BLACK, 0.1)), (1.0, base)]);
    speckle(canvas, rng, 30, &[paint(0x606060, 1.0)], 4.0, 12.0);
    craters(canvas, rng, 100, 1.5, 8.0);
}

/// Fallback for bodies without a dedicated recipe.
pub fn rocky(canvas: &mut Canvas, rng: &mut SmallRng, tint: [u8; 3]) {
    let base = from_rgb(tint, 1.0);
    canvas.linear_gradient(Axis::Vertical, &[(0.0, mix(base, BLACK, 0.25)), (0.5, base), (1.0, mix(base, BLACK, 0.25))]);
    speckle(canvas, rng, 150, &[mix(base, BLACK, 0.4), mix(base, [1.0; 4], 0.3)], 2.0, 6.0);
    craters(canvas, rng, 40, 2.0, 6.0);
}

/// Icy nucleus: bright core of the comet's color fading out to its rim.
pub fn comet(canvas: &mut Canvas, rng: &mut SmallRng, tint: [u8; 3]) {
    let core = from_rgb(tint, 1.0);
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    canvas.linear_gradient(Axis::Vertical, &[(0.0, mix(core, BLACK, 0.3)), (1.0, mix(core, BLACK, 0.3))]);
    canvas.radial_gradient(w / 2.0, h / 2.0, w.min(h) / 2.0, &[(0.0, [1.0, 1.0, 1.0, 1.0]), (0.4, core), (1.0, with_alpha(core, 0.0))]);
    speckle(canvas, rng, 40, &[[1.0, 1.0, 1.0, 1.0], mix(core, BLACK, 0.5)], 0.5, 2.5);
}

pub fn asteroid(canvas: &mut Canvas, rng: &mut SmallRng, tint: [u8; 3]) {
    let base = from_rgb(tint, 1.0);
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    canvas.radial_gradient(w / 2.0, h / 2.0, w.max(h) * 0.75, &[(0.0, base), (0.6, base), (1.0, BLACK)]);
    craters(canvas, rng, 120, 3.0, 15.0);
    let minerals = [0xFFD700, 0xC0C0C0, 0xB87333, 0x8B4513, 0xFF4500].map(|hex| paint(hex, 1.0));
    speckle(canvas, rng, 40, &minerals, 2.0, 8.0);
    scratches(canvas, rng, 25, 40.0, BLACK);
    // Dust
    speckle(canvas, rng, 200, &[paint(0x646464, 1.0)], 0.5, 2.5);
}

/// Radial banding for the rings: u runs from the inner edge to the outer.
pub fn rings(canvas: &mut Canvas, rng: &mut SmallRng) {
    let stop = |offset: f32, r: f32, g: f32, b: f32, a: f32| (offset, [r / 255.0, g / 255.0, b / 255.0, a]);
    canvas.linear_gradient(
        Axis::Horizontal,
        &[
            stop(0.0, 200.0, 180.0, 140.0, 0.0),
            stop(0.1, 230.0, 210.0, 170.0, 0.3),
            stop(0.2, 250.0, 230.0, 180.0, 0.6),
            stop(0.25, 200.0, 180.0, 140.0, 0.2),
            stop(0.3, 240.0, 220.0, 170.0, 0.8),
            stop(0.4, 220.0, 200.0, 150.0, 0.4),
            stop(0.5, 250.0, 230.0, 180.0, 0.9),
            stop(0.6, 200.0, 180.0, 140.0, 0.3),
            stop(0.7, 240.0, 220.0, 170.0, 0.7),
            stop(0.8, 230.0, 210.0, 160.0, 0.5),
            stop(0.9, 250.0, 230.0, 180.0, 0.4),
            stop(1.0, 200.0, 180.0, 140.0, 0.0),
        ],
    );
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    for i in 0..20 {
        let x = i as f32 / 20.0 * w;
        canvas.rect(x, 0.0, 2.0, h, [1.0, 1.0, 1.0, rng.gen_range(0.1, 0.4)]);
    }
}
