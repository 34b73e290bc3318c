//! A small floating-point raster with the handful of drawing operations the
//! texture recipes need. Coordinates are in pixels; x wraps around, since
//! every texture ends up wrapped onto a sphere or a ring.

use image::{Rgba, RgbaImage};

/// Straight (non-premultiplied) RGBA, each channel in [0, 1].
pub type Paint = [f32; 4];

pub fn paint(hex: u32, alpha: f32) -> Paint {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

pub fn with_alpha(color: Paint, alpha: f32) -> Paint {
    [color[0], color[1], color[2], alpha]
}

pub fn mix(a: Paint, b: Paint, t: f32) -> Paint {
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = a[i] + (b[i] - a[i]) * t;
    }
    out
}

/// Color at `t` along a list of `(offset, color)` stops sorted by offset.
pub fn sample_stops(stops: &[(f32, Paint)], t: f32) -> Paint {
    match stops {
        [] => [0.0; 4],
        [(_, only)] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let upper = stops.iter().position(|(offset, _)| *offset >= t);
            match upper {
                Some(0) => stops[0].1,
                Some(i) => {
                    let (o0, c0) = stops[i - 1];
                    let (o1, c1) = stops[i];
                    let span = o1 - o0;
                    if span <= 0.0 {
                        c1
                    } else {
                        mix(c0, c1, (t - o0) / span)
                    }
                }
                None => stops[stops.len() - 1].1,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Paint>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Paint) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Paint {
        self.pixels[self.index(x, y)]
    }

    /// Source-over compositing of one pixel. Out-of-range rows are ignored;
    /// columns wrap.
    pub fn blend(&mut self, x: i64, y: i64, src: Paint) {
        if y < 0 || y >= self.height as i64 || self.width == 0 {
            return;
        }
        let x = x.rem_euclid(self.width as i64);
        let idx = self.index(x as u32, y as u32);
        let dst = self.pixels[idx];

        let sa = src[3].clamp(0.0, 1.0);
        let out_a = sa + dst[3] * (1.0 - sa);
        let mut out = [0.0, 0.0, 0.0, out_a];
        if out_a > 0.0 {
            for i in 0..3 {
                out[i] = (src[i] * sa + dst[i] * dst[3] * (1.0 - sa)) / out_a;
            }
        }
        self.pixels[idx] = out;
    }

    /// Paints the whole canvas with a gradient along one axis.
    pub fn linear_gradient(&mut self, axis: Axis, stops: &[(f32, Paint)]) {
        let (w, h) = (self.width, self.height);
        for y in 0..h {
            for x in 0..w {
                let t = match axis {
                    Axis::Horizontal => (x as f32 + 0.5) / w as f32,
                    Axis::Vertical => (y as f32 + 0.5) / h as f32,
                };
                self.blend(x as i64, y as i64, sample_stops(stops, t));
            }
        }
    }

    /// Paints a disc whose color depends on the distance from its center.
    pub fn radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[(f32, Paint)]) {
        if radius <= 0.0 {
            return;
        }
        self.for_each_in_disc(cx, cy, radius, |canvas, x, y, d| {
            canvas.blend(x, y, sample_stops(stops, d / radius));
        });
    }

    /// A solid disc with a one-pixel soft edge.
    pub fn blob(&mut self, cx: f32, cy: f32, radius: f32, color: Paint) {
        self.for_each_in_disc(cx, cy, radius + 1.0, |canvas, x, y, d| {
            let edge = (radius + 1.0 - d).clamp(0.0, 1.0);
            canvas.blend(x, y, with_alpha(color, color[3] * edge));
        });
    }

    /// A straight line of the given width.
    pub fn stroke(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Paint) {
        let half = width / 2.0;
        let (x0, y0) = from;
        let (x1, y1) = to;
        let min_x = (x0.min(x1) - half - 1.0).floor() as i64;
        let max_x = (x0.max(x1) + half + 1.0).ceil() as i64;
        let min_y = (y0.min(y1) - half - 1.0).floor() as i64;
        let max_y = (y0.max(y1) + half + 1.0).ceil() as i64;

        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (nx, ny) = (x0 + t * dx, y0 + t * dy);
                let d = ((px - nx).powi(2) + (py - ny).powi(2)).sqrt();
                let edge = (half + 0.5 - d).clamp(0.0, 1.0);
                if edge > 0.0 {
                    self.blend(x, y, with_alpha(color, color[3] * edge));
                }
            }
        }
    }

    /// Fills an axis-aligned rectangle.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Paint) {
        let x_end = (x + w).ceil() as i64;
        let y_end = (y + h).ceil() as i64;
        for py in y.floor() as i64..y_end {
            for px in x.floor() as i64..x_end {
                self.blend(px, py, color);
            }
        }
    }

    fn for_each_in_disc<F>(&mut self, cx: f32, cy: f32, radius: f32, mut f: F)
    where
        F: FnMut(&mut Self, i64, i64, f32),
    {
        let min_x = (cx - radius).floor() as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor() as i64;
        let max_y = (cy + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= radius {
                    f(self, x, y, d);
                }
            }
        }
    }

    /// Treats luminance as a height field and derives a tangent-space normal
    /// map from it.
    pub fn normal_map(&self, strength: f32) -> Canvas {
        let (w, h) = (self.width, self.height);
        let height = |x: i64, y: i64| {
            let x = x.rem_euclid(w as i64) as u32;
            let y = y.clamp(0, h as i64 - 1) as u32;
            let [r, g, b, _] = self.get(x, y);
            0.299 * r + 0.587 * g + 0.114 * b
        };

        let mut normals = Canvas::new(w, h, [0.5, 0.5, 1.0, 1.0]);
        for y in 0..h as i64 {
            for x in 0..w as i64 {
                let dx = (height(x + 1, y) - height(x - 1, y)) * strength;
                let dy = (height(x, y + 1) - height(x, y - 1)) * strength;
                let len = (dx * dx + dy * dy + 1.0).sqrt();
                let n = [-dx / len, -dy / len, 1.0 / len];
                let idx = y as usize * w as usize + x as usize;
                normals.pixels[idx] = [n[0] * 0.5 + 0.5, n[1] * 0.5 + 0.5, n[2] * 0.5 + 0.5, 1.0];
            }
        }
        normals
    }

    pub fn into_image(self) -> RgbaImage {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let width = self.width;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[y as usize * width as usize + x as usize];
            Rgba([to_byte(p[0]), to_byte(p[1]), to_byte(p[2]), to_byte(p[3])])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_stops() {
        let stops = [(0.0, [0.0, 0.0, 0.0, 1.0]), (0.5, [1.0, 1.0, 1.0, 1.0]), (1.0, [1.0, 0.0, 0.0, 1.0])];
        assert_eq!(sample_stops(&stops, 0.0), [0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(sample_stops(&stops, 0.25)[0], 0.5);
        assert_relative_eq!(sample_stops(&stops, 0.75)[1], 0.5);
        assert_eq!(sample_stops(&stops, 2.0), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_blend_over_opaque() {
        let mut canvas = Canvas::new(2, 2, [0.0, 0.0, 0.0, 1.0]);
        canvas.blend(0, 0, [1.0, 1.0, 1.0, 0.25]);
        let p = canvas.get(0, 0);
        assert_relative_eq!(p[0], 0.25);
        assert_relative_eq!(p[3], 1.0);

        // Columns wrap, rows don't
        canvas.blend(-1, 1, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(canvas.get(1, 1), [1.0, 0.0, 0.0, 1.0]);
        canvas.blend(0, 5, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_blob_and_stroke_stay_local() {
        let mut canvas = Canvas::new(32, 32, [0.0, 0.0, 0.0, 1.0]);
        canvas.blob(16.0, 16.0, 3.0, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(canvas.get(16, 16)[0], 1.0);
        assert_eq!(canvas.get(2, 2)[0], 0.0);

        canvas.stroke((0.0, 4.5), (10.0, 4.5), 2.0, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(canvas.get(5, 4)[1], 1.0);
        assert_eq!(canvas.get(5, 10)[1], 0.0);
    }

    #[test]
    fn test_flat_canvas_has_flat_normals() {
        let canvas = Canvas::new(8, 8, [0.3, 0.3, 0.3, 1.0]);
        let normals = canvas.normal_map(4.0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(normals.get(x, y), [0.5, 0.5, 1.0, 1.0]);
            }
        }
    }
}
