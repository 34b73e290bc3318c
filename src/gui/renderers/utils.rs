use kiss3d::renderer::LineRenderer;

use nalgebra::Point3;

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    let num_segments = num_segments.max(1);
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

pub fn draw_path<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}

/// Stand-in for alpha blending: `color` at `opacity` over `background`.
pub fn fade(color: &Point3<f32>, background: &Point3<f32>, opacity: f32) -> Point3<f32> {
    let opacity = opacity.clamp(0.0, 1.0);
    Point3::from(background.coords.lerp(&color.coords, opacity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_path_endpoints() {
        let points: Vec<_> = path_iter_parametric(|t: f32| Point3::new(t, 0.0, 0.0), 1.0, 3.0, 4).collect();
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[0].x, 1.0);
        assert_relative_eq!(points[2].x, 2.0);
        assert_relative_eq!(points[4].x, 3.0);
    }

    #[test]
    fn test_fade() {
        let white = Point3::new(1.0, 1.0, 1.0);
        let black = Point3::origin();
        assert_relative_eq!(fade(&white, &black, 0.25), Point3::new(0.25, 0.25, 0.25));
        assert_relative_eq!(fade(&white, &black, 2.0), white);
        assert_relative_eq!(fade(&white, &black, -1.0), black);
    }
}
