use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Point3, Vector3};

use super::utils::{draw_path, path_iter_parametric};

// Rings drawn outside the body, as multiples of its radius
const HALO_RINGS: [f32; 2] = [1.15, 1.3];

struct Halo {
    center: Point3<f32>,
    radius: f32,
    color: Point3<f32>,
}

/// Screen-facing rings around highlighted bodies. kiss3d has no emissive
/// materials, so this is what "glowing" looks like.
pub struct HaloRenderer {
    line_renderer: LineRenderer,
    halos: Vec<Halo>,
}

impl HaloRenderer {
    pub fn new() -> Self {
        HaloRenderer {
            line_renderer: LineRenderer::new(),
            halos: vec![],
        }
    }

    pub fn add_halo(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.halos.push(Halo {
            center,
            radius,
            color,
        });
    }

    fn load_halo(line_renderer: &mut LineRenderer, camera: &dyn Camera, halo: &Halo) {
        // Screen x and y, in world space
        let camera_transform = camera.view_transform().inverse();
        let x_vec = camera_transform.transform_vector(&Vector3::x()).normalize();
        let y_vec = camera_transform.transform_vector(&Vector3::y()).normalize();

        for (i, scale) in HALO_RINGS.iter().enumerate() {
            let radius = halo.radius * scale;
            let f = |theta: f32| halo.center + radius * (x_vec * theta.cos() + y_vec * theta.sin());
            // Outer rings are fainter
            let color = halo.color * (1.0 / (i + 1) as f32);
            draw_path(
                line_renderer,
                path_iter_parametric(f, 0.0, std::f32::consts::TAU, 64),
                &color,
            );
        }
    }
}

impl Renderer for HaloRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        for halo in self.halos.iter() {
            HaloRenderer::load_halo(&mut self.line_renderer, camera, halo);
        }
        self.line_renderer.render(pass, camera);
        self.halos.clear();
    }
}
