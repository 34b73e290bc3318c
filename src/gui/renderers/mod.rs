use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Matrix4, Point3};

use self::halo_renderer::HaloRenderer;
use self::point_renderer::PointCloudRenderer;

mod halo_renderer;
mod point_renderer;
mod utils;

pub use point_renderer::CloudID;
pub use utils::fade;

pub struct CompoundRenderer {
    point_renderer: PointCloudRenderer,
    line_renderer: LineRenderer,
    halo_renderer: HaloRenderer,
    background: Point3<f32>,
}

impl CompoundRenderer {
    pub fn new(background: Point3<f32>) -> Self {
        let mut point_renderer = PointCloudRenderer::new();
        point_renderer.set_background(background);
        CompoundRenderer {
            point_renderer,
            line_renderer: LineRenderer::new(),
            halo_renderer: HaloRenderer::new(),
            background,
        }
    }

    pub fn set_background(&mut self, background: Point3<f32>) {
        self.background = background;
        self.point_renderer.set_background(background);
    }

    pub fn add_cloud(&mut self, points: &[Point3<f32>], colors: &[Point3<f32>], point_size: f32) -> CloudID {
        self.point_renderer.add_cloud(points, colors, point_size)
    }

    pub fn clear_clouds(&mut self) {
        self.point_renderer.clear_clouds();
    }

    pub fn set_cloud_transform(&mut self, id: CloudID, transform: Matrix4<f32>, opacity: f32) {
        self.point_renderer.set_cloud_transform(id, transform, opacity);
    }

    pub fn draw_point(&mut self, pt: Point3<f32>, color: Point3<f32>, opacity: f32) {
        let color = fade(&color, &self.background, opacity);
        self.point_renderer.draw_point(pt, color);
    }

    /// A polyline through `points`, faded towards the background.
    pub fn draw_path<I: Iterator<Item = Point3<f32>>>(&mut self, points: I, color: Point3<f32>, opacity: f32) {
        let color = fade(&color, &self.background, opacity);
        utils::draw_path(&mut self.line_renderer, points, &color);
    }

    pub fn draw_segment(&mut self, a: Point3<f32>, b: Point3<f32>, color: Point3<f32>, opacity: f32) {
        let color = fade(&color, &self.background, opacity);
        self.line_renderer.draw_line(a, b, color);
    }

    pub fn draw_halo(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.halo_renderer.add_halo(center, radius, color);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.point_renderer.render(pass, camera);
        self.line_renderer.render(pass, camera);
        self.halo_renderer.render(pass, camera);
    }
}
