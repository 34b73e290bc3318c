use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform,
};

use nalgebra::{Matrix4, Point3};

/// Index of a cloud uploaded with [PointCloudRenderer::add_cloud].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudID(usize);

struct CloudData {
    // Stored as (pt, color, pt, color), in the cloud's own frame
    points: GPUVec<Point3<f32>>,
    transform: Matrix4<f32>,
    opacity: f32,
    point_size: f32,
}

/// Draws point clouds. Long-lived clouds (stars, dust) are uploaded once and
/// only have their transform changed per frame; loose points (comet debris)
/// are drawn for a single frame.
pub struct PointCloudRenderer {
    // OpenGL stuff
    shader: Effect,
    pos: ShaderAttribute<Point3<f32>>,
    color: ShaderAttribute<Point3<f32>>,
    model: ShaderUniform<Matrix4<f32>>,
    view: ShaderUniform<Matrix4<f32>>,
    proj: ShaderUniform<Matrix4<f32>>,
    opacity: ShaderUniform<f32>,
    point_size: ShaderUniform<f32>,
    background: ShaderUniform<Point3<f32>>,
    // Data storage
    clouds: Vec<CloudData>,
    loose_points: Vec<Point3<f32>>,
    background_color: Point3<f32>,
}

impl PointCloudRenderer {
    pub fn new() -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        PointCloudRenderer {
            pos: shader
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            color: shader
                .get_attrib::<Point3<f32>>("color")
                .expect("Failed to get shader attribute."),
            model: shader
                .get_uniform::<Matrix4<f32>>("model")
                .expect("Failed to get shader uniform."),
            view: shader
                .get_uniform::<Matrix4<f32>>("view")
                .expect("Failed to get shader uniform."),
            proj: shader
                .get_uniform::<Matrix4<f32>>("proj")
                .expect("Failed to get shader uniform."),
            opacity: shader
                .get_uniform::<f32>("opacity")
                .expect("Failed to get shader uniform."),
            point_size: shader
                .get_uniform::<f32>("point_size")
                .expect("Failed to get shader uniform."),
            background: shader
                .get_uniform::<Point3<f32>>("background")
                .expect("Failed to get shader uniform."),
            shader,
            clouds: vec![],
            loose_points: vec![],
            background_color: Point3::origin(),
        }
    }

    pub fn add_cloud(&mut self, points: &[Point3<f32>], colors: &[Point3<f32>], point_size: f32) -> CloudID {
        let mut data = Vec::with_capacity(2 * points.len());
        for (pt, color) in points.iter().zip(colors.iter()) {
            data.push(*pt);
            data.push(*color);
        }

        self.clouds.push(CloudData {
            points: GPUVec::new(data, BufferType::Array, AllocationType::StaticDraw),
            transform: Matrix4::identity(),
            opacity: 1.0,
            point_size,
        });
        CloudID(self.clouds.len() - 1)
    }

    /// Drops every uploaded cloud, e.g. before re-uploading recolored ones.
    pub fn clear_clouds(&mut self) {
        self.clouds.clear();
    }

    pub fn set_cloud_transform(&mut self, id: CloudID, transform: Matrix4<f32>, opacity: f32) {
        if let Some(cloud) = self.clouds.get_mut(id.0) {
            cloud.transform = transform;
            cloud.opacity = opacity;
        }
    }

    /// What a fully transparent point fades into.
    pub fn set_background(&mut self, color: Point3<f32>) {
        self.background_color = color;
    }

    /// A point drawn for this frame only.
    pub fn draw_point(&mut self, pt: Point3<f32>, color: Point3<f32>) {
        self.loose_points.push(pt);
        self.loose_points.push(color);
    }
}

impl Renderer for PointCloudRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        if self.clouds.is_empty() && self.loose_points.is_empty() {
            return;
        }

        self.shader.use_program();
        self.pos.enable();
        self.color.enable();

        camera.upload(pass, &mut self.proj, &mut self.view);
        self.background.upload(&self.background_color);

        let ctxt = Context::get();
        for cloud in self.clouds.iter_mut() {
            self.pos.bind_sub_buffer(&mut cloud.points, 1, 0);
            self.color.bind_sub_buffer(&mut cloud.points, 1, 1);

            self.model.upload(&cloud.transform);
            self.opacity.upload(&cloud.opacity);
            self.point_size.upload(&cloud.point_size);

            ctxt.draw_arrays(Context::POINTS, 0, (cloud.points.len() / 2) as i32);
        }

        if !self.loose_points.is_empty() {
            let mut loose = GPUVec::new(
                std::mem::take(&mut self.loose_points),
                BufferType::Array,
                AllocationType::StreamDraw,
            );
            self.pos.bind_sub_buffer(&mut loose, 1, 0);
            self.color.bind_sub_buffer(&mut loose, 1, 1);
            self.model.upload(&Matrix4::identity());
            self.opacity.upload(&1.0);
            self.point_size.upload(&2.0);

            ctxt.draw_arrays(Context::POINTS, 0, (loose.len() / 2) as i32);
        }

        self.pos.disable();
        self.color.disable();
    }
}

static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 color;
    varying   vec3 vColor;
    uniform   mat4 model;
    uniform   mat4 proj;
    uniform   mat4 view;
    uniform   float point_size;
    void main() {
        gl_Position = proj * view * model * vec4(position, 1.0);
        gl_PointSize = point_size;
        vColor = color;
    }";

// No blending; a faded point is mixed into the background color instead.
static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 vColor;
    uniform vec3 background;
    uniform float opacity;
    void main() {
        gl_FragColor = vec4(mix(background, vColor, opacity), 1.0);
    }";
