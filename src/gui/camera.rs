use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

use crate::scene::CameraRequest;

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// Fraction of the remaining distance covered per second of flight
const FLIGHT_RATE: f32 = 2.5;
const FLIGHT_DONE: f32 = 0.01;

// Like ArcBall, this camera is dragged to change pitch and yaw and scrolled to
// zoom. It always looks at `target` with z up. Selecting a section sets a
// destination, and the camera glides there a little more each frame. Any
// manual rotation or zoom cancels the glide.
pub struct ZoomableCamera {
    // -- position --
    target: Point3<f32>,
    theta: f32,  // azimuthal angle
    phi: f32,    // polar angle
    radius: f32, // distance from target
    destination: Option<(Point3<f32>, Point3<f32>)>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
    clip_planes: (f32, f32),
}

impl ZoomableCamera {
    pub fn new(request: CameraRequest) -> Self {
        let mut camera = ZoomableCamera {
            target: Point3::origin(),
            theta: 0.0,
            phi: PI / 2.0,
            radius: 1.0,
            destination: None,
            width: 800,
            height: 600,
            fovy: PI / 4.0,
            last_cursor_pos: Vector2::zeros(),
            theta_step: 0.005,
            phi_step: 0.005,
            scroll_ratio: 1.2,
            phi_limit: 0.001,
            radius_limits: (3.0, 300.0),
            clip_planes: (0.05, 2000.0),
        };
        let (eye, target) = to_f32(&request);
        camera.place(&eye, &target);
        camera
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.clip_planes.0,
            self.clip_planes.1,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    // Puts the camera at `eye`, looking at `target`.
    fn place(&mut self, eye: &Point3<f32>, target: &Point3<f32>) {
        let offset = eye - target;
        self.target = *target;
        self.radius = nalgebra::clamp(offset.norm(), self.radius_limits.0, self.radius_limits.1);
        self.theta = offset.y.atan2(offset.x);
        self.phi = match offset.try_normalize(1e-6) {
            Some(dir) => nalgebra::clamp(dir.z.acos(), self.phi_limit, PI - self.phi_limit),
            None => PI / 2.0,
        };
    }

    pub fn fly_to(&mut self, request: &CameraRequest) {
        self.destination = Some(to_f32(request));
    }

    pub fn is_flying(&self) -> bool {
        self.destination.is_some()
    }

    /// Moves a step of the way towards the destination, if there is one.
    pub fn advance_flight(&mut self, real_dt: f32) {
        let (dest_eye, dest_target) = match self.destination {
            Some(d) => d,
            None => return,
        };

        let k = (FLIGHT_RATE * real_dt).clamp(0.0, 1.0);
        let eye = self.eye() + (dest_eye - self.eye()) * k;
        let target = self.target + (dest_target - self.target) * k;
        self.place(&eye, &target);

        if (dest_eye - eye).norm() < FLIGHT_DONE && (dest_target - target).norm() < FLIGHT_DONE {
            self.place(&dest_eye, &dest_target);
            self.destination = None;
        }
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.destination = None;
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.destination = None;
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }
}

fn to_f32(request: &CameraRequest) -> (Point3<f32>, Point3<f32>) {
    (nalgebra::convert(request.eye), nalgebra::convert(request.target))
}

impl Camera for ZoomableCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Drag right == camera glides left
                    let dpos = curr_pos - self.last_cursor_pos;
                    if dpos.norm_squared() > 0.0 {
                        self.rotate(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
                    }
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => {
                self.width = w;
                self.height = h.max(1);
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(KEY_ZOOM_STEP.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.target
            + Vector3::new(
                self.radius * self.theta.cos() * self.phi.sin(),
                self.radius * self.theta.sin() * self.phi.sin(),
                self.radius * self.phi.cos(),
            )
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::z())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        self.clip_planes
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_at_request() {
        let camera = ZoomableCamera::new(CameraRequest::overview());
        assert_relative_eq!(camera.eye(), Point3::new(0.0, -40.0, 10.0), epsilon = 1e-4);
        assert_relative_eq!(camera.target(), Point3::origin());
    }

    #[test]
    fn test_flight_converges() {
        let mut camera = ZoomableCamera::new(CameraRequest::overview());
        let request = CameraRequest {
            eye: Point3::new(26.0, 10.0, 5.0),
            target: Point3::new(16.0, 0.0, 0.0),
        };
        camera.fly_to(&request);
        for _ in 0..600 {
            camera.advance_flight(1.0 / 60.0);
        }
        assert!(!camera.is_flying());
        assert_relative_eq!(camera.eye(), Point3::new(26.0, 10.0, 5.0), epsilon = 1e-3);
        assert_relative_eq!(camera.target(), Point3::new(16.0, 0.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn test_manual_input_cancels_flight() {
        let mut camera = ZoomableCamera::new(CameraRequest::overview());
        camera.fly_to(&CameraRequest {
            eye: Point3::new(5.0, 5.0, 5.0),
            target: Point3::origin(),
        });
        camera.zoom(1.2);
        assert!(!camera.is_flying());
    }
}
