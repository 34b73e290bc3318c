use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3};

use super::camera::ZoomableCamera;
use super::renderers::{fade, CloudID, CompoundRenderer};
use crate::app::PortfolioApp;
use crate::clock::{format_elapsed, SimulationClock};
use crate::interaction::picking::pick_body;
use crate::model::rings::annulus_mesh;
use crate::model::{BodyID, BodyRenderState, CelestialBody, SECTION_ORDER};
use crate::scene::background::{Background, PointLayer};
use crate::scene::{CameraRequest, SceneComposer};
use crate::texture::{rgb_bytes, TextureCache, TextureKey};

// Shade of a lit body with no glow; glow brightens it from here
const BASE_SHADE: f32 = 0.75;
const RING_SEGMENTS: u16 = 96;
// Separates overlapping ring bands
const BAND_SPACING: f32 = 0.002;
const TEXT_SIZE: f32 = 60.0;

pub struct View {
    // Scene nodes, indexed like the orrery
    body_nodes: Vec<Option<SceneNode>>,
    ring_nodes: Vec<Vec<SceneNode>>,
    comet_nodes: Vec<SceneNode>,
    belt: SceneNode,
    asteroid_nodes: Vec<SceneNode>,
    // Background clouds: stars, particles, dust, nebula
    clouds: Option<[CloudID; 4]>,
    // Camera
    camera: ZoomableCamera,
    // Misc
    renderer: CompoundRenderer,
}

// kiss3d spheres have their poles on y; ours are on z
fn pole_to_z() -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2)
}

fn tilt_and_spin(tilt: f64, spin: f64) -> UnitQuaternion<f32> {
    let tilt = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt as f32);
    let spin = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), spin as f32);
    tilt * spin
}

// does some nice conversions
fn set_position_helper(node: &mut SceneNode, position: &Point3<f64>) {
    let position: Point3<f32> = nalgebra::convert(*position);
    node.set_local_translation(Translation3::from(position));
}

fn apply_texture(node: &mut SceneNode, textures: &mut TextureCache, key: &TextureKey) {
    match textures.png_for(key) {
        Ok(bytes) => node.set_texture_from_memory(&bytes, &key.resource_name()),
        Err(e) => log::warn!("Couldn't encode texture {:?}, keeping flat color: {}", key, e),
    }
}

impl View {
    pub fn new(window: &mut Window, app: &PortfolioApp, textures: &mut TextureCache) -> Self {
        let scene = app.scene();
        let palette = *scene.palette();

        let orrery = scene.orrery();
        let body_nodes = orrery
            .bodies()
            .map(|body| Some(Self::create_body_object(window, textures, body)))
            .collect();

        let ring_nodes = orrery
            .rings()
            .iter()
            .map(|rings| {
                rings
                    .bands
                    .iter()
                    .map(|band| {
                        let mesh = annulus_mesh(band.inner as f32, band.outer as f32, RING_SEGMENTS);
                        let mesh = Mesh::new(mesh.coords, mesh.faces, None, Some(mesh.uvs), false);
                        let mut node = window.add_mesh(Rc::new(RefCell::new(mesh)), Vector3::new(1.0, 1.0, 1.0));
                        node.enable_backface_culling(false);
                        if band.textured {
                            apply_texture(&mut node, textures, &TextureKey::Rings);
                        }
                        let color = fade(&band.color, &palette.background, band.opacity);
                        node.set_color(color.x, color.y, color.z);
                        node
                    })
                    .collect()
            })
            .collect();

        let comet_nodes = orrery
            .comets()
            .iter()
            .map(|comet| {
                let mut node = window.add_sphere(comet.config.size as f32);
                let color = comet.config.color;
                node.set_color(color.x, color.y, color.z);
                apply_texture(&mut node, textures, &TextureKey::Comet(rgb_bytes(&color)));
                node
            })
            .collect();

        let mut belt = window.add_group();
        let asteroid_nodes = scene
            .view()
            .background
            .asteroids
            .iter()
            .map(|asteroid| {
                let mut node = belt.add_sphere(asteroid.radius);
                node.set_color(asteroid.color.x, asteroid.color.y, asteroid.color.z);
                apply_texture(&mut node, textures, &TextureKey::Asteroid(rgb_bytes(&asteroid.color)));
                node.set_local_translation(Translation3::from(asteroid.position));
                node
            })
            .collect();
        log::info!("Built {} textures", textures.build_count());

        let mut view = View {
            body_nodes,
            ring_nodes,
            comet_nodes,
            belt,
            asteroid_nodes,
            clouds: None,
            camera: ZoomableCamera::new(CameraRequest::overview()),
            renderer: CompoundRenderer::new(palette.background),
        };
        view.rebuild_backdrop(scene);
        view
    }

    fn create_body_object(window: &mut Window, textures: &mut TextureCache, body: &CelestialBody) -> SceneNode {
        // Unit sphere; the drawn radius is applied as a scale every frame
        let mut sphere = window.add_sphere(1.0);
        let color = &body.info.color;
        sphere.set_color(color.x, color.y, color.z);
        let key = TextureKey::Body {
            key: body.info.key.clone(),
            tint: rgb_bytes(color),
        };
        apply_texture(&mut sphere, textures, &key);
        // Not visible until the body has a state
        sphere.set_visible(false);
        sphere
    }

    /// Re-uploads the background clouds, e.g. after the palette changed.
    pub fn rebuild_backdrop(&mut self, scene: &SceneComposer) {
        let view = scene.view();
        self.renderer.clear_clouds();
        self.renderer.set_background(view.palette.background);

        let mut upload = |layer: &PointLayer, size: f32| self.renderer.add_cloud(&layer.points, &layer.colors, size);
        let background = view.background;
        self.clouds = Some([
            upload(&background.starfield, 2.0),
            upload(&background.particles, 1.0),
            upload(&background.dust, 1.5),
            upload(&background.nebula, 3.0),
        ]);
    }

    pub fn fly_to(&mut self, request: &CameraRequest) {
        self.camera.fly_to(request);
    }

    pub fn advance_camera(&mut self, real_dt: f64) {
        self.camera.advance_flight(real_dt as f32);
    }

    /// The selectable body under the given window position.
    pub fn pick(&self, app: &PortfolioApp, cursor: &Point2<f32>, window_size: &Vector2<f32>) -> Option<BodyID> {
        let (origin, direction) = self.camera.unproject(cursor, window_size);
        let origin: Point3<f64> = nalgebra::convert(origin);
        let direction: Vector3<f64> = nalgebra::convert(direction);
        let orrery = app.scene().orrery();
        pick_body(orrery, &origin, &direction, |id| {
            orrery.get_body(id).and_then(|b| b.info.section).is_some()
        })
    }

    fn update_scene_objects(&mut self, app: &PortfolioApp) {
        let view = app.scene().view();
        let orrery = view.orrery;
        let accent = view.palette.accent;

        for body in orrery.bodies() {
            let node = match self.body_nodes.get_mut(body.id.0).and_then(Option::as_mut) {
                Some(node) => node,
                None => {
                    log::trace!("No scene node for {}", body.info.key);
                    continue;
                }
            };
            let state = match orrery.body_state(body.id) {
                Some(state) => state,
                None => {
                    node.set_visible(false);
                    continue;
                }
            };
            Self::place_body(node, body, state);

            if state.is_highlighted {
                let center: Point3<f32> = nalgebra::convert(state.current_position);
                let glow = (state.emissive_intensity as f32 * 2.5).min(1.0);
                self.renderer
                    .draw_halo(center, state.radius(&body.info) as f32, accent * glow);
            }
        }

        for (idx, nodes) in self.ring_nodes.iter_mut().enumerate() {
            let state = match orrery.ring_state(idx) {
                Some(state) => state,
                None => {
                    nodes.iter_mut().for_each(|n| n.set_visible(false));
                    continue;
                }
            };
            let scale = state.parent_radius as f32;
            for (band_idx, node) in nodes.iter_mut().enumerate() {
                let (tilt, spin) = state.band_orientation(band_idx);
                let tilt = tilt_and_spin(tilt, spin);
                let lift = tilt * Vector3::new(0.0, 0.0, band_idx as f32 * BAND_SPACING);
                let center: Point3<f32> = nalgebra::convert(state.center);
                node.set_visible(true);
                node.set_local_translation(Translation3::from(center + lift));
                node.set_local_rotation(tilt);
                node.set_local_scale(scale, scale, 1.0);
            }
        }

        let comets = orrery.comets();
        for ((node, state), comet) in self.comet_nodes.iter_mut().zip(view.comets).zip(comets) {
            let color = comet.config.color;
            let opacity = state.opacity as f32;
            node.set_visible(opacity > 0.01);
            set_position_helper(node, &state.position);
            node.set_local_rotation(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), state.spin as f32));
            let faded = fade(&color, &view.palette.background, opacity);
            node.set_color(faded.x, faded.y, faded.z);

            // The trail is brightest at the head
            for pair in state.trail.windows(2) {
                let (a, alpha) = pair[0];
                let (b, _) = pair[1];
                self.renderer.draw_segment(
                    nalgebra::convert(a),
                    nalgebra::convert(b),
                    color,
                    alpha as f32,
                );
            }
            for pt in state.explosion.iter() {
                self.renderer.draw_point(nalgebra::convert(*pt), color, opacity);
            }
        }

        let t = view.time;
        let belt_rotation: UnitQuaternion<f32> =
            nalgebra::convert(UnitQuaternion::from_rotation_matrix(&Background::belt_rotation(t)));
        self.belt.set_local_rotation(belt_rotation);
        for (node, asteroid) in self.asteroid_nodes.iter_mut().zip(view.background.asteroids.iter()) {
            let rotation: UnitQuaternion<f32> =
                nalgebra::convert(UnitQuaternion::from_rotation_matrix(&asteroid.rotation_at(t)));
            node.set_local_rotation(rotation);
        }
    }

    fn place_body(node: &mut SceneNode, body: &CelestialBody, state: &BodyRenderState) {
        node.set_visible(true);
        set_position_helper(node, &state.current_position);
        let rotation = tilt_and_spin(state.current_rotation.x, state.current_rotation.z) * pole_to_z();
        node.set_local_rotation(rotation);
        let r = state.radius(&body.info) as f32;
        node.set_local_scale(r, r, r);

        let shade = (BASE_SHADE + state.emissive_intensity as f32).min(1.0);
        let color = body.info.color;
        node.set_color(
            (color.x * shade / BASE_SHADE).min(1.0),
            (color.y * shade / BASE_SHADE).min(1.0),
            (color.z * shade / BASE_SHADE).min(1.0),
        );
    }

    fn draw_backdrop(&mut self, scene: &SceneComposer) {
        let view = scene.view();
        let clouds = match self.clouds {
            Some(clouds) => clouds,
            None => return,
        };
        let background = view.background;
        let layers = [
            (&background.starfield, 1.0),
            (&background.particles, 0.6),
            (&background.dust, 0.8),
            (&background.nebula, view.nebula_opacity),
        ];
        for (id, (layer, opacity)) in clouds.iter().zip(layers) {
            let transform = layer.rotation_at(view.time).to_homogeneous();
            self.renderer
                .set_cloud_transform(*id, nalgebra::convert(transform), opacity as f32);
        }

        let color = view.palette.trace_color;
        let opacity = view.trace_opacity as f32;
        for trace in view.traces {
            let points = scene.trace_points(trace).into_iter().map(nalgebra::convert::<_, Point3<f32>>);
            self.renderer.draw_path(points, color, opacity);
        }
    }

    // the big boy
    pub fn prerender_scene(&mut self, window: &mut Window, app: &PortfolioApp, clock: &SimulationClock, fps: f64) {
        let palette = *app.scene().palette();
        window.set_background_color(palette.background.x, palette.background.y, palette.background.z);

        self.update_scene_objects(app);
        self.draw_backdrop(app.scene());

        let default_font = Font::default();
        window.draw_text(
            &Self::left_hand_text(app),
            &Point2::origin(),
            TEXT_SIZE,
            &default_font,
            &palette.text_primary,
        );
        window.draw_text(
            &Self::clock_text(clock, fps),
            // no idea why i have to multiply by 2.0, but there it is
            &Point2::new(window.width() as f32 * 2.0 - 600.0, 0.0),
            TEXT_SIZE,
            &default_font,
            &palette.text_secondary,
        );
        window.draw_text(
            Self::instructions(),
            &Point2::new(0.0, window.height() as f32 * 2.0 - 4.0 * TEXT_SIZE),
            TEXT_SIZE * 0.6,
            &default_font,
            &palette.text_secondary,
        );
    }

    fn nav_line(app: &PortfolioApp) -> String {
        SECTION_ORDER
            .iter()
            .map(|s| {
                if app.selection() == Some(*s) {
                    format!("[{}]", s.title())
                } else {
                    s.title().to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn left_hand_text(app: &PortfolioApp) -> String {
        let body = match app.panel_text() {
            Some(text) => text,
            None => {
                let personal = &app.content().personal;
                format!("{}\n{}\n\nClick a planet to explore", personal.name, personal.title)
            }
        };
        let hovered = app
            .hover()
            .and_then(|id| app.scene().orrery().get_body(id))
            .map(|b| format!("\n> {}: {}", b.info.display_name, b.info.description))
            .unwrap_or_default();
        format!("{}\n\n{}{}", Self::nav_line(app), body, hovered)
    }

    fn clock_text(clock: &SimulationClock, fps: f64) -> String {
        format!(
            "Time: {}
Speed: {}x{}
FPS: {:.0}",
            format_elapsed(clock.elapsed()),
            clock.speed(),
            if clock.is_playing() { "" } else { " (paused)" },
            fps,
        )
    }

    fn instructions() -> &'static str {
        "Click a planet | Left/Right: previous/next | Esc: close
Drag/WASD: orbit | Scroll/+-: zoom | Space: pause | ,/.: speed | R: reset | T: theme"
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}
