use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::app::PortfolioApp;
use crate::clock::SimulationClock;
use crate::interaction::Subscription;
use crate::texture::TextureCache;
use crate::theme::ThemeKind;

mod camera;
mod controller;
mod renderers;
mod view;

/// Window-side settings that don't belong to the scene itself.
pub struct DisplayOptions {
    pub theme: ThemeKind,
    pub theme_file: PathBuf,
    pub texture_seed: u64,
    pub texture_size: u32,
}

pub struct Simulation {
    app: PortfolioApp,
    clock: SimulationClock,
    view: View,
    controller: Controller,
    last_frame: Instant,
    selection_changed: Rc<Cell<bool>>,
    _selection_watch: Subscription,
}

impl Simulation {
    pub fn new(mut app: PortfolioApp, options: DisplayOptions, window: &mut Window) -> Self {
        window.set_light(Light::StickToCamera);

        // Everything needs a state before the first frame is drawn
        app.advance(0.0, 0.0);

        let mut textures = TextureCache::new(options.texture_seed, options.texture_size);
        let view = View::new(window, &app, &mut textures);

        let selection_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&selection_changed);
        let selection_watch = app.subscribe(move |_| flag.set(true));

        Self {
            app,
            clock: SimulationClock::new(),
            view,
            controller: Controller::new(options.theme, options.theme_file),
            last_frame: Instant::now(),
            selection_changed,
            _selection_watch: selection_watch,
        }
    }

    fn process_user_input(&mut self, window: &mut Window) {
        let size = window.size();
        self.controller.set_window_size(size.x, size.y);

        let mut events = window.events();
        for mut event in events.iter() {
            self.controller
                .process_event(&mut event, &mut self.app, &mut self.clock, &mut self.view);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        self.process_user_input(window);

        let dt = self.clock.advance(real_dt);
        self.app.advance(self.clock.elapsed(), dt);
        if self.selection_changed.replace(false) {
            self.view.fly_to(&self.app.camera_request());
        }
        self.view.advance_camera(real_dt);

        self.view
            .prerender_scene(window, &self.app, &self.clock, self.controller.fps());
        self.controller.fps_counter.increment();
    }
}
