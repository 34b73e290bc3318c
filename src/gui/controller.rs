use std::path::PathBuf;
use std::time::Instant;

use kiss3d::event::{Action, Event, Key, MouseButton, TouchAction, WindowEvent};
use nalgebra::{Point2, Vector2};

use super::view::View;
use crate::app::PortfolioApp;
use crate::clock::SimulationClock;
use crate::interaction::{InputEvent, NavKey};
use crate::theme::{save_preference, ThemeKind};

// Key config, all in one place
const KEY_PREV_SECTION: Key = Key::Left;
const KEY_NEXT_SECTION: Key = Key::Right;
const KEY_CLOSE_PANEL: Key = Key::Escape;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_RESET: Key = Key::R;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_TOGGLE_THEME: Key = Key::T;

// A press and release closer than this (in pixels) is a click, not a drag
const CLICK_SLOP: f32 = 4.0;

pub struct Controller {
    theme: ThemeKind,
    theme_file: PathBuf,
    cursor: Point2<f32>,
    press_pos: Option<Point2<f32>>,
    touch_start: Option<Point2<f32>>,
    window_size: Vector2<f32>,
    pub fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new(theme: ThemeKind, theme_file: PathBuf) -> Self {
        Controller {
            theme,
            theme_file,
            cursor: Point2::origin(),
            press_pos: None,
            touch_start: None,
            window_size: Vector2::new(800.0, 600.0),
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = Vector2::new(width as f32, height.max(1) as f32);
    }

    pub fn process_event(
        &mut self,
        event: &mut Event,
        app: &mut PortfolioApp,
        clock: &mut SimulationClock,
        view: &mut View,
    ) {
        match event.value {
            // Navigation keys are ours; in particular kiss3d would close the
            // window on Escape.
            WindowEvent::Key(key @ (KEY_PREV_SECTION | KEY_NEXT_SECTION | KEY_CLOSE_PANEL), action, _) => {
                event.inhibited = true;
                if action == Action::Press {
                    let nav = match key {
                        KEY_PREV_SECTION => NavKey::Left,
                        KEY_NEXT_SECTION => NavKey::Right,
                        _ => NavKey::Escape,
                    };
                    app.dispatch(InputEvent::Key(nav));
                }
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => clock.speed_up(),
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => clock.slow_down(),
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => clock.toggle_play(),
            WindowEvent::Key(KEY_RESET, Action::Press, _) => {
                log::info!("Resetting the simulation");
                clock.reset();
                app.scene_mut().reset();
            }
            WindowEvent::Key(KEY_TOGGLE_THEME, Action::Press, _) => {
                self.theme = self.theme.toggled();
                log::info!("Switching to the {} theme", self.theme);
                save_preference(&self.theme_file, self.theme);
                app.scene_mut().set_palette(self.theme.palette());
                view.rebuild_backdrop(app.scene());
            }
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = Point2::new(x as f32, y as f32);
                // Hovering is meaningless mid-drag
                if self.press_pos.is_none() {
                    let hit = view.pick(app, &self.cursor, &self.window_size);
                    app.dispatch(InputEvent::PointerHover(hit));
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.press_pos = Some(self.cursor);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                if let Some(start) = self.press_pos.take() {
                    if (self.cursor - start).norm() < CLICK_SLOP {
                        self.click(app, view, self.cursor);
                    }
                }
            }
            WindowEvent::Touch(_, x, y, TouchAction::Start, _) => {
                let pos = Point2::new(x as f32, y as f32);
                self.touch_start = Some(pos);
                app.dispatch(InputEvent::TouchStart { x, y });
            }
            WindowEvent::Touch(_, x, y, TouchAction::End, _) => {
                let pos = Point2::new(x as f32, y as f32);
                // Swipes go to the router; short taps select like a click
                app.dispatch(InputEvent::TouchEnd { x, y });
                if let Some(start) = self.touch_start.take() {
                    if (pos - start).norm() < CLICK_SLOP {
                        self.click(app, view, pos);
                    }
                }
            }
            WindowEvent::Touch(_, _, _, TouchAction::Cancel, _) => {
                self.touch_start = None;
            }
            _ => {}
        }
    }

    fn click(&self, app: &mut PortfolioApp, view: &View, pos: Point2<f32>) {
        if let Some(id) = view.pick(app, &pos, &self.window_size) {
            app.dispatch(InputEvent::PointerClick(id));
        }
    }
}
