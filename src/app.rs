//! Top-level state: which section is open, and everything that has to hear
//! about it.

use crate::content::PortfolioContent;
use crate::interaction::{Command, InputEvent, InteractionRouter, SelectionBus, Subscription};
use crate::model::{BodyID, Direction, Section, SectionSelection};
use crate::scene::{CameraRequest, SceneComposer};

pub struct PortfolioApp {
    scene: SceneComposer,
    content: PortfolioContent,
    selection: SectionSelection,
    router: InteractionRouter,
    bus: SelectionBus,
    camera_request: CameraRequest,
}

impl PortfolioApp {
    pub fn new(scene: SceneComposer, content: PortfolioContent) -> Self {
        let router = InteractionRouter::new(scene.orrery().section_targets());
        PortfolioApp {
            scene,
            content,
            selection: SectionSelection::none(),
            router,
            bus: SelectionBus::new(),
            camera_request: CameraRequest::overview(),
        }
    }

    pub fn scene(&self) -> &SceneComposer {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneComposer {
        &mut self.scene
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn selection(&self) -> Option<Section> {
        self.selection.get()
    }

    pub fn hover(&self) -> Option<BodyID> {
        self.router.hover()
    }

    /// Where the camera was last asked to go.
    pub fn camera_request(&self) -> CameraRequest {
        self.camera_request
    }

    pub fn subscribe(&self, handler: impl FnMut(Option<Section>) + 'static) -> Subscription {
        self.bus.subscribe(handler)
    }

    /// Text for the open section's panel.
    pub fn panel_text(&self) -> Option<String> {
        self.selection().map(|s| self.content.summary(s))
    }

    pub fn advance(&mut self, elapsed: f64, dt: f64) {
        self.scene
            .advance(elapsed, dt, self.selection.get(), self.router.hover());
    }

    /// Returns whether the selection changed.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        match self.router.route(event) {
            Some(Command::Select(section)) => self.select_section(section),
            Some(Command::Close) => self.close_panel(),
            Some(Command::Navigate(direction)) => self.navigate(direction),
            None => false,
        }
    }

    pub fn select_section(&mut self, section: Section) -> bool {
        let changed = self.selection.select(section);
        self.after_command(changed)
    }

    pub fn close_panel(&mut self) -> bool {
        let changed = self.selection.close();
        self.after_command(changed)
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        let changed = self.selection.navigate(direction);
        self.after_command(changed)
    }

    fn after_command(&mut self, changed: bool) -> bool {
        if changed {
            let selection = self.selection.get();
            match selection {
                Some(section) => log::info!("Opened {}", section.title()),
                None => log::info!("Closed panel"),
            }
            self.camera_request = self.scene.camera_request_for(selection);
            self.bus.publish(selection);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::NavKey;
    use crate::model::catalog::default_orrery;
    use crate::theme::Palette;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn app() -> PortfolioApp {
        let scene = SceneComposer::new(default_orrery(), 1, Palette::default(), true);
        let mut app = PortfolioApp::new(scene, PortfolioContent::default());
        app.advance(0.0, 0.0);
        app
    }

    #[test]
    fn test_publishes_only_changes() {
        let mut app = app();
        let seen = Rc::new(RefCell::new(vec![]));
        let sink = seen.clone();
        let _sub = app.subscribe(move |s| sink.borrow_mut().push(s));

        assert!(app.select_section(Section::Skills));
        assert!(!app.select_section(Section::Skills));
        assert!(app.navigate(Direction::Next));
        assert!(app.close_panel());
        assert!(!app.close_panel());

        assert_eq!(
            *seen.borrow(),
            vec![Some(Section::Skills), Some(Section::Experience), None]
        );
    }

    #[test]
    fn test_camera_follows_selection() {
        let mut app = app();
        assert_eq!(app.camera_request(), CameraRequest::overview());

        app.select_section(Section::Contact);
        let jupiter = app.scene().orrery().body_for_section(Section::Contact).unwrap().id;
        let pos = app.scene().orrery().body_state(jupiter).unwrap().current_position;
        assert_eq!(app.camera_request().target, pos);

        app.dispatch(InputEvent::Key(NavKey::Escape));
        assert_eq!(app.camera_request(), CameraRequest::overview());
    }

    #[test]
    fn test_panel_text() {
        let mut app = app();
        assert_eq!(app.panel_text(), None);
        app.select_section(Section::Education);
        assert!(app.panel_text().unwrap().contains("Education"));
    }

    #[test]
    fn test_hover_reaches_scene() {
        let mut app = app();
        let mars = app.scene().orrery().body_for_section(Section::Education).unwrap().id;
        app.dispatch(InputEvent::PointerHover(Some(mars)));
        app.advance(1.0, 0.1);
        assert!(app.scene().orrery().body_state(mars).unwrap().is_highlighted);
        assert_eq!(app.hover(), Some(mars));
    }
}
