use std::collections::HashMap;

use super::swipe::{classify, Swipe};
use crate::model::{BodyID, Direction, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Escape,
}

/// Input, already reduced to what the scene cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerClick(BodyID),
    PointerHover(Option<BodyID>),
    Key(NavKey),
    TouchStart { x: f64, y: f64 },
    TouchEnd { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(Section),
    Close,
    Navigate(Direction),
}

/// Turns input events into selection commands. Knows which bodies stand for
/// which sections, and remembers the pointer hover and an in-progress touch.
#[derive(Debug, Clone, Default)]
pub struct InteractionRouter {
    targets: HashMap<BodyID, Section>,
    hover: Option<BodyID>,
    touch_start: Option<(f64, f64)>,
}

impl InteractionRouter {
    pub fn new(targets: HashMap<BodyID, Section>) -> Self {
        InteractionRouter {
            targets,
            ..Default::default()
        }
    }

    /// The body under the pointer, if it's one that can be selected.
    pub fn hover(&self) -> Option<BodyID> {
        self.hover
    }

    pub fn section_of(&self, id: BodyID) -> Option<Section> {
        self.targets.get(&id).copied()
    }

    pub fn route(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::PointerClick(id) => self.section_of(id).map(Command::Select),
            InputEvent::PointerHover(id) => {
                self.hover = id.filter(|id| self.targets.contains_key(id));
                None
            }
            InputEvent::Key(NavKey::Left) => Some(Command::Navigate(Direction::Previous)),
            InputEvent::Key(NavKey::Right) => Some(Command::Navigate(Direction::Next)),
            InputEvent::Key(NavKey::Escape) => Some(Command::Close),
            InputEvent::TouchStart { x, y } => {
                self.touch_start = Some((x, y));
                None
            }
            InputEvent::TouchEnd { x, y } => {
                let start = self.touch_start.take()?;
                match classify(start, (x, y))? {
                    Swipe::Left => Some(Command::Navigate(Direction::Next)),
                    Swipe::Right => Some(Command::Navigate(Direction::Previous)),
                    Swipe::Down => Some(Command::Close),
                    Swipe::Up => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> InteractionRouter {
        let mut targets = HashMap::new();
        targets.insert(BodyID(0), Section::About);
        targets.insert(BodyID(3), Section::Projects);
        InteractionRouter::new(targets)
    }

    fn swipe(router: &mut InteractionRouter, dx: f64, dy: f64) -> Option<Command> {
        assert_eq!(router.route(InputEvent::TouchStart { x: 300.0, y: 300.0 }), None);
        router.route(InputEvent::TouchEnd {
            x: 300.0 + dx,
            y: 300.0 + dy,
        })
    }

    #[test]
    fn test_clicks() {
        let mut router = router();
        assert_eq!(router.route(InputEvent::PointerClick(BodyID(3))), Some(Command::Select(Section::Projects)));
        // Decorative bodies do nothing
        assert_eq!(router.route(InputEvent::PointerClick(BodyID(4))), None);
    }

    #[test]
    fn test_keys() {
        let mut router = router();
        assert_eq!(router.route(InputEvent::Key(NavKey::Left)), Some(Command::Navigate(Direction::Previous)));
        assert_eq!(router.route(InputEvent::Key(NavKey::Right)), Some(Command::Navigate(Direction::Next)));
        assert_eq!(router.route(InputEvent::Key(NavKey::Escape)), Some(Command::Close));
    }

    #[test]
    fn test_swipes() {
        let mut router = router();
        assert_eq!(swipe(&mut router, -120.0, 10.0), Some(Command::Navigate(Direction::Next)));
        assert_eq!(swipe(&mut router, 120.0, -10.0), Some(Command::Navigate(Direction::Previous)));
        assert_eq!(swipe(&mut router, 5.0, 80.0), Some(Command::Close));
        assert_eq!(swipe(&mut router, 5.0, -80.0), None);
        assert_eq!(swipe(&mut router, 20.0, 20.0), None);
    }

    #[test]
    fn test_touch_end_without_start() {
        let mut router = router();
        assert_eq!(router.route(InputEvent::TouchEnd { x: 0.0, y: 500.0 }), None);
    }

    #[test]
    fn test_hover_only_tracks_targets() {
        let mut router = router();
        router.route(InputEvent::PointerHover(Some(BodyID(0))));
        assert_eq!(router.hover(), Some(BodyID(0)));
        router.route(InputEvent::PointerHover(Some(BodyID(5))));
        assert_eq!(router.hover(), None);
    }
}
