use super::section::{Section, SECTION_ORDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The one open section, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionSelection(Option<Section>);

impl SectionSelection {
    pub fn none() -> Self {
        SectionSelection(None)
    }

    pub fn get(&self) -> Option<Section> {
        self.0
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.0 == Some(section)
    }

    /// Returns whether the selection changed.
    pub fn select(&mut self, section: Section) -> bool {
        let changed = self.0 != Some(section);
        self.0 = Some(section);
        changed
    }

    pub fn close(&mut self) -> bool {
        self.0.take().is_some()
    }

    /// Steps through [SECTION_ORDER]. Clamps at both ends, and does nothing
    /// when nothing is selected, since there's no index to move from.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let current = match self.0 {
            Some(section) => section.index(),
            None => return false,
        };

        let target = match direction {
            Direction::Previous => current.checked_sub(1),
            Direction::Next => Some(current + 1).filter(|i| *i < SECTION_ORDER.len()),
        };

        match target {
            Some(idx) => self.select(SECTION_ORDER[idx]),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reselect_after_close() {
        let mut selection = SectionSelection::none();
        selection.select(Section::Skills);
        let first = selection;
        assert!(selection.close());
        assert_eq!(selection.get(), None);
        selection.select(Section::Skills);
        assert_eq!(selection, first);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut selection = SectionSelection::none();
        selection.select(Section::About);
        assert!(!selection.navigate(Direction::Previous));
        assert_eq!(selection.get(), Some(Section::About));

        selection.select(Section::Playground);
        assert!(!selection.navigate(Direction::Next));
        assert_eq!(selection.get(), Some(Section::Playground));

        selection.select(Section::Projects);
        assert!(selection.navigate(Direction::Next));
        assert_eq!(selection.get(), Some(Section::Education));
        assert!(selection.navigate(Direction::Previous));
        assert!(selection.navigate(Direction::Previous));
        assert_eq!(selection.get(), Some(Section::Experience));
    }

    #[test]
    fn test_navigation_without_selection() {
        let mut selection = SectionSelection::none();
        assert!(!selection.navigate(Direction::Next));
        assert!(!selection.navigate(Direction::Previous));
        assert_eq!(selection.get(), None);
    }

    #[test]
    fn test_close_when_empty() {
        let mut selection = SectionSelection::none();
        assert!(!selection.close());
    }
}
