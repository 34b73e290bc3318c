use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// A content category, surfaced by clicking its planet.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Section {
    About,
    Skills,
    Experience,
    Projects,
    Education,
    Contact,
    Playground,
}

/// Navigation order; arrow keys and swipes walk this list.
pub const SECTION_ORDER: [Section; 7] = [
    Section::About,
    Section::Skills,
    Section::Experience,
    Section::Projects,
    Section::Education,
    Section::Contact,
    Section::Playground,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

impl Section {
    pub fn key(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Contact => "contact",
            Section::Playground => "playground",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Contact => "Contact",
            Section::Playground => "Playground",
        }
    }

    pub fn index(self) -> usize {
        SECTION_ORDER
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SECTION_ORDER
            .iter()
            .copied()
            .find(|section| section.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

impl TryFrom<String> for Section {
    type Error = UnknownSection;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for section in SECTION_ORDER {
            assert_eq!(section.key().parse::<Section>(), Ok(section));
        }
        assert_eq!("Projects".parse::<Section>(), Ok(Section::Projects));
        assert!("blog".parse::<Section>().is_err());
    }

    #[test]
    fn test_order() {
        assert_eq!(Section::About.index(), 0);
        assert_eq!(Section::Playground.index(), SECTION_ORDER.len() - 1);
    }
}
