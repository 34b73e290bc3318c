//! Dark and light color schemes, and the saved choice between them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use nalgebra::Point3;
use thiserror::Error;

use crate::model::catalog::rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeKind::Dark => Palette {
                kind: self,
                background: rgb(0x000428),
                text_primary: rgb(0xFFFFFF),
                text_secondary: rgb(0xCCCCCC),
                accent: rgb(0x4A90E2),
                star_color: rgb(0xFFFFFF),
                sun_color: rgb(0xFFA500),
                particle_color: rgb(0xE6E6FA),
                trace_color: rgb(0x555577),
            },
            ThemeKind::Light => Palette {
                kind: self,
                background: rgb(0xF8FAFC),
                text_primary: rgb(0x1A1A1A),
                text_secondary: rgb(0x4A5568),
                accent: rgb(0x2563EB),
                star_color: rgb(0xFBBF24),
                sun_color: rgb(0xFBBF24),
                particle_color: rgb(0x1A1A1A),
                trace_color: rgb(0x9AA3B5),
            },
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeKind::Dark => write!(f, "dark"),
            ThemeKind::Light => write!(f, "light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}' (expected dark or light)")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeKind {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeKind::Dark),
            "light" => Ok(ThemeKind::Light),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Colors handed to everything that draws. Nothing reads a global theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub kind: ThemeKind,
    pub background: Point3<f32>,
    pub text_primary: Point3<f32>,
    pub text_secondary: Point3<f32>,
    pub accent: Point3<f32>,
    pub star_color: Point3<f32>,
    pub sun_color: Point3<f32>,
    pub particle_color: Point3<f32>,
    pub trace_color: Point3<f32>,
}

impl Default for Palette {
    fn default() -> Self {
        ThemeKind::default().palette()
    }
}

/// Reads the saved theme. Any problem (missing file, garbage in it) is logged
/// and gives the dark theme.
pub fn load_preference(path: &Path) -> ThemeKind {
    match std::fs::read_to_string(path) {
        Ok(text) => match text.parse() {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("Ignoring theme preference in {}: {}", path.display(), e);
                ThemeKind::Dark
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ThemeKind::Dark,
        Err(e) => {
            log::warn!("Couldn't read theme preference {}: {}", path.display(), e);
            ThemeKind::Dark
        }
    }
}

/// Saves the theme. Failure only costs the preference, so it's just logged.
pub fn save_preference(path: &Path, kind: ThemeKind) {
    if let Err(e) = std::fs::write(path, kind.to_string()) {
        log::warn!("Couldn't save theme preference to {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("solar-portfolio-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_parse() {
        assert_eq!("Light\n".parse(), Ok(ThemeKind::Light));
        assert_eq!("dark".parse(), Ok(ThemeKind::Dark));
        let err = "Purple".parse::<ThemeKind>().unwrap_err();
        assert_eq!(err, UnknownTheme("purple".to_owned()));
        assert_eq!(err.to_string(), "unknown theme 'purple' (expected dark or light)");
    }

    #[test]
    fn test_round_trip_preference() {
        let path = temp_path("round-trip");
        save_preference(&path, ThemeKind::Light);
        assert_eq!(load_preference(&path), ThemeKind::Light);
        save_preference(&path, ThemeKind::Light.toggled());
        assert_eq!(load_preference(&path), ThemeKind::Dark);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_bad_preference_falls_back_to_dark() {
        assert_eq!(load_preference(&temp_path("missing")), ThemeKind::Dark);

        let path = temp_path("garbage");
        std::fs::write(&path, "sepia").unwrap();
        assert_eq!(load_preference(&path), ThemeKind::Dark);
        let _ = std::fs::remove_file(&path);

        // Unwritable location
        save_preference(Path::new("/nonexistent-dir/theme"), ThemeKind::Light);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(ThemeKind::Dark.palette().background, ThemeKind::Light.palette().background);
        assert_eq!(Palette::default().kind, ThemeKind::Dark);
    }
}
