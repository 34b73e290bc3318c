//! Optional scene file (json5). Anything left out falls back to the built-in
//! solar system and portfolio.

use std::collections::HashSet;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use thiserror::Error;

use crate::content::PortfolioContent;
use crate::model::body::{BodyInfo, BodyKind};
use crate::model::catalog;
use crate::model::comet::{CometConfig, CometPhysics};
use crate::model::orrery::Orrery;
use crate::model::section::{Section, UnknownSection};

pub const DEFAULT_TEXTURE_SIZE: u32 = 512;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] json5::Error),
    #[error("bad color '{0}', expected a hex triplet like #FDB813")]
    BadColor(String),
    #[error(transparent)]
    UnknownSection(#[from] UnknownSection),
    #[error("'{0}' names no built-in planet")]
    UnknownPrefab(String),
    #[error("body '{body}' orbits '{parent}', which isn't defined before it")]
    UnknownParent { body: String, parent: String },
    #[error("section {0} is assigned to more than one body")]
    DuplicateSection(Section),
}

/// Accepts `#RRGGBB` or `RRGGBB`.
pub fn parse_color(s: &str) -> Result<Point3<f32>, ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ConfigError::BadColor(s.to_owned()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ConfigError::BadColor(s.to_owned()))
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    Ok(Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
}

fn default_spin() -> f64 {
    0.6
}

fn default_comet_size() -> f64 {
    0.3
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BodyEntry {
    /// One of the built-in planets, with its moons and rings.
    Prefab(String),
    Custom(CustomBody),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomBody {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub section: Option<String>,
    /// Makes this a moon of an earlier body; radii then scale with the
    /// parent's size.
    #[serde(default)]
    pub parent: Option<String>,
    pub orbit_radius: f64,
    #[serde(default)]
    pub start_degrees: f64,
    pub scale: f64,
    pub color: String,
    pub orbital_speed: f64,
    #[serde(default = "default_spin")]
    pub spin_rate: f64,
    #[serde(default)]
    pub axial_tilt: f64,
    #[serde(default)]
    pub inclination: f64,
    /// Gives the body Saturn's ring system.
    #[serde(default)]
    pub rings: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CometEntry {
    pub name: String,
    pub color: String,
    #[serde(default = "default_comet_size")]
    pub size: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl CometEntry {
    fn to_config(&self) -> Result<CometConfig, ConfigError> {
        Ok(CometConfig {
            name: self.name.clone(),
            color: parse_color(&self.color)?,
            size: self.size,
            spawn_position: Point3::from(self.position),
            spawn_velocity: Vector3::from(self.velocity),
        })
    }
}

impl CustomBody {
    fn to_info(&self, orrery: &Orrery) -> Result<BodyInfo, ConfigError> {
        let section = match &self.section {
            Some(s) => Some(s.parse::<Section>()?),
            None => None,
        };

        let (kind, radius, scale) = match &self.parent {
            None => (BodyKind::Planet, self.orbit_radius, self.scale),
            Some(parent) => {
                let parent_body = orrery.find_body(parent).ok_or_else(|| ConfigError::UnknownParent {
                    body: self.key.clone(),
                    parent: parent.clone(),
                })?;
                let parent_scale = parent_body.info.scale;
                (
                    BodyKind::Moon { parent: parent_body.id },
                    self.orbit_radius * parent_scale,
                    self.scale * parent_scale,
                )
            }
        };

        Ok(BodyInfo {
            key: self.key.to_lowercase(),
            display_name: self.name.clone(),
            description: self.description.clone(),
            section,
            kind,
            base_position: catalog::polar(radius, self.start_degrees),
            scale,
            color: parse_color(&self.color)?,
            orbital_speed: self.orbital_speed,
            spin_rate: self.spin_rate,
            axial_tilt: self.axial_tilt,
            orbital_inclination: self.inclination,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: Option<u64>,
    pub texture_size: Option<u32>,
    pub low_detail: Option<bool>,
    /// Everything orbiting the sun. Replaces the built-in planets entirely.
    pub bodies: Option<Vec<BodyEntry>>,
    pub comets: Option<Vec<CometEntry>>,
    pub content: Option<PortfolioContent>,
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(text)?)
    }

    pub fn texture_size(&self) -> u32 {
        self.texture_size.unwrap_or(DEFAULT_TEXTURE_SIZE)
    }

    pub fn low_detail(&self) -> bool {
        self.low_detail.unwrap_or(false)
    }

    pub fn content(&self) -> PortfolioContent {
        self.content.clone().unwrap_or_default()
    }

    pub fn build_orrery(&self) -> Result<Orrery, ConfigError> {
        let comets = match &self.comets {
            Some(entries) => entries.iter().map(CometEntry::to_config).collect::<Result<Vec<_>, _>>()?,
            None => catalog::comets(),
        };
        let physics = CometPhysics::default();

        let entries = match &self.bodies {
            Some(entries) => entries,
            None => return Ok(catalog::build_orrery(catalog::sun(), catalog::planets(), comets, physics)),
        };

        let mut orrery = Orrery::new(physics);
        orrery.add_body(catalog::sun());
        for entry in entries {
            match entry {
                BodyEntry::Prefab(name) => {
                    let key = name.to_lowercase();
                    let info = catalog::planets()
                        .into_iter()
                        .find(|p| p.key == key)
                        .ok_or_else(|| ConfigError::UnknownPrefab(name.clone()))?;
                    catalog::add_planet(&mut orrery, info);
                }
                BodyEntry::Custom(custom) => {
                    let info = custom.to_info(&orrery)?;
                    let id = orrery.add_body(info);
                    if custom.rings {
                        orrery.add_rings(catalog::saturn_rings(id));
                    }
                }
            }
        }
        for comet in comets {
            orrery.add_comet(comet);
        }

        let mut seen = HashSet::new();
        for section in orrery.bodies().filter_map(|b| b.info.section) {
            if !seen.insert(section) {
                return Err(ConfigError::DuplicateSection(section));
            }
        }

        Ok(orrery)
    }
}
