//! The built-in solar system: one planet per section, plus decorative moons,
//! Saturn's rings and three comets.

use nalgebra::{Point3, Vector3};

use super::body::{BodyID, BodyInfo, BodyKind};
use super::comet::{CometConfig, CometPhysics};
use super::orrery::Orrery;
use super::rings::{RingBand, RingSystem};
use super::section::Section;

/// Converts a 0xRRGGBB color.
pub fn rgb(hex: u32) -> Point3<f32> {
    let r = (hex >> 16) & 0xff;
    let g = (hex >> 8) & 0xff;
    let b = hex & 0xff;
    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

pub fn polar(radius: f64, degrees: f64) -> Point3<f64> {
    let theta = degrees.to_radians();
    Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
}

struct PlanetRow {
    key: &'static str,
    name: &'static str,
    section: Option<Section>,
    description: &'static str,
    radius: f64,
    start_degrees: f64,
    scale: f64,
    color: u32,
    orbital_speed: f64,
    axial_tilt: f64,
    inclination: f64,
}

#[rustfmt::skip]
const PLANETS: &[PlanetRow] = &[
    PlanetRow { key: "mercury", name: "Skills", section: Some(Section::Skills), description: "Technical abilities and expertise", radius: 8.0, start_degrees: 0.0, scale: 0.4, color: 0x8C7853, orbital_speed: 0.02, axial_tilt: 0.0, inclination: 0.12 },
    PlanetRow { key: "venus", name: "Experience", section: Some(Section::Experience), description: "Professional journey and achievements", radius: 12.0, start_degrees: 140.0, scale: 0.6, color: 0xFFC649, orbital_speed: 0.015, axial_tilt: 3.1, inclination: 0.059 },
    PlanetRow { key: "earth", name: "Projects", section: Some(Section::Projects), description: "Showcase of my work and creations", radius: 16.0, start_degrees: 250.0, scale: 0.8, color: 0x6B93D6, orbital_speed: 0.01, axial_tilt: 0.41, inclination: 0.0 },
    PlanetRow { key: "mars", name: "Education", section: Some(Section::Education), description: "Academic background and learning", radius: 20.0, start_degrees: 40.0, scale: 0.5, color: 0xC1440E, orbital_speed: 0.008, axial_tilt: 0.44, inclination: 0.032 },
    PlanetRow { key: "jupiter", name: "Contact", section: Some(Section::Contact), description: "Get in touch with me", radius: 32.0, start_degrees: 200.0, scale: 1.5, color: 0xD8CA9D, orbital_speed: 0.005, axial_tilt: 0.05, inclination: 0.023 },
    PlanetRow { key: "saturn", name: "Playground", section: Some(Section::Playground), description: "Experiments and interactive toys", radius: 42.0, start_degrees: 310.0, scale: 1.3, color: 0xFAD5A5, orbital_speed: 0.004, axial_tilt: 0.47, inclination: 0.043 },
    PlanetRow { key: "uranus", name: "Uranus", section: None, description: "An ice giant, just passing through", radius: 52.0, start_degrees: 100.0, scale: 1.0, color: 0x4FD0E7, orbital_speed: 0.003, axial_tilt: 1.71, inclination: 0.013 },
];

struct MoonRow {
    parent: &'static str,
    name: &'static str,
    orbit_radius: f64,
    orbit_speed: f64,
    size: f64,
    color: u32,
}

#[rustfmt::skip]
const MOONS: &[MoonRow] = &[
    MoonRow { parent: "earth", name: "Moon", orbit_radius: 3.0, orbit_speed: 0.5, size: 0.27, color: 0xC0C0C0 },
    MoonRow { parent: "mars", name: "Phobos", orbit_radius: 2.0, orbit_speed: 0.8, size: 0.1, color: 0x8C7853 },
    MoonRow { parent: "mars", name: "Deimos", orbit_radius: 2.5, orbit_speed: 0.6, size: 0.08, color: 0xA0522D },
    MoonRow { parent: "jupiter", name: "Io", orbit_radius: 4.0, orbit_speed: 0.7, size: 0.25, color: 0xFFFF99 },
    MoonRow { parent: "jupiter", name: "Europa", orbit_radius: 5.0, orbit_speed: 0.5, size: 0.22, color: 0xE6E6FA },
    MoonRow { parent: "jupiter", name: "Ganymede", orbit_radius: 6.0, orbit_speed: 0.4, size: 0.35, color: 0x8B4513 },
    MoonRow { parent: "jupiter", name: "Callisto", orbit_radius: 7.0, orbit_speed: 0.3, size: 0.32, color: 0x696969 },
    MoonRow { parent: "saturn", name: "Titan", orbit_radius: 4.0, orbit_speed: 0.6, size: 0.35, color: 0xFFA500 },
    MoonRow { parent: "saturn", name: "Enceladus", orbit_radius: 5.0, orbit_speed: 0.8, size: 0.15, color: 0xF5F5DC },
    MoonRow { parent: "saturn", name: "Iapetus", orbit_radius: 6.0, orbit_speed: 0.4, size: 0.28, color: 0xDCDCDC },
    MoonRow { parent: "uranus", name: "Ariel", orbit_radius: 3.0, orbit_speed: 0.7, size: 0.18, color: 0xB0C4DE },
    MoonRow { parent: "uranus", name: "Umbriel", orbit_radius: 3.5, orbit_speed: 0.6, size: 0.20, color: 0xE0E0E0 },
    MoonRow { parent: "uranus", name: "Titania", orbit_radius: 4.2, orbit_speed: 0.5, size: 0.25, color: 0xF0F8FF },
    MoonRow { parent: "uranus", name: "Oberon", orbit_radius: 4.8, orbit_speed: 0.4, size: 0.23, color: 0xD3D3D3 },
];

const PLANET_SPIN: f64 = 0.6;
const SUN_SPIN: f64 = 0.3;
const MOON_SPIN: f64 = 0.6;
// Moons wobble a little out of their parent's plane
const MOON_INCLINATION: f64 = 0.1;

pub fn sun() -> BodyInfo {
    BodyInfo {
        key: "sun".to_owned(),
        display_name: "About".to_owned(),
        description: "Central hub - Learn about me".to_owned(),
        section: Some(Section::About),
        kind: BodyKind::Star,
        base_position: Point3::origin(),
        scale: 3.0,
        color: rgb(0xFDB813),
        orbital_speed: 0.0,
        spin_rate: SUN_SPIN,
        axial_tilt: 0.0,
        orbital_inclination: 0.0,
    }
}

pub fn planets() -> Vec<BodyInfo> {
    PLANETS
        .iter()
        .map(|row| BodyInfo {
            key: row.key.to_owned(),
            display_name: row.name.to_owned(),
            description: row.description.to_owned(),
            section: row.section,
            kind: BodyKind::Planet,
            base_position: polar(row.radius, row.start_degrees),
            scale: row.scale,
            color: rgb(row.color),
            orbital_speed: row.orbital_speed,
            spin_rate: PLANET_SPIN,
            axial_tilt: row.axial_tilt,
            orbital_inclination: row.inclination,
        })
        .collect()
}

/// Moons of the planet with the given key, scaled to its size.
pub fn moons_of(planet_key: &str, parent: BodyID, parent_scale: f64) -> Vec<BodyInfo> {
    MOONS
        .iter()
        .filter(|row| row.parent == planet_key)
        .enumerate()
        .map(|(i, row)| BodyInfo {
            key: row.name.to_lowercase(),
            display_name: row.name.to_owned(),
            description: format!("A moon of {}", planet_key),
            section: None,
            kind: BodyKind::Moon { parent },
            // Stagger siblings so they don't start lined up
            base_position: polar(row.orbit_radius * parent_scale, 97.0 * i as f64),
            scale: row.size * parent_scale,
            color: rgb(row.color),
            orbital_speed: row.orbit_speed,
            spin_rate: MOON_SPIN,
            axial_tilt: 0.0,
            orbital_inclination: MOON_INCLINATION,
        })
        .collect()
}

pub fn saturn_rings(parent: BodyID) -> RingSystem {
    let band = |name: &str, inner, outer, spin_rate, color, opacity, textured| RingBand {
        name: name.to_owned(),
        inner,
        outer,
        spin_rate,
        color: rgb(color),
        opacity,
        textured,
    };

    RingSystem {
        parent,
        bands: vec![
            band("C ring", 1.4, 1.7, 0.18, 0xF0E68C, 0.4, false),
            band("A/B rings", 1.8, 2.8, 0.12, 0xE6D2AA, 0.8, true),
            band("Cassini division", 2.4, 2.5, 0.0, 0x1A1A1A, 0.8, false),
            band("F ring", 3.0, 3.2, 0.06, 0xDEB887, 0.3, false),
        ],
    }
}

pub fn comets() -> Vec<CometConfig> {
    vec![
        CometConfig {
            name: "Wanderer".to_owned(),
            color: rgb(0x87CEEB),
            size: 0.3,
            spawn_position: Point3::new(-110.0, 30.0, 12.0),
            spawn_velocity: Vector3::new(110.0, -26.0, -12.0).normalize() * 2.5,
        },
        CometConfig {
            name: "Drifter".to_owned(),
            color: rgb(0xB0E0E6),
            size: 0.3,
            spawn_position: Point3::new(80.0, -80.0, -30.0),
            spawn_velocity: Vector3::new(-1.6, 2.0, 0.6),
        },
        CometConfig {
            name: "Sprinter".to_owned(),
            color: rgb(0xE0FFFF),
            size: 0.3,
            spawn_position: Point3::new(-50.0, 100.0, 50.0),
            spawn_velocity: Vector3::new(1.8, -2.1, -2.4),
        },
    ]
}

/// Adds a planet along with any built-in moons and rings it has.
pub fn add_planet(orrery: &mut Orrery, info: BodyInfo) -> BodyID {
    let key = info.key.clone();
    let scale = info.scale;
    let id = orrery.add_body(info);
    for moon in moons_of(&key, id, scale) {
        orrery.add_body(moon);
    }
    if key == "saturn" {
        orrery.add_rings(saturn_rings(id));
    }
    id
}

pub fn build_orrery(star: BodyInfo, planets: Vec<BodyInfo>, comets: Vec<CometConfig>, physics: CometPhysics) -> Orrery {
    let mut orrery = Orrery::new(physics);
    orrery.add_body(star);
    for info in planets {
        add_planet(&mut orrery, info);
    }
    for comet in comets {
        orrery.add_comet(comet);
    }
    orrery
}

pub fn default_orrery() -> Orrery {
    build_orrery(sun(), planets(), comets(), CometPhysics::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::section::SECTION_ORDER;

    #[test]
    fn test_rgb() {
        approx::assert_relative_eq!(rgb(0xFF8000), Point3::new(1.0, 128.0 / 255.0, 0.0));
    }

    #[test]
    fn test_every_section_has_one_body() {
        let orrery = default_orrery();
        for section in SECTION_ORDER {
            let count = orrery
                .bodies()
                .filter(|b| b.info.section == Some(section))
                .count();
            assert_eq!(count, 1, "{:?}", section);
        }
    }

    #[test]
    fn test_moons_come_after_parents() {
        let orrery = default_orrery();
        for body in orrery.bodies() {
            if let Some(parent) = body.parent() {
                assert!(parent < body.id);
            }
        }
        assert_eq!(orrery.find_body("titan").unwrap().parent(), orrery.find_body("saturn").map(|b| b.id));
    }

    #[test]
    fn test_rings_on_saturn() {
        let orrery = default_orrery();
        let saturn = orrery.find_body("saturn").unwrap().id;
        assert_eq!(orrery.rings().len(), 1);
        assert_eq!(orrery.rings()[0].parent, saturn);
    }
}
