use nalgebra::{Point3, Vector3};

use super::section::Section;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Fixed at the origin; glows.
    Star,
    /// Orbits the origin.
    Planet,
    /// Orbits another body. `base_position` is relative to the parent.
    Moon { parent: BodyID },
}

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub section: Option<Section>,
    pub kind: BodyKind,
    pub base_position: Point3<f64>,
    pub scale: f64,
    pub color: Point3<f32>,
    /// Radians per second
    pub orbital_speed: f64,
    /// Radians per second, about the body's own axis
    pub spin_rate: f64,
    pub axial_tilt: f64,
    pub orbital_inclination: f64,
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: BodyID,
    pub info: BodyInfo,
}

impl CelestialBody {
    pub fn is_star(&self) -> bool {
        self.info.kind == BodyKind::Star
    }

    pub fn parent(&self) -> Option<BodyID> {
        match self.info.kind {
            BodyKind::Moon { parent } => Some(parent),
            BodyKind::Star | BodyKind::Planet => None,
        }
    }
}

/// Everything the renderer needs to place one body for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRenderState {
    pub current_position: Point3<f64>,
    /// Euler angles: x is the axial tilt, z the accumulated spin.
    pub current_rotation: Vector3<f64>,
    pub scale_factor: f64,
    pub emissive_intensity: f64,
    pub is_highlighted: bool,
}

impl BodyRenderState {
    pub fn at_rest(info: &BodyInfo) -> Self {
        BodyRenderState {
            current_position: info.base_position,
            current_rotation: Vector3::new(info.axial_tilt, 0.0, 0.0),
            scale_factor: 1.0,
            emissive_intensity: 0.0,
            is_highlighted: false,
        }
    }

    /// Radius of the body as drawn this frame.
    pub fn radius(&self, info: &BodyInfo) -> f64 {
        info.scale * self.scale_factor
    }
}
