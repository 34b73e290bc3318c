use std::collections::HashMap;

use nalgebra::{Point3, Rotation3, Vector3};

use super::body::{BodyID, BodyInfo, BodyKind, BodyRenderState, CelestialBody};
use super::comet::{Comet, CometConfig, CometPhysics, CometRenderState};
use super::rings::{RingRenderState, RingSystem};
use super::section::Section;
use crate::math::orbit::{orbital_position, radius_and_phase, spin_angle};

pub const HOVER_SCALE: f64 = 1.2;
pub const ACTIVE_SCALE: f64 = 1.4;
const STAR_GLOW: f64 = 0.3;
const HOVER_GLOW: f64 = 0.2;
const ACTIVE_GLOW: f64 = 0.4;

/// What every animator needs to know about the frame being drawn.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Simulation seconds since start
    pub time: f64,
    /// Simulation seconds since the previous frame
    pub dt: f64,
    /// Ambient rotation of the whole body group about +z
    pub group_angle: f64,
    pub selection: Option<Section>,
    pub hover: Option<BodyID>,
}

/// The arena of bodies. A body's ID is its index, and its render state lives
/// in the slot with the same index. Slots are empty until the body's first
/// successful update.
#[derive(Debug, Clone, Default)]
pub struct Orrery {
    bodies: Vec<CelestialBody>,
    states: Vec<Option<BodyRenderState>>,
    rings: Vec<RingSystem>,
    ring_states: Vec<Option<RingRenderState>>,
    comets: Vec<Comet>,
    comet_physics: CometPhysics,
}

impl Orrery {
    pub fn new(comet_physics: CometPhysics) -> Self {
        Orrery {
            comet_physics,
            ..Default::default()
        }
    }

    pub fn add_body(&mut self, info: BodyInfo) -> BodyID {
        let id = BodyID(self.bodies.len());
        self.bodies.push(CelestialBody { id, info });
        self.states.push(None);
        id
    }

    pub fn add_rings(&mut self, rings: RingSystem) {
        self.rings.push(rings);
        self.ring_states.push(None);
    }

    pub fn add_comet(&mut self, config: CometConfig) {
        self.comets.push(Comet::new(config));
    }

    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.bodies.iter()
    }

    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    pub fn get_body(&self, id: BodyID) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    pub fn find_body(&self, key: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.info.key.eq_ignore_ascii_case(key))
    }

    pub fn body_for_section(&self, section: Section) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.info.section == Some(section))
    }

    pub fn section_targets(&self) -> HashMap<BodyID, Section> {
        self.bodies
            .iter()
            .filter_map(|b| b.info.section.map(|s| (b.id, s)))
            .collect()
    }

    pub fn body_state(&self, id: BodyID) -> Option<&BodyRenderState> {
        self.states.get(id.0).and_then(Option::as_ref)
    }

    pub fn rings(&self) -> &[RingSystem] {
        &self.rings
    }

    pub fn ring_state(&self, idx: usize) -> Option<&RingRenderState> {
        self.ring_states.get(idx).and_then(Option::as_ref)
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    pub fn comet_physics(&self) -> &CometPhysics {
        &self.comet_physics
    }

    pub fn comet_states(&self) -> Vec<CometRenderState> {
        self.comets
            .iter()
            .map(|c| c.render_state(&self.comet_physics))
            .collect()
    }

    /// Puts every comet back at its spawn point and forgets all render state.
    pub fn reset(&mut self) {
        for comet in self.comets.iter_mut() {
            comet.reset();
        }
        self.states.iter_mut().for_each(|s| *s = None);
        self.ring_states.iter_mut().for_each(|s| *s = None);
    }

    /// Runs every animator once. Bodies are updated in ID order, so a moon
    /// sees its parent's state for this frame as long as the parent was added
    /// first.
    pub fn update(&mut self, frame: &FrameInput) {
        let group = Rotation3::from_axis_angle(&Vector3::z_axis(), frame.group_angle);

        for idx in 0..self.bodies.len() {
            let body = &self.bodies[idx];
            let parent_state = match body.parent() {
                None => None,
                Some(parent_id) => match self.body_state(parent_id) {
                    Some(state) => Some(*state),
                    None => {
                        log::debug!(
                            "Skipping {} this frame: parent {:?} has no state",
                            body.info.key,
                            parent_id
                        );
                        continue;
                    }
                },
            };

            let active = body.info.section.is_some() && body.info.section == frame.selection;
            let hovered = frame.hover == Some(body.id);
            let state = body_state_at(&body.info, frame.time, &group, parent_state.as_ref(), active, hovered);
            self.states[idx] = Some(state);
        }

        for (idx, rings) in self.rings.iter().enumerate() {
            let parent = match (self.get_body(rings.parent), self.body_state(rings.parent)) {
                (Some(body), Some(state)) => (body.info.scale, *state),
                _ => {
                    log::trace!("Skipping ring system {} this frame", idx);
                    continue;
                }
            };
            self.ring_states[idx] = Some(rings.render_state(frame.time, &parent.1, parent.0));
        }

        for comet in self.comets.iter_mut() {
            comet.update(&self.comet_physics, frame.dt);
        }
    }
}

/// The render state of a non-comet body. Depends only on its arguments.
pub fn body_state_at(
    info: &BodyInfo,
    t: f64,
    group: &Rotation3<f64>,
    parent: Option<&BodyRenderState>,
    active: bool,
    hovered: bool,
) -> BodyRenderState {
    let (radius, phase) = radius_and_phase(&info.base_position);
    let local = orbital_position(t, radius, info.orbital_speed, info.orbital_inclination, phase)
        + Vector3::new(0.0, 0.0, info.base_position.z);

    let current_position = match (info.kind, parent) {
        (BodyKind::Moon { .. }, Some(parent)) => {
            parent.current_position + group * local.coords
        }
        _ => group * local,
    };

    let (scale_factor, glow) = if active {
        (ACTIVE_SCALE, ACTIVE_GLOW)
    } else if hovered {
        (HOVER_SCALE, HOVER_GLOW)
    } else {
        (1.0, 0.0)
    };
    let base_glow = match info.kind {
        BodyKind::Star => STAR_GLOW,
        BodyKind::Planet | BodyKind::Moon { .. } => 0.0,
    };

    BodyRenderState {
        current_position,
        current_rotation: Vector3::new(info.axial_tilt, 0.0, spin_angle(t, info.spin_rate)),
        scale_factor,
        emissive_intensity: base_glow + glow,
        is_highlighted: active || hovered,
    }
}

/// Convenience for callers that only have a point in the group's frame.
pub fn group_rotate(group_angle: f64, point: &Point3<f64>) -> Point3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), group_angle) * point
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::directed_angle;
    use crate::model::catalog::default_orrery;

    fn frame(time: f64, selection: Option<Section>, hover: Option<BodyID>) -> FrameInput {
        FrameInput {
            time,
            dt: 1.0 / 60.0,
            group_angle: 0.03 * time,
            selection,
            hover,
        }
    }

    #[test]
    fn test_every_body_gets_a_state() {
        let mut orrery = default_orrery();
        orrery.update(&frame(0.0, None, None));
        for body in orrery.bodies() {
            assert!(orrery.body_state(body.id).is_some(), "{} missing", body.info.key);
        }
        for idx in 0..orrery.rings().len() {
            assert!(orrery.ring_state(idx).is_some());
        }
    }

    #[test]
    fn test_orbits_are_counterclockwise() {
        let mut orrery = default_orrery();
        let mut previous = HashMap::new();
        let mut moons_checked = 0;
        for step in 0..200 {
            let t = step as f64 * 0.25;
            orrery.update(&frame(t, None, None));
            for body in orrery.bodies().filter(|b| !b.is_star()) {
                let pos = orrery.body_state(body.id).unwrap().current_position;
                // Moons go round their parent, not the sun
                let center = match body.parent() {
                    Some(parent) => orrery.body_state(parent).unwrap().current_position,
                    None => Point3::origin(),
                };
                let offset = pos - center;
                let flat = Vector3::new(offset.x, offset.y, 0.0);
                if let Some(prev) = previous.insert(body.id, flat) {
                    let swept = directed_angle(&prev, &flat, &Vector3::z());
                    assert!(
                        swept < std::f64::consts::PI,
                        "{} went clockwise at t = {}",
                        body.info.key,
                        t
                    );
                    if body.parent().is_some() {
                        moons_checked += 1;
                    }
                }
            }
        }
        assert!(moons_checked > 0);
    }

    #[test]
    fn test_state_is_a_function_of_time() {
        let mut a = default_orrery();
        let mut b = default_orrery();
        for step in 0..50 {
            a.update(&frame(step as f64 * 0.1, None, None));
        }
        b.update(&frame(49.0 * 0.1, None, None));
        for body in a.bodies().filter(|b| !b.is_star()) {
            approx::assert_relative_eq!(
                a.body_state(body.id).unwrap().current_position,
                b.body_state(body.id).unwrap().current_position,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_highlight_scales() {
        let mut orrery = default_orrery();
        let skills = orrery.body_for_section(Section::Skills).unwrap().id;
        let projects = orrery.body_for_section(Section::Projects).unwrap().id;
        let contact = orrery.body_for_section(Section::Contact).unwrap().id;

        orrery.update(&frame(1.0, Some(Section::Skills), Some(projects)));
        let skills_state = orrery.body_state(skills).unwrap();
        let projects_state = orrery.body_state(projects).unwrap();
        let contact_state = orrery.body_state(contact).unwrap();

        assert_eq!(skills_state.scale_factor, ACTIVE_SCALE);
        assert!(skills_state.is_highlighted);
        assert_eq!(projects_state.scale_factor, HOVER_SCALE);
        assert!(projects_state.emissive_intensity > 0.0);
        assert_eq!(contact_state.scale_factor, 1.0);
        assert!(!contact_state.is_highlighted);

        // Reverts once the pointer leaves
        orrery.update(&frame(1.1, Some(Section::Skills), None));
        assert_eq!(orrery.body_state(projects).unwrap().scale_factor, 1.0);
    }

    #[test]
    fn test_at_most_one_active() {
        let mut orrery = default_orrery();
        orrery.update(&frame(2.0, Some(Section::Education), None));
        let active = orrery
            .bodies()
            .filter(|b| orrery.body_state(b.id).unwrap().scale_factor == ACTIVE_SCALE)
            .count();
        assert_eq!(active, 1);
    }

    #[test]
    fn test_moons_follow_parent() {
        let mut orrery = default_orrery();
        orrery.update(&frame(7.5, None, None));
        for moon in orrery.bodies().filter(|b| b.parent().is_some()) {
            let parent = orrery.get_body(moon.parent().unwrap()).unwrap();
            let moon_pos = orrery.body_state(moon.id).unwrap().current_position;
            let parent_pos = orrery.body_state(parent.id).unwrap().current_position;
            let (radius, _) = radius_and_phase(&moon.info.base_position);
            let offset = moon_pos - parent_pos;
            let flat = offset.xy().norm();
            approx::assert_relative_eq!(flat, radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_missing_parent_is_skipped() {
        let mut orrery = Orrery::new(CometPhysics::default());
        let orphan = orrery.add_body(BodyInfo {
            key: "orphan".to_owned(),
            display_name: "Orphan".to_owned(),
            description: String::new(),
            section: None,
            kind: BodyKind::Moon { parent: BodyID(42) },
            base_position: Point3::new(2.0, 0.0, 0.0),
            scale: 0.1,
            color: Point3::new(1.0, 1.0, 1.0),
            orbital_speed: 0.5,
            spin_rate: 0.6,
            axial_tilt: 0.0,
            orbital_inclination: 0.0,
        });
        orrery.update(&frame(0.0, None, None));
        assert!(orrery.body_state(orphan).is_none());
    }
}
