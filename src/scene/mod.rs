//! Puts a frame together: the orrery, the backdrop behind it, the orbit
//! traces, and where the camera ought to be.

pub mod background;

use nalgebra::{Point3, Vector3};

use crate::math::orbit::radius_and_phase;
use crate::model::comet::CometRenderState;
use crate::model::orrery::group_rotate;
use crate::model::{BodyID, BodyKind, FrameInput, Orrery, Section};
use crate::theme::Palette;

use self::background::Background;

/// Radians per second the whole body group turns about +z.
pub const GROUP_ROTATION_RATE: f64 = 0.03;
pub const TRACE_SEGMENTS: usize = 128;

const FOCUS_OFFSET: [f64; 3] = [10.0, 10.0, 5.0];
const OVERVIEW_EYE: [f64; 3] = [0.0, -40.0, 10.0];

/// Where the camera should fly to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRequest {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
}

impl CameraRequest {
    pub fn overview() -> Self {
        CameraRequest {
            eye: Point3::from(OVERVIEW_EYE),
            target: Point3::origin(),
        }
    }
}

/// The loop a planet follows, in the group's own frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitTrace {
    pub body: BodyID,
    pub radius: f64,
    pub inclination: f64,
}

impl OrbitTrace {
    /// Point at angle `theta` around the loop, before the group rotation.
    pub fn point_at(&self, theta: f64) -> Point3<f64> {
        Point3::new(
            self.radius * theta.cos(),
            self.radius * theta.sin(),
            self.radius * self.inclination.sin() * theta.sin(),
        )
    }
}

/// Borrowed snapshot of everything a renderer needs for the current frame.
pub struct FrameView<'a> {
    pub time: f64,
    pub group_angle: f64,
    pub orrery: &'a Orrery,
    pub comets: &'a [CometRenderState],
    pub background: &'a Background,
    pub traces: &'a [OrbitTrace],
    pub trace_opacity: f64,
    pub nebula_opacity: f64,
    pub palette: &'a Palette,
}

pub struct SceneComposer {
    orrery: Orrery,
    background: Background,
    traces: Vec<OrbitTrace>,
    comet_states: Vec<CometRenderState>,
    palette: Palette,
    time: f64,
    group_angle: f64,
}

impl SceneComposer {
    pub fn new(orrery: Orrery, seed: u64, palette: Palette, low_detail: bool) -> Self {
        let traces = orrery
            .bodies()
            .filter(|b| b.info.kind == BodyKind::Planet)
            .map(|b| OrbitTrace {
                body: b.id,
                radius: radius_and_phase(&b.info.base_position).0,
                inclination: b.info.orbital_inclination,
            })
            .collect();
        let comet_states = orrery.comet_states();

        SceneComposer {
            background: Background::generate(seed, &palette, low_detail),
            orrery,
            traces,
            comet_states,
            palette,
            time: 0.0,
            group_angle: 0.0,
        }
    }

    /// Moves every animator to simulation time `elapsed`. `dt` is what the
    /// comets integrate over.
    pub fn advance(&mut self, elapsed: f64, dt: f64, selection: Option<Section>, hover: Option<BodyID>) {
        self.time = elapsed;
        self.group_angle = GROUP_ROTATION_RATE * elapsed;
        self.orrery.update(&FrameInput {
            time: elapsed,
            dt,
            group_angle: self.group_angle,
            selection,
            hover,
        });
        self.comet_states = self.orrery.comet_states();
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            time: self.time,
            group_angle: self.group_angle,
            orrery: &self.orrery,
            comets: &self.comet_states,
            background: &self.background,
            traces: &self.traces,
            trace_opacity: trace_opacity(self.time),
            nebula_opacity: Background::nebula_opacity(self.time),
            palette: &self.palette,
        }
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Only recolors; the backdrop keeps its layout.
    pub fn set_palette(&mut self, palette: Palette) {
        self.background = Background::generate(self.background.seed, &palette, self.background.low_detail);
        self.palette = palette;
    }

    /// The trace's loop as it currently sits in the scene.
    pub fn trace_points(&self, trace: &OrbitTrace) -> Vec<Point3<f64>> {
        (0..=TRACE_SEGMENTS)
            .map(|i| {
                let theta = i as f64 / TRACE_SEGMENTS as f64 * std::f64::consts::TAU;
                group_rotate(self.group_angle, &trace.point_at(theta))
            })
            .collect()
    }

    pub fn camera_request_for(&self, selection: Option<Section>) -> CameraRequest {
        let target = selection
            .and_then(|s| self.orrery.body_for_section(s))
            .and_then(|b| self.orrery.body_state(b.id))
            .map(|state| state.current_position);

        match target {
            Some(target) => CameraRequest {
                eye: target + Vector3::from(FOCUS_OFFSET),
                target,
            },
            None => CameraRequest::overview(),
        }
    }

    /// Back to t = 0 with every comet at its spawn point.
    pub fn reset(&mut self) {
        self.orrery.reset();
        self.advance(0.0, 0.0, None, None);
    }
}

pub fn trace_opacity(t: f64) -> f64 {
    0.4 + 0.1 * (2.0 * t).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::default_orrery;
    use crate::model::SECTION_ORDER;
    use approx::assert_relative_eq;

    fn composer() -> SceneComposer {
        SceneComposer::new(default_orrery(), 7, Palette::default(), false)
    }

    #[test]
    fn test_one_trace_per_planet() {
        let scene = composer();
        let planets = scene
            .orrery()
            .bodies()
            .filter(|b| b.info.kind == BodyKind::Planet)
            .count();
        assert_eq!(scene.view().traces.len(), planets);

        for trace in scene.view().traces {
            let points = scene.trace_points(trace);
            assert_eq!(points.len(), TRACE_SEGMENTS + 1);
            assert_relative_eq!(points[0], points[TRACE_SEGMENTS], epsilon = 1e-9);
            for p in points.iter() {
                assert_relative_eq!(p.coords.xy().norm(), trace.radius, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_traces_follow_planets() {
        let mut scene = composer();
        scene.advance(12.0, 1.0 / 60.0, None, None);
        for trace in scene.view().traces {
            let pos = scene.orrery().body_state(trace.body).unwrap().current_position;
            assert_relative_eq!(pos.coords.xy().norm(), trace.radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_group_rotation() {
        let mut scene = composer();
        scene.advance(10.0, 0.1, None, None);
        assert_relative_eq!(scene.view().group_angle, 0.3);
        assert_relative_eq!(scene.view().time, 10.0);
    }

    #[test]
    fn test_pulses() {
        assert_relative_eq!(trace_opacity(0.0), 0.4);
        let mut scene = composer();
        scene.advance(std::f64::consts::FRAC_PI_4, 0.0, None, None);
        assert_relative_eq!(scene.view().trace_opacity, 0.5);
    }

    #[test]
    fn test_camera_requests() {
        let mut scene = composer();
        assert_eq!(scene.camera_request_for(None), CameraRequest::overview());

        scene.advance(3.0, 1.0 / 60.0, Some(Section::Projects), None);
        let earth = scene.orrery().body_for_section(Section::Projects).unwrap().id;
        let pos = scene.orrery().body_state(earth).unwrap().current_position;
        let request = scene.camera_request_for(Some(Section::Projects));
        assert_relative_eq!(request.target, pos);
        assert_relative_eq!(request.eye, pos + Vector3::new(10.0, 10.0, 5.0));

        // Every section with a body gets a focused request
        for section in SECTION_ORDER {
            if scene.orrery().body_for_section(section).is_some() {
                assert_ne!(scene.camera_request_for(Some(section)), CameraRequest::overview());
            }
        }
    }

    #[test]
    fn test_recolor_keeps_layout() {
        let mut scene = composer();
        let before = scene.view().background.starfield.points.clone();
        scene.set_palette(crate::theme::ThemeKind::Light.palette());
        assert_eq!(scene.view().background.starfield.points, before);
        assert_eq!(scene.palette().kind, crate::theme::ThemeKind::Light);
    }

    #[test]
    fn test_reset() {
        let mut scene = composer();
        let spawn = scene.view().comets[0].position;
        for i in 1..30 {
            scene.advance(i as f64 / 60.0, 1.0 / 60.0, None, None);
        }
        assert_ne!(scene.view().comets[0].position, spawn);
        scene.reset();
        assert_eq!(scene.view().comets[0].position, spawn);
        assert_eq!(scene.view().time, 0.0);
    }
}
