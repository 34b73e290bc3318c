//! Comets fly straight through the scene, get bent around the sun when they
//! pass close to it, and vaporize if they get too close. Either way they
//! eventually start over from where they spawned.

use nalgebra::{Point3, Vector3};

use crate::math::geometry::reject;

pub const TRAIL_LENGTH: usize = 50;
const TRAIL_SPAN: f64 = 8.0;
const EXPLOSION_PARTICLES: usize = 40;
const SPIN_RATE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct CometConfig {
    pub name: String,
    pub color: Point3<f32>,
    pub size: f64,
    pub spawn_position: Point3<f64>,
    /// Units per second
    pub spawn_velocity: Vector3<f64>,
}

/// Thresholds shared by all comets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometPhysics {
    /// Below this distance from the origin, the path starts bending.
    pub deflection_radius: f64,
    /// Sideways acceleration applied inside the deflection radius.
    pub deflection_strength: f64,
    /// Below this distance from the origin, the comet vaporizes.
    pub vaporization_radius: f64,
    /// Past this distance from the origin, the comet starts over.
    pub max_distance: f64,
    /// Seconds spent fading out.
    pub vaporize_duration: f64,
    /// How fast the debris cloud spreads, in units per second.
    pub explosion_speed: f64,
}

impl Default for CometPhysics {
    fn default() -> Self {
        CometPhysics {
            deflection_radius: 15.0,
            deflection_strength: 6.0,
            vaporization_radius: 3.6,
            max_distance: 200.0,
            vaporize_duration: 3.0,
            explosion_speed: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CometState {
    Traveling {
        position: Point3<f64>,
        velocity: Vector3<f64>,
    },
    Vaporizing {
        position: Point3<f64>,
        /// Velocity at the moment of vaporization; only used to orient the
        /// fading trail.
        velocity: Vector3<f64>,
        elapsed: f64,
    },
}

impl CometState {
    pub fn spawn(config: &CometConfig) -> Self {
        CometState::Traveling {
            position: config.spawn_position,
            velocity: config.spawn_velocity,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        match *self {
            CometState::Traveling { position, .. } | CometState::Vaporizing { position, .. } => {
                position
            }
        }
    }

    pub fn velocity(&self) -> Vector3<f64> {
        match *self {
            CometState::Traveling { velocity, .. } | CometState::Vaporizing { velocity, .. } => {
                velocity
            }
        }
    }

    pub fn is_vaporizing(&self) -> bool {
        matches!(self, CometState::Vaporizing { .. })
    }

    /// 1 while traveling, fading linearly to 0 over the vaporization.
    pub fn opacity(&self, physics: &CometPhysics) -> f64 {
        match *self {
            CometState::Traveling { .. } => 1.0,
            CometState::Vaporizing { elapsed, .. } => {
                (1.0 - elapsed / physics.vaporize_duration).clamp(0.0, 1.0)
            }
        }
    }
}

/// Advances a comet by `dt` seconds.
pub fn step(config: &CometConfig, physics: &CometPhysics, state: CometState, dt: f64) -> CometState {
    match state {
        CometState::Traveling { position, velocity } => {
            let velocity = velocity + deflection(&position, &velocity, physics) * dt;
            let position = position + velocity * dt;

            let distance = position.coords.norm();
            if distance < physics.vaporization_radius {
                CometState::Vaporizing {
                    position,
                    velocity,
                    elapsed: 0.0,
                }
            } else if distance > physics.max_distance {
                CometState::spawn(config)
            } else {
                CometState::Traveling { position, velocity }
            }
        }
        CometState::Vaporizing {
            position,
            velocity,
            elapsed,
        } => {
            let elapsed = elapsed + dt;
            if elapsed >= physics.vaporize_duration {
                CometState::spawn(config)
            } else {
                CometState::Vaporizing {
                    position,
                    velocity,
                    elapsed,
                }
            }
        }
    }
}

// Sideways push (perpendicular to the velocity, towards the sun), so the sun
// bends the path instead of reeling the comet in.
fn deflection(position: &Point3<f64>, velocity: &Vector3<f64>, physics: &CometPhysics) -> Vector3<f64> {
    if position.coords.norm() >= physics.deflection_radius || velocity.norm_squared() == 0.0 {
        return Vector3::zeros();
    }

    let sideways = reject(&-position.coords, velocity);
    match sideways.try_normalize(1e-9) {
        Some(dir) => dir * physics.deflection_strength,
        // Heading straight at the sun
        None => Vector3::zeros(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CometRenderState {
    pub position: Point3<f64>,
    pub spin: f64,
    pub opacity: f64,
    /// Trail points with their alpha, brightest first.
    pub trail: Vec<(Point3<f64>, f64)>,
    /// Debris cloud; empty unless vaporizing.
    pub explosion: Vec<Point3<f64>>,
}

#[derive(Debug, Clone)]
pub struct Comet {
    pub config: CometConfig,
    state: CometState,
    spin: f64,
}

impl Comet {
    pub fn new(config: CometConfig) -> Self {
        let state = CometState::spawn(&config);
        Comet {
            config,
            state,
            spin: 0.0,
        }
    }

    pub fn state(&self) -> &CometState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = CometState::spawn(&self.config);
        self.spin = 0.0;
    }

    pub fn update(&mut self, physics: &CometPhysics, dt: f64) {
        let was_vaporizing = self.state.is_vaporizing();
        self.state = step(&self.config, physics, self.state, dt);
        self.spin += SPIN_RATE * dt;

        match (was_vaporizing, self.state.is_vaporizing()) {
            (false, true) => log::debug!("Comet {} is vaporizing", self.config.name),
            (true, false) => log::debug!("Comet {} respawned", self.config.name),
            _ => {}
        }
    }

    pub fn render_state(&self, physics: &CometPhysics) -> CometRenderState {
        let position = self.state.position();
        let opacity = self.state.opacity(physics);

        let heading = self
            .state
            .velocity()
            .try_normalize(1e-9)
            .unwrap_or_else(Vector3::x);
        let trail = (0..TRAIL_LENGTH)
            .map(|i| {
                let t = i as f64 / TRAIL_LENGTH as f64;
                (position - heading * t * TRAIL_SPAN, (1.0 - t) * opacity)
            })
            .collect();

        let explosion = match self.state {
            CometState::Vaporizing { elapsed, .. } => {
                let radius = physics.explosion_speed * elapsed;
                debris_directions(EXPLOSION_PARTICLES)
                    .map(|dir| position + dir * radius)
                    .collect()
            }
            CometState::Traveling { .. } => vec![],
        };

        CometRenderState {
            position,
            spin: self.spin,
            opacity,
            trail,
            explosion,
        }
    }
}

// Evenly spread unit vectors (golden-angle spiral)
fn debris_directions(n: usize) -> impl Iterator<Item = Vector3<f64>> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..n).map(move |i| {
        let z = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
        let r = (1.0 - z * z).sqrt();
        let theta = golden_angle * i as f64;
        Vector3::new(r * theta.cos(), r * theta.sin(), z)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn test_comet(position: Point3<f64>, velocity: Vector3<f64>) -> CometConfig {
        CometConfig {
            name: "test".to_owned(),
            color: Point3::new(0.5, 0.8, 0.9),
            size: 0.3,
            spawn_position: position,
            spawn_velocity: velocity,
        }
    }

    #[test]
    fn test_straight_flight_far_from_sun() {
        let config = test_comet(Point3::new(-100.0, 50.0, 0.0), Vector3::new(2.0, 0.0, 0.0));
        let physics = CometPhysics::default();

        let state = step(&config, &physics, CometState::spawn(&config), 0.5);
        assert_eq!(
            state,
            CometState::Traveling {
                position: Point3::new(-99.0, 50.0, 0.0),
                velocity: Vector3::new(2.0, 0.0, 0.0),
            }
        );
    }

    #[test]
    fn test_deflection_is_sideways() {
        let physics = CometPhysics::default();
        let position = Point3::new(-5.0, 5.0, 0.0);
        let velocity = Vector3::new(3.0, 0.0, 0.0);

        let push = deflection(&position, &velocity, &physics);
        approx::assert_relative_eq!(push.dot(&velocity), 0.0, epsilon = 1e-12);
        // Pushed towards the sun's side of the path
        assert!(push.y < 0.0);
        approx::assert_relative_eq!(push.norm(), physics.deflection_strength);

        // No push outside the radius, or when aimed dead center
        assert_eq!(
            deflection(&Point3::new(-50.0, 5.0, 0.0), &velocity, &physics),
            Vector3::zeros()
        );
        assert_eq!(
            deflection(&Point3::new(-5.0, 0.0, 0.0), &velocity, &physics),
            Vector3::zeros()
        );
    }

    #[test]
    fn test_reset_past_max_distance() {
        let config = test_comet(Point3::new(190.0, 0.0, 0.0), Vector3::new(20.0, 0.0, 0.0));
        let physics = CometPhysics::default();

        let mut state = CometState::spawn(&config);
        for _ in 0..40 {
            state = step(&config, &physics, state, DT);
        }
        // It crosses 200 on the 31st frame, then travels 9 more frames from spawn
        assert!(state.position().x > 190.0);
        assert!(state.position().x < 195.0);
        assert!(!state.is_vaporizing());
    }

    #[test]
    fn test_distance_is_continuous_between_resets() {
        let config = test_comet(Point3::new(-120.0, 30.0, 5.0), Vector3::new(6.0, -1.0, 0.0));
        let physics = CometPhysics::default();

        let mut state = CometState::spawn(&config);
        let max_jump = 7.0 * DT + physics.deflection_strength * DT * DT;
        for _ in 0..5000 {
            let before = state;
            state = step(&config, &physics, state, DT);
            let respawned = state == CometState::spawn(&config);
            if before.is_vaporizing() || state.is_vaporizing() || respawned {
                continue;
            }
            let jump = (state.position().coords.norm() - before.position().coords.norm()).abs();
            assert!(jump <= max_jump + 1e-9, "jumped by {}", jump);
        }
    }

    #[test]
    fn test_vaporizing_opacity_fades() {
        let config = test_comet(Point3::new(-2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let physics = CometPhysics::default();
        let mut comet = Comet::new(config);

        comet.update(&physics, DT);
        assert!(comet.state().is_vaporizing());

        comet.update(&physics, physics.vaporize_duration / 2.0);
        let render = comet.render_state(&physics);
        approx::assert_relative_eq!(render.opacity, 0.5, epsilon = 0.01);
        assert_eq!(render.explosion.len(), EXPLOSION_PARTICLES);
        assert_eq!(render.trail.len(), TRAIL_LENGTH);
        assert!(render.trail.iter().all(|(_, alpha)| *alpha <= 0.51));

        // Debris spreads outward from the comet
        let spread = (render.explosion[0] - render.position).norm();
        assert!(spread > 0.0);
    }

    #[test]
    fn test_traveling_has_no_debris() {
        let config = test_comet(Point3::new(-100.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let physics = CometPhysics::default();
        let render = Comet::new(config).render_state(&physics);
        assert!(render.explosion.is_empty());
        assert_eq!(render.opacity, 1.0);
        assert_eq!(render.trail[0].1, 1.0);
    }
}
