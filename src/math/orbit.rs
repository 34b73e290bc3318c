//! Orbit arithmetic for the scene's bodies.
//!
//! These are not Keplerian orbits; every body moves along a circle in the
//! xy-plane with a small vertical (z) oscillation produced by its inclination.
//! The scene is z-up, and every body orbits counterclockwise when viewed from
//! +z. That sense is a fixed convention: the sign of a configured angular
//! speed is ignored.

use nalgebra::Point3;

use std::f64::consts::TAU;

/// The angle (in radians) a body has swept through at time `t`, starting from
/// `phase`.
pub fn orbital_angle(t: f64, angular_speed: f64, phase: f64) -> f64 {
    phase + angular_speed.abs() * t
}

/// Position at time `t` of a body orbiting the origin at distance `radius`.
pub fn orbital_position(
    t: f64,
    radius: f64,
    angular_speed: f64,
    inclination: f64,
    phase: f64,
) -> Point3<f64> {
    let angle = orbital_angle(t, angular_speed, phase);
    Point3::new(
        radius * angle.cos(),
        radius * angle.sin(),
        radius * inclination.sin() * angle.sin(),
    )
}

/// Rotation of a body about its own axis at time `t`.
pub fn spin_angle(t: f64, rate: f64) -> f64 {
    rate * t
}

/// Time for one full revolution, or `None` for a body that doesn't move.
pub fn orbital_period(angular_speed: f64) -> Option<f64> {
    if angular_speed == 0.0 {
        None
    } else {
        Some(TAU / angular_speed.abs())
    }
}

/// Splits a resting position into the orbital radius and starting phase that
/// reproduce it at t = 0.
pub fn radius_and_phase(base: &Point3<f64>) -> (f64, f64) {
    let radius = base.x.hypot(base.y);
    let phase = if radius == 0.0 {
        0.0
    } else {
        base.y.atan2(base.x)
    };
    (radius, phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::directed_angle;
    use nalgebra::Vector3;

    #[test]
    fn test_starts_at_phase() {
        let p = orbital_position(0.0, 8.0, 0.4, 0.0, 0.0);
        approx::assert_relative_eq!(p, Point3::new(8.0, 0.0, 0.0));

        let base = Point3::new(0.0, 12.0, 0.0);
        let (radius, phase) = radius_and_phase(&base);
        let p = orbital_position(0.0, radius, 0.3, 0.0, phase);
        approx::assert_relative_eq!(p, base, epsilon = 1e-12);
    }

    #[test]
    fn test_closed_path() {
        let speed = 0.25;
        let period = orbital_period(speed).unwrap();
        let start = orbital_position(1.0, 16.0, speed, 0.1, 0.5);
        let end = orbital_position(1.0 + period, 16.0, speed, 0.1, 0.5);
        approx::assert_relative_eq!(start, end, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_oscillation_follows_inclination() {
        let flat = orbital_position(3.0, 20.0, 0.5, 0.0, 0.0);
        assert_eq!(flat.z, 0.0);

        // The peak height is radius * sin(i), a quarter turn in
        let speed = 0.5;
        let quarter = orbital_period(speed).unwrap() / 4.0;
        let tilted = orbital_position(quarter, 20.0, speed, 0.1, 0.0);
        approx::assert_relative_eq!(tilted.z, 20.0 * 0.1f64.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_counterclockwise_for_any_speed() {
        for &speed in &[0.02, 0.5, 3.0, -0.7] {
            for step in 0..20 {
                let t = step as f64 * 0.37;
                let a = orbital_position(t, 10.0, speed, 0.05, 1.0).coords;
                let b = orbital_position(t + 0.01, 10.0, speed, 0.05, 1.0).coords;
                let a = Vector3::new(a.x, a.y, 0.0);
                let b = Vector3::new(b.x, b.y, 0.0);
                assert!(directed_angle(&a, &b, &Vector3::z()) < std::f64::consts::PI);
            }
        }
    }

    #[test]
    fn test_period() {
        assert_eq!(orbital_period(0.0), None);
        approx::assert_relative_eq!(orbital_period(-0.5).unwrap(), 4.0 * std::f64::consts::PI);
    }
}
