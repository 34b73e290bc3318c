use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use solar_portfolio::model::catalog::{comets, default_orrery};
use solar_portfolio::model::comet::{step, Comet, CometConfig, CometPhysics, CometState};

const DT: f64 = 1.0 / 60.0;

fn head_on() -> CometConfig {
    CometConfig {
        name: "Kamikaze".to_owned(),
        color: Point3::new(1.0, 1.0, 1.0),
        size: 0.2,
        spawn_position: Point3::new(20.0, 0.0, 0.0),
        spawn_velocity: Vector3::new(-10.0, 0.0, 0.0),
    }
}

/// Dives straight into the sun, so the vaporization radius is crossed on a
/// known frame; then sits out the vaporization and respawns.
#[test]
fn test_vaporize_and_respawn() {
    let config = head_on();
    let physics = CometPhysics::default();
    let mut state = CometState::spawn(&config);

    // Traveling right up to the frame it crosses the threshold
    let mut frames = 0;
    while !state.is_vaporizing() {
        let before = state.position().coords.norm();
        state = step(&config, &physics, state, DT);
        frames += 1;
        assert!(frames < 10_000, "never reached the sun");

        if state.is_vaporizing() {
            assert!(before >= physics.vaporization_radius);
            assert!(state.position().coords.norm() < physics.vaporization_radius);
        }
    }

    // And back again after the vaporization duration, give or take a frame
    let mut vaporizing_frames = 0;
    while state.is_vaporizing() {
        assert_relative_eq!(
            state.opacity(&physics),
            1.0 - vaporizing_frames as f64 * DT / physics.vaporize_duration,
            epsilon = 1e-9
        );
        state = step(&config, &physics, state, DT);
        vaporizing_frames += 1;
        assert!(vaporizing_frames < 10_000, "never respawned");
    }
    let vaporized_for = vaporizing_frames as f64 * DT;
    assert!((vaporized_for - physics.vaporize_duration).abs() <= DT + 1e-9);

    assert_eq!(state, CometState::spawn(&config));
    assert_eq!(state.position(), config.spawn_position);
    assert_eq!(state.velocity(), config.spawn_velocity);
}

/// Between resets a comet can only move as far as its speed allows.
#[test]
fn test_distance_is_continuous() {
    let orrery = default_orrery();
    let physics = *orrery.comet_physics();
    assert_eq!(orrery.comets().len(), comets().len());

    for config in comets() {
        let mut comet = Comet::new(config.clone());
        let mut resets = 0;

        for _ in 0..(400.0 / DT) as usize {
            let before = *comet.state();
            comet.update(&physics, DT);
            let after = *comet.state();

            if after == CometState::spawn(&config) && before != after {
                resets += 1;
                continue;
            }

            let max_move = (before.velocity().norm() + physics.deflection_strength * DT) * DT;
            let moved = (after.position() - before.position()).norm();
            assert!(
                moved <= max_move + 1e-9,
                "{} jumped {} in one frame",
                config.name,
                moved
            );
            let jump = (after.position().coords.norm() - before.position().coords.norm()).abs();
            assert!(jump <= moved + 1e-9);
        }

        // Every comet comes round within a few minutes
        assert!(resets > 0, "{} never reset", config.name);
    }
}

#[test]
fn test_explosion_grows_then_clears() {
    let config = head_on();
    let physics = CometPhysics::default();
    let mut comet = Comet::new(config.clone());

    while !comet.state().is_vaporizing() {
        comet.update(&physics, DT);
    }
    let first = comet.render_state(&physics);
    assert!(!first.explosion.is_empty());

    comet.update(&physics, 1.0);
    let later = comet.render_state(&physics);
    let spread = |points: &[Point3<f64>], center: &Point3<f64>| {
        points.iter().map(|p| (p - center).norm()).fold(0.0, f64::max)
    };
    assert!(spread(&later.explosion, &later.position) > spread(&first.explosion, &first.position));
    assert!(later.opacity < first.opacity);

    comet.update(&physics, physics.vaporize_duration);
    let respawned = comet.render_state(&physics);
    assert!(respawned.explosion.is_empty());
    assert_eq!(respawned.opacity, 1.0);
    assert_eq!(respawned.position, config.spawn_position);
}
