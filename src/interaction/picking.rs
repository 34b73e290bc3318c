use nalgebra::{Point3, Vector3};

use crate::math::geometry::ray_sphere_intersection;
use crate::model::{BodyID, Orrery};

/// Finds the nearest body under a ray, using each body's position and
/// drawn radius from the last update. Bodies without a state are skipped.
pub fn pick_body(
    orrery: &Orrery,
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    filter: impl Fn(BodyID) -> bool,
) -> Option<BodyID> {
    let mut best: Option<(BodyID, f64)> = None;
    for body in orrery.bodies().filter(|b| filter(b.id)) {
        let state = match orrery.body_state(body.id) {
            Some(state) => state,
            None => continue,
        };
        let hit = ray_sphere_intersection(origin, direction, &state.current_position, state.radius(&body.info));
        if let Some(t) = hit {
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((body.id, t));
            }
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::default_orrery;
    use crate::model::FrameInput;

    fn updated_orrery() -> Orrery {
        let mut orrery = default_orrery();
        orrery.update(&FrameInput {
            time: 0.0,
            dt: 0.0,
            group_angle: 0.0,
            selection: None,
            hover: None,
        });
        orrery
    }

    #[test]
    fn test_picks_sun_from_above() {
        let orrery = updated_orrery();
        let sun = orrery.find_body("sun").unwrap().id;
        let picked = pick_body(&orrery, &Point3::new(0.0, 0.0, 50.0), &-Vector3::z(), |_| true);
        assert_eq!(picked, Some(sun));
    }

    #[test]
    fn test_picks_nearest() {
        let orrery = updated_orrery();
        let mercury = orrery.find_body("mercury").unwrap();
        let pos = orrery.body_state(mercury.id).unwrap().current_position;

        // Looking at mercury from outside its orbit, towards the sun
        let origin = pos + pos.coords.normalize() * 5.0;
        let direction = -pos.coords.normalize();
        let picked = pick_body(&orrery, &origin, &direction, |_| true);
        assert_eq!(picked, Some(mercury.id));

        // Unless mercury isn't pickable
        let sun = orrery.find_body("sun").unwrap().id;
        let picked = pick_body(&orrery, &origin, &direction, |id| id != mercury.id);
        assert_eq!(picked, Some(sun));
    }

    #[test]
    fn test_miss() {
        let orrery = updated_orrery();
        let picked = pick_body(&orrery, &Point3::new(0.0, 0.0, 500.0), &Vector3::z(), |_| true);
        assert_eq!(picked, None);
    }
}
