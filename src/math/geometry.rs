use nalgebra::{Point3, Vector3};

use std::f64::consts::PI;

pub fn reject(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    // Computes the vector rejection of u from v. v must be non-zero.
    let u_proj_v = u.dot(v) * v / v.norm_squared();
    u - u_proj_v
}

pub fn directed_angle(u: &Vector3<f64>, v: &Vector3<f64>, up: &Vector3<f64>) -> f64 {
    // Returns the angle between u and v, measured as a positive angle around 'up'.
    let theta = u.angle(v);
    if u.cross(v).dot(up) >= 0.0 {
        theta
    } else {
        2.0 * PI - theta
    }
}

/// Returns the distance along the ray to the first point where it enters the
/// sphere, or `None` if the ray misses it or the sphere is entirely behind the
/// origin of the ray.
///
/// `direction` does not need to be normalized; the returned distance is in
/// units of `direction`'s length.
pub fn ray_sphere_intersection(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    center: &Point3<f64>,
    radius: f64,
) -> Option<f64> {
    let a = direction.norm_squared();
    if a == 0.0 {
        return None;
    }

    // Solve |o + t d - c|^2 = r^2 for t
    let oc = origin - center;
    let half_b = oc.dot(direction);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-half_b - sqrt_d) / a;
    let far = (-half_b + sqrt_d) / a;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // We're inside the sphere
        Some(0.0)
    } else {
        None
    }
}
