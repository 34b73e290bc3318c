use nalgebra::{Point2, Point3, Vector3};

use std::f32::consts::TAU;

use super::body::{BodyID, BodyRenderState};

#[derive(Debug, Clone, PartialEq)]
pub struct RingBand {
    pub name: String,
    /// Radii relative to the parent's scale
    pub inner: f64,
    pub outer: f64,
    /// Radians per second about the ring's normal; zero for a static band.
    pub spin_rate: f64,
    pub color: Point3<f32>,
    pub opacity: f32,
    /// Whether to draw the band with the generated ring texture instead of a
    /// flat color.
    pub textured: bool,
}

/// A set of bands around a parent body. The rings don't own the parent; they
/// look it up each frame to follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSystem {
    pub parent: BodyID,
    pub bands: Vec<RingBand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingRenderState {
    pub center: Point3<f64>,
    /// The parent's rotation this frame (x tilt, z spin).
    pub parent_rotation: Vector3<f64>,
    /// The parent's drawn radius; band radii are multiples of this.
    pub parent_radius: f64,
    /// Extra spin of each band, in the same order as the bands.
    pub band_spins: Vec<f64>,
}

impl RingSystem {
    pub fn render_state(&self, t: f64, parent: &BodyRenderState, parent_scale: f64) -> RingRenderState {
        RingRenderState {
            center: parent.current_position,
            parent_rotation: parent.current_rotation,
            parent_radius: parent_scale * parent.scale_factor,
            band_spins: self.bands.iter().map(|b| b.spin_rate * t).collect(),
        }
    }
}

impl RingRenderState {
    /// Tilt and total spin of band `idx`: the rings turn with their parent,
    /// and each band adds its own drift on top.
    pub fn band_orientation(&self, idx: usize) -> (f64, f64) {
        let drift = self.band_spins.get(idx).copied().unwrap_or(0.0);
        (self.parent_rotation.x, self.parent_rotation.z + drift)
    }
}

/// Triangles for a flat annulus in the xy-plane. Each quad is emitted with
/// both windings so the ring is visible from above and below.
#[derive(Debug, Clone)]
pub struct AnnulusMesh {
    pub coords: Vec<Point3<f32>>,
    pub faces: Vec<Point3<u16>>,
    /// u runs from the inner edge (0) to the outer edge (1)
    pub uvs: Vec<Point2<f32>>,
}

pub fn annulus_mesh(inner: f32, outer: f32, segments: u16) -> AnnulusMesh {
    let segments = segments.max(3);
    let mut coords = Vec::with_capacity(2 * segments as usize);
    let mut uvs = Vec::with_capacity(2 * segments as usize);

    for i in 0..segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        let v = i as f32 / segments as f32;
        coords.push(Point3::new(inner * c, inner * s, 0.0));
        uvs.push(Point2::new(0.0, v));
        coords.push(Point3::new(outer * c, outer * s, 0.0));
        uvs.push(Point2::new(1.0, v));
    }

    let mut faces = Vec::with_capacity(4 * segments as usize);
    for i in 0..segments {
        let j = (i + 1) % segments;
        let (a, b, c, d) = (2 * i, 2 * i + 1, 2 * j, 2 * j + 1);
        faces.push(Point3::new(a, b, d));
        faces.push(Point3::new(a, d, c));
        faces.push(Point3::new(a, d, b));
        faces.push(Point3::new(a, c, d));
    }

    AnnulusMesh { coords, faces, uvs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_state(x: f64) -> BodyRenderState {
        BodyRenderState {
            current_position: Point3::new(x, 1.0, 0.0),
            current_rotation: Vector3::new(0.47, 0.0, 2.0),
            scale_factor: 1.2,
            emissive_intensity: 0.0,
            is_highlighted: false,
        }
    }

    fn two_bands() -> RingSystem {
        let band = |name: &str, spin_rate| RingBand {
            name: name.to_owned(),
            inner: 1.8,
            outer: 2.8,
            spin_rate,
            color: Point3::new(1.0, 1.0, 1.0),
            opacity: 0.5,
            textured: false,
        };
        RingSystem {
            parent: BodyID(6),
            bands: vec![band("fast", 0.18), band("static", 0.0)],
        }
    }

    #[test]
    fn test_follows_parent() {
        let rings = two_bands();
        let first = rings.render_state(1.0, &parent_state(30.0), 1.2);
        let second = rings.render_state(1.0, &parent_state(-12.0), 1.2);
        assert_eq!(first.center, Point3::new(30.0, 1.0, 0.0));
        assert_eq!(second.center, Point3::new(-12.0, 1.0, 0.0));
        assert_eq!(first.parent_rotation, Vector3::new(0.47, 0.0, 2.0));
        approx::assert_relative_eq!(first.parent_radius, 1.44);
    }

    #[test]
    fn test_bands_spin_independently() {
        let rings = two_bands();
        let state = rings.render_state(10.0, &parent_state(0.0), 1.0);
        approx::assert_relative_eq!(state.band_spins[0], 1.8);
        assert_eq!(state.band_spins[1], 0.0);
    }

    #[test]
    fn test_bands_turn_with_parent() {
        let rings = two_bands();
        let state = rings.render_state(10.0, &parent_state(0.0), 1.0);
        let (tilt, spin) = state.band_orientation(0);
        approx::assert_relative_eq!(tilt, 0.47);
        approx::assert_relative_eq!(spin, 2.0 + 1.8);
        // A static band still follows the planet
        approx::assert_relative_eq!(state.band_orientation(1).1, 2.0);
        // Out of range is just the parent
        assert_eq!(state.band_orientation(7), (0.47, 2.0));
    }

    #[test]
    fn test_annulus_mesh() {
        let mesh = annulus_mesh(1.0, 2.0, 8);
        assert_eq!(mesh.coords.len(), 16);
        assert_eq!(mesh.uvs.len(), 16);
        assert_eq!(mesh.faces.len(), 32);
        for (i, pt) in mesh.coords.iter().enumerate() {
            let r = pt.coords.norm();
            let expected = if i % 2 == 0 { 1.0 } else { 2.0 };
            approx::assert_relative_eq!(r, expected, epsilon = 1e-6);
        }
        assert!(mesh.faces.iter().all(|f| f.iter().all(|&i| (i as usize) < mesh.coords.len())));
    }
}
