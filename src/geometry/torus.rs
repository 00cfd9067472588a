use cgmath::{InnerSpace, Vector3};
use std::f32::consts::TAU;

use super::Geometry;
use crate::config::TorusOptions;

/// A ring torus in the XY plane, centred on the origin.
///
/// Produces `(radial + 1) * (tubular + 1)` vertices; the seam is duplicated
/// so every ring is closed.
pub fn torus(options: &TorusOptions) -> Geometry {
    let radial = options.radial_segments.max(2);
    let tubular = options.tubular_segments.max(3);

    let mut positions = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = options.radius + options.tube * v.cos();
            let vertex = Vector3::new(ring * u.cos(), ring * u.sin(), options.tube * v.sin());
            let centre = Vector3::new(options.radius * u.cos(), options.radius * u.sin(), 0.0);
            positions.push(vertex);
            normals.push((vertex - centre).normalize());
        }
    }

    let stride = tubular + 1;
    let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::new(positions, normals, indices)
}
