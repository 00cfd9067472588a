//! CPU-side geometry.
//!
//! - `shape` holds 2D paths, curves and shapes (outlines with holes)
//! - `triangulate` turns a polygon with holes into triangles
//! - `extrude` lifts shapes into bevelled 3D solids
//! - `torus` builds the donut geometry
//! - `text` builds centred 3D text from a [`crate::font::Font`]
//!
//! [`Geometry`] is the common output: positions, normals and a triangle index
//! list, plus an optional cached [`BoundingBox`].

use cgmath::{InnerSpace, Vector3, Zero};

pub mod extrude;
pub mod shape;
pub mod text;
pub mod torus;
pub mod triangulate;

/// Axis-aligned bounding box. An empty box has `min > max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Vector3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vector3<f32>>) -> Self {
        points.into_iter().fold(Self::empty(), |mut bbox, p| {
            bbox.expand_by_point(*p);
            bbox
        })
    }

    pub fn expand_by_point(&mut self, p: Vector3<f32>) {
        self.min = Vector3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vector3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Centre of the box; the origin for an empty box.
    pub fn center(&self) -> Vector3<f32> {
        if self.is_empty() {
            Vector3::zero()
        } else {
            (self.min + self.max) * 0.5
        }
    }

    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            Vector3::zero()
        } else {
            self.max - self.min
        }
    }
}

/// Indexed triangle geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    positions: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    indices: Vec<u32>,
    bounding_box: Option<BoundingBox>,
}

impl Geometry {
    pub fn new(
        positions: Vec<Vector3<f32>>,
        normals: Vec<Vector3<f32>>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        Self {
            positions,
            normals,
            indices,
            bounding_box: None,
        }
    }

    /// Build a triangle soup (three consecutive positions per face) with flat normals.
    pub fn from_triangles(positions: Vec<Vector3<f32>>) -> Self {
        let normals = positions
            .chunks_exact(3)
            .flat_map(|tri| {
                let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
                let n = if n.magnitude2() > 0.0 {
                    n.normalize()
                } else {
                    Vector3::zero()
                };
                [n, n, n]
            })
            .collect::<Vec<_>>();
        let positions = positions[..normals.len()].to_vec();
        let indices = (0..positions.len() as u32).collect();
        Self::new(positions, normals, indices)
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The cached bounding box, if one has been computed.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    pub fn compute_bounding_box(&mut self) -> BoundingBox {
        let bbox = BoundingBox::from_points(&self.positions);
        self.bounding_box = Some(bbox);
        bbox
    }

    /// Move every vertex by `offset`. A cached bounding box is recomputed.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.positions.iter_mut().for_each(|p| *p += offset);
        if self.bounding_box.is_some() {
            self.compute_bounding_box();
        }
    }

    /// Centre the geometry on the origin and return the applied translation.
    pub fn center(&mut self) -> Vector3<f32> {
        let offset = -self.compute_bounding_box().center();
        self.translate(offset);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Geometry {
        Geometry::from_triangles(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 4.0, 1.0),
        ])
    }

    #[test]
    fn empty_box_centre_is_origin() {
        let bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        assert_eq!(bbox.center(), Vector3::zero());
    }

    #[test]
    fn flat_normals_follow_winding() {
        let geometry = Geometry::from_triangles(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(geometry.normals()[0], Vector3::unit_z());
        assert_eq!(geometry.indices(), &[0, 1, 2]);
    }

    #[test]
    fn center_moves_box_onto_origin() {
        let mut geometry = unit_triangle();
        let offset = geometry.center();
        assert_eq!(offset, Vector3::new(-1.0, -2.0, -0.5));
        let bbox = geometry.bounding_box().unwrap();
        assert_eq!(bbox.min, Vector3::new(-1.0, -2.0, -0.5));
        assert_eq!(bbox.max, Vector3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn translate_without_cached_box_leaves_it_uncomputed() {
        let mut geometry = unit_triangle();
        geometry.translate(Vector3::new(1.0, 0.0, 0.0));
        assert!(geometry.bounding_box().is_none());
        assert_eq!(geometry.positions()[0], Vector3::new(1.0, 0.0, 0.0));
    }
}
