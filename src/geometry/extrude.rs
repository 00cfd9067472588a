//! Extrusion of 2D shapes into bevelled solids.
//!
//! Each shape is sampled into a ring stack: front bevel rings, the body
//! rings from `z = 0` to `z = depth`, then back bevel rings mirrored behind
//! the body. Caps close the first and last ring; quads stitch neighbours.
//! Output is a triangle soup with flat normals.

use cgmath::Vector3;

use super::Geometry;
use super::shape::{Point, Shape, is_clockwise};
use super::triangulate::triangulate;
use crate::config::TextOptions;

#[derive(Clone, Debug, PartialEq)]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub steps: u32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_offset: 0.0,
            bevel_segments: 3,
        }
    }
}

impl From<&TextOptions> for ExtrudeOptions {
    fn from(text: &TextOptions) -> Self {
        Self {
            depth: text.depth,
            steps: 1,
            curve_segments: text.curve_segments,
            bevel_enabled: text.bevel_enabled,
            bevel_thickness: text.bevel_thickness,
            bevel_size: text.bevel_size,
            bevel_offset: text.bevel_offset,
            bevel_segments: text.bevel_segments,
        }
    }
}

pub fn extrude(shapes: &[Shape], options: &ExtrudeOptions) -> Geometry {
    let mut triangles = Vec::new();
    for shape in shapes {
        extrude_shape(shape, options, &mut triangles);
    }
    Geometry::from_triangles(triangles)
}

/// Drop repeated points, including a closing point equal to the first.
fn dedup_ring(points: &mut Vec<Point>) {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
}

/// Direction along which `pt` moves when the outline grows by one unit.
///
/// Points to the left of travel, which is outward for a clockwise contour
/// and into the hole for a counter-clockwise one. Sharp corners are capped
/// at a length of `sqrt(2)`.
fn bevel_vec(pt: Point, prev: Point, next: Point) -> Point {
    let v_prev = pt - prev;
    let v_next = next - pt;
    let prev_len_sq = v_prev.x * v_prev.x + v_prev.y * v_prev.y;
    let collinear = v_prev.x * v_next.y - v_prev.y * v_next.x;

    let (trans, shrink_by) = if collinear.abs() > f32::EPSILON {
        let prev_len = prev_len_sq.sqrt();
        let next_len = (v_next.x * v_next.x + v_next.y * v_next.y).sqrt();
        let prev_shift = Point::new(prev.x - v_prev.y / prev_len, prev.y + v_prev.x / prev_len);
        let next_shift = Point::new(next.x - v_next.y / next_len, next.y + v_next.x / next_len);
        let sf = ((next_shift.x - prev_shift.x) * v_next.y
            - (next_shift.y - prev_shift.y) * v_next.x)
            / collinear;
        let trans = prev_shift + v_prev * sf - pt;
        let trans_len_sq = trans.x * trans.x + trans.y * trans.y;
        if trans_len_sq <= 2.0 {
            return trans;
        }
        (trans, (trans_len_sq / 2.0).sqrt())
    } else {
        let same_direction = if v_prev.x > f32::EPSILON {
            v_next.x > f32::EPSILON
        } else if v_prev.x < -f32::EPSILON {
            v_next.x < -f32::EPSILON
        } else {
            v_prev.y.signum() == v_next.y.signum()
        };
        if same_direction {
            (Point::new(-v_prev.y, v_prev.x), prev_len_sq.sqrt())
        } else {
            (v_prev, (prev_len_sq / 2.0).sqrt())
        }
    };
    if shrink_by > 0.0 { trans / shrink_by } else { trans }
}

fn ring_movements(ring: &[Point]) -> Vec<Point> {
    let n = ring.len();
    (0..n)
        .map(|i| bevel_vec(ring[i], ring[(i + n - 1) % n], ring[(i + 1) % n]))
        .collect()
}

fn extrude_shape(shape: &Shape, options: &ExtrudeOptions, out: &mut Vec<Vector3<f32>>) {
    let points = shape.extract_points(options.curve_segments);
    let mut contour = points.contour;
    let mut holes = points.holes;

    // contour clockwise, holes counter-clockwise
    if !is_clockwise(&contour) {
        contour.reverse();
    }
    for hole in holes.iter_mut() {
        if is_clockwise(hole) {
            hole.reverse();
        }
    }
    dedup_ring(&mut contour);
    holes.iter_mut().for_each(dedup_ring);
    holes.retain(|h| h.len() >= 3);
    if contour.len() < 3 {
        log::warn!("skipping degenerate outline with {} points", contour.len());
        return;
    }

    let faces = triangulate(&contour, &holes);

    let (bevel_segments, thickness, size, offset) = if options.bevel_enabled {
        (
            options.bevel_segments,
            options.bevel_thickness,
            options.bevel_size,
            options.bevel_offset,
        )
    } else {
        (0, 0.0, 0.0, 0.0)
    };
    let steps = options.steps.max(1);

    let mut base: Vec<Point> = contour.clone();
    let mut movements = ring_movements(&contour);
    let mut rings = vec![(0usize, contour.len())];
    for hole in &holes {
        rings.push((base.len(), hole.len()));
        base.extend_from_slice(hole);
        movements.extend(ring_movements(hole));
    }
    let vlen = base.len();

    let layer = |z: f32, grow: f32| -> Vec<Vector3<f32>> {
        base.iter()
            .zip(&movements)
            .map(|(p, m)| {
                let q = *p + *m * grow;
                Vector3::new(q.x, q.y, z)
            })
            .collect()
    };

    let quarter = |b: u32| b as f32 / bevel_segments as f32 * std::f32::consts::FRAC_PI_2;
    let mut layers: Vec<Vector3<f32>> = Vec::new();
    for b in 0..bevel_segments {
        let t = quarter(b);
        layers.extend(layer(-thickness * t.cos(), size * t.sin() + offset));
    }
    let body_grow = if options.bevel_enabled { size + offset } else { 0.0 };
    layers.extend(layer(0.0, body_grow));
    for s in 1..=steps {
        layers.extend(layer(options.depth / steps as f32 * s as f32, body_grow));
    }
    for b in (0..bevel_segments).rev() {
        let t = quarter(b);
        layers.extend(layer(options.depth + thickness * t.cos(), size * t.sin() + offset));
    }
    let layer_count = layers.len() / vlen;
    let at = |l: usize, v: usize| layers[l * vlen + v];

    // front cap faces -z, back cap faces +z
    let last = layer_count - 1;
    for f in &faces {
        let [a, b, c] = f.map(|i| i as usize);
        out.extend([at(0, c), at(0, b), at(0, a)]);
        out.extend([at(last, a), at(last, b), at(last, c)]);
    }

    for &(start, len) in &rings {
        for i in 0..len {
            let j = start + i;
            let k = start + (i + len - 1) % len;
            for s in 0..last {
                let a = at(s, k);
                let b = at(s, j);
                let c = at(s + 1, j);
                let d = at(s + 1, k);
                out.extend([a, d, b, b, d, c]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shape::Path;
    use approx::assert_relative_eq;
    use cgmath::InnerSpace;

    fn square(clockwise: bool) -> Shape {
        let corners = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        let mut pts: Vec<Point> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
        if !clockwise {
            pts.reverse();
        }
        let mut path = Path::new(pts[0]);
        for p in &pts[1..] {
            path.line_to(*p);
        }
        path.line_to(pts[0]);
        Shape::new(path)
    }

    fn flat(depth: f32) -> ExtrudeOptions {
        ExtrudeOptions {
            depth,
            bevel_enabled: false,
            ..Default::default()
        }
    }

    #[test]
    fn unbevelled_box_has_caps_and_walls() {
        let geometry = extrude(&[square(true)], &flat(2.0));
        // 2 caps * 2 triangles + 4 walls * 2 triangles
        assert_eq!(geometry.triangle_count(), 12);
        let mut geometry = geometry;
        let bbox = geometry.compute_bounding_box();
        assert_eq!(bbox.min, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max, Vector3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn normals_point_away_from_the_solid() {
        for clockwise in [true, false] {
            let geometry = extrude(&[square(clockwise)], &flat(1.0));
            let centre = Vector3::new(0.5, 0.5, 0.5);
            let triangles = geometry.positions().chunks_exact(3);
            for (p, n) in triangles.zip(geometry.normals().chunks_exact(3)) {
                let face_centre = (p[0] + p[1] + p[2]) / 3.0;
                assert!((face_centre - centre).dot(n[0]) > 0.0);
            }
        }
    }

    #[test]
    fn bevel_grows_outline_and_thickness() {
        let options = ExtrudeOptions {
            depth: 1.0,
            bevel_enabled: true,
            bevel_thickness: 0.25,
            bevel_size: 0.1,
            bevel_offset: 0.0,
            bevel_segments: 2,
            ..Default::default()
        };
        let mut geometry = extrude(&[square(true)], &options);
        let bbox = geometry.compute_bounding_box();
        assert_relative_eq!(bbox.min.z, -0.25, epsilon = 1e-6);
        assert_relative_eq!(bbox.max.z, 1.25, epsilon = 1e-6);
        assert_relative_eq!(bbox.min.x, -0.1, epsilon = 1e-5);
        assert_relative_eq!(bbox.max.y, 1.1, epsilon = 1e-5);
    }

    #[test]
    fn corner_vector_is_diagonal() {
        let v = bevel_vec(Point::new(0.0, 1.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert_relative_eq!(v.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }
}
