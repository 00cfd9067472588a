//! Ear-clipping triangulation of a polygon with holes.
//!
//! Holes are first merged into the outer ring through bridge edges (the
//! visible-vertex construction from Eberly's "Triangulation by Ear
//! Clipping"), then ears are cut from the resulting simple polygon.

use super::shape::{Point, area};

type P = [f64; 2];

const EPSILON: f64 = 1e-12;

fn sub(a: P, b: P) -> P {
    [a[0] - b[0], a[1] - b[1]]
}

fn cross(a: P, b: P) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

/// Twice the signed area of triangle `abc`; positive when counter-clockwise.
fn orient(a: P, b: P, c: P) -> f64 {
    cross(sub(b, a), sub(c, a))
}

fn in_triangle(p: P, a: P, b: P, c: P) -> bool {
    orient(a, b, p) >= -EPSILON && orient(b, c, p) >= -EPSILON && orient(c, a, p) >= -EPSILON
}

/// Triangulate `contour` minus `holes`.
///
/// Indices refer to the concatenation `contour ++ holes[0] ++ holes[1] ...`.
/// Every returned triangle is counter-clockwise regardless of the input
/// winding.
pub fn triangulate(contour: &[Point], holes: &[Vec<Point>]) -> Vec<[u32; 3]> {
    let mut points: Vec<P> = contour.iter().map(|p| [p.x as f64, p.y as f64]).collect();

    let mut outer: Vec<usize> = (0..contour.len()).collect();
    if area(contour) < 0.0 {
        outer.reverse();
    }

    let mut rings: Vec<Vec<usize>> = Vec::with_capacity(holes.len());
    for hole in holes {
        let start = points.len();
        points.extend(hole.iter().map(|p| [p.x as f64, p.y as f64]));
        if hole.len() < 3 {
            continue;
        }
        let mut ring: Vec<usize> = (start..start + hole.len()).collect();
        // holes run clockwise against the counter-clockwise outer ring
        if area(hole) > 0.0 {
            ring.reverse();
        }
        rings.push(ring);
    }

    if outer.len() < 3 {
        return Vec::new();
    }

    let max_x = |ring: &Vec<usize>| {
        ring.iter()
            .map(|&i| points[i][0])
            .fold(f64::NEG_INFINITY, f64::max)
    };
    rings.sort_by(|a, b| max_x(b).total_cmp(&max_x(a)));

    let mut polygon = outer;
    for ring in &rings {
        bridge_hole(&mut polygon, ring, &points);
    }

    clip_ears(polygon, &points)
        .into_iter()
        .map(|[a, b, c]| [a as u32, b as u32, c as u32])
        .collect()
}

/// Splice `ring` into `polygon` through a bridge from the hole's rightmost
/// vertex to a mutually visible polygon vertex.
fn bridge_hole(polygon: &mut Vec<usize>, ring: &[usize], points: &[P]) {
    let Some((m_pos, &m_idx)) = ring
        .iter()
        .enumerate()
        .max_by(|a, b| points[*a.1][0].total_cmp(&points[*b.1][0]))
    else {
        return;
    };
    let m = points[m_idx];

    let Some(p_pos) = visible_vertex(polygon, m, points) else {
        log::warn!("no visible vertex for hole bridge, hole dropped");
        return;
    };

    let mut merged = Vec::with_capacity(polygon.len() + ring.len() + 2);
    merged.extend_from_slice(&polygon[..=p_pos]);
    merged.extend(ring[m_pos..].iter().chain(&ring[..m_pos]));
    merged.push(m_idx);
    merged.push(polygon[p_pos]);
    merged.extend_from_slice(&polygon[p_pos + 1..]);
    *polygon = merged;
}

/// Position in `polygon` of a vertex visible from `m`, searching along +x.
fn visible_vertex(polygon: &[usize], m: P, points: &[P]) -> Option<usize> {
    let n = polygon.len();
    let mut hit: Option<(f64, usize, bool)> = None;
    for i in 0..n {
        let j = (i + 1) % n;
        let a = points[polygon[i]];
        let b = points[polygon[j]];
        if (a[1] - b[1]).abs() < EPSILON {
            continue;
        }
        let straddles = (a[1] <= m[1] && m[1] <= b[1]) || (b[1] <= m[1] && m[1] <= a[1]);
        if !straddles {
            continue;
        }
        let x = a[0] + (m[1] - a[1]) * (b[0] - a[0]) / (b[1] - a[1]);
        if x < m[0] || hit.is_some_and(|(best, _, _)| x >= best) {
            continue;
        }
        let candidate = if a[1] == m[1] {
            (i, true)
        } else if b[1] == m[1] {
            (j, true)
        } else if a[0] > b[0] {
            (i, false)
        } else {
            (j, false)
        };
        hit = Some((x, candidate.0, candidate.1));
    }

    let Some((x, p_pos, exact)) = hit else {
        return nearest_vertex(polygon, m, points);
    };
    if exact {
        return Some(p_pos);
    }

    // Anything inside triangle (m, i, p) may hide p; take the one closest in
    // angle to the ray instead.
    let i_pt = [x, m[1]];
    let p = points[polygon[p_pos]];
    let (t0, t1, t2) = if orient(m, i_pt, p) >= 0.0 {
        (m, i_pt, p)
    } else {
        (m, p, i_pt)
    };
    let mut best = p_pos;
    let mut best_key = angle_key(m, p);
    for (pos, &idx) in polygon.iter().enumerate() {
        let q = points[idx];
        if pos == p_pos || q == p || q[0] < m[0] || !in_triangle(q, t0, t1, t2) {
            continue;
        }
        let key = angle_key(m, q);
        if key.0 > best_key.0 || (key.0 == best_key.0 && key.1 < best_key.1) {
            best = pos;
            best_key = key;
        }
    }
    Some(best)
}

/// Cosine of the angle to +x (larger is closer to the ray), then distance.
fn angle_key(m: P, q: P) -> (f64, f64) {
    let d = sub(q, m);
    let len = (d[0] * d[0] + d[1] * d[1]).sqrt();
    if len == 0.0 { (1.0, 0.0) } else { (d[0] / len, len) }
}

fn nearest_vertex(polygon: &[usize], m: P, points: &[P]) -> Option<usize> {
    polygon
        .iter()
        .enumerate()
        .map(|(pos, &idx)| {
            let d = sub(points[idx], m);
            (pos, d[0] * d[0] + d[1] * d[1])
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| pos)
}

fn clip_ears(mut ring: Vec<usize>, points: &[P]) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut cursor = 0;
    let mut misses = 0;

    while ring.len() > 3 {
        let n = ring.len();
        if misses >= n {
            log::warn!(
                "ear clipping stalled with {} vertices left, closing with a fan",
                n
            );
            for k in 1..n - 1 {
                triangles.push([ring[0], ring[k], ring[k + 1]]);
            }
            return triangles;
        }

        let k = cursor % n;
        let prev = ring[(k + n - 1) % n];
        let curr = ring[k];
        let next = ring[(k + 1) % n];
        let (a, b, c) = (points[prev], points[curr], points[next]);
        let turn = orient(a, b, c);

        if turn.abs() <= EPSILON {
            // collinear or spike: drop the vertex without emitting a triangle
            ring.remove(k);
            misses = 0;
            continue;
        }

        let is_ear = turn > 0.0
            && !ring.iter().any(|&other| {
                let q = points[other];
                q != a && q != b && q != c && in_triangle(q, a, b, c)
            });

        if is_ear {
            triangles.push([prev, curr, next]);
            ring.remove(k);
            misses = 0;
        } else {
            cursor = k + 1;
            misses += 1;
        }
    }

    if ring.len() == 3
        && orient(points[ring[0]], points[ring[1]], points[ring[2]]).abs() > EPSILON
    {
        triangles.push([ring[0], ring[1], ring[2]]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f32, f32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn covered_area(triangles: &[[u32; 3]], all: &[Point]) -> f32 {
        triangles
            .iter()
            .map(|t| {
                let (a, b, c) = (all[t[0] as usize], all[t[1] as usize], all[t[2] as usize]);
                ((b - a).x * (c - a).y - (b - a).y * (c - a).x) * 0.5
            })
            .sum()
    }

    #[test]
    fn square_gives_two_ccw_triangles() {
        let square = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let tris = triangulate(&square, &[]);
        assert_eq!(tris.len(), 2);
        assert!((covered_area(&tris, &square) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn concave_outline_keeps_its_area() {
        // an L shape, area 3
        let l = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let tris = triangulate(&l, &[]);
        assert!(tris.len() <= 4);
        assert!((covered_area(&tris, &l) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn hole_is_subtracted() {
        let outer = pts(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]);
        let hole = pts(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let all: Vec<Point> = outer.iter().chain(&hole).copied().collect();
        let tris = triangulate(&outer, &[hole]);
        assert!(!tris.is_empty());
        assert!((covered_area(&tris, &all) - 12.0).abs() < 1e-5);
        assert!(covered_area(&tris[..1], &all) > 0.0);
    }

    #[test]
    fn degenerate_input_yields_nothing() {
        assert!(triangulate(&pts(&[(0.0, 0.0), (1.0, 1.0)]), &[]).is_empty());
    }
}
