//! 2D outlines: curves, paths, and shapes with holes.
//!
//! Orientation follows the y-up convention used by font outlines: a
//! clockwise contour is solid, a counter-clockwise one is a hole.

use cgmath::Vector2;

pub type Point = Vector2<f32>;

#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    Line {
        from: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        control: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        control1: Point,
        control2: Point,
        to: Point,
    },
}

impl Curve {
    pub fn point_at(&self, t: f32) -> Point {
        match *self {
            Curve::Line { from, to } => from + (to - from) * t,
            Curve::Quadratic { from, control, to } => {
                let k = 1.0 - t;
                from * (k * k) + control * (2.0 * k * t) + to * (t * t)
            }
            Curve::Cubic {
                from,
                control1,
                control2,
                to,
            } => {
                let k = 1.0 - t;
                from * (k * k * k)
                    + control1 * (3.0 * k * k * t)
                    + control2 * (3.0 * k * t * t)
                    + to * (t * t * t)
            }
        }
    }

    /// Sample the curve. Lines only need their endpoints.
    pub fn sample(&self, divisions: u32) -> Vec<Point> {
        match self {
            Curve::Line { from, to } => vec![*from, *to],
            _ => {
                let divisions = divisions.max(1);
                (0..=divisions)
                    .map(|d| self.point_at(d as f32 / divisions as f32))
                    .collect()
            }
        }
    }
}

/// A connected sequence of curves starting at a pen position.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    curves: Vec<Curve>,
    current: Point,
}

impl Path {
    pub fn new(start: Point) -> Self {
        Self {
            curves: Vec::new(),
            current: start,
        }
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn line_to(&mut self, to: Point) {
        self.curves.push(Curve::Line {
            from: self.current,
            to,
        });
        self.current = to;
    }

    pub fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.curves.push(Curve::Quadratic {
            from: self.current,
            control,
            to,
        });
        self.current = to;
    }

    pub fn bezier_curve_to(&mut self, control1: Point, control2: Point, to: Point) {
        self.curves.push(Curve::Cubic {
            from: self.current,
            control1,
            control2,
            to,
        });
        self.current = to;
    }

    /// Flatten into points; consecutive duplicates are skipped.
    pub fn points(&self, divisions: u32) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        for curve in &self.curves {
            for p in curve.sample(divisions) {
                if points.last() != Some(&p) {
                    points.push(p);
                }
            }
        }
        points
    }
}

/// Shoelace area; negative for clockwise polygons (y up).
pub fn area(points: &[Point]) -> f32 {
    let n = points.len();
    let mut a = 0.0;
    for i in 0..n {
        let p = points[(i + n - 1) % n];
        let q = points[i];
        a += p.x * q.y - q.x * p.y;
    }
    a * 0.5
}

pub fn is_clockwise(points: &[Point]) -> bool {
    area(points) < 0.0
}

/// Even-odd containment test.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A solid outline and the holes cut out of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub contour: Path,
    pub holes: Vec<Path>,
}

/// A flattened [`Shape`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePoints {
    pub contour: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl Shape {
    pub fn new(contour: Path) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    pub fn extract_points(&self, divisions: u32) -> ShapePoints {
        ShapePoints {
            contour: self.contour.points(divisions),
            holes: self.holes.iter().map(|h| h.points(divisions)).collect(),
        }
    }
}

/// Divisions used when classifying sub-paths as solids or holes.
const CLASSIFY_DIVISIONS: u32 = 12;

/// Pen-style builder collecting several sub-paths, as a glyph outline does.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapePath {
    subpaths: Vec<Path>,
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subpaths(&self) -> &[Path] {
        &self.subpaths
    }

    pub fn move_to(&mut self, to: Point) {
        self.subpaths.push(Path::new(to));
    }

    fn current(&mut self) -> &mut Path {
        if self.subpaths.is_empty() {
            self.subpaths.push(Path::new(Point::new(0.0, 0.0)));
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    pub fn line_to(&mut self, to: Point) {
        self.current().line_to(to);
    }

    pub fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.current().quadratic_curve_to(control, to);
    }

    pub fn bezier_curve_to(&mut self, control1: Point, control2: Point, to: Point) {
        self.current().bezier_curve_to(control1, control2, to);
    }

    /// Group sub-paths into shapes.
    ///
    /// Clockwise sub-paths become solids. Each counter-clockwise sub-path is a
    /// hole of the first solid containing its first point, falling back to the
    /// nearest preceding solid. With no solid at all every sub-path is treated
    /// as its own shape.
    pub fn to_shapes(&self) -> Vec<Shape> {
        let subpaths: Vec<(&Path, Vec<Point>)> = self
            .subpaths
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| (p, p.points(CLASSIFY_DIVISIONS)))
            .collect();

        if subpaths.len() == 1 {
            return vec![Shape::new(subpaths[0].0.clone())];
        }

        let solid_count = subpaths.iter().filter(|(_, pts)| is_clockwise(pts)).count();
        if solid_count == 0 {
            return subpaths.into_iter().map(|(p, _)| Shape::new(p.clone())).collect();
        }

        let mut shapes: Vec<(Shape, &[Point])> = Vec::new();
        let mut pending: Vec<(usize, &Path, Point)> = Vec::new();
        for (path, pts) in &subpaths {
            if is_clockwise(pts) {
                shapes.push((Shape::new(Path::clone(path)), pts.as_slice()));
            } else if let Some(first) = pts.first() {
                pending.push((shapes.len(), *path, *first));
            }
        }

        for (solids_before, hole, first) in pending {
            let owner = shapes
                .iter()
                .position(|(_, pts)| point_in_polygon(first, pts))
                .unwrap_or(solids_before.saturating_sub(1));
            shapes[owner].0.holes.push(hole.clone());
        }

        shapes.into_iter().map(|(shape, _)| shape).collect()
    }
}
