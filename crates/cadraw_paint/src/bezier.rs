//! Cubic Bézier curves with exactly four control points

use crate::primitives::{Point, Rect};
use crate::{PaintError, Result};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Bernstein polynomial of 3rd degree
fn bernstein3(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    [mt2 * mt, 3.0 * mt2 * t, 3.0 * mt * t2, t2 * t]
}

/// First derivative of the Bernstein polynomial of 3rd degree
fn bernstein3_d1(t: f64) -> [f64; 4] {
    let t2 = t * t;
    [
        -3.0 * (1.0 - t) * (1.0 - t),
        3.0 * (1.0 - 4.0 * t + 3.0 * t2),
        3.0 * t * (2.0 - 3.0 * t),
        3.0 * t2,
    ]
}

fn check_range(t: f64) -> Result<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(PaintError::InvalidParameter(format!(
            "t={} not in range [0, 1]",
            t
        )))
    }
}

/// A cubic Bézier curve, parameter `t` runs from 0 (first control point)
/// to 1 (fourth control point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bezier4P {
    control_points: [Point; 4],
}

impl Bezier4P {
    pub const fn new(control_points: [Point; 4]) -> Self {
        Self { control_points }
    }

    pub fn control_points(&self) -> &[Point; 4] {
        &self.control_points
    }

    pub fn start(&self) -> Point {
        self.control_points[0]
    }

    pub fn end(&self) -> Point {
        self.control_points[3]
    }

    /// Point at location `t`
    pub fn point(&self, t: f64) -> Result<Point> {
        check_range(t)?;
        Ok(self.eval(bernstein3(t)))
    }

    /// Tangent direction at location `t`
    pub fn tangent(&self, t: f64) -> Result<Point> {
        check_range(t)?;
        Ok(self.eval(bernstein3_d1(t)))
    }

    fn eval(&self, w: [f64; 4]) -> Point {
        let [p0, p1, p2, p3] = self.control_points;
        p0 * w[0] + p1 * w[1] + p2 * w[2] + p3 * w[3]
    }

    /// `segments + 1` vertices along the curve, first and last are exact
    pub fn approximate(&self, segments: usize) -> impl Iterator<Item = Point> + '_ {
        let segments = segments.max(1);
        let delta = 1.0 / segments as f64;
        (0..=segments).map(move |i| match i {
            0 => self.control_points[0],
            i if i == segments => self.control_points[3],
            i => self.eval(bernstein3(delta * i as f64)),
        })
    }

    /// Length of the polyline approximation by `segments` lines
    pub fn approximated_length(&self, segments: usize) -> f64 {
        let mut points = self.approximate(segments);
        let Some(mut prev) = points.next() else {
            return 0.0;
        };
        let mut length = 0.0;
        for p in points {
            length += prev.distance(p);
            prev = p;
        }
        length
    }

    /// Exact axis-aligned bounds, including curve extrema between the
    /// control points.
    pub fn bounding_box(&self) -> Rect {
        let [p0, p1, p2, p3] = self.control_points;
        let mut points = vec![p0, p3];
        let axes: [fn(Point) -> f64; 2] = [|p| p.x, |p| p.y];
        for axis in axes {
            let (a, b, c) = (axis(p1) - axis(p0), axis(p2) - axis(p1), axis(p3) - axis(p2));
            for t in derivative_roots(a - 2.0 * b + c, 2.0 * (b - a), a) {
                points.push(self.eval(bernstein3(t)));
            }
        }
        // two end points are always present
        Rect::bounding(points).unwrap_or_default()
    }

    /// Approximate a circular arc, angles in radians counter-clockwise.
    ///
    /// At least one curve per started quarter circle and never fewer than
    /// `segments` curves.
    pub fn from_arc(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        segments: usize,
    ) -> Result<Vec<Bezier4P>> {
        let start = start_angle.rem_euclid(TAU);
        let mut end = end_angle.rem_euclid(TAU);
        if end <= start {
            end += TAU;
        }
        Ok(arc_parameters(start, end, segments)?
            .into_iter()
            .map(|cp| Bezier4P::new(cp.map(|p| center + p * radius)))
            .collect())
    }

    /// Interpolation curve through `points`: n points give n-1 curves, curve
    /// `i` runs from `points[i]` to `points[i + 1]`.
    pub fn interpolate(points: &[Point]) -> Result<Vec<Bezier4P>> {
        if points.len() < 3 {
            return Err(PaintError::InvalidParameter(
                "at least 3 points required".to_string(),
            ));
        }
        let n = points.len() - 1;

        // Tridiagonal system for the first control points
        let mut lower = vec![1.0; n];
        let mut diag = vec![4.0; n];
        let upper = vec![1.0; n];
        let mut rhs: Vec<Point> = (0..n)
            .map(|i| (points[i] * 2.0 + points[i + 1]) * 2.0)
            .collect();
        diag[0] = 2.0;
        rhs[0] = points[0] + points[1] * 2.0;
        lower[n - 1] = 2.0;
        diag[n - 1] = 7.0;
        rhs[n - 1] = points[n - 1] * 8.0 + points[n];

        // Thomas algorithm
        for i in 1..n {
            let w = lower[i] / diag[i - 1];
            diag[i] -= w * upper[i - 1];
            rhs[i] = rhs[i] - rhs[i - 1] * w;
        }
        let mut ctrl1 = vec![Point::ZERO; n];
        ctrl1[n - 1] = rhs[n - 1] * (1.0 / diag[n - 1]);
        for i in (0..n - 1).rev() {
            ctrl1[i] = (rhs[i] - ctrl1[i + 1] * upper[i]) * (1.0 / diag[i]);
        }

        let mut ctrl2: Vec<Point> = (1..n)
            .map(|i| points[i] * 2.0 - ctrl1[i])
            .collect();
        ctrl2.push((ctrl1[n - 1] + points[n]) * 0.5);

        Ok((0..n)
            .map(|i| Bezier4P::new([points[i], ctrl1[i], ctrl2[i], points[i + 1]]))
            .collect())
    }
}

/// Roots of `a*t² + b*t + c` inside the open interval (0, 1)
fn derivative_roots(a: f64, b: f64, c: f64) -> impl Iterator<Item = f64> {
    const EPS: f64 = 1e-12;
    let roots: [Option<f64>; 2] = if a.abs() < EPS {
        if b.abs() < EPS {
            [None, None]
        } else {
            [Some(-c / b), None]
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            [None, None]
        } else {
            let sq = disc.sqrt();
            [Some((-b + sq) / (2.0 * a)), Some((-b - sq) / (2.0 * a))]
        }
    };
    roots.into_iter().flatten().filter(|t| *t > 0.0 && *t < 1.0)
}

/// Control points for a unit-circle arc from `start` to `end` (`end > start`)
fn arc_parameters(start: f64, end: f64, segments: usize) -> Result<Vec<[Point; 4]>> {
    if segments < 1 {
        return Err(PaintError::InvalidParameter(
            "segments has to be >= 1".to_string(),
        ));
    }
    let delta = end - start;
    if delta <= 0.0 {
        return Err(PaintError::InvalidParameter(
            "delta angle from start to end angle has to be > 0".to_string(),
        ));
    }
    let arc_count = ((delta / FRAC_PI_2).ceil() as usize).max(segments);
    let segment_angle = delta / arc_count as f64;
    let tangent_length = 4.0 / 3.0 * (segment_angle / 4.0).tan();

    let mut angle = start;
    let mut end_point = Point::from_angle(angle);
    let mut curves = Vec::with_capacity(arc_count);
    for _ in 0..arc_count {
        let start_point = end_point;
        angle += segment_angle;
        end_point = Point::from_angle(angle);
        let ctrl1 = start_point + Point::new(-start_point.y, start_point.x) * tangent_length;
        let ctrl2 = end_point + Point::new(end_point.y, -end_point.x) * tangent_length;
        curves.push([start_point, ctrl1, ctrl2, end_point]);
    }
    Ok(curves)
}
