//! 4x4 transformation matrix
//!
//! Row-major with row vectors: a point is transformed as `p * M`, so the
//! translation lives in the bottom row and `a * b` applies `a` first.

use crate::primitives::{Point, Transform2D};
use std::ops::Mul;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix44 {
    m: [f64; 16],
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix44 {
    pub const fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub const fn from_rows(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Self::identity();
        m.m[0] = sx;
        m.m[5] = sy;
        m.m[10] = sz;
        m
    }

    pub fn translate(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Self::identity();
        m.m[12] = dx;
        m.m[13] = dy;
        m.m[14] = dz;
        m
    }

    /// Rotation about the z-axis by `angle` radians
    pub fn z_rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut m = Self::identity();
        m.m[0] = cos;
        m.m[1] = sin;
        m.m[4] = -sin;
        m.m[5] = cos;
        m
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row * 4 + col]
    }

    /// Transform a point lying in the xy-plane (z = 0)
    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.m;
        Point::new(
            p.x * m[0] + p.y * m[4] + m[12],
            p.x * m[1] + p.y * m[5] + m[13],
        )
    }

    /// Reduce to a 2D affine map.
    ///
    /// Only the xy part of the linear block and the xy translation are kept;
    /// any out-of-plane rotation is dropped.
    pub fn to_2d(&self) -> Transform2D {
        let m = &self.m;
        Transform2D {
            a: m[0],
            b: m[1],
            c: m[4],
            d: m[5],
            e: m[12],
            f: m[13],
        }
    }
}

impl Mul for Matrix44 {
    type Output = Matrix44;

    fn mul(self, rhs: Matrix44) -> Matrix44 {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = (0..4)
                    .map(|k| self.m[row * 4 + k] * rhs.m[k * 4 + col])
                    .sum();
            }
        }
        Matrix44 { m: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_then_translate() {
        let m = Matrix44::scale(2.0, -2.0, 0.0) * Matrix44::translate(5.0, 1.0, 0.0);
        assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(7.0, -1.0));
    }

    #[test]
    fn test_to_2d_matches_transform_point() {
        let m = Matrix44::z_rotate(0.5) * Matrix44::translate(3.0, 4.0, 9.0);
        let t = m.to_2d();
        let p = Point::new(2.0, -1.0);
        assert!(t.map_point(p).is_close(m.transform_point(p), 1e-12));
    }
}
