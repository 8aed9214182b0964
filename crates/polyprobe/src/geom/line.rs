//! Infinite lines in general form `a·x + b·y = c`.

use nalgebra::{matrix, Vector2};

/// Infinite line `n · p = c` with `n = (a, b)`, plus the tolerance used by its
/// predicates.
///
/// Invariants:
/// - `n != (0, 0)`.
/// - Vertical lines are stored as `(1, 0, x)`; all others in slope form
///   `(slope, -1, -intercept)`. Tolerance checks are not scale-normalized, so
///   steep lines are stricter than flat ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    n: Vector2<f64>,
    c: f64,
    eps: f64,
}

impl Line {
    /// Line through `p1` and `p2`.
    ///
    /// Coincident points take the vertical branch and give the vertical line
    /// through them; callers should not rely on that.
    pub fn through(p1: Vector2<f64>, p2: Vector2<f64>, eps: f64) -> Self {
        if p1.x == p2.x {
            return Self {
                n: Vector2::new(1.0, 0.0),
                c: p1.x,
                eps,
            };
        }
        let slope = (p1.y - p2.y) / (p1.x - p2.x);
        let intercept = (p2.x * p1.y - p1.x * p2.y) / (p2.x - p1.x);
        Self {
            n: Vector2::new(slope, -1.0),
            c: -intercept,
            eps,
        }
    }

    #[inline]
    pub fn a(&self) -> f64 {
        self.n.x
    }
    #[inline]
    pub fn b(&self) -> f64 {
        self.n.y
    }
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }
    #[inline]
    pub fn eps(&self) -> f64 {
        self.eps
    }
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.n.y == 0.0
    }
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.n.x == 0.0
    }

    /// Membership within tolerance: `|a·x + b·y - c| <= eps`.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        (self.n.dot(&p) - self.c).abs() <= self.eps
    }

    /// Intersection point by Cramer's rule.
    ///
    /// Returns None when `|det| <= eps`. This treats near-parallel and
    /// coincident lines alike; coincident lines are never reported as
    /// overlapping.
    pub fn intersect(&self, other: &Line) -> Option<Vector2<f64>> {
        let det = matrix![self.n.x, self.n.y; other.n.x, other.n.y].determinant();
        if det.abs() <= self.eps {
            return None;
        }
        let (a, b, p) = (self.n.x, self.n.y, self.c);
        let (c, d, q) = (other.n.x, other.n.y, other.c);
        let x = d * p - b * q;
        let y = a * q - c * p;
        Some(Vector2::new(x / det, y / det))
    }
}
