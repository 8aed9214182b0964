//! Bounded portions of lines: polygon edges and axial probes.
//!
//! A `Ray` pairs a `Line` with a `Bound`. Edges are bounded by the bounding
//! box of their endpoints (exact for straight segments, since any point of the
//! line inside the box lies on the segment). Probes are half-lines bounded by
//! the side of their anchor.

use nalgebra::Vector2;

use super::line::Line;
use super::types::Direction;

/// Offset (in index units) of the second point that fixes a probe's line.
///
/// The probe's reach comes from its `Bound::Side`, not from this offset.
pub const PROBE_OFFSET: f64 = 10.0;

/// Region a ray is restricted to, evaluated by `admits`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    /// Vertical edge: `y` within range.
    Vertical { y_min: f64, y_max: f64 },
    /// Horizontal edge: `x` within range.
    Horizontal { x_min: f64, x_max: f64 },
    /// Diagonal edge: both coordinates within the bounding box.
    Box {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    /// Probe half-line: on the `dir` side of `anchor`, inclusive.
    Side { dir: Direction, anchor: Vector2<f64> },
}

impl Bound {
    /// Bound of the segment `p1`–`p2`, picked from its orientation.
    pub fn segment(p1: Vector2<f64>, p2: Vector2<f64>) -> Self {
        let (x_min, x_max) = (p1.x.min(p2.x), p1.x.max(p2.x));
        let (y_min, y_max) = (p1.y.min(p2.y), p1.y.max(p2.y));
        if p1.x == p2.x {
            Bound::Vertical { y_min, y_max }
        } else if p1.y == p2.y {
            Bound::Horizontal { x_min, x_max }
        } else {
            Bound::Box {
                x_min,
                x_max,
                y_min,
                y_max,
            }
        }
    }

    #[inline]
    pub fn admits(&self, p: Vector2<f64>) -> bool {
        match *self {
            Bound::Vertical { y_min, y_max } => (y_min..=y_max).contains(&p.y),
            Bound::Horizontal { x_min, x_max } => (x_min..=x_max).contains(&p.x),
            Bound::Box {
                x_min,
                x_max,
                y_min,
                y_max,
            } => (x_min..=x_max).contains(&p.x) && (y_min..=y_max).contains(&p.y),
            Bound::Side { dir, anchor } => dir.admits(anchor, p),
        }
    }
}

/// A line restricted to a `Bound`. `contains` implies `line().contains`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    line: Line,
    bound: Bound,
}

impl Ray {
    #[inline]
    pub fn new(line: Line, bound: Bound) -> Self {
        Self { line, bound }
    }

    /// Boundary edge from `p1` to `p2`.
    pub fn edge(p1: Vector2<f64>, p2: Vector2<f64>, eps: f64) -> Self {
        Self::new(Line::through(p1, p2, eps), Bound::segment(p1, p2))
    }

    /// Axial probe starting at `anchor` and extending towards `dir`.
    pub fn probe(anchor: Vector2<f64>, dir: Direction, eps: f64) -> Self {
        let far = anchor + dir.unit() * PROBE_OFFSET;
        Self::new(
            Line::through(anchor, far, eps),
            Bound::Side { dir, anchor },
        )
    }

    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }
    #[inline]
    pub fn bound(&self) -> &Bound {
        &self.bound
    }

    /// On the line (within tolerance) and inside the bound.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        self.line.contains(p) && self.bound.admits(p)
    }

    /// Whether the two rays share a point.
    ///
    /// Rays on (near-)parallel lines never intersect, even when they overlap.
    #[inline]
    pub fn intersects(&self, other: &Ray) -> bool {
        self.line
            .intersect(&other.line)
            .is_some_and(|p| self.contains(p) && other.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    const EPS: f64 = 1e-3;

    #[test]
    fn segment_bound_kinds() {
        assert!(matches!(
            Bound::segment(vector![1.0, 3.0], vector![1.0, 0.0]),
            Bound::Vertical { y_min, y_max } if y_min == 0.0 && y_max == 3.0
        ));
        assert!(matches!(
            Bound::segment(vector![4.0, 2.0], vector![0.0, 2.0]),
            Bound::Horizontal { x_min, x_max } if x_min == 0.0 && x_max == 4.0
        ));
        assert!(matches!(
            Bound::segment(vector![0.0, 0.0], vector![2.0, 1.0]),
            Bound::Box { .. }
        ));
    }

    #[test]
    fn edge_contains_endpoints_not_extension() {
        let e = Ray::edge(vector![0.0, 0.0], vector![2.0, 2.0], EPS);
        assert!(e.contains(vector![0.0, 0.0]));
        assert!(e.contains(vector![1.0, 1.0]));
        assert!(e.contains(vector![2.0, 2.0]));
        assert!(e.line().contains(vector![3.0, 3.0]));
        assert!(!e.contains(vector![3.0, 3.0]));
    }

    #[test]
    fn probes_are_half_lines() {
        let anchor = vector![2.0, 2.0];
        let right = Ray::probe(anchor, Direction::Right, EPS);
        assert!(right.contains(anchor));
        assert!(right.contains(vector![1e6, 2.0]));
        assert!(!right.contains(vector![1.0, 2.0]));

        let down = Ray::probe(anchor, Direction::Down, EPS);
        assert!(down.line().is_vertical());
        assert!(down.contains(vector![2.0, -50.0]));
        assert!(!down.contains(vector![2.0, 2.5]));
    }

    #[test]
    fn probe_hits_edge_far_beyond_offset() {
        let anchor = vector![0.0, 0.0];
        let wall = Ray::edge(vector![1000.0, -1.0], vector![1000.0, 1.0], EPS);
        assert!(Ray::probe(anchor, Direction::Right, EPS).intersects(&wall));
        assert!(!Ray::probe(anchor, Direction::Left, EPS).intersects(&wall));
        // parallel probes never hit
        assert!(!Ray::probe(anchor, Direction::Up, EPS).intersects(&wall));
    }

    #[test]
    fn intersects_requires_both_bounds() {
        let a = Ray::edge(vector![0.0, 0.0], vector![4.0, 0.0], EPS);
        let b = Ray::edge(vector![2.0, 1.0], vector![2.0, 3.0], EPS);
        // lines cross at (2, 0) which is outside `b`
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        let c = Ray::edge(vector![2.0, -1.0], vector![2.0, 3.0], EPS);
        assert!(a.intersects(&c) && c.intersects(&a));
    }
}
