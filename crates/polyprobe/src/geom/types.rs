//! Basic 2D types and tolerances shared by lines, rays, and polygons.
//!
//! - `PolygonCfg`: centralizes the line tolerance and the quantization precision.
//! - `Direction`: the four axial probe directions, in probe order.

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
///
/// `epsilon` is the slack used by every line membership and determinant test.
/// `precision` is the number of decimal digits kept when a coordinate is turned
/// into an axis key: `key = round(v * 10^precision)`. Values above
/// `MAX_PRECISION` are treated as `MAX_PRECISION`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonCfg {
    pub epsilon: f64,
    pub precision: u8,
}

/// Largest precision honoured; `10^15` keeps integer steps exact in `f64`.
pub const MAX_PRECISION: u8 = 15;

impl Default for PolygonCfg {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            precision: 2,
        }
    }
}

impl PolygonCfg {
    /// Scale factor `10^precision` applied before rounding to a key.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        10f64.powi(i32::from(self.precision.min(MAX_PRECISION)))
    }

    /// Quantize a coordinate to its axis key.
    ///
    /// None if `v` is not finite or the scaled value does not fit in `i64`.
    #[inline]
    pub fn key_of(&self, v: f64) -> Option<i64> {
        let scaled = (v * self.multiplier()).round();
        // i64::MAX as f64 rounds up to 2^63, which already overflows.
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(scaled as i64)
    }

    /// Inverse of `key_of` up to the quantization step.
    #[inline]
    pub fn value_of(&self, key: i64) -> f64 {
        key as f64 / self.multiplier()
    }
}

/// Axial probe direction. `ALL` lists them in the order probes are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Unit step in this direction (y grows upwards).
    #[inline]
    pub fn unit(self) -> Vector2<f64> {
        match self {
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Up => Vector2::new(0.0, 1.0),
            Direction::Right => Vector2::new(1.0, 0.0),
            Direction::Down => Vector2::new(0.0, -1.0),
        }
    }

    /// Whether `p` lies on this side of `anchor` (inclusive).
    #[inline]
    pub fn admits(self, anchor: Vector2<f64>, p: Vector2<f64>) -> bool {
        match self {
            Direction::Left => p.x <= anchor.x,
            Direction::Up => p.y >= anchor.y,
            Direction::Right => p.x >= anchor.x,
            Direction::Down => p.y <= anchor.y,
        }
    }
}
