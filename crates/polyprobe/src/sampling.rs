//! Random rectilinear "histogram" polygons (replayable draws + exact oracle).
//!
//! Purpose
//! - Provide a small deterministic sampler for test and bench polygons whose
//!   containment is known exactly, so `Polygon::inside` can be checked against
//!   ground truth.
//!
//! Model
//! - `columns` adjacent columns of random integer width standing on `y = 0`,
//!   each with a random integer height different from its left neighbour.
//! - The boundary runs along the floor from left to right, then back along the
//!   tops, so consecutive vertices never coincide.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{Polygon, PolygonCfg};

/// Histogram sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct HistogramCfg {
    /// Number of columns. Clamped to at least 1.
    pub columns: usize,
    /// Column widths are drawn from `1..=max_width`. Clamped so the right end
    /// of the last column stays within `u32::MAX`.
    pub max_width: u32,
    /// Column heights are drawn from `1..=max_height`. Clamped to at least 2 so
    /// neighbouring columns can differ.
    pub max_height: u32,
}

impl Default for HistogramCfg {
    fn default() -> Self {
        Self {
            columns: 8,
            max_width: 4,
            max_height: 10,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Columns on the floor `y = 0`.
///
/// Invariants (checked by `new`): at least one column,
/// `bounds.len() == heights.len() + 1`, bounds finite and strictly increasing,
/// heights finite and positive with no two neighbours equal.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bounds: Vec<f64>,
    heights: Vec<f64>,
}

impl Histogram {
    /// None if the columns break an invariant.
    pub fn new(bounds: Vec<f64>, heights: Vec<f64>) -> Option<Self> {
        let valid = !heights.is_empty()
            && bounds.len() == heights.len() + 1
            && bounds.iter().all(|b| b.is_finite())
            && bounds.windows(2).all(|w| w[0] < w[1])
            && heights.iter().all(|&h| h.is_finite() && h > 0.0)
            && heights.windows(2).all(|w| w[0] != w[1]);
        valid.then_some(Self { bounds, heights })
    }

    #[inline]
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }
    #[inline]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Boundary vertices: floor left to right, then the tops right to left.
    pub fn vertices(&self) -> Vec<Vector2<f64>> {
        let n = self.heights.len();
        let mut out = Vec::with_capacity(2 * n + 2);
        out.push(Vector2::new(self.bounds[0], 0.0));
        out.push(Vector2::new(self.bounds[n], 0.0));
        for i in (0..n).rev() {
            out.push(Vector2::new(self.bounds[i + 1], self.heights[i]));
            out.push(Vector2::new(self.bounds[i], self.heights[i]));
        }
        out
    }

    /// Exact closed containment.
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        let n = self.heights.len();
        if p.y < 0.0 || p.x < self.bounds[0] || p.x > self.bounds[n] {
            return false;
        }
        let top = (0..n)
            .filter(|&i| self.bounds[i] <= p.x && p.x <= self.bounds[i + 1])
            .map(|i| self.heights[i])
            .fold(f64::NEG_INFINITY, f64::max);
        p.y <= top
    }

    #[inline]
    pub fn polygon(&self, cfg: PolygonCfg) -> Option<Polygon> {
        Polygon::new(&self.vertices(), cfg)
    }

    /// Largest `y` reached by any column.
    pub fn max_height(&self) -> f64 {
        self.heights.iter().copied().fold(0.0, f64::max)
    }

    /// Right end of the last column.
    pub fn width(&self) -> f64 {
        self.bounds[self.bounds.len() - 1] - self.bounds[0]
    }
}

/// Draw a random histogram polygon starting at `x = 0`.
pub fn draw_histogram(cfg: HistogramCfg, tok: ReplayToken) -> Histogram {
    let mut rng = tok.to_std_rng();
    let n = cfg.columns.max(1);
    // keep the right end within u32 for any column count
    let width_cap = u32::try_from(u32::MAX as usize / n).unwrap_or(u32::MAX);
    let max_w = cfg.max_width.clamp(1, width_cap.max(1));
    let max_h = cfg.max_height.max(2);
    let mut bounds = Vec::with_capacity(n + 1);
    let mut x = 0u64;
    bounds.push(0.0);
    for _ in 0..n {
        x += u64::from(rng.gen_range(1..=max_w));
        bounds.push(x as f64);
    }
    let mut heights: Vec<f64> = Vec::with_capacity(n);
    let mut prev = 0u32;
    for _ in 0..n {
        let h = if prev == 0 {
            rng.gen_range(1..=max_h)
        } else {
            // draw from the remaining max_h - 1 values, skipping `prev`
            let r = rng.gen_range(1..max_h);
            if r >= prev {
                r + 1
            } else {
                r
            }
        };
        heights.push(h as f64);
        prev = h;
    }
    Histogram { bounds, heights }
}
