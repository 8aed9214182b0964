//! 2D lines, bounded rays, and polygons with four-probe containment.
//!
//! Purpose
//! - `Line`: infinite line `a·x + b·y = c` with an explicit tolerance.
//! - `Ray`: a `Line` restricted by a `Bound` (edge box or probe half-line).
//! - `Polygon`: vertices, rank-compressed axes, boundary rays, and a memoized
//!   `inside` test that casts four axial probes.
//!
//! Numerics
//! - All predicates use `PolygonCfg::epsilon` without normalization.
//! - Polygon coordinates are quantized to `PolygonCfg::precision` decimals and
//!   compared exactly as integer keys.
//!
//! Code cross-refs: `Axis`, `Bound`, `Direction`, `PolygonCfg`

mod axis;
mod line;
mod polygon;
mod ray;
mod types;

pub use axis::Axis;
pub use line::Line;
pub use polygon::{InsideBox, Polygon};
pub use ray::{Bound, Ray, PROBE_OFFSET};
pub use types::{Direction, PolygonCfg, MAX_PRECISION};
