//! Point-in-polygon classification by four-direction ray casting.
//!
//! Layers
//! - `geom`: lines, bounded rays, and polygons over rank-compressed axes.
//! - `sampling`: replayable random rectilinear polygons with an exact oracle.
//!
//! API Policy
//! - Small and explicit. Constructors that can fail return `Option`; nothing
//!   in the library panics on caller input.

pub mod geom;
pub mod sampling;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Line, Polygon, PolygonCfg, Ray};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        Axis, Bound, Direction, InsideBox, Line, Polygon, PolygonCfg, Ray, PROBE_OFFSET,
    };
    pub use crate::sampling::{draw_histogram, Histogram, HistogramCfg, ReplayToken};
    pub use nalgebra::Vector2 as Vec2;
}
