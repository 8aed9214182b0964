//! Polygon with rank-compressed coordinates and four-probe containment.
//!
//! Model
//! - Vertices are kept in original coordinates. Their quantized x and y keys
//!   seed two sorted axes; a vertex's indexed position is the pair of ranks.
//! - Edges are `Ray`s between consecutive indexed vertices (cyclic). They are
//!   rebuilt whenever an axis grows, so edges and queries always share one
//!   indexed space.
//! - `inside` casts four axial probes from the indexed query point. The point is
//!   inside iff every probe crosses at least one edge. The polygon is closed:
//!   vertices and points on edges count as inside.
//!
//! Caveats
//! - The four-probe rule is exact for polygons that are monotone in both axes
//!   (e.g. histograms, convex polygons). Spiral-like polygons can enclose an
//!   outside point in all four directions.
//! - Rank compression is monotone per axis, which preserves containment for
//!   rectilinear polygons only. With diagonal edges, answers may change as
//!   the axes grow; the memo keeps the first answer.
//! - Degenerate input (repeated consecutive vertices, zero-area polygons) is
//!   accepted and yields defined but meaningless answers.

use std::collections::HashMap;

use nalgebra::Vector2;

use super::axis::Axis;
use super::ray::Ray;
use super::types::{Direction, PolygonCfg};

type Key = (i64, i64);

/// Simple polygon with memoized point containment.
#[derive(Clone, Debug)]
pub struct Polygon {
    cfg: PolygonCfg,
    vertices: Vec<Vector2<f64>>,
    vertex_keys: Vec<Key>,
    xs: Axis,
    ys: Axis,
    edges: Vec<Ray>,
    cache: HashMap<Key, bool>,
}

/// Axis-aligned box spanned by two polygon vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsideBox {
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
    /// Inclusive tile area `(|dx| + 1) * (|dy| + 1)`.
    pub area: f64,
}

impl Polygon {
    /// Build from vertices in boundary order.
    ///
    /// None if there are fewer than three vertices or a coordinate cannot be
    /// quantized (non-finite, or too large for `cfg.precision`).
    pub fn new(vertices: &[Vector2<f64>], cfg: PolygonCfg) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let vertex_keys = vertices
            .iter()
            .map(|v| Some((cfg.key_of(v.x)?, cfg.key_of(v.y)?)))
            .collect::<Option<Vec<Key>>>()?;
        let xs = Axis::from_keys(vertex_keys.iter().map(|k| k.0));
        let ys = Axis::from_keys(vertex_keys.iter().map(|k| k.1));
        let mut poly = Self {
            cfg,
            vertices: vertices.to_vec(),
            vertex_keys,
            xs,
            ys,
            edges: Vec::with_capacity(vertices.len()),
            cache: HashMap::new(),
        };
        poly.rebuild_edges();
        tracing::debug!(
            vertices = poly.vertices.len(),
            xs = poly.xs.len(),
            ys = poly.ys.len(),
            "polygon built"
        );
        Some(poly)
    }

    #[inline]
    pub fn cfg(&self) -> PolygonCfg {
        self.cfg
    }
    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }
    /// Boundary edges in the current indexed space.
    #[inline]
    pub fn edges(&self) -> &[Ray] {
        &self.edges
    }
    #[inline]
    pub fn x_axis(&self) -> &Axis {
        &self.xs
    }
    #[inline]
    pub fn y_axis(&self) -> &Axis {
        &self.ys
    }
    /// Registered x coordinates, ascending.
    pub fn xs(&self) -> Vec<f64> {
        self.xs.keys().iter().map(|&k| self.cfg.value_of(k)).collect()
    }
    /// Registered y coordinates, ascending.
    pub fn ys(&self) -> Vec<f64> {
        self.ys.keys().iter().map(|&k| self.cfg.value_of(k)).collect()
    }

    /// Register many coordinates at once. Returns whether an axis grew.
    ///
    /// Coordinates that cannot be quantized are skipped.
    pub fn add_coords(&mut self, coords: &[Vector2<f64>]) -> bool {
        let cfg = self.cfg;
        let grew_x = self.xs.merge(coords.iter().filter_map(|p| cfg.key_of(p.x)));
        let grew_y = self.ys.merge(coords.iter().filter_map(|p| cfg.key_of(p.y)));
        if grew_x || grew_y {
            self.rebuild_edges();
            tracing::debug!(xs = self.xs.len(), ys = self.ys.len(), "axes merged");
        }
        grew_x || grew_y
    }

    /// Indexed coordinates of `p`, registering its coordinates if new.
    ///
    /// Registering a coordinate shifts the rank of every larger coordinate on
    /// that axis; ranks obtained earlier are stale afterwards.
    pub fn to_indexed(&mut self, p: Vector2<f64>) -> Option<(usize, usize)> {
        let key = self.key_of_point(p)?;
        Some(self.index_key(key))
    }

    /// Point containment (closed), memoized on the quantized point.
    ///
    /// Points that cannot be quantized are outside.
    pub fn inside(&mut self, p: Vector2<f64>) -> bool {
        let Some(key) = self.key_of_point(p) else {
            return false;
        };
        if let Some(&hit) = self.cache.get(&key) {
            tracing::trace!(x = p.x, y = p.y, hit, "inside cache hit");
            return hit;
        }
        let (ix, iy) = self.index_key(key);
        let hit = self.probe(Vector2::new(ix as f64, iy as f64));
        self.cache.insert(key, hit);
        hit
    }

    /// Read-only containment for already registered coordinates.
    ///
    /// None if either coordinate is not on its axis. Use `add_coords` up front
    /// to classify from several threads through a shared reference.
    pub fn contains_registered(&self, p: Vector2<f64>) -> Option<bool> {
        let key = self.key_of_point(p)?;
        if let Some(&hit) = self.cache.get(&key) {
            return Some(hit);
        }
        let ix = self.xs.rank(key.0)?;
        let iy = self.ys.rank(key.1)?;
        Some(self.probe(Vector2::new(ix as f64, iy as f64)))
    }

    /// Whether the axis-aligned rectangle with corners `a` and `b` lies inside.
    ///
    /// Checks the half-index lattice of the rectangle (grid points, edge
    /// midpoints, cell centres). Exact for rectilinear polygons.
    pub fn contains_box(&mut self, a: Vector2<f64>, b: Vector2<f64>) -> bool {
        let (Some(ka), Some(kb)) = (self.key_of_point(a), self.key_of_point(b)) else {
            return false;
        };
        // register both corners before reading ranks; the second insert may
        // shift the first corner's ranks
        self.index_key(ka);
        self.index_key(kb);
        let (ax, ay) = (self.xs.lower_bound(ka.0), self.ys.lower_bound(ka.1));
        let (bx, by) = (self.xs.lower_bound(kb.0), self.ys.lower_bound(kb.1));
        let (x0, x1) = (ax.min(bx), ax.max(bx));
        let (y0, y1) = (ay.min(by), ay.max(by));
        for i in 2 * x0..=2 * x1 {
            for j in 2 * y0..=2 * y1 {
                let hit = if i % 2 == 0 && j % 2 == 0 {
                    self.inside_rank(i / 2, j / 2)
                } else {
                    self.probe(Vector2::new(i as f64 / 2.0, j as f64 / 2.0))
                };
                if !hit {
                    return false;
                }
            }
        }
        true
    }

    /// Largest box spanned by two vertices that lies inside, by tile area.
    pub fn largest_inside_box(&mut self) -> Option<InsideBox> {
        let verts = self.vertices.clone();
        let mut candidates = Vec::with_capacity(verts.len() * verts.len().saturating_sub(1) / 2);
        for (i, &a) in verts.iter().enumerate() {
            for &b in &verts[i + 1..] {
                let area = ((b.x - a.x).abs() + 1.0) * ((b.y - a.y).abs() + 1.0);
                candidates.push(InsideBox { a, b, area });
            }
        }
        candidates.sort_by(|l, r| r.area.total_cmp(&l.area));
        candidates.into_iter().find(|c| self.contains_box(c.a, c.b))
    }

    /// Drop all memoized answers.
    pub fn clear_cache(&mut self) {
        tracing::debug!(entries = self.cache.len(), "inside cache cleared");
        self.cache.clear();
    }

    #[inline]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    fn key_of_point(&self, p: Vector2<f64>) -> Option<Key> {
        Some((self.cfg.key_of(p.x)?, self.cfg.key_of(p.y)?))
    }

    fn index_key(&mut self, key: Key) -> (usize, usize) {
        let (ix, grew_x) = self.xs.find_or_insert(key.0);
        let (iy, grew_y) = self.ys.find_or_insert(key.1);
        if grew_x || grew_y {
            self.rebuild_edges();
        }
        (ix, iy)
    }

    /// Memoized containment of the lattice point `(ix, iy)`.
    fn inside_rank(&mut self, ix: usize, iy: usize) -> bool {
        let key = match (self.xs.key(ix), self.ys.key(iy)) {
            (Some(kx), Some(ky)) => (kx, ky),
            _ => return false,
        };
        if let Some(&hit) = self.cache.get(&key) {
            return hit;
        }
        let hit = self.probe(Vector2::new(ix as f64, iy as f64));
        self.cache.insert(key, hit);
        hit
    }

    /// Four-probe test of an indexed anchor against the current edges.
    fn probe(&self, anchor: Vector2<f64>) -> bool {
        let eps = self.cfg.epsilon;
        let probes = Direction::ALL.map(|d| Ray::probe(anchor, d, eps));
        let mut hits = [false; 4];
        for edge in &self.edges {
            for (hit, probe) in hits.iter_mut().zip(&probes) {
                if !*hit && probe.intersects(edge) {
                    *hit = true;
                }
            }
            if hits.iter().all(|&h| h) {
                return true;
            }
        }
        false
    }

    fn rebuild_edges(&mut self) {
        let pts: Vec<Vector2<f64>> = self
            .vertex_keys
            .iter()
            .map(|&(kx, ky)| {
                debug_assert!(self.xs.rank(kx).is_some() && self.ys.rank(ky).is_some());
                Vector2::new(
                    self.xs.lower_bound(kx) as f64,
                    self.ys.lower_bound(ky) as f64,
                )
            })
            .collect();
        let eps = self.cfg.epsilon;
        let n = pts.len();
        self.edges.clear();
        self.edges
            .extend((0..n).map(|i| Ray::edge(pts[i], pts[(i + 1) % n], eps)));
        tracing::trace!(edges = n, "edges rebuilt");
    }
}
