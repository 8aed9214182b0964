//! Loading polygons and query points from disk.
//!
//! - JSON: an array of `[x, y]` pairs (polygons and points).
//! - CSV: columns `x` and `y` with a header row (points only), read via polars.

use anyhow::{bail, Context, Result};
use nalgebra::Vector2;
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Polygon vertices in boundary order.
pub fn read_polygon(path: &Path) -> Result<Vec<Vector2<f64>>> {
    read_json_pairs(path)
}

/// Query points; `.csv` goes through polars, anything else is JSON.
pub fn read_points(path: &Path) -> Result<Vec<Vector2<f64>>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_csv_points(path),
        _ => read_json_pairs(path),
    }
}

fn read_json_pairs(path: &Path) -> Result<Vec<Vector2<f64>>> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let pairs: Vec<[f64; 2]> = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing {} as [[x, y], ...]", path.display()))?;
    Ok(pairs.into_iter().map(|[x, y]| Vector2::new(x, y)).collect())
}

fn read_csv_points(path: &Path) -> Result<Vec<Vector2<f64>>> {
    let df = LazyCsvReader::new(path)
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns from {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "points_csv");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(x), Some(y)) => Ok(Vector2::new(x, y)),
            _ => bail!("{}: row {row} is missing a coordinate", path.display()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_pairs_round_into_points() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poly.json");
        fs::write(&path, "[[0, 0], [4, 0], [4, 4.5]]").unwrap();
        let pts = read_polygon(&path).unwrap();
        assert_eq!(pts, vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 0.0),
            Vector2::new(4.0, 4.5)
        ]);
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[[0, 0], [4]]").unwrap();
        let err = read_points(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn csv_points_cast_integer_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.csv");
        fs::write(&path, "x,y\n1,2\n3.5,-1\n").unwrap();
        let pts = read_points(&path).unwrap();
        assert_eq!(pts, vec![Vector2::new(1.0, 2.0), Vector2::new(3.5, -1.0)]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_points(&dir.path().join("nope.json")).is_err());
    }
}
