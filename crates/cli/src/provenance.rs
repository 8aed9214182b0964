//! `<stem>.provenance.json`: what a `classify --out` run saw and answered.

use anyhow::{Context, Result};
use polyprobe::geom::{Polygon, PolygonCfg};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs, tolerances, and counts of one classification run.
#[derive(Debug, PartialEq, Serialize)]
pub struct ClassifySummary {
    pub polygon: String,
    pub points: String,
    pub epsilon: f64,
    pub precision: u8,
    /// Polygon vertex count.
    pub vertices: usize,
    /// Axis sizes after every query was registered.
    pub x_axis: usize,
    pub y_axis: usize,
    pub queries: usize,
    pub inside: usize,
}

impl ClassifySummary {
    pub fn new(polygon: &Path, points: &Path, poly: &Polygon, queries: usize, inside: usize) -> Self {
        let PolygonCfg { epsilon, precision } = poly.cfg();
        Self {
            polygon: polygon.to_string_lossy().into_owned(),
            points: points.to_string_lossy().into_owned(),
            epsilon,
            precision,
            vertices: poly.vertices().len(),
            x_axis: poly.x_axis().len(),
            y_axis: poly.y_axis().len(),
            queries,
            inside,
        }
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: &'static str,
    polyprobe: &'static str,
    output: String,
    classify: &'a ClassifySummary,
}

/// Write the sidecar next to `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, summary: &ClassifySummary) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let doc = Sidecar {
        code_rev: code_rev(),
        polyprobe: polyprobe::VERSION,
        output: artifact.to_string_lossy().into_owned(),
        classify: summary,
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "sidecar written");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "classify".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit baked in at build time through `GIT_COMMIT`.
pub fn code_rev() -> &'static str {
    match option_env!("GIT_COMMIT") {
        Some(rev) if !rev.is_empty() => rev,
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_output() {
        let derived = sidecar_path(Path::new("/tmp/output/inside.json"));
        assert_eq!(derived, Path::new("/tmp/output/inside.provenance.json"));
        let bare = sidecar_path(Path::new("res/inside"));
        assert_eq!(bare, Path::new("res/inside.provenance.json"));
    }

    #[test]
    fn summary_counts_polygon_and_axes() {
        let cfg = PolygonCfg {
            epsilon: 0.01,
            precision: 1,
        };
        let mut poly = Polygon::new(
            &[vector![0.0, 0.0], vector![4.0, 0.0], vector![4.0, 4.0], vector![0.0, 4.0]],
            cfg,
        )
        .unwrap();
        poly.add_coords(&[vector![2.0, 2.0], vector![2.0, 9.0]]);
        let s = ClassifySummary::new(Path::new("sq.json"), Path::new("q.csv"), &poly, 2, 1);
        assert_eq!((s.vertices, s.x_axis, s.y_axis), (4, 3, 4));
        assert_eq!((s.epsilon, s.precision), (0.01, 1));

        let dir = tempdir().unwrap();
        let artifact = dir.path().join("inside.json");
        let path = write_sidecar(&artifact, &s).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["output"], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["polyprobe"], polyprobe::VERSION);
        assert_eq!(parsed["classify"]["queries"], 2);
        assert_eq!(parsed["classify"]["inside"], 1);
        assert_eq!(parsed["classify"]["polygon"], "sq.json");
    }
}
