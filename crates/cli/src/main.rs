use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nalgebra::Vector2;
use polyprobe::geom::{InsideBox, Polygon, PolygonCfg, MAX_PRECISION, PROBE_OFFSET};
use polyprobe::sampling::{draw_histogram, HistogramCfg, ReplayToken};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Point-in-polygon classification by four-direction ray casting")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Tolerances shared by commands that build a polygon.
#[derive(Args, Clone, Copy, Debug)]
struct Tolerance {
    /// Slack for line membership and parallel tests
    #[arg(long, default_value_t = PolygonCfg::default().epsilon)]
    epsilon: f64,
    /// Decimal digits kept when comparing coordinates
    #[arg(
        long,
        default_value_t = PolygonCfg::default().precision,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_PRECISION))
    )]
    precision: u8,
}

impl From<Tolerance> for PolygonCfg {
    fn from(t: Tolerance) -> Self {
        PolygonCfg {
            epsilon: t.epsilon,
            precision: t.precision,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Classify query points against a polygon
    Classify {
        /// JSON array of [x, y] vertices in boundary order
        #[arg(long)]
        polygon: PathBuf,
        /// JSON array of [x, y] pairs, or CSV with x,y columns
        #[arg(long)]
        points: PathBuf,
        /// Write results here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        tol: Tolerance,
    },
    /// Largest box spanned by two vertices that lies inside the polygon
    LargestBox {
        #[arg(long)]
        polygon: PathBuf,
        #[command(flatten)]
        tol: Tolerance,
    },
    /// Print a random histogram polygon as JSON
    Sample {
        #[arg(long, default_value_t = 8)]
        columns: usize,
        #[arg(long, default_value_t = 4)]
        max_width: u32,
        #[arg(long, default_value_t = 10)]
        max_height: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
    },
    /// Print version and default configuration
    Report,
}

#[derive(Debug, PartialEq, Serialize)]
struct Classified {
    x: f64,
    y: f64,
    inside: bool,
}

#[derive(Debug, PartialEq, Serialize)]
struct BoxOut {
    a: [f64; 2],
    b: [f64; 2],
    area: f64,
}

impl From<InsideBox> for BoxOut {
    fn from(b: InsideBox) -> Self {
        Self {
            a: [b.a.x, b.a.y],
            b: [b.b.x, b.b.y],
            area: b.area,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Classify {
            polygon,
            points,
            out,
            tol,
        } => run_classify(&polygon, &points, out.as_deref(), tol.into()),
        Action::LargestBox { polygon, tol } => run_largest_box(&polygon, tol.into()),
        Action::Sample {
            columns,
            max_width,
            max_height,
            seed,
            index,
        } => sample(
            HistogramCfg {
                columns,
                max_width,
                max_height,
            },
            ReplayToken { seed, index },
        ),
        Action::Report => report(),
    }
}

fn build_polygon(path: &Path, cfg: PolygonCfg) -> Result<Polygon> {
    let vertices = input::read_polygon(path)?;
    Polygon::new(&vertices, cfg).with_context(|| {
        format!(
            "{}: need at least three vertices with finite coordinates representable at precision {}",
            path.display(),
            cfg.precision
        )
    })
}

fn classify(poly: &mut Polygon, points: &[Vector2<f64>]) -> Vec<Classified> {
    // one bulk merge instead of an edge rebuild per new coordinate
    poly.add_coords(points);
    points
        .iter()
        .map(|p| Classified {
            x: p.x,
            y: p.y,
            inside: poly.inside(*p),
        })
        .collect()
}

fn run_classify(
    polygon: &Path,
    points: &Path,
    out: Option<&Path>,
    cfg: PolygonCfg,
) -> Result<()> {
    tracing::info!(
        polygon = %polygon.display(),
        points = %points.display(),
        epsilon = cfg.epsilon,
        precision = cfg.precision,
        "classify"
    );
    let mut poly = build_polygon(polygon, cfg)?;
    let queries = input::read_points(points)?;
    let results = classify(&mut poly, &queries);
    let inside = results.iter().filter(|r| r.inside).count();
    tracing::info!(queries = results.len(), inside, "classified");
    let body = serde_json::to_vec_pretty(&results)?;
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
            }
            fs::write(out, body).with_context(|| format!("writing {}", out.display()))?;
            let summary =
                provenance::ClassifySummary::new(polygon, points, &poly, results.len(), inside);
            provenance::write_sidecar(out, &summary)?;
        }
        None => println!("{}", String::from_utf8_lossy(&body)),
    }
    Ok(())
}

fn largest_box(polygon: &Path, cfg: PolygonCfg) -> Result<Option<BoxOut>> {
    let mut poly = build_polygon(polygon, cfg)?;
    let best = poly.largest_inside_box().map(BoxOut::from);
    tracing::info!(found = best.is_some(), "largest box");
    Ok(best)
}

fn run_largest_box(polygon: &Path, cfg: PolygonCfg) -> Result<()> {
    tracing::info!(polygon = %polygon.display(), "largest_box");
    let best = largest_box(polygon, cfg)?;
    println!("{}", serde_json::to_string_pretty(&best)?);
    Ok(())
}

fn sample_vertices(cfg: HistogramCfg, tok: ReplayToken) -> Vec<[f64; 2]> {
    draw_histogram(cfg, tok)
        .vertices()
        .iter()
        .map(|v| [v.x, v.y])
        .collect()
}

fn sample(cfg: HistogramCfg, tok: ReplayToken) -> Result<()> {
    tracing::info!(
        columns = cfg.columns,
        seed = tok.seed,
        index = tok.index,
        "sample"
    );
    println!("{}", serde_json::to_string(&sample_vertices(cfg, tok))?);
    Ok(())
}

fn report_doc() -> serde_json::Value {
    let cfg = PolygonCfg::default();
    serde_json::json!({
        "code_rev": provenance::code_rev(),
        "polyprobe": polyprobe::VERSION,
        "defaults": {
            "epsilon": cfg.epsilon,
            "precision": cfg.precision,
            "max_precision": MAX_PRECISION,
            "probe_offset": PROBE_OFFSET,
        }
    })
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&report_doc())?);
    Ok(())
}
