//! Draw a few random histogram polygons and report their largest
//! vertex-spanned inside box.
//!
//! Usage:
//!   cargo run -p polyprobe --example histogram_boxes -- [columns]

use polyprobe::sampling::{draw_histogram, HistogramCfg, ReplayToken};
use polyprobe::PolygonCfg;

fn main() {
    let columns = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(6);
    let cfg = HistogramCfg {
        columns,
        ..HistogramCfg::default()
    };
    for index in 0..5 {
        let hist = draw_histogram(cfg, ReplayToken { seed: 2025, index });
        let Some(mut poly) = hist.polygon(PolygonCfg::default()) else {
            eprintln!("sample {index}: degenerate polygon");
            continue;
        };
        match poly.largest_inside_box() {
            Some(b) => println!(
                "sample {index}: V={}, best box ({}, {})-({}, {}) area={}",
                poly.vertices().len(),
                b.a.x,
                b.a.y,
                b.b.x,
                b.b.y,
                b.area
            ),
            None => println!("sample {index}: V={}, no inside box", poly.vertices().len()),
        }
    }
}
