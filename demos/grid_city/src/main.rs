//! grid_city — smallest example for the trip-planning core.
//!
//! Loads a 3×3 downtown grid from embedded CSV, then routes from the
//! north-east corner (maple_1st) to the south-west corner (broad_3rd) on
//! foot and by car.  Cars are barred from three turns, so the two routes
//! differ.
//!
//! ```text
//! cargo run -p grid_city -- [preferences.json] [output_dir]
//! ```
//!
//! `preferences.json` holds `RoutingPreferences` fields; missing fields keep
//! their defaults.  With `output_dir`, the car search is traced to
//! `search_trace.csv` and graph issues go to `issues.csv` and
//! `issues.geojson`.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use tp_core::TraverseMode;
use tp_output::{
    CsvIssueWriter, CsvTraceWriter, GeoJsonIssueWriter, IssueSummary, TraceObserver,
};
use tp_search::{
    route_batch, AStar, AStarRouter, RouteOutcome, RouteRequest, RoutingPreferences,
    SimpleIntersectionTraversalCalculator,
};
use tp_street::{load_graph_readers, StreetGraph};

// ── Network CSV ───────────────────────────────────────────────────────────────

// Avenues run north-south (maple, main, broad); streets east-west (1st..3rd).
const VERTICES_CSV: &str = "\
label,lat,lon,barrier,denied,traffic_signal\n\
maple_1st,39.9620,-83.0000,,,false\n\
maple_2nd,39.9610,-83.0000,,,false\n\
maple_3rd,39.9600,-83.0000,,,false\n\
main_1st,39.9620,-83.0012,,,true\n\
main_2nd,39.9610,-83.0012,,,true\n\
main_3rd,39.9600,-83.0012,bollard,,false\n\
broad_1st,39.9620,-83.0024,,,false\n\
broad_2nd,39.9610,-83.0024,,,false\n\
broad_3rd,39.9600,-83.0024,,,false\n\
";

const EDGES_CSV: &str = "\
from,to,length_m,permission,name,reluctance,walk_speed,bicycle_speed,car_speed,bidirectional\n\
maple_1st,maple_2nd,111,ALL,maple_ave,,,,11.2,true\n\
maple_2nd,maple_3rd,111,ALL,maple_ave,,,,11.2,true\n\
main_1st,main_2nd,111,ALL,main_st,,,,13.4,true\n\
main_2nd,main_3rd,111,ALL,main_st,,,,13.4,true\n\
broad_1st,broad_2nd,111,ALL,broad_st,,,,11.2,true\n\
broad_2nd,broad_3rd,111,ALL,broad_st,,,,11.2,true\n\
maple_1st,main_1st,103,ALL,first_st,,,,11.2,true\n\
main_1st,broad_1st,103,ALL,first_st,,,,11.2,true\n\
maple_2nd,main_2nd,103,ALL,second_st,,,,11.2,true\n\
main_2nd,broad_2nd,103,ALL,second_st,,,,11.2,true\n\
maple_3rd,main_3rd,103,ALL,third_st,1.5,,,8.9,true\n\
main_3rd,broad_3rd,103,PEDESTRIAN,third_st,,,,,true\n\
";

const RESTRICTIONS_CSV: &str = "\
from,via,to,kind,modes,start_secs,end_secs\n\
maple_1st,main_1st,main_2nd,no_turn,car,,\n\
maple_2nd,main_2nd,main_3rd,no_turn,car,25200,36000\n\
main_2nd,broad_2nd,broad_1st,no_turn,car,,\n\
";

/// 08:30, inside the morning window of the second restriction.
const DEPARTURE_SECS: u32 = 8 * 3_600 + 30 * 60;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_preferences(path: Option<&Path>) -> Result<RoutingPreferences> {
    let Some(path) = path else {
        return Ok(RoutingPreferences::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading preferences {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing preferences {}", path.display()))
}

fn print_outcome(graph: &StreetGraph, mode: TraverseMode, outcome: &RouteOutcome) {
    match outcome {
        RouteOutcome::Found(path) => {
            println!(
                "{:<8} {:>6} s  weight {:>8.1}  {}",
                mode.as_str(),
                path.duration(),
                path.weight(),
                path.labels(graph).join(" -> ")
            );
        }
        RouteOutcome::NotFound => println!("{:<8} no route", mode.as_str()),
        RouteOutcome::Canceled => println!("{:<8} canceled", mode.as_str()),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let prefs_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map(PathBuf::from);

    println!("=== grid_city — trip-planning core ===");

    // 1. Load the street graph.
    let graph = load_graph_readers(
        Cursor::new(VERTICES_CSV),
        Cursor::new(EDGES_CSV),
        Some(Cursor::new(RESTRICTIONS_CSV)),
    )?;
    println!(
        "Street graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let summary = IssueSummary::from_graph(&graph);
    if !summary.is_empty() {
        summary.log_summary();
    }

    // 2. Requests.
    let prefs = load_preferences(prefs_path.as_deref())?;
    let calculator = Arc::new(SimpleIntersectionTraversalCalculator::default());
    let from = graph.vertex_by_label("maple_1st").context("missing maple_1st")?;
    let to = graph.vertex_by_label("broad_3rd").context("missing broad_3rd")?;
    let requests: Vec<RouteRequest> = TraverseMode::ALL
        .into_iter()
        .map(|mode| {
            RouteRequest::new(from, to, mode)
                .with_preferences(prefs.clone())
                .with_calculator(calculator.clone())
                .with_departure_secs(DEPARTURE_SECS)
        })
        .collect();

    // 3. Route every mode.
    let t0 = Instant::now();
    let outcomes = route_batch(&AStarRouter::new(), &graph, &requests);
    println!("Routed {} requests in {:.3} ms", requests.len(), t0.elapsed().as_secs_f64() * 1e3);
    println!();
    for (req, outcome) in requests.iter().zip(&outcomes) {
        match outcome {
            Ok(outcome) => print_outcome(&graph, req.mode, outcome),
            Err(e) => println!("{:<8} error: {e}", req.mode.as_str()),
        }
    }

    // 4. Optional trace and issue files.
    let Some(out_dir) = out_dir else {
        return Ok(());
    };
    std::fs::create_dir_all(&out_dir)?;

    let car = requests
        .iter()
        .find(|r| r.mode == TraverseMode::Car)
        .context("no car request")?;
    let mut obs = TraceObserver::new(CsvTraceWriter::new(&out_dir)?);
    AStar::new(&graph, car).search_observed(&mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("trace error: {e}");
    }
    if let Some(stats) = obs.stats() {
        println!();
        println!(
            "Car search: {} expanded, {} states, {} rejected by permission, {} by restriction",
            stats.expanded, stats.created, stats.rejected_permission, stats.rejected_restriction
        );
    }

    summary.write_to(&mut CsvIssueWriter::new(&out_dir)?)?;
    summary.write_to(&mut GeoJsonIssueWriter::new(&out_dir))?;
    println!("Wrote search_trace.csv, issues.csv and issues.geojson to {}", out_dir.display());

    Ok(())
}
