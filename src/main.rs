use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use roadpath::loader::{self, FileFormat};
use roadpath::{FrontierKind, NearestStrategy, Position, Router, RouterOptions, SearchOptions};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] loader::LoadError);

#[derive(Parser)]
struct Cli {
    /// The path to the JSON graph file (optionally gzip or bzip2 compressed)
    graph_file: PathBuf,

    /// Latitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lat: f64,

    /// Longitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lon: f64,

    /// Latitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lat: f64,

    /// Longitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lon: f64,

    /// Snap points to nodes using a k-d tree instead of a linear scan
    #[arg(long)]
    kd_tree: bool,

    /// Use a binary heap for the A* open set instead of a linear scan
    #[arg(long)]
    heap: bool,

    /// Maximum number of node expansions
    #[arg(long, default_value_t = roadpath::DEFAULT_STEP_LIMIT)]
    step_limit: usize,
}

impl Cli {
    fn router_options(&self) -> RouterOptions {
        RouterOptions {
            nearest: if self.kd_tree {
                NearestStrategy::KdTree
            } else {
                NearestStrategy::Linear
            },
            search: SearchOptions {
                frontier: if self.heap {
                    FrontierKind::Heap
                } else {
                    FrontierKind::Linear
                },
                step_limit: self.step_limit,
            },
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = loader::load_graph_from_file(&cli.graph_file, FileFormat::Unknown)
        .map_err(|e| GraphLoadError(cli.graph_file.clone(), e))?;
    let router = Router::with_options(g, cli.router_options());

    let route = router.find_path(
        Position::new(cli.start_lat, cli.start_lon),
        Position::new(cli.end_lat, cli.end_lon),
    )?;

    let features = if route.is_found() {
        log::info!("route found: {:.2} km", route.cost);
        let coordinates: Vec<[f64; 2]> = route.path.iter().map(|p| [p.lon, p.lat]).collect();
        vec![serde_json::json!({
            "type": "Feature",
            "properties": {
                "distance_km": route.cost,
                "nodes": route.nodes,
            },
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
        })]
    } else {
        log::warn!("no route between the given points");
        Vec::default()
    };

    let collection = serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    });
    println!("{}", serde_json::to_string_pretty(&collection)?);

    Ok(())
}
