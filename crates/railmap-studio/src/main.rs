mod camera;
mod poller;
mod viewer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use railmap_engine::device::GpuInit;
use railmap_engine::logging::{init_logging, LoggingConfig};
use railmap_engine::window::{Runtime, RuntimeConfig};
use railmap_trains::prelude::*;

use crate::poller::SnapshotPoller;
use crate::viewer::Viewer;

/// Draws live train snapshots as map overlays.
#[derive(Parser, Debug)]
#[command(name = "railmap", about, version, long_about = None)]
struct Args {
    /// Overlay configuration (JSON). Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Train snapshot file (JSON), re-read every update interval.
    #[arg(short, long)]
    trains: PathBuf,

    /// World shown on the map.
    #[arg(short, long, default_value = "world")]
    world: String,

    /// Sync once, log every placement and exit without opening a window.
    #[arg(long)]
    headless: bool,

    /// Outline each train's bounds.
    #[arg(long)]
    show_bounds: bool,

    /// More logging; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::default().with_verbosity(args.verbose));

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let config = Arc::new(config);
    let map = StaticMap::new(args.world.as_str(), DynmapProjection::from(&config.projection));

    if config.dimension_for(&args.world).is_none() {
        log::warn!("world {} has no dimension mapping; nothing will be drawn", args.world);
    }

    if args.headless {
        return run_headless(&args, config, &map);
    }

    let poller = SnapshotPoller::new(args.trains.clone(), config.poll_interval());
    let viewer = Viewer::new(map, TrainLayer::new(config), poller, args.show_bounds);

    Runtime::run(
        RuntimeConfig {
            title: format!("railmap: {}", args.world),
            initial_size: LogicalSize::new(1280.0, 800.0),
        },
        GpuInit {
            present_mode: wgpu::PresentMode::AutoVsync,
            ..Default::default()
        },
        viewer,
    )
}

fn run_headless(args: &Args, config: Arc<Config>, map: &StaticMap) -> Result<()> {
    let snapshot = TrainsResponse::load(&args.trains)
        .with_context(|| format!("failed to read trains from {}", args.trains.display()))?;

    let mut layer = TrainLayer::new(config);
    let stats = layer.sync(&snapshot, map);
    log::info!("{} train(s) synced on {}", stats.updated, map.world_name());

    let mut surfaces: Vec<_> = layer.surfaces().collect();
    surfaces.sort_unstable_by_key(|(id, _)| *id);

    for (id, surface) in surfaces {
        let Some(extent) = surface.hidden_bbox() else {
            log::info!("train {id}: not on this map");
            continue;
        };
        let bounds = surface.bounds();
        log::info!(
            "train {id}: {} car(s), extent {:?}, bounds sw {} ne {}, origin {}",
            surface.slot_count(),
            extent,
            bounds.south_west,
            bounds.north_east,
            surface.transform_origin(),
        );

        for (i, slot) in surface.slots().iter().enumerate() {
            log::debug!("  car {i}: d=\"{}\"", slot.visible.path().to_svg_d());
        }
    }

    Ok(())
}
