//! railmap trains: live train snapshots as persistent map overlays, on top of `railmap-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::Path;
//! use railmap_trains::prelude::*;
//!
//! let config = Arc::new(Config::load(Path::new("railmap.json"))?);
//! let map = StaticMap::new("world", DynmapProjection::from(&config.projection));
//! let mut layer = TrainLayer::new(config);
//!
//! // Every poll:
//! let snapshot = TrainsResponse::load(Path::new("trains.json"))?;
//! layer.sync(&snapshot, &map);
//! for (id, surface) in layer.surfaces() {
//!     // Draw surface.slots() at surface.bounds().
//! }
//! ```
//!
//! Each train owns one [`Surface`](railmap_engine::scene::Surface). Slot `i` holds
//! car `i`'s visible polygon and a hidden twin used for bounds; slots are reused
//! across updates and never removed.

pub mod config;
pub mod error;
pub mod layer;
pub mod model;
pub mod projection;
pub mod renderer;

pub use config::{Config, ProjectionConfig};
pub use error::{ConfigError, SnapshotError};
pub use layer::{SyncStats, TrainLayer};
pub use model::{Car, Location, Train, TrainsResponse};
pub use projection::{DynmapProjection, MapHost, StaticMap};
pub use renderer::{car_outline, Arrow, TrainRenderer, TRAIN_OFFSET};

/// Convenience re-exports for hosts.
pub mod prelude {
    pub use crate::{
        Config, DynmapProjection, MapHost, StaticMap, SyncStats, Train, TrainLayer,
        TrainRenderer, TrainsResponse,
    };
}
