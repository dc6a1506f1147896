//! Wire model of the train snapshot service.

use std::path::Path;

use railmap_engine::coords::Point3;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

#[derive(Serialize, Deserialize)]
#[serde(remote = "Point3")]
struct Point3Def {
    x: f64,
    y: f64,
    z: f64,
}

/// A world position tagged with the dimension it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub dimension: String,
    #[serde(rename = "location", with = "Point3Def")]
    pub position: Point3,
}

impl Location {
    pub fn new(dimension: impl Into<String>, position: Point3) -> Self {
        Self { dimension: dimension.into(), position }
    }
}

/// Rigid segment between its leading and trailing bogey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: u64,
    pub leading: Location,
    pub trailing: Location,
}

/// Ordered cars moving as one unit.
///
/// Car 0 is the physical front. `backwards` flips which end leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub backwards: bool,
    #[serde(default)]
    pub stopped: bool,
}

impl Train {
    /// Index of the car at the front of travel, or `None` for stopped or empty trains.
    pub fn lead_car_index(&self) -> Option<usize> {
        if self.stopped || self.cars.is_empty() {
            return None;
        }
        Some(if self.backwards { self.cars.len() - 1 } else { 0 })
    }
}

/// Payload of one poll of the trains endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainsResponse {
    pub trains: Vec<Train>,
}

impl TrainsResponse {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
