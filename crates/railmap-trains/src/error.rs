use std::fmt;
use std::io;
use std::path::PathBuf;

use railmap_engine::paint::ColorParseError;

/// Error loading or validating a [`Config`](crate::Config).
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    InvalidColor { key: &'static str, source: ColorParseError },
    InvalidValue { key: &'static str, value: f64, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, .. } => write!(f, "cannot read config {}", path.display()),
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
            ConfigError::InvalidColor { key, source } => write!(f, "config `{key}`: {source}"),
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "config `{key}` = {value}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidColor { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

/// Error reading a train snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, .. } => write!(f, "cannot read snapshot {}", path.display()),
            SnapshotError::Parse(e) => write!(f, "invalid snapshot JSON: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io { source, .. } => Some(source),
            SnapshotError::Parse(e) => Some(e),
        }
    }
}
