//! Race configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SkError, SkResult};

/// Number of targets on a firing line; every visit fires this many shots.
pub const TARGETS_PER_FIRING_LINE: u32 = 5;

/// Static race parameters, shared read-only by every reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaceConfig {
    /// Number of main laps.
    pub laps: u32,
    /// Length of one main lap, in metres.
    pub lap_len: u32,
    /// Length of one penalty loop, in metres. One loop per missed target.
    pub penalty_len: u32,
    /// Number of firing lines on the range.
    pub firing_lines: u32,
    /// Planned start of the first competitor, `HH:MM:SS.mmm`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Interval between planned starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_delta: Option<String>,
}

impl RaceConfig {
    /// Build a config from the four numeric parameters.
    pub fn new(laps: u32, lap_len: u32, penalty_len: u32, firing_lines: u32) -> Self {
        Self {
            laps,
            lap_len,
            penalty_len,
            firing_lines,
            start: None,
            start_delta: None,
        }
    }

    /// Set the planned start and the interval between starts.
    pub fn with_start(mut self, start: impl Into<String>, delta: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.start_delta = Some(delta.into());
        self
    }

    /// Deserialize a config from JSON.
    pub fn from_json(json: &str) -> SkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and deserialize a JSON config file.
    pub fn load(path: &Path) -> SkResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded race config");
        Ok(config)
    }
}
