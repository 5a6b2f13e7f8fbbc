//! Configuration values for the hierarchy engine

use crate::error::{ConfigError, ConfigResult};
use orgchart::{CyclePolicy, JsonFileSource, SessionOptions, INITIAL_EXPANSION_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound for `initial_expansion_depth`
pub const MAX_INITIAL_EXPANSION_DEPTH: usize = 32;

/// Resolved orgchart configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgChartConfig {
    /// How rootless supervisor cycles are handled
    pub cycle_policy: CyclePolicy,
    /// Levels expanded when a new snapshot arrives
    pub initial_expansion_depth: usize,
    /// JSON snapshot file backing the default data source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for OrgChartConfig {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::default(),
            initial_expansion_depth: INITIAL_EXPANSION_DEPTH,
            snapshot_path: None,
        }
    }
}

impl OrgChartConfig {
    /// Reject values the engine cannot honor
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_expansion_depth > MAX_INITIAL_EXPANSION_DEPTH {
            return Err(ConfigError::invalid_value(
                "initial_expansion_depth",
                format!(
                    "must be at most {}, got {}",
                    MAX_INITIAL_EXPANSION_DEPTH, self.initial_expansion_depth
                ),
            ));
        }
        Ok(())
    }

    /// Options for a [`orgchart::HierarchySession`]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            cycle_policy: self.cycle_policy,
            initial_expansion_depth: self.initial_expansion_depth,
        }
    }

    /// File-backed data source, when a snapshot path is configured
    pub fn snapshot_source(&self) -> Option<JsonFileSource> {
        self.snapshot_path.as_ref().map(JsonFileSource::new)
    }
}
