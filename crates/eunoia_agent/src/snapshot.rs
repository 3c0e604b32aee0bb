//! State snapshot persistence.
//!
//! The snapshot carries all user profiles plus the learning telemetry.
//! Restore is tolerant: a missing or malformed file logs a warning and
//! yields defaults, so startup never fails on bad state.

use crate::learning::{LearningStats, NetworkState};
use crate::profile::UserProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSnapshot {
    pub user_profiles: HashMap<String, UserProfile>,
    pub learning_stats: LearningStats,
    pub neural_network: NetworkState,
}

impl AgentSnapshot {
    /// Load a snapshot, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No snapshot at {}, starting fresh", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .context("read snapshot")
            .and_then(|s| serde_json::from_str(&s).context("parse snapshot"))
        {
            Ok(snapshot) => {
                tracing::info!("Restored agent state from {}", path.display());
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to restore snapshot from {} ({e:#}), using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Write the snapshot as JSON, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create snapshot directory {}", parent.display()))?;
        }
        let json = serde_json::to_string(self).context("serialize snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("write snapshot to {}", path.display()))?;
        tracing::info!("Agent state saved to {}", path.display());
        Ok(())
    }
}
