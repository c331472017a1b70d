//! Ingest configuration.

use serde::{Deserialize, Serialize};

/// Tunables for `pipeline::ingest::initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Worker pool size. `0` means auto-detect via `num_cpus`.
    pub num_workers: usize,
    /// Whether the directory walk follows symbolic links.
    pub follow_symlinks: bool,
    /// Capacity of the bounded job queue between the walker and workers.
    pub queue_capacity: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            num_workers: 5,
            follow_symlinks: true,
            queue_capacity: 256,
        }
    }
}

impl IngestConfig {
    /// Resolves `num_workers`, expanding `0` to the detected core count.
    pub fn resolved_worker_count(&self) -> usize {
        if self.num_workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.num_workers
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_worker_count() {
        assert_eq!(IngestConfig::default().num_workers, 5);
    }

    #[test]
    fn zero_workers_resolves_to_auto_detected_core_count() {
        let config = IngestConfig {
            num_workers: 0,
            ..Default::default()
        };
        assert!(config.resolved_worker_count() >= 1);
    }
}
