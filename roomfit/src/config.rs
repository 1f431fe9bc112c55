//! Configuration for RoomFit

use crate::prefab::PrefabGroup;

/// Configuration descriptor for a [`PrefabSpawner`](crate::PrefabSpawner)
#[derive(Debug, Clone, Default)]
pub struct SpawnerDesc {
    /// Seed for random prefab selection (None seeds from system entropy)
    pub seed: Option<u64>,
    /// Prefab groups, matched against anchor labels in order
    pub groups: Vec<PrefabGroup>,
    /// Log anchors whose label no group wants
    pub log_unmatched_labels: bool,
}

impl SpawnerDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn group(mut self, group: PrefabGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn log_unmatched_labels(mut self, enable: bool) -> Self {
        self.log_unmatched_labels = enable;
        self
    }
}
