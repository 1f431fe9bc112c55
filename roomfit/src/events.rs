//! Event types for RoomFit

use crate::anchor::AnchorId;
use crate::fit::PrefabTransform;

#[derive(Debug, Clone, PartialEq)]
pub enum SpawnerEvent {
    PrefabSpawned {
        anchor_id: AnchorId,
        prefab_name: String,
        transform: PrefabTransform,
    },
    AnchorSkipped {
        anchor_id: AnchorId,
        reason: SkipReason,
    },
    PrefabCleared {
        anchor_id: AnchorId,
        prefab_name: String,
    },
    RoomSpawned {
        spawned: usize,
        skipped: usize,
    },
}

/// Why an anchor was left without a prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No group lists the anchor's label
    NoMatchingGroup,
    /// The matching group's selection returned nothing
    NothingSelected,
}

impl SpawnerEvent {
    pub fn anchor_id(&self) -> Option<AnchorId> {
        match self {
            Self::PrefabSpawned { anchor_id, .. }
            | Self::AnchorSkipped { anchor_id, .. }
            | Self::PrefabCleared { anchor_id, .. } => Some(*anchor_id),
            Self::RoomSpawned { .. } => None,
        }
    }

    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::PrefabSpawned { .. })
    }
}
