//! Room-level prefab spawning.
//!
//! [`PrefabSpawner`] walks the anchors of a room, picks the first prefab group
//! whose labels match each anchor, selects a prefab from it and fits it with the
//! group's policy. Placements are kept per anchor so a room can be re-spawned or
//! cleared, and every change is reported as a [`SpawnerEvent`].

use crate::anchor::{Anchor, AnchorId};
use crate::config::SpawnerDesc;
use crate::error::{Result, RoomFitError};
use crate::events::{SkipReason, SpawnerEvent};
use crate::fit::{PrefabTransform, resolve_anchor_fit};
use crate::policy::CustomFitPolicy;
use crate::prefab::PrefabGroup;
use crate::room::{Room, RoomQuery};
use crate::selection::select_prefab;
use crossbeam_channel::{Receiver, Sender};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// A prefab placed on an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedPrefab {
    pub anchor_id: AnchorId,
    /// Index of the group the prefab came from
    pub group_index: usize,
    pub prefab_name: String,
    /// Transform relative to the anchor
    pub transform: PrefabTransform,
}

/// Places prefabs on room anchors according to a list of [`PrefabGroup`]s.
///
/// The spawner owns the random generator used by random selection; it is not
/// meant to be shared between threads while spawning.
pub struct PrefabSpawner {
    groups: Vec<PrefabGroup>,
    log_unmatched_labels: bool,
    rng: StdRng,
    custom: Option<Box<dyn CustomFitPolicy>>,
    spawned: HashMap<AnchorId, SpawnedPrefab>,
    event_sender: Sender<SpawnerEvent>,
    event_receiver: Receiver<SpawnerEvent>,
}

impl PrefabSpawner {
    pub fn new(desc: SpawnerDesc) -> Self {
        for (index, group) in desc.groups.iter().enumerate() {
            if group.labels.is_empty() {
                log::warn!("Prefab group {} has no labels and will never match", index);
            }
            if group.prefabs.is_empty() {
                log::warn!("Prefab group {} has no prefabs", index);
            }
        }

        let rng = match desc.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (event_sender, event_receiver) = crossbeam_channel::unbounded();

        Self {
            groups: desc.groups,
            log_unmatched_labels: desc.log_unmatched_labels,
            rng,
            custom: None,
            spawned: HashMap::new(),
            event_sender,
            event_receiver,
        }
    }

    /// Installs the policy that serves every `Custom` mode of every group.
    pub fn with_custom_policy(mut self, policy: Box<dyn CustomFitPolicy>) -> Self {
        self.custom = Some(policy);
        self
    }

    pub fn groups(&self) -> &[PrefabGroup] {
        &self.groups
    }

    /// Spawns prefabs for every anchor of `room`, replacing earlier placements
    /// on those anchors.
    ///
    /// # Errors
    ///
    /// A group that needs a custom policy when none is installed is reported
    /// before any placement is touched. Other failures stop at the first
    /// anchor whose fit fails; anchors processed before it keep their new
    /// placements.
    pub fn spawn_room(&mut self, room: &Room) -> Result<Vec<SpawnedPrefab>> {
        self.check_custom_policy(room)?;

        for anchor in room.anchors() {
            self.clear_anchor(anchor.id);
        }

        let mut placed = Vec::new();
        let mut skipped = 0;
        for anchor in room.anchors() {
            match self.spawn_for_anchor(anchor, room)? {
                Some(spawned) => placed.push(spawned),
                None => skipped += 1,
            }
        }

        log::info!("Spawned {} prefabs, skipped {} anchors", placed.len(), skipped);
        self.emit(SpawnerEvent::RoomSpawned {
            spawned: placed.len(),
            skipped,
        });
        Ok(placed)
    }

    fn check_custom_policy(&self, room: &Room) -> Result<()> {
        if self.custom.is_some() {
            return Ok(());
        }
        for anchor in room.anchors() {
            let Some((index, group)) = self
                .groups
                .iter()
                .enumerate()
                .find(|(_, group)| group.matches(anchor.label))
            else {
                continue;
            };
            // Empty groups never reach selection.
            if group.prefabs.is_empty() {
                continue;
            }
            if let Some(kind) = group.policy.first_custom_mode() {
                log::warn!(
                    "Group {} uses custom {} but the spawner has no custom policy",
                    index,
                    kind
                );
                return Err(RoomFitError::CustomPolicyRequired(kind));
            }
        }
        Ok(())
    }

    /// Spawns a prefab for a single anchor.
    ///
    /// Returns `Ok(None)` when no group matches the anchor's label or the
    /// group's selection yields no prefab.
    pub fn spawn_for_anchor(
        &mut self,
        anchor: &Anchor,
        room: &dyn RoomQuery,
    ) -> Result<Option<SpawnedPrefab>> {
        let Some((group_index, group)) = self
            .groups
            .iter()
            .enumerate()
            .find(|(_, group)| group.matches(anchor.label))
        else {
            if self.log_unmatched_labels {
                log::debug!(
                    "No prefab group for anchor {} ({:?})",
                    anchor.id,
                    anchor.label
                );
            }
            self.emit(SpawnerEvent::AnchorSkipped {
                anchor_id: anchor.id,
                reason: SkipReason::NoMatchingGroup,
            });
            return Ok(None);
        };

        let custom = self.custom.as_deref();
        let selected = select_prefab(
            anchor,
            &group.prefabs,
            group.policy.selection,
            Some(&mut self.rng),
            custom,
        )?;
        let Some(prefab) = selected else {
            log::warn!(
                "Group {} selected no prefab for anchor {}",
                group_index,
                anchor.id
            );
            self.emit(SpawnerEvent::AnchorSkipped {
                anchor_id: anchor.id,
                reason: SkipReason::NothingSelected,
            });
            return Ok(None);
        };

        let transform = resolve_anchor_fit(
            anchor,
            prefab.bounds.as_ref(),
            &group.policy,
            Some(room),
            custom,
        )?;
        let spawned = SpawnedPrefab {
            anchor_id: anchor.id,
            group_index,
            prefab_name: prefab.name.clone(),
            transform,
        };

        log::debug!(
            "Anchor {} ({:?}) gets '{}': scale {:?}, position {:?}, rotation {:?}",
            anchor.id,
            anchor.label,
            spawned.prefab_name,
            transform.scale,
            transform.position,
            transform.rotation_euler
        );

        self.emit(SpawnerEvent::PrefabSpawned {
            anchor_id: anchor.id,
            prefab_name: spawned.prefab_name.clone(),
            transform,
        });
        if let Some(previous) = self.spawned.insert(anchor.id, spawned.clone()) {
            log::debug!("Replaced '{}' on anchor {}", previous.prefab_name, anchor.id);
        }
        Ok(Some(spawned))
    }

    /// Removes the placement on `anchor_id`, if any.
    pub fn clear_anchor(&mut self, anchor_id: AnchorId) -> Option<SpawnedPrefab> {
        let removed = self.spawned.remove(&anchor_id)?;
        self.emit(SpawnerEvent::PrefabCleared {
            anchor_id,
            prefab_name: removed.prefab_name.clone(),
        });
        Some(removed)
    }

    /// Removes every placement.
    pub fn clear_all(&mut self) {
        let ids: Vec<AnchorId> = self.spawned.keys().copied().collect();
        for id in ids {
            self.clear_anchor(id);
        }
    }

    pub fn spawned(&self) -> impl Iterator<Item = &SpawnedPrefab> {
        self.spawned.values()
    }

    pub fn spawned_for(&self, anchor_id: AnchorId) -> Option<&SpawnedPrefab> {
        self.spawned.get(&anchor_id)
    }

    /// Drains the events emitted since the last call.
    pub fn poll_events(&self) -> Vec<SpawnerEvent> {
        self.event_receiver.try_iter().collect()
    }

    fn emit(&self, event: SpawnerEvent) {
        if let Err(e) = self.event_sender.send(event) {
            log::warn!("Failed to queue spawner event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{LabelSet, SceneLabel};
    use crate::math::{Bounds3, Vec3};
    use crate::policy::{AlignMode, CardinalAxis, FitPolicy, ScalingMode, SelectionMode};
    use crate::prefab::PrefabHandle;
    use crate::room::tests::{box_room, volume_anchor_at};
    use crate::test_support::FixedPolicy;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn furnished_room() -> (Room, AnchorId, AnchorId) {
        let mut room = box_room();
        let table = room.add_anchor(volume_anchor_at(
            SceneLabel::Table,
            Vec3::new(-0.5, 0.4, 0.0),
            Vec3::new(1.2, 0.8, 0.8),
        ));
        let couch = room.add_anchor(volume_anchor_at(
            SceneLabel::Couch,
            Vec3::new(1.5, 0.5, 0.8),
            Vec3::new(0.9, 2.0, 1.0),
        ));
        (room, table, couch)
    }

    fn desc(seed: u64) -> SpawnerDesc {
        let unit_box = |name: &str, size: Vec3| {
            PrefabHandle::new(name, Bounds3::new(Vec3::new(0.0, size.y * 0.5, 0.0), size))
        };

        SpawnerDesc::new()
            .seed(seed)
            .log_unmatched_labels(true)
            .group(
                PrefabGroup::new(
                    SceneLabel::WallFace,
                    vec![
                        PrefabHandle::without_bounds("poster"),
                        PrefabHandle::without_bounds("shelf"),
                        PrefabHandle::without_bounds("clock"),
                    ],
                )
                .with_policy(FitPolicy::new().scaling(ScalingMode::UniformScaling)),
            )
            .group(
                PrefabGroup::new(
                    SceneLabel::Table,
                    vec![
                        unit_box("side_table", Vec3::splat(0.4)),
                        unit_box("desk", Vec3::new(1.2, 0.75, 0.7)),
                    ],
                )
                .with_policy(FitPolicy::new().selection(SelectionMode::ClosestSize)),
            )
            .group(
                PrefabGroup::new(
                    SceneLabel::Couch,
                    vec![unit_box("sofa", Vec3::new(2.0, 0.9, 0.9))],
                )
                .with_policy(
                    FitPolicy::new()
                        .match_aspect_ratio(true)
                        .face_away_from_wall(true)
                        .scaling(ScalingMode::UniformXZScale)
                        .alignment(AlignMode::Bottom),
                ),
            )
    }

    #[test]
    fn test_spawn_room() {
        init_logger();
        let (room, table, couch) = furnished_room();
        let mut spawner = PrefabSpawner::new(desc(42));

        let placed = spawner.spawn_room(&room).unwrap();
        assert_eq!(placed.len(), 6);
        assert_eq!(spawner.spawned().count(), 6);

        let table_prefab = spawner.spawned_for(table).unwrap();
        assert_eq!(table_prefab.prefab_name, "desk");
        assert_eq!(table_prefab.group_index, 1);

        // The sofa is long along X, so it turns to follow the couch volume's
        // long Y extent, then faces away from the +X wall.
        let couch_prefab = spawner.spawned_for(couch).unwrap();
        assert_eq!(couch_prefab.prefab_name, "sofa");
        let expected_pitch = (CardinalAxis::Deg270.index() as f32 - 1.0) * 90.0;
        assert_eq!(couch_prefab.transform.rotation_euler.x, expected_pitch);

        let floor = room.floor().unwrap().id;
        assert!(spawner.spawned_for(floor).is_none());

        let events = spawner.poll_events();
        assert_eq!(events.iter().filter(|e| e.is_spawn()).count(), 6);
        assert!(events.contains(&SpawnerEvent::AnchorSkipped {
            anchor_id: floor,
            reason: SkipReason::NoMatchingGroup,
        }));
        assert_eq!(
            events.last(),
            Some(&SpawnerEvent::RoomSpawned {
                spawned: 6,
                skipped: 1
            })
        );
        assert!(spawner.poll_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_placements() {
        let (room, _, _) = furnished_room();
        let first = PrefabSpawner::new(desc(7)).spawn_room(&room).unwrap();
        let second = PrefabSpawner::new(desc(7)).spawn_room(&room).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_respawn_replaces_and_clear_removes() {
        let (room, table, _) = furnished_room();
        let mut spawner = PrefabSpawner::new(desc(1));
        spawner.spawn_room(&room).unwrap();
        spawner.poll_events();

        spawner.spawn_room(&room).unwrap();
        assert_eq!(spawner.spawned().count(), 6);
        let events = spawner.poll_events();
        let cleared = events
            .iter()
            .filter(|e| matches!(e, SpawnerEvent::PrefabCleared { .. }))
            .count();
        assert_eq!(cleared, 6);

        let removed = spawner.clear_anchor(table).unwrap();
        assert_eq!(removed.prefab_name, "desk");
        assert!(spawner.clear_anchor(table).is_none());

        spawner.clear_all();
        assert_eq!(spawner.spawned().count(), 0);
    }

    #[test]
    fn test_empty_group_skips_anchor() {
        let (room, table, _) = furnished_room();
        let desc = SpawnerDesc::new()
            .seed(3)
            .group(PrefabGroup::new(SceneLabel::Table, Vec::new()));
        let mut spawner = PrefabSpawner::new(desc);
        let anchor = room.anchor(table).unwrap();

        assert!(spawner.spawn_for_anchor(anchor, &room).unwrap().is_none());
        assert_eq!(
            spawner.poll_events(),
            vec![SpawnerEvent::AnchorSkipped {
                anchor_id: table,
                reason: SkipReason::NothingSelected,
            }]
        );
    }

    #[test]
    fn test_custom_mode_needs_policy() {
        let (room, table, _) = furnished_room();
        let group = PrefabGroup::new(
            LabelSet::from(SceneLabel::Table),
            vec![PrefabHandle::without_bounds("a"), PrefabHandle::without_bounds("b")],
        )
        .with_policy(
            FitPolicy::new()
                .selection(SelectionMode::Custom)
                .scaling(ScalingMode::Custom)
                .alignment(AlignMode::Custom),
        );
        let anchor = room.anchor(table).unwrap();

        let mut spawner = PrefabSpawner::new(SpawnerDesc::new().group(group.clone()));
        let result = spawner.spawn_for_anchor(anchor, &room);
        assert!(matches!(
            result,
            Err(RoomFitError::CustomPolicyRequired("selection"))
        ));

        let policy = FixedPolicy::default();
        let (scale, position) = (policy.scale, policy.position);
        let mut spawner = PrefabSpawner::new(SpawnerDesc::new().group(group))
            .with_custom_policy(Box::new(policy));
        let spawned = spawner.spawn_for_anchor(anchor, &room).unwrap().unwrap();
        assert_eq!(spawned.prefab_name, "b");
        assert_eq!(spawned.transform.scale, scale);
        assert_eq!(spawned.transform.position, position);
    }

    #[test]
    fn test_missing_custom_policy_keeps_placements() {
        let (room, _, _) = furnished_room();
        let desc = SpawnerDesc::new()
            .group(PrefabGroup::new(
                SceneLabel::WallFace,
                vec![PrefabHandle::without_bounds("poster")],
            ))
            .group(
                PrefabGroup::new(SceneLabel::Table, vec![PrefabHandle::without_bounds("a")])
                    .with_policy(FitPolicy::new().alignment(AlignMode::Custom)),
            );
        let mut spawner = PrefabSpawner::new(desc);

        let wall = room.walls().next().unwrap();
        spawner.spawn_for_anchor(wall, &room).unwrap().unwrap();
        spawner.poll_events();

        let result = spawner.spawn_room(&room);
        assert!(matches!(
            result,
            Err(RoomFitError::CustomPolicyRequired("alignment"))
        ));
        assert_eq!(spawner.spawned_for(wall.id).unwrap().prefab_name, "poster");
        assert!(spawner.poll_events().is_empty());
    }
}
