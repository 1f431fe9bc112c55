//! Prefab handles and the groups that map scene labels to them.

use crate::anchor::{LabelSet, SceneLabel};
use crate::math::{Bounds3, Vec3};
use crate::policy::FitPolicy;

/// A spawnable asset as far as fitting is concerned: a name and, when known,
/// the bounding box of its visual extent in prefab-local space.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabHandle {
    pub name: String,
    pub bounds: Option<Bounds3>,
}

impl PrefabHandle {
    pub fn new(name: impl Into<String>, bounds: Bounds3) -> Self {
        Self {
            name: name.into(),
            bounds: Some(bounds),
        }
    }

    /// A prefab whose extent is unknown. It is fitted as a unit cube.
    pub fn without_bounds(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: None,
        }
    }

    pub fn size_or_unit(&self) -> Vec3 {
        self.bounds.map_or(Vec3::ONE, |bounds| bounds.size)
    }
}

/// Prefabs offered for anchors carrying any of `labels`, fitted with `policy`.
#[derive(Debug, Clone, Default)]
pub struct PrefabGroup {
    pub labels: LabelSet,
    pub prefabs: Vec<PrefabHandle>,
    pub policy: FitPolicy,
}

impl PrefabGroup {
    pub fn new(labels: impl Into<LabelSet>, prefabs: Vec<PrefabHandle>) -> Self {
        Self {
            labels: labels.into(),
            prefabs,
            policy: FitPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn matches(&self, label: SceneLabel) -> bool {
        self.labels.contains(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefab_without_bounds_is_unit() {
        let lamp = PrefabHandle::without_bounds("lamp");
        assert_eq!(lamp.size_or_unit(), Vec3::ONE);

        let crate_box = PrefabHandle::new("crate", Bounds3::new(Vec3::ZERO, Vec3::splat(2.0)));
        assert_eq!(crate_box.size_or_unit(), Vec3::splat(2.0));
    }

    #[test]
    fn test_group_matching() {
        let prefab = PrefabHandle::new("desk", Bounds3::unit());
        let labels: LabelSet = [SceneLabel::Table, SceneLabel::Storage].into_iter().collect();
        let group = PrefabGroup::new(labels, vec![prefab.clone()]);
        assert!(group.matches(SceneLabel::Table));
        assert!(!group.matches(SceneLabel::Couch));
        assert_eq!(group.policy, FitPolicy::default());

        let group = group.with_policy(FitPolicy::new().ignore_prefab_size(true));
        assert!(group.policy.ignore_prefab_size);
        assert_eq!(group.prefabs, vec![prefab]);
    }
}
