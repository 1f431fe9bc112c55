//! Shared helpers for unit tests.

use crate::anchor::Anchor;
use crate::math::{Bounds3, Rect2, Vec2, Vec3};
use crate::policy::CustomFitPolicy;
use crate::prefab::PrefabHandle;

pub(crate) fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected:?}, got {actual:?}"
    );
}

/// Custom policy returning fixed values, picking the last candidate.
pub(crate) struct FixedPolicy {
    pub scale: Vec3,
    pub position: Vec3,
}

impl Default for FixedPolicy {
    fn default() -> Self {
        Self {
            scale: Vec3::new(2.0, 3.0, 4.0),
            position: Vec3::new(1.0, 2.0, 3.0),
        }
    }
}

impl CustomFitPolicy for FixedPolicy {
    fn select_prefab<'a>(
        &self,
        _anchor: &Anchor,
        candidates: &'a [PrefabHandle],
    ) -> Option<&'a PrefabHandle> {
        candidates.last()
    }

    fn scale_volume(&self, _scale: Vec3) -> Vec3 {
        self.scale
    }

    fn scale_plane(&self, _scale: Vec2) -> Vec3 {
        self.scale
    }

    fn align_volume(&self, _volume: &Bounds3, _prefab: Option<&Bounds3>, _scale: Vec3) -> Vec3 {
        self.position
    }

    fn align_plane(&self, _rect: &Rect2, _prefab: Option<&Bounds3>, _scale: Vec2) -> Vec3 {
        self.position
    }
}
