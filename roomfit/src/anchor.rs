//! Scanned-room anchors and their scene labels.

use crate::math::{Bounds3, Pose, Rect2, Vec3};
use uuid::Uuid;

/// Stable identifier of an anchor, as reported by the room scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnchorId(Uuid);

impl AnchorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AnchorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnchorId({})", self.0)
    }
}

/// Semantic category of a scanned surface or object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneLabel {
    Floor,
    Ceiling,
    WallFace,
    InvisibleWallFace,
    Table,
    Couch,
    DoorFrame,
    WindowFrame,
    Storage,
    Bed,
    Screen,
    Lamp,
    Plant,
    WallArt,
    GlobalMesh,
    Other,
}

impl SceneLabel {
    pub const ALL: [SceneLabel; 16] = [
        Self::Floor,
        Self::Ceiling,
        Self::WallFace,
        Self::InvisibleWallFace,
        Self::Table,
        Self::Couch,
        Self::DoorFrame,
        Self::WindowFrame,
        Self::Storage,
        Self::Bed,
        Self::Screen,
        Self::Lamp,
        Self::Plant,
        Self::WallArt,
        Self::GlobalMesh,
        Self::Other,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Wall faces, including the invisible ones that close open rooms.
    pub fn is_wall(self) -> bool {
        matches!(self, Self::WallFace | Self::InvisibleWallFace)
    }
}

/// A set of scene labels, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LabelSet(u32);

impl LabelSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        SceneLabel::ALL.into_iter().collect()
    }

    pub fn with(mut self, label: SceneLabel) -> Self {
        self.insert(label);
        self
    }

    pub fn insert(&mut self, label: SceneLabel) {
        self.0 |= label.bit();
    }

    pub fn contains(&self, label: SceneLabel) -> bool {
        self.0 & label.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = SceneLabel> + '_ {
        SceneLabel::ALL.into_iter().filter(|label| self.contains(*label))
    }
}

impl FromIterator<SceneLabel> for LabelSet {
    fn from_iter<I: IntoIterator<Item = SceneLabel>>(iter: I) -> Self {
        let mut set = Self::empty();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl From<SceneLabel> for LabelSet {
    fn from(label: SceneLabel) -> Self {
        Self::empty().with(label)
    }
}

/// The extent of an anchor: a 3D volume or a 2D plane rect, never both.
///
/// Volumes are expressed in anchor-local space with Z pointing up. Plane rects
/// lie in the anchor's local XY plane, facing local +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorBounds {
    Volume(Bounds3),
    Plane(Rect2),
}

/// A recognized surface or object from a room scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub id: AnchorId,
    pub label: SceneLabel,
    pub pose: Pose,
    pub bounds: AnchorBounds,
}

impl Anchor {
    pub fn new(label: SceneLabel, pose: Pose, bounds: AnchorBounds) -> Self {
        Self {
            id: AnchorId::new(),
            label,
            pose,
            bounds,
        }
    }

    pub fn volume(label: SceneLabel, pose: Pose, bounds: Bounds3) -> Self {
        Self::new(label, pose, AnchorBounds::Volume(bounds))
    }

    pub fn plane(label: SceneLabel, pose: Pose, rect: Rect2) -> Self {
        Self::new(label, pose, AnchorBounds::Plane(rect))
    }

    pub fn with_id(mut self, id: AnchorId) -> Self {
        self.id = id;
        self
    }

    pub fn volume_bounds(&self) -> Option<&Bounds3> {
        match &self.bounds {
            AnchorBounds::Volume(bounds) => Some(bounds),
            AnchorBounds::Plane(_) => None,
        }
    }

    pub fn plane_rect(&self) -> Option<&Rect2> {
        match &self.bounds {
            AnchorBounds::Plane(rect) => Some(rect),
            AnchorBounds::Volume(_) => None,
        }
    }

    /// Center of the anchor's extent in world space.
    pub fn world_center(&self) -> Vec3 {
        let local = match &self.bounds {
            AnchorBounds::Volume(bounds) => bounds.center,
            AnchorBounds::Plane(rect) => rect.center().extend(0.0),
        };
        self.pose.transform_point(local)
    }
}
