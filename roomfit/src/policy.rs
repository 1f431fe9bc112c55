//! Fit policies: how a prefab is chosen, scaled, aligned and oriented on an anchor.
//!
//! Each policy is a plain enum with a `Custom` case. Custom cases are served by a
//! caller-supplied [`CustomFitPolicy`]; the built-in functions refuse them.

use crate::anchor::Anchor;
use crate::error::{Result, RoomFitError};
use crate::math::{Bounds3, Rect2, Vec2, Vec3};
use crate::prefab::PrefabHandle;
use std::fmt;
use std::str::FromStr;

/// How the raw `target / source` scale is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalingMode {
    /// Keep the per-axis scale, distorting the prefab to fill the anchor
    #[default]
    Stretch,
    /// Scale all axes by the same factor
    UniformScaling,
    /// Scale X and Z by the same factor, keep the height scale
    UniformXZScale,
    /// Keep the prefab at its authored size
    NoScaling,
    /// Delegate to [`CustomFitPolicy::scale_volume`] / [`CustomFitPolicy::scale_plane`]
    Custom,
}

/// Where the prefab pivot lands relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignMode {
    /// Bottom for volumes, center for planes
    #[default]
    Automatic,
    Bottom,
    Center,
    NoAlignment,
    Custom,
}

/// How one prefab is picked from a group's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    #[default]
    Random,
    ClosestSize,
    Custom,
}

/// One of the four 90 degree yaw steps about the volume's up axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardinalAxis {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl CardinalAxis {
    pub const ALL: [CardinalAxis; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    pub fn index(self) -> usize {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| RoomFitError::UnknownPolicy {
                kind: "cardinal axis",
                value: index.to_string(),
            })
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    pub fn yaw_degrees(self) -> f32 {
        self.index() as f32 * 90.0
    }

    /// Whether this axis is a quarter turn away from the identity orientation.
    pub fn is_quarter_turn(self) -> bool {
        self.index() % 2 == 1
    }
}

macro_rules! policy_names {
    ($ty:ty, $kind:literal, { $($variant:path => $name:literal),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = RoomFitError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(RoomFitError::UnknownPolicy {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $($variant => $name,)+
                };
                f.write_str(name)
            }
        }
    };
}

policy_names!(ScalingMode, "scaling mode", {
    ScalingMode::Stretch => "stretch",
    ScalingMode::UniformScaling => "uniform",
    ScalingMode::UniformXZScale => "uniform-xz",
    ScalingMode::NoScaling => "none",
    ScalingMode::Custom => "custom",
});

policy_names!(AlignMode, "alignment mode", {
    AlignMode::Automatic => "automatic",
    AlignMode::Bottom => "bottom",
    AlignMode::Center => "center",
    AlignMode::NoAlignment => "none",
    AlignMode::Custom => "custom",
});

policy_names!(SelectionMode, "selection mode", {
    SelectionMode::Random => "random",
    SelectionMode::ClosestSize => "closest-size",
    SelectionMode::Custom => "custom",
});

/// The full set of choices used to fit prefabs of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitPolicy {
    pub scaling: ScalingMode,
    pub alignment: AlignMode,
    pub selection: SelectionMode,
    /// Try a quarter turn of the prefab when it distorts less in the XZ plane
    pub match_aspect_ratio: bool,
    /// Orient the prefab so its back faces the closest wall
    pub face_away_from_wall: bool,
    /// Treat every prefab as a unit cube instead of measuring its bounds
    pub ignore_prefab_size: bool,
}

impl FitPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scaling(mut self, mode: ScalingMode) -> Self {
        self.scaling = mode;
        self
    }

    pub fn alignment(mut self, mode: AlignMode) -> Self {
        self.alignment = mode;
        self
    }

    pub fn selection(mut self, mode: SelectionMode) -> Self {
        self.selection = mode;
        self
    }

    pub fn match_aspect_ratio(mut self, enable: bool) -> Self {
        self.match_aspect_ratio = enable;
        self
    }

    pub fn face_away_from_wall(mut self, enable: bool) -> Self {
        self.face_away_from_wall = enable;
        self
    }

    pub fn ignore_prefab_size(mut self, enable: bool) -> Self {
        self.ignore_prefab_size = enable;
        self
    }

    /// Returns true if any of the three modes needs a [`CustomFitPolicy`].
    pub fn needs_custom(&self) -> bool {
        self.first_custom_mode().is_some()
    }

    /// The first `Custom` mode in pipeline order (selection, scaling,
    /// alignment), named as in [`RoomFitError::CustomPolicyRequired`].
    pub fn first_custom_mode(&self) -> Option<&'static str> {
        if self.selection == SelectionMode::Custom {
            Some("selection")
        } else if self.scaling == ScalingMode::Custom {
            Some("scaling")
        } else if self.alignment == AlignMode::Custom {
            Some("alignment")
        } else {
            None
        }
    }
}

/// Caller-supplied behavior for the `Custom` policy cases.
///
/// A single implementation serves every custom mode of a spawner. Methods are
/// only called for the modes that are actually set to `Custom`.
pub trait CustomFitPolicy: Send + Sync {
    /// Picks one of `candidates` for `anchor`, or `None` to leave the anchor empty.
    fn select_prefab<'a>(
        &self,
        anchor: &Anchor,
        candidates: &'a [PrefabHandle],
    ) -> Option<&'a PrefabHandle>;

    /// Adjusts the raw per-axis scale computed for a volume anchor.
    fn scale_volume(&self, scale: Vec3) -> Vec3;

    /// Adjusts the raw scale computed for a plane anchor. The returned Z
    /// component is the depth scale applied to extruded prefabs.
    fn scale_plane(&self, scale: Vec2) -> Vec3;

    /// Computes the local position of a prefab on a volume anchor.
    fn align_volume(&self, volume: &Bounds3, prefab: Option<&Bounds3>, scale: Vec3) -> Vec3;

    /// Computes the local position of a prefab on a plane anchor.
    fn align_plane(&self, rect: &Rect2, prefab: Option<&Bounds3>, scale: Vec2) -> Vec3;
}

pub(crate) fn require_custom<'a>(
    custom: Option<&'a dyn CustomFitPolicy>,
    what: &'static str,
) -> Result<&'a dyn CustomFitPolicy> {
    custom.ok_or(RoomFitError::CustomPolicyRequired(what))
}
