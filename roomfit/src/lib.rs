//! # RoomFit
//!
//! Fits prefabs onto the anchors of a scanned room. Given an anchor's 3D
//! volume or 2D plane rect and a prefab's bounding box, RoomFit computes the
//! local scale, rotation and position that place the prefab on the anchor
//! under a configurable [`FitPolicy`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use roomfit::*;
//!
//! // A room with a single table volume (anchor-local Z is up)
//! let mut room = Room::new();
//! room.add_anchor(Anchor::volume(
//!     SceneLabel::Table,
//!     Pose::from_position(Vec3::new(1.0, 0.0, -2.0)),
//!     Bounds3::new(Vec3::new(0.0, 0.0, 0.375), Vec3::new(1.2, 0.6, 0.75)),
//! ));
//!
//! // Offer two desks for tables, picking the one closest in size
//! let desc = SpawnerDesc::new().seed(42).group(
//!     PrefabGroup::new(
//!         SceneLabel::Table,
//!         vec![
//!             PrefabHandle::new("desk", Bounds3::new(Vec3::new(0.0, 0.4, 0.0), Vec3::new(1.4, 0.8, 0.7))),
//!             PrefabHandle::without_bounds("crate"),
//!         ],
//!     )
//!     .with_policy(FitPolicy::new().selection(SelectionMode::ClosestSize)),
//! );
//!
//! let mut spawner = PrefabSpawner::new(desc);
//! for placed in spawner.spawn_room(&room)? {
//!     println!("{} -> {:?}", placed.prefab_name, placed.transform);
//! }
//! # Ok::<(), RoomFitError>(())
//! ```
//!
//! ## Key Components
//!
//! - **[`PrefabSpawner`]**: Places one prefab per matching anchor of a [`Room`]
//! - **[`resolve_volume_fit`] / [`resolve_plane_fit`]**: The fitting math for a single anchor
//! - **[`FitPolicy`]**: Scaling, alignment and selection modes plus orientation options
//! - **[`CustomFitPolicy`]**: Caller-supplied behavior for the `Custom` modes
//! - **[`RoomQuery`]**: Facing-direction query used to turn prefabs away from walls
//! - **[`SpawnerEvent`]**: Events emitted as prefabs are placed and cleared
//!
//! ## Coordinate conventions
//!
//! Volume anchors are Z-up in anchor-local space; prefabs are Y-up. The volume
//! resolver swaps the two axes when comparing sizes and bakes a fixed
//! correction into the rotation it returns. Plane anchors lie in their local
//! XY plane and need no correction.

pub mod alignment;
pub mod anchor;
pub mod config;
pub mod error;
pub mod events;
pub mod fit;
pub mod math;
pub mod policy;
pub mod prefab;
pub mod room;
pub mod scaling;
pub mod selection;
pub mod spawner;

#[cfg(test)]
pub(crate) mod test_support;

pub use anchor::{Anchor, AnchorBounds, AnchorId, LabelSet, SceneLabel};
pub use config::SpawnerDesc;
pub use error::RoomFitError;
pub use events::{SkipReason, SpawnerEvent};
pub use fit::{
    OrientedFit, PrefabTransform, resolve_anchor_fit, resolve_plane_fit, resolve_volume_fit,
};
pub use math::{Bounds3, Pose, Quat, Rect2, Vec2, Vec3};
pub use policy::{AlignMode, CardinalAxis, CustomFitPolicy, FitPolicy, ScalingMode, SelectionMode};
pub use prefab::{PrefabGroup, PrefabHandle};
pub use room::{RayHit, Room, RoomQuery, WallRayCaster};
pub use spawner::{PrefabSpawner, SpawnedPrefab};
