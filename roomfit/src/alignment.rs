//! Alignment policies: where the scaled prefab sits on its anchor.
//!
//! Volume anchors are Z-up while prefabs are Y-up, so prefab pivots and scales
//! are read with Y and Z swapped before they are compared to the volume.

use crate::error::{Result, RoomFitError};
use crate::math::{Bounds3, Rect2, Vec2, Vec3};
use crate::policy::{AlignMode, CustomFitPolicy, require_custom};

/// Local position of a prefab on a volume anchor: the anchor pivot minus the
/// scaled prefab pivot.
///
/// A missing `prefab` box contributes a zero pivot. `NoAlignment` is always
/// the origin, even for non-finite scales.
pub fn align_prefab_pivot(
    volume: &Bounds3,
    prefab: Option<&Bounds3>,
    scale: Vec3,
    mode: AlignMode,
) -> Result<Vec3> {
    let (prefab_pivot, volume_pivot) = match mode {
        AlignMode::Automatic | AlignMode::Bottom => {
            let prefab_pivot = prefab.map_or(Vec3::ZERO, |bounds| {
                Vec3::new(bounds.center.x, bounds.center.z, bounds.min().y)
            });
            let mut volume_pivot = volume.center;
            volume_pivot.z = volume.min().z;
            (prefab_pivot, volume_pivot)
        }
        AlignMode::Center => {
            let prefab_pivot = prefab.map_or(Vec3::ZERO, |bounds| {
                Vec3::new(bounds.center.x, bounds.center.z, bounds.center.y)
            });
            (prefab_pivot, volume.center)
        }
        AlignMode::NoAlignment => return Ok(Vec3::ZERO),
        AlignMode::Custom => return Err(RoomFitError::CustomModeNotHandled("alignment")),
    };

    let swapped_scale = Vec3::new(scale.x, scale.z, scale.y);
    Ok(volume_pivot - prefab_pivot * swapped_scale)
}

/// Local position of a prefab on a plane anchor.
///
/// `Automatic` and `Center` match centers, `Bottom` matches the bottom edge
/// midpoints. The result lies in the plane (Z = 0).
pub fn align_prefab_pivot_2d(
    rect: &Rect2,
    prefab: Option<&Bounds3>,
    scale: Vec2,
    mode: AlignMode,
) -> Result<Vec3> {
    let (prefab_pivot, plane_pivot) = match mode {
        AlignMode::Automatic | AlignMode::Center => {
            let prefab_pivot = prefab.map_or(Vec2::ZERO, |bounds| bounds.center.truncate());
            (prefab_pivot, rect.center())
        }
        AlignMode::Bottom => {
            let prefab_pivot = prefab.map_or(Vec2::ZERO, |bounds| {
                Vec2::new(bounds.center.x, bounds.min().y)
            });
            (prefab_pivot, Vec2::new(rect.center().x, rect.min.y))
        }
        AlignMode::NoAlignment => return Ok(Vec3::ZERO),
        AlignMode::Custom => return Err(RoomFitError::CustomModeNotHandled("alignment")),
    };

    Ok((plane_pivot - prefab_pivot * scale).extend(0.0))
}

/// [`align_prefab_pivot`], with custom modes routed to `custom`.
pub fn apply_volume_alignment(
    volume: &Bounds3,
    prefab: Option<&Bounds3>,
    scale: Vec3,
    mode: AlignMode,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<Vec3> {
    match mode {
        AlignMode::Custom => {
            Ok(require_custom(custom, "alignment")?.align_volume(volume, prefab, scale))
        }
        _ => align_prefab_pivot(volume, prefab, scale, mode),
    }
}

/// [`align_prefab_pivot_2d`], with custom modes routed to `custom`.
pub fn apply_plane_alignment(
    rect: &Rect2,
    prefab: Option<&Bounds3>,
    scale: Vec2,
    mode: AlignMode,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<Vec3> {
    match mode {
        AlignMode::Custom => {
            Ok(require_custom(custom, "alignment")?.align_plane(rect, prefab, scale))
        }
        _ => align_prefab_pivot_2d(rect, prefab, scale, mode),
    }
}
