//! Fit resolvers: turn an anchor, a prefab box and a [`FitPolicy`] into the
//! prefab's local scale, rotation and position.
//!
//! ## Coordinate conventions
//!
//! Volume anchors are Z-up in anchor-local space and prefabs are authored
//! Y-up. The volume resolver therefore compares prefab Y against volume Z and
//! prefab Z against volume Y, and bakes a fixed correction into the local
//! rotation. Plane anchors share the prefab's X/Y axes and need neither.
//!
//! ## Volume pipeline
//!
//! 1. Resolve the cardinal axis (facing query and/or aspect ratio matching).
//! 2. Rotate the volume bounds by that axis and compute `volume / prefab`.
//! 3. Apply the scaling mode, then the alignment mode on the rotated bounds.

use crate::alignment::{apply_plane_alignment, apply_volume_alignment};
use crate::anchor::{Anchor, AnchorBounds};
use crate::error::{Result, RoomFitError};
use crate::math::{Bounds3, EulerRot, Quat, Vec3, ordered_max, ordered_min};
use crate::policy::{CardinalAxis, CustomFitPolicy, FitPolicy};
use crate::room::RoomQuery;
use crate::scaling::{apply_plane_scaling, apply_volume_scaling};

/// Local transform of a fitted prefab relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefabTransform {
    pub position: Vec3,
    /// Euler angles in degrees, applied Z first, then X, then Y
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl PrefabTransform {
    pub fn rotation(&self) -> Quat {
        let radians = self.rotation_euler * (std::f32::consts::PI / 180.0);
        Quat::from_euler(EulerRot::YXZ, radians.y, radians.x, radians.z)
    }
}

/// Outcome of the orientation stage of the volume resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedFit {
    pub cardinal: CardinalAxis,
    /// Anchor volume rotated by `cardinal`
    pub volume_bounds: Bounds3,
    /// Raw `volume / prefab` scale for the rotated volume
    pub scale: Vec3,
}

/// Rotates volume bounds by a quarter-turn multiple about the volume up axis.
///
/// Quarter turns swap the X and Y extents. The half turn leaves the extents
/// alone and writes `(-center.x, -center.x, center.z)` as the new center.
pub fn rotate_volume_bounds(bounds: &Bounds3, axis: CardinalAxis) -> Bounds3 {
    let center = bounds.center;
    let size = bounds.size;
    match axis {
        CardinalAxis::Deg0 => *bounds,
        CardinalAxis::Deg90 => Bounds3::new(
            Vec3::new(-center.y, center.x, center.z),
            Vec3::new(size.y, size.x, size.z),
        ),
        CardinalAxis::Deg180 => Bounds3::new(Vec3::new(-center.x, -center.x, center.z), size),
        CardinalAxis::Deg270 => Bounds3::new(
            Vec3::new(center.y, -center.x, center.z),
            Vec3::new(size.y, size.x, size.z),
        ),
    }
}

/// Per-axis `volume / prefab` scale with the prefab's Y and Z read against
/// the volume's Z and Y.
pub fn volume_scale(volume: &Bounds3, prefab_size: Vec3) -> Vec3 {
    Vec3::new(
        volume.size.x / prefab_size.x,
        volume.size.z / prefab_size.y,
        volume.size.y / prefab_size.z,
    )
}

fn orient(volume: &Bounds3, cardinal: CardinalAxis, prefab_size: Vec3) -> OrientedFit {
    let volume_bounds = rotate_volume_bounds(volume, cardinal);
    OrientedFit {
        cardinal,
        volume_bounds,
        scale: volume_scale(&volume_bounds, prefab_size),
    }
}

/// How far a scale is from uniform in the horizontal plane.
fn xz_distortion(scale: Vec3) -> f32 {
    ordered_max(scale.x, scale.z) / ordered_min(scale.x, scale.z)
}

fn require_room<'a>(room: Option<&'a dyn RoomQuery>) -> Result<&'a dyn RoomQuery> {
    room.ok_or_else(|| {
        RoomFitError::Configuration("facing away from walls requires a room to query".to_string())
    })
}

/// Chooses the cardinal axis for a volume fit and returns the rotated bounds
/// and raw scale that go with it.
///
/// With aspect ratio matching the prefab is turned a quarter when that
/// distorts it less in the XZ plane; an exact tie keeps it unturned. When the
/// facing query is also enabled it only picks among the axes that agree with
/// that decision.
pub fn resolve_cardinal_fit(
    anchor: &Anchor,
    volume: &Bounds3,
    prefab_size: Vec3,
    policy: &FitPolicy,
    room: Option<&dyn RoomQuery>,
) -> Result<OrientedFit> {
    let mut cardinal = CardinalAxis::Deg0;
    if policy.face_away_from_wall && !policy.match_aspect_ratio {
        cardinal = require_room(room)?.direction_away_from_closest_wall(anchor, &[])?;
    }

    let fit = orient(volume, cardinal, prefab_size);
    if !policy.match_aspect_ratio {
        return Ok(fit);
    }

    let rotated_size = Vec3::new(prefab_size.z, prefab_size.y, prefab_size.x);
    let rotated_scale = volume_scale(&fit.volume_bounds, rotated_size);
    let rotate = xz_distortion(fit.scale) > xz_distortion(rotated_scale);
    if rotate {
        cardinal = CardinalAxis::Deg90;
    }

    if policy.face_away_from_wall {
        let excluded = if rotate {
            [CardinalAxis::Deg0, CardinalAxis::Deg180]
        } else {
            [CardinalAxis::Deg90, CardinalAxis::Deg270]
        };
        cardinal = require_room(room)?.direction_away_from_closest_wall(anchor, &excluded)?;
    }

    log::debug!(
        "Anchor {}: aspect ratio match {} the prefab, cardinal axis {:?}",
        anchor.id,
        if rotate { "turns" } else { "keeps" },
        cardinal
    );

    if cardinal == CardinalAxis::Deg0 {
        Ok(fit)
    } else {
        Ok(orient(volume, cardinal, prefab_size))
    }
}

fn warn_if_degenerate(anchor: &Anchor, raw_scale: Vec3) {
    if !raw_scale.is_finite() {
        log::warn!(
            "Anchor {}: degenerate anchor or prefab size gives scale {:?}",
            anchor.id,
            raw_scale
        );
    }
}

fn effective_bounds<'a>(prefab: Option<&'a Bounds3>, policy: &FitPolicy) -> Option<&'a Bounds3> {
    if policy.ignore_prefab_size { None } else { prefab }
}

/// Fits a prefab onto a volume anchor.
///
/// # Errors
///
/// - [`RoomFitError::MissingVolume`] if the anchor is a plane
/// - a configuration error if the facing query is enabled without `room`
/// - custom policy errors for `Custom` modes without `custom`
pub fn resolve_volume_fit(
    anchor: &Anchor,
    prefab: Option<&Bounds3>,
    policy: &FitPolicy,
    room: Option<&dyn RoomQuery>,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<PrefabTransform> {
    let volume = anchor
        .volume_bounds()
        .ok_or(RoomFitError::MissingVolume(anchor.id))?;
    let prefab = effective_bounds(prefab, policy);
    let prefab_size = prefab.map_or(Vec3::ONE, |bounds| bounds.size);

    let fit = resolve_cardinal_fit(anchor, volume, prefab_size, policy, room)?;
    warn_if_degenerate(anchor, fit.scale);
    let scale = apply_volume_scaling(fit.scale, policy.scaling, custom)?;
    let position =
        apply_volume_alignment(&fit.volume_bounds, prefab, scale, policy.alignment, custom)?;

    Ok(PrefabTransform {
        position,
        rotation_euler: Vec3::new((fit.cardinal.index() as f32 - 1.0) * 90.0, -90.0, -90.0),
        scale,
    })
}

/// Fits a prefab onto a plane anchor. The rotation is always identity.
///
/// # Errors
///
/// - [`RoomFitError::MissingPlaneRect`] if the anchor is a volume
/// - custom policy errors for `Custom` modes without `custom`
pub fn resolve_plane_fit(
    anchor: &Anchor,
    prefab: Option<&Bounds3>,
    policy: &FitPolicy,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<PrefabTransform> {
    let rect = anchor
        .plane_rect()
        .ok_or(RoomFitError::MissingPlaneRect(anchor.id))?;
    let prefab = effective_bounds(prefab, policy);
    let prefab_size = prefab.map_or(Vec3::ONE, |bounds| bounds.size);

    let raw = rect.size / prefab_size.truncate();
    warn_if_degenerate(anchor, raw.extend(1.0));
    let scale = apply_plane_scaling(raw, policy.scaling, custom)?;
    let position =
        apply_plane_alignment(rect, prefab, scale.truncate(), policy.alignment, custom)?;

    Ok(PrefabTransform {
        position,
        rotation_euler: Vec3::ZERO,
        scale,
    })
}

/// Fits a prefab onto any anchor, using the resolver that matches its bounds.
pub fn resolve_anchor_fit(
    anchor: &Anchor,
    prefab: Option<&Bounds3>,
    policy: &FitPolicy,
    room: Option<&dyn RoomQuery>,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<PrefabTransform> {
    match anchor.bounds {
        AnchorBounds::Volume(_) => resolve_volume_fit(anchor, prefab, policy, room, custom),
        AnchorBounds::Plane(_) => resolve_plane_fit(anchor, prefab, policy, custom),
    }
}
