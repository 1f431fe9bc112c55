//! Scaling policies applied to the raw `target / source` scale.

use crate::error::{Result, RoomFitError};
use crate::math::{Vec2, Vec3, ordered_min};
use crate::policy::{CustomFitPolicy, ScalingMode, require_custom};

/// Adjusts a per-axis volume scale according to `mode`.
///
/// Fails with [`RoomFitError::CustomModeNotHandled`] for [`ScalingMode::Custom`];
/// use [`apply_volume_scaling`] to route custom modes to a caller policy.
pub fn scale_prefab(scale: Vec3, mode: ScalingMode) -> Result<Vec3> {
    match mode {
        ScalingMode::Stretch => Ok(scale),
        ScalingMode::UniformScaling => {
            let xy = ordered_min(scale.x, scale.y);
            Ok(Vec3::splat(ordered_min(xy, scale.z)))
        }
        ScalingMode::UniformXZScale => {
            let xz = ordered_min(scale.x, scale.z);
            Ok(Vec3::new(xz, scale.y, xz))
        }
        ScalingMode::NoScaling => Ok(Vec3::ONE),
        ScalingMode::Custom => Err(RoomFitError::CustomModeNotHandled("scaling")),
    }
}

/// Adjusts a plane scale according to `mode`.
///
/// Both uniform modes equalize X and Y. The returned Z is the average of the
/// final X and Y, used as the depth scale of prefabs extruded from a plane.
pub fn scale_prefab_2d(scale: Vec2, mode: ScalingMode) -> Result<Vec3> {
    let scale = match mode {
        ScalingMode::Stretch => scale,
        ScalingMode::UniformScaling | ScalingMode::UniformXZScale => {
            Vec2::splat(ordered_min(scale.x, scale.y))
        }
        ScalingMode::NoScaling => Vec2::ONE,
        ScalingMode::Custom => return Err(RoomFitError::CustomModeNotHandled("scaling")),
    };
    Ok(scale.extend(0.5 * (scale.x + scale.y)))
}

/// [`scale_prefab`], with custom modes routed to `custom`.
pub fn apply_volume_scaling(
    scale: Vec3,
    mode: ScalingMode,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<Vec3> {
    match mode {
        ScalingMode::Custom => Ok(require_custom(custom, "scaling")?.scale_volume(scale)),
        _ => scale_prefab(scale, mode),
    }
}

/// [`scale_prefab_2d`], with custom modes routed to `custom`.
pub fn apply_plane_scaling(
    scale: Vec2,
    mode: ScalingMode,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<Vec3> {
    match mode {
        ScalingMode::Custom => Ok(require_custom(custom, "scaling")?.scale_plane(scale)),
        _ => scale_prefab_2d(scale, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedPolicy;

    #[test]
    fn test_stretch_is_identity() {
        let scale = Vec3::new(4.0, 2.0, 1.0);
        assert_eq!(scale_prefab(scale, ScalingMode::Stretch).unwrap(), scale);
    }

    #[test]
    fn test_uniform_scaling_uses_smallest_axis() {
        let scale = Vec3::new(4.0, 2.0, 3.0);
        assert_eq!(
            scale_prefab(scale, ScalingMode::UniformScaling).unwrap(),
            Vec3::splat(2.0)
        );
        let scale = Vec3::new(4.0, 2.0, 0.5);
        assert_eq!(
            scale_prefab(scale, ScalingMode::UniformScaling).unwrap(),
            Vec3::splat(0.5)
        );
    }

    #[test]
    fn test_uniform_xz_keeps_height() {
        for scale in [
            Vec3::new(4.0, 7.0, 2.0),
            Vec3::new(0.25, 0.1, 3.0),
            Vec3::new(1.0, -2.0, 1.0),
        ] {
            let result = scale_prefab(scale, ScalingMode::UniformXZScale).unwrap();
            assert_eq!(result.y, scale.y);
            assert_eq!(result.x, scale.x.min(scale.z));
            assert_eq!(result.z, result.x);
        }
    }

    #[test]
    fn test_no_scaling_is_unit() {
        for scale in [Vec3::new(4.0, 2.0, 1.0), Vec3::ZERO, Vec3::splat(f32::INFINITY)] {
            assert_eq!(scale_prefab(scale, ScalingMode::NoScaling).unwrap(), Vec3::ONE);
        }
        assert_eq!(
            scale_prefab_2d(Vec2::new(3.0, 5.0), ScalingMode::NoScaling).unwrap(),
            Vec3::ONE
        );
    }

    #[test]
    fn test_custom_builtin_is_error() {
        assert!(matches!(
            scale_prefab(Vec3::ONE, ScalingMode::Custom),
            Err(RoomFitError::CustomModeNotHandled("scaling"))
        ));
        assert!(scale_prefab_2d(Vec2::ONE, ScalingMode::Custom).is_err());
    }

    #[test]
    fn test_plane_scaling_synthesizes_depth() {
        let stretched = scale_prefab_2d(Vec2::new(2.0, 4.0), ScalingMode::Stretch).unwrap();
        assert_eq!(stretched, Vec3::new(2.0, 4.0, 3.0));

        let uniform = scale_prefab_2d(Vec2::new(2.0, 4.0), ScalingMode::UniformScaling).unwrap();
        assert_eq!(uniform, Vec3::new(2.0, 2.0, 2.0));

        let uniform_xz = scale_prefab_2d(Vec2::new(5.0, 1.0), ScalingMode::UniformXZScale).unwrap();
        assert_eq!(uniform_xz, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_zero_size_propagates_infinity() {
        let scale = Vec3::new(2.0, 1.0, 1.0) / Vec3::new(0.0, 1.0, 1.0);
        let result = scale_prefab(scale, ScalingMode::Stretch).unwrap();
        assert!(result.x.is_infinite());
    }

    #[test]
    fn test_custom_scaling_routes_to_policy() {
        let policy = FixedPolicy::default();
        let result =
            apply_volume_scaling(Vec3::ONE, ScalingMode::Custom, Some(&policy)).unwrap();
        assert_eq!(result, policy.scale);

        let result = apply_plane_scaling(Vec2::ONE, ScalingMode::Custom, Some(&policy)).unwrap();
        assert_eq!(result, policy.scale);

        assert!(matches!(
            apply_volume_scaling(Vec3::ONE, ScalingMode::Custom, None),
            Err(RoomFitError::CustomPolicyRequired("scaling"))
        ));

        let result =
            apply_volume_scaling(Vec3::new(2.0, 3.0, 4.0), ScalingMode::NoScaling, None).unwrap();
        assert_eq!(result, Vec3::ONE);
    }
}
