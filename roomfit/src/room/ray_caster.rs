//! Ray casting against the walls of a room.
//!
//! Wall rays are how a room decides which way an anchor should face. The
//! [`WallRayCaster`] trait lets hosts plug in their own scene queries (physics
//! raycasts, a scene mesh, etc.) instead of the plane test done by
//! [`Room`](super::Room).

use crate::math::Vec3;

/// Result of a ray against wall geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Whether the ray hit any wall
    pub hit: bool,

    /// Distance from ray origin to hit point (in meters)
    ///
    /// Only meaningful if `hit` is true
    pub distance: f32,

    /// Index of the wall that was hit, in the order the room lists its walls
    ///
    /// Only meaningful if `hit` is true
    pub wall_index: usize,

    /// Wall normal at the hit point, facing back towards the ray origin
    ///
    /// Only meaningful if `hit` is true
    pub normal: Vec3,
}

impl RayHit {
    /// Creates a miss result (no hit)
    pub fn miss() -> Self {
        Self {
            hit: false,
            distance: f32::INFINITY,
            wall_index: 0,
            normal: Vec3::ZERO,
        }
    }

    /// Creates a hit result
    pub fn new(distance: f32, wall_index: usize, normal: Vec3) -> Self {
        Self {
            hit: true,
            distance,
            wall_index,
            normal,
        }
    }

    /// Keeps whichever of the two results is the closer hit.
    pub fn closest(self, other: Self) -> Self {
        match (self.hit, other.hit) {
            (true, true) if other.distance < self.distance => other,
            (false, true) => other,
            _ => self,
        }
    }
}

impl Default for RayHit {
    fn default() -> Self {
        Self::miss()
    }
}

/// Trait for providing wall ray casts to the facing-direction query.
///
/// # Notes
///
/// - If multiple walls are hit, return the **closest** hit
/// - `direction` is expected to be normalized
pub trait WallRayCaster {
    /// Casts a ray from `origin` along `direction` up to `max_distance` meters.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> RayHit;
}
