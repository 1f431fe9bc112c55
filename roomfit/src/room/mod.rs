//! Rooms: the collection of anchors from one scan, plus the wall queries used to
//! orient prefabs.

mod ray_caster;

pub use ray_caster::{RayHit, WallRayCaster};

use crate::anchor::{Anchor, AnchorId, SceneLabel};
use crate::error::{Result, RoomFitError};
use crate::math::{Quat, Vec3};
use crate::policy::CardinalAxis;

/// Longest wall ray, in meters.
pub const MAX_WALL_RAY_DISTANCE: f32 = 1000.0;

/// The facing-direction query a room answers for the fit resolvers.
pub trait RoomQuery {
    /// Returns the cardinal axis that points away from the wall closest to
    /// `anchor`, ignoring the axes listed in `excluded`.
    fn direction_away_from_closest_wall(
        &self,
        anchor: &Anchor,
        excluded: &[CardinalAxis],
    ) -> Result<CardinalAxis>;
}

/// World space direction of `axis` for `anchor`.
///
/// Axis 0 is the anchor's local -Y; each further step is a quarter turn about
/// local Z, the volume up axis.
pub fn cardinal_direction(anchor: &Anchor, axis: CardinalAxis) -> Vec3 {
    let local = Quat::from_rotation_z(axis.yaw_degrees().to_radians()) * Vec3::NEG_Y;
    anchor.pose.transform_vector(local).normalize_or_zero()
}

/// Casts a ray along every non-excluded cardinal direction of `anchor` and
/// returns the axis opposite the closest wall hit.
///
/// Ties go to the lowest axis index. When nothing is hit, the first allowed
/// axis is returned unchanged.
pub fn away_from_closest_wall<C: WallRayCaster + ?Sized>(
    caster: &C,
    anchor: &Anchor,
    excluded: &[CardinalAxis],
) -> Result<CardinalAxis> {
    let origin = anchor.world_center();
    let mut allowed = CardinalAxis::ALL
        .into_iter()
        .filter(|axis| !excluded.contains(axis))
        .peekable();

    let Some(&first) = allowed.peek() else {
        return Err(RoomFitError::RoomQuery(format!(
            "every cardinal axis is excluded for anchor {}",
            anchor.id
        )));
    };

    let mut closest: Option<(CardinalAxis, f32)> = None;
    for axis in allowed {
        let direction = cardinal_direction(anchor, axis);
        let hit = caster.cast_ray(origin, direction, MAX_WALL_RAY_DISTANCE);
        if !hit.hit {
            continue;
        }
        log::trace!(
            "Anchor {} axis {:?}: wall {} at {:.3}m",
            anchor.id,
            axis,
            hit.wall_index,
            hit.distance
        );
        if closest.is_none_or(|(_, distance)| hit.distance < distance) {
            closest = Some((axis, hit.distance));
        }
    }

    Ok(match closest {
        Some((axis, _)) => axis.opposite(),
        None => {
            log::debug!(
                "No wall found around anchor {}, keeping axis {:?}",
                anchor.id,
                first
            );
            first
        }
    })
}

/// All anchors of a single scanned room.
#[derive(Debug, Clone, Default)]
pub struct Room {
    anchors: Vec<Anchor>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_anchors(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    /// Adds an anchor and returns its id.
    pub fn add_anchor(&mut self, anchor: Anchor) -> AnchorId {
        let id = anchor.id;
        self.anchors.push(anchor);
        id
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.iter().find(|anchor| anchor.id == id)
    }

    pub fn anchors_with_label(&self, label: SceneLabel) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter().filter(move |anchor| anchor.label == label)
    }

    /// Wall face anchors (visible and invisible), in insertion order.
    pub fn walls(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter().filter(|anchor| anchor.label.is_wall())
    }

    pub fn floor(&self) -> Option<&Anchor> {
        self.anchors_with_label(SceneLabel::Floor).next()
    }

    pub fn ceiling(&self) -> Option<&Anchor> {
        self.anchors_with_label(SceneLabel::Ceiling).next()
    }
}

/// Intersects a ray with the plane rect of a wall anchor.
fn intersect_wall(
    wall: &Anchor,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<(f32, Vec3)> {
    let rect = wall.plane_rect()?;
    let normal = wall.pose.forward();
    let denom = normal.dot(direction);
    if denom.abs() <= f32::EPSILON {
        return None;
    }

    let t = normal.dot(wall.pose.position - origin) / denom;
    if !(0.0..=max_distance).contains(&t) {
        return None;
    }

    let local = wall.pose.inverse_transform_point(origin + direction * t);
    if !rect.contains(local.truncate()) {
        return None;
    }

    let facing = if denom > 0.0 { -normal } else { normal };
    Some((t, facing))
}

impl WallRayCaster for Room {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> RayHit {
        self.walls()
            .enumerate()
            .filter_map(|(index, wall)| {
                intersect_wall(wall, origin, direction, max_distance)
                    .map(|(distance, normal)| RayHit::new(distance, index, normal))
            })
            .fold(RayHit::miss(), RayHit::closest)
    }
}

impl RoomQuery for Room {
    fn direction_away_from_closest_wall(
        &self,
        anchor: &Anchor,
        excluded: &[CardinalAxis],
    ) -> Result<CardinalAxis> {
        away_from_closest_wall(self, anchor, excluded)
    }
}
