//! A small living room used by the demo.

use roomfit::{
    Anchor, Bounds3, FitPolicy, PrefabGroup, PrefabHandle, Pose, Quat, Rect2, Room, SceneLabel,
    SelectionMode, Vec2, Vec3,
};
use std::f32::consts::{FRAC_PI_2, PI};

/// A 5m x 4m room with a table, a couch, a window and a screen.
pub fn living_room() -> Room {
    let mut room = Room::new();

    let wall = |position: Vec3, yaw: f32, width: f32| {
        Anchor::plane(
            SceneLabel::WallFace,
            Pose::new(position, Quat::from_rotation_y(yaw)),
            Rect2::from_center_size(Vec2::ZERO, Vec2::new(width, 2.6)),
        )
    };
    room.add_anchor(wall(Vec3::new(0.0, 1.3, -2.0), 0.0, 5.0));
    room.add_anchor(wall(Vec3::new(0.0, 1.3, 2.0), PI, 5.0));
    room.add_anchor(wall(Vec3::new(-2.5, 1.3, 0.0), FRAC_PI_2, 4.0));
    room.add_anchor(wall(Vec3::new(2.5, 1.3, 0.0), -FRAC_PI_2, 4.0));

    let horizontal = |position: Vec3, pitch: f32, label: SceneLabel| {
        Anchor::plane(
            label,
            Pose::new(position, Quat::from_rotation_x(pitch)),
            Rect2::from_center_size(Vec2::ZERO, Vec2::new(5.0, 4.0)),
        )
    };
    room.add_anchor(horizontal(Vec3::ZERO, -FRAC_PI_2, SceneLabel::Floor));
    room.add_anchor(horizontal(Vec3::new(0.0, 2.6, 0.0), FRAC_PI_2, SceneLabel::Ceiling));

    let z_up = Quat::from_rotation_x(-FRAC_PI_2);
    room.add_anchor(Anchor::volume(
        SceneLabel::Table,
        Pose::new(Vec3::new(-0.8, 0.0, 0.3), z_up),
        Bounds3::new(Vec3::new(0.0, 0.0, 0.37), Vec3::new(1.4, 0.8, 0.74)),
    ));
    room.add_anchor(Anchor::volume(
        SceneLabel::Couch,
        Pose::new(Vec3::new(2.0, 0.0, 0.2), z_up),
        Bounds3::new(Vec3::new(0.0, 0.0, 0.45), Vec3::new(0.95, 2.1, 0.9)),
    ));

    room.add_anchor(Anchor::plane(
        SceneLabel::WindowFrame,
        Pose::new(Vec3::new(-1.0, 1.5, -1.99), Quat::IDENTITY),
        Rect2::from_center_size(Vec2::ZERO, Vec2::new(1.2, 1.1)),
    ));
    room.add_anchor(Anchor::plane(
        SceneLabel::Screen,
        Pose::new(Vec3::new(-2.49, 1.2, 0.4), Quat::from_rotation_y(FRAC_PI_2)),
        Rect2::from_center_size(Vec2::ZERO, Vec2::new(1.3, 0.75)),
    ));

    room
}

fn bottom_pivot(name: &str, size: Vec3) -> PrefabHandle {
    PrefabHandle::new(name, Bounds3::new(Vec3::new(0.0, size.y * 0.5, 0.0), size))
}

/// Prefab groups for the living room. `furniture` is the policy applied to
/// tables and couches.
pub fn prefab_groups(furniture: FitPolicy) -> Vec<PrefabGroup> {
    vec![
        PrefabGroup::new(
            SceneLabel::Table,
            vec![
                bottom_pivot("coffee_table", Vec3::new(1.0, 0.45, 0.6)),
                bottom_pivot("dining_table", Vec3::new(1.6, 0.75, 0.9)),
                bottom_pivot("stool", Vec3::new(0.4, 0.5, 0.4)),
            ],
        )
        .with_policy(furniture.selection(SelectionMode::ClosestSize)),
        PrefabGroup::new(SceneLabel::Couch, vec![bottom_pivot("sofa", Vec3::new(2.0, 0.85, 0.9))])
            .with_policy(furniture.match_aspect_ratio(true).face_away_from_wall(true)),
        PrefabGroup::new(
            [SceneLabel::WindowFrame, SceneLabel::Screen]
                .into_iter()
                .collect::<roomfit::LabelSet>(),
            vec![
                PrefabHandle::new(
                    "curtain",
                    Bounds3::new(Vec3::new(0.0, 0.0, 0.05), Vec3::new(1.0, 1.0, 0.1)),
                ),
                PrefabHandle::without_bounds("portal"),
            ],
        )
        .with_policy(FitPolicy::new()),
        PrefabGroup::new(SceneLabel::Floor, vec![PrefabHandle::without_bounds("rug")])
            .with_policy(FitPolicy::new().ignore_prefab_size(true)),
    ]
}
