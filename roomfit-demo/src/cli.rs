use crate::scene;
use anyhow::{Context, Result, bail};
use roomfit::{
    AlignMode, Anchor, Bounds3, CustomFitPolicy, FitPolicy, PrefabHandle, PrefabSpawner, Rect2,
    ScalingMode, SpawnerDesc, SpawnerEvent, Vec2, Vec3,
};

#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub seed: u64,
    pub scaling: ScalingMode,
    pub alignment: AlignMode,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            scaling: ScalingMode::UniformXZScale,
            alignment: AlignMode::Automatic,
        }
    }
}

impl DemoOptions {
    /// Parses `--seed <u64>`, `--scaling <mode>` and `--align <mode>`.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .with_context(|| format!("missing value after {}", flag))
            };
            match flag.as_str() {
                "--seed" => {
                    let raw = value()?;
                    options.seed = raw
                        .parse()
                        .with_context(|| format!("invalid seed: {}", raw))?;
                }
                "--scaling" => options.scaling = value()?.parse()?,
                "--align" => options.alignment = value()?.parse()?,
                other => bail!("unknown argument: {}", other),
            }
        }
        Ok(options)
    }
}

/// Shrinks prefabs to 80% of the raw fit and centers them; serves the
/// `custom` modes when they are picked on the command line.
struct InsetPolicy;

const INSET: f32 = 0.8;

impl CustomFitPolicy for InsetPolicy {
    fn select_prefab<'a>(
        &self,
        _anchor: &Anchor,
        candidates: &'a [PrefabHandle],
    ) -> Option<&'a PrefabHandle> {
        candidates.first()
    }

    fn scale_volume(&self, scale: Vec3) -> Vec3 {
        scale * INSET
    }

    fn scale_plane(&self, scale: Vec2) -> Vec3 {
        (scale * INSET).extend(1.0)
    }

    fn align_volume(&self, volume: &Bounds3, _prefab: Option<&Bounds3>, _scale: Vec3) -> Vec3 {
        volume.center
    }

    fn align_plane(&self, rect: &Rect2, _prefab: Option<&Bounds3>, _scale: Vec2) -> Vec3 {
        rect.center().extend(0.0)
    }
}

pub fn run(options: &DemoOptions) -> Result<()> {
    log::info!(
        "=== Fitting living room (seed {}, scaling {}, align {}) ===",
        options.seed,
        options.scaling,
        options.alignment
    );

    let room = scene::living_room();
    let furniture = FitPolicy::new()
        .scaling(options.scaling)
        .alignment(options.alignment);

    let mut desc = SpawnerDesc::new().seed(options.seed).log_unmatched_labels(true);
    for group in scene::prefab_groups(furniture) {
        desc = desc.group(group);
    }

    let mut spawner = PrefabSpawner::new(desc).with_custom_policy(Box::new(InsetPolicy));
    let placed = spawner
        .spawn_room(&room)
        .context("failed to spawn prefabs for the living room")?;

    for spawned in &placed {
        let label = room
            .anchor(spawned.anchor_id)
            .map(|anchor| format!("{:?}", anchor.label))
            .unwrap_or_default();
        log::info!(
            "{:<12} -> {:<14} scale {:?} position {:?} rotation {:?}",
            label,
            spawned.prefab_name,
            spawned.transform.scale,
            spawned.transform.position,
            spawned.transform.rotation_euler
        );
    }

    for event in spawner.poll_events() {
        match event {
            SpawnerEvent::AnchorSkipped { anchor_id, reason } => {
                log::info!("Skipped {}: {:?}", anchor_id, reason);
            }
            SpawnerEvent::RoomSpawned { spawned, skipped } => {
                log::info!("Room done: {} spawned, {} skipped", spawned, skipped);
            }
            _ => {}
        }
    }

    Ok(())
}
