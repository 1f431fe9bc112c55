//! Prefab selection: which candidate of a group is spawned on an anchor.

use crate::anchor::Anchor;
use crate::error::{Result, RoomFitError};
use crate::policy::{CustomFitPolicy, SelectionMode, require_custom};
use crate::prefab::PrefabHandle;
use rand::Rng;
use rand::rngs::StdRng;

/// Picks one of `candidates` for `anchor` according to `mode`.
///
/// Returns `Ok(None)` for an empty candidate list whatever the mode, before
/// any configuration is checked.
///
/// # Errors
///
/// - [`SelectionMode::Random`] without `rng`
/// - [`SelectionMode::ClosestSize`] on an anchor without volume bounds
/// - [`SelectionMode::Custom`] without `custom`
pub fn select_prefab<'a>(
    anchor: &Anchor,
    candidates: &'a [PrefabHandle],
    mode: SelectionMode,
    rng: Option<&mut StdRng>,
    custom: Option<&dyn CustomFitPolicy>,
) -> Result<Option<&'a PrefabHandle>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    match mode {
        SelectionMode::Random => {
            let rng = rng.ok_or(RoomFitError::RandomGeneratorMissing)?;
            Ok(candidates.get(rng.gen_range(0..candidates.len())))
        }
        SelectionMode::ClosestSize => prefab_with_closest_size_to_anchor(anchor, candidates),
        SelectionMode::Custom => {
            Ok(require_custom(custom, "selection")?.select_prefab(anchor, candidates))
        }
    }
}

/// Returns the candidate whose average side length (cube root of its box
/// volume) is closest to the anchor volume's.
///
/// Candidates without bounds count as unit cubes. On an exact tie the earlier
/// candidate wins.
pub fn prefab_with_closest_size_to_anchor<'a>(
    anchor: &Anchor,
    candidates: &'a [PrefabHandle],
) -> Result<Option<&'a PrefabHandle>> {
    let volume = anchor
        .volume_bounds()
        .ok_or(RoomFitError::MissingVolume(anchor.id))?;
    let anchor_side = volume.volume().cbrt();

    let mut closest: Option<&PrefabHandle> = None;
    let mut closest_difference = f32::INFINITY;
    for prefab in candidates {
        let size = prefab.size_or_unit();
        let prefab_side = (size.x * size.y * size.z).cbrt();
        let difference = (anchor_side - prefab_side).abs();
        if difference < closest_difference {
            closest_difference = difference;
            closest = Some(prefab);
        }
    }

    if let Some(prefab) = closest {
        log::debug!(
            "Closest size to anchor {} is '{}' (side difference {:.3})",
            anchor.id,
            prefab.name,
            closest_difference
        );
    }
    Ok(closest)
}
