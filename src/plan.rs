use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Error;
use crate::frames::FrameList;
use crate::settings::ExportSettings;

/// The resolved inputs for one encode: a concrete frame order plus the
/// uniform per-frame delay in milliseconds. Computed fresh for every preview
/// or export action, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub paths: Vec<PathBuf>,
    pub delay_ms: u32,
}

/// Resolve the current list and settings into a plan, shuffling with the
/// process RNG when `random_order` is set. The shuffle is intentionally
/// unseeded; each plan gets a fresh order.
pub fn build_plan(frames: &FrameList, settings: &ExportSettings) -> Result<RenderPlan, Error> {
    build_plan_with(frames, settings, &mut rand::rng())
}

/// Same as [`build_plan`] with a caller-supplied random source, so tests can
/// substitute a seeded generator.
pub fn build_plan_with<R: Rng>(
    frames: &FrameList,
    settings: &ExportSettings,
    rng: &mut R,
) -> Result<RenderPlan, Error> {
    if frames.is_empty() {
        return Err(Error::EmptyFrameList);
    }

    let mut paths = frames.paths().to_vec();
    if settings.random_order {
        paths.shuffle(rng);
    }

    Ok(RenderPlan {
        paths,
        // Truncation, not rounding.
        delay_ms: (settings.delay * 1000.0) as u32,
    })
}
