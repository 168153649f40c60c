use std::path::PathBuf;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    dataset::sequence::{SequenceOptions, SequenceStats, generate_sequence},
    foundation::{
        error::{SynthError, SynthResult},
        rng::SceneRng,
    },
    scene::config::SceneConfig,
    sprite::template::SpriteTemplate,
};

pub const TRAINING_SPLIT: &str = "training";
pub const VALIDATION_SPLIT: &str = "validation";
pub const TEST_SPLIT: &str = "test";

/// One independent sequence of the dataset, written to `<output_root>/<name>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SplitSpec {
    pub name: String,
    pub frame_count: u64,
}

#[derive(Clone, Debug)]
pub struct DatasetPlan {
    pub output_root: PathBuf,
    pub splits: Vec<SplitSpec>,
    /// Base seed; split `i` runs with `SceneRng::derive_seed(seed, i)`.
    pub seed: u64,
    /// Remove an existing `output_root` first instead of refusing to run.
    pub overwrite: bool,
    /// Generate splits concurrently. Each split is its own simulator, so output is unchanged.
    pub parallel: bool,
    pub sequence: SequenceOptions,
}

impl DatasetPlan {
    /// The usual training/validation/test layout.
    pub fn standard(
        output_root: impl Into<PathBuf>,
        training: u64,
        validation: u64,
        test: u64,
        seed: u64,
    ) -> Self {
        let split = |name: &str, frame_count| SplitSpec {
            name: name.to_string(),
            frame_count,
        };
        Self {
            output_root: output_root.into(),
            splits: vec![
                split(TRAINING_SPLIT, training),
                split(VALIDATION_SPLIT, validation),
                split(TEST_SPLIT, test),
            ],
            seed,
            overwrite: false,
            parallel: true,
            sequence: SequenceOptions::default(),
        }
    }

    pub fn split_seed(&self, split_idx: usize) -> u64 {
        SceneRng::derive_seed(self.seed, split_idx as u64)
    }

    pub fn validate(&self) -> SynthResult<()> {
        if self.splits.is_empty() {
            return Err(SynthError::validation("dataset needs at least one split"));
        }
        let mut names: Vec<&str> = self.splits.iter().map(|s| s.name.as_str()).collect();
        if names.iter().any(|n| n.is_empty() || n.contains(['/', '\\'])) {
            return Err(SynthError::validation(
                "split names must be non-empty plain directory names",
            ));
        }
        names.sort_unstable();
        names.dedup();
        if names.len() != self.splits.len() {
            return Err(SynthError::validation("split names must be unique"));
        }
        Ok(())
    }
}

/// Generate every split of `plan`; returns per-split stats in plan order.
pub fn generate_dataset(
    templates: &[SpriteTemplate],
    config: &SceneConfig,
    plan: &DatasetPlan,
) -> SynthResult<Vec<(String, SequenceStats)>> {
    plan.validate()?;
    config.validate()?;

    if plan.output_root.exists() {
        if !plan.overwrite {
            return Err(SynthError::validation(format!(
                "output directory '{}' already exists (enable overwrite to replace it)",
                plan.output_root.display()
            )));
        }
        tracing::info!(root = %plan.output_root.display(), "removing old dataset");
        std::fs::remove_dir_all(&plan.output_root).with_context(|| {
            format!("remove old dataset '{}'", plan.output_root.display())
        })?;
    }

    let run = |(idx, split): (usize, &SplitSpec)| -> SynthResult<(String, SequenceStats)> {
        tracing::info!(split = %split.name, frames = split.frame_count, "generating split");
        let stats = generate_sequence(
            templates,
            config,
            plan.split_seed(idx),
            split.frame_count,
            &plan.output_root.join(&split.name),
            &plan.sequence,
        )?;
        Ok((split.name.clone(), stats))
    };

    if plan.parallel {
        plan.splits.par_iter().enumerate().map(run).collect()
    } else {
        plan.splits.iter().enumerate().map(run).collect()
    }
}
