//! Config assembly: file config plus command-line overrides.

use squall_core::Config;
use std::path::Path;

use super::AugmentArgs;

/// Load the config file and apply every override given on the command line.
pub fn build_config(args: &AugmentArgs, config_path: Option<&Path>) -> anyhow::Result<Config> {
    let config = crate::load_config(config_path)?;
    apply_overrides(config, args)
}

fn apply_overrides(mut config: Config, args: &AugmentArgs) -> anyhow::Result<Config> {
    if let Some(workers) = args.workers {
        config.processing.parallel_workers = workers;
    }
    if let Some(seed) = args.seed {
        config.processing.seed = Some(seed);
    }
    if !args.effects.is_empty() {
        config.processing.effects = args.effects.iter().map(|&e| e.into()).collect();
    }
    if let Some(ref name) = args.output_dir_name {
        config.processing.output_dir_name = name.clone();
    }
    if let Some(ref labels) = args.labels {
        config.labels.source_dir = Some(labels.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.limits.file_timeout_ms = timeout_ms;
    }

    config.validate()?;
    Ok(config)
}
