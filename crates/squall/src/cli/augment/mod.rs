//! The `squall augment` command.

mod setup;
mod summary;
pub mod types;

pub use types::{EffectArg, ReportFormatArg};

use clap::Args;
use squall_core::{
    config::expand_path, save_report, AugmentationJob, Augmenter, CancelToken, RunError,
    SquallError,
};
use std::path::{Path, PathBuf};

use setup::build_config;
use summary::{create_progress_bar, format_summary};

/// Arguments for the `augment` command.
#[derive(Args, Debug, Default)]
pub struct AugmentArgs {
    /// Directory of images to augment
    #[arg(required = true)]
    pub input: PathBuf,

    /// Number of images processed concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Effects to apply, comma separated (default: all)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub effects: Vec<EffectArg>,

    /// Directory of label files to copy alongside each output
    #[arg(short, long)]
    pub labels: Option<PathBuf>,

    /// Name of the output subdirectory
    #[arg(long)]
    pub output_dir_name: Option<String>,

    /// Per-file time budget in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Write a run report to this file
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormatArg::Json)]
    pub report_format: ReportFormatArg,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the augment command.
pub async fn execute(args: AugmentArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = build_config(&args, config_path)?;
    let input = expand_path(&args.input);
    let job = AugmentationJob::new(&input, &config);
    let augmenter = Augmenter::new(&config)?;

    let cancel = CancelToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, finishing files in flight...");
                cancel.cancel();
            }
        })
    };

    let total = if input.is_dir() {
        augmenter.discover(&input).len() as u64
    } else {
        0
    };
    let pb = if args.no_progress {
        indicatif::ProgressBar::hidden()
    } else {
        create_progress_bar(total)
    };

    let result = {
        let pb = pb.clone();
        augmenter
            .run_with_progress(&job, &cancel, move |outcome| summary::on_file(&pb, outcome))
            .await
    };
    watcher.abort();
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(SquallError::Run(RunError::DirectoryNotFound(dir))) => {
            anyhow::bail!(
                "Input directory not found: {}\n  Pass a directory containing .png, .jpg or .jpeg files.",
                dir.display()
            );
        }
        Err(SquallError::Run(RunError::NoImagesFound(dir))) => {
            anyhow::bail!(
                "No supported images found in {}\n  Supported formats: {}",
                dir.display(),
                config.processing.supported_formats.join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    };

    eprint!("{}", format_summary(&report));

    if let Some(ref path) = args.report {
        let path = expand_path(path);
        save_report(&path, &report, args.report_format.into())?;
        tracing::info!("Report written to {:?}", path);
    }

    if report.cancelled {
        anyhow::bail!("Run cancelled");
    }
    Ok(())
}
