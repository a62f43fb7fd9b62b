//! Pipeline orchestration: validate, enumerate, then decode/transform/write
//! every file on a bounded worker pool.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::effects::{file_rng, EffectKind, EffectSet};
use crate::error::{ConfigError, FileError, Result, RunError};
use crate::types::{AugmentationJob, FileOutcome, RunReport, SkippedFile};

use super::cancel::CancelToken;
use super::decode::ImageDecoder;
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::labels::LabelPairer;
use super::output::OutputDir;
use super::validate::Validator;

/// Applies every configured effect to every image in a directory.
pub struct Augmenter {
    config: Config,
    discovery: FileDiscovery,
}

/// Everything a worker needs to process one file. Shared read-only.
struct FileWorker {
    validator: Validator,
    decoder: ImageDecoder,
    effects: EffectSet,
    kinds: Vec<EffectKind>,
    output: OutputDir,
    labels: LabelPairer,
    seed: Option<u64>,
    timeout_ms: u64,
}

impl Augmenter {
    /// Build an orchestrator for `config`, rejecting values the run cannot use.
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            discovery: FileDiscovery::new(config.processing.clone()),
        })
    }

    /// Discover eligible images in a directory.
    pub fn discover(&self, dir: &Path) -> Vec<DiscoveredFile> {
        self.discovery.discover(dir)
    }

    /// Run a job to completion (or until cancelled).
    pub async fn run(&self, job: &AugmentationJob, cancel: &CancelToken) -> Result<RunReport> {
        self.run_with_progress(job, cancel, |_| {}).await
    }

    /// Run a job, calling `on_file` as each file finishes.
    ///
    /// Fails only with [`RunError`] conditions, before any output is written.
    /// Per-file failures are isolated and listed in the returned report.
    pub async fn run_with_progress<F>(
        &self,
        job: &AugmentationJob,
        cancel: &CancelToken,
        on_file: F,
    ) -> Result<RunReport>
    where
        F: Fn(&FileOutcome) + Send + Sync + 'static,
    {
        let start = Instant::now();

        if !job.input_dir.is_dir() {
            tracing::error!("Input directory does not exist: {:?}", job.input_dir);
            return Err(RunError::DirectoryNotFound(job.input_dir.clone()).into());
        }

        let files = self.discover(&job.input_dir);
        if files.is_empty() {
            tracing::warn!("No supported images found in {:?}", job.input_dir);
            return Err(RunError::NoImagesFound(job.input_dir.clone()).into());
        }
        tracing::info!(
            "Found {} image(s) in {:?} ({} bytes)",
            files.len(),
            job.input_dir,
            FileDiscovery::total_size(&files)
        );

        let mut report = RunReport::new(&job.input_dir, &job.output_dir, files.len());
        let worker = Arc::new(FileWorker {
            validator: Validator::new(self.config.limits.clone()),
            decoder: ImageDecoder::new(self.config.limits.clone()),
            effects: EffectSet::new(&self.config.effects),
            kinds: job.effects.clone(),
            output: OutputDir::new(&job.output_dir),
            labels: LabelPairer::new(self.config.label_dir(), &self.config.labels),
            seed: self.config.processing.seed,
            timeout_ms: self.config.limits.file_timeout_ms,
        });
        let budget = Duration::from_millis(self.config.limits.file_timeout_ms);
        let semaphore = Arc::new(Semaphore::new(self.config.processing.parallel_workers));
        let on_file = Arc::new(on_file);
        let mut tasks = JoinSet::new();
        let mut cancelled = false;

        for (index, file) in files.into_iter().enumerate() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                tracing::warn!("Worker semaphore closed unexpectedly, stopping batch");
                break;
            };
            // A slot may free up long after cancellation was requested
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let worker = worker.clone();
            let on_file = on_file.clone();
            tasks.spawn(async move {
                let outcome = process_with_budget(worker, index, file.path, budget).await;
                on_file(&outcome);
                drop(permit);
                outcome
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => report.record(&outcome),
                Err(e) => tracing::error!("Augmentation task failed: {e}"),
            }
        }

        if cancelled {
            tracing::warn!(
                "Run cancelled after {} of {} file(s)",
                report.images_handled(),
                report.images_found
            );
        }
        report.finish(start.elapsed(), cancelled);
        tracing::info!(
            "Wrote {} output(s) to {:?} in {:?}",
            report.outputs_written,
            report.output_dir,
            start.elapsed()
        );
        Ok(report)
    }
}

/// Process one file on the blocking pool, bounded by `budget`.
///
/// The blocking task is always joined, so a worker slot is only released once
/// its file is really finished. On expiry the task is told to stop and
/// reports whatever it wrote before noticing.
async fn process_with_budget(
    worker: Arc<FileWorker>,
    index: usize,
    path: std::path::PathBuf,
    budget: Duration,
) -> FileOutcome {
    let deadline = Instant::now() + budget;
    let stop = CancelToken::new();
    let mut blocking = tokio::task::spawn_blocking({
        let path = path.clone();
        let stop = stop.clone();
        move || worker.process(index, &path, deadline, &stop)
    });

    let within_budget = tokio::time::timeout(budget, &mut blocking).await;
    let joined = match within_budget {
        Ok(joined) => joined,
        Err(_) => {
            tracing::warn!(
                "{:?} exceeded its {}ms budget, stopping after the current step",
                path,
                budget.as_millis()
            );
            stop.cancel();
            blocking.await
        }
    };

    joined.unwrap_or_else(|e| {
        let error = FileError::Worker {
            path: path.clone(),
            message: e.to_string(),
        };
        tracing::error!("{}", error);
        FileOutcome::failed(&path, &error)
    })
}

impl FileWorker {
    /// Load → transform → write for one file. Never fails as a whole: every
    /// problem is recorded in the returned outcome.
    ///
    /// Stops before the next effect once `deadline` passes or `stop` is set,
    /// keeping the outputs already written and recording a timeout.
    fn process(&self, index: usize, path: &Path, deadline: Instant, stop: &CancelToken) -> FileOutcome {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", path);

        let decoded = match self
            .validator
            .validate(path)
            .and_then(|()| self.decoder.decode(path))
        {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                return FileOutcome::failed(path, &e);
            }
        };
        tracing::trace!("  Decode: {:?}", start.elapsed());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut outcome = FileOutcome::new(path);
        let label = self.labels.source_label(path);
        if self.labels.is_enabled() && label.is_none() {
            tracing::debug!("No label file for {:?}", path);
            outcome.label_missing = true;
        }

        let mut rng = file_rng(self.seed, index);
        for &kind in &self.kinds {
            if stop.is_cancelled() || Instant::now() >= deadline {
                let error = FileError::Timeout {
                    path: path.to_path_buf(),
                    timeout_ms: self.timeout_ms,
                };
                tracing::warn!("{} ({} output(s) kept)", error, outcome.written.len());
                outcome.skipped.push(SkippedFile::from_error(path, &error));
                return outcome;
            }

            let effect_start = Instant::now();
            let augmented = self.effects.apply(kind, &decoded.image, &mut rng);
            tracing::trace!("  {}: {:?}", kind, effect_start.elapsed());

            match self.output.save(&augmented, kind, &file_name) {
                Ok(written) => {
                    outcome.written.push(written);
                    if let Some(label) = &label {
                        match self.labels.copy(label, self.output.path(), kind) {
                            Ok(_) => outcome.labels_copied += 1,
                            Err(e) => {
                                tracing::warn!("Failed to copy label {:?}: {}", label, e)
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    outcome.skipped.push(SkippedFile::from_error(path, &e));
                }
            }
        }

        tracing::debug!(
            "Processed {:?} in {:?} ({:?} {}x{}, {} output(s))",
            file_name,
            start.elapsed(),
            decoded.format,
            decoded.image.width(),
            decoded.image.height(),
            outcome.written.len()
        );
        outcome
    }
}
