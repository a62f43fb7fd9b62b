//! Core data types: the job handed to the orchestrator and the report it returns.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::effects::EffectKind;
use crate::error::FileError;

/// One augmentation run: where images come from, where outputs go, and which
/// effects to apply.
#[derive(Debug, Clone)]
pub struct AugmentationJob {
    /// Directory holding the source images
    pub input_dir: PathBuf,

    /// Subdirectory of `input_dir` receiving the outputs
    pub output_dir: PathBuf,

    /// Effects applied to every image, in order
    pub effects: Vec<EffectKind>,
}

impl AugmentationJob {
    /// Build a job for `input_dir` using the configured output name and effects.
    pub fn new(input_dir: impl Into<PathBuf>, config: &Config) -> Self {
        let input_dir = input_dir.into();
        let output_dir = input_dir.join(&config.processing.output_dir_name);
        Self {
            input_dir,
            output_dir,
            effects: Vec::new(),
        }
        .with_effects(config.processing.effects.iter().copied())
    }

    /// Restrict the job to the given effects (duplicates dropped, order kept).
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = EffectKind>) -> Self {
        let mut unique = Vec::new();
        for kind in effects {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        self.effects = unique;
        self
    }
}

/// Why a file or a single output was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    /// The source could not be read or decoded; no outputs for this file
    ImageDecodeError,
    /// One effect output could not be written; other outputs unaffected
    ImageWriteError,
    /// The file exceeded its processing budget; outputs written before
    /// that are kept
    Timeout,
    /// The worker processing the file panicked
    WorkerFailed,
}

/// A skipped file (or output) and the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Source file
    pub file: PathBuf,

    /// Effect whose output failed, for write errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<EffectKind>,

    pub kind: SkipKind,

    /// Human-readable reason
    pub reason: String,
}

impl SkippedFile {
    /// Classify a per-file error against its source file.
    pub fn from_error(file: &Path, error: &FileError) -> Self {
        let (kind, effect) = match error {
            FileError::Write { effect, .. } => (SkipKind::ImageWriteError, Some(*effect)),
            FileError::Timeout { .. } => (SkipKind::Timeout, None),
            FileError::Worker { .. } => (SkipKind::WorkerFailed, None),
            FileError::Decode { .. }
            | FileError::FileTooLarge { .. }
            | FileError::ImageTooLarge { .. } => (SkipKind::ImageDecodeError, None),
        };
        Self {
            file: file.to_path_buf(),
            effect,
            kind,
            reason: error.to_string(),
        }
    }
}

/// Outcome of processing one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Source file
    pub file: PathBuf,

    /// Outputs written for this file
    pub written: Vec<PathBuf>,

    /// Label files copied next to the outputs
    pub labels_copied: usize,

    /// Whether a label was expected but not found
    pub label_missing: bool,

    /// Failures for this file (a decode failure, or one entry per failed write)
    pub skipped: Vec<SkippedFile>,
}

impl FileOutcome {
    pub(crate) fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            written: Vec::new(),
            labels_copied: 0,
            label_missing: false,
            skipped: Vec::new(),
        }
    }

    pub(crate) fn failed(file: &Path, error: &FileError) -> Self {
        let mut outcome = Self::new(file);
        outcome.skipped.push(SkippedFile::from_error(file, error));
        outcome
    }

    /// True if the source never made it through decoding.
    pub fn is_unreadable(&self) -> bool {
        self.has_skip(SkipKind::ImageDecodeError)
    }

    pub fn timed_out(&self) -> bool {
        self.has_skip(SkipKind::Timeout)
    }

    fn has_skip(&self, kind: SkipKind) -> bool {
        self.skipped.iter().any(|s| s.kind == kind)
    }
}

/// Summary of a finished (or cancelled) run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Eligible files found in the input directory
    pub images_found: usize,

    /// Files that were decoded and transformed
    pub images_processed: usize,

    /// Files skipped before producing any output
    pub images_skipped_unreadable: usize,

    /// Files stopped by the per-file budget, possibly after some outputs
    pub images_timed_out: usize,

    /// Files whose worker panicked
    pub images_failed: usize,

    /// Output images written
    pub outputs_written: usize,

    /// Output images that failed to write
    pub outputs_failed: usize,

    /// Label files copied next to outputs
    pub labels_copied: usize,

    /// Source images with no label file in the label directory
    pub labels_missing: usize,

    /// Whether the run stopped early on request
    pub cancelled: bool,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,

    /// Every skipped file or output, sorted by file
    pub skipped: Vec<SkippedFile>,
}

impl RunReport {
    pub(crate) fn new(input_dir: &Path, output_dir: &Path, images_found: usize) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            images_found,
            ..Self::default()
        }
    }

    /// Fold one file's outcome into the totals.
    pub fn record(&mut self, outcome: &FileOutcome) {
        if outcome.is_unreadable() {
            self.images_skipped_unreadable += 1;
        } else if outcome.timed_out() {
            self.images_timed_out += 1;
        } else if outcome.has_skip(SkipKind::WorkerFailed) {
            self.images_failed += 1;
        } else {
            self.images_processed += 1;
        }
        self.outputs_written += outcome.written.len();
        self.outputs_failed += outcome
            .skipped
            .iter()
            .filter(|s| s.kind == SkipKind::ImageWriteError)
            .count();
        self.labels_copied += outcome.labels_copied;
        if outcome.label_missing {
            self.labels_missing += 1;
        }
        self.skipped.extend(outcome.skipped.iter().cloned());
    }

    /// Files handled so far, successfully or not.
    pub fn images_handled(&self) -> usize {
        self.images_processed
            + self.images_skipped_unreadable
            + self.images_timed_out
            + self.images_failed
    }

    pub(crate) fn finish(&mut self, elapsed: std::time::Duration, cancelled: bool) {
        self.skipped
            .sort_by(|a, b| a.file.cmp(&b.file).then(a.effect.cmp(&b.effect)));
        self.elapsed_ms = elapsed.as_millis() as u64;
        self.cancelled = cancelled;
    }
}
