//! Progress bar and end-of-run summary.

use indicatif::{ProgressBar, ProgressStyle};
use squall_core::{FileOutcome, RunReport};
use std::fmt::Write as _;

/// Create a progress bar for `total` files.
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("starting...");
    pb
}

/// Advance the bar for one finished file.
pub fn on_file(pb: &ProgressBar, outcome: &FileOutcome) {
    pb.inc(1);
    let name = outcome
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if outcome.skipped.is_empty() {
        pb.set_message(name);
    } else {
        pb.set_message(format!("{name} (skipped {})", outcome.skipped.len()));
    }
}

/// Render the summary table printed after a run.
pub fn format_summary(report: &RunReport) -> String {
    let seconds = report.elapsed_ms as f64 / 1000.0;
    let rate = if seconds > 0.0 {
        report.images_handled() as f64 / seconds
    } else {
        0.0
    };

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "  ====================================");
    let _ = writeln!(out, "               Summary");
    let _ = writeln!(out, "  ====================================");
    let _ = writeln!(out, "    Found:        {:>8}", report.images_found);
    let _ = writeln!(out, "    Augmented:    {:>8}", report.images_processed);
    if report.images_skipped_unreadable > 0 {
        let _ = writeln!(out, "    Unreadable:   {:>8}", report.images_skipped_unreadable);
    }
    if report.images_timed_out > 0 {
        let _ = writeln!(out, "    Timed out:    {:>8}", report.images_timed_out);
    }
    if report.images_failed > 0 {
        let _ = writeln!(out, "    Failed:       {:>8}", report.images_failed);
    }
    let _ = writeln!(out, "    Outputs:      {:>8}", report.outputs_written);
    if report.outputs_failed > 0 {
        let _ = writeln!(out, "    Write fails:  {:>8}", report.outputs_failed);
    }
    if report.labels_copied > 0 || report.labels_missing > 0 {
        let _ = writeln!(out, "    Labels:       {:>8}", report.labels_copied);
        let _ = writeln!(out, "    No label:     {:>8}", report.labels_missing);
    }
    let _ = writeln!(out, "  ------------------------------------");
    let _ = writeln!(out, "    Duration:     {:>7.1}s", seconds);
    let _ = writeln!(out, "    Rate:         {:>7.1} img/sec", rate);
    if report.cancelled {
        let _ = writeln!(out, "    Cancelled before all files were processed");
    }
    let _ = writeln!(out, "  ====================================");

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "  Skipped:");
        for skip in &report.skipped {
            let _ = writeln!(out, "    {}: {}", skip.file.display(), skip.reason);
        }
    }
    let _ = writeln!(out, "  Output: {}", report.output_dir.display());
    out
}
