//! Squall Core - adverse-weather augmentation for aerial imagery.
//!
//! Squall takes a directory of images and writes degraded variants of each one
//! (rain, fog, low light) into a subdirectory, so detectors can be trained on
//! conditions the original dataset lacks.
//!
//! # Architecture
//!
//! ```text
//! Validate dir → Enumerate → per file: Decode → Rain / Fog / LowLight → Write → RunReport
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use squall_core::{AugmentationJob, Augmenter, CancelToken, Config};
//!
//! #[tokio::main]
//! async fn main() -> squall_core::Result<()> {
//!     let config = Config::load()?;
//!     let job = AugmentationJob::new("./aerial/No Risk", &config);
//!
//!     let report = Augmenter::new(&config)?.run(&job, &CancelToken::new()).await?;
//!     println!("{} outputs in {:?}", report.outputs_written, report.output_dir);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod effects;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use effects::{EffectKind, EffectSet};
pub use error::{ConfigError, FileError, Result, RunError, SquallError};
pub use output::{save_report, ReportFormat, ReportWriter};
pub use pipeline::{Augmenter, CancelToken, DiscoveredFile};
pub use types::{AugmentationJob, FileOutcome, RunReport, SkipKind, SkippedFile};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
