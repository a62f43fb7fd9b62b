//! Lazily created output directory and image persistence.

use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::effects::EffectKind;
use crate::error::FileError;

/// The output directory of a run.
///
/// Nothing touches the filesystem until the first output is saved, so a run
/// that fails validation or finds no images leaves no trace. Creation is
/// serialized across workers and happens at most once per run.
pub struct OutputDir {
    path: PathBuf,
    created: Mutex<bool>,
}

impl OutputDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            created: Mutex::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory if this run has not done so yet.
    pub fn ensure(&self) -> std::io::Result<()> {
        let mut created = self.created.lock().unwrap_or_else(|e| e.into_inner());
        if !*created {
            // create_dir_all tolerates a directory that already exists
            std::fs::create_dir_all(&self.path)?;
            tracing::debug!("Created output directory {:?}", self.path);
            *created = true;
        }
        Ok(())
    }

    /// Save one effect's output as `{prefix}_{file_name}`, overwriting any
    /// previous output of the same name.
    pub fn save(&self, image: &RgbImage, kind: EffectKind, file_name: &str) -> Result<PathBuf, FileError> {
        let path = self.path.join(kind.output_name(file_name));
        let write_error = |message: String| FileError::Write {
            path: path.clone(),
            effect: kind,
            message,
        };

        self.ensure()
            .map_err(|e| write_error(format!("Cannot create output directory: {}", e)))?;

        let format = ImageFormat::from_path(&path).map_err(|e| write_error(e.to_string()))?;
        image
            .save_with_format(&path, format)
            .map_err(|e| write_error(e.to_string()))?;

        Ok(path)
    }
}
