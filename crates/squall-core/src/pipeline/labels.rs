//! Copies source label files next to augmented outputs.

use std::path::{Path, PathBuf};

use crate::config::LabelsConfig;
use crate::effects::EffectKind;

/// Pairs each augmented output with its source image's label file.
///
/// `{stem}.{ext}` in the label directory is copied to
/// `{prefix}_{stem}.{ext}` in the output directory, matching the image
/// output `{prefix}_{stem}.{image_ext}`.
pub struct LabelPairer {
    source_dir: Option<PathBuf>,
    extension: String,
}

impl LabelPairer {
    pub fn new(source_dir: Option<PathBuf>, config: &LabelsConfig) -> Self {
        Self {
            source_dir,
            extension: config.extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.source_dir.is_some()
    }

    /// Label file for a source image, if pairing is enabled and it exists.
    pub fn source_label(&self, image_path: &Path) -> Option<PathBuf> {
        let dir = self.source_dir.as_ref()?;
        let stem = image_path.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(&self.extension);
        let label = dir.join(name);
        label.is_file().then_some(label)
    }

    /// Copy `label` into `output_dir` under the effect's prefix.
    pub fn copy(&self, label: &Path, output_dir: &Path, kind: EffectKind) -> std::io::Result<PathBuf> {
        let name = label
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = output_dir.join(kind.output_name(&name));
        std::fs::copy(label, &target)?;
        Ok(target)
    }
}
