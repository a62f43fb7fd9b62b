//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::effects::EffectKind;

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of files processed concurrently
    pub parallel_workers: usize,

    /// Accepted input extensions (matched case-insensitively)
    pub supported_formats: Vec<String>,

    /// Name of the output subdirectory created inside the input directory
    pub output_dir_name: String,

    /// Run seed for reproducible output; entropy-seeded when unset
    pub seed: Option<u64>,

    /// Effects applied to every image, in order
    pub effects: Vec<EffectKind>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
            supported_formats: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            output_dir_name: "Augmented_Images".to_string(),
            seed: None,
            effects: EffectKind::ALL.to_vec(),
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Budget for decoding, transforming and writing one file
    pub file_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
            file_timeout_ms: 30000,
        }
    }
}

/// Parameters of all effect generators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub rain: RainConfig,
    pub fog: FogConfig,
    pub low_light: LowLightConfig,
}

/// Rain streak settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Fewest streaks drawn per image
    pub min_streaks: u32,

    /// Most streaks drawn per image
    pub max_streaks: u32,

    /// Horizontal streak offset range
    pub min_dx: i32,
    pub max_dx: i32,

    /// Vertical streak offset range (positive = downward)
    pub min_dy: i32,
    pub max_dy: i32,

    /// Streak color (RGB)
    pub color: [u8; 3],

    /// Weight of the source image in the final blend
    pub image_weight: f32,

    /// Weight of the streak overlay in the final blend
    pub overlay_weight: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            min_streaks: 100,
            max_streaks: 500,
            min_dx: -5,
            max_dx: 5,
            min_dy: 10,
            max_dy: 30,
            color: [200, 200, 200],
            image_weight: 0.8,
            overlay_weight: 0.2,
        }
    }
}

/// Fog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Lower bound of the blend weight toward white
    pub min_intensity: f32,

    /// Upper bound of the blend weight toward white
    pub max_intensity: f32,

    /// Gaussian kernel size in pixels (odd; 1 disables the blur)
    pub blur_kernel_size: u32,

    /// Gaussian standard deviation
    pub blur_sigma: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            min_intensity: 0.2,
            max_intensity: 0.5,
            blur_kernel_size: 15,
            blur_sigma: 10.0,
        }
    }
}

/// Low-light settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LowLightConfig {
    /// Lower bound of the brightness multiplier
    pub min_scale: f32,

    /// Upper bound of the brightness multiplier
    pub max_scale: f32,
}

impl Default for LowLightConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            max_scale: 0.6,
        }
    }
}

/// Label pairing for augmented outputs.
///
/// Effects are photometric only, so a source image's label file applies
/// unchanged to each of its augmented variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Directory holding one label file per image stem; pairing is off when unset
    pub source_dir: Option<PathBuf>,

    /// Label file extension
    pub extension: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            extension: "txt".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
