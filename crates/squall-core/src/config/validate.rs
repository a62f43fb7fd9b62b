//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// NaN compares false against every bound, so range checks alone let it through.
fn require_finite(fields: &[(&str, f32)]) -> Result<(), ConfigError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(ConfigError::ValidationError(format!(
            "{name} must be a finite number"
        ))),
        None => Ok(()),
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let processing = &self.processing;
        if processing.parallel_workers == 0 {
            return Err(invalid("processing.parallel_workers must be > 0"));
        }
        if processing.supported_formats.is_empty() {
            return Err(invalid("processing.supported_formats must not be empty"));
        }
        if processing.output_dir_name.trim().is_empty()
            || processing.output_dir_name.contains(['/', '\\'])
            || processing.output_dir_name == ".."
            || processing.output_dir_name == "."
        {
            return Err(invalid(
                "processing.output_dir_name must be a single directory name",
            ));
        }
        if processing.effects.is_empty() {
            return Err(invalid("processing.effects must name at least one effect"));
        }

        if self.limits.max_file_size_mb == 0 {
            return Err(invalid("limits.max_file_size_mb must be > 0"));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(invalid("limits.max_image_dimension must be > 0"));
        }
        if self.limits.file_timeout_ms == 0 {
            return Err(invalid("limits.file_timeout_ms must be > 0"));
        }

        let effects = &self.effects;
        require_finite(&[
            ("effects.rain.image_weight", effects.rain.image_weight),
            ("effects.rain.overlay_weight", effects.rain.overlay_weight),
            ("effects.fog.min_intensity", effects.fog.min_intensity),
            ("effects.fog.max_intensity", effects.fog.max_intensity),
            ("effects.fog.blur_sigma", effects.fog.blur_sigma),
            ("effects.low_light.min_scale", effects.low_light.min_scale),
            ("effects.low_light.max_scale", effects.low_light.max_scale),
        ])?;

        let rain = &effects.rain;
        if rain.min_streaks > rain.max_streaks {
            return Err(invalid("effects.rain.min_streaks must be <= max_streaks"));
        }
        if rain.min_dx > rain.max_dx {
            return Err(invalid("effects.rain.min_dx must be <= max_dx"));
        }
        if rain.min_dy > rain.max_dy {
            return Err(invalid("effects.rain.min_dy must be <= max_dy"));
        }
        if rain.image_weight < 0.0 || rain.overlay_weight < 0.0 {
            return Err(invalid("effects.rain blend weights must be >= 0"));
        }

        let fog = &effects.fog;
        if !(0.0..=1.0).contains(&fog.min_intensity) || !(0.0..=1.0).contains(&fog.max_intensity) {
            return Err(invalid("effects.fog intensities must be between 0.0 and 1.0"));
        }
        if fog.min_intensity > fog.max_intensity {
            return Err(invalid("effects.fog.min_intensity must be <= max_intensity"));
        }
        if fog.blur_kernel_size == 0 || fog.blur_kernel_size % 2 == 0 {
            return Err(invalid("effects.fog.blur_kernel_size must be odd"));
        }
        if fog.blur_sigma <= 0.0 {
            return Err(invalid("effects.fog.blur_sigma must be > 0"));
        }

        let low_light = &effects.low_light;
        if low_light.min_scale < 0.0 {
            return Err(invalid("effects.low_light.min_scale must be >= 0"));
        }
        if low_light.min_scale > low_light.max_scale {
            return Err(invalid("effects.low_light.min_scale must be <= max_scale"));
        }

        if self.labels.extension.trim().is_empty() {
            return Err(invalid("labels.extension must not be empty"));
        }
        Ok(())
    }
}
