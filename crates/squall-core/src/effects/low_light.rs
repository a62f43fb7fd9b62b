//! Low light: pure multiplicative darkening, no additive offset.

use image::RgbImage;
use rand::Rng;

use super::blend::scale;
use crate::config::LowLightConfig;

/// Generates the low-light effect.
#[derive(Debug, Clone)]
pub struct LowLightGenerator {
    config: LowLightConfig,
}

impl LowLightGenerator {
    pub fn new(config: LowLightConfig) -> Self {
        Self { config }
    }

    /// Draw a brightness scale in `[min_scale, max_scale]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.config.min_scale >= self.config.max_scale {
            return self.config.min_scale;
        }
        rng.gen_range(self.config.min_scale..=self.config.max_scale)
    }

    pub fn render(&self, image: &RgbImage, brightness: f32) -> RgbImage {
        scale(image, brightness)
    }

    pub fn apply<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> RgbImage {
        let brightness = self.sample(rng);
        tracing::trace!("low_light: scale {:.3}", brightness);
        self.render(image, brightness)
    }
}
