//! Fog: wash toward white, then soften with a Gaussian blur.

use image::RgbImage;
use rand::Rng;

use super::blend::blend_toward;
use super::blur::GaussianBlur;
use crate::config::FogConfig;

/// Generates the fog effect.
#[derive(Debug, Clone)]
pub struct FogGenerator {
    config: FogConfig,
    blur: GaussianBlur,
}

impl FogGenerator {
    pub fn new(config: FogConfig) -> Self {
        let blur = GaussianBlur::new(config.blur_kernel_size, config.blur_sigma);
        Self { config, blur }
    }

    /// Draw a fog intensity in `[min_intensity, max_intensity]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.config.min_intensity >= self.config.max_intensity {
            return self.config.min_intensity;
        }
        rng.gen_range(self.config.min_intensity..=self.config.max_intensity)
    }

    /// `(1 - intensity) * image + intensity * white`, then blurred.
    pub fn render(&self, image: &RgbImage, intensity: f32) -> RgbImage {
        let washed = blend_toward(image, u8::MAX, intensity);
        self.blur.apply(&washed)
    }

    pub fn apply<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> RgbImage {
        let intensity = self.sample(rng);
        tracing::trace!("fog: intensity {:.3}", intensity);
        self.render(image, intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unblurred() -> FogGenerator {
        FogGenerator::new(FogConfig {
            blur_kernel_size: 1,
            ..FogConfig::default()
        })
    }

    #[test]
    fn test_half_intensity_without_blur() {
        let generator = unblurred();
        let img = RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8])
        });

        let out = generator.render(&img, 0.5);

        for (src, dst) in img.pixels().zip(out.pixels()) {
            for c in 0..3 {
                let expected = (0.5 * src[c] as f64 + 0.5 * 255.0).round().min(255.0) as u8;
                assert_eq!(dst[c], expected);
            }
        }
    }

    #[test]
    fn test_intensity_range() {
        let generator = FogGenerator::new(FogConfig::default());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let i = generator.sample(&mut rng);
            assert!((0.2..=0.5).contains(&i));
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let generator = FogGenerator::new(FogConfig {
            min_intensity: 0.3,
            max_intensity: 0.3,
            ..FogConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generator.sample(&mut rng), 0.3);
    }

    #[test]
    fn test_fog_brightens_and_keeps_size() {
        let generator = FogGenerator::new(FogConfig::default());
        let img = RgbImage::from_pixel(30, 20, Rgb([40, 40, 40]));
        let mut rng = StdRng::seed_from_u64(11);

        let out = generator.apply(&img, &mut rng);

        assert_eq!(out.dimensions(), (30, 20));
        assert!(out.pixels().all(|p| p[0] > 40));
    }
}
