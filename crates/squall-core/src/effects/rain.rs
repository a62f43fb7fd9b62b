//! Rain: light-gray streaks sloping downward, blended over the source.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use rand::Rng;

use super::blend::blend;
use crate::config::RainConfig;

/// One streak, from `start` to `end` in pixel coordinates.
///
/// The end point may lie outside the image; drawing clips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

/// Generates the rain effect.
#[derive(Debug, Clone)]
pub struct RainGenerator {
    config: RainConfig,
}

impl RainGenerator {
    pub fn new(config: RainConfig) -> Self {
        Self { config }
    }

    /// Draw a streak layout for an image of the given size.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, width: u32, height: u32) -> Vec<Streak> {
        let count = rng.gen_range(self.config.min_streaks..=self.config.max_streaks);
        if width == 0 || height == 0 {
            return Vec::new();
        }

        (0..count)
            .map(|_| {
                let x = rng.gen_range(0..width) as i32;
                let y = rng.gen_range(0..height) as i32;
                let dx = rng.gen_range(self.config.min_dx..=self.config.max_dx);
                let dy = rng.gen_range(self.config.min_dy..=self.config.max_dy);
                Streak {
                    start: (x, y),
                    end: (x + dx, y + dy),
                }
            })
            .collect()
    }

    /// Render the given streaks onto a blank overlay and blend it over `image`.
    pub fn render(&self, image: &RgbImage, streaks: &[Streak]) -> RgbImage {
        let (width, height) = image.dimensions();
        let mut overlay = RgbImage::new(width, height);
        let color = Rgb(self.config.color);

        for streak in streaks {
            draw_line_segment_mut(
                &mut overlay,
                (streak.start.0 as f32, streak.start.1 as f32),
                (streak.end.0 as f32, streak.end.1 as f32),
                color,
            );
        }

        blend(
            image,
            self.config.image_weight,
            &overlay,
            self.config.overlay_weight,
        )
    }

    /// Sample a streak layout from `rng` and render it.
    pub fn apply<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> RgbImage {
        let streaks = self.sample(rng, image.width(), image.height());
        tracing::trace!("rain: {} streaks", streaks.len());
        self.render(image, &streaks)
    }
}
