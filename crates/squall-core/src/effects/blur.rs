//! Gaussian blur with an explicit kernel size.
//!
//! Filtering is done by `imageproc::filter::separable_filter_equal` on an
//! `f32` copy of the image, so rounding happens once at the end. Borders are
//! padded by continuity: pixels past the edge repeat the edge pixel.
//! A kernel size of 1 is the identity.

use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::filter::separable_filter_equal;

use super::blend::saturate;

/// A normalized 1-D Gaussian kernel applied along rows, then columns.
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    kernel: Vec<f32>,
}

impl GaussianBlur {
    /// Build a kernel of `size` taps with standard deviation `sigma`.
    ///
    /// Config validation only admits odd sizes, which keep the kernel centered.
    pub fn new(size: u32, sigma: f32) -> Self {
        let size = size.max(1);
        let center = (size - 1) as f32 / 2.0;
        let denom = 2.0 * sigma * sigma;

        let mut kernel: Vec<f32> = (0..size)
            .map(|i| {
                let d = i as f32 - center;
                (-(d * d) / denom).exp()
            })
            .collect();
        let sum: f32 = kernel.iter().sum();
        for w in kernel.iter_mut() {
            *w /= sum;
        }

        Self { kernel }
    }

    /// Kernel weights (sum to 1).
    pub fn weights(&self) -> &[f32] {
        &self.kernel
    }

    pub fn is_identity(&self) -> bool {
        self.kernel.len() == 1
    }

    /// Blur an image, returning a new image of the same size.
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        let (width, height) = image.dimensions();
        if self.is_identity() || width == 0 || height == 0 {
            return image.clone();
        }

        let float: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::from_fn(width, height, |x, y| {
            let p = image.get_pixel(x, y);
            Rgb([p[0] as f32, p[1] as f32, p[2] as f32])
        });
        let blurred = separable_filter_equal(&float, &self.kernel);

        RgbImage::from_fn(width, height, |x, y| {
            let p = blurred.get_pixel(x, y);
            Rgb([saturate(p[0]), saturate(p[1]), saturate(p[2])])
        })
    }
}
