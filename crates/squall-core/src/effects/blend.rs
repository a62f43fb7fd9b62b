//! Saturating per-channel arithmetic shared by the generators.
//!
//! All arithmetic is done in `f32` and converted back with [`saturate`]:
//! round half away from zero, then clamp to `[0, 255]`.

use image::RgbImage;

/// Round to nearest (ties away from zero) and clamp into a channel value.
#[inline]
pub fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Weighted sum `image_weight * image + overlay_weight * overlay`, per channel.
///
/// Both images must have the same dimensions.
pub fn blend(image: &RgbImage, image_weight: f32, overlay: &RgbImage, overlay_weight: f32) -> RgbImage {
    debug_assert_eq!(image.dimensions(), overlay.dimensions());

    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for ((dst, &a), &b) in out.iter_mut().zip(image.iter()).zip(overlay.iter()) {
        *dst = saturate(a as f32 * image_weight + b as f32 * overlay_weight);
    }
    out
}

/// Blend every channel toward a constant level.
///
/// Equivalent to [`blend`] against a uniform overlay filled with `level`,
/// without materializing the overlay.
pub fn blend_toward(image: &RgbImage, level: u8, weight: f32) -> RgbImage {
    let base = level as f32 * weight;
    map_channels(image, |c| saturate(c as f32 * (1.0 - weight) + base))
}

/// Multiply every channel by `factor`.
pub fn scale(image: &RgbImage, factor: f32) -> RgbImage {
    map_channels(image, |c| saturate(c as f32 * factor))
}

fn map_channels(image: &RgbImage, f: impl Fn(u8) -> u8) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for (dst, &src) in out.iter_mut().zip(image.iter()) {
        *dst = f(src);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_saturate_rounds_and_clamps() {
        assert_eq!(saturate(-3.2), 0);
        assert_eq!(saturate(0.49), 0);
        assert_eq!(saturate(0.5), 1);
        assert_eq!(saturate(127.5), 128);
        assert_eq!(saturate(254.6), 255);
        assert_eq!(saturate(300.0), 255);
    }

    #[test]
    fn test_blend_saturates() {
        let a = RgbImage::from_pixel(2, 2, Rgb([250, 10, 0]));
        let b = RgbImage::from_pixel(2, 2, Rgb([250, 10, 0]));
        let out = blend(&a, 0.8, &b, 0.8);
        assert_eq!(out.get_pixel(1, 1), &Rgb([255, 16, 0]));
    }

    #[test]
    fn test_blend_toward_white() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 100, 255]));
        let out = blend_toward(&img, 255, 0.5);
        assert_eq!(out.get_pixel(0, 0), &Rgb([128, 178, 255]));
    }

    #[test]
    fn test_scale_darkens() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 101, 255]));
        let out = scale(&img, 0.5);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 51, 128]));
    }
}
