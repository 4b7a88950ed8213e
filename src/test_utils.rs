//! Test utilities for imageops-draw
//!
//! This module provides common fixtures for testing drawing and cropping.
//! It is only compiled when running tests.

use image::{Luma, Rgb, Rgba};
use itertools::iproduct;

use crate::Image;

/// Creates an RGB image whose pixels differ at every position.
///
/// Red grows with `x`, green with `y`, and blue with their sum, so a crop
/// can be checked by comparing pixels with the source image.
///
/// # Arguments
/// * `width` - Width of the image to create, at most 256
/// * `height` - Height of the image to create, at most 256
pub fn create_gradient_rgb_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(width, height);
    iproduct!(0..height, 0..width).for_each(|(y, x)| {
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        image.put_pixel(x, y, Rgb([r, g, b]));
    });
    image
}

/// Creates a 2x2 RGBA image with one pixel per alpha level:
/// - (0,0): opaque
/// - (1,0): semi-transparent
/// - (0,1): mostly transparent
/// - (1,1): fully transparent
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates a square coverage mask that fades from full at the centre to
/// zero at the edges.
pub fn create_radial_mask(size: u32) -> Image<Luma<u8>> {
    let mut mask: Image<Luma<u8>> = Image::new(size, size);
    let centre = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;
    iproduct!(0..size, 0..size).for_each(|(y, x)| {
        let distance = (x as f32 - centre).hypot(y as f32 - centre);
        let coverage = (1.0 - distance / radius).max(0.0);
        mask.put_pixel(x, y, Luma([(coverage * 255.0) as u8]));
    });
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn gradient_pixels_are_distinct() {
        let image = create_gradient_rgb_image(10, 8);
        assert_eq!(image.dimensions(), (10, 8));

        let distinct: HashSet<_> = image.pixels().map(|pixel| pixel.0).collect();
        assert_eq!(distinct.len(), 80);
    }

    #[test]
    fn radial_mask_peaks_in_centre() {
        let mask = create_radial_mask(5);
        assert_eq!(mask.get_pixel(2, 2), &Luma([255]));
        assert_eq!(mask.get_pixel(0, 0), &Luma([0]));
    }

    #[test]
    fn rgba_fixture_covers_alpha_levels() {
        let image = create_test_rgba_image();
        let alphas: Vec<u8> = image.pixels().map(|pixel| pixel.0[3]).collect();
        assert_eq!(alphas, vec![255, 128, 64, 0]);
    }
}
