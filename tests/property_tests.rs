//! Property-based tests for imageops-draw
//!
//! These tests use proptest to check the invariants of box normalization,
//! cropping and drawing over arbitrary inputs.

use image::{Luma, Rgb, Rgba};
use imageops_draw::{
    BoxSpec, Color, Crop, CropBox, CropError, DrawImage, DrawMask, DrawShapes, FloodFill, Image,
    Options, SmartCrop, Smudge,
};
use proptest::prelude::*;

/// Strategy for generating small but valid image dimensions
fn image_dimensions() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=20, 1u32..=20)
}

/// Strategy for generating RGB pixel values
fn rgb_pixel() -> impl Strategy<Value = Rgb<u8>> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb([r, g, b]))
}

/// Strategy for generating crop focus names
fn focus_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("none"),
        Just("center"),
        Just("entropy"),
        Just("attention"),
        Just("low"),
        Just("high"),
    ]
}

/// Strategy for generating pixel coordinates, biased towards the extremes
fn coordinate() -> impl Strategy<Value = i64> {
    prop_oneof![
        any::<i64>(),
        -50i64..50,
        Just(i64::MAX),
        Just(i64::MIN),
        Just(i64::from(u32::MAX)),
    ]
}

/// Strategy for generating drawing offsets in i32 range, biased towards the extremes
fn shape_coordinate() -> impl Strategy<Value = i32> {
    prop_oneof![any::<i32>(), -50i32..50, Just(i32::MAX), Just(i32::MIN)]
}

/// Whether a resolved extent is usable as a crop size
fn is_valid_extent(value: i64) -> bool {
    value > 0 && value <= i64::from(u32::MAX)
}

/// Create a test RGB image with given dimensions and fill pattern
fn create_test_rgb_image_with_pattern(
    width: u32,
    height: u32,
    pattern: impl Fn(u32, u32) -> Rgb<u8>,
) -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            image.put_pixel(x, y, pattern(x, y));
        }
    }
    image
}

proptest! {
    #[test]
    fn integer_boxes_are_fixed_points(
        left in -500i64..500,
        top in -500i64..500,
        width in 1i64..500,
        height in 1i64..500,
        (image_width, image_height) in (1u32..1000, 1u32..1000),
    ) {
        let resolved = BoxSpec::new(left, top, width, height)
            .normalize(image_width, image_height)
            .unwrap();

        prop_assert_eq!(resolved, CropBox {
            left,
            top,
            width: width as u32,
            height: height as u32,
        });
    }

    #[test]
    fn percentages_scale_with_their_axis(
        fractions in (-1.0f64..=1.0, -1.0f64..=1.0, 0.01f64..=1.0, 0.01f64..=1.0),
        (image_width, image_height) in (100u32..1000, 100u32..1000),
    ) {
        let (left, top, width, height) = fractions;
        let resolved = BoxSpec::new(left, top, width, height)
            .normalize(image_width, image_height)
            .unwrap();

        prop_assert_eq!(resolved.left, (left * f64::from(image_width)).round() as i64);
        prop_assert_eq!(resolved.top, (top * f64::from(image_height)).round() as i64);
        prop_assert_eq!(resolved.width, (width * f64::from(image_width)).round() as u32);
        prop_assert_eq!(resolved.height, (height * f64::from(image_height)).round() as u32);
        prop_assert!(resolved.width > 0 && resolved.height > 0);
    }

    #[test]
    fn fitting_boxes_crop_to_requested_size(
        (image_width, image_height) in image_dimensions(),
        seed in any::<(u32, u32, u32, u32)>(),
    ) {
        let width = seed.0 % image_width + 1;
        let height = seed.1 % image_height + 1;
        let left = seed.2 % (image_width - width + 1);
        let top = seed.3 % (image_height - height + 1);

        let image = create_test_rgb_image_with_pattern(image_width, image_height, |x, y| {
            Rgb([x as u8, y as u8, 0])
        });
        let cropped = image.crop_box(&BoxSpec::new(left, top, width, height)).unwrap();

        prop_assert_eq!(cropped.dimensions(), (width, height));
        prop_assert_eq!(cropped.get_pixel(0, 0), image.get_pixel(left, top));
    }

    #[test]
    fn smart_crop_returns_target_size(
        (image_width, image_height) in image_dimensions(),
        target in (1u32..=20, 1u32..=20),
        focus in focus_name(),
    ) {
        let width = target.0.min(image_width);
        let height = target.1.min(image_height);
        let image = create_test_rgb_image_with_pattern(image_width, image_height, |x, y| {
            Rgb([(x * 13) as u8, (y * 29) as u8, ((x ^ y) * 7) as u8])
        });

        let cropped = image
            .smart_crop(width, height, &Options::new().with("focus", focus))
            .unwrap();
        prop_assert_eq!(cropped.dimensions(), (width, height));
    }

    #[test]
    fn drawing_preserves_dimensions(
        (image_width, image_height) in image_dimensions(),
        coordinates in (-30i32..30, -30i32..30, -30i32..30, -30i32..30),
        size in (1u32..25, 1u32..25),
        radius in 1i32..15,
        fill in any::<bool>(),
        stroke_width in 1i64..5,
    ) {
        let (x1, y1, x2, y2) = coordinates;
        let mut image: Image<Rgba<u8>> = Image::new(image_width, image_height);
        let options = Options::new()
            .with("color", Color::Rgba([255.0, 128.0, 0.0, 200.0]))
            .with("fill", fill)
            .with("stroke_width", stroke_width);

        image.draw_point(x1, y1, &options).unwrap();
        image.draw_rect(x1, y1, size.0, size.1, &options).unwrap();
        image.draw_circle(x2, y2, radius, &options).unwrap();
        image.draw_line(x1, y1, x2, y2, &options).unwrap();

        prop_assert_eq!(image.dimensions(), (image_width, image_height));
        prop_assert!(image
            .pixels()
            .all(|pixel| *pixel == Rgba([0, 0, 0, 0]) || *pixel == Rgba([255, 128, 0, 200])));
    }

    #[test]
    fn smudging_uniform_image_is_identity(
        (image_width, image_height) in image_dimensions(),
        pixel in rgb_pixel(),
        area in (0u32..20, 0u32..20, 1u32..20, 1u32..20),
    ) {
        let mut image: Image<Rgb<u8>> = Image::from_pixel(image_width, image_height, pixel);
        let before = image.clone();

        image.smudge(area.0, area.1, area.2, area.3).unwrap();
        prop_assert_eq!(image, before);
    }

    #[test]
    fn flood_region_stays_inside_image(
        (image_width, image_height) in image_dimensions(),
        seed in (0u32..20, 0u32..20),
    ) {
        let x = seed.0 % image_width;
        let y = seed.1 % image_height;
        let mut image = create_test_rgb_image_with_pattern(image_width, image_height, |x, y| {
            if (x + y) % 3 == 0 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        });
        let options = Options::new()
            .with("color", Color::Rgb([255.0, 0.0, 0.0]))
            .with("equal", true);

        let region = image.flood(x as i32, y as i32, &options).unwrap();

        prop_assert!(!region.is_empty());
        prop_assert!(region.left <= x && x < region.left + region.width);
        prop_assert!(region.top <= y && y < region.top + region.height);
        prop_assert!(region.left + region.width <= image_width);
        prop_assert!(region.top + region.height <= image_height);
        prop_assert_eq!(image.get_pixel(x, y), &Rgb([255, 0, 0]));
    }

    #[test]
    fn integer_boxes_normalize_without_panicking(
        spec in (coordinate(), coordinate(), coordinate(), coordinate()),
        (image_width, image_height) in (1u32..1000, 1u32..1000),
    ) {
        let (left, top, width, height) = spec;
        let result = BoxSpec::new(left, top, width, height).normalize(image_width, image_height);

        prop_assert_eq!(result.is_ok(), is_valid_extent(width) && is_valid_extent(height));
        if let Ok(resolved) = result {
            prop_assert_eq!((resolved.left, resolved.top), (left, top));
        }
    }

    #[test]
    fn any_percentage_normalizes_without_panicking(
        spec in (any::<f64>(), any::<f64>(), any::<f64>(), any::<f64>()),
        (image_width, image_height) in (1u32..1000, 1u32..1000),
    ) {
        let (left, top, width, height) = spec;
        if let Ok(resolved) = BoxSpec::new(left, top, width, height)
            .normalize(image_width, image_height)
        {
            prop_assert!(resolved.width > 0 && resolved.height > 0);
        }
    }

    #[test]
    fn crop_box_with_any_integers_fits_or_fails(
        (image_width, image_height) in image_dimensions(),
        spec in (coordinate(), coordinate(), coordinate(), coordinate()),
    ) {
        let (left, top, width, height) = spec;
        let image = create_test_rgb_image_with_pattern(image_width, image_height, |x, y| {
            Rgb([x as u8, y as u8, 0])
        });

        match image.crop_box(&BoxSpec::new(left, top, width, height)) {
            Ok(cropped) => {
                prop_assert_eq!(cropped.dimensions(), (width as u32, height as u32));
            }
            Err(CropError::InvalidBox(_)) => {
                prop_assert!(!is_valid_extent(width) || !is_valid_extent(height));
            }
            Err(other) => {
                prop_assert!(matches!(other, CropError::OutOfBounds { .. }), "{}", other);
            }
        }
    }

    #[test]
    fn rect_at_any_position_stays_on_canvas(
        (image_width, image_height) in image_dimensions(),
        corner in (shape_coordinate(), shape_coordinate()),
        size in (1u32..=u32::MAX, 1u32..=u32::MAX),
        fill in any::<bool>(),
        stroke_width in prop_oneof![1i64..5, Just(i64::from(u32::MAX))],
    ) {
        let mut image: Image<Rgb<u8>> = Image::new(image_width, image_height);
        let options = Options::new()
            .with("color", Color::Rgb([255.0, 255.0, 255.0]))
            .with("fill", fill)
            .with("stroke_width", stroke_width);

        prop_assert!(image.draw_rect(corner.0, corner.1, size.0, size.1, &options).is_ok());
        prop_assert_eq!(image.dimensions(), (image_width, image_height));
    }

    #[test]
    fn composite_at_any_offset_stays_on_canvas(
        (image_width, image_height) in image_dimensions(),
        offset in (coordinate(), coordinate()),
        stamp_size in (1u32..=8, 1u32..=8),
    ) {
        let mut canvas: Image<Rgba<u8>> = Image::new(image_width, image_height);
        let stamp: Image<Rgba<u8>> =
            Image::from_pixel(stamp_size.0, stamp_size.1, Rgba([255, 0, 0, 255]));

        prop_assert!(canvas.draw_image(&stamp, offset.0, offset.1, &Options::new()).is_ok());

        let overlaps = offset.0 < i64::from(image_width)
            && offset.0 > -i64::from(stamp_size.0)
            && offset.1 < i64::from(image_height)
            && offset.1 > -i64::from(stamp_size.1);
        let painted = canvas.pixels().any(|pixel| *pixel == Rgba([255, 0, 0, 255]));
        prop_assert_eq!(painted, overlaps);
    }

    #[test]
    fn mask_at_any_offset_stays_on_canvas(
        (image_width, image_height) in image_dimensions(),
        offset in (coordinate(), coordinate()),
        mask_size in (1u32..=8, 1u32..=8),
    ) {
        let mut image: Image<Rgb<u8>> = Image::new(image_width, image_height);
        let mask: Image<Luma<u8>> = Image::from_pixel(mask_size.0, mask_size.1, Luma([255]));
        let options = Options::new().with("color", Color::Rgb([255.0, 255.0, 255.0]));

        prop_assert!(image.draw_mask(&mask, offset.0, offset.1, &options).is_ok());

        let overlaps = offset.0 < i64::from(image_width)
            && offset.0 > -i64::from(mask_size.0)
            && offset.1 < i64::from(image_height)
            && offset.1 > -i64::from(mask_size.1);
        let painted = image.pixels().any(|pixel| *pixel == Rgb([255, 255, 255]));
        prop_assert_eq!(painted, overlaps);
    }
}
