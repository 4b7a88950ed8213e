use image::{Pixel, Primitive};
use imageproc::definitions::Clamp;
use itertools::iproduct;

use crate::error::{DrawError, OptionError};
use crate::imageops_draw::options::{FromOptions, OptionEnum, OptionValue, Options};
use crate::utils::{denormalize_with_max, normalize_with_max, rgb_alpha_layout};
use crate::Image;

/// How source colour channels combine with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Replace the destination outright, alpha included
    Source,
    #[default]
    Over,
    Multiply,
    Screen,
    Darken,
    Lighten,
}

impl OptionEnum for BlendMode {
    const VARIANTS: &'static [Self] = &[
        Self::Source,
        Self::Over,
        Self::Multiply,
        Self::Screen,
        Self::Darken,
        Self::Lighten,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Over => "over",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
        }
    }
}

impl BlendMode {
    /// Mixes one normalized source channel with the destination channel
    fn mix(self, source: f32, destination: f32) -> f32 {
        match self {
            Self::Source | Self::Over => source,
            Self::Multiply => source * destination,
            Self::Screen => source + destination - source * destination,
            Self::Darken => source.min(destination),
            Self::Lighten => source.max(destination),
        }
    }
}

/// Validated options for [`DrawImage`]
///
/// Recognized keys:
///
/// * `mode` - one of `source`, `over`, `multiply`, `screen`, `darken`, `lighten` (default `over`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageOptions {
    pub mode: BlendMode,
}

impl FromOptions for ImageOptions {
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        if key == "mode" {
            self.mode = BlendMode::parse(key, value)?;
        }
        Ok(())
    }
}

/// Trait providing in-place compositing of one image onto another
pub trait DrawImage {
    /// Composites `sub` onto the image with its top-left corner at (`x`, `y`)
    ///
    /// Parts of `sub` that fall outside the image are clipped.
    ///
    /// # Errors
    ///
    /// * `DrawError::InvalidOptions` - When the option list does not validate
    /// * `DrawError::UnsupportedPixel` - When the pixel type is not RGB or RGBA
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_draw::{DrawImage, Image, Options};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut canvas: Image<Rgb<u8>> = Image::from_pixel(4, 4, Rgb([200, 200, 200]));
    /// let stamp: Image<Rgb<u8>> = Image::from_pixel(2, 2, Rgb([255, 0, 0]));
    /// canvas.draw_image(&stamp, 1, 1, &Options::new().with("mode", "multiply"))?;
    /// assert_eq!(canvas.get_pixel(1, 1), &Rgb([200, 0, 0]));
    /// # Ok(())
    /// # }
    /// ```
    fn draw_image(
        &mut self,
        sub: &Self,
        x: i64,
        y: i64,
        options: &Options,
    ) -> Result<&mut Self, DrawError>;
}

impl<P> DrawImage for Image<P>
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    fn draw_image(
        &mut self,
        sub: &Self,
        x: i64,
        y: i64,
        options: &Options,
    ) -> Result<&mut Self, DrawError> {
        let ImageOptions { mode } = ImageOptions::from_options(options)?;
        let has_alpha = rgb_alpha_layout::<P>()?;

        let (width, height) = self.dimensions();
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(i64::from(sub.width())).min(i64::from(width));
        let y1 = y.saturating_add(i64::from(sub.height())).min(i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return Ok(self);
        }

        let max = P::Subpixel::DEFAULT_MAX_VALUE.into();
        for (target_y, target_x) in iproduct!(y0..y1, x0..x1) {
            let source = *sub.get_pixel((target_x - x) as u32, (target_y - y) as u32);
            let destination = self.get_pixel_mut(target_x as u32, target_y as u32);
            *destination = composite(mode, has_alpha, source, *destination, max);
        }
        Ok(self)
    }
}

/// Blends one pixel over another with unpremultiplied channels
fn composite<P>(mode: BlendMode, has_alpha: bool, source: P, destination: P, max: f32) -> P
where
    P: Pixel,
    P::Subpixel: Into<f32> + Clamp<f32>,
{
    if mode == BlendMode::Source {
        return source;
    }

    let source_channels = source.channels();
    let destination_channels = destination.channels();
    let color_count = if has_alpha {
        source_channels.len() - 1
    } else {
        source_channels.len()
    };
    let alpha_of = |channels: &[P::Subpixel]| {
        if has_alpha {
            normalize_with_max(channels[color_count], max)
        } else {
            1.0
        }
    };

    let source_alpha = alpha_of(source_channels);
    let destination_alpha = alpha_of(destination_channels);
    let out_alpha = source_alpha + destination_alpha * (1.0 - source_alpha);

    let mut result = destination;
    let result_channels = result.channels_mut();
    for index in 0..color_count {
        let s = normalize_with_max(source_channels[index], max);
        let d = normalize_with_max(destination_channels[index], max);
        let mixed = (1.0 - destination_alpha) * s + destination_alpha * mode.mix(s, d);
        let value = if out_alpha > 0.0 {
            (source_alpha * mixed + (1.0 - source_alpha) * destination_alpha * d) / out_alpha
        } else {
            0.0
        };
        result_channels[index] = denormalize_with_max(value, max);
    }
    if has_alpha {
        result_channels[color_count] = denormalize_with_max(out_alpha, max);
    }
    result
}
