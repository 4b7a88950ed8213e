mod error;
mod imageops_draw;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{BoxError, CropError, DrawError, OptionError};
pub use imageops_draw::color::{ink, Color};
pub use imageops_draw::composite::{BlendMode, DrawImage, ImageOptions};
pub use imageops_draw::crop_box::{BoxSpec, Crop, CropBox};
pub use imageops_draw::crop_focus::{CropFocus, CropOptions, Interesting};
pub use imageops_draw::flood::{FloodFill, FloodOptions, FloodRegion};
pub use imageops_draw::mask::{DrawMask, MaskOptions};
pub use imageops_draw::options::{FromOptions, OptionEnum, OptionValue, Options};
pub use imageops_draw::shapes::{
    CircleOptions, DrawShapes, InkOptions, LineOptions, PointOptions, RectOptions, ShapeOptions,
};
pub use imageops_draw::smart_crop::SmartCrop;
pub use imageops_draw::smudge::Smudge;

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
