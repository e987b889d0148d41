//! Pixel arrays for the grab workspace.
//!
//! Wraps the `image` crate to decode images into `Tensor<T>` from `grab-base`,
//! and provides the smoothing-free spatial resize used by the capture pipeline.
//!
//! All pixel tensors use HWC layout: `[height, width, channels]`.

pub mod error;
pub mod resize;
pub mod types;

pub use error::ImageError;
pub use resize::{ResizeFilter, resize};
pub use types::Image;

use crates_image::DynamicImage;
use grab_base::Tensor;
use std::path::Path;

fn to_tensor<T>(width: u32, height: u32, channels: usize, data: Vec<T>) -> Result<Tensor<T>, ImageError> {
    Ok(Tensor::new(vec![height as usize, width as usize, channels], data)?)
}

/// Decodes an image from raw bytes, keeping the native pixel precision.
///
/// The format is auto-detected by the `image` crate. Color layouts without a
/// direct tensor mapping are converted to RGBA8.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_image(data: &[u8]) -> Result<Image, ImageError> {
    let img = crates_image::load_from_memory(data)?;

    match img {
        DynamicImage::ImageLuma8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 1, buf.into_raw())?))
        }
        DynamicImage::ImageLumaA8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 2, buf.into_raw())?))
        }
        DynamicImage::ImageRgb8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 3, buf.into_raw())?))
        }
        DynamicImage::ImageRgba8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 4, buf.into_raw())?))
        }
        DynamicImage::ImageLuma16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 1, buf.into_raw())?))
        }
        DynamicImage::ImageLumaA16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 2, buf.into_raw())?))
        }
        DynamicImage::ImageRgb16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 3, buf.into_raw())?))
        }
        DynamicImage::ImageRgba16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 4, buf.into_raw())?))
        }
        DynamicImage::ImageRgb32F(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::F32(to_tensor(w, h, 3, buf.into_raw())?))
        }
        DynamicImage::ImageRgba32F(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::F32(to_tensor(w, h, 4, buf.into_raw())?))
        }
        _ => {
            let rgba = img.to_rgba8();
            let (w, h) = rgba.dimensions();
            Ok(Image::U8(to_tensor(w, h, 4, rgba.into_raw())?))
        }
    }
}

/// Reads and decodes an image file.
///
/// # Errors
///
/// Returns `ImageError::Io` if the file cannot be read, otherwise as [`decode_image`].
pub fn load_image(path: impl AsRef<Path>) -> Result<Image, ImageError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}
