//! Conversions between [`PixelBuffer`] and the in-memory `ImageBuffer` types of the `image` crate.
//!
//! Decoding and encoding image files stays with the caller, only already
//! decoded 8-bit buffers are accepted here.

use image::{GrayAlphaImage, GrayImage, ImageBuffer, RgbImage, RgbaImage};

use super::{ChannelLayout, PixelBuffer};
use crate::error::VaultError;

macro_rules! image_buffer_interop {
    ($image:ty, $layout:expr) => {
        impl From<$image> for PixelBuffer {
            fn from(img: $image) -> Self {
                let (width, height) = img.dimensions();
                PixelBuffer::from_parts(width, height, $layout, img.into_raw())
            }
        }

        impl TryFrom<PixelBuffer> for $image {
            type Error = VaultError;

            fn try_from(buffer: PixelBuffer) -> Result<Self, Self::Error> {
                if buffer.layout() != $layout {
                    return Err(VaultError::UnsupportedLayout {
                        expected: $layout,
                        actual: buffer.layout(),
                    });
                }
                let (width, height) = buffer.dimensions();
                ImageBuffer::from_raw(width, height, buffer.into_samples()).ok_or_else(|| {
                    VaultError::InvalidBuffer(format!(
                        "samples do not fill a {width}x{height} image"
                    ))
                })
            }
        }
    };
}

image_buffer_interop!(GrayImage, ChannelLayout::Luma);
image_buffer_interop!(GrayAlphaImage, ChannelLayout::LumaAlpha);
image_buffer_interop!(RgbImage, ChannelLayout::Rgb);
image_buffer_interop!(RgbaImage, ChannelLayout::Rgba);
