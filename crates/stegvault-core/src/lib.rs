//! # Stegvault Core API
//!
//! Encrypt-then-embed: a plaintext is sealed with an AEAD cipher, framed with a
//! small plaintext header and hidden in the least significant bits of the
//! samples of a raw [`PixelBuffer`]. The main entry points are
//! - [`Vault`] (or the free functions [`embed`] and [`extract`]) for the full round trip
//! - [`capacity`] for planning how much a carrier can hold
//! - [`media::image`] for the plain bit level reading and writing
//!
//! Decoding and encoding image files is left to the caller, only the in-memory
//! `image::ImageBuffer` types convert into a [`PixelBuffer`] and back.
//!
//! # Usage Examples
//!
//! ## Hide and unveil a message
//!
//! ```rust
//! use stegvault_core::{ChannelLayout, Key, PixelBuffer};
//!
//! let carrier = PixelBuffer::from_fn(64, 64, ChannelLayout::Rgb, |x, y, c| {
//!     (x ^ y) as u8 + c as u8
//! })
//! .expect("Failed to build carrier");
//! let key = Key::generate();
//!
//! let stego = stegvault_core::embed(&carrier, b"Hello, World!", &key)
//!     .expect("Failed to hide message");
//! let plaintext = stegvault_core::extract(&stego, &key)
//!     .expect("Failed to unveil message");
//!
//! assert_eq!(plaintext, b"Hello, World!");
//! ```
//!
//! ## Use a different cipher and spread the work over all cores
//!
//! ```rust
//! use stegvault_core::{CipherSuite, Key, LsbOptions, PixelBuffer, Vault, VaultOptions};
//!
//! let rgba = image::RgbaImage::from_pixel(32, 32, image::Rgba([90, 120, 200, 255]));
//! let carrier = PixelBuffer::from(rgba);
//! let vault = Vault::with_options(
//!     VaultOptions::default()
//!         .with_suite(CipherSuite::XChaCha20Poly1305)
//!         .with_lsb(LsbOptions::default().with_bits_per_sample(2))
//!         .with_fill_unused(true)
//!         .with_parallel(true),
//! );
//! let key = Key::generate();
//!
//! let stego = vault.embed(&carrier, b"a bit more secret", &key).unwrap();
//! assert_eq!(vault.extract(&stego, &key).unwrap(), b"a bit more secret");
//!
//! let rgba: image::RgbaImage = stego.try_into().unwrap();
//! assert_eq!(rgba.dimensions(), (32, 32));
//! ```

#![warn(clippy::redundant_else)]

pub mod capacity;
pub mod error;
pub mod media;
pub mod result;
mod vault;

pub use stegvault_cipher::{CipherSuite, Key};

pub use crate::capacity::{capacity_bits, check_fit, fits, max_plaintext_len, required_bits};
pub use crate::error::VaultError;
pub use crate::media::image::{read_bits, write_bits, write_bits_parallel};
pub use crate::media::payload::FrameInfo;
pub use crate::media::{
    CarrierOrigin, ChannelLayout, LsbOptions, PixelBuffer, Traversal, VaultOptions,
};
pub use crate::result::Result;
pub use crate::vault::{embed, extract, Vault};

#[cfg(test)]
mod test_utils {
    use image::{ImageBuffer, RgbaImage};

    use crate::media::{ChannelLayout, PixelBuffer};

    pub fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// This image has some traits:
    /// --------------y-------------
    /// | 0,0 -> (0, 1, 2, 3 ) | 0,1 -> (4, 5, 6, 7 ) | ...
    /// | 1,0 -> (20,21,22,23) | 1,1 -> (24,25,26,27) | ...
    /// | 2,0 -> (40,41,42,43) | 2,1 -> (44,45,46,47) | ...
    /// x ...
    pub fn prepare_5x5_image() -> RgbaImage {
        ImageBuffer::from_fn(5, 5, |x, y| {
            let i = (4 * x + 20 * y) as u8;
            image::Rgba([i, i + 1, i + 2, i + 3])
        })
    }

    /// 4x6 RGB, sample `n` has the value `n`
    pub fn prepare_4x6_linear_growing_rgb() -> PixelBuffer {
        PixelBuffer::new(4, 6, ChannelLayout::Rgb, (0..72).collect())
            .expect("72 samples make a 4x6 RGB buffer")
    }

    /// deterministic but irregular RGB content
    pub fn prepare_noisy_rgb(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, ChannelLayout::Rgb, |x, y, c| {
            (x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ (c as u32 * 101)) as u8
        })
        .expect("noisy carrier")
    }
}
