//! How much a carrier can hold, and whether a given envelope fits.

use log::debug;

use crate::error::VaultError;
use crate::media::image::EmbeddingLayout;
use crate::media::payload::FRAME_HEADER_LEN;
use crate::media::{LsbOptions, PixelBuffer, VaultOptions};
use crate::result::Result;

/// Bits the carrier offers under the given options:
/// `slots * bits_per_sample`.
pub fn capacity_bits(buffer: &PixelBuffer, opts: &LsbOptions) -> Result<u64> {
    Ok(EmbeddingLayout::new(buffer, opts)?.capacity_bits())
}

/// Bits a frame around an envelope of `envelope_len` bytes occupies.
pub fn required_bits(envelope_len: usize) -> u64 {
    (FRAME_HEADER_LEN as u64 + envelope_len as u64) * 8
}

/// `false` as well for options that do not validate
pub fn fits(buffer: &PixelBuffer, envelope_len: usize, opts: &LsbOptions) -> bool {
    check_fit(buffer, envelope_len, opts).is_ok()
}

pub fn check_fit(buffer: &PixelBuffer, envelope_len: usize, opts: &LsbOptions) -> Result<()> {
    let available_bits = capacity_bits(buffer, opts)?;
    let required_bits = required_bits(envelope_len);
    debug!("frame requires {required_bits} bits, carrier offers {available_bits} bits");

    if required_bits > available_bits {
        return Err(VaultError::Capacity {
            required_bits,
            available_bits,
        });
    }

    Ok(())
}

/// The longest plaintext that still fits, 0 if not even an empty one does.
pub fn max_plaintext_len(buffer: &PixelBuffer, opts: &VaultOptions) -> Result<usize> {
    let available_bytes = capacity_bits(buffer, &opts.lsb)? / 8;
    let overhead = (FRAME_HEADER_LEN + opts.suite.overhead()) as u64;
    let max_envelope = u64::from(u32::MAX);
    let plaintext = available_bytes
        .min(FRAME_HEADER_LEN as u64 + max_envelope)
        .saturating_sub(overhead);

    Ok(usize::try_from(plaintext).unwrap_or(usize::MAX))
}
