use std::io::Write;

use log::trace;

use super::decoder::LsbReader;
use super::encoder::{hide_parallel, LsbWriter};
use super::layout::EmbeddingLayout;
use crate::error::VaultError;
use crate::media::{LsbOptions, PixelBuffer};
use crate::result::Result;

/// Factory for decoder and encoder
pub struct LsbCodec;

impl LsbCodec {
    /// builds a LSB Image Decoder that implements Read
    pub fn decoder<'i>(input: &'i PixelBuffer, opts: &LsbOptions) -> Result<LsbReader<'i>> {
        let layout = EmbeddingLayout::new(input, opts)?;
        trace!("decoder over {} slots", layout.slot_count());

        Ok(LsbReader::new(input.samples(), layout))
    }

    /// builds a LSB Image Encoder that implements Write
    pub fn encoder<'i>(carrier: &'i mut PixelBuffer, opts: &LsbOptions) -> Result<LsbWriter<'i>> {
        let layout = EmbeddingLayout::new(carrier, opts)?;
        trace!("encoder over {} slots", layout.slot_count());

        Ok(LsbWriter::new(carrier.samples_mut(), layout))
    }
}

/// Hides `bytes` in a copy of `buffer`, the original stays untouched.
///
/// Fails with [`VaultError::Capacity`] before anything is written
/// if the bytes do not fit.
pub fn write_bits(buffer: &PixelBuffer, bytes: &[u8], opts: &LsbOptions) -> Result<PixelBuffer> {
    let layout = fitting_layout(buffer, bytes, opts)?;
    let mut stego = buffer.clone();
    LsbWriter::new(stego.samples_mut(), layout).write_all(bytes)?;

    Ok(stego)
}

/// Same as [`write_bits`], but the pixels are processed by the rayon thread pool.
/// The result is bit-identical.
pub fn write_bits_parallel(
    buffer: &PixelBuffer,
    bytes: &[u8],
    opts: &LsbOptions,
) -> Result<PixelBuffer> {
    let layout = fitting_layout(buffer, bytes, opts)?;
    let mut stego = buffer.clone();
    hide_parallel(stego.samples_mut(), &layout, bytes, false);

    Ok(stego)
}

/// Reads the first `bit_count` stream bits, packed most significant bit first.
/// A trailing partial byte is padded with zero bits.
pub fn read_bits(buffer: &PixelBuffer, bit_count: u64, opts: &LsbOptions) -> Result<Vec<u8>> {
    let mut reader = LsbCodec::decoder(buffer, opts)?;
    if bit_count > reader.remaining_bits() {
        return Err(VaultError::Format(format!(
            "cannot read {bit_count} bits from a carrier holding {}",
            reader.remaining_bits()
        )));
    }

    let len = usize::try_from(bit_count.div_ceil(8))
        .map_err(|_| VaultError::Format(format!("{bit_count} bits do not fit in memory")))?;
    let mut bytes = vec![0; len];
    for i in 0..bit_count {
        if reader.read_bit() == Some(true) {
            bytes[(i / 8) as usize] |= 0x80 >> (i % 8);
        }
    }

    Ok(bytes)
}

fn fitting_layout(buffer: &PixelBuffer, bytes: &[u8], opts: &LsbOptions) -> Result<EmbeddingLayout> {
    let layout = EmbeddingLayout::new(buffer, opts)?;
    let required_bits = bytes.len() as u64 * 8;
    let available_bits = layout.capacity_bits();
    if required_bits > available_bits {
        return Err(VaultError::Capacity {
            required_bits,
            available_bits,
        });
    }

    Ok(layout)
}
