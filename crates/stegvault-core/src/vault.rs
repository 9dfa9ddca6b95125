use std::io::{Read, Write};

use log::{debug, trace, warn};
use stegvault_cipher::Key;

use crate::capacity;
use crate::error::VaultError;
use crate::media::image::encoder::hide_parallel;
use crate::media::image::{EmbeddingLayout, LsbCodec, LsbReader, LsbWriter};
use crate::media::payload::{decode_envelope, encode_frame, FrameHeader, FrameInfo};
use crate::media::{CarrierOrigin, PixelBuffer, VaultOptions};
use crate::result::Result;

/// Hides sealed payloads in pixel buffers and gets them out again.
///
/// A `Vault` only holds its options, it can be shared between threads freely.
/// Hiding and unveiling must use the same [`crate::LsbOptions`], the cipher suite
/// is stored in the frame header and needs no agreement.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Vault {
    options: VaultOptions,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: VaultOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &VaultOptions {
        &self.options
    }

    /// Seals `plaintext` and hides the frame in a copy of `carrier`.
    ///
    /// The carrier itself is never modified. Fails with [`VaultError::Capacity`]
    /// before any encryption happens if the frame would not fit, and with
    /// [`VaultError::LossyCarrier`] for pixels that came from a lossy format.
    pub fn embed(&self, carrier: &PixelBuffer, plaintext: &[u8], key: &Key) -> Result<PixelBuffer> {
        if carrier.origin() == CarrierOrigin::Lossy {
            warn!("refusing to embed into a carrier decoded from a lossy format");
            return Err(VaultError::LossyCarrier);
        }
        let lsb = &self.options.lsb;
        let layout = EmbeddingLayout::new(carrier, lsb)?;
        trace!(
            "{}x{} {:?} carrier, {} slots of {} bits",
            carrier.width(),
            carrier.height(),
            carrier.layout(),
            layout.slot_count(),
            layout.bits_per_sample()
        );

        let header = FrameHeader::for_plaintext(self.options.suite, plaintext.len())?;
        capacity::check_fit(carrier, header.envelope_len() as usize, lsb)?;

        let aad = header.to_bytes();
        let envelope = self.options.suite.seal(key, plaintext, &aad)?;
        let frame = encode_frame(&header, &envelope)?;
        debug!(
            "hiding a {} byte frame ({:?}), fill unused: {}, parallel: {}",
            frame.len(),
            header.suite(),
            self.options.fill_unused,
            self.options.parallel
        );

        let mut stego = carrier.clone();
        if self.options.parallel {
            hide_parallel(
                stego.samples_mut(),
                &layout,
                &frame,
                self.options.fill_unused,
            );
        } else {
            let mut writer = LsbWriter::new(stego.samples_mut(), layout);
            writer.write_all(&frame)?;
            if self.options.fill_unused {
                writer.fill_remaining(&mut rand::thread_rng())?;
            }
        }

        Ok(stego)
    }

    /// Reads the frame hidden in `stego` and opens it with `key`.
    ///
    /// A damaged or foreign header is a [`VaultError::Format`], detected before any
    /// decryption is attempted. A wrong key or tampered payload is a
    /// [`VaultError::Authentication`], no plaintext is returned in that case.
    pub fn extract(&self, stego: &PixelBuffer, key: &Key) -> Result<Vec<u8>> {
        let (header, mut reader) = self.read_header(stego)?;

        let mut bytes = vec![0; header.envelope_len() as usize];
        reader.read_exact(&mut bytes)?;
        let envelope = decode_envelope(&header, &bytes)?;

        header
            .suite()
            .open(key, &envelope, &header.to_bytes())
            .map_err(|e| {
                warn!("unable to open the hidden envelope: {e}");
                VaultError::from(e)
            })
    }

    /// Everything the frame header tells without the key.
    pub fn inspect(&self, stego: &PixelBuffer) -> Result<FrameInfo> {
        let capacity_bits = capacity::capacity_bits(stego, &self.options.lsb)?;
        let (header, _) = self.read_header(stego)?;

        Ok(FrameInfo::new(&header, capacity_bits))
    }

    pub fn capacity_bits(&self, carrier: &PixelBuffer) -> Result<u64> {
        capacity::capacity_bits(carrier, &self.options.lsb)
    }

    pub fn max_plaintext_len(&self, carrier: &PixelBuffer) -> Result<usize> {
        capacity::max_plaintext_len(carrier, &self.options)
    }

    fn read_header<'i>(&self, stego: &'i PixelBuffer) -> Result<(FrameHeader, LsbReader<'i>)> {
        let mut reader = LsbCodec::decoder(stego, &self.options.lsb)?;
        let available_bits = reader.remaining_bits();
        let header = FrameHeader::read_from(&mut reader)?;
        debug!(
            "found frame header: {:?}, {} envelope bytes",
            header.suite(),
            header.envelope_len()
        );

        if header.frame_bits() > available_bits {
            return Err(VaultError::Format(format!(
                "header announces {} bits, the carrier only holds {available_bits}",
                header.frame_bits()
            )));
        }

        Ok((header, reader))
    }
}

/// [`Vault::embed`] with default options
pub fn embed(carrier: &PixelBuffer, plaintext: &[u8], key: &Key) -> Result<PixelBuffer> {
    Vault::default().embed(carrier, plaintext, key)
}

/// [`Vault::extract`] with default options
pub fn extract(stego: &PixelBuffer, key: &Key) -> Result<Vec<u8>> {
    Vault::default().extract(stego, key)
}
