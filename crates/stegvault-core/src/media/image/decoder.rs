use std::io::{self, Read};

use bitstream_io::{BigEndian, BitWrite, BitWriter};

use super::layout::EmbeddingLayout;

/// stegano source for pixel samples, reads back what [`super::LsbWriter`] has hidden
///
/// ## Example of usage
/// ```rust
/// use std::io::Read;
/// use stegvault_core::media::image::{EmbeddingLayout, LsbReader};
/// use stegvault_core::media::{ChannelLayout, LsbOptions, PixelBuffer};
///
/// // the low bits of the first 8 samples spell 0b0100_0001
/// let carrier = PixelBuffer::from_fn(4, 4, ChannelLayout::Rgb, |x, y, c| {
///     let i = (y * 4 + x) as usize * 3 + c;
///     0x80 | u8::from(i == 1 || i == 7)
/// })
/// .unwrap();
/// let layout = EmbeddingLayout::new(&carrier, &LsbOptions::default()).unwrap();
///
/// let mut secret = [0; 1];
/// LsbReader::new(carrier.samples(), layout)
///     .read_exact(&mut secret)
///     .expect("Cannot read 1 byte from carrier");
/// assert_eq!(secret, *b"A");
/// ```
pub struct LsbReader<'i> {
    samples: &'i [u8],
    layout: EmbeddingLayout,
    cursor: u64,
}

impl<'i> LsbReader<'i> {
    pub fn new(samples: &'i [u8], layout: EmbeddingLayout) -> Self {
        Self {
            samples,
            layout,
            cursor: 0,
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.cursor
    }

    pub fn remaining_bits(&self) -> u64 {
        self.layout.capacity_bits().saturating_sub(self.cursor)
    }

    /// next stream bit, `None` when the carrier is exhausted
    pub fn read_bit(&mut self) -> Option<bool> {
        let position = self.layout.locate_bit(self.cursor)?;
        let sample = self.samples.get(position.sample)?;
        self.cursor += 1;

        Some((sample >> position.shift) & 1 == 1)
    }
}

impl Read for LsbReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let room = usize::try_from(self.remaining_bits() / 8).unwrap_or(usize::MAX);
        let bytes = buf.len().min(room);
        let mut bit_buffer = BitWriter::endian(&mut buf[..bytes], BigEndian);
        for _ in 0..bytes * 8 {
            let bit = self.read_bit().ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "carrier exhausted")
            })?;
            bit_buffer.write_bit(bit)?;
        }

        Ok(bytes)
    }
}
