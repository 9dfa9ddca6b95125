use std::io::{self, Cursor, Write};

use bitstream_io::{BigEndian, BitRead, BitReader};
use rand::{Rng, RngCore};
use rayon::prelude::*;

use super::layout::EmbeddingLayout;

/// stegano sink for pixel samples, every byte written lands bitwise
/// (most significant bit first) in the low bits of the slots of an [`EmbeddingLayout`]
///
/// ## Example of usage
/// ```rust
/// use std::io::Write;
/// use stegvault_core::media::image::{EmbeddingLayout, LsbWriter};
/// use stegvault_core::media::{ChannelLayout, LsbOptions, PixelBuffer};
///
/// let mut carrier = PixelBuffer::filled(4, 4, ChannelLayout::Rgb, 0x80).unwrap();
/// let layout = EmbeddingLayout::new(&carrier, &LsbOptions::default()).unwrap();
/// LsbWriter::new(carrier.samples_mut(), layout)
///     .write_all(&[0b1010_0000])
///     .expect("Cannot write secret byte");
///
/// assert_eq!(&carrier.samples()[..4], &[0x81, 0x80, 0x81, 0x80]);
/// ```
pub struct LsbWriter<'a> {
    samples: &'a mut [u8],
    layout: EmbeddingLayout,
    cursor: u64,
}

impl<'a> LsbWriter<'a> {
    pub fn new(samples: &'a mut [u8], layout: EmbeddingLayout) -> Self {
        Self {
            samples,
            layout,
            cursor: 0,
        }
    }

    pub fn bits_written(&self) -> u64 {
        self.cursor
    }

    pub fn remaining_bits(&self) -> u64 {
        self.layout.capacity_bits().saturating_sub(self.cursor)
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        let position = self.layout.locate_bit(self.cursor).ok_or_else(|| {
            io::Error::new(io::ErrorKind::WriteZero, "carrier capacity exhausted")
        })?;
        let sample = self.samples.get_mut(position.sample).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "embedding layout exceeds the sample data",
            )
        })?;
        *sample = hide_bit(*sample, position.shift, bit);
        self.cursor += 1;

        Ok(())
    }

    /// Overwrites every slot behind the cursor with random bits.
    pub fn fill_remaining<R: RngCore>(&mut self, rng: &mut R) -> io::Result<()> {
        while self.remaining_bits() > 0 {
            let mut word = rng.next_u64();
            for _ in 0..self.remaining_bits().min(64) {
                self.write_bit(word & 1 == 1)?;
                word >>= 1;
            }
        }

        Ok(())
    }
}

impl Write for LsbWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = usize::try_from(self.remaining_bits() / 8).unwrap_or(usize::MAX);
        let bytes = buf.len().min(room);
        let mut bit_iter = BitReader::endian(Cursor::new(&buf[..bytes]), BigEndian);
        for _ in 0..bytes * 8 {
            let bit = bit_iter.read_bit()?;
            self.write_bit(bit)?;
        }

        Ok(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes `payload` like [`LsbWriter`] does, optionally followed by random fill,
/// but with the pixels partitioned over the rayon thread pool.
///
/// Each pixel resolves its own slots through [`EmbeddingLayout::slot_of`],
/// so no sample is ever touched by two workers and the bit order is the same
/// as the sequential writer's.
pub(crate) fn hide_parallel(
    samples: &mut [u8],
    layout: &EmbeddingLayout,
    payload: &[u8],
    fill_unused: bool,
) {
    let width = layout.width();
    if width == 0 {
        return;
    }
    let payload_bits = payload.len() as u64 * 8;
    let per_slot = u64::from(layout.bits_per_sample());

    samples
        .par_chunks_mut(layout.channels())
        .enumerate()
        .for_each_init(rand::thread_rng, |rng, (pixel, colors)| {
            let (x, y) = ((pixel % width) as u32, (pixel / width) as u32);
            for (channel, color) in colors.iter_mut().enumerate() {
                let Some(slot) = layout.slot_of(x, y, channel) else {
                    continue;
                };
                for inner in 0..per_slot {
                    let bit = slot as u64 * per_slot + inner;
                    let shift = (per_slot - 1 - inner) as u8;
                    if bit < payload_bits {
                        *color = hide_bit(*color, shift, payload_bit(payload, bit));
                    } else if fill_unused {
                        *color = hide_bit(*color, shift, rng.gen());
                    }
                }
            }
        });
}

#[inline(always)]
fn hide_bit(sample: u8, shift: u8, bit: bool) -> u8 {
    (sample & !(1 << shift)) | (u8::from(bit) << shift)
}

#[inline(always)]
fn payload_bit(payload: &[u8], bit: u64) -> bool {
    (payload[(bit / 8) as usize] >> (7 - bit % 8)) & 1 == 1
}

#[cfg(test)]
mod encoder_tests {
    use super::*;
    use crate::media::{ChannelLayout, LsbOptions, PixelBuffer, Traversal};
    use crate::test_utils::prepare_4x6_linear_growing_rgb;

    fn layout_for(buffer: &PixelBuffer, options: &LsbOptions) -> EmbeddingLayout {
        EmbeddingLayout::new(buffer, options).unwrap()
    }

    #[test]
    fn it_should_only_touch_the_least_significant_bit() {
        let original = prepare_4x6_linear_growing_rgb();
        let mut carrier = original.clone();
        let layout = layout_for(&carrier, &LsbOptions::default());
        LsbWriter::new(carrier.samples_mut(), layout)
            .write_all(&[0xff, 0x00, 0xa5])
            .unwrap();

        for (i, (a, b)) in original.samples().iter().zip(carrier.samples()).enumerate() {
            assert_eq!(a & 0xfe, b & 0xfe, "upper bits of sample {i} changed");
        }
        let lsb: Vec<u8> = carrier.samples()[16..24].iter().map(|s| s & 1).collect();
        assert_eq!(lsb, vec![1, 0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn it_should_refuse_to_write_beyond_capacity() {
        let mut carrier = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, 0).unwrap();
        let layout = layout_for(&carrier, &LsbOptions::default());
        let mut writer = LsbWriter::new(carrier.samples_mut(), layout);

        assert_eq!(writer.write(&[1, 2, 3]).unwrap(), 1);
        assert_eq!(writer.remaining_bits(), 4);
        assert_eq!(writer.write(&[2]).unwrap(), 0);

        let err = writer.write_all(&[3]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn it_should_fill_every_remaining_slot() {
        let original = PixelBuffer::filled(8, 8, ChannelLayout::Rgb, 0x10).unwrap();
        let mut carrier = original.clone();
        let layout = layout_for(&carrier, &LsbOptions::default());
        let mut writer = LsbWriter::new(carrier.samples_mut(), layout);
        writer.write_all(&[0xff]).unwrap();
        writer.fill_remaining(&mut rand::thread_rng()).unwrap();
        assert_eq!(writer.remaining_bits(), 0);
        assert_eq!(writer.bits_written(), 192);

        assert!(carrier.samples()[..8].iter().all(|s| *s == 0x11));
        assert!(carrier.samples()[8..].iter().any(|s| *s == 0x11));
        assert!(carrier
            .samples()
            .iter()
            .all(|s| *s == 0x10 || *s == 0x11));
    }

    #[test]
    fn parallel_hiding_matches_the_sequential_writer() {
        let payload: Vec<u8> = (0..=255u8).rev().collect();
        let carrier = PixelBuffer::from_fn(37, 29, ChannelLayout::Rgba, |x, y, c| {
            (x * 7 + y * 13 + c as u32 * 31) as u8
        })
        .unwrap();

        for options in [
            LsbOptions::default(),
            LsbOptions::default().with_traversal(Traversal::ColumnMajor),
            LsbOptions::default()
                .with_alpha(true)
                .with_bits_per_sample(3)
                .with_color_channel_step_increment(2),
            LsbOptions::default().with_skip_last_row_and_column(true),
        ] {
            let layout = layout_for(&carrier, &options);

            let mut sequential = carrier.clone();
            LsbWriter::new(sequential.samples_mut(), layout.clone())
                .write_all(&payload)
                .unwrap();

            let mut parallel = carrier.clone();
            hide_parallel(parallel.samples_mut(), &layout, &payload, false);

            assert_eq!(sequential, parallel, "mismatch for {options:?}");
        }
    }
}
