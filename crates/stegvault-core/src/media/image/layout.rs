use crate::media::{ChannelLayout, LsbOptions, PixelBuffer, Traversal};
use crate::result::Result;

/// A sample designated to carry payload bits, with its pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    pub x: u32,
    pub y: u32,
    pub channel: usize,
    /// index into the interleaved sample data
    pub sample: usize,
}

/// Where a single stream bit is stored: the sample index and the bit inside of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPosition {
    pub sample: usize,
    pub shift: u8,
}

/// Deterministic mapping from stream bits to sample bits.
///
/// Pixels are visited in [`Traversal`] order, inside a pixel the eligible
/// channels in stored order. Every `color_channel_step_increment`-th eligible
/// sample is a slot, each slot takes `bits_per_sample` consecutive stream bits,
/// the first one at bit position `bits_per_sample - 1`.
///
/// The mapping only depends on the buffer geometry and the options, so hiding
/// and unveiling always agree on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingLayout {
    width: usize,
    usable_width: usize,
    usable_height: usize,
    channels: usize,
    eligible: usize,
    step: usize,
    bits_per_sample: u8,
    traversal: Traversal,
    slot_count: usize,
}

impl EmbeddingLayout {
    pub fn new(buffer: &PixelBuffer, options: &LsbOptions) -> Result<Self> {
        Self::for_geometry(buffer.width(), buffer.height(), buffer.layout(), options)
    }

    pub fn for_geometry(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        options: &LsbOptions,
    ) -> Result<Self> {
        options.validate()?;

        let (usable_width, usable_height) = if options.skip_last_row_and_column {
            (
                (width as usize).saturating_sub(1),
                (height as usize).saturating_sub(1),
            )
        } else {
            (width as usize, height as usize)
        };
        let eligible = layout.eligible_channels(options.include_alpha);
        let step = options.color_channel_step_increment;
        let eligible_samples = usable_width * usable_height * eligible;

        Ok(Self {
            width: width as usize,
            usable_width,
            usable_height,
            channels: layout.channels(),
            eligible,
            step,
            bits_per_sample: options.bits_per_sample,
            traversal: options.traversal,
            slot_count: eligible_samples.div_ceil(step),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn bits_per_sample(&self) -> u8 {
        self.bits_per_sample
    }

    pub fn capacity_bits(&self) -> u64 {
        self.slot_count as u64 * u64::from(self.bits_per_sample)
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn channels(&self) -> usize {
        self.channels
    }

    /// Position of the `slot`-th slot, `None` beyond capacity.
    pub fn locate(&self, slot: usize) -> Option<SlotPosition> {
        if slot >= self.slot_count {
            return None;
        }
        let eligible_index = slot * self.step;
        let visit = eligible_index / self.eligible;
        let channel = eligible_index % self.eligible;
        let (x, y) = match self.traversal {
            Traversal::RowMajor => (visit % self.usable_width, visit / self.usable_width),
            Traversal::ColumnMajor => (visit / self.usable_height, visit % self.usable_height),
        };
        let pixel = y * self.width + x;

        Some(SlotPosition {
            x: x as u32,
            y: y as u32,
            channel,
            sample: pixel * self.channels + channel,
        })
    }

    /// Inverse of [`EmbeddingLayout::locate`]: the slot a sample belongs to, if any.
    pub fn slot_of(&self, x: u32, y: u32, channel: usize) -> Option<usize> {
        let (x, y) = (x as usize, y as usize);
        if x >= self.usable_width || y >= self.usable_height || channel >= self.eligible {
            return None;
        }
        let visit = match self.traversal {
            Traversal::RowMajor => y * self.usable_width + x,
            Traversal::ColumnMajor => x * self.usable_height + y,
        };
        let eligible_index = visit * self.eligible + channel;
        if eligible_index % self.step != 0 {
            return None;
        }

        Some(eligible_index / self.step)
    }

    /// Where the `bit`-th bit of the stream is stored, `None` beyond capacity.
    pub fn locate_bit(&self, bit: u64) -> Option<BitPosition> {
        let per_slot = u64::from(self.bits_per_sample);
        let slot = usize::try_from(bit / per_slot).ok()?;
        let position = self.locate(slot)?;

        Some(BitPosition {
            sample: position.sample,
            shift: self.bits_per_sample - 1 - (bit % per_slot) as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(
        width: u32,
        height: u32,
        channels: ChannelLayout,
        opts: LsbOptions,
    ) -> EmbeddingLayout {
        EmbeddingLayout::for_geometry(width, height, channels, &opts).unwrap()
    }

    #[test]
    fn row_major_visits_channels_then_pixels_then_rows() {
        let l = layout(2, 2, ChannelLayout::Rgb, LsbOptions::default());
        assert_eq!(l.slot_count(), 12);
        assert_eq!(l.capacity_bits(), 12);

        let samples: Vec<usize> = (0..12).map(|s| l.locate(s).unwrap().sample).collect();
        assert_eq!(samples, (0..12).collect::<Vec<_>>());
        assert_eq!(
            l.locate(3),
            Some(SlotPosition {
                x: 1,
                y: 0,
                channel: 0,
                sample: 3
            })
        );
        assert_eq!(l.locate(12), None);
    }

    #[test]
    fn column_major_visits_columns_first() {
        let l = layout(
            2,
            2,
            ChannelLayout::Rgb,
            LsbOptions::default().with_traversal(Traversal::ColumnMajor),
        );
        let p = l.locate(3).unwrap();
        assert_eq!((p.x, p.y, p.channel, p.sample), (0, 1, 0, 6));
        let p = l.locate(6).unwrap();
        assert_eq!((p.x, p.y, p.channel, p.sample), (1, 0, 0, 3));
    }

    #[test]
    fn alpha_is_skipped_unless_included() {
        let l = layout(2, 1, ChannelLayout::Rgba, LsbOptions::default());
        assert_eq!(l.slot_count(), 6);
        assert_eq!(l.locate(3).unwrap().sample, 4);
        assert_eq!(l.slot_of(0, 0, 3), None);

        let l = layout(
            2,
            1,
            ChannelLayout::Rgba,
            LsbOptions::default().with_alpha(true),
        );
        assert_eq!(l.slot_count(), 8);
        assert_eq!(l.locate(3).unwrap().sample, 3);
    }

    #[test]
    fn step_increment_skips_eligible_samples() {
        let l = layout(
            2,
            1,
            ChannelLayout::Rgb,
            LsbOptions::default().with_color_channel_step_increment(2),
        );
        assert_eq!(l.slot_count(), 3);
        assert_eq!(l.locate(1).unwrap().sample, 2);
        assert_eq!(l.locate(2).unwrap().sample, 4);
        assert_eq!(l.slot_of(0, 0, 1), None);
    }

    #[test]
    fn skipping_last_row_and_column_shrinks_the_area() {
        let l = layout(
            3,
            3,
            ChannelLayout::Rgb,
            LsbOptions::default().with_skip_last_row_and_column(true),
        );
        assert_eq!(l.slot_count(), 12);
        assert_eq!(l.locate(3).unwrap().sample, 3);
        assert_eq!(l.locate(6).unwrap().sample, 9);
        assert_eq!(l.slot_of(2, 0, 0), None);
        assert_eq!(l.slot_of(0, 2, 0), None);
    }

    #[test]
    fn slot_of_inverts_locate() {
        for traversal in [Traversal::RowMajor, Traversal::ColumnMajor] {
            let opts = LsbOptions::default()
                .with_traversal(traversal)
                .with_color_channel_step_increment(3)
                .with_alpha(true);
            let l = layout(5, 4, ChannelLayout::Rgba, opts);
            for slot in 0..l.slot_count() {
                let p = l.locate(slot).unwrap();
                assert_eq!(l.slot_of(p.x, p.y, p.channel), Some(slot), "slot {slot}");
            }
        }
    }

    #[test]
    fn several_bits_per_sample_fill_from_the_upper_bit_down() {
        let l = layout(
            1,
            1,
            ChannelLayout::Rgb,
            LsbOptions::default().with_bits_per_sample(2),
        );
        assert_eq!(l.capacity_bits(), 6);
        assert_eq!(l.locate_bit(0), Some(BitPosition { sample: 0, shift: 1 }));
        assert_eq!(l.locate_bit(1), Some(BitPosition { sample: 0, shift: 0 }));
        assert_eq!(l.locate_bit(2), Some(BitPosition { sample: 1, shift: 1 }));
        assert_eq!(l.locate_bit(6), None);
    }

    #[test]
    fn empty_area_has_no_capacity() {
        let l = layout(
            1,
            8,
            ChannelLayout::Rgb,
            LsbOptions::default().with_skip_last_row_and_column(true),
        );
        assert_eq!(l.slot_count(), 0);
        assert_eq!(l.locate(0), None);
        assert_eq!(l.locate_bit(0), None);
    }
}
