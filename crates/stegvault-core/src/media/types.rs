use crate::error::VaultError;
use crate::result::Result;

/// Channel arrangement of a pixel. An alpha channel is always the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    pub const fn channels(self) -> usize {
        match self {
            ChannelLayout::Luma => 1,
            ChannelLayout::LumaAlpha => 2,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::LumaAlpha | ChannelLayout::Rgba)
    }

    /// Channels per pixel that may carry payload bits.
    pub const fn eligible_channels(self, include_alpha: bool) -> usize {
        if self.has_alpha() && !include_alpha {
            self.channels() - 1
        } else {
            self.channels()
        }
    }
}

/// Where the pixels of a carrier came from, as far as the caller knows.
///
/// Lossy formats like JPEG re-quantize every sample on save and wipe out any
/// least significant bit payload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierOrigin {
    Lossless,
    Lossy,
    #[default]
    Unknown,
}

/// A raw, decoded image: 8-bit samples, interleaved, row-major.
///
/// The sample of pixel `(x, y)` and channel `c` lives at
/// `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    origin: CarrierOrigin,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// wraps the given samples, they must match the dimensions exactly
    pub fn new(width: u32, height: u32, layout: ChannelLayout, samples: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height, layout)?;
        if samples.len() != expected {
            return Err(VaultError::InvalidBuffer(format!(
                "{width}x{height} {layout:?} requires {expected} samples, got {}",
                samples.len()
            )));
        }

        Ok(Self::from_parts(width, height, layout, samples))
    }

    /// builds a buffer by asking `f(x, y, channel)` for every sample
    pub fn from_fn<F>(width: u32, height: u32, layout: ChannelLayout, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, usize) -> u8,
    {
        let mut samples = Vec::with_capacity(sample_count(width, height, layout)?);
        for y in 0..height {
            for x in 0..width {
                for c in 0..layout.channels() {
                    samples.push(f(x, y, c));
                }
            }
        }

        Ok(Self::from_parts(width, height, layout, samples))
    }

    pub fn filled(width: u32, height: u32, layout: ChannelLayout, value: u8) -> Result<Self> {
        let samples = vec![value; sample_count(width, height, layout)?];

        Ok(Self::from_parts(width, height, layout, samples))
    }

    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            layout,
            origin: CarrierOrigin::default(),
            samples,
        }
    }

    pub fn with_origin(mut self, origin: CarrierOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn origin(&self) -> CarrierOrigin {
        self.origin
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Direct access for callers that know what they are doing, for example
    /// tests that simulate tampering. The length cannot change.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub fn sample(&self, x: u32, y: u32, channel: usize) -> Option<u8> {
        if x >= self.width || y >= self.height || channel >= self.layout.channels() {
            return None;
        }
        let pixel = y as usize * self.width as usize + x as usize;
        self.samples
            .get(pixel * self.layout.channels() + channel)
            .copied()
    }
}

fn sample_count(width: u32, height: u32, layout: ChannelLayout) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(layout.channels()))
        .ok_or_else(|| {
            VaultError::InvalidBuffer(format!("{width}x{height} {layout:?} is too large"))
        })
}
