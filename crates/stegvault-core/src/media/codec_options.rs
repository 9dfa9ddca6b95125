use stegvault_cipher::CipherSuite;

use crate::error::VaultError;
use crate::result::Result;

/// Order in which pixels are visited when hiding or unveiling bits
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// left to right, then top to bottom
    #[default]
    RowMajor,
    /// top to bottom, then left to right
    ColumnMajor,
}

/// Options for LSB (Least Significant Bit) embedding.
///
/// Both sides, hiding and unveiling, have to use the very same options,
/// they define where every single payload bit lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsbOptions {
    /// How many low bits of each used sample carry payload, 1 to 8.
    /// The maximal distortion of a sample is `2^bits_per_sample - 1`.
    pub bits_per_sample: u8,

    /// If false the alpha channel is never used,
    /// this reduces then the capacity by one slot per pixel
    pub include_alpha: bool,

    pub traversal: Traversal,

    /// Determines the step width when iterating over the eligible color channels.
    /// For example `2` would move from (R)GB to RG(B), and from RG(B) to R(G)B on the next pixel.
    ///
    /// Note this number influences the capacity directly.
    pub color_channel_step_increment: usize,

    /// This limits all iterations to skip the last column and row, in fact it reduces width and height of the image by 1
    pub skip_last_row_and_column: bool,
}

impl Default for LsbOptions {
    fn default() -> Self {
        Self {
            bits_per_sample: 1,
            include_alpha: false,
            traversal: Traversal::RowMajor,
            color_channel_step_increment: 1,
            skip_last_row_and_column: false,
        }
    }
}

impl LsbOptions {
    pub fn with_bits_per_sample(mut self, bits: u8) -> Self {
        self.bits_per_sample = bits;
        self
    }

    pub fn with_alpha(mut self, include_alpha: bool) -> Self {
        self.include_alpha = include_alpha;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_color_channel_step_increment(mut self, step: usize) -> Self {
        self.color_channel_step_increment = step;
        self
    }

    pub fn with_skip_last_row_and_column(mut self, skip: bool) -> Self {
        self.skip_last_row_and_column = skip;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.bits_per_sample) {
            return Err(VaultError::InvalidOptions(format!(
                "bits_per_sample must be within 1..=8, got {}",
                self.bits_per_sample
            )));
        }
        if self.color_channel_step_increment == 0 {
            return Err(VaultError::InvalidOptions(
                "color_channel_step_increment must be at least 1".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Everything [`crate::Vault`] needs to know besides carrier, payload and key
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VaultOptions {
    pub lsb: LsbOptions,

    /// AEAD used when hiding. Unveiling reads the suite from the frame header.
    pub suite: CipherSuite,

    /// Overwrite all slots behind the payload with random bits,
    /// so the end of the payload cannot be spotted in the LSB plane.
    pub fill_unused: bool,

    /// Spread the bit writing over the rayon thread pool
    pub parallel: bool,
}

impl VaultOptions {
    pub fn with_lsb(mut self, lsb: LsbOptions) -> Self {
        self.lsb = lsb;
        self
    }

    pub fn with_suite(mut self, suite: CipherSuite) -> Self {
        self.suite = suite;
        self
    }

    pub fn with_fill_unused(mut self, fill_unused: bool) -> Self {
        self.fill_unused = fill_unused;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
