use thiserror::Error;

pub use stegvault_cipher::CipherError;

use crate::media::ChannelLayout;

#[derive(Error, Debug)]
pub enum VaultError {
    /// The payload does not fit into the carrier. Reported before the carrier is touched.
    #[error(
        "Capacity Error: the payload requires {required_bits} bits but the carrier only offers {available_bits} bits"
    )]
    Capacity {
        required_bits: u64,
        available_bits: u64,
    },

    /// Tag verification failed: wrong key or tampered payload. No plaintext is returned.
    #[error("Authentication failed: wrong key or tampered payload")]
    Authentication,

    /// Represents a malformed frame, for example foreign data or a length beyond the carrier
    #[error("Format Error: {0}")]
    Format(String),

    /// Represents a pixel buffer whose dimensions do not match its sample data
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    /// Represents options out of range, for example 0 or more than 8 bits per sample
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Carrier pixels come from a lossy format, re-encoding would destroy the hidden bits
    #[error("Carrier is marked as lossy, least significant bits would not survive re-encoding")]
    LossyCarrier,

    /// A pixel buffer was converted into an image type of another channel layout
    #[error("Pixel buffer has layout {actual:?}, but {expected:?} was requested")]
    UnsupportedLayout {
        expected: ChannelLayout,
        actual: ChannelLayout,
    },

    /// Represents an error when encrypting the data
    #[error("Encryption error")]
    Encryption(#[source] CipherError),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CipherError> for VaultError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::Authentication => VaultError::Authentication,
            CipherError::Truncated { .. }
            | CipherError::UnknownSuite(_)
            | CipherError::InvalidNonceLength { .. } => VaultError::Format(e.to_string()),
            other => VaultError::Encryption(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_errors_map_onto_the_vault_taxonomy() {
        assert!(matches!(
            VaultError::from(CipherError::Authentication),
            VaultError::Authentication
        ));
        assert!(matches!(
            VaultError::from(CipherError::Truncated { len: 3, min: 28 }),
            VaultError::Format(_)
        ));
        assert!(matches!(
            VaultError::from(CipherError::UnknownSuite(9)),
            VaultError::Format(_)
        ));
        assert!(matches!(
            VaultError::from(CipherError::Encryption),
            VaultError::Encryption(CipherError::Encryption)
        ));
    }

    #[test]
    fn capacity_error_names_both_numbers() {
        let e = VaultError::Capacity {
            required_bits: 280,
            available_bits: 48,
        };
        let msg = e.to_string();
        assert!(msg.contains("280"));
        assert!(msg.contains("48"));
    }

    #[test]
    fn option_and_layout_errors_say_what_was_wrong() {
        let e = VaultError::InvalidOptions("bits per sample must be 1..=8, got 9".into());
        assert!(e.to_string().contains("got 9"));

        let e = VaultError::UnsupportedLayout {
            expected: ChannelLayout::Rgba,
            actual: ChannelLayout::Luma,
        };
        assert_eq!(
            e.to_string(),
            "Pixel buffer has layout Luma, but Rgba was requested"
        );

        let e = VaultError::from(CipherError::Encryption);
        assert_eq!(e.to_string(), "Encryption error");
    }
}
