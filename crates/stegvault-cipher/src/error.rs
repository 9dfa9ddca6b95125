use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// Key material of the wrong size was handed in, keys are always 256 bits
    #[error("Invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The nonce of an envelope does not match the size the cipher suite requires
    #[error("Invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    /// Serialized envelope is too short to even carry a nonce and a tag
    #[error("Envelope truncated: {len} bytes, at least {min} bytes required")]
    Truncated { len: usize, min: usize },

    /// Unknown cipher suite identifier, for example foreign formats or just data crap
    #[error("Unknown cipher suite identifier: {0:#x}")]
    UnknownSuite(u8),

    /// The AEAD backend refused to encrypt, for example a plaintext beyond its length limit
    #[error("Encryption error")]
    Encryption,

    /// Tag verification failed: wrong key, tampered data or mismatching associated data
    #[error("Authentication failed")]
    Authentication,
}
