//! # Envelope sealing
//! Authenticated encryption for the stegvault payloads. Every call to [`seal`]
//! draws a fresh nonce from the OS CSPRNG; [`open`] either verifies the tag and
//! returns the whole plaintext or returns an error and nothing else.

mod envelope;
pub mod error;
mod key;
mod suite;

pub use crate::envelope::Envelope;
pub use crate::error::CipherError;
pub use crate::key::Key;
pub use crate::suite::CipherSuite;

pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;

pub type Result<T> = std::result::Result<T, CipherError>;

/// seal `plaintext` with the default suite (AES-256-GCM) and no associated data
pub fn seal(plaintext: &[u8], key: &Key) -> Result<Envelope> {
    CipherSuite::default().seal(key, plaintext, &[])
}

/// open an envelope sealed by [`seal`], or by any suite without associated data
pub fn open(envelope: &Envelope, key: &Key) -> Result<Vec<u8>> {
    envelope.suite().open(key, envelope, &[])
}
