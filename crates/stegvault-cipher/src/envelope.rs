use crate::{CipherError, CipherSuite, Result, TAG_LEN};

/// Sealed data as produced by [`CipherSuite::seal`].
///
/// Serialized layout:
/// ```text
/// [nonce: suite.nonce_len() bytes][tag: 16 bytes][ciphertext: plaintext length bytes]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    suite: CipherSuite,
    nonce: Vec<u8>,
    tag: [u8; TAG_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub(crate) fn new(
        suite: CipherSuite,
        nonce: Vec<u8>,
        tag: [u8; TAG_LEN],
        ciphertext: Vec<u8>,
    ) -> Self {
        Self {
            suite,
            nonce,
            tag,
            ciphertext,
        }
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The AEAD is a stream construction, so this always equals the ciphertext length.
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len()
    }

    /// Number of bytes [`Envelope::to_bytes`] produces.
    pub fn encoded_len(&self) -> usize {
        self.nonce.len() + TAG_LEN + self.ciphertext.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.encoded_len());
        buffer.extend_from_slice(&self.nonce);
        buffer.extend_from_slice(&self.tag);
        buffer.extend_from_slice(&self.ciphertext);

        buffer
    }

    /// Splits a serialized envelope, the suite decides on the nonce width.
    pub fn from_bytes(suite: CipherSuite, bytes: &[u8]) -> Result<Self> {
        let min = suite.overhead();
        if bytes.len() < min {
            return Err(CipherError::Truncated {
                len: bytes.len(),
                min,
            });
        }

        let (nonce, rest) = bytes.split_at(suite.nonce_len());
        let (tag, ciphertext) = rest.split_at(TAG_LEN);
        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(tag);

        Ok(Self {
            suite,
            nonce: nonce.to_vec(),
            tag: tag_bytes,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
