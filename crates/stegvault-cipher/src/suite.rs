use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::XChaCha20Poly1305;
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::{CipherError, Envelope, Key, Result, TAG_LEN};

const AES_GCM_NONCE_LEN: usize = 12;
const XCHACHA_NONCE_LEN: usize = 24;

/// The AEAD constructions an envelope can be sealed with.
///
/// The identifier of a suite is part of the stegvault frame format and must never change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    /// AES-256-GCM with a 96-bit random nonce
    #[default]
    Aes256Gcm,
    /// XChaCha20-Poly1305 with a 192-bit random nonce
    XChaCha20Poly1305,
}

impl CipherSuite {
    pub const fn id(self) -> u8 {
        match self {
            CipherSuite::Aes256Gcm => 0x1,
            CipherSuite::XChaCha20Poly1305 => 0x2,
        }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0x1 => Ok(CipherSuite::Aes256Gcm),
            0x2 => Ok(CipherSuite::XChaCha20Poly1305),
            other => Err(CipherError::UnknownSuite(other)),
        }
    }

    pub const fn nonce_len(self) -> usize {
        match self {
            CipherSuite::Aes256Gcm => AES_GCM_NONCE_LEN,
            CipherSuite::XChaCha20Poly1305 => XCHACHA_NONCE_LEN,
        }
    }

    pub const fn tag_len(self) -> usize {
        TAG_LEN
    }

    /// Bytes an envelope adds on top of the plaintext.
    pub const fn overhead(self) -> usize {
        self.nonce_len() + TAG_LEN
    }

    /// Encrypts `plaintext` under a fresh random nonce, `aad` is authenticated but not stored.
    pub fn seal(self, key: &Key, plaintext: &[u8], aad: &[u8]) -> Result<Envelope> {
        let mut nonce = vec![0u8; self.nonce_len()];
        OsRng.fill_bytes(&mut nonce);

        let mut ciphertext = plaintext.to_vec();
        let tag = match self {
            CipherSuite::Aes256Gcm => seal_detached(
                Aes256Gcm::new(key.as_bytes().into()),
                &nonce,
                aad,
                &mut ciphertext,
            ),
            CipherSuite::XChaCha20Poly1305 => seal_detached(
                XChaCha20Poly1305::new(key.as_bytes().into()),
                &nonce,
                aad,
                &mut ciphertext,
            ),
        };
        let tag = match tag {
            Ok(tag) => tag,
            Err(e) => {
                ciphertext.zeroize();
                return Err(e);
            }
        };
        debug!("sealed {} bytes with {:?}", plaintext.len(), self);

        Ok(Envelope::new(self, nonce, tag, ciphertext))
    }

    /// Verifies and decrypts `envelope`. On any failure no plaintext leaves this function.
    pub fn open(self, key: &Key, envelope: &Envelope, aad: &[u8]) -> Result<Vec<u8>> {
        if envelope.suite() != self {
            return Err(CipherError::Authentication);
        }
        if envelope.nonce().len() != self.nonce_len() {
            return Err(CipherError::InvalidNonceLength {
                expected: self.nonce_len(),
                actual: envelope.nonce().len(),
            });
        }

        let mut buffer = envelope.ciphertext().to_vec();
        let opened = match self {
            CipherSuite::Aes256Gcm => open_detached(
                Aes256Gcm::new(key.as_bytes().into()),
                envelope.nonce(),
                aad,
                &mut buffer,
                envelope.tag(),
            ),
            CipherSuite::XChaCha20Poly1305 => open_detached(
                XChaCha20Poly1305::new(key.as_bytes().into()),
                envelope.nonce(),
                aad,
                &mut buffer,
                envelope.tag(),
            ),
        };

        match opened {
            Ok(()) => Ok(buffer),
            Err(e) => {
                buffer.zeroize();
                Err(e)
            }
        }
    }
}

fn seal_detached<A: AeadInPlace>(
    cipher: A,
    nonce: &[u8],
    aad: &[u8],
    buffer: &mut [u8],
) -> Result<[u8; TAG_LEN]> {
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, buffer)
        .map_err(|_| CipherError::Encryption)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(tag_bytes)
}

fn open_detached<A: AeadInPlace>(
    cipher: A,
    nonce: &[u8],
    aad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_LEN],
) -> Result<()> {
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            aad,
            buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| CipherError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITES: [CipherSuite; 2] = [CipherSuite::Aes256Gcm, CipherSuite::XChaCha20Poly1305];

    #[test]
    fn test_suite_ids_are_stable() {
        assert_eq!(CipherSuite::Aes256Gcm.id(), 0x1);
        assert_eq!(CipherSuite::XChaCha20Poly1305.id(), 0x2);
        for suite in SUITES {
            assert_eq!(CipherSuite::from_id(suite.id()).unwrap(), suite);
        }
        assert_eq!(
            CipherSuite::from_id(0x7).unwrap_err(),
            CipherError::UnknownSuite(0x7)
        );
    }

    #[test]
    fn test_encryption_round_trip() {
        let key = Key::generate();
        let data = b"lorem ipsum dolor sit amet, consectetur adipiscing elit.";

        for suite in SUITES {
            let envelope = suite.seal(&key, data, b"header").unwrap();
            assert_eq!(envelope.nonce().len(), suite.nonce_len());
            assert_ne!(envelope.ciphertext(), &data[..]);

            let plaintext = suite.open(&key, &envelope, b"header").unwrap();
            assert_eq!(plaintext, data);
        }
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        for suite in SUITES {
            let envelope = suite.seal(&Key::generate(), b"secret", &[]).unwrap();
            assert_eq!(
                suite.open(&Key::generate(), &envelope, &[]).unwrap_err(),
                CipherError::Authentication
            );
        }
    }

    #[test]
    fn test_mismatching_associated_data_fails_authentication() {
        let key = Key::generate();
        let envelope = CipherSuite::Aes256Gcm.seal(&key, b"secret", b"v1").unwrap();

        assert_eq!(
            CipherSuite::Aes256Gcm
                .open(&key, &envelope, b"v2")
                .unwrap_err(),
            CipherError::Authentication
        );
    }

    #[test]
    fn test_flipped_ciphertext_bit_fails_authentication() {
        let key = Key::generate();
        let envelope = CipherSuite::Aes256Gcm.seal(&key, b"secret", &[]).unwrap();
        let mut bytes = envelope.to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let tampered = Envelope::from_bytes(CipherSuite::Aes256Gcm, &bytes).unwrap();
        assert_eq!(
            CipherSuite::Aes256Gcm
                .open(&key, &tampered, &[])
                .unwrap_err(),
            CipherError::Authentication
        );
    }

    #[test]
    fn test_envelope_of_other_suite_is_rejected() {
        let key = Key::generate();
        let envelope = CipherSuite::Aes256Gcm.seal(&key, b"secret", &[]).unwrap();

        assert_eq!(
            CipherSuite::XChaCha20Poly1305
                .open(&key, &envelope, &[])
                .unwrap_err(),
            CipherError::Authentication
        );
    }
}
