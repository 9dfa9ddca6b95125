use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder};
use stegvault_cipher::{CipherSuite, Envelope};

use crate::error::VaultError;
use crate::result::Result;

/// plaintext header in front of every envelope: format byte + big endian `u32` length
pub const FRAME_HEADER_LEN: usize = 5;
pub const FRAME_HEADER_BITS: u64 = FRAME_HEADER_LEN as u64 * 8;
/// stored in the high nibble of the format byte
pub const FRAME_VERSION: u8 = 1;

/// The unencrypted part of a frame.
///
/// Its bytes are passed as associated data to the AEAD, so the header itself
/// is authenticated even though it is readable without the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    suite: CipherSuite,
    envelope_len: u32,
}

impl FrameHeader {
    pub fn new(suite: CipherSuite, envelope_len: u32) -> Result<Self> {
        if (envelope_len as usize) < suite.overhead() {
            return Err(VaultError::Format(format!(
                "envelope length {envelope_len} is below the {} bytes of nonce and tag",
                suite.overhead()
            )));
        }

        Ok(Self {
            suite,
            envelope_len,
        })
    }

    /// header for sealing `plaintext_len` bytes with `suite`
    pub fn for_plaintext(suite: CipherSuite, plaintext_len: usize) -> Result<Self> {
        let envelope_len = plaintext_len
            .checked_add(suite.overhead())
            .and_then(|len| u32::try_from(len).ok())
            .ok_or_else(|| {
                VaultError::Format(format!(
                    "a plaintext of {plaintext_len} bytes exceeds the frame length field"
                ))
            })?;

        Self::new(suite, envelope_len)
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    pub fn envelope_len(&self) -> u32 {
        self.envelope_len
    }

    pub fn plaintext_len(&self) -> usize {
        self.envelope_len as usize - self.suite.overhead()
    }

    /// header and envelope together, in bytes
    pub fn frame_len(&self) -> u64 {
        FRAME_HEADER_LEN as u64 + u64::from(self.envelope_len)
    }

    pub fn frame_bits(&self) -> u64 {
        self.frame_len() * 8
    }

    pub fn format_byte(&self) -> u8 {
        FRAME_VERSION << 4 | self.suite.id()
    }

    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_LEN] {
        let mut bytes = [0; FRAME_HEADER_LEN];
        bytes[0] = self.format_byte();
        BigEndian::write_u32(&mut bytes[1..], self.envelope_len);

        bytes
    }

    pub fn from_bytes(bytes: &[u8; FRAME_HEADER_LEN]) -> Result<Self> {
        let version = bytes[0] >> 4;
        if version != FRAME_VERSION {
            return Err(VaultError::Format(format!(
                "unsupported frame version {version}"
            )));
        }
        let suite = CipherSuite::from_id(bytes[0] & 0x0f)?;

        Self::new(suite, BigEndian::read_u32(&bytes[1..]))
    }

    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0; FRAME_HEADER_LEN];
        reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                VaultError::Format("carrier is too small for a frame header".to_owned())
            }
            _ => VaultError::Io(e),
        })?;

        Self::from_bytes(&bytes)
    }
}

/// What can be told about a frame without the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub version: u8,
    pub suite: CipherSuite,
    pub envelope_len: u32,
    pub plaintext_len: usize,
    /// bits of the carrier occupied by the frame
    pub frame_bits: u64,
    pub capacity_bits: u64,
}

impl FrameInfo {
    pub(crate) fn new(header: &FrameHeader, capacity_bits: u64) -> Self {
        Self {
            version: FRAME_VERSION,
            suite: header.suite(),
            envelope_len: header.envelope_len(),
            plaintext_len: header.plaintext_len(),
            frame_bits: header.frame_bits(),
            capacity_bits,
        }
    }
}

/// header bytes followed by the serialized envelope, the exact byte stream that gets hidden
pub fn encode_frame(header: &FrameHeader, envelope: &Envelope) -> Result<Vec<u8>> {
    if envelope.suite() != header.suite() || envelope.encoded_len() != header.envelope_len as usize
    {
        return Err(VaultError::Format(
            "envelope does not match its frame header".to_owned(),
        ));
    }

    let mut frame = Vec::with_capacity(header.frame_len() as usize);
    frame.extend_from_slice(&header.to_bytes());
    frame.extend_from_slice(&envelope.to_bytes());

    Ok(frame)
}

/// splits the envelope bytes following a header back into an [`Envelope`]
pub fn decode_envelope(header: &FrameHeader, bytes: &[u8]) -> Result<Envelope> {
    if bytes.len() != header.envelope_len as usize {
        return Err(VaultError::Format(format!(
            "expected {} envelope bytes, got {}",
            header.envelope_len,
            bytes.len()
        )));
    }

    Ok(Envelope::from_bytes(header.suite, bytes)?)
}
