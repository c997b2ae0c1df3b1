use crate::constants::{
    CONTAINER_CHECKSUM, CONTAINER_LEN, CONTAINER_LENGTH, CONTAINER_PAYLOAD, CONTAINER_RESERVED,
    CONTAINER_SIGN_FLAG, DIGEST_LEN, PAYLOAD_LEN,
};
use crate::crypto::mask::apply_mask;
use crate::crypto::md4::{derive_mask, md4};
use crate::error::{SignerError, SignerResult};
use crate::material::KeyMaterial;

/// Represents a parsed key container (`.kwm` key file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyContainer {
    /// Bytes 0..2. Carried through unchanged and covered by the checksum.
    pub reserved: u16,
    /// Bytes 2..4. Not used for signing.
    pub sign_flag: u16,
    /// MD4 over `reserved || length || plaintext payload`.
    pub checksum: [u8; DIGEST_LEN],
    /// Stored payload length. Covered by the checksum, never validated.
    pub length: u32,
    /// Encrypted key material, or plaintext once decrypted.
    pub payload: [u8; PAYLOAD_LEN],
}

impl KeyContainer {
    /**
        Parse a base64-encoded key file.

        Line breaks and other ASCII whitespace are skipped, so output
        wrapped at 76 columns by `base64` or `openssl base64` decodes as is.
    */
    pub fn from_base64(data: impl AsRef<[u8]>) -> SignerResult<Self> {
        let bytes = wrapped_base64()?
            .decode(data.as_ref())
            .map_err(|e| SignerError::InvalidBase64(format!("key file: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /**
        Parse a key container from raw key file bytes.

        Exactly [`CONTAINER_LEN`] bytes are read; anything after them is
        ignored. Shorter input fails with [`SignerError::MalformedKeyFile`].
    */
    pub fn from_bytes(data: impl AsRef<[u8]>) -> SignerResult<Self> {
        let data: &[u8] = data.as_ref();
        let record: &[u8; CONTAINER_LEN] = data
            .get(..CONTAINER_LEN)
            .and_then(|record| record.try_into().ok())
            .ok_or(SignerError::MalformedKeyFile {
                actual: data.len(),
                expected: CONTAINER_LEN,
            })?;

        let mut checksum = [0u8; DIGEST_LEN];
        checksum.copy_from_slice(&record[CONTAINER_CHECKSUM]);
        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&record[CONTAINER_PAYLOAD]);

        Ok(Self {
            reserved: u16::from_le_bytes([record[0], record[1]]),
            sign_flag: u16::from_le_bytes([record[2], record[3]]),
            checksum,
            length: u32::from_le_bytes([record[20], record[21], record[22], record[23]]),
            payload,
        })
    }

    /// Serialize back into key file format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; CONTAINER_LEN];
        buffer[CONTAINER_RESERVED].copy_from_slice(&self.reserved.to_le_bytes());
        buffer[CONTAINER_SIGN_FLAG].copy_from_slice(&self.sign_flag.to_le_bytes());
        buffer[CONTAINER_CHECKSUM].copy_from_slice(&self.checksum);
        buffer[CONTAINER_LENGTH].copy_from_slice(&self.length.to_le_bytes());
        buffer[CONTAINER_PAYLOAD].copy_from_slice(&self.payload);
        buffer
    }

    /// Serialize to a base64-encoded key file.
    pub fn to_base64(&self) -> String {
        data_encoding::BASE64.encode(&self.to_bytes())
    }

    /**
        The record the checksum is computed over.

        `reserved` (2 bytes), `length` (4 bytes) and the current payload
        (140 bytes), little-endian, in that order. The sign flag and the
        stored checksum are not part of it.
    */
    pub fn checksum_input(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(2 + 4 + PAYLOAD_LEN);
        buffer.extend(&self.reserved.to_le_bytes());
        buffer.extend(&self.length.to_le_bytes());
        buffer.extend(&self.payload);
        buffer
    }

    /// MD4 of [`Self::checksum_input`].
    pub fn compute_checksum(&self) -> [u8; DIGEST_LEN] {
        md4(&self.checksum_input())
    }

    /// Whether the stored checksum matches the current payload.
    pub fn verify(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    /**
        XOR the payload with the mask derived from `identifier` and
        `password`. Decrypting twice with the same pair restores the
        ciphertext.
    */
    pub fn decrypt(&mut self, identifier: &str, password: &[u8]) {
        let mask = derive_mask(identifier.as_bytes(), password);
        apply_mask(&mut self.payload, &mask);
    }

    /**
        Prepare a plaintext container for writing to disk.

        Sets the checksum over the current (plaintext) payload, then
        encrypts the payload for `identifier` and `password`. The result
        passes [`Self::decrypt`] followed by [`Self::verify`].
    */
    pub fn seal(&mut self, identifier: &str, password: &[u8]) {
        self.checksum = self.compute_checksum();
        self.decrypt(identifier, password);
    }

    /// Build a plaintext container around `material`.
    pub fn from_material(material: &KeyMaterial) -> Self {
        Self {
            reserved: 0,
            sign_flag: 0,
            checksum: [0u8; DIGEST_LEN],
            length: PAYLOAD_LEN as u32,
            payload: material.to_payload(),
        }
    }

    /// Read the key material out of a decrypted payload.
    pub fn key_material(&self) -> KeyMaterial {
        KeyMaterial::from_payload(&self.payload)
    }
}

/// Standard base64 that ignores whitespace between symbols.
fn wrapped_base64() -> SignerResult<data_encoding::Encoding> {
    let mut spec = data_encoding::BASE64.specification();
    spec.ignore.push_str(" \t\r\n");
    spec.encoding().map_err(|e| SignerError::InvalidBase64(e.to_string()))
}
