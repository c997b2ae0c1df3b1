use std::fmt;
use std::path::Path;

use ::rsa::BigUint;
use rand::TryRngCore;
use rand::rngs::OsRng;
use tracing::{debug, trace};

use crate::constants::{RANDOM_LEN, SIGN_BODY_LEN, SIGN_BUFFER_LEN};
use crate::container::KeyContainer;
use crate::crypto::md4::md4;
use crate::error::{SignerError, SignerResult};
use crate::recovery::recover_with_fallback;
use crate::utils::{reverse_bytes, reverse_words};

/**
    Produces WMSigner signatures with a recovered private key.

    Holds only the private exponent and the modulus. Signing never mutates
    the signer, so one instance can be shared across threads.
*/
#[derive(Clone)]
pub struct Signer {
    exponent: BigUint,
    modulus: BigUint,
}

impl Signer {
    /**
        Recover the key from raw key file bytes and build a signer.

        If the full password does not verify the key, the first half of it
        (rounded up) is tried once more before giving up with
        [`SignerError::KeyFileCorrupted`].
    */
    pub fn new(identifier: &str, key: impl AsRef<[u8]>, password: &str) -> SignerResult<Self> {
        let (material, variant) = recover_with_fallback(key, identifier, password)?;
        debug!(wmid = identifier, %variant, "key container verified");
        Self::from_components(material.exponent(), material.modulus())
    }

    /// Read a key file from disk and build a signer.
    pub fn from_file(
        identifier: &str,
        path: impl AsRef<Path>,
        password: &str,
    ) -> SignerResult<Self> {
        if identifier.is_empty() {
            return Err(SignerError::IdentifierMissing);
        }
        let data = std::fs::read(path)?;
        Self::new(identifier, data, password)
    }

    /// Build a signer from a base64-encoded key file.
    pub fn from_base64(
        identifier: &str,
        key: impl AsRef<[u8]>,
        password: &str,
    ) -> SignerResult<Self> {
        if identifier.is_empty() {
            return Err(SignerError::IdentifierMissing);
        }
        let data = KeyContainer::from_base64(key)?.to_bytes();
        Self::new(identifier, data, password)
    }

    /// Build a signer from an already known exponent and modulus.
    pub fn from_components(exponent: BigUint, modulus: BigUint) -> SignerResult<Self> {
        if modulus.bits() == 0 {
            return Err(SignerError::InvalidModulus);
        }
        Ok(Self { exponent, modulus })
    }

    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Sign `message` using the operating system's random generator.
    pub fn sign(&self, message: impl AsRef<[u8]>) -> SignerResult<String> {
        self.sign_with_rng(&mut OsRng, message)
    }

    /**
        Sign `message`, drawing the 40 padding bytes from `rng`.

        Steps:
          1. MD4(message) followed by 40 random bytes
          2. prefixed with the body length (56) as a 2-byte little-endian word
          3. byte order reversed and read as a big-endian integer `M`
          4. `S = M ^ exponent mod modulus`
          5. minimal big-endian bytes of `S`, word order reversed
          6. lowercase hex

        The output is fully determined by the key, the message and the
        random bytes. A failing source yields
        [`SignerError::RandomSourceError`] and no signature.
    */
    pub fn sign_with_rng<R>(&self, rng: &mut R, message: impl AsRef<[u8]>) -> SignerResult<String>
    where
        R: TryRngCore + ?Sized,
    {
        let mut random = [0u8; RANDOM_LEN];
        rng.try_fill_bytes(&mut random)
            .map_err(|e| SignerError::RandomSourceError(e.to_string()))?;

        let buffer = signing_buffer(&md4(message.as_ref()), &random);
        let base = BigUint::from_bytes_be(&reverse_bytes(&buffer));
        let signature = base.modpow(&self.exponent, &self.modulus);
        trace!(bits = signature.bits(), "message signed");

        Ok(hex::encode(reverse_words(&minimal_be_bytes(&signature))))
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("modulus_bits", &self.modulus.bits())
            .finish_non_exhaustive()
    }
}

/// Length header, digest, then random bytes.
fn signing_buffer(digest: &[u8], random: &[u8; RANDOM_LEN]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(SIGN_BUFFER_LEN);
    buffer.extend(&(SIGN_BODY_LEN as u16).to_le_bytes());
    buffer.extend(digest);
    buffer.extend(random);
    buffer
}

/// Big-endian bytes without leading zeros; zero encodes as no bytes.
fn minimal_be_bytes(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 {
        return Vec::new();
    }
    value.to_bytes_be()
}
