use std::fmt;

use ::rsa::BigUint;
use tracing::{debug, warn};

use crate::container::KeyContainer;
use crate::error::{SignerError, SignerResult};
use crate::material::KeyMaterial;

/// Which form of the password decrypted a key container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordVariant {
    /// The password as given.
    Full,
    /// The first half of the password, rounded up.
    Half,
}

impl fmt::Display for PasswordVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full password"),
            Self::Half => write!(f, "half password"),
        }
    }
}

/**
    Make one decryption attempt.

    Parses `data`, decrypts the payload with the mask for `identifier` and
    `password` and checks the checksum. The decrypted container is returned
    together with the verification result, whether it passed or not.
*/
pub fn try_recover(
    data: impl AsRef<[u8]>,
    identifier: &str,
    password: impl AsRef<[u8]>,
) -> SignerResult<(KeyContainer, bool)> {
    let mut container = KeyContainer::from_bytes(data)?;
    container.decrypt(identifier, password.as_ref());
    let verified = container.verify();
    Ok((container, verified))
}

/**
    Recover the private exponent and modulus from a key file.

    Makes exactly one attempt. A checksum mismatch is reported as
    [`SignerError::VerificationFailed`] so the caller can decide whether to
    try another password.
*/
pub fn recover(
    data: impl AsRef<[u8]>,
    identifier: &str,
    password: impl AsRef<[u8]>,
) -> SignerResult<(BigUint, BigUint)> {
    let (container, verified) = try_recover(data, identifier, password)?;
    if !verified {
        return Err(SignerError::VerificationFailed);
    }
    let material = container.key_material();
    Ok((material.exponent(), material.modulus()))
}

/**
    The first `ceil(len / 2)` bytes of `password`.

    Some key issuance tooling encrypted keys with this truncated password
    instead of the one the user typed.
*/
pub fn half_password(password: &[u8]) -> &[u8] {
    &password[..password.len().div_ceil(2)]
}

/**
    Recover key material, falling back to the halved password once.

    Fails with [`SignerError::IdentifierMissing`] for an empty identifier
    and with [`SignerError::KeyFileCorrupted`] if neither the full nor the
    halved password verifies.
*/
pub fn recover_with_fallback(
    data: impl AsRef<[u8]>,
    identifier: &str,
    password: &str,
) -> SignerResult<(KeyMaterial, PasswordVariant)> {
    if identifier.is_empty() {
        return Err(SignerError::IdentifierMissing);
    }
    let data = data.as_ref();

    debug!(wmid = identifier, "decrypting key container");
    let (container, verified) = try_recover(data, identifier, password)?;
    if verified {
        return Ok((container.key_material(), PasswordVariant::Full));
    }

    debug!(wmid = identifier, "checksum mismatch, retrying with half of the password");
    let (container, verified) = try_recover(data, identifier, half_password(password.as_bytes()))?;
    if verified {
        return Ok((container.key_material(), PasswordVariant::Half));
    }

    warn!(wmid = identifier, "key container failed verification with both password forms");
    Err(SignerError::KeyFileCorrupted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CONTAINER_LEN;

    const KEY_FILE: &[u8] = include_bytes!("../testfiles/test.kwm");
    const WMID: &str = "405002833238";
    const PASSWORD: &str = "FvGqPdAy8reVWw789";

    const MODULUS_HEX: &[u8] = b"b77d79b2dc63a414c66b53b0c512c2dbdf527e5fdef4f2646457f29ea35f1015\
        dd23ebed3f97b60ef03212ab68b577b385191f28239c15e5ecf8023b9fb3a1005a81";
    const EXPONENT_HEX: &[u8] = b"550e11daaa3479fbb35a4eea130036594b74e6e5b3e9216f0de082b3ac914558\
        8c67c73561e64e635680a9ae13588d87163c8b5ab2867edc0dbe85e7023d95057911";

    #[test]
    fn recovers_known_components() {
        let (exponent, modulus) = recover(KEY_FILE, WMID, PASSWORD).unwrap();
        assert_eq!(exponent, BigUint::parse_bytes(EXPONENT_HEX, 16).unwrap());
        assert_eq!(modulus, BigUint::parse_bytes(MODULUS_HEX, 16).unwrap());
        assert_eq!(modulus.bits(), 528);
    }

    #[test]
    fn recover_reports_mismatch() {
        let err = recover(KEY_FILE, WMID, "not the password").unwrap_err();
        assert_eq!(err, SignerError::VerificationFailed);
    }

    #[test]
    fn recover_identifier_is_part_of_mask() {
        let err = recover(KEY_FILE, "405002833239", PASSWORD).unwrap_err();
        assert_eq!(err, SignerError::VerificationFailed);
    }

    #[test]
    fn recover_rejects_short_input() {
        let err = recover(&KEY_FILE[..100], WMID, PASSWORD).unwrap_err();
        assert_eq!(
            err,
            SignerError::MalformedKeyFile {
                actual: 100,
                expected: CONTAINER_LEN
            }
        );
    }

    #[test]
    fn try_recover_returns_container_on_mismatch() {
        let (container, verified) = try_recover(KEY_FILE, WMID, "").unwrap();
        assert!(!verified);
        assert_eq!(container.length, 140);

        let (_, verified) = try_recover(KEY_FILE, WMID, PASSWORD).unwrap();
        assert!(verified);
    }

    #[test]
    fn half_password_rounds_up() {
        assert_eq!(half_password(b""), b"");
        assert_eq!(half_password(b"a"), b"a");
        assert_eq!(half_password(b"ab"), b"a");
        assert_eq!(half_password(b"abc"), b"ab");
        assert_eq!(half_password(b"abcd"), b"ab");
        assert_eq!(half_password(PASSWORD.repeat(2).as_bytes()), PASSWORD.as_bytes());
    }

    #[test]
    fn fallback_prefers_full_password() {
        let (material, variant) = recover_with_fallback(KEY_FILE, WMID, PASSWORD).unwrap();
        assert_eq!(variant, PasswordVariant::Full);
        assert_eq!(material.modulus(), BigUint::parse_bytes(MODULUS_HEX, 16).unwrap());
    }

    #[test]
    fn fallback_uses_half_password() {
        let doubled = PASSWORD.repeat(2);
        let (material, variant) = recover_with_fallback(KEY_FILE, WMID, &doubled).unwrap();
        assert_eq!(variant, PasswordVariant::Half);
        assert_eq!(material.exponent(), BigUint::parse_bytes(EXPONENT_HEX, 16).unwrap());

        // 33 bytes round up to the 17-byte password
        let odd = format!("{PASSWORD}{}", &PASSWORD[..16]);
        let (_, variant) = recover_with_fallback(KEY_FILE, WMID, &odd).unwrap();
        assert_eq!(variant, PasswordVariant::Half);
    }

    #[test]
    fn fallback_fails_when_both_forms_mismatch() {
        let err = recover_with_fallback(KEY_FILE, WMID, "").unwrap_err();
        assert_eq!(err, SignerError::KeyFileCorrupted);

        let err = recover_with_fallback(KEY_FILE, WMID, "FvGqPdAy8reVWw780").unwrap_err();
        assert_eq!(err, SignerError::KeyFileCorrupted);
    }

    #[test]
    fn fallback_requires_identifier() {
        let err = recover_with_fallback(KEY_FILE, "", PASSWORD).unwrap_err();
        assert_eq!(err, SignerError::IdentifierMissing);
    }

    #[test]
    fn fallback_does_not_retry_malformed_input() {
        let err = recover_with_fallback(&KEY_FILE[..10], WMID, PASSWORD).unwrap_err();
        assert!(matches!(err, SignerError::MalformedKeyFile { actual: 10, .. }));
    }

    #[test]
    fn variant_display() {
        assert_eq!(PasswordVariant::Full.to_string(), "full password");
        assert_eq!(PasswordVariant::Half.to_string(), "half password");
    }
}
