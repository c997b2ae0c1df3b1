use ::md4::{Digest, Md4};

use crate::constants::DIGEST_LEN;

/// MD4 digest of `data`.
pub fn md4(data: &[u8]) -> [u8; DIGEST_LEN] {
    Md4::digest(data).into()
}

/**
    Derive the payload mask for a key container.

    The mask is MD4(identifier || password), with no separator. The password
    is taken as raw bytes so a halved password may end mid-character.
*/
pub fn derive_mask(identifier: &[u8], password: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Md4::new();
    hasher.update(identifier);
    hasher.update(password);
    hasher.finalize().into()
}
