use crate::constants::{DIGEST_LEN, PAYLOAD_CLEAR_PREFIX, PAYLOAD_LEN};

/**
    XOR the key container payload with the mask, in place.

    The first [`PAYLOAD_CLEAR_PREFIX`] bytes are left as they are. Every
    following byte at offset `i` is XORed with `mask[(i - 5) % 16]`.

    Applying the same mask twice restores the input, so this both encrypts
    and decrypts.
*/
pub fn apply_mask(payload: &mut [u8; PAYLOAD_LEN], mask: &[u8; DIGEST_LEN]) {
    for (byte, m) in payload[PAYLOAD_CLEAR_PREFIX..]
        .iter_mut()
        .zip(mask.iter().cycle())
    {
        *byte ^= m;
    }
}
