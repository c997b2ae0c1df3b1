use std::ops::Range;

/**
    Size of a key container record (`.kwm` file) on disk.

    Layout, little-endian:

    | offset | width | field      |
    |--------|-------|------------|
    | 0      | 2     | reserved   |
    | 2      | 2     | sign flag  |
    | 4      | 16    | checksum   |
    | 20     | 4     | length     |
    | 24     | 140   | payload    |
*/
pub const CONTAINER_LEN: usize = 164;

pub const CONTAINER_RESERVED: Range<usize> = 0..2;
pub const CONTAINER_SIGN_FLAG: Range<usize> = 2..4;
pub const CONTAINER_CHECKSUM: Range<usize> = 4..20;
pub const CONTAINER_LENGTH: Range<usize> = 20..24;
pub const CONTAINER_PAYLOAD: Range<usize> = 24..CONTAINER_LEN;

/// MD4 digest width, used for the checksum, the mask and the message hash.
pub const DIGEST_LEN: usize = 16;

pub const PAYLOAD_LEN: usize = 140;

/// Number of leading payload bytes the mask never touches.
pub const PAYLOAD_CLEAR_PREFIX: usize = 5;

/**
    Layout of the decrypted payload, little-endian:

    | offset | width | field          |
    |--------|-------|----------------|
    | 0      | 4     | reserved       |
    | 4      | 2     | exponent length|
    | 6      | 66    | exponent       |
    | 72     | 2     | modulus length |
    | 74     | 66    | modulus        |

    The exponent and modulus are stored least significant byte first.
*/
pub const COMPONENT_LEN: usize = 66;

pub const MATERIAL_RESERVED: Range<usize> = 0..4;
pub const MATERIAL_EXPONENT_LEN: Range<usize> = 4..6;
pub const MATERIAL_EXPONENT: Range<usize> = 6..72;
pub const MATERIAL_MODULUS_LEN: Range<usize> = 72..74;
pub const MATERIAL_MODULUS: Range<usize> = 74..PAYLOAD_LEN;

/// Random bytes appended to the message digest before exponentiation.
pub const RANDOM_LEN: usize = 40;

/// Digest plus random padding; also the value of the first header byte.
pub const SIGN_BODY_LEN: usize = DIGEST_LEN + RANDOM_LEN;

/// Two-byte little-endian length header followed by the body.
pub const SIGN_BUFFER_LEN: usize = 2 + SIGN_BODY_LEN;
