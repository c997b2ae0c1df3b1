/*!
    Primitives of the key file format and the signing scheme.

    - MD4 for the checksum, the decryption mask and the message digest
    - XOR masking of the key container payload
*/

pub(crate) mod mask;
pub(crate) mod md4;
