use std::fmt;

use ::rsa::BigUint;

use crate::constants::{
    COMPONENT_LEN, MATERIAL_EXPONENT, MATERIAL_EXPONENT_LEN, MATERIAL_MODULUS,
    MATERIAL_MODULUS_LEN, MATERIAL_RESERVED, PAYLOAD_LEN,
};
use crate::error::{SignerError, SignerResult};
use crate::utils::reverse_bytes;

/**
    The decrypted key container payload.

    Holds the private exponent and the modulus, each stored least
    significant byte first in a fixed 66-byte field. The two length fields
    are carried as stored; extraction always reads the full fields.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub reserved: u32,
    /// Stored exponent length. Not used for extraction.
    pub exponent_len: u16,
    pub exponent: [u8; COMPONENT_LEN],
    /// Stored modulus length. Not used for extraction.
    pub modulus_len: u16,
    pub modulus: [u8; COMPONENT_LEN],
}

impl KeyMaterial {
    /// Split a decrypted payload into its fixed fields.
    pub fn from_payload(payload: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            reserved: u32::from_le_bytes(fixed(&payload[MATERIAL_RESERVED])),
            exponent_len: u16::from_le_bytes(fixed(&payload[MATERIAL_EXPONENT_LEN])),
            exponent: fixed(&payload[MATERIAL_EXPONENT]),
            modulus_len: u16::from_le_bytes(fixed(&payload[MATERIAL_MODULUS_LEN])),
            modulus: fixed(&payload[MATERIAL_MODULUS]),
        }
    }

    /// Serialize back into payload form.
    pub fn to_payload(&self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[MATERIAL_RESERVED].copy_from_slice(&self.reserved.to_le_bytes());
        payload[MATERIAL_EXPONENT_LEN].copy_from_slice(&self.exponent_len.to_le_bytes());
        payload[MATERIAL_EXPONENT].copy_from_slice(&self.exponent);
        payload[MATERIAL_MODULUS_LEN].copy_from_slice(&self.modulus_len.to_le_bytes());
        payload[MATERIAL_MODULUS].copy_from_slice(&self.modulus);
        payload
    }

    /**
        Build key material from an exponent and a modulus.

        Length fields are set to the bit length of each value. Fails with
        [`SignerError::KeyComponentTooLarge`] if either value needs more
        than 66 bytes.
    */
    pub fn from_components(exponent: &BigUint, modulus: &BigUint) -> SignerResult<Self> {
        Ok(Self {
            reserved: 0,
            exponent_len: bit_len(exponent),
            exponent: encode_component(exponent)?,
            modulus_len: bit_len(modulus),
            modulus: encode_component(modulus)?,
        })
    }

    /// The private exponent.
    pub fn exponent(&self) -> BigUint {
        decode_component(&self.exponent)
    }

    /// The modulus.
    pub fn modulus(&self) -> BigUint {
        decode_component(&self.modulus)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("reserved", &self.reserved)
            .field("exponent_len", &self.exponent_len)
            .field("modulus_len", &self.modulus_len)
            .finish_non_exhaustive()
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

fn decode_component(field: &[u8; COMPONENT_LEN]) -> BigUint {
    BigUint::from_bytes_be(&reverse_bytes(field))
}

fn encode_component(value: &BigUint) -> SignerResult<[u8; COMPONENT_LEN]> {
    let be = value.to_bytes_be();
    if be.len() > COMPONENT_LEN {
        return Err(SignerError::KeyComponentTooLarge(be.len()));
    }
    let mut field = [0u8; COMPONENT_LEN];
    field[..be.len()].copy_from_slice(&reverse_bytes(&be));
    Ok(field)
}

fn bit_len(value: &BigUint) -> u16 {
    // Bounded by encode_component: at most 66 * 8 bits.
    u16::try_from(value.bits()).unwrap_or(u16::MAX)
}
