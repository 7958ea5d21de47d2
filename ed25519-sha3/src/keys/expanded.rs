use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::edwards::EdwardsPoint;
use crate::field::{SCALAR_LENGTH, Scalar};
use crate::hash::sha3_512;
use crate::keys::{KeyBytes, PrivateKey, PublicKey};
use crate::sign::Signature;
use crate::{Error, Result};

/// Secret values derived from a seed by `SHA3-512(seed)`: the clamped
/// signing scalar from the low half and the nonce prefix from the high
/// half.
#[derive(Clone)]
pub(crate) struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) hash_prefix: [u8; SCALAR_LENGTH],
}

impl Zeroize for ExpandedSecretKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
        self.hash_prefix.zeroize();
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for ExpandedSecretKey {}

impl From<&PrivateKey> for ExpandedSecretKey {
    fn from(private_key: &PrivateKey) -> Self {
        Self::from_seed(private_key.as_bytes())
    }
}

impl ExpandedSecretKey {
    pub(crate) fn from_seed(seed: &KeyBytes) -> Self {
        let hash = Zeroizing::new(sha3_512(&[seed]));

        let mut scalar_bytes = Zeroizing::new([0u8; SCALAR_LENGTH]);
        scalar_bytes.copy_from_slice(&hash[..SCALAR_LENGTH]);
        let scalar = Scalar::from_clamped(*scalar_bytes);

        let mut hash_prefix = [0u8; SCALAR_LENGTH];
        hash_prefix.copy_from_slice(&hash[SCALAR_LENGTH..]);

        Self {
            scalar,
            hash_prefix,
        }
    }

    pub(crate) fn public_key(&self) -> PublicKey {
        PublicKey::from(&EdwardsPoint::mul_base(&self.scalar))
    }

    /// Deterministic signature over `message` under `public_key`.
    ///
    /// `r = H(prefix || M) mod L`, `R = r * B`,
    /// `h = H(R || A || M) mod L`, `S = h * a + r mod L`.
    pub(crate) fn sign_raw(&self, public_key: &PublicKey, message: &[u8]) -> Result<Signature> {
        let r = Zeroizing::new(Scalar::from_bytes_mod_order_wide(&sha3_512(&[
            &self.hash_prefix,
            message,
        ])));
        let R = EdwardsPoint::mul_base(&r).compress();

        let h = Scalar::from_bytes_mod_order_wide(&sha3_512(&[
            R.as_bytes(),
            public_key.as_bytes(),
            message,
        ]));
        let S = Scalar::multiply_and_add(&h, &self.scalar, &r);

        let signature = Signature::from_components(R.to_bytes(), S.to_bytes());
        if !signature.is_canonical() {
            debug_event!("generated signature has a non-canonical S");
            return Err(Error::NonCanonicalSignature);
        }
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn scalar_is_clamped() {
        let expanded = ExpandedSecretKey::from_seed(&[7u8; 32]);
        let bytes = expanded.scalar.to_bytes();
        assert_eq!(bytes[0] & 0x07, 0);
        assert_eq!(bytes[31] & 0xc0, 0x40);
    }

    #[test]
    fn halves_come_from_sha3_512() {
        let seed = hex!("2618090794e9c9682f2ac6504369a2f4fb9fe7ee7746f9560aca228d355b1cb9");
        let hash = sha3_512(&[&seed]);
        let expanded = ExpandedSecretKey::from_seed(&seed);
        assert_eq!(expanded.hash_prefix, hash[32..]);
        assert_eq!(expanded.scalar.to_bytes()[1..31], hash[1..31]);
    }
}
