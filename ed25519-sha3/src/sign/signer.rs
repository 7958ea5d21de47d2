use crate::Result;
use crate::keys::{ExpandedSecretKey, KeyPair, PublicKey};
use crate::sign::{Signature, verify};

/// Signs and verifies on behalf of one [`KeyPair`].
#[derive(Copy, Clone, Debug)]
pub struct DsaSigner<'k> {
    key_pair: &'k KeyPair,
}

impl<'k> DsaSigner<'k> {
    /// Signer over `key_pair`.
    pub fn new(key_pair: &'k KeyPair) -> Self {
        Self { key_pair }
    }

    /// The key pair this signer was built over.
    pub fn key_pair(&self) -> &'k KeyPair {
        self.key_pair
    }

    /// Sign `message`.
    ///
    /// Fails with [`MissingPrivateKey`](crate::Error::MissingPrivateKey) on a
    /// public-only key pair and with
    /// [`NonCanonicalSignature`](crate::Error::NonCanonicalSignature) if the
    /// resulting `S` is not canonical.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let private_key = self.key_pair.require_private_key()?;
        ExpandedSecretKey::from(private_key).sign_raw(self.key_pair.public_key(), message)
    }

    /// Verify `signature` over `message` against this key pair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify(message, signature, self.key_pair.public_key())
    }

    /// Whether `S` is non-zero and below the group order.
    pub fn is_canonical_signature(&self, signature: &Signature) -> bool {
        signature.is_canonical()
    }

    /// Reduce `S` modulo the group order.
    pub fn make_signature_canonical(&self, signature: &Signature) -> Signature {
        signature.to_canonical()
    }
}

impl crypto_signature::Signer<Signature> for KeyPair {
    fn try_sign(&self, message: &[u8]) -> core::result::Result<Signature, crypto_signature::Error> {
        DsaSigner::new(self).sign(message).map_err(Into::into)
    }
}

impl crypto_signature::Verifier<Signature> for PublicKey {
    fn verify(
        &self,
        message: &[u8],
        signature: &Signature,
    ) -> core::result::Result<(), crypto_signature::Error> {
        if verify(message, signature, self) {
            Ok(())
        } else {
            Err(crypto_signature::Error::new())
        }
    }
}

impl crypto_signature::Verifier<Signature> for KeyPair {
    fn verify(
        &self,
        message: &[u8],
        signature: &Signature,
    ) -> core::result::Result<(), crypto_signature::Error> {
        crypto_signature::Verifier::verify(self.public_key(), message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::keys::PrivateKey;
    use crypto_signature::{Signer, Verifier};
    use hex_literal::hex;

    fn sender() -> KeyPair {
        KeyPair::from_private_key(PrivateKey::from_bytes(hex!(
            "2a91e1d5c110a8d0105aad4683f962c2a56663a3cad46666b16d243174673d90"
        )))
    }

    #[test]
    fn sign_known_answer() {
        let key_pair = sender();
        let signature = DsaSigner::new(&key_pair).sign(b"NEM is awesome !").unwrap();
        assert_eq!(
            signature.to_bytes(),
            hex!(
                "a5bb281a2900ecc9221532041877107d7f494a2ee83d9e12abd9183c007987d9"
                "12ad841554e7e033e271cb676254a4e075059fb61f7b4dde947c61e3c50eea09"
            )
        );
    }

    #[test]
    fn public_only_pair_cannot_sign() {
        let key_pair = KeyPair::from_public_key(*sender().public_key());
        assert_eq!(
            DsaSigner::new(&key_pair).sign(b"message"),
            Err(Error::MissingPrivateKey)
        );
        assert!(key_pair.try_sign(b"message").is_err());
    }

    #[test]
    fn signature_traits() {
        let key_pair = sender();
        let signature: Signature = key_pair.sign(b"trait message");
        assert!(key_pair.public_key().verify(b"trait message", &signature).is_ok());
        assert!(key_pair.verify(b"other message", &signature).is_err());
    }

    #[test]
    fn make_signature_canonical_reduces_s() {
        let key_pair = sender();
        let signer = DsaSigner::new(&key_pair);
        let signature = signer.sign(b"reduce me").unwrap();

        // S + L encodes the same scalar but is not canonical.
        let s_plus_l = crate::field::Scalar::from_bits(signature.S);
        let mut widened = [0u16; 33];
        for (i, (s, l)) in s_plus_l
            .to_bytes()
            .iter()
            .zip(crate::field::ORDER.iter())
            .enumerate()
        {
            widened[i] += u16::from(*s) + u16::from(*l);
            widened[i + 1] = widened[i] >> 8;
            widened[i] &= 0xff;
        }
        let mut S = [0u8; 32];
        for (dst, src) in S.iter_mut().zip(widened.iter()) {
            *dst = *src as u8;
        }
        let malleated = Signature::from_components(signature.R, S);

        assert!(!signer.is_canonical_signature(&malleated));
        assert!(!signer.verify(b"reduce me", &malleated));

        let repaired = signer.make_signature_canonical(&malleated);
        assert_eq!(repaired, signature);
        assert!(signer.verify(b"reduce me", &repaired));
    }
}
