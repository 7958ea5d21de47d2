//! Key material: private seeds, encoded public keys and key pairs.

mod expanded;

pub(crate) use expanded::ExpandedSecretKey;

use alloc::{format, string::String, vec::Vec};
use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};
use core::str::FromStr;

use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::{Error, Result};

/// Length of both private and public keys in bytes.
pub const KEY_LENGTH: usize = 32;

/// Raw key bytes.
pub type KeyBytes = [u8; KEY_LENGTH];

/// A 32-byte private seed.
///
/// The signing scalar and the nonce prefix are both derived from the seed by
/// hashing; the seed itself is never used as a scalar directly. The bytes are
/// wiped on drop.
#[derive(Clone)]
pub struct PrivateKey(KeyBytes);

impl PrivateKey {
    /// Wrap a 32-byte seed.
    pub fn from_bytes(bytes: KeyBytes) -> Self {
        Self(bytes)
    }

    /// Fails with [`Error::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LENGTH`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        KeyBytes::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidKeyLength)
    }

    /// Draw a fresh seed from `rng`.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut seed = [0u8; KEY_LENGTH];
        rng.try_fill_bytes(&mut seed)?;
        Ok(Self(seed))
    }

    /// The raw seed.
    pub fn as_bytes(&self) -> &KeyBytes {
        &self.0
    }

    /// The public key `a * B`, where `a` is the clamped low half of
    /// `SHA3-512(seed)`.
    pub fn public_key(&self) -> PublicKey {
        ExpandedSecretKey::from(self).public_key()
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for PrivateKey {}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// Lowercase hex of the seed.
impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let encoded = Zeroizing::new(hex::encode(self.0));
        f.write_str(&encoded)
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode_hex_key(s).map(Self)
    }
}

impl From<KeyBytes> for PrivateKey {
    fn from(bytes: KeyBytes) -> Self {
        Self(bytes)
    }
}

/// A 32-byte encoded curve point.
///
/// Construction does not check that the bytes decode to a point; that
/// happens when the key is used.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PublicKey(KeyBytes);

impl PublicKey {
    /// Wrap an encoded point. The encoding is not checked until it is used.
    pub fn from_bytes(bytes: KeyBytes) -> Self {
        Self(bytes)
    }

    /// Fails with [`Error::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LENGTH`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        KeyBytes::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidKeyLength)
    }

    /// The encoded point.
    pub fn as_bytes(&self) -> &KeyBytes {
        &self.0
    }

    /// Copy of the encoded point.
    pub fn to_bytes(&self) -> KeyBytes {
        self.0
    }

    /// Decode to a curve point.
    pub fn to_point(&self) -> Result<EdwardsPoint> {
        Option::from(CompressedEdwardsY(self.0).decompress()).ok_or_else(|| {
            debug_event!("public key does not decode to a curve point");
            Error::InvalidPoint
        })
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> Choice {
        self.0.ct_eq(&[0u8; KEY_LENGTH])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<KeyBytes> for PublicKey {
    fn from(bytes: KeyBytes) -> Self {
        Self(bytes)
    }
}

impl From<CompressedEdwardsY> for PublicKey {
    fn from(point: CompressedEdwardsY) -> Self {
        Self(point.to_bytes())
    }
}

impl From<&EdwardsPoint> for PublicKey {
    fn from(point: &EdwardsPoint) -> Self {
        point.compress().into()
    }
}

/// Uppercase hex.
impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:X}")
    }
}

impl LowerHex for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl UpperHex for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode_hex_key(s).map(Self)
    }
}

/// Decode a hex key, left-padding odd-length input with a `0` nibble.
fn decode_hex_key(s: &str) -> Result<KeyBytes> {
    let raw: Zeroizing<Vec<u8>> = if s.len() % 2 == 1 {
        let padded: Zeroizing<String> = Zeroizing::new(format!("0{s}"));
        Zeroizing::new(hex::decode(padded.as_str())?)
    } else {
        Zeroizing::new(hex::decode(s)?)
    };
    KeyBytes::try_from(raw.as_slice()).map_err(|_| Error::InvalidKeyLength)
}

/// A public key with an optional private half.
///
/// Signing and decryption need the private half; verification and the
/// peer side of encryption need only the public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPair {
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
}

impl KeyPair {
    /// Build a full key pair, deriving the public key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key: Some(private_key),
            public_key,
        }
    }

    /// Build a verification-only key pair.
    pub fn from_public_key(public_key: PublicKey) -> Self {
        Self {
            private_key: None,
            public_key,
        }
    }

    /// Pair a private key with a caller-supplied public key.
    ///
    /// The two are not checked against each other; signatures made with a
    /// mismatched pair will not verify.
    pub fn from_parts(private_key: PrivateKey, public_key: PublicKey) -> Self {
        Self {
            private_key: Some(private_key),
            public_key,
        }
    }

    /// Generate a fresh key pair from `rng`.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        PrivateKey::generate(rng).map(Self::from_private_key)
    }

    /// The private half, if present.
    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Whether signing and decryption are possible.
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub(crate) fn require_private_key(&self) -> Result<&PrivateKey> {
        self.private_key.as_ref().ok_or_else(|| {
            debug_event!("operation needs a private key");
            Error::MissingPrivateKey
        })
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(private_key: PrivateKey) -> Self {
        Self::from_private_key(private_key)
    }
}

impl From<PublicKey> for KeyPair {
    fn from(public_key: PublicKey) -> Self {
        Self::from_public_key(public_key)
    }
}

/// Generates key pairs and derives public keys.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyGenerator;

impl KeyGenerator {
    /// Fails with [`Error::Randomness`] if `rng` cannot supply 32 bytes.
    pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        KeyPair::generate(rng)
    }

    /// Public key belonging to `private_key`.
    pub fn derive_public_key(&self, private_key: &PrivateKey) -> PublicKey {
        private_key.public_key()
    }
}

/// Generate a key pair from `rng`.
pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<KeyPair> {
    KeyGenerator.generate_key_pair(rng)
}

/// Derive the public key for `private_key`.
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    KeyGenerator.derive_public_key(private_key)
}

/// Inspects encoded keys.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyAnalyzer;

impl KeyAnalyzer {
    /// Edwards25519 public keys are always stored compressed, so an
    /// encoding is compressed exactly when it is [`KEY_LENGTH`] bytes.
    pub fn is_key_compressed(&self, public_key: &[u8]) -> bool {
        public_key.len() == KEY_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use hex_literal::hex;

    const KEY_HEX: &str = "227F227F227F227F227F227F227F227F227F227F227F227F227F227F227F227F";
    const KEY_BYTES: KeyBytes = hex!("227F227F227F227F227F227F227F227F227F227F227F227F227F227F227F227F");

    #[test]
    fn private_key_displays_lowercase_hex() {
        let hex_str = "2275227522752275227522752275227522752275227522752275227522752275";
        let key: PrivateKey = hex_str.parse().unwrap();
        assert_eq!(key.to_string(), hex_str);
    }

    #[test]
    fn private_key_rejects_wrong_length() {
        assert_eq!("ABC".parse::<PrivateKey>(), Err(Error::InvalidKeyLength));
        assert_eq!(
            PrivateKey::from_slice(&[0u8; 31]),
            Err(Error::InvalidKeyLength)
        );
    }

    #[test]
    fn private_key_rejects_malformed_hex() {
        let malformed = "227F227F227F227F227F227F227F227F227F227F227F227F227F227F227FXXXX";
        assert_eq!(malformed.parse::<PrivateKey>(), Err(Error::InvalidHex));
        assert_eq!(malformed.parse::<PublicKey>(), Err(Error::InvalidHex));
    }

    #[test]
    fn odd_length_hex_is_left_padded() {
        // 63 nibbles: a leading zero nibble is implied
        let odd = &"0a91e1d5c110a8d0105aad4683f962c2a56663a3cad46666b16d243174673d90"[1..];
        let key: PublicKey = odd.parse().unwrap();
        assert_eq!(
            key.to_bytes(),
            hex!("0a91e1d5c110a8d0105aad4683f962c2a56663a3cad46666b16d243174673d90")
        );
    }

    #[test]
    fn public_key_from_hex_and_display() {
        let key: PublicKey = KEY_HEX.parse().unwrap();
        assert_eq!(key.to_bytes(), KEY_BYTES);
        assert_eq!(key.to_string(), KEY_HEX);
        assert_eq!(format!("{key:x}"), KEY_HEX.to_lowercase());
    }

    #[test]
    fn private_key_debug_hides_seed() {
        let key = PrivateKey::from_bytes(KEY_BYTES);
        assert!(!format!("{key:?}").contains("22"));
    }

    #[test]
    fn derives_known_public_key() {
        let private_key = PrivateKey::from_bytes(hex!(
            "2a91e1d5c110a8d0105aad4683f962c2a56663a3cad46666b16d243174673d90"
        ));
        assert_eq!(
            derive_public_key(&private_key).to_bytes(),
            hex!("2d04dfc0418a1a2893aa56cb651ae2f3fbe3884f77e64476984e9a6bfb1b7b46")
        );
    }

    #[test]
    fn key_pair_halves() {
        let private_key = PrivateKey::from_bytes(KEY_BYTES);
        let full = KeyPair::from_private_key(private_key.clone());
        assert!(full.has_private_key());
        assert_eq!(full.public_key(), &private_key.public_key());

        let public_only = KeyPair::from_public_key(*full.public_key());
        assert!(!public_only.has_private_key());
        assert_eq!(
            public_only.require_private_key(),
            Err(Error::MissingPrivateKey)
        );
    }

    #[test]
    fn public_key_to_point() {
        let key = PublicKey::from_bytes(hex!(
            "0200000000000000000000000000000000000000000000000000000000000000"
        ));
        assert_eq!(key.to_point(), Err(Error::InvalidPoint));
        let key = PublicKey::from(&EdwardsPoint::GENERATOR);
        assert_eq!(key.to_point(), Ok(EdwardsPoint::GENERATOR));
    }

    #[test]
    fn analyzer_checks_length() {
        let analyzer = KeyAnalyzer;
        assert!(analyzer.is_key_compressed(&KEY_BYTES));
        assert!(!analyzer.is_key_compressed(&[0u8; 33]));
    }
}
