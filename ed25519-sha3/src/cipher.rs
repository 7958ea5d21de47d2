//! ECDH key agreement and the encryption envelopes built on it.
//!
//! Both parties compute the same 32-byte shared point, `a * B`, from their own
//! clamped private scalar and the peer's public key. Each [`Scheme`] then
//! derives an AES-256 key from that point in its own way and frames the
//! ciphertext in its own envelope:
//!
//! | Scheme              | Key                                         | Envelope                    |
//! |---------------------|---------------------------------------------|-----------------------------|
//! | [`Scheme::LegacyCbc`] | `SHA3-256(shared XOR salt)`               | `salt ‖ iv(16) ‖ cbc`       |
//! | [`Scheme::Gcm`]       | `HKDF-SHA3-256(shared, 0^32, "catapult")` | `tag ‖ iv(12) ‖ body`       |
//! | [`Scheme::NaclGcm`]   | `HKDF-SHA256(shared, salt, "catapult")`   | `tag ‖ iv(12) ‖ body`       |
//!
//! ## Usage
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! use ed25519_sha3::{KeyPair, Scheme, decrypt, encrypt, rand_core::OsRng};
//!
//! let alice = KeyPair::generate(&mut OsRng)?;
//! let bob = KeyPair::generate(&mut OsRng)?;
//!
//! // GCM envelopes carry a 28-byte header and must be at least 64 bytes long
//! let message = b"attack at dawn, bring the big umbrellas";
//! let envelope = encrypt(Scheme::Gcm, &alice, &bob, &mut OsRng, message)?;
//! assert_eq!(decrypt(Scheme::Gcm, &bob, &alice, &envelope)?, message);
//!
//! let envelope = encrypt(Scheme::LegacyCbc, &alice, &bob, &mut OsRng, b"hi")?;
//! assert_eq!(decrypt(Scheme::LegacyCbc, &bob, &alice, &envelope)?, b"hi");
//! # Ok::<(), ed25519_sha3::Error>(())
//! ```

mod cbc;
mod gcm;

use alloc::vec::Vec;

use hkdf::Hkdf;
use rand_core::CryptoRngCore;
use sha2::Sha256;
use sha3::Sha3_256;
use zeroize::Zeroizing;

use crate::keys::{ExpandedSecretKey, KeyPair, PrivateKey, PublicKey};
use crate::{Error, Result, hash};

/// Size of the legacy CBC salt and of the HKDF salt.
pub const SALT_LENGTH: usize = 32;

/// Shortest envelope any scheme will try to decrypt.
pub const MIN_ENVELOPE_LENGTH: usize = 64;

/// HKDF `info` for both GCM schemes.
const HKDF_INFO: &[u8] = b"catapult";

/// AES-256 key derived from a shared point, wiped on drop.
pub type SharedKey = Zeroizing<[u8; 32]>;

/// Envelope and key-derivation scheme.
///
/// The GCM schemes refuse envelopes under [`MIN_ENVELOPE_LENGTH`] bytes, so
/// they cannot carry plaintexts shorter than 36 bytes. The default,
/// [`Scheme::LegacyCbc`], has no such floor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Scheme {
    /// AES-256-CBC with PKCS#7 padding under a salted SHA3-256 key.
    #[default]
    LegacyCbc,
    /// AES-256-GCM under an HKDF-SHA3-256 key.
    Gcm,
    /// AES-256-GCM under an HKDF-SHA256 key; `None` salts HKDF with zeros.
    NaclGcm {
        /// HKDF salt
        salt: Option<[u8; SALT_LENGTH]>,
    },
}

/// Compress `a * B`, where `a` is the clamped scalar of `private_key` and `B`
/// is the point encoded by `public_key`.
///
/// Fails with [`Error::InvalidPoint`] if the public key does not decode.
pub fn derive_shared_point(private_key: &PrivateKey, public_key: &PublicKey) -> Result<[u8; 32]> {
    let point = public_key.to_point()?;
    let secret = ExpandedSecretKey::from(private_key);
    Ok((&point * &secret.scalar).compress().to_bytes())
}

/// `SHA3-256(shared point XOR salt)`.
pub fn derive_shared_key_cbc(
    private_key: &PrivateKey,
    public_key: &PublicKey,
    salt: &[u8; SALT_LENGTH],
) -> Result<SharedKey> {
    let mut mixed = Zeroizing::new(derive_shared_point(private_key, public_key)?);
    for (byte, s) in mixed.iter_mut().zip(salt) {
        *byte ^= s;
    }
    Ok(Zeroizing::new(hash::sha3_256(&mixed[..])))
}

/// HKDF-SHA3-256 over the shared point with an all-zero salt.
pub fn derive_shared_key_gcm(private_key: &PrivateKey, public_key: &PublicKey) -> Result<SharedKey> {
    let shared = Zeroizing::new(derive_shared_point(private_key, public_key)?);
    let mut okm = Zeroizing::new([0u8; 32]);
    Hkdf::<Sha3_256>::new(Some(&[0u8; SALT_LENGTH][..]), &shared[..])
        .expand(HKDF_INFO, &mut okm[..])
        .map_err(|_| Error::InvalidKeyLength)?;
    Ok(okm)
}

/// HKDF-SHA256 over the shared point, salted with `salt` or 32 zero bytes.
pub fn derive_shared_key_nacl(
    private_key: &PrivateKey,
    public_key: &PublicKey,
    salt: Option<&[u8; SALT_LENGTH]>,
) -> Result<SharedKey> {
    let shared = Zeroizing::new(derive_shared_point(private_key, public_key)?);
    let salt = salt.copied().unwrap_or([0u8; SALT_LENGTH]);
    let mut okm = Zeroizing::new([0u8; 32]);
    Hkdf::<Sha256>::new(Some(&salt[..]), &shared[..])
        .expand(HKDF_INFO, &mut okm[..])
        .map_err(|_| Error::InvalidKeyLength)?;
    Ok(okm)
}

/// Encrypts from `sender` to `recipient` and decrypts the reverse direction.
///
/// Encryption needs the sender's private key; decryption needs the
/// recipient's.
#[derive(Clone, Copy, Debug)]
pub struct BlockCipher<'k> {
    sender: &'k KeyPair,
    recipient: &'k KeyPair,
    scheme: Scheme,
}

impl<'k> BlockCipher<'k> {
    /// Cipher from `sender` to `recipient`.
    pub fn new(sender: &'k KeyPair, recipient: &'k KeyPair, scheme: Scheme) -> Self {
        Self {
            sender,
            recipient,
            scheme,
        }
    }

    /// The envelope scheme in use.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Seal `plaintext` for the recipient, drawing salt and IV from `rng`.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let private_key = self.sender.require_private_key()?;
        let public_key = self.recipient.public_key();

        match self.scheme {
            Scheme::LegacyCbc => cbc::seal(rng, private_key, public_key, plaintext),
            Scheme::Gcm => {
                let key = derive_shared_key_gcm(private_key, public_key)?;
                gcm::seal(rng, &key, plaintext)
            }
            Scheme::NaclGcm { salt } => {
                let key = derive_shared_key_nacl(private_key, public_key, salt.as_ref())?;
                gcm::seal(rng, &key, plaintext)
            }
        }
    }

    /// Open an envelope the sender produced for the recipient.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        let private_key = self.recipient.require_private_key()?;
        let public_key = self.sender.public_key();

        match self.scheme {
            Scheme::LegacyCbc => cbc::open(private_key, public_key, envelope),
            Scheme::Gcm => {
                let key = derive_shared_key_gcm(private_key, public_key)?;
                gcm::open(&key, envelope)
            }
            Scheme::NaclGcm { salt } => {
                let key = derive_shared_key_nacl(private_key, public_key, salt.as_ref())?;
                gcm::open(&key, envelope)
            }
        }
    }
}

/// Encrypt `plaintext` from `sender` to `recipient` under `scheme`.
pub fn encrypt<R: CryptoRngCore + ?Sized>(
    scheme: Scheme,
    sender: &KeyPair,
    recipient: &KeyPair,
    rng: &mut R,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    BlockCipher::new(sender, recipient, scheme).encrypt(rng, plaintext)
}

/// Decrypt an envelope `sender` produced for `recipient` under `scheme`.
pub fn decrypt(
    scheme: Scheme,
    recipient: &KeyPair,
    sender: &KeyPair,
    envelope: &[u8],
) -> Result<Vec<u8>> {
    BlockCipher::new(sender, recipient, scheme).decrypt(envelope)
}
