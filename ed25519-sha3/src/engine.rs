//! Engine selection.

use crate::cipher::{BlockCipher, Scheme};
use crate::keys::{KeyAnalyzer, KeyGenerator, KeyPair};
use crate::sign::DsaSigner;

/// A curve and hash combination, handing out the signer, cipher and key
/// utilities that belong to it.
///
/// There is one engine today. Callers hold the value they want and pass it
/// where it is needed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum CryptoEngine {
    /// Edwards25519 with SHA3-512 EdDSA.
    #[default]
    Ed25519Sha3,
}

impl CryptoEngine {
    /// Signer over `key_pair`.
    pub fn dsa_signer<'k>(&self, key_pair: &'k KeyPair) -> DsaSigner<'k> {
        match self {
            CryptoEngine::Ed25519Sha3 => DsaSigner::new(key_pair),
        }
    }

    /// Key generator for this engine.
    pub fn key_generator(&self) -> KeyGenerator {
        match self {
            CryptoEngine::Ed25519Sha3 => KeyGenerator,
        }
    }

    /// Cipher from `sender` to `recipient` under `scheme`.
    pub fn block_cipher<'k>(
        &self,
        sender: &'k KeyPair,
        recipient: &'k KeyPair,
        scheme: Scheme,
    ) -> BlockCipher<'k> {
        match self {
            CryptoEngine::Ed25519Sha3 => BlockCipher::new(sender, recipient, scheme),
        }
    }

    /// Key analyzer for this engine.
    pub fn key_analyzer(&self) -> KeyAnalyzer {
        match self {
            CryptoEngine::Ed25519Sha3 => KeyAnalyzer,
        }
    }
}
