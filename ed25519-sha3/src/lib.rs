#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::mod_module_files,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub use crypto_signature;
pub use rand_core;
pub use sha3;
pub use subtle;

pub(crate) mod edwards;
pub(crate) mod field;
pub(crate) mod keys;
pub(crate) mod sign;

pub mod cipher;
pub mod engine;
pub mod error;
pub mod hash;

pub use cipher::{BlockCipher, Scheme, decrypt, encrypt};
pub use edwards::{CompressedEdwardsY, EdwardsPoint, POINT_LENGTH};
pub use engine::CryptoEngine;
pub use error::{Error, Result};
pub use field::{ORDER, SCALAR_LENGTH, Scalar};
pub use keys::{
    KEY_LENGTH, KeyAnalyzer, KeyBytes, KeyGenerator, KeyPair, PrivateKey, PublicKey,
    derive_public_key, generate_key_pair,
};
pub use sign::{DsaSigner, SIGNATURE_LENGTH, Signature, is_canonical, sign, verify};
