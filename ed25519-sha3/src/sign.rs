//! EdDSA over Edwards25519 with SHA3-512 as the hash.
//!
//! Signing is deterministic: the nonce is derived from the private seed and
//! the message, so signing the same message twice yields the same
//! signature.
//!
//! ```
//! use ed25519_sha3::{KeyPair, rand_core::OsRng, sign, verify};
//!
//! let key_pair = KeyPair::generate(&mut OsRng)?;
//! let signature = sign(b"Hello, world!", &key_pair)?;
//! assert!(verify(b"Hello, world!", &signature, key_pair.public_key()));
//! # Ok::<(), ed25519_sha3::Error>(())
//! ```

mod signature;
mod signer;

pub use self::signature::{SIGNATURE_LENGTH, Signature};
pub use self::signer::DsaSigner;

use subtle::ConstantTimeEq;

use crate::Result;
use crate::edwards::EdwardsPoint;
use crate::field::Scalar;
use crate::hash::sha3_512;
use crate::keys::{KeyPair, PublicKey};

/// Sign `message` with the private half of `key_pair`.
pub fn sign(message: &[u8], key_pair: &KeyPair) -> Result<Signature> {
    DsaSigner::new(key_pair).sign(message)
}

/// Check `signature` over `message` against `public_key`.
///
/// Every failure, including a malformed key or a non-canonical `S`, is
/// reported as `false`.
pub fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    if !signature.is_canonical() {
        debug_event!("rejecting signature with non-canonical S");
        return false;
    }
    if bool::from(public_key.is_zero()) {
        debug_event!("rejecting all-zero public key");
        return false;
    }

    let h = Scalar::from_bytes_mod_order_wide(&sha3_512(&[
        &signature.R,
        public_key.as_bytes(),
        message,
    ]));
    let A = match public_key.to_point() {
        Ok(point) => point,
        Err(_) => return false,
    };
    let S = Scalar::from_bits(signature.S);

    // R' = S * B - h * A
    let R = EdwardsPoint::vartime_double_scalar_mul_basepoint(&h, &-A, &S).compress();
    R.as_bytes().ct_eq(&signature.R).into()
}

/// Whether `S` is nonzero and below the group order.
pub fn is_canonical(signature: &Signature) -> bool {
    signature.is_canonical()
}
