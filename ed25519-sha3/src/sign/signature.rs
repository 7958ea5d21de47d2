use core::fmt::{self, Formatter, LowerHex, UpperHex};

use subtle::ConstantTimeEq;

use crate::field::{Scalar, is_below_order};
use crate::{Error, Result};

/// Length of an encoded signature: `R || S`.
pub const SIGNATURE_LENGTH: usize = 64;

/// A signature `(R, S)`: `R` is an encoded point, `S` a little-endian
/// scalar.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Signature {
    pub(crate) R: [u8; 32],
    pub(crate) S: [u8; 32],
}

impl Signature {
    /// Assemble a signature from its encoded `R` and `S` halves.
    pub fn from_components(R: [u8; 32], S: [u8; 32]) -> Self {
        Self { R, S }
    }

    /// Split a 64-byte `R || S` encoding. No validation is done here.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        let mut R = [0u8; 32];
        let mut S = [0u8; 32];
        R.copy_from_slice(&bytes[..32]);
        S.copy_from_slice(&bytes[32..]);
        Self { R, S }
    }

    /// The 64-byte `R || S` encoding.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.R);
        bytes[32..].copy_from_slice(&self.S);
        bytes
    }

    /// Encoded commitment point `R`.
    pub fn r_bytes(&self) -> &[u8; 32] {
        &self.R
    }

    /// Encoded response scalar `S`.
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.S
    }

    /// `S` is nonzero and strictly below the group order, compared over
    /// the full 256 bits in constant time.
    pub fn is_canonical(&self) -> bool {
        let s_is_zero = self.S.ct_eq(&[0u8; 32]);
        (is_below_order(&self.S) & !s_is_zero).into()
    }

    /// Replace `S` with `S mod L`. `R` is kept as is.
    pub fn to_canonical(&self) -> Self {
        Self {
            R: self.R,
            S: Scalar::from_bytes_mod_order(&self.S).to_bytes(),
        }
    }
}

impl From<&[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> Self {
        signature.to_bytes()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let bytes =
            <&[u8; SIGNATURE_LENGTH]>::try_from(value).map_err(|_| Error::InvalidSignatureLength)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl LowerHex for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl UpperHex for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}
