//! Error types.

use core::fmt::{self, Display, Formatter};

/// Result type with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by key handling, signing and encryption.
///
/// Signature verification never returns these: it reports every failure as
/// `false`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Key material is not exactly 32 bytes
    InvalidKeyLength,
    /// Key material is not valid hexadecimal
    InvalidHex,
    /// Encoded point is not on the curve
    InvalidPoint,
    /// Signing or decryption needs a private key the key pair lacks
    MissingPrivateKey,
    /// Signature `S` is zero or not below the group order
    NonCanonicalSignature,
    /// Signature is not exactly 64 bytes
    InvalidSignatureLength,
    /// AEAD tag did not verify
    AuthenticationFailure,
    /// CBC padding bytes are inconsistent
    Padding,
    /// Envelope is shorter than the scheme's minimum
    InputTooShort,
    /// Ciphertext body is not a whole number of cipher blocks, or a
    /// plaintext exceeds the cipher's length limit
    MalformedCiphertext,
    /// The random source failed to produce bytes
    Randomness,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength => write!(f, "key length is invalid"),
            Error::InvalidHex => write!(f, "key hex encoding is invalid"),
            Error::InvalidPoint => write!(f, "encoded point is not on the curve"),
            Error::MissingPrivateKey => write!(f, "private key is missing"),
            Error::NonCanonicalSignature => write!(f, "signature is not canonical"),
            Error::InvalidSignatureLength => write!(f, "signature length is invalid"),
            Error::AuthenticationFailure => write!(f, "ciphertext authentication failed"),
            Error::Padding => write!(f, "ciphertext padding is invalid"),
            Error::InputTooShort => write!(f, "input is too short for decryption"),
            Error::MalformedCiphertext => write!(f, "ciphertext is malformed or too long"),
            Error::Randomness => write!(f, "random source failed"),
        }
    }
}

impl core::error::Error for Error {}

impl From<Error> for crypto_signature::Error {
    #[cfg(feature = "std")]
    fn from(err: Error) -> Self {
        crypto_signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_err: Error) -> Self {
        crypto_signature::Error::new()
    }
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Error::InvalidHex
    }
}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Self {
        Error::Randomness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn malformed_ciphertext_covers_seal_failures() {
        // also returned when AES-GCM refuses an over-long plaintext
        let message = Error::MalformedCiphertext.to_string();
        assert_eq!(message, "ciphertext is malformed or too long");
        assert!(!message.contains("block aligned"));
    }
}
