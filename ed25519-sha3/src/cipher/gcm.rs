//! AEAD envelope shared by [`Scheme::Gcm`](super::Scheme::Gcm) and
//! [`Scheme::NaclGcm`](super::Scheme::NaclGcm): `tag(16) || iv(12) || body`.

use alloc::vec::Vec;

use aes_gcm::aead::AeadInPlace;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::{Aes256Gcm, KeyInit};
use rand_core::CryptoRngCore;

use super::{MIN_ENVELOPE_LENGTH, SharedKey};
use crate::{Error, Result};

/// GCM nonce size.
pub(super) const IV_LENGTH: usize = 12;

/// GCM authentication tag size.
pub(super) const TAG_LENGTH: usize = 16;

pub(super) fn seal<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &SharedKey,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let mut iv = [0u8; IV_LENGTH];
    rng.try_fill_bytes(&mut iv)?;

    let cipher = Aes256Gcm::new_from_slice(&key[..]).map_err(|_| Error::InvalidKeyLength)?;
    let mut body = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&iv), &[], &mut body)
        .map_err(|_| Error::MalformedCiphertext)?;

    let mut envelope = Vec::with_capacity(TAG_LENGTH + IV_LENGTH + body.len());
    envelope.extend_from_slice(&tag);
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&body);
    Ok(envelope)
}

pub(super) fn open(key: &SharedKey, envelope: &[u8]) -> Result<Vec<u8>> {
    if envelope.len() < MIN_ENVELOPE_LENGTH {
        debug_event!(len = envelope.len(), "gcm envelope too short");
        return Err(Error::InputTooShort);
    }

    let (tag, rest) = envelope.split_at(TAG_LENGTH);
    let (iv, body) = rest.split_at(IV_LENGTH);

    let cipher = Aes256Gcm::new_from_slice(&key[..]).map_err(|_| Error::InvalidKeyLength)?;
    let mut buf = body.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(iv),
            &[],
            &mut buf,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| {
            debug_event!(len = envelope.len(), "gcm tag did not verify");
            Error::AuthenticationFailure
        })?;
    Ok(buf)
}
