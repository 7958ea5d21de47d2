//! Legacy envelope: `salt(32) || iv(16) || AES-256-CBC(PKCS#7(plaintext))`
//! under `SHA3-256(shared point XOR salt)`.

use alloc::vec::Vec;

use aes::Aes256;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::CryptoRngCore;
use subtle::{ConstantTimeEq, ConstantTimeGreater};
use zeroize::Zeroizing;

use super::{MIN_ENVELOPE_LENGTH, SALT_LENGTH, derive_shared_key_cbc};
use crate::keys::{PrivateKey, PublicKey};
use crate::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block and CBC IV size.
pub(super) const BLOCK_SIZE: usize = 16;

pub(super) fn seal<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    private_key: &PrivateKey,
    public_key: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    // Salt is drawn before the IV.
    let mut salt = [0u8; SALT_LENGTH];
    rng.try_fill_bytes(&mut salt)?;
    let mut iv = [0u8; BLOCK_SIZE];
    rng.try_fill_bytes(&mut iv)?;

    let key = derive_shared_key_cbc(private_key, public_key, &salt)?;

    let mut body = pkcs7_pad(plaintext);
    let padded_len = body.len();
    Aes256CbcEnc::new_from_slices(&key[..], &iv)
        .map_err(|_| Error::InvalidKeyLength)?
        .encrypt_padded_mut::<NoPadding>(&mut body, padded_len)
        .map_err(|_| Error::MalformedCiphertext)?;

    let mut envelope = Vec::with_capacity(SALT_LENGTH + BLOCK_SIZE + body.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&body);
    Ok(envelope)
}

pub(super) fn open(
    private_key: &PrivateKey,
    public_key: &PublicKey,
    envelope: &[u8],
) -> Result<Vec<u8>> {
    if envelope.len() < MIN_ENVELOPE_LENGTH {
        debug_event!(len = envelope.len(), "cbc envelope too short");
        return Err(Error::InputTooShort);
    }

    let (salt, rest) = envelope.split_at(SALT_LENGTH);
    let (iv, body) = rest.split_at(BLOCK_SIZE);
    if body.len() % BLOCK_SIZE != 0 {
        debug_event!(len = body.len(), "cbc body is not block aligned");
        return Err(Error::MalformedCiphertext);
    }

    let salt = <&[u8; SALT_LENGTH]>::try_from(salt).map_err(|_| Error::MalformedCiphertext)?;
    let key = derive_shared_key_cbc(private_key, public_key, salt)?;

    let mut buf = Zeroizing::new(body.to_vec());
    let plaintext = Aes256CbcDec::new_from_slices(&key[..], iv)
        .map_err(|_| Error::InvalidKeyLength)?
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| Error::MalformedCiphertext)?;

    let unpadded = pkcs7_unpad(plaintext)?;
    Ok(unpadded.to_vec())
}

/// Pad to a whole number of blocks; a full block of padding is added when
/// the input is already aligned.
fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strip PKCS#7 padding, checking every pad byte.
///
/// The final block is inspected in full regardless of the pad length.
fn pkcs7_unpad(data: &[u8]) -> Result<&[u8]> {
    if data.len() < BLOCK_SIZE || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::Padding);
    }
    let pad = data[data.len() - 1];
    let last_block = &data[data.len() - BLOCK_SIZE..];

    let mut valid = !pad.ct_eq(&0) & !pad.ct_gt(&(BLOCK_SIZE as u8));
    for (i, byte) in last_block.iter().enumerate() {
        // Byte `i` of the final block is padding iff `BLOCK_SIZE - i <= pad`.
        let in_padding = !((BLOCK_SIZE - i) as u8).ct_gt(&pad);
        valid &= !in_padding | byte.ct_eq(&pad);
    }

    if !bool::from(valid) {
        debug_event!("cbc padding check failed");
        return Err(Error::Padding);
    }
    Ok(&data[..data.len() - usize::from(pad)])
}
