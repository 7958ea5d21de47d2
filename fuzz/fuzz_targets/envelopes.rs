#![no_main]
// Decrypting arbitrary envelopes under every scheme must fail cleanly.
use ed25519_sha3::{KeyPair, PrivateKey, Scheme, decrypt};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }

    let recipient = KeyPair::from_private_key(PrivateKey::from_bytes(data[..32].try_into().unwrap()));
    let sender = KeyPair::from_private_key(PrivateKey::from_bytes(data[32..64].try_into().unwrap()));
    let envelope = &data[64..];

    for scheme in [Scheme::LegacyCbc, Scheme::Gcm, Scheme::NaclGcm { salt: None }] {
        let _ = decrypt(scheme, &recipient, &sender, envelope);
    }
});
