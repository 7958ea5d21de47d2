#![no_main]
// Point decoding, scalar reduction and signature verification on arbitrary
// bytes. Nothing here may panic.
use ed25519_sha3::{CompressedEdwardsY, EdwardsPoint, PublicKey, Scalar, Signature, verify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let key_bytes: [u8; 32] = data[..32].try_into().unwrap();
    let signature = Signature::try_from(&data[32..96]).unwrap();
    let message = &data[96..];

    if let Some(point) = Option::<EdwardsPoint>::from(CompressedEdwardsY(key_bytes).decompress()) {
        assert!(bool::from(point.is_on_curve()));

        // Decoding is not injective on y >= p, so compare re-encodings.
        let reencoded = point.compress();
        let again = reencoded.decompress().unwrap();
        assert_eq!(again.compress(), reencoded);

        // Torsion points are accepted too, so stick to laws that hold on
        // the full curve group.
        let s = Scalar::from_bytes_mod_order(signature.s_bytes());
        let q = EdwardsPoint::mul_base(&s);
        assert_eq!((point + q) - q, point);
        assert!(bool::from((point + (-point)).is_identity()));
    }

    // Verification is a predicate; any input must return rather than panic.
    let _ = verify(message, &signature, &PublicKey::from_bytes(key_bytes));

    let canonical = signature.to_canonical();
    assert!(canonical.s_bytes()[31] < 0x20);
});
