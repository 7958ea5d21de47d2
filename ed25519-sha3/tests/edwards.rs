//! Edwards25519 group tests.

use ed25519_sha3::{CompressedEdwardsY, EdwardsPoint, Scalar};
use hex_literal::hex;
use proptest::{prelude::any, prop_assert, prop_assert_eq, prop_compose, proptest};

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
        Scalar::from_bytes_mod_order(&bytes)
    }
}

prop_compose! {
    fn point()(s in scalar()) -> EdwardsPoint {
        EdwardsPoint::mul_base(&s)
    }
}

#[test]
fn generator_encoding() {
    assert_eq!(
        EdwardsPoint::GENERATOR.compress(),
        CompressedEdwardsY(hex!(
            "5866666666666666666666666666666666666666666666666666666666666666"
        ))
    );
    assert_eq!(
        (EdwardsPoint::GENERATOR + EdwardsPoint::GENERATOR)
            .compress()
            .to_bytes(),
        hex!("c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022")
    );
}

#[test]
fn identity_encoding() {
    let mut one = [0u8; 32];
    one[0] = 1;
    assert_eq!(EdwardsPoint::IDENTITY.compress().to_bytes(), one);

    let decoded = CompressedEdwardsY(one).decompress().unwrap();
    assert!(bool::from(decoded.is_identity()));
}

#[test]
fn rejects_non_curve_y() {
    for y in [2u8, 7, 8, 11] {
        let mut bytes = [0u8; 32];
        bytes[0] = y;
        assert!(bool::from(CompressedEdwardsY(bytes).decompress().is_none()));
    }
}

proptest! {
    #[test]
    fn decompress_inverts_compress(p in point()) {
        let decoded = p.compress().decompress().unwrap();
        prop_assert!(bool::from(decoded.is_on_curve()));
        prop_assert_eq!(decoded, p);
    }

    #[test]
    fn scalar_mul_distributes(a in scalar(), b in scalar()) {
        let lhs = EdwardsPoint::mul_base(&(a + b));
        let rhs = EdwardsPoint::mul_base(&a) + EdwardsPoint::mul_base(&b);
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn scalar_mul_composes(a in scalar(), b in scalar()) {
        let lhs = EdwardsPoint::mul_base(&(a * b));
        let rhs = EdwardsPoint::mul_base(&a).scalar_mul(&b);
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn vartime_matches_constant_time(a in scalar(), p in point(), b in scalar()) {
        let expected = p.scalar_mul(&a) + EdwardsPoint::mul_base(&b);
        prop_assert_eq!(EdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &p, &b), expected);
    }

    #[test]
    fn negation_cancels(p in point()) {
        prop_assert!(bool::from((p + (-p)).is_identity()));
        prop_assert_eq!(p - p, EdwardsPoint::IDENTITY);
    }
}
