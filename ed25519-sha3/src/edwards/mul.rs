use super::EdwardsPoint;
use crate::field::Scalar;
use subtle::{Choice, ConditionallySelectable};

/// Highest bit a [`Scalar`] may have set.
const TOP_BIT: usize = 254;

/// Constant-time `scalar * point`.
///
/// Ladder over bits 254..=0 keeping `q - p = point`. Every iteration performs
/// the same two additions; the scalar bit only drives conditional swaps.
pub(super) fn scalar_mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    let mut p = EdwardsPoint::IDENTITY;
    let mut q = *point;

    for i in (0..=TOP_BIT).rev() {
        let bit = Choice::from(scalar.bit(i));
        EdwardsPoint::conditional_swap(&mut p, &mut q, bit);
        q = &q + &p;
        p = p.double();
        EdwardsPoint::conditional_swap(&mut p, &mut q, bit);
    }

    p
}

/// Variable-time `a * A + b * B`.
///
/// Shamir's trick over a four-entry table `{0, B, A, A + B}` indexed by the
/// bit pair of `b` and `a`.
pub(super) fn vartime_double_scalar_mul_basepoint(
    a: &Scalar,
    A: &EdwardsPoint,
    b: &Scalar,
) -> EdwardsPoint {
    let B = EdwardsPoint::GENERATOR;
    let table = [EdwardsPoint::IDENTITY, B, *A, A + B];

    // Skip leading zero bits shared by both scalars.
    let start = (0..=TOP_BIT)
        .rev()
        .find(|&i| (a.bit(i) | b.bit(i)) != 0)
        .unwrap_or(0);

    let mut result = EdwardsPoint::IDENTITY;
    for i in (0..=start).rev() {
        result = result.double();
        let index = usize::from(b.bit(i) | (a.bit(i) << 1));
        if index != 0 {
            result = &result + &table[index];
        }
    }
    result
}
