use core::fmt::{Formatter, LowerHex, Result as FmtResult, UpperHex};

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Size of an encoded point in bytes.
pub const POINT_LENGTH: usize = 32;

/// The 32-byte encoding of an [`EdwardsPoint`]: `y` little-endian with the
/// sign of `x` in the top bit.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; POINT_LENGTH]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl LowerHex for CompressedEdwardsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl UpperHex for CompressedEdwardsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in &self.0[..] {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl From<[u8; POINT_LENGTH]> for CompressedEdwardsY {
    fn from(bytes: [u8; POINT_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl CompressedEdwardsY {
    /// Attempt to decompress to an [`EdwardsPoint`].
    ///
    /// Returns `None` if the encoded `y` is not the `y`-coordinate of any
    /// curve point. No subgroup check is performed.
    pub fn decompress(&self) -> CtOption<EdwardsPoint> {
        let sign = Choice::from(self.0[31] >> 7);
        let y = FieldElement::from_bytes(&self.0);

        // x^2 = u / v with u = y^2 - 1, v = d y^2 + 1
        let yy = y.square();
        let u = yy - FieldElement::ONE;
        let v = yy * FieldElement::EDWARDS_D + FieldElement::ONE;

        // x = u v^3 (u v^7)^((p-5)/8)
        let v3 = v.square() * v;
        let v7 = v3.square() * v;
        let mut x = u * v3 * (u * v7).pow_p58();

        // The candidate is off by a factor of sqrt(-1) when v x^2 = -u.
        let is_root = (x.square() * v).ct_eq(&u);
        x.conditional_assign(&(x * FieldElement::SQRT_M1), !is_root);
        let is_valid = (x.square() * v).ct_eq(&u);

        x.conditional_negate(x.is_negative() ^ sign);

        let point = EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: x * y,
        };
        CtOption::new(point, is_valid)
    }

    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; POINT_LENGTH] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; POINT_LENGTH] {
        self.0
    }
}

impl ConditionallySelectable for CompressedEdwardsY {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; POINT_LENGTH];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(bytes)
    }
}
