use core::fmt::{Formatter, LowerHex, Result as FmtResult};
use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::edwards::{CompressedEdwardsY, mul};
use crate::field::{FieldElement, Scalar};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A point on Edwards25519 (`-x^2 + y^2 = 1 + d x^2 y^2`) in extended
/// homogeneous coordinates: `x = X/Z`, `y = Y/Z`, `T = XY/Z`.
#[derive(Copy, Clone, Debug)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Default for EdwardsPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LowerHex for EdwardsPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{{ X: {:x}, Y: {:x}, Z: {:x}, T: {:x} }}",
            self.X, self.Y, self.Z, self.T
        )
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let XZ = self.X * other.Z;
        let ZX = self.Z * other.X;

        let YZ = self.Y * other.Z;
        let ZY = self.Z * other.Y;

        XZ.ct_eq(&ZX) & YZ.ct_eq(&ZY)
    }
}

impl Eq for EdwardsPoint {}
impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl EdwardsPoint {
    /// The standard base point `B`, with `y = 4/5` and positive `x`.
    pub const GENERATOR: Self = Self {
        X: FieldElement([
            0xd51a, 0x8f25, 0x2d60, 0xc956, 0xa7b2, 0x9525, 0xc760, 0x692c, 0xdc5c, 0xfdd6,
            0xe231, 0xc0a4, 0x53fe, 0xcd6e, 0x36d3, 0x2169,
        ]),
        Y: FieldElement([
            0x6658, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666,
            0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666,
        ]),
        Z: FieldElement::ONE,
        T: FieldElement([
            0xdda3, 0xa5b7, 0x8ab3, 0x6dde, 0x52f5, 0x7751, 0x9f80, 0x20f0, 0xe37d, 0x64ab,
            0x4e8e, 0x66ea, 0x7665, 0xd78b, 0x5f0f, 0x6787,
        ]),
    };
    /// Identity point
    pub const IDENTITY: Self = Self {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T: FieldElement::ZERO,
    };

    /// Add two points.
    ///
    /// Unified formula for `a = -1` twisted Edwards curves in extended
    /// coordinates (Hisil-Wong-Carter-Dawson 2008, section 3.1); it is
    /// complete, so doubling and the identity need no special case.
    pub fn add(&self, other: &EdwardsPoint) -> Self {
        let a = (self.Y - self.X) * (other.Y - other.X);
        let b = (self.X + self.Y) * (other.X + other.Y);
        let c = self.T * other.T * FieldElement::EDWARDS_D2;
        let d = {
            let zz = self.Z * other.Z;
            zz + zz
        };

        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;

        EdwardsPoint {
            X: e * f,
            Y: h * g,
            Z: g * f,
            T: e * h,
        }
    }

    /// Double this point
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Check that the coordinates satisfy the curve equation and `XY = ZT`.
    pub fn is_on_curve(&self) -> Choice {
        let XY = self.X * self.Y;
        let ZT = self.Z * self.T;

        // -X^2 + Y^2 == Z^2 + d T^2
        let lhs = self.Y.square() - self.X.square();
        let rhs = self.Z.square() + self.T.square() * FieldElement::EDWARDS_D;

        XY.ct_eq(&ZT) & lhs.ct_eq(&rhs)
    }

    /// Whether this is the neutral element.
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::IDENTITY)
    }

    /// Negate the `x`-coordinate.
    pub fn negate(&self) -> Self {
        EdwardsPoint {
            X: -self.X,
            Y: self.Y,
            Z: self.Z,
            T: -self.T,
        }
    }

    /// Encode as 32 bytes: affine `y` little-endian with the sign of `x` in
    /// bit 255.
    pub fn compress(&self) -> CompressedEdwardsY {
        let z_inv = self.Z.invert();
        let x = self.X * z_inv;
        let y = self.Y * z_inv;

        let mut bytes = y.to_bytes();
        bytes[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(bytes)
    }

    /// Constant-time `scalar * self`.
    pub fn scalar_mul(&self, scalar: &Scalar) -> Self {
        mul::scalar_mul(self, scalar)
    }

    /// Constant-time `scalar * B`.
    pub fn mul_base(scalar: &Scalar) -> Self {
        mul::scalar_mul(&Self::GENERATOR, scalar)
    }

    /// Computes `a * A + b * B` in variable time.
    ///
    /// Only for public inputs, i.e. signature verification.
    pub fn vartime_double_scalar_mul_basepoint(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> Self {
        mul::vartime_double_scalar_mul_basepoint(a, A, b)
    }
}

impl Add<&EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, other: &EdwardsPoint) -> EdwardsPoint {
        self.add(other)
    }
}

define_binop_variants!(impl Add, add for LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);
define_assign_variants!(impl AddAssign, add_assign, + for LHS = EdwardsPoint, RHS = EdwardsPoint);

impl Sub<&EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, other: &EdwardsPoint) -> EdwardsPoint {
        self.add(&other.negate())
    }
}

define_binop_variants!(impl Sub, sub for LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl Neg for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        self.negate()
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        self.negate()
    }
}

impl Mul<&Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `scalar * self`.
    fn mul(self, scalar: &Scalar) -> EdwardsPoint {
        self.scalar_mul(scalar)
    }
}

define_binop_variants!(impl Mul, mul for LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn generator_is_on_curve() {
        assert!(bool::from(EdwardsPoint::GENERATOR.is_on_curve()));
        assert!(bool::from(EdwardsPoint::IDENTITY.is_on_curve()));
    }

    #[test]
    fn generator_compresses_to_standard_encoding() {
        assert_eq!(
            EdwardsPoint::GENERATOR.compress().to_bytes(),
            hex!("5866666666666666666666666666666666666666666666666666666666666666")
        );
        assert_eq!(
            EdwardsPoint::IDENTITY.compress().to_bytes(),
            hex!("0100000000000000000000000000000000000000000000000000000000000000")
        );
    }

    #[test]
    fn test_point_add() {
        let B = EdwardsPoint::GENERATOR;
        let two_b = B + B;
        assert!(bool::from(two_b.is_on_curve()));
        assert_eq!(two_b, B.double());
        assert_eq!(B + EdwardsPoint::IDENTITY, B);
        assert_eq!(two_b - B, B);
        assert_eq!(
            two_b.compress().to_bytes(),
            hex!("c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022")
        );
    }

    #[test]
    fn test_negate() {
        let B = EdwardsPoint::GENERATOR;
        assert!(bool::from((B + B.negate()).is_identity()));
        assert_eq!(-(-B), B);
    }

    #[test]
    fn projective_equality() {
        let B = EdwardsPoint::GENERATOR;
        let scaled = EdwardsPoint {
            X: B.X + B.X,
            Y: B.Y + B.Y,
            Z: B.Z + B.Z,
            T: B.T + B.T,
        };
        assert!(bool::from(scaled.is_on_curve()));
        assert_eq!(scaled.compress(), B.compress());
        assert_eq!(scaled, B);
    }
}
