use core::fmt::{self, Debug, Formatter, LowerHex};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// Number of radix-2^16 limbs in a [`FieldElement`].
pub const LIMBS: usize = 16;

/// An element of GF(2^255 - 19).
///
/// Stored as sixteen signed 64-bit limbs of nominal width 16 bits. Limbs are
/// allowed to drift out of range between carries, so two different limb
/// arrays may denote the same field value; comparisons and serialization
/// always go through [`FieldElement::to_bytes`], which fully reduces.
#[derive(Clone, Copy, Default)]
pub struct FieldElement(pub(crate) [i64; LIMBS]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self:x})")
    }
}

impl LowerHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes().iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0i64; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = i64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(limbs)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for FieldElement {}

impl DefaultIsZeroes for FieldElement {}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        let mut limbs = self.0;
        for (limb, rhs) in limbs.iter_mut().zip(other.0.iter()) {
            *limb += rhs;
        }
        FieldElement(limbs)
    }
}

define_binop_variants!(impl Add, add for LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_assign_variants!(impl AddAssign, add_assign, + for LHS = FieldElement, RHS = FieldElement);

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        let mut limbs = self.0;
        for (limb, rhs) in limbs.iter_mut().zip(other.0.iter()) {
            *limb -= rhs;
        }
        FieldElement(limbs)
    }
}

define_binop_variants!(impl Sub, sub for LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_assign_variants!(impl SubAssign, sub_assign, - for LHS = FieldElement, RHS = FieldElement);

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        // Schoolbook product into 31 wide accumulators.
        let mut wide = [0i64; 2 * LIMBS - 1];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in other.0.iter().enumerate() {
                wide[i + j] += a * b;
            }
        }

        // 2^256 = 38 (mod p)
        let mut limbs = [0i64; LIMBS];
        for i in 0..LIMBS - 1 {
            limbs[i] = wide[i] + 38 * wide[i + LIMBS];
        }
        limbs[LIMBS - 1] = wide[LIMBS - 1];

        // A single pass can leave the top limb carry folded back into limb 0
        // large enough to overflow limb 1 again.
        let mut out = FieldElement(limbs);
        out.carry();
        out.carry();
        out
    }
}

define_binop_variants!(impl Mul, mul for LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_assign_variants!(impl MulAssign, mul_assign, * for LHS = FieldElement, RHS = FieldElement);

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}

impl FieldElement {
    pub const ZERO: Self = Self([0; LIMBS]);
    pub const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The Edwards curve constant `d = -121665/121666`.
    pub const EDWARDS_D: Self = Self([
        0x78a3, 0x1359, 0x4dca, 0x75eb, 0xd8ab, 0x4141, 0x0a4d, 0x0070, 0xe898, 0x7779, 0x4079,
        0x8cc7, 0xfe73, 0x2b6f, 0x6cee, 0x5203,
    ]);
    /// `2 * d`, used by the unified addition formula.
    pub const EDWARDS_D2: Self = Self([
        0xf159, 0x26b2, 0x9b94, 0xebd6, 0xb156, 0x8283, 0x149a, 0x00e0, 0xd130, 0xeef3, 0x80f2,
        0x198e, 0xfce7, 0x56df, 0xd9dc, 0x2406,
    ]);
    /// A square root of -1.
    pub const SQRT_M1: Self = Self([
        0xa0b0, 0x4a0e, 0x1b27, 0xc4ee, 0xe478, 0xad2f, 0x1806, 0x2f43, 0xd7a7, 0x3dfb, 0x0099,
        0x2b4d, 0xdf0b, 0x4fc1, 0x2480, 0x2b83,
    ]);

    /// Propagate carries once across all limbs.
    ///
    /// Afterwards limbs 1..16 lie in `[0, 2^16)`; limb 0 absorbs the top carry
    /// times 38 and may sit slightly outside that range.
    pub(crate) fn carry(&mut self) {
        let o = &mut self.0;
        for i in 0..LIMBS {
            o[i] += 1 << 16;
            let c = o[i] >> 16;
            if i < LIMBS - 1 {
                o[i + 1] += c - 1;
            } else {
                o[0] += 38 * (c - 1);
            }
            o[i] -= c << 16;
        }
    }

    /// Returns an equivalent element whose limbs are fully reduced mod p.
    pub fn normalize(&self) -> Self {
        let mut t = *self;
        t.carry();
        t.carry();
        t.carry();

        // Two trial subtractions of p bring any value below 2^256 into [0, p).
        for _ in 0..2 {
            let mut m = [0i64; LIMBS];
            m[0] = t.0[0] - 0xffed;
            for i in 1..LIMBS - 1 {
                m[i] = t.0[i] - 0xffff - ((m[i - 1] >> 16) & 1);
                m[i - 1] &= 0xffff;
            }
            m[LIMBS - 1] = t.0[LIMBS - 1] - 0x7fff - ((m[LIMBS - 2] >> 16) & 1);
            let borrow = (m[LIMBS - 1] >> 16) & 1;
            m[LIMBS - 2] &= 0xffff;
            t.conditional_assign(&Self(m), Choice::from((1 - borrow) as u8));
        }
        t
    }

    /// Little-endian canonical encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let t = self.normalize();
        let mut bytes = [0u8; 32];
        for (i, limb) in t.0.iter().enumerate() {
            bytes[2 * i] = (limb & 0xff) as u8;
            bytes[2 * i + 1] = ((limb >> 8) & 0xff) as u8;
        }
        bytes
    }

    /// Decodes 32 little-endian bytes, ignoring the top bit.
    ///
    /// Values in `[p, 2^255)` are accepted and reduce implicitly.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0i64; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = i64::from(bytes[2 * i]) + (i64::from(bytes[2 * i + 1]) << 8);
        }
        limbs[LIMBS - 1] &= 0x7fff;
        Self(limbs)
    }

    /// The "sign" of a field element: the low bit of its canonical encoding.
    pub fn is_negative(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    pub fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }

    pub fn square(&self) -> Self {
        self * self
    }

    /// Computes `self^(p-2)`, the multiplicative inverse for nonzero inputs.
    ///
    /// Zero maps to zero.
    pub fn invert(&self) -> Self {
        // p - 2 = 2^255 - 21: every bit from 254 down to 0 is set except 2 and 4.
        let mut acc = *self;
        for bit in (0..=253).rev() {
            acc = acc.square();
            if bit != 2 && bit != 4 {
                acc *= self;
            }
        }
        acc
    }

    /// Computes `self^((p-5)/8)`.
    pub fn pow_p58(&self) -> Self {
        // (p - 5) / 8 = 2^252 - 3: every bit from 251 down to 0 is set except 1.
        let mut acc = *self;
        for bit in (0..=250).rev() {
            acc = acc.square();
            if bit != 1 {
                acc *= self;
            }
        }
        acc
    }

    /// Negates `self` when `choice` is set.
    pub fn conditional_negate(&mut self, choice: Choice) {
        let negated = -&*self;
        self.conditional_assign(&negated, choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn small(n: i64) -> FieldElement {
        let mut limbs = [0i64; LIMBS];
        limbs[0] = n;
        FieldElement(limbs)
    }

    #[test]
    fn edwards_d_matches_definition() {
        // d * 121666 == -121665
        assert_eq!(FieldElement::EDWARDS_D * small(121666), -small(121665));
        assert_eq!(
            FieldElement::EDWARDS_D + FieldElement::EDWARDS_D,
            FieldElement::EDWARDS_D2
        );
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert_eq!(FieldElement::SQRT_M1.square(), -FieldElement::ONE);
    }

    #[test]
    fn invert() {
        let a = FieldElement::from_bytes(&hex!(
            "0900000000000000000000000000000000000000000000000000000000000000"
        ));
        assert_eq!(a * a.invert(), FieldElement::ONE);
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);

        let b = FieldElement::EDWARDS_D * FieldElement::SQRT_M1;
        assert_eq!(b.invert() * b, FieldElement::ONE);
    }

    #[test]
    fn pow_p58_gives_square_root_candidate() {
        // For a square u, u^((p+3)/8) = u * u^((p-5)/8) squares to +-u.
        let u = small(4);
        let x = u * u.pow_p58();
        let check = x.square();
        assert!(check == u || check == -u);
    }

    #[test]
    fn normalize_reduces_modulus_to_zero() {
        // p itself, written out
        let p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        let fe = FieldElement::from_bytes(&p);
        assert_eq!(fe.to_bytes(), [0u8; 32]);
        assert!(bool::from(fe.is_zero()));

        let p_plus_one = hex!("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(FieldElement::from_bytes(&p_plus_one), FieldElement::ONE);
    }

    #[test]
    fn from_bytes_ignores_top_bit() {
        let mut bytes = FieldElement::EDWARDS_D.to_bytes();
        bytes[31] |= 0x80;
        assert_eq!(FieldElement::from_bytes(&bytes), FieldElement::EDWARDS_D);
    }

    #[test]
    fn negative_values_encode_canonically() {
        let minus_one = -FieldElement::ONE;
        assert_eq!(
            minus_one.to_bytes(),
            hex!("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")
        );
        assert!(!bool::from(minus_one.is_negative()));
        assert!(bool::from(FieldElement::ONE.is_negative()));
    }

    #[test]
    fn conditional_negate() {
        let mut a = small(5);
        a.conditional_negate(Choice::from(0));
        assert_eq!(a, small(5));
        a.conditional_negate(Choice::from(1));
        assert_eq!(a, -small(5));
    }
}
