use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Byte length of an encoded scalar.
pub const SCALAR_LENGTH: usize = 32;

/// The group order `L = 2^252 + 27742317777372353535851937790883648493`,
/// little-endian.
pub const ORDER: [u8; SCALAR_LENGTH] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

const ORDER_WIDE: [i64; SCALAR_LENGTH] = {
    let mut out = [0i64; SCALAR_LENGTH];
    let mut i = 0;
    while i < SCALAR_LENGTH {
        out[i] = ORDER[i] as i64;
        i += 1;
    }
    out
};

/// A 256-bit little-endian integer used as a scalar multiplier.
///
/// Scalars produced by [`Scalar::from_clamped`] or [`Scalar::from_bits`] are
/// not reduced modulo `L`; the ladder consumes their raw bits. Every
/// arithmetic operation reduces its result modulo `L`. Bit 255 is always
/// clear.
#[derive(Clone, Copy, Default)]
pub struct Scalar {
    pub(crate) bytes: [u8; SCALAR_LENGTH],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(")?;
        for byte in self.bytes.iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; SCALAR_LENGTH];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::conditional_select(&a.bytes[i], &b.bytes[i], choice);
        }
        Self { bytes }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for Scalar {}

impl DefaultIsZeroes for Scalar {}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; SCALAR_LENGTH];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self { bytes }
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &Scalar) -> Scalar {
        let mut wide = [0i64; 64];
        for (i, limb) in wide.iter_mut().take(SCALAR_LENGTH).enumerate() {
            *limb = i64::from(self.bytes[i]) + i64::from(rhs.bytes[i]);
        }
        Scalar::reduce_wide(&mut wide)
    }
}

define_binop_variants!(impl Add, add for LHS = Scalar, RHS = Scalar, Output = Scalar);
define_assign_variants!(impl AddAssign, add_assign, + for LHS = Scalar, RHS = Scalar);

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar::multiply_and_add(self, rhs, &Scalar::ZERO)
    }
}

define_binop_variants!(impl Mul, mul for LHS = Scalar, RHS = Scalar, Output = Scalar);
define_assign_variants!(impl MulAssign, mul_assign, * for LHS = Scalar, RHS = Scalar);

impl Scalar {
    /// The additive identity.
    pub const ZERO: Self = Self {
        bytes: [0u8; SCALAR_LENGTH],
    };
    /// The multiplicative identity.
    pub const ONE: Self = Self {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Takes the raw bits of `bytes`, clearing bit 255. No reduction.
    pub fn from_bits(mut bytes: [u8; SCALAR_LENGTH]) -> Self {
        bytes[31] &= 0x7f;
        Self { bytes }
    }

    /// Clamps 32 bytes into an Ed25519 secret scalar: the three low bits are
    /// cleared, bit 255 is cleared and bit 254 is set. No reduction.
    pub fn from_clamped(mut bytes: [u8; SCALAR_LENGTH]) -> Self {
        bytes[0] &= 0xf8;
        bytes[31] &= 0x7f;
        bytes[31] |= 0x40;
        Self { bytes }
    }

    /// Reduces a 256-bit little-endian integer modulo `L`.
    pub fn from_bytes_mod_order(bytes: &[u8; SCALAR_LENGTH]) -> Self {
        let mut wide = [0i64; 64];
        for (limb, byte) in wide.iter_mut().zip(bytes.iter()) {
            *limb = i64::from(*byte);
        }
        Self::reduce_wide(&mut wide)
    }

    /// Reduces a 512-bit little-endian integer (typically a hash output)
    /// modulo `L`.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 2 * SCALAR_LENGTH]) -> Self {
        let mut wide = [0i64; 64];
        for (limb, byte) in wide.iter_mut().zip(bytes.iter()) {
            *limb = i64::from(*byte);
        }
        Self::reduce_wide(&mut wide)
    }

    /// Accepts `bytes` only if they encode an integer strictly below `L`.
    pub fn from_canonical_bytes(bytes: &[u8; SCALAR_LENGTH]) -> CtOption<Self> {
        CtOption::new(Self { bytes: *bytes }, is_below_order(bytes))
    }

    /// Computes `a * b + c mod L`.
    pub fn multiply_and_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let mut wide = [0i64; 64];
        for (limb, byte) in wide.iter_mut().zip(c.bytes.iter()) {
            *limb = i64::from(*byte);
        }
        for (i, x) in a.bytes.iter().enumerate() {
            for (j, y) in b.bytes.iter().enumerate() {
                wide[i + j] += i64::from(*x) * i64::from(*y);
            }
        }
        Self::reduce_wide(&mut wide)
    }

    /// Little-endian encoding.
    pub fn to_bytes(&self) -> [u8; SCALAR_LENGTH] {
        self.bytes
    }

    /// Borrow the little-endian encoding.
    pub fn as_bytes(&self) -> &[u8; SCALAR_LENGTH] {
        &self.bytes
    }

    /// Bit `i` of the little-endian encoding, as 0 or 1.
    pub fn bit(&self, i: usize) -> u8 {
        (self.bytes[i >> 3] >> (i & 7)) & 1
    }

    /// Whether this is the zero scalar.
    pub fn is_zero(&self) -> Choice {
        self.bytes.ct_eq(&[0u8; SCALAR_LENGTH])
    }

    /// Folds 64 signed radix-2^8 digits down to a value in `[0, L)`.
    fn reduce_wide(x: &mut [i64; 64]) -> Scalar {
        // Subtract 16 * x[i] * L shifted into place; the 2^252 term of L
        // cancels digit i itself, so only the low 20 digits of L are used.
        for i in (SCALAR_LENGTH..64).rev() {
            let mut carry = 0i64;
            let mut j = i - 32;
            while j < i - 12 {
                x[j] += carry - 16 * x[i] * ORDER_WIDE[j - (i - 32)];
                carry = (x[j] + 128) >> 8;
                x[j] -= carry << 8;
                j += 1;
            }
            x[j] += carry;
            x[i] = 0;
        }

        let mut carry = 0i64;
        for j in 0..SCALAR_LENGTH {
            x[j] += carry - (x[31] >> 4) * ORDER_WIDE[j];
            carry = x[j] >> 8;
            x[j] &= 0xff;
        }
        for j in 0..SCALAR_LENGTH {
            x[j] -= carry * ORDER_WIDE[j];
        }

        let mut bytes = [0u8; SCALAR_LENGTH];
        for i in 0..SCALAR_LENGTH {
            x[i + 1] += x[i] >> 8;
            bytes[i] = (x[i] & 0xff) as u8;
        }
        Scalar { bytes }
    }
}

/// Constant-time full-width check that `bytes < L`.
///
/// Runs the borrow chain of `bytes - L` across all 32 bytes; a final borrow
/// means the value is below the order.
pub fn is_below_order(bytes: &[u8; SCALAR_LENGTH]) -> Choice {
    let mut borrow = 0i16;
    for (byte, order) in bytes.iter().zip(ORDER.iter()) {
        let diff = i16::from(*byte) - i16::from(*order) - borrow;
        borrow = (diff >> 15) & 1;
    }
    Choice::from(borrow as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn order_reduces_to_zero() {
        assert_eq!(Scalar::from_bytes_mod_order(&ORDER), Scalar::ZERO);

        let mut order_plus_one = ORDER;
        order_plus_one[0] += 1;
        assert_eq!(Scalar::from_bytes_mod_order(&order_plus_one), Scalar::ONE);
    }

    #[test]
    fn wide_reduction_of_all_ones() {
        // (2^512 - 1) mod L
        let reduced = Scalar::from_bytes_mod_order_wide(&[0xff; 64]);
        assert_eq!(
            reduced.to_bytes(),
            hex!("000f9c44e31106a447938568a71b0ed065bef517d273ecce3d9a307c1b419903")
        );
    }

    #[test]
    fn multiply_and_add_small_values() {
        let a = Scalar::from(7u64);
        let b = Scalar::from(6u64);
        let c = Scalar::from(5u64);
        assert_eq!(Scalar::multiply_and_add(&a, &b, &c), Scalar::from(47u64));
        assert_eq!(a * b, Scalar::from(42u64));
        assert_eq!(a + c, Scalar::from(12u64));
    }

    #[test]
    fn addition_wraps_at_order() {
        let mut l_minus_one = ORDER;
        l_minus_one[0] -= 1;
        let l_minus_one = Scalar::from_bits(l_minus_one);
        assert_eq!(l_minus_one + Scalar::ONE, Scalar::ZERO);
        assert_eq!(l_minus_one * l_minus_one, Scalar::ONE);
    }

    #[test]
    fn canonical_bytes_compare_full_width() {
        let mut below = ORDER;
        below[0] -= 1;
        assert!(bool::from(is_below_order(&below)));
        assert!(!bool::from(is_below_order(&ORDER)));

        // Differs from L only in a high byte, above any 64-bit prefix.
        let mut above = ORDER;
        above[20] = 1;
        assert!(!bool::from(is_below_order(&above)));
        assert!(bool::from(Scalar::from_canonical_bytes(&above).is_none()));
        assert!(bool::from(is_below_order(&[0u8; 32])));
    }

    #[test]
    fn clamping() {
        let s = Scalar::from_clamped([0xff; 32]);
        assert_eq!(s.bytes[0], 0xf8);
        assert_eq!(s.bytes[31], 0x7f);
        assert_eq!(s.bit(254), 1);
        assert_eq!(s.bit(255), 0);
        assert_eq!(s.bit(0), 0);

        let s = Scalar::from_clamped([0u8; 32]);
        assert_eq!(s.bytes[31], 0x40);
    }
}
