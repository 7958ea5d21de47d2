//! Internal macros.

/// Given `impl Trait<&Rhs> for &Lhs`, define the three owned/borrowed
/// permutations of a binary operator.
macro_rules! define_binop_variants {
    (impl $trait:ident, $method:ident for LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> $trait<&'b $rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: &'b $rhs) -> $out {
                (&self).$method(rhs)
            }
        }

        impl<'a> $trait<$rhs> for &'a $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                self.$method(&rhs)
            }
        }

        impl $trait<$rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                (&self).$method(&rhs)
            }
        }
    };
}

/// Define `OpAssign` for both owned and borrowed right-hand sides in terms of
/// the by-reference binary operator.
macro_rules! define_assign_variants {
    (impl $trait:ident, $method:ident, $op:tt for LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl<'b> $trait<&'b $rhs> for $lhs {
            fn $method(&mut self, rhs: &'b $rhs) {
                *self = &*self $op rhs;
            }
        }

        impl $trait<$rhs> for $lhs {
            fn $method(&mut self, rhs: $rhs) {
                *self = &*self $op &rhs;
            }
        }
    };
}

/// Emit a `tracing` debug event on a rejection path. Compiles to nothing
/// without the `tracing` feature.
macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}
