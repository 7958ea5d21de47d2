//! Arithmetic in GF(2^255 - 19) and in the scalar field modulo the prime
//! order `L` of the Edwards25519 base point.

mod element;
mod scalar;

pub(crate) use element::FieldElement;
pub use scalar::{ORDER, SCALAR_LENGTH, Scalar, is_below_order};
