//! The Edwards25519 group: point representation, encoding and scalar
//! multiplication.

mod compressed;
mod extended;
mod mul;

pub use compressed::{CompressedEdwardsY, POINT_LENGTH};
pub use extended::EdwardsPoint;
