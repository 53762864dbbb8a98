pub(crate) mod affine;
pub(crate) mod basepoint_table;
pub(crate) mod extended;
pub(crate) mod extensible;
pub(crate) mod mul;
pub(crate) mod niels;

pub use affine::{AffinePoint, CompressedEdwardsY, PointBytes};
pub(crate) use basepoint_table::{BasepointTable, LookupTable};
pub use extended::EdwardsPoint;
pub(crate) use niels::AffineNielsPoint;
