use core::fmt::{self, Display, Formatter};

#[cfg(feature = "std")]
use std::error;

/// Failures reported by the scalar multiplication and point operations
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The bytes are not the canonical encoding of a curve point
    InvalidPointEncoding,
    /// The point has order dividing the cofactor 8
    SmallOrderPoint,
    /// The point has a torsion component of order 4 or 8
    TorsionComponent,
    /// The result is the identity, or the scalar was zero
    DegenerateResult,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPointEncoding => write!(f, "point encoding is invalid"),
            Error::SmallOrderPoint => write!(f, "point has small order"),
            Error::TorsionComponent => {
                write!(f, "point has a torsion component of order 4 or 8")
            }
            Error::DegenerateResult => write!(f, "result is the identity element"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}
