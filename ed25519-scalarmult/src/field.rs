mod element;
mod scalar;

pub(crate) use element::FieldElement;
pub(crate) use scalar::to_radix_16;
pub use scalar::{ORDER, Scalar, ScalarBytes, WideScalarBytes};

use crypto_bigint::{
    U256, impl_modulus,
    modular::constant_mod::{Residue, ResidueParams},
};

impl_modulus!(
    MODULUS,
    U256,
    "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
);
pub(crate) type ResidueType = Residue<MODULUS, { MODULUS::LIMBS }>;
