#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub use rand_core;
pub use subtle;

pub(crate) mod constants;
pub(crate) mod edwards;
pub(crate) mod error;
pub(crate) mod field;
pub(crate) mod scalarmult;

pub use constants::{
    BASEPOINT_ORDER, BYTES, ED25519_BASEPOINT_COMPRESSED, SCALARBYTES, SMALL_ORDER_ENCODINGS,
};
pub use edwards::{AffinePoint, CompressedEdwardsY, EdwardsPoint, PointBytes};
pub use error::Error;
pub use field::{ORDER, Scalar, ScalarBytes, WideScalarBytes};
pub use scalarmult::{
    clamp_integer, is_valid_point, point_add, point_sub, scalarmult, scalarmult_base,
    scalarmult_base_noclamp, scalarmult_noclamp,
};
