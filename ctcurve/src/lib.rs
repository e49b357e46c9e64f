#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod models;

mod affine;
mod curve;
mod error;
mod field;
mod mul;
mod point_arithmetic;
mod projective;

pub use crate::{
    affine::AffinePoint,
    curve::{Curve, CurveConfig, Formulas, ScalarMulAlgorithm},
    error::{Error, Result},
    mul::Sensitivity,
    projective::ProjectivePoint,
};
pub use dynfield::{self, BigUint, FieldElement, PrimeField};
pub use rand_core;
pub use subtle;
