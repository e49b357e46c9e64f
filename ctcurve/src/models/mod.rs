//! Montgomery and twisted Edwards curve models.
//!
//! Conversions to and from the short Weierstrass model go through the
//! Montgomery model:
//!
//! ```text
//! Edwards  <->  Montgomery  <->  short Weierstrass
//! ```
//!
//! These maps are variable time and intended for public points only.

mod edwards;
mod montgomery;

pub use self::{
    edwards::{EdwardsCurve, EdwardsPoint},
    montgomery::{MontgomeryCurve, MontgomeryPoint},
};
