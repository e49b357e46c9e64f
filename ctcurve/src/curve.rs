//! Curve context and arithmetic configuration.

use crate::{
    Error, Result,
    field::{bind, from_be_bytes},
};
use dynfield::{FieldElement, PrimeField};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Family of point addition and doubling formulas.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Formulas {
    /// Complete formulas ([Renes-Costello-Batina 2015], algorithms 1 and 3):
    /// a single branch-free sequence of field operations valid for all inputs.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    #[default]
    Complete,

    /// Incomplete formulas (`add-1998-cmo-2` and `dbl-2007-bl`), guarded by
    /// branches on the identity and on equal or opposite inputs.
    ///
    /// The branches depend on the point values, so this family is only
    /// suitable for public points or for inputs which are already blinded.
    Incomplete,
}

/// Scalar multiplication algorithm used by
/// [`ProjectivePoint::mul`](crate::ProjectivePoint::mul).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScalarMulAlgorithm {
    /// Left-to-right double-and-add-always with random slot addressing.
    #[default]
    DoubleAndAddAlways,

    /// Left-to-right double-and-add-always over two slots, without random
    /// slot addressing. Smaller working set, weaker side-channel margin.
    DoubleAndAddAlwaysSmallStack,

    /// Montgomery ladder with random slot addressing.
    MontgomeryLadder,
}

/// Runtime arithmetic configuration of a [`Curve`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CurveConfig {
    /// Addition law family.
    pub formulas: Formulas,

    /// Scalar multiplication algorithm.
    pub algorithm: ScalarMulAlgorithm,
}

/// Short Weierstrass curve `y²z = x³ + a·x·z² + b·z³` over a prime field.
///
/// Immutable once constructed; points hold a shared reference to it.
#[derive(Clone, Debug)]
pub struct Curve<'f> {
    field: &'f PrimeField,
    a: FieldElement<'f>,
    b: FieldElement<'f>,
    b3: FieldElement<'f>,
    order: BigUint,
    cofactor: BigUint,
    group_order: BigUint,
    config: CurveConfig,
}

impl<'f> Curve<'f> {
    /// Create a curve from its coefficients and the order of the group
    /// generated by its base point.
    ///
    /// The coefficients must belong to a field with the same modulus as
    /// `field`. Singular curves (`4a³ + 27b² = 0`) and a zero order are
    /// rejected.
    ///
    /// The cofactor defaults to one; curves whose group is larger than the
    /// subgroup of `order` must declare it with [`Curve::with_cofactor`].
    pub fn new(
        field: &'f PrimeField,
        a: FieldElement<'_>,
        b: FieldElement<'_>,
        order: BigUint,
    ) -> Result<Self> {
        let a = bind(&a, field)?;
        let b = bind(&b, field)?;

        if order.is_zero() {
            return Err(Error::InvalidArgument);
        }

        let discriminant = FieldElement::from_u64(field, 4) * a.square() * a
            + FieldElement::from_u64(field, 27) * b.square();
        if bool::from(discriminant.is_zero()) {
            return Err(Error::InvalidArgument);
        }

        Ok(Self {
            field,
            a,
            b,
            b3: b.double() + b,
            group_order: order.clone(),
            order,
            cofactor: BigUint::one(),
            config: CurveConfig::default(),
        })
    }

    /// Create a curve from big-endian encoded coefficients and order.
    ///
    /// Coefficients must be exactly [`PrimeField::byte_len`] bytes long.
    pub fn from_be_bytes(field: &'f PrimeField, a: &[u8], b: &[u8], order: &[u8]) -> Result<Self> {
        let a = from_be_bytes(field, a)?;
        let b = from_be_bytes(field, b)?;
        Self::new(field, a, b, BigUint::from_bytes_be(order))
    }

    /// Set the cofactor `h`, so that the curve has `h·order` points.
    ///
    /// Scalar multiplication reduces scalars by the full group order, so
    /// the cofactor has to be right for points outside the subgroup of
    /// `order` to be multiplied correctly. A zero cofactor is rejected.
    pub fn with_cofactor(mut self, cofactor: BigUint) -> Result<Self> {
        if cofactor.is_zero() {
            return Err(Error::InvalidArgument);
        }
        self.group_order = &self.order * &cofactor;
        self.cofactor = cofactor;
        Ok(self)
    }

    /// Replace the arithmetic configuration.
    pub fn with_config(mut self, config: CurveConfig) -> Self {
        self.config = config;
        self
    }

    /// Base field.
    pub fn field(&self) -> &'f PrimeField {
        self.field
    }

    /// Coefficient `a`.
    pub fn a(&self) -> FieldElement<'f> {
        self.a
    }

    /// Coefficient `b`.
    pub fn b(&self) -> FieldElement<'f> {
        self.b
    }

    /// `3·b`, used by the complete formulas.
    pub(crate) fn b3(&self) -> FieldElement<'f> {
        self.b3
    }

    /// Order of the group generated by the base point.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Cofactor of the subgroup of [`Curve::order`].
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    /// Number of points on the curve, `order · cofactor`.
    pub fn group_order(&self) -> &BigUint {
        &self.group_order
    }

    /// Arithmetic configuration.
    pub fn config(&self) -> CurveConfig {
        self.config
    }
}
