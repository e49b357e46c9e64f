//! Montgomery curves `B·v² = u³ + A·u² + u`.

use super::EdwardsCurve;
use crate::{
    Curve, Error, ProjectivePoint, Result,
    field::{bind, div},
};
use core::fmt;
use dynfield::{FieldElement, PrimeField};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use subtle::ConstantTimeEq;

/// Montgomery curve `B·v² = u³ + A·u² + u`.
#[derive(Clone, Debug)]
pub struct MontgomeryCurve<'f> {
    field: &'f PrimeField,
    a: FieldElement<'f>,
    b: FieldElement<'f>,
    order: BigUint,
    cofactor: BigUint,
}

impl<'f> MontgomeryCurve<'f> {
    /// Create a Montgomery curve from its coefficients `A`, `B` and the order
    /// of the subgroup of interest.
    ///
    /// Rejects `B = 0` and `A² = 4`.
    pub fn new(
        field: &'f PrimeField,
        a: FieldElement<'_>,
        b: FieldElement<'_>,
        order: BigUint,
    ) -> Result<Self> {
        let a = bind(&a, field)?;
        let b = bind(&b, field)?;
        if bool::from(b.is_zero()) || a.square() == FieldElement::from_u64(field, 4) || order.is_zero()
        {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            field,
            a,
            b,
            order,
            cofactor: BigUint::one(),
        })
    }

    /// Base field.
    pub fn field(&self) -> &'f PrimeField {
        self.field
    }

    /// Coefficient `A`.
    pub fn a(&self) -> FieldElement<'f> {
        self.a
    }

    /// Coefficient `B`.
    pub fn b(&self) -> FieldElement<'f> {
        self.b
    }

    /// Subgroup order.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Cofactor of the subgroup, one unless set with `with_cofactor`.
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    /// Set the cofactor of the subgroup. A zero cofactor is rejected.
    pub fn with_cofactor(mut self, cofactor: BigUint) -> Result<Self> {
        if cofactor.is_zero() {
            return Err(Error::InvalidArgument);
        }
        self.cofactor = cofactor;
        Ok(self)
    }

    /// Coefficients of the isomorphic short Weierstrass curve:
    /// `a = (3 - A²) / (3B²)` and `b = (2A³ - 9A) / (27B³)`.
    fn short_weierstrass_coefficients(&self) -> Result<(FieldElement<'f>, FieldElement<'f>)> {
        let field = self.field;
        let three = FieldElement::from_u64(field, 3);
        let a_sq = self.a.square();
        let b_sq = self.b.square();

        let a = div(three - a_sq, three * b_sq)?;
        let b = div(
            a_sq * self.a.double() - FieldElement::from_u64(field, 9) * self.a,
            FieldElement::from_u64(field, 27) * b_sq * self.b,
        )?;
        Ok((a, b))
    }

    /// Isomorphic short Weierstrass curve, with the default configuration.
    pub fn to_short_weierstrass(&self) -> Result<Curve<'f>> {
        let (a, b) = self.short_weierstrass_coefficients()?;
        Curve::new(self.field, a, b, self.order.clone())?.with_cofactor(self.cofactor.clone())
    }

    /// Is `curve` the short Weierstrass curve isomorphic to this one?
    pub fn is_isomorphic_to(&self, curve: &Curve<'_>) -> Result<bool> {
        if self.field != curve.field() || &self.order != curve.order() {
            return Ok(false);
        }
        let (a, b) = self.short_weierstrass_coefficients()?;
        let same = a.ct_eq(&bind(&curve.a(), self.field)?) & b.ct_eq(&bind(&curve.b(), self.field)?);
        Ok(same.into())
    }

    /// Twisted Edwards curve related to this one by the scaling factor
    /// `alpha`: `a = (A + 2) / (B·alpha²)` and `d = (A - 2) / (B·alpha²)`.
    pub fn to_edwards(&self, alpha: &FieldElement<'_>) -> Result<EdwardsCurve<'f>> {
        let field = self.field;
        let alpha = bind(alpha, field)?;
        let two = FieldElement::from_u64(field, 2);
        let scale = self.b * alpha.square();

        let a = div(self.a + two, scale)?;
        let d = div(self.a - two, scale)?;
        EdwardsCurve::new(field, a, d, self.order.clone())?.with_cofactor(self.cofactor.clone())
    }
}

/// Affine point on a [`MontgomeryCurve`].
///
/// The point at infinity of the Montgomery model has no affine
/// representation and is not supported.
#[derive(Clone, Copy)]
pub struct MontgomeryPoint<'c> {
    u: FieldElement<'c>,
    v: FieldElement<'c>,
    curve: &'c MontgomeryCurve<'c>,
}

impl<'c> MontgomeryPoint<'c> {
    /// Create a point, checking that it lies on `curve`.
    pub fn new(curve: &'c MontgomeryCurve<'c>, u: FieldElement<'_>, v: FieldElement<'_>) -> Result<Self> {
        let field = curve.field();
        let point = Self {
            u: bind(&u, field)?,
            v: bind(&v, field)?,
            curve,
        };

        let lhs = curve.b() * point.v.square();
        let rhs = ((point.u + curve.a()) * point.u + FieldElement::one(field)) * point.u;
        if lhs != rhs {
            return Err(Error::InvalidArgument);
        }
        Ok(point)
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &'c MontgomeryCurve<'c> {
        self.curve
    }

    /// Coordinate `u`.
    pub fn u(&self) -> FieldElement<'c> {
        self.u
    }

    /// Coordinate `v`.
    pub fn v(&self) -> FieldElement<'c> {
        self.v
    }

    /// Map this point to the isomorphic short Weierstrass curve `target`.
    pub fn to_short_weierstrass<'w>(&self, target: &'w Curve<'w>) -> Result<ProjectivePoint<'w>> {
        if !self.curve.is_isomorphic_to(target)? {
            return Err(Error::InvalidArgument);
        }

        let (x, y) = montgomery_to_weierstrass(self.curve.a(), self.curve.b(), self.u, self.v)?;
        let one = FieldElement::one(target.field());
        let point = ProjectivePoint::from_coordinates(target, x, y, one)?;
        if !point.is_on_curve()? {
            return Err(Error::UnsoundResult);
        }
        Ok(point)
    }

    /// Map this point to the Edwards curve `target`, related to this
    /// point's curve by `alpha`.
    pub fn to_edwards<'e>(
        &self,
        target: &'e EdwardsCurve<'e>,
        alpha: &FieldElement<'_>,
    ) -> Result<super::EdwardsPoint<'e>> {
        if !target.is_isomorphic_to_montgomery(self.curve, alpha)? {
            return Err(Error::InvalidArgument);
        }

        let alpha = bind(alpha, self.curve.field())?;
        let (x, y) = super::edwards::montgomery_to_edwards(self.u, self.v, alpha)?;
        super::EdwardsPoint::new(target, x, y)
    }
}

impl PartialEq for MontgomeryPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.curve, other.curve)
            && bool::from(self.u.ct_eq(&other.u) & self.v.ct_eq(&other.v))
    }
}

impl fmt::Debug for MontgomeryPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MontgomeryPoint")
            .field("u", &self.u)
            .field("v", &self.v)
            .finish()
    }
}

impl<'c> ProjectivePoint<'c> {
    /// Map this point to the isomorphic Montgomery curve `target`.
    ///
    /// The point at infinity has no Montgomery affine image and yields
    /// [`Error::InvalidArgument`].
    pub fn to_montgomery<'m>(&self, target: &'m MontgomeryCurve<'m>) -> Result<MontgomeryPoint<'m>> {
        if !target.is_isomorphic_to(self.curve())? {
            return Err(Error::InvalidArgument);
        }

        let (x, y) = self.to_affine()?.coordinates()?;
        let field = target.field();
        let (u, v) = weierstrass_to_montgomery(target.a(), target.b(), bind(&x, field)?, bind(&y, field)?)?;
        MontgomeryPoint::new(target, u, v)
    }
}

/// `x = (3u + A) / (3B)`, `y = v / B`.
pub(crate) fn montgomery_to_weierstrass<'f>(
    a: FieldElement<'f>,
    b: FieldElement<'f>,
    u: FieldElement<'f>,
    v: FieldElement<'f>,
) -> Result<(FieldElement<'f>, FieldElement<'f>)> {
    let three = FieldElement::from_u64(a.field(), 3);
    let x = div(three * u + a, three * b)?;
    let y = div(v, b)?;
    Ok((x, y))
}

/// `u = (3B·x - A) / 3`, `v = B·y`.
pub(crate) fn weierstrass_to_montgomery<'f>(
    a: FieldElement<'f>,
    b: FieldElement<'f>,
    x: FieldElement<'f>,
    y: FieldElement<'f>,
) -> Result<(FieldElement<'f>, FieldElement<'f>)> {
    let three = FieldElement::from_u64(a.field(), 3);
    let u = div(three * b * x - a, three)?;
    Ok((u, b * y))
}
