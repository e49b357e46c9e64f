//! Twisted Edwards curves `a·x² + y² = 1 + d·x²·y²`.

use super::{
    MontgomeryCurve, MontgomeryPoint,
    montgomery::{montgomery_to_weierstrass, weierstrass_to_montgomery},
};
use crate::{
    Curve, Error, ProjectivePoint, Result,
    field::{bind, div},
};
use core::fmt;
use dynfield::{FieldElement, PrimeField};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use subtle::ConstantTimeEq;

/// Twisted Edwards curve `a·x² + y² = 1 + d·x²·y²`.
#[derive(Clone, Debug)]
pub struct EdwardsCurve<'f> {
    field: &'f PrimeField,
    a: FieldElement<'f>,
    d: FieldElement<'f>,
    order: BigUint,
    cofactor: BigUint,
}

impl<'f> EdwardsCurve<'f> {
    /// Create a twisted Edwards curve from `a`, `d` and the order of the
    /// subgroup of interest.
    ///
    /// Rejects `a = 0`, `d = 0` and `a = d`.
    pub fn new(
        field: &'f PrimeField,
        a: FieldElement<'_>,
        d: FieldElement<'_>,
        order: BigUint,
    ) -> Result<Self> {
        let a = bind(&a, field)?;
        let d = bind(&d, field)?;
        if bool::from(a.is_zero() | d.is_zero() | a.ct_eq(&d)) || order.is_zero() {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            field,
            a,
            d,
            order,
            cofactor: BigUint::one(),
        })
    }

    /// Base field.
    pub fn field(&self) -> &'f PrimeField {
        self.field
    }

    /// Coefficient `a`.
    pub fn a(&self) -> FieldElement<'f> {
        self.a
    }

    /// Coefficient `d`.
    pub fn d(&self) -> FieldElement<'f> {
        self.d
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

    /// Montgomery curve related to this one by the scaling factor `alpha`:
    /// `A = 2(a + d) / (a - d)` and `B = 4 / ((a - d)·alpha²)`.
    pub fn to_montgomery(&self, alpha: &FieldElement<'_>) -> Result<MontgomeryCurve<'f>> {
        let field = self.field;
        let alpha = bind(alpha, field)?;
        let a_minus_d = self.a - self.d;

        let a = div((self.a + self.d).double(), a_minus_d)?;
        let b = div(FieldElement::from_u64(field, 4), a_minus_d * alpha.square())?;
        MontgomeryCurve::new(field, a, b, self.order.clone())?.with_cofactor(self.cofactor.clone())
    }

    /// Is `curve` the Montgomery curve related to this one by `alpha`?
    pub fn is_isomorphic_to_montgomery(
        &self,
        curve: &MontgomeryCurve<'_>,
        alpha: &FieldElement<'_>,
    ) -> Result<bool> {
        if self.field != curve.field() || &self.order != curve.order() {
            return Ok(false);
        }
        let expected = self.to_montgomery(alpha)?;
        let same = expected.a().ct_eq(&bind(&curve.a(), self.field)?)
            & expected.b().ct_eq(&bind(&curve.b(), self.field)?);
        Ok(same.into())
    }

    /// Short Weierstrass curve reached through the Montgomery curve related
    /// by `alpha`.
    pub fn to_short_weierstrass(&self, alpha: &FieldElement<'_>) -> Result<Curve<'f>> {
        self.to_montgomery(alpha)?.to_short_weierstrass()
    }

    /// Is `curve` the short Weierstrass curve reached through `alpha`?
    pub fn is_isomorphic_to(&self, curve: &Curve<'_>, alpha: &FieldElement<'_>) -> Result<bool> {
        if self.field != curve.field() {
            return Ok(false);
        }
        self.to_montgomery(alpha)?.is_isomorphic_to(curve)
    }
}

/// Affine point on an [`EdwardsCurve`].
#[derive(Clone, Copy)]
pub struct EdwardsPoint<'c> {
    x: FieldElement<'c>,
    y: FieldElement<'c>,
    curve: &'c EdwardsCurve<'c>,
}

impl<'c> EdwardsPoint<'c> {
    /// Create a point, checking that it lies on `curve`.
    pub fn new(curve: &'c EdwardsCurve<'c>, x: FieldElement<'_>, y: FieldElement<'_>) -> Result<Self> {
        let field = curve.field();
        let point = Self {
            x: bind(&x, field)?,
            y: bind(&y, field)?,
            curve,
        };

        let xx = point.x.square();
        let yy = point.y.square();
        if curve.a() * xx + yy != FieldElement::one(field) + curve.d() * xx * yy {
            return Err(Error::InvalidArgument);
        }
        Ok(point)
    }

    /// Neutral element `(0, 1)`.
    pub fn neutral(curve: &'c EdwardsCurve<'c>) -> Self {
        let field = curve.field();
        Self {
            x: FieldElement::zero(field),
            y: FieldElement::one(field),
            curve,
        }
    }

    /// Is this the neutral element `(0, 1)`?
    pub fn is_neutral(&self) -> bool {
        bool::from(self.x.is_zero() & self.y.ct_eq(&FieldElement::one(self.curve.field())))
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &'c EdwardsCurve<'c> {
        self.curve
    }

    /// Coordinate `x`.
    pub fn x(&self) -> FieldElement<'c> {
        self.x
    }

    /// Coordinate `y`.
    pub fn y(&self) -> FieldElement<'c> {
        self.y
    }

    /// Map this point to the Montgomery curve `target`, related to this
    /// point's curve by `alpha`.
    ///
    /// The neutral element maps to the Montgomery point at infinity, which
    /// has no affine representation, and yields [`Error::InvalidArgument`].
    pub fn to_montgomery<'m>(
        &self,
        target: &'m MontgomeryCurve<'m>,
        alpha: &FieldElement<'_>,
    ) -> Result<MontgomeryPoint<'m>> {
        if !self.curve.is_isomorphic_to_montgomery(target, alpha)? {
            return Err(Error::InvalidArgument);
        }

        let alpha = bind(alpha, self.curve.field())?;
        let (u, v) = edwards_to_montgomery(self.x, self.y, alpha)?;
        MontgomeryPoint::new(target, u, v)
    }

    /// Map this point to the short Weierstrass curve `target` reached
    /// through `alpha`. The neutral element maps to the point at infinity.
    pub fn to_short_weierstrass<'w>(
        &self,
        target: &'w Curve<'w>,
        alpha: &FieldElement<'_>,
    ) -> Result<ProjectivePoint<'w>> {
        if !self.curve.is_isomorphic_to(target, alpha)? {
            return Err(Error::InvalidArgument);
        }
        if self.is_neutral() {
            return Ok(ProjectivePoint::identity(target));
        }

        let montgomery = self.curve.to_montgomery(alpha)?;
        let alpha = bind(alpha, self.curve.field())?;
        let (u, v) = edwards_to_montgomery(self.x, self.y, alpha)?;
        let (x, y) = montgomery_to_weierstrass(montgomery.a(), montgomery.b(), u, v)?;

        let one = FieldElement::one(target.field());
        let point = ProjectivePoint::from_coordinates(target, x, y, one)?;
        if !point.is_on_curve()? {
            return Err(Error::UnsoundResult);
        }
        Ok(point)
    }
}

impl PartialEq for EdwardsPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.curve, other.curve)
            && bool::from(self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl fmt::Debug for EdwardsPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdwardsPoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<'c> ProjectivePoint<'c> {
    /// Map this point to the Edwards curve `target` related to this point's
    /// curve by `alpha`. The point at infinity maps to the neutral element.
    pub fn to_edwards<'e>(
        &self,
        target: &'e EdwardsCurve<'e>,
        alpha: &FieldElement<'_>,
    ) -> Result<EdwardsPoint<'e>> {
        self.check_initialized()?;
        if !target.is_isomorphic_to(self.curve(), alpha)? {
            return Err(Error::InvalidArgument);
        }
        if self.is_zero()? {
            return Ok(EdwardsPoint::neutral(target));
        }

        let field = target.field();
        let montgomery = target.to_montgomery(alpha)?;
        let (x, y) = self.to_affine()?.coordinates()?;
        let (u, v) = weierstrass_to_montgomery(
            montgomery.a(),
            montgomery.b(),
            bind(&x, field)?,
            bind(&y, field)?,
        )?;
        let (x, y) = montgomery_to_edwards(u, v, bind(alpha, field)?)?;
        EdwardsPoint::new(target, x, y)
    }
}

/// `u = (1 + y) / (1 - y)`, `v = alpha·u / x`, with `(0, -1) -> (0, 0)`.
pub(crate) fn edwards_to_montgomery<'f>(
    x: FieldElement<'f>,
    y: FieldElement<'f>,
    alpha: FieldElement<'f>,
) -> Result<(FieldElement<'f>, FieldElement<'f>)> {
    let one = FieldElement::one(x.field());
    if bool::from(x.is_zero()) {
        // (0, 1) maps to the point at infinity
        return if y == -one {
            Ok((FieldElement::zero(x.field()), FieldElement::zero(x.field())))
        } else {
            Err(Error::InvalidArgument)
        };
    }

    let u = div(one + y, one - y)?;
    let v = div(alpha * u, x)?;
    Ok((u, v))
}

/// `x = alpha·u / v`, `y = (u - 1) / (u + 1)`, with `(0, 0) -> (0, -1)`.
pub(crate) fn montgomery_to_edwards<'f>(
    u: FieldElement<'f>,
    v: FieldElement<'f>,
    alpha: FieldElement<'f>,
) -> Result<(FieldElement<'f>, FieldElement<'f>)> {
    let one = FieldElement::one(u.field());
    if bool::from(v.is_zero()) {
        // other points of order two map to points at infinity
        return if bool::from(u.is_zero()) {
            Ok((FieldElement::zero(u.field()), -one))
        } else {
            Err(Error::InvalidArgument)
        };
    }

    let x = div(alpha * u, v)?;
    let y = div(u - one, u + one)?;
    Ok((x, y))
}
