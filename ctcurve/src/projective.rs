//! Projective curve points.

use crate::{
    AffinePoint, Curve, Error, Result,
    field::{bind, ct_result, from_be_bytes},
};
use alloc::vec::Vec;
use core::fmt;
use dynfield::FieldElement;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Point on a short Weierstrass curve in projective coordinates.
///
/// `(X, Y, Z)` represents the affine point `(X/Z, Y/Z)` when `Z ≠ 0` and the
/// point at infinity when `Z = 0`, whose canonical form is `(0, 1, 0)`.
///
/// Points carry a validity tag: every operation fails with
/// [`Error::InvalidState`] once [`ProjectivePoint::uninit`] has been called.
#[derive(Clone, Copy)]
pub struct ProjectivePoint<'c> {
    pub(crate) x: FieldElement<'c>,
    pub(crate) y: FieldElement<'c>,
    pub(crate) z: FieldElement<'c>,
    curve: &'c Curve<'c>,
    initialized: bool,
}

impl<'c> ProjectivePoint<'c> {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity(curve: &'c Curve<'c>) -> Self {
        let field = curve.field();
        Self::from_raw(
            curve,
            FieldElement::zero(field),
            FieldElement::one(field),
            FieldElement::zero(field),
        )
    }

    /// Create a point from projective coordinates.
    ///
    /// Coordinates must belong to a field with the curve's modulus. Any
    /// triple with `Z = 0` is replaced by the canonical identity `(0, 1, 0)`.
    /// Curve membership is not checked here; see
    /// [`ProjectivePoint::is_on_curve`].
    pub fn from_coordinates(
        curve: &'c Curve<'c>,
        x: FieldElement<'_>,
        y: FieldElement<'_>,
        z: FieldElement<'_>,
    ) -> Result<Self> {
        let field = curve.field();
        let point = Self::from_raw(
            curve,
            bind(&x, field)?,
            bind(&y, field)?,
            bind(&z, field)?,
        );
        Ok(point.canonicalize_identity())
    }

    pub(crate) fn from_raw(
        curve: &'c Curve<'c>,
        x: FieldElement<'c>,
        y: FieldElement<'c>,
        z: FieldElement<'c>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            curve,
            initialized: true,
        }
    }

    /// Wipe the coordinates and clear the validity tag. Idempotent.
    pub fn uninit(&mut self) {
        self.zeroize();
    }

    /// Is this point initialized?
    pub fn is_valid(&self) -> bool {
        self.initialized
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &'c Curve<'c> {
        self.curve
    }

    /// Overwrite `self` with a copy of `src`, including its curve.
    pub fn copy_from(&mut self, src: &Self) -> Result<()> {
        src.check_initialized()?;
        *self = *src;
        Ok(())
    }

    /// Projective coordinates `(X, Y, Z)`.
    pub fn coordinates(&self) -> Result<(FieldElement<'c>, FieldElement<'c>, FieldElement<'c>)> {
        self.check_initialized()?;
        Ok((self.x, self.y, self.z))
    }

    /// Is this the point at infinity?
    pub fn is_zero(&self) -> Result<bool> {
        self.check_initialized()?;
        Ok(self.z.is_zero().into())
    }

    /// Set this point to the canonical point at infinity.
    pub fn set_zero(&mut self) -> Result<()> {
        self.check_initialized()?;
        *self = Self::identity(self.curve);
        Ok(())
    }

    /// Does this point satisfy `Y²Z = X³ + aXZ² + bZ³`?
    pub fn is_on_curve(&self) -> Result<bool> {
        self.check_initialized()?;
        Ok(self.ct_is_on_curve().into())
    }

    /// Curve equation check; the all-zero triple `Y = Z = 0` is rejected
    /// although it satisfies the homogeneous equation.
    pub(crate) fn ct_is_on_curve(&self) -> Choice {
        let curve = self.curve;
        let zz = self.z.square();
        let lhs = self.y.square() * self.z;
        let rhs = self.x.square() * self.x + curve.a() * self.x * zz + curve.b() * zz * self.z;
        lhs.ct_eq(&rhs) & !(self.y.is_zero() & self.z.is_zero())
    }

    /// Do both points represent the same group element?
    pub fn equals(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        Ok(self.ct_equals(other).into())
    }

    /// Is `self` equal to `other` or to `-other`?
    pub fn equals_or_opposite(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        Ok(self.ct_equals_or_opposite(other).into())
    }

    /// Equality up to projective scaling: `X1·Z2 = X2·Z1` and `Y1·Z2 = Y2·Z1`.
    pub(crate) fn ct_equals(&self, other: &Self) -> Choice {
        let x_eq = (self.x * other.z).ct_eq(&(other.x * self.z));
        let y_eq = (self.y * other.z).ct_eq(&(other.y * self.z));
        x_eq & y_eq
    }

    pub(crate) fn ct_equals_or_opposite(&self, other: &Self) -> Choice {
        let x_eq = (self.x * other.z).ct_eq(&(other.x * self.z));
        let y1z2 = self.y * other.z;
        let y2z1 = other.y * self.z;
        x_eq & (y1z2.ct_eq(&y2z1) | y1z2.ct_eq(&-y2z1))
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Result<Self> {
        self.check_initialized()?;
        Ok(Self::from_raw(self.curve, self.x, -self.y, self.z).canonicalize_identity())
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Result<Self> {
        self.check_initialized()?;
        Ok(self.curve.config().formulas.double(self))
    }

    /// Returns `self + other`.
    ///
    /// With complete formulas an exceptional pair (operands differing by a
    /// point of order two) is reported as [`Error::UnsoundResult`].
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let (sum, degenerate) = self.curve.config().formulas.add(self, other);
        if bool::from(degenerate) {
            return Err(Error::UnsoundResult);
        }
        Ok(sum)
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        self.add(&other.neg()?)
    }

    /// Returns the affine representation of this point.
    ///
    /// The point at infinity has no affine representation and yields
    /// [`Error::InvalidArgument`].
    pub fn to_affine(&self) -> Result<AffinePoint<'c>> {
        self.check_initialized()?;
        let zinv = ct_result(self.z.invert())?;
        Ok(AffinePoint::from_raw(self.curve, self.x * zinv, self.y * zinv))
    }

    /// Returns the representative of this point with `Z = 1`, or the
    /// canonical identity.
    pub fn to_unique(&self) -> Result<Self> {
        self.check_initialized()?;
        match Option::<FieldElement<'c>>::from(self.z.invert()) {
            Some(zinv) => Ok(Self::from_raw(
                self.curve,
                self.x * zinv,
                self.y * zinv,
                FieldElement::one(self.curve.field()),
            )),
            None => Ok(Self::identity(self.curve)),
        }
    }

    /// Replace any point with `Z = 0` by `(0, 1, 0)`.
    pub(crate) fn canonicalize_identity(self) -> Self {
        let is_identity = self.z.is_zero();
        Self::conditional_select(&self, &Self::identity(self.curve), is_identity)
    }

    /// Decode a point from big-endian coordinates.
    ///
    /// The buffer holds either `x ‖ y` (affine, `Z = 1`) or `X ‖ Y ‖ Z`, each
    /// coordinate [`PrimeField::byte_len`](dynfield::PrimeField::byte_len)
    /// bytes wide. Points which are not on the curve are rejected.
    pub fn from_bytes(curve: &'c Curve<'c>, bytes: &[u8]) -> Result<Self> {
        let field = curve.field();
        let width = field.byte_len();

        let (x, y, z) = if bytes.len() == 2 * width {
            (
                from_be_bytes(field, &bytes[..width])?,
                from_be_bytes(field, &bytes[width..])?,
                FieldElement::one(field),
            )
        } else if bytes.len() == 3 * width {
            (
                from_be_bytes(field, &bytes[..width])?,
                from_be_bytes(field, &bytes[width..2 * width])?,
                from_be_bytes(field, &bytes[2 * width..])?,
            )
        } else {
            return Err(Error::InvalidArgument);
        };

        let mut point = Self::from_raw(curve, x, y, z);
        if !bool::from(point.ct_is_on_curve()) {
            point.uninit();
            return Err(Error::InvalidArgument);
        }
        Ok(point.canonicalize_identity())
    }

    /// Encode this point as `X ‖ Y ‖ Z` into `out`, which must be exactly
    /// three coordinates wide.
    pub fn write_bytes(&self, out: &mut [u8]) -> Result<()> {
        self.check_initialized()?;
        let width = self.curve.field().byte_len();
        if out.len() != 3 * width || !bool::from(self.ct_is_on_curve()) {
            return Err(Error::InvalidArgument);
        }

        let (x, rest) = out.split_at_mut(width);
        let (y, z) = rest.split_at_mut(width);
        self.x.write_be_bytes(x)?;
        self.y.write_be_bytes(y)?;
        self.z.write_be_bytes(z)?;
        Ok(())
    }

    /// Encode this point as `X ‖ Y ‖ Z`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = alloc::vec![0u8; 3 * self.curve.field().byte_len()];
        self.write_bytes(&mut out)?;
        Ok(out)
    }

    pub(crate) fn check_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::InvalidState)
        }
    }

    /// Both points must be initialized and refer to the same curve context.
    pub(crate) fn check_compatible(&self, other: &Self) -> Result<()> {
        self.check_initialized()?;
        other.check_initialized()?;
        if core::ptr::eq(self.curve, other.curve) {
            Ok(())
        } else {
            Err(Error::InvalidArgument)
        }
    }
}

impl ConditionallySelectable for ProjectivePoint<'_> {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            curve: a.curve,
            initialized: a.initialized,
        }
    }
}

impl PartialEq for ProjectivePoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl Zeroize for ProjectivePoint<'_> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
        self.initialized = false;
    }
}

impl fmt::Debug for ProjectivePoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.initialized {
            return f.write_str("ProjectivePoint(uninitialized)");
        }
        f.debug_struct("ProjectivePoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}
