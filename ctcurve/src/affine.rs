//! Affine curve points.

use crate::{
    Curve, Error, ProjectivePoint, Result,
    field::{bind, from_be_bytes},
};
use alloc::vec::Vec;
use core::fmt;
use dynfield::FieldElement;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Point on a short Weierstrass curve in affine coordinates.
///
/// Affine points never represent the point at infinity.
#[derive(Clone, Copy)]
pub struct AffinePoint<'c> {
    x: FieldElement<'c>,
    y: FieldElement<'c>,
    curve: &'c Curve<'c>,
    initialized: bool,
}

impl<'c> AffinePoint<'c> {
    /// Create a point from affine coordinates.
    ///
    /// Coordinates must belong to a field with the curve's modulus. Curve
    /// membership is not checked here; see [`AffinePoint::is_on_curve`].
    pub fn new(curve: &'c Curve<'c>, x: FieldElement<'_>, y: FieldElement<'_>) -> Result<Self> {
        let field = curve.field();
        Ok(Self::from_raw(curve, bind(&x, field)?, bind(&y, field)?))
    }

    pub(crate) fn from_raw(curve: &'c Curve<'c>, x: FieldElement<'c>, y: FieldElement<'c>) -> Self {
        Self {
            x,
            y,
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

    /// Affine coordinates `(x, y)`.
    pub fn coordinates(&self) -> Result<(FieldElement<'c>, FieldElement<'c>)> {
        self.check_initialized()?;
        Ok((self.x, self.y))
    }

    /// Does this point satisfy `y² = x³ + ax + b`?
    pub fn is_on_curve(&self) -> Result<bool> {
        self.check_initialized()?;
        Ok(self.ct_is_on_curve().into())
    }

    fn ct_is_on_curve(&self) -> Choice {
        let curve = self.curve;
        let rhs = (self.x.square() + curve.a()) * self.x + curve.b();
        self.y.square().ct_eq(&rhs)
    }

    /// Do both points have the same coordinates?
    pub fn equals(&self, other: &Self) -> Result<bool> {
        self.check_initialized()?;
        other.check_initialized()?;
        if !core::ptr::eq(self.curve, other.curve) {
            return Err(Error::InvalidArgument);
        }
        Ok((self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)).into())
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Result<Self> {
        self.check_initialized()?;
        Ok(Self::from_raw(self.curve, self.x, -self.y))
    }

    /// Returns the projective representation `(x, y, 1)` of this point.
    ///
    /// Fails with [`Error::InvalidArgument`] if the point is not on the curve.
    pub fn to_projective(&self) -> Result<ProjectivePoint<'c>> {
        if !self.is_on_curve()? {
            return Err(Error::InvalidArgument);
        }
        let one = FieldElement::one(self.curve.field());
        Ok(ProjectivePoint::from_raw(self.curve, self.x, self.y, one))
    }

    /// Decode a point from `x ‖ y`, each coordinate
    /// [`PrimeField::byte_len`](dynfield::PrimeField::byte_len) bytes wide.
    ///
    /// Points which are not on the curve are rejected.
    pub fn from_bytes(curve: &'c Curve<'c>, bytes: &[u8]) -> Result<Self> {
        let field = curve.field();
        let width = field.byte_len();
        if bytes.len() != 2 * width {
            return Err(Error::InvalidArgument);
        }

        let x = from_be_bytes(field, &bytes[..width])?;
        let y = from_be_bytes(field, &bytes[width..])?;
        let mut point = Self::from_raw(curve, x, y);
        if !bool::from(point.ct_is_on_curve()) {
            point.uninit();
            return Err(Error::InvalidArgument);
        }
        Ok(point)
    }

    /// Encode this point as `x ‖ y` into `out`, which must be exactly two
    /// coordinates wide.
    pub fn write_bytes(&self, out: &mut [u8]) -> Result<()> {
        self.check_initialized()?;
        let width = self.curve.field().byte_len();
        if out.len() != 2 * width || !bool::from(self.ct_is_on_curve()) {
            return Err(Error::InvalidArgument);
        }

        let (x, y) = out.split_at_mut(width);
        self.x.write_be_bytes(x)?;
        self.y.write_be_bytes(y)?;
        Ok(())
    }

    /// Encode this point as `x ‖ y`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = alloc::vec![0u8; 2 * self.curve.field().byte_len()];
        self.write_bytes(&mut out)?;
        Ok(out)
    }

    fn check_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::InvalidState)
        }
    }
}

impl PartialEq for AffinePoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl Zeroize for AffinePoint<'_> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.initialized = false;
    }
}

impl fmt::Debug for AffinePoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.initialized {
            return f.write_str("AffinePoint(uninitialized)");
        }
        f.debug_struct("AffinePoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}
