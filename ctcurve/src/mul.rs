//! Scalar multiplication.
//!
//! The protected path ([`ProjectivePoint::mul`]) combines three
//! countermeasures:
//!
//! - the scalar is re-based by multiples of the group order so that the
//!   number of loop iterations does not reveal its bit length
//! - the input point is blinded by a random projective scaling factor
//! - the slots holding intermediate values are addressed through a random
//!   bit mask (Itoh-Izu-Takenaka), so the memory access pattern only
//!   depends on the mask
//!
//! Secret scalars are held in fixed-precision [`BoxedUint`]s whose width
//! only depends on the input length and the group order.
//!
//! Exceptional pairs met by the complete formulas inside the loops are
//! OR-accumulated and reported once the loop has finished.

use crate::{
    Error, FieldElement, ProjectivePoint, Result, ScalarMulAlgorithm,
    curve::Formulas,
};
use bigint::{BoxedUint, CtLt, CtSelect, RandomBits};
use num_bigint::BigUint;
use rand_core::CryptoRng;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Whether a point or scalar may be processed with variable-time code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sensitivity {
    /// Public data: variable-time arithmetic is acceptable.
    Public,

    /// Secret data: only the protected, blinded arithmetic is used.
    Sensitive,
}

impl<'c> ProjectivePoint<'c> {
    /// Returns `[scalar] self` computed with the side-channel protected
    /// algorithm selected by the curve configuration.
    ///
    /// The scalar is re-based by multiples of the full group order
    /// [`Curve::group_order`](crate::Curve::group_order), so the result is
    /// exact for every point on the curve provided its cofactor is set.
    ///
    /// Both the input and the output are checked to be on the curve; a
    /// failure of either check, or an exceptional pair met by the complete
    /// formulas, is reported as [`Error::UnsoundResult`].
    pub fn mul<R: CryptoRng + ?Sized>(&self, scalar: &BigUint, rng: &mut R) -> Result<Self> {
        let precision = scalar_precision(scalar.bits(), self.curve().group_order())?;
        let mut m = to_boxed(scalar, precision);
        let product = self.mul_secret(&m, rng);
        m.zeroize();
        product
    }

    /// Returns `[scalar] self` after adding a random multiple of the group
    /// order to the scalar.
    ///
    /// Use this whenever the scalar is secret.
    pub fn mul_blinded<R: CryptoRng + ?Sized>(&self, scalar: &BigUint, rng: &mut R) -> Result<Self> {
        self.check_initialized()?;
        let n = self.curve().group_order();
        let precision = scalar_precision(scalar.bits().max(n.bits()) + n.bits() + 1, n)?;

        let mut m = to_boxed(scalar, precision);
        let mut k = random_uint(rng, n.bits(), precision)?;
        let mut blinded = m.wrapping_add(&k.wrapping_mul(&to_boxed(n, precision)));
        m.zeroize();
        k.zeroize();

        let product = self.mul_secret(&blinded, rng);
        blinded.zeroize();
        product
    }

    /// Shared body of [`ProjectivePoint::mul`] and
    /// [`ProjectivePoint::mul_blinded`].
    fn mul_secret<R: CryptoRng + ?Sized>(&self, m: &BoxedUint, rng: &mut R) -> Result<Self> {
        self.check_initialized()?;
        if !bool::from(self.ct_is_on_curve()) {
            return Err(Error::UnsoundResult);
        }

        let curve = self.curve();
        let mut rebased = rebase_scalar(m, curve.group_order());
        let formulas = curve.config().formulas;

        let product = match curve.config().algorithm {
            ScalarMulAlgorithm::DoubleAndAddAlways => self.mul_daa_itoh(&rebased, formulas, rng),
            ScalarMulAlgorithm::DoubleAndAddAlwaysSmallStack => {
                self.mul_daa_small_stack(&rebased, formulas, rng)
            }
            ScalarMulAlgorithm::MontgomeryLadder => self.mul_ladder_itoh(&rebased, formulas, rng),
        };
        rebased.zeroize();
        let product = product?;

        if !bool::from(product.ct_is_on_curve()) {
            return Err(Error::UnsoundResult);
        }
        Ok(product)
    }

    /// Returns `[scalar] self` with a plain left-to-right double-and-add.
    ///
    /// Runs in variable time through the checked incomplete formulas and
    /// must only be used when both the point and the scalar are public.
    pub fn mul_unprotected(&self, scalar: &BigUint) -> Result<Self> {
        self.check_initialized()?;
        if !bool::from(self.ct_is_on_curve()) {
            return Err(Error::UnsoundResult);
        }

        let mut acc = Self::identity(self.curve());
        for i in (0..scalar.bits()).rev() {
            acc = Formulas::Incomplete.double(&acc);
            if scalar.bit(i) {
                acc = Formulas::Incomplete.add(&acc, self).0;
            }
        }

        if !bool::from(acc.ct_is_on_curve()) {
            return Err(Error::UnsoundResult);
        }
        Ok(acc)
    }

    /// Is `[candidate] self` the point at infinity?
    ///
    /// Public points use [`ProjectivePoint::mul_unprotected`], sensitive
    /// ones [`ProjectivePoint::mul_blinded`].
    pub fn check_order<R: CryptoRng + ?Sized>(
        &self,
        candidate: &BigUint,
        sensitivity: Sensitivity,
        rng: &mut R,
    ) -> Result<bool> {
        let product = match sensitivity {
            Sensitivity::Public => self.mul_unprotected(candidate)?,
            Sensitivity::Sensitive => self.mul_blinded(candidate, rng)?,
        };
        product.is_zero()
    }

    /// Returns `(X·λ, Y·λ, Z·λ)` for a random non-zero `λ`.
    pub(crate) fn blind<R: CryptoRng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut lambda = FieldElement::random_nonzero(self.curve().field(), rng);
        let blinded = Self::from_raw(self.curve(), self.x * lambda, self.y * lambda, self.z * lambda);
        lambda.zeroize();
        blinded
    }

    /// Double-and-add-always with random slot addressing.
    ///
    /// Each step doubles the slot addressed by the previous mask bit, adds the
    /// base into the other slot, then moves the slot picked by
    /// `scalar bit ^ previous mask bit` into the slot addressed by the new
    /// mask bit.
    fn mul_daa_itoh<R: CryptoRng + ?Sized>(
        &self,
        m: &BoxedUint,
        formulas: Formulas,
        rng: &mut R,
    ) -> Result<Self> {
        let bits = m.bits();
        let mut mask = random_uint(rng, u64::from(bits), m.bits_precision())?;
        let mut base = self.blind(rng);
        let mut t = [base; 2];
        let mut failure = 0u8;

        // The most significant bit of `m` is set; it is consumed by starting
        // from the base point.
        let mut r_prev = mask.bit(bits - 1).to_bool();
        for i in (0..bits - 1).rev() {
            let r_i = mask.bit(i).to_bool();
            let m_i = Choice::from(m.bit(i));

            let (doubled, dbl_failure) = formulas.ladder_double(&t[usize::from(r_prev)]);
            t[usize::from(r_prev)] = doubled;
            let (sum, add_failure) = formulas.add(&t[usize::from(r_prev)], &base);
            t[usize::from(!r_prev)] = sum;
            failure |= dbl_failure.unwrap_u8() | add_failure.unwrap_u8();

            let pick = m_i ^ Choice::from(u8::from(r_prev));
            t[usize::from(r_i)] = Self::conditional_select(&t[0], &t[1], pick);
            r_prev = r_i;
        }

        let out = Self::conditional_select(&t[0], &t[1], Choice::from(u8::from(r_prev)));
        t.zeroize();
        base.zeroize();
        mask.zeroize();

        if failure != 0 {
            return Err(Error::UnsoundResult);
        }
        Ok(out)
    }

    /// Double-and-add-always over a single accumulator: both the doubled
    /// value and the sum are always computed and the result is selected
    /// in constant time.
    fn mul_daa_small_stack<R: CryptoRng + ?Sized>(
        &self,
        m: &BoxedUint,
        formulas: Formulas,
        rng: &mut R,
    ) -> Result<Self> {
        let mut base = self.blind(rng);
        let mut acc = base;
        let mut failure = 0u8;

        for i in (0..m.bits() - 1).rev() {
            let (doubled, dbl_failure) = formulas.ladder_double(&acc);
            let (sum, add_failure) = formulas.add(&doubled, &base);
            failure |= dbl_failure.unwrap_u8() | add_failure.unwrap_u8();
            acc = Self::conditional_select(&doubled, &sum, Choice::from(m.bit(i)));
        }
        base.zeroize();

        if failure != 0 {
            return Err(Error::UnsoundResult);
        }
        Ok(acc)
    }

    /// Montgomery ladder with random slot addressing.
    ///
    /// Slots `t[r]` and `t[1 - r]` hold `[k] P` and `[k + 1] P` for the
    /// current mask bit `r`. Each step doubles the slot picked by
    /// `scalar bit ^ r`, adds both slots, and reassigns the two results
    /// according to `scalar bit ^ next mask bit`.
    fn mul_ladder_itoh<R: CryptoRng + ?Sized>(
        &self,
        m: &BoxedUint,
        formulas: Formulas,
        rng: &mut R,
    ) -> Result<Self> {
        let bits = m.bits();
        let mut mask = random_uint(rng, u64::from(bits), m.bits_precision())?;
        let mut base = self.blind(rng);
        let mut failure = 0u8;

        let mut r_prev = mask.bit(bits - 1).to_bool();
        let (doubled, dbl_failure) = formulas.ladder_double(&base);
        failure |= dbl_failure.unwrap_u8();
        let r_choice = Choice::from(u8::from(r_prev));
        let mut t = [
            Self::conditional_select(&base, &doubled, r_choice),
            Self::conditional_select(&doubled, &base, r_choice),
        ];

        for i in (0..bits - 1).rev() {
            let r_i = mask.bit(i).to_bool();
            let m_i = Choice::from(m.bit(i));

            let source = Self::conditional_select(&t[0], &t[1], m_i ^ Choice::from(u8::from(r_prev)));
            let (doubled, dbl_failure) = formulas.ladder_double(&source);
            let (sum, add_failure) = formulas.add(&t[0], &t[1]);
            failure |= dbl_failure.unwrap_u8() | add_failure.unwrap_u8();

            let swap = m_i ^ Choice::from(u8::from(r_i));
            t[0] = Self::conditional_select(&doubled, &sum, swap);
            t[1] = Self::conditional_select(&sum, &doubled, swap);
            r_prev = r_i;
        }

        let out = Self::conditional_select(&t[0], &t[1], Choice::from(u8::from(r_prev)));
        t.zeroize();
        base.zeroize();
        mask.zeroize();

        if failure != 0 {
            return Err(Error::UnsoundResult);
        }
        Ok(out)
    }
}

/// Precision for scalars of up to `bits` bits re-based against `n`.
///
/// Scalars below `n²` are re-based to `bits(n²) + 1` bits at most, so the
/// precision covers `2·bits(n) + 1` bits as well as the input.
fn scalar_precision(bits: u64, n: &BigUint) -> Result<u32> {
    let bits = bits.max(2 * n.bits() + 1) + 1;
    u32::try_from(bits).map_err(|_| Error::InvalidArgument)
}

/// Load `value` into an integer of `precision` bits, which must hold it.
fn to_boxed(value: &BigUint, precision: u32) -> BoxedUint {
    let mut bytes = value.to_bytes_be();
    let boxed = BoxedUint::from_be_slice_truncated(&bytes, precision);
    bytes.zeroize();
    boxed
}

/// Re-base `m` so that its bit length only depends on which of the ranges
/// `[0, n)`, `[n, n²)` or `[n², ∞)` it falls in.
///
/// For `m < n` the result is `m + n` or `m + 2n`, whichever is
/// `bits(n) + 1` bits long; for `n ≤ m < n²` the same rule is applied with
/// `n²`. Larger scalars are returned unchanged. The range tests and the
/// additions run in constant time at the precision of `m`, which must come
/// from [`scalar_precision`].
pub(crate) fn rebase_scalar(m: &BoxedUint, n: &BigUint) -> BoxedUint {
    let n = to_boxed(n, m.bits_precision());
    let n2 = n.wrapping_mul(&n);

    let below_n = m.ct_lt(&n);
    let below_n2 = m.ct_lt(&n2);
    let modulus = n2.ct_select(&n, below_n);

    let mut fixed = fix_msb(m, &modulus);
    let rebased = m.ct_select(&fixed, below_n2);
    fixed.zeroize();
    rebased
}

/// `m + modulus`, plus `modulus` once more if the first sum did not gain a
/// bit over `modulus`.
fn fix_msb(m: &BoxedUint, modulus: &BoxedUint) -> BoxedUint {
    let mut once = m.wrapping_add(modulus);
    let mut twice = once.wrapping_add(modulus);
    let again = once.bits().ct_eq(&modulus.bits());
    let fixed = once.ct_select(&twice, again.into());
    once.zeroize();
    twice.zeroize();
    fixed
}

/// Uniformly random integer of at most `bits` bits, held at `precision`.
fn random_uint<R: CryptoRng + ?Sized>(rng: &mut R, bits: u64, precision: u32) -> Result<BoxedUint> {
    let bits = u32::try_from(bits).map_err(|_| Error::InvalidArgument)?;
    BoxedUint::try_random_bits_with_precision(rng, bits, precision)
        .map_err(|_| Error::InvalidArgument)
}

#[cfg(test)]
mod tests {
    use super::{random_uint, rebase_scalar, scalar_precision, to_boxed};
    use bigint::BoxedUint;
    use num_bigint::BigUint;
    use rand::{SeedableRng, rngs::StdRng};

    fn to_big(value: &BoxedUint) -> BigUint {
        BigUint::from_bytes_be(&value.to_be_bytes())
    }

    fn rebase(m: &BigUint, n: &BigUint) -> BigUint {
        let precision = scalar_precision(m.bits(), n).unwrap();
        to_big(&rebase_scalar(&to_boxed(m, precision), n))
    }

    #[test]
    fn rebase_below_order() {
        let n = BigUint::from(28u32);
        for m in 0u32..28 {
            let rebased = rebase(&BigUint::from(m), &n);
            assert_eq!(rebased.bits(), n.bits() + 1);
            assert_eq!(&rebased % &n, BigUint::from(m));
        }
    }

    #[test]
    fn rebase_below_order_squared() {
        let n = BigUint::from(28u32);
        let n2 = &n * &n;
        for m in [28u32, 100, 500, 783] {
            let rebased = rebase(&BigUint::from(m), &n);
            assert_eq!(rebased.bits(), n2.bits() + 1);
            assert_eq!(&rebased % &n, BigUint::from(m) % &n);
        }
    }

    #[test]
    fn rebase_large_scalar_unchanged() {
        let n = BigUint::from(28u32);
        let m = BigUint::from(784u32 * 5);
        assert_eq!(rebase(&m, &n), m);
    }

    #[test]
    fn rebase_wide_order() {
        let n: BigUint = (BigUint::from(1u32) << 255) - 19u32;
        for m in [BigUint::from(0u32), BigUint::from(1u32), &n - 1u32, n.clone(), &n * &n - 1u32] {
            let rebased = rebase(&m, &n);
            assert_eq!(&rebased % &n, &m % &n);
            assert!(rebased.bits() == n.bits() + 1 || rebased.bits() == 2 * n.bits() + 1);
        }
    }

    #[test]
    fn precision_covers_order_squared() {
        let n = BigUint::from(28u32);
        assert!(scalar_precision(0, &n).unwrap() >= 2 * n.bits() as u32 + 2);
        assert!(scalar_precision(1000, &n).unwrap() > 1000);
        assert!(scalar_precision(u64::from(u32::MAX), &n).is_err());
    }

    #[test]
    fn random_uint_bit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for bits in [1u64, 5, 8, 9, 255, 256] {
            for _ in 0..32 {
                let value = random_uint(&mut rng, bits, 320).unwrap();
                assert_eq!(value.bits_precision(), 320);
                assert!(u64::from(value.bits()) <= bits);
            }
        }
        assert!(random_uint(&mut rng, 321, 320).is_err());
    }
}
