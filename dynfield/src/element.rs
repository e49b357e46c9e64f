//! Field elements.

use crate::{
    Error, PrimeField, Result,
    field::{MontyForm, UINT_BYTES, Uint, to_uint},
};
use alloc::vec::Vec;
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use num_bigint::BigUint;
use rand_core::{CryptoRng, Rng};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess, CtOption};
use zeroize::Zeroize;

/// Element of a [`PrimeField`].
///
/// Internally stored in Montgomery form. Elements borrow the field they
/// belong to; mixing elements of different fields in arithmetic is a logic
/// error.
#[derive(Clone, Copy)]
pub struct FieldElement<'f> {
    montgomery: Uint,
    field: &'f PrimeField,
}

impl<'f> FieldElement<'f> {
    /// Additive identity.
    pub fn zero(field: &'f PrimeField) -> Self {
        Self {
            montgomery: Uint::ZERO,
            field,
        }
    }

    /// Multiplicative identity.
    pub fn one(field: &'f PrimeField) -> Self {
        Self {
            montgomery: *field.params.one(),
            field,
        }
    }

    /// Create an element from a small integer.
    pub fn from_u64(field: &'f PrimeField, value: u64) -> Self {
        Self::from_uint(field, &BigUint::from(value))
    }

    /// Create an element from an arbitrary integer, reducing it modulo `p`.
    pub fn from_uint(field: &'f PrimeField, value: &BigUint) -> Self {
        let mut canonical = to_uint(&(value % field.modulus()));
        let element = Self::from_canonical(field, &canonical);
        canonical.zeroize();
        element
    }

    /// Convert a canonical value `< p` into Montgomery form.
    fn from_canonical(field: &'f PrimeField, canonical: &Uint) -> Self {
        Self::from_monty(field, &MontyForm::new(canonical, &field.params))
    }

    fn from_monty(field: &'f PrimeField, monty: &MontyForm) -> Self {
        Self {
            montgomery: *monty.as_montgomery(),
            field,
        }
    }

    fn monty(&self) -> MontyForm {
        MontyForm::from_montgomery(self.montgomery, &self.field.params)
    }

    /// Decode a big-endian byte string of exactly [`PrimeField::byte_len`]
    /// bytes.
    ///
    /// Returns none if the encoded integer is not below the modulus.
    pub fn from_be_bytes(field: &'f PrimeField, bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != field.byte_len() {
            return CtOption::new(Self::zero(field), Choice::from(0));
        }

        let mut buf = [0u8; UINT_BYTES];
        buf[UINT_BYTES - bytes.len()..].copy_from_slice(bytes);
        let mut canonical = Uint::from_be_slice(&buf);
        let is_some = canonical.ct_lt(field.p());
        let element = Self::from_canonical(field, &canonical);
        canonical.zeroize();
        buf.zeroize();
        CtOption::new(element, is_some)
    }

    /// Encode this element as a big-endian byte string into `out`, which
    /// must be exactly [`PrimeField::byte_len`] bytes long.
    pub fn write_be_bytes(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != self.field.byte_len() {
            return Err(Error);
        }

        self.encode(out);
        Ok(())
    }

    /// Encode this element as a big-endian byte string.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = alloc::vec![0u8; self.field.byte_len()];
        self.encode(&mut out);
        out
    }

    /// Write the low `out.len()` bytes of the canonical value.
    fn encode(&self, out: &mut [u8]) {
        let mut canonical = self.monty().retrieve();
        let mut bytes = canonical.to_be_bytes();
        out.copy_from_slice(&bytes.as_slice()[UINT_BYTES - out.len()..]);
        bytes.as_mut_slice().zeroize();
        canonical.zeroize();
    }

    /// Convert this element into an integer in `[0, p)`.
    ///
    /// The result is an allocated variable-size integer; avoid it for
    /// secret values.
    pub fn to_uint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }

    /// Sample a uniformly random element.
    pub fn random<R: CryptoRng + ?Sized>(field: &'f PrimeField, rng: &mut R) -> Self {
        let len = field.byte_len();
        let mask = 0xffu8 >> (8 * len - field.bits());
        let mut buf = [0u8; UINT_BYTES];

        loop {
            rng.fill_bytes(&mut buf[..len]);
            buf[0] &= mask;
            let candidate = Option::<Self>::from(Self::from_be_bytes(field, &buf[..len]));
            if let Some(element) = candidate {
                buf.zeroize();
                return element;
            }
        }
    }

    /// Sample a uniformly random non-zero element.
    pub fn random_nonzero<R: CryptoRng + ?Sized>(field: &'f PrimeField, rng: &mut R) -> Self {
        loop {
            let element = Self::random(field, rng);
            if !bool::from(element.is_zero()) {
                return element;
            }
        }
    }

    /// Field this element belongs to.
    pub fn field(&self) -> &'f PrimeField {
        self.field
    }

    /// Re-attach this element to an equal field context.
    ///
    /// Returns `None` if `field` has a different modulus.
    pub fn bind<'g>(&self, field: &'g PrimeField) -> Option<FieldElement<'g>> {
        if self.field == field {
            Some(FieldElement {
                montgomery: self.montgomery,
                field,
            })
        } else {
            None
        }
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.montgomery.ct_eq(&Uint::ZERO)
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        Self::from_monty(self.field, &self.monty().double())
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        Self::from_monty(self.field, &self.monty().square())
    }

    /// Returns the multiplicative inverse of `self`, if non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        let inverse = CtOption::from(self.monty().invert());
        let is_some = inverse.is_some();
        let value = inverse.unwrap_or(MontyForm::zero(&self.field.params));
        CtOption::new(Self::from_monty(self.field, &value), is_some)
    }

    fn same_field(&self, rhs: &Self) {
        debug_assert!(self.field == rhs.field, "field elements from different fields");
    }
}

macro_rules! impl_field_op {
    ($op:tt, $op_fn:ident, $assign:tt, $assign_fn:ident) => {
        impl<'f> $op<FieldElement<'f>> for FieldElement<'f> {
            type Output = FieldElement<'f>;

            #[inline]
            fn $op_fn(self, rhs: FieldElement<'f>) -> FieldElement<'f> {
                $op::$op_fn(self, &rhs)
            }
        }

        impl<'f> $op<&FieldElement<'f>> for FieldElement<'f> {
            type Output = FieldElement<'f>;

            #[inline]
            fn $op_fn(self, rhs: &FieldElement<'f>) -> FieldElement<'f> {
                self.same_field(rhs);
                FieldElement::from_monty(self.field, &self.monty().$op_fn(&rhs.monty()))
            }
        }

        impl<'f> $op<&FieldElement<'f>> for &FieldElement<'f> {
            type Output = FieldElement<'f>;

            #[inline]
            fn $op_fn(self, rhs: &FieldElement<'f>) -> FieldElement<'f> {
                $op::$op_fn(*self, rhs)
            }
        }

        impl<'f> $assign<FieldElement<'f>> for FieldElement<'f> {
            #[inline]
            fn $assign_fn(&mut self, rhs: FieldElement<'f>) {
                *self = $op::$op_fn(*self, &rhs);
            }
        }

        impl<'f> $assign<&FieldElement<'f>> for FieldElement<'f> {
            #[inline]
            fn $assign_fn(&mut self, rhs: &FieldElement<'f>) {
                *self = $op::$op_fn(*self, rhs);
            }
        }
    };
}

impl_field_op!(Add, add, AddAssign, add_assign);
impl_field_op!(Sub, sub, SubAssign, sub_assign);
impl_field_op!(Mul, mul, MulAssign, mul_assign);

impl<'f> Neg for FieldElement<'f> {
    type Output = FieldElement<'f>;

    fn neg(self) -> FieldElement<'f> {
        Self::from_monty(self.field, &self.monty().neg())
    }
}

impl<'f> Neg for &FieldElement<'f> {
    type Output = FieldElement<'f>;

    fn neg(self) -> FieldElement<'f> {
        -*self
    }
}

impl ConditionallySelectable for FieldElement<'_> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            montgomery: Uint::conditional_select(&a.montgomery, &b.montgomery, choice),
            field: a.field,
        }
    }
}

impl ConstantTimeEq for FieldElement<'_> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.montgomery.ct_eq(&other.montgomery)
    }
}

impl PartialEq for FieldElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement<'_> {}

impl fmt::Debug for FieldElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x")?;
        for byte in self.to_be_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl Zeroize for FieldElement<'_> {
    fn zeroize(&mut self) {
        self.montgomery.zeroize();
    }
}
