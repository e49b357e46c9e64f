//! Glue between `dynfield` and this crate's error handling.

use crate::{Error, Result};
use dynfield::{FieldElement, PrimeField};
use subtle::CtOption;

/// Convert a constant-time option into a result, mapping none to
/// [`Error::InvalidArgument`].
pub(crate) fn ct_result<T>(value: CtOption<T>) -> Result<T> {
    Option::<T>::from(value).ok_or(Error::InvalidArgument)
}

/// Attach `element` to `field`, failing if the moduli differ.
pub(crate) fn bind<'f>(element: &FieldElement<'_>, field: &'f PrimeField) -> Result<FieldElement<'f>> {
    element.bind(field).ok_or(Error::InvalidArgument)
}

/// Compute `num / den`, failing if `den` is zero.
pub(crate) fn div<'f>(num: FieldElement<'f>, den: FieldElement<'f>) -> Result<FieldElement<'f>> {
    Ok(num * ct_result(den.invert())?)
}

/// Decode a field element from exactly `field.byte_len()` big-endian bytes.
pub(crate) fn from_be_bytes<'f>(field: &'f PrimeField, bytes: &[u8]) -> Result<FieldElement<'f>> {
    ct_result(FieldElement::from_be_bytes(field, bytes))
}
