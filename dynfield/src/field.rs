//! Runtime prime field context.

use crate::{Error, Result};
use bigint::{
    Odd, U576,
    modular::{FixedMontyForm, FixedMontyParams},
};
use core::fmt;
use num_bigint::BigUint;

/// Integer type holding field elements in Montgomery form.
pub(crate) type Uint = U576;

/// Montgomery parameters for moduli up to [`Uint::BITS`] bits.
pub(crate) type MontyParams = FixedMontyParams<{ Uint::LIMBS }>;

/// Element in Montgomery form together with its parameters.
pub(crate) type MontyForm = FixedMontyForm<{ Uint::LIMBS }>;

/// Size of the big-endian encoding of a [`Uint`].
pub(crate) const UINT_BYTES: usize = Uint::BYTES;

/// Prime field `GF(p)` for an odd modulus `p` chosen at runtime.
///
/// Holds the Montgomery parameters used by [`FieldElement`](crate::FieldElement)
/// arithmetic. Primality of the modulus is not checked.
#[derive(Clone)]
pub struct PrimeField {
    modulus: BigUint,
    pub(crate) params: MontyParams,
    bits: usize,
    byte_len: usize,
}

impl PrimeField {
    /// Create a field context for the given modulus.
    ///
    /// Returns an error if the modulus is even, smaller than 3 or wider than
    /// 576 bits.
    pub fn new(modulus: &BigUint) -> Result<Self> {
        let bits = modulus.bits();
        if !(2..=u64::from(Uint::BITS)).contains(&bits) {
            return Err(Error);
        }

        let odd = Odd::new(to_uint(modulus)).into_option().ok_or(Error)?;
        let bits = bits as usize;

        Ok(Self {
            modulus: modulus.clone(),
            params: MontyParams::new_vartime(odd),
            bits,
            byte_len: bits.div_ceil(8),
        })
    }

    /// Create a field context from a big-endian encoded modulus.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(&BigUint::from_bytes_be(bytes))
    }

    /// Field modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Size of the modulus in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Size of a serialized field element in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Field modulus as a fixed-width integer.
    pub(crate) fn p(&self) -> &Uint {
        self.params.modulus().as_ref()
    }
}

impl PartialEq for PrimeField {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other) || self.modulus == other.modulus
    }
}

impl Eq for PrimeField {}

impl fmt::Debug for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeField")
            .field("modulus", &format_args!("0x{:x}", self.modulus))
            .field("bits", &self.bits)
            .finish()
    }
}

/// Convert a value below `2^576` into a fixed-width integer.
///
/// Higher bits are discarded; callers reduce or range check first.
pub(crate) fn to_uint(value: &BigUint) -> Uint {
    let bytes = value.to_bytes_be();
    let mut buf = [0u8; UINT_BYTES];
    let len = bytes.len().min(UINT_BYTES);
    buf[UINT_BYTES - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    Uint::from_be_slice(&buf)
}
