//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed operand: wrong buffer length, points on different curves,
    /// the identity where an affine point is required, or coordinates which
    /// do not describe a point on the curve.
    InvalidArgument,

    /// Operation on a point which is not initialized.
    InvalidState,

    /// Arithmetic produced a value which cannot be a valid result, e.g. an
    /// exceptional pair fed to the complete addition law or a scalar
    /// multiplication whose input or output left the curve.
    UnsoundResult,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::InvalidState => f.write_str("point is not initialized"),
            Error::UnsoundResult => f.write_str("unsound arithmetic result"),
        }
    }
}

impl core::error::Error for Error {}

impl From<dynfield::Error> for Error {
    fn from(_: dynfield::Error) -> Error {
        Error::InvalidArgument
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
