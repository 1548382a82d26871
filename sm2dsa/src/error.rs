//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The random number generator failed to produce output.
    Randomness,

    /// Private scalar outside of `[1, n-2]`, or public point which is the
    /// identity, not on the curve, or malformed.
    InvalidKey,

    /// Affine coordinates which do not satisfy the curve equation.
    InvalidPoint,

    /// Distinguishing identifier too long to encode its bit length in 16 bits.
    InvalidDistId,

    /// Signing did not produce a valid signature within the attempt bound.
    SignatureGenerationFailed,

    /// Signature bytes are malformed or `r`/`s` are outside of `[1, n-1]`.
    InvalidSignatureEncoding,

    /// Element has no multiplicative inverse for the given modulus.
    NoInverse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::Randomness => "random number generator failure",
            Error::InvalidKey => "invalid key",
            Error::InvalidPoint => "point is not on the curve",
            Error::InvalidDistId => "distinguishing identifier is too long",
            Error::SignatureGenerationFailed => "signature generation failed",
            Error::InvalidSignatureEncoding => "invalid signature encoding",
            Error::NoInverse => "element is not invertible",
        })
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
