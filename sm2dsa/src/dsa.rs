//! SM2 Digital Signature Algorithm (SM2DSA) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! Signing and verifying integer digests `e`, which the caller derives from a
//! message hash:
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use rand_core::OsRng; // requires 'getrandom' feature
//! use sm2dsa::{BigUint, SecretKey, dsa};
//!
//! let secret_key = SecretKey::random(&mut OsRng)?;
//! let digest = BigUint::from_bytes_be(&[0x42; 32]);
//!
//! let signature = dsa::sign(&mut OsRng, &secret_key, &digest)?;
//! assert!(dsa::verify(secret_key.public_key(), &digest, &signature));
//! # Ok(())
//! # }
//! ```
//!
//! Signing messages bound to a distinguishing identifier, using the
//! [`signature`] crate traits:
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use rand_core::OsRng; // requires 'getrandom' feature
//! use sm2dsa::{
//!     dsa::{Signature, SigningKey, signature::RandomizedSigner},
//!     SecretKey,
//! };
//!
//! // Signing
//! let secret_key = SecretKey::random(&mut OsRng)?;
//! let distid = "example@rustcrypto.org"; // distinguishing identifier
//! let signing_key = SigningKey::new(distid, &secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes(false);
//! let message = b"test message";
//! let signature: Signature = signing_key.sign_with_rng(&mut OsRng, message);
//!
//! // Verifying
//! use sm2dsa::dsa::{VerifyingKey, signature::Verifier};
//!
//! let verifying_key = VerifyingKey::from_sec1_bytes(distid, &verifying_key_bytes)?;
//! assert!(verifying_key.verify(message, &signature).is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

#[cfg(feature = "der")]
mod der;
mod signing;
mod verifying;

pub use signature;

pub use self::{
    signing::{SigningKey, sign},
    verifying::{VerifyingKey, verify},
};

use crate::{CurveParams, Error, FIELD_SIZE, FieldBytes, Result, arithmetic::field::to_field_bytes};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use signature::SignatureEncoding;

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// A [`Signature`] may carry arbitrary integers so that it can represent
/// untrusted input; [`verify`] re-checks that `r` and `s` lie in `[1, n-1]`.
/// Signatures produced by [`sign`] and the checked decoders always do.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 2 * FIELD_SIZE;

    /// Create a [`Signature`] from `r` and `s` without checking their range.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Create a [`Signature`] from the `r` and `s` scalar values which
    /// comprise the signature.
    ///
    /// Returns [`Error::InvalidSignatureEncoding`] unless both lie in
    /// `[1, n-1]`.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Result<Self> {
        let n = CurveParams::sm2().order();

        if !n.contains_nonzero(&r) || !n.contains_nonzero(&s) {
            return Err(Error::InvalidSignatureEncoding);
        }

        Ok(Self { r, s })
    }

    /// Parse an SM2DSA signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(FIELD_SIZE);
        Self::from_scalars(
            BigUint::from_bytes_be(r_bytes),
            BigUint::from_bytes_be(s_bytes),
        )
    }

    /// Parse an SM2DSA signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map_err(|_| Error::InvalidSignatureEncoding)
            .and_then(|bytes| Self::from_bytes(&bytes))
    }

    /// Serialize this signature as bytes.
    ///
    /// `r` and `s` are written as 32-byte big endian integers; bits above the
    /// 256th are dropped, which can only affect unchecked signatures.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(FIELD_SIZE);
        r_bytes.copy_from_slice(&self.r_bytes());
        s_bytes.copy_from_slice(&self.s_bytes());
        ret
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> FieldBytes {
        to_field_bytes(&self.r)
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> FieldBytes {
        to_field_bytes(&self.s)
    }

    /// Split the signature into its `r` and `s` scalars.
    pub fn split_scalars(&self) -> (&BigUint, &BigUint) {
        (&self.r, &self.s)
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sm2dsa::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(&signature)
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: &SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}
