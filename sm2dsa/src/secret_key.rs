//! SM2 secret keys.

use crate::{
    CurveParams, Error, FIELD_SIZE, FieldBytes, MAX_ATTEMPTS, PublicKey, Result,
    arithmetic::{field::to_field_bytes, random_scalar},
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;

/// SM2 secret key: a scalar `d` in `[1, n-2]` together with its public key
/// `Q = [d]G`.
///
/// The value `n-1` is excluded because signing computes `(1 + d)⁻¹ mod n`.
#[derive(Clone)]
pub struct SecretKey {
    /// Secret scalar `d`.
    scalar: BigUint,

    /// Public key `[d]G`.
    public_key: PublicKey,
}

impl SecretKey {
    /// Generate a random [`SecretKey`].
    ///
    /// Draws 256-bit candidates from `rng` until one lies in `[1, n-2]`.
    /// Returns [`Error::Randomness`] if `rng` fails, or if it keeps producing
    /// out-of-range values, which only a broken generator does.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let max = Self::max_scalar();

        for _ in 0..MAX_ATTEMPTS {
            if let Some(scalar) = random_scalar(rng, &max)? {
                return Ok(Self::from_valid_scalar(scalar));
            }
        }

        Err(Error::Randomness)
    }

    /// Create a [`SecretKey`] from a scalar value.
    ///
    /// Returns [`Error::InvalidKey`] unless `1 ≤ scalar ≤ n-2`.
    pub fn from_scalar(scalar: BigUint) -> Result<Self> {
        if scalar < BigUint::one() || scalar > Self::max_scalar() {
            return Err(Error::InvalidKey);
        }

        Ok(Self::from_valid_scalar(scalar))
    }

    /// Deserialize a [`SecretKey`] from big endian bytes.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::from_scalar(BigUint::from_bytes_be(bytes))
    }

    /// Deserialize a [`SecretKey`] from a big endian byte slice, which must be
    /// exactly 32 bytes long.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != FIELD_SIZE {
            return Err(Error::InvalidKey);
        }

        Self::from_scalar(BigUint::from_bytes_be(slice))
    }

    /// Serialize the secret scalar as big endian bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        to_field_bytes(&self.scalar)
    }

    /// Borrow the secret scalar `d`.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &BigUint {
        &self.scalar
    }

    /// Get the [`PublicKey`] which corresponds to this secret key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Largest valid secret scalar, `n-2`.
    fn max_scalar() -> BigUint {
        CurveParams::sm2().n() - BigUint::from(2u32)
    }

    fn from_valid_scalar(scalar: BigUint) -> Self {
        let public_key = PublicKey::from_secret_scalar(&scalar);
        Self { scalar, public_key }
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Self::from_slice(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::SecretKey;
    use crate::{AffinePoint, CurveParams, Error};
    use num_bigint::BigUint;
    use num_traits::{One, Zero};

    #[test]
    fn scalar_range() {
        let n = CurveParams::sm2().n();

        assert_eq!(
            SecretKey::from_scalar(BigUint::zero()).unwrap_err(),
            Error::InvalidKey
        );
        assert_eq!(
            SecretKey::from_scalar(n - BigUint::one()).unwrap_err(),
            Error::InvalidKey
        );
        assert_eq!(
            SecretKey::from_scalar(n.clone()).unwrap_err(),
            Error::InvalidKey
        );
        assert!(SecretKey::from_scalar(n - BigUint::from(2u32)).is_ok());
    }

    #[test]
    fn public_key_derivation() {
        let one = SecretKey::from_scalar(BigUint::one()).unwrap();
        assert_eq!(*one.public_key().as_affine(), AffinePoint::generator());

        // [n-2]G = -[2]G
        let max = SecretKey::from_scalar(CurveParams::sm2().n() - BigUint::from(2u32)).unwrap();
        assert_eq!(
            *max.public_key().as_affine(),
            -AffinePoint::generator().double()
        );
    }

    #[test]
    fn bytes_round_trip() {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;

        let secret_key = SecretKey::from_bytes(&bytes).unwrap();
        assert_eq!(secret_key.to_bytes(), bytes);
        assert_eq!(secret_key.as_scalar(), &BigUint::from(7u32));
        assert_eq!(
            SecretKey::from_slice(&bytes).unwrap().public_key(),
            secret_key.public_key()
        );
    }

    #[test]
    fn slice_length_checked() {
        assert_eq!(
            SecretKey::from_slice(&[1u8; 31]).unwrap_err(),
            Error::InvalidKey
        );
        assert_eq!(
            SecretKey::from_slice(&[1u8; 33]).unwrap_err(),
            Error::InvalidKey
        );
        assert_eq!(
            SecretKey::from_bytes(&[0xff; 32]).unwrap_err(),
            Error::InvalidKey
        );
    }

    #[test]
    fn debug_omits_scalar() {
        let secret_key = SecretKey::from_scalar(BigUint::from(0x1234_5678u32)).unwrap();
        let debug = format!("{secret_key:?}");
        assert!(debug.starts_with("SecretKey"));
        assert!(!debug.contains("scalar"));
    }
}
