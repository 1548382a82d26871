//! SM2 public keys.

use crate::{AffinePoint, Error, Result};
use num_bigint::BigUint;

/// SM2 public key: a point `Q = [d]G` which is on the curve and is not the
/// identity.
///
/// Every constructor validates the point, so holders of a [`PublicKey`] never
/// need to re-check curve membership.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Convert an [`AffinePoint`] into a [`PublicKey`].
    ///
    /// Returns [`Error::InvalidKey`] if the point is the identity or is not on
    /// the curve.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_identity() || !point.is_on_curve() {
            return Err(Error::InvalidKey);
        }

        Ok(Self { point })
    }

    /// Compute the public key `[d]G` for a secret scalar in `[1, n-1]`.
    pub(crate) fn from_secret_scalar(scalar: &BigUint) -> Self {
        Self {
            point: AffinePoint::generator().mul(scalar),
        }
    }

    /// Decode a public key from the SEC1 `Elliptic-Curve-Point-to-Octet-String`
    /// encoding, either compressed or uncompressed.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        AffinePoint::from_sec1_bytes(bytes)
            .map_err(|_| Error::InvalidKey)
            .and_then(Self::from_affine)
    }

    /// Serialize this public key using the SEC1
    /// `Elliptic-Curve-Point-to-Octet-String` encoding.
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        self.point.to_sec1_bytes(compress)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }
}

impl AsRef<AffinePoint> for PublicKey {
    fn as_ref(&self) -> &AffinePoint {
        &self.point
    }
}

impl From<PublicKey> for AffinePoint {
    fn from(public_key: PublicKey) -> AffinePoint {
        public_key.point
    }
}

impl TryFrom<AffinePoint> for PublicKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_affine(point)
    }
}
