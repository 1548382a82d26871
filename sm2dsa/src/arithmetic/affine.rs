//! Affine curve points.

use super::{CurveParams, field::to_field_bytes, projective::ProjectivePoint};
use crate::{Error, FIELD_SIZE, FieldBytes, Result};
use core::ops::{Add, Mul, Neg};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

/// SEC1 tag of the encoded identity.
const TAG_IDENTITY: u8 = 0x00;

/// SEC1 tag of a compressed point with an even `y`-coordinate.
const TAG_COMPRESSED_EVEN_Y: u8 = 0x02;

/// SEC1 tag of a compressed point with an odd `y`-coordinate.
const TAG_COMPRESSED_ODD_Y: u8 = 0x03;

/// SEC1 tag of an uncompressed point.
const TAG_UNCOMPRESSED: u8 = 0x04;

/// Point on the SM2 curve in affine coordinates.
///
/// Values of this type are always either the identity or a point satisfying
/// the curve equation: the only public constructors validate their input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AffinePoint {
    /// x-coordinate
    pub(crate) x: BigUint,

    /// y-coordinate
    pub(crate) y: BigUint,

    /// Is this point the point at infinity?
    pub(crate) infinity: bool,
}

impl AffinePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::zero(),
            infinity: true,
        }
    }

    /// Base point of the curve.
    pub fn generator() -> Self {
        CurveParams::sm2().generator().clone()
    }

    /// Create a point from affine coordinates, checking that it lies on the
    /// curve.
    pub fn from_coordinates(x: BigUint, y: BigUint) -> Result<Self> {
        if CurveParams::sm2().is_on_curve(&x, &y) {
            Ok(Self::new_unchecked(x, y))
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// Create a finite point from coordinates known to be on the curve.
    pub(crate) fn new_unchecked(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Affine coordinates `(x, y)`, or `None` for the identity.
    pub fn coordinates(&self) -> Option<(&BigUint, &BigUint)> {
        (!self.infinity).then_some((&self.x, &self.y))
    }

    /// Get the x-coordinate, or `None` for the identity.
    pub fn x(&self) -> Option<&BigUint> {
        self.coordinates().map(|(x, _)| x)
    }

    /// Get the y-coordinate, or `None` for the identity.
    pub fn y(&self) -> Option<&BigUint> {
        self.coordinates().map(|(_, y)| y)
    }

    /// Big endian serialized coordinates, or `None` for the identity.
    pub(crate) fn coordinate_bytes(&self) -> Option<(FieldBytes, FieldBytes)> {
        self.coordinates()
            .map(|(x, y)| (to_field_bytes(x), to_field_bytes(y)))
    }

    /// Does this point satisfy the curve equation? The identity does.
    pub fn is_on_curve(&self) -> bool {
        self.infinity || CurveParams::sm2().is_on_curve(&self.x, &self.y)
    }

    /// Returns `self + other`.
    ///
    /// The identity, `self == other` (doubling) and `self == -other` are
    /// handled as distinct cases before the chord rule is applied.
    pub fn add(&self, other: &Self) -> Self {
        if self.infinity {
            return other.clone();
        }

        if other.infinity {
            return self.clone();
        }

        if self.x == other.x {
            return if self.y == other.y {
                self.double()
            } else {
                // other == -self
                Self::identity()
            };
        }

        let fp = CurveParams::sm2().field();
        let dx = fp.sub_mod(&other.x, &self.x);
        let dy = fp.sub_mod(&other.y, &self.y);

        // dx is non-zero, so it is invertible modulo the prime p
        let Ok(dx_inv) = fp.inv_mod(&dx) else {
            return Self::identity();
        };

        let lambda = fp.mul_mod(&dy, &dx_inv);
        let x3 = fp.sub_mod(
            &fp.sub_mod(&fp.mul_mod(&lambda, &lambda), &self.x),
            &other.x,
        );
        let y3 = fp.sub_mod(&fp.mul_mod(&lambda, &fp.sub_mod(&self.x, &x3)), &self.y);
        Self::new_unchecked(x3, y3)
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        // Points of order two double to the identity
        if self.infinity || self.y.is_zero() {
            return Self::identity();
        }

        let curve = CurveParams::sm2();
        let fp = curve.field();

        let xx = fp.mul_mod(&self.x, &self.x);
        let numerator = fp.add_mod(&fp.mul_mod(&BigUint::from(3u32), &xx), curve.a());
        let Ok(denominator_inv) = fp.inv_mod(&fp.add_mod(&self.y, &self.y)) else {
            return Self::identity();
        };

        let lambda = fp.mul_mod(&numerator, &denominator_inv);
        let x3 = fp.sub_mod(&fp.mul_mod(&lambda, &lambda), &fp.add_mod(&self.x, &self.x));
        let y3 = fp.sub_mod(&fp.mul_mod(&lambda, &fp.sub_mod(&self.x, &x3)), &self.y);
        Self::new_unchecked(x3, y3)
    }

    /// Returns `[k]self` for any non-negative `k`.
    ///
    /// `k` is not reduced modulo the group order. Evaluated in Jacobian
    /// coordinates with a fixed 4-bit window, which keeps the sequence of
    /// point operations independent of the bits of `k` but is not constant
    /// time.
    pub fn mul(&self, k: &BigUint) -> Self {
        ProjectivePoint::from(self).mul(k).to_affine()
    }

    /// Decode a point from its SEC1 `Elliptic-Curve-Point-to-Octet-String`
    /// encoding: `00` (identity), `02/03 ‖ X` (compressed) or `04 ‖ X ‖ Y`.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.split_first() {
            Some((&TAG_IDENTITY, [])) => Ok(Self::identity()),
            Some((&TAG_UNCOMPRESSED, coordinates)) if coordinates.len() == 2 * FIELD_SIZE => {
                let (x, y) = coordinates.split_at(FIELD_SIZE);
                Self::from_coordinates(BigUint::from_bytes_be(x), BigUint::from_bytes_be(y))
            }
            Some((&tag, x))
                if (tag == TAG_COMPRESSED_EVEN_Y || tag == TAG_COMPRESSED_ODD_Y)
                    && x.len() == FIELD_SIZE =>
            {
                Self::decompress(BigUint::from_bytes_be(x), tag == TAG_COMPRESSED_ODD_Y)
            }
            _ => Err(Error::InvalidPoint),
        }
    }

    /// Recover the point with the given x-coordinate and y-parity.
    fn decompress(x: BigUint, y_is_odd: bool) -> Result<Self> {
        let curve = CurveParams::sm2();
        let fp = curve.field();

        if !fp.contains(&x) {
            return Err(Error::InvalidPoint);
        }

        let y = fp.sqrt(&curve.equation_rhs(&x)).ok_or(Error::InvalidPoint)?;

        let y = if y.is_odd() == y_is_odd {
            y
        } else {
            fp.neg_mod(&y)
        };

        // y = 0 has no odd representative
        Self::from_coordinates(x, y).and_then(|point| {
            if point.y.is_odd() == y_is_odd {
                Ok(point)
            } else {
                Err(Error::InvalidPoint)
            }
        })
    }

    /// Encode this point using the SEC1 `Elliptic-Curve-Point-to-Octet-String`
    /// encoding, optionally compressed.
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        let Some((x, y)) = self.coordinate_bytes() else {
            return vec![TAG_IDENTITY];
        };

        let mut bytes = Vec::with_capacity(1 + 2 * FIELD_SIZE);

        if compress {
            bytes.push(if self.y.is_odd() {
                TAG_COMPRESSED_ODD_Y
            } else {
                TAG_COMPRESSED_EVEN_Y
            });
            bytes.extend_from_slice(&x);
        } else {
            bytes.push(TAG_UNCOMPRESSED);
            bytes.extend_from_slice(&x);
            bytes.extend_from_slice(&y);
        }

        bytes
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::identity()
    }
}

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(self, other)
    }
}

impl Add<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, other)
    }
}

impl Mul<&BigUint> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, k: &BigUint) -> AffinePoint {
        AffinePoint::mul(self, k)
    }
}

impl Mul<&BigUint> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, k: &BigUint) -> AffinePoint {
        AffinePoint::mul(&self, k)
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        if self.infinity {
            return AffinePoint::identity();
        }

        let fp = CurveParams::sm2().field();
        AffinePoint::new_unchecked(self.x.clone(), fp.neg_mod(&self.y))
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}
