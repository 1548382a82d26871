//! Jacobian projective curve points.
//!
//! `(X, Y, Z)` represents the affine point `(X / Z², Y / Z³)`; any point with
//! `Z = 0` is the identity. Used internally so that scalar multiplication
//! needs a single field inversion.

use super::{AffinePoint, CurveParams};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Width in bits of the scalar multiplication window.
const WINDOW_BITS: usize = 4;

/// Number of precomputed multiples `[0]P ... [15]P`.
const WINDOW_SIZE: usize = 1 << WINDOW_BITS;

/// Minimum number of windows processed, covering a full 256-bit scalar.
const MIN_WINDOWS: usize = 256 / WINDOW_BITS;

/// Point on the SM2 curve in Jacobian coordinates.
#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub(crate) fn identity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    /// Is this point the point at infinity?
    pub(crate) fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Returns the affine representation of this point.
    pub(crate) fn to_affine(&self) -> AffinePoint {
        if self.is_identity() {
            return AffinePoint::identity();
        }

        let fp = CurveParams::sm2().field();

        // z is a non-zero residue modulo the prime p
        let Ok(z_inv) = fp.inv_mod(&self.z) else {
            return AffinePoint::identity();
        };

        let z_inv2 = fp.mul_mod(&z_inv, &z_inv);
        let z_inv3 = fp.mul_mod(&z_inv2, &z_inv);
        AffinePoint::new_unchecked(
            fp.mul_mod(&self.x, &z_inv2),
            fp.mul_mod(&self.y, &z_inv3),
        )
    }

    /// Returns `self + self`.
    ///
    /// Implements the `dbl-2007-bl` formulas for short Weierstrass curves
    /// with arbitrary `a`.
    pub(crate) fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        let curve = CurveParams::sm2();
        let fp = curve.field();

        let xx = fp.mul_mod(&self.x, &self.x);
        let yy = fp.mul_mod(&self.y, &self.y);
        let yyyy = fp.mul_mod(&yy, &yy);
        let zz = fp.mul_mod(&self.z, &self.z);

        // S = 4·X·YY
        let s = fp.mul_mod(&BigUint::from(4u32), &fp.mul_mod(&self.x, &yy));

        // M = 3·XX + a·ZZ²
        let m = fp.add_mod(
            &fp.mul_mod(&BigUint::from(3u32), &xx),
            &fp.mul_mod(curve.a(), &fp.mul_mod(&zz, &zz)),
        );

        // X3 = M² - 2·S
        let x3 = fp.sub_mod(&fp.mul_mod(&m, &m), &fp.add_mod(&s, &s));

        // Y3 = M·(S - X3) - 8·YYYY
        let y3 = fp.sub_mod(
            &fp.mul_mod(&m, &fp.sub_mod(&s, &x3)),
            &fp.mul_mod(&BigUint::from(8u32), &yyyy),
        );

        // Z3 = 2·Y·Z
        let yz = fp.mul_mod(&self.y, &self.z);
        let z3 = fp.add_mod(&yz, &yz);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`.
    ///
    /// Implements the `add-1998-cmo-2` formulas, falling back to doubling
    /// when both inputs represent the same point.
    pub(crate) fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }

        if other.is_identity() {
            return self.clone();
        }

        let fp = CurveParams::sm2().field();

        let z1z1 = fp.mul_mod(&self.z, &self.z);
        let z2z2 = fp.mul_mod(&other.z, &other.z);
        let u1 = fp.mul_mod(&self.x, &z2z2);
        let u2 = fp.mul_mod(&other.x, &z1z1);
        let s1 = fp.mul_mod(&self.y, &fp.mul_mod(&other.z, &z2z2));
        let s2 = fp.mul_mod(&other.y, &fp.mul_mod(&self.z, &z1z1));

        let h = fp.sub_mod(&u2, &u1);
        let r = fp.sub_mod(&s2, &s1);

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::identity()
            };
        }

        let hh = fp.mul_mod(&h, &h);
        let hhh = fp.mul_mod(&hh, &h);
        let v = fp.mul_mod(&u1, &hh);

        // X3 = R² - HHH - 2·V
        let x3 = fp.sub_mod(&fp.sub_mod(&fp.mul_mod(&r, &r), &hhh), &fp.add_mod(&v, &v));

        // Y3 = R·(V - X3) - S1·HHH
        let y3 = fp.sub_mod(
            &fp.mul_mod(&r, &fp.sub_mod(&v, &x3)),
            &fp.mul_mod(&s1, &hhh),
        );

        // Z3 = Z1·Z2·H
        let z3 = fp.mul_mod(&fp.mul_mod(&self.z, &other.z), &h);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `[k]self`.
    ///
    /// Left-to-right fixed window method over 4-bit digits of `k`. Every
    /// window costs four doublings and one addition from a table of
    /// `[0]P ... [15]P`, and at least 256 bits of `k` are always processed, so
    /// the sequence of point operations does not depend on the bits of a
    /// 256-bit scalar. The underlying big integer arithmetic is not constant
    /// time.
    pub(crate) fn mul(&self, k: &BigUint) -> Self {
        let mut table = Vec::with_capacity(WINDOW_SIZE);
        table.push(Self::identity());
        table.push(self.clone());

        for i in 2..WINDOW_SIZE {
            let next = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1].add(self)
            };
            table.push(next);
        }

        let k = k.to_bytes_le();
        let windows = (k.len() * 8 / WINDOW_BITS).max(MIN_WINDOWS);

        let mut q = Self::identity();

        for pos in (0..windows).rev() {
            for _ in 0..WINDOW_BITS {
                q = q.double();
            }

            q = q.add(&table[digit(&k, pos)]);
        }

        q
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        match p.coordinates() {
            Some((x, y)) => Self {
                x: x.clone(),
                y: y.clone(),
                z: BigUint::one(),
            },
            None => Self::identity(),
        }
    }
}

/// Get the `pos`-th 4-bit digit of a little endian encoded scalar.
fn digit(k: &[u8], pos: usize) -> usize {
    let byte = k.get(pos / 2).copied().unwrap_or(0);
    usize::from((byte >> ((pos % 2) * WINDOW_BITS)) & 0xf)
}
