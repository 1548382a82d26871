//! Modular arithmetic over arbitrary-precision integers.
//!
//! The same [`Modulus`] type serves the base field (modulo `p`) and the scalar
//! field (modulo `n`). All operations are variable-time.

use crate::{Error, FIELD_SIZE, FieldBytes, Result};
use core::mem;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Modulus for integer arithmetic, e.g. the SM2 field prime `p` or group
/// order `n`.
///
/// Every operation accepts arbitrary non-negative operands and returns a
/// result reduced into `[0, modulus)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Modulus(BigUint);

impl Modulus {
    /// Create a new modulus. Returns `None` if `value < 2`.
    pub fn new(value: BigUint) -> Option<Self> {
        (value > BigUint::one()).then_some(Self(value))
    }

    /// Decode a modulus known to be at least 2 from big endian bytes.
    pub(crate) fn from_be_bytes(bytes: &FieldBytes) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Borrow the modulus value.
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Is `a` a canonical residue, i.e. `a < modulus`?
    pub fn contains(&self, a: &BigUint) -> bool {
        a < &self.0
    }

    /// Is `a` in `[1, modulus - 1]`?
    pub fn contains_nonzero(&self, a: &BigUint) -> bool {
        !a.is_zero() && self.contains(a)
    }

    /// Compute `a mod m`.
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.0
    }

    /// Compute `a + b mod m`.
    pub fn add_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.0
    }

    /// Compute `a - b mod m`.
    pub fn sub_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let b = self.reduce(b);

        if a >= b { a - b } else { &self.0 - b + a }
    }

    /// Compute `-a mod m`.
    pub fn neg_mod(&self, a: &BigUint) -> BigUint {
        let a = self.reduce(a);

        if a.is_zero() { a } else { &self.0 - a }
    }

    /// Compute `a * b mod m`.
    pub fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.0
    }

    /// Compute `base ^ exp mod m`.
    pub fn pow_mod(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        base.modpow(exp, &self.0)
    }

    /// Compute the multiplicative inverse `a⁻¹ mod m` using the extended
    /// Euclidean algorithm.
    ///
    /// Returns [`Error::NoInverse`] if `a ≡ 0` or `gcd(a, m) ≠ 1`.
    pub fn inv_mod(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(Error::NoInverse);
        }

        let modulus = BigInt::from(self.0.clone());
        let (mut r0, mut r1) = (modulus.clone(), BigInt::from(a));
        let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

        // Invariant: r_i ≡ t_i * a (mod m)
        while !r1.is_zero() {
            let q = &r0 / &r1;
            let r2 = &r0 - &q * &r1;
            let t2 = &t0 - &q * &t1;
            r0 = mem::replace(&mut r1, r2);
            t0 = mem::replace(&mut t1, t2);
        }

        if !r0.is_one() {
            return Err(Error::NoInverse);
        }

        t0.mod_floor(&modulus).to_biguint().ok_or(Error::NoInverse)
    }

    /// Compute a square root of `a`, if one exists.
    ///
    /// Only supported for moduli `m ≡ 3 (mod 4)`, such as the SM2 field prime,
    /// where `a^((m+1)/4)` is a root whenever `a` is a quadratic residue.
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        if &self.0 % BigUint::from(4u32) != BigUint::from(3u32) {
            return None;
        }

        let a = self.reduce(a);
        let exp = (&self.0 + BigUint::one()) >> 2usize;
        let root = self.pow_mod(&a, &exp);

        (self.mul_mod(&root, &root) == a).then_some(root)
    }
}

/// Serialize an integer below `2²⁵⁶` as big endian [`FieldBytes`].
pub(crate) fn to_field_bytes(value: &BigUint) -> FieldBytes {
    let bytes = value.to_bytes_be();
    let len = bytes.len().min(FIELD_SIZE);

    let mut ret = FieldBytes::default();
    ret[FIELD_SIZE - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    ret
}

#[cfg(test)]
mod tests {
    use super::{Modulus, to_field_bytes};
    use crate::{CurveParams, Error};
    use num_bigint::BigUint;
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    fn small(m: u32) -> Modulus {
        Modulus::new(BigUint::from(m)).unwrap()
    }

    fn int(a: u32) -> BigUint {
        BigUint::from(a)
    }

    #[test]
    fn degenerate_modulus_rejected() {
        assert!(Modulus::new(BigUint::zero()).is_none());
        assert!(Modulus::new(BigUint::one()).is_none());
        assert!(Modulus::new(int(2)).is_some());
    }

    #[test]
    fn small_field_operations() {
        let m = small(97);
        assert_eq!(m.add_mod(&int(90), &int(10)), int(3));
        assert_eq!(m.sub_mod(&int(3), &int(10)), int(90));
        assert_eq!(m.sub_mod(&int(10), &int(3)), int(7));
        assert_eq!(m.neg_mod(&int(1)), int(96));
        assert_eq!(m.neg_mod(&int(0)), int(0));
        assert_eq!(m.mul_mod(&int(50), &int(2)), int(3));
        assert_eq!(m.pow_mod(&int(2), &int(10)), int(1024 % 97));
    }

    #[test]
    fn operands_are_reduced() {
        let m = small(97);
        assert_eq!(m.add_mod(&int(1000), &int(1000)), int(2000 % 97));
        assert_eq!(m.sub_mod(&int(97 * 5 + 1), &int(97 * 3 + 2)), int(96));
        assert_eq!(m.reduce(&int(97)), int(0));
        assert_eq!(m.inv_mod(&int(98)).unwrap(), int(1));
    }

    #[test]
    fn inverse_of_zero() {
        let curve = CurveParams::sm2();
        assert_eq!(small(97).inv_mod(&int(0)), Err(Error::NoInverse));
        assert_eq!(curve.field().inv_mod(curve.p()), Err(Error::NoInverse));
        assert_eq!(
            curve.order().inv_mod(&BigUint::zero()),
            Err(Error::NoInverse)
        );
    }

    #[test]
    fn inverse_requires_coprime() {
        let m = small(15);
        assert_eq!(m.inv_mod(&int(5)), Err(Error::NoInverse));
        assert_eq!(m.inv_mod(&int(7)).unwrap(), int(13));
    }

    #[test]
    fn square_roots() {
        let curve = CurveParams::sm2();
        let p = curve.field();
        let root = p.sqrt(&int(4)).unwrap();
        assert!(root == int(2) || root == p.neg_mod(&int(2)));

        // -1 is a non-residue when p ≡ 3 (mod 4)
        assert!(p.sqrt(&p.neg_mod(&BigUint::one())).is_none());

        // unsupported modulus
        assert!(small(17).sqrt(&int(4)).is_none());
    }

    #[test]
    fn field_bytes_padding() {
        let bytes = to_field_bytes(&int(0x0102));
        assert_eq!(&bytes[30..], &[1, 2]);
        assert!(bytes[..30].iter().all(|&b| b == 0));
        assert_eq!(to_field_bytes(&BigUint::zero()), [0u8; 32]);
    }

    proptest! {
        #[test]
        fn inverse_in_both_fields(bytes in any::<[u8; 32]>()) {
            let curve = CurveParams::sm2();
            for modulus in [curve.field(), curve.order()] {
                let a = modulus.reduce(&BigUint::from_bytes_be(&bytes));
                prop_assume!(!a.is_zero());
                let inv = modulus.inv_mod(&a).unwrap();
                prop_assert!(modulus.contains(&inv));
                prop_assert_eq!(modulus.mul_mod(&a, &inv), BigUint::one());
            }
        }

        #[test]
        fn sub_inverts_add(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let n = CurveParams::sm2().order();
            let a = BigUint::from_bytes_be(&a);
            let b = BigUint::from_bytes_be(&b);
            let sum = n.add_mod(&a, &b);
            prop_assert!(n.contains(&sum));
            prop_assert_eq!(n.sub_mod(&sum, &b), n.reduce(&a));
        }
    }
}
