//! Pure Rust implementation of group operations on the SM2 elliptic curve.
//!
//! Curve parameters can be found in [draft-shen-sm2-ecdsa Appendix D]:
//! Recommended Parameters.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod projective;

pub use self::affine::AffinePoint;

use self::field::Modulus;
use crate::{Error, FieldBytes, Result};
use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use std::sync::LazyLock;

/// p = 0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
const MODULUS: FieldBytes =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF");

/// a = -3 (0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFC)
const EQUATION_A: FieldBytes =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC");

/// b = 0x28E9FA9E 9D9F5E34 4D5A9E4B CF6509A7 F39789F5 15AB8F92 DDBCBD41 4D940E93
const EQUATION_B: FieldBytes =
    hex!("28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93");

/// Base point of SM2.
///
/// ```text
/// Gₓ = 0x32C4AE2C 1F198119 5F990446 6A39C994 8FE30BBF F2660BE1 715A4589 334C74C7
/// Gᵧ = 0xBC3736A2 F4F6779C 59BDCEE3 6B692153 D0A9877C C62A4740 02DF32E5 2139F0A0
/// ```
const GENERATOR: (FieldBytes, FieldBytes) = (
    hex!("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7"),
    hex!("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0"),
);

/// n = 0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123
const ORDER: FieldBytes = hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123");

/// The SM2 group has prime order.
const COFACTOR: u32 = 1;

static SM2: LazyLock<CurveParams> = LazyLock::new(|| CurveParams {
    field: Modulus::from_be_bytes(&MODULUS),
    order: Modulus::from_be_bytes(&ORDER),
    a: BigUint::from_bytes_be(&EQUATION_A),
    b: BigUint::from_bytes_be(&EQUATION_B),
    generator: AffinePoint::new_unchecked(
        BigUint::from_bytes_be(&GENERATOR.0),
        BigUint::from_bytes_be(&GENERATOR.1),
    ),
});

/// Parameters of the SM2 recommended curve `y² = x³ + ax + b` over `GF(p)`.
///
/// A single immutable instance exists for the lifetime of the process and is
/// obtained through [`CurveParams::sm2`].
#[derive(Debug)]
pub struct CurveParams {
    /// Base field modulus `p`.
    field: Modulus,

    /// Order `n` of the base point, i.e. the scalar modulus.
    order: Modulus,

    /// Coefficient `a` in the curve equation.
    a: BigUint,

    /// Coefficient `b` in the curve equation.
    b: BigUint,

    /// Base point `G`.
    generator: AffinePoint,
}

impl CurveParams {
    /// Parameters of the SM2 recommended curve.
    pub fn sm2() -> &'static Self {
        &SM2
    }

    /// Arithmetic modulo the field prime `p`.
    pub fn field(&self) -> &Modulus {
        &self.field
    }

    /// Arithmetic modulo the group order `n`.
    pub fn order(&self) -> &Modulus {
        &self.order
    }

    /// Field prime `p`.
    pub fn p(&self) -> &BigUint {
        self.field.value()
    }

    /// Group order `n`.
    pub fn n(&self) -> &BigUint {
        self.order.value()
    }

    /// Coefficient `a` in the curve equation.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b` in the curve equation.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Cofactor `h`.
    pub fn cofactor(&self) -> u32 {
        COFACTOR
    }

    /// Base point `G`.
    pub fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// Does `(x, y)` satisfy `y² = x³ + ax + b (mod p)`?
    ///
    /// Coordinates must be canonical, i.e. lie in `[0, p)`.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        self.field.contains(x)
            && self.field.contains(y)
            && self.field.mul_mod(y, y) == self.equation_rhs(x)
    }

    /// Evaluate `x³ + ax + b (mod p)`.
    pub(crate) fn equation_rhs(&self, x: &BigUint) -> BigUint {
        let p = &self.field;
        let x3 = p.mul_mod(&p.mul_mod(x, x), x);
        p.add_mod(&x3, &p.add_mod(&p.mul_mod(&self.a, x), &self.b))
    }
}

/// Draw a 256-bit big endian integer from `rng`, keeping it only if it lies in
/// `[1, max]`.
pub(crate) fn random_scalar(
    rng: &mut impl CryptoRngCore,
    max: &BigUint,
) -> Result<Option<BigUint>> {
    let mut bytes = FieldBytes::default();
    rng.try_fill_bytes(&mut bytes)
        .map_err(|_| Error::Randomness)?;

    let candidate = BigUint::from_bytes_be(&bytes);
    Ok((!candidate.is_zero() && &candidate <= max).then_some(candidate))
}

#[cfg(test)]
mod tests {
    use super::CurveParams;
    use num_bigint::BigUint;
    use num_traits::One;

    #[test]
    fn generator_is_on_curve() {
        let curve = CurveParams::sm2();
        let (x, y) = curve.generator().coordinates().unwrap();
        assert!(curve.is_on_curve(x, y));
        assert!(!curve.is_on_curve(x, &(y + BigUint::one())));
    }

    #[test]
    fn non_canonical_coordinates_rejected() {
        let curve = CurveParams::sm2();
        let (x, y) = curve.generator().coordinates().unwrap();
        assert!(!curve.is_on_curve(&(x + curve.p()), y));
        assert!(!curve.is_on_curve(x, &(y + curve.p())));
    }

    #[test]
    fn equation_a_is_minus_three() {
        let curve = CurveParams::sm2();
        assert_eq!(curve.a() + BigUint::from(3u32), *curve.p());
    }

    #[test]
    fn order_is_below_field_modulus() {
        let curve = CurveParams::sm2();
        assert!(curve.n() < curve.p());
        assert_eq!(curve.n().bits(), 256);
        assert_eq!(curve.cofactor(), 1);
    }

    #[test]
    fn shared_across_threads() {
        let curve: &'static CurveParams = CurveParams::sm2();

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| CurveParams::sm2() as *const CurveParams as usize))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), curve as *const CurveParams as usize);
        }
    }
}
