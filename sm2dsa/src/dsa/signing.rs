//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

use super::{Signature, VerifyingKey};
use crate::{
    AffinePoint, CurveParams, Error, FIELD_SIZE, FieldBytes, MAX_ATTEMPTS, SecretKey,
    arithmetic::random_scalar, distid::DistId,
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use signature::{
    KeypairRef, RandomizedSigner, hazmat::RandomizedPrehashSigner, rand_core::CryptoRngCore,
};

/// Sign the integer digest `e` with `secret_key`.
///
/// Steps A3 to A7: nonces are drawn from `rng` and rejected until one yields
/// a valid signature. Fails with [`Error::Randomness`] as soon as `rng` fails,
/// and with [`Error::SignatureGenerationFailed`] after 256 rejected attempts.
pub fn sign(
    rng: &mut impl CryptoRngCore,
    secret_key: &SecretKey,
    digest: &BigUint,
) -> crate::Result<Signature> {
    let curve = CurveParams::sm2();
    let order = curve.order();
    let n = order.value();
    let d = secret_key.as_scalar();

    let d_plus_1_inv = order.inv_mod(&(d + BigUint::one()))?;
    let k_max = n - BigUint::one();

    for _ in 0..MAX_ATTEMPTS {
        // A3: pick a random number k in [1, n-1] via a random number generator
        let Some(k) = random_scalar(rng, &k_max)? else {
            continue;
        };

        // A4: calculate the elliptic curve point (x1, y1)=[k]G
        let point = AffinePoint::generator().mul(&k);
        let Some(x1) = point.x() else {
            continue;
        };

        // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
        let r = order.reduce(&(digest + x1));
        if r.is_zero() || &(&r + &k) == n {
            continue;
        }

        // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
        let s = order.mul_mod(&d_plus_1_inv, &order.sub_mod(&k, &order.mul_mod(&r, d)));
        if s.is_zero() {
            continue;
        }

        // A7: the digital signature of M is (r, s)
        return Ok(Signature::new(r, s));
    }

    Err(Error::SignatureGenerationFailed)
}

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`RandomizedSigner`]: sign a message using this key
/// - [`RandomizedPrehashSigner`]: sign the low-level raw output bytes of a
///   message digest
///
/// Every signature draws a fresh nonce from the supplied random number
/// generator; there is no deterministic signing mode.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key.
    secret_key: SecretKey,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create signing key from a signer's distinguishing identifier and
    /// secret key.
    pub fn new(distid: &DistId, secret_key: &SecretKey) -> crate::Result<Self> {
        let verifying_key = VerifyingKey::new(distid, secret_key.public_key().clone())?;

        Ok(Self {
            secret_key: secret_key.clone(),
            verifying_key,
        })
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(distid: &DistId, bytes: &FieldBytes) -> crate::Result<Self> {
        Self::new(distid, &SecretKey::from_bytes(bytes)?)
    }

    /// Parse signing key from big endian-encoded byte slice containing a secret
    /// scalar value.
    pub fn from_slice(distid: &DistId, slice: &[u8]) -> crate::Result<Self> {
        Self::new(distid, &SecretKey::from_slice(slice)?)
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_key.to_bytes()
    }

    /// Borrow the [`SecretKey`] for this signing key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.verifying_key.distid()
    }
}

//
// `*Signer` trait impls
//

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        if prehash.len() != FIELD_SIZE {
            return Err(signature::Error::new());
        }

        // A2: calculate e=Hv(M~)
        let e = BigUint::from_bytes_be(prehash);
        sign(rng, &self.secret_key, &e).map_err(|_| signature::Error::new())
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        // A1: set M~=ZA || M
        let hash = self.verifying_key.hash_msg(msg);
        self.sign_prehash_with_rng(rng, &hash)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}
