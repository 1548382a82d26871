//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::Signature;
use crate::{
    AffinePoint, CurveParams, FIELD_SIZE, PublicKey,
    distid::{DistId, Hash, hash_z},
};
use num_bigint::BigUint;
use num_traits::Zero;
use signature::{Verifier, hazmat::PrehashVerifier};
use sm3::{Digest, Sm3};

/// Check `signature` over the integer digest `e` against `public_key`.
///
/// Steps B1, B2 and B5 to B7. Any malformed or non-matching signature yields
/// `false`; this function never fails or panics.
pub fn verify(public_key: &PublicKey, digest: &BigUint, signature: &Signature) -> bool {
    let order = CurveParams::sm2().order();
    let (r, s) = signature.split_scalars();

    // B1: verify whether r' in [1,n-1], verification failed if not
    // B2: verify whether s' in [1,n-1], verification failed if not
    if !order.contains_nonzero(r) || !order.contains_nonzero(s) {
        return false;
    }

    // B5: calculate t = (r' + s') modn, verification failed if t=0
    let t = order.add_mod(r, s);
    if t.is_zero() {
        return false;
    }

    // B6: calculate the point (x1', y1')=[s']G + [t]PA
    let point = AffinePoint::generator().mul(s) + &public_key.as_affine().mul(&t);
    let Some(x1) = point.x() else {
        return false;
    };

    // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
    order.reduce(&(digest + x1)) == *r
}

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message digest
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: PublicKey,

    /// Signer's user information hash `Z`.
    identity_hash: Hash,

    /// Distinguishing identifier used to compute `Z`.
    distid: String,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from a signer's distinguishing identifier
    /// and public key.
    pub fn new(distid: &DistId, public_key: PublicKey) -> crate::Result<Self> {
        let identity_hash = hash_z(distid, &public_key)?;

        Ok(Self {
            identity_hash,
            public_key,
            distid: distid.into(),
        })
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(distid: &DistId, bytes: &[u8]) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_sec1_bytes(bytes)?)
    }

    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns [`Error::InvalidKey`](crate::Error::InvalidKey) if the given
    /// affine point is the additive identity (a.k.a. point at infinity) or is
    /// not on the curve.
    pub fn from_affine(distid: &DistId, affine: AffinePoint) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_affine(affine)?)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Borrow the [`PublicKey`] for this verifying key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.distid.as_str()
    }

    /// Convert this [`VerifyingKey`] into the
    /// `Elliptic-Curve-Point-to-Octet-String` encoding described in
    /// SEC 1: Elliptic Curve Cryptography (Version 2.0) section 2.3.3
    /// (page 10).
    ///
    /// <http://www.secg.org/sec1-v2.pdf>
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        self.public_key.to_sec1_bytes(compress)
    }

    /// Compute message hash `e` according to [draft-shen-sm2-ecdsa § 5.2.1]
    ///
    /// [draft-shen-sm2-ecdsa § 5.2.1]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.2.1
    pub(crate) fn hash_msg(&self, msg: &[u8]) -> Hash {
        Sm3::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
    }
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        if prehash.len() != FIELD_SIZE {
            return Err(signature::Error::new());
        }

        // B4: calculate e'=Hv(M'~)
        let e = BigUint::from_bytes_be(prehash);

        if verify(&self.public_key, &e, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        // B3: set M'~=ZA || M'
        let hash = self.hash_msg(msg);
        self.verify_prehash(&hash, signature)
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(verifying_key: VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(verifying_key: &VerifyingKey) -> PublicKey {
        verifying_key.public_key.clone()
    }
}
