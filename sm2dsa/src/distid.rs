//! Distinguished identifier support.

use crate::{CurveParams, Error, PublicKey, Result, arithmetic::field::to_field_bytes};
use sm3::{Digest, Sm3};

/// Type which represents distinguishing identifiers.
pub(crate) type DistId = str;

/// SM3 digest output.
pub(crate) type Hash = sm3::digest::Output<Sm3>;

/// Compute user information hash `Z` according to [draft-shen-sm2-ecdsa § 5.1.4.4].
///
/// ```text
/// ZA=H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// `ENTLA` is the bit length of the identifier as a 2-byte big endian
/// integer, so identifiers longer than 8191 bytes are rejected.
///
/// [draft-shen-sm2-ecdsa § 5.1.4.4]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.1.4.4
pub(crate) fn hash_z(distid: &DistId, public_key: &PublicKey) -> Result<Hash> {
    let entla: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|l| l.try_into().ok())
        .ok_or(Error::InvalidDistId)?;

    let curve = CurveParams::sm2();
    let (gx, gy) = curve
        .generator()
        .coordinate_bytes()
        .ok_or(Error::InvalidKey)?;
    let (qx, qy) = public_key
        .as_affine()
        .coordinate_bytes()
        .ok_or(Error::InvalidKey)?;

    let mut sm3 = Sm3::new();
    sm3.update(entla.to_be_bytes());
    sm3.update(distid);
    sm3.update(to_field_bytes(curve.a()));
    sm3.update(to_field_bytes(curve.b()));
    sm3.update(gx);
    sm3.update(gy);
    sm3.update(qx);
    sm3.update(qy);
    Ok(sm3.finalize())
}

#[cfg(test)]
mod tests {
    use super::hash_z;
    use crate::{AffinePoint, Error, PublicKey};

    fn public_key() -> PublicKey {
        PublicKey::from_affine(AffinePoint::generator()).unwrap()
    }

    #[test]
    fn identifier_length_limit() {
        let public_key = public_key();

        assert!(hash_z(&"a".repeat(8191), &public_key).is_ok());
        assert_eq!(
            hash_z(&"a".repeat(8192), &public_key),
            Err(Error::InvalidDistId)
        );
    }

    #[test]
    fn hash_binds_identifier_and_key() {
        let public_key = public_key();
        let other_key = PublicKey::from_affine(AffinePoint::generator().double()).unwrap();

        let z = hash_z("alice", &public_key).unwrap();
        assert_eq!(z, hash_z("alice", &public_key).unwrap());
        assert_ne!(z, hash_z("bob", &public_key).unwrap());
        assert_ne!(z, hash_z("alice", &other_key).unwrap());
        assert!(hash_z("", &public_key).is_ok());
    }
}
