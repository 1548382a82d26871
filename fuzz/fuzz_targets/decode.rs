#![no_main]
// Decoders must reject malformed input cleanly, and anything they accept
// must re-encode to an equivalent value.
use libfuzzer_sys::fuzz_target;
use sm2dsa::{AffinePoint, PublicKey, dsa::Signature};

fuzz_target!(|data: &[u8]| {
    if let Ok(signature) = Signature::from_der(data) {
        let der = signature.to_der().unwrap();
        assert_eq!(Signature::from_der(&der).unwrap(), signature);
    }

    if let Ok(signature) = Signature::from_slice(data) {
        assert_eq!(signature.to_bytes().as_slice(), data);
    }

    if let Ok(point) = AffinePoint::from_sec1_bytes(data) {
        assert!(point.is_on_curve());
        let compress = data.len() == 33;
        assert_eq!(point.to_sec1_bytes(compress), data);
    }

    if let Ok(public_key) = PublicKey::from_sec1_bytes(data) {
        assert!(!public_key.as_affine().is_identity());
    }
});
