#![no_main]
// Verification must return a result for any key, digest and signature input
// without panicking, and must accept freshly produced signatures.
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};
use sm2dsa::{BigUint, PublicKey, SecretKey, dsa};

fuzz_target!(|data: &[u8]| {
    if data.len() < 160 {
        return;
    }

    let mut rng = ChaChaRng::from_seed(data[0..32].try_into().unwrap());
    let secret_key = SecretKey::from_slice(&data[32..64])
        .unwrap_or_else(|_| SecretKey::random(&mut rng).unwrap());
    let digest = BigUint::from_bytes_be(&data[64..96]);

    // arbitrary signature values, unchecked
    let signature = dsa::Signature::new(
        BigUint::from_bytes_be(&data[96..128]),
        BigUint::from_bytes_be(&data[128..160]),
    );
    let _ = dsa::verify(secret_key.public_key(), &digest, &signature);

    // arbitrary public key encodings
    if let Ok(public_key) = PublicKey::from_sec1_bytes(&data[96..]) {
        assert!(public_key.as_affine().is_on_curve());
        let _ = dsa::verify(&public_key, &digest, &signature);
    }

    let signature = dsa::sign(&mut rng, &secret_key, &digest).unwrap();
    assert!(dsa::verify(secret_key.public_key(), &digest, &signature));
});
