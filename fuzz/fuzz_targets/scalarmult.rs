#![no_main]
use ciborium::de;
use ed25519_scalarmult::{
    CompressedEdwardsY, ED25519_BASEPOINT_COMPRESSED, EdwardsPoint, Error, is_valid_point,
    point_add, point_sub, scalarmult, scalarmult_base, scalarmult_base_noclamp,
    scalarmult_noclamp,
};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let seed: [u8; 32] = data[0..32].try_into().unwrap();
    let n: [u8; 32] = data[32..64].try_into().unwrap();
    let p: [u8; 32] = data[64..96].try_into().unwrap();

    // Arbitrary encodings must never panic
    let generic = scalarmult(&n, &p);
    let generic_noclamp = scalarmult_noclamp(&n, &p);
    let _ = point_add(&p, &p);
    let _ = point_sub(&p, &p);

    // Both variants validate the point identically
    match (generic, generic_noclamp) {
        (Err(Error::DegenerateResult), _) | (_, Err(Error::DegenerateResult)) => {}
        (Ok(_), Ok(_)) => assert!(is_valid_point(&p)),
        (a, b) => assert_eq!(a.err(), b.err()),
    }

    // Base and generic multiplication agree
    let b = ED25519_BASEPOINT_COMPRESSED.0;
    assert_eq!(scalarmult_base(&n), scalarmult(&n, &b));
    assert_eq!(scalarmult_base_noclamp(&n), scalarmult_noclamp(&n, &b));

    // Any point from the Elligator map is accepted unless it is the identity
    let mut rng = ChaChaRng::from_seed(seed);
    let q = EdwardsPoint::random(&mut rng);
    let q_bytes = q.compress().to_bytes();
    assert_eq!(is_valid_point(&q_bytes), !bool::from(q.is_identity()));

    // Deserialization of arbitrary input
    if let Ok(compressed) = de::from_reader::<CompressedEdwardsY, _>(&data[96..]) {
        let _ = compressed.decompress();
    }
});
