//! Property tests for the byte-level scalar multiplication operations.

use ed25519_scalarmult::{
    CompressedEdwardsY, ED25519_BASEPOINT_COMPRESSED, EdwardsPoint, Error, SMALL_ORDER_ENCODINGS,
    Scalar, clamp_integer, is_valid_point, point_add, point_sub, scalarmult, scalarmult_base,
    scalarmult_base_noclamp, scalarmult_noclamp,
};
use proptest::prelude::*;

const B: [u8; 32] = ED25519_BASEPOINT_COMPRESSED.0;

prop_compose! {
    fn scalar()(lo in any::<[u8; 32]>(), hi in any::<[u8; 32]>()) -> Scalar {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&lo);
        wide[32..].copy_from_slice(&hi);
        Scalar::from_bytes_mod_order_wide(&wide)
    }
}

prop_compose! {
    fn nonzero_bytes()(bytes in any::<[u8; 32]>()
        .prop_filter("scalar must be nonzero", |b| b != &[0u8; 32])) -> [u8; 32] {
        bytes
    }
}

prop_compose! {
    fn point()(s in scalar()) -> [u8; 32] {
        EdwardsPoint::mul_base(&s).compress().to_bytes()
    }
}

proptest! {
    #[test]
    fn base_matches_generic(n in any::<[u8; 32]>()) {
        prop_assert_eq!(scalarmult_base(&n), scalarmult(&n, &B));
        prop_assert_eq!(scalarmult_base_noclamp(&n), scalarmult_noclamp(&n, &B));
    }

    #[test]
    fn clamp_is_idempotent(n in any::<[u8; 32]>()) {
        let once = clamp_integer(n);
        prop_assert_eq!(clamp_integer(once), once);
        prop_assert_eq!(once[0] & 7, 0);
        prop_assert_eq!(once[31] & 0xc0, 0x40);
    }

    #[test]
    fn clamped_ops_clamp_internally(n in nonzero_bytes(), p in point()) {
        prop_assume!(is_valid_point(&p));
        let clamped = clamp_integer(n);
        prop_assert_eq!(scalarmult(&n, &p), scalarmult_noclamp(&clamped, &p));
        prop_assert_eq!(scalarmult_base(&n), scalarmult_base_noclamp(&clamped));
    }

    #[test]
    fn noclamp_ignores_top_bit(n in nonzero_bytes(), p in point()) {
        prop_assume!(is_valid_point(&p));
        let mut flipped = n;
        flipped[31] ^= 0x80;
        prop_assume!(flipped != [0u8; 32]);
        prop_assert_eq!(scalarmult_noclamp(&n, &p), scalarmult_noclamp(&flipped, &p));
        prop_assert_eq!(scalarmult_base_noclamp(&n), scalarmult_base_noclamp(&flipped));
    }

    #[test]
    fn associativity(n in scalar(), m in scalar()) {
        prop_assume!(!bool::from(n.is_zero()) && !bool::from(m.is_zero()));

        let m_b = scalarmult_base_noclamp(&m.to_bytes()).unwrap();
        let n_m_b = scalarmult_noclamp(&n.to_bytes(), &m_b).unwrap();
        let nm_b = scalarmult_base_noclamp(&(n * m).to_bytes()).unwrap();
        prop_assert_eq!(n_m_b, nm_b);
    }

    #[test]
    fn outputs_are_valid_points(n in nonzero_bytes()) {
        let q = scalarmult_base(&n).unwrap();
        prop_assert!(is_valid_point(&q));

        let decoded = CompressedEdwardsY(q).decompress().unwrap();
        prop_assert_eq!(decoded.compress().to_bytes(), q);
    }

    #[test]
    fn small_order_points_are_rejected(n in any::<[u8; 32]>(), index in 0usize..7, sign in any::<bool>()) {
        let mut p = SMALL_ORDER_ENCODINGS[index];
        if sign {
            p[31] |= 0x80;
        }
        prop_assert_eq!(scalarmult(&n, &p), Err(Error::SmallOrderPoint));
        prop_assert_eq!(scalarmult_noclamp(&n, &p), Err(Error::SmallOrderPoint));
    }

    #[test]
    fn add_then_sub(p in point(), q in point()) {
        let sum = point_add(&p, &q).unwrap();
        prop_assert_eq!(point_sub(&sum, &q).unwrap(), p);
    }

    #[test]
    fn from_uniform_lands_in_subgroup(r in any::<[u8; 32]>()) {
        let p = EdwardsPoint::from_uniform(&r);
        prop_assert!(bool::from(p.is_torsion_free()));
        prop_assert!(bool::from(p.is_on_curve()));
    }
}
