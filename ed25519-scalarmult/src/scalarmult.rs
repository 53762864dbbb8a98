//! The byte-level operations: clamped and unclamped scalar multiplication of
//! an arbitrary point or the basepoint, plus point addition, subtraction and
//! validation on compressed encodings.

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::{CompressedEdwardsY, EdwardsPoint, Error, Scalar};

/// Clamps a 32-byte scalar the way X25519 and Ed25519 do: clear the three
/// low bits, clear bit 255 and set bit 254.
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    bytes
}

/// Decodes a point that will be multiplied by a secret scalar.
///
/// Rejects, in this order: blocklisted small-order encodings, non-canonical
/// or off-curve encodings, any other point of small order, and points whose
/// torsion component has order 4 or 8. A torsion component of order 2 is
/// accepted, as libsodium accepts it.
fn decode_point(p: &[u8; 32]) -> Result<EdwardsPoint, Error> {
    let compressed = CompressedEdwardsY(*p);
    if bool::from(compressed.is_small_order_encoding()) {
        return Err(Error::SmallOrderPoint);
    }

    let point = compressed
        .decompress_unchecked()
        .into_option()
        .ok_or(Error::InvalidPointEncoding)?
        .to_edwards();

    if bool::from(point.is_small_order()) {
        return Err(Error::SmallOrderPoint);
    }
    if !bool::from(point.is_in_main_subgroup()) {
        return Err(Error::TorsionComponent);
    }
    Ok(point)
}

/// Decodes any canonical curve point, small order included
fn decode_point_unchecked(p: &[u8; 32]) -> Result<EdwardsPoint, Error> {
    CompressedEdwardsY(*p)
        .decompress_unchecked()
        .into_option()
        .map(|point| point.to_edwards())
        .ok_or(Error::InvalidPointEncoding)
}

fn is_zero_scalar(n: &[u8; 32]) -> Choice {
    n[..].ct_eq(&[0u8; 32][..])
}

/// Compresses the result unless it is the identity or the caller's scalar was zero
fn finish(q: EdwardsPoint, n: &[u8; 32]) -> Result<[u8; 32], Error> {
    let degenerate = q.is_identity() | is_zero_scalar(n);
    if bool::from(degenerate) {
        return Err(Error::DegenerateResult);
    }
    Ok(q.compress().to_bytes())
}

fn scalarmult_inner(n: &[u8; 32], p: &[u8; 32], clamp: bool) -> Result<[u8; 32], Error> {
    let point = decode_point(p)?;

    let mut t = Zeroizing::new(*n);
    if clamp {
        *t = clamp_integer(*t);
    } else {
        t[31] &= 127;
    }

    let q = crate::edwards::mul::variable_base(&point, &t);
    finish(q, n)
}

fn scalarmult_base_inner(n: &[u8; 32], clamp: bool) -> Result<[u8; 32], Error> {
    let mut t = Zeroizing::new(*n);
    if clamp {
        *t = clamp_integer(*t);
    } else {
        t[31] &= 127;
    }

    // The generator has prime order, so reducing first is exact
    let s = Zeroizing::new(Scalar::from_bytes_mod_order(&t));
    let q = EdwardsPoint::mul_base(&s);
    finish(q, n)
}

/// Multiplies the point `p` by the clamped scalar `n`.
///
/// Fails if `p` is not a valid point encoding (see [`is_valid_point`]), if
/// `n` is all zeros, or if the result is the identity.
pub fn scalarmult(n: &[u8; 32], p: &[u8; 32]) -> Result<[u8; 32], Error> {
    scalarmult_inner(n, p, true)
}

/// Multiplies the point `p` by `n` taken as-is, apart from bit 255 which is
/// ignored.
///
/// Fails under the same conditions as [`scalarmult`]. Since `n` is not
/// clamped, a multiple of ℓ yields the identity and is rejected too.
pub fn scalarmult_noclamp(n: &[u8; 32], p: &[u8; 32]) -> Result<[u8; 32], Error> {
    scalarmult_inner(n, p, false)
}

/// Multiplies the Ed25519 basepoint by the clamped scalar `n`.
pub fn scalarmult_base(n: &[u8; 32]) -> Result<[u8; 32], Error> {
    scalarmult_base_inner(n, true)
}

/// Multiplies the Ed25519 basepoint by `n` with bit 255 ignored.
pub fn scalarmult_base_noclamp(n: &[u8; 32]) -> Result<[u8; 32], Error> {
    scalarmult_base_inner(n, false)
}

/// Adds two points. Points of small order are accepted.
pub fn point_add(p: &[u8; 32], q: &[u8; 32]) -> Result<[u8; 32], Error> {
    let p = decode_point_unchecked(p)?;
    let q = decode_point_unchecked(q)?;
    Ok((p + q).compress().to_bytes())
}

/// Computes `p - q`. Points of small order are accepted.
pub fn point_sub(p: &[u8; 32], q: &[u8; 32]) -> Result<[u8; 32], Error> {
    let p = decode_point_unchecked(p)?;
    let q = decode_point_unchecked(q)?;
    Ok((p - q).compress().to_bytes())
}

/// Is `p` the canonical encoding of a point of large order whose `ℓ`-multiple
/// has x = 0?
///
/// That is the prime-order subgroup minus the identity, together with the
/// same points shifted by the order-2 point (0, -1).
pub fn is_valid_point(p: &[u8; 32]) -> bool {
    decode_point(p).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ED25519_BASEPOINT_COMPRESSED, SMALL_ORDER_ENCODINGS};
    use hex_literal::hex;

    const N: [u8; 32] = hex!("cdee1a6a0b402d9897cfdbe50d77efaf3ceb5b9abc40a7ce7e7356691432a5fc");
    const M: [u8; 32] = hex!("9102de2a40593a7cd57f8076eb5637dd8e017b9f0a402bf5e4299303bafc4535");
    // base(M)
    const P: [u8; 32] = hex!("c9e3abff43096a358d0a004763c2aeecf424e030910e3f79e4fdea749cb5dd32");
    const L: [u8; 32] = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");
    const B: [u8; 32] = ED25519_BASEPOINT_COMPRESSED.0;

    #[test]
    fn test_clamp() {
        let clamped = clamp_integer([0xff; 32]);
        assert_eq!(clamped[0], 0xf8);
        assert_eq!(clamped[31], 0x7f);
        assert_eq!(clamp_integer(clamped), clamped);

        let clamped = clamp_integer([0u8; 32]);
        assert_eq!(clamped[31], 0x40);
    }

    #[test]
    fn test_rfc8032_public_key() {
        // clamped half of SHA-512 of the first RFC 8032 test secret
        let h = hex!("357c83864f2833cb427a2ef1c00a013cfdff2768d980c0a3a520f006904de90f");
        assert_eq!(
            scalarmult_base(&h).unwrap(),
            hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
        );
    }

    #[test]
    fn test_known_answers() {
        assert_eq!(scalarmult_base(&M).unwrap(), P);
        assert_eq!(
            scalarmult(&N, &P).unwrap(),
            hex!("c7ff2267c6c9cf7f9ceff1b2d7321117655f4e5e57af4a35952e2d5a6fd3b53b")
        );
        assert_eq!(
            scalarmult_noclamp(&N, &P).unwrap(),
            hex!("0978a8312706fba68a748e8f08459d0ab1b3e5774da97743514c99193127b57b")
        );
        assert_eq!(
            scalarmult_base(&N).unwrap(),
            hex!("5d5238fdef44b99dab37c4c0f5bfd7cc27fcb105c8e8ba0e48e5099531031fa0")
        );
        assert_eq!(
            scalarmult_base_noclamp(&N).unwrap(),
            hex!("b533be7167bb303c98b24db0c0ef8cc57520289680ef01d4c7e737b5dd6e3063")
        );
    }

    #[test]
    fn test_all_ones_noclamp() {
        // bit 255 is dropped, so this is 2^255 - 1
        let n = [0xff; 32];
        assert_eq!(
            scalarmult_base_noclamp(&n).unwrap(),
            hex!("af9b6a948d400c38197f1d0675ec3d6630780c67ad4dfc7e5fe6e6a39cc90fd3")
        );
        assert_eq!(
            scalarmult_noclamp(&n, &P).unwrap(),
            hex!("257044cb95904c727f9babdd3bbca77007f8abf5456623ff65d9d9bfb1976f16")
        );

        let mut cleared = n;
        cleared[31] = 0x7f;
        assert_eq!(
            scalarmult_noclamp(&cleared, &P).unwrap(),
            scalarmult_noclamp(&n, &P).unwrap()
        );
    }

    #[test]
    fn test_base_matches_generic() {
        assert_eq!(scalarmult(&N, &B).unwrap(), scalarmult_base(&N).unwrap());
        assert_eq!(
            scalarmult_noclamp(&N, &B).unwrap(),
            scalarmult_base_noclamp(&N).unwrap()
        );
    }

    #[test]
    fn test_noclamp_one() {
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(scalarmult_noclamp(&one, &P).unwrap(), P);
        assert_eq!(scalarmult_base_noclamp(&one).unwrap(), B);
    }

    #[test]
    fn test_associativity() {
        let n = Scalar::from_bytes_mod_order(&N);
        let m = Scalar::from_bytes_mod_order(&M);
        let nm = n * m;

        let expected = hex!("043f8cbcc25a4e02b4f48d7ef6968a4c1e593a0161ac8346852f248da7171bf6");
        let mp = scalarmult_noclamp(&m.to_bytes(), &P).unwrap();
        assert_eq!(scalarmult_noclamp(&n.to_bytes(), &mp).unwrap(), expected);
        assert_eq!(scalarmult_noclamp(&nm.to_bytes(), &P).unwrap(), expected);
    }

    #[test]
    fn test_degenerate_results() {
        let zero = [0u8; 32];
        assert_eq!(scalarmult_base(&zero), Err(Error::DegenerateResult));
        assert_eq!(scalarmult_base_noclamp(&zero), Err(Error::DegenerateResult));
        assert_eq!(scalarmult(&zero, &P), Err(Error::DegenerateResult));
        assert_eq!(scalarmult_noclamp(&zero, &P), Err(Error::DegenerateResult));

        assert_eq!(scalarmult_base_noclamp(&L), Err(Error::DegenerateResult));
        assert_eq!(scalarmult_noclamp(&L, &P), Err(Error::DegenerateResult));
    }

    #[test]
    fn test_small_order_rejected() {
        for encoding in SMALL_ORDER_ENCODINGS.iter() {
            assert_eq!(scalarmult(&N, encoding), Err(Error::SmallOrderPoint));
            assert_eq!(scalarmult_noclamp(&N, encoding), Err(Error::SmallOrderPoint));

            let mut negated = *encoding;
            negated[31] |= 0x80;
            assert_eq!(scalarmult(&N, &negated), Err(Error::SmallOrderPoint));
            assert!(!is_valid_point(encoding));
        }
    }

    #[test]
    fn test_invalid_encodings() {
        // y = p + 2
        let non_canonical = hex!("efffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(
            scalarmult(&N, &non_canonical),
            Err(Error::InvalidPointEncoding)
        );

        // y = 2 is not on the curve
        let off_curve = hex!("0200000000000000000000000000000000000000000000000000000000000000");
        assert_eq!(scalarmult(&N, &off_curve), Err(Error::InvalidPointEncoding));
        assert_eq!(point_add(&off_curve, &B), Err(Error::InvalidPointEncoding));
        assert!(!is_valid_point(&off_curve));
    }

    #[test]
    fn test_torsion_component_rejected() {
        // B + T8
        let mixed = hex!("da99e28ba529cdde35a25fba9059e78ecaee239f99755b9b1aa4f65df00803e2");
        assert_eq!(scalarmult(&N, &mixed), Err(Error::TorsionComponent));
        assert_eq!(scalarmult_noclamp(&N, &mixed), Err(Error::TorsionComponent));
        assert!(!is_valid_point(&mixed));
    }

    #[test]
    fn test_order_two_component_accepted() {
        // y = 9: a prime-order point plus (0, -1)
        let y9 = hex!("0900000000000000000000000000000000000000000000000000000000000000");
        let t2 = SMALL_ORDER_ENCODINGS[4];
        assert!(is_valid_point(&y9));

        let q = point_add(&y9, &t2).unwrap();
        assert!(is_valid_point(&q));

        // a clamped scalar is a multiple of 8 and kills the order-2 part
        assert_eq!(scalarmult(&N, &y9).unwrap(), scalarmult(&N, &q).unwrap());

        // N is odd, so the order-2 part survives an unclamped multiplication
        let nq = scalarmult_noclamp(&N, &q).unwrap();
        assert_eq!(
            scalarmult_noclamp(&N, &y9).unwrap(),
            point_add(&nq, &t2).unwrap()
        );
    }

    #[test]
    fn test_is_valid_point() {
        assert!(is_valid_point(&B));
        assert!(is_valid_point(&P));
        assert!(!is_valid_point(&CompressedEdwardsY::IDENTITY.0));
    }

    #[test]
    fn test_point_add_sub() {
        let t8 = SMALL_ORDER_ENCODINGS[2];

        assert_eq!(
            point_add(&P, &B).unwrap(),
            hex!("0a31dc47ee40ab95d5adad8a60e71c9e49a8df019494c7378bd0fd51870cda66")
        );
        assert_eq!(
            point_sub(&P, &B).unwrap(),
            hex!("17e24b1fe97ab245d56a16d92f07b9b24383447dbc9b519f98aa0ed87b8b6b08")
        );
        assert_eq!(
            point_add(&P, &t8).unwrap(),
            hex!("2c1f2fccf7662c850a731f735e2d60ddffc47b36749ec1d40efc1b6fc01d37b7")
        );
        assert_eq!(point_add(&P, &CompressedEdwardsY::IDENTITY.0).unwrap(), P);
        assert_eq!(point_sub(&P, &P).unwrap(), CompressedEdwardsY::IDENTITY.0);

        let sum = point_add(&P, &B).unwrap();
        assert_eq!(point_sub(&sum, &B).unwrap(), P);
    }

    #[test]
    fn test_distinct_from_identity() {
        // valid inputs and nonzero scalars never produce the identity encoding
        let out = scalarmult(&M, &P).unwrap();
        assert_ne!(out, CompressedEdwardsY::IDENTITY.0);
        assert!(is_valid_point(&out));
    }
}
