use super::{extended::EdwardsPoint, extensible::ExtensiblePoint, niels::AffineNielsPoint};
use crate::field::{Scalar, to_radix_16};
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// `[P, 2P, ..., 8P]` in affine niels form
#[derive(Clone, Copy, Debug)]
pub(crate) struct LookupTable(pub(crate) [AffineNielsPoint; 8]);

impl LookupTable {
    /// Returns `x * P` for `x` in `[-8, 8]`, in constant time
    pub(crate) fn select(&self, x: i8) -> AffineNielsPoint {
        let xmask = x >> 7;
        let xabs = ((x + xmask) ^ xmask) as u8;

        let mut t = AffineNielsPoint::IDENTITY;
        for j in 1..9 {
            let c = xabs.ct_eq(&(j as u8));
            t.conditional_assign(&self.0[j - 1], c);
        }

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);
        t
    }
}

/// Comb table for the fixed generator: row `i` holds
/// `[16^(2i) B, 2 * 16^(2i) B, ..., 8 * 16^(2i) B]`.
#[derive(Clone, Debug)]
pub(crate) struct BasepointTable(pub(crate) [LookupTable; 32]);

impl BasepointTable {
    /// Computes `scalar * B`.
    ///
    /// With the radix-16 digits `a_i` of the scalar,
    /// `a * B = sum(a_i 16^i B) = sum(a_odd 16^(2j) B) * 16 + sum(a_even 16^(2j) B)`,
    /// so 64 table additions and four doublings do the whole job.
    pub(crate) fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let mut bytes = scalar.to_bytes();
        let mut a = to_radix_16(&bytes);
        bytes.zeroize();

        let mut P = ExtensiblePoint::IDENTITY;

        for i in (1..64).step_by(2) {
            P = P.add_affine_niels(&self.0[i / 2].select(a[i]));
        }

        P = P.double().double().double().double();

        for i in (0..64).step_by(2) {
            P = P.add_affine_niels(&self.0[i / 2].select(a[i]));
        }

        let output = P.to_extended();

        a.zeroize();
        P.zeroize();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_TABLE;
    use crate::edwards::mul::double_and_add;
    use hex_literal::hex;

    #[test]
    fn table_rows() {
        let mut base = EdwardsPoint::GENERATOR;
        for row in ED25519_BASEPOINT_TABLE.0.iter() {
            let mut expected = EdwardsPoint::IDENTITY;
            for j in 1..9i8 {
                expected = expected + base;
                let got = ExtensiblePoint::IDENTITY
                    .add_affine_niels(&row.select(j))
                    .to_extended();
                assert_eq!(got, expected);

                let got = ExtensiblePoint::IDENTITY
                    .add_affine_niels(&row.select(-j))
                    .to_extended();
                assert_eq!(got, -expected);
            }
            for _ in 0..8 {
                base = base.double();
            }
        }
    }

    #[test]
    fn select_zero() {
        let row = &ED25519_BASEPOINT_TABLE.0[0];
        let got = ExtensiblePoint::IDENTITY
            .add_affine_niels(&row.select(0))
            .to_extended();
        assert_eq!(got, EdwardsPoint::IDENTITY);
    }

    #[test]
    fn mul_base_matches_double_and_add() {
        let bytes = hex!("ea83b3f77f71196f089f595902d3de763beb5b9abc40a7ce7e7356691432a50c");
        let scalar = Scalar::from_bytes_mod_order(&bytes);

        let got = ED25519_BASEPOINT_TABLE.mul_base(&scalar);
        let expected = double_and_add(&EdwardsPoint::GENERATOR, &scalar.to_bytes());
        assert_eq!(got, expected);
    }

    #[test]
    fn mul_base_small() {
        assert_eq!(
            ED25519_BASEPOINT_TABLE.mul_base(&Scalar::ZERO),
            EdwardsPoint::IDENTITY
        );
        assert_eq!(
            ED25519_BASEPOINT_TABLE.mul_base(&Scalar::ONE),
            EdwardsPoint::GENERATOR
        );
        assert_eq!(
            ED25519_BASEPOINT_TABLE.mul_base(&-Scalar::ONE),
            -EdwardsPoint::GENERATOR
        );
    }
}
