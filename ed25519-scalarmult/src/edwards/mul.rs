use super::{extended::EdwardsPoint, extensible::ExtensiblePoint, niels::ProjectiveNielsPoint};
use crate::field::to_radix_16;
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Computes `s * point` for a little-endian 255-bit `s` (bit 255 must be
/// clear). Fixed-window, 4 bits at a time, with signed digits.
pub(crate) fn variable_base(point: &EdwardsPoint, s: &[u8; 32]) -> EdwardsPoint {
    let mut result = ExtensiblePoint::IDENTITY;

    // Recode Scalar
    let mut scalar = to_radix_16(s);

    let mut lookup = LookupTable::from(point);

    for i in (0..64).rev() {
        result = result.double();
        result = result.double();
        result = result.double();
        result = result.double();

        // The mask is the top bit, will be 1 for negative numbers, 0 for positive numbers
        let mask = scalar[i] >> 7;
        let sign = mask & 0x1;
        // Use the mask to get the absolute value of scalar
        let abs_value = ((scalar[i] + mask) ^ mask) as u32;

        let mut neg_P = lookup.select(abs_value);
        neg_P.conditional_negate(Choice::from((sign) as u8));

        result = result.add_projective_niels(&neg_P);
    }

    let output = result.to_extended();

    scalar.zeroize();
    lookup.zeroize();
    result.zeroize();
    output
}

/// Traditional double and add algorithm over all 256 bits of `s`,
/// most significant first
pub(crate) fn double_and_add(point: &EdwardsPoint, s: &[u8; 32]) -> EdwardsPoint {
    let mut result = ExtensiblePoint::IDENTITY;

    for i in (0..256).rev() {
        result = result.double();

        let bit = (s[i >> 3] >> (i & 7)) & 1;
        let mut p = EdwardsPoint::IDENTITY;
        p.conditional_assign(point, Choice::from(bit));
        result = result.add_extended(&p);
    }

    result.to_extended()
}

/// Multiples 1P..8P of a point, for the windowed loop
pub(crate) struct LookupTable([ProjectiveNielsPoint; 8]);

/// Precomputes multiples of the point passed in
impl From<&EdwardsPoint> for LookupTable {
    fn from(P: &EdwardsPoint) -> LookupTable {
        let mut table = [P.to_projective_niels(); 8];

        for i in 1..8 {
            table[i] = P
                .to_extensible()
                .add_projective_niels(&table[i - 1])
                .to_extended()
                .to_projective_niels();
        }

        LookupTable(table)
    }
}

impl Zeroize for LookupTable {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl LookupTable {
    /// Selects a projective niels point from a lookup table in constant time
    pub(crate) fn select(&self, index: u32) -> ProjectiveNielsPoint {
        let mut result = ProjectiveNielsPoint::IDENTITY;

        for i in 1..9 {
            let swap = index.ct_eq(&(i as u32));
            result.conditional_assign(&self.0[i - 1], swap);
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::Scalar;
    use hex_literal::hex;

    #[test]
    fn test_scalar_mul() {
        let scalar = hex!("ea83b3f77f71196f089f595902d3de763beb5b9abc40a7ce7e7356691432a50c");
        let point = EdwardsPoint::GENERATOR.double().double() + EdwardsPoint::GENERATOR;

        let got = variable_base(&point, &scalar);
        let got2 = double_and_add(&point, &scalar);
        assert_eq!(got, got2);
    }

    #[test]
    fn test_simple_scalar_mul_identities() {
        let x = EdwardsPoint::GENERATOR;

        // Test that 1 * P = P
        let exp = variable_base(&x, &Scalar::from(1u8).to_bytes());
        assert!(x == exp);
        // Test that 2 * (P + P) = 4 * P
        let expected_two_x = (x + x).double();
        let got = variable_base(&x, &Scalar::from(4u8).to_bytes());
        assert!(expected_two_x == got);
        // 0 * P = O
        let got = variable_base(&x, &[0u8; 32]);
        assert!(got == EdwardsPoint::IDENTITY);
    }

    #[test]
    fn test_max_scalar() {
        // 2^255 - 1 exercises the top digit of 8
        let mut scalar = [0xff; 32];
        scalar[31] = 0x7f;
        let point = EdwardsPoint::GENERATOR;
        assert_eq!(
            variable_base(&point, &scalar),
            double_and_add(&point, &scalar)
        );
    }

    #[test]
    fn test_lookup_table_zeroize() {
        let mut table = LookupTable::from(&EdwardsPoint::GENERATOR);
        table.zeroize();
        for i in 0..9u32 {
            assert_eq!(
                table.select(i).to_extensible().to_extended(),
                EdwardsPoint::IDENTITY
            );
        }

        let mut acc = EdwardsPoint::GENERATOR.to_extensible().double();
        acc.zeroize();
        assert_eq!(acc, ExtensiblePoint::IDENTITY);
    }

    #[test]
    fn test_lookup_table() {
        let p = EdwardsPoint::GENERATOR;
        let table = LookupTable::from(&p);

        let mut expected = EdwardsPoint::IDENTITY;
        assert_eq!(
            table.select(0).to_extensible().to_extended(),
            EdwardsPoint::IDENTITY
        );
        for i in 1..9u32 {
            expected = expected + p;
            assert_eq!(table.select(i).to_extensible().to_extended(), expected);
        }
    }
}
