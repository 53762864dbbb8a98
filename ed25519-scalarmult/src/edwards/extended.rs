use core::fmt::{Display, Formatter, LowerHex, Result as FmtResult, UpperHex};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{
    affine::{AffinePoint, CompressedEdwardsY},
    extensible::ExtensiblePoint,
    mul::{double_and_add, variable_base},
    niels::ProjectiveNielsPoint,
};
use crate::constants::ED25519_BASEPOINT_TABLE;
use crate::field::{FieldElement, ORDER, Scalar};
use crypto_bigint::Encoding;
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};
use zeroize::{DefaultIsZeroes, Zeroize};

/// Represent points on the twisted Edwards curve using Extended Homogenous
/// Projective Co-ordinates
/// (x, y) -> (X/Z, Y/Z, Z, T) with XY = ZT
/// a = -1, d = -121665/121666
#[derive(Copy, Clone, Debug)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Default for EdwardsPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Display for EdwardsPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{{ X: {}, Y: {}, Z: {}, T: {} }}",
            self.X, self.Y, self.Z, self.T
        )
    }
}

impl LowerHex for EdwardsPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{{ X: {:x}, Y: {:x}, Z: {:x}, T: {:x} }}",
            self.X, self.Y, self.Z, self.T
        )
    }
}

impl UpperHex for EdwardsPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{{ X: {:X}, Y: {:X}, Z: {:X}, T: {:X} }}",
            self.X, self.Y, self.Z, self.T
        )
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let XZ = self.X * other.Z;
        let ZX = self.Z * other.X;

        let YZ = self.Y * other.Z;
        let ZY = self.Z * other.Y;

        (XZ.ct_eq(&ZX)) & (YZ.ct_eq(&ZY))
    }
}

impl Eq for EdwardsPoint {}
impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl DefaultIsZeroes for EdwardsPoint {}

impl EdwardsPoint {
    /// Generator for the prime subgroup, with y = 4/5
    pub const GENERATOR: Self = Self {
        X: FieldElement::from_be_hex(
            "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
        ),
        Y: FieldElement::from_be_hex(
            "6666666666666666666666666666666666666666666666666666666666666658",
        ),
        Z: FieldElement::ONE,
        T: FieldElement::from_be_hex(
            "67875f0fd78b766566ea4e8e64abe37d20f09f80775152f56dde8ab3a5b7dda3",
        ),
    };
    /// Identity point
    pub const IDENTITY: Self = Self {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T: FieldElement::ZERO,
    };

    /// Compute `scalar * GENERATOR` using the precomputed basepoint table
    pub fn mul_base(scalar: &Scalar) -> Self {
        ED25519_BASEPOINT_TABLE.mul_base(scalar)
    }

    /// Add two points
    pub fn add(&self, other: &EdwardsPoint) -> Self {
        self.to_extensible().add_extended(other).to_extended()
    }

    /// Double this point
    pub fn double(&self) -> Self {
        self.to_extensible().double().to_extended()
    }

    /// Check if this point is on the curve
    pub fn is_on_curve(&self) -> Choice {
        let XY = self.X * self.Y;
        let ZT = self.Z * self.T;

        // -X^2 + Y^2 == Z^2 + D * T^2

        let YY = self.Y.square();
        let XX = self.X.square();
        let ZZ = self.Z.square();
        let TT = self.T.square();
        let lhs = YY - XX;
        let rhs = ZZ + TT * FieldElement::EDWARDS_D;

        XY.ct_eq(&ZT) & lhs.ct_eq(&rhs)
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::IDENTITY)
    }

    /// Convert this point to an [`AffinePoint`].
    pub fn to_affine(&self) -> AffinePoint {
        let INV_Z = self.Z.invert();

        let x = self.X * INV_Z;
        let y = self.Y * INV_Z;

        AffinePoint { x, y }
    }

    /// Encode this point as 32 bytes: y with the sign of x in the top bit
    pub fn compress(&self) -> CompressedEdwardsY {
        self.to_affine().compress()
    }

    /// Compute the negation of this point's `x`-coordinate.
    pub fn negate(&self) -> Self {
        EdwardsPoint {
            X: -self.X,
            Y: self.Y,
            Z: self.Z,
            T: -self.T,
        }
    }

    /// Multiply by the cofactor, 8
    pub fn mul_by_cofactor(&self) -> Self {
        let mut p = self.to_extensible();
        for _ in 0..3 {
            p = p.double();
        }
        p.to_extended()
    }

    /// Determine if this point has order dividing 8.
    pub fn is_small_order(&self) -> Choice {
        self.mul_by_cofactor().is_identity()
    }

    /// Determine if this point is “torsion-free”, i.e., is contained in
    /// the prime-order subgroup.
    ///
    /// # Return
    ///
    /// * `true` if `self` has zero torsion component and is in the
    ///   prime-order subgroup;
    /// * `false` if `self` has a nonzero torsion component and is not
    ///   in the prime-order subgroup.
    pub fn is_torsion_free(&self) -> Choice {
        double_and_add(self, &ORDER.to_le_bytes()).is_identity()
    }

    /// Is `ℓ * self` a point with x = 0?
    ///
    /// That admits the prime-order subgroup and its coset through the
    /// order-2 point (0, -1), and nothing else. This is the check libsodium
    /// applies to the input of `crypto_scalarmult_ed25519`.
    pub fn is_in_main_subgroup(&self) -> Choice {
        double_and_add(self, &ORDER.to_le_bytes()).X.is_zero()
    }

    /// Map 32 uniformly random bytes to a point in the prime-order subgroup.
    ///
    /// Bits 0..255 select a field element r (reduced modulo p), which
    /// Elligator 2 sends to the Montgomery curve. Bit 255 becomes the sign
    /// of the Edwards x-coordinate. The result is multiplied by the cofactor,
    /// so a handful of inputs land on the identity.
    pub fn from_uniform(bytes: &[u8; 32]) -> Self {
        let mut r_bytes = *bytes;
        let x_sign = Choice::from(r_bytes[31] >> 7);
        r_bytes[31] &= 0x7f;
        let r = FieldElement::from_bytes(&r_bytes);
        r_bytes.zeroize();

        let u = r.map_to_curve_elligator2();

        // Birational map: y = (u - 1) / (u + 1)
        let y = (u - FieldElement::ONE) * (u + FieldElement::ONE).invert();

        // x^2 = (y^2 - 1) / (d y^2 + 1) always has a root for y from the map
        let yy = y.square();
        let (_, mut x) = FieldElement::sqrt_ratio_i(
            &(yy - FieldElement::ONE),
            &(FieldElement::EDWARDS_D * yy + FieldElement::ONE),
        );
        x.conditional_negate(x_sign);

        AffinePoint { x, y }.to_edwards().mul_by_cofactor()
    }

    /// Generate a random point in the prime-order subgroup by mapping 32
    /// random bytes through [`EdwardsPoint::from_uniform`].
    pub fn random(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let point = Self::from_uniform(&bytes);
        bytes.zeroize();
        point
    }

    pub(crate) fn to_extensible(self) -> ExtensiblePoint {
        ExtensiblePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
            T1: self.T,
            T2: FieldElement::ONE,
        }
    }

    pub(crate) fn to_projective_niels(self) -> ProjectiveNielsPoint {
        self.to_extensible().to_projective_niels()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl Add<&EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, other: &EdwardsPoint) -> EdwardsPoint {
        EdwardsPoint::add(self, other)
    }
}

define_add_variants!(
    LHS = EdwardsPoint,
    RHS = EdwardsPoint,
    Output = EdwardsPoint
);

impl Sub<&EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, other: &EdwardsPoint) -> EdwardsPoint {
        EdwardsPoint::add(self, &other.negate())
    }
}

define_sub_variants!(
    LHS = EdwardsPoint,
    RHS = EdwardsPoint,
    Output = EdwardsPoint
);

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl Neg for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        self.negate()
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl Mul<&Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `scalar * self`.
    fn mul(self, scalar: &Scalar) -> EdwardsPoint {
        let mut bytes = scalar.to_bytes();
        let result = variable_base(self, &bytes);
        bytes.zeroize();
        result
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);
define_mul_assign_variants!(LHS = EdwardsPoint, RHS = Scalar);

impl Mul<&EdwardsPoint> for &Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

#[cfg(feature = "serde")]
impl serdect::serde::Serialize for EdwardsPoint {
    fn serialize<S: serdect::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serdect::serde::Serialize::serialize(&self.compress(), s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serdect::serde::Deserialize<'de> for EdwardsPoint {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let compressed = <CompressedEdwardsY as serdect::serde::Deserialize>::deserialize(d)?;
        compressed
            .decompress()
            .into_option()
            .map(|point| point.to_edwards())
            .ok_or_else(|| serdect::serde::de::Error::custom("invalid point"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn decompress(bytes: [u8; 32]) -> EdwardsPoint {
        CompressedEdwardsY(bytes)
            .decompress_unchecked()
            .unwrap()
            .to_edwards()
    }

    #[test]
    fn test_is_on_curve() {
        assert_eq!(EdwardsPoint::GENERATOR.is_on_curve().unwrap_u8(), 1u8);
        assert_eq!(EdwardsPoint::IDENTITY.is_on_curve().unwrap_u8(), 1u8);
        assert_eq!(
            EdwardsPoint::GENERATOR.double().is_on_curve().unwrap_u8(),
            1u8
        );
    }

    #[test]
    fn test_generator_multiples() {
        let two_b = hex!("c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022");
        let three_b = hex!("d4b4f5784868c3020403246717ec169ff79e26608ea126a1ab69ee77d1b16712");

        let g = EdwardsPoint::GENERATOR;
        assert_eq!(g.compress(), CompressedEdwardsY::GENERATOR);
        assert_eq!(g.double().compress().0, two_b);
        assert_eq!((g + g).compress().0, two_b);
        assert_eq!((g.double() + g).compress().0, three_b);
        assert_eq!((g.double() + g - g).compress().0, two_b);
    }

    #[test]
    fn test_negation() {
        let g = EdwardsPoint::GENERATOR;
        assert_eq!(g + (-g), EdwardsPoint::IDENTITY);
        assert_eq!(g - g, EdwardsPoint::IDENTITY);
        assert_eq!(-EdwardsPoint::IDENTITY, EdwardsPoint::IDENTITY);
    }

    #[test]
    fn test_is_in_main_subgroup() {
        assert_eq!(EdwardsPoint::GENERATOR.is_in_main_subgroup().unwrap_u8(), 1u8);
        assert_eq!(EdwardsPoint::IDENTITY.is_in_main_subgroup().unwrap_u8(), 1u8);

        // y = 9 is B' + (0, -1) for some B' in the prime-order subgroup
        let y9 = decompress(hex!(
            "0900000000000000000000000000000000000000000000000000000000000000"
        ));
        assert_eq!(y9.is_in_main_subgroup().unwrap_u8(), 1u8);
        assert_eq!(y9.is_torsion_free().unwrap_u8(), 0u8);
        assert_eq!(y9.is_small_order().unwrap_u8(), 0u8);

        let two_torsion = decompress(hex!(
            "ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f"
        ));
        assert_eq!((y9 + two_torsion).is_torsion_free().unwrap_u8(), 1u8);

        // B + T8, with T8 of order 8
        let mixed = decompress(hex!(
            "da99e28ba529cdde35a25fba9059e78ecaee239f99755b9b1aa4f65df00803e2"
        ));
        assert_eq!(mixed.is_in_main_subgroup().unwrap_u8(), 0u8);
    }

    #[test]
    fn test_is_torsion_free() {
        assert_eq!(EdwardsPoint::GENERATOR.is_torsion_free().unwrap_u8(), 1u8);
        assert_eq!(EdwardsPoint::IDENTITY.is_torsion_free().unwrap_u8(), 1u8);

        // B + T8, with T8 of order 8
        let mixed = decompress(hex!(
            "da99e28ba529cdde35a25fba9059e78ecaee239f99755b9b1aa4f65df00803e2"
        ));
        assert_eq!(mixed.is_torsion_free().unwrap_u8(), 0u8);
        assert_eq!(mixed.is_small_order().unwrap_u8(), 0u8);
    }

    #[test]
    fn test_small_order() {
        let t8 = decompress(hex!(
            "26e8958fc2b227b045c3f489f2ef98f0d5dfac05d3c63339b13802886d53fc05"
        ));
        assert_eq!(t8.is_small_order().unwrap_u8(), 1u8);
        assert_eq!(t8.is_torsion_free().unwrap_u8(), 0u8);
        assert_eq!(t8.mul_by_cofactor(), EdwardsPoint::IDENTITY);

        assert_eq!(EdwardsPoint::IDENTITY.is_small_order().unwrap_u8(), 1u8);
        assert_eq!(EdwardsPoint::GENERATOR.is_small_order().unwrap_u8(), 0u8);
    }

    #[test]
    fn test_scalar_mul_operator() {
        let g = EdwardsPoint::GENERATOR;
        let three = Scalar::from(3u8);
        assert_eq!(g * three, g.double() + g);
        assert_eq!(three * g, g.double() + g);

        let mut p = g;
        p *= Scalar::from(2u8);
        assert_eq!(p, g.double());

        assert_eq!(g * Scalar::ZERO, EdwardsPoint::IDENTITY);
        assert_eq!(EdwardsPoint::mul_base(&three), g * three);
    }

    #[test]
    fn test_from_uniform() {
        let vectors = [
            (
                [0u8; 32],
                hex!("0100000000000000000000000000000000000000000000000000000000000000"),
            ),
            (
                hex!("0100000000000000000000000000000000000000000000000000000000000000"),
                hex!("7c317e7a16c0ffe160a9d82197b462a0ee52f0dedc8d064350196b16f2677f59"),
            ),
            (
                hex!("ef379363dd0cb7be66638cf7f8726872c8f9f6f2b41ad218192c763c062d310a"),
                hex!("20650e854742d4b7550a19322556f1dab41448501c72fc1e979fb6c4c9706e85"),
            ),
            (
                [0xff; 32],
                hex!("a154a939b79807aa59969afafe4e544a11a06eb2142b9adb249caec9c98250f6"),
            ),
        ];

        for (input, expected) in vectors {
            let point = EdwardsPoint::from_uniform(&input);
            assert_eq!(point.compress().0, expected);
            assert_eq!(point.is_on_curve().unwrap_u8(), 1u8);
            assert_eq!(point.is_torsion_free().unwrap_u8(), 1u8);
        }
    }

    #[test]
    fn test_random() {
        let mut rng = rand_core::OsRng;
        let p = EdwardsPoint::random(&mut rng);
        assert_eq!(p.is_on_curve().unwrap_u8(), 1u8);
        assert_eq!(p.is_torsion_free().unwrap_u8(), 1u8);
    }
}
