use core::fmt::{Display, Formatter, LowerHex, Result as FmtResult, UpperHex};

use super::extended::EdwardsPoint;
use crate::constants::SMALL_ORDER_ENCODINGS;
use crate::field::FieldElement;
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::{DefaultIsZeroes, Zeroize};

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};

/// Affine point on the twisted Edwards curve -x^2 + y^2 = 1 + d x^2 y^2
#[derive(Copy, Clone, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl AffinePoint {
    /// The identity point
    pub const IDENTITY: AffinePoint = AffinePoint {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
    };

    /// Standard compression; store y and the sign of x
    pub fn compress(&self) -> CompressedEdwardsY {
        let mut compressed_bytes = self.y.to_bytes();
        compressed_bytes[31] |= self.x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(compressed_bytes)
    }

    /// Check if this point is on the curve
    pub fn is_on_curve(&self) -> Choice {
        // -X^2 + Y^2 == 1 + D * X^2 * Y^2

        let XX = self.x.square();
        let YY = self.y.square();
        let lhs = YY - XX;
        let rhs = FieldElement::ONE + FieldElement::EDWARDS_D * XX * YY;

        lhs.ct_eq(&rhs)
    }

    /// Convert to edwards extended point
    pub fn to_edwards(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.x,
            Y: self.y,
            Z: FieldElement::ONE,
            T: self.x * self.y,
        }
    }

    #[cfg(test)]
    pub(crate) fn to_affine_niels(self) -> super::niels::AffineNielsPoint {
        super::niels::AffineNielsPoint {
            y_plus_x: self.y + self.x,
            y_minus_x: self.y - self.x,
            xy2d: self.x * self.y * FieldElement::EDWARDS_D2,
        }
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl Eq for AffinePoint {}
impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl DefaultIsZeroes for AffinePoint {}

impl From<EdwardsPoint> for AffinePoint {
    fn from(value: EdwardsPoint) -> Self {
        value.to_affine()
    }
}

impl From<&EdwardsPoint> for AffinePoint {
    fn from(value: &EdwardsPoint) -> Self {
        value.to_affine()
    }
}

impl From<AffinePoint> for EdwardsPoint {
    fn from(value: AffinePoint) -> Self {
        value.to_edwards()
    }
}

impl From<&AffinePoint> for EdwardsPoint {
    fn from(value: &AffinePoint) -> Self {
        value.to_edwards()
    }
}

/// The compressed representation of a point
pub type PointBytes = [u8; 32];

/// Represents a point on the compressed twisted Edwards curve
/// in little endian format where the most significant bit is the sign bit
/// of x and the remaining 255 bits represent the y-coordinate
#[derive(Copy, Clone, Debug)]
pub struct CompressedEdwardsY(pub PointBytes);

impl Zeroize for CompressedEdwardsY {
    fn zeroize(&mut self) {
        self.0.zeroize()
    }
}

impl Display for CompressedEdwardsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl LowerHex for CompressedEdwardsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl UpperHex for CompressedEdwardsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in &self.0[..] {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ConditionallySelectable for CompressedEdwardsY {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(bytes)
    }
}

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for CompressedEdwardsY {
    fn eq(&self, other: &CompressedEdwardsY) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for CompressedEdwardsY {}

impl AsRef<[u8]> for CompressedEdwardsY {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl AsRef<PointBytes> for CompressedEdwardsY {
    fn as_ref(&self) -> &PointBytes {
        &self.0
    }
}

#[cfg(feature = "alloc")]
impl From<CompressedEdwardsY> for Vec<u8> {
    fn from(value: CompressedEdwardsY) -> Self {
        Self::from(&value)
    }
}

#[cfg(feature = "alloc")]
impl From<&CompressedEdwardsY> for Vec<u8> {
    fn from(value: &CompressedEdwardsY) -> Self {
        value.0.to_vec()
    }
}

#[cfg(feature = "alloc")]
impl TryFrom<Vec<u8>> for CompressedEdwardsY {
    type Error = &'static str;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

#[cfg(feature = "alloc")]
impl TryFrom<&Vec<u8>> for CompressedEdwardsY {
    type Error = &'static str;

    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<&[u8]> for CompressedEdwardsY {
    type Error = &'static str;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <PointBytes>::try_from(value).map_err(|_| "Invalid length")?;
        Ok(CompressedEdwardsY(bytes))
    }
}

#[cfg(feature = "alloc")]
impl TryFrom<Box<[u8]>> for CompressedEdwardsY {
    type Error = &'static str;

    fn try_from(value: Box<[u8]>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_ref())
    }
}

impl From<CompressedEdwardsY> for PointBytes {
    fn from(value: CompressedEdwardsY) -> Self {
        value.0
    }
}

impl From<&CompressedEdwardsY> for PointBytes {
    fn from(value: &CompressedEdwardsY) -> Self {
        Self::from(*value)
    }
}

impl From<PointBytes> for CompressedEdwardsY {
    fn from(point: PointBytes) -> Self {
        Self(point)
    }
}

#[cfg(feature = "serde")]
impl serdect::serde::Serialize for CompressedEdwardsY {
    fn serialize<S: serdect::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serdect::array::serialize_hex_lower_or_bin(&self.0, s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serdect::serde::Deserialize<'de> for CompressedEdwardsY {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let mut arr = [0u8; 32];
        serdect::array::deserialize_hex_or_bin(&mut arr, d)?;
        Ok(CompressedEdwardsY(arr))
    }
}

impl CompressedEdwardsY {
    /// The compressed generator point
    pub const GENERATOR: Self = Self([
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ]);
    /// The compressed identity point
    pub const IDENTITY: Self = Self([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0,
    ]);

    /// Attempt to decompress to an `AffinePoint`.
    ///
    /// Returns `None` if the y-coordinate is not canonical (at least p),
    /// if it is not the y-coordinate of a curve point, or if x = 0 while
    /// the sign bit is set. Small-order points and points with a torsion
    /// component are accepted.
    pub fn decompress_unchecked(&self) -> CtOption<AffinePoint> {
        let sign = Choice::from(self.0[31] >> 7);

        let mut y_bytes = self.0;
        y_bytes[31] &= 0x7f;
        let y = FieldElement::from_canonical_bytes(&y_bytes);
        let is_canonical = y.is_some();
        let y = y.unwrap_or(FieldElement::ZERO);

        // x^2 = (y^2 - 1) / (d y^2 + 1)
        let yy = y.square();
        let u = yy - FieldElement::ONE;
        let v = FieldElement::EDWARDS_D * yy + FieldElement::ONE;
        let (is_square, mut x) = FieldElement::sqrt_ratio_i(&u, &v);

        // -0 is not a valid encoding
        let is_valid_sign = !(x.is_zero() & sign);
        x.conditional_negate(sign);

        CtOption::new(AffinePoint { x, y }, is_canonical & is_square & is_valid_sign)
    }

    /// Attempt to decompress to an `AffinePoint`.
    ///
    /// Returns `None`:
    /// - if the input is not the canonical encoding of a curve point.
    /// - if the input point has nonzero torsion component.
    pub fn decompress(&self) -> CtOption<AffinePoint> {
        self.decompress_unchecked()
            .and_then(|pt| CtOption::new(pt, pt.to_edwards().is_torsion_free()))
    }

    /// Is this one of the encodings of a point of order 1, 2, 4 or 8?
    ///
    /// The sign bit is ignored, so both signs of each encoding match.
    /// Non-canonical encodings of the order-1, -2 and -4 points (y = 1 + p,
    /// y = p and y = p - 1 in their unreduced forms) are included.
    pub fn is_small_order_encoding(&self) -> Choice {
        let mut y_bytes = self.0;
        y_bytes[31] &= 0x7f;

        let mut found = Choice::from(0u8);
        for blocked in SMALL_ORDER_ENCODINGS.iter() {
            found |= y_bytes.ct_eq(blocked);
        }
        found
    }

    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &PointBytes {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> PointBytes {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_generator_round_trip() {
        let generator = EdwardsPoint::GENERATOR.to_affine();
        assert_eq!(generator.compress(), CompressedEdwardsY::GENERATOR);

        let decompressed = CompressedEdwardsY::GENERATOR.decompress().unwrap();
        assert_eq!(decompressed, generator);
        assert!(bool::from(decompressed.is_on_curve()));
    }

    #[test]
    fn test_identity_round_trip() {
        assert_eq!(AffinePoint::IDENTITY.compress(), CompressedEdwardsY::IDENTITY);
        let decompressed = CompressedEdwardsY::IDENTITY.decompress().unwrap();
        assert_eq!(decompressed, AffinePoint::IDENTITY);
    }

    #[test]
    fn test_decompress_compress() {
        let bytes = hex!("c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022");
        let compressed = CompressedEdwardsY(bytes);
        let decompressed = compressed.decompress().unwrap();
        assert_eq!(decompressed.compress().0, bytes);
        assert_eq!(decompressed.to_edwards(), EdwardsPoint::GENERATOR.double());
    }

    #[test]
    fn test_decompress_rejects() {
        // y = 2 is not the y-coordinate of a curve point
        let not_on_curve = hex!("0200000000000000000000000000000000000000000000000000000000000000");
        assert!(bool::from(
            CompressedEdwardsY(not_on_curve).decompress_unchecked().is_none()
        ));

        // y = p + 2
        let non_canonical = hex!("efffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(bool::from(
            CompressedEdwardsY(non_canonical).decompress_unchecked().is_none()
        ));

        // identity with the sign bit set
        let negative_zero = hex!("0100000000000000000000000000000000000000000000000000000000000080");
        assert!(bool::from(
            CompressedEdwardsY(negative_zero).decompress_unchecked().is_none()
        ));
    }

    #[test]
    fn test_decompress_torsion() {
        // B + T8
        let bytes = hex!("da99e28ba529cdde35a25fba9059e78ecaee239f99755b9b1aa4f65df00803e2");
        let compressed = CompressedEdwardsY(bytes);
        assert!(bool::from(compressed.decompress_unchecked().is_some()));
        assert!(bool::from(compressed.decompress().is_none()));
    }

    #[test]
    fn test_small_order_encodings() {
        for encoding in SMALL_ORDER_ENCODINGS.iter() {
            let mut bytes = *encoding;
            assert!(bool::from(
                CompressedEdwardsY(bytes).is_small_order_encoding()
            ));
            bytes[31] |= 0x80;
            assert!(bool::from(
                CompressedEdwardsY(bytes).is_small_order_encoding()
            ));
        }
        assert!(!bool::from(
            CompressedEdwardsY::GENERATOR.is_small_order_encoding()
        ));
    }

    #[test]
    fn test_try_from_slice() {
        let bytes = CompressedEdwardsY::GENERATOR.to_bytes();
        let compressed = CompressedEdwardsY::try_from(&bytes[..]).unwrap();
        assert_eq!(compressed, CompressedEdwardsY::GENERATOR);
        assert!(CompressedEdwardsY::try_from(&bytes[..31]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&CompressedEdwardsY::GENERATOR).unwrap();
        let decoded: CompressedEdwardsY = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, CompressedEdwardsY::GENERATOR);
    }

    #[test]
    fn test_display() {
        let hex = std::format!("{}", CompressedEdwardsY::IDENTITY);
        assert_eq!(
            hex,
            "0100000000000000000000000000000000000000000000000000000000000000"
        );
    }
}
