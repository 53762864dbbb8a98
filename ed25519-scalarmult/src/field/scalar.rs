use core::fmt::{Display, Formatter, LowerHex, Result as FmtResult, UpperHex};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::{Encoding, U256};
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess, CtOption};

/// The order of the prime subgroup,
/// ℓ = 2^252 + 27742317777372353535851937790883648493
pub const ORDER: U256 =
    U256::from_be_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed");

/// Little-endian encoding of a scalar
pub type ScalarBytes = [u8; 32];
/// Little-endian input to a wide reduction
pub type WideScalarBytes = [u8; 64];

/// An integer modulo ℓ, always stored fully reduced.
#[derive(Copy, Clone, Debug)]
pub struct Scalar(pub(crate) U256);

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        LowerHex::fmt(self, f)
    }
}

impl LowerHex for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in self.to_bytes() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl UpperHex for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for b in self.to_bytes() {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(U256::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

impl zeroize::DefaultIsZeroes for Scalar {}

impl From<u8> for Scalar {
    fn from(a: u8) -> Self {
        Scalar(U256::from_u8(a))
    }
}

impl From<u32> for Scalar {
    fn from(a: u32) -> Self {
        Scalar(U256::from_u32(a))
    }
}

impl From<u64> for Scalar {
    fn from(a: u64) -> Self {
        Scalar(U256::from_u64(a))
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &Scalar) -> Scalar {
        Scalar(self.0.add_mod(&rhs.0, &ORDER))
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl Sub<&Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &Scalar) -> Scalar {
        Scalar(self.0.sub_mod(&rhs.0, &ORDER))
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar(U256::const_rem_wide(self.0.mul_wide(&rhs.0), &ORDER).0)
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar(self.0.neg_mod(&ORDER))
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

impl From<Scalar> for ScalarBytes {
    fn from(scalar: Scalar) -> ScalarBytes {
        scalar.to_bytes()
    }
}

impl TryFrom<&[u8]> for Scalar {
    type Error = &'static str;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes = ScalarBytes::try_from(bytes).map_err(|_| "invalid byte length")?;
        Option::<Scalar>::from(Scalar::from_canonical_bytes(&bytes))
            .ok_or("scalar was not canonically encoded")
    }
}

#[cfg(feature = "serde")]
impl serdect::serde::Serialize for Scalar {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_bytes(), s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serdect::serde::Deserialize<'de> for Scalar {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let mut buffer = ScalarBytes::default();
        serdect::array::deserialize_hex_or_bin(&mut buffer, d)?;
        Option::from(Self::from_canonical_bytes(&buffer)).ok_or(serdect::serde::de::Error::custom(
            "scalar was not canonically encoded",
        ))
    }
}

impl Scalar {
    /// The additive identity element
    pub const ZERO: Scalar = Scalar(U256::ZERO);
    /// The multiplicative identity element
    pub const ONE: Scalar = Scalar(U256::ONE);

    /// Is this scalar equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Compute `self * self` mod ℓ
    pub fn square(&self) -> Self {
        self * self
    }

    /// Invert this scalar via Fermat's little theorem. Zero maps to zero.
    pub fn invert(&self) -> Self {
        // ℓ - 2, little-endian 64-bit words
        const INV_EXP: [u64; 4] = [
            0x5812631a5cf5d3eb,
            0x14def9dea2f79cd6,
            0x0000000000000000,
            0x1000000000000000,
        ];
        self.pow_vartime(&INV_EXP)
    }

    // Running time depends on the public exponent only
    fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::ONE;
        for word in exp.iter().rev() {
            for j in (0..64).rev() {
                res = res.square();
                if (word >> j) & 1 == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order ℓ.
    pub fn from_bytes_mod_order(input: &ScalarBytes) -> Scalar {
        let value = U256::from_le_bytes(*input);
        Self(U256::const_rem_wide((value, U256::ZERO), &ORDER).0)
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order ℓ.
    pub fn from_bytes_mod_order_wide(input: &WideScalarBytes) -> Scalar {
        let lo = U256::from_le_slice(&input[..32]);
        let hi = U256::from_le_slice(&input[32..]);
        Self(U256::const_rem_wide((lo, hi), &ORDER).0)
    }

    /// Attempt to construct a `Scalar` from a canonical byte representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical byte representation;
    /// - `None` if `bytes` encodes an integer greater than or equal to ℓ.
    pub fn from_canonical_bytes(bytes: &ScalarBytes) -> CtOption<Self> {
        let candidate = U256::from_le_bytes(*bytes);
        CtOption::new(Self(candidate), candidate.ct_lt(&ORDER))
    }

    /// Convert this `Scalar` to a little-endian byte array.
    pub fn to_bytes(&self) -> ScalarBytes {
        self.0.to_le_bytes()
    }

    /// Returns the bits of the scalar in little-endian order.
    pub fn bits(&self) -> [bool; 256] {
        let bytes = self.to_bytes();
        core::array::from_fn(|i| (bytes[i >> 3] >> (i & 7)) & 1 == 1)
    }

    /// Return a non-zero `Scalar` chosen uniformly at random using a
    /// user-provided RNG.
    pub fn random(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        let mut scalar_bytes = [0u8; 64];
        loop {
            rng.fill_bytes(&mut scalar_bytes);
            let candidate = Scalar::from_bytes_mod_order_wide(&scalar_bytes);
            if !bool::from(candidate.is_zero()) {
                zeroize::Zeroize::zeroize(&mut scalar_bytes);
                return candidate;
            }
        }
    }
}

/// Recodes a little-endian 256-bit integer with bit 255 clear into 64 signed
/// radix-16 digits in `[-8, 8]`, least significant first.
pub(crate) fn to_radix_16(bytes: &[u8; 32]) -> [i8; 64] {
    debug_assert!(bytes[31] <= 127);
    let mut output = [0i8; 64];

    #[inline(always)]
    fn bot_half(x: u8) -> u8 {
        x & 15
    }
    #[inline(always)]
    fn top_half(x: u8) -> u8 {
        (x >> 4) & 15
    }

    for i in 0..32 {
        output[2 * i] = bot_half(bytes[i]) as i8;
        output[2 * i + 1] = top_half(bytes[i]) as i8;
    }

    // Re-center coefficients to be between [-8, 8)
    for i in 0..63 {
        let carry = (output[i] + 8) >> 4;
        output[i] -= carry << 4;
        output[i + 1] += carry;
    }
    // The top digit absorbs the last carry, so it lies in [-8, 8]

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const N: [u8; 32] = hex!("ea83b3f77f71196f089f595902d3de763beb5b9abc40a7ce7e7356691432a50c");
    const M: [u8; 32] = hex!("ca86fc13f12f037452a9998d4f699a9e8e017b9f0a402bf5e4299303bafc4505");

    fn scalar(bytes: [u8; 32]) -> Scalar {
        Scalar::from_canonical_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_basic_add() {
        let five = Scalar::from(5u8);
        let six = Scalar::from(6u8);
        assert_eq!(five + six, Scalar::from(11u8));

        let sum = scalar(N) + scalar(M);
        assert_eq!(
            sum.to_bytes(),
            hex!("c736baae563e0a8b84abfb4373429a00caecd639c780d2c3639de96cce2eeb01")
        );
    }

    #[test]
    fn test_basic_sub() {
        let diff = scalar(N) - scalar(M);
        assert_eq!(
            diff.to_bytes(),
            hex!("20fdb6e38e4116fbb5f5bfcbb26944d8ace9e0fab1007cd99949c3655a355f07")
        );
        assert_eq!(Scalar::ZERO - Scalar::ONE, -Scalar::ONE);
    }

    #[test]
    fn test_basic_mul() {
        let product = scalar(N) * scalar(M);
        assert_eq!(
            product.to_bytes(),
            hex!("5ca0125d1ca4beaf302e540fd0348b78e6eb9b8732e4043ba2a81cee1cada30d")
        );
        assert_eq!(Scalar::from(7u8) * Scalar::from(6u8), Scalar::from(42u8));
    }

    #[test]
    fn test_negate() {
        assert_eq!(
            (-scalar(N)).to_bytes(),
            hex!("035042659af1f8e8cdfd9d49dc26009ec414a46543bf5831818ca996ebcd5a03")
        );
        assert_eq!(-Scalar::ZERO, Scalar::ZERO);
        assert_eq!(scalar(N) + -scalar(N), Scalar::ZERO);
    }

    #[test]
    fn test_invert() {
        assert_eq!(
            scalar(N).invert().to_bytes(),
            hex!("5402d4627d243ceee8c500fdc4c94322369af7b92d97525317c7c8efa2301509")
        );
        for i in 1..100u8 {
            let x = Scalar::from(i);
            assert_eq!(x * x.invert(), Scalar::ONE);
        }
        assert_eq!(Scalar::ZERO.invert(), Scalar::ZERO);
    }

    #[test]
    fn test_canonical_bytes() {
        let order = ORDER.to_le_bytes();
        assert!(bool::from(Scalar::from_canonical_bytes(&order).is_none()));

        let order_minus_one = ORDER.wrapping_sub(&U256::ONE).to_le_bytes();
        assert_eq!(scalar(order_minus_one), -Scalar::ONE);

        assert!(Scalar::try_from(&order[..]).is_err());
        assert!(Scalar::try_from(&order[..31]).is_err());
    }

    #[test]
    fn test_from_bytes_mod_order() {
        let order = ORDER.to_le_bytes();
        assert_eq!(Scalar::from_bytes_mod_order(&order), Scalar::ZERO);

        let order_plus_one = ORDER.wrapping_add(&U256::ONE).to_le_bytes();
        assert_eq!(Scalar::from_bytes_mod_order(&order_plus_one), Scalar::ONE);

        let reduced = Scalar::from_bytes_mod_order(&hex!(
            "cdee1a6a0b402d9897cfdbe50d77efaf3ceb5b9abc40a7ce7e7356691432a5fc"
        ));
        assert_eq!(reduced, scalar(N));
    }

    #[test]
    fn test_from_bytes_mod_order_wide() {
        let max = Scalar::from_bytes_mod_order_wide(&[0xff; 64]);
        assert_eq!(
            max.to_bytes(),
            hex!("000f9c44e31106a447938568a71b0ed065bef517d273ecce3d9a307c1b419903")
        );

        // SHA-512("wide")
        let digest = hex!(
            "5818bcb570e1fe7ef4b9351d6f15e58a017dda875bdada7759f62601207f9cd9"
            "48774d33b8f3c2a08617120a422ed85c17bcadbb2929ceea66c545900ef73e67"
        );
        assert_eq!(
            Scalar::from_bytes_mod_order_wide(&digest).to_bytes(),
            hex!("3ad1c20215fe4904c2a226fb6daab4328a6849c40a5dbb0000273798c322c70e")
        );
    }

    #[test]
    fn test_to_radix_16() {
        let digits = to_radix_16(&N);
        let mut acc = Scalar::ZERO;
        let sixteen = Scalar::from(16u8);
        for &d in digits.iter().rev() {
            assert!((-8..=8).contains(&d));
            acc *= sixteen;
            let abs = Scalar::from(d.unsigned_abs());
            acc = if d < 0 { acc - abs } else { acc + abs };
        }
        assert_eq!(acc, scalar(N));

        let mut max = [0xff; 32];
        max[31] = 0x7f;
        let digits = to_radix_16(&max);
        assert!(digits.iter().all(|d| (-8..=8).contains(d)));
        assert_eq!(digits[63], 8);
    }

    #[test]
    fn test_bits() {
        let bits = Scalar::from(5u8).bits();
        assert!(bits[0] && !bits[1] && bits[2]);
        assert!(bits[3..].iter().all(|b| !b));
    }

    #[test]
    fn test_random() {
        let mut rng = rand_core::OsRng;
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        assert!(!bool::from(a.is_zero()));
        assert_ne!(a, b);
    }
}
