use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::{Encoding, U256, modular::constant_mod::ResidueParams};
use subtle::{
    Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess,
    CtOption,
};

use zeroize::DefaultIsZeroes;

use super::{MODULUS, ResidueType};

/// An element of GF(2^255 - 19), kept in Montgomery form.
#[derive(Clone, Copy, Default)]
pub(crate) struct FieldElement(pub(crate) ResidueType);

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0.retrieve())
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:x})", self.0.retrieve())
    }
}

impl LowerHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0.retrieve())
    }
}

impl UpperHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.retrieve())
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ResidueType::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl DefaultIsZeroes for FieldElement {}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.add(&other.0))
    }
}

define_add_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.sub(&other.0))
    }
}

define_sub_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.mul(&other.0))
    }
}

define_mul_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);
define_mul_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement(self.0.neg())
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}

impl FieldElement {
    pub const ZERO: Self = Self(ResidueType::ZERO);
    pub const ONE: Self = Self(ResidueType::ONE);
    pub const TWO: Self = Self(ResidueType::new(&U256::from_u64(2)));
    pub const MINUS_ONE: Self = Self::from_be_hex(
        "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffec",
    );
    /// d = -121665/121666
    pub const EDWARDS_D: Self = Self::from_be_hex(
        "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
    );
    pub const EDWARDS_D2: Self = Self::from_be_hex(
        "2406d9dc56dffce7198e80f2eef3d13000e0149a8283b156ebd69b9426b2f159",
    );
    /// sqrt(-1) = 2^((p-1)/4)
    pub const SQRT_M1: Self = Self::from_be_hex(
        "2b8324804fc1df0b2b4d00993dfbd7a72f431806ad2fe478c4ee1b274a0ea0b0",
    );
    /// Coefficient A of the birationally equivalent Montgomery curve
    pub const MONTGOMERY_A: Self = Self(ResidueType::new(&U256::from_u64(486662)));

    /// Parses a big-endian hex constant; reduces modulo p.
    pub const fn from_be_hex(hex: &str) -> Self {
        Self(ResidueType::new(&U256::from_be_hex(hex)))
    }

    /// Interprets `bytes` as a little-endian integer and reduces it modulo p.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(ResidueType::new(&U256::from_le_bytes(*bytes)))
    }

    /// Accepts `bytes` only if they encode an integer strictly below p.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let value = U256::from_le_bytes(*bytes);
        let is_canonical = value.ct_lt(&MODULUS::MODULUS);
        CtOption::new(Self(ResidueType::new(&value)), is_canonical)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0.retrieve().to_le_bytes()
    }

    /// The low bit of the canonical encoding.
    pub fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    pub fn double(&self) -> Self {
        Self(self.0.add(&self.0))
    }

    /// Inverts a field element by raising it to p - 2. Zero maps to zero.
    pub fn invert(&self) -> Self {
        const INV_EXP: U256 =
            U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeb");
        Self(self.0.pow(&INV_EXP))
    }

    /// Raises to (p - 5) / 8.
    fn pow_p58(&self) -> Self {
        const P58_EXP: U256 =
            U256::from_be_hex("0ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd");
        Self(self.0.pow(&P58_EXP))
    }

    /// Euler's criterion. Zero counts as a square.
    pub fn is_square(&self) -> Choice {
        const LEGENDRE_EXP: U256 =
            U256::from_be_hex("3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff6");
        !self.0.pow(&LEGENDRE_EXP).ct_eq(&Self::MINUS_ONE.0)
    }

    /// Computes the non-negative square root of `u/v`.
    ///
    /// Returns `(Choice(1), sqrt(u/v))` when `u/v` is a square (including
    /// `u = 0`), and `(Choice(0), garbage)` otherwise. When `v = 0` and
    /// `u != 0` the ratio is treated as a non-square.
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        let v3 = v.square() * v;
        let v7 = v3.square() * v;
        let mut r = (u * v3) * (u * v7).pow_p58();
        let check = v * r.square();

        let neg_u = -u;
        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&neg_u);
        let flipped_sign_sqrt_i = check.ct_eq(&(neg_u * Self::SQRT_M1));

        let r_prime = r * Self::SQRT_M1;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        (correct_sign_sqrt | flipped_sign_sqrt, r)
    }

    /// Elligator 2 onto Curve25519, as used by libsodium's `from_uniform`.
    /// Returns the Montgomery u-coordinate.
    pub(crate) fn map_to_curve_elligator2(&self) -> FieldElement {
        let a = Self::MONTGOMERY_A;

        let rr2 = self.square().double() + Self::ONE; // 1 + 2r^2
        let mut x = -(a * rr2.invert()); // -A / (1 + 2r^2)

        let x2 = x.square();
        let e = x2 * x + x + x2 * a; // x^3 + A x^2 + x
        let e_is_nonsquare = !e.is_square();

        // x = -x - A when e is not a square
        x.conditional_negate(e_is_nonsquare);
        let mut offset = Self::ZERO;
        offset.conditional_assign(&a, e_is_nonsquare);
        x - offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn get_constants() {
        assert_eq!(-FieldElement::ONE, FieldElement::MINUS_ONE);
        assert_eq!(FieldElement::SQRT_M1.square(), FieldElement::MINUS_ONE);
        assert_eq!(FieldElement::EDWARDS_D.double(), FieldElement::EDWARDS_D2);

        // d * 121666 == -121665
        let num = FieldElement(ResidueType::new(&U256::from_u64(121665)));
        let den = FieldElement(ResidueType::new(&U256::from_u64(121666)));
        assert_eq!(FieldElement::EDWARDS_D * den, -num);
    }

    #[test]
    fn invert() {
        let mut x = FieldElement::ONE;
        for _ in 0..50 {
            x = x.double() + FieldElement::ONE;
            assert_eq!(x * x.invert(), FieldElement::ONE);
        }
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn sqrt_ratio() {
        let four = FieldElement::from_bytes(&hex!(
            "0400000000000000000000000000000000000000000000000000000000000000"
        ));
        let two = FieldElement::ONE.double();

        let (was_square, root) = FieldElement::sqrt_ratio_i(&four, &FieldElement::ONE);
        assert!(bool::from(was_square));
        assert_eq!(root, two);

        // 4 / 16 = 1/4 and the root is the even one of +-1/2
        let sixteen = four.square();
        let (was_square, root) = FieldElement::sqrt_ratio_i(&four, &sixteen);
        assert!(bool::from(was_square));
        assert_eq!(root.square() * four, FieldElement::ONE);
        assert!(!bool::from(root.is_negative()));

        // 2 is not a square modulo p
        let (was_square, _) = FieldElement::sqrt_ratio_i(&two, &FieldElement::ONE);
        assert!(!bool::from(was_square));

        let (was_square, root) = FieldElement::sqrt_ratio_i(&FieldElement::ZERO, &two);
        assert!(bool::from(was_square));
        assert_eq!(root, FieldElement::ZERO);

        let (was_square, _) = FieldElement::sqrt_ratio_i(&two, &FieldElement::ZERO);
        assert!(!bool::from(was_square));
    }

    #[test]
    fn is_square() {
        assert!(bool::from(FieldElement::ZERO.is_square()));
        assert!(bool::from(FieldElement::MINUS_ONE.is_square()));
        assert!(!bool::from(FieldElement::ONE.double().is_square()));
    }

    #[test]
    fn canonical_bytes() {
        let p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(bool::from(FieldElement::from_canonical_bytes(&p).is_none()));

        let p_minus_one = hex!("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        let x = FieldElement::from_canonical_bytes(&p_minus_one).unwrap();
        assert_eq!(x, FieldElement::MINUS_ONE);
        assert_eq!(x.to_bytes(), p_minus_one);

        // Non-canonical input is reduced by from_bytes
        let p_plus_two = hex!("efffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(FieldElement::from_bytes(&p_plus_two), FieldElement::ONE.double());
    }
}
