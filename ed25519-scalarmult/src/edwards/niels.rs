//! Cached point forms used as the right-hand operand of additions.

#[cfg(test)]
use super::extensible::ExtensiblePoint;
use crate::field::FieldElement;
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable};
use zeroize::DefaultIsZeroes;

/// (Y+X, Y-X, Z, 2dT) of a point in extended coordinates, with Z doubled so
/// that readdition saves one field doubling
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectiveNielsPoint {
    pub(crate) Y_plus_X: FieldElement,
    pub(crate) Y_minus_X: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T2d: FieldElement,
}

impl Default for ProjectiveNielsPoint {
    fn default() -> ProjectiveNielsPoint {
        ProjectiveNielsPoint::IDENTITY
    }
}

impl DefaultIsZeroes for ProjectiveNielsPoint {}

impl ConditionallySelectable for ProjectiveNielsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectiveNielsPoint {
            Y_plus_X: FieldElement::conditional_select(&a.Y_plus_X, &b.Y_plus_X, choice),
            Y_minus_X: FieldElement::conditional_select(&a.Y_minus_X, &b.Y_minus_X, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T2d: FieldElement::conditional_select(&a.T2d, &b.T2d, choice),
        }
    }
}

impl ConditionallyNegatable for ProjectiveNielsPoint {
    fn conditional_negate(&mut self, choice: Choice) {
        FieldElement::conditional_swap(&mut self.Y_minus_X, &mut self.Y_plus_X, choice);
        self.T2d.conditional_negate(choice);
    }
}

impl ProjectiveNielsPoint {
    pub(crate) const IDENTITY: ProjectiveNielsPoint = ProjectiveNielsPoint {
        Y_plus_X: FieldElement::ONE,
        Y_minus_X: FieldElement::ONE,
        Z: FieldElement::TWO,
        T2d: FieldElement::ZERO,
    };

    /// Recovers the point, up to projective scaling
    #[cfg(test)]
    pub(crate) fn to_extensible(self) -> ExtensiblePoint {
        let A = self.Y_plus_X - self.Y_minus_X;
        let B = self.Y_plus_X + self.Y_minus_X;
        ExtensiblePoint {
            X: self.Z * A,
            Y: self.Z * B,
            Z: self.Z.square(),
            T1: A,
            T2: B,
        }
    }
}

/// (y+x, y-x, 2dxy) of an affine point. The basepoint table stores these.
#[derive(Copy, Clone, Debug)]
pub(crate) struct AffineNielsPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

impl Default for AffineNielsPoint {
    fn default() -> AffineNielsPoint {
        AffineNielsPoint::IDENTITY
    }
}

impl DefaultIsZeroes for AffineNielsPoint {}

impl ConditionallySelectable for AffineNielsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        AffineNielsPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }
}

impl ConditionallyNegatable for AffineNielsPoint {
    fn conditional_negate(&mut self, choice: Choice) {
        FieldElement::conditional_swap(&mut self.y_minus_x, &mut self.y_plus_x, choice);
        self.xy2d.conditional_negate(choice);
    }
}

impl AffineNielsPoint {
    pub(crate) const IDENTITY: AffineNielsPoint = AffineNielsPoint {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdwardsPoint;

    #[test]
    fn identity() {
        assert_eq!(
            ProjectiveNielsPoint::IDENTITY.to_extensible().to_extended(),
            EdwardsPoint::IDENTITY,
        );
        assert_eq!(
            EdwardsPoint::IDENTITY
                .to_projective_niels()
                .to_extensible()
                .to_extended(),
            EdwardsPoint::IDENTITY,
        );
        let sum = ExtensiblePoint::IDENTITY.add_affine_niels(&AffineNielsPoint::IDENTITY);
        assert_eq!(sum.to_extended(), EdwardsPoint::IDENTITY);
    }

    #[test]
    fn test_conditional_negate() {
        let bp = EdwardsPoint::GENERATOR;

        let mut bp_neg = bp.to_projective_niels();
        bp_neg.conditional_negate(1.into());

        let expect_identity = bp.to_extensible().add_projective_niels(&bp_neg);
        assert_eq!(EdwardsPoint::IDENTITY, expect_identity.to_extended());

        let mut bp_affine = bp.to_affine().to_affine_niels();
        bp_affine.conditional_negate(1.into());
        let expect_identity = bp.to_extensible().add_affine_niels(&bp_affine);
        assert_eq!(EdwardsPoint::IDENTITY, expect_identity.to_extended());
    }

    #[test]
    fn round_trip() {
        let p = EdwardsPoint::GENERATOR.double();
        assert_eq!(p.to_projective_niels().to_extensible().to_extended(), p);
    }
}
