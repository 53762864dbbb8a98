use super::extended::EdwardsPoint;
use super::niels::{AffineNielsPoint, ProjectiveNielsPoint};
use crate::field::FieldElement;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// The representation the group operations run on.
// (X, Y, Z, T1, T2) with x = X/Z, y = Y/Z and T1 * T2 = T = XY/Z.
// Keeping T split in two saves a multiplication on every doubling.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ExtensiblePoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T1: FieldElement,
    pub(crate) T2: FieldElement,
}

impl ConstantTimeEq for ExtensiblePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let XZ = self.X * other.Z;
        let ZX = self.Z * other.X;

        let YZ = self.Y * other.Z;
        let ZY = self.Z * other.Y;

        XZ.ct_eq(&ZX) & YZ.ct_eq(&ZY)
    }
}

impl PartialEq for ExtensiblePoint {
    fn eq(&self, other: &ExtensiblePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ExtensiblePoint {}

impl Default for ExtensiblePoint {
    fn default() -> ExtensiblePoint {
        ExtensiblePoint::IDENTITY
    }
}

impl DefaultIsZeroes for ExtensiblePoint {}

impl ConditionallySelectable for ExtensiblePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ExtensiblePoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T1: FieldElement::conditional_select(&a.T1, &b.T1, choice),
            T2: FieldElement::conditional_select(&a.T2, &b.T2, choice),
        }
    }
}

impl ExtensiblePoint {
    pub(crate) const IDENTITY: ExtensiblePoint = ExtensiblePoint {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T1: FieldElement::ZERO,
        T2: FieldElement::ONE,
    };

    /// Doubles a point
    /// (3.3) https://iacr.org/archive/asiacrypt2008/53500329/53500329.pdf
    /// with a = -1
    pub(crate) fn double(&self) -> ExtensiblePoint {
        let A = self.X.square();
        let B = self.Y.square();
        let C = self.Z.square().double();
        let D = -A;
        let E = (self.X + self.Y).square() - A - B;
        let G = D + B;
        let F = G - C;
        let H = D - B;
        ExtensiblePoint {
            X: E * F,
            Y: G * H,
            Z: F * G,
            T1: E,
            T2: H,
        }
    }

    /// Adds an extended point, returning an extensible point
    /// (3.1) https://iacr.org/archive/asiacrypt2008/53500329/53500329.pdf
    pub(crate) fn add_extended(&self, other: &EdwardsPoint) -> ExtensiblePoint {
        let A = self.X * other.X;
        let B = self.Y * other.Y;
        let C = self.T1 * self.T2 * other.T * FieldElement::EDWARDS_D;
        let D = self.Z * other.Z;
        let E = (self.X + self.Y) * (other.X + other.Y) - A - B;
        let F = D - C;
        let G = D + C;
        let H = B + A;
        ExtensiblePoint {
            X: E * F,
            Y: G * H,
            Z: F * G,
            T1: E,
            T2: H,
        }
    }

    /// Adds a ProjectiveNiels point. The cached 2Z and 2dT absorb the
    /// factor of two from the unified formula.
    /// Cost 8M
    pub(crate) fn add_projective_niels(&self, other: &ProjectiveNielsPoint) -> ExtensiblePoint {
        let Z = self.Z * other.Z;

        let A = (self.Y - self.X) * other.Y_minus_X;
        let B = (self.Y + self.X) * other.Y_plus_X;
        let C = other.T2d * self.T1 * self.T2;
        let D = B + A;
        let E = B - A;
        let F = Z - C;
        let G = Z + C;
        ExtensiblePoint {
            X: E * F,
            Y: G * D,
            Z: F * G,
            T1: E,
            T2: D,
        }
    }

    /// Adds an AffineNiels point (Z2 = 1)
    pub(crate) fn add_affine_niels(&self, other: &AffineNielsPoint) -> ExtensiblePoint {
        let Z = self.Z.double();

        let A = (self.Y - self.X) * other.y_minus_x;
        let B = (self.Y + self.X) * other.y_plus_x;
        let C = other.xy2d * self.T1 * self.T2;
        let D = B + A;
        let E = B - A;
        let F = Z - C;
        let G = Z + C;
        ExtensiblePoint {
            X: E * F,
            Y: G * D,
            Z: F * G,
            T1: E,
            T2: D,
        }
    }

    pub(crate) fn to_extended(self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
            T: self.T1 * self.T2,
        }
    }

    pub(crate) fn to_projective_niels(self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: self.Y + self.X,
            Y_minus_X: self.Y - self.X,
            Z: self.Z.double(),
            T2d: self.T1 * self.T2 * FieldElement::EDWARDS_D2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_matches_add() {
        let g = EdwardsPoint::GENERATOR;
        let doubled = g.to_extensible().double();
        let added = g.to_extensible().add_extended(&g);
        assert_eq!(doubled, added);
        assert!(bool::from(doubled.to_extended().is_on_curve()));
    }

    #[test]
    fn niels_additions_agree() {
        let g = EdwardsPoint::GENERATOR;
        let p = g.double().double() + g;

        let a = p.to_extensible().add_extended(&g);
        let b = p.to_extensible().add_projective_niels(&g.to_projective_niels());
        let c = p
            .to_extensible()
            .add_affine_niels(&g.to_affine().to_affine_niels());

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(bool::from(c.to_extended().is_on_curve()));
    }

    #[test]
    fn identity_is_neutral() {
        let g = EdwardsPoint::GENERATOR;
        let sum = ExtensiblePoint::IDENTITY.add_extended(&g);
        assert_eq!(sum.to_extended(), g);

        let sum = g.to_extensible().add_projective_niels(&ProjectiveNielsPoint::IDENTITY);
        assert_eq!(sum.to_extended(), g);

        assert_eq!(ExtensiblePoint::IDENTITY.double(), ExtensiblePoint::IDENTITY);
    }
}
