//! Internal macros.
//!
//! Each arithmetic type implements its operator once, for `&LHS op &RHS`.
//! These macros fill in the owned and mixed-borrow combinations on top of it.

/// Define the owned and mixed-borrow variants of a binary operator from the
/// `&LHS op &RHS` implementation.
macro_rules! define_binop_variants {
    ($trait:ident, $method:ident, LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> $trait<&'b $rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: &'b $rhs) -> $out {
                <&$lhs as $trait<&$rhs>>::$method(&self, rhs)
            }
        }

        impl<'a> $trait<$rhs> for &'a $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                <&$lhs as $trait<&$rhs>>::$method(self, &rhs)
            }
        }

        impl $trait<$rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                <&$lhs as $trait<&$rhs>>::$method(&self, &rhs)
            }
        }
    };
}

/// Define `OpAssign<RHS>` and `OpAssign<&RHS>` in terms of the binary operator.
macro_rules! define_assign_variants {
    ($trait:ident, $method:ident, $op:tt, LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl $trait<$rhs> for $lhs {
            fn $method(&mut self, rhs: $rhs) {
                *self = &*self $op &rhs;
            }
        }

        impl<'b> $trait<&'b $rhs> for $lhs {
            fn $method(&mut self, rhs: &'b $rhs) {
                *self = &*self $op rhs;
            }
        }
    };
}

macro_rules! define_add_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        define_binop_variants!(Add, add, LHS = $lhs, RHS = $rhs, Output = $out);
        define_assign_variants!(AddAssign, add_assign, +, LHS = $lhs, RHS = $rhs);
    };
}

macro_rules! define_sub_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        define_binop_variants!(Sub, sub, LHS = $lhs, RHS = $rhs, Output = $out);
        define_assign_variants!(SubAssign, sub_assign, -, LHS = $lhs, RHS = $rhs);
    };
}

/// `Mul` variants. Assignment is only generated when the output type matches
/// the left-hand side, so it is requested separately.
macro_rules! define_mul_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        define_binop_variants!(Mul, mul, LHS = $lhs, RHS = $rhs, Output = $out);
    };
}

macro_rules! define_mul_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        define_assign_variants!(MulAssign, mul_assign, *, LHS = $lhs, RHS = $rhs);
    };
}
