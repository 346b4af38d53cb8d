//! Visitor pattern for `Poly` AST traversal.
//!
//! Unlike a general expression tree where a visitor may want to skip
//! subtrees, every consumer of the `Poly` AST (codegen, degree computation)
//! is a post-order fold: each node's result depends on its children's
//! results having already been computed. `walk_poly` therefore always
//! recurses fully and hands each `visit_*` method its children's outputs
//! directly, rather than returning a "continue?" bool the way a general
//! pre-order walker would.

use crate::core::poly::{Poly, PolyKind};

/// A post-order fold over the `Poly` AST.
///
/// Implement this to compute some `Output` value bottom-up: codegen
/// implements it with `Output = ()` to emit bytecode, degree computation
/// implements it with `Output = u32` to fold child degrees into a parent
/// degree.
pub trait PolyVisitor {
    /// The value produced for each node.
    type Output;

    /// Visit a complex literal.
    fn visit_num(&mut self, c: num_complex::Complex64) -> Self::Output;
    /// Visit the `Arg` (`z`) leaf.
    fn visit_arg(&mut self) -> Self::Output;
    /// Visit the `Val` (`w`) leaf.
    fn visit_val(&mut self) -> Self::Output;
    /// Visit a negation, given its operand's already-computed output.
    fn visit_neg(&mut self, inner: Self::Output) -> Self::Output;
    /// Visit an addition, given both operands' outputs.
    fn visit_add(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;
    /// Visit a subtraction, given both operands' outputs.
    fn visit_sub(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;
    /// Visit a multiplication, given both operands' outputs.
    fn visit_mul(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;
    /// Visit a power, given the base's output and the integer exponent.
    fn visit_pow(&mut self, base: Self::Output, exp: u16) -> Self::Output;
}

/// Walk a `Poly` tree post-order, folding it into a single `V::Output`.
pub fn walk_poly<V: PolyVisitor>(node: &Poly, visitor: &mut V) -> V::Output {
    match &**node {
        PolyKind::Num(c) => visitor.visit_num(*c),
        PolyKind::Arg => visitor.visit_arg(),
        PolyKind::Val => visitor.visit_val(),
        PolyKind::Neg(a) => {
            let inner = walk_poly(a, visitor);
            visitor.visit_neg(inner)
        }
        PolyKind::Add(a, b) => {
            let lhs = walk_poly(a, visitor);
            let rhs = walk_poly(b, visitor);
            visitor.visit_add(lhs, rhs)
        }
        PolyKind::Sub(a, b) => {
            let lhs = walk_poly(a, visitor);
            let rhs = walk_poly(b, visitor);
            visitor.visit_sub(lhs, rhs)
        }
        PolyKind::Mul(a, b) => {
            let lhs = walk_poly(a, visitor);
            let rhs = walk_poly(b, visitor);
            visitor.visit_mul(lhs, rhs)
        }
        PolyKind::Pow(a, k) => {
            let base = walk_poly(a, visitor);
            visitor.visit_pow(base, *k)
        }
    }
}

/// Computes the polynomial's degree in `w`.
///
/// `Num`/`Arg` contribute 0, `Val` contributes 1, `Add`/`Sub` take the max of
/// both sides, `Neg` passes through, `Mul` sums, `Pow` multiplies by the
/// exponent.
#[derive(Default)]
pub struct DegreeVisitor;

impl PolyVisitor for DegreeVisitor {
    type Output = u32;

    fn visit_num(&mut self, _c: num_complex::Complex64) -> u32 {
        0
    }

    fn visit_arg(&mut self) -> u32 {
        0
    }

    fn visit_val(&mut self) -> u32 {
        1
    }

    fn visit_neg(&mut self, inner: u32) -> u32 {
        inner
    }

    fn visit_add(&mut self, lhs: u32, rhs: u32) -> u32 {
        lhs.max(rhs)
    }

    fn visit_sub(&mut self, lhs: u32, rhs: u32) -> u32 {
        lhs.max(rhs)
    }

    fn visit_mul(&mut self, lhs: u32, rhs: u32) -> u32 {
        lhs + rhs
    }

    fn visit_pow(&mut self, base: u32, exp: u16) -> u32 {
        base * u32::from(exp)
    }
}

/// Computes the degree in `w` of a `Poly` tree.
#[must_use]
pub fn degree_of(root: &Poly) -> u32 {
    walk_poly(root, &mut DegreeVisitor)
}
