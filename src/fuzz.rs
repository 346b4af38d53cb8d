//! Fuzz-style cross-checks of the compiled kernel against an independent,
//! directly-recursive reference evaluator over the same `Poly` tree.
//!
//! The kernel (`src/kernel`) computes `(F, F', F'')` by interpreting a flat
//! bytecode tape. This module re-derives the same triple by walking the AST
//! recursively with its own copy of the derivative rules, so a bug in the
//! bytecode emitter or the stack-machine evaluator that happens to agree with
//! the reference on the hand-picked unit tests elsewhere would still be
//! caught here across many random trees.

use crate::core::poly::{add, arg, mul, neg, num, pow, sub, val, Poly, PolyKind};
use crate::kernel::Kernel;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const MAX_DEPTH: u32 = 4;
const NUM_TREES: usize = 64;

struct PolyGenerator {
    rng: StdRng,
}

impl PolyGenerator {
    fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    fn generate(&mut self, depth: u32) -> Poly {
        if depth >= MAX_DEPTH || self.rng.random_bool(0.3) {
            return match self.rng.random_range(0..3) {
                0 => arg(),
                1 => val(),
                _ => num(Complex64::new(self.rng.random_range(-5.0..=5.0), self.rng.random_range(-5.0..=5.0))),
            };
        }
        match self.rng.random_range(0..5) {
            0 => add(self.generate(depth + 1), self.generate(depth + 1)),
            1 => sub(self.generate(depth + 1), self.generate(depth + 1)),
            2 => mul(self.generate(depth + 1), self.generate(depth + 1)),
            3 => neg(self.generate(depth + 1)),
            _ => pow(self.generate(depth + 1), self.rng.random_range(0_u16..=4)),
        }
    }
}

/// Independent recursive implementation of the §4.3 differentiation table,
/// deliberately not sharing code with `kernel::Emitter` or `Triple`.
fn reference_eval(node: &Poly, z: Complex64, w: Complex64) -> (Complex64, Complex64, Complex64) {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    match &**node {
        PolyKind::Num(c) => (*c, zero, zero),
        PolyKind::Arg => (z, zero, zero),
        PolyKind::Val => (w, one, zero),
        PolyKind::Neg(a) => {
            let (v, d1, d2) = reference_eval(a, z, w);
            (-v, -d1, -d2)
        }
        PolyKind::Add(a, b) => {
            let (av, ad1, ad2) = reference_eval(a, z, w);
            let (bv, bd1, bd2) = reference_eval(b, z, w);
            (av + bv, ad1 + bd1, ad2 + bd2)
        }
        PolyKind::Sub(a, b) => {
            let (av, ad1, ad2) = reference_eval(a, z, w);
            let (bv, bd1, bd2) = reference_eval(b, z, w);
            (av - bv, ad1 - bd1, ad2 - bd2)
        }
        PolyKind::Mul(a, b) => {
            let (av, ad1, ad2) = reference_eval(a, z, w);
            let (bv, bd1, bd2) = reference_eval(b, z, w);
            (av * bv, ad1 * bv + av * bd1, ad2 * bv + Complex64::new(2.0, 0.0) * ad1 * bd1 + av * bd2)
        }
        PolyKind::Pow(a, k) => {
            let (av, ad1, ad2) = reference_eval(a, z, w);
            match k {
                0 => (one, zero, zero),
                1 => (av, ad1, ad2),
                k => {
                    let kf = Complex64::new(f64::from(*k), 0.0);
                    let akm1 = av.powu(u32::from(k - 1));
                    let akm2 = av.powu(u32::from(k - 2));
                    (av.powu(u32::from(*k)), kf * akm1 * ad1, kf * (kf - one) * akm2 * ad1 * ad1 + kf * akm1 * ad2)
                }
            }
        }
    }
}

#[test]
fn compiled_kernel_matches_reference_evaluator_on_random_trees() {
    let mut generator = PolyGenerator::new(0xC0FF_EE42);
    for _ in 0..NUM_TREES {
        let tree = generator.generate(0);
        let kernel = Kernel::compile(&tree);

        for _ in 0..4 {
            let z = Complex64::new(generator.rng.random_range(-3.0..3.0), generator.rng.random_range(-3.0..3.0));
            let w = Complex64::new(generator.rng.random_range(-3.0..3.0), generator.rng.random_range(-3.0..3.0));

            let (kf, kf1, kf2) = kernel.eval(z, w);
            let (rf, rf1, rf2) = reference_eval(&tree, z, w);

            assert!((kf - rf).norm() < 1e-6, "F mismatch: kernel={kf}, reference={rf}");
            assert!((kf1 - rf1).norm() < 1e-6, "F' mismatch: kernel={kf1}, reference={rf1}");
            assert!((kf2 - rf2).norm() < 1e-6, "F'' mismatch: kernel={kf2}, reference={rf2}");
        }
    }
}
