//! The polynomial expression tree: a closed sum of node variants over `z`
//! (the plane coordinate, `Arg`) and `w` (the root being solved for, `Val`),
//! with complex coefficients.
//!
//! Smart constructors fold constants and eliminate identities at build time
//! (`0 + x = x`, `x * 1 = x`, `pow(x, 0) = 1`, ...) so that the tree handed to
//! codegen is already in the simplified form the differentiation rules
//! assume. Canonical zero/one/Arg/Val singletons are shared via `Arc` and
//! compared by pointer identity, mirroring how the node constructors in the
//! reference engine pick the shared `const0()`/`const1()` instances.

use num_complex::Complex64;
use std::sync::{Arc, OnceLock};

/// A node in the polynomial expression tree.
#[derive(Debug)]
pub enum PolyKind {
    /// A complex literal.
    Num(Complex64),
    /// The plane coordinate `z`.
    Arg,
    /// The unknown `w` being solved for.
    Val,
    /// `a + b`.
    Add(Poly, Poly),
    /// `a - b`.
    Sub(Poly, Poly),
    /// `-a`.
    Neg(Poly),
    /// `a * b`.
    Mul(Poly, Poly),
    /// `a ^ k`, k in `[0, 65535]`.
    Pow(Poly, u16),
}

/// A shared handle to a polynomial expression node.
pub type Poly = Arc<PolyKind>;

fn zero_cell() -> &'static Poly {
    static ZERO: OnceLock<Poly> = OnceLock::new();
    ZERO.get_or_init(|| Arc::new(PolyKind::Num(Complex64::new(0.0, 0.0))))
}

fn one_cell() -> &'static Poly {
    static ONE: OnceLock<Poly> = OnceLock::new();
    ONE.get_or_init(|| Arc::new(PolyKind::Num(Complex64::new(1.0, 0.0))))
}

fn arg_cell() -> &'static Poly {
    static ARG: OnceLock<Poly> = OnceLock::new();
    ARG.get_or_init(|| Arc::new(PolyKind::Arg))
}

fn val_cell() -> &'static Poly {
    static VAL: OnceLock<Poly> = OnceLock::new();
    VAL.get_or_init(|| Arc::new(PolyKind::Val))
}

/// The canonical `Num(0)` singleton.
#[must_use]
pub fn zero() -> Poly {
    Arc::clone(zero_cell())
}

/// The canonical `Num(1)` singleton.
#[must_use]
pub fn one() -> Poly {
    Arc::clone(one_cell())
}

/// The canonical `Arg` (`z`) singleton.
#[must_use]
pub fn arg() -> Poly {
    Arc::clone(arg_cell())
}

/// The canonical `Val` (`w`) singleton.
#[must_use]
pub fn val() -> Poly {
    Arc::clone(val_cell())
}

/// A complex literal, canonicalized to the shared zero/one singletons.
#[must_use]
pub fn num(c: Complex64) -> Poly {
    if c == Complex64::new(0.0, 0.0) {
        zero()
    } else if c == Complex64::new(1.0, 0.0) {
        one()
    } else {
        Arc::new(PolyKind::Num(c))
    }
}

fn as_num(p: &Poly) -> Option<Complex64> {
    match &**p {
        PolyKind::Num(c) => Some(*c),
        _ => None,
    }
}

fn is_zero(p: &Poly) -> bool {
    Arc::ptr_eq(p, zero_cell()) || as_num(p) == Some(Complex64::new(0.0, 0.0))
}

fn is_one(p: &Poly) -> bool {
    Arc::ptr_eq(p, one_cell()) || as_num(p) == Some(Complex64::new(1.0, 0.0))
}

/// `a + b`, folding constants and eliminating `0 + x = x`, `x + 0 = x`.
#[must_use]
pub fn add(a: Poly, b: Poly) -> Poly {
    if is_zero(&a) {
        return b;
    }
    if is_zero(&b) {
        return a;
    }
    if let (Some(x), Some(y)) = (as_num(&a), as_num(&b)) {
        return num(x + y);
    }
    Arc::new(PolyKind::Add(a, b))
}

/// `a - b`, folding constants and eliminating `x - 0 = x`, `0 - x = -x`.
#[must_use]
pub fn sub(a: Poly, b: Poly) -> Poly {
    if is_zero(&b) {
        return a;
    }
    if is_zero(&a) {
        return neg(b);
    }
    if let (Some(x), Some(y)) = (as_num(&a), as_num(&b)) {
        return num(x - y);
    }
    Arc::new(PolyKind::Sub(a, b))
}

/// `-a`, folded immediately if `a` is a constant.
#[must_use]
pub fn neg(a: Poly) -> Poly {
    if let Some(x) = as_num(&a) {
        return num(-x);
    }
    Arc::new(PolyKind::Neg(a))
}

/// `a * b`, folding constants and eliminating `0 * x = 0`, `1 * x = x`.
#[must_use]
pub fn mul(a: Poly, b: Poly) -> Poly {
    if is_zero(&a) {
        return a;
    }
    if is_zero(&b) {
        return b;
    }
    if is_one(&a) {
        return b;
    }
    if is_one(&b) {
        return a;
    }
    if let (Some(x), Some(y)) = (as_num(&a), as_num(&b)) {
        return num(x * y);
    }
    Arc::new(PolyKind::Mul(a, b))
}

/// `base ^ exp`, folding `exp == 0 -> 1`, `exp == 1 -> base`, and constant
/// bases via repeated multiplication.
#[must_use]
pub fn pow(base: Poly, exp: u16) -> Poly {
    if exp == 0 {
        return one();
    }
    if exp == 1 {
        return base;
    }
    if let Some(x) = as_num(&base) {
        let mut acc = Complex64::new(1.0, 0.0);
        for _ in 0..exp {
            acc *= x;
        }
        return num(acc);
    }
    Arc::new(PolyKind::Pow(base, exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_plus_x_is_x() {
        let x = arg();
        assert!(Arc::ptr_eq(&add(zero(), Arc::clone(&x)), &x));
        assert!(Arc::ptr_eq(&add(Arc::clone(&x), zero()), &x));
    }

    #[test]
    fn x_times_zero_is_zero() {
        let x = arg();
        assert!(Arc::ptr_eq(&mul(x, zero()), zero_cell()));
    }

    #[test]
    fn one_times_x_is_x() {
        let x = val();
        assert!(Arc::ptr_eq(&mul(one(), Arc::clone(&x)), &x));
    }

    #[test]
    fn pow_zero_is_one() {
        assert!(Arc::ptr_eq(&pow(val(), 0), one_cell()));
    }

    #[test]
    fn pow_one_is_base() {
        let x = arg();
        assert!(Arc::ptr_eq(&pow(Arc::clone(&x), 1), &x));
    }

    #[test]
    fn constant_subtrees_fold() {
        let sum = add(num(Complex64::new(2.0, 0.0)), num(Complex64::new(3.0, 0.0)));
        assert_eq!(as_num(&sum), Some(Complex64::new(5.0, 0.0)));
    }

    #[test]
    fn constant_pow_folds() {
        let p = pow(num(Complex64::new(2.0, 0.0)), 3);
        assert_eq!(as_num(&p), Some(Complex64::new(8.0, 0.0)));
    }

    #[test]
    fn zero_minus_x_is_negation() {
        let x = val();
        let r = sub(zero(), Arc::clone(&x));
        match &*r {
            PolyKind::Neg(inner) => assert!(Arc::ptr_eq(inner, &x)),
            _ => panic!("expected Neg"),
        }
    }

    // Property-based checks that the simplification laws of the smart
    // constructors hold for arbitrary finite coefficients, not just the
    // literal cases exercised above.
    quickcheck::quickcheck! {
        fn zero_is_additive_identity(re: f64, im: f64) -> quickcheck::TestResult {
            if !re.is_finite() || !im.is_finite() {
                return quickcheck::TestResult::discard();
            }
            let x = num(Complex64::new(re, im));
            quickcheck::TestResult::from_bool(
                Arc::ptr_eq(&add(zero(), Arc::clone(&x)), &x) && Arc::ptr_eq(&add(Arc::clone(&x), zero()), &x),
            )
        }

        fn constant_add_always_folds(a_re: f64, a_im: f64, b_re: f64, b_im: f64) -> quickcheck::TestResult {
            if ![a_re, a_im, b_re, b_im].iter().all(|v| v.is_finite()) {
                return quickcheck::TestResult::discard();
            }
            let a = Complex64::new(a_re, a_im);
            let b = Complex64::new(b_re, b_im);
            let sum = add(num(a), num(b));
            quickcheck::TestResult::from_bool(matches!(&*sum, PolyKind::Num(c) if *c == a + b))
        }

        fn pow_zero_always_folds_to_one(re: f64, im: f64) -> quickcheck::TestResult {
            if !re.is_finite() || !im.is_finite() {
                return quickcheck::TestResult::discard();
            }
            let base = if re == 0.0 && im == 0.0 { arg() } else { num(Complex64::new(re, im)) };
            quickcheck::TestResult::from_bool(Arc::ptr_eq(&pow(base, 0), one_cell()))
        }
    }
}
