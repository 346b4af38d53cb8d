//! Laguerre's method: given a compiled kernel and a starting guess, converge
//! on a root of `F(z, w) = 0` in `w`.
//!
//! Each iteration needs a square root of a complex discriminant, but the two
//! branch choices don't converge equally well: picking the branch whose
//! argument is closer to `b`'s tends to avoid catastrophic cancellation in
//! the denominator. `dir_sqrt` picks that branch explicitly instead of
//! always taking the principal root.

use crate::kernel::Kernel;
use num_complex::Complex64;

/// L1 norm `|Re(x)| + |Im(x)|`.
fn l1(x: Complex64) -> f64 {
    x.re.abs() + x.im.abs()
}

/// The square root of `x` whose direction is closer to `b`.
///
/// Computed directly from the real and imaginary halves rather than by
/// negating the principal root, so it stays accurate even when `x` is near
/// the branch cut.
#[must_use]
#[allow(clippy::many_single_char_names, reason = "mathematical variables matching the formula's standard notation")]
pub fn dir_sqrt(x: Complex64, b: Complex64) -> Complex64 {
    let h = x.norm();
    let r = f64::midpoint(h, x.re).sqrt();
    let s = f64::midpoint(h, -x.re).sqrt().copysign(x.im);
    let sign = r.mul_add(b.re, s * b.im).signum();
    Complex64::new(sign * r, sign * s)
}

/// Refine `w0` into a root of `F(z, ·)` using Laguerre's method.
///
/// Terminates early once `|F(z,w)|₁` is within machine epsilon of zero, once
/// the correction step shrinks below `10⁻⁴ · (1 + |w|₁)`, or after
/// `MAX_ITERATIONS`; the estimate at the cap is returned without signaling
/// an error.
#[must_use]
#[allow(clippy::many_single_char_names, reason = "mathematical variables matching the formula's standard notation")]
#[allow(clippy::suspicious_operation_groupings, reason = "G^2 - d2/d0 and (n-1)(nH - G^2) per Laguerre's method, not a typo")]
pub fn laguerre(kernel: &Kernel, z: Complex64, w0: Complex64) -> Complex64 {
    let n = f64::from(kernel.degree());
    let mut w = w0;

    for _ in 0..crate::MAX_LAGUERRE_ITERATIONS {
        let (f, f1, f2) = kernel.eval(z, w);
        if l1(f) < f64::EPSILON {
            break;
        }

        let g = f1 / f;
        let h = g * g - f2 / f;
        let discriminant = (n - 1.0) * (n * h - g * g);
        let denom = g + dir_sqrt(discriminant, g);
        let step = n / denom;
        w -= step;

        if step.re.is_nan() || step.im.is_nan() || l1(step) <= 1e-4 * (1.0 + l1(w)) {
            break;
        }
    }

    w
}
