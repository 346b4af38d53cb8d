//! Complex-plane domain-coloring renderer.
//!
//! A formula in `z` (the plane coordinate) and `w` (the unknown) is parsed
//! into a polynomial expression tree, compiled into a kernel computing
//! `(F, ∂F/∂w, ∂²F/∂w²)`, and solved per-pixel for a root of `F(z, w) = 0`
//! via Laguerre's method. Roots are seeded across the image with a
//! breadth-first flood from a user-chosen pixel so neighboring pixels stay
//! on the same root branch, then mapped to color by hue/lightness.
//!
//! The entry point is [`redraw`]: it validates a [`PlotData`] request,
//! drives the whole pipeline, and reports timing and outcome in a
//! [`RedrawInfo`].

#![forbid(unsafe_code)]

pub mod color;
pub mod core;
pub mod flood;
pub mod kernel;
pub mod parser;
pub mod plot;
pub mod solver;

#[cfg(test)]
mod fuzz;

pub use color::complex2rgb_hl;
pub use core::error::{DrawError, Span};
pub use core::poly::Poly;
pub use kernel::Kernel;
pub use plot::{redraw, PlotData, RedrawInfo, Status};
pub use solver::laguerre;

/// Hard cap on Laguerre iterations per pixel before the solver returns its
/// last estimate without signaling an error.
pub const MAX_LAGUERRE_ITERATIONS: u32 = 100;

/// Safety cap on nested parentheses / unary-minus chains in a formula.
pub const MAX_PARSE_DEPTH: u32 = 256;
