//! The polynomial core: expression tree, visitor framework, and error types
//! shared by the parser, kernel, and solver.

pub mod error;
pub mod poly;
pub mod visitor;

pub use error::{DrawError, Span};
pub use poly::{Poly, PolyKind};
pub use visitor::{degree_of, walk_poly, PolyVisitor};
