//! Compiles a `Poly` tree into a flat `Instruction` program and executes it
//! to produce `(F, dF/dw, d^2F/dw^2)` at a given `(z, w)`, alongside the
//! polynomial's degree in `w`.

pub mod instruction;

use crate::core::poly::Poly;
use crate::core::visitor::{degree_of, walk_poly, PolyVisitor};
use instruction::{Instruction, Triple};
use num_complex::Complex64;

/// Post-order bytecode emitter: `walk_poly` drives this with `Output = ()`,
/// so each `visit_*` simply appends the instruction for the node it was
/// just handed, after its children's instructions are already on the tape.
#[derive(Default)]
struct Emitter {
    program: Vec<Instruction>,
}

impl PolyVisitor for Emitter {
    type Output = ();

    fn visit_num(&mut self, c: Complex64) {
        self.program.push(Instruction::PushNum(c));
    }

    fn visit_arg(&mut self) {
        self.program.push(Instruction::PushArg);
    }

    fn visit_val(&mut self) {
        self.program.push(Instruction::PushVal);
    }

    fn visit_neg(&mut self, (): ()) {
        self.program.push(Instruction::Neg);
    }

    fn visit_add(&mut self, (): (), (): ()) {
        self.program.push(Instruction::Add);
    }

    fn visit_sub(&mut self, (): (), (): ()) {
        self.program.push(Instruction::Sub);
    }

    fn visit_mul(&mut self, (): (), (): ()) {
        self.program.push(Instruction::Mul);
    }

    fn visit_pow(&mut self, (): (), exp: u16) {
        self.program.push(Instruction::Pow(exp));
    }
}

/// A compiled formula: a flat instruction tape plus the polynomial's degree
/// in `w`, ready to be evaluated repeatedly at different `(z, w)` pairs.
#[derive(Debug, Clone)]
pub struct Kernel {
    program: Vec<Instruction>,
    degree: u32,
}

impl Kernel {
    /// Compile a `Poly` tree into a `Kernel`.
    #[must_use]
    pub fn compile(root: &Poly) -> Self {
        let mut emitter = Emitter::default();
        walk_poly(root, &mut emitter);
        Self { program: emitter.program, degree: degree_of(root) }
    }

    /// The polynomial's degree in `w`, i.e. the number of roots Laguerre's
    /// method must find.
    #[must_use]
    pub const fn degree(&self) -> u32 {
        self.degree
    }

    /// Evaluate `F(z, w)`, `dF/dw`, and `d^2F/dw^2` by running the compiled
    /// tape over a `Triple` stack.
    #[must_use]
    pub fn eval(&self, z: Complex64, w: Complex64) -> (Complex64, Complex64, Complex64) {
        let mut stack: Vec<Triple> = Vec::with_capacity(self.program.len());
        for instr in &self.program {
            match instr {
                Instruction::PushNum(c) => stack.push(Triple::constant(*c)),
                Instruction::PushArg => stack.push(Triple::arg(z)),
                Instruction::PushVal => stack.push(Triple::val(w)),
                Instruction::Neg => {
                    let a = pop(&mut stack);
                    stack.push(-a);
                }
                Instruction::Add => {
                    let b = pop(&mut stack);
                    let a = pop(&mut stack);
                    stack.push(a + b);
                }
                Instruction::Sub => {
                    let b = pop(&mut stack);
                    let a = pop(&mut stack);
                    stack.push(a - b);
                }
                Instruction::Mul => {
                    let b = pop(&mut stack);
                    let a = pop(&mut stack);
                    stack.push(a * b);
                }
                Instruction::Pow(k) => {
                    let a = pop(&mut stack);
                    stack.push(a.pow(*k));
                }
            }
        }
        let result = pop(&mut stack);
        (result.d0, result.d1, result.d2)
    }
}

fn pop(stack: &mut Vec<Triple>) -> Triple {
    stack.pop().expect("kernel program is well-formed: stack never underflows")
}
