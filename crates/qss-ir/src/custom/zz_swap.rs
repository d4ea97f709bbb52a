//! The ZZ-SWAP gate.

use std::fmt;

use num_complex::Complex64;

use crate::circuit::Circuit;
use crate::gate::{PARAM_TOLERANCE, StandardGate};
use crate::instruction::Instruction;
use crate::matrix::{self, Matrix};
use crate::qubit::QubitId;

/// SWAP followed by `exp(-i θ/2 · Z⊗Z)`, up to global phase.
///
/// The matrix is a SWAP with a phase `e^{iθ}` on `|01⟩` and `|10⟩`.
#[derive(Debug, Clone, Copy)]
pub struct ZzSwapGate {
    theta: f64,
}

impl ZzSwapGate {
    /// ZZ-SWAP with interaction angle `theta`.
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Interaction angle.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Always `zzswap`.
    pub fn name(&self) -> &'static str {
        "zzswap"
    }

    /// `[theta]`.
    pub fn params(&self) -> Vec<f64> {
        vec![self.theta]
    }

    /// `cx 0,1; cx 1,0; p(θ) 1; cx 0,1`.
    pub fn definition(&self) -> Circuit {
        let (q0, q1) = (QubitId(0), QubitId(1));
        Circuit::from_trusted(
            self.name(),
            2,
            vec![
                Instruction::gate(StandardGate::CX, [q0, q1]),
                Instruction::gate(StandardGate::CX, [q1, q0]),
                Instruction::gate(StandardGate::P(self.theta), [q1]),
                Instruction::gate(StandardGate::CX, [q0, q1]),
            ],
        )
    }

    /// Unitary matrix.
    pub fn matrix(&self) -> Matrix {
        let phase = Complex64::from_polar(1.0, self.theta);
        let mut m = matrix::swap();
        m[[1, 2]] = phase;
        m[[2, 1]] = phase;
        m
    }

    /// ZZ-SWAP with the angle negated.
    pub fn inverse(&self) -> Self {
        Self::new(-self.theta)
    }
}

impl PartialEq for ZzSwapGate {
    fn eq(&self, other: &Self) -> bool {
        (self.theta - other.theta).abs() <= PARAM_TOLERANCE
    }
}

impl fmt::Display for ZzSwapGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZZSwapGate({})", self.theta)
    }
}
