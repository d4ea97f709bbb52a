//! Dense unitary operators for gates and circuits.

use num_complex::Complex64;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::InstructionKind;
use crate::matrix::{self, Matrix};
use crate::qubit::QubitId;

/// Default tolerance for operator comparisons.
pub const EPSILON: f64 = 1e-10;

/// A unitary operator on `num_qubits` qubits in little-endian order.
#[derive(Debug, Clone)]
pub struct Operator {
    data: Matrix,
    num_qubits: u32,
}

impl Operator {
    /// Identity on `num_qubits` qubits.
    pub fn identity(num_qubits: u32) -> Self {
        Self {
            data: matrix::identity(num_qubits),
            num_qubits,
        }
    }

    /// Wrap a square matrix whose dimension is a power of two.
    pub fn from_matrix(data: Matrix) -> IrResult<Self> {
        let dim = data.nrows();
        if dim != data.ncols() || !dim.is_power_of_two() {
            return Err(IrError::NonUnitaryInstruction(format!(
                "matrix of shape {:?}",
                data.shape()
            )));
        }
        Ok(Self {
            data,
            num_qubits: dim.trailing_zeros(),
        })
    }

    /// The operator of a single gate.
    pub fn from_gate(gate: &Gate) -> IrResult<Self> {
        Self::from_matrix(gate.matrix()?)
    }

    /// The operator of a whole circuit.
    ///
    /// Barriers are skipped. Measurements and resets are rejected.
    pub fn from_circuit(circuit: &Circuit) -> IrResult<Self> {
        let mut op = Self::identity(circuit.num_qubits());
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    op.apply(gate.name(), &gate.matrix()?, &inst.qubits)?;
                }
                InstructionKind::Barrier => {}
                InstructionKind::Measure | InstructionKind::Reset => {
                    return Err(IrError::NonUnitaryInstruction(inst.name().to_string()));
                }
            }
        }
        Ok(op)
    }

    /// Left-multiply by `gate` acting on `qubits`.
    ///
    /// Qubit `k` of the gate maps to `qubits[k]`. The qubit list must
    /// match the matrix size and stay inside the operator.
    fn apply(&mut self, name: &str, gate: &Matrix, qubits: &[QubitId]) -> IrResult<()> {
        let sub_dim = 1usize << qubits.len();
        if gate.nrows() != sub_dim {
            return Err(IrError::QubitCountMismatch {
                gate_name: name.to_string(),
                expected: gate.nrows().trailing_zeros(),
                got: qubits.len() as u32,
            });
        }
        if let Some(&qubit) = qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: Some(name.to_string()),
            });
        }
        let mask: usize = qubits.iter().map(|q| 1usize << q.index()).sum();
        let offsets: Vec<usize> = (0..sub_dim)
            .map(|local| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| (local >> bit) & 1 == 1)
                    .map(|(_, q)| 1usize << q.index())
                    .sum()
            })
            .collect();

        let dim = self.data.nrows();
        let mut scratch = vec![Complex64::new(0.0, 0.0); sub_dim];
        for col in 0..dim {
            for base in (0..dim).filter(|i| i & mask == 0) {
                for (slot, &off) in scratch.iter_mut().zip(&offsets) {
                    *slot = self.data[[base | off, col]];
                }
                for (row, &off) in offsets.iter().enumerate() {
                    self.data[[base | off, col]] = scratch
                        .iter()
                        .enumerate()
                        .map(|(k, v)| gate[[row, k]] * v)
                        .sum();
                }
            }
        }
        Ok(())
    }

    /// The underlying matrix.
    pub fn data(&self) -> &Matrix {
        &self.data
    }

    /// Consume the operator, returning its matrix.
    pub fn into_data(self) -> Matrix {
        self.data
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        Self {
            data: self.data.t().mapv(|z| z.conj()),
            num_qubits: self.num_qubits,
        }
    }

    /// `true` if `U·U†` is the identity within `atol`.
    pub fn is_unitary(&self, atol: f64) -> bool {
        let product = self.data.dot(&self.adjoint().data);
        matrix::allclose(&product, &matrix::identity(self.num_qubits), atol)
    }

    /// Entry-wise equality within `atol`.
    pub fn approx_eq(&self, other: &Operator, atol: f64) -> bool {
        matrix::allclose(&self.data, &other.data, atol)
    }

    /// Equality up to a global phase.
    pub fn equiv(&self, other: &Operator, atol: f64) -> bool {
        if self.data.shape() != other.data.shape() {
            return false;
        }
        let pivot = other
            .data
            .iter()
            .zip(self.data.iter())
            .max_by(|a, b| a.0.norm().total_cmp(&b.0.norm()));
        let Some((&theirs, &ours)) = pivot else {
            return true;
        };
        if theirs.norm() <= atol {
            return self.data.iter().all(|z| z.norm() <= atol);
        }
        let phase = ours / theirs;
        if (phase.norm() - 1.0).abs() > atol {
            return false;
        }
        matrix::allclose(&self.data, &(&other.data * phase), atol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use crate::qubit::qubits;

    #[test]
    fn test_cx_on_reversed_qubits() {
        let mut circuit = Circuit::with_size("c", 2, 0);
        circuit.cx(QubitId(1), QubitId(0)).unwrap();
        let op = Operator::from_circuit(&circuit).unwrap();
        // Control on qubit 1: |10> (index 2) -> |11> (index 3).
        assert!((op.data()[[3, 2]].re - 1.0).abs() < EPSILON);
        assert!((op.data()[[1, 1]].re - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_bell_prefix_is_unitary() {
        let mut circuit = Circuit::with_size("c", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.append(StandardGate::RZX(0.3), qubits([2, 1])).unwrap();
        let op = Operator::from_circuit(&circuit).unwrap();
        assert!(op.is_unitary(1e-12));
        assert_eq!(op.num_qubits(), 3);
    }

    #[test]
    fn test_equiv_up_to_phase() {
        let rz = Operator::from_gate(&Gate::standard(StandardGate::Rz(0.8))).unwrap();
        let p = Operator::from_gate(&Gate::standard(StandardGate::P(0.8))).unwrap();
        assert!(rz.equiv(&p, 1e-12));
        assert!(!rz.approx_eq(&p, 1e-6));
    }

    #[test]
    fn test_measure_rejected() {
        let circuit = Circuit::bell().unwrap();
        assert!(matches!(
            Operator::from_circuit(&circuit),
            Err(IrError::NonUnitaryInstruction(_))
        ));
    }

    #[test]
    fn test_apply_rejects_bad_operands() {
        let cx = Gate::standard(StandardGate::CX).matrix().unwrap();
        let mut op = Operator::identity(2);
        assert!(matches!(
            op.apply("cx", &cx, &qubits([0])),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            op.apply("cx", &cx, &qubits([0, 5])),
            Err(IrError::QubitNotFound { qubit: QubitId(5), .. })
        ));
        assert!(op.approx_eq(&Operator::identity(2), 1e-12));
    }

    #[test]
    fn test_adjoint_inverts() {
        let mut circuit = Circuit::with_size("c", 2, 0);
        circuit.h(QubitId(0)).unwrap().cp(0.4, QubitId(0), QubitId(1)).unwrap();
        let op = Operator::from_circuit(&circuit).unwrap();
        let inv = Operator::from_circuit(&circuit.inverse().unwrap()).unwrap();
        assert!(inv.approx_eq(&op.adjoint(), 1e-12));
    }
}
