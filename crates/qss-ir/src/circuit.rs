//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};
use crate::record::CircuitRecord;

/// A quantum circuit.
///
/// Instructions are kept in program order. Every builder method checks
/// that operands exist, are distinct, and match the gate width. Decoded
/// circuits go through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitRecord")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    #[serde(default)]
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Build a circuit from instructions that are valid by construction.
    pub(crate) fn from_trusted(
        name: impl Into<String>,
        num_qubits: u32,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits: 0,
            instructions,
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Append an instruction after validating its operands.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }

        if let Some(&clbit) = instruction.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::ClbitNotFound(clbit));
        }
        Ok(())
    }

    /// Apply any gate to the given qubits.
    pub fn append(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::S, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::T, [qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::SX, [qubit])
    }

    /// Apply RX rotation.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Rx(theta), [qubit])
    }

    /// Apply RY rotation.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Ry(theta), [qubit])
    }

    /// Apply RZ rotation.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Rz(theta), [qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::P(lambda), [qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::CZ, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Swap, [q1, q2])
    }

    /// Apply controlled phase gate.
    pub fn cp(&mut self, lambda: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::CP(lambda), [control, target])
    }

    /// Apply ZX rotation (Z on `q1`, X on `q2`).
    pub fn rzx(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::RZX(theta), [q1, q2])
    }

    /// Apply Toffoli gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::CCX, [c1, c2, target])
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into the classical bit of the same index.
    ///
    /// Classical bits are added as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::reset(qubit))
    }

    /// Insert a barrier on the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Mutable access for in-place gate rewriting. Operands are not revalidated.
    pub(crate) fn instructions_mut(&mut self) -> &mut [Instruction] {
        &mut self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// `true` if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over the gates, skipping non-unitary instructions.
    pub fn gates(&self) -> impl Iterator<Item = (&Gate, &[QubitId])> {
        self.instructions
            .iter()
            .filter_map(|inst| inst.as_gate().map(|g| (g, inst.qubits.as_slice())))
    }

    /// Instruction counts by name.
    pub fn count_ops(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth, ignoring barriers.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            if matches!(inst.kind, InstructionKind::Barrier) {
                continue;
            }
            let level = inst
                .qubits
                .iter()
                .filter_map(|q| levels.get(q.index()).copied())
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                if let Some(slot) = levels.get_mut(q.index()) {
                    *slot = level;
                }
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }

    /// Rename the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The inverse circuit. Fails on measurements and resets.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Circuit {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
        })
    }

    // =========================================================================
    // Common circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit on `n` qubits.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(format!("ghz_{n}"), n, n);
        if n > 0 {
            circuit.h(QubitId(0))?;
        }
        for i in 1..n {
            circuit.cx(QubitId(0), QubitId(i))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}

impl TryFrom<CircuitRecord> for Circuit {
    type Error = IrError;

    fn try_from(record: CircuitRecord) -> Result<Self, Self::Error> {
        let mut circuit = Self::with_size(record.name, record.num_qubits, record.num_clbits);
        for instruction in record.instructions {
            circuit.push(instruction)?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::AceCr;

    #[test]
    fn test_bell_circuit() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.x(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(1), .. }));
    }

    #[test]
    fn test_gate_width_checked() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        let err = circuit
            .append(AceCr::new("+-").unwrap(), [QubitId(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn test_clbit_checked() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.measure(QubitId(0), ClbitId(0)).unwrap_err();
        assert_eq!(err, IrError::ClbitNotFound(ClbitId(0)));
    }

    #[test]
    fn test_inverse() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.s(QubitId(0)).unwrap().rzx(0.4, QubitId(0), QubitId(1)).unwrap();
        let inv = circuit.inverse().unwrap();
        let names: Vec<_> = inv.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, ["rzx", "sdg"]);
        assert_eq!(inv.instructions()[0].as_gate().unwrap().params(), vec![-0.4]);
    }

    #[test]
    fn test_count_ops() {
        let circuit = Circuit::ghz(3).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["cx"], 2);
        assert_eq!(counts["measure"], 3);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.append(AceCr::new("-+").unwrap(), [QubitId(0), QubitId(1)]).unwrap();
        circuit.rx(1.5, QubitId(1)).unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_qubits(), 2);
        assert_eq!(back.instructions()[1], circuit.instructions()[1]);
        assert_eq!(back.instructions()[0].name(), "acecr_mp");
    }

    #[test]
    fn test_decode_rejects_qubit_out_of_range() {
        let json = r#"{"name": "bad", "num_qubits": 1, "instructions": [
            {"kind": {"Gate": {"name": "x", "num_qubits": 1}}, "qubits": [5]}]}"#;
        let err = serde_json::from_str::<Circuit>(json).unwrap_err();
        assert!(err.to_string().contains("Qubit q5 not found"), "{err}");
    }

    #[test]
    fn test_decode_rejects_width_mismatch() {
        let json = r#"{"name": "bad", "num_qubits": 2, "instructions": [
            {"kind": {"Gate": {"name": "cx", "num_qubits": 2}}, "qubits": [0]}]}"#;
        let err = serde_json::from_str::<Circuit>(json).unwrap_err();
        assert!(err.to_string().contains("requires 2 qubits, got 1"), "{err}");
    }

    #[test]
    fn test_decode_rejects_duplicate_qubit() {
        let json = r#"{"name": "bad", "num_qubits": 2, "instructions": [
            {"kind": {"Gate": {"name": "cx", "num_qubits": 2}}, "qubits": [1, 1]}]}"#;
        assert!(serde_json::from_str::<Circuit>(json).is_err());
    }
}
