//! Gates executed simultaneously on disjoint qubit ranges.

use std::fmt;

use ndarray::linalg::kron;

use crate::circuit::Circuit;
use crate::custom::CustomGate;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};
use crate::instruction::{Instruction, InstructionKind};
use crate::matrix::{self, Matrix};
use crate::qubit::QubitId;

/// A composite gate that runs its components in parallel.
///
/// Component `k` acts on the qubits directly after those of component
/// `k - 1`, so a `ParallelGates(acecr_pm, rx)` acts on qubits `0,1`
/// (AceCR) and `2` (RX). Nested `ParallelGates` are flattened on
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelGates {
    components: Vec<Gate>,
}

impl ParallelGates {
    /// Build from a list of component gates.
    pub fn new(gates: impl IntoIterator<Item = Gate>) -> IrResult<Self> {
        let mut components = Vec::new();
        for gate in gates {
            match gate {
                Gate {
                    kind: GateKind::Custom(CustomGate::Parallel(inner)),
                    ..
                } => components.extend(inner.components),
                other => components.push(other),
            }
        }
        if components.is_empty() {
            return Err(IrError::EmptyParallelGates);
        }
        Ok(Self { components })
    }

    /// Recover the components from a decomposition.
    ///
    /// Every instruction must be a gate, gates must act on disjoint
    /// qubits, and each gate must occupy the next contiguous range
    /// starting at qubit 0.
    pub fn from_definition(definition: &Circuit) -> IrResult<Self> {
        let mut used = vec![false; definition.num_qubits() as usize];
        let mut offset = 0u32;
        let mut components = Vec::new();

        for inst in definition.instructions() {
            let InstructionKind::Gate(gate) = &inst.kind else {
                return Err(IrError::NonUnitaryComponent(inst.name().to_string()));
            };

            for &qubit in &inst.qubits {
                let slot = used
                    .get_mut(qubit.index())
                    .ok_or_else(|| IrError::QubitNotFound {
                        qubit,
                        gate_name: Some(gate.name().to_string()),
                    })?;
                if *slot {
                    return Err(IrError::OverlappingQubits { qubit });
                }
                *slot = true;
            }

            let width = gate.num_qubits();
            let expected: Vec<u32> = (offset..offset + width).collect();
            let got: Vec<u32> = inst.qubits.iter().map(|q| q.0).collect();
            if got != expected {
                return Err(IrError::NonContiguousComponent {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
            offset += width;
            components.push(gate.clone());
        }

        if offset != definition.num_qubits() {
            return Err(IrError::DefinitionSizeMismatch {
                gate_name: "parallel_gates".into(),
                expected: offset,
                got: definition.num_qubits(),
            });
        }
        Self::new(components)
    }

    /// Component gates in qubit order.
    pub fn components(&self) -> &[Gate] {
        &self.components
    }

    /// Always `parallel_gates`.
    pub fn name(&self) -> &'static str {
        "parallel_gates"
    }

    /// Sum of the component widths.
    pub fn num_qubits(&self) -> u32 {
        self.components.iter().map(Gate::num_qubits).sum()
    }

    /// Component parameters, concatenated in order.
    pub fn params(&self) -> Vec<f64> {
        self.components.iter().flat_map(Gate::params).collect()
    }

    /// Each component on its qubit range.
    pub fn definition(&self) -> Circuit {
        let mut offset = 0u32;
        let instructions = self
            .components
            .iter()
            .map(|gate| {
                let width = gate.num_qubits();
                let inst = Instruction::gate(gate.clone(), (offset..offset + width).map(QubitId));
                offset += width;
                inst
            })
            .collect();
        Circuit::from_trusted(self.name(), self.num_qubits(), instructions)
    }

    /// Tensor product of the component matrices.
    pub fn matrix(&self) -> IrResult<Matrix> {
        // Later components sit on higher qubits, so they are the left factors.
        let mut result = matrix::identity(0);
        for gate in &self.components {
            result = kron(&gate.matrix()?, &result);
        }
        Ok(result)
    }

    /// Component-wise inverse.
    pub fn inverse(&self) -> IrResult<Self> {
        let components = self
            .components
            .iter()
            .map(Gate::inverse)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self { components })
    }
}

impl fmt::Display for ParallelGates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(Gate::qasm).collect();
        write!(f, "ParallelGates({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::{AceCr, IxGate, ZzSwapGate};
    use crate::gate::StandardGate;
    use crate::qubit::qubits;

    fn rx(theta: f64) -> Gate {
        Gate::standard(StandardGate::Rx(theta))
    }

    #[test]
    fn test_display_and_params() {
        let gate = ParallelGates::new([Gate::custom(AceCr::new("+-").unwrap()), rx(1.23)]).unwrap();
        assert_eq!(gate.to_string(), "ParallelGates(acecr_pm, rx(1.23))");
        assert_eq!(gate.num_qubits(), 3);
        assert_eq!(gate.params(), vec![1.23]);
        assert_eq!(gate.name(), "parallel_gates");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            ParallelGates::new(Vec::new()),
            Err(IrError::EmptyParallelGates)
        ));
    }

    #[test]
    fn test_nested_flattened() {
        let inner = ParallelGates::new([Gate::custom(IxGate), rx(0.5)]).unwrap();
        let outer = ParallelGates::new([Gate::custom(inner), Gate::standard(StandardGate::H)]).unwrap();
        let flat = ParallelGates::new([Gate::custom(IxGate), rx(0.5), Gate::standard(StandardGate::H)])
            .unwrap();
        assert_eq!(outer, flat);
        assert_eq!(outer.components().len(), 3);
    }

    #[test]
    fn test_definition_round_trip() {
        let gate = ParallelGates::new([
            Gate::custom(ZzSwapGate::new(0.2)),
            Gate::standard(StandardGate::X),
            Gate::custom(AceCr::new("-+").unwrap()),
        ])
        .unwrap();
        let def = gate.definition();
        assert_eq!(def.num_qubits(), 5);
        assert_eq!(def.instructions()[2].qubits, qubits([3, 4]));
        assert_eq!(ParallelGates::from_definition(&def).unwrap(), gate);
    }

    #[test]
    fn test_from_definition_rejects_measure() {
        let mut def = Circuit::with_size("parallel_gates", 1, 1);
        def.measure(QubitId(0), crate::qubit::ClbitId(0)).unwrap();
        assert!(matches!(
            ParallelGates::from_definition(&def),
            Err(IrError::NonUnitaryComponent(name)) if name == "measure"
        ));
    }

    #[test]
    fn test_from_definition_rejects_overlap() {
        let mut def = Circuit::with_size("parallel_gates", 2, 0);
        def.cx(QubitId(0), QubitId(1)).unwrap();
        def.x(QubitId(1)).unwrap();
        assert!(matches!(
            ParallelGates::from_definition(&def),
            Err(IrError::OverlappingQubits { qubit: QubitId(1) })
        ));
    }

    #[test]
    fn test_from_definition_rejects_out_of_order() {
        let mut def = Circuit::with_size("parallel_gates", 2, 0);
        def.cx(QubitId(1), QubitId(0)).unwrap();
        assert!(matches!(
            ParallelGates::from_definition(&def),
            Err(IrError::NonContiguousComponent { .. })
        ));
    }

    #[test]
    fn test_matrix_qubit_order() {
        // X on qubit 0, identity-like RX(0) on qubit 1: |00> -> |01>, i.e. index 1.
        let gate = ParallelGates::new([Gate::standard(StandardGate::X), rx(0.0)]).unwrap();
        let m = gate.matrix().unwrap();
        assert_eq!(m.shape(), &[4, 4]);
        assert!((m[[1, 0]].re - 1.0).abs() < 1e-12);
        assert!(m[[2, 0]].norm() < 1e-12);
    }

    #[test]
    fn test_inverse() {
        let gate = ParallelGates::new([Gate::custom(IxGate), rx(0.7)]).unwrap();
        let inv = gate.inverse().unwrap();
        assert_eq!(inv.to_string(), "ParallelGates(ixdg, rx(-0.7))");
    }
}
