//! Wire representation of gates.
//!
//! A gate travels as its name, width, parameters, optional label, and,
//! for anything outside the standard set, its decomposition:
//!
//! ```json
//! {"name": "acecr_pm", "num_qubits": 2, "params": [],
//!  "definition": {"name": "acecr_pm", "num_qubits": 2, "instructions": [...]}}
//! ```
//!
//! Controlled gates carry the record of the gate under control and their
//! control state instead of a decomposition.
//!
//! Decoding never produces catalog gates directly: standard names decode
//! to [`StandardGate`] and everything else to [`OpaqueGate`]. Run
//! [`crate::resolver::resolve_circuit`] to recover typed catalog gates.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::IrError;
use crate::gate::{ControlledGate, Gate, GateKind, OpaqueGate, StandardGate};
use crate::instruction::Instruction;

/// Serialized form of a [`Gate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Gate name.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Decomposition for non-standard gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Circuit>,
    /// Gate under control, for controlled gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_gate: Option<Box<GateRecord>>,
    /// Control state, for controlled gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl_state: Option<u32>,
}

impl From<Gate> for GateRecord {
    fn from(gate: Gate) -> Self {
        let (definition, base_gate, ctrl_state) = match &gate.kind {
            GateKind::Standard(_) => (None, None, None),
            GateKind::Controlled(controlled) => {
                let base = Gate {
                    kind: controlled.base().clone(),
                    label: None,
                };
                (
                    None,
                    Some(Box::new(GateRecord::from(base))),
                    Some(controlled.ctrl_state()),
                )
            }
            kind => (kind.definition(), None, None),
        };
        Self {
            name: gate.name().to_string(),
            num_qubits: gate.num_qubits(),
            params: gate.params(),
            label: gate.label,
            definition,
            base_gate,
            ctrl_state,
        }
    }
}

impl TryFrom<GateRecord> for Gate {
    type Error = IrError;

    fn try_from(record: GateRecord) -> Result<Self, Self::Error> {
        if let Some(base) = record.base_gate {
            let base = Gate::try_from(*base)?;
            let num_ctrl_qubits = record
                .num_qubits
                .checked_sub(base.num_qubits())
                .filter(|&n| n > 0)
                .ok_or_else(|| IrError::QubitCountMismatch {
                    gate_name: record.name.clone(),
                    expected: base.num_qubits() + 1,
                    got: record.num_qubits,
                })?;
            let controlled = ControlledGate::new(base.kind, num_ctrl_qubits, record.ctrl_state)?;
            return Ok(Gate {
                kind: GateKind::Controlled(controlled),
                label: record.label,
            });
        }

        let kind = match StandardGate::from_name(&record.name, &record.params) {
            Ok(standard) if standard.num_qubits() == record.num_qubits => {
                GateKind::Standard(standard)
            }
            Ok(standard) => {
                return Err(IrError::QubitCountMismatch {
                    gate_name: record.name,
                    expected: standard.num_qubits(),
                    got: record.num_qubits,
                });
            }
            Err(IrError::UnknownGate(_)) => {
                let opaque =
                    OpaqueGate::new(record.name, record.num_qubits).with_params(record.params);
                GateKind::Opaque(match record.definition {
                    Some(definition) => opaque.with_definition(definition)?,
                    None => opaque,
                })
            }
            Err(e) => return Err(e),
        };
        Ok(Gate {
            kind,
            label: record.label,
        })
    }
}

/// Serialized form of a [`Circuit`].
///
/// Converting into a [`Circuit`] runs the same operand checks as the
/// builder API.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitRecord {
    /// Circuit name.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Number of classical bits.
    #[serde(default)]
    pub num_clbits: u32,
    /// Instructions in program order.
    pub instructions: Vec<Instruction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::{AceCr, ZzSwapGate};
    use crate::operator::Operator;

    #[test]
    fn test_standard_gate_has_no_definition() {
        let record = GateRecord::from(Gate::standard(StandardGate::Rx(0.5)));
        assert_eq!(record.name, "rx");
        assert_eq!(record.params, vec![0.5]);
        assert!(record.definition.is_none());
    }

    #[test]
    fn test_custom_gate_carries_definition() {
        let gate = Gate::custom(AceCr::new("+-").unwrap()).with_label("cr");
        let record = GateRecord::from(gate);
        assert_eq!(record.name, "acecr_pm");
        assert_eq!(record.label.as_deref(), Some("cr"));
        assert_eq!(record.definition.as_ref().map(Circuit::len), Some(3));
    }

    #[test]
    fn test_decode_is_opaque() {
        let gate = Gate::custom(ZzSwapGate::new(0.25));
        let json = serde_json::to_string(&gate).unwrap();
        let back: Gate = serde_json::from_str(&json).unwrap();
        assert!(matches!(back.kind, GateKind::Opaque(_)));
        assert_eq!(back.name(), "zzswap");
        assert_eq!(back.params(), vec![0.25]);
        assert!(back.definition().is_some());
    }

    #[test]
    fn test_decode_rejects_bad_standard_width() {
        let json = r#"{"name": "cx", "num_qubits": 3}"#;
        let err = serde_json::from_str::<Gate>(json).unwrap_err();
        assert!(err.to_string().contains("requires 2 qubits"));
    }

    #[test]
    fn test_decode_rejects_bad_definition_width() {
        let json = r#"{"name": "foo", "num_qubits": 2,
            "definition": {"name": "foo", "num_qubits": 1, "instructions": []}}"#;
        assert!(serde_json::from_str::<Gate>(json).is_err());
    }

    #[test]
    fn test_controlled_gate_keeps_matrix() {
        let gate = Gate::custom(ZzSwapGate::new(0.4)).control(1, Some(0)).unwrap();
        let json = serde_json::to_string(&gate).unwrap();
        let back: Gate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "czzswap_o0");
        assert!(matches!(back.kind, GateKind::Controlled(_)));

        let expected = Operator::from_gate(&gate).unwrap();
        let decoded = Operator::from_gate(&back).unwrap();
        assert!(decoded.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_controlled_record_needs_a_control() {
        let json = r#"{"name": "cx2", "num_qubits": 1,
            "base_gate": {"name": "x", "num_qubits": 1}}"#;
        assert!(serde_json::from_str::<Gate>(json).is_err());
    }
}
