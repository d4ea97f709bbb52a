//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building circuits and gates.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Gate received the wrong number of parameters.
    #[error("Gate '{gate_name}' takes {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters provided.
        got: usize,
    },

    /// AceCR polarity string was not recognised.
    #[error("Polarity must be either '+-' or '-+', got '{0}'")]
    InvalidPolarity(String),

    /// Control state does not fit in the number of control qubits.
    #[error("Control state {ctrl_state} is out of range for {num_ctrl_qubits} control qubits")]
    InvalidCtrlState {
        /// Requested control state.
        ctrl_state: u32,
        /// Number of control qubits.
        num_ctrl_qubits: u32,
    },

    /// Control state string is not a binary number of the right width.
    #[error("Invalid control state string '{0}'")]
    InvalidCtrlString(String),

    /// Unsupported number of control qubits.
    #[error("Controlled gates need between 1 and {max} control qubits, got {0}", max = crate::gate::MAX_CONTROLS)]
    InvalidControl(u32),

    /// Classical bit index outside the circuit.
    #[error("Classical bit {0} not found in circuit")]
    ClbitNotFound(ClbitId),

    /// `ParallelGates` was given nothing to run in parallel.
    #[error("ParallelGates needs at least one component gate")]
    EmptyParallelGates,

    /// A `ParallelGates` component was not a unitary gate.
    #[error("Component gates must be unitary gates, got '{0}'")]
    NonUnitaryComponent(String),

    /// Two `ParallelGates` components share a qubit.
    #[error("Component gates must act on disjoint qubits: {qubit} is used twice")]
    OverlappingQubits {
        /// The shared qubit.
        qubit: QubitId,
    },

    /// A `ParallelGates` component does not occupy the next contiguous qubit range.
    #[error("Component '{gate_name}' must act on qubits {expected:?}, got {got:?}")]
    NonContiguousComponent {
        /// Name of the offending component.
        gate_name: String,
        /// Expected qubit range.
        expected: Vec<u32>,
        /// Qubits it actually acts on.
        got: Vec<u32>,
    },

    /// Operation needs a definition that the gate does not carry.
    #[error("Gate '{0}' has no definition")]
    MissingDefinition(String),

    /// Definition circuit width differs from the gate width.
    #[error("Definition of '{gate_name}' has {got} qubits, expected {expected}")]
    DefinitionSizeMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Gate width.
        expected: u32,
        /// Definition width.
        got: u32,
    },

    /// Non-unitary instruction where only gates are allowed.
    #[error("Instruction '{0}' is not unitary")]
    NonUnitaryInstruction(String),

    /// No standard gate exists with this name.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
