//! Quantum gate types.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::custom::CustomGate;
use crate::error::{IrError, IrResult};
use crate::format::{format_params, qasm_name};
use crate::matrix::{self, Matrix};
use crate::operator::Operator;
use crate::record::GateRecord;

/// Absolute tolerance for comparing gate parameters.
pub const PARAM_TOLERANCE: f64 = 1e-10;

/// Largest supported number of control qubits.
pub const MAX_CONTROLS: u32 = 16;

/// Compare two parameter lists element-wise within [`PARAM_TOLERANCE`].
pub(crate) fn params_close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= PARAM_TOLERANCE)
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled phase gate.
    CP(f64),
    /// XX rotation gate.
    RXX(f64),
    /// ZZ rotation gate.
    RZZ(f64),
    /// ZX rotation gate (Z on the first qubit, X on the second).
    RZX(f64),

    // Three-qubit gates
    /// Toffoli (CCX) gate.
    CCX,
    /// Fredkin (controlled SWAP) gate.
    CSwap,
}

/// Names and parameter counts of every [`StandardGate`].
const STANDARD_GATES: &[(&str, usize)] = &[
    ("id", 0),
    ("x", 0),
    ("y", 0),
    ("z", 0),
    ("h", 0),
    ("s", 0),
    ("sdg", 0),
    ("t", 0),
    ("tdg", 0),
    ("sx", 0),
    ("sxdg", 0),
    ("rx", 1),
    ("ry", 1),
    ("rz", 1),
    ("p", 1),
    ("u", 3),
    ("cx", 0),
    ("cy", 0),
    ("cz", 0),
    ("swap", 0),
    ("cp", 1),
    ("rxx", 1),
    ("rzz", 1),
    ("rzx", 1),
    ("ccx", 0),
    ("cswap", 0),
];

impl StandardGate {
    /// Get the gate name as used in OpenQASM.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CP(_) => "cp",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::RZX(_) => "rzx",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CP(_)
            | StandardGate::RXX(_)
            | StandardGate::RZZ(_)
            | StandardGate::RZX(_) => 2,
            StandardGate::CCX | StandardGate::CSwap => 3,
            _ => 1,
        }
    }

    /// Get the gate's parameters.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CP(t)
            | StandardGate::RXX(t)
            | StandardGate::RZZ(t)
            | StandardGate::RZX(t) => vec![t],
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }

    /// Look up a standard gate by name and parameters.
    pub fn from_name(name: &str, params: &[f64]) -> IrResult<Self> {
        let gate = match (name, params) {
            ("id", []) => StandardGate::I,
            ("x", []) => StandardGate::X,
            ("y", []) => StandardGate::Y,
            ("z", []) => StandardGate::Z,
            ("h", []) => StandardGate::H,
            ("s", []) => StandardGate::S,
            ("sdg", []) => StandardGate::Sdg,
            ("t", []) => StandardGate::T,
            ("tdg", []) => StandardGate::Tdg,
            ("sx", []) => StandardGate::SX,
            ("sxdg", []) => StandardGate::SXdg,
            ("rx", &[t]) => StandardGate::Rx(t),
            ("ry", &[t]) => StandardGate::Ry(t),
            ("rz", &[t]) => StandardGate::Rz(t),
            ("p", &[t]) => StandardGate::P(t),
            ("u", &[theta, phi, lambda]) => StandardGate::U(theta, phi, lambda),
            ("cx", []) => StandardGate::CX,
            ("cy", []) => StandardGate::CY,
            ("cz", []) => StandardGate::CZ,
            ("swap", []) => StandardGate::Swap,
            ("cp", &[t]) => StandardGate::CP(t),
            ("rxx", &[t]) => StandardGate::RXX(t),
            ("rzz", &[t]) => StandardGate::RZZ(t),
            ("rzx", &[t]) => StandardGate::RZX(t),
            ("ccx", []) => StandardGate::CCX,
            ("cswap", []) => StandardGate::CSwap,
            _ => {
                return match STANDARD_GATES.iter().find(|(n, _)| *n == name) {
                    Some(&(_, expected)) => Err(IrError::ParameterCountMismatch {
                        gate_name: name.to_string(),
                        expected,
                        got: params.len(),
                    }),
                    None => Err(IrError::UnknownGate(name.to_string())),
                };
            }
        };
        Ok(gate)
    }

    /// `true` if `name` is a standard gate name.
    pub fn is_standard_name(name: &str) -> bool {
        STANDARD_GATES.iter().any(|(n, _)| *n == name)
    }

    /// The inverse gate.
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::Rx(t) => StandardGate::Rx(-t),
            StandardGate::Ry(t) => StandardGate::Ry(-t),
            StandardGate::Rz(t) => StandardGate::Rz(-t),
            StandardGate::P(t) => StandardGate::P(-t),
            StandardGate::U(theta, phi, lambda) => StandardGate::U(-theta, -lambda, -phi),
            StandardGate::CP(t) => StandardGate::CP(-t),
            StandardGate::RXX(t) => StandardGate::RXX(-t),
            StandardGate::RZZ(t) => StandardGate::RZZ(-t),
            StandardGate::RZX(t) => StandardGate::RZX(-t),
            other => other,
        }
    }

    /// The standard gate equal to this one with `num_ctrl` closed controls, if any.
    pub fn control(&self, num_ctrl: u32) -> Option<StandardGate> {
        match (*self, num_ctrl) {
            (StandardGate::X, 1) => Some(StandardGate::CX),
            (StandardGate::Y, 1) => Some(StandardGate::CY),
            (StandardGate::Z, 1) => Some(StandardGate::CZ),
            (StandardGate::P(t), 1) => Some(StandardGate::CP(t)),
            (StandardGate::Swap, 1) => Some(StandardGate::CSwap),
            (StandardGate::X, 2) | (StandardGate::CX, 1) => Some(StandardGate::CCX),
            _ => None,
        }
    }

    /// The gate's unitary matrix.
    pub fn matrix(&self) -> Matrix {
        match *self {
            StandardGate::I => matrix::identity(1),
            StandardGate::X => matrix::x(),
            StandardGate::Y => matrix::y(),
            StandardGate::Z => matrix::z(),
            StandardGate::H => matrix::h(),
            StandardGate::S => matrix::p(PI / 2.0),
            StandardGate::Sdg => matrix::p(-PI / 2.0),
            StandardGate::T => matrix::p(PI / 4.0),
            StandardGate::Tdg => matrix::p(-PI / 4.0),
            StandardGate::SX => matrix::sx(),
            StandardGate::SXdg => matrix::sx().t().mapv(|z| z.conj()),
            StandardGate::Rx(t) => matrix::rx(t),
            StandardGate::Ry(t) => matrix::ry(t),
            StandardGate::Rz(t) => matrix::rz(t),
            StandardGate::P(t) => matrix::p(t),
            StandardGate::U(theta, phi, lambda) => matrix::u(theta, phi, lambda),
            StandardGate::CX => matrix::controlled(&matrix::x(), 1, 1),
            StandardGate::CY => matrix::controlled(&matrix::y(), 1, 1),
            StandardGate::CZ => matrix::controlled(&matrix::z(), 1, 1),
            StandardGate::Swap => matrix::swap(),
            StandardGate::CP(t) => matrix::controlled(&matrix::p(t), 1, 1),
            StandardGate::RXX(t) => matrix::rxx(t),
            StandardGate::RZZ(t) => matrix::rzz(t),
            StandardGate::RZX(t) => matrix::rzx(t),
            StandardGate::CCX => matrix::controlled(&matrix::x(), 2, 3),
            StandardGate::CSwap => matrix::controlled(&matrix::swap(), 1, 1),
        }
    }
}

impl PartialEq for StandardGate {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && params_close(&self.params(), &other.params())
    }
}

/// A gate known only by name, optionally carrying a decomposition.
///
/// This is what unrecognised gates decode to. The resolver turns opaque
/// gates whose name matches the custom catalog back into typed gates.
#[derive(Debug, Clone)]
pub struct OpaqueGate {
    name: String,
    num_qubits: u32,
    params: Vec<f64>,
    definition: Option<Circuit>,
}

impl OpaqueGate {
    /// Create an opaque gate with no parameters and no definition.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            definition: None,
        }
    }

    /// Set the parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    /// Attach a decomposition. Its width must equal the gate width.
    pub fn with_definition(mut self, definition: Circuit) -> IrResult<Self> {
        if definition.num_qubits() != self.num_qubits {
            return Err(IrError::DefinitionSizeMismatch {
                gate_name: self.name,
                expected: self.num_qubits,
                got: definition.num_qubits(),
            });
        }
        self.definition = Some(definition);
        Ok(self)
    }

    /// Gate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Parameters.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Decomposition, if one was attached.
    pub fn definition(&self) -> Option<&Circuit> {
        self.definition.as_ref()
    }
}

impl PartialEq for OpaqueGate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.num_qubits == other.num_qubits
            && params_close(&self.params, &other.params)
            && self.definition == other.definition
    }
}

/// A gate applied conditionally on the state of extra control qubits.
///
/// Controls are the leading qubits of the operation; bit `j` of
/// `ctrl_state` is the value control `j` must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlledGate {
    name: String,
    base: Box<GateKind>,
    num_ctrl_qubits: u32,
    ctrl_state: u32,
}

impl ControlledGate {
    /// Control `base` on `num_ctrl_qubits` qubits. `ctrl_state` defaults to all ones.
    pub fn new(base: GateKind, num_ctrl_qubits: u32, ctrl_state: Option<u32>) -> IrResult<Self> {
        let ctrl_state = resolve_ctrl_state(num_ctrl_qubits, ctrl_state)?;
        Ok(Self::from_parts(base, num_ctrl_qubits, ctrl_state))
    }

    fn from_parts(base: GateKind, num_ctrl_qubits: u32, ctrl_state: u32) -> Self {
        let prefix = if num_ctrl_qubits == 1 {
            "c".to_string()
        } else {
            format!("c{num_ctrl_qubits}")
        };
        let mut name = format!("{prefix}{}", base.name());
        if ctrl_state != all_ones(num_ctrl_qubits) {
            name.push_str(&format!("_o{ctrl_state}"));
        }
        Self {
            name,
            base: Box::new(base),
            num_ctrl_qubits,
            ctrl_state,
        }
    }

    /// Gate name, e.g. `cix` or `c2zzswap_o1`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The controlled gate.
    pub fn base(&self) -> &GateKind {
        &self.base
    }

    /// Number of control qubits.
    pub fn num_ctrl_qubits(&self) -> u32 {
        self.num_ctrl_qubits
    }

    /// Control state.
    pub fn ctrl_state(&self) -> u32 {
        self.ctrl_state
    }

    /// Total number of qubits (controls plus targets).
    pub fn num_qubits(&self) -> u32 {
        self.num_ctrl_qubits + self.base.num_qubits()
    }
}

fn all_ones(num_ctrl_qubits: u32) -> u32 {
    (1u32 << num_ctrl_qubits) - 1
}

/// Validate a control count and state, defaulting the state to all ones.
pub(crate) fn resolve_ctrl_state(num_ctrl_qubits: u32, ctrl_state: Option<u32>) -> IrResult<u32> {
    if num_ctrl_qubits == 0 || num_ctrl_qubits > MAX_CONTROLS {
        return Err(IrError::InvalidControl(num_ctrl_qubits));
    }
    let max = all_ones(num_ctrl_qubits);
    match ctrl_state {
        None => Ok(max),
        Some(state) if state <= max => Ok(state),
        Some(state) => Err(IrError::InvalidCtrlState {
            ctrl_state: state,
            num_ctrl_qubits,
        }),
    }
}

/// The kind of gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateKind {
    /// Standard gate with known semantics.
    Standard(StandardGate),
    /// Gate from the Superstaq custom catalog.
    Custom(CustomGate),
    /// Gate known only by name.
    Opaque(OpaqueGate),
    /// Gate with extra control qubits.
    Controlled(ControlledGate),
}

impl GateKind {
    /// Get the gate name.
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => g.name(),
            GateKind::Opaque(g) => g.name(),
            GateKind::Controlled(g) => g.name(),
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits(),
            GateKind::Opaque(g) => g.num_qubits(),
            GateKind::Controlled(g) => g.num_qubits(),
        }
    }

    /// Get the gate parameters.
    pub fn params(&self) -> Vec<f64> {
        match self {
            GateKind::Standard(g) => g.params(),
            GateKind::Custom(g) => g.params(),
            GateKind::Opaque(g) => g.params().to_vec(),
            GateKind::Controlled(g) => g.base.params(),
        }
    }

    /// The decomposition of this gate, where one is known.
    pub fn definition(&self) -> Option<Circuit> {
        match self {
            GateKind::Custom(g) => Some(g.definition()),
            GateKind::Opaque(g) => g.definition().cloned(),
            GateKind::Standard(_) | GateKind::Controlled(_) => None,
        }
    }

    /// The inverse gate kind.
    pub fn inverse(&self) -> IrResult<GateKind> {
        Ok(match self {
            GateKind::Standard(g) => GateKind::Standard(g.inverse()),
            GateKind::Custom(g) => GateKind::Custom(g.inverse()?),
            GateKind::Opaque(g) => {
                let definition = g
                    .definition()
                    .ok_or_else(|| IrError::MissingDefinition(g.name().to_string()))?
                    .inverse()?;
                let name = format!("{}_dg", g.name());
                GateKind::Opaque(
                    OpaqueGate::new(name, g.num_qubits())
                        .with_params(g.params().to_vec())
                        .with_definition(definition)?,
                )
            }
            GateKind::Controlled(g) => GateKind::Controlled(ControlledGate::from_parts(
                g.base.inverse()?,
                g.num_ctrl_qubits,
                g.ctrl_state,
            )),
        })
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> IrResult<Matrix> {
        match self {
            GateKind::Standard(g) => Ok(g.matrix()),
            GateKind::Custom(g) => g.matrix(),
            GateKind::Opaque(g) => {
                let definition = g
                    .definition()
                    .ok_or_else(|| IrError::MissingDefinition(g.name().to_string()))?;
                Ok(Operator::from_circuit(definition)?.into_data())
            }
            GateKind::Controlled(g) => Ok(matrix::controlled(
                &g.base.matrix()?,
                g.num_ctrl_qubits,
                g.ctrl_state,
            )),
        }
    }
}

/// A quantum gate.
///
/// Equality compares the gate itself; the label is display metadata and
/// is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "GateRecord", try_from = "GateRecord")]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    pub label: Option<String>,
}

impl Gate {
    /// Create a gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a gate from the custom catalog.
    pub fn custom(gate: impl Into<CustomGate>) -> Self {
        Self {
            kind: GateKind::Custom(gate.into()),
            label: None,
        }
    }

    /// Create an opaque gate.
    pub fn opaque(gate: OpaqueGate) -> Self {
        Self {
            kind: GateKind::Opaque(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the gate name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Get the gate parameters.
    pub fn params(&self) -> Vec<f64> {
        self.kind.params()
    }

    /// Name with parameters, e.g. `rx(pi/2)` or `acecr_mp_rx(1.23)`.
    pub fn qasm(&self) -> String {
        qasm_name(self.name(), &self.params())
    }

    /// The decomposition of this gate, where one is known.
    pub fn definition(&self) -> Option<Circuit> {
        self.kind.definition()
    }

    /// The inverse gate. Labels are not carried over.
    pub fn inverse(&self) -> IrResult<Gate> {
        Ok(Gate {
            kind: self.kind.inverse()?,
            label: None,
        })
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> IrResult<Matrix> {
        self.kind.matrix()
    }

    /// This gate with `num_ctrl_qubits` leading controls.
    ///
    /// Known special cases produce catalog or standard gates (`ix` with two
    /// controls is `iccx`, `x` with one control is `cx`); anything else
    /// becomes a [`ControlledGate`].
    pub fn control(&self, num_ctrl_qubits: u32, ctrl_state: Option<u32>) -> IrResult<Gate> {
        let ctrl_state = resolve_ctrl_state(num_ctrl_qubits, ctrl_state)?;
        let closed = ctrl_state == all_ones(num_ctrl_qubits);

        let special = match &self.kind {
            GateKind::Custom(g) => g.control(num_ctrl_qubits, ctrl_state).map(GateKind::Custom),
            GateKind::Standard(g) if closed => g.control(num_ctrl_qubits).map(GateKind::Standard),
            _ => None,
        };
        let kind = special.unwrap_or_else(|| {
            GateKind::Controlled(ControlledGate::from_parts(
                self.kind.clone(),
                num_ctrl_qubits,
                ctrl_state,
            ))
        });

        Ok(Gate { kind, label: None })
    }

    /// Check if this is a standard gate.
    pub fn is_standard(&self) -> bool {
        matches!(self.kind, GateKind::Standard(_))
    }

    /// Check if this is a catalog gate.
    pub fn is_custom(&self) -> bool {
        matches!(self.kind, GateKind::Custom(_))
    }

    /// The catalog gate, if this is one.
    pub fn as_custom(&self) -> Option<&CustomGate> {
        match &self.kind {
            GateKind::Custom(g) => Some(g),
            _ => None,
        }
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}

impl From<OpaqueGate> for Gate {
    fn from(gate: OpaqueGate) -> Self {
        Gate::opaque(gate)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            GateKind::Custom(g) => write!(f, "{g}"),
            _ => {
                let params = self.params();
                if params.is_empty() {
                    write!(f, "{}", self.name())
                } else {
                    write!(f, "{}({})", self.name(), format_params(&params))
                }
            }
        }
    }
}
