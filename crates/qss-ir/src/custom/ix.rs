//! The iX gate, its inverse, and their doubly controlled forms.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::matrix::{self, Matrix};
use crate::qubit::QubitId;

/// `i·X`, equal to `RX(-π)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IxGate;

/// `-i·X`, equal to `RX(π)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IxdgGate;

fn phase_x(phase: Complex64) -> Matrix {
    matrix::x() * phase
}

impl IxGate {
    /// Always `ix`.
    pub fn name(&self) -> &'static str {
        "ix"
    }

    /// `rx(-π)`.
    pub fn definition(&self) -> Circuit {
        Circuit::from_trusted(
            self.name(),
            1,
            vec![Instruction::gate(StandardGate::Rx(-PI), [QubitId(0)])],
        )
    }

    /// `[[0, i], [i, 0]]`.
    pub fn matrix(&self) -> Matrix {
        phase_x(Complex64::i())
    }
}

impl IxdgGate {
    /// Always `ixdg`.
    pub fn name(&self) -> &'static str {
        "ixdg"
    }

    /// `rx(π)`.
    pub fn definition(&self) -> Circuit {
        Circuit::from_trusted(
            self.name(),
            1,
            vec![Instruction::gate(StandardGate::Rx(PI), [QubitId(0)])],
        )
    }

    /// `[[0, -i], [-i, 0]]`.
    pub fn matrix(&self) -> Matrix {
        phase_x(-Complex64::i())
    }
}

impl fmt::Display for IxGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("iXGate")
    }
}

impl fmt::Display for IxdgGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("iXdgGate")
    }
}

/// Largest control state for two controls.
const MAX_CTRL_STATE: u32 = 3;

fn check_ctrl_state(ctrl_state: u32) -> IrResult<u32> {
    if ctrl_state > MAX_CTRL_STATE {
        return Err(IrError::InvalidCtrlState {
            ctrl_state,
            num_ctrl_qubits: 2,
        });
    }
    Ok(ctrl_state)
}

/// Parse a two-character control string such as `"01"`.
///
/// The string is read most significant bit first, so `"01"` means
/// control 0 closed and control 1 open.
fn parse_ctrl_str(ctrl_state: &str) -> IrResult<u32> {
    let invalid = || IrError::InvalidCtrlString(ctrl_state.to_string());
    if ctrl_state.len() != 2 {
        return Err(invalid());
    }
    u32::from_str_radix(ctrl_state, 2).map_err(|_| invalid())
}

/// `x` on every open control, the phase and Toffoli, then `x` again.
fn controlled_definition(name: &str, ctrl_state: u32, phase: f64) -> Circuit {
    let (q0, q1, q2) = (QubitId(0), QubitId(1), QubitId(2));
    let open: Vec<QubitId> = [q0, q1]
        .into_iter()
        .filter(|q| (ctrl_state >> q.0) & 1 == 0)
        .collect();

    let flips = open
        .iter()
        .map(|&q| Instruction::gate(StandardGate::X, [q]));
    let body = [
        Instruction::gate(StandardGate::CP(phase), [q0, q1]),
        Instruction::gate(StandardGate::CCX, [q0, q1, q2]),
    ];

    let instructions = flips.clone().chain(body).chain(flips).collect();
    Circuit::from_trusted(name, 3, instructions)
}

/// Doubly controlled iX.
///
/// Controls are qubits 0 and 1, the target is qubit 2. The default
/// control state is `3` (both closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IccxGate {
    ctrl_state: u32,
}

/// Doubly controlled iXdg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IccxdgGate {
    ctrl_state: u32,
}

impl IccxGate {
    /// iCCX with the given control state (`0..=3`).
    pub fn new(ctrl_state: u32) -> IrResult<Self> {
        Ok(Self {
            ctrl_state: check_ctrl_state(ctrl_state)?,
        })
    }

    /// iCCX with a control state given as a bit string, e.g. `"00"`.
    pub fn from_ctrl_str(ctrl_state: &str) -> IrResult<Self> {
        Self::new(parse_ctrl_str(ctrl_state)?)
    }

    /// The iCCX variant native to AQT hardware: both controls open.
    pub fn aqt() -> Self {
        Self { ctrl_state: 0 }
    }

    /// Control state.
    pub fn ctrl_state(&self) -> u32 {
        self.ctrl_state
    }

    /// `iccx`, or `iccx_o{ctrl_state}` with open controls.
    pub fn name(&self) -> &'static str {
        match self.ctrl_state {
            0 => "iccx_o0",
            1 => "iccx_o1",
            2 => "iccx_o2",
            _ => "iccx",
        }
    }

    /// Decomposition into standard gates.
    pub fn definition(&self) -> Circuit {
        controlled_definition(self.name(), self.ctrl_state, PI / 2.0)
    }

    /// Unitary matrix.
    pub fn matrix(&self) -> Matrix {
        matrix::controlled(&IxGate.matrix(), 2, self.ctrl_state)
    }

    /// iCCXdg with the same control state.
    pub fn inverse(&self) -> IccxdgGate {
        IccxdgGate {
            ctrl_state: self.ctrl_state,
        }
    }
}

impl Default for IccxGate {
    fn default() -> Self {
        Self {
            ctrl_state: MAX_CTRL_STATE,
        }
    }
}

impl IccxdgGate {
    /// iCCXdg with the given control state (`0..=3`).
    pub fn new(ctrl_state: u32) -> IrResult<Self> {
        Ok(Self {
            ctrl_state: check_ctrl_state(ctrl_state)?,
        })
    }

    /// iCCXdg with a control state given as a bit string.
    pub fn from_ctrl_str(ctrl_state: &str) -> IrResult<Self> {
        Self::new(parse_ctrl_str(ctrl_state)?)
    }

    /// Control state.
    pub fn ctrl_state(&self) -> u32 {
        self.ctrl_state
    }

    /// `iccxdg`, or `iccxdg_o{ctrl_state}` with open controls.
    pub fn name(&self) -> &'static str {
        match self.ctrl_state {
            0 => "iccxdg_o0",
            1 => "iccxdg_o1",
            2 => "iccxdg_o2",
            _ => "iccxdg",
        }
    }

    /// Decomposition into standard gates.
    pub fn definition(&self) -> Circuit {
        controlled_definition(self.name(), self.ctrl_state, -PI / 2.0)
    }

    /// Unitary matrix.
    pub fn matrix(&self) -> Matrix {
        matrix::controlled(&IxdgGate.matrix(), 2, self.ctrl_state)
    }

    /// iCCX with the same control state.
    pub fn inverse(&self) -> IccxGate {
        IccxGate {
            ctrl_state: self.ctrl_state,
        }
    }
}

impl Default for IccxdgGate {
    fn default() -> Self {
        Self {
            ctrl_state: MAX_CTRL_STATE,
        }
    }
}

impl fmt::Display for IccxGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iCCXGate(ctrl_state={})", self.ctrl_state)
    }
}

impl fmt::Display for IccxdgGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iCCXdgGate(ctrl_state={})", self.ctrl_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Operator;

    fn assert_definition_matches(def: &Circuit, direct: Matrix) {
        let from_def = Operator::from_circuit(def).unwrap();
        let direct = Operator::from_matrix(direct).unwrap();
        assert!(from_def.approx_eq(&direct, 1e-9), "{}", def.name());
    }

    #[test]
    fn test_ix_matrices() {
        let i = Complex64::i();
        let m = IxGate.matrix();
        assert_eq!(m[[0, 1]], i);
        assert_eq!(m[[1, 0]], i);
        assert_eq!(IxdgGate.matrix()[[0, 1]], -i);
        assert_definition_matches(&IxGate.definition(), IxGate.matrix());
        assert_definition_matches(&IxdgGate.definition(), IxdgGate.matrix());
    }

    #[test]
    fn test_iccx_names() {
        assert_eq!(IccxGate::default().name(), "iccx");
        assert_eq!(IccxGate::new(1).unwrap().name(), "iccx_o1");
        assert_eq!(IccxGate::aqt().name(), "iccx_o0");
        assert_eq!(IccxdgGate::new(2).unwrap().name(), "iccxdg_o2");
        assert_eq!(IccxGate::default().to_string(), "iCCXGate(ctrl_state=3)");
    }

    #[test]
    fn test_ctrl_state_bounds() {
        assert!(matches!(
            IccxGate::new(4),
            Err(IrError::InvalidCtrlState { ctrl_state: 4, .. })
        ));
        assert_eq!(IccxGate::from_ctrl_str("01").unwrap().ctrl_state(), 1);
        assert_eq!(IccxGate::from_ctrl_str("00").unwrap(), IccxGate::aqt());
        assert!(IccxGate::from_ctrl_str("2").is_err());
    }

    #[test]
    fn test_iccx_definitions() {
        for state in 0..=3 {
            let gate = IccxGate::new(state).unwrap();
            assert_definition_matches(&gate.definition(), gate.matrix());
            let dg = gate.inverse();
            assert_definition_matches(&dg.definition(), dg.matrix());
        }
    }

    #[test]
    fn test_aqt_iccx_matrix() {
        let i = Complex64::i();
        let m = IccxGate::aqt().matrix();
        assert_eq!(m[[0, 4]], i);
        assert_eq!(m[[4, 0]], i);
        assert_eq!(m[[0, 0]], Complex64::new(0.0, 0.0));
        for k in [1, 2, 3, 5, 6, 7] {
            assert_eq!(m[[k, k]], Complex64::new(1.0, 0.0));
        }
    }
}
