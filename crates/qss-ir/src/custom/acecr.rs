//! The AceCR two-qubit gate.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use ndarray::linalg::kron;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::format::format_angle;
use crate::gate::{PARAM_TOLERANCE, StandardGate};
use crate::instruction::Instruction;
use crate::matrix::{self, Matrix};
use crate::qubit::QubitId;

/// Sign of the first half of an echoed cross-resonance pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// `+-`: positive then negative cross-resonance.
    PlusMinus,
    /// `-+`: negative then positive cross-resonance.
    MinusPlus,
}

impl Polarity {
    /// `+-` or `-+`.
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::PlusMinus => "+-",
            Polarity::MinusPlus => "-+",
        }
    }

    fn sign(self) -> f64 {
        match self {
            Polarity::PlusMinus => 1.0,
            Polarity::MinusPlus => -1.0,
        }
    }
}

impl FromStr for Polarity {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+-" => Ok(Polarity::PlusMinus),
            "-+" => Ok(Polarity::MinusPlus),
            other => Err(IrError::InvalidPolarity(other.to_string())),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active cancellation echoed cross-resonance gate.
///
/// Qubit 0 is the control, qubit 1 the target. An optional X rotation on
/// the target ("sandwich") sits between the two cross-resonance halves.
///
/// ```
/// use qss_ir::custom::AceCr;
///
/// let gate = AceCr::new("+-").unwrap();
/// assert_eq!(gate.name(), "acecr_pm");
/// assert_eq!(gate.to_string(), "AceCR+-");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AceCr {
    polarity: Polarity,
    sandwich_rx_rads: f64,
}

impl AceCr {
    /// AceCR with the given polarity string (`"+-"` or `"-+"`).
    pub fn new(polarity: &str) -> IrResult<Self> {
        Self::with_sandwich(polarity, 0.0)
    }

    /// AceCR with an X rotation of `sandwich_rx_rads` on the target.
    pub fn with_sandwich(polarity: &str, sandwich_rx_rads: f64) -> IrResult<Self> {
        Ok(Self::from_polarity(polarity.parse()?, sandwich_rx_rads))
    }

    /// AceCR from an already parsed polarity.
    pub fn from_polarity(polarity: Polarity, sandwich_rx_rads: f64) -> Self {
        Self {
            polarity,
            sandwich_rx_rads,
        }
    }

    /// Polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Sandwich rotation angle, zero when absent.
    pub fn sandwich_rx_rads(&self) -> f64 {
        self.sandwich_rx_rads
    }

    fn has_sandwich(&self) -> bool {
        self.sandwich_rx_rads != 0.0
    }

    /// `acecr_pm`, `acecr_mp`, `acecr_pm_rx` or `acecr_mp_rx`.
    pub fn name(&self) -> &'static str {
        match (self.polarity, self.has_sandwich()) {
            (Polarity::PlusMinus, false) => "acecr_pm",
            (Polarity::MinusPlus, false) => "acecr_mp",
            (Polarity::PlusMinus, true) => "acecr_pm_rx",
            (Polarity::MinusPlus, true) => "acecr_mp_rx",
        }
    }

    /// `[sandwich_rx_rads]` when a sandwich is present.
    pub fn params(&self) -> Vec<f64> {
        if self.has_sandwich() {
            vec![self.sandwich_rx_rads]
        } else {
            vec![]
        }
    }

    /// `rzx(±π/4)`, `x` on the control, optional `rx` on the target, `rzx(∓π/4)`.
    pub fn definition(&self) -> Circuit {
        let angle = self.polarity.sign() * PI / 4.0;
        let (q0, q1) = (QubitId(0), QubitId(1));

        let mut instructions = vec![
            Instruction::gate(StandardGate::RZX(angle), [q0, q1]),
            Instruction::gate(StandardGate::X, [q0]),
        ];
        if self.has_sandwich() {
            instructions.push(Instruction::gate(
                StandardGate::Rx(self.sandwich_rx_rads),
                [q1],
            ));
        }
        instructions.push(Instruction::gate(StandardGate::RZX(-angle), [q0, q1]));

        Circuit::from_trusted(self.name(), 2, instructions)
    }

    /// `X₀ · RX₁(r) · RZX(±π/2)`.
    pub fn matrix(&self) -> Matrix {
        let x0 = kron(&matrix::identity(1), &matrix::x());
        let rx1 = kron(&matrix::rx(self.sandwich_rx_rads), &matrix::identity(1));
        let rzx = matrix::rzx(self.polarity.sign() * PI / 2.0);
        x0.dot(&rx1).dot(&rzx)
    }

    /// Same polarity with the sandwich rotation negated.
    pub fn inverse(&self) -> Self {
        Self::from_polarity(self.polarity, -self.sandwich_rx_rads)
    }
}

impl PartialEq for AceCr {
    fn eq(&self, other: &Self) -> bool {
        self.polarity == other.polarity
            && (self.sandwich_rx_rads - other.sandwich_rx_rads).abs() <= PARAM_TOLERANCE
    }
}

impl fmt::Display for AceCr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AceCR{}", self.polarity)?;
        if self.has_sandwich() {
            write!(f, "|RXGate({})|", format_angle(self.sandwich_rx_rads))?;
        }
        Ok(())
    }
}
