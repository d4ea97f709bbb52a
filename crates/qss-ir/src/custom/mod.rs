//! Superstaq custom gate catalog.
//!
//! | Gate | Name | Qubits | Params |
//! |------|------|--------|--------|
//! | [`AceCr`] | `acecr_pm`, `acecr_mp`, `acecr_pm_rx`, `acecr_mp_rx` | 2 | sandwich angle if present |
//! | [`ZzSwapGate`] | `zzswap` | 2 | θ |
//! | [`IxGate`], [`IxdgGate`] | `ix`, `ixdg` | 1 | none |
//! | [`IccxGate`], [`IccxdgGate`] | `iccx[_oN]`, `iccxdg[_oN]` | 3 | none |
//! | [`ParallelGates`] | `parallel_gates` | sum of components | component params |

mod acecr;
mod ix;
mod parallel;
mod zz_swap;

use std::fmt;

pub use acecr::{AceCr, Polarity};
pub use ix::{IccxGate, IccxdgGate, IxGate, IxdgGate};
pub use parallel::ParallelGates;
pub use zz_swap::ZzSwapGate;

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::matrix::Matrix;

/// A gate from the custom catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomGate {
    /// Echoed cross-resonance with active cancellation.
    AceCr(AceCr),
    /// SWAP with ZZ interaction.
    ZzSwap(ZzSwapGate),
    /// `i·X`.
    Ix(IxGate),
    /// `-i·X`.
    Ixdg(IxdgGate),
    /// Doubly controlled `i·X`.
    Iccx(IccxGate),
    /// Doubly controlled `-i·X`.
    Iccxdg(IccxdgGate),
    /// Components on disjoint contiguous qubit ranges.
    Parallel(ParallelGates),
}

impl CustomGate {
    /// Gate name.
    pub fn name(&self) -> &'static str {
        match self {
            CustomGate::AceCr(g) => g.name(),
            CustomGate::ZzSwap(g) => g.name(),
            CustomGate::Ix(g) => g.name(),
            CustomGate::Ixdg(g) => g.name(),
            CustomGate::Iccx(g) => g.name(),
            CustomGate::Iccxdg(g) => g.name(),
            CustomGate::Parallel(g) => g.name(),
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        match self {
            CustomGate::AceCr(_) | CustomGate::ZzSwap(_) => 2,
            CustomGate::Ix(_) | CustomGate::Ixdg(_) => 1,
            CustomGate::Iccx(_) | CustomGate::Iccxdg(_) => 3,
            CustomGate::Parallel(g) => g.num_qubits(),
        }
    }

    /// Gate parameters.
    pub fn params(&self) -> Vec<f64> {
        match self {
            CustomGate::AceCr(g) => g.params(),
            CustomGate::ZzSwap(g) => g.params(),
            CustomGate::Parallel(g) => g.params(),
            CustomGate::Ix(_) | CustomGate::Ixdg(_) | CustomGate::Iccx(_) | CustomGate::Iccxdg(_) => {
                vec![]
            }
        }
    }

    /// Decomposition into simpler gates.
    pub fn definition(&self) -> Circuit {
        match self {
            CustomGate::AceCr(g) => g.definition(),
            CustomGate::ZzSwap(g) => g.definition(),
            CustomGate::Ix(g) => g.definition(),
            CustomGate::Ixdg(g) => g.definition(),
            CustomGate::Iccx(g) => g.definition(),
            CustomGate::Iccxdg(g) => g.definition(),
            CustomGate::Parallel(g) => g.definition(),
        }
    }

    /// Unitary matrix.
    ///
    /// Fails only for `ParallelGates` with a component that has no matrix.
    pub fn matrix(&self) -> IrResult<Matrix> {
        Ok(match self {
            CustomGate::AceCr(g) => g.matrix(),
            CustomGate::ZzSwap(g) => g.matrix(),
            CustomGate::Ix(g) => g.matrix(),
            CustomGate::Ixdg(g) => g.matrix(),
            CustomGate::Iccx(g) => g.matrix(),
            CustomGate::Iccxdg(g) => g.matrix(),
            CustomGate::Parallel(g) => return g.matrix(),
        })
    }

    /// Inverse gate.
    pub fn inverse(&self) -> IrResult<CustomGate> {
        Ok(match self {
            CustomGate::AceCr(g) => CustomGate::AceCr(g.inverse()),
            CustomGate::ZzSwap(g) => CustomGate::ZzSwap(g.inverse()),
            CustomGate::Ix(_) => CustomGate::Ixdg(IxdgGate),
            CustomGate::Ixdg(_) => CustomGate::Ix(IxGate),
            CustomGate::Iccx(g) => CustomGate::Iccxdg(g.inverse()),
            CustomGate::Iccxdg(g) => CustomGate::Iccx(g.inverse()),
            CustomGate::Parallel(g) => CustomGate::Parallel(g.inverse()?),
        })
    }

    /// The catalog gate equal to this one under the given controls, if any.
    ///
    /// `ctrl_state` must already be validated against `num_ctrl_qubits`.
    pub(crate) fn control(&self, num_ctrl_qubits: u32, ctrl_state: u32) -> Option<CustomGate> {
        match (self, num_ctrl_qubits) {
            (CustomGate::Ix(_), 2) => IccxGate::new(ctrl_state).ok().map(CustomGate::Iccx),
            (CustomGate::Ixdg(_), 2) => IccxdgGate::new(ctrl_state).ok().map(CustomGate::Iccxdg),
            _ => None,
        }
    }
}

impl fmt::Display for CustomGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomGate::AceCr(g) => fmt::Display::fmt(g, f),
            CustomGate::ZzSwap(g) => fmt::Display::fmt(g, f),
            CustomGate::Ix(g) => fmt::Display::fmt(g, f),
            CustomGate::Ixdg(g) => fmt::Display::fmt(g, f),
            CustomGate::Iccx(g) => fmt::Display::fmt(g, f),
            CustomGate::Iccxdg(g) => fmt::Display::fmt(g, f),
            CustomGate::Parallel(g) => fmt::Display::fmt(g, f),
        }
    }
}

macro_rules! impl_from_catalog {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for CustomGate {
                fn from(gate: $ty) -> Self {
                    CustomGate::$variant(gate)
                }
            }

            impl From<$ty> for crate::gate::Gate {
                fn from(gate: $ty) -> Self {
                    crate::gate::Gate::custom(gate)
                }
            }
        )*
    };
}

impl_from_catalog! {
    AceCr => AceCr,
    ZzSwapGate => ZzSwap,
    IxGate => Ix,
    IxdgGate => Ixdg,
    IccxGate => Iccx,
    IccxdgGate => Iccxdg,
    ParallelGates => Parallel,
}
