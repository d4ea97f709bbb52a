//! Superstaq Circuit Model and Custom Gates
//!
//! This crate provides the circuit representation shared by the Superstaq
//! client crates, together with the catalog of hardware-native gates that
//! Superstaq compilers emit.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over numbered
//! qubits. Gates are either [`StandardGate`]s with known matrices, catalog
//! gates ([`CustomGate`]), opaque gates known only by name, or controlled
//! versions of any of these.
//!
//! Catalog gates lose their type when they travel over the wire. The
//! [`resolver`] turns the generic records back into typed gates.
//!
//! # Core Components
//!
//! - **Gates**: [`StandardGate`], [`CustomGate`], [`OpaqueGate`], [`ControlledGate`]
//! - **Catalog**: [`AceCr`], [`ZzSwapGate`], [`IxGate`], [`IccxGate`], [`ParallelGates`]
//! - **Circuit**: [`Circuit`] builder API
//! - **Operator**: [`Operator`] dense unitaries for checking decompositions
//! - **Wire format**: [`GateRecord`], [`CircuitRecord`]
//!
//! # Example: AceCR in a Circuit
//!
//! ```rust
//! use qss_ir::{AceCr, Circuit, Operator, QubitId};
//!
//! let gate = AceCr::with_sandwich("-+", std::f64::consts::FRAC_PI_2).unwrap();
//! assert_eq!(gate.to_string(), "AceCR-+|RXGate(pi/2)|");
//!
//! let mut circuit = Circuit::with_size("cr", 2, 0);
//! circuit.append(gate, [QubitId(0), QubitId(1)]).unwrap();
//!
//! let op = Operator::from_circuit(&circuit).unwrap();
//! assert!(op.is_unitary(1e-10));
//! ```
//!
//! # Example: Recovering Catalog Gates
//!
//! ```rust
//! use qss_ir::{Gate, ZzSwapGate, custom_resolver};
//!
//! let gate = Gate::custom(ZzSwapGate::new(1.23));
//! let json = serde_json::to_string(&gate).unwrap();
//! let generic: Gate = serde_json::from_str(&json).unwrap();
//!
//! assert!(!generic.is_custom());
//! assert_eq!(custom_resolver(&generic), Some(gate));
//! ```
//!
//! # Catalog
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `acecr_pm`, `acecr_mp` | 2 | Echoed cross-resonance, optional RX sandwich |
//! | `zzswap` | 2 | SWAP with ZZ phase |
//! | `ix`, `ixdg` | 1 | `±i·X` |
//! | `iccx`, `iccxdg` | 3 | Doubly controlled `±i·X`, any control state |
//! | `parallel_gates` | n | Components on disjoint qubit ranges |

pub mod circuit;
pub mod custom;
pub mod error;
pub mod format;
pub mod gate;
pub mod instruction;
pub mod matrix;
pub mod operator;
pub mod qubit;
pub mod record;
pub mod resolver;

pub use circuit::Circuit;
pub use custom::{
    AceCr, CustomGate, IccxGate, IccxdgGate, IxGate, IxdgGate, ParallelGates, Polarity, ZzSwapGate,
};
pub use error::{IrError, IrResult};
pub use gate::{ControlledGate, Gate, GateKind, OpaqueGate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use matrix::Matrix;
pub use operator::Operator;
pub use qubit::{ClbitId, QubitId, qubits};
pub use record::{CircuitRecord, GateRecord};
pub use resolver::{custom_resolver, resolve_circuit};
