//! Recover typed catalog gates from generic gate records.
//!
//! Serialization flattens catalog gates into [`OpaqueGate`]s carrying a
//! name, parameters and a decomposition. [`custom_resolver`] maps those
//! back by looking up the name and parameter count in a fixed table.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::circuit::Circuit;
use crate::custom::{
    AceCr, CustomGate, IccxGate, IccxdgGate, IxGate, IxdgGate, ParallelGates, Polarity, ZzSwapGate,
};
use crate::gate::{Gate, GateKind, OpaqueGate};
use crate::instruction::InstructionKind;

/// Builds a catalog gate from a parameter list of the registered length.
type Constructor = fn(&[f64]) -> Option<CustomGate>;

struct Entry {
    num_qubits: u32,
    num_params: usize,
    build: Constructor,
}

fn entry(num_qubits: u32, num_params: usize, build: Constructor) -> Entry {
    Entry {
        num_qubits,
        num_params,
        build,
    }
}

static TABLE: LazyLock<FxHashMap<&'static str, Entry>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    table.insert(
        "acecr_pm",
        entry(2, 0, |_| Some(AceCr::from_polarity(Polarity::PlusMinus, 0.0).into())),
    );
    table.insert(
        "acecr_mp",
        entry(2, 0, |_| Some(AceCr::from_polarity(Polarity::MinusPlus, 0.0).into())),
    );
    table.insert(
        "acecr_pm_rx",
        entry(2, 1, |p| p.first().map(|&r| AceCr::from_polarity(Polarity::PlusMinus, r).into())),
    );
    table.insert(
        "acecr_mp_rx",
        entry(2, 1, |p| p.first().map(|&r| AceCr::from_polarity(Polarity::MinusPlus, r).into())),
    );
    table.insert("zzswap", entry(2, 1, |p| p.first().map(|&t| ZzSwapGate::new(t).into())));
    table.insert("ix", entry(1, 0, |_| Some(IxGate.into())));
    table.insert("ixdg", entry(1, 0, |_| Some(IxdgGate.into())));
    table.insert("iccx", entry(3, 0, |_| Some(IccxGate::default().into())));
    table.insert("iccx_o0", entry(3, 0, |_| IccxGate::new(0).ok().map(Into::into)));
    table.insert("iccx_o1", entry(3, 0, |_| IccxGate::new(1).ok().map(Into::into)));
    table.insert("iccx_o2", entry(3, 0, |_| IccxGate::new(2).ok().map(Into::into)));
    table.insert("iccxdg", entry(3, 0, |_| Some(IccxdgGate::default().into())));
    table.insert("iccxdg_o0", entry(3, 0, |_| IccxdgGate::new(0).ok().map(Into::into)));
    table.insert("iccxdg_o1", entry(3, 0, |_| IccxdgGate::new(1).ok().map(Into::into)));
    table.insert("iccxdg_o2", entry(3, 0, |_| IccxdgGate::new(2).ok().map(Into::into)));
    table
});

/// The typed catalog gate matching `gate`, or `None` if it is not one.
///
/// Standard gates, controlled gates and unknown names are not
/// recognised. The label of `gate` is carried over.
pub fn custom_resolver(gate: &Gate) -> Option<Gate> {
    let custom = match &gate.kind {
        GateKind::Custom(CustomGate::Parallel(parallel)) => {
            CustomGate::Parallel(resolve_components(parallel.components().iter().cloned())?)
        }
        GateKind::Custom(custom) => custom.clone(),
        GateKind::Opaque(opaque) => resolve_opaque(opaque)?,
        GateKind::Standard(_) | GateKind::Controlled(_) => return None,
    };
    Some(Gate {
        kind: GateKind::Custom(custom),
        label: gate.label.clone(),
    })
}

fn resolve_opaque(opaque: &OpaqueGate) -> Option<CustomGate> {
    if opaque.name() == "parallel_gates" {
        let parallel = ParallelGates::from_definition(opaque.definition()?).ok()?;
        let resolved = resolve_components(parallel.components().iter().cloned())?;
        return (resolved.num_qubits() == opaque.num_qubits()).then_some(resolved.into());
    }

    let entry = TABLE.get(opaque.name())?;
    if entry.num_qubits != opaque.num_qubits() || entry.num_params != opaque.params().len() {
        return None;
    }
    (entry.build)(opaque.params())
}

/// Resolve each component, keeping those that are not catalog gates.
fn resolve_components(components: impl Iterator<Item = Gate>) -> Option<ParallelGates> {
    let resolved = components.map(|gate| custom_resolver(&gate).unwrap_or(gate));
    ParallelGates::new(resolved).ok()
}

/// Replace every recognised gate in `circuit` with its typed form.
pub fn resolve_circuit(circuit: &Circuit) -> Circuit {
    let mut resolved = circuit.clone();
    for inst in resolved.instructions_mut() {
        if let InstructionKind::Gate(gate) = &mut inst.kind {
            if let Some(typed) = custom_resolver(gate) {
                *gate = typed;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use crate::record::GateRecord;

    /// Strip a gate down to what survives serialization.
    fn generic(gate: &Gate) -> Gate {
        let record = GateRecord::from(gate.clone());
        Gate::try_from(record).unwrap()
    }

    #[test]
    fn test_resolves_catalog_names() {
        let gates: Vec<Gate> = vec![
            AceCr::new("+-").unwrap().into(),
            AceCr::with_sandwich("-+", 1.1).unwrap().into(),
            ZzSwapGate::new(0.3).into(),
            IxGate.into(),
            IxdgGate.into(),
            IccxGate::new(2).unwrap().into(),
            IccxdgGate::default().into(),
        ];
        for gate in gates {
            let stripped = generic(&gate);
            assert!(!stripped.is_custom());
            assert_eq!(custom_resolver(&stripped), Some(gate));
        }
    }

    #[test]
    fn test_unknown_and_standard_unrecognised() {
        let opaque = Gate::opaque(OpaqueGate::new("mystery", 2));
        assert_eq!(custom_resolver(&opaque), None);
        assert_eq!(custom_resolver(&Gate::standard(StandardGate::CX)), None);
    }

    #[test]
    fn test_arity_mismatch_unrecognised() {
        let wrong_params = Gate::opaque(OpaqueGate::new("zzswap", 2));
        assert_eq!(custom_resolver(&wrong_params), None);
        let wrong_width = Gate::opaque(OpaqueGate::new("ix", 2));
        assert_eq!(custom_resolver(&wrong_width), None);
    }

    #[test]
    fn test_label_preserved() {
        let gate = Gate::custom(IxGate).with_label("flip");
        let resolved = custom_resolver(&generic(&gate)).unwrap();
        assert_eq!(resolved.label.as_deref(), Some("flip"));
    }

    #[test]
    fn test_typed_gate_resolves_to_itself() {
        let gate = Gate::custom(ZzSwapGate::new(1.0));
        assert_eq!(custom_resolver(&gate), Some(gate));
    }
}
