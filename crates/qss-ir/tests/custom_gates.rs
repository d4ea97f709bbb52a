//! Behavioural tests for the custom gate catalog.
//!
//! Every catalog gate is checked three ways: its decomposition must
//! produce the same unitary as its direct matrix, its inverse must undo
//! it, and its text forms must match what the remote service expects.

use std::f64::consts::PI;

use num_complex::Complex64;
use proptest::prelude::*;
use qss_ir::{
    AceCr, Circuit, CustomGate, Gate, IccxGate, IccxdgGate, IrError, IxGate, IxdgGate, Operator,
    ParallelGates, QubitId, StandardGate, ZzSwapGate, qubits,
};

const TOL: f64 = 1e-9;

fn definition_matches_matrix(gate: &Gate) -> bool {
    let Some(definition) = gate.definition() else {
        return false;
    };
    let from_def = Operator::from_circuit(&definition).unwrap();
    let direct = Operator::from_gate(gate).unwrap();
    from_def.equiv(&direct, TOL)
}

fn inverse_is_adjoint(gate: &Gate) -> bool {
    let op = Operator::from_gate(gate).unwrap();
    let inv = Operator::from_gate(&gate.inverse().unwrap()).unwrap();
    inv.approx_eq(&op.adjoint(), TOL)
}

fn catalog() -> Vec<Gate> {
    vec![
        AceCr::new("+-").unwrap().into(),
        AceCr::new("-+").unwrap().into(),
        AceCr::with_sandwich("+-", PI / 2.0).unwrap().into(),
        AceCr::with_sandwich("-+", 1.23).unwrap().into(),
        ZzSwapGate::new(1.23).into(),
        IxGate.into(),
        IxdgGate.into(),
        IccxGate::default().into(),
        IccxGate::new(1).unwrap().into(),
        IccxdgGate::new(2).unwrap().into(),
        IccxGate::aqt().into(),
        ParallelGates::new([
            Gate::custom(AceCr::new("+-").unwrap()),
            Gate::standard(StandardGate::Rx(1.23)),
        ])
        .unwrap()
        .into(),
    ]
}

#[test]
fn test_catalog_definitions_match_matrices() {
    for gate in catalog() {
        assert!(definition_matches_matrix(&gate), "{gate}");
    }
}

#[test]
fn test_catalog_inverses() {
    for gate in catalog() {
        assert!(inverse_is_adjoint(&gate), "{gate}");
    }
}

#[test]
fn test_catalog_double_inverse() {
    for gate in catalog() {
        let twice = gate.inverse().unwrap().inverse().unwrap();
        let op = Operator::from_gate(&gate).unwrap();
        assert!(Operator::from_gate(&twice).unwrap().equiv(&op, TOL), "{gate}");
    }
}

#[test]
fn test_catalog_unitary() {
    for gate in catalog() {
        assert!(Operator::from_gate(&gate).unwrap().is_unitary(TOL), "{gate}");
    }
}

#[test]
fn test_display_strings() {
    let cases: Vec<(Gate, &str)> = vec![
        (AceCr::new("+-").unwrap().into(), "AceCR+-"),
        (
            AceCr::with_sandwich("-+", PI / 2.0).unwrap().into(),
            "AceCR-+|RXGate(pi/2)|",
        ),
        (ZzSwapGate::new(1.23).into(), "ZZSwapGate(1.23)"),
        (IxGate.into(), "iXGate"),
        (IxdgGate.into(), "iXdgGate"),
        (IccxGate::default().into(), "iCCXGate(ctrl_state=3)"),
        (IccxdgGate::new(0).unwrap().into(), "iCCXdgGate(ctrl_state=0)"),
    ];
    for (gate, expected) in cases {
        assert_eq!(gate.to_string(), expected);
    }
}

#[test]
fn test_qasm_strings() {
    let gate: Gate = AceCr::with_sandwich("-+", PI / 2.0).unwrap().into();
    assert_eq!(gate.qasm(), "acecr_mp_rx(pi/2)");
    assert_eq!(Gate::custom(ZzSwapGate::new(1.23)).qasm(), "zzswap(1.23)");
    assert_eq!(Gate::standard(StandardGate::Rx(1.23)).qasm(), "rx(1.23)");
    assert_eq!(Gate::custom(IccxGate::aqt()).qasm(), "iccx_o0");
}

#[test]
fn test_acecr_polarity_errors() {
    let err = AceCr::new("+").unwrap_err();
    assert!(matches!(err, IrError::InvalidPolarity(_)));
    assert!(err
        .to_string()
        .contains("Polarity must be either '+-' or '-+'"));
}

#[test]
fn test_aqt_iccx_swaps_all_zero_block() {
    let op = Operator::from_gate(&Gate::custom(IccxGate::aqt())).unwrap();
    let m = op.data();
    let i = Complex64::i();
    assert_eq!(m[[0, 4]], i);
    assert_eq!(m[[4, 0]], i);
    for row in 1..8 {
        if row != 4 {
            assert_eq!(m[[row, row]], Complex64::new(1.0, 0.0));
        }
    }
}

#[test]
fn test_ix_control_is_iccx() {
    let ix = Gate::custom(IxGate);
    for state in 0..4 {
        let controlled = ix.control(2, Some(state)).unwrap();
        assert_eq!(controlled, Gate::custom(IccxGate::new(state).unwrap()));
    }
    let dg = Gate::custom(IxdgGate).control(2, None).unwrap();
    assert_eq!(dg, Gate::custom(IccxdgGate::default()));
}

#[test]
fn test_generic_control_matrix() {
    // One closed control on a ZZ-SWAP acts as ZZ-SWAP on the upper qubits
    // only when qubit 0 is set.
    let base = Gate::custom(ZzSwapGate::new(0.4));
    let controlled = base.control(1, None).unwrap();
    let m = controlled.matrix().unwrap();
    let zz = base.matrix().unwrap();
    for (r, c) in [(0usize, 0usize), (2, 2), (4, 4), (6, 6)] {
        assert_eq!(m[[r, c]], Complex64::new(1.0, 0.0));
    }
    assert_eq!(m[[3, 5]], zz[[1, 2]]);
}

#[test]
fn test_parallel_qubit_layout() {
    let gate = ParallelGates::new([
        Gate::custom(AceCr::new("+-").unwrap()),
        Gate::standard(StandardGate::Rx(1.23)),
    ])
    .unwrap();
    let def = gate.definition();
    assert_eq!(def.instructions()[0].qubits, qubits([0, 1]));
    assert_eq!(def.instructions()[1].qubits, qubits([2]));
    assert_eq!(gate.to_string(), "ParallelGates(acecr_pm, rx(1.23))");

    // Same unitary as applying the components to their ranges one by one.
    let mut sequential = Circuit::with_size("seq", 3, 0);
    sequential
        .append(AceCr::new("+-").unwrap(), [QubitId(0), QubitId(1)])
        .unwrap();
    sequential.rx(1.23, QubitId(2)).unwrap();
    let expected = Operator::from_circuit(&sequential).unwrap();
    let actual = Operator::from_gate(&Gate::custom(gate)).unwrap();
    assert!(actual.approx_eq(&expected, TOL));
}

#[test]
fn test_parallel_gates_equality_tolerance() {
    let a = ParallelGates::new([Gate::standard(StandardGate::Rx(1.0))]).unwrap();
    let b = ParallelGates::new([Gate::standard(StandardGate::Rx(1.0 + 1e-12))]).unwrap();
    let c = ParallelGates::new([Gate::standard(StandardGate::Rx(1.1))]).unwrap();
    assert_eq!(CustomGate::from(a.clone()), CustomGate::from(b));
    assert_ne!(CustomGate::from(a), CustomGate::from(c));
}

proptest! {
    #[test]
    fn prop_acecr_definition_matches(theta in -2.0 * PI..2.0 * PI, plus_minus in any::<bool>()) {
        let polarity = if plus_minus { "+-" } else { "-+" };
        let gate = Gate::custom(AceCr::with_sandwich(polarity, theta).unwrap());
        prop_assert!(definition_matches_matrix(&gate));
        prop_assert!(inverse_is_adjoint(&gate));
    }

    #[test]
    fn prop_zzswap_definition_matches(theta in -2.0 * PI..2.0 * PI) {
        let gate = Gate::custom(ZzSwapGate::new(theta));
        prop_assert!(definition_matches_matrix(&gate));
        prop_assert!(inverse_is_adjoint(&gate));
    }

    #[test]
    fn prop_parallel_params_flatten(a in -PI..PI, b in -PI..PI) {
        let gate = ParallelGates::new([
            Gate::custom(ZzSwapGate::new(a)),
            Gate::custom(IxGate),
            Gate::standard(StandardGate::Rz(b)),
        ])
        .unwrap();
        prop_assert_eq!(gate.params(), vec![a, b]);
        prop_assert_eq!(gate.num_qubits(), 4);
        prop_assert!(definition_matches_matrix(&Gate::custom(gate)));
    }
}
