//! Resolver tests: catalog gates must survive losing their type.

use qss_ir::{
    AceCr, Circuit, Gate, GateKind, IccxGate, IccxdgGate, IxGate, IxdgGate, OpaqueGate,
    ParallelGates, QubitId, StandardGate, ZzSwapGate, custom_resolver, resolve_circuit,
};

/// The gate as it looks after a trip through the wire format.
fn generic(gate: &Gate) -> Gate {
    let opaque = OpaqueGate::new(gate.name(), gate.num_qubits()).with_params(gate.params());
    let opaque = match gate.definition() {
        Some(definition) => opaque.with_definition(definition).unwrap(),
        None => opaque,
    };
    Gate::opaque(opaque)
}

fn custom_gates() -> Vec<Gate> {
    vec![
        AceCr::new("+-").unwrap().into(),
        AceCr::new("-+").unwrap().into(),
        AceCr::with_sandwich("+-", 1.23).unwrap().into(),
        ZzSwapGate::new(1.23).into(),
        IccxGate::aqt().into(),
        IxGate.into(),
        IxdgGate.into(),
        IccxGate::default().into(),
        IccxGate::from_ctrl_str("01").unwrap().into(),
        IccxGate::from_ctrl_str("10").unwrap().into(),
        IccxdgGate::from_ctrl_str("00").unwrap().into(),
        IccxdgGate::default().into(),
        IccxdgGate::from_ctrl_str("01").unwrap().into(),
        IccxdgGate::from_ctrl_str("10").unwrap().into(),
    ]
}

#[test]
fn test_each_catalog_gate_resolves() {
    for gate in custom_gates() {
        let stripped = generic(&gate);
        assert_ne!(stripped, gate);
        assert_eq!(custom_resolver(&stripped), Some(gate));
    }
}

#[test]
fn test_parallel_gates_resolve() {
    let leading = [
        Gate::standard(StandardGate::Rx(4.56)),
        Gate::standard(StandardGate::CX),
    ];
    let typed = ParallelGates::new(leading.iter().cloned().chain(custom_gates())).unwrap();
    let with_generic_components = ParallelGates::new(
        leading
            .iter()
            .cloned()
            .chain(custom_gates().iter().map(generic)),
    )
    .unwrap();

    let typed = Gate::custom(typed);
    let with_generic_components = Gate::custom(with_generic_components);
    let fully_generic = Gate::opaque(
        OpaqueGate::new("parallel_gates", typed.num_qubits())
            .with_definition(with_generic_components.definition().unwrap())
            .unwrap(),
    );

    assert_ne!(with_generic_components, typed);
    assert_ne!(fully_generic, typed);
    assert_eq!(custom_resolver(&with_generic_components), Some(typed.clone()));
    assert_eq!(custom_resolver(&fully_generic), Some(typed));
}

#[test]
fn test_non_catalog_gates_unrecognised() {
    assert_eq!(custom_resolver(&Gate::standard(StandardGate::CX)), None);
    assert_eq!(custom_resolver(&Gate::standard(StandardGate::Rx(2.0))), None);
    assert_eq!(custom_resolver(&Gate::opaque(OpaqueGate::new("??", 1))), None);
}

#[test]
fn test_parallel_gates_without_definition_unrecognised() {
    let gate = Gate::opaque(OpaqueGate::new("parallel_gates", 3));
    assert_eq!(custom_resolver(&gate), None);
}

#[test]
fn test_resolve_circuit_after_json() {
    let mut circuit = Circuit::with_size("mixed", 3, 0);
    circuit
        .append(AceCr::with_sandwich("-+", 0.5).unwrap(), [QubitId(0), QubitId(1)])
        .unwrap();
    circuit.h(QubitId(2)).unwrap();
    circuit
        .append(IccxGate::aqt(), [QubitId(2), QubitId(0), QubitId(1)])
        .unwrap();
    circuit
        .append(
            Gate::opaque(OpaqueGate::new("mystery", 1)).with_label("keep"),
            [QubitId(0)],
        )
        .unwrap();

    let json = serde_json::to_string(&circuit).unwrap();
    let decoded: Circuit = serde_json::from_str(&json).unwrap();
    assert_ne!(decoded, circuit);

    let resolved = resolve_circuit(&decoded);
    assert_eq!(resolved, circuit);

    let kinds: Vec<_> = resolved
        .gates()
        .map(|(gate, _)| match gate.kind {
            GateKind::Standard(_) => "standard",
            GateKind::Custom(_) => "custom",
            GateKind::Opaque(_) => "opaque",
            GateKind::Controlled(_) => "controlled",
        })
        .collect();
    assert_eq!(kinds, ["custom", "standard", "custom", "opaque"]);
    assert_eq!(resolved.instructions()[3].as_gate().unwrap().label.as_deref(), Some("keep"));
}
