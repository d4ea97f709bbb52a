//! Circuit payloads exchanged with the service.
//!
//! Circuits travel as a JSON array of [`Circuit`]s. Catalog gates are
//! flattened to generic records on the way out and recovered with the
//! custom gate resolver on the way back in.

use qss_ir::{Circuit, CircuitRecord, IrResult, resolve_circuit};

use crate::error::ProviderResult;

/// Encode circuits for a request body.
pub fn serialize_circuits(circuits: &[Circuit]) -> ProviderResult<String> {
    Ok(serde_json::to_string(circuits)?)
}

/// Decode circuits from a response, restoring typed catalog gates.
///
/// Malformed JSON is a [`ProviderError::Json`](crate::ProviderError::Json).
/// Circuits whose instructions do not fit their registers are rejected
/// with [`ProviderError::Ir`](crate::ProviderError::Ir).
pub fn deserialize_circuits(serialized: &str) -> ProviderResult<Vec<Circuit>> {
    let records: Vec<CircuitRecord> = serde_json::from_str(serialized)?;
    let circuits = records
        .into_iter()
        .map(|record| Circuit::try_from(record).map(|circuit| resolve_circuit(&circuit)))
        .collect::<IrResult<Vec<_>>>()?;
    Ok(circuits)
}
