//! Results of remote compilation.
//!
//! The shape follows the input: compiling one circuit exposes
//! [`CompilerOutput::circuit`], compiling a list exposes
//! [`CompilerOutput::circuits`]. The accessors for the other shape
//! return `None`.

use qss_ir::Circuit;

use crate::client::{AqtCompileResponse, QscoutCompileResponse};
use crate::error::{ProviderError, ProviderResult};
use crate::serialization::deserialize_circuits;

/// Compiled circuits plus target-specific artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOutput {
    circuits: Vec<Circuit>,
    pulse_lists: Option<Vec<serde_json::Value>>,
    jaqal_programs: Option<Vec<String>>,
    state: Option<String>,
    is_list: bool,
}

impl CompilerOutput {
    /// Build an output, checking that single-circuit results hold exactly one.
    pub fn new(circuits: Vec<Circuit>, is_list: bool) -> ProviderResult<Self> {
        if !is_list && circuits.len() != 1 {
            return Err(ProviderError::InvalidResponse(format!(
                "expected one compiled circuit, got {}",
                circuits.len()
            )));
        }
        Ok(Self {
            circuits,
            pulse_lists: None,
            jaqal_programs: None,
            state: None,
            is_list,
        })
    }

    /// Attach one pulse list per circuit.
    pub fn with_pulse_lists(mut self, pulse_lists: Vec<serde_json::Value>) -> ProviderResult<Self> {
        self.check_len("pulse lists", pulse_lists.len())?;
        self.pulse_lists = Some(pulse_lists);
        Ok(self)
    }

    /// Attach one Jaqal program per circuit.
    pub fn with_jaqal_programs(mut self, programs: Vec<String>) -> ProviderResult<Self> {
        self.check_len("Jaqal programs", programs.len())?;
        self.jaqal_programs = Some(programs);
        Ok(self)
    }

    fn check_len(&self, what: &str, got: usize) -> ProviderResult<()> {
        if got == self.circuits.len() {
            Ok(())
        } else {
            Err(ProviderError::InvalidResponse(format!(
                "{} circuits but {got} {what}",
                self.circuits.len()
            )))
        }
    }

    /// Whether the compiled input was a list.
    pub fn is_list(&self) -> bool {
        self.is_list
    }

    /// The compiled circuit, for single-circuit input.
    pub fn circuit(&self) -> Option<&Circuit> {
        if self.is_list {
            None
        } else {
            self.circuits.first()
        }
    }

    /// The compiled circuits, for list input.
    pub fn circuits(&self) -> Option<&[Circuit]> {
        self.is_list.then_some(self.circuits.as_slice())
    }

    /// The pulse list, for single-circuit AQT input.
    pub fn pulse_list(&self) -> Option<&serde_json::Value> {
        if self.is_list {
            return None;
        }
        self.pulse_lists.as_ref()?.first()
    }

    /// The pulse lists, for list AQT input.
    pub fn pulse_lists(&self) -> Option<&[serde_json::Value]> {
        if !self.is_list {
            return None;
        }
        self.pulse_lists.as_deref()
    }

    /// The Jaqal program, for single-circuit QSCOUT input.
    pub fn jaqal_program(&self) -> Option<&str> {
        if self.is_list {
            return None;
        }
        self.jaqal_programs.as_ref()?.first().map(String::as_str)
    }

    /// The Jaqal programs, for list QSCOUT input.
    pub fn jaqal_programs(&self) -> Option<&[String]> {
        if !self.is_list {
            return None;
        }
        self.jaqal_programs.as_deref()
    }

    /// Opaque compiler state returned by AQT compilation.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// All compiled circuits regardless of shape.
    pub fn into_circuits(self) -> Vec<Circuit> {
        self.circuits
    }
}

/// Read an AQT compile response.
pub fn read_json_aqt(resp: AqtCompileResponse, is_list: bool) -> ProviderResult<CompilerOutput> {
    let circuits = deserialize_circuits(&resp.qiskit_circuits)?;
    let mut out = CompilerOutput::new(circuits, is_list)?;
    if let Some(encoded) = resp.pulse_lists_jp {
        let pulse_lists: Vec<serde_json::Value> = serde_json::from_str(&encoded)?;
        out = out.with_pulse_lists(pulse_lists)?;
    }
    out.state = resp.state_jp;
    Ok(out)
}

/// Read a QSCOUT compile response.
pub fn read_json_qscout(
    resp: QscoutCompileResponse,
    is_list: bool,
) -> ProviderResult<CompilerOutput> {
    let circuits = deserialize_circuits(&resp.qiskit_circuits)?;
    let out = CompilerOutput::new(circuits, is_list)?;
    if resp.jaqal_programs.is_empty() {
        return Ok(out);
    }
    out.with_jaqal_programs(resp.jaqal_programs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::serialize_circuits;
    use qss_ir::QubitId;

    fn cz_circuit() -> Circuit {
        let mut qc = Circuit::with_size("qc", 8, 0);
        qc.cz(QubitId(4), QubitId(5)).unwrap();
        qc
    }

    fn aqt_response(circuits: &[Circuit]) -> AqtCompileResponse {
        let pulses = vec![serde_json::json!([[]]); circuits.len()];
        AqtCompileResponse {
            qiskit_circuits: serialize_circuits(circuits).unwrap(),
            state_jp: Some("{}".into()),
            pulse_lists_jp: Some(serde_json::to_string(&pulses).unwrap()),
        }
    }

    #[test]
    fn test_single_shape() {
        let qc = cz_circuit();
        let out = read_json_aqt(aqt_response(std::slice::from_ref(&qc)), false).unwrap();
        assert_eq!(out.circuit(), Some(&qc));
        assert!(out.circuits().is_none());
        assert!(out.pulse_lists().is_none());
        assert_eq!(out.pulse_list(), Some(&serde_json::json!([[]])));
        assert_eq!(out.state(), Some("{}"));
    }

    #[test]
    fn test_list_shape() {
        let qc = cz_circuit();
        let out = read_json_aqt(aqt_response(&[qc.clone(), qc.clone()]), true).unwrap();
        assert_eq!(out.circuits(), Some([qc.clone(), qc].as_slice()));
        assert!(out.circuit().is_none());
        assert!(out.pulse_list().is_none());
        assert_eq!(out.pulse_lists().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_single_input_needs_one_circuit() {
        let qc = cz_circuit();
        let err = read_json_aqt(aqt_response(&[qc.clone(), qc]), false).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn test_qscout_programs() {
        let qc = cz_circuit();
        let resp = QscoutCompileResponse {
            qiskit_circuits: serialize_circuits(std::slice::from_ref(&qc)).unwrap(),
            jaqal_programs: vec!["register q[8]".into()],
        };
        let out = read_json_qscout(resp, false).unwrap();
        assert_eq!(out.jaqal_program(), Some("register q[8]"));
        assert!(out.jaqal_programs().is_none());
        assert!(out.pulse_list().is_none());
    }

    #[test]
    fn test_mismatched_artifact_count() {
        let qc = cz_circuit();
        let resp = QscoutCompileResponse {
            qiskit_circuits: serialize_circuits(&[qc.clone(), qc]).unwrap(),
            jaqal_programs: vec!["one".into()],
        };
        assert!(read_json_qscout(resp, true).is_err());
    }
}
