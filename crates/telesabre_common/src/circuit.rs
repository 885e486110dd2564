// Copyright contributors to the TeleSABRE Replay Viewer project

use serde::{Deserialize, Serialize};

use crate::Position;

/// Static logical circuit and its dependency DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDescriptor {
    /// Number of logical (virtual) qubits.
    pub num_qubits: usize,
    #[serde(default)]
    pub num_gates: Option<usize>,
    /// Logical operands of each gate, one or two entries.
    pub gates: Vec<Vec<usize>>,
    /// (source gate, target gate) dependency pairs.
    pub dag: Vec<(usize, usize)>,
    /// Layout position of each gate, index-aligned with `gates`.
    pub node_positions: Vec<Position>,
}

impl CircuitDescriptor {
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }
}
