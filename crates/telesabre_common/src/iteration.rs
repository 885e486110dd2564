// Copyright contributors to the TeleSABRE Replay Viewer project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Deserializer, Serialize};

/// State of the router after one iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationSnapshot {
    /// Node slot (logical qubits first, then padding slots) to physical qubit.
    pub virt_to_phys: Vec<usize>,
    /// Gates executed this iteration, as physical qubit lists.
    #[serde(deserialize_with = "strip_padding")]
    pub applied_gates: Vec<Vec<usize>>,
    /// Routing operations applied this iteration, as physical qubit paths.
    #[serde(deserialize_with = "strip_padding")]
    pub applied_ops: Vec<Vec<usize>>,
    pub needed_paths: Vec<Vec<usize>>,
    pub remaining_nodes: Vec<usize>,
    pub front: Vec<usize>,
    /// Gate indices executed this iteration.
    #[serde(default)]
    pub gates: Vec<usize>,
    pub candidate_ops: Vec<Vec<usize>>,
    pub candidate_ops_scores: Vec<f64>,
    pub candidate_ops_front_scores: Vec<f64>,
    pub candidate_ops_future_scores: Vec<f64>,
    pub solving_deadlock: bool,
    #[serde(deserialize_with = "scalar_or_seq")]
    pub energy: Vec<f64>,
    #[serde(default)]
    pub swap_count: Option<u64>,
    #[serde(default)]
    pub teleportation_count: Option<u64>,
    #[serde(default)]
    pub telegate_count: Option<u64>,
    #[serde(default)]
    pub iteration: Option<usize>,
}

/// Cumulative operation counters reported by the router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpCounts {
    pub swaps: u64,
    pub teleports: u64,
    pub telegates: u64,
}

impl IterationSnapshot {
    /// The displayed cost, if the router reported one.
    pub fn energy(&self) -> Option<f64> {
        self.energy.first().copied()
    }

    /// Counters are only present when all three were written.
    pub fn counts(&self) -> Option<OpCounts> {
        Some(OpCounts {
            swaps: self.swap_count?,
            teleports: self.teleportation_count?,
            telegates: self.telegate_count?,
        })
    }
}

/// The native writer pads single-qubit entries with -1.
fn strip_padding<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<usize>>, D::Error> {
    let raw = Vec::<Vec<i64>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|qubits| {
            qubits
                .into_iter()
                .filter_map(|q| usize::try_from(q).ok())
                .collect()
        })
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarOrSeq {
    Scalar(f64),
    Seq(Vec<f64>),
}

fn scalar_or_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    Ok(match ScalarOrSeq::deserialize(deserializer)? {
        ScalarOrSeq::Scalar(v) => vec![v],
        ScalarOrSeq::Seq(vs) => vs,
    })
}
