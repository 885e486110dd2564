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

use serde::{Deserialize, Deserializer, Serialize, de};

/// Raw 2D layout position as produced by the layout tool, before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position(pub f64, pub f64);

impl Position {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

/// Layout tools sometimes emit coordinates as strings, so accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value<E: de::Error>(self) -> Result<f64, E> {
        let v: f64 = match self {
            Coordinate::Number(v) => v,
            Coordinate::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid coordinate '{s}'")))?,
        };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(E::custom(format!("non-finite coordinate {v}")))
        }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(Coordinate, Coordinate)>::deserialize(deserializer)?;
        Ok(Position(x.value()?, y.value()?))
    }
}

/// Static hardware topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureDescriptor {
    /// One position per physical qubit, indexed by physical qubit.
    pub node_positions: Vec<Position>,
    /// Direct links between physical qubits.
    pub edges: Vec<(usize, usize)>,
    /// Non-adjacent links reachable only through teleportation.
    pub teleport_edges: Vec<(usize, usize)>,
    #[serde(default)]
    pub comm_qubits: Vec<usize>,
    #[serde(default)]
    pub source_qubits: Vec<usize>,
    #[serde(default)]
    pub num_qubits: Option<usize>,
}

impl ArchitectureDescriptor {
    pub fn num_qubits(&self) -> usize {
        self.node_positions.len()
    }

    /// Physical links followed by teleport links, in slot order.
    pub fn all_links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().chain(self.teleport_edges.iter()).copied()
    }

    pub fn num_links(&self) -> usize {
        self.edges.len() + self.teleport_edges.len()
    }
}
