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

//! Coordinate tables and lookup indices shared by the scene and the renderer.

use std::collections::HashMap;

use log::warn;
use telesabre_common::{
    ArchitectureDescriptor, CircuitDescriptor, Position, consecutive_pairs,
};

use crate::{
    config::ViewerConfig,
    error::{PathSource, SceneError, StepError},
    geometry::Point,
};

/// Order-independent key for a pair of physical qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(usize, usize);

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Physical,
    Teleport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEntry {
    /// Endpoints in the order the architecture lists them.
    pub endpoints: (usize, usize),
    pub kind: LinkKind,
}

/// Maps unordered physical-qubit pairs to link slots. Physical links take
/// slots `0..edges.len()`, teleport links continue after them.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkIndex {
    slots: HashMap<EdgeKey, usize>,
    links: Vec<LinkEntry>,
}

impl LinkIndex {
    pub fn build(arch: &ArchitectureDescriptor) -> Result<Self, SceneError> {
        let qubits = arch.num_qubits();
        let physical = arch.edges.iter().map(|&e| (e, LinkKind::Physical));
        let teleport = arch.teleport_edges.iter().map(|&e| (e, LinkKind::Teleport));

        let mut slots = HashMap::with_capacity(arch.num_links());
        let mut links = Vec::with_capacity(arch.num_links());
        for (slot, ((a, b), kind)) in physical.chain(teleport).enumerate() {
            if a >= qubits || b >= qubits {
                return Err(SceneError::QubitOutOfRange {
                    link: (a, b),
                    qubits,
                });
            }
            if let Some(previous) = slots.insert(EdgeKey::new(a, b), slot) {
                warn!("Link ({a}, {b}) listed twice; slot {slot} replaces slot {previous}");
            }
            links.push(LinkEntry {
                endpoints: (a, b),
                kind,
            });
        }
        Ok(Self { slots, links })
    }

    pub fn slot(&self, a: usize, b: usize) -> Option<usize> {
        self.slots.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn resolve(&self, a: usize, b: usize, source: PathSource) -> Result<usize, StepError> {
        self.slot(a, b).ok_or(StepError::MissingLink {
            pair: (a, b),
            source,
        })
    }

    /// Link slots along every consecutive pair of `path`.
    pub fn resolve_path(&self, path: &[usize], source: PathSource) -> Result<Vec<usize>, StepError> {
        consecutive_pairs(path)
            .map(|(a, b)| self.resolve(a, b, source))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn entry(&self, slot: usize) -> Option<&LinkEntry> {
        self.links.get(slot)
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.links
    }
}

/// Outgoing dependency-edge slots per gate, in DAG order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateEdgeIndex {
    outgoing: Vec<Vec<usize>>,
}

impl GateEdgeIndex {
    pub fn build(circuit: &CircuitDescriptor) -> Result<Self, SceneError> {
        let gates = circuit.num_gates();
        let mut outgoing = vec![Vec::new(); gates];
        for (slot, &(u, v)) in circuit.dag.iter().enumerate() {
            if u >= gates || v >= gates {
                return Err(SceneError::DependencyOutOfRange {
                    dependency: (u, v),
                    gates,
                });
            }
            outgoing[u].push(slot);
        }
        Ok(Self { outgoing })
    }

    pub fn outgoing(&self, gate: usize) -> &[usize] {
        self.outgoing.get(gate).map_or(&[], Vec::as_slice)
    }
}

fn minimum(positions: &[Position]) -> (f64, f64) {
    positions.iter().fold((f64::INFINITY, f64::INFINITY), |(mx, my), p| {
        (mx.min(p.x()), my.min(p.y()))
    })
}

/// Physical qubit pixel coordinates: shift to the origin, pad, scale uniformly.
pub fn qubit_coordinates(positions: &[Position], config: &ViewerConfig) -> Vec<Point> {
    let (min_x, min_y) = minimum(positions);
    positions
        .iter()
        .map(|p| {
            Point::new(
                (p.x() - min_x + config.qubit_padding) * config.qubit_scale,
                (p.y() - min_y + config.qubit_padding) * config.qubit_scale,
            )
        })
        .collect()
}

/// Gate pixel coordinates: shift to the origin, pad, then stretch each axis.
pub fn gate_coordinates(positions: &[Position], config: &ViewerConfig) -> Vec<Point> {
    let (min_x, min_y) = minimum(positions);
    positions
        .iter()
        .map(|p| {
            Point::new(
                (p.x() - min_x + config.gate_padding) * config.gate_scale * config.gate_x_stretch,
                (p.y() - min_y + config.gate_padding) * config.gate_scale * config.gate_y_stretch,
            )
        })
        .collect()
}

/// Everything the scene builder and the renderer look up by integer index.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneIndex {
    pub qubits: Vec<Point>,
    pub gates: Vec<Point>,
    pub links: LinkIndex,
    pub gate_edges: GateEdgeIndex,
}

impl SceneIndex {
    pub fn build(
        arch: &ArchitectureDescriptor,
        circuit: &CircuitDescriptor,
        config: &ViewerConfig,
    ) -> Result<Self, SceneError> {
        if circuit.node_positions.len() != circuit.num_gates() {
            return Err(SceneError::GatePositions {
                gates: circuit.num_gates(),
                positions: circuit.node_positions.len(),
            });
        }
        let qubits = qubit_coordinates(&arch.node_positions, config);
        if let Some(qubit) = qubits.iter().position(|p| !p.is_finite()) {
            return Err(SceneError::QubitCoordinate { qubit });
        }
        let gates = gate_coordinates(&circuit.node_positions, config);
        if let Some(gate) = gates.iter().position(|p| !p.is_finite()) {
            return Err(SceneError::GateCoordinate { gate });
        }
        Ok(Self {
            qubits,
            gates,
            links: LinkIndex::build(arch)?,
            gate_edges: GateEdgeIndex::build(circuit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch() -> ArchitectureDescriptor {
        ArchitectureDescriptor {
            node_positions: vec![
                Position(1.0, 1.0),
                Position(2.0, 1.0),
                Position(1.0, 2.0),
                Position(2.0, 2.0),
            ],
            edges: vec![(0, 1), (2, 3)],
            teleport_edges: vec![(1, 3)],
            comm_qubits: vec![],
            source_qubits: vec![],
            num_qubits: None,
        }
    }

    #[test]
    fn slot_lookup_is_symmetric() {
        let index = LinkIndex::build(&arch()).unwrap();
        for (a, b) in arch().all_links() {
            assert_eq!(index.slot(a, b), index.slot(b, a));
            assert!(index.slot(a, b).is_some());
        }
    }

    #[test]
    fn teleport_slots_follow_physical() {
        let index = LinkIndex::build(&arch()).unwrap();
        assert_eq!(Some(0), index.slot(1, 0));
        assert_eq!(Some(1), index.slot(3, 2));
        assert_eq!(Some(2), index.slot(3, 1));
        assert_eq!(LinkKind::Teleport, index.entry(2).unwrap().kind);
        assert_eq!(3, index.len());
    }

    #[test]
    fn missing_pair_is_reported() {
        let index = LinkIndex::build(&arch()).unwrap();
        assert_eq!(None, index.slot(0, 3));
        assert_eq!(
            Err(StepError::MissingLink {
                pair: (0, 3),
                source: PathSource::NeededPath
            }),
            index.resolve_path(&[1, 0, 3], PathSource::NeededPath)
        );
        assert_eq!(
            Ok(vec![0, 2]),
            index.resolve_path(&[0, 1, 3], PathSource::AppliedOp)
        );
    }

    #[test]
    fn link_to_unknown_qubit_fails() {
        let mut bad = arch();
        bad.teleport_edges.push((1, 9));
        assert_eq!(
            Err(SceneError::QubitOutOfRange {
                link: (1, 9),
                qubits: 4
            }),
            LinkIndex::build(&bad)
        );
    }

    #[test]
    fn qubit_coordinates_are_padded_and_scaled() {
        let coords = qubit_coordinates(&arch().node_positions, &ViewerConfig::default());
        let (x0, y0) = (coords[0].x, coords[0].y);
        assert!((x0 - 30.0).abs() < 1e-9);
        assert!((y0 - 30.0).abs() < 1e-9);
        assert!((coords[3].x - 180.0).abs() < 1e-9);
    }

    #[test]
    fn gate_coordinates_stretch_each_axis() {
        let config = ViewerConfig {
            gate_x_stretch: 2.0,
            gate_y_stretch: 1.0,
            ..ViewerConfig::default()
        };
        let coords = gate_coordinates(&[Position(-1.0, 5.0), Position(0.0, 6.0)], &config);
        // (0 + 0.03) * 600 * stretch
        assert!((coords[0].x - 36.0).abs() < 1e-9);
        assert!((coords[0].y - 18.0).abs() < 1e-9);
        assert!((coords[1].x - 1236.0).abs() < 1e-9);
        assert!((coords[1].y - 618.0).abs() < 1e-9);
    }

    #[test]
    fn gate_edges_group_by_source() {
        let circuit = CircuitDescriptor {
            num_qubits: 2,
            num_gates: None,
            gates: vec![vec![0, 1], vec![0], vec![1]],
            dag: vec![(0, 1), (0, 2), (1, 2)],
            node_positions: vec![Position(0.0, 0.0); 3],
        };
        let index = GateEdgeIndex::build(&circuit).unwrap();
        assert_eq!(&[0, 1], index.outgoing(0));
        assert_eq!(&[2], index.outgoing(1));
        assert!(index.outgoing(2).is_empty());
        assert!(index.outgoing(17).is_empty());
    }
}
