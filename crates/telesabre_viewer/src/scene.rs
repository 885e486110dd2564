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

//! One-time construction of every persistent visual element.
//!
//! Elements live in index-aligned vectors so the renderer can address them by
//! qubit, link, gate or dependency index. Two [`Surface`]s record the
//! back-to-front order in which the drawing layer emits them.

use std::collections::HashSet;

use log::debug;
use telesabre_common::{CircuitDescriptor, Dataset};

use crate::{
    config::ViewerConfig,
    error::SceneError,
    geometry::{MAX_WAVE_SAMPLES, Point, Rect, Wave, wave_path},
    index::{LinkKind, SceneIndex},
    palette,
    style::Color,
};

/// The node that moves to whichever physical qubit its slot is mapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct QubitNode {
    /// Coordinate of the physical qubit with the same index.
    pub home: Point,
    pub radius: f64,
    pub label: String,
}

/// Fixed marker for a physical qubit site.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub at: Point,
    pub radius: f64,
    pub comm: bool,
    pub source: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkShape {
    Line { from: Point, to: Point },
    Wave(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkGlyph {
    pub endpoints: (usize, usize),
    pub kind: LinkKind,
    pub shape: LinkShape,
}

/// Dashed overlay marking a link needed by an upcoming operation.
#[derive(Debug, Clone, PartialEq)]
pub struct NeededOverlay {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateCell {
    pub rect: Rect,
    pub fill: Color,
    pub label: String,
    pub label_at: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateGlyph {
    pub center: Point,
    pub cells: Vec<GateCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependencyGlyph {
    pub gates: (usize, usize),
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    Overlay(usize),
    Link(usize),
    Placeholder(usize),
    Qubit(usize),
    QubitLabel(usize),
    Dependency(usize),
    Gate(usize),
}

/// A drawing surface: its elements, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    pub order: Vec<ElementRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub index: SceneIndex,
    pub palette: Vec<Color>,
    pub num_logical: usize,
    pub qubits: Vec<QubitNode>,
    pub placeholders: Vec<Placeholder>,
    pub links: Vec<LinkGlyph>,
    pub overlays: Vec<NeededOverlay>,
    pub gates: Vec<GateGlyph>,
    pub dependencies: Vec<DependencyGlyph>,
    pub topology: Surface,
    pub circuit: Surface,
}

impl Scene {
    pub fn build(dataset: &Dataset, config: &ViewerConfig) -> Result<Self, SceneError> {
        let arch = &dataset.architecture;
        let circuit = &dataset.circuit;
        let physical = arch.num_qubits();
        if circuit.num_qubits > physical {
            return Err(SceneError::TooManyLogical {
                logical: circuit.num_qubits,
                physical,
            });
        }

        let index = SceneIndex::build(arch, circuit, config)?;
        let palette = palette::generate(circuit.num_qubits, config.palette_seed);

        let qubits = index
            .qubits
            .iter()
            .enumerate()
            .map(|(p, &home)| QubitNode {
                home,
                radius: config.qubit_radius,
                label: p.to_string(),
            })
            .collect();

        let comm: HashSet<usize> = arch.comm_qubits.iter().copied().collect();
        let sources: HashSet<usize> = arch.source_qubits.iter().copied().collect();
        let placeholders = index
            .qubits
            .iter()
            .enumerate()
            .map(|(p, &at)| Placeholder {
                at,
                radius: config.placeholder_radius,
                comm: comm.contains(&p),
                source: sources.contains(&p),
            })
            .collect();

        let wave = Wave {
            wavelength: config.wave_wavelength,
            amplitude: config.wave_amplitude,
            min_samples: config.wave_min_samples,
        };
        if !wave.is_valid() {
            return Err(SceneError::InvalidWave {
                wavelength: wave.wavelength,
                min_samples: wave.min_samples,
            });
        }
        let mut links = Vec::with_capacity(index.links.len());
        let mut overlays = Vec::with_capacity(index.links.len());
        for entry in index.links.entries() {
            let (a, b) = entry.endpoints;
            let (from, to) = (index.qubits[a], index.qubits[b]);
            let shape = match entry.kind {
                LinkKind::Physical => LinkShape::Line { from, to },
                LinkKind::Teleport => LinkShape::Wave(wave_path(from, to, wave).ok_or(
                    SceneError::WaveTooLong {
                        link: entry.endpoints,
                        limit: MAX_WAVE_SAMPLES,
                    },
                )?),
            };
            links.push(LinkGlyph {
                endpoints: entry.endpoints,
                kind: entry.kind,
                shape,
            });
            overlays.push(NeededOverlay { from, to });
        }

        let gates = gate_glyphs(circuit, &index.gates, &palette, config)?;

        let unit = config.gate_unit();
        let dependencies = circuit
            .dag
            .iter()
            .map(|&(u, v)| {
                let (from, to) = (index.gates[u], index.gates[v]);
                DependencyGlyph {
                    gates: (u, v),
                    from: Point::new(from.x + unit, from.y),
                    to: Point::new(to.x - unit, to.y),
                }
            })
            .collect::<Vec<_>>();

        let mut topology = Surface::default();
        topology
            .order
            .extend((0..overlays.len()).map(ElementRef::Overlay));
        topology.order.extend((0..links.len()).map(ElementRef::Link));
        topology
            .order
            .extend((0..physical).map(ElementRef::Placeholder));
        for p in 0..physical {
            topology.order.push(ElementRef::Qubit(p));
            topology.order.push(ElementRef::QubitLabel(p));
        }

        let mut circuit_surface = Surface::default();
        circuit_surface
            .order
            .extend((0..dependencies.len()).map(ElementRef::Dependency));
        circuit_surface
            .order
            .extend((0..gates.len()).map(ElementRef::Gate));

        debug!(
            "Built scene: {} qubits, {} links, {} gates, {} dependencies",
            physical,
            links.len(),
            gates.len(),
            dependencies.len()
        );

        Ok(Self {
            index,
            palette,
            num_logical: circuit.num_qubits,
            qubits,
            placeholders,
            links,
            overlays,
            gates,
            dependencies,
            topology,
            circuit: circuit_surface,
        })
    }

    pub fn num_slots(&self) -> usize {
        self.qubits.len()
    }
}

/// One or two operand cells per gate, stacked when the gate has two operands.
fn gate_glyphs(
    circuit: &CircuitDescriptor,
    centers: &[Point],
    palette: &[Color],
    config: &ViewerConfig,
) -> Result<Vec<GateGlyph>, SceneError> {
    let unit = config.gate_unit();
    let cell = |operand: usize, top: f64, center: Point| GateCell {
        rect: Rect {
            origin: Point::new(center.x - unit, top),
            width: 2.0 * unit,
            height: unit,
        },
        fill: palette[operand],
        label: operand.to_string(),
        label_at: Point::new(center.x, top + 0.5 * unit),
    };

    circuit
        .gates
        .iter()
        .zip(centers)
        .enumerate()
        .map(|(g, (operands, &center))| {
            if let Some(&operand) = operands.iter().find(|&&v| v >= circuit.num_qubits) {
                return Err(SceneError::OperandOutOfRange {
                    gate: g,
                    operand,
                    logical: circuit.num_qubits,
                });
            }
            let cells = match operands[..] {
                [v] => vec![cell(v, center.y - 0.5 * unit, center)],
                [v1, v2] => vec![
                    cell(v1, center.y - unit, center),
                    cell(v2, center.y, center),
                ],
                _ => {
                    return Err(SceneError::GateOperands {
                        gate: g,
                        count: operands.len(),
                    });
                }
            };
            Ok(GateGlyph { center, cells })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use telesabre_common::{ArchitectureDescriptor, IterationSnapshot, Position};

    fn dataset() -> Dataset {
        let snapshot: IterationSnapshot = serde_json::from_str(
            r#"{
                "virt_to_phys": [0, 1, 2],
                "applied_gates": [],
                "applied_ops": [],
                "needed_paths": [],
                "remaining_nodes": [0, 1],
                "front": [0],
                "candidate_ops": [],
                "candidate_ops_scores": [],
                "candidate_ops_front_scores": [],
                "candidate_ops_future_scores": [],
                "solving_deadlock": false,
                "energy": 0.0
            }"#,
        )
        .unwrap();
        Dataset {
            architecture: ArchitectureDescriptor {
                node_positions: vec![Position(0.0, 0.0), Position(1.0, 0.0), Position(2.0, 0.0)],
                edges: vec![(0, 1)],
                teleport_edges: vec![(1, 2)],
                comm_qubits: vec![1],
                source_qubits: vec![0],
                num_qubits: Some(3),
            },
            circuit: CircuitDescriptor {
                num_qubits: 2,
                num_gates: Some(2),
                gates: vec![vec![0, 1], vec![1]],
                dag: vec![(0, 1)],
                node_positions: vec![Position(0.0, 0.0), Position(1.0, 0.0)],
            },
            iterations: vec![snapshot],
        }
    }

    #[test]
    fn one_element_per_entity() {
        let scene = Scene::build(&dataset(), &ViewerConfig::default()).unwrap();
        assert_eq!(3, scene.qubits.len());
        assert_eq!(3, scene.placeholders.len());
        assert_eq!(2, scene.links.len());
        assert_eq!(2, scene.overlays.len());
        assert_eq!(2, scene.gates.len());
        assert_eq!(1, scene.dependencies.len());
        assert_eq!(2, scene.palette.len());
    }

    #[test]
    fn teleport_links_are_waves() {
        let scene = Scene::build(&dataset(), &ViewerConfig::default()).unwrap();
        assert!(matches!(scene.links[0].shape, LinkShape::Line { .. }));
        match &scene.links[1].shape {
            LinkShape::Wave(points) => assert!(points.len() > 50),
            other => panic!("expected wave, got {other:?}"),
        }
    }

    #[test]
    fn topology_draw_order() {
        let scene = Scene::build(&dataset(), &ViewerConfig::default()).unwrap();
        let order = &scene.topology.order;
        assert_eq!(ElementRef::Overlay(0), order[0]);
        assert_eq!(ElementRef::Link(0), order[2]);
        assert_eq!(ElementRef::Placeholder(0), order[4]);
        assert_eq!(ElementRef::Qubit(0), order[7]);
        assert_eq!(ElementRef::QubitLabel(0), order[8]);
        assert_eq!(
            vec![ElementRef::Dependency(0), ElementRef::Gate(0), ElementRef::Gate(1)],
            scene.circuit.order
        );
    }

    #[test]
    fn gate_cells_stack() {
        let config = ViewerConfig::default();
        let scene = Scene::build(&dataset(), &config).unwrap();
        let unit = config.gate_unit();
        let two = &scene.gates[0];
        assert_eq!(2, two.cells.len());
        assert_eq!(two.center.y - unit, two.cells[0].rect.origin.y);
        assert_eq!(two.center.y, two.cells[1].rect.origin.y);
        assert_eq!("1", two.cells[1].label);
        assert_eq!(scene.palette[1], two.cells[1].fill);

        let one = &scene.gates[1];
        assert_eq!(1, one.cells.len());
        assert_eq!(one.center.y, one.cells[0].label_at.y);
    }

    #[test]
    fn dependency_lines_are_inset() {
        let config = ViewerConfig::default();
        let scene = Scene::build(&dataset(), &config).unwrap();
        let dep = &scene.dependencies[0];
        assert_eq!(scene.gates[0].center.x + config.gate_unit(), dep.from.x);
        assert_eq!(scene.gates[1].center.x - config.gate_unit(), dep.to.x);
    }

    #[test]
    fn comm_and_source_qubits_marked() {
        let scene = Scene::build(&dataset(), &ViewerConfig::default()).unwrap();
        assert!(scene.placeholders[1].comm);
        assert!(scene.placeholders[0].source);
        assert!(!scene.placeholders[2].comm);
    }

    #[test]
    fn rejects_bad_gates() {
        let mut data = dataset();
        data.circuit.gates[1] = vec![0, 1, 1];
        assert_eq!(
            Err(SceneError::GateOperands { gate: 1, count: 3 }),
            Scene::build(&data, &ViewerConfig::default())
        );

        let mut data = dataset();
        data.circuit.gates[1] = vec![5];
        assert!(matches!(
            Scene::build(&data, &ViewerConfig::default()),
            Err(SceneError::OperandOutOfRange { operand: 5, .. })
        ));

        let mut data = dataset();
        data.circuit.num_qubits = 4;
        assert!(matches!(
            Scene::build(&data, &ViewerConfig::default()),
            Err(SceneError::TooManyLogical { .. })
        ));
    }

    #[test]
    fn rejects_unbounded_teleport_waves() {
        let mut data = dataset();
        data.architecture.node_positions[2] = Position(1e300, 0.0);
        assert_eq!(
            Err(SceneError::WaveTooLong {
                link: (1, 2),
                limit: MAX_WAVE_SAMPLES,
            }),
            Scene::build(&data, &ViewerConfig::default())
        );

        // Physical links are straight lines and need no samples.
        let mut data = dataset();
        data.architecture.teleport_edges.clear();
        data.architecture.node_positions[2] = Position(1e300, 0.0);
        assert!(Scene::build(&data, &ViewerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_invalid_wave_settings() {
        let settings = [
            (0.0, 50),
            (-10.0, 50),
            (f64::NAN, 50),
            (f64::INFINITY, 50),
            (10.0, 0),
            (10.0, MAX_WAVE_SAMPLES + 1),
            (10.0, usize::MAX),
        ];
        for (wavelength, min_samples) in settings {
            let config = ViewerConfig {
                wave_wavelength: wavelength,
                wave_min_samples: min_samples,
                ..ViewerConfig::default()
            };
            assert!(
                matches!(
                    Scene::build(&dataset(), &config),
                    Err(SceneError::InvalidWave { .. })
                ),
                "wavelength {wavelength}, min_samples {min_samples}"
            );
        }

        // A tiny but positive wavelength is caught by the sample cap instead.
        let config = ViewerConfig {
            wave_wavelength: 1e-9,
            ..ViewerConfig::default()
        };
        assert!(matches!(
            Scene::build(&dataset(), &config),
            Err(SceneError::WaveTooLong { link: (1, 2), .. })
        ));
    }

    #[test]
    fn rejects_coordinates_that_overflow_when_scaled() {
        let mut data = dataset();
        data.architecture.node_positions[2] = Position(f64::MAX, 0.0);
        assert_eq!(
            Err(SceneError::QubitCoordinate { qubit: 2 }),
            Scene::build(&data, &ViewerConfig::default())
        );

        let mut data = dataset();
        data.circuit.node_positions[1] = Position(0.0, f64::MAX);
        assert_eq!(
            Err(SceneError::GateCoordinate { gate: 1 }),
            Scene::build(&data, &ViewerConfig::default())
        );
    }
}
