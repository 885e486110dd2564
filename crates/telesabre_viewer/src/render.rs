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

//! Applies one iteration snapshot to a frame.
//!
//! Rendering is staged: every step runs against a copy of the committed
//! frame and the copy is only handed back if no step failed. The result
//! depends on the snapshot alone, never on which iteration was shown before.

use log::{trace, warn};
use telesabre_common::{Dataset, IterationSnapshot};

use crate::{
    candidates,
    error::{PathSource, RenderError, RenderStep, StepError, StepFailure},
    frame::{Frame, Header, QubitState},
    scene::Scene,
    style::{Emphasis, LinkHighlight, NodeFill},
};

type Step = fn(&Scene, &IterationSnapshot, usize, &mut Frame) -> Result<(), StepError>;

const STEPS: [(RenderStep, Step); 7] = [
    (RenderStep::QubitLayer, qubit_layer),
    (RenderStep::LinkLayer, link_layer),
    (RenderStep::NeededPaths, needed_paths),
    (RenderStep::CircuitLayer, circuit_layer),
    (RenderStep::CandidateList, candidate_list),
    (RenderStep::Deadlock, deadlock),
    (RenderStep::Header, header),
];

/// Build the frame for iteration `index` on top of `committed`.
///
/// Every step runs even when an earlier one fails, so the error lists all of
/// them. Selecting an iteration outside the replay is a caller bug.
pub fn render_iteration(
    scene: &Scene,
    dataset: &Dataset,
    committed: &Frame,
    index: usize,
) -> Result<Frame, RenderError> {
    let len = dataset.len();
    debug_assert!(index < len, "iteration {index} outside 0..{len}");
    let snapshot = dataset
        .iteration(index)
        .ok_or(RenderError::IterationOutOfRange { index, len })?;

    trace!("Rendering iteration {index}");
    let mut staged = committed.clone();
    staged.reset();

    let failures: Vec<StepFailure> = STEPS
        .iter()
        .filter_map(|&(step, run)| {
            run(scene, snapshot, index, &mut staged)
                .err()
                .map(|error| StepFailure { step, error })
        })
        .collect();

    if failures.is_empty() {
        Ok(staged)
    } else {
        for failure in &failures {
            warn!("Iteration {index}: {failure}");
        }
        Err(RenderError::Steps {
            iteration: index,
            failures,
        })
    }
}

/// Move every qubit node to its mapped physical coordinate and colour the
/// ones that carry a logical qubit.
fn qubit_layer(
    scene: &Scene,
    snapshot: &IterationSnapshot,
    _: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    let coordinates = &scene.index.qubits;
    for (slot, (node, state)) in scene.qubits.iter().zip(&mut frame.qubits).enumerate() {
        let target = match snapshot.virt_to_phys.get(slot) {
            Some(&physical) => Some(*coordinates.get(physical).ok_or(
                StepError::PhysicalOutOfRange {
                    slot,
                    physical,
                    qubits: coordinates.len(),
                },
            )?),
            None => None,
        };
        let occupied = target.is_some() && slot < scene.num_logical;
        let position = target.unwrap_or(node.home);
        *state = QubitState {
            fill: if occupied {
                NodeFill::Occupied(scene.palette[slot])
            } else {
                NodeFill::Vacant
            },
            position,
            label_visible: occupied,
            label_offset: position - node.home,
        };
    }
    Ok(())
}

fn link_layer(
    scene: &Scene,
    snapshot: &IterationSnapshot,
    _: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    let links = &scene.index.links;
    for gate in snapshot.applied_gates.iter().filter(|g| g.len() == 2) {
        let slot = links.resolve(gate[0], gate[1], PathSource::AppliedGate)?;
        frame.links[slot] = LinkHighlight::AppliedGate;
    }
    for op in &snapshot.applied_ops {
        let style = LinkHighlight::for_op_len(op.len());
        for slot in links.resolve_path(op, PathSource::AppliedOp)? {
            frame.links[slot] = style;
        }
    }
    Ok(())
}

fn needed_paths(
    scene: &Scene,
    snapshot: &IterationSnapshot,
    _: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    for path in &snapshot.needed_paths {
        for slot in scene.index.links.resolve_path(path, PathSource::NeededPath)? {
            frame.needed[slot] = true;
        }
    }
    Ok(())
}

/// Dim everything, lift the remaining gates and their outgoing dependencies,
/// then bring the front to full opacity.
fn circuit_layer(
    scene: &Scene,
    snapshot: &IterationSnapshot,
    _: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    let gates = scene.gates.len();
    let check = |gate: usize| {
        if gate < gates {
            Ok(gate)
        } else {
            Err(StepError::GateOutOfRange { gate, gates })
        }
    };

    for &gate in &snapshot.remaining_nodes {
        let gate = check(gate)?;
        frame.gates[gate] = Emphasis::Pending;
        for &edge in scene.index.gate_edges.outgoing(gate) {
            frame.dependencies[edge] = Emphasis::Pending;
        }
    }
    for &gate in &snapshot.front {
        frame.gates[check(gate)?] = Emphasis::Front;
    }
    for &gate in &snapshot.gates {
        frame.executed[check(gate)?] = true;
    }
    Ok(())
}

fn candidate_list(
    scene: &Scene,
    snapshot: &IterationSnapshot,
    _: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    candidates::reconcile(&mut frame.candidates, snapshot, &scene.index.links)
}

fn deadlock(
    _: &Scene,
    snapshot: &IterationSnapshot,
    _: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    frame.deadlock = snapshot.solving_deadlock;
    Ok(())
}

fn header(
    _: &Scene,
    snapshot: &IterationSnapshot,
    index: usize,
    frame: &mut Frame,
) -> Result<(), StepError> {
    frame.header = Some(Header {
        iteration: index,
        energy: snapshot.energy(),
        counts: snapshot.counts(),
    });
    Ok(())
}
