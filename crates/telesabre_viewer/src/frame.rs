// Copyright contributors to the TeleSABRE Replay Viewer project

use serde::Serialize;
use telesabre_common::OpCounts;

use crate::{
    candidates::CandidatePool,
    geometry::{Point, Vector},
    scene::Scene,
    style::{Emphasis, LinkHighlight, NodeFill},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QubitState {
    pub fill: NodeFill,
    pub position: Point,
    pub label_visible: bool,
    /// Labels stay anchored at their home coordinate and are shifted by this.
    pub label_offset: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub iteration: usize,
    pub energy: Option<f64>,
    pub counts: Option<OpCounts>,
}

impl Header {
    pub fn energy_text(&self) -> String {
        match self.energy {
            Some(energy) => format!("{energy:.3}"),
            None => "-".to_string(),
        }
    }
}

/// Every mutable visual attribute of the scene. The drawing layer only reads
/// this; the renderer rebuilds it from a snapshot on each call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub qubits: Vec<QubitState>,
    pub links: Vec<LinkHighlight>,
    /// Visibility of the needed-path overlay of each link slot.
    pub needed: Vec<bool>,
    pub gates: Vec<Emphasis>,
    /// Gates executed in the current iteration.
    pub executed: Vec<bool>,
    pub dependencies: Vec<Emphasis>,
    pub candidates: CandidatePool,
    pub deadlock: bool,
    pub header: Option<Header>,
}

impl Frame {
    /// State right after scene construction, before the first render.
    pub fn initial(scene: &Scene) -> Self {
        Self {
            qubits: scene
                .qubits
                .iter()
                .map(|q| QubitState {
                    fill: NodeFill::Vacant,
                    position: q.home,
                    label_visible: false,
                    label_offset: Vector::ZERO,
                })
                .collect(),
            links: vec![LinkHighlight::Idle; scene.links.len()],
            needed: vec![false; scene.overlays.len()],
            gates: vec![Emphasis::Pending; scene.gates.len()],
            executed: vec![false; scene.gates.len()],
            dependencies: vec![Emphasis::Pending; scene.dependencies.len()],
            candidates: CandidatePool::default(),
            deadlock: false,
            header: None,
        }
    }

    /// Baseline every channel a render overwrites. The candidate pool keeps
    /// its rows; only pending hover snapshots are dropped.
    pub(crate) fn reset(&mut self) {
        self.links.fill(LinkHighlight::Idle);
        self.needed.fill(false);
        self.gates.fill(Emphasis::Dimmed);
        self.executed.fill(false);
        self.dependencies.fill(Emphasis::Dimmed);
        self.candidates.clear_hover();
        self.deadlock = false;
        self.header = None;
    }
}
