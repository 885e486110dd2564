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

use std::{
    fmt::{Display, Formatter},
    io,
};

use telesabre_common::DatasetError;

use crate::geometry::MAX_WAVE_SAMPLES;

/// Scene construction failures. Any of these aborts initialisation.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    QubitOutOfRange { link: (usize, usize), qubits: usize },
    GateOperands { gate: usize, count: usize },
    OperandOutOfRange { gate: usize, operand: usize, logical: usize },
    GatePositions { gates: usize, positions: usize },
    DependencyOutOfRange { dependency: (usize, usize), gates: usize },
    TooManyLogical { logical: usize, physical: usize },
    QubitCoordinate { qubit: usize },
    GateCoordinate { gate: usize },
    InvalidWave { wavelength: f64, min_samples: usize },
    WaveTooLong { link: (usize, usize), limit: usize },
}

impl Display for SceneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QubitOutOfRange { link, qubits } => write!(
                f,
                "link ({}, {}) references a physical qubit outside 0..{qubits}",
                link.0, link.1
            ),
            Self::GateOperands { gate, count } => {
                write!(f, "gate {gate} has {count} operands, expected 1 or 2")
            }
            Self::OperandOutOfRange {
                gate,
                operand,
                logical,
            } => write!(
                f,
                "gate {gate} acts on logical qubit {operand} outside 0..{logical}"
            ),
            Self::GatePositions { gates, positions } => write!(
                f,
                "circuit has {gates} gates but {positions} layout positions"
            ),
            Self::DependencyOutOfRange { dependency, gates } => write!(
                f,
                "dependency ({}, {}) references a gate outside 0..{gates}",
                dependency.0, dependency.1
            ),
            Self::TooManyLogical { logical, physical } => write!(
                f,
                "{logical} logical qubits cannot be placed on {physical} physical qubits"
            ),
            Self::QubitCoordinate { qubit } => {
                write!(f, "physical qubit {qubit} has no finite pixel coordinate")
            }
            Self::GateCoordinate { gate } => {
                write!(f, "gate {gate} has no finite pixel coordinate")
            }
            Self::InvalidWave {
                wavelength,
                min_samples,
            } => write!(
                f,
                "wave needs a positive finite wavelength, a finite amplitude and \
                 1..={MAX_WAVE_SAMPLES} samples, got wavelength {wavelength} and \
                 {min_samples} samples"
            ),
            Self::WaveTooLong { link, limit } => write!(
                f,
                "teleport link ({}, {}) needs more than {limit} wave samples",
                link.0, link.1
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Where a qubit path came from, for lookup-miss reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    AppliedGate,
    AppliedOp,
    NeededPath,
    CandidateOp,
}

impl Display for PathSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AppliedGate => "applied gate",
            Self::AppliedOp => "applied op",
            Self::NeededPath => "needed path",
            Self::CandidateOp => "candidate op",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSeries {
    Score,
    Front,
    Future,
}

/// The render sub-steps, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderStep {
    QubitLayer,
    LinkLayer,
    NeededPaths,
    CircuitLayer,
    CandidateList,
    Deadlock,
    Header,
}

impl Display for RenderStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::QubitLayer => "qubit layer",
            Self::LinkLayer => "link layer",
            Self::NeededPaths => "needed-path overlay",
            Self::CircuitLayer => "circuit layer",
            Self::CandidateList => "candidate list",
            Self::Deadlock => "deadlock indicator",
            Self::Header => "header",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    /// No link is registered for this unordered pair.
    MissingLink {
        pair: (usize, usize),
        source: PathSource,
    },
    PhysicalOutOfRange {
        slot: usize,
        physical: usize,
        qubits: usize,
    },
    GateOutOfRange { gate: usize, gates: usize },
    MissingScore { row: usize, series: ScoreSeries },
}

impl Display for StepError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLink { pair, source } => write!(
                f,
                "{source} uses qubit pair ({}, {}) which has no link",
                pair.0, pair.1
            ),
            Self::PhysicalOutOfRange {
                slot,
                physical,
                qubits,
            } => write!(
                f,
                "slot {slot} is mapped to physical qubit {physical} outside 0..{qubits}"
            ),
            Self::GateOutOfRange { gate, gates } => {
                write!(f, "gate {gate} outside 0..{gates}")
            }
            Self::MissingScore { row, series } => {
                write!(f, "candidate {row} has no {series:?} score")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: RenderStep,
    pub error: StepError,
}

impl Display for StepFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.step, self.error)
    }
}

/// A render call that was rejected. The previously committed frame is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    IterationOutOfRange { index: usize, len: usize },
    Steps {
        iteration: usize,
        failures: Vec<StepFailure>,
    },
}

impl RenderError {
    pub fn failed_steps(&self) -> Vec<RenderStep> {
        match self {
            Self::IterationOutOfRange { .. } => Vec::new(),
            Self::Steps { failures, .. } => failures.iter().map(|f| f.step).collect(),
        }
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IterationOutOfRange { index, len } => {
                write!(f, "iteration {index} outside 0..{len}")
            }
            Self::Steps {
                iteration,
                failures,
            } => {
                write!(f, "rendering iteration {iteration} failed")?;
                for failure in failures {
                    write!(f, "; {failure}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RenderError {}

#[derive(Debug)]
pub enum ViewerError {
    Dataset(DatasetError),
    Scene(SceneError),
    Render(RenderError),
    Config(serde_json::Error),
    Csv(csv::Error),
    Io(io::Error),
}

impl Display for ViewerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dataset(err) => write!(f, "{err}"),
            Self::Scene(err) => write!(f, "cannot build scene: {err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid viewer config: {err}"),
            Self::Csv(err) => write!(f, "cannot write summary: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dataset(err) => Some(err),
            Self::Scene(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DatasetError> for ViewerError {
    fn from(err: DatasetError) -> Self {
        Self::Dataset(err)
    }
}

impl From<SceneError> for ViewerError {
    fn from(err: SceneError) -> Self {
        Self::Scene(err)
    }
}

impl From<RenderError> for ViewerError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}

impl From<csv::Error> for ViewerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<io::Error> for ViewerError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
