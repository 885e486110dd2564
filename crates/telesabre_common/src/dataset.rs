// Copyright contributors to the TeleSABRE Replay Viewer project

use std::{
    fmt::{Display, Formatter},
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{ArchitectureDescriptor, CircuitDescriptor, IterationSnapshot};

/// A complete replay document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub architecture: ArchitectureDescriptor,
    pub circuit: CircuitDescriptor,
    pub iterations: Vec<IterationSnapshot>,
}

#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    Json(serde_json::Error),
    Empty,
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read dataset: {err}"),
            Self::Json(err) => write!(f, "malformed dataset: {err}"),
            Self::Empty => write!(f, "dataset contains no iterations"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl Dataset {
    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        dataset.check_non_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.check_non_empty()
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        debug!("Reading dataset from {}", path.display());
        let dataset = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            "Loaded {} iterations over {} physical qubits and {} gates",
            dataset.iterations.len(),
            dataset.architecture.num_qubits(),
            dataset.circuit.num_gates()
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn iteration(&self, index: usize) -> Option<&IterationSnapshot> {
        self.iterations.get(index)
    }

    fn check_non_empty(self) -> Result<Self, DatasetError> {
        if self.iterations.is_empty() {
            Err(DatasetError::Empty)
        } else {
            Ok(self)
        }
    }
}
