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

//! Dataset model for TeleSABRE replays.
//!
//! A replay document holds a static hardware description, a static circuit
//! description and one snapshot per routing iteration. Everything here is
//! immutable once loaded.

mod architecture;
mod circuit;
mod dataset;
mod iteration;
mod op;

pub use architecture::{ArchitectureDescriptor, Position};
pub use circuit::CircuitDescriptor;
pub use dataset::{Dataset, DatasetError};
pub use iteration::{IterationSnapshot, OpCounts};
pub use op::{OpKind, consecutive_pairs};
