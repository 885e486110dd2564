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

//! Replay viewer for TeleSABRE routing runs.
//!
//! A [`Scene`] is built once from the static parts of a dataset. Each call to
//! [`ViewerState::render`] then projects one iteration snapshot onto a
//! [`Frame`], which the SVG and HTML writers turn into output.

pub mod candidates;
pub mod config;
pub mod error;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod index;
pub mod layout;
pub mod navigation;
pub mod page;
mod palette;
pub mod render;
pub mod scene;
pub mod state;
pub mod style;
pub mod svg;

pub use candidates::{CandidatePool, CandidateRow, RowHandle};
pub use config::ViewerConfig;
pub use error::{RenderError, RenderStep, SceneError, StepError, ViewerError};
pub use frame::Frame;
pub use index::{EdgeKey, LinkIndex, SceneIndex};
pub use layout::PaneLayout;
pub use navigation::{Input, Key, Navigator};
pub use scene::Scene;
pub use state::ViewerState;
