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
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::Serialize;
use telesabre_common::Dataset;

use crate::{
    error::{RenderError, ViewerError},
    layout::PaneLayout,
    page::render_page,
    state::ViewerState,
};

/// Create the parent directory of `output_path` if it is missing.
///
/// A bare file name has an empty parent and needs nothing. An existing
/// parent that is read-only is reported before any rendering happens.
pub fn ensure_parent_dir(output_path: &Path) -> Result<(), ViewerError> {
    match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => ensure_dir(dir),
        Some(_) | None => Ok(()),
    }
}

fn ensure_dir(dir: &Path) -> Result<(), ViewerError> {
    fs::create_dir_all(dir)?;
    if fs::metadata(dir)?.permissions().readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("output directory '{}' is not writable", dir.display()),
        )
        .into());
    }
    Ok(())
}

pub fn write_output(path: &Path, contents: &str) -> Result<(), ViewerError> {
    ensure_parent_dir(path)?;
    fs::write(path, contents)?;
    Ok(())
}

/// File name of the page for `index`, zero padded to sort by iteration.
pub fn page_file_name(index: usize, total: usize) -> String {
    let width = total.saturating_sub(1).to_string().len();
    format!("iteration_{index:0width$}.html")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    /// Iterations whose render was rejected and were not written.
    pub skipped: Vec<usize>,
}

/// Render each iteration in `range` and write one page per iteration into
/// `dir`. A rejected render is logged and skipped.
///
/// The range must start inside the replay; its end is clamped to the length.
pub fn export_pages(
    state: &mut ViewerState,
    layout: &PaneLayout,
    dir: &Path,
    range: Range<usize>,
) -> Result<ExportReport, ViewerError> {
    let total = state.len();
    if range.start >= total {
        return Err(RenderError::IterationOutOfRange {
            index: range.start,
            len: total,
        }
        .into());
    }
    ensure_dir(dir)?;
    let mut report = ExportReport::default();
    for index in range.start..range.end.min(total) {
        if let Err(e) = state.render(index) {
            warn!("Skipping iteration {index}: {e}");
            report.skipped.push(index);
            continue;
        }
        let path = dir.join(page_file_name(index, total));
        fs::write(&path, render_page(state, layout))?;
        report.written.push(path);
    }
    info!(
        "Wrote {} pages to {} ({} skipped)",
        report.written.len(),
        dir.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// One line of the per-iteration summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub iteration: usize,
    pub energy: Option<f64>,
    pub swaps: Option<u64>,
    pub teleports: Option<u64>,
    pub telegates: Option<u64>,
    pub applied_gates: usize,
    pub applied_ops: usize,
    pub front: usize,
    pub remaining: usize,
    pub candidates: usize,
    pub deadlock: bool,
}

pub fn summary_rows(dataset: &Dataset) -> Vec<SummaryRow> {
    dataset
        .iterations
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let counts = snapshot.counts();
            SummaryRow {
                iteration: index,
                energy: snapshot.energy(),
                swaps: counts.map(|c| c.swaps),
                teleports: counts.map(|c| c.teleports),
                telegates: counts.map(|c| c.telegates),
                applied_gates: snapshot.applied_gates.len(),
                applied_ops: snapshot.applied_ops.len(),
                front: snapshot.front.len(),
                remaining: snapshot.remaining_nodes.len(),
                candidates: snapshot.candidate_ops.len(),
                deadlock: snapshot.solving_deadlock,
            }
        })
        .collect()
}

/// Write the summary as CSV with a header line.
pub fn write_summary<W: io::Write>(dataset: &Dataset, writer: W) -> Result<(), ViewerError> {
    let mut out = csv::Writer::from_writer(writer);
    for row in summary_rows(dataset) {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names_sort_by_iteration() {
        assert_eq!("iteration_7.html", page_file_name(7, 10));
        assert_eq!("iteration_007.html", page_file_name(7, 120));
        assert_eq!("iteration_0.html", page_file_name(0, 0));
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        assert!(ensure_parent_dir(Path::new("replay.html")).is_ok());
    }
}
