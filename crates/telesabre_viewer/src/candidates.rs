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

//! Pool of candidate-operation rows.
//!
//! Rows are created lazily and never removed: a shorter candidate list hides
//! the tail instead. The header row is kept apart and never holds data.

use serde::Serialize;
use telesabre_common::{IterationSnapshot, OpKind};

use crate::{
    error::{PathSource, ScoreSeries, StepError},
    index::LinkIndex,
    style::LinkHighlight,
};

pub const HEADER: [&str; 5] = ["Operation", "Type", "Score", "Front", "Future"];

/// Stable handle to a pool row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RowHandle(usize);

impl RowHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow {
    pub visible: bool,
    pub op: Vec<usize>,
    pub kind: OpKind,
    pub score: f64,
    pub front_score: f64,
    pub future_score: f64,
    /// Link slots along `op`, resolved when the row was filled.
    pub links: Vec<usize>,
    /// Link styles captured at this row's hover-in.
    #[serde(skip)]
    saved: Option<Vec<(usize, LinkHighlight)>>,
}

impl CandidateRow {
    fn empty() -> Self {
        Self {
            visible: false,
            op: Vec::new(),
            kind: OpKind::Swap,
            score: 0.0,
            front_score: 0.0,
            future_score: 0.0,
            links: Vec::new(),
            saved: None,
        }
    }

    /// Comma-separated physical qubits of the operation.
    pub fn label(&self) -> String {
        self.op
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Operation, type, score, front score, future score.
    pub fn cells(&self) -> [String; 5] {
        [
            self.label(),
            self.kind.to_string(),
            format!("{:.3}", self.score),
            format!("{:.3}", self.front_score),
            format!("{:.3}", self.future_score),
        ]
    }

    pub fn is_hovered(&self) -> bool {
        self.saved.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidatePool {
    rows: Vec<CandidateRow>,
}

impl CandidatePool {
    /// Handle to row `k`, growing the pool if needed.
    pub fn ensure_row(&mut self, k: usize) -> RowHandle {
        if k >= self.rows.len() {
            self.rows.resize_with(k + 1, CandidateRow::empty);
        }
        RowHandle(k)
    }

    pub fn hide_rows_from(&mut self, k: usize) {
        for row in self.rows.iter_mut().skip(k) {
            row.visible = false;
        }
    }

    pub fn row(&self, handle: RowHandle) -> Option<&CandidateRow> {
        self.rows.get(handle.0)
    }

    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    /// Rows ever created, shown or hidden.
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    /// Paint the row's links with the inspect highlight, remembering what they
    /// showed before. Returns false if the row is hidden or already hovered.
    pub fn hover_in(&mut self, handle: RowHandle, links: &mut [LinkHighlight]) -> bool {
        let Some(row) = self.rows.get_mut(handle.0) else {
            return false;
        };
        if !row.visible || row.saved.is_some() {
            return false;
        }
        let mut saved = Vec::with_capacity(row.links.len());
        for &slot in &row.links {
            if let Some(style) = links.get_mut(slot) {
                saved.push((slot, *style));
                *style = LinkHighlight::Inspect;
            }
        }
        row.saved = Some(saved);
        true
    }

    /// Restore what this row's own hover-in captured.
    pub fn hover_out(&mut self, handle: RowHandle, links: &mut [LinkHighlight]) -> bool {
        let Some(saved) = self.rows.get_mut(handle.0).and_then(|row| row.saved.take()) else {
            return false;
        };
        // Reverse order so a link listed twice ends on its first capture.
        for &(slot, style) in saved.iter().rev() {
            if let Some(link) = links.get_mut(slot) {
                *link = style;
            }
        }
        true
    }

    pub(crate) fn clear_hover(&mut self) {
        for row in &mut self.rows {
            row.saved = None;
        }
    }
}

/// Fill one row per candidate operation and hide the rest.
pub fn reconcile(
    pool: &mut CandidatePool,
    snapshot: &IterationSnapshot,
    links: &LinkIndex,
) -> Result<(), StepError> {
    let score = |series: &[f64], row: usize, which: ScoreSeries| {
        series
            .get(row)
            .copied()
            .ok_or(StepError::MissingScore { row, series: which })
    };

    for (k, op) in snapshot.candidate_ops.iter().enumerate() {
        let slots = links.resolve_path(op, PathSource::CandidateOp)?;
        let handle = pool.ensure_row(k);
        let row = &mut pool.rows[handle.0];
        row.score = score(&snapshot.candidate_ops_scores, k, ScoreSeries::Score)?;
        row.front_score = score(&snapshot.candidate_ops_front_scores, k, ScoreSeries::Front)?;
        row.future_score = score(&snapshot.candidate_ops_future_scores, k, ScoreSeries::Future)?;
        row.op.clone_from(op);
        row.kind = OpKind::from_len(op.len());
        row.links = slots;
        row.visible = true;
    }
    pool.hide_rows_from(snapshot.candidate_ops.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use telesabre_common::{ArchitectureDescriptor, Position};

    use super::*;

    fn links() -> LinkIndex {
        LinkIndex::build(&ArchitectureDescriptor {
            node_positions: vec![Position(0.0, 0.0); 5],
            edges: vec![(0, 1), (1, 2), (3, 4)],
            teleport_edges: vec![(2, 3)],
            comm_qubits: vec![],
            source_qubits: vec![],
            num_qubits: None,
        })
        .unwrap()
    }

    fn snapshot(ops: Vec<Vec<usize>>) -> IterationSnapshot {
        let n = ops.len();
        serde_json::from_value(serde_json::json!({
            "virt_to_phys": [],
            "applied_gates": [],
            "applied_ops": [],
            "needed_paths": [],
            "remaining_nodes": [],
            "front": [],
            "candidate_ops": ops,
            "candidate_ops_scores": (0..n).map(|i| i as f64 + 0.5).collect::<Vec<_>>(),
            "candidate_ops_front_scores": vec![1.0; n],
            "candidate_ops_future_scores": vec![2.0 / 3.0; n],
            "solving_deadlock": false,
            "energy": []
        }))
        .unwrap()
    }

    #[test]
    fn grows_then_hides_tail() {
        let index = links();
        let mut pool = CandidatePool::default();
        reconcile(
            &mut pool,
            &snapshot(vec![vec![0, 1], vec![1, 2, 3], vec![1, 2, 3, 4]]),
            &index,
        )
        .unwrap();
        assert_eq!(3, pool.capacity());
        assert_eq!(3, pool.visible_count());

        reconcile(&mut pool, &snapshot(vec![vec![3, 4]]), &index).unwrap();
        assert_eq!(3, pool.capacity());
        assert_eq!(1, pool.visible_count());
        assert!(pool.rows()[0].visible);
        assert!(!pool.rows()[2].visible);
        assert_eq!("3,4", pool.rows()[0].label());
    }

    #[test]
    fn rows_classify_and_format() {
        let index = links();
        let mut pool = CandidatePool::default();
        reconcile(
            &mut pool,
            &snapshot(vec![vec![0, 1], vec![1, 2, 3], vec![0, 1, 2, 3]]),
            &index,
        )
        .unwrap();
        let kinds: Vec<_> = pool.rows().iter().map(|r| r.kind.to_string()).collect();
        assert_eq!(vec!["Swap", "Teleport", "Telegate"], kinds);
        assert_eq!(
            ["1,2,3", "Teleport", "1.500", "1.000", "0.667"].map(String::from),
            pool.rows()[1].cells()
        );
    }

    #[test]
    fn missing_link_fails_the_step() {
        let mut pool = CandidatePool::default();
        let err = reconcile(&mut pool, &snapshot(vec![vec![0, 4]]), &links()).unwrap_err();
        assert_eq!(
            StepError::MissingLink {
                pair: (0, 4),
                source: PathSource::CandidateOp
            },
            err
        );
    }

    #[test]
    fn short_score_series_fails_the_step() {
        let mut snap = snapshot(vec![vec![0, 1], vec![1, 2]]);
        snap.candidate_ops_future_scores.pop();
        let err = reconcile(&mut CandidatePool::default(), &snap, &links()).unwrap_err();
        assert_eq!(
            StepError::MissingScore {
                row: 1,
                series: ScoreSeries::Future
            },
            err
        );
    }

    #[test]
    fn hover_restores_per_row_snapshot() {
        let index = links();
        let mut pool = CandidatePool::default();
        reconcile(&mut pool, &snapshot(vec![vec![0, 1, 2], vec![3, 4]]), &index).unwrap();

        let mut styles = vec![LinkHighlight::Idle; index.len()];
        styles[1] = LinkHighlight::AppliedGate;
        let before = styles.clone();

        let first = RowHandle::new(0);
        assert!(pool.hover_in(first, &mut styles));
        assert_eq!(LinkHighlight::Inspect, styles[0]);
        assert_eq!(LinkHighlight::Inspect, styles[1]);
        assert_eq!(LinkHighlight::Idle, styles[2]);
        // A second hover-in without hover-out must not capture the inspect style.
        assert!(!pool.hover_in(first, &mut styles));

        assert!(pool.hover_out(first, &mut styles));
        assert_eq!(before, styles);
        assert!(!pool.hover_out(first, &mut styles));
    }

    #[test]
    fn hidden_rows_ignore_hover() {
        let index = links();
        let mut pool = CandidatePool::default();
        reconcile(&mut pool, &snapshot(vec![vec![0, 1], vec![3, 4]]), &index).unwrap();
        reconcile(&mut pool, &snapshot(vec![vec![0, 1]]), &index).unwrap();
        let mut styles = vec![LinkHighlight::Idle; index.len()];
        assert!(!pool.hover_in(RowHandle::new(1), &mut styles));
        assert!(!pool.hover_in(RowHandle::new(9), &mut styles));
        assert!(styles.iter().all(|s| *s == LinkHighlight::Idle));
    }
}
