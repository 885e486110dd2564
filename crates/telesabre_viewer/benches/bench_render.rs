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

//! Benchmarks for scene construction and per-iteration rendering.
//!
//! Uses a synthetic square-grid replay whose size is set by `SIDE`.
//!
//! Run with:
//!
//! ```sh
//! cargo bench --package telesabre_viewer --bench bench_render
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde_json::json;
use telesabre_common::Dataset;
use telesabre_viewer::{PaneLayout, Scene, ViewerConfig, ViewerState, page::render_page};

const SIDE: usize = 12;
const ITERATIONS: usize = 64;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `f` for at least `min_duration` and report per-iteration average.
fn bench<F: FnMut()>(label: &str, iters_per_batch: u64, min_duration: Duration, mut f: F) {
    for _ in 0..iters_per_batch.min(5) {
        f();
    }

    let mut total_iters: u64 = 0;
    let start = Instant::now();
    while start.elapsed() < min_duration {
        for _ in 0..iters_per_batch {
            f();
        }
        total_iters += iters_per_batch;
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / total_iters as u32;
    println!("  {label:<50} {per_iter:>10.2?}/iter  ({total_iters} iters in {elapsed:.2?})");
}

// ---------------------------------------------------------------------------
// Synthetic replay
// ---------------------------------------------------------------------------

/// `SIDE`x`SIDE` grid with nearest-neighbour links and a teleport link across
/// each row. Every iteration rotates the mapping by one.
fn grid_replay() -> Dataset {
    let n = SIDE * SIDE;
    let id = |r: usize, c: usize| r * SIDE + c;
    let positions: Vec<_> = (0..n).map(|q| json!([q % SIDE, q / SIDE])).collect();
    let mut edges = Vec::new();
    for r in 0..SIDE {
        for c in 0..SIDE {
            if c + 1 < SIDE {
                edges.push(json!([id(r, c), id(r, c + 1)]));
            }
            if r + 1 < SIDE {
                edges.push(json!([id(r, c), id(r + 1, c)]));
            }
        }
    }
    let teleports: Vec<_> = (0..SIDE)
        .map(|r| json!([id(r, 0), id(r, SIDE - 1)]))
        .collect();

    let logical = n / 2;
    let gates: Vec<_> = (0..logical - 1).map(|v| json!([v, v + 1])).collect();
    let dag: Vec<_> = (1..gates.len()).map(|g| json!([g - 1, g])).collect();
    let gate_positions: Vec<_> = (0..gates.len()).map(|g| json!([g, g % 2])).collect();

    let iterations: Vec<_> = (0..ITERATIONS)
        .map(|i| {
            let mapping: Vec<_> = (0..n).map(|q| (q + i) % n).collect();
            let front = i % gates.len();
            json!({
                "virt_to_phys": mapping,
                "applied_gates": [[id(0, 0), id(0, 1)]],
                "applied_ops": [[id(1, 0), id(1, 1)], [id(2, 0), id(2, SIDE - 1), id(3, SIDE - 1)]],
                "needed_paths": [[id(4, 0), id(4, 1), id(4, 2), id(4, 3)]],
                "remaining_nodes": (front..gates.len()).collect::<Vec<_>>(),
                "front": [front],
                "candidate_ops": (0..SIDE - 1).map(|c| vec![id(5, c), id(5, c + 1)]).collect::<Vec<_>>(),
                "candidate_ops_scores": vec![1.0; SIDE - 1],
                "candidate_ops_front_scores": vec![0.5; SIDE - 1],
                "candidate_ops_future_scores": vec![0.25; SIDE - 1],
                "solving_deadlock": false,
                "energy": i as f64
            })
        })
        .collect();

    let value = json!({
        "architecture": {
            "node_positions": positions,
            "edges": edges,
            "teleport_edges": teleports
        },
        "circuit": {
            "num_qubits": logical,
            "gates": gates,
            "dag": dag,
            "node_positions": gate_positions
        },
        "iterations": iterations
    });
    Dataset::from_json(&value.to_string()).expect("Synthetic replay should parse")
}

fn main() {
    let dataset = grid_replay();
    let config = ViewerConfig::default();
    let min = Duration::from_secs(2);

    println!("Replay: {SIDE}x{SIDE} grid, {ITERATIONS} iterations");

    bench("scene build", 10, min, || {
        black_box(Scene::build(black_box(&dataset), &config).expect("Scene should build"));
    });

    let mut state = ViewerState::new(dataset, config).expect("Scene should build");
    let mut next = 0;
    bench("render iteration", 100, min, || {
        state.render(next).expect("Render should succeed");
        next = (next + 1) % ITERATIONS;
    });

    let layout = PaneLayout::new(state.config());
    bench("render page", 10, min, || {
        black_box(render_page(&state, &layout));
    });
}
