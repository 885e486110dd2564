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
    error,
    fs::File,
    io,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use telesabre_common::Dataset;
use telesabre_viewer::{
    Input, Navigator, PaneLayout, RowHandle, ViewerConfig, ViewerState,
    export::{ensure_parent_dir, export_pages, write_output, write_summary},
    page::render_page,
    svg::{circuit_svg, topology_svg},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Replay document written by the router.
    data: PathBuf,
    #[command(subcommand)]
    command: Command,
    /// JSON file overriding layout and presentation constants.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the logical-qubit palette.
    #[arg(long)]
    seed: Option<u64>,
    /// Autoplay interval in seconds.
    #[arg(long)]
    interval: Option<f64>,
}

#[derive(Subcommand, Clone, PartialEq)]
enum Command {
    /// Render one iteration.
    Render {
        #[arg(short, long, default_value_t = 0)]
        iteration: usize,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = View::Page)]
        view: View,
        /// Highlight the links of this candidate row.
        #[arg(long)]
        inspect: Option<usize>,
    },
    /// Write one page per iteration into a directory.
    Export {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(long, default_value_t = 0)]
        from: usize,
        #[arg(long)]
        to: Option<usize>,
    },
    /// Per-iteration counters as CSV.
    Summary {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Step through iterations on the autoplay timer, rewriting one page.
    Play {
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        from: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum View {
    Page,
    Topology,
    Circuit,
}

fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.palette_seed = seed;
    }
    if let Some(secs) = cli.interval {
        config.autoplay_interval_secs = secs;
    }

    let dataset = Dataset::load(&cli.data)?;

    match cli.command {
        Command::Summary { out } => match out {
            Some(path) => {
                ensure_parent_dir(&path)?;
                write_summary(&dataset, File::create(&path)?)?;
                info!("Wrote summary of {} iterations to {}", dataset.len(), path.display());
            }
            None => write_summary(&dataset, io::stdout().lock())?,
        },
        Command::Render {
            iteration,
            out,
            view,
            inspect,
        } => {
            check_iteration(iteration, dataset.len())?;
            let layout = PaneLayout::new(&config);
            let mut state = ViewerState::new(dataset, config)?;
            state.render(iteration)?;
            if let Some(row) = inspect {
                if !state.hover_candidate(RowHandle::new(row)) {
                    warn!("Candidate row {row} is not shown in iteration {iteration}");
                }
            }
            let contents = match view {
                View::Page => render_page(&state, &layout),
                View::Topology => topology_svg(state.scene(), state.frame(), &layout.topology),
                View::Circuit => {
                    circuit_svg(state.scene(), state.frame(), state.config(), &layout.circuit)
                }
            };
            write_output(&out, &contents)?;
            info!("Wrote iteration {iteration} to {}", out.display());
        }
        Command::Export { dir, from, to } => {
            check_iteration(from, dataset.len())?;
            if let Some(to) = to.filter(|&to| to < from) {
                return Err(format!("--to {to} is before --from {from}").into());
            }
            let layout = PaneLayout::new(&config);
            let mut state = ViewerState::new(dataset, config)?;
            let end = to.map_or(state.len(), |to| to.saturating_add(1));
            let report = export_pages(&mut state, &layout, &dir, from..end)?;
            if !report.skipped.is_empty() {
                warn!("Iterations not exported: {:?}", report.skipped);
            }
        }
        Command::Play { out, from } => {
            check_iteration(from, dataset.len())?;
            let layout = PaneLayout::new(&config);
            let interval = config.autoplay_interval();
            let mut state = ViewerState::new(dataset, config)?;
            play(&mut state, &layout, &out, from, interval)?;
        }
    }
    Ok(())
}

fn check_iteration(index: usize, len: usize) -> Result<(), String> {
    if index < len {
        Ok(())
    } else {
        Err(format!("iteration {index} is outside 0..{len}"))
    }
}

fn play(
    state: &mut ViewerState,
    layout: &PaneLayout,
    out: &Path,
    from: usize,
    interval: Duration,
) -> Result<(), Box<dyn error::Error>> {
    let mut navigator = Navigator::new(state.len(), interval);
    let show = |state: &mut ViewerState, index: usize| -> Result<(), Box<dyn error::Error>> {
        match state.render(index) {
            Ok(()) => write_output(out, &render_page(state, layout))?,
            Err(e) => warn!("Keeping iteration {:?}: {e}", state.current()),
        }
        Ok(())
    };

    if let Some(index) = navigator.apply(Input::Seek(from)) {
        show(state, index)?;
    }
    let timer = navigator.play();
    while navigator.is_playing() {
        thread::sleep(navigator.interval());
        if let Some(index) = navigator.apply(Input::Tick(timer)) {
            info!("Iteration {index} / {}", navigator.max());
            show(state, index)?;
        }
    }
    Ok(())
}
