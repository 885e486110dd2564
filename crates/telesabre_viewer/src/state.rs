// Copyright contributors to the TeleSABRE Replay Viewer project

use log::{debug, info};
use telesabre_common::Dataset;

use crate::{
    candidates::RowHandle,
    config::ViewerConfig,
    error::{RenderError, SceneError},
    frame::Frame,
    render::render_iteration,
    scene::Scene,
};

/// A loaded replay together with its scene and the last committed frame.
#[derive(Debug, Clone)]
pub struct ViewerState {
    config: ViewerConfig,
    dataset: Dataset,
    scene: Scene,
    frame: Frame,
    current: Option<usize>,
}

impl ViewerState {
    pub fn new(dataset: Dataset, config: ViewerConfig) -> Result<Self, SceneError> {
        let scene = Scene::build(&dataset, &config)?;
        info!(
            "Scene has {} qubits, {} links and {} gates over {} iterations",
            scene.num_slots(),
            scene.links.len(),
            scene.gates.len(),
            dataset.len()
        );
        let frame = Frame::initial(&scene);
        Ok(Self {
            config,
            dataset,
            scene,
            frame,
            current: None,
        })
    }

    /// Render iteration `index`. On failure the previous frame stays committed.
    pub fn render(&mut self, index: usize) -> Result<(), RenderError> {
        let frame = render_iteration(&self.scene, &self.dataset, &self.frame, index)?;
        debug!("Committed iteration {index}");
        self.frame = frame;
        self.current = Some(index);
        Ok(())
    }

    pub fn hover_candidate(&mut self, row: RowHandle) -> bool {
        let Frame {
            candidates, links, ..
        } = &mut self.frame;
        candidates.hover_in(row, links)
    }

    pub fn unhover_candidate(&mut self, row: RowHandle) -> bool {
        let Frame {
            candidates, links, ..
        } = &mut self.frame;
        candidates.hover_out(row, links)
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Last successfully rendered iteration.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }
}
