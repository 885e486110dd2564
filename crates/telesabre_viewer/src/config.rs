// Copyright contributors to the TeleSABRE Replay Viewer project

use std::{fs::File, io::BufReader, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Layout and presentation constants. Every field has a default so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Pixels per raw layout unit in the topology view.
    pub qubit_scale: f64,
    /// Raw-unit margin added after moving the topology layout to the origin.
    pub qubit_padding: f64,
    pub qubit_radius: f64,
    pub placeholder_radius: f64,
    /// Pixels per raw layout unit in the circuit view.
    pub gate_scale: f64,
    pub gate_padding: f64,
    pub gate_x_stretch: f64,
    pub gate_y_stretch: f64,
    pub wave_wavelength: f64,
    pub wave_amplitude: f64,
    pub wave_min_samples: usize,
    pub opacity: OpacityLevels,
    pub palette_seed: u64,
    pub autoplay_interval_secs: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub pane_width: f64,
    pub min_pane_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityLevels {
    pub dimmed: f64,
    pub pending: f64,
    pub front: f64,
}

impl Default for OpacityLevels {
    fn default() -> Self {
        Self {
            dimmed: 0.1,
            pending: 0.4,
            front: 1.0,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            qubit_scale: 150.0,
            qubit_padding: 0.2,
            qubit_radius: 7.0,
            placeholder_radius: 3.0,
            gate_scale: 600.0,
            gate_padding: 0.03,
            gate_x_stretch: 1.5,
            gate_y_stretch: 1.5,
            wave_wavelength: 10.0,
            wave_amplitude: 3.0,
            wave_min_samples: 50,
            opacity: OpacityLevels::default(),
            palette_seed: 0,
            autoplay_interval_secs: 0.5,
            min_zoom: 0.1,
            max_zoom: 20.0,
            pane_width: 800.0,
            min_pane_width: 120.0,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Half the width of a gate cell; also the inset applied to dependency lines.
    pub fn gate_unit(&self) -> f64 {
        0.01 * self.gate_scale
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_secs_f64(self.autoplay_interval_secs.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{"qubit_scale": 75, "opacity": {"dimmed": 0.2}}"#).unwrap();
        assert_eq!(75.0, config.qubit_scale);
        assert_eq!(0.2, config.opacity.dimmed);
        assert_eq!(0.4, config.opacity.pending);
        assert_eq!(600.0, config.gate_scale);
        assert_eq!(6.0, config.gate_unit());
    }
}
