//! Read-only views handed to collaborators: display state and patch state

use serde::{Deserialize, Serialize};

use crate::chord_name::TriadQuality;
use crate::config::ChordMode;
use crate::sequencer::{MAX_STEPS, Step};
use crate::stacker::Voicing;

/// Everything a panel display needs, copied out of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub current_step: usize,
    pub step_count: usize,
    pub voicing: Voicing,
    /// Root knob reading, e.g. "C3"
    pub root_label: String,
    pub scale_name: String,
    pub mode: ChordMode,
    /// Triad under the playhead
    pub triad: TriadQuality,
    /// Chord symbol per active step
    pub step_labels: Vec<String>,
}

impl DisplaySnapshot {
    pub fn current_label(&self) -> Option<&str> {
        self.step_labels.get(self.current_step).map(String::as_str)
    }
}

/// Knob positions as stored by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelValues {
    pub step_count: f32,
    pub root: f32,
    pub scale: f32,
    pub spread: f32,
}

/// State persisted through the host's generic state mechanism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchState {
    pub panel: PanelValues,
    pub steps: [Step; MAX_STEPS],
    #[serde(default)]
    pub mode: ChordMode,
}
