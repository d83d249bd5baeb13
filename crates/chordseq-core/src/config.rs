//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::params::PanelDefaults;
use crate::scale::ScaleDefinition;
use crate::trigger::TriggerConfig;

/// How a trigger turns the current step into a voicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordMode {
    /// Scale-step stacking, voices in root/third/fifth/extension order
    #[default]
    Stack,
    /// Same chord, each voice moved to the nearest free chord tone
    VoiceLeading,
}

impl ChordMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stack => "Stack",
            Self::VoiceLeading => "Voice Leading",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: ChordMode,
    /// Randomize seed; unset draws one from the OS
    pub seed: Option<u64>,
    pub trigger: TriggerConfig,
    pub defaults: PanelDefaults,
    /// Appended after the built-in scales
    pub scales: Vec<ScaleDefinition>,
}
