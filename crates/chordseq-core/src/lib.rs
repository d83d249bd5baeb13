//! chordseq-core: Scale-aware chord sequencer engine

pub mod chord_name;
mod config;
mod engine;
mod error;
mod output;
mod params;
pub mod scale;
mod sequencer;
mod snapshot;
mod stacker;
mod takeover;
mod trigger;
mod voice_leading;

pub use chord_name::{TriadQuality, chord_name, root_label, step_label};
pub use config::{ChordMode, EngineConfig};
pub use engine::{ChordSequencer, ModuleInputs};
pub use error::{ChordSeqError, Result};
pub use output::{ModuleOutputs, VoiceOutputStage};
pub use params::{ControlParam, PanelDefaults, PanelParams, ParamId};
pub use scale::{Scale, ScaleCatalog, ScaleDefinition};
pub use sequencer::{MAX_DEGREE, MAX_STEPS, Quality, RandomSource, Step, StepSequencer};
pub use snapshot::{DisplaySnapshot, PanelValues, PatchState};
pub use stacker::{ChordStacker, ChordTones, VOICE_COUNT, Voicing};
pub use takeover::{CvTakeover, TakeoverInputs};
pub use trigger::{SchmittState, SchmittTrigger, TriggerConfig};
pub use voice_leading::{REFERENCE_NOTE, VoiceLeadingEngine};
