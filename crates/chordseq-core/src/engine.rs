//! The chord sequencer module: one `process` call per host tick

use crate::chord_name::{TriadQuality, root_label, step_label};
use crate::config::{ChordMode, EngineConfig};
use crate::error::Result;
use crate::output::{ModuleOutputs, VoiceOutputStage};
use crate::params::{ParamId, PanelParams};
use crate::scale::{Scale, ScaleCatalog};
use crate::sequencer::{MAX_DEGREE, Quality, RandomSource, StepSequencer};
use crate::snapshot::{DisplaySnapshot, PanelValues, PatchState};
use crate::stacker::{ChordStacker, Voicing};
use crate::takeover::{CvTakeover, TakeoverInputs};
use crate::trigger::SchmittTrigger;
use crate::voice_leading::VoiceLeadingEngine;

/// Input jack levels for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModuleInputs {
    pub clock: f32,
    pub reset: f32,
    /// Summed with the randomize button; 0 when unpatched
    pub randomize: f32,
    pub takeover: TakeoverInputs,
}

/// Owns all sequencer state. Not shared across instances.
pub struct ChordSequencer<R: RandomSource = fastrand::Rng> {
    catalog: ScaleCatalog,
    params: PanelParams,
    sequencer: StepSequencer,
    takeover: CvTakeover,
    voice_leading: VoiceLeadingEngine,
    clock_trigger: SchmittTrigger,
    reset_trigger: SchmittTrigger,
    randomize_trigger: SchmittTrigger,
    mode: ChordMode,
    voicing: Voicing,
    rng: R,
}

impl ChordSequencer<fastrand::Rng> {
    /// Seeded from `config.seed`, or from the OS when unset
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> ChordSequencer<R> {
    pub fn with_rng(config: &EngineConfig, rng: R) -> Result<Self> {
        config.trigger.validate()?;
        let catalog = ScaleCatalog::builtin_with(&config.scales)?;
        let params = PanelParams::new(
            catalog.scale_count(),
            catalog.default_index(),
            &config.defaults,
        );
        let mut sequencer = StepSequencer::new();
        sequencer.set_step_count(params.step_count());

        tracing::debug!(
            "Chord sequencer ready: {} scales, mode {}",
            catalog.scale_count(),
            config.mode.name()
        );

        Ok(Self {
            takeover: CvTakeover::new(catalog.scale_count()),
            catalog,
            params,
            sequencer,
            voice_leading: VoiceLeadingEngine::default(),
            clock_trigger: SchmittTrigger::from_config(config.trigger),
            reset_trigger: SchmittTrigger::from_config(config.trigger),
            randomize_trigger: SchmittTrigger::from_config(config.trigger),
            mode: config.mode,
            voicing: Voicing::default(),
            rng,
        })
    }

    /// Run one tick. Never allocates.
    pub fn process(&mut self, inputs: &ModuleInputs) -> ModuleOutputs {
        self.takeover.apply(&inputs.takeover, &mut self.params);
        self.sequencer.set_step_count(self.params.step_count());

        // Button and CV share one detector: at most one randomize per tick
        let randomize = self.params.randomize.get() + inputs.randomize;
        if self.randomize_trigger.process(randomize) {
            self.sequencer.randomize(&mut self.rng);
        }

        let clocked = self.clock_trigger.process(inputs.clock);
        if self.reset_trigger.process(inputs.reset) {
            self.sequencer.reset();
        }

        // A reset edge recomputes step 0 and swallows a simultaneous clock
        if self.sequencer.take_forced_edge() {
            self.recompute();
        } else if clocked {
            self.sequencer.advance(true);
            self.recompute();
        }

        VoiceOutputStage::render(&self.voicing, self.params.spread())
    }

    fn recompute(&mut self) {
        let scale = self.catalog.clamped(self.params.scale_index());
        let root = self.params.root_semitone();
        let step = *self.sequencer.current();
        let degree = step.degree as usize;

        self.voicing = match self.mode {
            ChordMode::Stack => ChordStacker::stack(scale, root, degree, step.quality),
            ChordMode::VoiceLeading => {
                let tones = ChordStacker::chord_tones(scale, root, degree, step.quality);
                self.voice_leading.lead_to(&self.voicing, &tones)
            }
        };
    }

    /// Manual knob write; CV takeover still wins on the next tick
    pub fn set_param(&mut self, id: ParamId, value: f32) {
        self.params.set(id, value);
    }

    /// Step degree knob, truncated into `[0, 6]`
    pub fn set_step_degree(&mut self, index: usize, value: f32) {
        let degree = value.clamp(0.0, MAX_DEGREE as f32) as u8;
        self.sequencer.set_degree(index, degree);
    }

    pub fn set_step_quality(&mut self, index: usize, quality: Quality) {
        self.sequencer.set_quality(index, quality);
    }

    pub fn set_mode(&mut self, mode: ChordMode) {
        if self.mode != mode {
            tracing::debug!("Chord mode: {} -> {}", self.mode.name(), mode.name());
            self.mode = mode;
        }
    }

    /// Randomize outside the tick, e.g. from a context menu
    pub fn randomize_now(&mut self) {
        self.sequencer.randomize(&mut self.rng);
    }

    pub fn mode(&self) -> ChordMode {
        self.mode
    }

    pub fn catalog(&self) -> &ScaleCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &PanelParams {
        &self.params
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    /// Last computed voicing, before the spread adjustment
    pub fn voicing(&self) -> Voicing {
        self.voicing
    }

    pub fn current_step(&self) -> usize {
        self.sequencer.current_step()
    }

    /// The scale the knob currently selects
    pub fn scale(&self) -> &Scale {
        self.catalog.clamped(self.params.scale_index())
    }

    /// Copy of the state a display renders. Allocates; call off the audio path.
    pub fn snapshot(&self) -> DisplaySnapshot {
        let root = self.params.root_semitone();
        let scale_index = self.params.scale_index();
        let step_count = self.sequencer.step_count();
        let step_labels = self.sequencer.steps()[..step_count]
            .iter()
            .map(|step| {
                let degree = step.degree as usize;
                step_label(&self.catalog, root, scale_index, degree, step.quality)
            })
            .collect();

        DisplaySnapshot {
            current_step: self.sequencer.current_step(),
            step_count,
            voicing: self.voicing,
            root_label: root_label(root),
            scale_name: self.scale().name().to_string(),
            mode: self.mode,
            triad: TriadQuality::classify(self.scale(), self.sequencer.current().degree as usize),
            step_labels,
        }
    }

    pub fn patch_state(&self) -> PatchState {
        PatchState {
            panel: PanelValues {
                step_count: self.params.step_count.get(),
                root: self.params.root.get(),
                scale: self.params.scale.get(),
                spread: self.params.spread.get(),
            },
            steps: *self.sequencer.steps(),
            mode: self.mode,
        }
    }

    /// Load saved state; knob values are clamped to the current catalog
    pub fn restore(&mut self, state: &PatchState) {
        self.params.set(ParamId::StepCount, state.panel.step_count);
        self.params.set(ParamId::Root, state.panel.root);
        self.params.set(ParamId::Scale, state.panel.scale);
        self.params.set(ParamId::Spread, state.panel.spread);
        self.sequencer.set_steps(state.steps);
        self.sequencer.set_step_count(self.params.step_count());
        self.mode = state.mode;
        tracing::debug!(
            "Patch state restored: {} steps, mode {}",
            self.sequencer.step_count(),
            self.mode.name()
        );
    }
}
