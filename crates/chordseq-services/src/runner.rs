//! Offline clock: drives a sequencer sample by sample from an internal pulse

use chordseq_core::{ChordSequencer, DisplaySnapshot, ModuleInputs, ModuleOutputs, RandomSource};
use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::error::{Result, ServiceError};

/// Gate level of the internal clock and reset
pub const PULSE_VOLTS: f32 = 10.0;
/// Pulse width in seconds
pub const PULSE_WIDTH: f32 = 0.001;

pub struct ClockedRunner<R: RandomSource = fastrand::Rng> {
    engine: ChordSequencer<R>,
    sample_rate: f32,
    bpm: f32,
    samples_per_beat: u64,
    pulse_samples: u64,
    sample: u64,
    beats: u64,
    last_outputs: ModuleOutputs,
    sender: Option<Sender<DisplaySnapshot>>,
}

impl<R: RandomSource> ClockedRunner<R> {
    pub fn new(mut engine: ChordSequencer<R>, sample_rate: f32, bpm: f32) -> Result<Self> {
        if !(sample_rate > 0.0 && bpm > 0.0) {
            return Err(ServiceError::InvalidClock { sample_rate, bpm });
        }
        let pulse_samples = ((sample_rate * PULSE_WIDTH).ceil() as u64).max(1);
        let samples_per_beat = ((sample_rate * 60.0 / bpm).round() as u64).max(pulse_samples + 1);

        // Arm the edge detectors so the first beat fires
        let last_outputs = engine.process(&ModuleInputs::default());

        debug!(
            "Clocked runner: {} Hz, {} bpm, {} samples per beat",
            sample_rate, bpm, samples_per_beat
        );

        Ok(Self {
            engine,
            sample_rate,
            bpm,
            samples_per_beat,
            pulse_samples,
            sample: 0,
            beats: 0,
            last_outputs,
            sender: None,
        })
    }

    /// Publish a snapshot on every beat
    pub fn with_sender(mut self, sender: Sender<DisplaySnapshot>) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn randomize(&mut self) {
        self.engine.randomize_now();
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn samples_per_beat(&self) -> u64 {
        self.samples_per_beat
    }

    pub fn engine(&self) -> &ChordSequencer<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ChordSequencer<R> {
        &mut self.engine
    }

    pub fn last_outputs(&self) -> &ModuleOutputs {
        &self.last_outputs
    }

    /// Process one sample. Returns a snapshot when a beat started on it.
    ///
    /// The first beat also pulses reset, so playback starts on step 0.
    pub fn tick(&mut self) -> Option<DisplaySnapshot> {
        let phase = self.sample % self.samples_per_beat;
        let gate = if phase < self.pulse_samples { PULSE_VOLTS } else { 0.0 };
        let reset = if self.beats == 0 { gate } else { 0.0 };

        self.last_outputs = self.engine.process(&ModuleInputs {
            clock: gate,
            reset,
            ..ModuleInputs::default()
        });
        self.sample += 1;

        if phase != 0 {
            return None;
        }
        self.beats += 1;

        let snapshot = self.engine.snapshot();
        if let Some(sender) = &self.sender
            && sender.send(snapshot.clone()).is_err()
        {
            warn!("Snapshot receiver dropped, no longer publishing");
            self.sender = None;
        }
        Some(snapshot)
    }

    /// Run until `beats` more beats have played, collecting their snapshots
    pub fn run_steps(&mut self, beats: usize) -> Vec<DisplaySnapshot> {
        let mut snapshots = Vec::with_capacity(beats);
        while snapshots.len() < beats {
            if let Some(snapshot) = self.tick() {
                snapshots.push(snapshot);
            }
        }
        debug!("Ran {} beats ({} samples)", beats, self.sample);
        snapshots
    }
}
