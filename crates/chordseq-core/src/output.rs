//! Output stage: spread adjustment and port writes

use crate::stacker::{VOICE_COUNT, Voicing};

/// Spread above which the bass voice drops an octave
pub const SPREAD_DROP_THRESHOLD: f32 = 0.5;

/// Values written to the output jacks for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModuleOutputs {
    /// One mono jack per voice
    pub voices: [f32; VOICE_COUNT],
    /// Polyphonic jack, one channel per voice
    pub poly: [f32; VOICE_COUNT],
    pub poly_channels: usize,
    /// Voice indicator brightness
    pub lights: [f32; VOICE_COUNT],
}

pub struct VoiceOutputStage;

impl VoiceOutputStage {
    /// Voice voltages after the spread adjustment
    pub fn spread(voicing: &Voicing, spread: f32) -> [f32; VOICE_COUNT] {
        let mut voices = voicing.0;
        if spread.clamp(0.0, 1.0) > SPREAD_DROP_THRESHOLD {
            voices[0] -= 1.0;
        }
        voices
    }

    pub fn render(voicing: &Voicing, spread: f32) -> ModuleOutputs {
        let voices = Self::spread(voicing, spread);
        ModuleOutputs {
            voices,
            poly: voices,
            poly_channels: VOICE_COUNT,
            lights: [1.0; VOICE_COUNT],
        }
    }
}
