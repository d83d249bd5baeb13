//! Chord stacking: scale degree + quality to a four-voice 1 V/oct voicing

use serde::{Deserialize, Serialize};

use crate::scale::{Scale, ScaleCatalog};
use crate::sequencer::Quality;

/// Voices per chord, fixed for the module's lifetime
pub const VOICE_COUNT: usize = 4;

/// Four pitch voltages, 1 V/oct, 0 V = the reference pitch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Voicing(pub [f32; VOICE_COUNT]);

impl Voicing {
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Voicing {
    type Output = f32;

    fn index(&self, voice: usize) -> &f32 {
        &self.0[voice]
    }
}

/// The stacked chord as a root pitch class plus semitone intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTones {
    pub root: i32,
    pub intervals: [i32; VOICE_COUNT],
}

/// Root, third and fifth in scale steps
const TRIAD_OFFSETS: [usize; 3] = [0, 2, 4];

pub struct ChordStacker;

impl ChordStacker {
    /// Scale-step offsets of the four voices, in voice order
    pub fn offsets(quality: Quality) -> [usize; VOICE_COUNT] {
        let [root, third, fifth] = TRIAD_OFFSETS;
        [root, third, fifth, quality.fourth_voice_offset()]
    }

    /// Voicing for `degree` of `scale`, transposed by `root` semitones.
    ///
    /// Offsets past the end of the scale wrap into the next octave.
    pub fn stack(scale: &Scale, root: i64, degree: usize, quality: Quality) -> Voicing {
        let base = root as f32 / 12.0;
        Voicing(Self::offsets(quality).map(|offset| {
            let (pitch_class, octave) = scale.fold(degree + offset);
            base + pitch_class as f32 / 12.0 + octave as f32
        }))
    }

    /// [`Self::stack`] with the scale index clamped into the catalog
    pub fn stack_in(
        catalog: &ScaleCatalog,
        root: i64,
        scale_index: i64,
        degree: usize,
        quality: Quality,
    ) -> Voicing {
        Self::stack(catalog.clamped(scale_index), root, degree, quality)
    }

    /// Chord root pitch class and each voice's interval above it
    pub fn chord_tones(scale: &Scale, root: i64, degree: usize, quality: Quality) -> ChordTones {
        let semitones = Self::offsets(quality).map(|offset| {
            let (pitch_class, octave) = scale.fold(degree + offset);
            pitch_class as i32 + 12 * octave as i32
        });
        let chord_root = semitones[0];
        ChordTones {
            root: (root as i32 + chord_root).rem_euclid(12),
            intervals: semitones.map(|s| s - chord_root),
        }
    }
}
